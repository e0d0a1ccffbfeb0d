//! The world: three layers of entities and the per-tick update

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::entity::{GameEvent, draw_layer};
use super::grass::Grass;
use super::grid::{Cell, GridParams, Layout, generate_layout};
use super::player::{Coat, Player};
use super::tile::Dirt;
use crate::config::{ConfigError, GameConfig};
use crate::renderer::Screen;

/// Owns every entity. Only the world adds or removes them.
#[derive(Debug, Clone)]
pub struct World {
    /// Run seed for reproducibility
    pub seed: u64,
    config: GameConfig,
    rng: Pcg32,
    /// Background layer
    dirt: Vec<Dirt>,
    /// Foreground layer
    grass: Vec<Grass>,
    /// Actor layer
    players: Vec<Player>,
    /// Where each Mac started
    spawns: Vec<Cell>,
    /// Simulation tick counter
    pub time_ticks: u64,
    events: Vec<GameEvent>,
    next_id: u32,
}

impl World {
    /// Validate the config and generate a fresh world from `seed`
    pub fn new(config: &GameConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut rng = Pcg32::seed_from_u64(seed);
        let layout = generate_layout(&GridParams::from(config), &mut rng);
        Ok(Self::from_layout(config, layout, seed, rng))
    }

    /// Populate a world from an existing layout
    pub fn from_layout(config: &GameConfig, layout: Layout, seed: u64, mut rng: Pcg32) -> Self {
        let tile_size = config.tile_size;
        let mut next_id = 1;
        let mut alloc = || {
            let id = next_id;
            next_id += 1;
            id
        };

        let dirt = layout
            .tiles
            .iter()
            .map(|cell| Dirt::new(cell.center(tile_size)))
            .collect();

        let grass: Vec<Grass> = layout
            .grass_cells()
            .map(|cell| Grass::new(alloc(), cell.center(tile_size), tile_size, config.consume_duration))
            .collect();

        let players: Vec<Player> = layout
            .spawns
            .iter()
            .map(|cell| Player::new(alloc(), cell.center(tile_size), Coat::random(&mut rng)))
            .collect();

        log::info!(
            "World {}x{} (seed {}): {} grass, {} mac(s)",
            layout.tiles_width,
            layout.tiles_height,
            seed,
            grass.len(),
            players.len()
        );

        Self {
            seed,
            config: config.clone(),
            rng,
            dirt,
            grass,
            players,
            spawns: layout.spawns,
            time_ticks: 0,
            events: Vec::new(),
            next_id,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn dirt(&self) -> &[Dirt] {
        &self.dirt
    }

    pub fn grass(&self) -> &[Grass] {
        &self.grass
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn spawns(&self) -> &[Cell] {
        &self.spawns
    }

    /// Add a grass tuft at a cell (level setup and tests)
    pub fn plant_grass(&mut self, cell: Cell) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        self.grass.push(Grass::new(
            id,
            cell.center(self.config.tile_size),
            self.config.tile_size,
            self.config.consume_duration,
        ));
        id
    }

    /// Advance one tick: background, then grass, then Macs, then prune
    pub fn update(&mut self) {
        self.time_ticks += 1;

        for tile in &mut self.dirt {
            tile.update();
        }
        for tuft in &mut self.grass {
            tuft.update();
        }
        for player in &mut self.players {
            player.update(&mut self.grass, &self.config, &mut self.rng, &mut self.events);
        }

        self.grass.retain(|g| !g.is_removed());
    }

    /// Paint background, foreground and Macs in that order
    pub fn draw(&self, screen: &mut dyn Screen) {
        draw_layer(&self.dirt, screen);
        draw_layer(&self.grass, screen);
        draw_layer(&self.players, screen);
    }

    /// Take the events raised since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SpawnPolicy;
    use crate::renderer::{Sprite, SpriteBatch};
    use crate::sim::grass::GrassState;
    use crate::sim::player::{Direction, MoveOutcome, PlayerAction, in_bounds};
    use proptest::prelude::*;

    fn config(grass: f64) -> GameConfig {
        GameConfig {
            grass_percentage: grass,
            ..Default::default()
        }
    }

    /// Empty 16x16 layout with a single Mac at (8, 8)
    fn lone_mac_world() -> World {
        let config = config(0.0);
        let tiles = (0..16)
            .flat_map(|row| (0..16).map(move |column| Cell::new(column, row)))
            .collect();
        let layout = Layout {
            tiles_width: 16,
            tiles_height: 16,
            tiles,
            spawns: vec![Cell::new(8, 8)],
            grass_mask: vec![false; 256],
        };
        World::from_layout(&config, layout, 1, Pcg32::seed_from_u64(1))
    }

    #[test]
    fn construction_covers_grid() {
        let world = World::new(&config(0.25), 12345).unwrap();
        assert_eq!(world.dirt().len(), 256);
        assert_eq!(world.players().len(), 1);
        assert!(world.grass().len() < 256);
    }

    #[test]
    fn invalid_config_is_rejected_before_generation() {
        let config = GameConfig {
            grass_percentage: -0.1,
            ..Default::default()
        };
        assert!(World::new(&config, 1).is_err());
    }

    #[test]
    fn no_grass_under_spawns() {
        let config = GameConfig {
            grass_percentage: 1.0,
            n_players: 6,
            ..Default::default()
        };
        let world = World::new(&config, 77).unwrap();
        assert_eq!(world.grass().len(), 256 - 6);
        for spawn in world.spawns() {
            let center = spawn.center(40);
            assert!(world.grass().iter().all(|g| g.pos != center));
        }
    }

    #[test]
    fn allow_collisions_is_honoured() {
        let config = GameConfig {
            width: 40,
            height: 40,
            n_players: 2,
            spawn_policy: SpawnPolicy::AllowCollisions,
            ..Default::default()
        };
        let world = World::new(&config, 3).unwrap();
        assert_eq!(world.players()[0].pos, world.players()[1].pos);
    }

    #[test]
    fn lone_mac_hops_on_first_decision() {
        let mut world = lone_mac_world();
        assert!(world.grass().is_empty());

        world.update();
        assert!(matches!(world.players()[0].action, PlayerAction::Hop { .. }));
    }

    #[test]
    fn lone_mac_stays_in_bounds() {
        let mut world = lone_mac_world();
        for _ in 0..5000 {
            world.update();
            let mac = &world.players()[0];
            assert!(in_bounds(mac.pos, world.config()));
        }
    }

    #[test]
    fn eaten_grass_is_pruned_after_consume_duration() {
        let mut world = lone_mac_world();
        world.plant_grass(Cell::new(9, 8));
        let outcome = {
            let World {
                players, grass, config, ..
            } = &mut world;
            players[0].attempt_hop(Direction::Right, grass, config)
        };
        assert!(matches!(outcome, MoveOutcome::Interacted(_)));
        assert_eq!(world.grass()[0].state, GrassState::Consuming { remaining: 20 });

        for _ in 0..19 {
            world.update();
            assert_eq!(world.grass().len(), 1);
        }
        world.update();
        assert!(world.grass().is_empty());
        assert_eq!(world.drain_events(), vec![GameEvent::Bite { player: 1 }]);
        assert!(world.drain_events().is_empty());
    }

    #[test]
    fn surrounded_mac_eats_on_first_decision() {
        let mut world = lone_mac_world();
        for cell in [
            Cell::new(8, 7),
            Cell::new(8, 9),
            Cell::new(7, 8),
            Cell::new(9, 8),
        ] {
            world.plant_grass(cell);
        }

        world.update();
        let mac = &world.players()[0];
        assert_eq!(
            mac.action,
            PlayerAction::Consume {
                remaining: 20,
                fresh: true
            }
        );
        assert_eq!(mac.pos, Cell::new(8, 8).center(40));

        let eaten: Vec<&Grass> = world.grass().iter().filter(|g| !g.is_interactable()).collect();
        assert_eq!(eaten.len(), 1);
        assert_eq!(eaten[0].state, GrassState::Consuming { remaining: 20 });
        let target = mac.pos + mac.facing.offset() * 40.0;
        assert_eq!(eaten[0].pos, target);
    }

    #[test]
    fn draw_uses_painters_order() {
        let mut world = lone_mac_world();
        world.plant_grass(Cell::new(0, 0));
        let mut batch = SpriteBatch::new(640, 640, 40);
        world.draw(&mut batch);

        let blits = batch.blits();
        assert_eq!(blits.len(), 256 + 1 + 1);
        assert!(blits[..256].iter().all(|b| b.sprite == Sprite::Dirt));
        assert_eq!(blits[256].sprite, Sprite::Grass);
        assert!(matches!(blits[257].sprite, Sprite::Mac { .. }));
    }

    #[test]
    fn same_seed_same_run() {
        let config = config(0.25);
        let mut a = World::new(&config, 2024).unwrap();
        let mut b = World::new(&config, 2024).unwrap();
        for _ in 0..600 {
            a.update();
            b.update();
        }
        assert_eq!(a.players(), b.players());
        assert_eq!(a.grass(), b.grass());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn macs_never_leave_the_world(seed in any::<u64>(), players in 1u32..5) {
            let config = GameConfig {
                width: 200,
                height: 160,
                n_players: players,
                grass_percentage: 0.3,
                ..Default::default()
            };
            let mut world = World::new(&config, seed).unwrap();
            for _ in 0..1500 {
                world.update();
                for mac in world.players() {
                    prop_assert!(in_bounds(mac.pos, world.config()));
                }
            }
        }

        #[test]
        fn grass_only_shrinks(seed in any::<u64>()) {
            let mut world = World::new(&config(0.5), seed).unwrap();
            let mut last = world.grass().len();
            for _ in 0..600 {
                world.update();
                prop_assert!(world.grass().len() <= last);
                prop_assert!(world.grass().iter().all(|g| !g.is_removed()));
                last = world.grass().len();
            }
        }
    }
}
