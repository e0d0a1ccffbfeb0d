//! Procedural layout: tiles, Mac spawn cells and the grass mask

use std::collections::HashSet;

use glam::Vec2;
use rand::Rng;

use crate::config::{GameConfig, SpawnPolicy};
use crate::tile_center;

/// A grid coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub column: u32,
    pub row: u32,
}

impl Cell {
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Pixel center of the cell (column along x, row along y)
    pub fn center(&self, tile_size: u32) -> Vec2 {
        Vec2::new(
            tile_center(self.column, tile_size),
            tile_center(self.row, tile_size),
        )
    }
}

/// Inputs to layout generation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridParams {
    pub tiles_width: u32,
    pub tiles_height: u32,
    pub tile_size: u32,
    pub n_players: u32,
    pub grass_percentage: f64,
    pub spawn_policy: SpawnPolicy,
}

impl From<&GameConfig> for GridParams {
    fn from(config: &GameConfig) -> Self {
        Self {
            tiles_width: config.tiles_width(),
            tiles_height: config.tiles_height(),
            tile_size: config.tile_size,
            n_players: config.n_players,
            grass_percentage: config.grass_percentage,
            spawn_policy: config.spawn_policy,
        }
    }
}

/// A generated starting layout
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub tiles_width: u32,
    pub tiles_height: u32,
    /// One entry per cell, row-major
    pub tiles: Vec<Cell>,
    /// Mac start cells, in spawn order
    pub spawns: Vec<Cell>,
    /// Row-major; true where grass starts
    pub grass_mask: Vec<bool>,
}

impl Layout {
    fn index(&self, cell: Cell) -> usize {
        (cell.row * self.tiles_width + cell.column) as usize
    }

    pub fn has_grass(&self, cell: Cell) -> bool {
        self.grass_mask[self.index(cell)]
    }

    /// Cells that start with grass, row-major
    pub fn grass_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.tiles
            .iter()
            .copied()
            .filter(|cell| self.has_grass(*cell))
    }
}

/// Generate a layout.
///
/// Spawns are drawn first, then the grass mask; every spawn cell is cleared
/// from the mask afterwards, so a Mac always wins its cell over grass.
pub fn generate_layout<R: Rng>(params: &GridParams, rng: &mut R) -> Layout {
    let tiles: Vec<Cell> = (0..params.tiles_height)
        .flat_map(|row| (0..params.tiles_width).map(move |column| Cell::new(column, row)))
        .collect();

    let spawns = sample_spawns(params, rng);

    let grass_mask: Vec<bool> = tiles
        .iter()
        .map(|_| rng.random_bool(params.grass_percentage))
        .collect();

    let mut layout = Layout {
        tiles_width: params.tiles_width,
        tiles_height: params.tiles_height,
        tiles,
        spawns,
        grass_mask,
    };

    for spawn in layout.spawns.clone() {
        let index = layout.index(spawn);
        layout.grass_mask[index] = false;
    }

    layout
}

fn sample_spawns<R: Rng>(params: &GridParams, rng: &mut R) -> Vec<Cell> {
    let mut spawns = Vec::with_capacity(params.n_players as usize);
    let mut taken = HashSet::new();

    while spawns.len() < params.n_players as usize {
        let cell = Cell::new(
            rng.random_range(0..params.tiles_width),
            rng.random_range(0..params.tiles_height),
        );
        if params.spawn_policy == SpawnPolicy::RejectCollisions && !taken.insert(cell) {
            continue;
        }
        spawns.push(cell);
    }

    spawns
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn params(w: u32, h: u32, players: u32, grass: f64) -> GridParams {
        GridParams {
            tiles_width: w,
            tiles_height: h,
            tile_size: 40,
            n_players: players,
            grass_percentage: grass,
            spawn_policy: SpawnPolicy::RejectCollisions,
        }
    }

    #[test]
    fn cell_center_maps_column_to_x() {
        let cell = Cell::new(2, 0);
        assert_eq!(cell.center(40), Vec2::new(100.0, 20.0));
    }

    #[test]
    fn full_grass_everywhere_but_spawns() {
        let mut rng = Pcg32::seed_from_u64(42);
        let layout = generate_layout(&params(16, 16, 3, 1.0), &mut rng);

        assert_eq!(layout.grass_cells().count(), 16 * 16 - 3);
        for spawn in &layout.spawns {
            assert!(!layout.has_grass(*spawn));
        }
    }

    #[test]
    fn no_grass_when_probability_zero() {
        let mut rng = Pcg32::seed_from_u64(42);
        let layout = generate_layout(&params(16, 16, 1, 0.0), &mut rng);
        assert_eq!(layout.grass_cells().count(), 0);
    }

    #[test]
    fn rejection_fills_every_cell() {
        let mut rng = Pcg32::seed_from_u64(5);
        let layout = generate_layout(&params(2, 2, 4, 0.5), &mut rng);
        let unique: HashSet<Cell> = layout.spawns.iter().copied().collect();
        assert_eq!(unique.len(), 4);
        assert_eq!(layout.grass_cells().count(), 0);
    }

    #[test]
    fn allow_collisions_can_stack_spawns() {
        let mut p = params(1, 1, 3, 0.0);
        p.spawn_policy = SpawnPolicy::AllowCollisions;
        let mut rng = Pcg32::seed_from_u64(5);
        let layout = generate_layout(&p, &mut rng);
        assert_eq!(layout.spawns, vec![Cell::new(0, 0); 3]);
    }

    #[test]
    fn same_seed_same_layout() {
        let p = params(12, 9, 2, 0.25);
        let a = generate_layout(&p, &mut Pcg32::seed_from_u64(99));
        let b = generate_layout(&p, &mut Pcg32::seed_from_u64(99));
        assert_eq!(a, b);
    }

    proptest! {
        #[test]
        fn one_tile_per_cell(w in 1u32..24, h in 1u32..24, seed in any::<u64>()) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let layout = generate_layout(&params(w, h, 1, 0.25), &mut rng);

            prop_assert_eq!(layout.tiles.len(), (w * h) as usize);
            let unique: HashSet<Cell> = layout.tiles.iter().copied().collect();
            prop_assert_eq!(unique.len(), (w * h) as usize);
            prop_assert!(layout.tiles.iter().all(|c| c.column < w && c.row < h));
        }

        #[test]
        fn spawns_never_hold_grass(
            w in 1u32..16,
            h in 1u32..16,
            grass in 0.0f64..=1.0,
            seed in any::<u64>(),
        ) {
            let players = (w * h).min(4);
            let mut rng = Pcg32::seed_from_u64(seed);
            let layout = generate_layout(&params(w, h, players, grass), &mut rng);

            prop_assert_eq!(layout.spawns.len(), players as usize);
            for spawn in &layout.spawns {
                prop_assert!(spawn.column < w && spawn.row < h);
                prop_assert!(!layout.has_grass(*spawn));
            }
        }
    }
}
