//! Top-level game states
//!
//! The front-end owns one [`App`] and calls [`App::update`] then
//! [`App::draw`] once per frame.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::audio::{AudioSink, SoundEffect};
use crate::config::{ConfigError, GameConfig};
use crate::input::{CleanPress, KeyState};
use crate::renderer::{Anchor, Screen, Sprite};
use crate::sim::World;

/// Current phase of the app
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppState {
    /// Title screen over a demo world
    Menu,
    /// Active gameplay
    #[default]
    Play,
    /// Run ended
    GameOver,
}

/// Everything the frame handlers need
pub struct App {
    pub state: AppState,
    world: World,
    config: GameConfig,
    space: CleanPress,
    /// Seed for the next world
    next_seed: u64,
}

impl App {
    /// Validate the config and build the first world from `seed`
    pub fn new(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        let world = World::new(&config, seed)?;
        log::info!("App starting in {:?}", config.initial_state);
        Ok(Self {
            state: config.initial_state,
            world,
            config,
            space: CleanPress::new(),
            next_seed: seed.wrapping_add(1),
        })
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    /// Replace the world with a fresh one from the next seed
    fn new_world(&mut self) {
        let seed = self.next_seed;
        self.next_seed = self.next_seed.wrapping_add(1);
        // Config was validated when the app was built
        match World::new(&self.config, seed) {
            Ok(world) => self.world = world,
            Err(e) => log::error!("Failed to build world: {}", e),
        }
    }

    /// Advance one frame
    pub fn update(&mut self, keys: &KeyState, audio: &mut dyn AudioSink) {
        match self.state {
            AppState::Menu => {
                if self.space.pressed(keys.space) {
                    log::info!("Starting game");
                    self.state = AppState::Play;
                    self.new_world();
                } else {
                    self.world.update();
                }
            }
            AppState::Play => {
                // No game-over condition yet
                self.world.update();
            }
            AppState::GameOver => {
                if self.space.pressed(keys.space) {
                    log::info!("Back to menu");
                    self.state = AppState::Menu;
                    self.new_world();
                }
            }
        }

        for event in self.world.drain_events() {
            if let Some(effect) = SoundEffect::for_event(&event) {
                audio.play(effect);
            }
        }
    }

    /// Paint the world, then any full-screen overlay
    pub fn draw(&self, screen: &mut dyn Screen) {
        self.world.draw(screen);

        match self.state {
            AppState::Menu => screen.blit(Sprite::Title, Vec2::ZERO, Anchor::TopLeft),
            AppState::Play => {}
            AppState::GameOver => screen.blit(Sprite::GameOver, Vec2::ZERO, Anchor::TopLeft),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::RecordingAudio;
    use crate::input::TapScript;
    use crate::renderer::SpriteBatch;
    use crate::sim::PlayerAction;

    const UP: KeyState = KeyState { space: false };
    const DOWN: KeyState = KeyState { space: true };

    fn app_in(state: AppState) -> App {
        let config = GameConfig {
            initial_state: state,
            ..Default::default()
        };
        App::new(config, 1000).unwrap()
    }

    #[test]
    fn starts_in_configured_state() {
        assert_eq!(app_in(AppState::Play).state, AppState::Play);
        assert_eq!(app_in(AppState::Menu).state, AppState::Menu);
    }

    #[test]
    fn menu_runs_demo_until_clean_press() {
        let mut app = app_in(AppState::Menu);
        let mut audio = RecordingAudio::default();

        app.update(&UP, &mut audio);
        app.update(&UP, &mut audio);
        assert_eq!(app.state, AppState::Menu);
        assert_eq!(app.world().time_ticks, 2);
        assert_eq!(app.world().seed, 1000);

        app.update(&DOWN, &mut audio);
        assert_eq!(app.state, AppState::Play);
        assert_eq!(app.world().seed, 1001);
        assert_eq!(app.world().time_ticks, 0);
    }

    #[test]
    fn game_over_needs_a_fresh_press() {
        let mut app = app_in(AppState::GameOver);
        let mut audio = RecordingAudio::default();

        // Held from before counts as the first press
        app.update(&DOWN, &mut audio);
        assert_eq!(app.state, AppState::Menu);

        // Still held: the menu must not start a game
        app.update(&DOWN, &mut audio);
        assert_eq!(app.state, AppState::Menu);

        app.update(&UP, &mut audio);
        app.update(&DOWN, &mut audio);
        assert_eq!(app.state, AppState::Play);
    }

    #[test]
    fn game_over_freezes_world() {
        let mut app = app_in(AppState::GameOver);
        let mut audio = RecordingAudio::default();
        for _ in 0..10 {
            app.update(&UP, &mut audio);
        }
        assert_eq!(app.world().time_ticks, 0);
        assert_eq!(app.state, AppState::GameOver);
    }

    #[test]
    fn play_ignores_space() {
        let mut app = app_in(AppState::Play);
        let mut audio = RecordingAudio::default();
        for keys in [DOWN, UP, DOWN] {
            app.update(&keys, &mut audio);
        }
        assert_eq!(app.state, AppState::Play);
        assert_eq!(app.world().time_ticks, 3);
    }

    #[test]
    fn bite_plays_exactly_once() {
        let config = GameConfig {
            grass_percentage: 1.0,
            ..Default::default()
        };
        let mut app = App::new(config.clone(), 55).unwrap();
        let mut audio = RecordingAudio::default();

        // Every neighbour holds grass, so the first legal roll is a bite
        let mut ticks = 0;
        while !matches!(app.world().players()[0].action, PlayerAction::Consume { .. }) {
            app.update(&UP, &mut audio);
            ticks += 1;
            assert!(ticks < 100, "mac never started eating");
        }
        assert!(audio.effects.is_empty());

        for _ in 0..config.consume_duration {
            app.update(&UP, &mut audio);
        }
        assert_eq!(audio.effects, vec![SoundEffect::Bite]);
    }

    #[test]
    fn scripted_taps_leave_the_menu() {
        let mut app = app_in(AppState::Menu);
        let mut audio = RecordingAudio::default();
        let script = TapScript::every(60).unwrap();

        app.update(&script.keys_at(0), &mut audio);
        assert_eq!(app.state, AppState::Play);
        for frame in 1..120 {
            app.update(&script.keys_at(frame), &mut audio);
        }
        assert_eq!(app.state, AppState::Play);
        assert_eq!(app.world().time_ticks, 119);
    }

    #[test]
    fn overlays_draw_last() {
        let mut batch = SpriteBatch::new(640, 640, 40);
        app_in(AppState::Menu).draw(&mut batch);
        let last = batch.blits().last().copied().unwrap();
        assert_eq!(last.sprite, Sprite::Title);
        assert_eq!(last.pos, Vec2::ZERO);
        assert_eq!(last.anchor, Anchor::TopLeft);

        let mut batch = SpriteBatch::new(640, 640, 40);
        app_in(AppState::GameOver).draw(&mut batch);
        assert_eq!(batch.blits().last().map(|b| b.sprite), Some(Sprite::GameOver));

        let mut batch = SpriteBatch::new(640, 640, 40);
        app_in(AppState::Play).draw(&mut batch);
        assert!(matches!(
            batch.blits().last().map(|b| b.sprite),
            Some(Sprite::Mac { .. })
        ));
    }
}
