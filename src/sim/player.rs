//! Mac - the hungry actor
//!
//! A Mac waits, picks a random direction, and either hops one tile that way
//! or, when grass sits at the destination, eats it on the spot.

use glam::Vec2;
use rand::Rng;

use super::entity::{Drawable, GameEvent, InteractionKind};
use super::grass::Grass;
use crate::config::GameConfig;
use crate::renderer::vertex::colors;
use crate::renderer::{Anchor, Screen, Sprite};

/// Cardinal directions (screen space, y down)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Unit step in pixel space
    pub fn offset(&self) -> Vec2 {
        match self {
            Direction::Up => Vec2::new(0.0, -1.0),
            Direction::Down => Vec2::new(0.0, 1.0),
            Direction::Left => Vec2::new(-1.0, 0.0),
            Direction::Right => Vec2::new(1.0, 0.0),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }

    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }
}

/// Fur colour, picked once at spawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coat {
    Brown,
    Ginger,
    Cream,
}

impl Coat {
    pub const ALL: [Coat; 3] = [Coat::Brown, Coat::Ginger, Coat::Cream];

    pub fn as_str(&self) -> &'static str {
        match self {
            Coat::Brown => "brown",
            Coat::Ginger => "ginger",
            Coat::Cream => "cream",
        }
    }

    pub fn color(&self) -> [f32; 4] {
        match self {
            Coat::Brown => colors::MAC_BROWN,
            Coat::Ginger => colors::MAC_GINGER,
            Coat::Cream => colors::MAC_CREAM,
        }
    }

    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }
}

/// Which image variant to show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pose {
    Idle,
    Hop,
    Eat,
}

impl Pose {
    pub fn as_str(&self) -> &'static str {
        match self {
            Pose::Idle => "idle",
            Pose::Hop => "hop",
            Pose::Eat => "eat",
        }
    }
}

/// What the Mac is doing; exactly one at a time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerAction {
    /// Waiting `delay` ticks before the next decision
    Idle { delay: u32 },
    /// Mid-hop, `remaining` ticks of movement left
    Hop { remaining: u32 },
    /// Eating, `remaining` ticks of the bite left. `fresh` until the bite
    /// event has been raised.
    Consume { remaining: u32, fresh: bool },
}

/// Result of trying to hop in a direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    Hop,
    /// Off the edge of the world, or into grass someone is already eating
    Blocked,
    Interacted(InteractionKind),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub id: u32,
    pub pos: Vec2,
    pub facing: Direction,
    pub action: PlayerAction,
    pub coat: Coat,
    pub pose: Pose,
}

impl Player {
    pub fn new(id: u32, pos: Vec2, coat: Coat) -> Self {
        Self {
            id,
            pos,
            facing: Direction::Down,
            action: PlayerAction::Idle { delay: 0 },
            coat,
            pose: Pose::Idle,
        }
    }

    /// Current image tag
    pub fn sprite(&self) -> Sprite {
        Sprite::Mac {
            coat: self.coat,
            facing: self.facing,
            pose: self.pose,
        }
    }

    /// Advance one tick
    pub fn update<R: Rng>(
        &mut self,
        grass: &mut [Grass],
        config: &GameConfig,
        rng: &mut R,
        events: &mut Vec<GameEvent>,
    ) {
        match self.action {
            PlayerAction::Idle { delay } if delay > 0 => {
                self.action = PlayerAction::Idle { delay: delay - 1 };
            }
            PlayerAction::Hop { remaining } => {
                self.pos += self.facing.offset() * config.hop_speed;
                let remaining = remaining.saturating_sub(1);
                if remaining == 0 {
                    self.go_idle(config, rng);
                } else {
                    self.action = PlayerAction::Hop { remaining };
                }
            }
            PlayerAction::Consume { remaining, fresh } => {
                if fresh {
                    events.push(GameEvent::Bite { player: self.id });
                }
                let remaining = remaining.saturating_sub(1);
                if remaining == 0 {
                    self.go_idle(config, rng);
                } else {
                    self.action = PlayerAction::Consume {
                        remaining,
                        fresh: false,
                    };
                }
            }
            PlayerAction::Idle { .. } => {
                let direction = Direction::random(rng);
                self.attempt_hop(direction, grass, config);
            }
        }
    }

    /// Decide what a hop toward `direction` does and start it.
    ///
    /// Grass at the destination is bitten (at most one tuft) instead of
    /// hopped onto. A blocked attempt leaves the Mac idle with no delay, so
    /// it rolls again next tick.
    pub fn attempt_hop(
        &mut self,
        direction: Direction,
        grass: &mut [Grass],
        config: &GameConfig,
    ) -> MoveOutcome {
        let dest = self.pos + direction.offset() * config.hop_distance();

        let outcome = if !in_bounds(dest, config) {
            MoveOutcome::Blocked
        } else {
            match grass
                .iter_mut()
                .find(|g| !g.is_removed() && g.detect_interaction(dest))
            {
                Some(tuft) if tuft.is_interactable() => {
                    MoveOutcome::Interacted(tuft.perform_interaction())
                }
                Some(_) => MoveOutcome::Blocked,
                None => MoveOutcome::Hop,
            }
        };

        match outcome {
            MoveOutcome::Hop => {
                log::debug!("Mac {} hops {}", self.id, direction.as_str());
                self.facing = direction;
                self.pose = Pose::Hop;
                self.action = PlayerAction::Hop {
                    remaining: config.hop_duration,
                };
            }
            MoveOutcome::Interacted(InteractionKind::Consume) => {
                log::debug!("Mac {} eats grass to the {}", self.id, direction.as_str());
                self.facing = direction;
                self.pose = Pose::Eat;
                self.action = PlayerAction::Consume {
                    remaining: config.consume_duration,
                    fresh: true,
                };
            }
            MoveOutcome::Blocked => {
                log::debug!("Mac {} blocked going {}", self.id, direction.as_str());
                self.action = PlayerAction::Idle { delay: 0 };
            }
        }

        outcome
    }

    fn go_idle<R: Rng>(&mut self, config: &GameConfig, rng: &mut R) {
        self.action = PlayerAction::Idle {
            delay: rng.random_range(config.idle_delay_range()),
        };
        self.pose = Pose::Idle;
    }
}

/// Whether a point lies within the world, edges included
pub fn in_bounds(pos: Vec2, config: &GameConfig) -> bool {
    (0.0..=config.width as f32).contains(&pos.x) && (0.0..=config.height as f32).contains(&pos.y)
}

impl Drawable for Player {
    fn draw(&self, screen: &mut dyn Screen) {
        screen.blit(self.sprite(), self.pos, Anchor::Center);
    }
}
