use super::constants::{
    BASE_PICKUP_COUNT, MAX_SPAWN_ATTEMPTS, PICKUP_CLEARANCE, PICKUP_EXTENT, PICKUP_VALUE,
    STARTING_LENGTH,
};
use super::input::SteerCommand;
use super::math::magnitude;
use super::pickup::Pickup;
use super::sat::sat_collision;
use super::snake::{Snake, SnakeParams};
use super::types::Vec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::f64::consts::PI;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize)]
pub struct SegmentSnapshot {
    pub position: Vec2,
    pub direction: f64,
    pub is_tail: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct WorldSnapshot {
    pub score: i64,
    pub game_over: bool,
    pub segments: Vec<SegmentSnapshot>,
    pub pickups: Vec<Vec2>,
}

// Game rules around one chain: resolves steering commands, advances the
// chain, feeds it pickups and latches game-over on self collision. The
// engine underneath stays a pure function of (state, tick input).
#[derive(Debug)]
pub struct World {
    snake: Snake,
    pickups: Vec<Pickup>,
    bounds: Vec2,
    score: i64,
    game_over: bool,
    rng: StdRng,
}

impl World {
    pub fn new(bounds: Vec2, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let direction = rng.gen::<f64>() * PI * 2.0;
        let snake = Snake::new(
            Uuid::new_v4().to_string(),
            SnakeParams {
                position: Vec2::new(bounds.x / 2.0, bounds.y / 2.0),
                direction,
                length: STARTING_LENGTH,
            },
        );

        let mut world = World {
            snake,
            pickups: Vec::new(),
            bounds,
            score: 0,
            game_over: false,
            rng,
        };
        world.ensure_pickups();
        world
    }

    // One frame. Steering resolves strictly before the chain advances; a
    // command applied after the move would let segments consume distance
    // on a stale heading.
    pub fn tick(&mut self, delta_time: f64, commands: &[SteerCommand]) {
        if self.game_over {
            return;
        }

        for command in commands {
            match command {
                SteerCommand::Turn(radians) => self.snake.steer(*radians),
                SteerCommand::PointAt(point) => self.snake.steer_to(*point),
                SteerCommand::Turbo(on) => self.snake.set_turbo(*on),
            }
        }

        self.snake.advance(delta_time);
        self.consume_pickups();

        if self.snake.self_collides() {
            tracing::debug!(id = %self.snake.id, score = self.score, "snake collided with itself");
            self.game_over = true;
        }
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn score(&self) -> i64 {
        self.score
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn snapshot(&self) -> WorldSnapshot {
        WorldSnapshot {
            score: self.score,
            game_over: self.game_over,
            segments: self
                .snake
                .segments()
                .iter()
                .map(|segment| SegmentSnapshot {
                    position: segment.position(),
                    direction: segment.direction(),
                    is_tail: segment.is_tail(),
                })
                .collect(),
            pickups: self.pickups.iter().map(|pickup| pickup.position).collect(),
        }
    }

    fn consume_pickups(&mut self) {
        let mut i = self.pickups.len();
        while i > 0 {
            i -= 1;
            if !sat_collision(self.snake.head_bbox(), self.pickups[i].world_bbox()) {
                continue;
            }
            let pickup = self.pickups.remove(i);
            self.score += pickup.value;
            self.snake.grow();
            tracing::debug!(pickup = %pickup.id, score = self.score, "pickup consumed");
        }
        self.ensure_pickups();
    }

    fn ensure_pickups(&mut self) {
        while self.pickups.len() < BASE_PICKUP_COUNT {
            let position = self.random_pickup_position();
            self.pickups
                .push(Pickup::new(position, PICKUP_EXTENT, PICKUP_VALUE));
        }
    }

    // Bounded retry instead of an open-ended loop: after the attempts run
    // out the last candidate is used even if it sits near the head.
    fn random_pickup_position(&mut self) -> Vec2 {
        let head = self.snake.head_position();
        let mut position = Vec2::ZERO;
        for _ in 0..MAX_SPAWN_ATTEMPTS {
            position = Vec2::new(
                self.rng.gen::<f64>() * self.bounds.x,
                self.rng.gen::<f64>() * self.bounds.y,
            );
            if magnitude(position - head) > PICKUP_CLEARANCE {
                break;
            }
        }
        position
    }
}
