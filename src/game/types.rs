use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
  pub x: f64,
  pub y: f64,
}

impl Vec2 {
  pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

  pub fn new(x: f64, y: f64) -> Self {
    Vec2 { x, y }
  }
}

impl Add for Vec2 {
  type Output = Vec2;

  fn add(self, rhs: Vec2) -> Vec2 {
    Vec2 {
      x: self.x + rhs.x,
      y: self.y + rhs.y,
    }
  }
}

impl Sub for Vec2 {
  type Output = Vec2;

  fn sub(self, rhs: Vec2) -> Vec2 {
    Vec2 {
      x: self.x - rhs.x,
      y: self.y - rhs.y,
    }
  }
}

#[derive(Debug, Clone, Copy)]
pub struct Projection {
  pub min: f64,
  pub max: f64,
}
