use super::types::{Projection, Vec2};

pub fn dot(a: Vec2, b: Vec2) -> f64 {
  a.x * b.x + a.y * b.y
}

pub fn magnitude(v: Vec2) -> f64 {
  (v.x * v.x + v.y * v.y).sqrt()
}

pub fn perpendicular(v: Vec2) -> Option<Vec2> {
  if v.x == 0.0 && v.y == 0.0 {
    return None;
  }
  Some(Vec2 { x: -v.y, y: v.x })
}

pub fn create_vector(direction: f64, distance: f64) -> Vec2 {
  Vec2 {
    x: direction.cos() * distance,
    y: direction.sin() * distance,
  }
}

pub fn diff_vectors(a: Vec2, b: Vec2) -> f64 {
  magnitude(a) - magnitude(b)
}

pub fn angle_between(a: Vec2, b: Vec2, tolerance: f64) -> f64 {
  let mag_product = magnitude(a) * magnitude(b);
  if mag_product == 0.0 {
    return 0.0;
  }

  // Rounding can push the cosine a hair outside [-1, 1], which acos turns
  // into NaN.
  let cos_theta = (dot(a, b) / mag_product).clamp(-1.0, 1.0);
  let theta = cos_theta.acos();

  let cross = a.x * b.y - a.y * b.x;
  let angle = if cross >= 0.0 { theta } else { -theta };

  if angle.abs() <= tolerance {
    return 0.0;
  }
  angle
}

pub fn project_polygon_to_axis(vertices: &[Vec2], axis: Vec2) -> Projection {
  let mut min = f64::INFINITY;
  let mut max = f64::NEG_INFINITY;

  for vertex in vertices {
    let projection = dot(*vertex, axis);
    if projection < min {
      min = projection;
    }
    if projection > max {
      max = projection;
    }
  }

  Projection { min, max }
}

// Touching intervals count as overlapping; collision stays inclusive of
// exact contact.
pub fn intervals_overlap(a: Projection, b: Projection) -> bool {
  !(a.max < b.min || b.max < a.min)
}
