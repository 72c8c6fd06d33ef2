use super::math::{magnitude, perpendicular};
use super::types::Vec2;
use std::f64::consts::PI;

#[derive(Debug, Clone)]
pub struct Polygon {
    pub points: Vec<Vec2>,
    pub num_sides: usize,
    pub side_length: f64,
    pub normals: Option<Vec<Vec2>>,
}

impl Polygon {
    pub fn regular(num_sides: usize, side_length: f64) -> Self {
        Polygon {
            points: generate_polygon_points(num_sides, side_length, 0.0),
            num_sides,
            side_length,
            normals: None,
        }
    }

    pub fn square(side_length: f64) -> Self {
        let half = side_length / 2.0;
        Polygon {
            points: vec![
                Vec2::new(-half, half),
                Vec2::new(half, half),
                Vec2::new(half, -half),
                Vec2::new(-half, -half),
            ],
            num_sides: 4,
            side_length,
            normals: None,
        }
    }

    // Rotation rebuilds every point from the canonical angle instead of
    // composing incremental rotations, so repeated turns never accumulate
    // floating error.
    pub fn rotate(&mut self, radians: f64) {
        self.points = generate_polygon_points(self.num_sides, self.side_length, radians);
    }

    pub fn refresh_normals(&mut self) {
        self.normals = Some(calculate_normals(&self.points));
    }
}

// A polygon paired with its world-space translation. Rotation is already
// baked into the local points, so world vertices are points + offset.
#[derive(Debug, Clone, Copy)]
pub struct WorldPolygon<'a> {
    pub polygon: &'a Polygon,
    pub world_coordinates: Vec2,
}

pub fn world_polygon(polygon: &Polygon, position: Vec2) -> WorldPolygon<'_> {
    WorldPolygon {
        polygon,
        world_coordinates: position,
    }
}

pub fn generate_polygon_points(num_sides: usize, side_length: f64, rotation: f64) -> Vec<Vec2> {
    let angle_increment = 2.0 * PI / num_sides as f64;
    (0..num_sides)
        .map(|i| {
            let angle = i as f64 * angle_increment + rotation;
            Vec2 {
                x: side_length * angle.cos(),
                y: side_length * angle.sin(),
            }
        })
        .collect()
}

// One axis per distinct edge orientation: parallel opposite edges of a
// centrally symmetric polygon collapse onto a single entry.
pub fn calculate_normals(points: &[Vec2]) -> Vec<Vec2> {
    let mut normals: Vec<Vec2> = Vec::new();
    for axis in calculate_edge_perpendiculars(points) {
        let duplicate = normals
            .iter()
            .any(|n| n.x.abs() == axis.x.abs() && n.y.abs() == axis.y.abs());
        if !duplicate {
            normals.push(axis);
        }
    }
    normals
}

pub fn calculate_edge_perpendiculars(points: &[Vec2]) -> Vec<Vec2> {
    let mut perpendiculars = Vec::with_capacity(points.len());

    for (i, p1) in points.iter().enumerate() {
        let p2 = points[(i + 1) % points.len()];
        let edge = p2 - *p1;

        let Some(axis) = perpendicular(edge) else {
            tracing::warn!(?edge, "skipping degenerate edge with no perpendicular");
            continue;
        };

        let length = magnitude(axis);
        perpendiculars.push(Vec2 {
            x: axis.x / length,
            y: axis.y / length,
        });
    }

    perpendiculars
}
