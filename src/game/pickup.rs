use super::polygon::{world_polygon, Polygon, WorldPolygon};
use super::types::Vec2;
use uuid::Uuid;

// A consumable sitting on the playfield. Its bounding square is
// finalized for physics at spawn time so head-versus-pickup queries
// always have cached normals to work with.
#[derive(Debug, Clone)]
pub struct Pickup {
    pub id: Uuid,
    pub value: i64,
    pub position: Vec2,
    bbox: Polygon,
}

impl Pickup {
    pub fn new(position: Vec2, extent: f64, value: i64) -> Self {
        let mut bbox = Polygon::square(extent);
        bbox.refresh_normals();
        Pickup {
            id: Uuid::new_v4(),
            value,
            position,
            bbox,
        }
    }

    pub fn world_bbox(&self) -> WorldPolygon<'_> {
        world_polygon(&self.bbox, self.position)
    }
}
