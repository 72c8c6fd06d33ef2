use super::constants::BOUNDING_SIDES;
use super::math::{create_vector, diff_vectors};
use super::pivot::{PivotHandle, PivotLog};
use super::polygon::{world_polygon, Polygon, WorldPolygon};
use super::types::Vec2;

// The visual backing a segment carries. The engine only needs rotation
// and a bounding side length from it; drawing happens elsewhere.
#[derive(Debug, Clone)]
pub enum SegmentShape {
    Polygon { polygon: Polygon },
    Sprite { width: f64, height: f64, rotation: f64 },
}

impl SegmentShape {
    pub fn rotate(&mut self, radians: f64) {
        match self {
            SegmentShape::Polygon { polygon } => polygon.rotate(radians),
            SegmentShape::Sprite { rotation, .. } => *rotation = radians,
        }
    }

    pub fn bounding_side_length(&self) -> f64 {
        match self {
            SegmentShape::Polygon { polygon } => polygon.side_length,
            SegmentShape::Sprite { width, height, .. } => width.max(*height) / 2.0,
        }
    }

    pub fn set_side_length(&mut self, side_length: f64) {
        if let SegmentShape::Polygon { polygon } = self {
            polygon.side_length = side_length;
        }
    }
}

// One rigid unit of the chain. A segment either tracks a pending pivot or
// runs straight; the transition is driven entirely by distance consumed
// in advance().
#[derive(Debug, Clone)]
pub struct Segment {
    direction: f64,
    position: Vec2,
    is_tail: bool,
    next_pivot: Option<PivotHandle>,
    shape: SegmentShape,
    bbox: Polygon,
}

impl Segment {
    pub fn new(direction: f64, position: Vec2, is_tail: bool, mut shape: SegmentShape) -> Self {
        let mut bbox = Polygon::regular(BOUNDING_SIDES, shape.bounding_side_length());
        shape.rotate(direction);
        bbox.rotate(direction);
        bbox.refresh_normals();
        Segment {
            direction,
            position,
            is_tail,
            next_pivot: None,
            shape,
            bbox,
        }
    }

    pub fn direction(&self) -> f64 {
        self.direction
    }

    pub fn set_direction(&mut self, direction: f64) {
        self.direction = direction;
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    pub fn is_tail(&self) -> bool {
        self.is_tail
    }

    pub fn set_tail(&mut self, is_tail: bool) {
        self.is_tail = is_tail;
    }

    pub fn next_pivot(&self) -> Option<PivotHandle> {
        self.next_pivot
    }

    pub fn set_next_pivot(&mut self, handle: Option<PivotHandle>) {
        self.next_pivot = handle;
    }

    pub fn rotate(&mut self, radians: f64) {
        self.shape.rotate(radians);
        self.bbox.rotate(radians);
    }

    // The taper only records the new size; points rebuild from it on the
    // next rotation.
    pub fn set_side_length(&mut self, side_length: f64) {
        self.shape.set_side_length(side_length);
        self.bbox.side_length = side_length;
    }

    pub fn refresh_normals(&mut self) {
        self.bbox.refresh_normals();
    }

    pub fn bbox(&self) -> &Polygon {
        &self.bbox
    }

    pub fn world_bbox(&self) -> WorldPolygon<'_> {
        world_polygon(&self.bbox, self.position)
    }

    // Consumes the distance budget along the pivot trail. The overshoot
    // test compares straight-line magnitudes, not the true ray/pivot
    // intersection; that approximation only holds while per-tick turns
    // stay clamped (see MAX_STEER_ANGLE).
    pub fn advance(&mut self, distance: f64, pivots: &mut PivotLog) {
        let mut remaining = distance;

        while remaining > 0.0 {
            let Some(handle) = self.next_pivot else {
                break;
            };
            let pivot = pivots.get(handle);

            let projection = create_vector(self.direction, remaining);
            let to_pivot = self.position - pivot.position;
            let overshoot = diff_vectors(projection, to_pivot);

            if overshoot > 0.0 {
                // The full displacement would carry the segment past the
                // pivot: snap onto it, adopt its heading, and spend the
                // leftover budget from there.
                self.direction = pivot.direction;
                self.rotate(self.direction);
                self.position = pivot.position;
                remaining = overshoot.abs();
                self.next_pivot = pivots.next(handle);

                // Only the rearmost segment retires pivots from the shared
                // log; every segment ahead of it has already moved past.
                if self.is_tail {
                    pivots.pop_front();
                }
            } else {
                self.position = self.position + projection;
                remaining = 0.0;
            }
        }

        if self.next_pivot.is_none() && remaining > 0.0 {
            self.position = self.position + create_vector(self.direction, remaining);
        }

        self.bbox.refresh_normals();
    }
}
