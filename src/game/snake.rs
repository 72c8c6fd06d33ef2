use super::constants::{
    BASE_SPEED, BOUNDING_SIDES, DEFAULT_POLYGON_SIZE, MAX_STEER_ANGLE, SEGMENT_SPACING,
    SELF_COLLISION_SKIP, TARGET_ANGLE_TOLERANCE, TURBO_SPEED,
};
use super::math::{angle_between, create_vector};
use super::pivot::{Pivot, PivotLog};
use super::polygon::{Polygon, WorldPolygon};
use super::sat::sat_collision;
use super::segment::{Segment, SegmentShape};
use super::types::Vec2;
use std::f64::consts::PI;

pub struct SnakeParams {
    pub position: Vec2,
    pub direction: f64,
    pub length: usize,
}

// The full chain: head at index 0, the single tail at the end. The head
// lays pivots down as it steers; body segments chase them through the
// shared log.
#[derive(Debug)]
pub struct Snake {
    pub id: String,
    direction: f64,
    segments: Vec<Segment>,
    pivots: PivotLog,
    speed: f64,
    turbo_speed: f64,
    turbo: bool,
    max_steer_angle: f64,
    target_point: Option<Vec2>,
}

impl Snake {
    pub fn new(id: String, params: SnakeParams) -> Self {
        let length = params.length.max(2);
        let mut segments = Vec::with_capacity(length);
        segments.push(Segment::new(
            params.direction,
            params.position,
            false,
            polygon_shape(DEFAULT_POLYGON_SIZE),
        ));

        for index in 1..length {
            let tail_direction = params.direction + PI;
            let position =
                segments[index - 1].position() + create_vector(tail_direction, SEGMENT_SPACING);
            segments.push(Segment::new(
                params.direction,
                position,
                index == length - 1,
                polygon_shape(segment_side_length(index, length)),
            ));
        }

        Snake {
            id,
            direction: params.direction,
            segments,
            pivots: PivotLog::new(),
            speed: BASE_SPEED,
            turbo_speed: TURBO_SPEED,
            turbo: false,
            max_steer_angle: MAX_STEER_ANGLE,
            target_point: None,
        }
    }

    // Turns the chain heading, rotates the head into the new pose and
    // records the pivot every trailing segment will pass through.
    pub fn steer(&mut self, radians: f64) {
        self.direction = (self.direction + radians) % (PI * 2.0);

        let head = &mut self.segments[0];
        head.set_direction(self.direction);
        head.rotate(self.direction);
        let head_position = head.position();

        let handle = self.pivots.append(Pivot {
            position: head_position,
            direction: self.direction,
        });

        self.segments[0].refresh_normals();
        for segment in self.segments.iter_mut().skip(1) {
            segment.refresh_normals();
            // Lazy fan-out: a segment only picks up the new pivot once it
            // has exhausted the one it was already tracking.
            if segment.next_pivot().is_none() {
                segment.set_next_pivot(Some(handle));
            }
        }
    }

    pub fn steer_to(&mut self, point: Vec2) {
        self.target_point = Some(point);
    }

    pub fn set_turbo(&mut self, turbo: bool) {
        self.turbo = turbo;
    }

    pub fn speed(&self) -> f64 {
        if self.turbo {
            self.turbo_speed
        } else {
            self.speed
        }
    }

    pub fn direction(&self) -> f64 {
        self.direction
    }

    pub fn head_position(&self) -> Vec2 {
        self.segments[0].position()
    }

    pub fn head_bbox(&self) -> WorldPolygon<'_> {
        self.segments[0].world_bbox()
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn pending_pivots(&self) -> usize {
        self.pivots.size()
    }

    // One tick of motion. Pursuit steering resolves first so no segment
    // consumes distance on a stale heading within the same tick.
    pub fn advance(&mut self, delta_time: f64) {
        self.resolve_target_steering();

        let distance = self.speed() * delta_time;
        let displacement = create_vector(self.direction, distance);

        // The head never chases pivots, it creates them: it always takes
        // the full displacement along the chain heading.
        let head = &mut self.segments[0];
        head.set_position(head.position() + displacement);

        for segment in self.segments.iter_mut().skip(1) {
            segment.advance(distance, &mut self.pivots);
        }
    }

    // Appends a tail segment behind the current tail and hands over its
    // pending pivot, so the new tail resumes the chase where the old one
    // left off.
    pub fn grow(&mut self) {
        let Some(old_tail) = self.segments.last_mut() else {
            return;
        };
        old_tail.set_tail(false);
        let tail_direction = old_tail.direction();
        let tail_position = old_tail.position();
        let pending_pivot = old_tail.next_pivot();

        let position = tail_position + create_vector(tail_direction + PI, SEGMENT_SPACING);
        let mut segment = Segment::new(
            tail_direction,
            position,
            true,
            polygon_shape(segment_side_length(self.segments.len(), self.segments.len() + 1)),
        );
        segment.set_next_pivot(pending_pivot);
        self.segments.push(segment);

        let length = self.segments.len();
        for (index, segment) in self.segments.iter_mut().enumerate() {
            segment.set_side_length(segment_side_length(index, length));
        }

        tracing::debug!(id = %self.id, length, "chain grew");
    }

    // Head versus every segment from SELF_COLLISION_SKIP on. The neck
    // segments sit against the head by construction and would read as
    // permanent contact.
    pub fn self_collides(&self) -> bool {
        let head = self.segments[0].world_bbox();
        for segment in self.segments.iter().skip(SELF_COLLISION_SKIP) {
            if sat_collision(head, segment.world_bbox()) {
                return true;
            }
        }
        false
    }

    // Bang-bang pursuit of the stored target: a fixed clamped turn per
    // tick in the corrective sign, and the exact remainder once within a
    // single turn of pointing at it.
    fn resolve_target_steering(&mut self) {
        let Some(target) = self.target_point else {
            return;
        };

        let head_position = self.head_position();
        let velocity = create_vector(self.direction, self.speed());
        let to_head = head_position - target;
        let angle = angle_between(velocity, to_head, TARGET_ANGLE_TOLERANCE);
        if angle == 0.0 {
            return;
        }

        let factor = if angle > 0.0 { -1.0 } else { 1.0 };
        let steer_angle = if (angle - PI).abs() < self.max_steer_angle {
            self.target_point = None;
            (angle - PI).abs() * factor
        } else {
            self.max_steer_angle * factor
        };

        self.steer(steer_angle);
    }
}

fn polygon_shape(side_length: f64) -> SegmentShape {
    SegmentShape::Polygon {
        polygon: Polygon::regular(BOUNDING_SIDES, side_length),
    }
}

// Body taper: the neck and the last few segments run slightly smaller
// than the default so the silhouette narrows toward both ends.
fn segment_side_length(index: usize, length: usize) -> f64 {
    if index == 0 {
        return DEFAULT_POLYGON_SIZE;
    }
    if index == 1 || index == 3 {
        return DEFAULT_POLYGON_SIZE - 1.0;
    }
    if index == 2 {
        return DEFAULT_POLYGON_SIZE - 2.0;
    }
    if length >= 5 && (length - 5..=length - 3).contains(&index) {
        return DEFAULT_POLYGON_SIZE - 2.0;
    }
    if index == length - 2 {
        return DEFAULT_POLYGON_SIZE - 6.0;
    }
    if index == length - 1 {
        return DEFAULT_POLYGON_SIZE - 7.0;
    }
    DEFAULT_POLYGON_SIZE
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn make_snake(length: usize) -> Snake {
        Snake::new(
            "test".to_string(),
            SnakeParams {
                position: Vec2::ZERO,
                direction: 0.0,
                length,
            },
        )
    }

    #[test]
    fn segments_spawn_spaced_behind_the_head() {
        let snake = make_snake(4);
        assert_eq!(snake.len(), 4);
        for (index, segment) in snake.segments().iter().enumerate() {
            assert!((segment.position().x + index as f64 * SEGMENT_SPACING).abs() < EPSILON);
            assert!(segment.position().y.abs() < EPSILON);
        }
        let tails = snake
            .segments()
            .iter()
            .filter(|segment| segment.is_tail())
            .count();
        assert_eq!(tails, 1);
    }

    #[test]
    fn head_moves_along_the_new_heading_after_a_steer() {
        let mut snake = make_snake(4);
        let dt = 0.01;
        let distance = snake.speed() * dt;

        snake.steer(PI / 2.0);
        snake.advance(dt);

        // The head ignores its own pivots: the whole displacement lands on
        // the post-steer heading.
        let head = snake.head_position();
        assert!(head.x.abs() < EPSILON);
        assert!((head.y - distance).abs() < EPSILON);
    }

    #[test]
    fn steer_records_one_pivot_at_the_head() {
        let mut snake = make_snake(4);
        snake.steer(0.3);

        assert_eq!(snake.pivots.size(), 1);
        let pivot = snake.pivots.traverse()[0];
        assert_eq!(pivot.position, Vec2::ZERO);
        assert!((pivot.direction - 0.3).abs() < EPSILON);
    }

    #[test]
    fn steer_assigns_the_pivot_only_to_unassigned_segments() {
        let mut snake = make_snake(4);
        snake.steer(0.2);
        let first = snake.segments[1].next_pivot();

        snake.steer(0.2);
        // Still chasing the first pivot; the new one queues behind it.
        assert_eq!(snake.segments[1].next_pivot(), first);
        assert_eq!(snake.pivots.size(), 2);
    }

    #[test]
    fn pivot_chains_preserve_creation_order() {
        let mut snake = make_snake(4);
        for _ in 0..6 {
            snake.steer(0.15);
            snake.advance(0.01);
        }

        let created = snake.pivots.traverse();
        for segment in snake.segments().iter().skip(1) {
            let mut chain = Vec::new();
            let mut current = segment.next_pivot();
            while let Some(handle) = current {
                chain.push(snake.pivots.get(handle));
                current = snake.pivots.next(handle);
            }

            // Each chase chain is a contiguous run of the surviving log,
            // oldest first: no segment ever sees pivots out of order or
            // ones the tail already retired.
            let positions: Vec<usize> = chain
                .iter()
                .map(|pivot| {
                    created
                        .iter()
                        .position(|candidate| candidate == pivot)
                        .expect("chased pivot still in the log")
                })
                .collect();
            for pair in positions.windows(2) {
                assert_eq!(pair[1], pair[0] + 1);
            }
        }
    }

    #[test]
    fn log_never_grows_without_steering() {
        let mut snake = make_snake(4);
        for _ in 0..3 {
            snake.steer(0.2);
        }
        let mut previous = snake.pivots.size();

        for _ in 0..50 {
            snake.advance(0.02);
            let current = snake.pivots.size();
            assert!(current <= previous);
            previous = current;
        }
        assert_eq!(snake.pivots.size(), 0);
    }

    #[test]
    fn one_tick_appends_at_most_one_pivot() {
        let mut snake = make_snake(4);
        let before = snake.pivots.size();
        snake.steer(0.1);
        snake.advance(0.01);
        assert!(snake.pivots.size() <= before + 1);
    }

    #[test]
    fn grow_appends_a_tail_and_hands_over_the_pivot() {
        let mut snake = make_snake(4);
        snake.steer(0.4);

        let old_tail_pivot = snake.segments[3].next_pivot();
        assert!(old_tail_pivot.is_some());

        snake.grow();

        assert_eq!(snake.len(), 5);
        assert!(!snake.segments[3].is_tail());
        assert!(snake.segments[4].is_tail());
        assert_eq!(snake.segments[4].next_pivot(), old_tail_pivot);

        let tails = snake
            .segments()
            .iter()
            .filter(|segment| segment.is_tail())
            .count();
        assert_eq!(tails, 1);
    }

    #[test]
    fn grow_places_the_new_tail_behind_the_old_one() {
        let mut snake = make_snake(4);
        let old_tail_position = snake.segments[3].position();
        snake.grow();

        let new_tail_position = snake.segments[4].position();
        assert!((new_tail_position.x - (old_tail_position.x - SEGMENT_SPACING)).abs() < EPSILON);
        assert!((new_tail_position.y - old_tail_position.y).abs() < EPSILON);
    }

    #[test]
    fn straight_chain_does_not_self_collide() {
        let mut snake = make_snake(10);
        for _ in 0..20 {
            snake.advance(0.02);
        }
        assert!(!snake.self_collides());
    }

    #[test]
    fn tight_loop_ends_in_self_collision() {
        let mut snake = make_snake(12);
        let dt = 5.0 / snake.speed();

        // Full-lock steering at 5 units per tick walks a loop of roughly
        // 25 units radius, well inside the chain's span.
        let mut collided = false;
        for _ in 0..80 {
            snake.steer(MAX_STEER_ANGLE);
            snake.advance(dt);
            if snake.self_collides() {
                collided = true;
                break;
            }
        }
        assert!(collided);
    }

    #[test]
    fn pursuit_turns_toward_the_target_one_clamp_per_tick() {
        let mut snake = make_snake(4);
        snake.steer_to(Vec2::new(0.0, 100.0));
        snake.advance(0.01);

        assert!((snake.direction() - MAX_STEER_ANGLE).abs() < EPSILON);
        assert_eq!(snake.pivots.size(), 1);
        assert!(snake.target_point.is_some());
    }

    #[test]
    fn pursuit_clears_the_target_once_facing_it() {
        let mut snake = make_snake(4);
        snake.steer_to(Vec2::new(500.0, 0.0));
        snake.advance(0.01);

        // Already pointing at the target: the exact remainder is issued
        // and the pursuit ends.
        assert!(snake.target_point.is_none());
        assert!(snake.direction().abs() < MAX_STEER_ANGLE);
    }

    #[test]
    fn turbo_selects_the_boosted_speed() {
        let mut snake = make_snake(4);
        assert_eq!(snake.speed(), BASE_SPEED);
        snake.set_turbo(true);
        assert_eq!(snake.speed(), TURBO_SPEED);
        snake.set_turbo(false);
        assert_eq!(snake.speed(), BASE_SPEED);
    }

    #[test]
    fn taper_narrows_toward_the_tail() {
        let length = 12;
        assert_eq!(segment_side_length(0, length), DEFAULT_POLYGON_SIZE);
        assert_eq!(segment_side_length(1, length), DEFAULT_POLYGON_SIZE - 1.0);
        assert_eq!(segment_side_length(5, length), DEFAULT_POLYGON_SIZE);
        assert_eq!(segment_side_length(length - 2, length), DEFAULT_POLYGON_SIZE - 6.0);
        assert_eq!(segment_side_length(length - 1, length), DEFAULT_POLYGON_SIZE - 7.0);
    }
}
