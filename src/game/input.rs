use super::types::Vec2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SteerCommand {
    Turn(f64),
    PointAt(Vec2),
    Turbo(bool),
}

pub fn parse_turn(radians: f64) -> Option<SteerCommand> {
    if !radians.is_finite() {
        return None;
    }
    Some(SteerCommand::Turn(radians))
}

pub fn parse_target(point: Vec2) -> Option<SteerCommand> {
    if !point.x.is_finite() || !point.y.is_finite() {
        return None;
    }
    Some(SteerCommand::PointAt(point))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finite_turns_pass_through() {
        assert_eq!(parse_turn(0.25), Some(SteerCommand::Turn(0.25)));
        assert_eq!(parse_turn(-0.25), Some(SteerCommand::Turn(-0.25)));
    }

    #[test]
    fn non_finite_turns_are_rejected() {
        assert!(parse_turn(f64::NAN).is_none());
        assert!(parse_turn(f64::INFINITY).is_none());
    }

    #[test]
    fn non_finite_targets_are_rejected() {
        assert!(parse_target(Vec2::new(f64::NAN, 0.0)).is_none());
        assert!(parse_target(Vec2::new(0.0, f64::NEG_INFINITY)).is_none());
        assert!(parse_target(Vec2::new(10.0, 20.0)).is_some());
    }
}
