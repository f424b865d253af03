//! Swipe motion planning.
//!
//! A swipe is injected as one touch-down, a series of touch-moves, and one
//! touch-up.  [`MotionPlan`] decides where each move lands and how long to
//! wait between them:
//!
//! 1. Both the start and the end point are clamped to the surface, which
//!    bounds the number of waypoints by the surface size.
//! 2. From the start point, each axis advances toward the end by at most
//!    `unit` pixels per step until both axes arrive.  Every intermediate
//!    position is a waypoint; the last waypoint is the end point.
//! 3. The requested duration is split evenly across the waypoints, so the
//!    swipe takes the same wall-clock time whatever the step size.
//!
//! The step count is taken from the same waypoint list that is executed,
//! so the timing always matches the moves actually sent.

use std::time::Duration;

use thiserror::Error;

use crate::domain::geometry::{Point, Size};

/// Default per-axis step size in pixels.
pub const DEFAULT_SWIPE_UNIT: u32 = 5;

/// Errors produced while planning a swipe.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MotionError {
    /// A zero step size would never reach the end point.
    #[error("swipe step unit must be at least 1 pixel")]
    ZeroStepUnit,
}

/// Precomputed waypoint and timing schedule for a single swipe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MotionPlan {
    start: Point,
    end: Point,
    waypoints: Vec<Point>,
    step_delay: Duration,
}

impl MotionPlan {
    /// Plans a swipe from `start` to `end` over `surface`.
    ///
    /// `start` and `end` are both clamped to `[0, width] x [0, height]`, so a
    /// plan never holds more than `max(width, height) / unit + 1` waypoints.
    ///
    /// # Errors
    ///
    /// Returns [`MotionError::ZeroStepUnit`] when `unit` is 0.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use std::time::Duration;
    /// use droidctl_core::{MotionPlan, Point, Size};
    ///
    /// let plan = MotionPlan::new(
    ///     Point::new(0, 0),
    ///     Point::new(10, 10),
    ///     Size::new(100, 100),
    ///     5,
    ///     Duration::from_millis(100),
    /// )
    /// .unwrap();
    /// assert_eq!(plan.waypoints(), &[Point::new(5, 5), Point::new(10, 10)]);
    /// assert_eq!(plan.step_delay(), Duration::from_millis(50));
    /// ```
    pub fn new(
        start: Point,
        end: Point,
        surface: Size,
        unit: u32,
        duration: Duration,
    ) -> Result<Self, MotionError> {
        if unit == 0 {
            return Err(MotionError::ZeroStepUnit);
        }
        let start = start.clamped_to(surface);
        let end = end.clamped_to(surface);

        let mut waypoints = Vec::new();
        let mut current = start;
        while current != end {
            current = Point::new(
                step_toward(current.x, end.x, unit),
                step_toward(current.y, end.y, unit),
            );
            waypoints.push(current);
        }

        let step_delay = match u32::try_from(waypoints.len()) {
            Ok(0) => Duration::ZERO,
            Ok(steps) => duration / steps,
            Err(_) => Duration::ZERO,
        };

        Ok(Self {
            start,
            end,
            waypoints,
            step_delay,
        })
    }

    /// The clamped start point; the touch-down is sent here.
    pub fn start(&self) -> Point {
        self.start
    }

    /// The clamped end point; the touch-up is sent here.
    pub fn end(&self) -> Point {
        self.end
    }

    /// Positions of the touch-move events, in order.  Empty for a tap.
    pub fn waypoints(&self) -> &[Point] {
        &self.waypoints
    }

    /// Delay after each touch-move.
    pub fn step_delay(&self) -> Duration {
        self.step_delay
    }

    /// Total time spent sleeping when the plan is executed.
    pub fn total_delay(&self) -> Duration {
        u32::try_from(self.waypoints.len())
            .map(|steps| self.step_delay * steps)
            .unwrap_or(Duration::ZERO)
    }
}

/// Moves `current` toward `target` by at most `unit`.
fn step_toward(current: i32, target: i32, unit: u32) -> i32 {
    let (current, target, unit) = (i64::from(current), i64::from(target), i64::from(unit));
    let next = if current > target {
        current - (current - target).min(unit)
    } else {
        current + (target - current).min(unit)
    };
    // `next` lies between `current` and `target`, both of which fit in an i32.
    next as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    const SURFACE: Size = Size::new(1080, 1920);

    fn plan(start: (i32, i32), end: (i32, i32), unit: u32, millis: u64) -> MotionPlan {
        MotionPlan::new(
            start.into(),
            end.into(),
            SURFACE,
            unit,
            Duration::from_millis(millis),
        )
        .expect("plan must be valid")
    }

    #[test]
    fn test_diagonal_plan_visits_each_unit_step() {
        // Arrange / Act
        let p = plan((0, 0), (10, 10), 5, 1000);

        // Assert
        assert_eq!(p.waypoints(), &[Point::new(5, 5), Point::new(10, 10)]);
        assert_eq!(p.step_delay(), Duration::from_millis(500));
        assert_eq!(p.total_delay(), Duration::from_millis(1000));
    }

    #[test]
    fn test_last_step_is_shorter_than_unit() {
        let p = plan((0, 0), (12, 0), 5, 300);
        assert_eq!(
            p.waypoints(),
            &[Point::new(5, 0), Point::new(10, 0), Point::new(12, 0)]
        );
        assert_eq!(p.step_delay(), Duration::from_millis(100));
    }

    #[test]
    fn test_axes_arriving_at_different_rates() {
        // Arrange – x needs one step, y needs three
        let p = plan((100, 100), (97, 112), 5, 900);

        // Assert – x holds once it arrives while y keeps moving
        assert_eq!(
            p.waypoints(),
            &[Point::new(97, 105), Point::new(97, 110), Point::new(97, 112)]
        );
        assert_eq!(p.step_delay(), Duration::from_millis(300));
    }

    #[test]
    fn test_moving_toward_origin() {
        let p = plan((12, 12), (0, 0), 5, 30);
        assert_eq!(
            p.waypoints(),
            &[Point::new(7, 7), Point::new(2, 2), Point::new(0, 0)]
        );
    }

    #[test]
    fn test_end_point_is_clamped_to_surface() {
        // Arrange / Act
        let p = plan((1070, 1910), (5000, -50), 20, 100);

        // Assert
        assert_eq!(p.end(), Point::new(1080, 0));
        assert_eq!(p.waypoints().last(), Some(&Point::new(1080, 0)));
    }

    #[test]
    fn test_start_equal_to_end_is_a_tap() {
        let p = plan((40, 40), (40, 40), 5, 1000);
        assert!(p.waypoints().is_empty());
        assert_eq!(p.step_delay(), Duration::ZERO);
        assert_eq!(p.start(), p.end());
    }

    #[test]
    fn test_start_equal_to_clamped_end_is_a_tap() {
        let p = plan((1080, 0), (2000, -10), 5, 1000);
        assert!(p.waypoints().is_empty());
    }

    #[test]
    fn test_far_away_start_is_clamped_before_planning() {
        // Arrange / Act
        let p = plan((i32::MIN, i32::MAX), (10, 10), 1, 1000);

        // Assert – the walk starts on the surface, not billions of pixels away
        assert_eq!(p.start(), Point::new(0, 1920));
        assert_eq!(p.waypoints().len(), 1910);
        assert_eq!(p.waypoints().last(), Some(&Point::new(10, 10)));
    }

    #[test]
    fn test_waypoint_count_is_bounded_by_surface() {
        let p = plan((-50_000, 0), (1080, 1920), 1, 1000);
        assert!(p.waypoints().len() <= 1920);
    }

    #[test]
    fn test_total_delay_never_exceeds_duration() {
        // Arrange – 1000 ms over 3 steps does not divide evenly
        let p = plan((0, 0), (15, 0), 5, 1000);

        // Assert
        assert_eq!(p.waypoints().len(), 3);
        assert_eq!(p.total_delay(), p.step_delay() * 3);
        assert!(p.total_delay() <= Duration::from_millis(1000));
    }

    #[test]
    fn test_zero_unit_is_rejected() {
        let result = MotionPlan::new(
            Point::new(0, 0),
            Point::new(10, 10),
            SURFACE,
            0,
            Duration::from_secs(1),
        );
        assert_eq!(result, Err(MotionError::ZeroStepUnit));
    }

    #[test]
    fn test_step_toward_never_overshoots() {
        assert_eq!(step_toward(0, 3, 5), 3);
        assert_eq!(step_toward(3, 0, 5), 0);
        assert_eq!(step_toward(7, 7, 5), 7);
        assert_eq!(step_toward(i32::MIN, i32::MAX, u32::MAX), i32::MAX);
    }
}
