//! Swipe execution: walks a [`MotionPlan`] through the controller.
//!
//! A swipe is a touch-down at the start, one touch-move per waypoint with the
//! plan's per-step delay after each, and a touch-up at the (clamped) end.

use std::time::Duration;

use droidctl_core::{
    domain::{
        geometry::{Point, Size},
        motion::MotionPlan,
    },
    input::MotionAction,
    protocol::messages::TouchEvent,
};
use tokio::io::{AsyncRead, AsyncWrite};
use tracing::debug;

use crate::application::controller::{ControlError, Controller};

impl<R, W> Controller<R, W>
where
    R: AsyncRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    /// Drags from `start` to `end` with the configured step unit and duration.
    ///
    /// Returns the bytes of every touch event sent, in order.
    pub async fn swipe(
        &self,
        start: Point,
        end: Point,
        surface: Size,
    ) -> Result<Vec<Vec<u8>>, ControlError> {
        let unit = self.swipe.unit;
        let duration = self.swipe.duration();
        self.swipe_with(start, end, surface, unit, duration).await
    }

    /// Drags from `start` to `end`, moving at most `unit` pixels per axis per
    /// step and spreading the steps evenly over `duration`.
    ///
    /// # Errors
    ///
    /// Returns [`ControlError::Motion`] for a zero `unit`, before anything is
    /// written, and [`ControlError::Io`] if a touch event cannot be written.
    pub async fn swipe_with(
        &self,
        start: Point,
        end: Point,
        surface: Size,
        unit: u32,
        duration: Duration,
    ) -> Result<Vec<Vec<u8>>, ControlError> {
        let plan = MotionPlan::new(start, end, surface, unit, duration)?;
        self.perform_motion(&plan, surface).await
    }

    /// Sends the touch events of a precomputed plan.
    pub async fn perform_motion(
        &self,
        plan: &MotionPlan,
        surface: Size,
    ) -> Result<Vec<Vec<u8>>, ControlError> {
        debug!(
            "swipe {:?} -> {:?}: {} steps, {:?} apart",
            plan.start(),
            plan.end(),
            plan.waypoints().len(),
            plan.step_delay()
        );
        let mut sent = Vec::with_capacity(plan.waypoints().len() + 2);

        sent.push(
            self.inject_touch_event(TouchEvent::new(MotionAction::Down, plan.start(), surface))
                .await?,
        );
        for &point in plan.waypoints() {
            sent.push(
                self.inject_touch_event(TouchEvent::new(MotionAction::Move, point, surface))
                    .await?,
            );
            tokio::time::sleep(plan.step_delay()).await;
        }
        sent.push(
            self.inject_touch_event(TouchEvent::new(MotionAction::Up, plan.end(), surface))
                .await?,
        );

        Ok(sent)
    }
}
