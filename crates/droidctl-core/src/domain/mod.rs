//! Domain entities for droidctl.
//!
//! Pure logic with no I/O: surface geometry and swipe motion planning.  The
//! client crate walks a [`motion::MotionPlan`] over the network; everything
//! that decides *where* and *when* the pointer moves lives here so it can be
//! tested without a runtime.

pub mod geometry;

/// Swipe interpolation.
///
/// See [`motion::MotionPlan`] for the main type.
pub mod motion;
