//! Application layer use cases for the client.
//!
//! - **`controller`** – One operation per control command, plus the
//!   response-handling contract of the two clipboard exchanges.
//!
//! - **`swipe`** – Turns a drag from one point to another into a timed run of
//!   touch events sent through the controller.

pub mod controller;
pub mod swipe;
