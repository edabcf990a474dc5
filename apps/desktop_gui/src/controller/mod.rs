//! Controller layer: backend events, reducer state transitions, file acquisition, and command orchestration.

pub mod acquisition;
pub mod events;
pub mod orchestration;
pub mod reducer;
