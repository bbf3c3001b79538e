//! Capabilities shared across the workspace.

pub mod clock;
pub mod decaying_weight;

pub use clock::{Clock, ManualClock, SharedClock, SystemClock};
pub use decaying_weight::DecayingWeight;
