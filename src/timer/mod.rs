//! Turn timers.
//!
//! - [`Timer`]: the trait the game orchestrator drives
//! - [`AbsoluteTimer`]: fixed main time per side

pub mod absolute;
pub mod clock;

pub use absolute::{AbsoluteTimer, DEFAULT_PERIOD};
pub use clock::Timer;
