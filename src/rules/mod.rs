//! Rules trait for game implementations.
//!
//! Rulesets implement `Rules` to define:
//! - Which moves are legal
//! - How a legal move changes the board
//! - How the game is scored
//!
//! The history engine calls nothing here; rulesets drive the engine through
//! its staging API.

pub mod engine;
pub mod open;

pub use engine::{RuleCode, Rules, Score};
pub use open::OpenRules;
