// src/lib.rs
// Public library surface for integration tests (and potential reuse).

pub mod aggregate;
pub mod event;
pub mod favorites;
pub mod feed;
pub mod normalize;
pub mod notify;
pub mod policy;
pub mod render;
pub mod report;
pub mod watch;

// ---- Re-exports for stable public API ----
pub use crate::event::{CanonicalEvent, MatchStatus, ScoreSummary, Side};
pub use crate::policy::{GroupRules, Sport, SportPolicy};
