// src/tokens/mod.rs
//! Session token lifecycle
//!
//! `NoToken -> Active -> (Expired | Revoked) -> NoToken`, one live token per
//! principal, kept in memory only.

mod clock;
mod manager;
mod store;
mod sweeper;

pub use clock::{Clock, ManualClock, SystemClock};
pub use manager::{TokenInfo, TokenLifecycleManager};
pub use sweeper::TokenSweeper;
