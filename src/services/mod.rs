/// HTTP health endpoints
pub mod health;
/// Remote would-you-rather style question providers
pub mod questions;
/// Periodic eviction of idle polls
pub mod sweeper;
