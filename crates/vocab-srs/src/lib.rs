//! SRS (Spaced Repetition System) library for the vocabulary trainer
//!
//! This crate provides the SM-2 review scheduler and the read-side helpers
//! built on it: deck statistics, the due queue, and history replay. It does
//! no I/O; callers pass in the current time and persist the results.

pub mod card;
pub mod config;
pub mod error;
pub mod scheduler;
pub mod stats;

pub use card::{Card, CardContent, Quality, ReviewEvent, SchedulingState};
pub use config::SchedulerConfig;
pub use error::SrsError;
pub use scheduler::{due_after, replay, same_schedule, submit_review};
pub use stats::{Stats, compute_stats, due_queue};
