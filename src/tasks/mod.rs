//! Background Tasks Module
//!
//! Opt-in maintenance tasks for caches shared across async tasks.

pub mod purge;

pub use purge::spawn_purge_task;
