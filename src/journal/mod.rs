//! Bullet-journal task tracking.
//!
//! Tasks, events and notes are logged into date buckets (a day, the Monday
//! of a week, or the first day of a month) and may be tagged with a project.
//! Open tasks can be migrated forward in time; the original entry stays in
//! place as `migrated` and an open continuation is created at the target
//! bucket. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
