//! Bujo: bullet-journal task tracking.
//!
//! This crate provides the core of a bullet-journal style tracker: entries
//! logged into daily, weekly and monthly buckets, project tagging, and the
//! migration of unfinished tasks to later buckets with an audit trail left
//! behind.
//!
//! # Architecture
//!
//! Bujo follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, in-memory)
//!
//! # Modules
//!
//! - [`journal`]: Bucket arithmetic, entry lifecycle and migration
//! - [`config`]: Store configuration from the environment

pub mod config;
pub mod journal;
