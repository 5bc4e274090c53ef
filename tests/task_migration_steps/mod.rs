//! Step definitions for journal migration scenarios.

pub mod when;
