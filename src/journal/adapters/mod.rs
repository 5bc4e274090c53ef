//! Adapter implementations for journal ports.

pub mod memory;
pub mod postgres;
