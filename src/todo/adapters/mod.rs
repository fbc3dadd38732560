//! Adapter implementations of the to-do ports.

pub mod memory;
pub mod postgres;
