//! Adapter implementations for account ports.

pub mod hasher;
pub mod memory;
pub mod postgres;
