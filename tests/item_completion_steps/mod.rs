//! Step definitions for item completion scenarios.

mod when;
pub mod world;
