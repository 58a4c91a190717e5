//! Step definitions for overdue closure scenarios.

pub mod given;
pub mod then;
pub mod when;
pub mod world;
