//! Foundation module - Core utilities and types
//!
//! - Math types and matrix builders
//! - Clocks and frame timing
//! - Logging initialisation

pub mod logging;
pub mod math;
pub mod time;
