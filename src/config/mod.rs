//! Configuration module for RichCopy
//!
//! This module handles user preferences and application settings,
//! including deserialization from JSON in the platform-specific
//! config directory.

mod persistence;
mod settings;

pub use persistence::*;
pub use settings::*;
