//! Configuration module for htmlsmith
//!
//! This module handles user preferences and the last session, including
//! serialization to/from JSON and persistent storage in platform-specific
//! directories.

mod persistence;
mod settings;

pub use persistence::*;
pub use settings::*;
