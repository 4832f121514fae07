//! Utils Module
pub mod encoding;
pub mod hash_utils;

// Re-export main types
pub use encoding::*;
pub use hash_utils::*;
