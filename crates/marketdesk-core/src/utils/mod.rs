//! Utility functions for text formatting.

pub mod format;

pub use format::{plain_emphasis, truncate_string};
