//! Utility functions

mod sanitize;

pub use sanitize::{sanitize_dir_name, sanitize_track_filename};
