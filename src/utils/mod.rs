//! Utility functions

pub mod encoding;
pub mod paths;

pub use encoding::open_text_reader;
pub use paths::{display_path, install_base_dir};
