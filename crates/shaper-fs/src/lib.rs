//! Filesystem layer for shaper
//!
//! Provides `/`-normalized path keys, atomic writes, directory walking and
//! directory creation that detects file/directory conflicts.

pub mod config;
pub mod error;
pub mod io;
pub mod path;
pub mod walk;

pub use config::ConfigStore;
pub use error::{Error, Result};
pub use path::{NormalizedPath, absolute, validate_relative};
pub use walk::{Walk, WalkEntry, walk_files};
