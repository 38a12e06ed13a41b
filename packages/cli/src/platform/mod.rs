//! Operating system helpers for zbg.
//!
//! - [`fs`] - atomic writes, recursive copies and write-access checks
//! - [`path`] - tilde expansion and background name derivation

pub mod fs;
pub mod path;

pub use fs::{copy_dir_all, ensure_writable, write_atomic};
pub use path::{capitalize, derive_background_name, expand};
