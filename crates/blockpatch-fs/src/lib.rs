//! Storage layer for Blockpatch
//!
//! Text reads with explicit not-found and decode errors, and atomic
//! write-then-rename persistence so a partially written target is never
//! visible.

pub mod error;
pub mod io;

pub use error::{Error, Result};
pub use io::{read_text, write_atomic, write_text};
