//! Litex front end
//!
//! Parses the indentation-structured Litex statement language into typed
//! statements and records established facts into a session-scoped fact
//! memory for a later verification pass.
//!
//! # Example
//!
//! ```
//! use litex::{check_source, Result};
//!
//! fn main() -> Result<()> {
//!     let session = check_source("know a = b")?;
//!     assert_eq!(session.memory().ground().count("="), 1);
//!     Ok(())
//! }
//! ```

#![warn(rust_2018_idioms)]

pub mod frontend;
pub mod memory;

// Utility modules
pub mod util;

// Re-exports
pub use anyhow::{Context, Result};
pub use thiserror::Error;

pub use frontend::{parse_source, parse_source_with, Frontend, FrontendError};
pub use memory::{FactMemory, Session};

use std::fs;
use std::path::Path;
use tracing::debug;
use util::config::Config;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Language name
pub const NAME: &str = "Litex";

/// Parse `source` and record it into a fresh session
pub fn check_source(source: &str) -> std::result::Result<Session, FrontendError> {
    let mut session = Session::new();
    Frontend::new().check(source, &mut session)?;
    Ok(session)
}

/// Read, parse and record a source file using the lexer settings in `config`
pub fn check_file(
    path: &Path,
    config: &Config,
) -> Result<Session> {
    debug!("checking {}", path.display());
    let source = read_source(path)?;
    let frontend = Frontend::with_options((&config.lexer).into());
    let mut session = Session::new();
    frontend
        .check(&source, &mut session)
        .with_context(|| format!("Failed to check: {}", path.display()))?;
    Ok(session)
}

/// Read a source file to a string
pub fn read_source(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path.display()))
}
