//! Frontend pipeline
//!
//! This module contains the lexer and the parser.
//! The frontend turns source text into top-level statements and can hand
//! them to a [`Session`] for recording.

use crate::memory::Session;
use thiserror::Error;
use tracing::debug;

pub mod lexer;
pub mod parser;

use lexer::{LexError, LexerOptions};
use parser::ast::TopStmt;
use parser::ParseError;

/// Frontend context
#[derive(Debug, Default, Clone)]
pub struct Frontend {
    options: LexerOptions,
}

impl Frontend {
    /// Create a frontend with default lexer options
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn with_options(options: LexerOptions) -> Self {
        Self { options }
    }

    /// Parse source text into statements
    pub fn parse(
        &self,
        source: &str,
    ) -> Result<Vec<TopStmt>, FrontendError> {
        debug!("Parsing source ({} bytes)", source.len());
        let blocks = lexer::tokenize_blocks_with(source, &self.options)?;

        debug!("Starting parsing...");
        let stmts = parser::parse(&blocks)?;
        debug!("Parsing successful, got {} statements", stmts.len());

        Ok(stmts)
    }

    /// Parse source text, then record every statement into `session`
    ///
    /// Nothing is recorded unless the whole source parses.
    pub fn check(
        &self,
        source: &str,
        session: &mut Session,
    ) -> Result<Vec<TopStmt>, FrontendError> {
        let stmts = self.parse(source)?;
        for stmt in &stmts {
            session.record(&stmt.stmt);
        }
        debug!("Recorded {} statements", stmts.len());
        Ok(stmts)
    }
}

/// Frontend errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FrontendError {
    #[error("lexical error")]
    Lex(#[from] LexError),

    #[error("parse error")]
    Parse(#[from] ParseError),
}

/// Parse source text with default options
pub fn parse_source(source: &str) -> Result<Vec<TopStmt>, FrontendError> {
    Frontend::new().parse(source)
}

/// Parse source text with explicit lexer options
pub fn parse_source_with(
    source: &str,
    options: &LexerOptions,
) -> Result<Vec<TopStmt>, FrontendError> {
    Frontend::with_options(*options).parse(source)
}
