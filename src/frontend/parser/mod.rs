//! Parser module
//!
//! Recursive descent over [`TokenBlock`]s. Each block gets its own
//! [`ParserState`]; operator expressions inside a header use a Pratt loop.
//! Errors raised inside a block are wrapped once per enclosing block; the
//! `source()` chain runs from the outermost header down to the innermost cause.

pub mod ast;
mod decl;
mod display;
mod expr;
mod fact;
mod state;
mod stmt;

pub use state::{ParserState, BP_LOWEST};

use crate::frontend::lexer::TokenBlock;
use crate::util::span::Position;
use ast::*;
use tracing::trace;

/// Token-level grammar violation
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SyntaxError {
    #[error("expected '{expected}', found '{found}'")]
    ExpectedToken { expected: String, found: String },
    #[error("expected '{0}' before end of line")]
    ExpectedBeforeEnd(String),
    #[error("unexpected end of line")]
    UnexpectedEnd,
    #[error("invalid number literal '{0}'")]
    InvalidNumber(String),
    #[error("'{0}' is not a relational operator")]
    NotRelational(String),
    #[error("'$' must be followed by a predicate call, found '{0}'")]
    ExpectedCall(String),
    #[error("expected exactly {expected} {what}, found {found}")]
    Arity {
        what: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("unexpected '{0}' after end of statement")]
    TrailingTokens(String),
    #[error("'not' cannot negate a forall fact")]
    NegatedForall,
}

/// Violation of the required block layout
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StructuralError {
    #[error("claim must end with a 'proof' block")]
    MissingProof,
    #[error("'if' block must be followed by a 'then' block")]
    IfWithoutThen,
    #[error("unexpected block '{0}' after 'then'")]
    TrailingBlock(String),
    #[error("unexpected block '{found}' in {context}")]
    UnexpectedBlock {
        context: &'static str,
        found: String,
    },
    #[error("duplicate '{block}' block in {context}")]
    DuplicateBlock {
        context: &'static str,
        block: &'static str,
    },
    #[error("{context} expects {expected} sub-block(s), found {found}")]
    BlockCount {
        context: &'static str,
        expected: usize,
        found: usize,
    },
}

/// Parse error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
    #[error(transparent)]
    Structural(#[from] StructuralError),
    /// Cause raised while parsing the block headed by `header`
    #[error("{position}: in `{header}` (token {offset})")]
    InBlock {
        header: String,
        offset: usize,
        position: Position,
        source: Box<ParseError>,
    },
}

/// Classification of the innermost cause
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    Syntax,
    Structural,
}

impl ParseError {
    /// Wrap with the context of `block`, cursor at `offset`
    pub fn in_block(
        self,
        block: &TokenBlock,
        offset: usize,
    ) -> ParseError {
        ParseError::InBlock {
            header: block.header_text(),
            offset,
            position: block.position,
            source: Box::new(self),
        }
    }

    /// Innermost error, with all block context stripped
    pub fn root_cause(&self) -> &ParseError {
        let mut error = self;
        while let ParseError::InBlock { source, .. } = error {
            error = source;
        }
        error
    }

    pub fn kind(&self) -> ParseErrorKind {
        match self.root_cause() {
            ParseError::Structural(_) => ParseErrorKind::Structural,
            _ => ParseErrorKind::Syntax,
        }
    }

    /// Headers of the enclosing blocks, outermost first
    pub fn block_headers(&self) -> Vec<&str> {
        let mut headers = Vec::new();
        let mut error = self;
        while let ParseError::InBlock { header, source, .. } = error {
            headers.push(header.as_str());
            error = source;
        }
        headers
    }
}

/// Parse top-level blocks in document order; the first error aborts
pub fn parse(blocks: &[TokenBlock]) -> Result<Vec<TopStmt>, ParseError> {
    let mut stmts = Vec::with_capacity(blocks.len());
    for block in blocks {
        let stmt = parse_top_stmt(block)?;
        trace!("parsed {} statement at {}", stmt.stmt.kind_name(), stmt.position);
        stmts.push(stmt);
    }
    Ok(stmts)
}

/// Parse one top-level block, honouring a leading `pub`
pub fn parse_top_stmt(block: &TokenBlock) -> Result<TopStmt, ParseError> {
    ParserState::parse_block(block, |state| {
        let is_pub = state.skip_keyword(crate::frontend::lexer::tokens::Keyword::Pub);
        let stmt = state.parse_stmt()?;
        state.expect_end()?;
        Ok(TopStmt {
            stmt,
            is_pub,
            position: block.position,
        })
    })
}

/// Parse one block as a statement
pub fn parse_stmt(block: &TokenBlock) -> Result<Stmt, ParseError> {
    ParserState::parse_block(block, |state| {
        let stmt = state.parse_stmt()?;
        state.expect_end()?;
        Ok(stmt)
    })
}

/// Parse a whole block header as a single Fc
pub fn parse_fc(block: &TokenBlock) -> Result<Fc, ParseError> {
    ParserState::parse_block(block, |state| {
        let fc = state.parse_fc()?;
        state.expect_end()?;
        Ok(fc)
    })
}

/// Parse one block as a fact
pub fn parse_fact(block: &TokenBlock) -> Result<Fact, ParseError> {
    ParserState::parse_block(block, |state| {
        let fact = state.parse_fact()?;
        state.expect_end()?;
        Ok(fact)
    })
}

#[cfg(test)]
mod tests;
