//! Indentation block structurer
//!
//! A line whose last token is `:` owns the following deeper-indented lines
//! as its body. Every body line sits at the indentation of the first one.

use super::tokens::Token;
use super::{LexError, Line};
use crate::util::span::Position;
use serde::Serialize;
use std::fmt;

/// One logical line plus the blocks nested under it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenBlock {
    /// Header tokens (one source line)
    pub header: Vec<Token>,
    /// Child blocks, in document order
    pub body: Vec<TokenBlock>,
    /// Indentation of the header line
    pub indent: usize,
    /// Position of the first header token
    pub position: Position,
}

impl TokenBlock {
    /// Header tokens joined by single spaces
    pub fn header_text(&self) -> String {
        self.header
            .iter()
            .map(|t| t.text())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Number of blocks in this subtree, including `self`
    pub fn block_count(&self) -> usize {
        1 + self.body.iter().map(TokenBlock::block_count).sum::<usize>()
    }

    fn write_indented(
        &self,
        f: &mut fmt::Formatter<'_>,
        depth: usize,
    ) -> fmt::Result {
        writeln!(f, "{}{}", "    ".repeat(depth), self.header_text())?;
        for child in &self.body {
            child.write_indented(f, depth + 1)?;
        }
        Ok(())
    }
}

impl fmt::Display for TokenBlock {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        self.write_indented(f, 0)
    }
}

/// Nest tokenized lines into top-level blocks
pub fn structure(lines: Vec<Line>) -> Result<Vec<TokenBlock>, LexError> {
    let mut pos = 0;
    let blocks = build_level(&lines, &mut pos, 0)?;
    debug_assert_eq!(pos, lines.len());
    Ok(blocks)
}

/// Collect consecutive lines at exactly `indent`, recursing into bodies
fn build_level(
    lines: &[Line],
    pos: &mut usize,
    indent: usize,
) -> Result<Vec<TokenBlock>, LexError> {
    let mut blocks = Vec::new();

    while let Some(line) = lines.get(*pos) {
        if line.indent < indent {
            break;
        }
        if line.indent > indent {
            return Err(LexError::UnexpectedIndent {
                position: line.position,
            });
        }
        *pos += 1;

        let body = if line.opens_block() {
            match lines.get(*pos) {
                Some(next) if next.indent > indent => build_level(lines, pos, next.indent)?,
                _ => {
                    return Err(LexError::UnterminatedBlock {
                        position: line.position,
                    })
                }
            }
        } else {
            Vec::new()
        };

        blocks.push(TokenBlock {
            header: line.tokens.clone(),
            body,
            indent: line.indent,
            position: line.position,
        });
    }

    Ok(blocks)
}
