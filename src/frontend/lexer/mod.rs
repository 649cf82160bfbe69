//! Lexer module
//!
//! Two passes over the source: each non-blank line is split into tokens
//! (longest-match symbols, then keywords, identifiers and digit runs),
//! then [`block::structure`] nests the lines into indentation blocks.

pub mod block;
pub mod tokens;

use crate::util::span::Position;
use tokens::*;

pub use block::TokenBlock;
pub use tokenizer::{tokenize, tokenize_lines, Line};

/// Lexer error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LexError {
    #[error("{position}: unexpected character '{ch}'")]
    UnexpectedChar { ch: char, position: Position },
    #[error("{position}: unexpected indentation (line is not inside a block opened by ':')")]
    UnexpectedIndent { position: Position },
    #[error("{position}: block header ends with ':' but has no indented body")]
    UnterminatedBlock { position: Position },
}

impl LexError {
    /// Where the error was detected
    pub fn position(&self) -> Position {
        match self {
            LexError::UnexpectedChar { position, .. }
            | LexError::UnexpectedIndent { position }
            | LexError::UnterminatedBlock { position } => *position,
        }
    }
}

/// Lexer options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LexerOptions {
    /// Spaces substituted for each tab
    pub tab_width: usize,
}

impl Default for LexerOptions {
    fn default() -> Self {
        Self { tab_width: 4 }
    }
}

impl From<&crate::util::config::LexerConfig> for LexerOptions {
    fn from(config: &crate::util::config::LexerConfig) -> Self {
        Self {
            tab_width: config.tab_width,
        }
    }
}

/// Tokenize source code and group it into top-level blocks
pub fn tokenize_blocks(source: &str) -> Result<Vec<TokenBlock>, LexError> {
    tokenize_blocks_with(source, &LexerOptions::default())
}

/// Tokenize source code with explicit options and group it into top-level blocks
pub fn tokenize_blocks_with(
    source: &str,
    options: &LexerOptions,
) -> Result<Vec<TokenBlock>, LexError> {
    tracing::debug!("lexing {} bytes", source.len());
    let lines = tokenize_lines(source, options)?;
    let blocks = block::structure(lines)?;
    tracing::debug!("lexed {} top-level blocks", blocks.len());
    Ok(blocks)
}

/// Line tokenizer
mod tokenizer {
    use super::*;
    use crate::util::span::Span;

    /// One logical source line: its indentation and tokens
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct Line {
        /// Leading spaces after tab expansion
        pub indent: usize,
        pub tokens: Vec<Token>,
        /// Position of the first token
        pub position: Position,
    }

    impl Line {
        /// Whether the line opens a body (last token is `:`)
        #[inline]
        pub fn opens_block(&self) -> bool {
            self.tokens
                .last()
                .map(|t| t.is_symbol(Symbol::Colon))
                .unwrap_or(false)
        }
    }

    /// Tokenize source into a flat token stream (block structure discarded)
    pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
        let lines = tokenize_lines(source, &LexerOptions::default())?;
        Ok(lines.into_iter().flat_map(|line| line.tokens).collect())
    }

    /// Tokenize each non-blank line, keeping its indentation
    pub fn tokenize_lines(
        source: &str,
        options: &LexerOptions,
    ) -> Result<Vec<Line>, LexError> {
        let normalized = normalize(source, options.tab_width);
        let mut lines = Vec::new();
        let mut offset = 0;

        for (index, raw) in normalized.split('\n').enumerate() {
            let line_start = offset;
            offset += raw.len() + 1;

            let indent = raw.len() - raw.trim_start_matches(' ').len();
            if raw.trim().is_empty() {
                continue;
            }

            let lexer = Lexer::new(raw, index + 1, line_start);
            let tokens = lexer.run(indent)?;
            let position = tokens
                .first()
                .map(|t| t.span.start)
                .unwrap_or_else(|| Position::with_offset(index + 1, indent + 1, line_start + indent));
            lines.push(Line {
                indent,
                tokens,
                position,
            });
        }

        Ok(lines)
    }

    /// Expand tabs and drop carriage returns
    fn normalize(
        source: &str,
        tab_width: usize,
    ) -> String {
        let tab = " ".repeat(tab_width);
        source.replace('\r', "").replace('\t', &tab)
    }

    struct Lexer<'a> {
        line: &'a str,
        line_no: usize,
        line_start: usize,
    }

    impl<'a> Lexer<'a> {
        fn new(
            line: &'a str,
            line_no: usize,
            line_start: usize,
        ) -> Self {
            Self {
                line,
                line_no,
                line_start,
            }
        }

        fn position(
            &self,
            byte: usize,
        ) -> Position {
            let column = self.line[..byte].chars().count() + 1;
            Position::with_offset(self.line_no, column, self.line_start + byte)
        }

        fn span(
            &self,
            start: usize,
            end: usize,
        ) -> Span {
            Span::new(self.position(start), self.position(end))
        }

        fn run(
            self,
            start: usize,
        ) -> Result<Vec<Token>, LexError> {
            let mut tokens = Vec::new();
            let mut i = start;

            while i < self.line.len() {
                let rest = &self.line[i..];
                let c = match rest.chars().next() {
                    Some(c) => c,
                    None => break,
                };

                if c == ' ' {
                    i += 1;
                    continue;
                }

                if let Some(symbol) = match_symbol(rest) {
                    let end = i + symbol.as_str().len();
                    tokens.push(Token::new(TokenKind::Symbol(symbol), self.span(i, end)));
                    i = end;
                    continue;
                }

                if c.is_ascii_digit() {
                    let len = rest
                        .find(|ch: char| !ch.is_ascii_digit())
                        .unwrap_or(rest.len());
                    let end = i + len;
                    tokens.push(Token::new(
                        TokenKind::Number(rest[..len].to_string()),
                        self.span(i, end),
                    ));
                    i = end;
                    continue;
                }

                if is_identifier_start(c) {
                    let len = rest
                        .char_indices()
                        .find(|&(_, ch)| !is_identifier_char(ch))
                        .map(|(idx, _)| idx)
                        .unwrap_or(rest.len());
                    let end = i + len;
                    let word = &rest[..len];
                    let kind = match Keyword::from_word(word) {
                        Some(keyword) => TokenKind::Keyword(keyword),
                        None => TokenKind::Identifier(word.to_string()),
                    };
                    tokens.push(Token::new(kind, self.span(i, end)));
                    i = end;
                    continue;
                }

                return Err(LexError::UnexpectedChar {
                    ch: c,
                    position: self.position(i),
                });
            }

            Ok(tokens)
        }
    }

    /// Longest builtin symbol that prefixes `rest`
    fn match_symbol(rest: &str) -> Option<Symbol> {
        SYMBOLS_LONGEST_FIRST
            .iter()
            .copied()
            .find(|s| rest.starts_with(s.as_str()))
    }

    fn is_identifier_start(c: char) -> bool {
        c == '_' || unicode_ident::is_xid_start(c)
    }

    fn is_identifier_char(c: char) -> bool {
        unicode_ident::is_xid_continue(c)
    }
}

#[cfg(test)]
mod tests;
