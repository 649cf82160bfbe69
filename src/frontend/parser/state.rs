//! Parser state and token cursor over one block header

use super::{ParseError, SyntaxError};
use crate::frontend::lexer::tokens::{Keyword, Symbol, Token, TokenKind};
use crate::frontend::lexer::TokenBlock;

/// Binding power levels for the Fc operator parser
pub const BP_LOWEST: u8 = 0;
pub const BP_ADD: u8 = 60;
pub const BP_MUL: u8 = 70;
pub const BP_UNARY: u8 = 80;
pub const BP_POW: u8 = 90;

/// Cursor over the header tokens of a single [`TokenBlock`]
///
/// Every block gets a fresh state; the body is reachable through
/// [`ParserState::body`] and is parsed by nested states.
#[derive(Debug)]
pub struct ParserState<'a> {
    /// Block being parsed
    block: &'a TokenBlock,
    /// Header tokens of that block
    tokens: &'a [Token],
    /// Index of the next unread token
    pos: usize,
}

impl<'a> ParserState<'a> {
    /// Create a new parser state positioned at the first header token
    #[inline]
    pub fn new(block: &'a TokenBlock) -> Self {
        Self {
            block,
            tokens: &block.header,
            pos: 0,
        }
    }

    #[inline]
    pub fn block(&self) -> &'a TokenBlock {
        self.block
    }

    /// Child blocks of the current block
    #[inline]
    pub fn body(&self) -> &'a [TokenBlock] {
        &self.block.body
    }

    /// Cursor offset into the header
    #[inline]
    pub fn offset(&self) -> usize {
        self.pos
    }

    /// True once every header token has been consumed
    #[inline]
    pub fn exceed_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    /// Current token; fails when the header is exhausted
    #[inline]
    pub fn current(&self) -> Result<&'a Token, ParseError> {
        self.tokens
            .get(self.pos)
            .ok_or_else(|| SyntaxError::UnexpectedEnd.into())
    }

    /// Peek at nth token ahead without consuming
    #[inline]
    pub fn peek_nth(
        &self,
        n: usize,
    ) -> Option<&'a Token> {
        self.tokens.get(self.pos + n)
    }

    /// Consume and return the current token
    #[inline]
    pub fn next(&mut self) -> Result<&'a Token, ParseError> {
        let token = self.current()?;
        self.pos += 1;
        Ok(token)
    }

    /// Advance past the current token, whatever it is
    #[inline]
    pub fn bump(&mut self) -> Result<(), ParseError> {
        self.next().map(|_| ())
    }

    /// Whether the current token is `symbol`; false at the end
    #[inline]
    pub fn at_symbol(
        &self,
        symbol: Symbol,
    ) -> bool {
        matches!(self.tokens.get(self.pos), Some(t) if t.is_symbol(symbol))
    }

    /// Whether the current token is `keyword`; false at the end
    #[inline]
    pub fn at_keyword(
        &self,
        keyword: Keyword,
    ) -> bool {
        matches!(self.tokens.get(self.pos), Some(t) if t.is_keyword(keyword))
    }

    /// Consume `symbol` if present
    #[inline]
    pub fn skip_symbol(
        &mut self,
        symbol: Symbol,
    ) -> bool {
        if self.at_symbol(symbol) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Consume `keyword` if present
    #[inline]
    pub fn skip_keyword(
        &mut self,
        keyword: Keyword,
    ) -> bool {
        if self.at_keyword(keyword) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Consume `symbol` or fail with the token that was found instead
    pub fn expect_symbol(
        &mut self,
        symbol: Symbol,
    ) -> Result<(), ParseError> {
        if self.skip_symbol(symbol) {
            return Ok(());
        }
        Err(self.expected(symbol.as_str()))
    }

    /// Consume `keyword` or fail with the token that was found instead
    pub fn expect_keyword(
        &mut self,
        keyword: Keyword,
    ) -> Result<(), ParseError> {
        if self.skip_keyword(keyword) {
            return Ok(());
        }
        Err(self.expected(keyword.as_str()))
    }

    /// Consume an identifier and return its text
    pub fn expect_identifier(&mut self) -> Result<String, ParseError> {
        match self.tokens.get(self.pos) {
            Some(Token {
                kind: TokenKind::Identifier(name),
                ..
            }) => {
                self.pos += 1;
                Ok(name.clone())
            }
            _ => Err(self.expected("identifier")),
        }
    }

    /// Fail unless the whole header has been consumed
    pub fn expect_end(&self) -> Result<(), ParseError> {
        if self.exceed_end() {
            return Ok(());
        }
        Err(SyntaxError::TrailingTokens(self.current()?.text().to_string()).into())
    }

    /// Error for a missing `expected` at the cursor
    pub fn expected(
        &self,
        expected: &str,
    ) -> ParseError {
        match self.tokens.get(self.pos) {
            Some(token) => SyntaxError::ExpectedToken {
                expected: expected.to_string(),
                found: token.text().to_string(),
            }
            .into(),
            None => SyntaxError::ExpectedBeforeEnd(expected.to_string()).into(),
        }
    }

    /// Attach this block's header and the cursor offset to an error
    pub fn wrap(
        &self,
        error: ParseError,
    ) -> ParseError {
        error.in_block(self.block, self.pos)
    }
}

impl<'a> ParserState<'a> {
    /// Run `f` over a fresh state for `block`, wrapping failures with its context
    pub fn parse_block<T>(
        block: &'a TokenBlock,
        f: impl FnOnce(&mut ParserState<'a>) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        let mut state = ParserState::new(block);
        f(&mut state).map_err(|error| state.wrap(error))
    }
}

/// Whether the header of `block` begins with `keyword`
#[inline]
pub fn starts_with_keyword(
    block: &TokenBlock,
    keyword: Keyword,
) -> bool {
    block.header.first().is_some_and(|t| t.is_keyword(keyword))
}
