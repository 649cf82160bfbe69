//! Fc expression parsing
//!
//! Pratt loop over `+ - * / ^` with unary `-`; atoms are parenthesised
//! expressions, `as(..)` ascriptions, numbers, and identifier chains with
//! call suffixes.

use super::ast::*;
use super::state::*;
use super::{ParseError, SyntaxError};
use crate::frontend::lexer::tokens::{Keyword, Symbol, TokenKind};

impl<'a> ParserState<'a> {
    /// Parse a full Fc expression
    #[inline]
    pub fn parse_fc(&mut self) -> Result<Fc, ParseError> {
        self.parse_fc_bp(BP_LOWEST)
    }

    /// Pratt parser core
    ///
    /// Unary minus is only a prefix below exponentiation, so `2 ^ -1` and
    /// `- -a` are rejected while `-2 ^ 2` means `-(2 ^ 2)`.
    fn parse_fc_bp(
        &mut self,
        min_bp: u8,
    ) -> Result<Fc, ParseError> {
        let mut lhs = if min_bp <= BP_UNARY && self.skip_symbol(Symbol::Minus) {
            let operand = self.parse_fc_bp(BP_UNARY + 1)?;
            Fc::apply(Symbol::Minus, vec![operand])
        } else {
            self.parse_fc_atom()?
        };

        while let Some((operator, left_bp, right_bp)) = self.infix_info() {
            if left_bp < min_bp {
                break;
            }
            self.bump()?;
            let rhs = self.parse_fc_bp(right_bp)?;
            lhs = Fc::apply(operator, vec![lhs, rhs]);
        }

        Ok(lhs)
    }

    /// Binding powers of the infix operator at the cursor
    fn infix_info(&self) -> Option<(Symbol, u8, u8)> {
        let symbol = match &self.peek_nth(0)?.kind {
            TokenKind::Symbol(symbol) => *symbol,
            _ => return None,
        };
        match symbol {
            Symbol::Plus | Symbol::Minus => Some((symbol, BP_ADD, BP_ADD + 1)),
            Symbol::Star | Symbol::Slash => Some((symbol, BP_MUL, BP_MUL + 1)),
            // right-associative
            Symbol::Caret => Some((symbol, BP_POW, BP_POW)),
            _ => None,
        }
    }

    fn parse_fc_atom(&mut self) -> Result<Fc, ParseError> {
        if self.skip_symbol(Symbol::LParen) {
            let fc = self.parse_fc()?;
            self.expect_symbol(Symbol::RParen)?;
            return Ok(fc);
        }
        if self.at_keyword(Keyword::As) {
            return self.parse_typed_fc();
        }
        match &self.current()?.kind {
            TokenKind::Number(_) => self.parse_number(),
            TokenKind::Identifier(_) => self.parse_fc_chain(),
            _ => Err(self.expected("expression")),
        }
    }

    /// Numeric literal: digits, optionally `.` digits; each part must fit in a `u64`
    pub fn parse_number(&mut self) -> Result<Fc, ParseError> {
        let integer = match &self.current()?.kind {
            TokenKind::Number(digits) => digits.clone(),
            _ => return Err(self.expected("number")),
        };
        self.bump()?;

        if (integer.len() > 1 && integer.starts_with('0')) || integer.parse::<u64>().is_err() {
            return Err(SyntaxError::InvalidNumber(integer).into());
        }

        if !self.skip_symbol(Symbol::Dot) {
            return Ok(Fc::Number(integer));
        }

        match self.peek_nth(0).map(|t| &t.kind) {
            Some(TokenKind::Number(fraction)) => {
                let text = format!("{}.{}", integer, fraction);
                if fraction.parse::<u64>().is_err() {
                    return Err(SyntaxError::InvalidNumber(text).into());
                }
                self.bump()?;
                Ok(Fc::Number(text))
            }
            _ => Err(SyntaxError::InvalidNumber(format!("{}.", integer)).into()),
        }
    }

    /// `a`, `a.b.c`, with call suffixes on any segment
    pub(super) fn parse_fc_chain(&mut self) -> Result<Fc, ParseError> {
        let mut parts = vec![self.parse_fc_segment()?];
        while self.skip_symbol(Symbol::Dot) {
            parts.push(self.parse_fc_segment()?);
        }

        if parts.len() == 1 {
            Ok(parts.remove(0))
        } else {
            Ok(Fc::Chain(parts))
        }
    }

    /// Identifier followed by any number of `[..]` / `(..)` suffixes
    fn parse_fc_segment(&mut self) -> Result<Fc, ParseError> {
        let mut fc = Fc::Atom(self.expect_identifier()?);

        while self.at_symbol(Symbol::LBracket) || self.at_symbol(Symbol::LParen) {
            let type_args = if self.at_symbol(Symbol::LBracket) {
                self.parse_type_args()?
            } else {
                Vec::new()
            };
            let args = if self.at_symbol(Symbol::LParen) {
                self.parse_call_args()?
            } else {
                Vec::new()
            };
            fc = Fc::Call(FcCall {
                callee: Box::new(fc),
                type_args,
                args,
            });
        }

        Ok(fc)
    }

    /// `[T, as(U, C)]`; never empty
    pub fn parse_type_args(&mut self) -> Result<Vec<TypeArg>, ParseError> {
        self.expect_symbol(Symbol::LBracket)?;
        let mut args = Vec::new();
        loop {
            args.push(self.parse_type_arg()?);
            if !self.skip_symbol(Symbol::Comma) {
                break;
            }
        }
        self.expect_symbol(Symbol::RBracket)?;
        Ok(args)
    }

    fn parse_type_arg(&mut self) -> Result<TypeArg, ParseError> {
        if !self.skip_keyword(Keyword::As) {
            return Ok(TypeArg::Name(self.expect_identifier()?));
        }
        self.expect_symbol(Symbol::LParen)?;
        let name = self.expect_identifier()?;
        self.expect_symbol(Symbol::Comma)?;
        let concept = self.expect_identifier()?;
        self.expect_symbol(Symbol::RParen)?;
        Ok(TypeArg::Typed { name, concept })
    }

    /// `(a, b + 1)`; may be empty
    fn parse_call_args(&mut self) -> Result<Vec<Fc>, ParseError> {
        self.expect_symbol(Symbol::LParen)?;
        let mut args = Vec::new();
        if self.skip_symbol(Symbol::RParen) {
            return Ok(args);
        }
        loop {
            args.push(self.parse_fc()?);
            if !self.skip_symbol(Symbol::Comma) {
                break;
            }
        }
        self.expect_symbol(Symbol::RParen)?;
        Ok(args)
    }

    /// `as(fc, property[..](..))`
    fn parse_typed_fc(&mut self) -> Result<Fc, ParseError> {
        self.expect_keyword(Keyword::As)?;
        self.expect_symbol(Symbol::LParen)?;
        let fc = self.parse_fc()?;
        self.expect_symbol(Symbol::Comma)?;
        let ty = self.parse_property_type()?;
        self.expect_symbol(Symbol::RParen)?;
        Ok(Fc::Typed(TypedFc {
            fc: Box::new(fc),
            ty,
        }))
    }
}
