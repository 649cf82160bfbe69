//! Facts and fact bodies

use super::ast::*;
use super::state::*;
use super::{ParseError, StructuralError, SyntaxError};
use crate::frontend::lexer::tokens::{Keyword, Symbol, TokenKind};
use crate::frontend::lexer::TokenBlock;

impl<'a> ParserState<'a> {
    /// `[not] (forall .. | $p(..) | a = b ..)`
    pub fn parse_fact(&mut self) -> Result<Fact, ParseError> {
        if self.at_keyword(Keyword::Forall) {
            return Ok(Fact::Forall(self.parse_forall()?));
        }
        self.parse_specific_fact()
    }

    /// `[not] ($p(..) | a = b ..)`; a forall is rejected
    pub fn parse_specific_fact(&mut self) -> Result<Fact, ParseError> {
        let is_true = !self.skip_keyword(Keyword::Not);
        if self.at_keyword(Keyword::Forall) {
            if is_true {
                return Err(self.expected("relational or property fact"));
            }
            return Err(SyntaxError::NegatedForall.into());
        }
        if self.at_symbol(Symbol::Dollar) {
            return Ok(Fact::Property(self.parse_property_fact(is_true)?));
        }
        self.parse_relational_fact(is_true)
    }

    /// `$p(x)`, `$a.p[T](x)`
    pub fn parse_property_fact(
        &mut self,
        is_true: bool,
    ) -> Result<PropertyFact, ParseError> {
        self.expect_symbol(Symbol::Dollar)?;
        let fc = self.parse_fc_chain()?;
        match into_predicate_call(fc) {
            Ok(call) => Ok(PropertyFact { is_true, call }),
            Err(fc) => Err(SyntaxError::ExpectedCall(fc.to_string()).into()),
        }
    }

    /// `x is p[T]` or a chain of one relational operator
    fn parse_relational_fact(
        &mut self,
        is_true: bool,
    ) -> Result<Fact, ParseError> {
        let first = self.parse_fc()?;

        if self.skip_keyword(Keyword::Is) {
            let name = self.expect_identifier()?;
            let type_args = if self.at_symbol(Symbol::LBracket) {
                let args = self.parse_type_args()?;
                if args.len() != 1 {
                    return Err(SyntaxError::Arity {
                        what: "type argument after 'is'",
                        expected: 1,
                        found: args.len(),
                    }
                    .into());
                }
                args
            } else {
                Vec::new()
            };
            return Ok(Fact::Property(PropertyFact {
                is_true,
                call: FcCall {
                    callee: Box::new(Fc::Atom(name)),
                    type_args,
                    args: vec![first],
                },
            }));
        }

        let operator = match self.peek_nth(0).map(|t| &t.kind) {
            Some(TokenKind::Symbol(symbol)) if symbol.is_relational() => *symbol,
            Some(TokenKind::Symbol(symbol)) => {
                return Err(SyntaxError::NotRelational(symbol.as_str().to_string()).into())
            }
            _ => return Err(self.expected("relational operator")),
        };
        self.bump()?;

        let mut operands = vec![first, self.parse_fc()?];
        while self.skip_symbol(operator) {
            operands.push(self.parse_fc()?);
        }

        Ok(Fact::Relational(RelationalFact {
            is_true,
            operator,
            operands,
        }))
    }

    /// `forall [T C] x A, y B :: x > y:` with an if/then or flat body
    ///
    /// Header guards come first in `if_facts`.
    pub fn parse_forall(&mut self) -> Result<ForallFact, ParseError> {
        self.expect_keyword(Keyword::Forall)?;
        let (generics, mut if_facts) = self.parse_guarded_generics()?;
        let params = self.parse_param_list()?;
        if_facts.extend(self.parse_optional_guards()?);
        self.expect_symbol(Symbol::Colon)?;
        let (body_if, then_facts) = self.parse_if_then_body()?;
        if_facts.extend(body_if);
        Ok(ForallFact {
            generics,
            params,
            if_facts,
            then_facts,
        })
    }

    /// Body shaped as `if:` + `then:`, a lone `then:`, or bare facts
    ///
    /// Returns `(if_facts, then_facts)`.
    pub fn parse_if_then_body(&self) -> Result<(Vec<Fact>, Vec<Fact>), ParseError> {
        let body = self.body();
        let Some(first) = body.first() else {
            return Ok((Vec::new(), Vec::new()));
        };

        if starts_with_keyword(first, Keyword::If) {
            let if_facts = ParserState::parse_section(first, Keyword::If, |s| s.parse_facts_body())?;
            let then_facts = match body.get(1) {
                Some(second) if starts_with_keyword(second, Keyword::Then) => {
                    ParserState::parse_section(second, Keyword::Then, |s| s.parse_facts_body())?
                }
                _ => return Err(StructuralError::IfWithoutThen.into()),
            };
            if let Some(extra) = body.get(2) {
                return Err(StructuralError::TrailingBlock(extra.header_text()).into());
            }
            return Ok((if_facts, then_facts));
        }

        if starts_with_keyword(first, Keyword::Then) {
            if let Some(extra) = body.get(1) {
                return Err(StructuralError::TrailingBlock(extra.header_text()).into());
            }
            let then_facts = ParserState::parse_section(first, Keyword::Then, |s| s.parse_facts_body())?;
            return Ok((Vec::new(), then_facts));
        }

        Ok((Vec::new(), self.parse_facts_body()?))
    }

    /// Children of the current block, one fact each
    pub fn parse_facts_body(&self) -> Result<Vec<Fact>, ParseError> {
        self.body().iter().map(super::parse_fact).collect()
    }

    /// Sub-block whose header is exactly `<keyword>:`
    pub fn parse_section<T>(
        block: &'a TokenBlock,
        keyword: Keyword,
        f: impl FnOnce(&ParserState<'a>) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        ParserState::parse_block(block, |state| {
            state.expect_keyword(keyword)?;
            state.expect_symbol(Symbol::Colon)?;
            state.expect_end()?;
            f(state)
        })
    }
}

/// View a parsed Fc as a predicate application
///
/// A chain ending in a call, `a.p(x)`, becomes a call whose callee is the
/// chain `a.p`.
fn into_predicate_call(fc: Fc) -> Result<FcCall, Fc> {
    match fc {
        Fc::Call(call) => Ok(call),
        Fc::Chain(mut parts) => match parts.pop() {
            Some(Fc::Call(last)) => {
                parts.push(*last.callee);
                Ok(FcCall {
                    callee: Box::new(Fc::Chain(parts)),
                    type_args: last.type_args,
                    args: last.args,
                })
            }
            Some(other) => {
                parts.push(other);
                Err(Fc::Chain(parts))
            }
            None => Err(Fc::Chain(parts)),
        },
        other => Err(other),
    }
}
