//! Declarations, parameter lists and types

use super::ast::*;
use super::state::*;
use super::ParseError;
use crate::frontend::lexer::tokens::{Keyword, Symbol};

impl<'a> ParserState<'a> {
    /// `[T C, U D]`: generic parameters, each bound to a concept
    pub fn parse_generic_params(&mut self) -> Result<Vec<GenericParam>, ParseError> {
        self.expect_symbol(Symbol::LBracket)?;
        let params = self.parse_generic_pairs()?;
        self.expect_symbol(Symbol::RBracket)?;
        Ok(params)
    }

    /// `[T C, U D :: $p(T), ...]`, or nothing when no `[` follows
    pub fn parse_guarded_generics(
        &mut self,
    ) -> Result<(Vec<GenericParam>, Vec<Fact>), ParseError> {
        if !self.skip_symbol(Symbol::LBracket) {
            return Ok((Vec::new(), Vec::new()));
        }
        let params = self.parse_generic_pairs()?;
        let guards = self.parse_optional_guards()?;
        self.expect_symbol(Symbol::RBracket)?;
        Ok((params, guards))
    }

    fn parse_generic_pairs(&mut self) -> Result<Vec<GenericParam>, ParseError> {
        let mut params = Vec::new();
        loop {
            let name = self.expect_identifier()?;
            let concept = self.expect_identifier()?;
            params.push(GenericParam { name, concept });
            if !self.skip_symbol(Symbol::Comma) {
                return Ok(params);
            }
        }
    }

    /// `(x A, y B)`; `()` is allowed
    pub fn parse_value_params(&mut self) -> Result<Vec<Param>, ParseError> {
        self.expect_symbol(Symbol::LParen)?;
        if self.skip_symbol(Symbol::RParen) {
            return Ok(Vec::new());
        }
        let params = self.parse_param_list()?;
        self.expect_symbol(Symbol::RParen)?;
        Ok(params)
    }

    /// `(x A, y B :: x > y, ...)`; the parameters may be empty
    pub fn parse_guarded_value_params(&mut self) -> Result<(Vec<Param>, Vec<Fact>), ParseError> {
        self.expect_symbol(Symbol::LParen)?;
        let params = if self.at_symbol(Symbol::RParen) || self.at_symbol(Symbol::ColonColon) {
            Vec::new()
        } else {
            self.parse_param_list()?
        };
        let guards = self.parse_optional_guards()?;
        self.expect_symbol(Symbol::RParen)?;
        Ok((params, guards))
    }

    /// `:: fact, fact`; empty when no `::` follows
    pub fn parse_optional_guards(&mut self) -> Result<Vec<Fact>, ParseError> {
        if !self.skip_symbol(Symbol::ColonColon) {
            return Ok(Vec::new());
        }
        let mut guards = vec![self.parse_specific_fact()?];
        while self.skip_symbol(Symbol::Comma) {
            guards.push(self.parse_specific_fact()?);
        }
        Ok(guards)
    }

    /// `x A, y B` without delimiters
    pub fn parse_param_list(&mut self) -> Result<Vec<Param>, ParseError> {
        let mut params = vec![self.parse_param()?];
        while self.skip_symbol(Symbol::Comma) {
            params.push(self.parse_param()?);
        }
        Ok(params)
    }

    fn parse_param(&mut self) -> Result<Param, ParseError> {
        let name = self.expect_identifier()?;
        let ty = self.parse_fc_type()?;
        Ok(Param { name, ty })
    }

    /// Named type, nested fn/property type, or `?fn`/`?var`/`?property`
    pub fn parse_fc_type(&mut self) -> Result<FcType, ParseError> {
        if self.at_keyword(Keyword::Fn) {
            return Ok(FcType::Fn(self.parse_fn_type()?));
        }
        if self.at_keyword(Keyword::Property) {
            return Ok(FcType::Property(self.parse_property_type()?));
        }
        if self.skip_symbol(Symbol::Question) {
            let kind = if self.skip_keyword(Keyword::Fn) {
                UndefinedKind::Fn
            } else if self.skip_keyword(Keyword::Var) {
                UndefinedKind::Var
            } else if self.skip_keyword(Keyword::Property) {
                UndefinedKind::Property
            } else {
                return Err(self.expected("fn, var or property"));
            };
            return Ok(FcType::Undefined(kind));
        }
        Ok(FcType::Named(self.expect_identifier()?))
    }

    /// `fn [T C](x A :: x > 0) R`
    pub fn parse_fn_type(&mut self) -> Result<FnType, ParseError> {
        self.expect_keyword(Keyword::Fn)?;
        self.parse_fn_signature()
    }

    fn parse_fn_signature(&mut self) -> Result<FnType, ParseError> {
        let (generics, mut guards) = self.parse_guarded_generics()?;
        let (params, param_guards) = self.parse_guarded_value_params()?;
        guards.extend(param_guards);
        let ret = Box::new(self.parse_fc_type()?);
        Ok(FnType {
            generics,
            params,
            guards,
            ret,
        })
    }

    /// `property [T C](x A)`
    pub fn parse_property_type(&mut self) -> Result<PropertyType, ParseError> {
        self.expect_keyword(Keyword::Property)?;
        self.parse_property_signature()
    }

    pub(super) fn parse_property_signature(&mut self) -> Result<PropertyType, ParseError> {
        let (generics, mut guards) = self.parse_guarded_generics()?;
        let (params, param_guards) = self.parse_guarded_value_params()?;
        guards.extend(param_guards);
        Ok(PropertyType {
            generics,
            params,
            guards,
        })
    }

    /// `var x A, y B`
    pub fn parse_var_decl(&mut self) -> Result<VarDecl, ParseError> {
        self.expect_keyword(Keyword::Var)?;
        Ok(VarDecl {
            vars: self.parse_param_list()?,
        })
    }

    /// `fn f[T C](x A) R`
    pub fn parse_fn_decl(&mut self) -> Result<FnDecl, ParseError> {
        self.expect_keyword(Keyword::Fn)?;
        let name = self.expect_identifier()?;
        let ty = self.parse_fn_signature()?;
        Ok(FnDecl { name, ty })
    }

    /// `property p[T C](x A)`
    pub fn parse_property_decl(&mut self) -> Result<PropertyDecl, ParseError> {
        self.expect_keyword(Keyword::Property)?;
        let name = self.expect_identifier()?;
        let ty = self.parse_property_signature()?;
        Ok(PropertyDecl { name, ty })
    }

    /// Any declaration, selected by its leading keyword
    pub fn parse_decl(&mut self) -> Result<Decl, ParseError> {
        if self.at_keyword(Keyword::Var) {
            Ok(Decl::Var(self.parse_var_decl()?))
        } else if self.at_keyword(Keyword::Fn) {
            Ok(Decl::Fn(self.parse_fn_decl()?))
        } else if self.at_keyword(Keyword::Property) {
            Ok(Decl::Property(self.parse_property_decl()?))
        } else {
            Err(self.expected("var, fn or property declaration"))
        }
    }

    /// Children of the current block, one declaration per line
    pub fn parse_decl_body(&self) -> Result<Vec<Decl>, ParseError> {
        self.body()
            .iter()
            .map(|child| {
                ParserState::parse_block(child, |state| {
                    let decl = state.parse_decl()?;
                    state.expect_end()?;
                    Ok(decl)
                })
            })
            .collect()
    }

    /// Like [`ParserState::parse_decl_body`], sorted by kind
    pub fn parse_members_body(&self) -> Result<Members, ParseError> {
        let mut members = Members::default();
        for decl in self.parse_decl_body()? {
            members.push(decl);
        }
        Ok(members)
    }
}
