//! Statement parsing

use super::ast::*;
use super::state::*;
use super::{ParseError, StructuralError, SyntaxError};
use crate::frontend::lexer::tokens::{Keyword, Symbol, TokenKind};
use crate::frontend::lexer::TokenBlock;

impl<'a> ParserState<'a> {
    /// Parse a statement, dispatching on the leading keyword
    pub fn parse_stmt(&mut self) -> Result<Stmt, ParseError> {
        let keyword = match &self.current()?.kind {
            TokenKind::Keyword(keyword) => *keyword,
            _ => return Ok(Stmt::from(self.parse_fact()?)),
        };

        match keyword {
            // concept T Group:
            Keyword::Concept => self.parse_def_concept(),
            // type Nat:
            Keyword::Type => self.parse_def_type(),
            Keyword::Property => self.parse_def_property(),
            Keyword::Fn => self.parse_def_fn(),
            Keyword::Var => self.parse_def_var(),
            Keyword::Claim => self.parse_claim(),
            // bare proof block
            Keyword::Proof => self.parse_proof(),
            Keyword::Use => self.parse_def_use(),
            Keyword::Know => self.parse_know(),
            Keyword::Exist => self.parse_def_exist(),
            Keyword::Have => self.parse_have(),
            Keyword::Member => self.parse_def_member(),
            Keyword::TypeMember => self.parse_def_type_member(),
            // not, forall
            _ => Ok(Stmt::from(self.parse_fact()?)),
        }
    }

    fn parse_def_concept(&mut self) -> Result<Stmt, ParseError> {
        self.expect_keyword(Keyword::Concept)?;
        let type_var = self.expect_identifier()?;
        let name = self.expect_identifier()?;
        let body = self.parse_concept_body("concept")?;
        Ok(Stmt::DefConcept(DefConceptStmt {
            type_var,
            name,
            body,
        }))
    }

    fn parse_def_type(&mut self) -> Result<Stmt, ParseError> {
        self.expect_keyword(Keyword::Type)?;
        let name = self.expect_identifier()?;
        let body = self.parse_concept_body("type")?;
        Ok(Stmt::DefType(DefTypeStmt { name, body }))
    }

    /// Optional `:` followed by inherit/type_member/member/then sections
    fn parse_concept_body(
        &mut self,
        context: &'static str,
    ) -> Result<ConceptBody, ParseError> {
        let mut body = ConceptBody::default();
        if !self.skip_symbol(Symbol::Colon) {
            return Ok(body);
        }

        let sections = [
            Keyword::Inherit,
            Keyword::TypeMember,
            Keyword::Member,
            Keyword::Then,
        ];
        let mut seen = Vec::new();
        for child in self.body() {
            let keyword = section_keyword(child, &sections, &mut seen, context)?;
            match keyword {
                Keyword::Inherit => {
                    body.inherit = ParserState::parse_section(child, keyword, |s| s.parse_name_lines())?
                }
                Keyword::TypeMember => {
                    body.type_members =
                        ParserState::parse_section(child, keyword, |s| s.parse_members_body())?
                }
                Keyword::Member => {
                    body.members = ParserState::parse_section(child, keyword, |s| s.parse_members_body())?
                }
                _ => {
                    body.then_facts = ParserState::parse_section(child, keyword, |s| s.parse_facts_body())?
                }
            }
        }
        Ok(body)
    }

    fn parse_def_property(&mut self) -> Result<Stmt, ParseError> {
        let decl = self.parse_property_decl()?;
        let (if_facts, then_facts) = self.parse_optional_if_then()?;
        Ok(Stmt::DefProperty(DefPropertyStmt {
            decl,
            if_facts,
            then_facts,
        }))
    }

    fn parse_def_fn(&mut self) -> Result<Stmt, ParseError> {
        let decl = self.parse_fn_decl()?;
        let (if_facts, then_facts) = self.parse_optional_if_then()?;
        Ok(Stmt::DefFn(DefFnStmt {
            decl,
            if_facts,
            then_facts,
        }))
    }

    /// `var x A, y B[:]` with the body holding conditions on the new names
    fn parse_def_var(&mut self) -> Result<Stmt, ParseError> {
        let decl = self.parse_var_decl()?;
        let facts = self.parse_optional_facts()?;
        Ok(Stmt::DefVar(DefVarStmt { decl, facts }))
    }

    /// `claim:` whose last child is `proof:`
    fn parse_claim(&mut self) -> Result<Stmt, ParseError> {
        self.expect_keyword(Keyword::Claim)?;
        self.expect_symbol(Symbol::Colon)?;

        let (last, facts) = match self.body().split_last() {
            Some((last, facts)) if starts_with_keyword(last, Keyword::Proof) => (last, facts),
            _ => return Err(StructuralError::MissingProof.into()),
        };
        let to_check = parse_fact_blocks(facts)?;
        let proof = ParserState::parse_section(last, Keyword::Proof, |s| s.parse_stmts_body())?;
        Ok(Stmt::Claim(ClaimStmt { to_check, proof }))
    }

    /// `proof:` on its own proves nothing in particular
    fn parse_proof(&mut self) -> Result<Stmt, ParseError> {
        self.expect_keyword(Keyword::Proof)?;
        self.expect_symbol(Symbol::Colon)?;
        let proof = self.parse_stmts_body()?;
        Ok(Stmt::Claim(ClaimStmt {
            to_check: Vec::new(),
            proof,
        }))
    }

    /// `use name fc`
    fn parse_def_use(&mut self) -> Result<Stmt, ParseError> {
        self.expect_keyword(Keyword::Use)?;
        let name = self.expect_identifier()?;
        let value = self.parse_fc()?;
        Ok(Stmt::DefUse(DefUseStmt { name, value }))
    }

    /// `know fact` or `know:` with one fact per child line
    fn parse_know(&mut self) -> Result<Stmt, ParseError> {
        self.expect_keyword(Keyword::Know)?;
        let facts = if self.skip_symbol(Symbol::Colon) {
            self.parse_facts_body()?
        } else {
            vec![self.parse_fact()?]
        };
        Ok(Stmt::Know(KnowStmt { facts }))
    }

    /// `exist p[T C](x A):` with optional if/member/then sections
    fn parse_def_exist(&mut self) -> Result<Stmt, ParseError> {
        self.expect_keyword(Keyword::Exist)?;
        let name = self.expect_identifier()?;
        let ty = self.parse_property_signature()?;

        let mut stmt = DefExistStmt {
            decl: PropertyDecl { name, ty },
            if_facts: Vec::new(),
            members: Vec::new(),
            then_facts: Vec::new(),
        };
        if !self.skip_symbol(Symbol::Colon) {
            return Ok(Stmt::DefExist(stmt));
        }

        let sections = [Keyword::If, Keyword::Member, Keyword::Then];
        let mut seen = Vec::new();
        for child in self.body() {
            let keyword = section_keyword(child, &sections, &mut seen, "exist")?;
            match keyword {
                Keyword::If => {
                    stmt.if_facts = ParserState::parse_section(child, keyword, |s| s.parse_facts_body())?
                }
                Keyword::Member => {
                    stmt.members = ParserState::parse_section(child, keyword, |s| s.parse_decl_body())?
                }
                _ => {
                    stmt.then_facts = ParserState::parse_section(child, keyword, |s| s.parse_facts_body())?
                }
            }
        }
        Ok(Stmt::DefExist(stmt))
    }

    /// `have $p(x):` with a single child naming the witnesses
    fn parse_have(&mut self) -> Result<Stmt, ParseError> {
        self.expect_keyword(Keyword::Have)?;
        let fact = self.parse_property_fact(true)?;
        self.expect_symbol(Symbol::Colon)?;

        let members = match self.body() {
            [names] => ParserState::parse_block(names, |state| {
                let names = state.parse_name_list()?;
                state.expect_end()?;
                Ok(names)
            })?,
            body => {
                return Err(StructuralError::BlockCount {
                    context: "have",
                    expected: 1,
                    found: body.len(),
                }
                .into())
            }
        };
        Ok(Stmt::Have(HaveStmt { fact, members }))
    }

    /// `member [T C] (v T) <decl>[:]`
    fn parse_def_member(&mut self) -> Result<Stmt, ParseError> {
        self.expect_keyword(Keyword::Member)?;
        let type_concept = single(self.parse_generic_params()?, "type-concept pair")?;
        let instance = single(self.parse_value_params()?, "instance parameter")?;
        let decl = self.parse_decl()?;
        let facts = self.parse_optional_facts()?;
        Ok(Stmt::DefMember(DefMemberStmt {
            type_concept,
            instance,
            decl,
            facts,
        }))
    }

    /// `type_member [T C] <decl>[:]`
    fn parse_def_type_member(&mut self) -> Result<Stmt, ParseError> {
        self.expect_keyword(Keyword::TypeMember)?;
        let type_concept = single(self.parse_generic_params()?, "type-concept pair")?;
        let decl = self.parse_decl()?;
        let facts = self.parse_optional_facts()?;
        Ok(Stmt::DefTypeMember(DefTypeMemberStmt {
            type_concept,
            decl,
            facts,
        }))
    }

    fn parse_optional_if_then(&mut self) -> Result<(Vec<Fact>, Vec<Fact>), ParseError> {
        if self.skip_symbol(Symbol::Colon) {
            self.parse_if_then_body()
        } else {
            Ok((Vec::new(), Vec::new()))
        }
    }

    fn parse_optional_facts(&mut self) -> Result<Vec<Fact>, ParseError> {
        if self.skip_symbol(Symbol::Colon) {
            self.parse_facts_body()
        } else {
            Ok(Vec::new())
        }
    }

    /// `a, b, c`
    pub fn parse_name_list(&mut self) -> Result<Vec<String>, ParseError> {
        let mut names = vec![self.expect_identifier()?];
        while self.skip_symbol(Symbol::Comma) {
            names.push(self.expect_identifier()?);
        }
        Ok(names)
    }

    /// Name lists over every child line, flattened
    fn parse_name_lines(&self) -> Result<Vec<String>, ParseError> {
        let mut names = Vec::new();
        for child in self.body() {
            names.extend(ParserState::parse_block(child, |state| {
                let line = state.parse_name_list()?;
                state.expect_end()?;
                Ok(line)
            })?);
        }
        Ok(names)
    }

    /// Children of the current block as statements
    fn parse_stmts_body(&self) -> Result<Vec<Stmt>, ParseError> {
        self.body().iter().map(super::parse_stmt).collect()
    }
}

/// Parse each block as one fact
fn parse_fact_blocks(blocks: &[TokenBlock]) -> Result<Vec<Fact>, ParseError> {
    blocks.iter().map(super::parse_fact).collect()
}

/// Which allowed section `block` opens; each may appear once
fn section_keyword(
    block: &TokenBlock,
    allowed: &[Keyword],
    seen: &mut Vec<Keyword>,
    context: &'static str,
) -> Result<Keyword, ParseError> {
    let keyword = allowed
        .iter()
        .copied()
        .find(|k| starts_with_keyword(block, *k))
        .ok_or_else(|| StructuralError::UnexpectedBlock {
            context,
            found: block.header_text(),
        })?;
    if seen.contains(&keyword) {
        return Err(StructuralError::DuplicateBlock {
            context,
            block: keyword.as_str(),
        }
        .into());
    }
    seen.push(keyword);
    Ok(keyword)
}

fn single<T>(
    mut items: Vec<T>,
    what: &'static str,
) -> Result<T, ParseError> {
    if items.len() == 1 {
        Ok(items.remove(0))
    } else {
        Err(SyntaxError::Arity {
            what,
            expected: 1,
            found: items.len(),
        }
        .into())
    }
}
