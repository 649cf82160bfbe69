//! Canonical source printer
//!
//! Output re-parses to an equal AST. Operator applications are fully
//! parenthesised; nested blocks are indented by four spaces.

use super::ast::*;
use std::fmt::{self, Display, Formatter, Write};

const INDENT: &str = "    ";
const OPERATORS: [&str; 5] = ["+", "-", "*", "/", "^"];

fn newline(
    f: &mut Formatter<'_>,
    depth: usize,
) -> fmt::Result {
    f.write_char('\n')?;
    for _ in 0..depth {
        f.write_str(INDENT)?;
    }
    Ok(())
}

/// Items joined by `sep`
fn write_joined<T: Display>(
    f: &mut Formatter<'_>,
    items: &[T],
    sep: &str,
) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(sep)?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

fn write_generics(
    f: &mut Formatter<'_>,
    generics: &[GenericParam],
) -> fmt::Result {
    if generics.is_empty() {
        return Ok(());
    }
    f.write_char('[')?;
    write_joined(f, generics, ", ")?;
    f.write_char(']')
}

/// `(x A, y B)`, with any guards as a `:: fact, ...` tail
fn write_params(
    f: &mut Formatter<'_>,
    params: &[Param],
    guards: &[Fact],
) -> fmt::Result {
    f.write_char('(')?;
    write_joined(f, params, ", ")?;
    if !guards.is_empty() {
        if !params.is_empty() {
            f.write_char(' ')?;
        }
        f.write_str(":: ")?;
        write_joined(f, guards, ", ")?;
    }
    f.write_char(')')
}

impl Display for Fc {
    fn fmt(
        &self,
        f: &mut Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Fc::Atom(name) | Fc::Number(name) => f.write_str(name),
            Fc::Chain(parts) => write_joined(f, parts, "."),
            Fc::Call(call) => Display::fmt(call, f),
            Fc::Typed(typed) => write!(f, "as({}, {})", typed.fc, typed.ty),
        }
    }
}

impl Display for FcCall {
    fn fmt(
        &self,
        f: &mut Formatter<'_>,
    ) -> fmt::Result {
        if let Fc::Atom(op) = self.callee.as_ref() {
            if self.type_args.is_empty() && OPERATORS.contains(&op.as_str()) {
                match self.args.as_slice() {
                    [lhs, rhs] => return write!(f, "({} {} {})", lhs, op, rhs),
                    [operand] => return write!(f, "({}{})", op, operand),
                    _ => {}
                }
            }
        }

        write!(f, "{}", self.callee)?;
        if !self.type_args.is_empty() {
            f.write_char('[')?;
            write_joined(f, &self.type_args, ", ")?;
            f.write_char(']')?;
        }
        f.write_char('(')?;
        write_joined(f, &self.args, ", ")?;
        f.write_char(')')
    }
}

impl Display for TypeArg {
    fn fmt(
        &self,
        f: &mut Formatter<'_>,
    ) -> fmt::Result {
        match self {
            TypeArg::Name(name) => f.write_str(name),
            TypeArg::Typed { name, concept } => write!(f, "as({}, {})", name, concept),
        }
    }
}

impl Display for GenericParam {
    fn fmt(
        &self,
        f: &mut Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{} {}", self.name, self.concept)
    }
}

impl Display for Param {
    fn fmt(
        &self,
        f: &mut Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{} {}", self.name, self.ty)
    }
}

impl Display for FcType {
    fn fmt(
        &self,
        f: &mut Formatter<'_>,
    ) -> fmt::Result {
        match self {
            FcType::Named(name) => f.write_str(name),
            FcType::Fn(ty) => Display::fmt(ty, f),
            FcType::Property(ty) => Display::fmt(ty, f),
            FcType::Undefined(kind) => Display::fmt(kind, f),
        }
    }
}

impl Display for UndefinedKind {
    fn fmt(
        &self,
        f: &mut Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(match self {
            UndefinedKind::Fn => "?fn",
            UndefinedKind::Var => "?var",
            UndefinedKind::Property => "?property",
        })
    }
}

impl Display for FnType {
    fn fmt(
        &self,
        f: &mut Formatter<'_>,
    ) -> fmt::Result {
        f.write_str("fn")?;
        write_generics(f, &self.generics)?;
        write_params(f, &self.params, &self.guards)?;
        write!(f, " {}", self.ret)
    }
}

impl Display for PropertyType {
    fn fmt(
        &self,
        f: &mut Formatter<'_>,
    ) -> fmt::Result {
        f.write_str("property")?;
        write_generics(f, &self.generics)?;
        write_params(f, &self.params, &self.guards)
    }
}

impl Display for VarDecl {
    fn fmt(
        &self,
        f: &mut Formatter<'_>,
    ) -> fmt::Result {
        f.write_str("var ")?;
        write_joined(f, &self.vars, ", ")
    }
}

impl Display for FnDecl {
    fn fmt(
        &self,
        f: &mut Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "fn {}", self.name)?;
        write_generics(f, &self.ty.generics)?;
        write_params(f, &self.ty.params, &self.ty.guards)?;
        write!(f, " {}", self.ty.ret)
    }
}

impl Display for PropertyDecl {
    fn fmt(
        &self,
        f: &mut Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "property {}", self.name)?;
        write_generics(f, &self.ty.generics)?;
        write_params(f, &self.ty.params, &self.ty.guards)
    }
}

impl Display for Decl {
    fn fmt(
        &self,
        f: &mut Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Decl::Var(decl) => Display::fmt(decl, f),
            Decl::Fn(decl) => Display::fmt(decl, f),
            Decl::Property(decl) => Display::fmt(decl, f),
        }
    }
}

impl Display for RelationalFact {
    fn fmt(
        &self,
        f: &mut Formatter<'_>,
    ) -> fmt::Result {
        if !self.is_true {
            f.write_str("not ")?;
        }
        let sep = format!(" {} ", self.operator.as_str());
        write_joined(f, &self.operands, &sep)
    }
}

impl Display for PropertyFact {
    fn fmt(
        &self,
        f: &mut Formatter<'_>,
    ) -> fmt::Result {
        if !self.is_true {
            f.write_str("not ")?;
        }
        write!(f, "${}", self.call)
    }
}

fn write_fact(
    f: &mut Formatter<'_>,
    fact: &Fact,
    depth: usize,
) -> fmt::Result {
    match fact {
        Fact::Relational(fact) => Display::fmt(fact, f),
        Fact::Property(fact) => Display::fmt(fact, f),
        Fact::Forall(forall) => write_forall(f, forall, depth),
    }
}

/// One fact per line at `depth`
fn write_facts(
    f: &mut Formatter<'_>,
    facts: &[Fact],
    depth: usize,
) -> fmt::Result {
    for fact in facts {
        newline(f, depth)?;
        write_fact(f, fact, depth)?;
    }
    Ok(())
}

/// `label:` at `depth` followed by its facts
fn write_fact_section(
    f: &mut Formatter<'_>,
    label: &str,
    facts: &[Fact],
    depth: usize,
) -> fmt::Result {
    newline(f, depth)?;
    write!(f, "{}:", label)?;
    write_facts(f, facts, depth + 1)
}

/// `:` plus an if/then or flat body, or nothing when both are empty
fn write_if_then(
    f: &mut Formatter<'_>,
    if_facts: &[Fact],
    then_facts: &[Fact],
    depth: usize,
) -> fmt::Result {
    if if_facts.is_empty() && then_facts.is_empty() {
        return Ok(());
    }
    f.write_char(':')?;
    if if_facts.is_empty() {
        return write_facts(f, then_facts, depth + 1);
    }
    write_fact_section(f, "if", if_facts, depth + 1)?;
    write_fact_section(f, "then", then_facts, depth + 1)
}

fn write_forall(
    f: &mut Formatter<'_>,
    forall: &ForallFact,
    depth: usize,
) -> fmt::Result {
    f.write_str("forall ")?;
    if !forall.generics.is_empty() {
        write_generics(f, &forall.generics)?;
        f.write_char(' ')?;
    }
    write_joined(f, &forall.params, ", ")?;
    write_if_then(f, &forall.if_facts, &forall.then_facts, depth)
}

impl Display for ForallFact {
    fn fmt(
        &self,
        f: &mut Formatter<'_>,
    ) -> fmt::Result {
        write_forall(f, self, 0)
    }
}

impl Display for Fact {
    fn fmt(
        &self,
        f: &mut Formatter<'_>,
    ) -> fmt::Result {
        write_fact(f, self, 0)
    }
}

fn write_optional_facts(
    f: &mut Formatter<'_>,
    facts: &[Fact],
    depth: usize,
) -> fmt::Result {
    if facts.is_empty() {
        return Ok(());
    }
    f.write_char(':')?;
    write_facts(f, facts, depth + 1)
}

fn write_decl_section<'d>(
    f: &mut Formatter<'_>,
    label: &str,
    decls: impl Iterator<Item = &'d dyn Display>,
    depth: usize,
) -> fmt::Result {
    newline(f, depth)?;
    write!(f, "{}:", label)?;
    for decl in decls {
        newline(f, depth + 1)?;
        write!(f, "{}", decl)?;
    }
    Ok(())
}

fn member_decls(members: &Members) -> impl Iterator<Item = &dyn Display> {
    let vars = members.vars.iter().map(|d| d as &dyn Display);
    let fns = members.fns.iter().map(|d| d as &dyn Display);
    let properties = members.properties.iter().map(|d| d as &dyn Display);
    vars.chain(fns).chain(properties)
}

fn write_concept_body(
    f: &mut Formatter<'_>,
    body: &ConceptBody,
    depth: usize,
) -> fmt::Result {
    if body == &ConceptBody::default() {
        return Ok(());
    }
    f.write_char(':')?;
    if !body.inherit.is_empty() {
        newline(f, depth + 1)?;
        f.write_str("inherit:")?;
        newline(f, depth + 2)?;
        f.write_str(&body.inherit.join(", "))?;
    }
    if !body.type_members.is_empty() {
        write_decl_section(f, "type_member", member_decls(&body.type_members), depth + 1)?;
    }
    if !body.members.is_empty() {
        write_decl_section(f, "member", member_decls(&body.members), depth + 1)?;
    }
    if !body.then_facts.is_empty() {
        write_fact_section(f, "then", &body.then_facts, depth + 1)?;
    }
    Ok(())
}

fn write_stmts(
    f: &mut Formatter<'_>,
    stmts: &[Stmt],
    depth: usize,
) -> fmt::Result {
    for stmt in stmts {
        newline(f, depth)?;
        write_stmt(f, stmt, depth)?;
    }
    Ok(())
}

fn write_stmt(
    f: &mut Formatter<'_>,
    stmt: &Stmt,
    depth: usize,
) -> fmt::Result {
    match stmt {
        Stmt::DefVar(s) => {
            write!(f, "{}", s.decl)?;
            write_optional_facts(f, &s.facts, depth)
        }
        Stmt::DefConcept(s) => {
            write!(f, "concept {} {}", s.type_var, s.name)?;
            write_concept_body(f, &s.body, depth)
        }
        Stmt::DefType(s) => {
            write!(f, "type {}", s.name)?;
            write_concept_body(f, &s.body, depth)
        }
        Stmt::DefProperty(s) => {
            write!(f, "{}", s.decl)?;
            write_if_then(f, &s.if_facts, &s.then_facts, depth)
        }
        Stmt::DefFn(s) => {
            write!(f, "{}", s.decl)?;
            write_if_then(f, &s.if_facts, &s.then_facts, depth)
        }
        Stmt::Forall(forall) => write_forall(f, forall, depth),
        Stmt::Claim(s) if s.to_check.is_empty() => {
            f.write_str("proof:")?;
            write_stmts(f, &s.proof, depth + 1)
        }
        Stmt::Claim(s) => {
            f.write_str("claim:")?;
            write_facts(f, &s.to_check, depth + 1)?;
            newline(f, depth + 1)?;
            f.write_str("proof:")?;
            write_stmts(f, &s.proof, depth + 2)
        }
        Stmt::Know(s) => match s.facts.as_slice() {
            [fact] => {
                f.write_str("know ")?;
                write_fact(f, fact, depth)
            }
            facts => {
                f.write_str("know:")?;
                write_facts(f, facts, depth + 1)
            }
        },
        Stmt::DefUse(s) => write!(f, "use {} {}", s.name, s.value),
        Stmt::DefExist(s) => {
            write!(f, "exist {}", s.decl.name)?;
            write_generics(f, &s.decl.ty.generics)?;
            write_params(f, &s.decl.ty.params, &s.decl.ty.guards)?;
            if s.if_facts.is_empty() && s.members.is_empty() && s.then_facts.is_empty() {
                return Ok(());
            }
            f.write_char(':')?;
            if !s.if_facts.is_empty() {
                write_fact_section(f, "if", &s.if_facts, depth + 1)?;
            }
            if !s.members.is_empty() {
                let decls = s.members.iter().map(|d| d as &dyn Display);
                write_decl_section(f, "member", decls, depth + 1)?;
            }
            if !s.then_facts.is_empty() {
                write_fact_section(f, "then", &s.then_facts, depth + 1)?;
            }
            Ok(())
        }
        Stmt::Have(s) => {
            write!(f, "have {}:", s.fact)?;
            newline(f, depth + 1)?;
            f.write_str(&s.members.join(", "))
        }
        Stmt::DefMember(s) => {
            write!(f, "member [{}] ({}) {}", s.type_concept, s.instance, s.decl)?;
            write_optional_facts(f, &s.facts, depth)
        }
        Stmt::DefTypeMember(s) => {
            write!(f, "type_member [{}] {}", s.type_concept, s.decl)?;
            write_optional_facts(f, &s.facts, depth)
        }
        Stmt::Fact(fact) => write_fact(f, fact, depth),
    }
}

impl Display for Stmt {
    fn fmt(
        &self,
        f: &mut Formatter<'_>,
    ) -> fmt::Result {
        write_stmt(f, self, 0)
    }
}

impl Display for TopStmt {
    fn fmt(
        &self,
        f: &mut Formatter<'_>,
    ) -> fmt::Result {
        if self.is_pub {
            f.write_str("pub ")?;
        }
        Display::fmt(&self.stmt, f)
    }
}
