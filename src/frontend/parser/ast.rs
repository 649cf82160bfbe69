//! Abstract Syntax Tree types
//!
//! Every family is a closed enum; consumers match exhaustively.

use crate::frontend::lexer::tokens::Symbol;
use crate::util::span::Position;
use serde::Serialize;

/// Formal construct: any value-like term
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum Fc {
    /// Identifier, or an operator symbol when used as a callee
    Atom(String),
    /// Numeric literal text, e.g. `0`, `12.5`
    Number(String),
    /// Dotted member chain `a.b(x).c`; at least two segments
    Chain(Vec<Fc>),
    /// Call with optional type arguments; curried calls nest
    Call(FcCall),
    /// `as(fc, property[..](..))`
    Typed(TypedFc),
}

/// Callee applied to type arguments and value arguments
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct FcCall {
    pub callee: Box<Fc>,
    pub type_args: Vec<TypeArg>,
    pub args: Vec<Fc>,
}

/// Generic argument at a call site
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum TypeArg {
    Name(String),
    /// `as(T, Concept)`
    Typed { name: String, concept: String },
}

/// Type ascription
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct TypedFc {
    pub fc: Box<Fc>,
    pub ty: PropertyType,
}

impl Fc {
    /// Atom from anything string-like
    pub fn atom(name: impl Into<String>) -> Fc {
        Fc::Atom(name.into())
    }

    /// Operator application, the desugared form of `a + b` and `-a`
    pub fn apply(
        operator: Symbol,
        args: Vec<Fc>,
    ) -> Fc {
        Fc::Call(FcCall {
            callee: Box::new(Fc::Atom(operator.as_str().to_string())),
            type_args: Vec::new(),
            args,
        })
    }

    /// Name used to index facts about this construct
    pub fn head_name(&self) -> String {
        match self {
            Fc::Atom(name) | Fc::Number(name) => name.clone(),
            Fc::Chain(parts) => parts
                .iter()
                .map(Fc::head_name)
                .collect::<Vec<_>>()
                .join("."),
            Fc::Call(call) => call.head_name(),
            Fc::Typed(typed) => typed.fc.head_name(),
        }
    }
}

impl FcCall {
    /// Name of the innermost callee (`f` for `f[T](a)(b)`)
    pub fn head_name(&self) -> String {
        self.callee.head_name()
    }
}

/// Generic parameter bound to a concept: `T Group`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct GenericParam {
    pub name: String,
    pub concept: String,
}

/// Value parameter: `x Nat`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Param {
    pub name: String,
    pub ty: FcType,
}

/// Type of a declared name
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum FcType {
    Named(String),
    Fn(FnType),
    Property(PropertyType),
    /// `?fn`, `?var`, `?property`
    Undefined(UndefinedKind),
}

/// Placeholder kinds for unconstrained declarations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum UndefinedKind {
    Fn,
    Var,
    Property,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct FnType {
    pub generics: Vec<GenericParam>,
    pub params: Vec<Param>,
    /// Facts after `::` in the parameter lists
    pub guards: Vec<Fact>,
    pub ret: Box<FcType>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct PropertyType {
    pub generics: Vec<GenericParam>,
    pub params: Vec<Param>,
    /// Facts after `::` in the parameter lists
    pub guards: Vec<Fact>,
}

/// `var x A, y B`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VarDecl {
    pub vars: Vec<Param>,
}

/// `fn f[T C](x A) R`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FnDecl {
    pub name: String,
    pub ty: FnType,
}

/// `property p[T C](x A)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PropertyDecl {
    pub name: String,
    pub ty: PropertyType,
}

/// Any of the three declaration forms
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Decl {
    Var(VarDecl),
    Fn(FnDecl),
    Property(PropertyDecl),
}

/// Established or asserted fact
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum Fact {
    Relational(RelationalFact),
    Property(PropertyFact),
    Forall(ForallFact),
}

/// `a = b = c`: one operator over two or more operands
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct RelationalFact {
    pub is_true: bool,
    pub operator: Symbol,
    pub operands: Vec<Fc>,
}

/// `$p(x)` or `x is p`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct PropertyFact {
    pub is_true: bool,
    pub call: FcCall,
}

/// Universally quantified rule
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ForallFact {
    pub generics: Vec<GenericParam>,
    pub params: Vec<Param>,
    pub if_facts: Vec<Fact>,
    pub then_facts: Vec<Fact>,
}

impl Fact {
    /// Memory keys this fact is indexed under
    ///
    /// Specific facts have one key; a forall contributes the keys of its
    /// consequences, deduplicated in first-seen order.
    pub fn keys(&self) -> Vec<String> {
        let mut keys = Vec::new();
        self.collect_keys(&mut keys);
        keys
    }

    fn collect_keys(
        &self,
        keys: &mut Vec<String>,
    ) {
        match self {
            Fact::Relational(fact) => push_key(keys, fact.operator.as_str().to_string()),
            Fact::Property(fact) => push_key(keys, fact.call.head_name()),
            Fact::Forall(forall) => {
                for fact in &forall.then_facts {
                    fact.collect_keys(keys);
                }
            }
        }
    }

    /// Whether this is a relational or property fact
    #[inline]
    pub fn is_specific(&self) -> bool {
        !matches!(self, Fact::Forall(_))
    }
}

fn push_key(
    keys: &mut Vec<String>,
    key: String,
) {
    if !keys.contains(&key) {
        keys.push(key);
    }
}

/// concept/type body, grouped by kind
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ConceptBody {
    pub inherit: Vec<String>,
    /// Type-level members (`type_member:` block)
    pub type_members: Members,
    /// Instance members (`member:` block)
    pub members: Members,
    pub then_facts: Vec<Fact>,
}

/// Declarations sorted by kind
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Members {
    pub vars: Vec<VarDecl>,
    pub fns: Vec<FnDecl>,
    pub properties: Vec<PropertyDecl>,
}

impl Members {
    pub fn push(
        &mut self,
        decl: Decl,
    ) {
        match decl {
            Decl::Var(d) => self.vars.push(d),
            Decl::Fn(d) => self.fns.push(d),
            Decl::Property(d) => self.properties.push(d),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty() && self.fns.is_empty() && self.properties.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DefVarStmt {
    pub decl: VarDecl,
    pub facts: Vec<Fact>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DefConceptStmt {
    pub type_var: String,
    pub name: String,
    pub body: ConceptBody,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DefTypeStmt {
    pub name: String,
    pub body: ConceptBody,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DefPropertyStmt {
    pub decl: PropertyDecl,
    pub if_facts: Vec<Fact>,
    pub then_facts: Vec<Fact>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DefFnStmt {
    pub decl: FnDecl,
    pub if_facts: Vec<Fact>,
    pub then_facts: Vec<Fact>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClaimStmt {
    pub to_check: Vec<Fact>,
    pub proof: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DefUseStmt {
    pub name: String,
    pub value: Fc,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KnowStmt {
    pub facts: Vec<Fact>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DefExistStmt {
    pub decl: PropertyDecl,
    pub if_facts: Vec<Fact>,
    pub members: Vec<Decl>,
    pub then_facts: Vec<Fact>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HaveStmt {
    pub fact: PropertyFact,
    pub members: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DefMemberStmt {
    pub type_concept: GenericParam,
    pub instance: Param,
    pub decl: Decl,
    pub facts: Vec<Fact>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DefTypeMemberStmt {
    pub type_concept: GenericParam,
    pub decl: Decl,
    pub facts: Vec<Fact>,
}

/// Statement
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Stmt {
    DefVar(DefVarStmt),
    DefConcept(DefConceptStmt),
    DefType(DefTypeStmt),
    DefProperty(DefPropertyStmt),
    DefFn(DefFnStmt),
    Forall(ForallFact),
    Claim(ClaimStmt),
    Know(KnowStmt),
    DefUse(DefUseStmt),
    DefExist(DefExistStmt),
    Have(HaveStmt),
    DefMember(DefMemberStmt),
    DefTypeMember(DefTypeMemberStmt),
    /// Relational or property fact; forall facts become [`Stmt::Forall`]
    Fact(Fact),
}

impl From<Fact> for Stmt {
    fn from(fact: Fact) -> Self {
        match fact {
            Fact::Forall(forall) => Stmt::Forall(forall),
            other => Stmt::Fact(other),
        }
    }
}

impl Stmt {
    /// Short variant name, for logs and summaries
    pub fn kind_name(&self) -> &'static str {
        match self {
            Stmt::DefVar(_) => "var",
            Stmt::DefConcept(_) => "concept",
            Stmt::DefType(_) => "type",
            Stmt::DefProperty(_) => "property",
            Stmt::DefFn(_) => "fn",
            Stmt::Forall(_) => "forall",
            Stmt::Claim(_) => "claim",
            Stmt::Know(_) => "know",
            Stmt::DefUse(_) => "use",
            Stmt::DefExist(_) => "exist",
            Stmt::Have(_) => "have",
            Stmt::DefMember(_) => "member",
            Stmt::DefTypeMember(_) => "type_member",
            Stmt::Fact(_) => "fact",
        }
    }
}

/// Top-level statement with its visibility
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopStmt {
    pub stmt: Stmt,
    pub is_pub: bool,
    /// Position of the statement header
    pub position: Position,
}
