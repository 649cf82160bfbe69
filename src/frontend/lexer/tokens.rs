//! Token types

use crate::util::span::Span;
use once_cell::sync::Lazy;
use serde::Serialize;
use std::cmp::Reverse;
use std::fmt;

/// Reserved word
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Keyword {
    Concept,
    Inherit,
    TypeMember,
    VarMember,
    Property,
    If,
    Then,
    Forall,
    Exist,
    Have,
    Var,
    Type,
    Fn,
    Local,
    Pub,
    Know,
    Claim,
    Proof,
    Import,
    Package,
    Return,
    Not,
    Is,
    Use,
    Member,
    As,
}

impl Keyword {
    /// Every reserved word
    pub const ALL: &'static [Keyword] = &[
        Keyword::Concept,
        Keyword::Inherit,
        Keyword::TypeMember,
        Keyword::VarMember,
        Keyword::Property,
        Keyword::If,
        Keyword::Then,
        Keyword::Forall,
        Keyword::Exist,
        Keyword::Have,
        Keyword::Var,
        Keyword::Type,
        Keyword::Fn,
        Keyword::Local,
        Keyword::Pub,
        Keyword::Know,
        Keyword::Claim,
        Keyword::Proof,
        Keyword::Import,
        Keyword::Package,
        Keyword::Return,
        Keyword::Not,
        Keyword::Is,
        Keyword::Use,
        Keyword::Member,
        Keyword::As,
    ];

    /// Source spelling
    pub fn as_str(&self) -> &'static str {
        match self {
            Keyword::Concept => "concept",
            Keyword::Inherit => "inherit",
            Keyword::TypeMember => "type_member",
            Keyword::VarMember => "var_member",
            Keyword::Property => "property",
            Keyword::If => "if",
            Keyword::Then => "then",
            Keyword::Forall => "forall",
            Keyword::Exist => "exist",
            Keyword::Have => "have",
            Keyword::Var => "var",
            Keyword::Type => "type",
            Keyword::Fn => "fn",
            Keyword::Local => "local",
            Keyword::Pub => "pub",
            Keyword::Know => "know",
            Keyword::Claim => "claim",
            Keyword::Proof => "proof",
            Keyword::Import => "import",
            Keyword::Package => "package",
            Keyword::Return => "return",
            Keyword::Not => "not",
            Keyword::Is => "is",
            Keyword::Use => "use",
            Keyword::Member => "member",
            Keyword::As => "as",
        }
    }

    /// Look up a word in the reserved table
    pub fn from_word(word: &str) -> Option<Keyword> {
        Keyword::ALL.iter().copied().find(|k| k.as_str() == word)
    }
}

/// Builtin symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Symbol {
    Colon,
    LBracket,
    RBracket,
    LParen,
    RParen,
    Comma,
    Dollar,
    Eq,
    Slash,
    Plus,
    Minus,
    Star,
    Caret,
    Lt,
    Gt,
    Bang,
    Pipe,
    Tilde,
    Amp,
    Dot,
    Question,
    ColonColon,
    PlusPlus,
    MinusMinus,
    AndAnd,
    OrOr,
    EqEq,
    NotEq,
}

impl Symbol {
    /// Every builtin symbol
    pub const ALL: &'static [Symbol] = &[
        Symbol::Colon,
        Symbol::LBracket,
        Symbol::RBracket,
        Symbol::LParen,
        Symbol::RParen,
        Symbol::Comma,
        Symbol::Dollar,
        Symbol::Eq,
        Symbol::Slash,
        Symbol::Plus,
        Symbol::Minus,
        Symbol::Star,
        Symbol::Caret,
        Symbol::Lt,
        Symbol::Gt,
        Symbol::Bang,
        Symbol::Pipe,
        Symbol::Tilde,
        Symbol::Amp,
        Symbol::Dot,
        Symbol::Question,
        Symbol::ColonColon,
        Symbol::PlusPlus,
        Symbol::MinusMinus,
        Symbol::AndAnd,
        Symbol::OrOr,
        Symbol::EqEq,
        Symbol::NotEq,
    ];

    /// Source spelling
    pub fn as_str(&self) -> &'static str {
        match self {
            Symbol::Colon => ":",
            Symbol::LBracket => "[",
            Symbol::RBracket => "]",
            Symbol::LParen => "(",
            Symbol::RParen => ")",
            Symbol::Comma => ",",
            Symbol::Dollar => "$",
            Symbol::Eq => "=",
            Symbol::Slash => "/",
            Symbol::Plus => "+",
            Symbol::Minus => "-",
            Symbol::Star => "*",
            Symbol::Caret => "^",
            Symbol::Lt => "<",
            Symbol::Gt => ">",
            Symbol::Bang => "!",
            Symbol::Pipe => "|",
            Symbol::Tilde => "~",
            Symbol::Amp => "&",
            Symbol::Dot => ".",
            Symbol::Question => "?",
            Symbol::ColonColon => "::",
            Symbol::PlusPlus => "++",
            Symbol::MinusMinus => "--",
            Symbol::AndAnd => "&&",
            Symbol::OrOr => "||",
            Symbol::EqEq => "==",
            Symbol::NotEq => "!=",
        }
    }

    /// Operators accepted between the operands of a relational fact
    pub fn is_relational(&self) -> bool {
        matches!(
            self,
            Symbol::Eq | Symbol::EqEq | Symbol::NotEq | Symbol::Lt | Symbol::Gt
        )
    }
}

/// Symbols sorted longest first, so `::` wins over `:`
pub static SYMBOLS_LONGEST_FIRST: Lazy<Vec<Symbol>> = Lazy::new(|| {
    let mut symbols = Symbol::ALL.to_vec();
    symbols.sort_by_key(|s| Reverse(s.as_str().len()));
    symbols
});

/// Token kind
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum TokenKind {
    Keyword(Keyword),
    Symbol(Symbol),
    Identifier(String),
    /// Run of ASCII digits, kept as text
    Number(String),
}

impl TokenKind {
    /// Source spelling
    pub fn text(&self) -> &str {
        match self {
            TokenKind::Keyword(k) => k.as_str(),
            TokenKind::Symbol(s) => s.as_str(),
            TokenKind::Identifier(name) => name,
            TokenKind::Number(digits) => digits,
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.text())
    }
}

/// Token
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    #[inline]
    pub fn new(
        kind: TokenKind,
        span: Span,
    ) -> Self {
        Self { kind, span }
    }

    #[inline]
    pub fn text(&self) -> &str {
        self.kind.text()
    }

    #[inline]
    pub fn is_keyword(
        &self,
        keyword: Keyword,
    ) -> bool {
        self.kind == TokenKind::Keyword(keyword)
    }

    #[inline]
    pub fn is_symbol(
        &self,
        symbol: Symbol,
    ) -> bool {
        self.kind == TokenKind::Symbol(symbol)
    }
}

impl fmt::Display for Token {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.text())
    }
}
