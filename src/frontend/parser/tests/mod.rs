//! Parser tests module


use super::*;
use crate::frontend::lexer::tokenize_blocks;
use crate::frontend::lexer::tokens::Symbol;

/// First block of `source`
pub(crate) fn block(source: &str) -> TokenBlock {
    tokenize_blocks(source).unwrap().remove(0)
}

pub(crate) fn fc(source: &str) -> Fc {
    parse_fc(&block(source)).unwrap()
}

pub(crate) fn fc_err(source: &str) -> ParseError {
    parse_fc(&block(source)).unwrap_err()
}

pub(crate) fn stmts(source: &str) -> Vec<Stmt> {
    parse(&tokenize_blocks(source).unwrap())
        .unwrap()
        .into_iter()
        .map(|top| top.stmt)
        .collect()
}

/// The only statement in `source`
pub(crate) fn stmt(source: &str) -> Stmt {
    let mut stmts = stmts(source);
    assert_eq!(stmts.len(), 1, "expected one statement in {:?}", source);
    stmts.remove(0)
}

pub(crate) fn parse_err(source: &str) -> ParseError {
    parse(&tokenize_blocks(source).unwrap()).unwrap_err()
}

pub(crate) fn fact(source: &str) -> Fact {
    match stmt(source) {
        Stmt::Fact(fact) => fact,
        Stmt::Forall(forall) => Fact::Forall(forall),
        other => panic!("expected a fact, got {:?}", other),
    }
}

pub(crate) fn atom(name: &str) -> Fc {
    Fc::atom(name)
}

pub(crate) fn num(text: &str) -> Fc {
    Fc::Number(text.to_string())
}

pub(crate) fn op(
    symbol: Symbol,
    args: Vec<Fc>,
) -> Fc {
    Fc::apply(symbol, args)
}

pub(crate) fn call(
    callee: Fc,
    args: Vec<Fc>,
) -> FcCall {
    FcCall {
        callee: Box::new(callee),
        type_args: Vec::new(),
        args,
    }
}

pub(crate) fn named(name: &str) -> FcType {
    FcType::Named(name.to_string())
}

pub(crate) fn param(
    name: &str,
    ty: FcType,
) -> Param {
    Param {
        name: name.to_string(),
        ty,
    }
}
