//! End-to-end parsing through the public API

use litex::frontend::lexer::{LexError, LexerOptions};
use litex::frontend::lexer::tokens::Symbol;
use litex::frontend::parser::ast::*;
use litex::frontend::parser::{ParseError, ParseErrorKind, StructuralError};
use litex::{parse_source, parse_source_with, FrontendError};

#[test]
fn test_know_relational_fact() {
    let stmts = parse_source("know a = b").unwrap();
    assert_eq!(stmts.len(), 1);
    assert!(!stmts[0].is_pub);
    assert_eq!(
        stmts[0].stmt,
        Stmt::Know(KnowStmt {
            facts: vec![Fact::Relational(RelationalFact {
                is_true: true,
                operator: Symbol::Eq,
                operands: vec![Fc::atom("a"), Fc::atom("b")],
            })],
        })
    );
}

#[test]
fn test_document_in_order() {
    let source = "\
type Nat:
    member:
        var zero Nat
pub fn succ(n Nat) Nat:
    succ(n) > n
know forall n Nat:
    $positive(succ(n))
claim:
    succ(zero) > zero
    proof:
        know succ(zero) > zero
";
    let stmts = parse_source(source).unwrap();
    let kinds: Vec<_> = stmts.iter().map(|s| s.stmt.kind_name()).collect();
    assert_eq!(kinds, vec!["type", "fn", "know", "claim"]);
    assert!(stmts[1].is_pub);
    assert_eq!(stmts[2].position.line, 6);
}

#[test]
fn test_tabs_expand_to_configured_width() {
    let source = "know:\n\ta = b\n\t$p(a)\n";
    let default = parse_source(source).unwrap();
    let narrow = parse_source_with(source, &LexerOptions { tab_width: 2 }).unwrap();
    assert_eq!(default[0].stmt, narrow[0].stmt);
}

#[test]
fn test_lex_error_surfaces() {
    let err = parse_source("know a = b @ c").unwrap_err();
    let FrontendError::Lex(LexError::UnexpectedChar { ch, position }) = err else {
        panic!("expected a lex error, got {:?}", err);
    };
    assert_eq!(ch, '@');
    assert_eq!(position.column, 12);
}

#[test]
fn test_parse_error_keeps_block_context() {
    let err = parse_source("know a = b\nclaim:\n    a = b\n").unwrap_err();
    let FrontendError::Parse(parse) = err else {
        panic!("expected a parse error");
    };
    assert_eq!(parse.kind(), ParseErrorKind::Structural);
    assert_eq!(parse.block_headers(), vec!["claim :"]);
    assert_eq!(
        parse.root_cause(),
        &ParseError::Structural(StructuralError::MissingProof)
    );
}

#[test]
fn test_anyhow_chain_reports_every_level() {
    let err = parse_source("forall x N:\n    if:\n        $p(x\n    then:\n        $q(x)\n").unwrap_err();
    let report = format!("{:#}", anyhow::Error::from(err));
    assert!(report.starts_with("parse error: 1:1: in `forall x N :`"), "{}", report);
    assert!(report.contains("in `if :`"), "{}", report);
    assert!(report.ends_with("expected ')' before end of line"), "{}", report);
}

#[test]
fn test_printed_program_reparses() {
    let source = "\
concept T Group:
    member:
        fn inv(x T) T
property p[T Group](x T):
    if:
        x = x
    then:
        inv(inv(x)) = x
know:
    1 + 2 * 3 = 7
    not $p(0.5)
";
    let first = parse_source(source).unwrap();
    let printed: String = first.iter().map(|s| format!("{}\n", s)).collect();
    let second = parse_source(&printed).unwrap();
    let strip = |stmts: Vec<TopStmt>| stmts.into_iter().map(|s| s.stmt).collect::<Vec<_>>();
    assert_eq!(strip(first), strip(second));
}
