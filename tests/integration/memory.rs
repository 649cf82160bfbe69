//! Fact memory populated from source

use litex::frontend::lexer::tokens::Symbol;
use litex::frontend::parser::ast::*;
use litex::memory::{MemoryStats, StoreKind};
use litex::{check_source, parse_source, Session};

#[test]
fn test_know_lands_in_ground_store() {
    let session = check_source("know a = b").unwrap();
    let ground = session.memory().ground();
    assert_eq!(ground.count("="), 1);
    let Some(Fact::Relational(fact)) = ground.lookup("=").next() else {
        panic!("expected a relational fact under '='");
    };
    assert_eq!(fact.operator, Symbol::Eq);
    assert_eq!(fact.operands, vec![Fc::atom("a"), Fc::atom("b")]);
    assert!(fact.is_true);
}

#[test]
fn test_insertions_accumulate_in_order() {
    let source = "know $p(a)\nknow $p(b)\nknow a = b\nknow $p(c)\n";
    let session = check_source(source).unwrap();
    let ground = session.memory().ground();
    let args: Vec<_> = ground
        .lookup("p")
        .map(|fact| match fact {
            Fact::Property(p) => p.call.args[0].clone(),
            other => panic!("unexpected fact {:?}", other),
        })
        .collect();
    assert_eq!(args, vec![Fc::atom("a"), Fc::atom("b"), Fc::atom("c")]);
    assert_eq!(ground.count("="), 1);
}

#[test]
fn test_earlier_entries_are_never_altered() {
    let mut session = Session::new();
    let first = parse_source("know $p(a)").unwrap();
    let recorded = session.record_all(&first);
    assert_eq!(recorded[0].store, StoreKind::Ground);
    let snapshot = session.memory().ground().get(recorded[0].id).cloned();

    let rest = parse_source("know $p(b)\nknow forall x N:\n    $p(x)\n").unwrap();
    session.record_all(&rest);

    assert_eq!(session.memory().ground().get(recorded[0].id).cloned(), snapshot);
    assert_eq!(session.memory().ground().count("p"), 2);
    assert_eq!(session.memory().universal().count("p"), 1);
}

#[test]
fn test_store_routing() {
    let source = "\
know:
    a = b
    forall x N:
        $p(x)
property q(x N):
    if:
        x > 0
    then:
        $p(x)
claim:
    a = b
    proof:
        know b = a
";
    let session = check_source(source).unwrap();
    assert_eq!(
        session.memory().stats(),
        MemoryStats {
            ground: 1,
            conditional: 1,
            universal: 1,
            properties: 1,
            ..MemoryStats::default()
        }
    );
    assert_eq!(session.statements(), 3);
}

#[test]
fn test_failed_parse_records_nothing() {
    let mut session = Session::new();
    let frontend = litex::Frontend::new();
    assert!(frontend.check("know a = b\nknow a =\n", &mut session).is_err());
    assert!(session.memory().is_empty());
    assert_eq!(session.statements(), 0);

    let recorded = frontend.check("know a = b", &mut session).unwrap();
    assert_eq!(recorded.len(), 1);
    assert_eq!(session.memory().ground().len(), 1);
}
