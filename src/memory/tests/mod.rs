//! Fact memory tests

use super::*;
use crate::frontend::lexer::tokens::Symbol;
use crate::frontend::parser::ast::*;
use crate::frontend::parse_source;
use proptest::prelude::*;

fn session_for(source: &str) -> Session {
    let mut session = Session::new();
    let stmts = parse_source(source).unwrap();
    session.record_all(&stmts);
    session
}

fn relational(
    operator: Symbol,
    names: &[&str],
) -> Fact {
    Fact::Relational(RelationalFact {
        is_true: true,
        operator,
        operands: names.iter().map(|n| Fc::atom(*n)).collect(),
    })
}

mod store_tests {
    use super::*;

    #[test]
    fn test_handles_are_sequential() {
        let mut store = Store::new();
        let a = store.insert(["p"], "first");
        let b = store.insert(["q"], "second");
        let c = store.insert(["p"], "third");
        assert_eq!((a, b, c), (FactId(0), FactId(1), FactId(2)));
        assert_eq!(store.get(b), Some(&"second"));
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_lookup_keeps_insertion_order() {
        let mut store = Store::new();
        store.insert(["p"], 1);
        store.insert(["q"], 2);
        store.insert(["p"], 3);
        assert_eq!(store.lookup("p").copied().collect::<Vec<_>>(), vec![1, 3]);
        assert_eq!(store.handles("q"), &[FactId(1)]);
        assert_eq!(store.keys().collect::<Vec<_>>(), vec!["p", "q"]);
    }

    #[test]
    fn test_missing_key() {
        let store: Store<u8> = Store::new();
        assert!(store.handles("p").is_empty());
        assert_eq!(store.lookup("p").count(), 0);
        assert!(store.get(FactId(0)).is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_duplicate_keys_index_once() {
        let mut store = Store::new();
        let id = store.insert(["p", "q", "p"], ());
        assert_eq!(store.handles("p"), &[id]);
        assert_eq!(store.handles("q"), &[id]);
        assert_eq!(store.len(), 1);
    }
}

mod memory_tests {
    use super::*;

    #[test]
    fn test_specific_fact_is_ground() {
        let mut memory = FactMemory::new();
        let fact = relational(Symbol::Eq, &["a", "b"]);
        assert!(fact.is_specific());
        let recorded = memory.insert_fact(fact);
        assert_eq!(recorded, Recorded::new(StoreKind::Ground, FactId(0)));
        assert_eq!(memory.ground().count("="), 1);
        assert!(memory.universal().is_empty());
    }

    #[test]
    fn test_forall_is_universal() {
        let stmts = parse_source("forall [T C] x T:\n    if:\n        $p(x)\n    then:\n        $q(x)\n        x > 0\n").unwrap();
        let Stmt::Forall(forall) = stmts[0].stmt.clone() else {
            panic!("expected forall");
        };

        let fact = Fact::Forall(forall);
        assert!(!fact.is_specific());

        let mut memory = FactMemory::new();
        let recorded = memory.insert_fact(fact);
        assert_eq!(recorded.store, StoreKind::Universal);

        let entry = memory.universal().get(recorded.id).unwrap();
        assert_eq!(entry.generics.len(), 1);
        assert_eq!(entry.params.len(), 1);
        assert_eq!(entry.guards.len(), 1);
        assert_eq!(entry.consequences.len(), 2);
        assert_eq!(memory.universal().handles("q"), &[recorded.id]);
        assert_eq!(memory.universal().handles(">"), &[recorded.id]);
        assert!(memory.universal().handles("p").is_empty());
    }

    #[test]
    fn test_conditional_entry() {
        let mut memory = FactMemory::new();
        let guard = relational(Symbol::Gt, &["x", "y"]);
        let consequence = relational(Symbol::NotEq, &["x", "y"]);
        let recorded = memory.insert_conditional(vec![guard.clone()], consequence.clone());
        assert_eq!(recorded.store, StoreKind::Conditional);
        let entry = memory.conditional().lookup("!=").next().unwrap();
        assert_eq!(entry.guards, vec![guard]);
        assert_eq!(entry.consequence, consequence);
    }

    #[test]
    fn test_stats() {
        let mut memory = FactMemory::new();
        assert!(memory.is_empty());
        memory.insert_fact(relational(Symbol::Eq, &["a", "b"]));
        memory.insert_conditional(vec![], relational(Symbol::Lt, &["a", "b"]));
        assert_eq!(
            memory.stats(),
            MemoryStats {
                ground: 1,
                conditional: 1,
                ..MemoryStats::default()
            }
        );
    }
}

mod session_tests {
    use super::*;

    #[test]
    fn test_know_records_ground_fact() {
        let session = session_for("know a = b");
        let ground = session.memory().ground();
        assert_eq!(ground.count("="), 1);
        assert_eq!(
            ground.lookup("=").next(),
            Some(&relational(Symbol::Eq, &["a", "b"]))
        );
    }

    #[test]
    fn test_know_block_records_each_fact() {
        let session = session_for("know:\n    a = b\n    $p(a)\n    forall x N:\n        $p(x)\n");
        let memory = session.memory();
        assert_eq!(memory.ground().count("="), 1);
        assert_eq!(memory.ground().count("p"), 1);
        assert_eq!(memory.universal().count("p"), 1);
    }

    #[test]
    fn test_definitions_record_conditionals() {
        let source = "\
property p(x N):
    if:
        x > 0
    then:
        $q(x)
        x != 0
fn f(x N) N:
    f(x) > x
exist e(x N):
    then:
        $q(x)
";
        let session = session_for(source);
        let conditional = session.memory().conditional();
        assert_eq!(conditional.len(), 4);
        assert_eq!(conditional.count("q"), 2);
        let first = conditional.lookup("q").next().unwrap();
        assert_eq!(first.guards.len(), 1);
        let from_fn = conditional.lookup(">").next().unwrap();
        assert!(from_fn.guards.is_empty());
    }

    #[test]
    fn test_claims_and_plain_facts_leave_memory_untouched() {
        let session = session_for("claim:\n    a = b\n    proof:\n        know a = b\n$p(a)\nconcept T C:\n    then:\n        $p(T)\n");
        assert!(session.memory().is_empty());
        assert_eq!(session.statements(), 3);
    }

    #[test]
    fn test_declarations_register_names() {
        let source = "\
var x N, y N:
    x > y
property p(x N)
fn f(x N) N
exist e(x N)
use g f
property p(x R)
";
        let session = session_for(source);
        let memory = session.memory();
        assert_eq!(memory.vars().count("x"), 1);
        assert_eq!(memory.vars().count("y"), 1);
        assert_eq!(memory.properties().count("p"), 2);
        assert_eq!(memory.properties().count("e"), 1);
        assert_eq!(memory.fns().lookup("f").next().map(|d| d.name.as_str()), Some("f"));
        assert_eq!(memory.aliases().lookup("g").next(), Some(&Fc::atom("f")));
        assert_eq!(
            memory.stats(),
            MemoryStats {
                vars: 2,
                properties: 3,
                fns: 1,
                aliases: 1,
                ..MemoryStats::default()
            }
        );

        let redeclared: Vec<_> = memory
            .properties()
            .lookup("p")
            .map(|d| d.ty.params[0].ty.clone())
            .collect();
        assert_eq!(
            redeclared,
            vec![FcType::Named("N".to_string()), FcType::Named("R".to_string())]
        );
    }

    #[test]
    fn test_declarations_report_locations() {
        let mut session = Session::new();
        let stmts = parse_source("property p(x N):\n    $q(x)\nuse a b\n").unwrap();
        assert_eq!(
            session.record(&stmts[0].stmt),
            vec![
                Recorded::new(StoreKind::Property, FactId(0)),
                Recorded::new(StoreKind::Conditional, FactId(0)),
            ]
        );
        assert_eq!(
            session.record(&stmts[1].stmt),
            vec![Recorded::new(StoreKind::Alias, FactId(0))]
        );
    }

    #[test]
    fn test_header_guards_precede_if_facts() {
        let source = "\
property p[T C :: $c(T)](x T :: x > 0):
    if:
        $r(x)
    then:
        $q(x)
";
        let session = session_for(source);
        let entry = session.memory().conditional().lookup("q").next().unwrap();
        let heads: Vec<_> = entry
            .guards
            .iter()
            .flat_map(|g| g.keys())
            .collect();
        assert_eq!(heads, vec!["c", ">", "r"]);
    }

    #[test]
    fn test_record_reports_locations() {
        let mut session = Session::new();
        let stmts = parse_source("know a = b\nknow:\n    b = c\n    $p(c)\n").unwrap();
        assert_eq!(
            session.record(&stmts[0].stmt),
            vec![Recorded::new(StoreKind::Ground, FactId(0))]
        );
        assert_eq!(
            session.record(&stmts[1].stmt),
            vec![
                Recorded::new(StoreKind::Ground, FactId(1)),
                Recorded::new(StoreKind::Ground, FactId(2)),
            ]
        );

        let memory = session.into_memory();
        assert_eq!(memory.ground().len(), 3);
        assert_eq!(memory.ground().handles("="), &[FactId(0), FactId(1)]);
    }
}

proptest! {
    /// After N insertions under a key the store holds exactly N entries, in
    /// order, and earlier entries are never altered
    #[test]
    fn test_insertions_append_in_order(names in prop::collection::vec("[a-z]{1,4}", 1..20)) {
        let mut memory = FactMemory::new();
        let mut snapshots: Vec<Fact> = Vec::new();
        for name in &names {
            let fact = relational(Symbol::Eq, &[name.as_str(), "c"]);
            memory.insert_fact(fact.clone());
            snapshots.push(fact);
            let stored: Vec<_> = memory.ground().lookup("=").cloned().collect();
            prop_assert_eq!(&stored, &snapshots);
        }
        prop_assert_eq!(memory.ground().count("="), names.len());
    }
}
