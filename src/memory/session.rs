//! Session: the owner of one fact memory
//!
//! Statements are recorded in document order. `know` facts become ground or
//! universal entries. var, property, fn, exist and use statements register
//! their names; property, fn and exist definitions also contribute one
//! conditional entry per consequence, guarded by the header guards followed
//! by the `if` facts.

use super::{FactId, FactMemory, StoreKind};
use crate::frontend::parser::ast::{Fact, Stmt, TopStmt};
use serde::Serialize;
use tracing::trace;

/// Where a recorded fact ended up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Recorded {
    pub store: StoreKind,
    pub id: FactId,
}

impl Recorded {
    #[inline]
    pub fn new(
        store: StoreKind,
        id: FactId,
    ) -> Self {
        Self { store, id }
    }
}

/// Verification session state
#[derive(Debug, Default, Clone)]
pub struct Session {
    memory: FactMemory,
    statements: usize,
}

impl Session {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn memory(&self) -> &FactMemory {
        &self.memory
    }

    #[inline]
    pub fn into_memory(self) -> FactMemory {
        self.memory
    }

    /// Statements seen so far
    #[inline]
    pub fn statements(&self) -> usize {
        self.statements
    }

    /// Record one statement, returning the entries it produced
    pub fn record(
        &mut self,
        stmt: &Stmt,
    ) -> Vec<Recorded> {
        self.statements += 1;
        let recorded = match stmt {
            Stmt::Know(know) => know
                .facts
                .iter()
                .map(|fact| self.memory.insert_fact(fact.clone()))
                .collect(),
            Stmt::DefVar(def) => def
                .decl
                .vars
                .iter()
                .map(|var| self.memory.declare_var(var.clone()))
                .collect(),
            Stmt::DefProperty(def) => {
                let mut recorded = vec![self.memory.declare_property(def.decl.clone())];
                recorded.extend(self.record_conditional(
                    &def.decl.ty.guards,
                    &def.if_facts,
                    &def.then_facts,
                ));
                recorded
            }
            Stmt::DefFn(def) => {
                let mut recorded = vec![self.memory.declare_fn(def.decl.clone())];
                recorded.extend(self.record_conditional(
                    &def.decl.ty.guards,
                    &def.if_facts,
                    &def.then_facts,
                ));
                recorded
            }
            Stmt::DefExist(def) => {
                let mut recorded = vec![self.memory.declare_property(def.decl.clone())];
                recorded.extend(self.record_conditional(
                    &def.decl.ty.guards,
                    &def.if_facts,
                    &def.then_facts,
                ));
                recorded
            }
            Stmt::DefUse(def) => vec![self.memory.declare_alias(&def.name, def.value.clone())],
            _ => Vec::new(),
        };
        trace!("{} statement recorded {} entries", stmt.kind_name(), recorded.len());
        recorded
    }

    /// Record statements in order
    pub fn record_all(
        &mut self,
        stmts: &[TopStmt],
    ) -> Vec<Recorded> {
        stmts.iter().flat_map(|top| self.record(&top.stmt)).collect()
    }

    fn record_conditional(
        &mut self,
        header_guards: &[Fact],
        if_facts: &[Fact],
        consequences: &[Fact],
    ) -> Vec<Recorded> {
        let guards: Vec<Fact> = header_guards.iter().chain(if_facts).cloned().collect();
        consequences
            .iter()
            .map(|fact| self.memory.insert_conditional(guards.clone(), fact.clone()))
            .collect()
    }
}
