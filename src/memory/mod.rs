//! Fact memory
//!
//! Three append-only fact stores, keyed by predicate name (the operator
//! symbol of a relational fact, the callee of a property fact):
//!
//! - ground: relational and property facts, verbatim
//! - conditional: a consequence together with the guards that enable it
//! - universal: forall rules awaiting instantiation
//!
//! Declared names live in four more stores keyed by the declared name:
//! vars, properties, fns and `use` aliases. A name declared twice keeps
//! both entries in declaration order.
//!
//! Nothing is edited or removed once inserted. Readers keep [`FactId`]
//! handles rather than references.

mod session;
mod store;

pub use session::{Recorded, Session};
pub use store::{FactId, Store};

use crate::frontend::parser::ast::{Fact, Fc, FnDecl, ForallFact, GenericParam, Param, PropertyDecl};
use serde::Serialize;
use std::fmt;
use tracing::debug;

/// Consequence that holds once every guard holds
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConditionalEntry {
    pub guards: Vec<Fact>,
    pub consequence: Fact,
}

/// Universally quantified rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UniversalEntry {
    pub generics: Vec<GenericParam>,
    pub params: Vec<Param>,
    pub guards: Vec<Fact>,
    pub consequences: Vec<Fact>,
}

impl From<ForallFact> for UniversalEntry {
    fn from(forall: ForallFact) -> Self {
        Self {
            generics: forall.generics,
            params: forall.params,
            guards: forall.if_facts,
            consequences: forall.then_facts,
        }
    }
}

/// Which store an entry went to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum StoreKind {
    Ground,
    Conditional,
    Universal,
    Var,
    Property,
    Fn,
    Alias,
}

impl fmt::Display for StoreKind {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(match self {
            StoreKind::Ground => "ground",
            StoreKind::Conditional => "conditional",
            StoreKind::Universal => "universal",
            StoreKind::Var => "var",
            StoreKind::Property => "property",
            StoreKind::Fn => "fn",
            StoreKind::Alias => "alias",
        })
    }
}

/// Entry counts per store
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MemoryStats {
    pub ground: usize,
    pub conditional: usize,
    pub universal: usize,
    pub vars: usize,
    pub properties: usize,
    pub fns: usize,
    pub aliases: usize,
}

/// The fact and declaration stores of one session
#[derive(Debug, Default, Clone, Serialize)]
pub struct FactMemory {
    ground: Store<Fact>,
    conditional: Store<ConditionalEntry>,
    universal: Store<UniversalEntry>,
    vars: Store<Param>,
    properties: Store<PropertyDecl>,
    fns: Store<FnDecl>,
    aliases: Store<Fc>,
}

impl FactMemory {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store an established fact: specific facts go to the ground store,
    /// forall facts to the universal store
    pub fn insert_fact(
        &mut self,
        fact: Fact,
    ) -> Recorded {
        let keys = fact.keys();
        match fact {
            Fact::Forall(forall) => {
                let id = self.universal.insert(keys.iter().cloned(), forall.into());
                debug!("universal {} <- {:?}", id, keys);
                Recorded::new(StoreKind::Universal, id)
            }
            specific => {
                let id = self.ground.insert(keys.iter().cloned(), specific);
                debug!("ground {} <- {:?}", id, keys);
                Recorded::new(StoreKind::Ground, id)
            }
        }
    }

    /// Store `consequence` guarded by `guards`
    pub fn insert_conditional(
        &mut self,
        guards: Vec<Fact>,
        consequence: Fact,
    ) -> Recorded {
        let keys = consequence.keys();
        let entry = ConditionalEntry {
            guards,
            consequence,
        };
        let id = self.conditional.insert(keys.iter().cloned(), entry);
        debug!("conditional {} <- {:?}", id, keys);
        Recorded::new(StoreKind::Conditional, id)
    }

    /// Register a declared variable under its name
    pub fn declare_var(
        &mut self,
        var: Param,
    ) -> Recorded {
        let name = var.name.clone();
        let id = self.vars.insert([name.as_str()], var);
        debug!("var {} <- {}", id, name);
        Recorded::new(StoreKind::Var, id)
    }

    pub fn declare_property(
        &mut self,
        decl: PropertyDecl,
    ) -> Recorded {
        let name = decl.name.clone();
        let id = self.properties.insert([name.as_str()], decl);
        debug!("property {} <- {}", id, name);
        Recorded::new(StoreKind::Property, id)
    }

    pub fn declare_fn(
        &mut self,
        decl: FnDecl,
    ) -> Recorded {
        let name = decl.name.clone();
        let id = self.fns.insert([name.as_str()], decl);
        debug!("fn {} <- {}", id, name);
        Recorded::new(StoreKind::Fn, id)
    }

    /// Bind `name` to `value` (`use name value`)
    pub fn declare_alias(
        &mut self,
        name: &str,
        value: Fc,
    ) -> Recorded {
        let id = self.aliases.insert([name], value);
        debug!("alias {} <- {}", id, name);
        Recorded::new(StoreKind::Alias, id)
    }

    #[inline]
    pub fn ground(&self) -> &Store<Fact> {
        &self.ground
    }

    #[inline]
    pub fn conditional(&self) -> &Store<ConditionalEntry> {
        &self.conditional
    }

    #[inline]
    pub fn universal(&self) -> &Store<UniversalEntry> {
        &self.universal
    }

    #[inline]
    pub fn vars(&self) -> &Store<Param> {
        &self.vars
    }

    #[inline]
    pub fn properties(&self) -> &Store<PropertyDecl> {
        &self.properties
    }

    #[inline]
    pub fn fns(&self) -> &Store<FnDecl> {
        &self.fns
    }

    #[inline]
    pub fn aliases(&self) -> &Store<Fc> {
        &self.aliases
    }

    pub fn stats(&self) -> MemoryStats {
        MemoryStats {
            ground: self.ground.len(),
            conditional: self.conditional.len(),
            universal: self.universal.len(),
            vars: self.vars.len(),
            properties: self.properties.len(),
            fns: self.fns.len(),
            aliases: self.aliases.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.stats() == MemoryStats::default()
    }
}

#[cfg(test)]
mod tests;
