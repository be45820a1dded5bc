//! Process-wide rule registry
//!
//! Every validator type that implements [`Registered`] owns a table of named
//! rules. The table is built the first time anything asks for it, by calling
//! [`Registered::register_rules`] exactly once, and is afterwards append-only.
//!
//! Rule names form an insertion-ordered set per type; a rule name may be bound
//! to several functions, and registering the same `(name, method)` pair twice
//! is a no-op.
//!
//! ```rust,ignore
//! use warden_validator::prelude::*;
//!
//! struct Age;
//!
//! impl Age {
//!     fn not_negative(&self, age: &i64) -> Outcome {
//!         if *age < 0 { ValidatorResult::error("age<0") } else { Ok(ValidatorResult::ok()) }
//!     }
//! }
//!
//! impl Registered for Age {
//!     fn register_rules(rules: &mut Registrar<Self>) {
//!         rules.register(["not_negative"], "not_negative", Self::not_negative);
//!     }
//! }
//!
//! assert_eq!(rules_for::<Age>().len(), 1);
//! ```

use std::any::{Any, TypeId};
use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

use indexmap::IndexSet;
use parking_lot::RwLock;
use tracing::debug;

use crate::foundation::{Outcome, Validate};

/// A rule body: validates `input` on behalf of validator `V`.
pub type RuleFn<V> = fn(&V, &<V as Validate>::Input) -> Outcome;

// ============================================================================
// RULE ENTRY
// ============================================================================

/// One `(rule name, function)` binding on a validator type.
pub struct Rule<V: Validate> {
    name: Cow<'static, str>,
    method: &'static str,
    func: RuleFn<V>,
}

impl<V: Validate> Rule<V> {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Identifier of the function bound under this name.
    #[must_use]
    pub fn method(&self) -> &'static str {
        self.method
    }

    /// Runs the rule body.
    pub fn call(&self, validator: &V, input: &V::Input) -> Outcome {
        (self.func)(validator, input)
    }

    pub(crate) fn name_cow(&self) -> &Cow<'static, str> {
        &self.name
    }
}

impl<V: Validate> Clone for Rule<V> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            method: self.method,
            func: self.func,
        }
    }
}

impl<V: Validate> std::fmt::Debug for Rule<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule")
            .field("name", &self.name)
            .field("method", &self.method)
            .finish()
    }
}

// ============================================================================
// RULE TABLE
// ============================================================================

/// Snapshot of the rules registered on `V`.
pub struct RuleTable<V: Validate> {
    names: IndexSet<Cow<'static, str>>,
    rules: Vec<Rule<V>>,
}

impl<V: Validate> RuleTable<V> {
    fn new() -> Self {
        Self {
            names: IndexSet::new(),
            rules: Vec::new(),
        }
    }

    /// Adds a binding; returns false if `(name, method)` was already present.
    fn insert(&mut self, name: Cow<'static, str>, method: &'static str, func: RuleFn<V>) -> bool {
        if self
            .rules
            .iter()
            .any(|rule| rule.name == name && rule.method == method)
        {
            return false;
        }
        self.names.insert(name.clone());
        self.rules.push(Rule { name, method, func });
        true
    }

    /// Rule names in registration order.
    #[must_use]
    pub fn names(&self) -> &IndexSet<Cow<'static, str>> {
        &self.names
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Functions bound to `name`, in registration order.
    pub fn bindings<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Rule<V>> + 'a {
        self.rules.iter().filter(move |rule| rule.name == name)
    }

    /// Every binding, grouped by rule name in name-registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Rule<V>> + '_ {
        self.names.iter().flat_map(|name| self.bindings(name))
    }

    /// Total number of bindings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl<V: Validate> Clone for RuleTable<V> {
    fn clone(&self) -> Self {
        Self {
            names: self.names.clone(),
            rules: self.rules.clone(),
        }
    }
}

impl<V: Validate> std::fmt::Debug for RuleTable<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleTable")
            .field("names", &self.names)
            .field("rules", &self.rules)
            .finish()
    }
}

// ============================================================================
// REGISTRATION
// ============================================================================

/// A validator type that declares named rules.
///
/// `register_rules` runs once per type, the first time its rules are looked
/// up. It must not call back into the registry.
pub trait Registered: Validate + Sized + 'static {
    fn register_rules(rules: &mut Registrar<Self>);
}

/// Collects the rules of one validator type.
pub struct Registrar<V: Validate> {
    table: RuleTable<V>,
}

impl<V: Validate> Registrar<V> {
    /// Binds `func` under every name in `names`.
    ///
    /// `method` identifies the function; a repeated `(name, method)` pair is
    /// ignored.
    pub fn register<I, N>(&mut self, names: I, method: &'static str, func: RuleFn<V>) -> &mut Self
    where
        I: IntoIterator<Item = N>,
        N: Into<Cow<'static, str>>,
    {
        for name in names {
            self.table.insert(name.into(), method, func);
        }
        self
    }
}

struct Slot {
    seeded: bool,
    table: Arc<dyn Any + Send + Sync>,
}

/// The process-wide map from validator type to its [`RuleTable`].
///
/// Reads take a shared lock and clone an `Arc`; writes replace the table
/// wholesale, so snapshots handed out earlier stay valid.
pub struct RuleRegistry {
    slots: RwLock<HashMap<TypeId, Slot>>,
}

static REGISTRY: LazyLock<RuleRegistry> = LazyLock::new(RuleRegistry::new);

/// The global registry.
pub fn registry() -> &'static RuleRegistry {
    &REGISTRY
}

impl RuleRegistry {
    fn new() -> Self {
        Self {
            slots: RwLock::new(HashMap::new()),
        }
    }

    /// Rules of `V`, seeding them on first use.
    pub fn table<V: Registered>(&self) -> Arc<RuleTable<V>> {
        if let Some(table) = self.seeded_table::<V>() {
            return table;
        }

        let mut registrar = Registrar {
            table: RuleTable::new(),
        };
        V::register_rules(&mut registrar);

        let mut slots = self.slots.write();
        let slot = slots.entry(TypeId::of::<V>()).or_insert_with(|| Slot {
            seeded: false,
            table: Arc::new(RuleTable::<V>::new()),
        });
        if !slot.seeded {
            // Late registrations made before seeding go after the declared ones.
            let mut table = registrar.table;
            for rule in &downcast::<V>(&slot.table).rules {
                table.insert(rule.name.clone(), rule.method, rule.func);
            }
            debug!(
                validator = std::any::type_name::<V>(),
                rules = table.names.len(),
                "registered validator rules"
            );
            slot.table = Arc::new(table);
            slot.seeded = true;
        }
        downcast::<V>(&slot.table)
    }

    /// Registers `func` on `V` after startup.
    pub fn register<V, I, N>(&self, names: I, method: &'static str, func: RuleFn<V>)
    where
        V: Registered,
        I: IntoIterator<Item = N>,
        N: Into<Cow<'static, str>>,
    {
        let mut slots = self.slots.write();
        let slot = slots.entry(TypeId::of::<V>()).or_insert_with(|| Slot {
            seeded: false,
            table: Arc::new(RuleTable::<V>::new()),
        });
        let mut table = (*downcast::<V>(&slot.table)).clone();
        let mut added = 0usize;
        for name in names {
            if table.insert(name.into(), method, func) {
                added += 1;
            }
        }
        if added > 0 {
            debug!(
                validator = std::any::type_name::<V>(),
                method, added, "registered late rule"
            );
            slot.table = Arc::new(table);
        }
    }

    /// Rule names registered on `V`, in registration order.
    pub fn rules_for<V: Registered>(&self) -> IndexSet<Cow<'static, str>> {
        self.table::<V>().names.clone()
    }

    fn seeded_table<V: Registered>(&self) -> Option<Arc<RuleTable<V>>> {
        let slots = self.slots.read();
        slots
            .get(&TypeId::of::<V>())
            .filter(|slot| slot.seeded)
            .map(|slot| downcast::<V>(&slot.table))
    }
}

fn downcast<V: Validate + 'static>(table: &Arc<dyn Any + Send + Sync>) -> Arc<RuleTable<V>> {
    match Arc::clone(table).downcast::<RuleTable<V>>() {
        Ok(table) => table,
        // Slots are keyed by `TypeId::of::<V>()` and only ever hold `RuleTable<V>`.
        Err(_) => unreachable!("rule table stored under the wrong type id"),
    }
}

/// Registers `func` on `V` in the global registry.
pub fn register<V, I, N>(names: I, method: &'static str, func: RuleFn<V>)
where
    V: Registered,
    I: IntoIterator<Item = N>,
    N: Into<Cow<'static, str>>,
{
    registry().register::<V, I, N>(names, method, func);
}

/// Rule names registered on `V` in the global registry.
pub fn rules_for<V: Registered>() -> IndexSet<Cow<'static, str>> {
    registry().rules_for::<V>()
}

// ============================================================================
// TESTS
// ============================================================================
