//! Lazy values: deferred computations standing in for a property's value
//!
//! A lazy value is resolved by the transformation engine only when the
//! property ends up in the output. Plain and default-included lazies are
//! governed by the include/exclude selectors; conditional and relational
//! lazies carry their own inclusion decision, captured once at construction.
//!
//! Copyright (c) 2025 Datakit Team
//! Licensed under the Apache-2.0 license

use crate::value::Value;
use crate::Result;
use std::fmt;
use std::sync::Arc;

type Resolver = Arc<dyn Fn() -> Result<Value> + Send + Sync>;

/// Source object able to tell whether one of its relations was loaded
///
/// Implemented by ORM models (or anything standing in for them) so that
/// [`Lazy::when_loaded`] can decide inclusion without triggering a query.
pub trait RelationSource {
    fn relation_loaded(&self, relation: &str) -> bool;
}

/// The closed set of lazy variants
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LazyKind {
    /// Excluded unless explicitly included
    Plain,
    /// Included unless explicitly excluded
    DefaultIncluded,
    /// Included when the captured condition held
    Conditional { included: bool },
    /// Included when the relation was loaded on the source
    Relational { relation: String, loaded: bool },
}

/// A deferred computation producing a [`Value`] on demand
#[derive(Clone)]
pub struct Lazy {
    kind: LazyKind,
    resolver: Resolver,
}

impl Lazy {
    /// Plain lazy value around an infallible computation
    pub fn create<F, V>(resolver: F) -> Self
    where
        F: Fn() -> V + Send + Sync + 'static,
        V: Into<Value>,
    {
        Self::try_create(move || Ok(resolver().into()))
    }

    /// Plain lazy value around a computation that may fail
    pub fn try_create<F>(resolver: F) -> Self
    where
        F: Fn() -> Result<Value> + Send + Sync + 'static,
    {
        Self {
            kind: LazyKind::Plain,
            resolver: Arc::new(resolver),
        }
    }

    /// Conditional lazy value; `condition` is evaluated once, right here
    pub fn when<C, F, V>(condition: C, resolver: F) -> Self
    where
        C: FnOnce() -> bool,
        F: Fn() -> V + Send + Sync + 'static,
        V: Into<Value>,
    {
        let included = condition();
        Self {
            kind: LazyKind::Conditional { included },
            ..Self::create(resolver)
        }
    }

    /// Relational lazy value, included only when `relation` is loaded on `source`
    pub fn when_loaded<S, F, V>(relation: &str, source: &S, resolver: F) -> Self
    where
        S: RelationSource + ?Sized,
        F: Fn() -> V + Send + Sync + 'static,
        V: Into<Value>,
    {
        Self {
            kind: LazyKind::Relational {
                relation: relation.to_string(),
                loaded: source.relation_loaded(relation),
            },
            ..Self::create(resolver)
        }
    }

    /// Include this value unless it is explicitly excluded.
    ///
    /// Only plain lazies change; conditional and relational lazies keep
    /// their own decision.
    pub fn default_included(mut self) -> Self {
        if self.kind == LazyKind::Plain {
            self.kind = LazyKind::DefaultIncluded;
        }
        self
    }

    /// Run the computation. Nothing is cached.
    pub fn resolve(&self) -> Result<Value> {
        (self.resolver)()
    }

    pub fn kind(&self) -> &LazyKind {
        &self.kind
    }

    pub fn is_default_included(&self) -> bool {
        self.kind == LazyKind::DefaultIncluded
    }

    /// Whether inclusion is decided by the value itself rather than by selectors
    pub fn has_own_inclusion_decision(&self) -> bool {
        self.should_be_included().is_some()
    }

    /// The captured inclusion decision of conditional and relational lazies
    pub fn should_be_included(&self) -> Option<bool> {
        match &self.kind {
            LazyKind::Conditional { included } => Some(*included),
            LazyKind::Relational { loaded, .. } => Some(*loaded),
            LazyKind::Plain | LazyKind::DefaultIncluded => None,
        }
    }
}

impl PartialEq for Lazy {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && Arc::ptr_eq(&self.resolver, &other.resolver)
    }
}

impl fmt::Debug for Lazy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Lazy").field("kind", &self.kind).finish_non_exhaustive()
    }
}
