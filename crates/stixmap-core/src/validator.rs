//! Relationship validation against the compatibility tables

use crate::entity::EntityType;
use crate::error::Result;
use crate::mapping::{
    core_relationships, observable_relationships, CoreRelationshipTable, ObservableRelationshipTable,
    PairKey,
};
use crate::relation::{CoreRelationType, Endpoint, ObservableRelationType};

/// Answers "may this edge exist?" for a pair of tables.
///
/// Lookups are pure reads over immutable tables, so a validator can be shared
/// freely across threads.
#[derive(Debug, Clone, Copy)]
pub struct RelationshipValidator<'a> {
    core: &'a CoreRelationshipTable,
    observable: &'a ObservableRelationshipTable,
}

impl RelationshipValidator<'static> {
    /// Validator over the built-in STIX tables
    pub fn stix() -> Self {
        Self::new(core_relationships(), observable_relationships())
    }
}

impl<'a> RelationshipValidator<'a> {
    pub fn new(core: &'a CoreRelationshipTable, observable: &'a ObservableRelationshipTable) -> Self {
        Self { core, observable }
    }

    /// Whether `relation` may link `from` to `to` in the core table.
    ///
    /// `related-to` and `revoked-by` are accepted for any endpoints. An entry
    /// keyed on the abstract observable type covers every concrete observable
    /// on that side.
    pub fn is_core_relationship_allowed(
        &self,
        from: impl Into<Endpoint>,
        to: impl Into<Endpoint>,
        relation: CoreRelationType,
    ) -> bool {
        let (from, to) = (from.into(), to.into());

        if relation.is_always_allowed() {
            return true;
        }
        if to.is_observable() && self.core.permits(&PairKey::new(from, ABSTRACT), relation) {
            return true;
        }
        if from.is_observable() && self.core.permits(&PairKey::new(ABSTRACT, to), relation) {
            return true;
        }

        let allowed = self.core.permits(&PairKey::new(from, to), relation);
        if !allowed {
            tracing::trace!("Denied core relationship {} -[{}]-> {}", from, relation, to);
        }
        allowed
    }

    /// Whether `relation` may link `from` to `to` in the observable table.
    ///
    /// Only the exact pair is consulted; unlike the core path there is no
    /// abstract observable fallback.
    pub fn is_observable_relationship_allowed(
        &self,
        from: EntityType,
        to: EntityType,
        relation: ObservableRelationType,
    ) -> bool {
        if relation.is_always_allowed() {
            return true;
        }

        let allowed = self.observable.permits(&PairKey::new(from, to), relation);
        if !allowed {
            tracing::trace!("Denied observable relationship {} -[{}]-> {}", from, relation, to);
        }
        allowed
    }

    /// Every core relationship type accepted between `from` and `to`
    pub fn allowed_core_relationships(
        &self,
        from: impl Into<Endpoint>,
        to: impl Into<Endpoint>,
    ) -> Vec<CoreRelationType> {
        let (from, to) = (from.into(), to.into());
        let mut allowed: Vec<CoreRelationType> = CoreRelationType::ALWAYS_ALLOWED.to_vec();

        let mut candidates: Vec<&[CoreRelationType]> = Vec::new();
        if to.is_observable() {
            candidates.extend(self.core.get(&PairKey::new(from, ABSTRACT)));
        }
        if from.is_observable() {
            candidates.extend(self.core.get(&PairKey::new(ABSTRACT, to)));
        }
        candidates.extend(self.core.get(&PairKey::new(from, to)));

        for relation in candidates.into_iter().flatten() {
            if !allowed.contains(relation) {
                allowed.push(*relation);
            }
        }
        allowed
    }

    /// Every observable relationship type accepted between `from` and `to`
    pub fn allowed_observable_relationships(
        &self,
        from: EntityType,
        to: EntityType,
    ) -> Vec<ObservableRelationType> {
        let mut allowed = vec![ObservableRelationType::Linked];
        if let Some(relations) = self.observable.get(&PairKey::new(from, to)) {
            for relation in relations {
                if !allowed.contains(relation) {
                    allowed.push(*relation);
                }
            }
        }
        allowed
    }

    /// String-level core check that rejects names outside the vocabulary
    /// instead of answering `false`.
    ///
    /// Always-allowed relationship types are accepted before the endpoints
    /// are parsed, so they hold for unregistered types too.
    pub fn check_core_relationship(&self, from: &str, to: &str, relation: &str) -> Result<bool> {
        let relation: CoreRelationType = relation.parse()?;
        if relation.is_always_allowed() {
            return Ok(true);
        }
        let from: Endpoint = from.parse()?;
        let to: Endpoint = to.parse()?;
        Ok(self.is_core_relationship_allowed(from, to, relation))
    }

    /// String-level observable check that rejects names outside the vocabulary
    pub fn check_observable_relationship(
        &self,
        from: &str,
        to: &str,
        relation: &str,
    ) -> Result<bool> {
        let relation: ObservableRelationType = relation.parse()?;
        if relation.is_always_allowed() {
            return Ok(true);
        }
        let from: EntityType = from.parse()?;
        let to: EntityType = to.parse()?;
        Ok(self.is_observable_relationship_allowed(from, to, relation))
    }
}

const ABSTRACT: Endpoint = Endpoint::Type(EntityType::StixCyberObservable);

// ─────────────────────────────────────────────────────────────────────────────
// Free functions over the built-in tables
// ─────────────────────────────────────────────────────────────────────────────

/// See [`RelationshipValidator::is_core_relationship_allowed`]
pub fn is_core_relationship_allowed(
    from: impl Into<Endpoint>,
    to: impl Into<Endpoint>,
    relation: CoreRelationType,
) -> bool {
    RelationshipValidator::stix().is_core_relationship_allowed(from, to, relation)
}

/// See [`RelationshipValidator::is_observable_relationship_allowed`]
pub fn is_observable_relationship_allowed(
    from: EntityType,
    to: EntityType,
    relation: ObservableRelationType,
) -> bool {
    RelationshipValidator::stix().is_observable_relationship_allowed(from, to, relation)
}

pub fn allowed_core_relationships(
    from: impl Into<Endpoint>,
    to: impl Into<Endpoint>,
) -> Vec<CoreRelationType> {
    RelationshipValidator::stix().allowed_core_relationships(from, to)
}

pub fn allowed_observable_relationships(
    from: EntityType,
    to: EntityType,
) -> Vec<ObservableRelationType> {
    RelationshipValidator::stix().allowed_observable_relationships(from, to)
}

pub fn check_core_relationship(from: &str, to: &str, relation: &str) -> Result<bool> {
    RelationshipValidator::stix().check_core_relationship(from, to, relation)
}

pub fn check_observable_relationship(from: &str, to: &str, relation: &str) -> Result<bool> {
    RelationshipValidator::stix().check_observable_relationship(from, to, relation)
}
