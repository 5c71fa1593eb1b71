//! Observable reference-field index
//!
//! Projects the observable relationship table through a relationship type to
//! field name dictionary, giving for each source type the list of reference
//! fields its outgoing relationships populate.

use crate::entity::EntityType;
use crate::error::{Error, Result};
use crate::mapping::{observable_relationships, ObservableRelationshipTable};
use crate::relation::ObservableRelationType;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::sync::OnceLock;

/// Maps observable relationship types to the schema field they populate
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldDictionary {
    names: HashMap<ObservableRelationType, String>,
}

impl FieldDictionary {
    /// Empty dictionary
    pub fn new() -> Self {
        Self::default()
    }

    /// Field names used by the STIX observable schema
    pub fn stix() -> Self {
        use ObservableRelationType::*;

        [
            (OperatingSystem, "operatingSystems"),
            (Sample, "samples"),
            (Contains, "obsContains"),
            (ResolvesTo, "obsResolvesTo"),
            (BelongsTo, "obsBelongsTo"),
            (From, "from"),
            (Sender, "sender"),
            (To, "to"),
            (Cc, "cc"),
            (Bcc, "bcc"),
            (BodyMultipart, "bodyMultipart"),
            (BodyRaw, "bodyRaw"),
            (ParentDirectory, "parentDirectory"),
            (RawEmail, "rawEmail"),
            (Src, "src"),
            (Dst, "dst"),
            (SrcPayload, "srcPayload"),
            (DstPayload, "dstPayload"),
            (Encapsulates, "encapsulates"),
            (EncapsulatedBy, "encapsulatedBy"),
            (OpenedConnection, "openedConnections"),
            (CreatorUser, "creatorUser"),
            (Image, "image"),
            (Parent, "parent"),
            (Child, "child"),
            (Content, "obsContent"),
            (Values, "winRegValues"),
            (Linked, "xOpenctiLinkedTo"),
        ]
        .into_iter()
        .fold(Self::new(), |dict, (relation, field)| dict.with(relation, field))
    }

    pub fn with(mut self, relation: ObservableRelationType, field: impl Into<String>) -> Self {
        self.insert(relation, field);
        self
    }

    pub fn insert(&mut self, relation: ObservableRelationType, field: impl Into<String>) {
        self.names.insert(relation, field.into());
    }

    pub fn field_name(&self, relation: ObservableRelationType) -> Option<&str> {
        self.names.get(&relation).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Source type to ordered reference-field names.
///
/// Field lists keep table declaration order and may contain repeats (a type
/// reaching several targets through the same relationship lists that field
/// once per target).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldIndex {
    fields: BTreeMap<EntityType, Vec<String>>,
}

impl FieldIndex {
    /// Fields for a type, empty when the type has no outgoing observable edges
    pub fn fields_for(&self, entity_type: EntityType) -> &[String] {
        self.fields
            .get(&entity_type)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn has_field(&self, entity_type: EntityType, field: &str) -> bool {
        self.fields_for(entity_type).iter().any(|f| f == field)
    }

    /// Types with at least one field, in vocabulary order
    pub fn types(&self) -> impl Iterator<Item = EntityType> + '_ {
        self.fields.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (EntityType, &[String])> {
        self.fields.iter().map(|(t, f)| (*t, f.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Build the field index for `table`.
///
/// Fails on the first relationship type the dictionary cannot name; a
/// partial index is never returned.
pub fn build_field_index(
    table: &ObservableRelationshipTable,
    dictionary: &FieldDictionary,
) -> Result<FieldIndex> {
    let mut fields: BTreeMap<EntityType, Vec<String>> = BTreeMap::new();

    for (key, relations) in table.iter() {
        let projected = relations
            .iter()
            .map(|relation| {
                dictionary
                    .field_name(*relation)
                    .map(str::to_string)
                    .ok_or_else(|| Error::MissingFieldMapping(relation.to_string()))
            })
            .collect::<Result<Vec<_>>>()?;

        fields.entry(key.from).or_default().extend(projected);
    }

    tracing::debug!("Built observable field index for {} types", fields.len());
    Ok(FieldIndex { fields })
}

/// Field index of the built-in observable table under [`FieldDictionary::stix`],
/// computed on first use.
pub fn observable_type_fields() -> Result<&'static FieldIndex> {
    static INDEX: OnceLock<Result<FieldIndex>> = OnceLock::new();
    INDEX
        .get_or_init(|| build_field_index(observable_relationships(), &FieldDictionary::stix()))
        .as_ref()
        .map_err(Clone::clone)
}
