//! Stixmap Core - STIX 2.1 relationship compatibility
//!
//! This crate holds the fixed tables of which relationship types may link
//! which STIX entity types, the validator answering per-edge questions over
//! them, the derived observable reference-field index, and the transient STIX
//! id retention used before ids are persisted.

#[macro_use]
mod macros;

pub mod entity;
pub mod error;
pub mod fields;
pub mod limits;
pub mod mapping;
pub mod relation;
pub mod stix_id;
pub mod validator;

pub use entity::{EntityType, TypeCategory};
pub use error::{Error, Result};
pub use fields::{build_field_index, observable_type_fields, FieldDictionary, FieldIndex};
pub use limits::{MAX_TRANSIENT_STIX_IDS, STIX_SPEC_VERSION};
pub use mapping::{
    core_relationships, observable_relationships, CoreRelationshipTable,
    ObservableRelationshipTable, PairKey, RelationshipTable,
};
pub use relation::{CoreRelationType, Endpoint, ObservableRelationType};
pub use stix_id::{clean_ids, clean_stix_ids, only_stable_ids, StixId, StixIdKind};
pub use validator::{
    allowed_core_relationships, allowed_observable_relationships, check_core_relationship,
    check_observable_relationship, is_core_relationship_allowed,
    is_observable_relationship_allowed, RelationshipValidator,
};
