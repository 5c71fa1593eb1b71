//! Relationship (edge) type vocabularies and edge endpoints

use crate::entity::EntityType;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

vocabulary! {
    /// Relationship types usable between domain objects, or between a domain
    /// object and an observable
    pub enum CoreRelationType (Error::UnknownRelationshipType) {
        /// Generic link, allowed between any two endpoints
        RelatedTo => "related-to",
        /// Revocation link, allowed between any two endpoints
        RevokedBy => "revoked-by",
        AttributedTo => "attributed-to",
        AuthoredBy => "authored-by",
        BasedOn => "based-on",
        BeaconsTo => "beacons-to",
        BelongsTo => "belongs-to",
        CommunicatesWith => "communicates-with",
        Compromises => "compromises",
        ConsistsOf => "consists-of",
        Controls => "controls",
        CooperatesWith => "cooperates-with",
        Delivers => "delivers",
        DerivedFrom => "derived-from",
        Downloads => "downloads",
        Drops => "drops",
        ExfiltratesTo => "exfiltrates-to",
        Exploits => "exploits",
        Has => "has",
        Hosts => "hosts",
        Impersonates => "impersonates",
        Indicates => "indicates",
        Investigates => "investigates",
        LocatedAt => "located-at",
        Mitigates => "mitigates",
        OriginatesFrom => "originates-from",
        Owns => "owns",
        PartOf => "part-of",
        ParticipatesIn => "participates-in",
        Remediates => "remediates",
        ResolvesTo => "resolves-to",
        SubtechniqueOf => "subtechnique-of",
        Targets => "targets",
        Uses => "uses",
        VariantOf => "variant-of",
    }
}

impl CoreRelationType {
    /// Kinds that bypass the compatibility table entirely
    pub const ALWAYS_ALLOWED: &'static [CoreRelationType] =
        &[CoreRelationType::RelatedTo, CoreRelationType::RevokedBy];

    pub fn is_always_allowed(&self) -> bool {
        Self::ALWAYS_ALLOWED.contains(self)
    }
}

vocabulary! {
    /// Relationship types used strictly between two cyber observables.
    ///
    /// Names that clash with core relationship types carry an `obs_` prefix.
    pub enum ObservableRelationType (Error::UnknownRelationshipType) {
        OperatingSystem => "operating-system",
        Sample => "sample",
        Contains => "contains",
        ResolvesTo => "obs_resolves-to",
        BelongsTo => "obs_belongs-to",
        From => "from",
        Sender => "sender",
        To => "to",
        Cc => "cc",
        Bcc => "bcc",
        BodyMultipart => "body-multipart",
        BodyRaw => "body-raw",
        ParentDirectory => "parent-directory",
        RawEmail => "raw-email",
        Src => "src",
        Dst => "dst",
        SrcPayload => "src-payload",
        DstPayload => "dst-payload",
        Encapsulates => "encapsulates",
        EncapsulatedBy => "encapsulated-by",
        OpenedConnection => "opened-connection",
        CreatorUser => "creator-user",
        Image => "image",
        Parent => "parent",
        Child => "child",
        Content => "obs_content",
        Values => "values",
        /// Generic observable link, allowed between any two observables
        Linked => "x_opencti_linked-to",
    }
}

impl ObservableRelationType {
    pub fn is_always_allowed(&self) -> bool {
        matches!(self, ObservableRelationType::Linked)
    }
}

/// One side of an edge as seen by the core table.
///
/// Relationships can themselves be the source or target of a relationship
/// (an indicator indicating a `uses`, a `targets` located at a region), so an
/// endpoint is either an entity type or a core relationship type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Endpoint {
    Type(EntityType),
    Relationship(CoreRelationType),
}

impl Endpoint {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Endpoint::Type(t) => t.as_str(),
            Endpoint::Relationship(r) => r.as_str(),
        }
    }

    /// Entity type of this endpoint, if it is not a relationship
    pub const fn entity_type(&self) -> Option<EntityType> {
        match self {
            Endpoint::Type(t) => Some(*t),
            Endpoint::Relationship(_) => None,
        }
    }

    pub const fn is_observable(&self) -> bool {
        match self {
            Endpoint::Type(t) => t.is_observable(),
            Endpoint::Relationship(_) => false,
        }
    }
}

impl From<EntityType> for Endpoint {
    fn from(t: EntityType) -> Self {
        Endpoint::Type(t)
    }
}

impl From<CoreRelationType> for Endpoint {
    fn from(r: CoreRelationType) -> Self {
        Endpoint::Relationship(r)
    }
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Endpoint {
    type Err = Error;

    /// Entity type names are tried first, then core relationship names
    fn from_str(s: &str) -> Result<Self> {
        if let Ok(t) = s.parse::<EntityType>() {
            return Ok(Endpoint::Type(t));
        }
        match s.parse::<CoreRelationType>() {
            Ok(r) => Ok(Endpoint::Relationship(r)),
            Err(_) => Err(Error::UnknownType(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_relation_types() {
        assert_eq!("uses".parse::<CoreRelationType>(), Ok(CoreRelationType::Uses));
        assert_eq!(
            "obs_resolves-to".parse::<ObservableRelationType>(),
            Ok(ObservableRelationType::ResolvesTo)
        );
        assert_eq!(
            "resolves-to".parse::<ObservableRelationType>(),
            Err(Error::UnknownRelationshipType("resolves-to".to_string()))
        );
    }

    #[test]
    fn test_always_allowed() {
        assert!(CoreRelationType::RelatedTo.is_always_allowed());
        assert!(CoreRelationType::RevokedBy.is_always_allowed());
        assert!(!CoreRelationType::Uses.is_always_allowed());
        assert!(ObservableRelationType::Linked.is_always_allowed());
        assert!(!ObservableRelationType::Contains.is_always_allowed());
    }

    #[test]
    fn test_endpoint_parsing() {
        assert_eq!(
            "Malware".parse::<Endpoint>(),
            Ok(Endpoint::Type(EntityType::Malware))
        );
        assert_eq!(
            "targets".parse::<Endpoint>(),
            Ok(Endpoint::Relationship(CoreRelationType::Targets))
        );
        assert_eq!(
            "nope".parse::<Endpoint>(),
            Err(Error::UnknownType("nope".to_string()))
        );
    }

    #[test]
    fn test_endpoint_predicates() {
        let ip: Endpoint = EntityType::IPv4Addr.into();
        assert!(ip.is_observable());
        assert_eq!(ip.entity_type(), Some(EntityType::IPv4Addr));

        let rel: Endpoint = CoreRelationType::Uses.into();
        assert!(!rel.is_observable());
        assert_eq!(rel.entity_type(), None);
        assert_eq!(rel.to_string(), "uses");
    }

    #[test]
    fn test_endpoint_serde_is_flat() {
        let json = serde_json::to_string(&Endpoint::Type(EntityType::Tool)).unwrap();
        assert_eq!(json, "\"Tool\"");

        let parsed: Endpoint = serde_json::from_str("\"located-at\"").unwrap();
        assert_eq!(parsed, Endpoint::Relationship(CoreRelationType::LocatedAt));
    }
}
