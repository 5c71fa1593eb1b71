//! Relationship compatibility tables
//!
//! Two independent tables map an ordered `(from, to)` pair to the relationship
//! types permitted along that edge: one for domain objects (and domain object
//! to observable edges), one for observable to observable edges. Both are
//! built once and never mutated.

use crate::entity::EntityType;
use crate::relation::{CoreRelationType, Endpoint, ObservableRelationType};
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::sync::OnceLock;

/// Separator used when a pair key is rendered as a single string
pub const PAIR_SEPARATOR: char = '_';

/// Ordered `(from, to)` table key. `(A, B)` and `(B, A)` are distinct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PairKey<K> {
    pub from: K,
    pub to: K,
}

impl<K> PairKey<K> {
    pub fn new(from: impl Into<K>, to: impl Into<K>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

impl<K: fmt::Display> fmt::Display for PairKey<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.from, PAIR_SEPARATOR, self.to)
    }
}

/// Immutable mapping from pair keys to non-empty relationship type lists.
///
/// Entries keep their declaration order for iteration; lookups go through a
/// hash index.
#[derive(Debug, Clone)]
pub struct RelationshipTable<K, R> {
    entries: Vec<(PairKey<K>, Vec<R>)>,
    index: HashMap<PairKey<K>, usize>,
}

/// Table for domain object edges (endpoints may be synthetic relationship keys)
pub type CoreRelationshipTable = RelationshipTable<Endpoint, CoreRelationType>;

/// Table for observable to observable edges
pub type ObservableRelationshipTable = RelationshipTable<EntityType, ObservableRelationType>;

impl<K, R> RelationshipTable<K, R>
where
    K: Copy + Eq + Hash + fmt::Display,
    R: Copy + Eq + fmt::Display,
{
    /// Build a table from authored entries.
    ///
    /// A key listed twice is merged into a single entry (union, first-seen
    /// order) and reported. Entries with no relationship types are dropped.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (PairKey<K>, Vec<R>)>,
    {
        let mut table = Self {
            entries: Vec::new(),
            index: HashMap::new(),
        };

        for (key, relations) in entries {
            if relations.is_empty() {
                tracing::warn!("Dropping empty relationship entry for {}", key);
                continue;
            }
            match table.index.get(&key) {
                Some(&pos) => {
                    tracing::warn!("Duplicate relationship entry for {}, merging", key);
                    let existing = &mut table.entries[pos].1;
                    for rel in relations {
                        if !existing.contains(&rel) {
                            existing.push(rel);
                        }
                    }
                }
                None => {
                    let mut deduped: Vec<R> = Vec::with_capacity(relations.len());
                    for rel in relations {
                        if !deduped.contains(&rel) {
                            deduped.push(rel);
                        }
                    }
                    table.index.insert(key, table.entries.len());
                    table.entries.push((key, deduped));
                }
            }
        }

        table
    }

    /// Relationship types listed for an exact key
    pub fn get(&self, key: &PairKey<K>) -> Option<&[R]> {
        self.index.get(key).map(|&pos| self.entries[pos].1.as_slice())
    }

    pub fn contains_key(&self, key: &PairKey<K>) -> bool {
        self.index.contains_key(key)
    }

    /// True iff the exact key is present and lists `relation`
    pub fn permits(&self, key: &PairKey<K>, relation: R) -> bool {
        self.get(key).map_or(false, |rels| rels.contains(&relation))
    }

    /// Entries in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&PairKey<K>, &[R])> {
        self.entries.iter().map(|(k, v)| (k, v.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Built-in core relationship table
pub fn core_relationships() -> &'static CoreRelationshipTable {
    static TABLE: OnceLock<CoreRelationshipTable> = OnceLock::new();
    TABLE.get_or_init(|| {
        let table: CoreRelationshipTable = RelationshipTable::from_entries(
            CORE_RELATIONSHIPS
                .iter()
                .map(|(from, to, rels)| (PairKey::new(*from, *to), rels.to_vec())),
        );
        tracing::debug!("Built core relationship table with {} entries", table.len());
        table
    })
}

/// Built-in observable relationship table
pub fn observable_relationships() -> &'static ObservableRelationshipTable {
    static TABLE: OnceLock<ObservableRelationshipTable> = OnceLock::new();
    TABLE.get_or_init(|| {
        let table: ObservableRelationshipTable = RelationshipTable::from_entries(
            OBSERVABLE_RELATIONSHIPS
                .iter()
                .map(|(from, to, rels)| (PairKey::new(*from, *to), rels.to_vec())),
        );
        tracing::debug!("Built observable relationship table with {} entries", table.len());
        table
    })
}

// ─────────────────────────────────────────────────────────────────────────────
// Table data
// ─────────────────────────────────────────────────────────────────────────────

use CoreRelationType as C;
use EntityType as E;
use ObservableRelationType as O;

const fn ty(t: EntityType) -> Endpoint {
    Endpoint::Type(t)
}

const fn rel(r: CoreRelationType) -> Endpoint {
    Endpoint::Relationship(r)
}

type CoreEntry = (Endpoint, Endpoint, &'static [CoreRelationType]);
type ObservableEntry = (EntityType, EntityType, &'static [ObservableRelationType]);

#[rustfmt::skip]
static CORE_RELATIONSHIPS: &[CoreEntry] = &[
    (ty(E::IPv4Addr), ty(E::City), &[C::LocatedAt]),
    (ty(E::IPv4Addr), ty(E::Country), &[C::LocatedAt]),
    (ty(E::IPv4Addr), ty(E::Position), &[C::LocatedAt]),
    (ty(E::IPv4Addr), ty(E::Region), &[C::LocatedAt]),
    (ty(E::IPv6Addr), ty(E::City), &[C::LocatedAt]),
    (ty(E::IPv6Addr), ty(E::Country), &[C::LocatedAt]),
    (ty(E::IPv6Addr), ty(E::Position), &[C::LocatedAt]),
    (ty(E::IPv6Addr), ty(E::Region), &[C::LocatedAt]),
    (ty(E::AttackPattern), ty(E::AttackPattern), &[C::SubtechniqueOf]),
    (ty(E::AttackPattern), ty(E::Individual), &[C::Targets]),
    (ty(E::AttackPattern), ty(E::Organization), &[C::Targets]),
    (ty(E::AttackPattern), ty(E::Sector), &[C::Targets]),
    (ty(E::AttackPattern), ty(E::City), &[C::Targets]),
    (ty(E::AttackPattern), ty(E::Country), &[C::Targets]),
    (ty(E::AttackPattern), ty(E::Position), &[C::Targets]),
    (ty(E::AttackPattern), ty(E::Region), &[C::Targets]),
    (ty(E::AttackPattern), ty(E::Malware), &[C::Delivers, C::Uses]),
    (ty(E::AttackPattern), ty(E::Tool), &[C::Uses]),
    (ty(E::AttackPattern), ty(E::Vulnerability), &[C::Targets]),
    (ty(E::Campaign), ty(E::AttackPattern), &[C::Uses]),
    (ty(E::Campaign), ty(E::Individual), &[C::Targets]),
    (ty(E::Campaign), ty(E::Organization), &[C::Targets]),
    (ty(E::Campaign), ty(E::Sector), &[C::Targets]),
    (ty(E::Campaign), ty(E::System), &[C::Targets]),
    (ty(E::Campaign), ty(E::Infrastructure), &[C::Compromises, C::Uses]),
    (ty(E::Campaign), ty(E::IntrusionSet), &[C::AttributedTo]),
    (ty(E::Campaign), ty(E::City), &[C::OriginatesFrom, C::Targets]),
    (ty(E::Campaign), ty(E::Country), &[C::OriginatesFrom, C::Targets]),
    (ty(E::Campaign), ty(E::Position), &[C::OriginatesFrom, C::Targets]),
    (ty(E::Campaign), ty(E::Region), &[C::OriginatesFrom, C::Targets]),
    (ty(E::Campaign), ty(E::Malware), &[C::Uses]),
    (ty(E::Campaign), ty(E::ThreatActor), &[C::AttributedTo]),
    (ty(E::Campaign), ty(E::Tool), &[C::Uses]),
    (ty(E::Campaign), ty(E::Vulnerability), &[C::Targets]),
    (ty(E::CourseOfAction), ty(E::AttackPattern), &[C::Mitigates]),
    (ty(E::CourseOfAction), ty(E::Indicator), &[C::Investigates, C::Mitigates]),
    (ty(E::CourseOfAction), ty(E::Malware), &[C::Mitigates, C::Remediates]),
    (ty(E::CourseOfAction), ty(E::Tool), &[C::Mitigates]),
    (ty(E::CourseOfAction), ty(E::Vulnerability), &[C::Mitigates, C::Remediates]),
    (ty(E::Individual), ty(E::Individual), &[C::PartOf]),
    (ty(E::Individual), ty(E::Organization), &[C::PartOf]),
    (ty(E::Individual), ty(E::City), &[C::LocatedAt]),
    (ty(E::Individual), ty(E::Country), &[C::LocatedAt]),
    (ty(E::Individual), ty(E::Position), &[C::LocatedAt]),
    (ty(E::Individual), ty(E::Region), &[C::LocatedAt]),
    (ty(E::Organization), ty(E::Organization), &[C::PartOf]),
    (ty(E::Organization), ty(E::Sector), &[C::PartOf]),
    (ty(E::Organization), ty(E::City), &[C::LocatedAt]),
    (ty(E::Organization), ty(E::Country), &[C::LocatedAt]),
    (ty(E::Organization), ty(E::Position), &[C::LocatedAt]),
    (ty(E::Organization), ty(E::Region), &[C::LocatedAt]),
    (ty(E::Organization), ty(E::Tool), &[C::Uses]),
    (ty(E::Sector), ty(E::Sector), &[C::PartOf]),
    (ty(E::Sector), ty(E::City), &[C::LocatedAt]),
    (ty(E::Sector), ty(E::Country), &[C::LocatedAt]),
    (ty(E::Sector), ty(E::Position), &[C::LocatedAt]),
    (ty(E::Sector), ty(E::Region), &[C::LocatedAt]),
    (ty(E::System), ty(E::Organization), &[C::BelongsTo]),
    (ty(E::System), ty(E::Region), &[C::LocatedAt]),
    (ty(E::Incident), ty(E::AttackPattern), &[C::Uses]),
    (ty(E::Incident), ty(E::Campaign), &[C::AttributedTo]),
    (ty(E::Incident), ty(E::Individual), &[C::Targets]),
    (ty(E::Incident), ty(E::Organization), &[C::Targets]),
    (ty(E::Incident), ty(E::Sector), &[C::Targets]),
    (ty(E::Incident), ty(E::System), &[C::Targets]),
    (ty(E::Incident), ty(E::Infrastructure), &[C::Compromises, C::Uses]),
    (ty(E::Incident), ty(E::IntrusionSet), &[C::AttributedTo]),
    (ty(E::Incident), ty(E::City), &[C::OriginatesFrom, C::Targets]),
    (ty(E::Incident), ty(E::Country), &[C::OriginatesFrom, C::Targets]),
    (ty(E::Incident), ty(E::Position), &[C::OriginatesFrom, C::Targets]),
    (ty(E::Incident), ty(E::Region), &[C::OriginatesFrom, C::Targets]),
    (ty(E::Incident), ty(E::Malware), &[C::Uses]),
    (ty(E::Incident), ty(E::ThreatActor), &[C::AttributedTo]),
    (ty(E::Incident), ty(E::Tool), &[C::Uses]),
    (ty(E::Incident), ty(E::Vulnerability), &[C::Targets]),
    (ty(E::Indicator), ty(E::Artifact), &[C::BasedOn]),
    (ty(E::Indicator), ty(E::StixCyberObservable), &[C::BasedOn]),
    (ty(E::Indicator), ty(E::AttackPattern), &[C::Indicates]),
    (ty(E::Indicator), ty(E::Campaign), &[C::Indicates]),
    (ty(E::Indicator), ty(E::ObservedData), &[C::BasedOn]),
    (ty(E::Indicator), ty(E::Incident), &[C::Indicates]),
    (ty(E::Indicator), ty(E::Indicator), &[C::DerivedFrom]),
    (ty(E::Indicator), ty(E::Infrastructure), &[C::Indicates]),
    (ty(E::Indicator), ty(E::IntrusionSet), &[C::Indicates]),
    (ty(E::Indicator), ty(E::Malware), &[C::Indicates]),
    (ty(E::Indicator), ty(E::ThreatActor), &[C::Indicates]),
    (ty(E::Indicator), ty(E::Tool), &[C::Indicates]),
    (ty(E::Indicator), ty(E::Vulnerability), &[C::Indicates]),
    (ty(E::Infrastructure), ty(E::Artifact), &[C::ConsistsOf]),
    (ty(E::Infrastructure), ty(E::StixCyberObservable), &[C::ConsistsOf]),
    (ty(E::Infrastructure), ty(E::DomainName), &[C::CommunicatesWith]),
    (ty(E::Infrastructure), ty(E::IPv4Addr), &[C::CommunicatesWith]),
    (ty(E::Infrastructure), ty(E::IPv6Addr), &[C::CommunicatesWith]),
    (ty(E::Infrastructure), ty(E::ObservedData), &[C::ConsistsOf]),
    (ty(E::Infrastructure), ty(E::Infrastructure), &[C::CommunicatesWith, C::ConsistsOf, C::Controls, C::Uses]),
    (ty(E::Infrastructure), ty(E::City), &[C::LocatedAt]),
    (ty(E::Infrastructure), ty(E::Country), &[C::LocatedAt]),
    (ty(E::Infrastructure), ty(E::Position), &[C::LocatedAt]),
    (ty(E::Infrastructure), ty(E::Region), &[C::LocatedAt]),
    (ty(E::Infrastructure), ty(E::Malware), &[C::Controls, C::Delivers, C::Hosts]),
    (ty(E::Infrastructure), ty(E::Tool), &[C::Hosts]),
    (ty(E::Infrastructure), ty(E::Vulnerability), &[C::Has]),
    (ty(E::Infrastructure), ty(E::Url), &[C::CommunicatesWith]),
    (ty(E::IntrusionSet), ty(E::AttackPattern), &[C::Uses]),
    (ty(E::IntrusionSet), ty(E::Individual), &[C::Targets]),
    (ty(E::IntrusionSet), ty(E::Organization), &[C::Targets]),
    (ty(E::IntrusionSet), ty(E::Sector), &[C::Targets]),
    (ty(E::IntrusionSet), ty(E::System), &[C::Targets]),
    (ty(E::IntrusionSet), ty(E::Infrastructure), &[C::Compromises, C::Hosts, C::Owns, C::Uses]),
    (ty(E::IntrusionSet), ty(E::City), &[C::OriginatesFrom, C::Targets]),
    (ty(E::IntrusionSet), ty(E::Country), &[C::OriginatesFrom, C::Targets]),
    (ty(E::IntrusionSet), ty(E::Position), &[C::OriginatesFrom, C::Targets]),
    (ty(E::IntrusionSet), ty(E::Region), &[C::OriginatesFrom, C::Targets]),
    (ty(E::IntrusionSet), ty(E::Malware), &[C::Uses]),
    (ty(E::IntrusionSet), ty(E::ThreatActor), &[C::AttributedTo]),
    (ty(E::IntrusionSet), ty(E::Tool), &[C::Uses]),
    (ty(E::IntrusionSet), ty(E::Vulnerability), &[C::Targets]),
    (ty(E::IntrusionSet), ty(E::StixFile), &[C::Uses]),
    (ty(E::City), ty(E::Country), &[C::LocatedAt]),
    (ty(E::City), ty(E::Region), &[C::LocatedAt]),
    (ty(E::Country), ty(E::Region), &[C::LocatedAt]),
    (ty(E::Position), ty(E::City), &[C::LocatedAt]),
    (ty(E::Region), ty(E::Region), &[C::LocatedAt]),
    (ty(E::Malware), ty(E::DomainName), &[C::CommunicatesWith]),
    (ty(E::Malware), ty(E::StixFile), &[C::Downloads, C::Drops]),
    (ty(E::Malware), ty(E::IPv4Addr), &[C::CommunicatesWith]),
    (ty(E::Malware), ty(E::IPv6Addr), &[C::CommunicatesWith]),
    (ty(E::Malware), ty(E::AttackPattern), &[C::Uses]),
    (ty(E::Malware), ty(E::Individual), &[C::Targets]),
    (ty(E::Malware), ty(E::Organization), &[C::Targets]),
    (ty(E::Malware), ty(E::Sector), &[C::Targets]),
    (ty(E::Malware), ty(E::System), &[C::Targets]),
    (ty(E::Malware), ty(E::Infrastructure), &[C::BeaconsTo, C::ExfiltratesTo, C::Targets, C::Uses]),
    (ty(E::Malware), ty(E::IntrusionSet), &[C::AuthoredBy]),
    (ty(E::Malware), ty(E::City), &[C::OriginatesFrom, C::Targets]),
    (ty(E::Malware), ty(E::Country), &[C::OriginatesFrom, C::Targets]),
    (ty(E::Malware), ty(E::Position), &[C::OriginatesFrom, C::Targets]),
    (ty(E::Malware), ty(E::Region), &[C::OriginatesFrom, C::Targets]),
    (ty(E::Malware), ty(E::Malware), &[C::Controls, C::Downloads, C::Drops, C::Uses, C::VariantOf]),
    (ty(E::Malware), ty(E::ThreatActor), &[C::AuthoredBy]),
    (ty(E::Malware), ty(E::Tool), &[C::Downloads, C::Drops, C::Uses]),
    (ty(E::Malware), ty(E::Vulnerability), &[C::Exploits, C::Targets]),
    (ty(E::Malware), ty(E::Url), &[C::CommunicatesWith]),
    (ty(E::ThreatActor), ty(E::AttackPattern), &[C::Uses]),
    (ty(E::ThreatActor), ty(E::Campaign), &[C::ParticipatesIn]),
    (ty(E::ThreatActor), ty(E::Individual), &[C::AttributedTo, C::Impersonates, C::Targets]),
    (ty(E::ThreatActor), ty(E::Organization), &[C::AttributedTo, C::Impersonates, C::Targets]),
    (ty(E::ThreatActor), ty(E::Sector), &[C::Targets]),
    (ty(E::ThreatActor), ty(E::Infrastructure), &[C::Compromises, C::Hosts, C::Owns, C::Uses]),
    (ty(E::ThreatActor), ty(E::City), &[C::LocatedAt, C::Targets]),
    (ty(E::ThreatActor), ty(E::Country), &[C::LocatedAt, C::Targets]),
    (ty(E::ThreatActor), ty(E::Position), &[C::LocatedAt, C::Targets]),
    (ty(E::ThreatActor), ty(E::Region), &[C::LocatedAt, C::Targets]),
    (ty(E::ThreatActor), ty(E::Malware), &[C::Uses]),
    (ty(E::ThreatActor), ty(E::ThreatActor), &[C::PartOf, C::CooperatesWith]),
    (ty(E::ThreatActor), ty(E::Tool), &[C::Uses]),
    (ty(E::ThreatActor), ty(E::Vulnerability), &[C::Targets]),
    (ty(E::ThreatActor), ty(E::StixFile), &[C::Uses]),
    (ty(E::Tool), ty(E::Individual), &[C::Targets]),
    (ty(E::Tool), ty(E::Organization), &[C::Targets]),
    (ty(E::Tool), ty(E::Sector), &[C::Targets]),
    (ty(E::Tool), ty(E::AttackPattern), &[C::Uses, C::Delivers, C::Drops]),
    (ty(E::Tool), ty(E::Infrastructure), &[C::Targets, C::Uses]),
    (ty(E::Tool), ty(E::City), &[C::Targets]),
    (ty(E::Tool), ty(E::Country), &[C::Targets]),
    (ty(E::Tool), ty(E::Position), &[C::Targets]),
    (ty(E::Tool), ty(E::Region), &[C::Targets]),
    (ty(E::Tool), ty(E::Malware), &[C::Delivers, C::Drops]),
    (ty(E::Tool), ty(E::Vulnerability), &[C::Has, C::Targets]),
    (ty(E::Hostname), ty(E::Artifact), &[C::Drops]),
    (ty(E::Hostname), ty(E::AttackPattern), &[C::Uses]),
    (ty(E::Hostname), ty(E::DomainName), &[C::CommunicatesWith]),
    (ty(E::Hostname), ty(E::IPv4Addr), &[C::CommunicatesWith]),
    (ty(E::Hostname), ty(E::IPv6Addr), &[C::CommunicatesWith]),
    (ty(E::Hostname), ty(E::StixFile), &[C::Drops]),

    // Observable edges carried as core relationships
    (ty(E::IPv4Addr), ty(E::MacAddr), &[C::ResolvesTo]),
    (ty(E::IPv6Addr), ty(E::MacAddr), &[C::ResolvesTo]),
    (ty(E::DomainName), ty(E::DomainName), &[C::ResolvesTo]),
    (ty(E::DomainName), ty(E::IPv4Addr), &[C::ResolvesTo]),
    (ty(E::DomainName), ty(E::IPv6Addr), &[C::ResolvesTo]),
    (ty(E::IPv4Addr), ty(E::AutonomousSystem), &[C::BelongsTo]),
    (ty(E::IPv6Addr), ty(E::AutonomousSystem), &[C::BelongsTo]),
    (ty(E::StixFile), ty(E::StixFile), &[C::Drops, C::Downloads]),
    (ty(E::StixFile), ty(E::IPv4Addr), &[C::CommunicatesWith]),
    (ty(E::StixFile), ty(E::IPv6Addr), &[C::CommunicatesWith]),
    (ty(E::StixFile), ty(E::DomainName), &[C::CommunicatesWith]),
    (ty(E::Artifact), ty(E::IPv4Addr), &[C::CommunicatesWith]),
    (ty(E::Artifact), ty(E::IPv6Addr), &[C::CommunicatesWith]),
    (ty(E::Artifact), ty(E::DomainName), &[C::CommunicatesWith]),
    (ty(E::StixFile), ty(E::Vulnerability), &[C::Targets]),
    (ty(E::Software), ty(E::Vulnerability), &[C::Has]),

    // Relationships used as endpoints
    (ty(E::Indicator), rel(C::Uses), &[C::Indicates]),
    (rel(C::Targets), ty(E::Region), &[C::LocatedAt]),
    (rel(C::Targets), ty(E::Country), &[C::LocatedAt]),
    (rel(C::Targets), ty(E::City), &[C::LocatedAt]),
    (rel(C::Targets), ty(E::Position), &[C::LocatedAt]),
];

#[rustfmt::skip]
static OBSERVABLE_RELATIONSHIPS: &[ObservableEntry] = &[
    (E::Directory, E::Directory, &[O::Contains]),
    (E::Directory, E::StixFile, &[O::Contains]),
    (E::DomainName, E::DomainName, &[O::ResolvesTo]),
    (E::DomainName, E::IPv4Addr, &[O::ResolvesTo]),
    (E::DomainName, E::IPv6Addr, &[O::ResolvesTo]),
    (E::EmailMessage, E::EmailAddr, &[O::From, O::Sender, O::To, O::Cc, O::Bcc]),
    (E::EmailAddr, E::UserAccount, &[O::BelongsTo]),
    (E::EmailMimePartType, E::EmailMessage, &[O::BodyMultipart]),
    (E::Artifact, E::EmailMessage, &[O::RawEmail]),
    (E::Artifact, E::EmailMimePartType, &[O::BodyRaw]),
    (E::Artifact, E::StixFile, &[O::Content]),
    (E::Malware, E::Artifact, &[O::Sample]),
    (E::Malware, E::StixFile, &[O::Sample]),
    (E::StixFile, E::StixCyberObservable, &[O::Contains]),
    (E::StixFile, E::Directory, &[O::ParentDirectory]),
    (E::StixFile, E::EmailMimePartType, &[O::BodyRaw]),
    (E::StixFile, E::Artifact, &[O::Contains]),
    (E::StixFile, E::Process, &[O::Image]),
    (E::IPv4Addr, E::AutonomousSystem, &[O::BelongsTo]),
    (E::IPv4Addr, E::MacAddr, &[O::ResolvesTo]),
    (E::IPv6Addr, E::AutonomousSystem, &[O::BelongsTo]),
    (E::IPv6Addr, E::MacAddr, &[O::ResolvesTo]),
    (E::NetworkTraffic, E::Artifact, &[O::SrcPayload, O::DstPayload]),
    (E::NetworkTraffic, E::DomainName, &[O::Src, O::Dst]),
    (E::NetworkTraffic, E::IPv4Addr, &[O::Src, O::Dst]),
    (E::NetworkTraffic, E::IPv6Addr, &[O::Src, O::Dst]),
    (E::NetworkTraffic, E::MacAddr, &[O::Src, O::Dst]),
    (E::NetworkTraffic, E::NetworkTraffic, &[O::Encapsulates, O::EncapsulatedBy]),
    (E::Process, E::NetworkTraffic, &[O::OpenedConnection]),
    (E::Process, E::Process, &[O::Parent, O::Child]),
    (E::Malware, E::Software, &[O::OperatingSystem]),
    (E::ObservedData, E::StixFile, &[O::Content]),
    (E::UserAccount, E::Process, &[O::CreatorUser]),
    (E::UserAccount, E::WindowsRegistryKey, &[O::CreatorUser]),
    (E::WindowsRegistryKey, E::WindowsRegistryValueType, &[O::Values]),
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_pair_key_display() {
        let key: PairKey<Endpoint> = PairKey::new(E::Malware, C::Uses);
        assert_eq!(key.to_string(), "Malware_uses");

        let key: PairKey<EntityType> = PairKey::new(E::IPv4Addr, E::MacAddr);
        assert_eq!(key.to_string(), "IPv4-Addr_Mac-Addr");
    }

    #[test]
    fn test_pair_key_is_ordered() {
        let ab: PairKey<EntityType> = PairKey::new(E::Malware, E::Tool);
        let ba: PairKey<EntityType> = PairKey::new(E::Tool, E::Malware);
        assert_ne!(ab, ba);
    }

    #[test]
    fn test_from_entries_merges_duplicates() {
        let table: ObservableRelationshipTable = RelationshipTable::from_entries(vec![
            (PairKey::new(E::Process, E::Process), vec![O::Parent]),
            (PairKey::new(E::Process, E::Process), vec![O::Child, O::Parent]),
            (PairKey::new(E::Directory, E::Directory), vec![O::Contains, O::Contains]),
        ]);

        assert_eq!(table.len(), 2);
        assert_eq!(
            table.get(&PairKey::new(E::Process, E::Process)),
            Some(&[O::Parent, O::Child][..])
        );
        assert_eq!(
            table.get(&PairKey::new(E::Directory, E::Directory)),
            Some(&[O::Contains][..])
        );
    }

    #[test]
    fn test_from_entries_drops_empty_sets() {
        let table: ObservableRelationshipTable = RelationshipTable::from_entries(vec![
            (PairKey::new(E::Process, E::Process), vec![]),
            (PairKey::new(E::Directory, E::Directory), vec![O::Contains]),
        ]);

        assert_eq!(table.len(), 1);
        assert!(!table.contains_key(&PairKey::new(E::Process, E::Process)));
    }

    #[test]
    fn test_iteration_keeps_declaration_order() {
        let table = observable_relationships();
        let first = table.iter().next().map(|(k, _)| *k);
        assert_eq!(first, Some(PairKey::new(E::Directory, E::Directory)));

        let keys: Vec<_> = table.iter().map(|(k, _)| *k).collect();
        let expected: Vec<PairKey<EntityType>> = OBSERVABLE_RELATIONSHIPS
            .iter()
            .map(|(f, t, _)| PairKey::new(*f, *t))
            .collect();
        assert_eq!(keys, expected);
    }

    #[test]
    fn test_authored_data_has_no_duplicate_keys() {
        let mut seen = HashSet::new();
        for (from, to, _) in CORE_RELATIONSHIPS {
            assert!(seen.insert((*from, *to)), "duplicate core key {}_{}", from, to);
        }

        let mut seen = HashSet::new();
        for (from, to, _) in OBSERVABLE_RELATIONSHIPS {
            assert!(seen.insert((*from, *to)), "duplicate observable key {}_{}", from, to);
        }
    }

    #[test]
    fn test_built_tables_have_no_empty_sets() {
        assert_eq!(core_relationships().len(), CORE_RELATIONSHIPS.len());
        assert_eq!(observable_relationships().len(), OBSERVABLE_RELATIONSHIPS.len());

        assert!(core_relationships().iter().all(|(_, rels)| !rels.is_empty()));
        assert!(observable_relationships().iter().all(|(_, rels)| !rels.is_empty()));
    }

    #[test]
    fn test_core_lookup() {
        let table = core_relationships();
        assert!(table.permits(&PairKey::new(E::AttackPattern, E::Malware), C::Delivers));
        assert!(table.permits(&PairKey::new(E::AttackPattern, E::Malware), C::Uses));
        assert!(!table.permits(&PairKey::new(E::AttackPattern, E::Malware), C::Targets));
        assert!(table.get(&PairKey::new(E::Vulnerability, E::Malware)).is_none());
    }

    #[test]
    fn test_synthetic_relationship_keys() {
        let table = core_relationships();
        assert!(table.permits(&PairKey::new(ty(E::Indicator), rel(C::Uses)), C::Indicates));
        assert!(table.permits(&PairKey::new(rel(C::Targets), ty(E::Region)), C::LocatedAt));
        assert!(!table.contains_key(&PairKey::new(rel(C::Uses), ty(E::Region))));
    }
}
