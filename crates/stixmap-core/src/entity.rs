//! Entity (node) type vocabulary

use crate::error::Error;
use serde::{Deserialize, Serialize};

vocabulary! {
    /// STIX entity type names understood by the compatibility tables
    pub enum EntityType (Error::UnknownType) {
        // Domain objects
        AttackPattern => "Attack-Pattern",
        Campaign => "Campaign",
        CourseOfAction => "Course-Of-Action",
        Incident => "Incident",
        Indicator => "Indicator",
        Infrastructure => "Infrastructure",
        IntrusionSet => "Intrusion-Set",
        Malware => "Malware",
        ThreatActor => "Threat-Actor",
        Tool => "Tool",
        Vulnerability => "Vulnerability",

        // Containers
        ObservedData => "Observed-Data",
        Report => "Report",
        Note => "Note",
        Opinion => "Opinion",
        /// Request-for-takedown case
        CaseRft => "Case-Rft",

        // Identities
        Individual => "Individual",
        Organization => "Organization",
        Sector => "Sector",
        System => "System",

        // Locations
        City => "City",
        Country => "Country",
        Position => "Position",
        Region => "Region",

        // Cyber observables
        Artifact => "Artifact",
        AutonomousSystem => "Autonomous-System",
        Directory => "Directory",
        DomainName => "Domain-Name",
        EmailAddr => "Email-Addr",
        EmailMessage => "Email-Message",
        EmailMimePartType => "Email-Mime-Part-Type",
        StixFile => "StixFile",
        Hostname => "Hostname",
        IPv4Addr => "IPv4-Addr",
        IPv6Addr => "IPv6-Addr",
        MacAddr => "Mac-Addr",
        Mutex => "Mutex",
        NetworkTraffic => "Network-Traffic",
        Process => "Process",
        Software => "Software",
        Url => "Url",
        UserAccount => "User-Account",
        WindowsRegistryKey => "Windows-Registry-Key",
        WindowsRegistryValueType => "Windows-Registry-Value-Type",
        X509Certificate => "X509-Certificate",
        Text => "Text",
        UserAgent => "User-Agent",
        CryptographicKey => "Cryptographic-Key",
        CryptocurrencyWallet => "Cryptocurrency-Wallet",

        /// Wildcard standing for any concrete cyber observable. Only meaningful
        /// as a table key.
        StixCyberObservable => "Stix-Cyber-Observable",
    }
}

/// Disjoint partitions of the entity vocabulary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TypeCategory {
    DomainObject,
    Container,
    Identity,
    Location,
    CyberObservable,
    AbstractObservable,
}

impl EntityType {
    /// Partition this type belongs to
    pub const fn category(&self) -> TypeCategory {
        use EntityType::*;
        match self {
            AttackPattern | Campaign | CourseOfAction | Incident | Indicator | Infrastructure
            | IntrusionSet | Malware | ThreatActor | Tool | Vulnerability => {
                TypeCategory::DomainObject
            }
            ObservedData | Report | Note | Opinion | CaseRft => TypeCategory::Container,
            Individual | Organization | Sector | System => TypeCategory::Identity,
            City | Country | Position | Region => TypeCategory::Location,
            StixCyberObservable => TypeCategory::AbstractObservable,
            _ => TypeCategory::CyberObservable,
        }
    }

    /// True for concrete cyber-observable types (not the abstract supertype)
    pub const fn is_observable(&self) -> bool {
        matches!(self.category(), TypeCategory::CyberObservable)
    }

    /// True for the abstract observable wildcard
    pub const fn is_abstract_observable(&self) -> bool {
        matches!(self, EntityType::StixCyberObservable)
    }

    /// All types in a category, in vocabulary order
    pub fn of_category(category: TypeCategory) -> impl Iterator<Item = EntityType> {
        Self::ALL
            .iter()
            .copied()
            .filter(move |t| t.category() == category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_type() {
        assert_eq!("IPv4-Addr".parse::<EntityType>(), Ok(EntityType::IPv4Addr));
        assert_eq!("Case-Rft".parse::<EntityType>(), Ok(EntityType::CaseRft));
        assert_eq!(EntityType::StixFile.to_string(), "StixFile");
    }

    #[test]
    fn test_parse_unknown_type() {
        let err = "Spaceship".parse::<EntityType>().unwrap_err();
        assert_eq!(err, Error::UnknownType("Spaceship".to_string()));

        // Names are case-sensitive
        assert!("malware".parse::<EntityType>().is_err());
    }

    #[test]
    fn test_names_round_trip() {
        for t in EntityType::ALL {
            assert_eq!(t.as_str().parse::<EntityType>().unwrap(), *t);
        }
    }

    #[test]
    fn test_observable_predicates() {
        assert!(EntityType::IPv4Addr.is_observable());
        assert!(EntityType::StixFile.is_observable());
        assert!(!EntityType::Malware.is_observable());
        assert!(!EntityType::City.is_observable());

        // The wildcard is not itself a concrete observable
        assert!(!EntityType::StixCyberObservable.is_observable());
        assert!(EntityType::StixCyberObservable.is_abstract_observable());
        assert!(!EntityType::Url.is_abstract_observable());
    }

    #[test]
    fn test_categories() {
        assert_eq!(EntityType::Sector.category(), TypeCategory::Identity);
        assert_eq!(EntityType::Position.category(), TypeCategory::Location);
        assert_eq!(EntityType::Report.category(), TypeCategory::Container);
        assert_eq!(EntityType::of_category(TypeCategory::Location).count(), 4);
        assert_eq!(EntityType::of_category(TypeCategory::AbstractObservable).count(), 1);
    }

    #[test]
    fn test_serde_uses_stix_names() {
        let json = serde_json::to_string(&EntityType::WindowsRegistryKey).unwrap();
        assert_eq!(json, "\"Windows-Registry-Key\"");

        let parsed: EntityType = serde_json::from_str("\"Intrusion-Set\"").unwrap();
        assert_eq!(parsed, EntityType::IntrusionSet);
    }
}
