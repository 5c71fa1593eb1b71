//! STIX identifiers and transient-id retention
//!
//! A STIX id is `<namespace>--<uuid>`. Ids whose UUID is version 1 are
//! time-ordered ("transient"): they are minted per ingestion and carry their
//! creation time. Every other version is stable.

use crate::error::{Error, Result};
use crate::limits::MAX_TRANSIENT_STIX_IDS;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

/// Separator between namespace and UUID in a STIX id
pub const STIX_ID_SEPARATOR: &str = "--";

/// UUID version marking a time-ordered id
const TIME_ORDERED_VERSION: usize = 1;

/// Versions defined by RFC 4122
const RFC_VERSIONS: std::ops::RangeInclusive<usize> = 1..=5;

/// 100ns intervals between 1582-10-15 (UUID epoch) and 1970-01-01
const GREGORIAN_TO_UNIX_TICKS: i64 = 0x01B2_1DD2_1381_4000;
const TICKS_PER_SECOND: i64 = 10_000_000;

/// Stable or transient classification of an id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum StixIdKind {
    Stable,
    /// `ticks` is the 60-bit UUID timestamp (100ns since 1582-10-15)
    Transient { ticks: u64 },
}

/// A parsed STIX identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StixId {
    raw: String,
    separator_at: usize,
    uuid: Uuid,
    kind: StixIdKind,
}

impl StixId {
    /// Parse and classify an identifier
    pub fn parse(id: &str) -> Result<Self> {
        let (namespace, payload) = id
            .split_once(STIX_ID_SEPARATOR)
            .ok_or_else(|| Error::malformed(id, "missing '--' separator"))?;
        if namespace.is_empty() {
            return Err(Error::malformed(id, "empty namespace"));
        }

        if !is_hyphenated(payload) {
            return Err(Error::malformed(id, "uuid is not in hyphenated form"));
        }
        let uuid = Uuid::parse_str(payload)
            .map_err(|e| Error::malformed(id, format!("invalid uuid: {}", e)))?;
        if !RFC_VERSIONS.contains(&uuid.get_version_num()) {
            return Err(Error::malformed(
                id,
                format!("unsupported uuid version {}", uuid.get_version_num()),
            ));
        }

        let kind = if uuid.get_version_num() == TIME_ORDERED_VERSION {
            StixIdKind::Transient {
                ticks: gregorian_ticks(&uuid),
            }
        } else {
            StixIdKind::Stable
        };

        Ok(Self {
            raw: id.to_string(),
            separator_at: namespace.len(),
            uuid,
            kind,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Object type part, e.g. `indicator`
    pub fn namespace(&self) -> &str {
        &self.raw[..self.separator_at]
    }

    pub fn uuid(&self) -> Uuid {
        self.uuid
    }

    pub fn kind(&self) -> StixIdKind {
        self.kind
    }

    pub fn is_transient(&self) -> bool {
        matches!(self.kind, StixIdKind::Transient { .. })
    }

    /// Creation time of a transient id
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        match self.kind {
            StixIdKind::Transient { ticks } => {
                let since_unix = ticks as i64 - GREGORIAN_TO_UNIX_TICKS;
                let secs = since_unix.div_euclid(TICKS_PER_SECOND);
                let nanos = (since_unix.rem_euclid(TICKS_PER_SECOND) * 100) as u32;
                DateTime::from_timestamp(secs, nanos)
            }
            StixIdKind::Stable => None,
        }
    }

    pub fn into_string(self) -> String {
        self.raw
    }
}

impl FromStr for StixId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl std::fmt::Display for StixId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.raw)
    }
}

/// `8-4-4-4-12` hex groups, nothing else
fn is_hyphenated(payload: &str) -> bool {
    payload.len() == 36
        && payload.bytes().enumerate().all(|(i, b)| match i {
            8 | 13 | 18 | 23 => b == b'-',
            _ => b.is_ascii_hexdigit(),
        })
}

/// Reassemble the 60-bit timestamp spread over the UUID's time fields
fn gregorian_ticks(uuid: &Uuid) -> u64 {
    let (time_low, time_mid, time_hi_and_version, _) = uuid.as_fields();
    (u64::from(time_hi_and_version & 0x0FFF) << 48)
        | (u64::from(time_mid) << 32)
        | u64::from(time_low)
}

/// Keep every stable id and at most `capacity` transient ids.
///
/// Output is the stable ids in input order followed by the retained transient
/// ids, most recent first. Transient ids with equal timestamps keep their
/// input order. Any malformed id fails the whole call.
pub fn clean_ids<I, S>(ids: I, capacity: usize) -> Result<Vec<String>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut stable = Vec::new();
    let mut transient = Vec::new();

    for id in ids {
        let parsed = StixId::parse(id.as_ref())?;
        match parsed.kind {
            StixIdKind::Stable => stable.push(parsed.raw),
            StixIdKind::Transient { ticks } => transient.push((ticks, parsed.raw)),
        }
    }

    transient.sort_by(|a, b| b.0.cmp(&a.0));
    if transient.len() > capacity {
        tracing::trace!(
            "Dropping {} transient ids beyond capacity {}",
            transient.len() - capacity,
            capacity
        );
        transient.truncate(capacity);
    }

    stable.extend(transient.into_iter().map(|(_, id)| id));
    Ok(stable)
}

/// [`clean_ids`] with the default retention of [`MAX_TRANSIENT_STIX_IDS`]
pub fn clean_stix_ids<I, S>(ids: I) -> Result<Vec<String>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    clean_ids(ids, MAX_TRANSIENT_STIX_IDS)
}

/// Only the stable ids, in input order
pub fn only_stable_ids<I, S>(ids: I) -> Result<Vec<String>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    ids.into_iter()
        .map(|id| StixId::parse(id.as_ref()))
        .filter(|parsed| !matches!(parsed, Ok(id) if id.is_transient()))
        .map(|parsed| parsed.map(StixId::into_string))
        .collect()
}
