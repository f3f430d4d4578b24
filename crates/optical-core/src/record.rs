//! Traits shared by every stored record.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::clock::Clock;
use crate::repo::RepoResult;
use crate::CoreResult;

/// A record that lives in one collection of the store.
pub trait Record: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Collection name. Doubles as the storage kind and the list envelope key.
    const KIND: &'static str;
    /// Human label used in messages such as "Customer not found".
    const LABEL: &'static str;

    /// Canonical string form of this record's id.
    fn key(&self) -> String;

    /// Turn a raw path segment into a canonical key, or `None` if it can
    /// never match a record of this kind.
    fn normalize_key(raw: &str) -> Option<String> {
        Some(raw.to_string())
    }

    /// The single field searched by `?search=`.
    fn search_text(&self) -> &str;

    /// Counter value embedded in the id, if the id is counter-derived.
    fn sequence(&self) -> Option<u64> {
        None
    }
}

/// A record clients can create, patch and delete.
pub trait Resource: Record {
    /// Creation payload.
    type Input: DeserializeOwned + Send + 'static;
    /// Allow-list of patchable fields.
    type Patch: DeserializeOwned + Send + Sync + 'static;

    /// Validate `input` and build the record. Validation happens before any id
    /// is drawn so rejected payloads leave the counters untouched.
    fn create(input: Self::Input, ctx: &CreateContext<'_>) -> CoreResult<Self>;

    /// Reject patches that would leave the record invalid.
    fn validate_patch(_patch: &Self::Patch) -> CoreResult<()> {
        Ok(())
    }

    /// Apply a validated patch and stamp `updated_at`.
    fn apply_patch(&mut self, patch: &Self::Patch, now: DateTime<Utc>);
}

/// Id and timestamp source handed to [`Resource::create`].
pub struct CreateContext<'a> {
    /// Creation instant; used for both `created_at` and `updated_at`.
    pub now: DateTime<Utc>,
    clock: &'a Clock,
    sequence: &'a dyn Fn() -> RepoResult<u64>,
}

impl<'a> CreateContext<'a> {
    pub fn new(
        now: DateTime<Utc>,
        clock: &'a Clock,
        sequence: &'a dyn Fn() -> RepoResult<u64>,
    ) -> Self {
        Self {
            now,
            clock,
            sequence,
        }
    }

    /// Draw the next value of the collection's counter.
    pub fn next_sequence(&self) -> CoreResult<u64> {
        Ok((self.sequence)()?)
    }

    /// Timestamp-derived id such as `INV-1718000000123456`.
    pub fn stamped_id(&self, prefix: &str) -> String {
        self.clock.stamped_id(prefix)
    }
}

/// Key normalization for numeric ids: `"007"` finds record 7, `"abc"` finds nothing.
pub fn numeric_key(raw: &str) -> Option<String> {
    raw.trim().parse::<u64>().ok().map(|n| n.to_string())
}

/// Counter value of ids like `PAT003`.
pub fn prefixed_sequence(id: &str, prefix: &str) -> Option<u64> {
    id.strip_prefix(prefix)?.parse().ok()
}

/// Format a counter value as `PAT003`.
pub fn prefixed_id(prefix: &str, sequence: u64) -> String {
    format!("{}{:03}", prefix, sequence)
}
