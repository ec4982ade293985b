//! Content record store
//!
//! Turns raw entries into records keyed by slug. Loading is a pure
//! transform: the same entries always yield the same records in the same
//! order, and two entries resolving to one slug abort the load.

use indexmap::map::Entry;
use indexmap::IndexMap;

use super::fallback::DEFAULT_EXCERPT_LENGTH;
use super::slug::derive_slug;
use super::{ContentRecord, RawContent};
use crate::error::ContentError;

/// Records in load order, unique by slug
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContentStore {
    records: IndexMap<String, ContentRecord>,
}

impl ContentStore {
    /// Build a store from raw entries
    pub fn load(entries: Vec<RawContent>, excerpt_length: usize) -> Result<Self, ContentError> {
        let mut records: IndexMap<String, ContentRecord> = IndexMap::with_capacity(entries.len());

        for raw in entries {
            let slug = derive_slug(&raw.path, raw.front_matter.slug.as_deref());
            if slug.is_empty() {
                return Err(ContentError::EmptySlug { path: raw.path });
            }

            match records.entry(slug) {
                Entry::Occupied(existing) => {
                    return Err(ContentError::DuplicateSlug {
                        slug: existing.key().clone(),
                        first: existing.get().source().to_string(),
                        second: raw.path,
                    });
                }
                Entry::Vacant(slot) => {
                    let slug = slot.key().clone();
                    slot.insert(ContentRecord::from_raw(raw, slug, excerpt_length));
                }
            }
        }

        Ok(Self { records })
    }

    /// Look up a record by slug
    pub fn get(&self, slug: &str) -> Option<&ContentRecord> {
        self.records.get(slug)
    }

    /// Records in load order
    pub fn records(&self) -> impl Iterator<Item = &ContentRecord> {
        self.records.values()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn into_records(self) -> Vec<ContentRecord> {
        self.records.into_values().collect()
    }
}

/// Load raw entries into records with the default excerpt length
pub fn load(entries: Vec<RawContent>) -> Result<Vec<ContentRecord>, ContentError> {
    ContentStore::load(entries, DEFAULT_EXCERPT_LENGTH).map(ContentStore::into_records)
}
