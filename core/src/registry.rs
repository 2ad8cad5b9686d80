//! Ordered registry of known URI schemes.
//!
//! Every registry starts with the ten [`BUILTIN_SCHEMES`] (ids `0..=9`).
//! Built-in records cannot be removed, renamed, or cleared away; custom
//! records can be appended, renamed, and removed. Values are unique under
//! case-insensitive comparison and lookups by value ignore case.
//!
//! # Examples
//!
//! ```
//! use uri_scheme_core::{SchemeError, SchemeRegistry};
//!
//! let mut registry = SchemeRegistry::new();
//! assert_eq!(registry.len(), 10);
//!
//! let git = registry.add("git").unwrap();
//! assert_eq!(git.id(), 10);
//! assert_eq!(registry.find_by_value("GIT").map(|r| r.id()), Some(10));
//!
//! assert!(matches!(registry.add("Git"), Err(SchemeError::DuplicateScheme(_))));
//! assert!(matches!(registry.remove(0), Err(SchemeError::ProtectedRecord(_))));
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, SchemeError};
use crate::grammar::scheme_eq;

/// Built-in scheme values, in seeding order.
pub const BUILTIN_SCHEMES: [&str; 10] = [
    "http", "https", "file", "net.pipe", "net.tcp", "ftp", "nntp", "mailto", "news", "gopher",
];

/// A single registry entry.
///
/// Records are immutable once created; [`SchemeRegistry::rename`] replaces
/// the stored value but never the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemeRecord {
    id: u64,
    value: String,
    builtin: bool,
}

impl SchemeRecord {
    /// Registry-assigned identity.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Scheme text with its original casing.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Whether the record was seeded at registry construction.
    pub fn is_builtin(&self) -> bool {
        self.builtin
    }
}

/// Insertion-ordered collection of [`SchemeRecord`]s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemeRegistry {
    records: Vec<SchemeRecord>,
    next_id: u64,
}

impl Default for SchemeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemeRegistry {
    /// Creates a registry holding only the built-in records.
    pub fn new() -> Self {
        let mut registry = Self {
            records: Vec::with_capacity(BUILTIN_SCHEMES.len()),
            next_id: 0,
        };
        registry.seed_builtins();
        registry
    }

    fn seed_builtins(&mut self) {
        for scheme in BUILTIN_SCHEMES {
            self.push(scheme.to_string(), true);
        }
    }

    fn push(&mut self, value: String, builtin: bool) -> &SchemeRecord {
        let id = self.next_id;
        self.next_id += 1;
        self.records.push(SchemeRecord { id, value, builtin });
        &self.records[self.records.len() - 1]
    }

    fn position(&self, id: u64) -> Option<usize> {
        self.records.iter().position(|r| r.id == id)
    }

    /// Appends a custom record and returns it.
    ///
    /// Surrounding whitespace is stripped from `value`. No grammar check is
    /// applied; any unique non-empty value is accepted.
    ///
    /// # Errors
    ///
    /// [`SchemeError::EmptyScheme`] if `value` is blank, or
    /// [`SchemeError::DuplicateScheme`] if a record already has this value
    /// ignoring case.
    pub fn add(&mut self, value: &str) -> Result<SchemeRecord> {
        let value = value.trim();
        if value.is_empty() {
            return Err(SchemeError::EmptyScheme);
        }
        if let Some(existing) = self.find_by_value(value) {
            return Err(SchemeError::DuplicateScheme(existing.value.clone()));
        }
        let record = self.push(value.to_string(), false).clone();
        debug!(id = record.id, value = %record.value, "added custom scheme");
        Ok(record)
    }

    /// Removes a custom record and returns it.
    ///
    /// # Errors
    ///
    /// [`SchemeError::ProtectedRecord`] for built-in ids,
    /// [`SchemeError::UnknownSchemeId`] if no record has `id`.
    pub fn remove(&mut self, id: u64) -> Result<SchemeRecord> {
        let index = self.position(id).ok_or(SchemeError::UnknownSchemeId(id))?;
        if self.records[index].builtin {
            return Err(SchemeError::ProtectedRecord(format!(
                "cannot remove built-in scheme '{}'",
                self.records[index].value
            )));
        }
        let record = self.records.remove(index);
        debug!(id = record.id, value = %record.value, "removed custom scheme");
        Ok(record)
    }

    /// Replaces the value of a custom record, keeping its id.
    ///
    /// Renaming a record to a different casing of its own value is allowed.
    ///
    /// # Errors
    ///
    /// Same as [`add`](Self::add) and [`remove`](Self::remove).
    pub fn rename(&mut self, id: u64, value: &str) -> Result<SchemeRecord> {
        let index = self.position(id).ok_or(SchemeError::UnknownSchemeId(id))?;
        if self.records[index].builtin {
            return Err(SchemeError::ProtectedRecord(format!(
                "cannot edit built-in scheme '{}'",
                self.records[index].value
            )));
        }
        let value = value.trim();
        if value.is_empty() {
            return Err(SchemeError::EmptyScheme);
        }
        if let Some(existing) = self.find_by_value(value).filter(|r| r.id != id) {
            return Err(SchemeError::DuplicateScheme(existing.value.clone()));
        }
        let record = &mut self.records[index];
        debug!(id, from = %record.value, to = %value, "renamed custom scheme");
        record.value = value.to_string();
        Ok(record.clone())
    }

    /// Always fails: built-in records keep the registry non-empty.
    ///
    /// # Errors
    ///
    /// Always [`SchemeError::ProtectedRecord`]; the registry is unchanged.
    pub fn clear(&mut self) -> Result<()> {
        Err(SchemeError::ProtectedRecord(
            "cannot clear a registry holding built-in schemes".to_string(),
        ))
    }

    /// Looks up a record by id.
    pub fn find_by_id(&self, id: u64) -> Option<&SchemeRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Looks up a record whose value equals `text` ignoring case.
    ///
    /// `text` is compared as given; the empty string never matches.
    pub fn find_by_value(&self, text: &str) -> Option<&SchemeRecord> {
        self.records.iter().find(|r| scheme_eq(&r.value, text))
    }

    /// Returns `true` if a record matches `text` ignoring case.
    pub fn contains(&self, text: &str) -> bool {
        self.find_by_value(text).is_some()
    }

    /// All records in insertion order.
    pub fn all(&self) -> &[SchemeRecord] {
        &self.records
    }

    /// Iterates over all records in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, SchemeRecord> {
        self.records.iter()
    }

    /// The seeded records, in seeding order.
    pub fn builtins(&self) -> impl Iterator<Item = &SchemeRecord> {
        self.records.iter().filter(|r| r.builtin)
    }

    /// Number of records, built-ins included.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Always `false`; present for API symmetry with [`len`](Self::len).
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<'a> IntoIterator for &'a SchemeRegistry {
    type Item = &'a SchemeRecord;
    type IntoIter = std::slice::Iter<'a, SchemeRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
