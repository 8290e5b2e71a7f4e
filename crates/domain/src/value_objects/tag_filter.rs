//! Tag predicates used to filter map elements
//!
//! A [`TagGroup`] is a conjunction of key/value predicates. A [`TagFilterSet`]
//! is a disjunction of groups: an element matches the set if it matches any
//! group.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::DomainError;

/// A single `key=value` tag predicate
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "UncheckedPredicate")]
pub struct TagPredicate {
    key: String,
    value: String,
}

#[derive(Deserialize)]
struct UncheckedPredicate {
    key: String,
    value: String,
}

impl TryFrom<UncheckedPredicate> for TagPredicate {
    type Error = DomainError;

    fn try_from(raw: UncheckedPredicate) -> Result<Self, Self::Error> {
        Self::new(raw.key, raw.value)
    }
}

impl TagPredicate {
    /// Create a new predicate
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidTagPredicate` if key or value is blank.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Result<Self, DomainError> {
        let key = key.into();
        let value = value.into();
        if key.trim().is_empty() {
            return Err(DomainError::InvalidTagPredicate(
                "key must not be empty".to_string(),
            ));
        }
        if value.trim().is_empty() {
            return Err(DomainError::InvalidTagPredicate(format!(
                "value for '{key}' must not be empty"
            )));
        }
        Ok(Self { key, value })
    }

    /// Tag key
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Tag value
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    fn trusted(key: &str, value: &str) -> Self {
        Self {
            key: key.to_string(),
            value: value.to_string(),
        }
    }
}

impl fmt::Display for TagPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.key, self.value)
    }
}

/// Predicates that must all hold for one element (logical AND)
///
/// Declaration order is kept and the same key may appear more than once.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<TagPredicate>", into = "Vec<TagPredicate>")]
pub struct TagGroup(Vec<TagPredicate>);

impl TryFrom<Vec<TagPredicate>> for TagGroup {
    type Error = DomainError;

    fn try_from(predicates: Vec<TagPredicate>) -> Result<Self, Self::Error> {
        Self::new(predicates)
    }
}

impl From<TagGroup> for Vec<TagPredicate> {
    fn from(group: TagGroup) -> Self {
        group.0
    }
}

impl TagGroup {
    /// Create a group from its predicates
    ///
    /// # Errors
    ///
    /// Returns `DomainError::EmptyTagFilter` if `predicates` is empty.
    pub fn new(predicates: Vec<TagPredicate>) -> Result<Self, DomainError> {
        if predicates.is_empty() {
            return Err(DomainError::EmptyTagFilter(
                "a tag group needs at least one predicate".to_string(),
            ));
        }
        Ok(Self(predicates))
    }

    /// Predicates in declaration order
    #[must_use]
    pub fn predicates(&self) -> &[TagPredicate] {
        &self.0
    }
}

/// Alternative predicate groups (logical OR between groups)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<TagGroup>", into = "Vec<TagGroup>")]
pub struct TagFilterSet(Vec<TagGroup>);

impl TryFrom<Vec<TagGroup>> for TagFilterSet {
    type Error = DomainError;

    fn try_from(groups: Vec<TagGroup>) -> Result<Self, Self::Error> {
        Self::new(groups)
    }
}

impl From<TagFilterSet> for Vec<TagGroup> {
    fn from(set: TagFilterSet) -> Self {
        set.0
    }
}

impl TagFilterSet {
    /// Create a filter set from its groups
    ///
    /// # Errors
    ///
    /// Returns `DomainError::EmptyTagFilter` if `groups` is empty.
    pub fn new(groups: Vec<TagGroup>) -> Result<Self, DomainError> {
        if groups.is_empty() {
            return Err(DomainError::EmptyTagFilter(
                "a filter set needs at least one group".to_string(),
            ));
        }
        Ok(Self(groups))
    }

    /// A filter set made of a single AND-group
    #[must_use]
    pub fn single(group: TagGroup) -> Self {
        Self(vec![group])
    }

    /// Build a single-group filter set from `key=value` pairs
    ///
    /// # Errors
    ///
    /// Returns an error if the list is empty or any pair is blank.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Result<Self, DomainError>
    where
        K: Into<String>,
        V: Into<String>,
    {
        let predicates = pairs
            .into_iter()
            .map(|(k, v)| TagPredicate::new(k, v))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::single(TagGroup::new(predicates)?))
    }

    /// Catholic places of worship and church buildings
    #[must_use]
    pub fn catholic_churches() -> Self {
        Self(vec![
            TagGroup(vec![
                TagPredicate::trusted("amenity", "place_of_worship"),
                TagPredicate::trusted("religion", "christian"),
                TagPredicate::trusted("denomination", "catholic"),
            ]),
            TagGroup(vec![
                TagPredicate::trusted("building", "church"),
                TagPredicate::trusted("denomination", "catholic"),
            ]),
        ])
    }

    /// Groups in declaration order
    #[must_use]
    pub fn groups(&self) -> &[TagGroup] {
        &self.0
    }
}

impl Default for TagFilterSet {
    fn default() -> Self {
        Self::catholic_churches()
    }
}
