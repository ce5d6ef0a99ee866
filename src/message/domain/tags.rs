//! Free-form message tags and the set that holds them.
//!
//! Tags are case-sensitive labels. A [`TagSet`] never holds duplicates and
//! iterates in lexical order, which keeps persisted arrays stable.

use super::MessageDomainError;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::collections::BTreeSet;
use std::fmt;

/// A single non-blank tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Tag(String);

impl Tag {
    /// Creates a validated tag.
    ///
    /// # Errors
    ///
    /// Returns [`MessageDomainError::EmptyTag`] when the value is empty after
    /// trimming.
    pub fn new(value: impl Into<String>) -> Result<Self, MessageDomainError> {
        let raw = value.into();
        if raw.trim().is_empty() {
            return Err(MessageDomainError::EmptyTag);
        }
        Ok(Self(raw))
    }

    /// Returns the tag as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Tag {
    type Error = MessageDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Tag> for String {
    fn from(value: Tag) -> Self {
        value.0
    }
}

impl AsRef<str> for Tag {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl Borrow<str> for Tag {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Deduplicated set of tags attached to a message.
///
/// # Examples
///
/// ```
/// use colloquy::message::domain::TagSet;
///
/// let tags = TagSet::parse(["social", "leader", "social"]).expect("valid tags");
/// assert_eq!(tags.len(), 2);
/// assert!(tags.contains("social"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagSet(BTreeSet<Tag>);

impl TagSet {
    /// Creates an empty tag set.
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeSet::new())
    }

    /// Builds a tag set from raw strings, collapsing duplicates.
    ///
    /// # Errors
    ///
    /// Returns [`MessageDomainError::EmptyTag`] if any value is blank. No
    /// partial set is produced.
    pub fn parse<I, S>(values: I) -> Result<Self, MessageDomainError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        values
            .into_iter()
            .map(Tag::new)
            .collect::<Result<BTreeSet<_>, _>>()
            .map(Self)
    }

    /// Returns `true` when the set contains `tag`.
    #[must_use]
    pub fn contains(&self, tag: &str) -> bool {
        self.0.contains(tag)
    }

    /// Returns `true` when at least one tag is shared with `other`.
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        !self.0.is_disjoint(&other.0)
    }

    /// Adds every tag of `other` to this set.
    pub fn extend_from(&mut self, other: &Self) {
        self.0.extend(other.0.iter().cloned());
    }

    /// Returns the number of tags.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the set holds no tags.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the tags in lexical order.
    pub fn iter(&self) -> impl Iterator<Item = &Tag> {
        self.0.iter()
    }

    /// Returns the tags as owned strings in lexical order.
    #[must_use]
    pub fn to_strings(&self) -> Vec<String> {
        self.0.iter().map(|tag| tag.as_str().to_owned()).collect()
    }
}

impl FromIterator<Tag> for TagSet {
    fn from_iter<T: IntoIterator<Item = Tag>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a TagSet {
    type Item = &'a Tag;
    type IntoIter = std::collections::btree_set::Iter<'a, Tag>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
