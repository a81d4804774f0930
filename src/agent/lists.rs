//! Bounded skill and metric lists.

use crate::agent::validation::{revalidate, validate_field, FieldKind, FieldStatus};
use crate::error::CardError;
use serde::{Serialize, Serializer};
use std::fmt;
use std::marker::PhantomData;

pub const MAX_SKILLS: usize = 5;
pub const MAX_METRICS: usize = 3;

/// Static description of a bounded list: which field rule its rows follow
/// and how many rows it may hold.
pub trait ListSpec {
    const KIND: FieldKind;
    const BOUND: usize;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Skills;

impl ListSpec for Skills {
    const KIND: FieldKind = FieldKind::Skill;
    const BOUND: usize = MAX_SKILLS;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Metrics;

impl ListSpec for Metrics {
    const KIND: FieldKind = FieldKind::Metric;
    const BOUND: usize = MAX_METRICS;
}

/// Ordered list of text rows that never exceeds `S::BOUND` entries.
#[derive(Clone, PartialEq, Eq)]
pub struct BoundedList<S: ListSpec> {
    items: Vec<String>,
    _spec: PhantomData<S>,
}

pub type SkillList = BoundedList<Skills>;
pub type MetricList = BoundedList<Metrics>;

impl<S: ListSpec> BoundedList<S> {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            _spec: PhantomData,
        }
    }

    /// Build a list from existing rows (e.g. read from a profile file).
    ///
    /// Only the capacity bound is enforced here. Row contents are left for
    /// the profile report to flag.
    pub fn with_items<I, T>(items: I) -> Result<Self, CardError>
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let items: Vec<String> = items.into_iter().map(Into::into).collect();
        if items.len() > S::BOUND {
            return Err(CardError::Capacity {
                list: S::KIND,
                bound: S::BOUND,
            });
        }
        Ok(Self {
            items,
            _spec: PhantomData,
        })
    }

    pub fn kind(&self) -> FieldKind {
        S::KIND
    }

    pub fn bound(&self) -> usize {
        S::BOUND
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= S::BOUND
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.items.get(index).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.items
    }

    /// Append a row. Rejected when the list is full or the text fails its
    /// field rule; the list is unchanged on error.
    pub fn add(&mut self, text: impl Into<String>) -> Result<(), CardError> {
        if self.is_full() {
            tracing::debug!(list = %S::KIND, bound = S::BOUND, "Add rejected: list is full");
            return Err(CardError::Capacity {
                list: S::KIND,
                bound: S::BOUND,
            });
        }
        let text = text.into();
        validate_field(S::KIND, &text).into_result()?;
        self.items.push(text);
        Ok(())
    }

    /// Replace the text of an existing row. The new text is stored even when
    /// it is invalid; the returned status says whether it passed.
    pub fn set(&mut self, index: usize, text: impl Into<String>) -> Result<FieldStatus, CardError> {
        let len = self.items.len();
        let slot = self.items.get_mut(index).ok_or(CardError::IndexOutOfRange {
            list: S::KIND,
            index,
            len,
        })?;
        *slot = text.into();
        Ok(revalidate(S::KIND, slot))
    }

    /// Remove the row at `index`, shifting later rows down by one.
    pub fn remove(&mut self, index: usize) -> Result<String, CardError> {
        if index >= self.items.len() {
            return Err(CardError::IndexOutOfRange {
                list: S::KIND,
                index,
                len: self.items.len(),
            });
        }
        Ok(self.items.remove(index))
    }
}

impl<S: ListSpec> Default for BoundedList<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: ListSpec> fmt::Debug for BoundedList<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundedList")
            .field("kind", &S::KIND)
            .field("items", &self.items)
            .finish()
    }
}

impl<S: ListSpec> Serialize for BoundedList<S> {
    fn serialize<Ser: Serializer>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error> {
        self.items.serialize(serializer)
    }
}

impl<'a, S: ListSpec> IntoIterator for &'a BoundedList<S> {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
