//! A canonical container for non-overlapping, sorted annotations.
//!
//! [`AnnotationSet`] wraps a `Vec<Annotation<U>>` and guarantees the **canonical
//! invariant** at all times: annotations are sorted by start, none is
//! zero-length, and no two of them overlap or touch (touching spans are merged).
//!
//! Read access is transparent via `Deref<Target = [Annotation<U>]>`, so code
//! that consumes `&[Annotation<U>]` (including [`apply`](crate::operations::apply))
//! works without changes. Mutation goes through methods that re-establish the
//! invariant.

use std::collections::BTreeSet;
use std::fmt::Display;
use std::ops::{Deref, Index};

use qtty::{Quantity, Unit};

use super::annotation::Annotation;
use super::normalize::normalize;
use crate::operations::{apply, Operator};

/// A sorted, non-overlapping, non-touching set of closed annotations.
///
/// # Performance
///
/// - Construction from unsorted input: O(n log n) sort + O(n) merge.
/// - `push`: O(1) when appending in order, otherwise a full re-normalize.
/// - Set algebra: O(n + m) sweep followed by an O(k log k) re-normalize of
///   the k output fragments.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotationSet<U: Unit>(Vec<Annotation<U>>);

// ─────────────────────────────────────────────────────────────────────
// Constructors
// ─────────────────────────────────────────────────────────────────────

impl<U: Unit> AnnotationSet<U> {
    /// Creates an empty annotation set.
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self(Vec::with_capacity(capacity))
    }

    /// Wraps a `Vec` that is **already in canonical form** without re-sorting.
    ///
    /// In debug builds this asserts the invariant; in release builds the check
    /// is elided.
    pub fn from_sorted_unchecked(vec: Vec<Annotation<U>>) -> Self {
        debug_assert!(
            crate::operations::is_canonical(&vec),
            "AnnotationSet::from_sorted_unchecked called with non-canonical input"
        );
        Self(vec)
    }
}

// ─────────────────────────────────────────────────────────────────────
// Mutation methods
// ─────────────────────────────────────────────────────────────────────

impl<U: Unit> AnnotationSet<U> {
    fn renormalize(&mut self) {
        self.0 = normalize(std::mem::take(&mut self.0));
    }

    /// Inserts an annotation, maintaining canonical form.
    ///
    /// Zero-length annotations are ignored.
    pub fn push(&mut self, annotation: Annotation<U>) {
        if annotation.is_degenerate() {
            return;
        }

        // Fast path: the new span starts at or after the start of the last one.
        if let Some(last) = self.0.last_mut() {
            if annotation.start().value() > last.end().value() {
                self.0.push(annotation);
                return;
            }
            // Merging across labels is left to `normalize`.
            if annotation.start().value() >= last.start().value()
                && annotation.label() == last.label()
            {
                if annotation.end().value() > last.end().value() {
                    *last = Annotation::spanning(
                        last.label().to_owned(),
                        last.start(),
                        annotation.end(),
                    );
                }
                return;
            }
        } else {
            self.0.push(annotation);
            return;
        }

        self.0.push(annotation);
        self.renormalize();
    }

    /// Appends all annotations from a slice, then re-normalizes.
    pub fn extend_from_slice(&mut self, annotations: &[Annotation<U>]) {
        if annotations.is_empty() {
            return;
        }
        self.0.extend_from_slice(annotations);
        self.renormalize();
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Retains only the annotations for which the predicate returns `true`.
    ///
    /// Removal cannot break sortedness or create overlaps.
    pub fn retain<F: FnMut(&Annotation<U>) -> bool>(&mut self, f: F) {
        self.0.retain(f);
    }

    /// Consumes the set and returns the underlying `Vec`.
    pub fn into_inner(self) -> Vec<Annotation<U>> {
        self.0
    }

    pub fn as_slice(&self) -> &[Annotation<U>] {
        &self.0
    }

    /// Distinct labels carried by the set, in lexical order.
    pub fn labels(&self) -> Vec<&str> {
        self.0
            .iter()
            .map(Annotation::label)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Measure of the covered point set.
    pub fn total_length(&self) -> Quantity<U> {
        self.0
            .iter()
            .fold(Quantity::<U>::new(0.0), |acc, annotation| {
                acc + annotation.duration()
            })
    }
}

// ─────────────────────────────────────────────────────────────────────
// Set operations
// ─────────────────────────────────────────────────────────────────────

impl<U: Unit> AnnotationSet<U> {
    /// Combines `self` with `other` under `operator`, labelling the result
    /// with `label`.
    pub fn apply(
        &self,
        operator: Operator,
        label: impl Into<String>,
        other: &AnnotationSet<U>,
    ) -> AnnotationSet<U> {
        let fragments = apply(operator, label, &self.0, &other.0);
        Self(normalize(fragments))
    }

    /// Points in `self` or `other`.
    pub fn union(&self, other: &AnnotationSet<U>, label: impl Into<String>) -> AnnotationSet<U> {
        self.apply(Operator::Union, label, other)
    }

    /// Points in both `self` and `other`.
    pub fn intersection(
        &self,
        other: &AnnotationSet<U>,
        label: impl Into<String>,
    ) -> AnnotationSet<U> {
        self.apply(Operator::Intersection, label, other)
    }

    /// Points in `self` but not in `other`.
    pub fn difference(
        &self,
        other: &AnnotationSet<U>,
        label: impl Into<String>,
    ) -> AnnotationSet<U> {
        self.apply(Operator::Difference, label, other)
    }

    /// Points in exactly one of `self` and `other`.
    pub fn symmetric_difference(
        &self,
        other: &AnnotationSet<U>,
        label: impl Into<String>,
    ) -> AnnotationSet<U> {
        self.apply(Operator::SymmetricDifference, label, other)
    }
}

// ─────────────────────────────────────────────────────────────────────
// Transparent read access
// ─────────────────────────────────────────────────────────────────────

impl<U: Unit> Deref for AnnotationSet<U> {
    type Target = [Annotation<U>];

    fn deref(&self) -> &[Annotation<U>] {
        &self.0
    }
}

impl<U: Unit> AsRef<[Annotation<U>]> for AnnotationSet<U> {
    fn as_ref(&self) -> &[Annotation<U>] {
        &self.0
    }
}

impl<U: Unit> Index<usize> for AnnotationSet<U> {
    type Output = Annotation<U>;

    fn index(&self, index: usize) -> &Annotation<U> {
        &self.0[index]
    }
}

// ─────────────────────────────────────────────────────────────────────
// Conversions
// ─────────────────────────────────────────────────────────────────────

impl<U: Unit> From<Vec<Annotation<U>>> for AnnotationSet<U> {
    /// Creates an `AnnotationSet` from an arbitrary `Vec`, normalizing on construction.
    fn from(vec: Vec<Annotation<U>>) -> Self {
        Self(normalize(vec))
    }
}

impl<U: Unit> From<Annotation<U>> for AnnotationSet<U> {
    fn from(annotation: Annotation<U>) -> Self {
        Self(normalize([annotation]))
    }
}

impl<U: Unit> FromIterator<Annotation<U>> for AnnotationSet<U> {
    fn from_iter<I: IntoIterator<Item = Annotation<U>>>(iter: I) -> Self {
        Self(normalize(iter))
    }
}

impl<U: Unit> Extend<Annotation<U>> for AnnotationSet<U> {
    fn extend<I: IntoIterator<Item = Annotation<U>>>(&mut self, iter: I) {
        self.0.extend(iter);
        self.renormalize();
    }
}

impl<U: Unit> IntoIterator for AnnotationSet<U> {
    type Item = Annotation<U>;
    type IntoIter = std::vec::IntoIter<Annotation<U>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a, U: Unit> IntoIterator for &'a AnnotationSet<U> {
    type Item = &'a Annotation<U>;
    type IntoIter = std::slice::Iter<'a, Annotation<U>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

// ─────────────────────────────────────────────────────────────────────
// Trait impls
// ─────────────────────────────────────────────────────────────────────

impl<U: Unit> Default for AnnotationSet<U> {
    fn default() -> Self {
        Self::new()
    }
}

impl<U: Unit> Display for AnnotationSet<U> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{")?;
        for (i, annotation) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", annotation)?;
        }
        write!(f, "}}")
    }
}

/// Enables `assert_eq!(annotation_set, vec![...])` in tests.
impl<U: Unit> PartialEq<Vec<Annotation<U>>> for AnnotationSet<U> {
    fn eq(&self, other: &Vec<Annotation<U>>) -> bool {
        self.0 == *other
    }
}

/// Enables `assert_eq!(vec![...], annotation_set)` in tests.
impl<U: Unit> PartialEq<AnnotationSet<U>> for Vec<Annotation<U>> {
    fn eq(&self, other: &AnnotationSet<U>) -> bool {
        *self == other.0
    }
}

// ─────────────────────────────────────────────────────────────────────
// Serde support
// ─────────────────────────────────────────────────────────────────────

#[cfg(feature = "serde")]
impl<U: Unit> serde::Serialize for AnnotationSet<U> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.0.serialize(serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de, U: Unit> serde::Deserialize<'de> for AnnotationSet<U> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let vec = Vec::<Annotation<U>>::deserialize(deserializer)?;
        Ok(Self::from(vec))
    }
}

// ─────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────
