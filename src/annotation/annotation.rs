//! Labelled closed interval over a one-dimensional axis.

use std::fmt::Display;

use qtty::{Quantity, Unit};

use crate::error::AlgebraError;
use crate::operations::Relation;

/// Closed range `[start, end]` tagged with a category label.
///
/// Bounds are always finite and ordered (`start <= end`). A zero-length
/// annotation (`start == end`) is representable but is discarded by
/// [`normalize`](super::normalize).
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation<U: Unit> {
    label: String,
    start: Quantity<U>,
    end: Quantity<U>,
}

fn check_bounds(start: f64, end: f64) -> Result<(), &'static str> {
    if !start.is_finite() || !end.is_finite() {
        Err("bounds must be finite")
    } else if start > end {
        Err("start must be <= end")
    } else {
        Ok(())
    }
}

impl<U: Unit> Annotation<U> {
    /// Creates annotation `label[start, end]`, validating its bounds.
    pub fn try_new(
        label: impl Into<String>,
        start: Quantity<U>,
        end: Quantity<U>,
    ) -> Result<Self, AlgebraError> {
        let label = label.into();
        match check_bounds(start.value(), end.value()) {
            Ok(()) => Ok(Self { label, start, end }),
            Err(reason) => Err(AlgebraError::InvalidInterval {
                label,
                start: start.value(),
                end: end.value(),
                reason,
            }),
        }
    }

    /// Creates annotation `label[start, end]`.
    ///
    /// # Panics
    ///
    /// Panics if a bound is not finite or if `start > end`.
    pub fn new(label: impl Into<String>, start: Quantity<U>, end: Quantity<U>) -> Self {
        match Self::try_new(label, start, end) {
            Ok(annotation) => annotation,
            Err(err) => panic!("{err}"),
        }
    }

    pub fn from_f64(label: impl Into<String>, start: f64, end: f64) -> Self {
        Self::new(label, Quantity::<U>::new(start), Quantity::<U>::new(end))
    }

    /// Builds an annotation from bounds already known to be valid.
    pub(crate) fn spanning(label: String, start: Quantity<U>, end: Quantity<U>) -> Self {
        debug_assert!(check_bounds(start.value(), end.value()).is_ok());
        Self { label, start, end }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub const fn start(&self) -> Quantity<U> {
        self.start
    }

    pub const fn end(&self) -> Quantity<U> {
        self.end
    }

    pub fn duration(&self) -> Quantity<U> {
        self.end - self.start
    }

    /// Returns true for zero-length spans.
    pub fn is_degenerate(&self) -> bool {
        self.start.value() == self.end.value()
    }

    /// Returns true if `position` ∈ `[start, end]`.
    pub fn contains(&self, position: Quantity<U>) -> bool {
        self.start.value() <= position.value() && position.value() <= self.end.value()
    }

    /// Checks if this annotation shares at least one point with `other`.
    ///
    /// Touching annotations (`self.end == other.start`) overlap.
    pub fn overlaps(&self, other: &Annotation<U>) -> bool {
        self.start.value() <= other.end.value() && other.start.value() <= self.end.value()
    }

    /// Classifies where `other` lies relative to `self`.
    pub fn relation_to(&self, other: &Annotation<U>) -> Relation {
        Relation::classify(self, other)
    }

    /// Returns the same span under a different label.
    pub fn with_label(&self, label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            start: self.start,
            end: self.end,
        }
    }

    pub fn into_label(self) -> String {
        self.label
    }
}

impl<U: Unit> Display for Annotation<U> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}[{:.3}, {:.3}]",
            self.label,
            self.start.value(),
            self.end.value()
        )
    }
}

// =============================================================================
// Annotation Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<U: Unit> serde::Serialize for Annotation<U> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;
        let mut s = serializer.serialize_struct("Annotation", 3)?;
        s.serialize_field("label", &self.label)?;
        s.serialize_field("start", &self.start.value())?;
        s.serialize_field("end", &self.end.value())?;
        s.end()
    }
}

#[cfg(feature = "serde")]
impl<'de, U: Unit> serde::Deserialize<'de> for Annotation<U> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(serde::Deserialize)]
        struct Raw {
            label: String,
            start: f64,
            end: f64,
        }

        let raw = Raw::deserialize(deserializer)?;
        Self::try_new(
            raw.label,
            Quantity::<U>::new(raw.start),
            Quantity::<U>::new(raw.end),
        )
        .map_err(serde::de::Error::custom)
    }
}
