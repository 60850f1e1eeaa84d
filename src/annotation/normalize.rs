//! Reduction of arbitrary annotation lists to canonical form.

use std::cmp::Ordering;
use std::collections::HashSet;
use std::hash::{Hash, Hasher};

use log::trace;
use qtty::Unit;

use super::annotation::Annotation;
use crate::operations::quantity_max;

/// A total-order key for `f64` using IEEE-754 total order (`total_cmp`).
/// This lets us hash and sort `f64`-backed bounds.
///
/// `-0.0` is folded onto `0.0` so that numerically equal bounds collide.
#[derive(Debug, Clone, Copy)]
pub(crate) struct F64Key(f64);

impl F64Key {
    pub(crate) fn new(value: f64) -> Self {
        if value == 0.0 {
            Self(0.0)
        } else {
            Self(value)
        }
    }
}

impl PartialEq for F64Key {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for F64Key {}

impl Ord for F64Key {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl PartialOrd for F64Key {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Hash for F64Key {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

/// Structural identity of an annotation: `(label, start, end)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct AnnotationKey {
    label: String,
    start: F64Key,
    end: F64Key,
}

impl AnnotationKey {
    fn of<U: Unit>(annotation: &Annotation<U>) -> Self {
        Self {
            label: annotation.label().to_owned(),
            start: F64Key::new(annotation.start().value()),
            end: F64Key::new(annotation.end().value()),
        }
    }
}

/// Ascending by start, ties broken by end then label.
fn canonical_order<U: Unit>(a: &Annotation<U>, b: &Annotation<U>) -> Ordering {
    F64Key::new(a.start().value())
        .cmp(&F64Key::new(b.start().value()))
        .then_with(|| F64Key::new(a.end().value()).cmp(&F64Key::new(b.end().value())))
        .then_with(|| a.label().cmp(b.label()))
}

/// Folds a sorted run of annotations, merging every overlapping or touching
/// neighbour into one accumulator. A merged run keeps the label of its first
/// annotation.
fn merge_touching<U: Unit>(sorted: Vec<Annotation<U>>) -> Vec<Annotation<U>> {
    let mut iter = sorted.into_iter();
    let Some(first) = iter.next() else {
        return Vec::new();
    };

    let (mut merged, last) = iter.fold(
        (Vec::new(), first),
        |(mut merged, acc): (Vec<Annotation<U>>, Annotation<U>), current| {
            if current.start().value() <= acc.end().value() {
                let start = acc.start();
                let end = quantity_max(acc.end(), current.end());
                (merged, Annotation::spanning(acc.into_label(), start, end))
            } else {
                merged.push(acc);
                (merged, current)
            }
        },
    );
    merged.push(last);
    merged
}

/// Reduces `intervals` to canonical form.
///
/// Exact duplicates and zero-length spans are dropped, the survivors are
/// sorted ascending by start, and overlapping or touching runs are merged.
/// The result satisfies `prev.end < next.start` for every consecutive pair.
///
/// Total over any finite input; bounds are validated when an
/// [`Annotation`] is built, so NaN never reaches this function.
pub fn normalize<U: Unit>(
    intervals: impl IntoIterator<Item = Annotation<U>>,
) -> Vec<Annotation<U>> {
    let mut seen = HashSet::new();
    let mut unique: Vec<Annotation<U>> = intervals
        .into_iter()
        .filter(|annotation| seen.insert(AnnotationKey::of(annotation)))
        .filter(|annotation| !annotation.is_degenerate())
        .collect();
    unique.sort_by(canonical_order);

    let unique_len = unique.len();
    let merged = merge_touching(unique);
    trace!(
        "normalize: {} distinct spans merged into {}",
        unique_len,
        merged.len()
    );
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operations::is_canonical;
    use qtty::Second;

    fn an(label: &str, start: f64, end: f64) -> Annotation<Second> {
        Annotation::from_f64(label, start, end)
    }

    fn l(start: f64, end: f64) -> Annotation<Second> {
        an("L", start, end)
    }

    #[test]
    fn empty_input_gives_empty_output() {
        assert!(normalize(Vec::<Annotation<Second>>::new()).is_empty());
    }

    #[test]
    fn single_interval_unchanged() {
        assert_eq!(normalize(vec![l(1.0, 2.0)]), vec![l(1.0, 2.0)]);
    }

    #[test]
    fn degenerate_is_dropped() {
        assert!(normalize(vec![l(3.0, 3.0)]).is_empty());
        assert_eq!(normalize(vec![l(3.0, 3.0), l(4.0, 6.0)]), vec![l(4.0, 6.0)]);
    }

    #[test]
    fn degenerate_inside_a_span_does_not_split_it() {
        assert_eq!(normalize(vec![l(0.0, 10.0), l(5.0, 5.0)]), vec![l(0.0, 10.0)]);
    }

    #[test]
    fn touching_intervals_merge() {
        assert_eq!(normalize(vec![l(0.0, 5.0), l(5.0, 10.0)]), vec![l(0.0, 10.0)]);
    }

    #[test]
    fn overlapping_chain_collapses() {
        let out = normalize(vec![l(8.0, 12.0), l(0.0, 4.0), l(3.0, 9.0), l(11.0, 20.0)]);
        assert_eq!(out, vec![l(0.0, 20.0)]);
    }

    #[test]
    fn contained_interval_does_not_shrink_accumulator() {
        assert_eq!(normalize(vec![l(0.0, 10.0), l(2.0, 3.0)]), vec![l(0.0, 10.0)]);
    }

    #[test]
    fn disjoint_sorted_input_unchanged() {
        let input = vec![l(0.0, 1.0), l(2.0, 3.0), l(4.0, 5.0)];
        assert_eq!(normalize(input.clone()), input);
    }

    #[test]
    fn unsorted_input_is_sorted() {
        let out = normalize(vec![l(20.0, 30.0), l(0.0, 10.0), l(12.0, 13.0)]);
        assert_eq!(out, vec![l(0.0, 10.0), l(12.0, 13.0), l(20.0, 30.0)]);
    }

    #[test]
    fn duplicates_are_removed() {
        let out = normalize(vec![l(0.0, 1.0), l(0.0, 1.0), l(0.0, 1.0)]);
        assert_eq!(out, vec![l(0.0, 1.0)]);
    }

    #[test]
    fn negative_zero_duplicates_collide() {
        let out = normalize(vec![l(-0.0, 1.0), l(0.0, 1.0)]);
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn merged_run_keeps_first_label() {
        let out = normalize(vec![an("b", 3.0, 8.0), an("a", 0.0, 5.0)]);
        assert_eq!(out, vec![an("a", 0.0, 8.0)]);
    }

    #[test]
    fn output_is_canonical() {
        let out = normalize(vec![
            l(5.0, 7.0),
            l(-3.0, -1.0),
            l(-1.0, 0.0),
            l(6.0, 6.0),
            l(9.0, 9.5),
        ]);
        assert!(is_canonical(&out));
        assert_eq!(out, vec![l(-3.0, 0.0), l(5.0, 7.0), l(9.0, 9.5)]);
    }

    #[test]
    fn idempotent() {
        let once = normalize(vec![l(4.0, 6.0), l(0.0, 2.0), l(1.0, 3.0), l(6.0, 7.0)]);
        let twice = normalize(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn order_and_duplication_independent() {
        let a = normalize(vec![l(0.0, 2.0), l(5.0, 9.0), l(1.0, 3.0)]);
        let b = normalize(vec![l(5.0, 9.0), l(1.0, 3.0), l(0.0, 2.0), l(5.0, 9.0)]);
        assert_eq!(a, b);
    }

    #[test]
    fn f64_key_orders_totally() {
        let mut keys = vec![F64Key::new(3.0), F64Key::new(-1.0), F64Key::new(0.0)];
        keys.sort();
        assert_eq!(keys, vec![F64Key::new(-1.0), F64Key::new(0.0), F64Key::new(3.0)]);
        assert_eq!(F64Key::new(-0.0), F64Key::new(0.0));
    }
}
