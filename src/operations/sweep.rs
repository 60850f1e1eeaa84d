use log::debug;
use qtty::{Quantity, Unit};

use super::{is_canonical, quantity_min, Operator};
use crate::annotation::Annotation;
use crate::error::AlgebraError;

/// Walks the boundaries of one canonical list in increasing order, tracking
/// whether the sweep position is currently inside one of its spans.
struct Cursor<'a, U: Unit> {
    spans: &'a [Annotation<U>],
    index: usize,
    inside: bool,
}

impl<'a, U: Unit> Cursor<'a, U> {
    fn new(spans: &'a [Annotation<U>]) -> Self {
        Self {
            spans,
            index: 0,
            inside: false,
        }
    }

    /// Next boundary not yet crossed: the start of the pending span when
    /// outside, its end when inside.
    fn peek(&self) -> Option<Quantity<U>> {
        self.spans.get(self.index).map(|span| {
            if self.inside {
                span.end()
            } else {
                span.start()
            }
        })
    }

    /// Crosses every boundary located exactly at `position`.
    fn cross(&mut self, position: Quantity<U>) {
        while let Some(boundary) = self.peek() {
            if boundary.value() != position.value() {
                break;
            }
            if self.inside {
                self.index += 1;
            }
            self.inside = !self.inside;
        }
    }
}

fn next_boundary<U: Unit>(a: &Cursor<'_, U>, b: &Cursor<'_, U>) -> Option<Quantity<U>> {
    match (a.peek(), b.peek()) {
        (Some(x), Some(y)) => Some(quantity_min(x, y)),
        (x, y) => x.or(y),
    }
}

/// Computes `operator` between two canonical annotation lists.
///
/// Both lists are swept together, boundary by boundary. At each boundary the
/// membership of the sweep position in `a` and in `b` is updated, and an
/// output span opens or closes whenever [`Operator::includes`] changes.
/// Every span is emitted once, in ascending order, labelled `output_label`.
///
/// Runs in `O(|a| + |b|)`. Spans are closed: a shared endpoint joins a union
/// and leaves no residue in a difference. Single-point results (two spans
/// meeting at one endpoint under intersection) are not emitted.
///
/// The result is sorted and disjoint but callers should still pass it through
/// [`normalize`](crate::annotation::normalize) before treating it as a set.
///
/// Inputs must be canonical; this is only checked in debug builds.
pub fn apply<U: Unit>(
    operator: Operator,
    output_label: impl Into<String>,
    a: &[Annotation<U>],
    b: &[Annotation<U>],
) -> Vec<Annotation<U>> {
    debug_assert!(is_canonical(a), "left operand is not canonical");
    debug_assert!(is_canonical(b), "right operand is not canonical");

    let label = output_label.into();
    let mut result = Vec::with_capacity(a.len() + b.len());
    let mut a_cursor = Cursor::new(a);
    let mut b_cursor = Cursor::new(b);
    let mut open: Option<Quantity<U>> = None;

    while let Some(position) = next_boundary(&a_cursor, &b_cursor) {
        a_cursor.cross(position);
        b_cursor.cross(position);
        let included = operator.includes(a_cursor.inside, b_cursor.inside);

        match (open, included) {
            (None, true) => open = Some(position),
            (Some(start), false) => {
                open = None;
                if start.value() < position.value() {
                    result.push(Annotation::spanning(label.clone(), start, position));
                }
            }
            _ => {}
        }
    }
    debug_assert!(open.is_none(), "sweep ended inside an output span");

    debug!(
        "{operator}: {} x {} spans -> {} fragments labelled {label:?}",
        a.len(),
        b.len(),
        result.len()
    );
    result
}

/// Like [`apply`], with the operator given by its wire tag.
///
/// Fails with [`AlgebraError::UnsupportedOperator`] before doing any work if
/// the tag is unknown.
pub fn apply_tagged<U: Unit>(
    tag: &str,
    output_label: impl Into<String>,
    a: &[Annotation<U>],
    b: &[Annotation<U>],
) -> Result<Vec<Annotation<U>>, AlgebraError> {
    let operator: Operator = tag.parse()?;
    Ok(apply(operator, output_label, a, b))
}
