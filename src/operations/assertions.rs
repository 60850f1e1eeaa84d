use crate::annotation::Annotation;
use qtty::Unit;

/// Returns true if `annotations` is canonical: no span is zero-length, spans
/// are sorted by start, and each one ends strictly before the next starts
/// (touching spans would have been merged).
pub fn is_canonical<U: Unit>(annotations: &[Annotation<U>]) -> bool {
    annotations.iter().all(|a| !a.is_degenerate())
        && annotations
            .windows(2)
            .all(|w| w[0].end().value() < w[1].start().value())
}
