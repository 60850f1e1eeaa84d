use qtty::{Quantity, Unit};

use super::{quantity_max, quantity_min};
use crate::annotation::Annotation;

/// Position of a span `y` relative to a span `x`.
///
/// The six cases are tested in declaration order with closed `<=`
/// comparisons; the first that holds wins, so exactly one applies to any pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Relation {
    /// `y.end <= x.start`: `y` lies at or before the head of `x`.
    Before,
    /// `y.start <= x.start <= y.end <= x.end`: the tail of `y` covers the head of `x`.
    Left,
    /// `y.start <= x.start` and `x.end <= y.end`: `y` contains `x`.
    In,
    /// `x.start <= y.start` and `y.end <= x.end`: `x` contains `y`.
    Out,
    /// `x.start <= y.start <= x.end <= y.end`: the tail of `x` covers the head of `y`.
    Right,
    /// `x.end <= y.start`: `y` lies at or after the tail of `x`.
    After,
}

impl Relation {
    pub fn classify<U: Unit>(x: &Annotation<U>, y: &Annotation<U>) -> Relation {
        let (xs, xe) = (x.start().value(), x.end().value());
        let (ys, ye) = (y.start().value(), y.end().value());

        if ye <= xs {
            Relation::Before
        } else if ys <= xs && xs <= ye && ye <= xe {
            Relation::Left
        } else if ys <= xs && xe <= ye {
            Relation::In
        } else if xs <= ys && ye <= xe {
            Relation::Out
        } else if xs <= ys && ys <= xe && xe <= ye {
            Relation::Right
        } else {
            Relation::After
        }
    }

    /// Bounds of the span shared by `x` and `y`, given that `self` is their
    /// relation. `None` when they are apart or meet in a single point.
    pub fn common_span<U: Unit>(
        self,
        x: &Annotation<U>,
        y: &Annotation<U>,
    ) -> Option<(Quantity<U>, Quantity<U>)> {
        let (start, end) = match self {
            Relation::Before | Relation::After => return None,
            Relation::Left => (x.start(), y.end()),
            Relation::In => (x.start(), x.end()),
            Relation::Out => (y.start(), y.end()),
            Relation::Right => (y.start(), x.end()),
        };
        debug_assert_eq!(start.value(), quantity_max(x.start(), y.start()).value());
        debug_assert_eq!(end.value(), quantity_min(x.end(), y.end()).value());
        (start.value() < end.value()).then_some((start, end))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qtty::Second;

    fn l(start: f64, end: f64) -> Annotation<Second> {
        Annotation::from_f64("L", start, end)
    }

    #[test]
    fn classifies_the_six_positions() {
        let x = l(10.0, 20.0);
        assert_eq!(Relation::classify(&x, &l(0.0, 5.0)), Relation::Before);
        assert_eq!(Relation::classify(&x, &l(5.0, 15.0)), Relation::Left);
        assert_eq!(Relation::classify(&x, &l(5.0, 25.0)), Relation::In);
        assert_eq!(Relation::classify(&x, &l(12.0, 18.0)), Relation::Out);
        assert_eq!(Relation::classify(&x, &l(15.0, 25.0)), Relation::Right);
        assert_eq!(Relation::classify(&x, &l(25.0, 30.0)), Relation::After);
    }

    #[test]
    fn shared_endpoints_follow_declaration_order() {
        let x = l(10.0, 20.0);
        // y ends where x starts: Before is tested first.
        assert_eq!(Relation::classify(&x, &l(0.0, 10.0)), Relation::Before);
        // y starts where x ends: Right is tested before After.
        assert_eq!(Relation::classify(&x, &l(20.0, 30.0)), Relation::Right);
        // identical spans: Left is tested before In and Out.
        assert_eq!(Relation::classify(&x, &l(10.0, 20.0)), Relation::Left);
    }

    #[test]
    fn shared_start_or_end_prefers_left() {
        let x = l(10.0, 20.0);
        // shared start, y shorter: Left wins over Out.
        assert_eq!(Relation::classify(&x, &l(10.0, 15.0)), Relation::Left);
        // shared end, y longer: Left wins over In.
        assert_eq!(Relation::classify(&x, &l(5.0, 20.0)), Relation::Left);
        // shared start, y longer: Left does not hold, In does.
        assert_eq!(Relation::classify(&x, &l(10.0, 25.0)), Relation::In);
        // shared end, y shorter and starting later: Out.
        assert_eq!(Relation::classify(&x, &l(12.0, 20.0)), Relation::Out);
    }

    #[test]
    fn common_span_per_relation() {
        let x = l(10.0, 20.0);
        let span = |y: Annotation<Second>| {
            Relation::classify(&x, &y)
                .common_span(&x, &y)
                .map(|(s, e)| (s.value(), e.value()))
        };
        assert_eq!(span(l(0.0, 5.0)), None);
        assert_eq!(span(l(5.0, 15.0)), Some((10.0, 15.0)));
        assert_eq!(span(l(5.0, 25.0)), Some((10.0, 20.0)));
        assert_eq!(span(l(12.0, 18.0)), Some((12.0, 18.0)));
        assert_eq!(span(l(15.0, 25.0)), Some((15.0, 20.0)));
        assert_eq!(span(l(20.0, 30.0)), None);
        assert_eq!(span(l(25.0, 30.0)), None);
    }
}
