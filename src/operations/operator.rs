use std::fmt::Display;
use std::str::FromStr;

use crate::error::AlgebraError;

/// Boolean set operation applied between two annotation tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// Points in `a` or `b`.
    Union,
    /// Points in `a` and `b`.
    Intersection,
    /// Points in `a` but not `b`.
    Difference,
    /// Points in exactly one of `a`, `b`.
    SymmetricDifference,
}

impl Operator {
    pub const ALL: [Operator; 4] = [
        Operator::Union,
        Operator::Intersection,
        Operator::Difference,
        Operator::SymmetricDifference,
    ];

    /// Wire tag used in requests.
    pub const fn tag(self) -> &'static str {
        match self {
            Operator::Union => "UNION",
            Operator::Intersection => "INTERSECTION",
            Operator::Difference => "DIFFERENCE",
            Operator::SymmetricDifference => "SYMMETRIC_DIFFERENCE",
        }
    }

    /// Whether a point with the given membership belongs to the result.
    pub const fn includes(self, in_a: bool, in_b: bool) -> bool {
        match self {
            Operator::Union => in_a || in_b,
            Operator::Intersection => in_a && in_b,
            Operator::Difference => in_a && !in_b,
            Operator::SymmetricDifference => in_a != in_b,
        }
    }

    pub const fn is_commutative(self) -> bool {
        !matches!(self, Operator::Difference)
    }
}

impl FromStr for Operator {
    type Err = AlgebraError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        Operator::ALL
            .into_iter()
            .find(|operator| operator.tag() == tag)
            .ok_or_else(|| AlgebraError::UnsupportedOperator(tag.to_owned()))
    }
}

impl Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Operator {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.tag())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Operator {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let tag = String::deserialize(deserializer)?;
        tag.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_wire_tags() {
        for operator in Operator::ALL {
            assert_eq!(operator.tag().parse::<Operator>(), Ok(operator));
            assert_eq!(operator.to_string(), operator.tag());
        }
    }

    #[test]
    fn rejects_unknown_tag() {
        assert_eq!(
            "XOR".parse::<Operator>(),
            Err(AlgebraError::UnsupportedOperator("XOR".to_string()))
        );
    }

    #[test]
    fn tags_are_case_sensitive() {
        assert!("union".parse::<Operator>().is_err());
    }

    #[test]
    fn membership_tables() {
        use Operator::*;
        let cases = [(false, false), (true, false), (false, true), (true, true)];
        let expected = [
            (Union, [false, true, true, true]),
            (Intersection, [false, false, false, true]),
            (Difference, [false, true, false, false]),
            (SymmetricDifference, [false, true, true, false]),
        ];
        for (operator, row) in expected {
            for ((in_a, in_b), want) in cases.into_iter().zip(row) {
                assert_eq!(operator.includes(in_a, in_b), want, "{operator} {in_a} {in_b}");
            }
        }
    }

    #[test]
    fn only_difference_is_not_commutative() {
        assert!(Operator::Union.is_commutative());
        assert!(Operator::Intersection.is_commutative());
        assert!(Operator::SymmetricDifference.is_commutative());
        assert!(!Operator::Difference.is_commutative());
    }
}
