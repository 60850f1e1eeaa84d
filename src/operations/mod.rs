//! Set algebra over canonical annotation lists.
//!
//! [`apply`] computes union, intersection, difference or symmetric difference
//! of two canonical lists in a single boundary sweep. [`Relation`] is the
//! pairwise view of the same problem: where one span lies relative to another.

mod assertions;
mod operator;
mod relation;
mod sweep;


pub use assertions::is_canonical;
pub use operator::Operator;
pub use relation::Relation;
pub use sweep::{apply, apply_tagged};

use qtty::{Quantity, Unit};

/// Returns the minimum of two quantities.
pub fn quantity_min<U: Unit>(a: Quantity<U>, b: Quantity<U>) -> Quantity<U> {
    match a.value().partial_cmp(&b.value()) {
        Some(std::cmp::Ordering::Less) | Some(std::cmp::Ordering::Equal) => a,
        _ => b,
    }
}

/// Returns the maximum of two quantities.
pub fn quantity_max<U: Unit>(a: Quantity<U>, b: Quantity<U>) -> Quantity<U> {
    match a.value().partial_cmp(&b.value()) {
        Some(std::cmp::Ordering::Greater) | Some(std::cmp::Ordering::Equal) => a,
        _ => b,
    }
}
