//! annotation_algebra - boolean set algebra over labelled interval tracks
//!
//! Annotations are closed, labelled spans on a one-dimensional axis (time
//! ranges, character offsets, ...). Two tracks are reduced to canonical form
//! and combined by union, intersection, difference or symmetric difference
//! into a third track carrying a new label.
//!
//! ```
//! use annotation_algebra::{apply, normalize, Annotation, Operator};
//! use qtty::Second;
//!
//! let a = normalize(vec![
//!     Annotation::<Second>::from_f64("speech", 0.0, 5.0),
//!     Annotation::from_f64("speech", 10.0, 15.0),
//! ]);
//! let b = normalize(vec![Annotation::<Second>::from_f64("music", 3.0, 8.0)]);
//!
//! let overlap = normalize(apply(Operator::Intersection, "both", &a, &b));
//! assert_eq!(overlap, vec![Annotation::from_f64("both", 3.0, 5.0)]);
//! ```

pub mod annotation;
pub mod error;
pub mod operations;
#[cfg(feature = "serde")]
pub mod request;

pub use annotation::{normalize, Annotation, AnnotationSet};
pub use error::AlgebraError;
pub use operations::{apply, apply_tagged, Operator, Relation};
