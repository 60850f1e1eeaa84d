//! Labelled spans and their canonical form.
//!
//! An [`Annotation`] is a closed range on a one-dimensional axis tagged with a
//! label. [`normalize`] reduces any list of them to canonical form, and
//! [`AnnotationSet`] keeps a list canonical across mutations.

#[allow(clippy::module_inception)]
mod annotation;
mod annotation_set;
mod normalize;

pub use annotation::Annotation;
pub use annotation_set::AnnotationSet;
pub use normalize::normalize;
