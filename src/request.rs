//! JSON request model and end-to-end evaluation.
//!
//! A request names an operator, the two input labels and the label to assign
//! to the result, along with a flat list of annotations:
//!
//! ```json
//! {
//!   "operator": "UNION",
//!   "assignLabel": "speech_or_music",
//!   "value1": "speech",
//!   "value2": "music",
//!   "annotations": [{ "label": "speech", "start": 0.0, "end": 5.0 }]
//! }
//! ```

use std::io::Read;

use log::debug;
use qtty::{Quantity, Unit};
use serde::{Deserialize, Serialize};

use crate::annotation::{Annotation, AnnotationSet};
use crate::error::AlgebraError;
use crate::operations::{apply, Operator};

/// Annotation as it appears on the wire, before its bounds are validated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawAnnotation {
    pub label: String,
    pub start: f64,
    pub end: f64,
}

impl RawAnnotation {
    pub fn validate<U: Unit>(&self) -> Result<Annotation<U>, AlgebraError> {
        Annotation::try_new(
            self.label.clone(),
            Quantity::<U>::new(self.start),
            Quantity::<U>::new(self.end),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    pub operator: String,
    #[serde(rename = "assignLabel")]
    pub assign_label: String,
    pub value1: String,
    pub value2: String,
    #[serde(default)]
    pub annotations: Vec<RawAnnotation>,
}

/// Every stage of an evaluated request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(bound(serialize = ""))]
pub struct Evaluation<U: Unit> {
    pub operator: Operator,
    /// Canonical annotations labelled `value1`.
    pub first: AnnotationSet<U>,
    /// Canonical annotations labelled `value2`.
    pub second: AnnotationSet<U>,
    /// Fragments straight out of the sweep.
    pub raw: Vec<Annotation<U>>,
    /// `raw` in canonical form.
    pub result: AnnotationSet<U>,
}

/// Keeps the annotations whose label is exactly `label`.
pub fn filter_by_label<U: Unit>(
    annotations: &[Annotation<U>],
    label: &str,
) -> Vec<Annotation<U>> {
    annotations
        .iter()
        .filter(|annotation| annotation.label() == label)
        .cloned()
        .collect()
}

impl Request {
    pub fn from_json(json: &str) -> Result<Self, AlgebraError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, AlgebraError> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Input labels are matched exactly, so an empty `value1`/`value2` selects
    /// annotations labelled `""`. Only the output label must be non-empty.
    fn check_labels(&self) -> Result<(), AlgebraError> {
        if self.assign_label.is_empty() {
            Err(AlgebraError::MissingLabel("assignLabel"))
        } else {
            Ok(())
        }
    }

    /// Runs the request: validate, filter both labels, normalize, combine,
    /// normalize the result.
    ///
    /// The operator, labels and every annotation are checked before any
    /// combination happens, so a failing request produces no output at all.
    pub fn evaluate<U: Unit>(&self) -> Result<Evaluation<U>, AlgebraError> {
        let operator: Operator = self.operator.parse()?;
        self.check_labels()?;
        let annotations = self
            .annotations
            .iter()
            .map(RawAnnotation::validate)
            .collect::<Result<Vec<Annotation<U>>, _>>()?;

        let first = AnnotationSet::from(filter_by_label(&annotations, &self.value1));
        let second = AnnotationSet::from(filter_by_label(&annotations, &self.value2));
        let raw = apply(operator, self.assign_label.as_str(), &first, &second);
        let result = AnnotationSet::from(raw.clone());

        debug!(
            "{operator}({:?}: {}, {:?}: {}) -> {:?}: {}",
            self.value1,
            first.len(),
            self.value2,
            second.len(),
            self.assign_label,
            result.len()
        );

        Ok(Evaluation {
            operator,
            first,
            second,
            raw,
            result,
        })
    }
}
