#![forbid(unsafe_code)]

//! Development-time target checks.
//!
//! Reports steps whose selector resolves to nothing on the current page.
//! Purely diagnostic: results never change tour behaviour.

use guidepost_core::TourStep;
use tracing::warn;

use crate::document::Document;

/// A step whose target could not be found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingTarget {
    pub step_id: String,
    pub selector: String,
}

/// Steps whose target selector matches no element, in step order.
pub fn find_missing_targets<D: Document>(document: &D, steps: &[TourStep]) -> Vec<MissingTarget> {
    steps
        .iter()
        .filter(|step| document.query_selector(&step.target).is_none())
        .map(|step| MissingTarget {
            step_id: step.id.clone(),
            selector: step.target.clone(),
        })
        .collect()
}

/// Emit one warning per missing target and return what was found.
pub fn warn_missing_targets<D: Document>(document: &D, steps: &[TourStep]) -> Vec<MissingTarget> {
    let missing = find_missing_targets(document, steps);
    for target in &missing {
        warn!(
            step = %target.step_id,
            selector = %target.selector,
            "Missing target for step \"{}\": {}",
            target.step_id,
            target.selector
        );
    }
    missing
}
