//! Persisted and transmitted artifacts.
//!
//! [`StyleFamilyModel`] carries the result of inference into generation;
//! [`Audit`] records every generation decision. Both are exchanged as JSON
//! and can only be constructed or parsed through validating functions.

mod audit;
mod family;
mod json;

pub use audit::{Audit, ConstraintAction, ConstraintKind, MappingDecision};
pub use family::{
    ModelVersion, Region, RegionConstraints, RegionType, SignatureSummary, StyleFamilyModel,
};
pub use json::{decode_document, encode_document, to_json, JsonFormat};

use crate::error::{Error, Result};

/// Check that a score lies in [0, 1].
pub(crate) fn check_unit_interval(value: f64, what: &str) -> Result<()> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(Error::Schema(format!("{what} must lie in [0, 1], got {value}")))
    }
}
