//! Audit assembly.

use crate::error::Result;
use crate::schema::{Audit, ConstraintAction, MappingDecision, StyleFamilyModel};

/// Warning added whenever any content could not be placed.
pub const UNMAPPED_WARNING: &str = "Unmapped sections remained.";

/// Collects generation decisions into a validated [`Audit`].
#[derive(Debug, Clone)]
pub struct AuditBuilder<'a> {
    model: &'a StyleFamilyModel,
    decisions: Vec<MappingDecision>,
    constraint_actions: Vec<ConstraintAction>,
    unmapped: Vec<String>,
    warnings: Vec<String>,
    citations_found: usize,
    citations_written: usize,
    similarity: f64,
}

impl<'a> AuditBuilder<'a> {
    /// Start an audit for generation against `model`.
    pub fn new(model: &'a StyleFamilyModel) -> Self {
        Self {
            model,
            decisions: Vec::new(),
            constraint_actions: Vec::new(),
            unmapped: Vec::new(),
            warnings: Vec::new(),
            citations_found: 0,
            citations_written: 0,
            similarity: 0.0,
        }
    }

    pub fn decisions(mut self, decisions: Vec<MappingDecision>) -> Self {
        self.decisions = decisions;
        self
    }

    pub fn constraint_actions(mut self, actions: Vec<ConstraintAction>) -> Self {
        self.constraint_actions = actions;
        self
    }

    pub fn unmapped(mut self, unmapped: Vec<String>) -> Self {
        self.unmapped = unmapped;
        self
    }

    /// Generation warnings, appended after the model's own.
    pub fn warnings(mut self, warnings: Vec<String>) -> Self {
        self.warnings = warnings;
        self
    }

    /// Record citation counts from text scanning and from the writer.
    pub fn citations(mut self, found: usize, written: usize) -> Self {
        self.citations_found = found;
        self.citations_written = written;
        self
    }

    pub fn similarity(mut self, score: f64) -> Self {
        self.similarity = score;
        self
    }

    /// Assemble and validate the audit.
    pub fn build(self) -> Result<Audit> {
        let mut warnings = self.model.warnings.clone();
        warnings.extend(self.warnings);
        if !self.unmapped.is_empty() {
            warnings.push(UNMAPPED_WARNING.to_string());
        }

        let audit = Audit {
            inferred_regions: self.model.regions.clone(),
            mapping_decisions: self.decisions,
            constraint_actions: self.constraint_actions,
            citations_formatted_count: self.citations_found.max(self.citations_written),
            unmapped_content: self.unmapped,
            warnings,
            similarity_score_vs_skeleton: self.similarity,
        };
        audit.validate()?;
        Ok(audit)
    }
}
