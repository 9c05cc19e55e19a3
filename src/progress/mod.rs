//! Application phase progress engine.
//!
//! Takes a student's raw record set (documents, applications, per-country
//! profiles with free-form notes blobs) and derives where that student
//! stands in the fixed admissions pipeline for a selected country. Pure
//! read-time reconciliation: every call is a function of the snapshot it is
//! handed, with no I/O and no stored state, so it is safe to invoke
//! concurrently without coordination.

mod country;
mod documents;
mod enrollment;
mod notes;
mod universities;

pub mod domain;
pub mod pipeline;

pub use country::normalize_country;
pub use documents::{score_documents, DocumentScore};
pub use enrollment::is_enrolled;
pub use notes::{decode_notes, CountryNotes};
pub use universities::universities_for_source;

use domain::{DocumentType, StudentId, StudentSnapshot, UniversityRef};
use enrollment::enrolled_per_notes;
use pipeline::{Phase, PhaseScoring, PipelineConfig};
use serde::{Deserialize, Serialize};

/// Reported standing of one phase relative to the profile's current phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseStatus {
    Completed,
    Current,
    Pending,
}

impl PhaseStatus {
    pub const fn label(self) -> &'static str {
        match self {
            PhaseStatus::Completed => "Completed",
            PhaseStatus::Current => "Current",
            PhaseStatus::Pending => "Pending",
        }
    }
}

/// One row of the per-phase breakdown.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhaseEntry {
    pub phase: Phase,
    pub phase_label: String,
    pub status: PhaseStatus,
    pub percent: u8,
    /// Resolved university list; only shortlist/submission/offer/enrollment
    /// phases carry one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub universities: Option<Vec<UniversityRef>>,
    /// Open checklist items; only the document collection phase carries one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub missing_documents: Option<Vec<DocumentType>>,
}

/// Derived progress view for one student and one destination country.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressReport {
    pub student_id: StudentId,
    pub country: String,
    /// `None` when the stored phase value no longer parses (data drift).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_phase: Option<Phase>,
    pub overall_percent: u8,
    pub phases: Vec<PhaseEntry>,
}

/// Stateless calculator over the pipeline invariants.
#[derive(Debug, Clone)]
pub struct ProgressEngine {
    config: PipelineConfig,
}

impl Default for ProgressEngine {
    fn default() -> Self {
        Self::new(PipelineConfig::standard())
    }
}

impl ProgressEngine {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Derives the progress view for `selected_country`.
    ///
    /// A missing profile for the selected country falls back to the intake
    /// phase with empty notes rather than erroring; a stored phase value
    /// that no longer parses renders every phase pending with an overall of
    /// zero. Both are deliberate degradations for drifted legacy data.
    pub fn compute(&self, snapshot: &StudentSnapshot, selected_country: &str) -> ProgressReport {
        let selected = normalize_country(selected_country);
        let profile = snapshot
            .country_profiles
            .iter()
            .find(|profile| normalize_country(&profile.country) == selected);

        let (raw_phase, notes) = match profile {
            Some(profile) => (
                profile.current_phase.clone(),
                decode_notes(profile.notes.as_ref()),
            ),
            None => (
                Phase::DocumentCollection.code().to_string(),
                CountryNotes::default(),
            ),
        };

        let current_phase = Phase::parse(&raw_phase);
        let current_index = current_phase.and_then(|phase| self.config.index_of(phase));
        let profile_in_enrollment = current_phase == Some(Phase::Enrollment);
        let enrolled = profile_in_enrollment || enrolled_per_notes(&notes);
        let document_score = score_documents(&snapshot.documents, &self.config.required_documents);

        let mut current_phase_percent = 0u8;
        let phases: Vec<PhaseEntry> = self
            .config
            .phases
            .iter()
            .enumerate()
            .map(|(index, &phase)| {
                let (status, percent) = match current_index {
                    // Incomparable phase pointer: everything renders pending.
                    None => (PhaseStatus::Pending, 0),
                    Some(current) if index < current => (PhaseStatus::Completed, 100),
                    Some(current) if index > current => (PhaseStatus::Pending, 0),
                    Some(_) => match phase.scoring() {
                        PhaseScoring::DocumentChecklist => {
                            (PhaseStatus::Current, document_score.percent)
                        }
                        PhaseScoring::EnrollmentGate if enrolled => (PhaseStatus::Completed, 100),
                        PhaseScoring::EnrollmentGate => (PhaseStatus::Current, 0),
                        PhaseScoring::IndexOnly => (PhaseStatus::Current, 0),
                    },
                };
                if current_index == Some(index) {
                    current_phase_percent = percent;
                }

                let universities = phase.university_source().map(|source| {
                    universities_for_source(
                        source,
                        &notes,
                        &snapshot.applications,
                        selected_country,
                        profile_in_enrollment,
                    )
                });
                let missing_documents = (phase == Phase::DocumentCollection)
                    .then(|| document_score.missing.clone());

                PhaseEntry {
                    phase,
                    phase_label: phase.label().to_string(),
                    status,
                    percent,
                    universities,
                    missing_documents,
                }
            })
            .collect();

        let overall_percent = match current_index {
            None => 0,
            Some(current) => {
                let total = self.config.total_phases() as f64;
                let base = 100.0 * current as f64 / total;
                (base + f64::from(current_phase_percent) / total)
                    .min(100.0)
                    .round() as u8
            }
        };

        ProgressReport {
            student_id: snapshot.student_id.clone(),
            country: selected,
            current_phase,
            overall_percent,
            phases,
        }
    }
}
