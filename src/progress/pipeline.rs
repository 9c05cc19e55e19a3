use super::domain::DocumentType;
use serde::{Deserialize, Serialize};

/// One step of the fixed admissions pipeline tracked per destination
/// country. Ordering is significant: every phase before a profile's current
/// phase reads as complete regardless of its own evidentiary data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Phase {
    DocumentCollection,
    UniversityShortlisting,
    ApplicationSubmission,
    Offer,
    Deposit,
    VisaIssuance,
    VisaApplication,
    VisaDecision,
    PreDeparture,
    Enrollment,
}

impl Phase {
    pub const fn code(self) -> &'static str {
        match self {
            Phase::DocumentCollection => "DOCUMENT_COLLECTION",
            Phase::UniversityShortlisting => "UNIVERSITY_SHORTLISTING",
            Phase::ApplicationSubmission => "APPLICATION_SUBMISSION",
            Phase::Offer => "OFFER",
            Phase::Deposit => "DEPOSIT",
            Phase::VisaIssuance => "VISA_ISSUANCE",
            Phase::VisaApplication => "VISA_APPLICATION",
            Phase::VisaDecision => "VISA_DECISION",
            Phase::PreDeparture => "PRE_DEPARTURE",
            Phase::Enrollment => "ENROLLMENT",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Phase::DocumentCollection => "Document Collection",
            Phase::UniversityShortlisting => "University Shortlisting",
            Phase::ApplicationSubmission => "Application Submission",
            Phase::Offer => "Offer",
            Phase::Deposit => "Deposit",
            Phase::VisaIssuance => "Visa Issuance",
            Phase::VisaApplication => "Visa Application",
            Phase::VisaDecision => "Visa Decision",
            Phase::PreDeparture => "Pre-Departure",
            Phase::Enrollment => "Enrollment",
        }
    }

    /// Parses a stored phase value. Profiles written by older builds carry
    /// labels rather than codes and inconsistent separators, so matching is
    /// case-insensitive over a scrubbed form. Unrecognized values return
    /// `None`; the calculator treats that as data drift, not an error.
    pub fn parse(raw: &str) -> Option<Phase> {
        let scrubbed = scrub_phase(raw);
        ALL_PHASES
            .iter()
            .copied()
            .find(|phase| scrub_phase(phase.code()) == scrubbed)
    }

    /// How this phase is scored when it is the profile's current phase.
    pub const fn scoring(self) -> PhaseScoring {
        match self {
            Phase::DocumentCollection => PhaseScoring::DocumentChecklist,
            Phase::Enrollment => PhaseScoring::EnrollmentGate,
            _ => PhaseScoring::IndexOnly,
        }
    }

    /// Which attribution source annotates this phase's report entry, if any.
    pub const fn university_source(self) -> Option<UniversitySource> {
        match self {
            Phase::UniversityShortlisting => Some(UniversitySource::Shortlist),
            Phase::ApplicationSubmission => Some(UniversitySource::Submissions),
            Phase::Offer => Some(UniversitySource::Offers),
            Phase::Enrollment => Some(UniversitySource::Enrollment),
            _ => None,
        }
    }
}

const ALL_PHASES: [Phase; 10] = [
    Phase::DocumentCollection,
    Phase::UniversityShortlisting,
    Phase::ApplicationSubmission,
    Phase::Offer,
    Phase::Deposit,
    Phase::VisaIssuance,
    Phase::VisaApplication,
    Phase::VisaDecision,
    Phase::PreDeparture,
    Phase::Enrollment,
];

fn scrub_phase(raw: &str) -> String {
    raw.trim()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_ascii_uppercase()
}

/// Scoring strategy for the current phase. Keeping this a table rather than
/// cascading conditionals keeps the monotonicity invariant auditable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseScoring {
    /// Position in the pipeline is the only signal; no sub-scoring exists.
    IndexOnly,
    /// Scored against the intake document checklist.
    DocumentChecklist,
    /// All-or-nothing, and may read as completed while still nominally
    /// current.
    EnrollmentGate,
}

/// University attribution sources, one per annotated phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniversitySource {
    Shortlist,
    Submissions,
    Offers,
    Enrollment,
}

/// The process-wide pipeline invariants: phase ordering and the intake
/// document checklist. Hoisted into one immutable object so the ordering
/// invariant is enforced in a single place.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub phases: Vec<Phase>,
    pub required_documents: Vec<DocumentType>,
}

impl PipelineConfig {
    pub fn standard() -> Self {
        Self {
            phases: ALL_PHASES.to_vec(),
            required_documents: vec![
                DocumentType::Passport,
                DocumentType::Transcript,
                DocumentType::Sop,
                DocumentType::Lor,
                DocumentType::EnglishTest,
                DocumentType::FinancialProof,
            ],
        }
    }

    pub fn total_phases(&self) -> usize {
        self.phases.len()
    }

    pub fn index_of(&self, phase: Phase) -> Option<usize> {
        self.phases.iter().position(|candidate| *candidate == phase)
    }
}
