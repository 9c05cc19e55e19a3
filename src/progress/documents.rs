use super::domain::{DocumentRecord, DocumentStatus, DocumentType};
use std::collections::HashSet;

/// Intake checklist result: how much of the required set is covered and
/// which requirement types remain open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentScore {
    pub percent: u8,
    pub missing: Vec<DocumentType>,
}

/// Scores the student's uploads against the required checklist.
///
/// Superseded uploads (`isLatest: false`) are excluded; an absent flag counts
/// as current. Only APPROVED or PENDING uploads satisfy a requirement, and a
/// resubmitted type counts once. `missing` preserves the checklist order so
/// counselors see requirements in the order they are asked for.
pub fn score_documents(documents: &[DocumentRecord], required: &[DocumentType]) -> DocumentScore {
    if required.is_empty() {
        return DocumentScore {
            percent: 100,
            missing: Vec::new(),
        };
    }

    let mut satisfied: HashSet<DocumentType> = HashSet::new();
    for document in documents {
        if !document.is_current() {
            continue;
        }
        if !matches!(
            document.status,
            DocumentStatus::Approved | DocumentStatus::Pending
        ) {
            continue;
        }
        if required.contains(&document.document_type) {
            satisfied.insert(document.document_type);
        }
    }

    let percent = (100.0 * satisfied.len() as f64 / required.len() as f64).round() as u8;
    let missing = required
        .iter()
        .filter(|document_type| !satisfied.contains(document_type))
        .copied()
        .collect();

    DocumentScore { percent, missing }
}
