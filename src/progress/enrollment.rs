use super::domain::CountryProfile;
use super::notes::{decode_notes, CountryNotes};
use super::pipeline::Phase;

/// Determines whether a country track has completed enrollment.
///
/// Enrollment is recorded in at least three weakly-consistent ways: the
/// profile's phase pointer, the structured enrollment entry in notes, and a
/// legacy free-text marker. Any one of them is enough; absent or undecodable
/// notes simply read as "not enrolled".
pub fn is_enrolled(profile: &CountryProfile) -> bool {
    if Phase::parse(&profile.current_phase) == Some(Phase::Enrollment) {
        return true;
    }
    enrolled_per_notes(&decode_notes(profile.notes.as_ref()))
}

/// Notes-only leg of the detector, for callers that already decoded.
pub(crate) fn enrolled_per_notes(notes: &CountryNotes) -> bool {
    notes.enrollment_university.is_some()
        || notes
            .enrollment_text
            .as_deref()
            .map(|marker| !marker.trim().is_empty())
            .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn profile(current_phase: &str, notes: Option<serde_json::Value>) -> CountryProfile {
        CountryProfile {
            country: "UK".to_string(),
            current_phase: current_phase.to_string(),
            notes,
        }
    }

    #[test]
    fn phase_pointer_alone_is_enough() {
        assert!(is_enrolled(&profile("ENROLLMENT", None)));
    }

    #[test]
    fn notes_entry_alone_is_enough() {
        let notes = json!({ "enrollmentUniversity": { "university": { "name": "X" } } });
        assert!(is_enrolled(&profile("VISA_DECISION", Some(notes))));
    }

    #[test]
    fn legacy_text_marker_counts() {
        let notes = json!({ "enrollmentUniversity": "oxford" });
        assert!(is_enrolled(&profile("PRE_DEPARTURE", Some(notes))));

        let blank = json!({ "enrollmentUniversity": "   " });
        assert!(!is_enrolled(&profile("PRE_DEPARTURE", Some(blank))));
    }

    #[test]
    fn undecodable_notes_read_as_not_enrolled() {
        let garbage = serde_json::Value::String("{broken".to_string());
        assert!(!is_enrolled(&profile("OFFER", Some(garbage))));
    }
}
