use super::country::normalize_country;
use super::domain::{ApplicationRecord, ApplicationStatus, UniversityRef};
use super::notes::CountryNotes;
use super::pipeline::UniversitySource;
use std::collections::HashSet;

/// Statuses that mark an application as actually submitted somewhere.
const SUBMITTED_STATUSES: [ApplicationStatus; 4] = [
    ApplicationStatus::Submitted,
    ApplicationStatus::Pending,
    ApplicationStatus::UnderReview,
    ApplicationStatus::Accepted,
];

/// Resolves the university list shown on one phase entry.
///
/// Notes entries and application rows disagree constantly: the same
/// university may appear in both with different casing, with and without a
/// database id, or with no country recorded at all. Each source union is
/// deduplicated through `UniversityRef::identity_key`, preserving first-seen
/// order; references with neither id nor name are dropped.
pub fn universities_for_source(
    source: UniversitySource,
    notes: &CountryNotes,
    applications: &[ApplicationRecord],
    selected_country: &str,
    profile_in_enrollment: bool,
) -> Vec<UniversityRef> {
    let candidates = match source {
        UniversitySource::Shortlist => {
            let selected = normalize_country(selected_country);
            let mut candidates: Vec<UniversityRef> = notes
                .university_shortlist
                .iter()
                .filter(|university| match university.country.as_deref() {
                    // No country on the entry means no basis to exclude it.
                    None => true,
                    Some(country) => normalize_country(country) == selected,
                })
                .cloned()
                .collect();
            candidates.extend(
                attributable_applications(applications, &selected)
                    .into_iter()
                    .map(|application| application.university.clone()),
            );
            candidates
        }
        UniversitySource::Submissions => {
            let mut candidates = notes.universities_with_applications.clone();
            candidates.extend(
                applications
                    .iter()
                    .filter(|application| {
                        SUBMITTED_STATUSES.contains(&application.application_status)
                    })
                    .map(|application| application.university.clone()),
            );
            candidates
        }
        UniversitySource::Offers => {
            let mut candidates = notes.universities_with_offers.clone();
            candidates.extend(accepted_universities(applications));
            candidates
        }
        UniversitySource::Enrollment => {
            enrollment_candidates(notes, applications, profile_in_enrollment)
        }
    };

    dedup_universities(candidates)
}

/// Enrollment attribution cascade, strongest signal first: the explicit
/// notes entry, then the legacy deposit/payment entry, then a fuzzy match of
/// the legacy free-text marker against application university names, and as
/// a last resort (only once the profile has actually reached Enrollment) all
/// accepted applications.
fn enrollment_candidates(
    notes: &CountryNotes,
    applications: &[ApplicationRecord],
    profile_in_enrollment: bool,
) -> Vec<UniversityRef> {
    if let Some(university) = &notes.enrollment_university {
        return vec![university.clone()];
    }
    if let Some(university) = &notes.deposit_university {
        return vec![university.clone()];
    }

    if let Some(marker) = notes.enrollment_text.as_deref() {
        let needle = marker.trim().to_lowercase();
        if !needle.is_empty() {
            let matched: Vec<UniversityRef> = applications
                .iter()
                .filter(|application| {
                    application
                        .university
                        .name
                        .as_deref()
                        .map(|name| {
                            let name = name.to_lowercase();
                            name.contains(&needle) || needle.contains(&name)
                        })
                        .unwrap_or(false)
                })
                .map(|application| application.university.clone())
                .collect();
            if !matched.is_empty() {
                return matched;
            }
        }
    }

    if profile_in_enrollment {
        accepted_universities(applications)
    } else {
        Vec::new()
    }
}

/// Applications that belong to the selected country track. A university with
/// no recorded country gets the benefit of the doubt and is included. When
/// nothing matches at all, every application is used instead: an empty list
/// caused purely by data-entry inconsistency helps nobody.
fn attributable_applications<'a>(
    applications: &'a [ApplicationRecord],
    selected: &str,
) -> Vec<&'a ApplicationRecord> {
    let matched: Vec<&ApplicationRecord> = applications
        .iter()
        .filter(|application| match application.university.country.as_deref() {
            None => true,
            Some(country) => normalize_country(country) == selected,
        })
        .collect();

    if matched.is_empty() {
        applications.iter().collect()
    } else {
        matched
    }
}

fn accepted_universities(applications: &[ApplicationRecord]) -> Vec<UniversityRef> {
    applications
        .iter()
        .filter(|application| application.application_status == ApplicationStatus::Accepted)
        .map(|application| application.university.clone())
        .collect()
}

fn dedup_universities(candidates: Vec<UniversityRef>) -> Vec<UniversityRef> {
    let mut seen = HashSet::new();
    let mut unique = Vec::new();
    for university in candidates {
        let Some(key) = university.identity_key() else {
            continue;
        };
        if seen.insert(key) {
            unique.push(university);
        }
    }
    unique
}
