use counselpath::progress::domain::{
    ApplicationRecord, ApplicationStatus, CountryProfile, DocumentRecord, DocumentStatus,
    DocumentType, StudentId, StudentSnapshot, UniversityRef,
};
use counselpath::progress::pipeline::{Phase, PipelineConfig};
use counselpath::progress::{PhaseStatus, ProgressEngine};
use serde_json::{json, Value};

fn intake_engine() -> ProgressEngine {
    // Three-item checklist over the full ten-phase pipeline.
    ProgressEngine::new(PipelineConfig {
        required_documents: vec![DocumentType::Passport, DocumentType::Transcript, DocumentType::Sop],
        ..PipelineConfig::standard()
    })
}

fn document(document_type: DocumentType, status: DocumentStatus, is_latest: Option<bool>) -> DocumentRecord {
    DocumentRecord {
        document_type,
        status,
        is_latest,
    }
}

fn application(status: ApplicationStatus, name: &str, country: Option<&str>) -> ApplicationRecord {
    ApplicationRecord {
        application_status: status,
        university: UniversityRef {
            id: None,
            name: Some(name.to_string()),
            country: country.map(str::to_string),
        },
    }
}

fn snapshot_with(
    documents: Vec<DocumentRecord>,
    applications: Vec<ApplicationRecord>,
    current_phase: &str,
    notes: Option<Value>,
) -> StudentSnapshot {
    StudentSnapshot {
        student_id: StudentId("stu-1".to_string()),
        documents,
        applications,
        country_profiles: vec![CountryProfile {
            country: "United Kingdom".to_string(),
            current_phase: current_phase.to_string(),
            notes,
        }],
    }
}

#[test]
fn intake_scenario_scores_and_weights_as_documented() {
    let documents = vec![
        document(DocumentType::Passport, DocumentStatus::Approved, Some(true)),
        document(DocumentType::Transcript, DocumentStatus::Pending, Some(true)),
    ];
    let snapshot = snapshot_with(documents, Vec::new(), "DOCUMENT_COLLECTION", None);

    let report = intake_engine().compute(&snapshot, "UK");

    let intake = &report.phases[0];
    assert_eq!(intake.phase, Phase::DocumentCollection);
    assert_eq!(intake.status, PhaseStatus::Current);
    assert_eq!(intake.percent, 67);
    assert_eq!(
        intake.missing_documents.as_deref(),
        Some([DocumentType::Sop].as_slice())
    );
    assert_eq!(report.overall_percent, 7);
}

#[test]
fn phases_behind_the_pointer_always_read_complete() {
    // No documents, no applications, nothing in notes: evidence plays no
    // role for phases the pointer has moved past.
    let snapshot = snapshot_with(Vec::new(), Vec::new(), "VISA_APPLICATION", None);
    let report = intake_engine().compute(&snapshot, "UK");

    let current_index = report
        .phases
        .iter()
        .position(|entry| entry.status == PhaseStatus::Current)
        .expect("a current phase exists");
    assert_eq!(report.phases[current_index].phase, Phase::VisaApplication);

    for entry in &report.phases[..current_index] {
        assert_eq!(entry.status, PhaseStatus::Completed);
        assert_eq!(entry.percent, 100);
    }
    for entry in &report.phases[current_index + 1..] {
        assert_eq!(entry.status, PhaseStatus::Pending);
        assert_eq!(entry.percent, 0);
    }
}

#[test]
fn duplicate_approved_documents_change_nothing() {
    let mut documents = vec![
        document(DocumentType::Passport, DocumentStatus::Approved, Some(true)),
        document(DocumentType::Transcript, DocumentStatus::Pending, Some(true)),
    ];
    let baseline = intake_engine()
        .compute(
            &snapshot_with(documents.clone(), Vec::new(), "DOCUMENT_COLLECTION", None),
            "UK",
        )
        .overall_percent;

    documents.push(document(DocumentType::Passport, DocumentStatus::Approved, Some(true)));
    let with_duplicate = intake_engine()
        .compute(
            &snapshot_with(documents, Vec::new(), "DOCUMENT_COLLECTION", None),
            "UK",
        )
        .overall_percent;

    assert_eq!(baseline, with_duplicate);
}

#[test]
fn superseded_upload_does_not_satisfy_its_requirement() {
    let documents = vec![document(DocumentType::Sop, DocumentStatus::Approved, Some(false))];
    let snapshot = snapshot_with(documents, Vec::new(), "DOCUMENT_COLLECTION", None);

    let report = intake_engine().compute(&snapshot, "UK");
    let intake = &report.phases[0];
    assert_eq!(intake.percent, 0);
    assert!(intake
        .missing_documents
        .as_deref()
        .expect("missing list present")
        .contains(&DocumentType::Sop));
}

#[test]
fn any_notes_garbage_still_yields_a_bounded_report() {
    let blobs = [
        json!("{definitely not json"),
        json!(12345),
        json!(["an", "array"]),
        json!("\"a bare string\""),
        json!({ "universityShortlist": { "nested": { "wrong": "shape" } } }),
    ];

    for blob in blobs {
        let snapshot = snapshot_with(Vec::new(), Vec::new(), "UNIVERSITY_SHORTLISTING", Some(blob.clone()));
        let report = intake_engine().compute(&snapshot, "UK");
        assert!(report.overall_percent <= 100, "blob: {blob}");
        assert_eq!(report.phases.len(), 10);
    }
}

#[test]
fn enrollment_reads_complete_while_nominally_current() {
    let notes = json!({ "enrollmentUniversity": { "university": { "name": "X" } } });
    let snapshot = snapshot_with(Vec::new(), Vec::new(), "ENROLLMENT", Some(notes));

    let report = intake_engine().compute(&snapshot, "UK");
    let terminal = report.phases.last().expect("terminal phase");
    assert_eq!(terminal.phase, Phase::Enrollment);
    assert_eq!(terminal.percent, 100);
    assert_eq!(terminal.status, PhaseStatus::Completed);
}

#[test]
fn shortlist_falls_back_to_all_applications_when_no_country_matches() {
    let applications = vec![
        application(ApplicationStatus::Submitted, "Toronto", Some("Canada")),
        application(ApplicationStatus::Submitted, "McGill", Some("Canada")),
    ];
    let snapshot = snapshot_with(Vec::new(), applications, "UNIVERSITY_SHORTLISTING", None);

    let report = intake_engine().compute(&snapshot, "UK");
    let shortlist = report
        .phases
        .iter()
        .find(|entry| entry.phase == Phase::UniversityShortlisting)
        .expect("shortlisting entry");
    assert_eq!(
        shortlist.universities.as_ref().map(Vec::len),
        Some(2),
        "degradation policy: never empty purely from data-entry inconsistency"
    );
}

#[test]
fn drifted_phase_value_degrades_without_panicking() {
    let snapshot = snapshot_with(Vec::new(), Vec::new(), "LEGACY_UNUSED_PHASE", None);
    let report = intake_engine().compute(&snapshot, "UK");

    assert_eq!(report.current_phase, None);
    assert_eq!(report.overall_percent, 0);
    assert!(report.phases.iter().all(|entry| entry.status == PhaseStatus::Pending));
}

#[test]
fn snapshot_json_shape_from_the_record_store_decodes() {
    let snapshot: StudentSnapshot = serde_json::from_value(json!({
        "studentId": "stu-77",
        "documents": [
            { "type": "PASSPORT", "status": "APPROVED", "isLatest": true },
            { "type": "TRANSCRIPT", "status": "REJECTED" }
        ],
        "applications": [
            {
                "applicationStatus": "ACCEPTED",
                "university": { "id": 12, "name": "Oxford", "country": "U.K." }
            }
        ],
        "countryProfiles": [
            {
                "country": "uk",
                "currentPhase": "OFFER",
                "notes": "{\"universitiesWithOffers\":[{\"university\":{\"name\":\"Oxford\"}}]}"
            }
        ]
    }))
    .expect("record-store shape decodes");

    let report = ProgressEngine::default().compute(&snapshot, "United Kingdom");
    assert_eq!(report.current_phase, Some(Phase::Offer));

    let offer = report
        .phases
        .iter()
        .find(|entry| entry.phase == Phase::Offer)
        .expect("offer entry");
    // Notes-only Oxford (no id) and the application row (id 12) carry
    // different identity keys, so both survive the union.
    assert_eq!(offer.universities.as_ref().map(Vec::len), Some(2));
}
