use crate::error::AppError;
use crate::progress::domain::StudentSnapshot;
use crate::progress::{PhaseStatus, ProgressEngine, ProgressReport};
use chrono::Local;
use clap::Args;
use std::fmt::Write as _;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct ProgressReportArgs {
    /// Path to a JSON student snapshot as exported by the record store
    #[arg(long)]
    pub(crate) snapshot: PathBuf,
    /// Destination country to report on (free text, normalized internally)
    #[arg(long)]
    pub(crate) country: String,
    /// Emit the raw report as JSON instead of the counselor view
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_progress_report(args: ProgressReportArgs) -> Result<(), AppError> {
    let raw = std::fs::read_to_string(&args.snapshot)?;
    let snapshot: StudentSnapshot = serde_json::from_str(&raw)?;

    let engine = ProgressEngine::default();
    let report = engine.compute(&snapshot, &args.country);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render_report(&report));
    }
    Ok(())
}

fn render_report(report: &ProgressReport) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Progress for student {} — {} ({})",
        report.student_id.0,
        report.country,
        Local::now().date_naive()
    );
    let _ = writeln!(out, "Overall: {}%", report.overall_percent);
    let _ = writeln!(out);

    for entry in &report.phases {
        let marker = match entry.status {
            PhaseStatus::Completed => "[x]",
            PhaseStatus::Current => "[>]",
            PhaseStatus::Pending => "[ ]",
        };
        let _ = writeln!(
            out,
            "{} {:<24} {:>3}%  {}",
            marker,
            entry.phase_label,
            entry.percent,
            entry.status.label()
        );

        if let Some(missing) = &entry.missing_documents {
            if !missing.is_empty() {
                let labels: Vec<&str> = missing.iter().map(|t| t.label()).collect();
                let _ = writeln!(out, "      missing: {}", labels.join(", "));
            }
        }
        if let Some(universities) = &entry.universities {
            if !universities.is_empty() {
                let names: Vec<&str> = universities
                    .iter()
                    .filter_map(|u| u.name.as_deref())
                    .collect();
                if !names.is_empty() {
                    let _ = writeln!(out, "      universities: {}", names.join(", "));
                }
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::domain::{CountryProfile, StudentId};
    use serde_json::json;

    #[test]
    fn counselor_view_lists_every_phase_with_markers() {
        let snapshot = StudentSnapshot {
            student_id: StudentId("stu-9".to_string()),
            documents: Vec::new(),
            applications: Vec::new(),
            country_profiles: vec![CountryProfile {
                country: "UK".to_string(),
                current_phase: "OFFER".to_string(),
                notes: Some(json!({ "universitiesWithOffers": ["Edinburgh"] })),
            }],
        };

        let report = ProgressEngine::default().compute(&snapshot, "UK");
        let rendered = render_report(&report);

        assert!(rendered.contains("Overall: 30%"));
        assert!(rendered.contains("[x] Document Collection"));
        assert!(rendered.contains("[>] Offer"));
        assert!(rendered.contains("[ ] Enrollment"));
        assert!(rendered.contains("universities: Edinburgh"));
    }
}
