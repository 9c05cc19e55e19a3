use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Identifier wrapper for students handed over by the record store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StudentId(pub String);

/// Full record set for one student, fetched once from the record store
/// before the engine runs. The engine never reaches back out for more data.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentSnapshot {
    pub student_id: StudentId,
    #[serde(default)]
    pub documents: Vec<DocumentRecord>,
    #[serde(default)]
    pub applications: Vec<ApplicationRecord>,
    #[serde(default)]
    pub country_profiles: Vec<CountryProfile>,
}

/// One uploaded document row. Resubmissions produce multiple rows per type.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentRecord {
    #[serde(rename = "type")]
    pub document_type: DocumentType,
    pub status: DocumentStatus,
    /// Superseded uploads carry `false`. Absence means the upload is current.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_latest: Option<bool>,
}

impl DocumentRecord {
    pub fn is_current(&self) -> bool {
        self.is_latest != Some(false)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DocumentType {
    Passport,
    Transcript,
    Sop,
    Lor,
    Resume,
    EnglishTest,
    FinancialProof,
    /// Catch-all for document kinds this build does not know about yet.
    #[serde(other)]
    Other,
}

impl DocumentType {
    pub const fn label(self) -> &'static str {
        match self {
            DocumentType::Passport => "Passport",
            DocumentType::Transcript => "Transcript",
            DocumentType::Sop => "Statement of Purpose",
            DocumentType::Lor => "Letter of Recommendation",
            DocumentType::Resume => "Resume",
            DocumentType::EnglishTest => "English Test Score",
            DocumentType::FinancialProof => "Financial Proof",
            DocumentType::Other => "Other Document",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DocumentStatus {
    Approved,
    Pending,
    Rejected,
    #[serde(other)]
    Other,
}

/// One application row, always tied to a university reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationRecord {
    pub application_status: ApplicationStatus,
    pub university: UniversityRef,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApplicationStatus {
    Submitted,
    Pending,
    UnderReview,
    Accepted,
    Rejected,
    #[serde(other)]
    Other,
}

/// University reference as it appears across application rows and notes
/// blobs. Notes-only and synthesized legacy records often lack an id, and
/// country is not reliably recorded anywhere.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UniversityRef {
    #[serde(deserialize_with = "id_as_string", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

impl UniversityRef {
    /// Identity used by every dedup pass: database id when present, else the
    /// normalized name. References carrying neither have no identity and are
    /// dropped from resolver output.
    pub fn identity_key(&self) -> Option<UniversityKey> {
        if let Some(id) = self.id.as_deref() {
            let id = id.trim();
            if !id.is_empty() {
                return Some(UniversityKey::Id(id.to_string()));
            }
        }
        let name = self.name.as_deref()?.trim();
        if name.is_empty() {
            return None;
        }
        Some(UniversityKey::Name(name.to_lowercase()))
    }
}

/// Mixed identity key: real data contains both database-backed and
/// notes-only (id-less) university references.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum UniversityKey {
    Id(String),
    Name(String),
}

/// Per-destination-country tracking record. `current_phase` is kept raw:
/// legacy rows carry phase values this build no longer recognizes, and the
/// engine must degrade rather than fail on them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryProfile {
    pub country: String,
    pub current_phase: String,
    /// Opaque serialized blob; see `decode_notes`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<Value>,
}

fn id_as_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|value| match value {
        Value::String(raw) => {
            let trimmed = raw.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }))
}
