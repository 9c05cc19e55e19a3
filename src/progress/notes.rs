use super::domain::UniversityRef;
use serde_json::{Map, Value};

/// Structured view over a country profile's notes blob.
///
/// The blob is loosely schematized and has drifted across builds: entries may
/// be wrapper objects, bare university objects, or plain strings, and several
/// keys exist only in legacy rows. Every field here is optional and decoding
/// is total; a malformed blob yields the default (empty) view.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CountryNotes {
    pub university_shortlist: Vec<UniversityRef>,
    pub universities_with_applications: Vec<UniversityRef>,
    pub universities_with_offers: Vec<UniversityRef>,
    pub enrollment_university: Option<UniversityRef>,
    /// Legacy deposit/payment record kept as a fallback enrollment signal.
    pub deposit_university: Option<UniversityRef>,
    /// Legacy free-text enrollment marker, matched fuzzily against
    /// application university names.
    pub enrollment_text: Option<String>,
}

/// Decodes a notes blob. Absent blobs and anything that fails to parse into
/// an object decode to the empty view; historical rows contain truncated and
/// hand-edited payloads, and progress computation must survive all of them.
pub fn decode_notes(blob: Option<&Value>) -> CountryNotes {
    let map = match blob {
        None => return CountryNotes::default(),
        Some(Value::Object(map)) => map.clone(),
        Some(Value::String(raw)) => match serde_json::from_str::<Value>(raw) {
            Ok(Value::Object(map)) => map,
            _ => return CountryNotes::default(),
        },
        Some(_) => return CountryNotes::default(),
    };

    notes_from_map(&map)
}

fn notes_from_map(map: &Map<String, Value>) -> CountryNotes {
    let mut notes = CountryNotes {
        university_shortlist: university_list(map.get("universityShortlist")),
        universities_with_applications: university_list(map.get("universitiesWithApplications")),
        universities_with_offers: university_list(map.get("universitiesWithOffers")),
        ..CountryNotes::default()
    };

    match map.get("enrollmentUniversity") {
        Some(Value::String(raw)) => notes.enrollment_text = non_empty(raw),
        Some(value) => notes.enrollment_university = university_entry(value),
        None => {}
    }
    if notes.enrollment_text.is_none() {
        if let Some(Value::String(raw)) = map.get("enrolledUniversity") {
            notes.enrollment_text = non_empty(raw);
        }
    }

    notes.deposit_university = map
        .get("depositUniversity")
        .or_else(|| map.get("paymentUniversity"))
        .and_then(university_entry);

    notes
}

fn university_list(value: Option<&Value>) -> Vec<UniversityRef> {
    match value {
        Some(Value::Array(entries)) => entries.iter().filter_map(university_entry).collect(),
        // A single entry stored without the surrounding array still counts.
        Some(entry) => university_entry(entry).into_iter().collect(),
        None => Vec::new(),
    }
}

/// Extracts one university reference from a notes entry. Accepts a bare
/// string name, a direct `{id, name, country}` object, or a wrapper object
/// whose `university` field holds either of those; a country recorded on the
/// wrapper fills in for one missing on the inner object.
fn university_entry(value: &Value) -> Option<UniversityRef> {
    match value {
        Value::String(raw) => non_empty(raw).map(|name| UniversityRef {
            name: Some(name),
            ..UniversityRef::default()
        }),
        Value::Object(map) => {
            if let Some(inner) = map.get("university") {
                let mut university = university_entry(inner)?;
                if university.country.is_none() {
                    university.country = string_field(map, "country");
                }
                return Some(university);
            }

            let id = map.get("id").and_then(id_field);
            let name = string_field(map, "name");
            if id.is_none() && name.is_none() {
                return None;
            }
            Some(UniversityRef {
                id,
                name,
                country: string_field(map, "country"),
            })
        }
        _ => None,
    }
}

fn id_field(value: &Value) -> Option<String> {
    match value {
        Value::String(raw) => non_empty(raw),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

fn string_field(map: &Map<String, Value>, key: &str) -> Option<String> {
    map.get(key).and_then(Value::as_str).and_then(non_empty)
}

fn non_empty(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
