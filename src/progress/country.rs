use std::collections::HashMap;
use std::sync::OnceLock;

static COUNTRY_ALIAS_MAP: OnceLock<HashMap<String, &'static str>> = OnceLock::new();

/// Canonicalizes a free-text country name to a fixed code.
///
/// Profiles, university rows, and caller selections are all entered by hand,
/// so the same destination shows up as "UK", "U.K.", or "United Kingdom".
/// Unrecognized input passes through trimmed and uppercased unchanged, which
/// keeps unknown countries equal to themselves. Empty input normalizes to an
/// empty string. Every country comparison in the engine goes through here;
/// raw strings are never compared directly.
pub fn normalize_country(raw: &str) -> String {
    let collapsed = raw.trim().split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.is_empty() {
        return String::new();
    }
    let upper = collapsed.to_uppercase();
    let key = scrub_alias(&upper);
    match country_alias_map().get(&key) {
        Some(code) => (*code).to_string(),
        None => upper,
    }
}

fn scrub_alias(value: &str) -> String {
    value.replace(['.', ','], "")
}

fn country_alias_map() -> &'static HashMap<String, &'static str> {
    COUNTRY_ALIAS_MAP.get_or_init(|| {
        const ALIAS_TO_CODE: &[(&str, &str)] = &[
            ("UK", "UK"),
            ("U.K.", "UK"),
            ("UNITED KINGDOM", "UK"),
            ("GREAT BRITAIN", "UK"),
            ("ENGLAND", "UK"),
            ("US", "USA"),
            ("U.S.", "USA"),
            ("USA", "USA"),
            ("U.S.A.", "USA"),
            ("UNITED STATES", "USA"),
            ("UNITED STATES OF AMERICA", "USA"),
            ("AMERICA", "USA"),
            ("CANADA", "CANADA"),
            ("CA", "CANADA"),
            ("AUSTRALIA", "AUSTRALIA"),
            ("AUS", "AUSTRALIA"),
            ("NEW ZEALAND", "NEW ZEALAND"),
            ("NZ", "NEW ZEALAND"),
            ("IRELAND", "IRELAND"),
            ("REPUBLIC OF IRELAND", "IRELAND"),
            ("GERMANY", "GERMANY"),
            ("DEUTSCHLAND", "GERMANY"),
            ("UAE", "UAE"),
            ("U.A.E.", "UAE"),
            ("UNITED ARAB EMIRATES", "UAE"),
            ("SINGAPORE", "SINGAPORE"),
        ];

        let mut map = HashMap::with_capacity(ALIAS_TO_CODE.len());
        for (alias, code) in ALIAS_TO_CODE {
            map.insert(scrub_alias(&alias.to_uppercase()), *code);
        }
        map
    })
}
