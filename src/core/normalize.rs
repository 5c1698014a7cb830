//! State / city cleaning.
//!
//! Cleaning produces the canonical label used for grouping. Display
//! decoration is a separate step ([`display_city_label`]) that only the
//! rendering side calls.

use once_cell::sync::Lazy;
use std::collections::HashMap;

pub const UNKNOWN: &str = "Unknown";

const MUMBAI: &str = "Mumbai";
const DELHI_NCR: &str = "Delhi NCR";

/// 大寫城市名 -> 合併後的城市名
static CITY_MERGE: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("MUMBAI", MUMBAI),
        ("NAVI MUMBAI", MUMBAI),
        ("NAVI-MUMBAI", MUMBAI),
        ("NEW MUMBAI", MUMBAI),
        ("DELHI", DELHI_NCR),
        ("NEW DELHI", DELHI_NCR),
        ("GURGAON", DELHI_NCR),
        ("GURUGRAM", DELHI_NCR),
        ("NOIDA", DELHI_NCR),
        ("FARIDABAD", DELHI_NCR),
        ("GHAZIABAD", DELHI_NCR),
    ])
});

/// Looks a city up in the merge table. Case and surrounding whitespace are
/// ignored; `None` means the city is not merged.
pub fn canonicalize(name: &str) -> Option<&'static str> {
    CITY_MERGE.get(name.trim().to_uppercase().as_str()).copied()
}

pub fn clean_state(raw: Option<&str>) -> String {
    match present(raw) {
        Some(value) => title_case(value),
        None => UNKNOWN.to_string(),
    }
}

pub fn clean_city(raw: Option<&str>) -> String {
    match present(raw) {
        Some(value) => match canonicalize(value) {
            Some(merged) => merged.to_string(),
            None => title_case(value),
        },
        None => UNKNOWN.to_string(),
    }
}

/// 畫面上合併城市加上 "++" 標記；統計時一律使用原本的標籤
pub fn display_city_label(name: &str) -> &str {
    match name {
        MUMBAI => "Mumbai ++",
        DELHI_NCR => "Delhi ++",
        other => other,
    }
}

/// Trimmed cell value, or `None` for blanks and the literal `nan`.
pub fn present(raw: Option<&str>) -> Option<&str> {
    let value = raw?.trim();
    if value.is_empty() || value.eq_ignore_ascii_case("nan") {
        None
    } else {
        Some(value)
    }
}

/// Word-initial letters upper, every other letter lower. A word starts after
/// any non-letter, so `navi-mumbai` becomes `Navi-Mumbai`.
pub fn title_case(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut prev_is_letter = false;

    for c in value.chars() {
        if c.is_alphabetic() {
            if prev_is_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_is_letter = true;
        } else {
            out.push(c);
            prev_is_letter = false;
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_variants_ignore_case_and_padding() {
        for raw in ["  gurgaon ", "GURGAON", "Gurgaon", "new delhi", "Noida"] {
            assert_eq!(clean_city(Some(raw)), "Delhi NCR", "input {:?}", raw);
        }
        for raw in ["navi-mumbai", "NAVI MUMBAI", " New Mumbai", "mumbai"] {
            assert_eq!(clean_city(Some(raw)), "Mumbai", "input {:?}", raw);
        }
    }

    #[test]
    fn test_blank_values_become_unknown() {
        for raw in [Some(""), None, Some("   "), Some("nan"), Some("NaN"), Some(" NAN ")] {
            assert_eq!(clean_city(raw), UNKNOWN);
            assert_eq!(clean_state(raw), UNKNOWN);
        }
    }

    #[test]
    fn test_state_is_title_cased_not_merged() {
        assert_eq!(clean_state(Some("delhi")), "Delhi");
        assert_eq!(clean_state(Some("  TAMIL NADU ")), "Tamil Nadu");
        assert_eq!(clean_state(Some("jammu & kashmir")), "Jammu & Kashmir");
    }

    #[test]
    fn test_unmerged_city_is_title_cased() {
        assert_eq!(clean_city(Some("PUNE")), "Pune");
        assert_eq!(clean_city(Some(" bengaluru ")), "Bengaluru");
        assert_eq!(clean_city(Some("port blair")), "Port Blair");
    }

    #[test]
    fn test_title_case_word_boundaries() {
        assert_eq!(title_case("navi-mumbai"), "Navi-Mumbai");
        assert_eq!(title_case("o'NEIL"), "O'Neil");
        assert_eq!(title_case("sector 62a"), "Sector 62A");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn test_canonicalize() {
        assert_eq!(canonicalize("faridabad"), Some("Delhi NCR"));
        assert_eq!(canonicalize(" Navi-Mumbai "), Some("Mumbai"));
        assert_eq!(canonicalize("Pune"), None);
    }

    #[test]
    fn test_display_label_only_decorates_merged_cities() {
        assert_eq!(display_city_label("Mumbai"), "Mumbai ++");
        assert_eq!(display_city_label("Delhi NCR"), "Delhi ++");
        assert_eq!(display_city_label("Pune"), "Pune");
        assert_eq!(display_city_label("Unknown"), "Unknown");
    }

    #[test]
    fn test_display_label_is_idempotent_on_other_labels() {
        for label in ["Pune", "Mumbai ++", "Delhi ++", "Delhi", "", "mumbai"] {
            let once = display_city_label(label);
            assert_eq!(display_city_label(once), once);
        }
    }
}
