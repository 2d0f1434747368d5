//! Character-class rules and id derivation for streamlets, ports, volume
//! mounts, class names, and application ids (spec §4.1).
//!
//! These are pure predicate/transform functions; none of them log or
//! allocate external resources, matching the "Regex compilation... must not
//! allocate external resources" constraint in §5 (compiled fresh per call,
//! no cached handles).

use regex::Regex;

use crate::constants::MAX_VOLUME_MOUNT_NAME;

const MAX_REF_OR_PORT_NAME: usize = 253;

/// `^[a-z0-9][a-z0-9-]*$`, used for streamlet ref names and port names.
fn is_dns_like(s: &str) -> bool {
    if s.is_empty() {
        return false;
    }
    let mut chars = s.chars();
    let first = chars.next().unwrap();
    if !(first.is_ascii_lowercase() || first.is_ascii_digit()) {
        return false;
    }
    chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

/// A streamlet ref name: `^[a-z0-9][a-z0-9-]*$`, length <= 253.
pub fn is_valid_ref_name(s: &str) -> bool {
    is_dns_like(s) && s.len() <= MAX_REF_OR_PORT_NAME
}

/// A port name: same character class as a ref name, but additionally must
/// not end with `-` (spec §3, Port).
pub fn is_valid_port_name(s: &str) -> bool {
    is_dns_like(s) && s.len() <= MAX_REF_OR_PORT_NAME && !s.ends_with('-')
}

/// A Kubernetes DNS-1123 label: `^[a-z0-9]([-a-z0-9]*[a-z0-9])?$`, <= 63 chars.
pub fn is_valid_volume_mount_name(s: &str) -> bool {
    if s.is_empty() || s.len() > MAX_VOLUME_MOUNT_NAME {
        return false;
    }
    let bytes: Vec<char> = s.chars().collect();
    let first = bytes[0];
    let last = *bytes.last().unwrap();
    if !(first.is_ascii_lowercase() || first.is_ascii_digit()) {
        return false;
    }
    if !(last.is_ascii_lowercase() || last.is_ascii_digit()) {
        return false;
    }
    bytes
        .iter()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '-')
}

/// A dotted-segment class name: segments `[A-Za-z_][A-Za-z0-9_]*` joined by
/// `.`, first segment must start with a letter.
pub fn is_valid_class_name(s: &str) -> bool {
    if s.is_empty() {
        return false;
    }
    let segments: Vec<&str> = s.split('.').collect();
    if segments.iter().any(|seg| seg.is_empty()) {
        return false;
    }
    let segment_ok = |seg: &str, must_start_with_letter: bool| -> bool {
        let mut chars = seg.chars();
        let first = chars.next().unwrap();
        let first_ok = if must_start_with_letter {
            first.is_ascii_alphabetic()
        } else {
            first.is_ascii_alphabetic() || first == '_'
        };
        first_ok && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
    };
    segments
        .iter()
        .enumerate()
        .all(|(i, seg)| segment_ok(seg, i == 0))
}

/// Strips combining diacritical marks from a string after NFD-style manual
/// decomposition of the common Latin-1 supplement letters. This mirrors the
/// small, fixed transliteration table the source application id normalizer
/// relies on rather than pulling in a full Unicode normalization stack,
/// since the spec only requires a handful of accented Latin letters.
fn strip_diacritics(c: char) -> char {
    match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' | 'ā' | 'ă' | 'ą' => 'a',
        'À' | 'Á' | 'Â' | 'Ã' | 'Ä' | 'Å' | 'Ā' | 'Ă' | 'Ą' => 'A',
        'è' | 'é' | 'ê' | 'ë' | 'ē' | 'ĕ' | 'ė' | 'ę' | 'ě' => 'e',
        'È' | 'É' | 'Ê' | 'Ë' | 'Ē' | 'Ĕ' | 'Ė' | 'Ę' | 'Ě' => 'E',
        'ì' | 'í' | 'î' | 'ï' | 'ĩ' | 'ī' | 'ĭ' | 'į' => 'i',
        'Ì' | 'Í' | 'Î' | 'Ï' | 'Ĩ' | 'Ī' | 'Ĭ' | 'Į' => 'I',
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ō' | 'ŏ' | 'ő' | 'ø' => 'o',
        'Ò' | 'Ó' | 'Ô' | 'Õ' | 'Ö' | 'Ō' | 'Ŏ' | 'Ő' | 'Ø' => 'O',
        'ù' | 'ú' | 'û' | 'ü' | 'ũ' | 'ū' | 'ŭ' | 'ů' | 'ű' | 'ų' => 'u',
        'Ù' | 'Ú' | 'Û' | 'Ü' | 'Ũ' | 'Ū' | 'Ŭ' | 'Ů' | 'Ű' | 'Ų' => 'U',
        'ñ' | 'ń' | 'ņ' | 'ň' => 'n',
        'Ñ' | 'Ń' | 'Ņ' | 'Ň' => 'N',
        'ç' | 'ć' | 'ĉ' | 'ċ' | 'č' => 'c',
        'Ç' | 'Ć' | 'Ĉ' | 'Ċ' | 'Č' => 'C',
        'ý' | 'ÿ' => 'y',
        'Ý' | 'Ÿ' => 'Y',
        other => other,
    }
}

/// Normalizes a raw application id into a DNS-1123-safe id (spec §4.1).
///
/// Returns `None` if the result would be empty; callers surface this as
/// `BlueprintError::InvalidApplicationId`.
pub fn normalize_app_id(raw: &str) -> Option<String> {
    // 1 & 2: lowercase, transliterate, then replace invalid chars with '-'.
    let transliterated: String = raw
        .chars()
        .map(strip_diacritics)
        .collect::<String>()
        .to_lowercase();
    let replaced: String = transliterated
        .chars()
        .map(|c| if c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' { c } else { '-' })
        .collect();

    // 3: strip leading/trailing '-' and '.'. Done before collapsing and
    // truncating so that a leading separator run never eats into the
    // 63-character budget spent in step 5 (per spec §4.1, steps 3-5 run in
    // this order: strip, then collapse, then truncate-and-strip-trailing).
    let stripped = replaced.trim_matches(|c| c == '-' || c == '.').to_string();

    // 4: collapse runs of '-' into one.
    let collapsed = collapse_dashes(&stripped);

    // 5: truncate to 63 characters on a char boundary, then strip the
    // trailing '-' that truncation may have landed on.
    let truncated = truncate_chars(&collapsed, crate::constants::MAX_APP_ID);
    let result = truncated.trim_end_matches('-').to_string();

    if result.is_empty() {
        None
    } else {
        Some(result)
    }
}

fn collapse_dashes(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_dash = false;
    for c in s.chars() {
        if c == '-' {
            if !prev_dash {
                out.push(c);
            }
            prev_dash = true;
        } else {
            out.push(c);
            prev_dash = false;
        }
    }
    out
}

fn truncate_chars(s: &str, max_len: usize) -> String {
    s.chars().take(max_len).collect()
}

/// Derives the cluster secret name for a streamlet ref (spec §4.1).
pub fn secret_name(ref_name: &str) -> String {
    truncate_chars(ref_name, crate::constants::MAX_SECRET_NAME).trim_end_matches('-').to_string()
}

/// Lazily-compiled helper for callers that need the raw regex form of the
/// ref/port name grammar (e.g. documentation, or validating externally
/// supplied config pattern strings against it). Compiled fresh, per §5.
pub fn ref_name_pattern() -> Regex {
    Regex::new(r"^[a-z0-9][a-z0-9-]*$").expect("static pattern is valid")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ref_name_boundary() {
        let ok = "a".repeat(253);
        assert!(is_valid_ref_name(&ok));
        let too_long = "a".repeat(254);
        assert!(!is_valid_ref_name(&too_long));
    }

    #[test]
    fn ref_name_rejects_bad_chars() {
        assert!(!is_valid_ref_name("-leading"));
        assert!(!is_valid_ref_name("has_underscore"));
        assert!(!is_valid_ref_name("has/slash"));
        assert!(!is_valid_ref_name("has+plus"));
        assert!(!is_valid_ref_name("Uppercase"));
        assert!(!is_valid_ref_name("non-ascii-é"));
        assert!(!is_valid_ref_name(""));
    }

    #[test]
    fn port_name_rejects_trailing_dash() {
        assert!(is_valid_port_name("in-0"));
        assert!(!is_valid_port_name("in-"));
    }

    #[test]
    fn volume_mount_name_boundary() {
        let ok = "a".repeat(63);
        assert!(is_valid_volume_mount_name(&ok));
        let bad = "a".repeat(64);
        assert!(!is_valid_volume_mount_name(&bad));
        assert!(!is_valid_volume_mount_name("-bad"));
        assert!(!is_valid_volume_mount_name("bad-"));
    }

    #[test]
    fn class_name_rules() {
        assert!(is_valid_class_name("com.example.Foo"));
        assert!(is_valid_class_name("Foo"));
        assert!(is_valid_class_name("com._private.Foo"));
        assert!(!is_valid_class_name("_private.Foo"));
        assert!(!is_valid_class_name("1leading.Foo"));
        assert!(!is_valid_class_name("com..Foo"));
        assert!(!is_valid_class_name(""));
    }

    #[test]
    fn app_id_normalization_example() {
        let raw = "-monstrous-some-very-long-NAME-with-ü-in-the-middle-that-still-needs-more-characters-mite-12345.";
        let got = normalize_app_id(raw).unwrap();
        // Leading '-' is stripped (step 3) before the 63-char budget is
        // spent (step 5), so the cut lands one character further into
        // "needs" than it would if the leading separator still occupied a
        // budget slot.
        assert_eq!(
            got,
            "monstrous-some-very-long-name-with-u-in-the-middle-that-still-n"
        );
        assert!(got.len() <= 63);
    }

    #[test]
    fn app_id_normalization_all_invalid_is_none() {
        assert_eq!(normalize_app_id("---..."), None);
    }

    #[test]
    fn secret_name_truncates_and_trims() {
        let long = "a".repeat(260) + "-";
        let name = secret_name(&long);
        assert!(name.len() <= 253);
        assert!(!name.ends_with('-'));
    }
}
