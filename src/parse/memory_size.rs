//! Byte-size grammar used to validate `memorysize`-kind config parameter
//! default values. Units `K,M,G,T,P` are decimal (base 1000); `Ki,Mi,Gi,Ti,Pi`
//! are binary (base 1024); `B` and a bare number are bytes.

use regex::Regex;

const KILO: u64 = 1000;
const KIBI: u64 = 1024;

/// Parses a string of the form `<value><unit>` or `<value> <unit>` into a
/// byte count. Returns `None` on malformed input or an unrecognized unit.
pub fn parse_memory_size(input: &str) -> Option<u64> {
    let re = Regex::new(r"^\s*(\d+)\s*([A-Za-z]*)\s*$").expect("static pattern is valid");
    let captures = re.captures(input)?;
    let value: u64 = captures.get(1)?.as_str().parse().ok()?;
    let unit = captures.get(2).map(|m| m.as_str()).unwrap_or("");

    let multiplier: u64 = match unit {
        "" | "B" => 1,
        "K" => KILO,
        "M" => KILO.pow(2),
        "G" => KILO.pow(3),
        "T" => KILO.pow(4),
        "P" => KILO.pow(5),
        "Ki" => KIBI,
        "Mi" => KIBI.pow(2),
        "Gi" => KIBI.pow(3),
        "Ti" => KIBI.pow(4),
        "Pi" => KIBI.pow(5),
        _ => return None,
    };
    value.checked_mul(multiplier)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_decimal_and_binary_units() {
        assert_eq!(parse_memory_size("20 M"), Some(20 * 1000 * 1000));
        assert_eq!(parse_memory_size("1Ki"), Some(1024));
        assert_eq!(parse_memory_size("512B"), Some(512));
    }

    #[test]
    fn rejects_unknown_unit() {
        assert_eq!(parse_memory_size("42 pigeons"), None);
    }
}
