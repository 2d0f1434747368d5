//! Duration grammar used to validate `duration`-kind config parameter
//! default values. Fixed and closed rather than delegated to a
//! locale-sensitive parser, so unrecognized units always fail instead of
//! guessing.

use std::time::Duration;

use regex::Regex;

/// Parses a string of the form `<value><unit>` or `<value> <unit>`, where
/// `unit` is one of the abbreviations `ns,us,ms,s,m,h,d` or their word
/// equivalents (`nanos`, `seconds`, `minutes`, ...). Returns `None` on any
/// malformed input or unrecognized unit.
pub fn parse_duration(input: &str) -> Option<Duration> {
    let re = Regex::new(r"^\s*(\d+)\s*([a-zA-Zµ]+)\s*$").expect("static pattern is valid");
    let captures = re.captures(input)?;
    let value: u64 = captures.get(1)?.as_str().parse().ok()?;
    let unit = captures.get(2)?.as_str().to_ascii_lowercase();

    let duration = match unit.as_str() {
        "ns" | "nanos" | "nanosecond" | "nanoseconds" => Duration::from_nanos(value),
        "us" | "µs" | "micros" | "microsecond" | "microseconds" => Duration::from_micros(value),
        "ms" | "millis" | "millisecond" | "milliseconds" => Duration::from_millis(value),
        "s" | "sec" | "secs" | "second" | "seconds" => Duration::from_secs(value),
        "m" | "min" | "mins" | "minute" | "minutes" => Duration::from_secs(value * 60),
        "h" | "hr" | "hrs" | "hour" | "hours" => Duration::from_secs(value * 60 * 60),
        "d" | "day" | "days" => Duration::from_secs(value * 60 * 60 * 24),
        _ => return None,
    };
    Some(duration)
}
