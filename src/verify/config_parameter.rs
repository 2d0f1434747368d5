//! Config parameter validation (spec §4.5a).

use std::collections::HashSet;

use regex::Regex;

use crate::descriptor::{ConfigParameterDescriptor, ConfigParameterKind};
use crate::parse::{parse_duration, parse_memory_size};
use crate::problem::Problem;

/// Validates one descriptor's config parameters: duplicate keys, pattern
/// compilation, and default-value parsing against `kind` (spec §4.5a).
pub fn validate(params: &[ConfigParameterDescriptor]) -> Vec<Problem> {
    let mut problems = Vec::new();
    let mut seen_keys = HashSet::new();

    for param in params {
        if !seen_keys.insert(param.key.clone()) {
            problems.push(Problem::DuplicateConfigParameterKeyFound {
                key: param.key.clone(),
            });
        }

        let compiled_pattern = match &param.pattern {
            Some(pattern) => match Regex::new(pattern) {
                Ok(re) => Some(re),
                Err(_) => {
                    problems.push(Problem::InvalidValidationPatternConfigParameter {
                        key: param.key.clone(),
                    });
                    None
                }
            },
            None => None,
        };

        if let Some(default_value) = &param.default_value {
            if !default_value_is_valid(param.kind, default_value, compiled_pattern.as_ref()) {
                problems.push(Problem::InvalidDefaultValueInConfigParameter {
                    key: param.key.clone(),
                    kind: param.kind.as_str().to_string(),
                    value: default_value.clone(),
                });
            }
        }
    }

    problems
}

fn default_value_is_valid(kind: ConfigParameterKind, value: &str, pattern: Option<&Regex>) -> bool {
    match kind {
        ConfigParameterKind::String => pattern.map(|re| re.is_match(value)).unwrap_or(true),
        ConfigParameterKind::Int => value.trim().parse::<i64>().is_ok(),
        ConfigParameterKind::Bool => matches!(value.trim(), "true" | "false"),
        ConfigParameterKind::Double => value.trim().parse::<f64>().is_ok(),
        ConfigParameterKind::Duration => parse_duration(value).is_some(),
        ConfigParameterKind::Memorysize => parse_memory_size(value).is_some(),
        ConfigParameterKind::Regexp => Regex::new(value).is_ok(),
    }
}
