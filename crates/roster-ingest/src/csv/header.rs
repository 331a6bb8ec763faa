//! CSV header parsing and duplicate handling.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// What to do when a header line repeats a column name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DuplicateHeaderPolicy {
    /// Keep one column per name; the rightmost value wins in every row.
    #[default]
    LastWins,
    /// Fail the decode.
    Reject,
    /// Rename repeats to `name_2`, `name_3`, ...
    Suffix,
}

impl DuplicateHeaderPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LastWins => "last-wins",
            Self::Reject => "reject",
            Self::Suffix => "suffix",
        }
    }
}

impl fmt::Display for DuplicateHeaderPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DuplicateHeaderPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "last-wins" | "last_wins" | "lastwins" => Ok(Self::LastWins),
            "reject" => Ok(Self::Reject),
            "suffix" => Ok(Self::Suffix),
            other => Err(format!("unknown duplicate header policy: {other}")),
        }
    }
}

/// Header names after applying a [`DuplicateHeaderPolicy`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvHeaders {
    /// Row key for each source position.
    pub keys: Vec<String>,
    /// Distinct column names in first-seen order.
    pub columns: Vec<String>,
}

/// Normalizes a header value by trimming whitespace and a leading BOM.
pub fn normalize_header(value: &str) -> String {
    value.trim_start_matches('\u{feff}').trim().to_string()
}

/// Applies `policy` to a raw header line.
///
/// Returns the first repeated name as `Err` under [`DuplicateHeaderPolicy::Reject`].
pub fn resolve_headers(
    raw: &[String],
    policy: DuplicateHeaderPolicy,
) -> Result<CsvHeaders, String> {
    let names: Vec<String> = raw.iter().map(|h| normalize_header(h)).collect();

    match policy {
        DuplicateHeaderPolicy::LastWins => {
            let mut seen = BTreeSet::new();
            let columns = names
                .iter()
                .filter(|name| seen.insert(name.as_str()))
                .cloned()
                .collect();
            Ok(CsvHeaders {
                keys: names,
                columns,
            })
        }
        DuplicateHeaderPolicy::Reject => {
            let mut seen = BTreeSet::new();
            if let Some(repeat) = names.iter().find(|name| !seen.insert(name.as_str())) {
                return Err(repeat.clone());
            }
            Ok(CsvHeaders {
                columns: names.clone(),
                keys: names,
            })
        }
        DuplicateHeaderPolicy::Suffix => {
            let mut counts: BTreeMap<String, usize> = BTreeMap::new();
            let mut taken: BTreeSet<String> = names.iter().cloned().collect();
            let mut keys = Vec::with_capacity(names.len());
            for name in &names {
                let count = counts.entry(name.clone()).or_insert(0);
                *count += 1;
                if *count == 1 {
                    keys.push(name.clone());
                    continue;
                }
                let mut n = *count;
                let mut candidate = format!("{name}_{n}");
                while taken.contains(&candidate) {
                    n += 1;
                    candidate = format!("{name}_{n}");
                }
                taken.insert(candidate.clone());
                keys.push(candidate);
            }
            Ok(CsvHeaders {
                columns: keys.clone(),
                keys,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_normalize_header() {
        assert_eq!(normalize_header("  Login  "), "Login");
        assert_eq!(normalize_header("\u{feff}login"), "login");
    }

    #[test]
    fn last_wins_keeps_first_position() {
        let headers =
            resolve_headers(&raw(&["login", "role", "login"]), DuplicateHeaderPolicy::LastWins)
                .unwrap();
        assert_eq!(headers.keys, vec!["login", "role", "login"]);
        assert_eq!(headers.columns, vec!["login", "role"]);
    }

    #[test]
    fn reject_reports_first_repeat() {
        let err = resolve_headers(&raw(&["a", "b", "b", "a"]), DuplicateHeaderPolicy::Reject)
            .unwrap_err();
        assert_eq!(err, "b");
    }

    #[test]
    fn suffix_renames_repeats() {
        let headers = resolve_headers(
            &raw(&["name", "name", "role", "name"]),
            DuplicateHeaderPolicy::Suffix,
        )
        .unwrap();
        assert_eq!(headers.keys, vec!["name", "name_2", "role", "name_3"]);
        assert_eq!(headers.columns, headers.keys);
    }

    #[test]
    fn suffix_skips_names_already_present() {
        let headers = resolve_headers(
            &raw(&["name", "name_2", "name"]),
            DuplicateHeaderPolicy::Suffix,
        )
        .unwrap();
        assert_eq!(headers.keys, vec!["name", "name_2", "name_3"]);
    }

    #[test]
    fn policy_parses() {
        assert_eq!(
            "last-wins".parse::<DuplicateHeaderPolicy>().unwrap(),
            DuplicateHeaderPolicy::LastWins
        );
        assert_eq!(
            "SUFFIX".parse::<DuplicateHeaderPolicy>().unwrap(),
            DuplicateHeaderPolicy::Suffix
        );
        assert!("drop".parse::<DuplicateHeaderPolicy>().is_err());
    }
}
