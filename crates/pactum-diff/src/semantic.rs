//! Recursive structural diff over parsed JSON documents.
//!
//! Objects are compared by key lookup, so key order never matters. Arrays
//! are positional and always strict. Scalars compare by value.

use serde_json::Value;

use pactum_types::PactContent;

use crate::error::DiffResult;

/// Comparison switches for a structural diff.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DiffOptions {
    /// When `true`, object keys present only on the actual side are not
    /// reported as differences. Array elements and scalar values are strict
    /// regardless. The history traversal uses strict mode: any added or
    /// removed key makes two pacts distinct.
    pub allow_unexpected_keys: bool,
}

impl DiffOptions {
    /// Strict comparison: every structural difference counts.
    pub const fn strict() -> Self {
        Self {
            allow_unexpected_keys: false,
        }
    }

    /// Tolerant comparison: extra keys on the actual side are ignored.
    pub const fn tolerant() -> Self {
        Self {
            allow_unexpected_keys: true,
        }
    }
}

/// A single structural difference between two documents.
///
/// Paths are rooted at `$` with `.key` and `[index]` segments. Direction is
/// expected-vs-actual: `Removed` means the expected document has something
/// the actual one lacks.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DiffEntry {
    /// A key or element present only in the actual document.
    Added { path: String, value: Value },
    /// A key or element present only in the expected document.
    Removed { path: String, value: Value },
    /// A value present in both but different (including type changes).
    Changed {
        path: String,
        expected: Value,
        actual: Value,
    },
}

impl DiffEntry {
    /// The document path this difference was found at.
    pub fn path(&self) -> &str {
        match self {
            DiffEntry::Added { path, .. }
            | DiffEntry::Removed { path, .. }
            | DiffEntry::Changed { path, .. } => path,
        }
    }
}

/// Compare two pact documents structurally.
///
/// Parses both documents and diffs the resulting values. A non-empty result
/// means the documents describe different contracts; an empty result means
/// any byte-level difference between them is formatting only.
pub fn diff_contents(
    expected: &PactContent,
    actual: &PactContent,
    options: DiffOptions,
) -> DiffResult<Vec<DiffEntry>> {
    let a = expected.parse()?;
    let b = actual.parse()?;
    Ok(diff_values(&a, &b, options))
}

/// Compare two parsed JSON values structurally.
pub fn diff_values(expected: &Value, actual: &Value, options: DiffOptions) -> Vec<DiffEntry> {
    let mut entries = Vec::new();
    diff_at("$", expected, actual, options, &mut entries);
    entries
}

fn diff_at(
    path: &str,
    expected: &Value,
    actual: &Value,
    options: DiffOptions,
    entries: &mut Vec<DiffEntry>,
) {
    match (expected, actual) {
        (Value::Object(exp), Value::Object(act)) => {
            for (key, exp_val) in exp {
                let child = format!("{path}.{key}");
                match act.get(key) {
                    Some(act_val) => diff_at(&child, exp_val, act_val, options, entries),
                    None => entries.push(DiffEntry::Removed {
                        path: child,
                        value: exp_val.clone(),
                    }),
                }
            }
            if !options.allow_unexpected_keys {
                for (key, act_val) in act {
                    if !exp.contains_key(key) {
                        entries.push(DiffEntry::Added {
                            path: format!("{path}.{key}"),
                            value: act_val.clone(),
                        });
                    }
                }
            }
        }
        (Value::Array(exp), Value::Array(act)) => {
            for (i, (exp_val, act_val)) in exp.iter().zip(act.iter()).enumerate() {
                diff_at(&format!("{path}[{i}]"), exp_val, act_val, options, entries);
            }
            for (i, exp_val) in exp.iter().enumerate().skip(act.len()) {
                entries.push(DiffEntry::Removed {
                    path: format!("{path}[{i}]"),
                    value: exp_val.clone(),
                });
            }
            for (i, act_val) in act.iter().enumerate().skip(exp.len()) {
                entries.push(DiffEntry::Added {
                    path: format!("{path}[{i}]"),
                    value: act_val.clone(),
                });
            }
        }
        _ => {
            if expected != actual {
                entries.push(DiffEntry::Changed {
                    path: path.to_string(),
                    expected: expected.clone(),
                    actual: actual.clone(),
                });
            }
        }
    }
}
