//! # Audience Rules
//!
//! The eligibility/visibility rule attached to posts, events, and
//! opportunities, and the predicate that decides whether a viewer may see
//! the item carrying it.
//!
//! A rule is three independent allow-lists. An empty set on any dimension
//! means "unrestricted on that dimension": it matches everyone, never no
//! one. "Empty" and "absent" are deliberately the same state: the raw
//! documents in the source store conflate them, so [`AudienceRule::from_raw`]
//! normalizes both to empty sets.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{AppError, Result};
use crate::models::{Branch, Gender, ViewerProfile};

/// Per-item allow-lists controlling which viewers may see the item.
/// All three sets non-optional; empty = unrestricted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudienceRule {
    #[serde(default)]
    pub branches: BTreeSet<Branch>,
    #[serde(default)]
    pub graduation_years: BTreeSet<i32>,
    #[serde(default)]
    pub genders: BTreeSet<Gender>,
}

impl AudienceRule {
    /// The fully-open rule: matches every viewer, including anonymous ones.
    pub fn everyone() -> Self {
        Self::default()
    }

    /// True when all three dimensions are unrestricted.
    pub fn is_open(&self) -> bool {
        self.branches.is_empty() && self.graduation_years.is_empty() && self.genders.is_empty()
    }

    /// Decides whether the item carrying this rule is visible to `viewer`.
    ///
    /// Total and side-effect-free. Anonymous viewers (`None`) only see
    /// fully-open items. Authenticated viewers must satisfy *all three*
    /// dimensions: each passes when its set is empty or contains the
    /// viewer's attribute. Graduation year is exact set membership, not a
    /// range.
    pub fn admits(&self, viewer: Option<&ViewerProfile>) -> bool {
        let Some(profile) = viewer else {
            return self.is_open();
        };
        let branch_ok = self.branches.is_empty() || self.branches.contains(&profile.branch);
        let year_ok = self.graduation_years.is_empty()
            || self.graduation_years.contains(&profile.graduation_year);
        let gender_ok = self.genders.is_empty() || self.genders.contains(&profile.gender);
        branch_ok && year_ok && gender_ok
    }

    /// Normalizes the loosely-typed rule documents found in the source
    /// store into the fixed three-set shape.
    ///
    /// A wholly absent rule (`null`) and missing/`null` fields both become
    /// empty sets. Accepts the store's camelCase keys as well as our own.
    /// Malformed entries (non-numeric years, unknown branch/gender tokens,
    /// non-array dimensions) are `InvalidArgument`.
    pub fn from_raw(raw: &Value) -> Result<Self> {
        let obj = match raw {
            Value::Null => return Ok(Self::everyone()),
            Value::Object(obj) => obj,
            other => {
                return Err(AppError::InvalidArgument(format!(
                    "audience rule must be an object or null, got {other}"
                )))
            }
        };

        let mut rule = Self::everyone();
        for token in raw_entries(obj, &["branches", "allowedBranches"])? {
            match token {
                Value::String(s) => {
                    let branch = Branch::parse_token(s).ok_or_else(|| {
                        AppError::InvalidArgument(format!("unknown branch token {s:?}"))
                    })?;
                    rule.branches.insert(branch);
                }
                other => {
                    return Err(AppError::InvalidArgument(format!(
                        "branch entry must be a string, got {other}"
                    )))
                }
            }
        }
        for token in raw_entries(obj, &["graduation_years", "allowedGraduationYears"])? {
            rule.graduation_years.insert(parse_year(token)?);
        }
        for token in raw_entries(obj, &["genders", "allowedGenders"])? {
            match token {
                Value::String(s) => {
                    let gender = Gender::parse_token(s).ok_or_else(|| {
                        AppError::InvalidArgument(format!("unknown gender token {s:?}"))
                    })?;
                    rule.genders.insert(gender);
                }
                other => {
                    return Err(AppError::InvalidArgument(format!(
                        "gender entry must be a string, got {other}"
                    )))
                }
            }
        }
        Ok(rule)
    }
}

/// Looks up the first present key and returns its array entries.
/// Missing or `null` fields normalize to no entries.
fn raw_entries<'a>(
    obj: &'a serde_json::Map<String, Value>,
    keys: &[&str],
) -> Result<&'a [Value]> {
    for key in keys {
        match obj.get(*key) {
            None | Some(Value::Null) => continue,
            Some(Value::Array(items)) => return Ok(items),
            Some(other) => {
                return Err(AppError::InvalidArgument(format!(
                    "rule dimension {key:?} must be an array, got {other}"
                )))
            }
        }
    }
    Ok(&[])
}

/// The source stores years as numbers in some documents and numeric strings
/// in others; anything else is malformed.
fn parse_year(value: &Value) -> Result<i32> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .and_then(|y| i32::try_from(y).ok())
            .ok_or_else(|| AppError::InvalidArgument(format!("year out of range: {n}"))),
        Value::String(s) => s
            .trim()
            .parse::<i32>()
            .map_err(|_| AppError::InvalidArgument(format!("non-numeric graduation year {s:?}"))),
        other => Err(AppError::InvalidArgument(format!(
            "graduation year must be numeric, got {other}"
        ))),
    }
}
