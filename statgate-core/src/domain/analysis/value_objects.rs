//! Analysis run value objects

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::errors::AnalysisError;

/// Analysis kind that requires dependent/independent companions.
pub const REGRESSION_KIND: &str = "regression";
/// Prefix of the companion entry carrying the dependent variable.
pub const DEPENDENT_PREFIX: &str = "regression_dependent:";
/// Prefix of the companion entry carrying the independent variable.
pub const INDEPENDENT_PREFIX: &str = "regression_independent:";

/// Ledger-assigned run identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RunId(i64);

impl RunId {
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl From<i64> for RunId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl FromStr for RunId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<i64>().map(Self)
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Regression companion variables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegressionVariables {
    pub dependent: String,
    pub independent: String,
}

/// Normalized selection of analysis kinds for one run
///
/// `kinds` is an ordered set of the caller's labels with companion-encoded
/// entries removed. Companions are present only when regression was selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisSelection {
    kinds: Vec<String>,
    regression: Option<RegressionVariables>,
}

impl AnalysisSelection {
    /// Normalize a raw selection.
    ///
    /// Fails with `InvalidSelection` when regression is requested without
    /// both non-empty companion variable names.
    pub fn new(
        requested: Vec<String>,
        dependent_variable: Option<String>,
        independent_variable: Option<String>,
    ) -> Result<Self, AnalysisError> {
        let mut kinds: Vec<String> = Vec::with_capacity(requested.len());
        for kind in requested {
            let kind = kind.trim();
            if kind.is_empty()
                || kind.starts_with(DEPENDENT_PREFIX)
                || kind.starts_with(INDEPENDENT_PREFIX)
            {
                continue;
            }
            if !kinds.iter().any(|existing| existing == kind) {
                kinds.push(kind.to_string());
            }
        }

        let regression = if kinds.iter().any(|k| k == REGRESSION_KIND) {
            let dependent = non_blank(dependent_variable).ok_or_else(|| {
                AnalysisError::invalid_selection(
                    "regression requires a non-empty dependent_variable",
                )
            })?;
            let independent = non_blank(independent_variable).ok_or_else(|| {
                AnalysisError::invalid_selection(
                    "regression requires a non-empty independent_variable",
                )
            })?;
            Some(RegressionVariables {
                dependent,
                independent,
            })
        } else {
            None
        };

        Ok(Self { kinds, regression })
    }

    /// Selection as recorded in the ledger (no companions)
    pub fn kinds(&self) -> &[String] {
        &self.kinds
    }

    pub fn regression(&self) -> Option<&RegressionVariables> {
        self.regression.as_ref()
    }

    pub fn dependent_variable(&self) -> Option<&str> {
        self.regression.as_ref().map(|r| r.dependent.as_str())
    }

    pub fn independent_variable(&self) -> Option<&str> {
        self.regression.as_ref().map(|r| r.independent.as_str())
    }

    /// Selection sent to the engine: kinds followed by companion entries
    pub fn engine_selection(&self) -> Vec<String> {
        let mut selection = self.kinds.clone();
        if let Some(regression) = &self.regression {
            selection.push(format!("{}{}", DEPENDENT_PREFIX, regression.dependent));
            selection.push(format!("{}{}", INDEPENDENT_PREFIX, regression.independent));
        }
        selection
    }
}

/// Reject an upload with no file name or no content
pub fn validate_upload(file_name: &str, file_content: &[u8]) -> Result<(), AnalysisError> {
    if file_name.trim().is_empty() {
        return Err(AnalysisError::invalid_upload("file name is required"));
    }
    if file_content.is_empty() {
        return Err(AnalysisError::invalid_upload("uploaded file is empty"));
    }
    Ok(())
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_regression_requires_both_companions() {
        let missing_independent = AnalysisSelection::new(
            strings(&["descriptive_stats", "regression"]),
            Some("y".to_string()),
            None,
        );
        assert!(matches!(
            missing_independent,
            Err(AnalysisError::InvalidSelection { .. })
        ));

        let blank_dependent = AnalysisSelection::new(
            strings(&["regression"]),
            Some("   ".to_string()),
            Some("x".to_string()),
        );
        assert!(blank_dependent.is_err());
    }

    #[test]
    fn test_engine_selection_appends_companions() {
        let selection = AnalysisSelection::new(
            strings(&["descriptive_stats", "regression"]),
            Some("income".to_string()),
            Some("age".to_string()),
        )
        .unwrap();

        assert_eq!(selection.kinds(), strings(&["descriptive_stats", "regression"]));
        assert_eq!(
            selection.engine_selection(),
            strings(&[
                "descriptive_stats",
                "regression",
                "regression_dependent:income",
                "regression_independent:age",
            ])
        );
        assert_eq!(selection.dependent_variable(), Some("income"));
    }

    #[test]
    fn test_companions_ignored_without_regression() {
        let selection = AnalysisSelection::new(
            strings(&["normality_test"]),
            Some("income".to_string()),
            Some("age".to_string()),
        )
        .unwrap();

        assert!(selection.regression().is_none());
        assert_eq!(selection.engine_selection(), strings(&["normality_test"]));
    }

    #[test]
    fn test_prefixed_entries_and_duplicates_are_dropped() {
        let selection = AnalysisSelection::new(
            strings(&[
                "descriptive_stats",
                "regression_dependent:smuggled",
                "descriptive_stats",
                " normality_test ",
            ]),
            None,
            None,
        )
        .unwrap();

        assert_eq!(
            selection.kinds(),
            strings(&["descriptive_stats", "normality_test"])
        );
    }

    #[test]
    fn test_upload_requires_name_and_content() {
        assert!(validate_upload("f.csv", b"a\n1\n").is_ok());
        assert!(matches!(
            validate_upload("  ", b"a\n1\n"),
            Err(AnalysisError::InvalidUpload { .. })
        ));
        assert!(matches!(
            validate_upload("f.csv", b""),
            Err(AnalysisError::InvalidUpload { .. })
        ));
    }
}
