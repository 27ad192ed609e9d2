//! Analysis run ledger entities

use chrono::{DateTime, Utc};

use super::value_objects::{AnalysisSelection, RunId};
use crate::domain::auth::UserId;

/// One recorded analysis invocation
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisRun {
    pub id: RunId,
    /// Owner; fixed at creation
    pub user_id: UserId,
    pub file_name: String,
    /// Selected kinds without regression companions
    pub selected_analyses: Vec<String>,
    pub dependent_variable: Option<String>,
    pub independent_variable: Option<String>,
    pub run_at: DateTime<Utc>,
}

/// Run metadata before the ledger assigns an id
#[derive(Debug, Clone, PartialEq)]
pub struct NewAnalysisRun {
    pub user_id: UserId,
    pub file_name: String,
    pub selected_analyses: Vec<String>,
    pub dependent_variable: Option<String>,
    pub independent_variable: Option<String>,
    pub run_at: DateTime<Utc>,
}

impl NewAnalysisRun {
    pub fn new(user_id: UserId, file_name: impl Into<String>, selection: &AnalysisSelection) -> Self {
        Self {
            user_id,
            file_name: file_name.into(),
            selected_analyses: selection.kinds().to_vec(),
            dependent_variable: selection.dependent_variable().map(str::to_string),
            independent_variable: selection.independent_variable().map(str::to_string),
            run_at: Utc::now(),
        }
    }

    pub fn into_run(self, id: RunId) -> AnalysisRun {
        AnalysisRun {
            id,
            user_id: self.user_id,
            file_name: self.file_name,
            selected_analyses: self.selected_analyses,
            dependent_variable: self.dependent_variable,
            independent_variable: self.independent_variable,
            run_at: self.run_at,
        }
    }
}

/// A named result payload belonging to a run
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisResultData {
    pub id: i64,
    pub run_id: RunId,
    pub result_type: String,
    pub data: serde_json::Value,
}

/// Result section waiting to be written under a run
#[derive(Debug, Clone, PartialEq)]
pub struct ResultSection {
    pub result_type: String,
    pub data: serde_json::Value,
}

impl ResultSection {
    pub fn new(result_type: impl Into<String>, data: serde_json::Value) -> Self {
        Self {
            result_type: result_type.into(),
            data,
        }
    }
}
