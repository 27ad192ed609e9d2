//! Test data factories

use statgate_engine::{AnalysisReport, DescriptiveStatistics};
use statgate_orchestrator::application::SubmitAnalysisCommand;

pub struct ReportFactory;

impl ReportFactory {
    pub fn descriptive(variable_name: &str) -> DescriptiveStatistics {
        DescriptiveStatistics {
            variable_name: variable_name.to_string(),
            count: 5,
            mean: 3.0,
            median: 3.0,
            mode: vec![3.0],
            variance: 2.5,
            std_dev: 1.58,
            variation_coefficient: 0.53,
            skewness: 0.0,
            kurtosis: -1.2,
            min_value: 1.0,
            max_value: 5.0,
        }
    }

    /// Report with descriptive statistics for one column and nothing else
    pub fn with_descriptives() -> AnalysisReport {
        AnalysisReport {
            processing_log: vec!["Detected file type: csv".to_string()],
            descriptives: vec![Self::descriptive("income")],
            ..Default::default()
        }
    }

    pub fn columns(names: &[&str]) -> AnalysisReport {
        AnalysisReport {
            processing_log: vec![format!("COLUMNS:{}", names.join(","))],
            ..Default::default()
        }
    }
}

pub struct CommandFactory;

impl CommandFactory {
    pub fn upload(file_name: &str, selected: &[&str]) -> SubmitAnalysisCommand {
        SubmitAnalysisCommand {
            file_name: file_name.to_string(),
            file_content: b"income,age\n10,20\n30,40\n".to_vec(),
            selected_analyses: selected.iter().map(|s| s.to_string()).collect(),
            dependent_variable: None,
            independent_variable: None,
        }
    }

    pub fn regression(dependent: Option<&str>, independent: Option<&str>) -> SubmitAnalysisCommand {
        SubmitAnalysisCommand {
            dependent_variable: dependent.map(str::to_string),
            independent_variable: independent.map(str::to_string),
            ..Self::upload("f.csv", &["descriptive_stats", "regression"])
        }
    }
}
