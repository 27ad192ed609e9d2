//! Structured analysis report returned by the engine

use serde::{Deserialize, Serialize};
use statgate_core::domain::analysis::ResultSection;
use utoipa::ToSchema;

/// Result section labels as stored in the run ledger
pub mod section {
    pub const DESCRIPTIVE_STATS: &str = "descriptive_stats";
    pub const NORMALITY_TESTS: &str = "normality_tests";
    pub const CONFIDENCE_INTERVALS: &str = "confidence_intervals";
    pub const HYPOTHESIS_TESTS: &str = "hypothesis_tests";
    pub const CHI_SQUARE_TESTS: &str = "chi_square_tests";
    pub const CORRELATION: &str = "correlation";
    pub const REGRESSION_ANALYSIS: &str = "regression_analysis";
    pub const BINOMIAL_ANALYSIS: &str = "binomial_analysis";
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DescriptiveStatistics {
    #[schema(example = "income")]
    pub variable_name: String,
    pub count: i64,
    pub mean: f64,
    pub median: f64,
    pub mode: Vec<f64>,
    pub variance: f64,
    pub std_dev: f64,
    pub variation_coefficient: f64,
    pub skewness: f64,
    pub kurtosis: f64,
    pub min_value: f64,
    pub max_value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct NormalityTestResult {
    pub variable_name: String,
    #[schema(example = "Shapiro-Wilk")]
    pub test_name: String,
    pub statistic: f64,
    pub p_value: f64,
    pub conclusion: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ConfidenceInterval {
    pub variable_name: String,
    #[schema(example = "mean")]
    pub parameter_name: String,
    #[schema(example = 0.95)]
    pub confidence_level: f64,
    pub lower_bound: f64,
    pub upper_bound: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct HypothesisTestResult {
    pub test_name: String,
    pub description: String,
    pub statistic: f64,
    pub p_value: f64,
    pub conclusion: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ChiSquareTestResult {
    pub variable_name: String,
    pub test_name: String,
    /// Fitted distribution the observed frequencies were compared against
    pub distribution: String,
    pub statistic: f64,
    pub p_value: f64,
    pub degrees_of_freedom: i32,
    pub conclusion: String,
}

/// Coefficient between two variables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CorrelationPair {
    pub variable1: String,
    pub variable2: String,
    pub coefficient: f64,
    pub p_value: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CorrelationResult {
    pub pearson: Vec<CorrelationPair>,
    pub spearman: Vec<CorrelationPair>,
}

impl CorrelationResult {
    pub fn is_empty(&self) -> bool {
        self.pearson.is_empty() && self.spearman.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RegressionCoefficient {
    pub variable_name: String,
    pub estimate: f64,
    pub std_error: f64,
    pub t_statistic: f64,
    pub p_value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RegressionResult {
    #[schema(example = "OLS")]
    pub model_type: String,
    pub dependent_variable: String,
    pub independent_variables: Vec<String>,
    pub r_squared: f64,
    pub adjusted_r_squared: f64,
    pub f_statistic: f64,
    pub f_p_value: f64,
    pub coefficients: Vec<RegressionCoefficient>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BinomialAnalysisResult {
    pub variable_name: String,
    pub total_experiments: i64,
    pub inferred_n: i64,
    pub total_successes: i64,
    pub estimated_prob: f64,
    pub ci_lower: f64,
    pub ci_upper: f64,
    pub confidence_level: f64,
    pub gof_statistic: f64,
    pub gof_p_value: f64,
    pub gof_conclusion: String,
    pub gof_warning: bool,
}

/// Full engine response for one analysis request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AnalysisReport {
    /// Engine diagnostics in emission order
    pub processing_log: Vec<String>,
    pub descriptives: Vec<DescriptiveStatistics>,
    pub normality_tests: Vec<NormalityTestResult>,
    pub confidence_intervals: Vec<ConfidenceInterval>,
    pub hypothesis_tests: Vec<HypothesisTestResult>,
    pub chi_square_tests: Vec<ChiSquareTestResult>,
    pub correlation: Option<CorrelationResult>,
    pub regressions: Vec<RegressionResult>,
    pub binomial_analysis_results: Vec<BinomialAnalysisResult>,
}

fn push_section<T: Serialize>(
    sections: &mut Vec<ResultSection>,
    label: &str,
    items: &[T],
) -> Result<(), serde_json::Error> {
    if !items.is_empty() {
        sections.push(ResultSection::new(label, serde_json::to_value(items)?));
    }
    Ok(())
}

impl AnalysisReport {
    /// Non-empty result categories keyed by their ledger label
    pub fn result_sections(&self) -> Result<Vec<ResultSection>, serde_json::Error> {
        let mut sections = Vec::new();
        push_section(&mut sections, section::DESCRIPTIVE_STATS, &self.descriptives)?;
        push_section(&mut sections, section::NORMALITY_TESTS, &self.normality_tests)?;
        push_section(
            &mut sections,
            section::CONFIDENCE_INTERVALS,
            &self.confidence_intervals,
        )?;
        push_section(&mut sections, section::HYPOTHESIS_TESTS, &self.hypothesis_tests)?;
        push_section(&mut sections, section::CHI_SQUARE_TESTS, &self.chi_square_tests)?;
        if let Some(correlation) = self.correlation.as_ref().filter(|c| !c.is_empty()) {
            sections.push(ResultSection::new(
                section::CORRELATION,
                serde_json::to_value(correlation)?,
            ));
        }
        push_section(&mut sections, section::REGRESSION_ANALYSIS, &self.regressions)?;
        push_section(
            &mut sections,
            section::BINOMIAL_ANALYSIS,
            &self.binomial_analysis_results,
        )?;
        Ok(sections)
    }
}
