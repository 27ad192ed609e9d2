//! tonic client for the remote analysis engine

use async_trait::async_trait;
use std::time::{Duration, Instant};
use tonic::transport::{Channel, Endpoint};

use statgate_core::config::EngineConfig;

use crate::domain::{
    AnalysisEngine, AnalysisReport, BinomialAnalysisResult, ChiSquareTestResult,
    ConfidenceInterval, CorrelationPair, CorrelationResult, DescriptiveStatistics, EngineError,
    EngineRequest, HypothesisTestResult, NormalityTestResult, RegressionCoefficient,
    RegressionResult,
};
use crate::pb;
use crate::pb::analysis_service_client::AnalysisServiceClient;

/// `AnalysisEngine` over a gRPC channel
#[derive(Clone)]
pub struct GrpcAnalysisEngine {
    client: AnalysisServiceClient<Channel>,
}

impl GrpcAnalysisEngine {
    /// Build a client whose channel connects on first use
    pub fn connect_lazy(config: &EngineConfig) -> Result<Self, EngineError> {
        let endpoint = Endpoint::from_shared(config.address.clone())
            .map_err(|e| {
                EngineError::configuration(format!("invalid engine address {}: {}", config.address, e))
            })?
            .connect_timeout(Duration::from_secs(config.connect_timeout_seconds));

        tracing::info!(address = %config.address, "Configured analysis engine channel");
        Ok(Self::from_channel(endpoint.connect_lazy()))
    }

    pub fn from_channel(channel: Channel) -> Self {
        Self {
            client: AnalysisServiceClient::new(channel),
        }
    }
}

#[async_trait]
impl AnalysisEngine for GrpcAnalysisEngine {
    #[tracing::instrument(skip(self, request), fields(file_name = %request.file_name, selection = ?request.selection))]
    async fn analyze(&self, request: EngineRequest) -> Result<AnalysisReport, EngineError> {
        let timeout = request.timeout;
        let mut grpc_request = tonic::Request::new(pb::AnalysisRequest {
            file_content: request.file_content,
            file_name: request.file_name,
            selected_analyses: request.selection,
        });
        grpc_request.set_timeout(timeout);

        let mut client = self.client.clone();
        let started = Instant::now();
        let response = tokio::time::timeout(timeout, client.analyze_data(grpc_request))
            .await
            .map_err(|_| {
                tracing::warn!(timeout_ms = timeout.as_millis() as u64, "Engine call timed out");
                EngineError::deadline_exceeded(format!(
                    "no response within {}ms",
                    timeout.as_millis()
                ))
            })?
            .map_err(|status| {
                tracing::warn!(code = ?status.code(), message = %status.message(), "Engine call failed");
                EngineError::from_bounded_status(status, started.elapsed(), timeout)
            })?;

        Ok(response.into_inner().into())
    }
}

impl From<pb::AnalysisResponse> for AnalysisReport {
    fn from(response: pb::AnalysisResponse) -> Self {
        AnalysisReport {
            processing_log: response.processing_log,
            descriptives: response.descriptives.into_iter().map(Into::into).collect(),
            normality_tests: response.normality_tests.into_iter().map(Into::into).collect(),
            confidence_intervals: response
                .confidence_intervals
                .into_iter()
                .map(Into::into)
                .collect(),
            hypothesis_tests: response.hypothesis_tests.into_iter().map(Into::into).collect(),
            chi_square_tests: response.chi_square_tests.into_iter().map(Into::into).collect(),
            correlation: response.correlation.map(Into::into),
            regressions: response.regressions.into_iter().map(Into::into).collect(),
            binomial_analysis_results: response
                .binomial_analysis_results
                .into_iter()
                .map(Into::into)
                .collect(),
        }
    }
}

impl From<pb::DescriptiveStatistics> for DescriptiveStatistics {
    fn from(s: pb::DescriptiveStatistics) -> Self {
        DescriptiveStatistics {
            variable_name: s.variable_name,
            count: s.count,
            mean: s.mean,
            median: s.median,
            mode: s.mode,
            variance: s.variance,
            std_dev: s.std_dev,
            variation_coefficient: s.variation_coefficient,
            skewness: s.skewness,
            kurtosis: s.kurtosis,
            min_value: s.min_value,
            max_value: s.max_value,
        }
    }
}

impl From<pb::NormalityTestResult> for NormalityTestResult {
    fn from(t: pb::NormalityTestResult) -> Self {
        NormalityTestResult {
            variable_name: t.variable_name,
            test_name: t.test_name,
            statistic: t.statistic,
            p_value: t.p_value,
            conclusion: t.conclusion,
        }
    }
}

impl From<pb::ConfidenceInterval> for ConfidenceInterval {
    fn from(ci: pb::ConfidenceInterval) -> Self {
        ConfidenceInterval {
            variable_name: ci.variable_name,
            parameter_name: ci.parameter_name,
            confidence_level: ci.confidence_level,
            lower_bound: ci.lower_bound,
            upper_bound: ci.upper_bound,
        }
    }
}

impl From<pb::HypothesisTestResult> for HypothesisTestResult {
    fn from(t: pb::HypothesisTestResult) -> Self {
        HypothesisTestResult {
            test_name: t.test_name,
            description: t.description,
            statistic: t.statistic,
            p_value: t.p_value,
            conclusion: t.conclusion,
        }
    }
}

impl From<pb::PearsonChiSquareTestResult> for ChiSquareTestResult {
    fn from(t: pb::PearsonChiSquareTestResult) -> Self {
        ChiSquareTestResult {
            variable_name: t.variable_name,
            test_name: t.test_name,
            distribution: t.distribution,
            statistic: t.statistic,
            p_value: t.p_value,
            degrees_of_freedom: t.degrees_of_freedom,
            conclusion: t.conclusion,
        }
    }
}

impl From<pb::CorrelationResult> for CorrelationResult {
    fn from(c: pb::CorrelationResult) -> Self {
        CorrelationResult {
            pearson: c
                .pearson
                .into_iter()
                .map(|p| CorrelationPair {
                    variable1: p.variable1,
                    variable2: p.variable2,
                    coefficient: p.coefficient,
                    p_value: p.p_value,
                })
                .collect(),
            spearman: c
                .spearman
                .into_iter()
                .map(|s| CorrelationPair {
                    variable1: s.variable1,
                    variable2: s.variable2,
                    coefficient: s.coefficient,
                    p_value: s.p_value,
                })
                .collect(),
        }
    }
}

impl From<pb::RegressionResult> for RegressionResult {
    fn from(r: pb::RegressionResult) -> Self {
        RegressionResult {
            model_type: r.model_type,
            dependent_variable: r.dependent_variable,
            independent_variables: r.independent_variables,
            r_squared: r.r_squared,
            adjusted_r_squared: r.adjusted_r_squared,
            f_statistic: r.f_statistic,
            f_p_value: r.f_p_value,
            coefficients: r
                .coefficients
                .into_iter()
                .map(|c| RegressionCoefficient {
                    variable_name: c.variable_name,
                    estimate: c.estimate,
                    std_error: c.std_error,
                    t_statistic: c.t_statistic,
                    p_value: c.p_value,
                })
                .collect(),
        }
    }
}

impl From<pb::BinomialAnalysisResult> for BinomialAnalysisResult {
    fn from(b: pb::BinomialAnalysisResult) -> Self {
        BinomialAnalysisResult {
            variable_name: b.variable_name,
            total_experiments: b.total_experiments,
            inferred_n: b.inferred_n,
            total_successes: b.total_successes,
            estimated_prob: b.estimated_prob,
            ci_lower: b.ci_lower,
            ci_upper: b.ci_upper,
            confidence_level: b.confidence_level,
            gof_statistic: b.gof_statistic,
            gof_p_value: b.gof_p_value,
            gof_conclusion: b.gof_conclusion,
            gof_warning: b.gof_warning,
        }
    }
}
