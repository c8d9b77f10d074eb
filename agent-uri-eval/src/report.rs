//! JSON report generation for evaluation results.

use serde::{Deserialize, Serialize};

use crate::discovery::DiscoveryResults;
use crate::error::EvalError;
use crate::expressiveness::ExpressivenessResults;

/// Complete evaluation report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationReport {
    /// Report metadata.
    pub metadata: ReportMetadata,
    /// Eval 1: Capability expressiveness results.
    pub expressiveness: Option<ExpressivenessResults>,
    /// Eval 2: Discovery precision results (prefix mode).
    pub discovery_prefix: Option<DiscoveryResults>,
    /// Eval 2: Discovery precision results (exact mode - ablation).
    pub discovery_exact: Option<DiscoveryResults>,
    /// Ablation: Flat namespace expressiveness.
    pub expressiveness_flat: Option<ExpressivenessResults>,
    /// Summary of criteria met.
    pub summary: EvaluationSummary,
}

/// Report metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// Report generation timestamp.
    pub generated_at: String,
    /// Version of agent-uri-eval.
    pub eval_version: String,
    /// Git commit hash (if available).
    pub git_commit: Option<String>,
    /// Machine info.
    pub machine: Option<String>,
}

impl Default for ReportMetadata {
    fn default() -> Self {
        Self {
            generated_at: chrono::Utc::now().to_rfc3339(),
            eval_version: env!("CARGO_PKG_VERSION").to_string(),
            git_commit: None,
            machine: None,
        }
    }
}

/// Summary of evaluation results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationSummary {
    /// Eval 1 passed all criteria.
    pub expressiveness_passed: bool,
    /// Eval 2 passed all criteria.
    pub discovery_passed: bool,
    /// All evaluations passed.
    pub all_passed: bool,
    /// List of failed criteria.
    pub failed_criteria: Vec<String>,
}

impl EvaluationReport {
    /// Creates a new empty report.
    #[must_use]
    pub fn new() -> Self {
        Self {
            metadata: ReportMetadata::default(),
            expressiveness: None,
            discovery_prefix: None,
            discovery_exact: None,
            expressiveness_flat: None,
            summary: EvaluationSummary {
                expressiveness_passed: false,
                discovery_passed: false,
                all_passed: false,
                failed_criteria: Vec::new(),
            },
        }
    }

    /// Sets expressiveness results.
    #[must_use]
    pub fn with_expressiveness(mut self, results: ExpressivenessResults) -> Self {
        self.expressiveness = Some(results);
        self
    }

    /// Sets discovery prefix results.
    #[must_use]
    pub fn with_discovery_prefix(mut self, results: DiscoveryResults) -> Self {
        self.discovery_prefix = Some(results);
        self
    }

    /// Sets discovery exact results (ablation).
    #[must_use]
    pub fn with_discovery_exact(mut self, results: DiscoveryResults) -> Self {
        self.discovery_exact = Some(results);
        self
    }

    /// Sets flat namespace results (ablation).
    #[must_use]
    pub fn with_expressiveness_flat(mut self, results: ExpressivenessResults) -> Self {
        self.expressiveness_flat = Some(results);
        self
    }

    /// Sets git commit info.
    #[must_use]
    pub fn with_git_commit(mut self, commit: impl Into<String>) -> Self {
        self.metadata.git_commit = Some(commit.into());
        self
    }

    /// Sets machine info.
    #[must_use]
    pub fn with_machine(mut self, machine: impl Into<String>) -> Self {
        self.metadata.machine = Some(machine.into());
        self
    }

    /// Computes summary from results.
    #[must_use]
    pub fn compute_summary(mut self) -> Self {
        let mut failed = Vec::new();

        // Check expressiveness criteria
        let expr_passed = if let Some(ref e) = self.expressiveness {
            if !e.criteria.coverage_met.is_met() {
                failed.push(format!(
                    "Coverage {:.1}% < 90%",
                    e.coverage.coverage_rate * 100.0
                ));
            }
            if !e.criteria.collision_rate_met.is_met() {
                failed.push(format!(
                    "Collision rate {:.2}% >= 1%",
                    e.collisions.collision_rate * 100.0
                ));
            }
            if !e.criteria.depth_range_met.is_met() {
                failed.push(format!(
                    "Mean depth {:.1} not in [2,4]",
                    e.depth_distribution.mean
                ));
            }
            if !e.criteria.max_depth_met.is_met() {
                failed.push(format!("Max depth {} > 10", e.depth_distribution.max));
            }
            e.criteria.all_passed()
        } else {
            false
        };

        // Check discovery criteria
        let disc_passed = if let Some(ref d) = self.discovery_prefix {
            if d.mean_precision < 0.80 {
                failed.push(format!("Precision {:.2} < 0.80", d.mean_precision));
            }
            if d.mean_recall < 0.70 {
                failed.push(format!("Recall {:.2} < 0.70", d.mean_recall));
            }
            if d.mean_f1 < 0.75 {
                failed.push(format!("F1 {:.2} < 0.75", d.mean_f1));
            }
            d.mean_precision >= 0.80 && d.mean_recall >= 0.70 && d.mean_f1 >= 0.75
        } else {
            false
        };

        self.summary = EvaluationSummary {
            expressiveness_passed: expr_passed,
            discovery_passed: disc_passed,
            all_passed: expr_passed && disc_passed,
            failed_criteria: failed,
        };

        self
    }

    /// Serializes to JSON.
    ///
    /// # Errors
    ///
    /// Returns `EvalError::Json` if serialization fails.
    pub fn to_json(&self) -> Result<String, EvalError> {
        serde_json::to_string_pretty(self).map_err(|e| EvalError::Json {
            context: "report serialization".to_string(),
            message: e.to_string(),
        })
    }

    /// Serializes to compact JSON.
    ///
    /// # Errors
    ///
    /// Returns `EvalError::Json` if serialization fails.
    pub fn to_json_compact(&self) -> Result<String, EvalError> {
        serde_json::to_string(self).map_err(|e| EvalError::Json {
            context: "report serialization".to_string(),
            message: e.to_string(),
        })
    }
}

impl Default for EvaluationReport {
    fn default() -> Self {
        Self::new()
    }
}
