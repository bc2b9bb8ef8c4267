//! Statistical computations over a [`GeneTable`](crate::data::GeneTable).
//!
//! Every operation here is a pure function of the table and the request: no
//! logging, no caching, no shared state. Errors are returned as
//! [`StatsError`](crate::error::StatsError) values for the caller to present.
//!
//! - **[`descriptive`]**: mean, variance, standard deviation, extrema and median of one gene
//! - **[`differential`]**: differential scores, ranking and top-N selection
//! - **[`threshold`]**: genes (or samples) whose expression exceeds a cutoff
//! - **[`inference`]**: two-sample t-tests backing group comparisons

pub mod descriptive;
pub mod differential;
pub mod inference;
pub mod threshold;

pub mod utils;

pub use descriptive::{DescriptiveStatsResult, describe, describe_many};
pub use differential::{
    Analyzer, DifferentialResult, GroupComparison, GroupSpec, ScoreMode, SelectionStrategy,
    rank_top_n, score_one,
};
pub use threshold::{
    SampleHit, SampleHits, ThresholdResult, filter_above_threshold, genes_above_threshold,
    samples_above_threshold,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TTestType {
    Student, // Equal variance
    #[default]
    Welch, // Unequal variance
}

#[derive(Debug, Clone, PartialEq)]
pub struct TestResult {
    /// The t-statistic
    pub statistic: f64,
    /// Two-sided p-value
    pub p_value: f64,
    /// Degrees of freedom, absent when the test could not be run
    pub degrees_of_freedom: Option<f64>,
}

impl TestResult {
    /// Create a new test result with minimal information
    pub fn new(statistic: f64, p_value: f64) -> Self {
        TestResult {
            statistic,
            p_value,
            degrees_of_freedom: None,
        }
    }

    /// Add degrees of freedom to the result
    pub fn with_degrees_of_freedom(mut self, df: f64) -> Self {
        self.degrees_of_freedom = Some(df);
        self
    }

    /// Check if the result is statistically significant at the given threshold
    pub fn is_significant(&self, alpha: f64) -> bool {
        self.p_value < alpha
    }
}
