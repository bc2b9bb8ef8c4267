//! Differential expression scoring and top-N ranking.
//!
//! A gene's differential score depends on the configured [`ScoreMode`]:
//!
//! - [`ScoreMode::Spread`] scores a gene by the population standard deviation of
//!   its own values. This needs no sample labels.
//! - [`ScoreMode::GroupDifference`] scores a gene by the absolute difference
//!   between the mean of the case samples and the mean of the reference samples,
//!   and attaches a two-sample t-test to the result.
//!
//! Rankings sort by score descending and break ties by gene name ascending, so
//! the output is fully determined by the input.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use ndarray::{ArrayView1, Axis};

use crate::data::GeneTable;
use crate::error::{Result, StatsError};
use crate::stats::inference::{sums, t_test_from_sums};
use crate::stats::{TTestType, TestResult, utils};

/// Candidate pools up to this size are always fully sorted.
pub const HEAP_CUTOFF: usize = 64;

/// Sample labels compared in [`ScoreMode::GroupDifference`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupSpec {
    /// Group of interest (e.g. `HCC`)
    pub case: String,
    /// Baseline group (e.g. `normal`)
    pub reference: String,
}

impl GroupSpec {
    pub fn new(case: impl Into<String>, reference: impl Into<String>) -> Self {
        GroupSpec {
            case: case.into(),
            reference: reference.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ScoreMode {
    /// Population standard deviation of the gene's values
    #[default]
    Spread,
    /// |mean(case) - mean(reference)|
    GroupDifference(GroupSpec),
}

/// How the top N entries are picked from the scored candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionStrategy {
    /// Heap for large pools when N is smaller than the pool, otherwise full sort
    #[default]
    Auto,
    /// Bounded min-heap of size N, O(G log N)
    Heap,
    /// Sort every candidate, O(G log G)
    FullSort,
}

impl SelectionStrategy {
    fn resolve(self, n: usize, pool: usize) -> SelectionStrategy {
        match self {
            SelectionStrategy::Auto if n < pool && pool > HEAP_CUTOFF => SelectionStrategy::Heap,
            SelectionStrategy::Auto => SelectionStrategy::FullSort,
            explicit => explicit,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GroupComparison {
    pub case_mean: f64,
    pub reference_mean: f64,
    /// Signed difference, case minus reference
    pub mean_difference: f64,
    pub test: TestResult,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DifferentialResult {
    pub gene: String,
    pub score: f64,
    /// 1 = most differentially expressed
    pub rank: usize,
    /// Present only in [`ScoreMode::GroupDifference`]
    pub comparison: Option<GroupComparison>,
}

/// Differential analysis configuration.
#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    pub score_mode: ScoreMode,
    pub t_test: TTestType,
    pub strategy: SelectionStrategy,
}

impl Analyzer {
    pub fn new(score_mode: ScoreMode) -> Self {
        Analyzer {
            score_mode,
            ..Analyzer::default()
        }
    }

    pub fn with_t_test(mut self, t_test: TTestType) -> Self {
        self.t_test = t_test;
        self
    }

    pub fn with_strategy(mut self, strategy: SelectionStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Score a single gene. The result carries rank 1.
    pub fn score_one(&self, table: &GeneTable, gene: &str) -> Result<DifferentialResult> {
        let groups = self.resolve_groups(table)?;
        let scored = self.score(table, gene, groups.as_ref())?;
        Ok(scored.into_result(1))
    }

    /// Rank `genes` by differential score and keep the best `n`.
    ///
    /// Returns `min(n, |unique genes|)` results ordered by rank.
    ///
    /// # Errors
    ///
    /// * `InvalidTopN` - `n` is zero
    /// * `EmptyCandidateSet` - `genes` is empty
    /// * `UnknownGene` - any name is absent from `table` (checked before scoring)
    /// * `EmptyGroup` - group mode and a label has no samples
    pub fn rank_top_n<S: AsRef<str>>(
        &self,
        table: &GeneTable,
        genes: &[S],
        n: usize,
    ) -> Result<Vec<DifferentialResult>> {
        if n == 0 {
            return Err(StatsError::InvalidTopN { requested: 0 });
        }
        if genes.is_empty() {
            return Err(StatsError::EmptyCandidateSet);
        }

        let candidates = utils::unique_in_order(genes);
        utils::validate_genes(table, &candidates)?;
        let groups = self.resolve_groups(table)?;

        let scored = candidates
            .into_iter()
            .map(|gene| self.score(table, gene, groups.as_ref()))
            .collect::<Result<Vec<_>>>()?;

        let selected = match self.strategy.resolve(n, scored.len()) {
            SelectionStrategy::Heap => select_with_heap(scored, n),
            _ => select_with_sort(scored, n),
        };

        Ok(selected
            .into_iter()
            .enumerate()
            .map(|(i, s)| s.into_result(i + 1))
            .collect())
    }

    fn resolve_groups(&self, table: &GeneTable) -> Result<Option<(Vec<usize>, Vec<usize>)>> {
        match &self.score_mode {
            ScoreMode::Spread => Ok(None),
            ScoreMode::GroupDifference(spec) => {
                utils::group_indices(table, &spec.case, &spec.reference).map(Some)
            }
        }
    }

    fn score<'g>(
        &self,
        table: &GeneTable,
        gene: &'g str,
        groups: Option<&(Vec<usize>, Vec<usize>)>,
    ) -> Result<Scored<'g>> {
        let (score, comparison) = match groups {
            None => {
                let values = utils::non_empty_expression(table, gene)?;
                (utils::population_variance(&values).sqrt(), None)
            }
            Some((case, reference)) => {
                let values = utils::expression_of(table, gene)?;
                let comparison = compare_groups(&values, case, reference, self.t_test);
                (comparison.mean_difference.abs(), Some(comparison))
            }
        };

        Ok(Scored {
            gene,
            score,
            comparison,
        })
    }
}

/// [`Analyzer::score_one`] with the default configuration (spread scores).
pub fn score_one(table: &GeneTable, gene: &str) -> Result<DifferentialResult> {
    Analyzer::default().score_one(table, gene)
}

/// [`Analyzer::rank_top_n`] with the default configuration (spread scores).
pub fn rank_top_n<S: AsRef<str>>(
    table: &GeneTable,
    genes: &[S],
    n: usize,
) -> Result<Vec<DifferentialResult>> {
    Analyzer::default().rank_top_n(table, genes, n)
}

fn compare_groups(
    values: &ArrayView1<f64>,
    case: &[usize],
    reference: &[usize],
    t_test: TTestType,
) -> GroupComparison {
    let case_values = values.select(Axis(0), case).to_vec();
    let reference_values = values.select(Axis(0), reference).to_vec();

    let case_mean = utils::mean(&ArrayView1::from(case_values.as_slice()));
    let reference_mean = utils::mean(&ArrayView1::from(reference_values.as_slice()));

    let (case_sum, case_sum_sq) = sums(&case_values);
    let (reference_sum, reference_sum_sq) = sums(&reference_values);
    let n_case = case_values.len() as f64;
    let n_reference = reference_values.len() as f64;

    GroupComparison {
        case_mean,
        reference_mean,
        mean_difference: case_mean - reference_mean,
        test: t_test_from_sums(
            case_sum,
            case_sum_sq,
            n_case,
            reference_sum,
            reference_sum_sq,
            n_reference,
            t_test,
        ),
    }
}

/// A scored candidate. Orders so that `Greater` ranks earlier.
#[derive(Debug)]
struct Scored<'g> {
    gene: &'g str,
    score: f64,
    comparison: Option<GroupComparison>,
}

impl Scored<'_> {
    fn into_result(self, rank: usize) -> DifferentialResult {
        DifferentialResult {
            gene: self.gene.to_string(),
            score: self.score,
            rank,
            comparison: self.comparison,
        }
    }
}

impl Ord for Scored<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.score
            .total_cmp(&other.score)
            .then_with(|| other.gene.cmp(self.gene))
    }
}

impl PartialOrd for Scored<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Scored<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Scored<'_> {}

fn select_with_sort(mut scored: Vec<Scored<'_>>, n: usize) -> Vec<Scored<'_>> {
    scored.sort_unstable_by(|a, b| b.cmp(a));
    scored.truncate(n);
    scored
}

fn select_with_heap(scored: Vec<Scored<'_>>, n: usize) -> Vec<Scored<'_>> {
    // Min-heap: the root is the weakest of the current top n.
    let mut heap = BinaryHeap::with_capacity(n.min(scored.len()));
    for candidate in scored {
        if heap.len() < n {
            heap.push(Reverse(candidate));
        } else if let Some(mut weakest) = heap.peek_mut() {
            if candidate > weakest.0 {
                *weakest = Reverse(candidate);
            }
        }
    }

    heap.into_sorted_vec()
        .into_iter()
        .map(|Reverse(s)| s)
        .collect()
}
