//! Per-gene descriptive statistics.
//!
//! Variance follows the population convention (sum of squared deviations
//! divided by the number of samples), so a single observation has variance 0.

use ndarray::ArrayView1;
use statrs::statistics::{Data, Median};

use crate::data::GeneTable;
use crate::error::Result;
use crate::stats::utils;

#[derive(Debug, Clone, PartialEq)]
pub struct DescriptiveStatsResult {
    pub gene: String,
    pub mean: f64,
    /// Square root of [`variance`](Self::variance)
    pub std_dev: f64,
    /// Population variance
    pub variance: f64,
    pub min: f64,
    pub max: f64,
    pub median: f64,
    /// Number of samples the statistics were computed over
    pub count: usize,
}

/// Compute descriptive statistics for one gene.
///
/// # Errors
///
/// `UnknownGene` if `gene` is not in `table`, `EmptySequence` if the table has
/// no samples.
pub fn describe(table: &GeneTable, gene: &str) -> Result<DescriptiveStatsResult> {
    let values = utils::non_empty_expression(table, gene)?;
    Ok(summarize(gene, &values))
}

/// Compute descriptive statistics for several genes.
///
/// Every name is checked before anything is computed, so one unknown gene fails
/// the whole request. Repeated names are reported once, in first-seen order.
pub fn describe_many<S: AsRef<str>>(
    table: &GeneTable,
    genes: &[S],
) -> Result<Vec<DescriptiveStatsResult>> {
    utils::validate_genes(table, genes)?;
    utils::unique_in_order(genes)
        .into_iter()
        .map(|gene| describe(table, gene))
        .collect()
}

fn summarize(gene: &str, values: &ArrayView1<f64>) -> DescriptiveStatsResult {
    let variance = utils::population_variance(values);
    let (min, max) = utils::min_max(values);

    DescriptiveStatsResult {
        gene: gene.to_string(),
        mean: utils::mean(values),
        std_dev: variance.sqrt(),
        variance,
        min,
        max,
        median: Data::new(values.to_vec()).median(),
        count: values.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StatsError;
    use approx::assert_abs_diff_eq;

    fn example_table() -> GeneTable {
        GeneTable::from_genes(vec![
            ("GeneA", vec![2.0, 4.0, 6.0]),
            ("GeneB", vec![10.0, 10.0, 10.0]),
            ("GeneC", vec![-1.0, 3.0, 0.5, 7.5]),
        ])
        .unwrap()
    }

    #[test]
    fn test_describe_spread_gene() {
        let stats = describe(&example_table(), "GeneA").unwrap();
        assert_eq!(stats.gene, "GeneA");
        assert_abs_diff_eq!(stats.mean, 4.0);
        assert_abs_diff_eq!(stats.variance, 8.0 / 3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(stats.std_dev, 1.632_993, epsilon = 1e-6);
        assert_eq!(stats.min, 2.0);
        assert_eq!(stats.max, 6.0);
        assert_abs_diff_eq!(stats.median, 4.0, epsilon = 1e-9);
        assert_eq!(stats.count, 3);
    }

    #[test]
    fn test_describe_constant_gene() {
        let stats = describe(&example_table(), "GeneB").unwrap();
        assert_abs_diff_eq!(stats.mean, 10.0);
        assert_abs_diff_eq!(stats.variance, 0.0);
        assert_abs_diff_eq!(stats.std_dev, 0.0);
    }

    #[test]
    fn test_median_of_even_count() {
        let stats = describe(&example_table(), "GeneC").unwrap();
        assert_abs_diff_eq!(stats.median, 1.75, epsilon = 1e-9);
        assert_eq!(stats.min, -1.0);
        assert_eq!(stats.max, 7.5);
    }

    #[test]
    fn test_single_value() {
        let table = GeneTable::from_genes(vec![("Solo", vec![3.25])]).unwrap();
        let stats = describe(&table, "Solo").unwrap();
        assert_eq!(stats.variance, 0.0);
        assert_eq!(stats.std_dev, 0.0);
        assert_eq!(stats.mean, 3.25);
        assert_eq!(stats.median, 3.25);
    }

    #[test]
    fn test_values_near_float_max() {
        let table = GeneTable::from_genes(vec![("Big", vec![1e308, 1e308])]).unwrap();
        let stats = describe(&table, "Big").unwrap();
        assert!(stats.mean.is_finite());
        assert_eq!(stats.mean, 1e308);
        assert_eq!(stats.variance, 0.0);
        assert!(stats.mean >= stats.min && stats.mean <= stats.max);
    }

    #[test]
    fn test_unknown_gene() {
        assert_eq!(
            describe(&example_table(), "GeneZ"),
            Err(StatsError::UnknownGene {
                gene: "GeneZ".to_string()
            })
        );
    }

    #[test]
    fn test_empty_sequence() {
        let table = GeneTable::from_genes(vec![("Empty", vec![])]).unwrap();
        assert_eq!(
            describe(&table, "Empty"),
            Err(StatsError::EmptySequence {
                gene: "Empty".to_string()
            })
        );
    }

    #[test]
    fn test_describe_many_is_all_or_nothing() {
        let table = example_table();
        assert!(matches!(
            describe_many(&table, &["GeneA", "Missing", "GeneB"]),
            Err(StatsError::UnknownGene { .. })
        ));

        let stats = describe_many(&table, &["GeneB", "GeneA", "GeneB"]).unwrap();
        let names: Vec<_> = stats.iter().map(|s| s.gene.as_str()).collect();
        assert_eq!(names, vec!["GeneB", "GeneA"]);
    }
}
