//! Threshold filtering.
//!
//! A gene's representative value is its mean expression, the same figure
//! reported as [`DescriptiveStatsResult::mean`](crate::stats::DescriptiveStatsResult::mean).
//! Comparisons are strict (`value > threshold`) and results keep the order in
//! which genes were requested.

use crate::data::GeneTable;
use crate::error::{Result, StatsError};
use crate::stats::utils;

#[derive(Debug, Clone, PartialEq)]
pub struct ThresholdResult {
    pub gene: String,
    /// Mean expression of the gene
    pub value: f64,
    pub exceeds: bool,
}

/// A single sample whose value passed the threshold.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleHit {
    pub sample: String,
    pub group: Option<String>,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SampleHits {
    pub gene: String,
    pub hits: Vec<SampleHit>,
    /// Share of `hits` labelled with the case group, in percent. `None` without hits.
    pub case_percentage: Option<f64>,
}

/// Compare each gene's mean expression against `threshold`.
///
/// One result per requested gene, in request order; repeated names are
/// repeated in the output. An empty request yields an empty result.
pub fn filter_above_threshold<S: AsRef<str>>(
    table: &GeneTable,
    genes: &[S],
    threshold: f64,
) -> Result<Vec<ThresholdResult>> {
    check_threshold(threshold)?;
    utils::validate_genes(table, genes)?;

    genes
        .iter()
        .map(|gene| {
            let gene = gene.as_ref();
            let values = utils::non_empty_expression(table, gene)?;
            let value = utils::mean(&values);
            Ok(ThresholdResult {
                gene: gene.to_string(),
                value,
                exceeds: value > threshold,
            })
        })
        .collect()
}

/// Only the genes whose mean expression exceeds `threshold`, in request order.
pub fn genes_above_threshold<S: AsRef<str>>(
    table: &GeneTable,
    genes: &[S],
    threshold: f64,
) -> Result<Vec<ThresholdResult>> {
    let mut results = filter_above_threshold(table, genes, threshold)?;
    results.retain(|r| r.exceeds);
    Ok(results)
}

/// For each gene, list the samples whose individual value exceeds `threshold`.
///
/// `case_label` names the group whose share of the hits is reported.
pub fn samples_above_threshold<S: AsRef<str>>(
    table: &GeneTable,
    genes: &[S],
    threshold: f64,
    case_label: &str,
) -> Result<Vec<SampleHits>> {
    check_threshold(threshold)?;
    utils::validate_genes(table, genes)?;

    genes
        .iter()
        .map(|gene| {
            let gene = gene.as_ref();
            let values = utils::expression_of(table, gene)?;

            let hits: Vec<SampleHit> = values
                .iter()
                .zip(table.samples())
                .filter(|&(&v, _)| v > threshold)
                .map(|(&value, sample)| SampleHit {
                    sample: sample.id.clone(),
                    group: sample.group.clone(),
                    value,
                })
                .collect();

            let case_percentage = (!hits.is_empty()).then(|| {
                let in_case = hits
                    .iter()
                    .filter(|h| h.group.as_deref() == Some(case_label))
                    .count();
                in_case as f64 / hits.len() as f64 * 100.0
            });

            Ok(SampleHits {
                gene: gene.to_string(),
                hits,
                case_percentage,
            })
        })
        .collect()
}

fn check_threshold(threshold: f64) -> Result<()> {
    if threshold.is_finite() {
        Ok(())
    } else {
        Err(StatsError::InvalidThreshold { value: threshold })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Sample;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    fn example_table() -> GeneTable {
        GeneTable::from_genes(vec![
            ("GeneA", vec![2.0, 4.0, 6.0]),
            ("GeneB", vec![10.0, 10.0, 10.0]),
        ])
        .unwrap()
    }

    #[test]
    fn test_filter_keeps_request_order() {
        let results = filter_above_threshold(&example_table(), &["GeneA", "GeneB"], 5.0).unwrap();
        assert_eq!(
            results,
            vec![
                ThresholdResult {
                    gene: "GeneA".to_string(),
                    value: 4.0,
                    exceeds: false
                },
                ThresholdResult {
                    gene: "GeneB".to_string(),
                    value: 10.0,
                    exceeds: true
                },
            ]
        );

        let reversed = filter_above_threshold(&example_table(), &["GeneB", "GeneA"], 5.0).unwrap();
        assert_eq!(reversed[0].gene, "GeneB");
    }

    #[test]
    fn test_comparison_is_strict() {
        let results = filter_above_threshold(&example_table(), &["GeneA"], 4.0).unwrap();
        assert!(!results[0].exceeds);
    }

    #[test]
    fn test_large_values_do_not_overflow() {
        let table = GeneTable::from_genes(vec![("Big", vec![1e308, 1e308])]).unwrap();
        let results = filter_above_threshold(&table, &["Big"], 1.7e308).unwrap();
        assert_eq!(results[0].value, 1e308);
        assert!(!results[0].exceeds);
    }

    #[test]
    fn test_genes_above_threshold() {
        let results = genes_above_threshold(&example_table(), &["GeneA", "GeneB"], 5.0).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].gene, "GeneB");
    }

    #[test]
    fn test_empty_request() {
        let results = filter_above_threshold::<&str>(&example_table(), &[], 1.0).unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn test_errors() {
        let table = example_table();
        assert!(matches!(
            filter_above_threshold(&table, &["GeneA", "Ghost"], 1.0),
            Err(StatsError::UnknownGene { .. })
        ));
        assert!(matches!(
            filter_above_threshold(&table, &["GeneA"], f64::NAN),
            Err(StatsError::InvalidThreshold { .. })
        ));
        assert!(matches!(
            samples_above_threshold(&table, &["GeneA"], f64::INFINITY, "HCC"),
            Err(StatsError::InvalidThreshold { .. })
        ));
    }

    #[test]
    fn test_samples_above_threshold() {
        let table = GeneTable::new(
            array![[1.0, 6.0, 7.0, 8.0], [0.5, 0.1, 0.2, 0.3]],
            vec!["AFP".to_string(), "ALB".to_string()],
            vec![
                Sample::new("GSM1", Some("normal".to_string())),
                Sample::new("GSM2", Some("normal".to_string())),
                Sample::new("GSM3", Some("HCC".to_string())),
                Sample::new("GSM4", Some("HCC".to_string())),
            ],
        )
        .unwrap();

        let results = samples_above_threshold(&table, &["AFP", "ALB"], 5.0, "HCC").unwrap();
        assert_eq!(results.len(), 2);

        let afp = &results[0];
        let samples: Vec<_> = afp.hits.iter().map(|h| h.sample.as_str()).collect();
        assert_eq!(samples, vec!["GSM2", "GSM3", "GSM4"]);
        assert_abs_diff_eq!(afp.case_percentage.unwrap(), 200.0 / 3.0, epsilon = 1e-9);

        let alb = &results[1];
        assert!(alb.hits.is_empty());
        assert_eq!(alb.case_percentage, None);
    }
}
