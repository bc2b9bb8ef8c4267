use std::collections::HashSet;

use ndarray::ArrayView1;
use statrs::statistics::Statistics;

use crate::data::GeneTable;
use crate::error::{Result, StatsError};

/// Expression values of `gene`, or `UnknownGene`.
pub fn expression_of<'a>(table: &'a GeneTable, gene: &str) -> Result<ArrayView1<'a, f64>> {
    table
        .expression(gene)
        .ok_or_else(|| StatsError::UnknownGene {
            gene: gene.to_string(),
        })
}

/// Like [`expression_of`], additionally rejecting genes without values.
pub fn non_empty_expression<'a>(
    table: &'a GeneTable,
    gene: &str,
) -> Result<ArrayView1<'a, f64>> {
    let values = expression_of(table, gene)?;
    if values.is_empty() {
        return Err(StatsError::EmptySequence {
            gene: gene.to_string(),
        });
    }
    Ok(values)
}

/// Fail on the first name missing from `table`.
pub fn validate_genes<S: AsRef<str>>(table: &GeneTable, genes: &[S]) -> Result<()> {
    match genes.iter().find(|g| !table.contains(g.as_ref())) {
        Some(missing) => Err(StatsError::UnknownGene {
            gene: missing.as_ref().to_string(),
        }),
        None => Ok(()),
    }
}

/// Drop repeated names, keeping the first occurrence of each.
pub fn unique_in_order<S: AsRef<str>>(genes: &[S]) -> Vec<&str> {
    let mut seen = HashSet::with_capacity(genes.len());
    genes
        .iter()
        .map(|g| g.as_ref())
        .filter(|g| seen.insert(*g))
        .collect()
}

/// Column indices of the case and reference samples.
pub fn group_indices(
    table: &GeneTable,
    case: &str,
    reference: &str,
) -> Result<(Vec<usize>, Vec<usize>)> {
    let case_indices = table.group_indices(case);
    if case_indices.is_empty() {
        return Err(StatsError::EmptyGroup {
            label: case.to_string(),
        });
    }

    let reference_indices = table.group_indices(reference);
    if reference_indices.is_empty() {
        return Err(StatsError::EmptyGroup {
            label: reference.to_string(),
        });
    }

    Ok((case_indices, reference_indices))
}

/// Arithmetic mean as a running update, finite for any finite input.
/// `values` must be non-empty.
pub fn mean(values: &ArrayView1<f64>) -> f64 {
    values.iter().mean()
}

/// Population variance (divides by N). `values` must be non-empty.
pub fn population_variance(values: &ArrayView1<f64>) -> f64 {
    values.var(0.0)
}

pub fn min_max(values: &ArrayView1<f64>) -> (f64, f64) {
    values
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        })
}
