//! Validated gene × sample expression table

use std::collections::HashMap;

use ndarray::{Array2, ArrayView1};

use crate::error::DataError;

/// One measured sample (a column of the table).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sample {
    pub id: String,
    /// Condition label such as `normal` or `HCC`, if the source provided one.
    pub group: Option<String>,
}

impl Sample {
    pub fn new(id: impl Into<String>, group: Option<String>) -> Self {
        Sample {
            id: id.into(),
            group,
        }
    }
}

/// Immutable expression table. Rows are genes, columns are samples.
///
/// Construction enforces the invariants every analysis relies on: gene names
/// are non-empty and unique, every gene has exactly one value per sample and
/// all values are finite.
#[derive(Debug, Clone)]
pub struct GeneTable {
    values: Array2<f64>,
    gene_names: Vec<String>,
    gene_index: HashMap<String, usize>,
    samples: Vec<Sample>,
}

impl GeneTable {
    /// Build a table from a genes × samples matrix.
    pub fn new(
        values: Array2<f64>,
        gene_names: Vec<String>,
        samples: Vec<Sample>,
    ) -> Result<Self, DataError> {
        let (n_genes, n_samples) = values.dim();

        if gene_names.len() != n_genes {
            return Err(DataError::DimensionMismatch {
                expected: format!("{} gene names", n_genes),
                got: format!("{} gene names", gene_names.len()),
            });
        }

        if samples.len() != n_samples {
            return Err(DataError::DimensionMismatch {
                expected: format!("{} samples", n_samples),
                got: format!("{} samples", samples.len()),
            });
        }

        let mut gene_index = HashMap::with_capacity(n_genes);
        for (i, name) in gene_names.iter().enumerate() {
            if name.trim().is_empty() {
                return Err(DataError::EmptyGeneName { column: i });
            }
            if gene_index.insert(name.clone(), i).is_some() {
                return Err(DataError::DuplicateGene { gene: name.clone() });
            }
        }

        if let Some(((g, s), v)) = values.indexed_iter().find(|(_, v)| !v.is_finite()) {
            return Err(DataError::InvalidValue {
                row: s + 1,
                gene: gene_names[g].clone(),
                value: v.to_string(),
            });
        }

        Ok(GeneTable {
            values,
            gene_names,
            gene_index,
            samples,
        })
    }

    /// Build an unlabelled table from `(gene, values)` pairs.
    ///
    /// Samples are named `S1..Sn`. Every value sequence must have the same length.
    pub fn from_genes<I, S>(genes: I) -> Result<Self, DataError>
    where
        I: IntoIterator<Item = (S, Vec<f64>)>,
        S: Into<String>,
    {
        let (names, rows): (Vec<String>, Vec<Vec<f64>>) =
            genes.into_iter().map(|(n, v)| (n.into(), v)).unzip();

        let n_samples = rows.first().map_or(0, Vec::len);
        if let Some((i, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != n_samples) {
            return Err(DataError::DimensionMismatch {
                expected: format!("{} values for gene '{}'", n_samples, names[i]),
                got: format!("{} values", row.len()),
            });
        }

        let flat: Vec<f64> = rows.into_iter().flatten().collect();
        let values = Array2::from_shape_vec((names.len(), n_samples), flat).map_err(|e| {
            DataError::DimensionMismatch {
                expected: format!("{} x {} matrix", names.len(), n_samples),
                got: e.to_string(),
            }
        })?;

        let samples = (1..=n_samples)
            .map(|i| Sample::new(format!("S{}", i), None))
            .collect();

        GeneTable::new(values, names, samples)
    }

    pub fn n_genes(&self) -> usize {
        self.gene_names.len()
    }

    pub fn n_samples(&self) -> usize {
        self.samples.len()
    }

    /// Gene names in load order.
    pub fn gene_names(&self) -> &[String] {
        &self.gene_names
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn contains(&self, gene: &str) -> bool {
        self.gene_index.contains_key(gene)
    }

    /// Expression values of `gene` across all samples, in sample order.
    pub fn expression(&self, gene: &str) -> Option<ArrayView1<'_, f64>> {
        self.gene_index.get(gene).map(|&i| self.values.row(i))
    }

    /// Column indices of the samples carrying `label`.
    pub fn group_indices(&self, label: &str) -> Vec<usize> {
        self.samples
            .iter()
            .enumerate()
            .filter_map(|(i, s)| (s.group.as_deref() == Some(label)).then_some(i))
            .collect()
    }
}
