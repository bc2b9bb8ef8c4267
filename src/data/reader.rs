//! CSV ingestion for expression tables
//!
//! Expected layout: one row per sample. The header is
//! `sample,group,GENE_1,...,GENE_k`; each following row holds the sample id,
//! its condition label and one numeric value per gene.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use ndarray::Array2;

use crate::data::table::{GeneTable, Sample};
use crate::error::DataError;

/// Number of leading non-expression columns (sample id, group label).
const LEADING_COLUMNS: usize = 2;

/// Read an expression table from a CSV file.
pub fn read_gene_table<P: AsRef<Path>>(path: P) -> Result<GeneTable, DataError> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let table = read_gene_table_from(file)?;
    log::info!(
        "Loaded {} genes x {} samples from {}",
        table.n_genes(),
        table.n_samples(),
        path.display()
    );
    Ok(table)
}

/// Read an expression table from any CSV source.
///
/// Fields may be double-quoted, so gene names can contain commas.
pub fn read_gene_table_from<R: Read>(reader: R) -> Result<GeneTable, DataError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut records = csv_reader.records();

    let header = records.next().ok_or_else(|| DataError::EmptyData {
        reason: "Empty CSV file".to_string(),
    })??;

    if header.len() <= LEADING_COLUMNS {
        return Err(DataError::InvalidHeader {
            reason: format!(
                "expected sample and group columns followed by at least one gene, got {} columns",
                header.len()
            ),
        });
    }

    let gene_names: Vec<String> = header
        .iter()
        .skip(LEADING_COLUMNS)
        .map(str::to_string)
        .collect();
    let n_genes = gene_names.len();
    let expected = n_genes + LEADING_COLUMNS;

    let mut samples = Vec::new();
    // Sample-major while reading; transposed into gene rows below.
    let mut by_sample: Vec<f64> = Vec::new();

    for (i, record) in records.enumerate() {
        let record = record?;
        // 1-based line number; the header is line 1.
        let row = record.position().map_or(i + 2, |p| p.line() as usize);

        if record.iter().all(str::is_empty) {
            continue;
        }

        if record.len() != expected {
            return Err(DataError::RaggedRow {
                row,
                expected,
                got: record.len(),
            });
        }

        let group = match &record[1] {
            "" => None,
            label => Some(label.to_string()),
        };
        samples.push(Sample::new(&record[0], group));

        for (field, gene) in record.iter().skip(LEADING_COLUMNS).zip(&gene_names) {
            let value = field
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| DataError::InvalidValue {
                    row,
                    gene: gene.clone(),
                    value: field.to_string(),
                })?;
            by_sample.push(value);
        }
    }

    if samples.is_empty() {
        return Err(DataError::EmptyData {
            reason: "No sample rows found".to_string(),
        });
    }

    let n_samples = samples.len();
    let values = Array2::from_shape_fn((n_genes, n_samples), |(g, s)| by_sample[s * n_genes + g]);

    GeneTable::new(values, gene_names, samples)
}
