//! # expression-statistics
//!
//! Descriptive and differential statistics over gene-expression tables, plus the
//! plumbing needed to run them from the command line: CSV ingestion, report
//! rendering and report destinations.
//!
//! ## Core Features
//!
//! - **Descriptive Statistics**: mean, population variance, standard deviation, min, max and median per gene
//! - **Differential Expression**: spread or case-vs-reference group scores, deterministic ranking and top-N selection
//! - **Threshold Filtering**: mean expression against a cutoff, and the individual samples exceeding it
//! - **Reports**: framed text reports written to the screen and/or text files
//!
//! ## Quick Start
//!
//! Load a table with [`data::read_gene_table`] (or build one with
//! [`data::GeneTable::from_genes`]) and call the functions in [`stats`]. The
//! statistical functions never mutate the table and keep no state between calls.
//!
//! ```
//! use expression_statistics::data::GeneTable;
//! use expression_statistics::stats::{describe, rank_top_n};
//!
//! let table = GeneTable::from_genes(vec![
//!     ("GeneA", vec![2.0, 4.0, 6.0]),
//!     ("GeneB", vec![10.0, 10.0, 10.0]),
//! ])?;
//!
//! let stats = describe(&table, "GeneA")?;
//! assert_eq!(stats.mean, 4.0);
//!
//! let top = rank_top_n(&table, &["GeneA", "GeneB"], 1)?;
//! assert_eq!(top[0].gene, "GeneA");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Module Organization
//!
//! - **[`data`]**: validated expression table and CSV reader
//! - **[`stats`]**: descriptive statistics, differential ranking, threshold filters, t-tests
//! - **[`report`]**: report sections, rendering and destinations
//! - **[`cli`]**: command-line argument definitions for the `exprstat` binary
//! - **[`error`]**: error types

pub mod cli;
pub mod data;
pub mod error;
pub mod report;
pub mod stats;
