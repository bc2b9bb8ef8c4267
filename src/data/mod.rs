//! Expression table representation and ingestion

pub mod reader;
pub mod table;

pub use reader::{read_gene_table, read_gene_table_from};
pub use table::{GeneTable, Sample};
