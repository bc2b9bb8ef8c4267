//! Command-line interface for exprstat

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::report::Destinations;
use crate::stats::{Analyzer, GroupSpec, ScoreMode, TTestType};

#[derive(Parser, Debug)]
#[command(name = "exprstat")]
#[command(version)]
#[command(about = "Gene expression statistics and reports")]
#[command(after_long_help = "\
Examples:
  # Descriptive statistics for two genes, printed to the screen
  exprstat -d liver.csv --statistics TP53 MYC

  # Top 10 genes by HCC vs normal mean difference, written to a file as well
  exprstat -d liver.csv --top-n 10 --score group-difference --add results

  # Mean expression and per-sample hits above 8.5 for every gene
  exprstat -d liver.csv --threshold 8.5")]
pub struct Cli {
    /// Path to the expression CSV (sample,group,GENE...)
    #[arg(short, long, value_name = "PATH")]
    pub data_file: PathBuf,

    /// Report the expression values of one gene
    #[arg(short, long, value_name = "GENE")]
    pub gene: Option<String>,

    /// Report all gene names
    #[arg(long)]
    pub list_genes: bool,

    /// Genes to compute descriptive statistics for
    #[arg(long, num_args = 1.., value_name = "GENE")]
    pub statistics: Vec<String>,

    /// Candidate genes for differential ranking [default: all genes]
    #[arg(long, num_args = 1.., value_name = "GENE")]
    pub differential: Vec<String>,

    /// Number of top differentially expressed genes to keep
    #[arg(long, value_name = "N", allow_negative_numbers = true)]
    pub top_n: Option<i64>,

    /// Differential score
    #[arg(long, value_enum, default_value_t = ScoreArg::Spread,
        long_help = "Differential score.\n\
            spread:           population standard deviation of the gene's values\n\
            group-difference: |mean(case) - mean(reference)| with a t-test")]
    pub score: ScoreArg,

    /// Case group label for group-difference scores
    #[arg(long, default_value = "HCC", value_name = "LABEL")]
    pub case_group: String,

    /// Reference group label for group-difference scores
    #[arg(long, default_value = "normal", value_name = "LABEL")]
    pub reference_group: String,

    /// t-test used with group-difference scores
    #[arg(long, value_enum, default_value_t = TTestArg::Welch)]
    pub t_test: TTestArg,

    /// Expression threshold
    #[arg(long, value_name = "VALUE", allow_negative_numbers = true)]
    pub threshold: Option<f64>,

    /// Genes to compare against the threshold [default: all genes]
    #[arg(long, num_args = 0.., value_name = "GENE", requires = "threshold")]
    pub genes_above_threshold: Vec<String>,

    /// Report destinations ('screen' or a file name)
    #[arg(short, long, num_args = 1.., default_value = "screen", value_name = "DEST")]
    pub output: Vec<String>,

    /// Add report destinations
    #[arg(long, num_args = 1.., value_name = "DEST")]
    pub add: Vec<String>,

    /// Remove report destinations
    #[arg(long, num_args = 1.., value_name = "DEST")]
    pub remove: Vec<String>,

    /// Check whether a destination is configured
    #[arg(long, value_name = "DEST")]
    pub check: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ScoreArg {
    Spread,
    GroupDifference,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TTestArg {
    Welch,
    Student,
}

impl Cli {
    /// Differential configuration selected by the flags.
    pub fn analyzer(&self) -> Analyzer {
        let mode = match self.score {
            ScoreArg::Spread => ScoreMode::Spread,
            ScoreArg::GroupDifference => ScoreMode::GroupDifference(GroupSpec::new(
                self.case_group.as_str(),
                self.reference_group.as_str(),
            )),
        };
        let t_test = match self.t_test {
            TTestArg::Welch => TTestType::Welch,
            TTestArg::Student => TTestType::Student,
        };
        Analyzer::new(mode).with_t_test(t_test)
    }

    /// Initial destinations from `--output`, before `--add`/`--remove`.
    pub fn destinations(&self) -> Destinations {
        Destinations::new(self.output.iter().map(String::as_str))
    }

    pub fn score_name(&self) -> &'static str {
        match self.score {
            ScoreArg::Spread => "spread",
            ScoreArg::GroupDifference => "group-difference",
        }
    }
}
