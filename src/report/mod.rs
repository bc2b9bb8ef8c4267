//! Text rendering of analysis results and dispatch to report destinations.
//!
//! An [`AnalysisReport`] collects result sections in the order they are added.
//! [`AnalysisReport::render`] turns them into a framed text report and
//! [`AnalysisReport::publish`] writes that text to every configured
//! [`Destination`]: standard output for `screen`, appended text files otherwise.

use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;

use anyhow::Context;
use chrono::NaiveDateTime;

use crate::stats::{DescriptiveStatsResult, DifferentialResult, SampleHits, ThresholdResult};

pub mod destination;

pub use destination::{Destination, Destinations};

const RULE_WIDTH: usize = 50;
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
/// p-values below this are flagged in the differential section.
const SIGNIFICANCE_LEVEL: f64 = 0.05;

/// One block of the report body.
#[derive(Debug, Clone)]
pub enum Section {
    GeneNames(Vec<String>),
    Expression {
        gene: String,
        values: Vec<f64>,
    },
    Statistics(Vec<DescriptiveStatsResult>),
    Differential {
        /// Human-readable name of the score (e.g. `spread`)
        score: String,
        results: Vec<DifferentialResult>,
    },
    Threshold {
        threshold: f64,
        results: Vec<ThresholdResult>,
    },
    SampleHits {
        threshold: f64,
        case_label: String,
        results: Vec<SampleHits>,
    },
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Section::GeneNames(names) => {
                writeln!(f, "Gene names ({}):", names.len())?;
                writeln!(f, "{}", names.join(", "))
            }
            Section::Expression { gene, values } => {
                writeln!(f, "Expression values for {} ({} samples):", gene, values.len())?;
                let formatted: Vec<String> = values.iter().map(|v| format!("{v:.3}")).collect();
                writeln!(f, "{}", formatted.join(", "))
            }
            Section::Statistics(stats) => {
                writeln!(f, "Descriptive statistics:")?;
                for s in stats {
                    writeln!(
                        f,
                        "  {}: mean={:.3}, std_dev={:.3}, variance={:.3}, min={:.3}, max={:.3}, median={:.3}, n={}",
                        s.gene, s.mean, s.std_dev, s.variance, s.min, s.max, s.median, s.count
                    )?;
                }
                Ok(())
            }
            Section::Differential { score, results } => {
                writeln!(
                    f,
                    "Top {} differentially expressed genes (score: {}):",
                    results.len(),
                    score
                )?;
                for r in results {
                    write!(f, "  {}. {}: score={:.3}", r.rank, r.gene, r.score)?;
                    if let Some(c) = &r.comparison {
                        write!(
                            f,
                            ", case_mean={:.3}, reference_mean={:.3}, difference={:.3}, t={:.3}, p={:.3e}",
                            c.case_mean,
                            c.reference_mean,
                            c.mean_difference,
                            c.test.statistic,
                            c.test.p_value
                        )?;
                        if c.test.is_significant(SIGNIFICANCE_LEVEL) {
                            write!(f, " (significant)")?;
                        }
                    }
                    writeln!(f)?;
                }
                Ok(())
            }
            Section::Threshold { threshold, results } => {
                writeln!(f, "Mean expression against threshold {threshold:.3}:")?;
                for r in results {
                    let verdict = if r.exceeds { "above" } else { "not above" };
                    writeln!(f, "  {}: mean={:.3} ({})", r.gene, r.value, verdict)?;
                }
                Ok(())
            }
            Section::SampleHits {
                threshold,
                case_label,
                results,
            } => {
                writeln!(f, "Samples with expression above {threshold:.3}:")?;
                for gene in results {
                    match gene.case_percentage {
                        None => writeln!(f, "  {}: no expressions above the threshold", gene.gene)?,
                        Some(pct) => {
                            writeln!(
                                f,
                                "  {}: {} samples, {:.3}% {}",
                                gene.gene,
                                gene.hits.len(),
                                pct,
                                case_label
                            )?;
                            for hit in &gene.hits {
                                writeln!(
                                    f,
                                    "    {} ({}): {:.3}",
                                    hit.sample,
                                    hit.group.as_deref().unwrap_or("-"),
                                    hit.value
                                )?;
                            }
                        }
                    }
                }
                Ok(())
            }
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AnalysisReport {
    sections: Vec<Section>,
}

impl AnalysisReport {
    pub fn new() -> Self {
        AnalysisReport::default()
    }

    pub fn push(&mut self, section: Section) {
        self.sections.push(section);
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Render the framed report text.
    pub fn render(&self, generated_at: NaiveDateTime) -> String {
        let rule = "=".repeat(RULE_WIDTH);
        let mut out = format!(
            "{rule}\nANALYSIS REPORT\n{rule}\nReport generated on: {}\n\n",
            generated_at.format(TIMESTAMP_FORMAT)
        );
        for section in &self.sections {
            out.push_str(&section.to_string());
            out.push('\n');
        }
        out.push_str(&format!("{rule}\nEND OF REPORT\n{rule}\n"));
        out
    }

    /// Render once and write the text to every destination.
    pub fn publish(
        &self,
        destinations: &Destinations,
        generated_at: NaiveDateTime,
    ) -> anyhow::Result<()> {
        let content = self.render(generated_at);
        for destination in destinations.iter() {
            log::debug!("Writing report to {}", destination);
            write_to(destination, &content)?;
        }
        Ok(())
    }
}

fn write_to(destination: &Destination, content: &str) -> anyhow::Result<()> {
    match destination {
        Destination::Screen => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{content}").context("Failed to write report to screen")?;
        }
        Destination::File(path) => {
            let mut file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open report file {}", path.display()))?;
            writeln!(file, "{content}")
                .with_context(|| format!("Failed to write report file {}", path.display()))?;
        }
    }
    Ok(())
}
