//! exprstat command-line interface

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use log::LevelFilter;

use expression_statistics::cli::Cli;
use expression_statistics::data::{GeneTable, read_gene_table};
use expression_statistics::error::StatsError;
use expression_statistics::report::{AnalysisReport, Destinations, Section};
use expression_statistics::stats::{
    describe_many, filter_above_threshold, samples_above_threshold,
};

fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    env_logger::Builder::new()
        .filter_level(log_level)
        .format_timestamp(None)
        .parse_default_env()
        .init();

    match run(&cli) {
        Ok(0) => ExitCode::SUCCESS,
        Ok(failed) => {
            log::error!("{} request(s) failed", failed);
            ExitCode::FAILURE
        }
        Err(e) => {
            log::error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Returns the number of requests that failed.
fn run(cli: &Cli) -> anyhow::Result<usize> {
    let table = read_gene_table(&cli.data_file)
        .with_context(|| format!("Failed to load {}", cli.data_file.display()))?;

    let destinations = configure_destinations(cli);

    let mut report = AnalysisReport::new();
    let mut failed = 0;

    for outcome in collect_sections(cli, &table) {
        match outcome {
            Ok(section) => report.push(section),
            Err(e) => {
                log::error!("{}", e);
                failed += 1;
            }
        }
    }

    if report.is_empty() {
        log::warn!("No analysis produced output; publishing an empty report");
    }
    report.publish(&destinations, chrono::Local::now().naive_local())?;
    Ok(failed)
}

fn configure_destinations(cli: &Cli) -> Destinations {
    let mut destinations = cli.destinations();

    for dest in &cli.add {
        destinations.add(dest.as_str());
        println!("Destination {} added.", dest);
    }

    for dest in &cli.remove {
        destinations.remove(dest.as_str());
        println!("Destination {} removed.", dest);
    }

    if let Some(dest) = &cli.check {
        if destinations.contains(dest.as_str()) {
            println!("Destination {} is in the output destinations.", dest);
        } else {
            println!("Destination {} is NOT in the output destinations.", dest);
        }
    }

    println!("{}", destinations);
    if destinations.is_empty() {
        log::warn!("No report destinations configured; the report will not be written");
    }
    destinations
}

/// Run every requested analysis, in report order.
fn collect_sections(cli: &Cli, table: &GeneTable) -> Vec<Result<Section, StatsError>> {
    let mut sections = Vec::new();
    let all_genes = table.gene_names();

    if cli.list_genes {
        sections.push(Ok(Section::GeneNames(all_genes.to_vec())));
    }

    if let Some(gene) = &cli.gene {
        sections.push(
            table
                .expression(gene)
                .map(|values| Section::Expression {
                    gene: gene.clone(),
                    values: values.to_vec(),
                })
                .ok_or_else(|| StatsError::UnknownGene { gene: gene.clone() }),
        );
    }

    if !cli.statistics.is_empty() {
        sections.push(describe_many(table, &cli.statistics).map(Section::Statistics));
    }

    if !cli.differential.is_empty() || cli.top_n.is_some() {
        let candidates: &[String] = if cli.differential.is_empty() {
            all_genes
        } else {
            &cli.differential
        };
        log::debug!(
            "Ranking {} candidate genes by {} score",
            candidates.len(),
            cli.score_name()
        );

        let ranking = top_n(cli.top_n, candidates.len()).and_then(|n| {
            cli.analyzer().rank_top_n(table, candidates, n)
        });
        sections.push(ranking.map(|results| Section::Differential {
            score: cli.score_name().to_string(),
            results,
        }));
    }

    if let Some(threshold) = cli.threshold {
        let genes: &[String] = if cli.genes_above_threshold.is_empty() {
            all_genes
        } else {
            &cli.genes_above_threshold
        };

        sections.push(
            filter_above_threshold(table, genes, threshold)
                .map(|results| Section::Threshold { threshold, results }),
        );
        sections.push(
            samples_above_threshold(table, genes, threshold, &cli.case_group).map(|results| {
                Section::SampleHits {
                    threshold,
                    case_label: cli.case_group.clone(),
                    results,
                }
            }),
        );
    }

    sections
}

/// `--top-n` as a selection size; without it every candidate is kept.
fn top_n(requested: Option<i64>, candidates: usize) -> Result<usize, StatsError> {
    match requested {
        None => Ok(candidates.max(1)),
        Some(n) if n > 0 => usize::try_from(n).map_err(|_| StatsError::InvalidTopN { requested: n }),
        Some(n) => Err(StatsError::InvalidTopN { requested: n }),
    }
}
