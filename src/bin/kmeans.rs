//! K-Means Binary
//!
//! Clusters a JSON dataset and writes the labelled table back out.

use anyhow::Context;
use clap::Parser;
use kclust::*;
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON dataset with `times`, `columns` and optional `centroids`
    #[arg(required = true)]
    input: PathBuf,
    /// JSON settings file, overridden by the flags below
    #[arg(long)]
    settings: Option<PathBuf>,
    /// Number of clusters
    #[arg(short, long)]
    k: Option<usize>,
    /// Minimum observations per cluster
    #[arg(long)]
    min_size: Option<usize>,
    /// raw, demean or standardize
    #[arg(long)]
    transform: Option<String>,
    /// a (mean), b (mean, k-means++) or m (median)
    #[arg(long)]
    method: Option<char>,
    /// e, b, c, a, u, x, s or k
    #[arg(long)]
    metric: Option<char>,
    /// Total restart budget
    #[arg(short, long)]
    npass: Option<usize>,
    /// Iteration cap of one restart
    #[arg(long)]
    maxiter: Option<usize>,
    #[arg(long)]
    seed: Option<u64>,
    /// Weight of geometric centroids in [0, 1]
    #[arg(long)]
    centroids: Option<f64>,
    /// Comma separated variable labels
    #[arg(short, long, value_delimiter = ',')]
    variables: Vec<String>,
    /// Field receiving the cluster labels
    #[arg(short, long)]
    field: Option<String>,
    #[arg(long)]
    threads: Option<usize>,
    /// Write here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Write only the labels instead of the whole table
    #[arg(long)]
    labels: bool,
}

impl Args {
    fn settings(&self) -> anyhow::Result<Settings> {
        let mut settings = match self.settings {
            Some(ref path) => serde_json::from_str::<Settings>(
                &std::fs::read_to_string(path)
                    .with_context(|| format!("read settings {}", path.display()))?,
            )
            .with_context(|| format!("parse settings {}", path.display()))?,
            None => Settings::default(),
        };
        if let Some(k) = self.k {
            settings.k = k;
        }
        if let Some(min_size) = self.min_size {
            settings.min_size = min_size;
        }
        if let Some(ref transform) = self.transform {
            settings.transform = Transform::try_from(transform.as_str())?;
        }
        if let Some(method) = self.method {
            settings.method = Method::try_from(method)?;
        }
        if let Some(metric) = self.metric {
            settings.metric = Metric::try_from(metric)?;
        }
        if let Some(npass) = self.npass {
            settings.npass = npass;
        }
        if let Some(maxiter) = self.maxiter {
            settings.maxiter = maxiter;
        }
        if let Some(ref field) = self.field {
            settings.field = field.clone();
        }
        if !self.variables.is_empty() {
            settings.variables = self.variables.clone();
        }
        settings.seed = self.seed.or(settings.seed);
        settings.centroids = self.centroids.or(settings.centroids);
        settings.threads = self.threads.or(settings.threads);
        Ok(settings)
    }
}

fn main() -> anyhow::Result<()> {
    log();
    let args = Args::parse();
    let ref settings = args.settings()?;
    let mut table = serde_json::from_str::<Table>(
        &std::fs::read_to_string(&args.input)
            .with_context(|| format!("read dataset {}", args.input.display()))?,
    )
    .with_context(|| format!("parse dataset {}", args.input.display()))?;
    let mut visualizer = LogVisualizer::default();
    let report = Session::new(settings, &KCluster)
        .run(&mut table, Some(&mut visualizer))
        .context("kmeans")?;
    log::info!(
        "{:<32}{:<32}",
        "cluster sizes",
        format!("{:?}", report.labeling.sizes())
    );
    let json = match args.labels {
        true => serde_json::to_string_pretty(&serde_json::json!({
            "field": report.field,
            "error": report.error,
            "labels": report.labeling.labels(),
        }))?,
        false => serde_json::to_string_pretty(&table)?,
    };
    match args.output {
        Some(ref path) => std::fs::write(path, json)
            .with_context(|| format!("write output {}", path.display()))?,
        None => println!("{}", json),
    }
    Ok(())
}
