// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Hole Placer - places hole markers where the ducts and pipes of a linked
//! MEP document cross the walls of the host document.
//!
//! ```text
//! hole-placer [PROJECT.json]
//! ```
//!
//! Settings come from `HOLE_PLACER_*` environment variables (see
//! [`config::Config`]). A JSON summary of the run is printed to stdout; logs
//! go to stderr.

use std::process::ExitCode;

use anyhow::Context;
use hole_placer_core::{PlacementCommand, PlacementReport};
use hole_placer_document::Project;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

mod config;

use config::Config;

#[derive(Debug, Serialize)]
struct Summary<'a> {
    project: &'a str,
    companion: &'a str,
    placed: Vec<PlacedEntry>,
    failures: Vec<FailureEntry>,
}

#[derive(Debug, Serialize)]
struct PlacedEntry {
    instance: i64,
    conduit: i64,
    wall: i64,
    level: i64,
    point: [f64; 3],
    diameter: f64,
}

#[derive(Debug, Serialize)]
struct FailureEntry {
    conduit: i64,
    reason: String,
}

impl<'a> Summary<'a> {
    fn new(config: &'a Config, report: &PlacementReport) -> Self {
        Self {
            project: &config.project,
            companion: &config.companion,
            placed: report
                .placed
                .iter()
                .map(|m| PlacedEntry {
                    instance: m.instance.element().value(),
                    conduit: m.conduit.value(),
                    wall: m.wall.element.value(),
                    level: m.wall.level.value(),
                    point: [m.point.x, m.point.y, m.point.z],
                    diameter: m.diameter,
                })
                .collect(),
            failures: report
                .failures
                .iter()
                .map(|f| FailureEntry {
                    conduit: f.conduit.value(),
                    reason: f.kind.to_string(),
                })
                .collect(),
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,hole_placer_core=debug")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env().with_args(std::env::args().skip(1));

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("hole-placer: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: &Config) -> anyhow::Result<()> {
    tracing::info!(
        project = %config.project,
        companion = %config.companion,
        family = %config.placement.family_name,
        worker_threads = config.worker_threads,
        parallel = config.placement.parallel,
        "Starting hole placement"
    );

    rayon::ThreadPoolBuilder::new()
        .num_threads(config.worker_threads)
        .build_global()
        .context("failed to initialize rayon thread pool")?;

    let mut project = Project::load(&config.project)
        .with_context(|| format!("failed to load project {}", config.project))?;

    let command = PlacementCommand::new(config.placement.clone());
    let report = {
        let (host, companion) = project.split_for_run(&config.companion)?;
        command.run(host, companion).context("hole placement aborted")?
    };

    let summary = Summary::new(config, &report);
    println!("{}", serde_json::to_string_pretty(&summary)?);

    if let Some(output) = &config.output {
        project
            .save(output)
            .with_context(|| format!("failed to write {output}"))?;
        tracing::info!(path = %output, "Saved project");
    }

    Ok(())
}
