// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Runner configuration loaded from environment variables.

use hole_placer_core::PlacementConfig;

/// Runner configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Project JSON to load.
    pub project: String,
    /// Title of the linked document carrying ducts and pipes.
    pub companion: String,
    /// Where to write the project with placed markers, if anywhere.
    pub output: Option<String>,
    /// Number of worker threads for parallel resolution.
    pub worker_threads: usize,
    pub placement: PlacementConfig,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = PlacementConfig::default();

        Self {
            project: var("HOLE_PLACER_PROJECT").unwrap_or_else(|| "project.json".into()),
            companion: var("HOLE_PLACER_COMPANION").unwrap_or_else(|| "MEP".into()),
            output: var("HOLE_PLACER_OUTPUT").filter(|s| !s.trim().is_empty()),
            worker_threads: var("WORKER_THREADS")
                .unwrap_or_else(|| num_cpus::get().to_string())
                .parse()
                .unwrap_or_else(|_| num_cpus::get()),
            placement: PlacementConfig {
                family_name: var("HOLE_PLACER_FAMILY").unwrap_or(defaults.family_name),
                width_parameter: var("HOLE_PLACER_WIDTH_PARAM")
                    .unwrap_or(defaults.width_parameter),
                height_parameter: var("HOLE_PLACER_HEIGHT_PARAM")
                    .unwrap_or(defaults.height_parameter),
                parallel: var("HOLE_PLACER_PARALLEL")
                    .unwrap_or_else(|| "true".into())
                    .parse()
                    .unwrap_or(defaults.parallel),
                ..defaults
            },
        }
    }

    /// First positional argument overrides the project path.
    pub fn with_args(mut self, mut args: impl Iterator<Item = String>) -> Self {
        if let Some(project) = args.next() {
            self.project = project;
        }
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
