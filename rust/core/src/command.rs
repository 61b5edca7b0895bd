// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The complete "place holes" command.
//!
//! All preconditions (marker family loaded, 3D view present, intersection
//! index buildable) are checked before the host model is touched. Once they
//! hold, the marker symbol is activated in its own transaction and the
//! markers are placed in a second one.

use std::time::Instant;

use crate::conduit::ConduitSegment;
use crate::config::PlacementConfig;
use crate::error::{Error, PlacementError, Result};
use crate::host::{ConduitSource, IntersectorFactory, ModelMutation, ModelQuery, SymbolActivation};
use crate::ids::SymbolId;
use crate::model::{Category, TargetFilter};
use crate::placement::{with_transaction, MarkerPlacer, PlacementReport};

/// Places hole markers where the conduits of one document cross the walls
/// of another.
#[derive(Debug, Clone, Default)]
pub struct PlacementCommand {
    config: PlacementConfig,
}

impl PlacementCommand {
    pub fn new(config: PlacementConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PlacementConfig {
        &self.config
    }

    /// Runs the command against `host` (walls, levels, marker family) using
    /// the ducts and pipes of `source`.
    pub fn run<H, C>(&self, host: &mut H, source: &C) -> Result<PlacementReport>
    where
        H: ModelQuery + IntersectorFactory + SymbolActivation + ModelMutation + Sync,
        C: ConduitSource + ?Sized,
    {
        let start = Instant::now();

        let symbol = host
            .find_family_symbol(&self.config.family_name, Category::GenericModel)
            .ok_or_else(|| Error::FamilySymbolNotFound(self.config.family_name.clone()))?;

        let view = host.first_3d_view().ok_or(Error::No3dView)?;
        let query = host
            .intersector(TargetFilter::WALLS, view)
            .map_err(Error::IndexUnavailable)?;

        let mut report = PlacementReport::default();
        let segments = collect_segments(source, &mut report.failures);

        tracing::debug!(
            symbol = %symbol,
            view = %view,
            conduits = segments.len(),
            "Preconditions satisfied"
        );

        self.ensure_active(host, symbol)?;

        let placer = MarkerPlacer::new(&query, symbol, &self.config);
        report.merge(placer.place_all(host, &segments)?);

        tracing::info!(
            conduits = segments.len(),
            placed = report.placed_count(),
            failures = report.failures.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Hole placement complete"
        );

        Ok(report)
    }

    fn ensure_active<H>(&self, host: &mut H, symbol: SymbolId) -> Result<()>
    where
        H: SymbolActivation + ModelMutation,
    {
        if host.is_symbol_active(symbol) {
            return Ok(());
        }

        with_transaction(host, &self.config.activation_transaction, |host| {
            host.activate_symbol(symbol)
                .map_err(|reason| Error::SymbolActivation {
                    symbol: symbol.element(),
                    reason,
                })
        })?;
        tracing::debug!(symbol = %symbol, "Activated marker symbol");
        Ok(())
    }
}

/// Converts conduit elements to segments, recording the ones that cannot be
/// handled (curved or degenerate runs).
fn collect_segments<C>(source: &C, failures: &mut Vec<PlacementError>) -> Vec<ConduitSegment>
where
    C: ConduitSource + ?Sized,
{
    let elements = source.conduits();
    let mut segments = Vec::with_capacity(elements.len());

    for element in elements {
        match element.segment() {
            Ok(segment) => segments.push(segment),
            Err(kind) => {
                let err = PlacementError::new(element.id, kind);
                tracing::warn!(error = %err, "Skipping conduit");
                failures.push(err);
            }
        }
    }

    segments
}
