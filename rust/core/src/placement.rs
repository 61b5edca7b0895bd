// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Marker placement for resolved crossings.
//!
//! Placement runs in two phases. [`MarkerPlacer::resolve_all`] computes every
//! conduit's crossings against the read-only model, optionally in parallel.
//! [`MarkerPlacer::apply`] then creates and sizes the markers one by one, as
//! the single writer inside one transaction.

use nalgebra::Point3;
use rayon::prelude::*;

use crate::conduit::ConduitSegment;
use crate::config::PlacementConfig;
use crate::error::{Error, PlacementError, PlacementErrorKind, Result};
use crate::host::{ModelMutation, ModelQuery};
use crate::ids::{ElementId, InstanceId, SymbolId};
use crate::model::WallTarget;
use crate::query::IntersectionQuery;
use crate::resolver::{resolve, CrossingRecord, Resolution};

/// A marker instance that was created in the host model.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedMarker {
    pub instance: InstanceId,
    pub conduit: ElementId,
    pub wall: WallTarget,
    pub point: Point3<f64>,
    pub diameter: f64,
}

/// Summary of a placement run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlacementReport {
    pub placed: Vec<PlacedMarker>,
    pub failures: Vec<PlacementError>,
}

impl PlacementReport {
    pub fn placed_count(&self) -> usize {
        self.placed.len()
    }

    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// Appends another report, keeping the order of both.
    pub fn merge(&mut self, other: PlacementReport) {
        self.placed.extend(other.placed);
        self.failures.extend(other.failures);
    }
}

/// Places one marker per resolved conduit/wall crossing.
pub struct MarkerPlacer<'a, Q: ?Sized> {
    query: &'a Q,
    symbol: SymbolId,
    config: &'a PlacementConfig,
}

impl<'a, Q> MarkerPlacer<'a, Q>
where
    Q: IntersectionQuery + Sync + ?Sized,
{
    pub fn new(query: &'a Q, symbol: SymbolId, config: &'a PlacementConfig) -> Self {
        Self {
            query,
            symbol,
            config,
        }
    }

    /// Resolves all conduits. Results are in conduit order regardless of
    /// whether they were computed in parallel.
    pub fn resolve_all<M>(&self, model: &M, conduits: &[ConduitSegment]) -> Vec<Resolution>
    where
        M: ModelQuery + Sync + ?Sized,
    {
        if self.config.parallel {
            conduits
                .par_iter()
                .map(|segment| resolve(segment, self.query, model))
                .collect()
        } else {
            conduits
                .iter()
                .map(|segment| resolve(segment, self.query, model))
                .collect()
        }
    }

    /// Creates and sizes a marker for every crossing.
    ///
    /// Must run inside an open transaction. Resolution failures are carried
    /// into the report; placement failures are recorded and skipped.
    pub fn apply<M>(&self, host: &mut M, resolutions: Vec<Resolution>) -> PlacementReport
    where
        M: ModelMutation + ?Sized,
    {
        let mut report = PlacementReport::default();

        for resolution in resolutions {
            let conduit = resolution.conduit;
            report.failures.extend(
                resolution
                    .failures
                    .into_iter()
                    .map(|err| PlacementError::new(conduit, err)),
            );

            for crossing in resolution.crossings {
                match self.place(host, &crossing) {
                    Ok((marker, failures)) => {
                        report.placed.push(marker);
                        report.failures.extend(failures);
                    }
                    Err(failure) => report.failures.push(failure),
                }
            }
        }

        report
    }

    /// Resolves and places markers for `conduits` in one placement transaction.
    ///
    /// Only a transaction that cannot be opened or committed fails the call;
    /// everything else ends up in the report.
    pub fn place_all<H>(&self, host: &mut H, conduits: &[ConduitSegment]) -> Result<PlacementReport>
    where
        H: ModelQuery + ModelMutation + Sync,
    {
        let resolutions = self.resolve_all(&*host, conduits);
        with_transaction(host, &self.config.placement_transaction, |host| {
            Ok(self.apply(host, resolutions))
        })
    }

    fn place<M>(
        &self,
        host: &mut M,
        crossing: &CrossingRecord,
    ) -> std::result::Result<(PlacedMarker, Vec<PlacementError>), PlacementError>
    where
        M: ModelMutation + ?Sized,
    {
        let instance = host
            .create_instance(
                crossing.insertion_point,
                self.symbol,
                crossing.wall.element,
                crossing.wall.level,
                self.config.structural_kind,
            )
            .map_err(|reason| {
                let err = PlacementError::new(
                    crossing.conduit,
                    PlacementErrorKind::CreateInstance {
                        wall: crossing.wall.element,
                        reason,
                    },
                );
                tracing::warn!(error = %err, "Marker rejected");
                err
            })?;

        let mut failures = Vec::new();
        for parameter in [&self.config.width_parameter, &self.config.height_parameter] {
            if let Err(reason) = host.set_parameter(instance, parameter, crossing.diameter) {
                let err = PlacementError::new(
                    crossing.conduit,
                    PlacementErrorKind::SetParameter {
                        instance,
                        parameter: parameter.clone(),
                        reason,
                    },
                );
                tracing::warn!(error = %err, "Marker not sized");
                failures.push(err);
            }
        }

        let marker = PlacedMarker {
            instance,
            conduit: crossing.conduit,
            wall: crossing.wall,
            point: crossing.insertion_point,
            diameter: crossing.diameter,
        };
        Ok((marker, failures))
    }
}

/// Runs `body` inside a named transaction, rolling back if it fails or the
/// commit is refused.
pub fn with_transaction<M, T, F>(host: &mut M, name: &str, body: F) -> Result<T>
where
    M: ModelMutation + ?Sized,
    F: FnOnce(&mut M) -> Result<T>,
{
    host.begin_transaction(name)
        .map_err(|reason| Error::Transaction {
            name: name.to_string(),
            reason,
        })?;

    let value = match body(host) {
        Ok(value) => value,
        Err(err) => {
            if let Err(reason) = host.rollback_transaction() {
                tracing::warn!(transaction = name, %reason, "Rollback failed");
            }
            return Err(err);
        }
    };

    if let Err(reason) = host.commit_transaction() {
        if let Err(rollback) = host.rollback_transaction() {
            tracing::warn!(transaction = name, reason = %rollback, "Rollback failed");
        }
        return Err(Error::Transaction {
            name: name.to_string(),
            reason,
        });
    }

    Ok(value)
}
