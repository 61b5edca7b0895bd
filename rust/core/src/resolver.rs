// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Per-conduit crossing resolution.
//!
//! For one conduit segment:
//!
//! 1. cast a ray from the segment origin along its direction,
//! 2. drop hits beyond the segment end (`proximity <= length` is kept),
//! 3. collapse repeated hits on the same element ([`dedupe`]),
//! 4. resolve each hit to a wall and its level, and compute where the
//!    marker goes.
//!
//! Nothing here carries state between conduits, so resolutions of different
//! conduits can run in any order or in parallel.

use nalgebra::Point3;

use crate::conduit::ConduitSegment;
use crate::dedup::dedupe;
use crate::error::ResolutionError;
use crate::hit::RayHit;
use crate::host::ModelQuery;
use crate::ids::ElementId;
use crate::model::{Category, WallTarget};
use crate::query::IntersectionQuery;

/// A resolved conduit/wall crossing, ready for marker placement.
#[derive(Debug, Clone, PartialEq)]
pub struct CrossingRecord {
    pub conduit: ElementId,
    /// `origin + direction * proximity` of the source segment.
    pub insertion_point: Point3<f64>,
    pub proximity: f64,
    pub wall: WallTarget,
    /// Marker width and height.
    pub diameter: f64,
}

/// Outcome of resolving one conduit.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub conduit: ElementId,
    pub crossings: Vec<CrossingRecord>,
    pub failures: Vec<ResolutionError>,
}

impl Resolution {
    pub fn new(conduit: ElementId) -> Self {
        Self {
            conduit,
            crossings: Vec::new(),
            failures: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.crossings.is_empty() && self.failures.is_empty()
    }
}

/// Steps 1-3: relevant, deduplicated hits along the segment.
pub fn find_crossings<Q>(segment: &ConduitSegment, query: &Q) -> Vec<RayHit>
where
    Q: IntersectionQuery + ?Sized,
{
    let length = segment.length();
    let hits = query.find(segment.origin(), segment.direction());
    dedupe(hits.into_iter().filter(|hit| hit.proximity <= length))
}

/// Resolves a hit target to a wall and the level it stands on.
pub fn resolve_wall<M>(model: &M, target: ElementId) -> Result<WallTarget, ResolutionError>
where
    M: ModelQuery + ?Sized,
{
    let element = model
        .element(target)
        .ok_or(ResolutionError::ElementNotFound(target))?;

    if element.category != Category::Wall {
        return Err(ResolutionError::NotAWall {
            id: target,
            category: element.category,
        });
    }

    let level_id = element
        .level
        .ok_or(ResolutionError::WallWithoutLevel(target))?;
    let level = model.level(level_id).ok_or(ResolutionError::LevelNotFound {
        wall: target,
        level: level_id,
    })?;

    Ok(WallTarget {
        element: target,
        level: level.id,
    })
}

/// Resolves every wall crossing of `segment`.
///
/// A hit that does not resolve to a wall on a level is reported in
/// [`Resolution::failures`] and skipped; the remaining hits are still
/// resolved.
pub fn resolve<Q, M>(segment: &ConduitSegment, query: &Q, model: &M) -> Resolution
where
    Q: IntersectionQuery + ?Sized,
    M: ModelQuery + ?Sized,
{
    let mut resolution = Resolution::new(segment.id());

    for hit in find_crossings(segment, query) {
        match resolve_wall(model, hit.target) {
            Ok(wall) => resolution.crossings.push(CrossingRecord {
                conduit: segment.id(),
                insertion_point: segment.point_at(hit.proximity),
                proximity: hit.proximity,
                wall,
                diameter: segment.diameter(),
            }),
            Err(err) => {
                tracing::warn!(conduit = %segment.id(), target = %hit.target, error = %err, "Skipping unresolved crossing");
                resolution.failures.push(err);
            }
        }
    }

    tracing::debug!(
        conduit = %segment.id(),
        kind = segment.kind().as_str(),
        crossings = resolution.crossings.len(),
        failures = resolution.failures.len(),
        "Resolved conduit"
    );

    resolution
}
