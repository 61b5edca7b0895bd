// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Ray casting against a set of wall solids.
//!
//! Every triangle a ray pierces produces one hit, so a ray crossing a wall
//! reports it at least twice (entry and exit face, more when it runs through
//! a shared triangle edge). Collapsing those is left to the caller's
//! deduplication.

use hole_placer_core::{ElementId, IntersectionQuery, RayHit};
use nalgebra::{Point3, Vector3};

use crate::ray::{Aabb, Triangle};
use crate::wall::WallSolid;

/// Slack added around each wall's bounding box before the slab test.
const AABB_MARGIN: f64 = 1e-9;

#[derive(Debug, Clone)]
struct IndexedWall {
    target: ElementId,
    linked: Option<ElementId>,
    aabb: Aabb,
    triangles: [Triangle; 12],
}

/// Read-only ray casting index over wall solids.
#[derive(Debug, Clone, Default)]
pub struct WallIntersector {
    walls: Vec<IndexedWall>,
}

impl WallIntersector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Indexes a wall of the host document.
    pub fn insert(&mut self, target: ElementId, solid: &WallSolid) {
        self.push(target, None, solid);
    }

    /// Indexes a wall living in a linked document. `link` is the link
    /// instance in the host document, `wall` the wall's id inside the link.
    pub fn insert_linked(&mut self, link: ElementId, wall: ElementId, solid: &WallSolid) {
        self.push(link, Some(wall), solid);
    }

    fn push(&mut self, target: ElementId, linked: Option<ElementId>, solid: &WallSolid) {
        self.walls.push(IndexedWall {
            target,
            linked,
            aabb: solid.aabb().expanded(AABB_MARGIN),
            triangles: solid.triangles(),
        });
    }

    pub fn len(&self) -> usize {
        self.walls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.walls.is_empty()
    }
}

impl FromIterator<(ElementId, WallSolid)> for WallIntersector {
    fn from_iter<I: IntoIterator<Item = (ElementId, WallSolid)>>(iter: I) -> Self {
        let mut index = WallIntersector::new();
        for (id, solid) in iter {
            index.insert(id, &solid);
        }
        index
    }
}

impl IntersectionQuery for WallIntersector {
    /// All wall hits along the forward ray, nearest first. Hits at equal
    /// distance keep the order in which their walls were indexed.
    fn find(&self, origin: &Point3<f64>, direction: &Vector3<f64>) -> Vec<RayHit> {
        let norm = direction.norm();
        if !norm.is_finite() || norm <= 0.0 {
            tracing::trace!(?direction, "Ignoring ray without direction");
            return Vec::new();
        }
        let dir = direction / norm;

        let mut hits = Vec::new();
        for wall in &self.walls {
            if !wall.aabb.hit_by_ray(origin, &dir) {
                continue;
            }
            for tri in &wall.triangles {
                if let Some(t) = tri.intersect(origin, &dir) {
                    hits.push(RayHit {
                        target: wall.target,
                        linked: wall.linked,
                        proximity: t,
                    });
                }
            }
        }

        hits.sort_by(|a, b| a.proximity.total_cmp(&b.proximity));
        hits
    }
}
