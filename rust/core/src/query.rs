// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Ray intersection queries against a prebuilt spatial index.

use nalgebra::{Point3, Vector3};

use crate::hit::RayHit;

/// Casts rays against a read-only spatial index of target elements.
///
/// Implementations report every intersection along the infinite forward ray
/// from `origin`, with `proximity >= 0`. They do not clip to any segment
/// length; callers do that. `direction` must be non-zero and expressed in the
/// same coordinate space as the indexed elements.
pub trait IntersectionQuery {
    fn find(&self, origin: &Point3<f64>, direction: &Vector3<f64>) -> Vec<RayHit>;
}

impl<T: IntersectionQuery + ?Sized> IntersectionQuery for &T {
    fn find(&self, origin: &Point3<f64>, direction: &Vector3<f64>) -> Vec<RayHit> {
        (**self).find(origin, direction)
    }
}

impl<T: IntersectionQuery + ?Sized> IntersectionQuery for Box<T> {
    fn find(&self, origin: &Point3<f64>, direction: &Vector3<f64>) -> Vec<RayHit> {
        (**self).find(origin, direction)
    }
}

/// Query backed by a fixed list of hits, returned for every ray.
///
/// Useful when the hits for a conduit are already known, e.g. when replaying
/// a recorded index response.
#[derive(Debug, Clone, Default)]
pub struct FixedHits(pub Vec<RayHit>);

impl IntersectionQuery for FixedHits {
    fn find(&self, _origin: &Point3<f64>, _direction: &Vector3<f64>) -> Vec<RayHit> {
        self.0.clone()
    }
}
