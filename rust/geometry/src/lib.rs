// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Hole Placer Geometry
//!
//! Wall solids and the ray casting index used to find where conduit
//! centerlines cross them, built on nalgebra.

pub mod error;
pub mod intersector;
pub mod ray;
pub mod wall;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point2, Point3, Vector3};

pub use error::{Error, Result};
pub use intersector::WallIntersector;
pub use ray::{Aabb, Triangle};
pub use wall::WallSolid;
