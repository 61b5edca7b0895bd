// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Ducts and pipes reduced to straight centerline segments.
//!
//! Ducts and pipes are handled identically once their centerline and
//! diameter are known, so both collapse into a single [`ConduitSegment`]
//! tagged with its [`ConduitKind`].

use nalgebra::{Point3, Vector3};

use crate::error::{Error, PlacementErrorKind, Result};
use crate::ids::ElementId;

/// Below this length a centerline has no usable direction.
const MIN_DIRECTION_NORM: f64 = 1e-12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConduitKind {
    Duct,
    Pipe,
}

impl ConduitKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConduitKind::Duct => "Duct",
            ConduitKind::Pipe => "Pipe",
        }
    }
}

/// Straight conduit run: origin, unit direction, length and diameter.
///
/// Constructors enforce `diameter > 0`, `length >= 0` and a unit direction.
/// Fields are read-only so a segment cannot drift out of those bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct ConduitSegment {
    id: ElementId,
    kind: ConduitKind,
    origin: Point3<f64>,
    direction: Vector3<f64>,
    length: f64,
    diameter: f64,
}

impl ConduitSegment {
    /// Builds a segment from an origin, a (not necessarily unit) direction
    /// and a length. The direction is normalised.
    pub fn new(
        id: ElementId,
        kind: ConduitKind,
        origin: Point3<f64>,
        direction: Vector3<f64>,
        length: f64,
        diameter: f64,
    ) -> Result<Self> {
        if !(diameter > 0.0) || !diameter.is_finite() {
            return Err(Error::InvalidGeometry(format!(
                "{} {id}: diameter must be positive, got {diameter}",
                kind.as_str()
            )));
        }
        if !(length >= 0.0) || !length.is_finite() {
            return Err(Error::InvalidGeometry(format!(
                "{} {id}: length must be non-negative, got {length}",
                kind.as_str()
            )));
        }
        let norm = direction.norm();
        if !(norm > MIN_DIRECTION_NORM) || !norm.is_finite() {
            return Err(Error::InvalidGeometry(format!(
                "{} {id}: direction must be non-zero",
                kind.as_str()
            )));
        }

        Ok(Self {
            id,
            kind,
            origin,
            direction: direction / norm,
            length,
            diameter,
        })
    }

    /// Builds a segment running from `start` to `end`.
    pub fn from_endpoints(
        id: ElementId,
        kind: ConduitKind,
        start: Point3<f64>,
        end: Point3<f64>,
        diameter: f64,
    ) -> Result<Self> {
        let delta = end - start;
        let length = delta.norm();
        if length <= MIN_DIRECTION_NORM {
            return Err(Error::InvalidGeometry(format!(
                "{} {id}: centerline has zero length",
                kind.as_str()
            )));
        }
        Self::new(id, kind, start, delta, length, diameter)
    }

    pub fn id(&self) -> ElementId {
        self.id
    }

    pub fn kind(&self) -> ConduitKind {
        self.kind
    }

    pub fn origin(&self) -> &Point3<f64> {
        &self.origin
    }

    /// Unit direction from the first endpoint towards the second.
    pub fn direction(&self) -> &Vector3<f64> {
        &self.direction
    }

    pub fn length(&self) -> f64 {
        self.length
    }

    pub fn diameter(&self) -> f64 {
        self.diameter
    }

    /// Point at `distance` along the centerline from the origin.
    pub fn point_at(&self, distance: f64) -> Point3<f64> {
        self.origin + self.direction * distance
    }
}

/// Centerline geometry as authored in the conduit document.
#[derive(Debug, Clone, PartialEq)]
pub enum ConduitCurve {
    Line { start: Point3<f64>, end: Point3<f64> },
    /// Arcs, splines and anything else that is not a straight line.
    Unsupported { description: String },
}

/// A duct or pipe as reported by the conduit source.
#[derive(Debug, Clone, PartialEq)]
pub struct ConduitElement {
    pub id: ElementId,
    pub kind: ConduitKind,
    pub curve: ConduitCurve,
    pub diameter: f64,
}

impl ConduitElement {
    /// Extracts the straight segment this conduit runs along.
    pub fn segment(&self) -> std::result::Result<ConduitSegment, PlacementErrorKind> {
        match &self.curve {
            ConduitCurve::Line { start, end } => {
                ConduitSegment::from_endpoints(self.id, self.kind, *start, *end, self.diameter)
                    .map_err(|e| PlacementErrorKind::InvalidConduit(e.to_string()))
            }
            ConduitCurve::Unsupported { description } => {
                Err(PlacementErrorKind::UnsupportedCurve(description.clone()))
            }
        }
    }
}
