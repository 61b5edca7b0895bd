// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Straight walls as planar box solids.
//!
//! A wall is defined the way authoring tools draw it: a horizontal baseline,
//! a base elevation, a height, and a thickness centred on the baseline.

use nalgebra::{Point2, Point3, Vector2, Vector3};

use crate::error::{Error, Result};
use crate::ray::{Aabb, Triangle};

/// Planar box solid of a straight wall.
#[derive(Debug, Clone, PartialEq)]
pub struct WallSolid {
    start: Point2<f64>,
    end: Point2<f64>,
    base_elevation: f64,
    thickness: f64,
    height: f64,
}

impl WallSolid {
    pub fn new(
        start: Point2<f64>,
        end: Point2<f64>,
        base_elevation: f64,
        thickness: f64,
        height: f64,
    ) -> Result<Self> {
        if (end - start).norm() <= f64::EPSILON {
            return Err(Error::DegenerateBaseline);
        }
        if !(thickness > 0.0) || !thickness.is_finite() {
            return Err(Error::InvalidThickness(thickness));
        }
        if !(height > 0.0) || !height.is_finite() {
            return Err(Error::InvalidHeight(height));
        }
        Ok(Self {
            start,
            end,
            base_elevation,
            thickness,
            height,
        })
    }

    pub fn length(&self) -> f64 {
        (self.end - self.start).norm()
    }

    pub fn thickness(&self) -> f64 {
        self.thickness
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn base_elevation(&self) -> f64 {
        self.base_elevation
    }

    /// Unit vector along the baseline and its left-hand normal, both in plan.
    fn axes(&self) -> (Vector2<f64>, Vector2<f64>) {
        let along = (self.end - self.start).normalize();
        let across = Vector2::new(-along.y, along.x);
        (along, across)
    }

    /// The eight box corners: bottom ring first (start-left, end-left,
    /// end-right, start-right), then the same ring at the top.
    pub fn corners(&self) -> [Point3<f64>; 8] {
        let (_, across) = self.axes();
        let half = across * (self.thickness / 2.0);
        let z0 = self.base_elevation;
        let z1 = self.base_elevation + self.height;

        let ring = [
            self.start + half,
            self.end + half,
            self.end - half,
            self.start - half,
        ];

        let mut corners = [Point3::origin(); 8];
        for (i, p) in ring.iter().enumerate() {
            corners[i] = Point3::new(p.x, p.y, z0);
            corners[i + 4] = Point3::new(p.x, p.y, z1);
        }
        corners
    }

    /// The twelve triangles (two per face) bounding the solid.
    pub fn triangles(&self) -> [Triangle; 12] {
        let c = self.corners();
        let quad = |a: usize, b: usize, cc: usize, d: usize| {
            [
                Triangle::new(c[a], c[b], c[cc]),
                Triangle::new(c[a], c[cc], c[d]),
            ]
        };

        let faces = [
            quad(0, 1, 5, 4), // left side face
            quad(2, 3, 7, 6), // right side face
            quad(3, 0, 4, 7), // start end cap
            quad(1, 2, 6, 5), // end end cap
            quad(0, 3, 2, 1), // bottom
            quad(4, 5, 6, 7), // top
        ];

        let mut triangles = [faces[0][0]; 12];
        for (i, face) in faces.iter().enumerate() {
            triangles[2 * i] = face[0];
            triangles[2 * i + 1] = face[1];
        }
        triangles
    }

    pub fn aabb(&self) -> Aabb {
        let corners = self.corners();
        // The corner array is never empty.
        Aabb::from_points(&corners).unwrap_or(Aabb {
            min: corners[0],
            max: corners[0],
        })
    }

    /// Whether `point` lies inside the solid, allowing `tolerance` slack on
    /// every face.
    pub fn contains(&self, point: &Point3<f64>, tolerance: f64) -> bool {
        let (along, across) = self.axes();
        let rel = Vector2::new(point.x - self.start.x, point.y - self.start.y);

        let u = rel.dot(&along);
        let v = rel.dot(&across);
        let w = point.z - self.base_elevation;
        let half = self.thickness / 2.0;

        (-tolerance..=self.length() + tolerance).contains(&u)
            && (-half - tolerance..=half + tolerance).contains(&v)
            && (-tolerance..=self.height + tolerance).contains(&w)
    }

    /// Unit normal of the wall's side faces in 3D.
    pub fn normal(&self) -> Vector3<f64> {
        let (_, across) = self.axes();
        Vector3::new(across.x, across.y, 0.0)
    }
}
