// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Conduit segments cast against real wall solids.

use approx::assert_relative_eq;
use hole_placer_core::{find_crossings, ConduitKind, ConduitSegment, ElementId};
use hole_placer_geometry::{Point2, Point3, WallIntersector, WallSolid};

fn duct(start: Point3<f64>, end: Point3<f64>) -> ConduitSegment {
    ConduitSegment::from_endpoints(ElementId(1), ConduitKind::Duct, start, end, 0.4).unwrap()
}

/// Two parallel walls at x = 3 and x = 7 plus a 45° wall further out.
fn plan() -> WallIntersector {
    let mut index = WallIntersector::new();
    index.insert(
        ElementId(10),
        &WallSolid::new(Point2::new(3.0, -5.0), Point2::new(3.0, 5.0), 0.0, 0.25, 3.0).unwrap(),
    );
    index.insert(
        ElementId(11),
        &WallSolid::new(Point2::new(7.0, -5.0), Point2::new(7.0, 5.0), 0.0, 0.25, 3.0).unwrap(),
    );
    index.insert(
        ElementId(12),
        &WallSolid::new(Point2::new(10.0, -3.0), Point2::new(16.0, 3.0), 0.0, 0.3, 3.0).unwrap(),
    );
    index
}

#[test]
fn straight_run_crosses_each_wall_once() {
    let seg = duct(Point3::new(0.0, 0.5, 2.0), Point3::new(10.0, 0.5, 2.0));
    let hits = find_crossings(&seg, &plan());

    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].target, ElementId(10));
    assert_eq!(hits[1].target, ElementId(11));
    // First-seen hit is the near face.
    assert_relative_eq!(hits[0].proximity, 2.875, epsilon = 1e-9);
    assert_relative_eq!(hits[1].proximity, 6.875, epsilon = 1e-9);
}

#[test]
fn run_ending_inside_a_wall_still_crosses_it() {
    // Ends at x = 7, inside the second wall: near face at 6.875 is in range.
    let seg = duct(Point3::new(0.0, 0.5, 2.0), Point3::new(7.0, 0.5, 2.0));
    let hits = find_crossings(&seg, &plan());
    assert_eq!(hits.len(), 2);
}

#[test]
fn run_stopping_short_of_a_wall_ignores_it() {
    let seg = duct(Point3::new(0.0, 0.5, 2.0), Point3::new(6.0, 0.5, 2.0));
    let hits = find_crossings(&seg, &plan());
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].target, ElementId(10));
}

#[test]
fn run_above_walls_finds_nothing() {
    let seg = duct(Point3::new(0.0, 0.5, 3.5), Point3::new(20.0, 0.5, 3.5));
    assert!(find_crossings(&seg, &plan()).is_empty());
}

#[test]
fn oblique_wall_insertion_point_is_on_its_face() {
    let seg = duct(Point3::new(8.0, 0.0, 1.0), Point3::new(20.0, 0.0, 1.0));
    let hits = find_crossings(&seg, &plan());

    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].target, ElementId(12));

    // Wall baseline passes through (13, 0); the face is 0.15 off it along the
    // 45° normal, i.e. 0.15·√2 along x.
    let point = seg.point_at(hits[0].proximity);
    assert_relative_eq!(point.x, 13.0 - 0.15 * 2f64.sqrt(), epsilon = 1e-9);
    assert_relative_eq!(point.y, 0.0, epsilon = 1e-12);
}

#[test]
fn reversed_run_reports_walls_in_travel_order() {
    let seg = duct(Point3::new(9.0, 0.5, 2.0), Point3::new(0.0, 0.5, 2.0));
    let hits = find_crossings(&seg, &plan());

    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].target, ElementId(11));
    assert_eq!(hits[1].target, ElementId(10));
    assert_relative_eq!(hits[0].proximity, 9.0 - 7.125, epsilon = 1e-9);
}
