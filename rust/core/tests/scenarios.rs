// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! End-to-end crossing and placement scenarios against a scripted host.

use approx::assert_relative_eq;
use hole_placer_core::{
    find_crossings, resolve, Category, ConduitCurve, ConduitElement, ConduitKind, ConduitSegment,
    ConduitSource, ElementId, ElementInfo, Error, FixedHits, InstanceId, IntersectorFactory,
    Level, ModelMutation, ModelQuery, PlacementCommand, PlacementConfig, PlacementErrorKind,
    Point3, RayHit, ResolutionError, StructuralKind, SymbolActivation, SymbolId, TargetFilter,
    Vector3, ViewId,
};

const LEVEL: ElementId = ElementId(100);
const SYMBOL: SymbolId = SymbolId(ElementId(500));
const VIEW: ViewId = ViewId(ElementId(600));

/// Host whose walls are ids 1..=9 on a single level. The intersection index
/// replays `hits` for every ray.
struct ScriptedHost {
    hits: Vec<RayHit>,
    has_symbol: bool,
    has_view: bool,
    symbol_active: bool,
    mutations: usize,
    transactions: Vec<String>,
    created: Vec<(Point3<f64>, ElementId, ElementId)>,
}

impl ScriptedHost {
    fn new(hits: Vec<RayHit>) -> Self {
        Self {
            hits,
            has_symbol: true,
            has_view: true,
            symbol_active: false,
            mutations: 0,
            transactions: Vec::new(),
            created: Vec::new(),
        }
    }
}

impl ModelQuery for ScriptedHost {
    fn element(&self, id: ElementId) -> Option<ElementInfo> {
        (1..=9).contains(&id.0).then(|| ElementInfo {
            id,
            category: Category::Wall,
            level: Some(LEVEL),
        })
    }

    fn level(&self, id: ElementId) -> Option<Level> {
        (id == LEVEL).then(|| Level {
            id,
            name: "Ground".into(),
            elevation: 0.0,
        })
    }

    fn find_family_symbol(&self, family_name: &str, category: Category) -> Option<SymbolId> {
        (self.has_symbol && family_name == "Hole" && category == Category::GenericModel)
            .then_some(SYMBOL)
    }

    fn first_3d_view(&self) -> Option<ViewId> {
        self.has_view.then_some(VIEW)
    }
}

impl IntersectorFactory for ScriptedHost {
    type Query = FixedHits;

    fn intersector(&self, filter: TargetFilter, view: ViewId) -> Result<FixedHits, String> {
        assert_eq!(filter, TargetFilter::WALLS);
        assert_eq!(view, VIEW);
        Ok(FixedHits(self.hits.clone()))
    }
}

impl SymbolActivation for ScriptedHost {
    fn is_symbol_active(&self, _symbol: SymbolId) -> bool {
        self.symbol_active
    }

    fn activate_symbol(&mut self, _symbol: SymbolId) -> Result<(), String> {
        self.mutations += 1;
        self.symbol_active = true;
        Ok(())
    }
}

impl ModelMutation for ScriptedHost {
    fn begin_transaction(&mut self, name: &str) -> Result<(), String> {
        self.transactions.push(name.to_string());
        Ok(())
    }

    fn commit_transaction(&mut self) -> Result<(), String> {
        Ok(())
    }

    fn rollback_transaction(&mut self) -> Result<(), String> {
        Ok(())
    }

    fn create_instance(
        &mut self,
        point: Point3<f64>,
        symbol: SymbolId,
        host: ElementId,
        level: ElementId,
        _structural: StructuralKind,
    ) -> Result<InstanceId, String> {
        assert_eq!(symbol, SYMBOL);
        self.mutations += 1;
        self.created.push((point, host, level));
        Ok(InstanceId(ElementId(1000 + self.created.len() as i64)))
    }

    fn set_parameter(&mut self, _instance: InstanceId, _name: &str, _value: f64) -> Result<(), String> {
        self.mutations += 1;
        Ok(())
    }
}

struct Conduits(Vec<ConduitElement>);

impl ConduitSource for Conduits {
    fn conduits(&self) -> Vec<ConduitElement> {
        self.0.clone()
    }
}

fn duct_along_x(id: i64, length: f64) -> ConduitElement {
    ConduitElement {
        id: ElementId(id),
        kind: ConduitKind::Duct,
        curve: ConduitCurve::Line {
            start: Point3::origin(),
            end: Point3::new(length, 0.0, 0.0),
        },
        diameter: 0.3,
    }
}

fn segment_along_x(length: f64) -> ConduitSegment {
    duct_along_x(1, length).segment().unwrap()
}

#[test]
fn two_walls_yield_two_crossings() {
    let host = ScriptedHost::new(vec![]);
    let query = FixedHits(vec![
        RayHit::new(ElementId(1), 3.0),
        RayHit::new(ElementId(2), 7.0),
    ]);

    let res = resolve(&segment_along_x(10.0), &query, &host);

    assert!(res.failures.is_empty());
    assert_eq!(res.crossings.len(), 2);
    assert_eq!(res.crossings[0].insertion_point, Point3::new(3.0, 0.0, 0.0));
    assert_eq!(res.crossings[1].insertion_point, Point3::new(7.0, 0.0, 0.0));
    assert_eq!(res.crossings[0].wall.level, LEVEL);
    assert_relative_eq!(res.crossings[1].diameter, 0.3);
}

#[test]
fn both_faces_of_one_wall_give_one_crossing() {
    let host = ScriptedHost::new(vec![]);
    let query = FixedHits(vec![
        RayHit::new(ElementId(1), 3.01),
        RayHit::new(ElementId(1), 3.02),
    ]);

    let res = resolve(&segment_along_x(10.0), &query, &host);

    assert_eq!(res.crossings.len(), 1);
    assert_eq!(res.crossings[0].proximity, 3.01);
    assert_relative_eq!(res.crossings[0].insertion_point.x, 3.01);
}

#[test]
fn hit_beyond_conduit_end_is_dropped() {
    let host = ScriptedHost::new(vec![]);
    let query = FixedHits(vec![RayHit::new(ElementId(1), 12.0)]);

    let res = resolve(&segment_along_x(10.0), &query, &host);

    assert!(res.crossings.is_empty());
    assert!(res.failures.is_empty());
}

#[test]
fn length_boundary_is_inclusive() {
    let seg = segment_along_x(10.0);
    let eps = 1e-9;

    let at_end = FixedHits(vec![RayHit::new(ElementId(1), 10.0)]);
    let past_end = FixedHits(vec![RayHit::new(ElementId(1), 10.0 + eps)]);

    assert_eq!(find_crossings(&seg, &at_end).len(), 1);
    assert!(find_crossings(&seg, &past_end).is_empty());
}

#[test]
fn no_hits_is_not_an_error() {
    let host = ScriptedHost::new(vec![]);
    let res = resolve(&segment_along_x(10.0), &FixedHits::default(), &host);
    assert!(res.is_empty());
}

#[test]
fn unresolvable_target_is_recorded_and_run_continues() {
    let mut host = ScriptedHost::new(vec![
        RayHit::new(ElementId(77), 4.0),
        RayHit::new(ElementId(2), 6.0),
    ]);
    let conduits = Conduits(vec![duct_along_x(10, 10.0), duct_along_x(11, 5.0)]);

    let report = PlacementCommand::default().run(&mut host, &conduits).unwrap();

    // Conduit 10 crosses wall 2; conduit 11 ends before it. Both hit #77.
    assert_eq!(report.placed_count(), 1);
    assert_eq!(report.placed[0].conduit, ElementId(10));
    assert_eq!(report.failures.len(), 2);
    assert!(report.failures.iter().all(|f| f.kind
        == PlacementErrorKind::Resolution(ResolutionError::ElementNotFound(ElementId(77)))));
}

#[test]
fn missing_3d_view_aborts_before_any_mutation() {
    let mut host = ScriptedHost::new(vec![RayHit::new(ElementId(1), 3.0)]);
    host.has_view = false;
    let conduits = Conduits(vec![duct_along_x(10, 10.0)]);

    let err = PlacementCommand::default().run(&mut host, &conduits).unwrap_err();

    assert!(matches!(err, Error::No3dView));
    assert_eq!(err.to_string(), "no usable 3D view found");
    assert_eq!(host.mutations, 0);
    assert!(host.transactions.is_empty());
    assert!(host.created.is_empty());
}

#[test]
fn missing_family_aborts_before_any_mutation() {
    let mut host = ScriptedHost::new(vec![RayHit::new(ElementId(1), 3.0)]);
    host.has_symbol = false;

    let err = PlacementCommand::default()
        .run(&mut host, &Conduits(vec![duct_along_x(10, 10.0)]))
        .unwrap_err();

    assert!(matches!(err, Error::FamilySymbolNotFound(ref name) if name == "Hole"));
    assert_eq!(host.mutations, 0);
}

#[test]
fn resolve_is_idempotent() {
    let host = ScriptedHost::new(vec![]);
    let query = FixedHits(vec![
        RayHit::new(ElementId(3), 1.5),
        RayHit::new(ElementId(1), 2.5),
        RayHit::new(ElementId(3), 1.7),
        RayHit::new(ElementId(50), 4.0),
    ]);
    let seg = segment_along_x(10.0);

    assert_eq!(resolve(&seg, &query, &host), resolve(&seg, &query, &host));
}

#[test]
fn insertion_point_lies_on_the_centerline() {
    let host = ScriptedHost::new(vec![]);
    let seg = ConduitSegment::from_endpoints(
        ElementId(1),
        ConduitKind::Pipe,
        Point3::new(-2.0, 4.0, 1.5),
        Point3::new(7.0, -8.0, 9.5),
        0.1,
    )
    .unwrap();
    let query = FixedHits(
        (1..=9)
            .map(|i| RayHit::new(ElementId(i), i as f64 * 1.618))
            .collect(),
    );

    let res = resolve(&seg, &query, &host);
    assert_eq!(res.crossings.len(), 9);
    for crossing in &res.crossings {
        let expected: Point3<f64> = seg.origin() + seg.direction() * crossing.proximity;
        assert_relative_eq!(crossing.insertion_point, expected, epsilon = 1e-9);
        assert!(crossing.proximity <= seg.length());
    }
}

#[test]
fn symbol_is_activated_in_its_own_transaction() {
    let mut host = ScriptedHost::new(vec![RayHit::new(ElementId(1), 3.0)]);
    let config = PlacementConfig::default();

    let report = PlacementCommand::new(config.clone())
        .run(&mut host, &Conduits(vec![duct_along_x(10, 10.0)]))
        .unwrap();

    assert!(host.symbol_active);
    assert_eq!(
        host.transactions,
        vec![config.activation_transaction, config.placement_transaction]
    );
    assert_eq!(report.placed_count(), 1);
    assert_eq!(host.created[0], (Point3::new(3.0, 0.0, 0.0), ElementId(1), LEVEL));
}

#[test]
fn active_symbol_skips_activation_transaction() {
    let mut host = ScriptedHost::new(vec![]);
    host.symbol_active = true;

    PlacementCommand::default()
        .run(&mut host, &Conduits(vec![duct_along_x(10, 10.0)]))
        .unwrap();

    assert_eq!(host.transactions, vec!["Place holes".to_string()]);
}

#[test]
fn curved_and_degenerate_conduits_are_reported() {
    let mut host = ScriptedHost::new(vec![RayHit::new(ElementId(1), 1.0)]);
    let conduits = Conduits(vec![
        ConduitElement {
            id: ElementId(20),
            kind: ConduitKind::Pipe,
            curve: ConduitCurve::Unsupported {
                description: "arc".into(),
            },
            diameter: 0.1,
        },
        ConduitElement {
            diameter: 0.0,
            ..duct_along_x(21, 10.0)
        },
        duct_along_x(22, 10.0),
    ]);

    let report = PlacementCommand::default().run(&mut host, &conduits).unwrap();

    assert_eq!(report.placed_count(), 1);
    assert_eq!(report.failures.len(), 2);
    assert_eq!(report.failures[0].conduit, ElementId(20));
    assert!(matches!(report.failures[0].kind, PlacementErrorKind::UnsupportedCurve(_)));
    assert_eq!(report.failures[1].conduit, ElementId(21));
    assert!(matches!(report.failures[1].kind, PlacementErrorKind::InvalidConduit(_)));
}

#[test]
fn direction_vector_is_unit() {
    let seg = ConduitSegment::new(
        ElementId(1),
        ConduitKind::Duct,
        Point3::origin(),
        Vector3::new(0.0, 3.0, 4.0),
        5.0,
        0.2,
    )
    .unwrap();
    assert_relative_eq!(seg.direction().norm(), 1.0);
}
