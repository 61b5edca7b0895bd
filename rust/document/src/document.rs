// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! In-memory building document.
//!
//! Holds levels, walls, conduits, family symbols, views and placed
//! instances, and implements every host service the placement command
//! needs. Mutations go through transactions: one may be open at a time and
//! rolling it back restores instances and symbol activation.

use hole_placer_core::{
    Category, ConduitCurve, ConduitElement, ConduitKind, ConduitSource, ElementId, ElementInfo,
    InstanceId, IntersectorFactory, Level, ModelMutation, ModelQuery, StructuralKind,
    SymbolActivation, SymbolId, TargetFilter, ViewId,
};
use hole_placer_geometry::{Point2, WallIntersector, WallSolid};
use nalgebra::Point3;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::schema::{
    ConduitRecord, CurveShape, FamilySymbolRecord, InstanceRecord, LevelRecord, ViewKind,
    ViewRecord, WallRecord,
};

/// How far a marker insertion point may lie outside its host wall.
pub const HOST_TOLERANCE: f64 = 1e-6;

#[derive(Debug, Clone)]
struct Snapshot {
    name: String,
    instances: Vec<InstanceRecord>,
    active: Vec<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Document {
    pub title: String,
    #[serde(default)]
    pub levels: Vec<LevelRecord>,
    #[serde(default)]
    pub walls: Vec<WallRecord>,
    #[serde(default)]
    pub ducts: Vec<ConduitRecord>,
    #[serde(default)]
    pub pipes: Vec<ConduitRecord>,
    #[serde(default)]
    pub families: Vec<FamilySymbolRecord>,
    #[serde(default)]
    pub views: Vec<ViewRecord>,
    #[serde(default)]
    pub instances: Vec<InstanceRecord>,
    #[serde(skip)]
    transaction: Option<Snapshot>,
}

impl Document {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    /// Checks that no element id is used twice.
    pub fn validate(&self) -> Result<()> {
        let mut seen = FxHashSet::default();
        for id in self.all_ids() {
            if !seen.insert(id) {
                return Err(Error::DuplicateId {
                    title: self.title.clone(),
                    id,
                });
            }
        }
        Ok(())
    }

    fn all_ids(&self) -> impl Iterator<Item = ElementId> + '_ {
        self.levels
            .iter()
            .map(|l| l.id)
            .chain(self.walls.iter().map(|w| w.id))
            .chain(self.ducts.iter().map(|d| d.id))
            .chain(self.pipes.iter().map(|p| p.id))
            .chain(self.families.iter().map(|f| f.id.element()))
            .chain(self.views.iter().map(|v| v.id))
            .chain(self.instances.iter().map(|i| i.id))
    }

    fn next_id(&self) -> ElementId {
        ElementId(self.all_ids().map(|id| id.value()).max().unwrap_or(0) + 1)
    }

    pub fn in_transaction(&self) -> bool {
        self.transaction.is_some()
    }

    /// Name of the open transaction, if any.
    pub fn transaction_name(&self) -> Option<&str> {
        self.transaction.as_ref().map(|t| t.name.as_str())
    }

    pub fn wall(&self, id: ElementId) -> Option<&WallRecord> {
        self.walls.iter().find(|w| w.id == id)
    }

    pub fn instance(&self, id: InstanceId) -> Option<&InstanceRecord> {
        self.instances.iter().find(|i| i.id == id.element())
    }

    fn family(&self, id: SymbolId) -> Option<&FamilySymbolRecord> {
        self.families.iter().find(|f| f.id == id)
    }

    fn level_record(&self, id: ElementId) -> Option<&LevelRecord> {
        self.levels.iter().find(|l| l.id == id)
    }

    /// Box solid of a wall, standing on its level's elevation.
    pub fn wall_solid(&self, wall: &WallRecord) -> hole_placer_geometry::Result<WallSolid> {
        let level_elevation = wall
            .level
            .and_then(|id| self.level_record(id))
            .map(|l| l.elevation)
            .unwrap_or(0.0);

        WallSolid::new(
            Point2::new(wall.start[0], wall.start[1]),
            Point2::new(wall.end[0], wall.end[1]),
            level_elevation + wall.base_offset,
            wall.thickness,
            wall.height,
        )
    }

    fn require_transaction(&self) -> std::result::Result<(), String> {
        if self.transaction.is_none() {
            return Err("modification outside of a transaction".into());
        }
        Ok(())
    }
}

fn conduit_element(record: &ConduitRecord, kind: ConduitKind) -> ConduitElement {
    let curve = match record.shape {
        CurveShape::Line => ConduitCurve::Line {
            start: Point3::from(record.start),
            end: Point3::from(record.end),
        },
        CurveShape::Arc => ConduitCurve::Unsupported {
            description: "arc".into(),
        },
        CurveShape::Spline => ConduitCurve::Unsupported {
            description: "spline".into(),
        },
    };

    ConduitElement {
        id: record.id,
        kind,
        curve,
        diameter: record.diameter,
    }
}

impl ConduitSource for Document {
    fn conduits(&self) -> Vec<ConduitElement> {
        self.ducts
            .iter()
            .map(|d| conduit_element(d, ConduitKind::Duct))
            .chain(self.pipes.iter().map(|p| conduit_element(p, ConduitKind::Pipe)))
            .collect()
    }
}

impl ModelQuery for Document {
    fn element(&self, id: ElementId) -> Option<ElementInfo> {
        let info = |category, level| ElementInfo {
            id,
            category,
            level,
        };

        if let Some(wall) = self.wall(id) {
            return Some(info(Category::Wall, wall.level));
        }
        if self.level_record(id).is_some() {
            return Some(info(Category::Level, None));
        }
        if self.ducts.iter().any(|d| d.id == id) {
            return Some(info(Category::Duct, None));
        }
        if self.pipes.iter().any(|p| p.id == id) {
            return Some(info(Category::Pipe, None));
        }
        if let Some(family) = self.families.iter().find(|f| f.id.element() == id) {
            return Some(info(family.category, None));
        }
        if self.views.iter().any(|v| v.id == id) {
            return Some(info(Category::View, None));
        }
        self.instances
            .iter()
            .find(|i| i.id == id)
            .map(|i| info(Category::GenericModel, Some(i.level)))
    }

    fn level(&self, id: ElementId) -> Option<Level> {
        self.level_record(id).map(|l| Level {
            id: l.id,
            name: l.name.clone(),
            elevation: l.elevation,
        })
    }

    fn find_family_symbol(&self, family_name: &str, category: Category) -> Option<SymbolId> {
        self.families
            .iter()
            .find(|f| f.family == family_name && f.category == category)
            .map(|f| f.id)
    }

    fn first_3d_view(&self) -> Option<ViewId> {
        self.views
            .iter()
            .find(|v| v.kind == ViewKind::ThreeD && !v.is_template)
            .map(|v| ViewId(v.id))
    }
}

impl IntersectorFactory for Document {
    type Query = WallIntersector;

    fn intersector(
        &self,
        filter: TargetFilter,
        view: ViewId,
    ) -> std::result::Result<WallIntersector, String> {
        let view = self
            .views
            .iter()
            .find(|v| v.id == view.element())
            .ok_or_else(|| format!("view {view} not found"))?;
        if view.kind != ViewKind::ThreeD {
            return Err(format!("view {:?} is not a 3D view", view.name));
        }
        if view.is_template {
            return Err(format!("view {:?} is a template", view.name));
        }

        let mut index = WallIntersector::new();
        if !filter.matches(Category::Wall) {
            return Ok(index);
        }

        let hidden: FxHashSet<ElementId> = view.hidden.iter().copied().collect();
        for wall in self.walls.iter().filter(|w| !hidden.contains(&w.id)) {
            match self.wall_solid(wall) {
                Ok(solid) => index.insert(wall.id, &solid),
                Err(err) => {
                    tracing::warn!(wall = %wall.id, error = %err, "Wall left out of intersection index")
                }
            }
        }

        tracing::debug!(view = %view.name, walls = index.len(), "Built wall intersection index");
        Ok(index)
    }
}

impl SymbolActivation for Document {
    fn is_symbol_active(&self, symbol: SymbolId) -> bool {
        self.family(symbol).map(|f| f.active).unwrap_or(false)
    }

    fn activate_symbol(&mut self, symbol: SymbolId) -> std::result::Result<(), String> {
        self.require_transaction()?;
        let family = self
            .families
            .iter_mut()
            .find(|f| f.id == symbol)
            .ok_or_else(|| format!("symbol {symbol} not found"))?;
        family.active = true;
        Ok(())
    }
}

impl ModelMutation for Document {
    fn begin_transaction(&mut self, name: &str) -> std::result::Result<(), String> {
        if let Some(open) = &self.transaction {
            return Err(format!("transaction {:?} is already open", open.name));
        }
        self.transaction = Some(Snapshot {
            name: name.to_string(),
            instances: self.instances.clone(),
            active: self.families.iter().map(|f| f.active).collect(),
        });
        Ok(())
    }

    fn commit_transaction(&mut self) -> std::result::Result<(), String> {
        self.transaction
            .take()
            .map(|_| ())
            .ok_or_else(|| "no open transaction to commit".to_string())
    }

    fn rollback_transaction(&mut self) -> std::result::Result<(), String> {
        let snapshot = self
            .transaction
            .take()
            .ok_or_else(|| "no open transaction to roll back".to_string())?;
        self.instances = snapshot.instances;
        for (family, active) in self.families.iter_mut().zip(snapshot.active) {
            family.active = active;
        }
        Ok(())
    }

    fn create_instance(
        &mut self,
        point: Point3<f64>,
        symbol: SymbolId,
        host: ElementId,
        level: ElementId,
        structural: StructuralKind,
    ) -> std::result::Result<InstanceId, String> {
        self.require_transaction()?;

        let family = self
            .family(symbol)
            .ok_or_else(|| format!("symbol {symbol} not found"))?;
        if !family.active {
            return Err(format!("symbol {symbol} is not active"));
        }
        if structural != StructuralKind::NonStructural {
            return Err(format!("{structural:?} instances of {:?} are not supported", family.family));
        }
        if self.level_record(level).is_none() {
            return Err(format!("level {level} not found"));
        }
        let wall = self
            .wall(host)
            .ok_or_else(|| format!("host {host} is not a wall"))?;
        let solid = self
            .wall_solid(wall)
            .map_err(|e| format!("host {host} has invalid geometry: {e}"))?;
        if !solid.contains(&point, HOST_TOLERANCE) {
            return Err(format!(
                "geometry rejected: point ({:.4}, {:.4}, {:.4}) is outside wall {host}",
                point.x, point.y, point.z
            ));
        }

        let id = self.next_id();
        self.instances.push(InstanceRecord {
            id,
            symbol,
            host,
            level,
            point: [point.x, point.y, point.z],
            parameters: Default::default(),
        });
        Ok(InstanceId(id))
    }

    fn set_parameter(
        &mut self,
        instance: InstanceId,
        name: &str,
        value: f64,
    ) -> std::result::Result<(), String> {
        self.require_transaction()?;

        if !value.is_finite() || value <= 0.0 {
            return Err(format!("value {value} is not a positive length"));
        }

        let symbol = self
            .instance(instance)
            .map(|i| i.symbol)
            .ok_or_else(|| format!("instance {instance} not found"))?;
        let declared = self
            .family(symbol)
            .map(|f| f.parameters.iter().any(|p| p == name))
            .unwrap_or(false);
        if !declared {
            return Err(format!("parameter {name:?} not found"));
        }

        if let Some(record) = self.instances.iter_mut().find(|i| i.id == instance.element()) {
            record.parameters.insert(name.to_string(), value);
        }
        Ok(())
    }
}
