// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Serialized element records.

use std::collections::BTreeMap;

use hole_placer_core::{Category, ElementId, SymbolId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelRecord {
    pub id: ElementId,
    pub name: String,
    #[serde(default)]
    pub elevation: f64,
}

/// Straight wall: plan baseline, thickness centred on it, height above the
/// level elevation plus `base_offset`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WallRecord {
    pub id: ElementId,
    #[serde(default)]
    pub level: Option<ElementId>,
    pub start: [f64; 2],
    pub end: [f64; 2],
    #[serde(default)]
    pub base_offset: f64,
    pub thickness: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CurveShape {
    #[default]
    Line,
    Arc,
    Spline,
}

/// Duct or pipe run between two centerline endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConduitRecord {
    pub id: ElementId,
    pub start: [f64; 3],
    pub end: [f64; 3],
    pub diameter: f64,
    #[serde(default)]
    pub shape: CurveShape,
}

/// A loadable family type and the instance parameters it declares.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FamilySymbolRecord {
    pub id: SymbolId,
    pub family: String,
    #[serde(default = "generic_model")]
    pub category: Category,
    #[serde(default)]
    pub parameters: Vec<String>,
    #[serde(default)]
    pub active: bool,
}

fn generic_model() -> Category {
    Category::GenericModel
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewKind {
    ThreeD,
    FloorPlan,
    Section,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewRecord {
    pub id: ElementId,
    pub name: String,
    pub kind: ViewKind,
    #[serde(default)]
    pub is_template: bool,
    /// Elements hidden in this view; the intersection index skips them.
    #[serde(default)]
    pub hidden: Vec<ElementId>,
}

/// A placed family instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstanceRecord {
    pub id: ElementId,
    pub symbol: SymbolId,
    pub host: ElementId,
    pub level: ElementId,
    pub point: [f64; 3],
    #[serde(default)]
    pub parameters: BTreeMap<String, f64>,
}
