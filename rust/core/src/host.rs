// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Services the host authoring environment provides.
//!
//! Hole placement never reaches for an ambient "active document". Every
//! service it needs is one of these traits, passed in explicitly:
//!
//! - [`ModelQuery`]: element, level, family symbol and view lookup
//! - [`ConduitSource`]: ducts and pipes of the companion document
//! - [`IntersectorFactory`]: builds the wall ray-casting index for a view
//! - [`SymbolActivation`]: makes the marker symbol placeable
//! - [`ModelMutation`]: transactions, instance creation, parameter writes

use nalgebra::Point3;

use crate::conduit::ConduitElement;
use crate::ids::{ElementId, InstanceId, SymbolId, ViewId};
use crate::model::{Category, ElementInfo, Level, StructuralKind, TargetFilter};
use crate::query::IntersectionQuery;

/// Read-only lookups against the document markers are placed in.
pub trait ModelQuery {
    fn element(&self, id: ElementId) -> Option<ElementInfo>;

    fn level(&self, id: ElementId) -> Option<Level>;

    /// First loaded symbol of `family_name` in `category`.
    fn find_family_symbol(&self, family_name: &str, category: Category) -> Option<SymbolId>;

    /// First 3D view that is not a template.
    fn first_3d_view(&self) -> Option<ViewId>;
}

/// Source of conduit elements. Ducts come before pipes.
pub trait ConduitSource {
    fn conduits(&self) -> Vec<ConduitElement>;
}

/// Builds an intersection index over the elements matching `filter` that are
/// visible in `view`.
pub trait IntersectorFactory {
    type Query: IntersectionQuery + Send + Sync;

    fn intersector(&self, filter: TargetFilter, view: ViewId) -> Result<Self::Query, String>;
}

pub trait SymbolActivation {
    fn is_symbol_active(&self, symbol: SymbolId) -> bool;

    fn activate_symbol(&mut self, symbol: SymbolId) -> Result<(), String>;
}

/// Write access to the host document.
///
/// Mutations are only valid between [`begin_transaction`] and
/// [`commit_transaction`] (or [`rollback_transaction`]).
///
/// [`begin_transaction`]: ModelMutation::begin_transaction
/// [`commit_transaction`]: ModelMutation::commit_transaction
/// [`rollback_transaction`]: ModelMutation::rollback_transaction
pub trait ModelMutation {
    fn begin_transaction(&mut self, name: &str) -> Result<(), String>;

    fn commit_transaction(&mut self) -> Result<(), String>;

    fn rollback_transaction(&mut self) -> Result<(), String>;

    fn create_instance(
        &mut self,
        point: Point3<f64>,
        symbol: SymbolId,
        host: ElementId,
        level: ElementId,
        structural: StructuralKind,
    ) -> Result<InstanceId, String>;

    fn set_parameter(&mut self, instance: InstanceId, name: &str, value: f64)
        -> Result<(), String>;
}
