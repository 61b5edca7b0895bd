// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Hole Placer Document
//!
//! JSON building model that implements the host services of
//! `hole-placer-core`: element queries, conduit listing, a wall
//! intersection index per 3D view, symbol activation and transactional
//! instance placement.
//!
//! A [`Project`] file holds one host document and the documents linked
//! into it; [`Project::split_for_run`] hands the host and a named companion
//! to [`hole_placer_core::PlacementCommand::run`].

pub mod document;
pub mod error;
pub mod project;
pub mod schema;

pub use document::{Document, HOST_TOLERANCE};
pub use error::{Error, Result};
pub use project::Project;
pub use schema::{
    ConduitRecord, CurveShape, FamilySymbolRecord, InstanceRecord, LevelRecord, ViewKind,
    ViewRecord, WallRecord,
};
