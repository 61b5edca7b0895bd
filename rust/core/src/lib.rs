// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Hole Placer Core
//!
//! Finds where straight duct and pipe runs cross walls and places a sized
//! hole marker at every crossing.
//!
//! ## Overview
//!
//! - **Intersection queries** ([`IntersectionQuery`]): a ray cast from a
//!   conduit's start point along its centerline reports every wall it hits,
//!   with the distance ("proximity") to each hit.
//! - **Deduplication** ([`dedupe`]): a wall is often hit once per face; hits
//!   are collapsed by `(element, linked element)` identity, first one wins.
//! - **Resolution** ([`resolve`]): hits beyond the conduit end are dropped,
//!   the rest become [`CrossingRecord`]s with an insertion point and size.
//! - **Placement** ([`MarkerPlacer`], [`PlacementCommand`]): markers are
//!   created and sized inside a single transaction; failures are collected
//!   into a [`PlacementReport`] instead of aborting the run.
//!
//! The host environment is reached only through the traits in [`host`], so
//! the whole pipeline runs against any model that implements them.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use hole_placer_core::{PlacementCommand, PlacementConfig};
//!
//! let command = PlacementCommand::new(PlacementConfig::default());
//! let report = command.run(&mut host_document, &conduit_document)?;
//! println!("placed {} holes, {} failures", report.placed_count(), report.failures.len());
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: serialization support for ids and enums

pub mod command;
pub mod conduit;
pub mod config;
pub mod dedup;
pub mod error;
pub mod hit;
pub mod host;
pub mod ids;
pub mod model;
pub mod placement;
pub mod query;
pub mod resolver;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};

pub use command::PlacementCommand;
pub use conduit::{ConduitCurve, ConduitElement, ConduitKind, ConduitSegment};
pub use config::PlacementConfig;
pub use dedup::dedupe;
pub use error::{Error, PlacementError, PlacementErrorKind, ResolutionError, Result};
pub use hit::{HitKey, RayHit};
pub use host::{ConduitSource, IntersectorFactory, ModelMutation, ModelQuery, SymbolActivation};
pub use ids::{ElementId, InstanceId, SymbolId, ViewId};
pub use model::{Category, ElementInfo, Level, StructuralKind, TargetFilter, WallTarget};
pub use placement::{with_transaction, MarkerPlacer, PlacedMarker, PlacementReport};
pub use query::{FixedHits, IntersectionQuery};
pub use resolver::{find_crossings, resolve, resolve_wall, CrossingRecord, Resolution};
