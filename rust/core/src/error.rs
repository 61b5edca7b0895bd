// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for hole placement.
//!
//! [`Error`] covers the fatal cases that abort a run before (or instead of)
//! mutating the model. Recoverable per-crossing and per-instance problems are
//! collected as [`PlacementError`] values in the run report.

use crate::ids::{ElementId, InstanceId};
use crate::model::Category;

/// Result type alias for hole placement operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Fatal errors. None of these leave partial mutations behind.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The document holding the ducts and pipes is not open.
    #[error("companion document not found: no open document titled {0:?}")]
    CompanionDocumentNotFound(String),

    /// The marker family is not loaded in the host document.
    #[error("family symbol not found: family {0:?} is not loaded")]
    FamilySymbolNotFound(String),

    /// No non-template 3D view exists to scope the intersection index.
    #[error("no usable 3D view found")]
    No3dView,

    /// The spatial intersection index could not be built.
    #[error("intersection index unavailable: {0}")]
    IndexUnavailable(String),

    /// The marker symbol could not be activated.
    #[error("failed to activate symbol {symbol}: {reason}")]
    SymbolActivation { symbol: ElementId, reason: String },

    /// A transaction could not be started or committed.
    #[error("transaction {name:?} failed: {reason}")]
    Transaction { name: String, reason: String },

    /// Conduit geometry violates a segment invariant.
    #[error("invalid conduit geometry: {0}")]
    InvalidGeometry(String),
}

/// A ray hit whose target could not be resolved to a wall on a level.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ResolutionError {
    #[error("element {0} not found in host model")]
    ElementNotFound(ElementId),

    #[error("element {id} is a {category}, not a wall")]
    NotAWall { id: ElementId, category: Category },

    #[error("wall {0} has no level")]
    WallWithoutLevel(ElementId),

    #[error("level {level} of wall {wall} not found")]
    LevelNotFound { wall: ElementId, level: ElementId },
}

/// Why a conduit, crossing, or marker could not be handled.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PlacementErrorKind {
    /// The conduit centerline is not a straight line.
    #[error("unsupported centerline: {0}")]
    UnsupportedCurve(String),

    /// The conduit has degenerate geometry (zero length, bad diameter).
    #[error("invalid conduit: {0}")]
    InvalidConduit(String),

    #[error("crossing not resolved: {0}")]
    Resolution(#[from] ResolutionError),

    /// The host model rejected the marker instance.
    #[error("instance creation on wall {wall} rejected: {reason}")]
    CreateInstance { wall: ElementId, reason: String },

    /// The marker was created but could not be sized.
    #[error("setting {parameter:?} on instance {instance} failed: {reason}")]
    SetParameter {
        instance: InstanceId,
        parameter: String,
        reason: String,
    },
}

/// A non-fatal failure attributed to the conduit that caused it.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("conduit {conduit}: {kind}")]
pub struct PlacementError {
    pub conduit: ElementId,
    pub kind: PlacementErrorKind,
}

impl PlacementError {
    pub fn new(conduit: ElementId, kind: impl Into<PlacementErrorKind>) -> Self {
        Self {
            conduit,
            kind: kind.into(),
        }
    }
}
