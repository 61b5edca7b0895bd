// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Placement settings.

use crate::model::StructuralKind;

/// What to place and how.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacementConfig {
    /// Family name of the marker symbol (looked up in the generic model category).
    pub family_name: String,
    /// Instance parameter receiving the conduit diameter as marker width.
    pub width_parameter: String,
    /// Instance parameter receiving the conduit diameter as marker height.
    pub height_parameter: String,
    /// Name of the transaction that activates the marker symbol.
    pub activation_transaction: String,
    /// Name of the transaction that places all markers.
    pub placement_transaction: String,
    pub structural_kind: StructuralKind,
    /// Resolve conduits on the rayon thread pool.
    pub parallel: bool,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            family_name: "Hole".into(),
            width_parameter: "Width".into(),
            height_parameter: "Height".into(),
            activation_transaction: "Activate hole symbol".into(),
            placement_transaction: "Place holes".into(),
            structural_kind: StructuralKind::NonStructural,
            parallel: true,
        }
    }
}
