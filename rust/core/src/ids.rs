// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Opaque identifier types for model elements.
//!
//! Host documents hand out integer element ids. These wrappers keep the
//! different roles apart (a view id is never accepted where a wall id is
//! expected) while comparing and hashing purely on the integer value.

use std::fmt;

/// Identifier of an element in a model document (wall, level, duct, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ElementId(pub i64);

impl ElementId {
    /// Returns the raw integer value.
    pub fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<i64> for ElementId {
    fn from(v: i64) -> Self {
        ElementId(v)
    }
}

macro_rules! element_role {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "serde", serde(transparent))]
        pub struct $name(pub ElementId);

        impl $name {
            /// Returns the underlying element id.
            pub fn element(self) -> ElementId {
                self.0
            }
        }

        impl From<ElementId> for $name {
            fn from(id: ElementId) -> Self {
                $name(id)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }
    };
}

element_role! {
    /// Identifier of a loaded family symbol (the marker type to place).
    SymbolId
}

element_role! {
    /// Identifier of a view used to scope spatial queries.
    ViewId
}

element_role! {
    /// Identifier of a placed family instance.
    InstanceId
}
