// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Model element records as seen through the query service.

use std::fmt;

use crate::ids::ElementId;

/// Element category, the subset of host categories hole placement cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Category {
    Wall,
    Level,
    Duct,
    Pipe,
    GenericModel,
    View,
    Other,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Wall => "Wall",
            Category::Level => "Level",
            Category::Duct => "Duct",
            Category::Pipe => "Pipe",
            Category::GenericModel => "GenericModel",
            Category::View => "View",
            Category::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Minimal view of a model element: what it is and which level hosts it.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementInfo {
    pub id: ElementId,
    pub category: Category,
    pub level: Option<ElementId>,
}

/// A building level.
#[derive(Debug, Clone, PartialEq)]
pub struct Level {
    pub id: ElementId,
    pub name: String,
    pub elevation: f64,
}

/// A wall that a crossing was resolved to, with the level the marker goes on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WallTarget {
    pub element: ElementId,
    pub level: ElementId,
}

/// Structural role passed to instance creation. Markers are never structural.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StructuralKind {
    #[default]
    NonStructural,
    Beam,
    Brace,
    Column,
    Footing,
}

/// Element filter used to scope a spatial intersection index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetFilter {
    /// Only elements of this category are reported by the index.
    Category(Category),
}

impl TargetFilter {
    /// Filter reporting wall elements only.
    pub const WALLS: TargetFilter = TargetFilter::Category(Category::Wall);

    pub fn matches(&self, category: Category) -> bool {
        match self {
            TargetFilter::Category(c) => *c == category,
        }
    }
}
