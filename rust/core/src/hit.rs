// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Ray hits reported by the intersection index.

use crate::ids::ElementId;

/// Identity of a hit: the hit element plus, for elements living in a linked
/// document, the element id inside that link.
pub type HitKey = (ElementId, Option<ElementId>);

/// One ray/element intersection.
///
/// `proximity` is the distance from the ray origin along the (unit) ray
/// direction. It is not part of the hit's identity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub target: ElementId,
    pub linked: Option<ElementId>,
    pub proximity: f64,
}

impl RayHit {
    /// Hit on an element of the queried document itself.
    pub fn new(target: ElementId, proximity: f64) -> Self {
        Self {
            target,
            linked: None,
            proximity,
        }
    }

    /// Hit on `linked`, reached through the link instance `target`.
    pub fn linked(target: ElementId, linked: ElementId, proximity: f64) -> Self {
        Self {
            target,
            linked: Some(linked),
            proximity,
        }
    }

    pub fn key(&self) -> HitKey {
        (self.target, self.linked)
    }

    pub fn is_same_crossing(&self, other: &RayHit) -> bool {
        self.key() == other.key()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_ignores_proximity() {
        let a = RayHit::new(ElementId(10), 3.01);
        let b = RayHit::new(ElementId(10), 3.02);
        assert!(a.is_same_crossing(&b));
    }

    #[test]
    fn linked_id_is_part_of_identity() {
        let host = RayHit::new(ElementId(10), 1.0);
        let linked = RayHit::linked(ElementId(10), ElementId(77), 1.0);
        let other_linked = RayHit::linked(ElementId(10), ElementId(78), 1.0);

        assert!(!host.is_same_crossing(&linked));
        assert!(!linked.is_same_crossing(&other_linked));
        assert!(linked.is_same_crossing(&RayHit::linked(ElementId(10), ElementId(77), 9.0)));
    }
}
