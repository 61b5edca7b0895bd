// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Collapses repeated hits on the same element into one crossing.
//!
//! A ray passing through a wall typically reports the wall once per face it
//! pierces. Only the first hit per [`HitKey`](crate::hit::HitKey) survives,
//! so the kept proximity is whichever one the index reported first.

use rustc_hash::FxHashSet;

use crate::hit::RayHit;

/// Stable deduplication by `(target, linked)` identity.
pub fn dedupe<I>(hits: I) -> Vec<RayHit>
where
    I: IntoIterator<Item = RayHit>,
{
    let iter = hits.into_iter();
    let mut seen = FxHashSet::default();
    let mut unique = Vec::with_capacity(iter.size_hint().0);

    for hit in iter {
        if seen.insert(hit.key()) {
            unique.push(hit);
        }
    }

    unique
}
