// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use thiserror::Error;

/// Result type for geometry operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building wall geometry
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Degenerate wall baseline: start and end coincide")]
    DegenerateBaseline,

    #[error("Invalid wall thickness: {0}")]
    InvalidThickness(f64),

    #[error("Invalid wall height: {0}")]
    InvalidHeight(f64),
}
