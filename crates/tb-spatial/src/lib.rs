//! `tb-spatial` — where citizens are.
//!
//! # Crate layout
//!
//! | Module    | Contents                                                     |
//! |-----------|--------------------------------------------------------------|
//! | [`grid`]  | `Grid` (positions + cell occupancy), `CellOccupants`         |
//! | [`error`] | `SpatialError`, `SpatialResult<T>`                           |
//!
//! # Model
//!
//! Every citizen has a continuous [`Point`][tb_core::Point] and the integer
//! [`Cell`][tb_core::Cell] that point truncates to.  [`Grid::move_to`]
//! updates both together, plus the reverse index from cells to occupants
//! that neighborhood queries read.  Co-location in a cell is the contact
//! proxy used by contagion.
//!
//! # Feature flags
//!
//! | Flag      | Effect                                                   |
//! |-----------|----------------------------------------------------------|
//! | `fx-hash` | FxHash for the occupancy map (faster on integer keys).   |
//! | `serde`   | Enables the `tb-core` derives on `Point` and `Cell`.     |

pub mod error;
pub mod grid;


pub use error::{SpatialError, SpatialResult};
pub use grid::{CellOccupants, Grid};
