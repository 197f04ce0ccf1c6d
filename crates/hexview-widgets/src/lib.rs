#![forbid(unsafe_code)]

//! Widgets: the virtualized scroll controller and the cell/row renderers.
//!
//! Renderers are pure functions of the store slices. They never mutate
//! state and only materialize rows inside the scroll controller's window.

pub mod cell;
pub mod offset;
pub mod row;
pub mod virtualized;

pub use cell::{CellClass, CellContext, CellView};
pub use offset::{OffsetBase, OffsetFormat};
pub use row::{RowOptions, RowView, render_rows};
pub use virtualized::{Placement, RenderWindow, ScrollState, TouchOutcome, TouchTracker};
