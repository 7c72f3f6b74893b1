//! # Spreadsheet Model
//!
//! Decoded worksheets, typed cell values and the dense [`Grid`] every
//! extraction step reads from.
pub mod cell;
pub mod grid;
pub mod reference;
pub mod sheet;

pub use cell::CellValue;
pub use grid::Grid;
pub use sheet::{Cell, Worksheet};
