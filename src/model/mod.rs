//! Output model for decoded worksheets.
//!
//! A worksheet is reduced to a [`Matrix`]: rows of plain strings, positioned
//! by column, with every value kept as text.

mod matrix;

pub use matrix::*;
