//! Output rendering for worksheet matrices.
//!
//! # Example
//!
//! ```no_run
//! use sheetgrid::{read_matrix, render::*};
//!
//! let matrix = read_matrix("data.xlsx")?;
//! let json = to_json(&matrix, JsonFormat::Pretty)?;
//! println!("{}", json);
//! # Ok::<(), sheetgrid::Error>(())
//! ```

mod json;

pub use json::{to_json, JsonFormat};
