//! Entry parser - quick-entry command language for ledger transactions
//!
//! Turns a single typed line such as `30 cement @100 debit from site A` into
//! a structured transaction, resolving item and source names against an
//! in-memory reference catalog with ranked suggestions for near misses.

pub mod types;
pub mod error;
pub mod config;
pub mod catalog;
pub mod matcher;
pub mod segmenter;
mod resolver;
pub mod parser;
pub mod splice;
pub mod form;

pub use types::*;
pub use error::*;
pub use config::*;
pub use catalog::*;
pub use matcher::*;
pub use segmenter::{segment, Segment, Segments};
pub use parser::*;
pub use splice::replace_segment;
pub use form::*;

// Python bindings
#[cfg(feature = "extension-module")]
pub mod py;

#[cfg(feature = "extension-module")]
use pyo3::prelude::*;

#[cfg(feature = "extension-module")]
#[pymodule]
fn entry_parser(m: &Bound<'_, PyModule>) -> PyResult<()> {
    use py::*;
    m.add_class::<PyQuickEntryParser>()?;
    m.add_function(wrap_pyfunction!(py_replace_segment, m)?)?;
    Ok(())
}
