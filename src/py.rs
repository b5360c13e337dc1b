//! Python bindings for the quick-entry parser using PyO3

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::PyDict;

use crate::catalog::Catalog;
use crate::config::ParserConfig;
use crate::form::to_form_data;
use crate::parser::{QuickEntryParser, SuggestionField};
use crate::splice::replace_segment;

fn value_error(err: impl std::fmt::Display) -> PyErr {
    PyErr::new::<PyValueError, _>(err.to_string())
}

/// Rewrite the text between two keywords (Python function)
#[pyfunction]
pub fn py_replace_segment(raw: &str, start_keyword: &str, end_keyword: &str, replacement: &str) -> String {
    replace_segment(raw, start_keyword, end_keyword, replacement)
}

/// Python wrapper for the quick-entry parser
#[pyclass]
pub struct PyQuickEntryParser {
    parser: QuickEntryParser,
}

#[pymethods]
impl PyQuickEntryParser {
    #[new]
    #[pyo3(signature = (config_toml=None))]
    fn new(config_toml: Option<&str>) -> PyResult<Self> {
        let config = match config_toml {
            Some(text) => ParserConfig::from_toml_str(text).map_err(value_error)?,
            None => ParserConfig::default(),
        };
        Ok(Self {
            parser: QuickEntryParser::new(config),
        })
    }

    /// Replace the catalog from three JSON arrays
    fn set_catalog(&mut self, items_json: &str, destinations_json: &str, variants_json: &str) -> PyResult<()> {
        let catalog = Catalog::from_json(items_json, destinations_json, variants_json).map_err(value_error)?;
        self.parser.set_catalog(catalog);
        Ok(())
    }

    /// Parse a line, returning the command as JSON
    fn parse(&self, raw: &str) -> PyResult<String> {
        let cmd = self.parser.parse(raw);
        serde_json::to_string(&cmd)
            .map_err(|e| value_error(format!("Failed to serialize command: {}", e)))
    }

    /// Form fields for a complete line, or `None` while it is incomplete
    fn form_data<'py>(&self, raw: &str, py: Python<'py>) -> PyResult<Option<Bound<'py, PyDict>>> {
        let cmd = self.parser.parse(raw);
        if !cmd.complete {
            return Ok(None);
        }
        let form = to_form_data(&cmd).map_err(value_error)?;

        let dict = PyDict::new_bound(py);
        for (key, value) in form.to_fields() {
            dict.set_item(key, value)?;
        }
        Ok(Some(dict))
    }

    /// Splice an accepted suggestion into `field` ("item", "variant" or "source")
    fn accept_suggestion(&self, raw: &str, field: &str, replacement: &str) -> PyResult<String> {
        let field = match field {
            "item" => SuggestionField::Item,
            "variant" => SuggestionField::Variant,
            "source" => SuggestionField::Source,
            other => return Err(value_error(format!("unknown field `{}`", other))),
        };
        Ok(self.parser.accept_suggestion(raw, field, replacement))
    }
}
