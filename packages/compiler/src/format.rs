//! Canonical formatting of generated source.

use crate::error::{CompileError, Result};

/// Parse `source` as a Rust file and pretty-print it.
///
/// Fails without output when the text does not parse.
pub fn format_source(source: &str) -> Result<String> {
    let file = syn::parse_file(source).map_err(|e| CompileError::Format {
        message: e.to_string(),
    })?;
    Ok(prettyplease::unparse(&file))
}
