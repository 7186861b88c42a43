use crate::core::errors::{Error, Result};
use serde::Serialize;

/*-------------------------------------------------------------------------------------------------
  Render JSON
-------------------------------------------------------------------------------------------------*/

/// Serialize a value to JSON: a single line when `compact`, otherwise indented
/// with two spaces. Returns `None` when the value serializes to `null`, in
/// which case there is nothing to print.
pub fn render<T: Serialize + ?Sized>(value: &T, compact: bool) -> Result<Option<String>> {
    let json = if compact {
        serde_json::to_string(value)
    } else {
        serde_json::to_string_pretty(value)
    }
    .map_err(|error| Error::RenderFailure(format!("failed to serialize result: {error}")))?;

    if json == "null" {
        Ok(None)
    } else {
        Ok(Some(json))
    }
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/
