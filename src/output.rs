//! JSON rendering for command output.

use space_query::QueryResult;

use crate::error::Result;

/// Serialize `result` as a single line, or indented when `pretty` is set.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn render_result(result: &QueryResult, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };
    Ok(json)
}

/// The example queries as a JSON document: `{"examples": [...]}`.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn render_examples(examples: &[&str], pretty: bool) -> Result<String> {
    let doc = serde_json::json!({ "examples": examples });
    let json = if pretty {
        serde_json::to_string_pretty(&doc)?
    } else {
        serde_json::to_string(&doc)?
    };
    Ok(json)
}
