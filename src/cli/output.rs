use ipranges::{Error, QueryResult, Result};
use serde::Serialize;

/*-------------------------------------------------------------------------------------------------
  Output Functions
-------------------------------------------------------------------------------------------------*/

/*--------------------------------------------------------------------------------------
  Query Result
--------------------------------------------------------------------------------------*/

/// Print the result to stdout. Nothing is printed when the result renders to
/// `null`.
pub fn query_result(result: &QueryResult, compact: bool) -> Result<()> {
    if let Some(json) = ipranges::render(result, compact)? {
        println!("{json}");
    }
    Ok(())
}

/*--------------------------------------------------------------------------------------
  Error Report
--------------------------------------------------------------------------------------*/

/// Single-line JSON error report written to stderr.
#[derive(Debug, Serialize)]
pub struct ErrorReport<'a> {
    pub phase: &'a str,

    #[serde(rename = "error_essage")]
    pub message: String,
}

impl<'a> ErrorReport<'a> {
    pub fn new(phase: &'a str, error: &Error) -> Self {
        Self {
            phase,
            message: error.to_string(),
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| {
            format!(
                r#"{{"phase":{:?},"error_essage":{:?}}}"#,
                self.phase, self.message
            )
        })
    }
}

pub fn error(phase: &str, error: &Error) {
    eprintln!("{}", ErrorReport::new(phase, error).to_json());
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/
