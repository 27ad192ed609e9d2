//! Column discovery over the analysis call
//!
//! The engine has no dedicated method for listing columns. A request whose
//! only selection is [`COLUMNS_MARKER_SELECTION`] makes it report them as a
//! `COLUMNS:` line in the processing log.

use std::time::Duration;

use super::engine::EngineRequest;

pub const COLUMNS_MARKER_SELECTION: &str = "get_columns_only";
pub const COLUMNS_LOG_PREFIX: &str = "COLUMNS:";

/// Build the column discovery request for a file
pub fn columns_request(file_content: Vec<u8>, file_name: String, timeout: Duration) -> EngineRequest {
    EngineRequest {
        file_content,
        file_name,
        selection: vec![COLUMNS_MARKER_SELECTION.to_string()],
        timeout,
    }
}

/// Column names from the first `COLUMNS:` log line, or empty if there is none
pub fn parse_columns(processing_log: &[String]) -> Vec<String> {
    processing_log
        .iter()
        .find_map(|line| line.strip_prefix(COLUMNS_LOG_PREFIX))
        .map(|listing| {
            listing
                .split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn log(lines: &[&str]) -> Vec<String> {
        lines.iter().map(|l| l.to_string()).collect()
    }

    #[test]
    fn test_first_columns_line_wins() {
        let columns = parse_columns(&log(&[
            "Detected file type: csv",
            "COLUMNS: age, income ,, city",
            "COLUMNS:ignored",
        ]));
        assert_eq!(columns, vec!["age", "income", "city"]);
    }

    #[test]
    fn test_no_columns_line() {
        assert!(parse_columns(&log(&["Detected file type: csv"])).is_empty());
        assert!(parse_columns(&[]).is_empty());
        assert!(parse_columns(&log(&["COLUMNS:"])).is_empty());
    }

    #[test]
    fn test_prefix_must_start_the_line() {
        assert!(parse_columns(&log(&["Error: COLUMNS: a,b"])).is_empty());
    }

    #[test]
    fn test_columns_request_uses_marker() {
        let request = columns_request(b"a,b\n1,2\n".to_vec(), "f.csv".to_string(), Duration::from_secs(10));
        assert_eq!(request.selection, vec!["get_columns_only"]);
        assert_eq!(request.timeout, Duration::from_secs(10));
    }
}
