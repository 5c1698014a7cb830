use crate::domain::model::Table;
use crate::utils::error::{ReportError, Result};
use csv::ReaderBuilder;
use std::borrow::Cow;

const TAB: u8 = b'\t';
const COMMA: u8 = b',';

/// Header plus rows, before the required columns are resolved.
struct Grid {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

/// 解析上傳的檔案：先試 tab 分隔，單欄或格式錯誤時改用逗號
pub fn ingest(bytes: &[u8]) -> Result<Table> {
    let decoded = decode(bytes);
    let text: &str = decoded.strip_prefix('\u{feff}').unwrap_or(&decoded);

    if text.trim().is_empty() {
        return Err(ReportError::ParseError {
            message: "file is empty".to_string(),
        });
    }

    let tab_columns = header_width(text, TAB);
    let tab_error = match parse_delimited(text, TAB) {
        Ok(grid) if grid.headers.len() > 1 => {
            tracing::debug!(
                "Parsed tab-delimited file: {} columns, {} rows",
                grid.headers.len(),
                grid.rows.len()
            );
            return Table::new(grid.headers, grid.rows);
        }
        Ok(_) => "single column".to_string(),
        Err(e) => e.to_string(),
    };

    tracing::debug!("Tab-delimited parse rejected ({}), retrying with commas", tab_error);

    let grid = parse_delimited(text, COMMA).map_err(|e| ReportError::ParseError {
        message: format!(
            "neither tab ({}) nor comma ({}) delimiting produced a table",
            tab_error, e
        ),
    })?;

    // 單欄的逗號結果只在 tab 標頭也是單欄時才算數
    if grid.headers.len() < 2 && tab_columns > 1 {
        return Err(ReportError::ParseError {
            message: format!(
                "tab header has {} columns but the rows do not match ({}); comma parse found a single column",
                tab_columns, tab_error
            ),
        });
    }

    tracing::debug!(
        "Parsed comma-delimited file: {} columns, {} rows",
        grid.headers.len(),
        grid.rows.len()
    );
    Table::new(grid.headers, grid.rows)
}

/// Number of header cells under `delimiter`, 0 when the header cannot be read.
fn header_width(text: &str, delimiter: u8) -> usize {
    ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .from_reader(text.as_bytes())
        .headers()
        .map(|headers| headers.len())
        .unwrap_or(0)
}

fn decode(bytes: &[u8]) -> Cow<'_, str> {
    match std::str::from_utf8(bytes) {
        Ok(text) => Cow::Borrowed(text),
        Err(e) => {
            tracing::warn!("⚠️ Input is not valid UTF-8 ({}), replacing invalid bytes", e);
            String::from_utf8_lossy(bytes)
        }
    }
}

/// Strict parse: every record must be as wide as the header.
fn parse_delimited(text: &str, delimiter: u8) -> Result<Grid> {
    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(false)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();

    if headers.is_empty() {
        return Err(ReportError::ParseError {
            message: "missing header row".to_string(),
        });
    }

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok(Grid { headers, rows })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_tab_delimited_report() {
        let input = "amazon-order-id\tship-city\tship-state\tship-postal-code\n\
                     171-1\tMUMBAI\tMAHARASHTRA\t400001\n\
                     171-2\tPune\tMaharashtra\t411001\n";

        let table = ingest(input.as_bytes()).unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.headers().len(), 4);
        let cities: Vec<_> = table.rows().map(|r| r.raw_city().unwrap()).collect();
        assert_eq!(cities, vec!["MUMBAI", "Pune"]);
    }

    #[test]
    fn test_falls_back_to_comma() {
        let input = "order-id,Ship-State,Ship-City\n1,goa,panaji\n2,Kerala,Kochi\n";

        let table = ingest(input.as_bytes()).unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.state_column(), "Ship-State");
        let states: Vec<_> = table.rows().map(|r| r.raw_state().unwrap()).collect();
        assert_eq!(states, vec!["goa", "Kerala"]);
    }

    #[test]
    fn test_ragged_tab_file_falls_back_to_comma() {
        // tab 解析欄數不一致，逗號解析則正常
        let input = "ship-state,ship-city\nGoa,Pan\taji\nKerala,Kochi\n";
        let table = ingest(input.as_bytes()).unwrap();
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_ragged_tab_rows_with_tab_header_is_parse_error() {
        let err = ingest(b"ship-state\tship-city\nGoa\tPanaji\textra\n").unwrap_err();
        match err {
            ReportError::ParseError { message } => assert!(message.contains("2 columns")),
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_mismatched_widths_is_parse_error() {
        let input = "ship-state,ship-city\nGoa,Panaji,extra\n";
        let err = ingest(input.as_bytes()).unwrap_err();
        assert!(matches!(err, ReportError::ParseError { .. }));
    }

    #[test]
    fn test_empty_file_is_parse_error() {
        assert!(matches!(ingest(b""), Err(ReportError::ParseError { .. })));
        assert!(matches!(ingest(b"  \n\n"), Err(ReportError::ParseError { .. })));
    }

    #[test]
    fn test_single_column_file_reports_missing_city() {
        let err = ingest(b"ship-state\nGoa\n").unwrap_err();
        match err {
            ReportError::SchemaError { missing } => assert_eq!(missing, vec!["ship-city"]),
            other => panic!("expected schema error, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_both_columns() {
        let err = ingest(b"order-id\tsku\n1\tA\n").unwrap_err();
        match err {
            ReportError::SchemaError { missing } => {
                assert_eq!(missing, vec!["ship-state", "ship-city"])
            }
            other => panic!("expected schema error, got {:?}", other),
        }
    }

    #[test]
    fn test_bom_crlf_and_blank_lines() {
        let input = "\u{feff}ship-state\tship-city\r\nGoa\tPanaji\r\n\r\nKerala\tKochi\r\n";

        let table = ingest(input.as_bytes()).unwrap();

        assert_eq!(table.state_column(), "ship-state");
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_header_only_file_has_no_rows() {
        let table = ingest(b"ship-state\tship-city\n").unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn test_invalid_utf8_is_tolerated() {
        let mut input = b"ship-state\tship-city\nGoa\tPan".to_vec();
        input.push(0xff);
        input.extend_from_slice(b"aji\n");

        let table = ingest(&input).unwrap();
        assert_eq!(table.len(), 1);
    }
}
