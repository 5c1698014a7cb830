use crate::core::aggregate::Report;
use crate::utils::error::{ReportError, Result};
use serde::Serialize;

pub const SHIP_STATE: &str = "ship-state";
pub const SHIP_CITY: &str = "ship-city";

/// 一次上傳解析出來的表格，所有欄位都保持字串
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    state_col: usize,
    city_col: usize,
}

impl Table {
    /// Builds a table and resolves `ship-state` / `ship-city` case-insensitively.
    ///
    /// Every row must be exactly as wide as the header.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Result<Self> {
        if let Some((index, row)) = rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != headers.len())
        {
            return Err(ReportError::ParseError {
                message: format!(
                    "row {} has {} fields, header has {}",
                    index + 1,
                    row.len(),
                    headers.len()
                ),
            });
        }

        let state_col = resolve_column(&headers, SHIP_STATE);
        let city_col = resolve_column(&headers, SHIP_CITY);

        match (state_col, city_col) {
            (Some(state_col), Some(city_col)) => Ok(Self {
                headers,
                rows,
                state_col,
                city_col,
            }),
            (state_col, city_col) => {
                let mut missing = Vec::new();
                if state_col.is_none() {
                    missing.push(SHIP_STATE.to_string());
                }
                if city_col.is_none() {
                    missing.push(SHIP_CITY.to_string());
                }
                Err(ReportError::SchemaError { missing })
            }
        }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// 原始檔案中的欄位名稱（保留大小寫）
    pub fn state_column(&self) -> &str {
        &self.headers[self.state_col]
    }

    pub fn city_column(&self) -> &str {
        &self.headers[self.city_col]
    }

    pub fn state_index(&self) -> usize {
        self.state_col
    }

    pub fn city_index(&self) -> usize {
        self.city_col
    }

    pub fn rows(&self) -> impl Iterator<Item = Row<'_>> + '_ {
        self.rows.iter().map(move |cells| Row {
            cells,
            state_col: self.state_col,
            city_col: self.city_col,
        })
    }
}

/// Header lookup ignores ASCII case and surrounding whitespace. When two
/// headers collide the later one wins.
fn resolve_column(headers: &[String], name: &str) -> Option<usize> {
    headers
        .iter()
        .rposition(|header| header.trim().eq_ignore_ascii_case(name))
}

#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    cells: &'a [String],
    state_col: usize,
    city_col: usize,
}

impl<'a> Row<'a> {
    pub fn raw_state(&self) -> Option<&'a str> {
        self.cells.get(self.state_col).map(String::as_str)
    }

    pub fn raw_city(&self) -> Option<&'a str> {
        self.cells.get(self.city_col).map(String::as_str)
    }

    pub fn cells(&self) -> &'a [String] {
        self.cells
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountEntry {
    pub label: String,
    pub count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    State,
    City,
}

impl Dimension {
    /// 表格 / CSV 匯出的欄位標題
    pub fn heading(&self) -> &'static str {
        match self {
            Dimension::State => "Ship State",
            Dimension::City => "Ship City",
        }
    }
}

#[derive(Debug, Clone)]
pub struct TransformResult {
    pub report: Report,
    pub state_csv: String,
    pub city_csv: String,
    pub cleaned_csv: Option<String>,
    pub summary_json: String,
    pub headers: Vec<String>,
    /// 前幾筆原始資料，未開啟 raw sample 時為空
    pub raw_sample: Vec<Vec<String>>,
}
