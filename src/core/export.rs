use crate::core::aggregate::Report;
use crate::core::normalize::{clean_city, clean_state, display_city_label, present, UNKNOWN};
use crate::domain::model::{CountEntry, Dimension, Table};
use crate::utils::error::{ReportError, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;

pub const CITY_NORM_COLUMN: &str = "ship_city_norm";
pub const STATE_CLEAN_COLUMN: &str = "ship_state_clean";

/// `Ship State,Count` rows in count order.
pub fn state_counts_csv(report: &Report) -> Result<String> {
    counts_csv(Dimension::State, report.states.entries())
}

/// `Ship City,Count` rows; labels are already in display form.
pub fn city_counts_csv(report: &Report) -> Result<String> {
    counts_csv(Dimension::City, &report.cities_for_display())
}

fn counts_csv(dimension: Dimension, entries: &[CountEntry]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record([dimension.heading(), "Count"])?;
    for entry in entries {
        let count = entry.count.to_string();
        writer.write_record([entry.label.as_str(), count.as_str()])?;
    }
    into_string(writer)
}

/// 完整資料：原欄位保留，state / city 兩欄去空白並補 Unknown，最後附上清理後的兩欄
pub fn cleaned_dataset_csv(table: &Table) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    let mut header: Vec<&str> = table.headers().iter().map(String::as_str).collect();
    header.push(CITY_NORM_COLUMN);
    header.push(STATE_CLEAN_COLUMN);
    writer.write_record(&header)?;

    let state_idx = table.state_index();
    let city_idx = table.city_index();

    for row in table.rows() {
        let mut record: Vec<String> = Vec::with_capacity(header.len());
        for (idx, cell) in row.cells().iter().enumerate() {
            if idx == state_idx || idx == city_idx {
                record.push(present(Some(cell)).unwrap_or(UNKNOWN).to_string());
            } else {
                record.push(cell.clone());
            }
        }
        record.push(clean_city(row.raw_city()));
        record.push(clean_state(row.raw_state()));
        writer.write_record(&record)?;
    }

    into_string(writer)
}

fn into_string(writer: csv::Writer<Vec<u8>>) -> Result<String> {
    let bytes = writer.into_inner().map_err(|e| ReportError::IoError(e.into_error()))?;
    String::from_utf8(bytes)
        .map_err(|e| ReportError::IoError(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
}

#[derive(Debug, Serialize)]
pub struct Summary<'a> {
    pub source: &'a str,
    pub generated_at: DateTime<Utc>,
    pub total_rows: usize,
    pub unique_states: usize,
    pub unique_cities: usize,
    pub top_state: &'a str,
    pub top_city: &'a str,
    pub top_n: usize,
    pub top_states: &'a [CountEntry],
    pub top_cities: Vec<CountEntry>,
}

impl<'a> Summary<'a> {
    pub fn new(source: &'a str, report: &'a Report, top_n: usize) -> Self {
        let top_cities = report
            .top_cities(top_n)
            .iter()
            .map(|e| CountEntry {
                label: display_city_label(&e.label).to_string(),
                count: e.count,
            })
            .collect();

        Self {
            source,
            generated_at: Utc::now(),
            total_rows: report.total_rows,
            unique_states: report.distinct_states(),
            unique_cities: report.distinct_cities(),
            top_state: report.top_state(),
            top_city: report.top_city_display(),
            top_n,
            top_states: report.top_states(top_n),
            top_cities,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ingest::ingest;

    fn sample() -> Table {
        ingest(
            b"order-id\tship-city\tship-state\n\
              1\t navi mumbai \tmaharashtra\n\
              2\tMumbai\tMAHARASHTRA\n\
              3\t\tnan\n\
              4\tPune, MH\tMaharashtra\n",
        )
        .unwrap()
    }

    #[test]
    fn test_count_csvs() {
        let report = Report::aggregate(&sample());

        assert_eq!(
            state_counts_csv(&report).unwrap(),
            "Ship State,Count\nMaharashtra,3\nUnknown,1\n"
        );
        let city_csv = city_counts_csv(&report).unwrap();
        let lines: Vec<&str> = city_csv.lines().collect();
        assert_eq!(lines[..2], ["Ship City,Count", "Mumbai ++,2"]);
        let mut singles = lines[2..].to_vec();
        singles.sort();
        assert_eq!(singles, vec!["\"Pune, Mh\",1", "Unknown,1"]);
    }

    #[test]
    fn test_cleaned_dataset_appends_normalized_columns() {
        let csv = cleaned_dataset_csv(&sample()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines[0], "order-id,ship-city,ship-state,ship_city_norm,ship_state_clean");
        assert_eq!(lines[1], "1,navi mumbai,maharashtra,Mumbai,Maharashtra");
        assert_eq!(lines[3], "3,Unknown,Unknown,Unknown,Unknown");
        assert_eq!(lines.len(), 5);
    }

    #[test]
    fn test_summary_json() {
        let report = Report::aggregate(&sample());
        let json = Summary::new("orders.txt", &report, 1).to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["total_rows"], 4);
        assert_eq!(value["unique_cities"], 3);
        assert_eq!(value["top_city"], "Mumbai ++");
        assert_eq!(value["top_cities"][0]["label"], "Mumbai ++");
        assert_eq!(value["top_states"].as_array().unwrap().len(), 1);
        assert!(value["generated_at"].is_string());
    }
}
