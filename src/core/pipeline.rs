use crate::core::aggregate::Report;
use crate::core::export::{self, Summary};
use crate::core::ingest::ingest;
use crate::core::{ConfigProvider, Pipeline, Storage, Table, TransformResult};
use crate::utils::error::Result;
use std::io::Write;
use zip::write::{SimpleFileOptions, ZipWriter};

pub const STATE_COUNTS_FILE: &str = "state_counts.csv";
pub const CITY_COUNTS_FILE: &str = "city_counts.csv";
pub const CLEANED_DATASET_FILE: &str = "all_orders_cleaned.csv";
pub const SUMMARY_FILE: &str = "summary.json";
pub const BUNDLE_FILE: &str = "report.zip";

/// 原始資料樣本最多顯示幾筆
pub const RAW_SAMPLE_ROWS: usize = 250;

pub struct ReportPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> ReportPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }

    pub fn config(&self) -> &C {
        &self.config
    }

    fn output_file(&self, name: &str) -> String {
        format!("{}/{}", self.config.output_path().trim_end_matches('/'), name)
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for ReportPipeline<S, C> {
    async fn extract(&self) -> Result<Table> {
        tracing::info!("📥 Reading orders report: {}", self.config.input_path());
        let bytes = self.storage.read_file(self.config.input_path()).await?;
        tracing::debug!("Read {} bytes", bytes.len());

        let table = ingest(&bytes)?;
        tracing::info!(
            "Found columns '{}' / '{}' in {} rows",
            table.state_column(),
            table.city_column(),
            table.len()
        );
        Ok(table)
    }

    async fn transform(&self, table: Table) -> Result<TransformResult> {
        let report = Report::aggregate(&table);
        let top_n = self.config.top_n();

        let state_csv = export::state_counts_csv(&report)?;
        let city_csv = export::city_counts_csv(&report)?;
        let cleaned_csv = if self.config.include_cleaned_dataset() {
            Some(export::cleaned_dataset_csv(&table)?)
        } else {
            None
        };
        let summary_json = Summary::new(self.config.input_path(), &report, top_n).to_json()?;

        let raw_sample = if self.config.show_raw_sample() {
            table
                .rows()
                .take(RAW_SAMPLE_ROWS)
                .map(|row| row.cells().to_vec())
                .collect()
        } else {
            Vec::new()
        };

        tracing::info!(
            "Counted {} orders: {} states, {} cities (top: {} / {})",
            report.total_rows,
            report.distinct_states(),
            report.distinct_cities(),
            report.top_state(),
            report.top_city_display()
        );

        Ok(TransformResult {
            report,
            state_csv,
            city_csv,
            cleaned_csv,
            summary_json,
            headers: table.headers().to_vec(),
            raw_sample,
        })
    }

    async fn load(&self, result: &TransformResult) -> Result<String> {
        let mut files: Vec<(&str, &[u8])> = vec![
            (STATE_COUNTS_FILE, result.state_csv.as_bytes()),
            (CITY_COUNTS_FILE, result.city_csv.as_bytes()),
            (SUMMARY_FILE, result.summary_json.as_bytes()),
        ];
        if let Some(cleaned) = &result.cleaned_csv {
            files.push((CLEANED_DATASET_FILE, cleaned.as_bytes()));
        }

        if self.config.bundle_outputs() {
            tracing::debug!("Creating ZIP file with {} files", files.len());

            let zip_data = {
                let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));
                for (name, data) in &files {
                    zip.start_file(*name, SimpleFileOptions::default())?;
                    zip.write_all(data)?;
                }
                zip.finish()?.into_inner()
            };

            let path = self.output_file(BUNDLE_FILE);
            tracing::debug!("Writing ZIP file ({} bytes) to storage", zip_data.len());
            self.storage.write_file(&path, &zip_data).await?;
            return Ok(path);
        }

        for (name, data) in &files {
            self.storage.write_file(&self.output_file(name), data).await?;
        }

        Ok(self.config.output_path().to_string())
    }
}
