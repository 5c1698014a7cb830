pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::{cli::LocalStorage, toml_config::TomlConfig};
pub use core::{
    aggregate::{CountTable, Report},
    etl::{ReportEngine, RunOutcome},
    ingest::ingest,
    normalize::{clean_city, clean_state, display_city_label},
    pipeline::ReportPipeline,
};
/// Merge-table lookup: `Some(canonical)` for a merged city, `None` when the
/// city is not merged and keeps its own (title-cased) name.
pub use core::normalize::canonicalize;
pub use domain::model::{CountEntry, Row, Table};
pub use utils::error::{ReportError, Result};
