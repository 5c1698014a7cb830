pub mod aggregate;
pub mod etl;
pub mod export;
pub mod ingest;
pub mod normalize;
pub mod pipeline;

pub use crate::domain::model::{Table, TransformResult};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
