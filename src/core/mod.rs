pub mod cache;
pub mod etl;
pub mod pipeline;
pub mod sanitize;
pub mod sort;
pub mod writer;

pub use crate::domain::model::{
    DataOrigin, PipelineStage, RawBatch, SanitizedEmployee, SortPolicy, TransformResult,
};
pub use crate::domain::ports::{ConfigProvider, Pipeline, SourceFetcher};
pub use crate::utils::error::Result;
