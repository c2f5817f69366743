pub mod convention;
pub mod engine;
pub mod fetcher;
pub mod generic;
pub mod harvest;
pub mod markup;
pub mod matcher;
pub mod parser;
pub mod pipeline;
pub mod structured;

pub use crate::domain::ports::{PageFetcher, Pipeline, Storage};
