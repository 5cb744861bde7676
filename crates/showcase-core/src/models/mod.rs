//! Data models for the application

mod batch;
mod image;

pub use batch::BatchResult;
pub use image::{ImageRecord, ImageSummary, ImageType, NewImageRecord};
