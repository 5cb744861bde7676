pub mod batch_upload;
pub mod image_lifecycle;
pub mod listing;

#[cfg(test)]
pub(crate) mod test_support;

pub use batch_upload::{BatchUploadService, UploadCandidate};
pub use image_lifecycle::ImageLifecycleService;
pub use listing::select_listing;
