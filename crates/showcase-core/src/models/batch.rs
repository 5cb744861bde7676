use super::image::ImageRecord;

/// Outcome of one batch upload with at least one stored image.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchResult {
    pub succeeded: Vec<ImageRecord>,
    /// Original names of the files whose remote upload failed, in request order.
    pub failed_names: Vec<String>,
}

impl BatchResult {
    /// Number of files the batch accounted for.
    pub fn total(&self) -> usize {
        self.succeeded.len() + self.failed_names.len()
    }

    pub fn is_partial(&self) -> bool {
        !self.failed_names.is_empty()
    }

    /// Human-readable summary returned alongside the stored images.
    pub fn message(&self) -> String {
        let mut message = format!("{} images uploaded successfully.", self.succeeded.len());
        if self.is_partial() {
            message.push_str(&format!(
                " Failed uploads: {}.",
                self.failed_names.join(", ")
            ));
        }
        message
    }
}
