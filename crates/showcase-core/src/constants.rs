//! Fixed policy constants.

/// Maximum number of `big` images returned by the listing endpoint.
pub const BIG_IMAGE_CAP: usize = 8;

/// Maximum number of `small` images returned by the listing endpoint.
pub const SMALL_IMAGE_CAP: usize = 7;

/// Maximum number of files accepted in one batch upload request.
pub const MAX_BATCH_FILES: usize = 15;

/// Multipart field carrying the files of a batch.
pub const IMAGES_FIELD: &str = "images";

/// Multipart field carrying the comma-separated image types.
pub const IMAGE_TYPES_FIELD: &str = "imageTypes";
