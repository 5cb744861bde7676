use showcase_core::constants::{BIG_IMAGE_CAP, SMALL_IMAGE_CAP};
use showcase_core::models::{ImageRecord, ImageSummary, ImageType};

/// Curate the public listing from every stored record.
///
/// `records` must be in insertion order. The first `BIG_IMAGE_CAP` big images
/// come first, followed by the first `SMALL_IMAGE_CAP` small images; relative
/// order inside each group is preserved.
pub fn select_listing(records: Vec<ImageRecord>) -> Vec<ImageSummary> {
    let (big, small): (Vec<ImageRecord>, Vec<ImageRecord>) = records
        .into_iter()
        .partition(|record| record.image_type == ImageType::Big);

    big.into_iter()
        .take(BIG_IMAGE_CAP)
        .chain(small.into_iter().take(SMALL_IMAGE_CAP))
        .map(ImageSummary::from)
        .collect()
}
