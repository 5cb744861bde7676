use crate::constants::ROOT_BANNER;

/// Plain-text liveness banner.
pub async fn root() -> &'static str {
    ROOT_BANNER
}
