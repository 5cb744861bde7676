/// Prefix shared by every image route.
pub const API_PREFIX: &str = "/api";

/// Banner returned by `GET /`.
pub const ROOT_BANNER: &str = "API WORKING Great";

/// Room for multipart boundaries, headers and the `imageTypes` text field on
/// top of the file payloads.
pub const MULTIPART_OVERHEAD_BYTES: usize = 1024 * 1024;
