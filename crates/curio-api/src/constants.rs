/// Prefix for every JSON API route
pub const API_PREFIX: &str = "/api";

/// Slack on top of the video ceiling for multipart framing and text fields, so
/// the streaming size check trips before the raw body limit does
pub const MULTIPART_OVERHEAD_BYTES: u64 = 1024 * 1024;
