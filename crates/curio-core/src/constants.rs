//! Shared constants for upload limits, pagination and remote media defaults.

/// Default upload ceiling for a single video (500 MiB)
pub const MAX_VIDEO_SIZE_MB: u64 = 500;

/// Extension given to staged files whose original name carries none
pub const DEFAULT_VIDEO_EXTENSION: &str = ".mp4";

/// Longest extension (without the dot) kept from a client-supplied filename
pub const MAX_EXTENSION_LEN: usize = 10;

/// Directory that receives staged and locally stored videos
pub const DEFAULT_UPLOAD_DIR: &str = "uploads";

/// Public path prefix under which the upload directory is served
pub const UPLOADS_ROUTE: &str = "/uploads";

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_PAGE_LIMIT: i64 = 20;
pub const MAX_PAGE_LIMIT: i64 = 100;

/// Folder prefix for public ids of remotely stored videos
pub const DEFAULT_REMOTE_VIDEO_FOLDER: &str = "research/videos";

pub const DEFAULT_REMOTE_API_BASE_URL: &str = "https://api.cloudinary.com/v1_1";

/// Domain that serves remote assets and their derived thumbnails
pub const REMOTE_DELIVERY_BASE_URL: &str = "https://res.cloudinary.com";

/// Thumbnail transformation: auto-selected frame, 640x360 fill crop, automatic quality and format
pub const REMOTE_THUMBNAIL_TRANSFORMATION: &str = "so_auto,w_640,h_360,c_fill,q_auto,f_auto";
