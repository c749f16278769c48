pub mod auth;
pub mod video_delete;
pub mod video_get;
pub mod video_update;
pub mod video_upload;
