pub mod pagination;
pub mod user;
pub mod video;

pub use pagination::PageRequest;
pub use user::{User, UserResponse};
pub use video::{DeletedVideo, NewVideo, Video, VideoPage, VideoResponse};
