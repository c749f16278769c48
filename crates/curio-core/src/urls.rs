//! Public link resolution for stored videos
//!
//! Resolution is a pure function of the persisted row and the request's base URL:
//! the same inputs always produce the same links.

use crate::constants::{REMOTE_DELIVERY_BASE_URL, REMOTE_THUMBNAIL_TRANSFORMATION, UPLOADS_ROUTE};
use crate::models::Video;
use crate::storage_types::StorageBackend;

/// Inputs that vary per request or per deployment
#[derive(Debug, Clone, Copy)]
pub struct UrlContext<'a> {
    pub base_url: &'a str,
    pub remote_cloud_name: Option<&'a str>,
}

impl<'a> UrlContext<'a> {
    pub fn new(base_url: &'a str, remote_cloud_name: Option<&'a str>) -> Self {
        Self {
            base_url,
            remote_cloud_name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedUrls {
    pub url: String,
    pub thumbnail_url: String,
}

pub fn resolve_video_urls(video: &Video, ctx: &UrlContext<'_>) -> ResolvedUrls {
    match video.storage_backend() {
        StorageBackend::Remote => ResolvedUrls {
            url: video.storage_path.clone(),
            thumbnail_url: remote_thumbnail_url(ctx.remote_cloud_name, &video.filename),
        },
        StorageBackend::Local => ResolvedUrls {
            url: local_video_url(ctx.base_url, &video.filename),
            thumbnail_url: String::new(),
        },
    }
}

/// `<base>/uploads/<filename>`, or empty when there is no filename
pub fn local_video_url(base_url: &str, filename: &str) -> String {
    if filename.is_empty() {
        return String::new();
    }
    format!(
        "{}{}/{}",
        base_url.trim_end_matches('/'),
        UPLOADS_ROUTE,
        filename
    )
}

/// Poster frame link for a remote video, or empty when it cannot be derived
pub fn remote_thumbnail_url(cloud_name: Option<&str>, public_id: &str) -> String {
    let cloud_name = match cloud_name.map(str::trim) {
        Some(name) if !name.is_empty() => name,
        _ => return String::new(),
    };
    if public_id.is_empty() {
        return String::new();
    }
    format!(
        "{}/{}/video/upload/{}/{}.jpg",
        REMOTE_DELIVERY_BASE_URL,
        cloud_name,
        REMOTE_THUMBNAIL_TRANSFORMATION,
        urlencoding::encode(public_id)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn video(storage_path: &str, filename: &str) -> Video {
        Video {
            id: Uuid::new_v4(),
            subtopic_id: "calculus-limits".to_string(),
            user_id: Uuid::new_v4(),
            original_name: "limits.mov".to_string(),
            filename: filename.to_string(),
            mime_type: "video/quicktime".to_string(),
            size_bytes: 10,
            storage_path: storage_path.to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_remote_video_uses_location_verbatim() {
        let v = video(
            "https://res.cloudinary.com/demo/video/upload/v1/research/videos/abc.mp4",
            "research/videos/abc",
        );
        let urls = resolve_video_urls(&v, &UrlContext::new("http://ignored", Some("demo")));
        assert_eq!(urls.url, v.storage_path);
        assert_eq!(
            urls.thumbnail_url,
            "https://res.cloudinary.com/demo/video/upload/so_auto,w_640,h_360,c_fill,q_auto,f_auto/research%2Fvideos%2Fabc.jpg"
        );
    }

    #[test]
    fn test_remote_thumbnail_empty_without_cloud_name() {
        let v = video("https://cdn.example.com/a.mp4", "research/videos/a");
        let urls = resolve_video_urls(&v, &UrlContext::new("http://localhost", None));
        assert_eq!(urls.url, "https://cdn.example.com/a.mp4");
        assert_eq!(urls.thumbnail_url, "");

        let urls = resolve_video_urls(&v, &UrlContext::new("http://localhost", Some("  ")));
        assert_eq!(urls.thumbnail_url, "");
    }

    #[test]
    fn test_local_video_links_under_uploads() {
        let v = video("uploads/9b1d.mp4", "9b1d.mp4");
        let urls = resolve_video_urls(&v, &UrlContext::new("https://api.example.com/", Some("demo")));
        assert_eq!(urls.url, "https://api.example.com/uploads/9b1d.mp4");
        assert_eq!(urls.thumbnail_url, "");
    }

    #[test]
    fn test_local_video_without_filename_has_no_url() {
        let v = video("uploads/", "");
        let urls = resolve_video_urls(&v, &UrlContext::new("http://localhost:4000", None));
        assert_eq!(urls.url, "");
    }

    #[test]
    fn test_resolution_is_deterministic() {
        let remote = video("https://res.cloudinary.com/demo/video/upload/a.mp4", "f/a");
        let local = video("uploads/b.mp4", "b.mp4");
        let ctx = UrlContext::new("http://localhost:4000", Some("demo"));
        assert_eq!(resolve_video_urls(&remote, &ctx), resolve_video_urls(&remote, &ctx));
        assert_eq!(resolve_video_urls(&local, &ctx), resolve_video_urls(&local, &ctx));
    }
}
