use std::fmt::{Display, Formatter, Result as FmtResult};

/// Storage backend kinds
///
/// A video's bytes live either on the local filesystem or at the remote media
/// service. The kind is never stored separately: it is recovered from the form of
/// the persisted storage location.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Local,
    Remote,
}

impl StorageBackend {
    /// Classify a persisted storage location.
    ///
    /// Locations carrying an `http://` or `https://` scheme are remote URLs; anything
    /// else is treated as a local filesystem path.
    pub fn classify(location: &str) -> Self {
        let lowered = location.trim_start().to_ascii_lowercase();
        if lowered.starts_with("http://") || lowered.starts_with("https://") {
            StorageBackend::Remote
        } else {
            StorageBackend::Local
        }
    }
}

impl Display for StorageBackend {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            StorageBackend::Local => write!(f, "local"),
            StorageBackend::Remote => write!(f, "remote"),
        }
    }
}
