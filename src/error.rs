// src/error.rs
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SkeletonError {
    #[error("Missing configuration : {owner}.{path}")]
    MissingConfiguration { owner: &'static str, path: String },

    #[error("Invalid callback for event \"{event}\"")]
    InvalidCallback { event: String },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("\"{}\" contains no classes matching \"{pattern}\"", path.display())]
    NoClassesFound { path: PathBuf, pattern: String },

    #[error("Class \"{0}\" does not exist")]
    ClassNotFound(String),

    #[error("Cannot introspect class \"{class}\": {reason}")]
    Introspection { class: String, reason: String },

    #[error("Cannot resolve source path of class \"{class}\" (got \"{path}\")")]
    SourcePathUnresolved { class: String, path: String },

    #[error("No \"{marker}\" directory found above \"{}\"", source_path.display())]
    TestRootNotFound { source_path: PathBuf, marker: String },

    #[error("Error while creating a directory at path \"{}\": {source}", path.display())]
    DirectoryCreationFailed {
        source: std::io::Error,
        path: PathBuf,
    },

    #[error("Error while writing \"{class}\" test file at path \"{}\": {source}", path.display())]
    WriteFailed {
        class: String,
        source: std::io::Error,
        path: PathBuf,
    },

    #[error("I/O error: {source} (path: {})", path.display())]
    Io {
        source: std::io::Error,
        path: PathBuf,
    },

    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    #[error("Render error: {0}")]
    Render(String),
}

impl From<std::fmt::Error> for SkeletonError {
    fn from(e: std::fmt::Error) -> Self {
        SkeletonError::Render(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SkeletonError>;

impl SkeletonError {
    pub(crate) fn io(source: std::io::Error, path: impl Into<PathBuf>) -> Self {
        Self::Io {
            source,
            path: path.into(),
        }
    }
}

// Allow `?` on std::io::Error by converting to SkeletonError::Io with unknown path.
impl From<std::io::Error> for SkeletonError {
    fn from(source: std::io::Error) -> Self {
        SkeletonError::Io {
            source,
            path: PathBuf::from("<unknown>"),
        }
    }
}

// Gracefully convert WalkDir errors
impl From<walkdir::Error> for SkeletonError {
    fn from(e: walkdir::Error) -> Self {
        let path = e.path().map_or_else(|| PathBuf::from("<unknown>"), PathBuf::from);
        match e.into_io_error() {
            Some(source) => SkeletonError::Io { source, path },
            None => SkeletonError::Io {
                source: std::io::Error::new(std::io::ErrorKind::Other, "filesystem loop"),
                path,
            },
        }
    }
}
