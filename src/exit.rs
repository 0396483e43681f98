// src/exit.rs
//! Standardized process exit codes for `utskel`.
//!
//! Provides a stable contract for scripts and automation.

use crate::error::SkeletonError;
use std::process::Termination;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum SkeletonExit {
    /// Operation completed successfully.
    Success = 0,
    /// Generic error (I/O, write, rendering).
    Error = 1,
    /// Input did not designate any usable class, or the event API was misused.
    InvalidInput = 2,
    /// A required configuration value is missing.
    Configuration = 3,
    /// A class could not be introspected.
    Introspection = 4,
    /// The test path could not be resolved or materialized.
    PathResolution = 5,
}

impl SkeletonExit {
    #[must_use]
    pub fn code(self) -> i32 {
        self as i32
    }
}

impl From<&SkeletonError> for SkeletonExit {
    fn from(err: &SkeletonError) -> Self {
        match err {
            SkeletonError::NoClassesFound { .. }
            | SkeletonError::ClassNotFound(_)
            | SkeletonError::InvalidArgument(_)
            | SkeletonError::InvalidCallback { .. } => Self::InvalidInput,
            SkeletonError::MissingConfiguration { .. } | SkeletonError::Regex(_) => {
                Self::Configuration
            }
            SkeletonError::Introspection { .. } => Self::Introspection,
            SkeletonError::SourcePathUnresolved { .. }
            | SkeletonError::TestRootNotFound { .. }
            | SkeletonError::DirectoryCreationFailed { .. } => Self::PathResolution,
            SkeletonError::WriteFailed { .. }
            | SkeletonError::Io { .. }
            | SkeletonError::Render(_) => Self::Error,
        }
    }
}

impl Termination for SkeletonExit {
    fn report(self) -> std::process::ExitCode {
        #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
        std::process::ExitCode::from(self.code() as u8)
    }
}

impl From<anyhow::Result<()>> for SkeletonExit {
    fn from(res: anyhow::Result<()>) -> Self {
        match res {
            Ok(()) => Self::Success,
            Err(e) => e
                .downcast_ref::<SkeletonError>()
                .map_or(Self::Error, Self::from),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_error_kinds_map_to_codes() {
        let missing = SkeletonError::ClassNotFound("Nope".into());
        assert_eq!(SkeletonExit::from(&missing).code(), 2);

        let root = SkeletonError::TestRootNotFound {
            source_path: PathBuf::from("/src/Foo.php"),
            marker: "test".into(),
        };
        assert_eq!(SkeletonExit::from(&root), SkeletonExit::PathResolution);
    }

    #[test]
    fn test_anyhow_result_conversion() {
        assert_eq!(SkeletonExit::from(Ok(())), SkeletonExit::Success);
        let err = anyhow::Error::new(SkeletonError::Introspection {
            class: "Foo".into(),
            reason: "class is not registered".into(),
        });
        assert_eq!(SkeletonExit::from(Err(err)), SkeletonExit::Introspection);
        assert_eq!(
            SkeletonExit::from(Err(anyhow::anyhow!("boom"))),
            SkeletonExit::Error
        );
    }
}
