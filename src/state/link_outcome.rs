//! Result of processing one collected link
use std::fmt;
use std::path::PathBuf;

/// What happened to a single link during the processing phase
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkOutcome {
    /// Markdown was written to this path
    Saved { path: PathBuf },

    /// Every fetch attempt failed within the retry budget
    FetchFailed,

    /// Neither the selector, the heuristic nor `<body>` produced content
    NoContent,

    /// The link path is not below the start page's directory
    OutsideBase,

    /// The Markdown file could not be written
    WriteFailed { error: String },
}

impl LinkOutcome {
    /// Returns true if the link produced a file
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Saved { .. })
    }

    /// Returns true if the link was skipped because something went wrong
    pub fn is_error(&self) -> bool {
        !self.is_success()
    }

    /// Short machine-friendly label
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Saved { .. } => "saved",
            Self::FetchFailed => "fetch_failed",
            Self::NoContent => "no_content",
            Self::OutsideBase => "outside_base",
            Self::WriteFailed { .. } => "write_failed",
        }
    }
}

impl fmt::Display for LinkOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Saved { path } => write!(f, "saved to {}", path.display()),
            Self::WriteFailed { error } => write!(f, "write_failed: {}", error),
            other => write!(f, "{}", other.as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_success() {
        let saved = LinkOutcome::Saved {
            path: PathBuf::from("out/docs/a.md"),
        };
        assert!(saved.is_success());
        assert!(!saved.is_error());

        assert!(LinkOutcome::FetchFailed.is_error());
        assert!(LinkOutcome::NoContent.is_error());
        assert!(LinkOutcome::OutsideBase.is_error());
        assert!(LinkOutcome::WriteFailed {
            error: "disk full".to_string()
        }
        .is_error());
    }

    #[test]
    fn test_as_str() {
        assert_eq!(LinkOutcome::FetchFailed.as_str(), "fetch_failed");
        assert_eq!(LinkOutcome::NoContent.as_str(), "no_content");
        assert_eq!(LinkOutcome::OutsideBase.as_str(), "outside_base");
    }

    #[test]
    fn test_display() {
        let saved = LinkOutcome::Saved {
            path: PathBuf::from("out/a.md"),
        };
        assert_eq!(format!("{}", saved), "saved to out/a.md");
        let failed = LinkOutcome::WriteFailed {
            error: "permission denied".to_string(),
        };
        assert_eq!(format!("{}", failed), "write_failed: permission denied");
        assert_eq!(format!("{}", LinkOutcome::NoContent), "no_content");
    }
}
