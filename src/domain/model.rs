use std::{fmt, path::PathBuf};

use crate::cobalt::FormatDescriptor;

use super::AppError;

/// Inputs collected from the form for one download
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DownloadRequest {
    pub url: String,
    pub format: FormatChoice,
    pub output_dir: Option<PathBuf>,
}

impl DownloadRequest {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    pub fn with_format(mut self, format: FormatChoice) -> Self {
        self.format = format;
        self
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    /// The tool is never invoked for a blank URL
    pub fn validate(&self) -> Result<&str, AppError> {
        match self.url.trim() {
            "" => Err(AppError::EmptyUrl),
            url => Ok(url),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FormatChoice {
    /// Let the tool pick; no `--format` flag is passed
    #[default]
    Best,
    Specific(FormatDescriptor),
}

impl FormatChoice {
    pub fn format_id(&self) -> Option<&str> {
        match self {
            FormatChoice::Best => None,
            FormatChoice::Specific(format) => Some(&format.format_id),
        }
    }
}

impl fmt::Display for FormatChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatChoice::Best => f.write_str("Best quality (automatic)"),
            FormatChoice::Specific(format) => fmt::Display::fmt(format, f),
        }
    }
}

/// What the tool reported for a finished download
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadOutcome {
    pub success: bool,
    pub output: String,
}

impl DownloadOutcome {
    pub fn succeeded(output: impl Into<String>) -> Self {
        Self {
            success: true,
            output: output.into(),
        }
    }

    pub fn failed(output: impl Into<String>) -> Self {
        Self {
            success: false,
            output: output.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadPhase {
    Idle,
    FetchingFormats,
    Downloading,
    Completed,
    Failed,
}

impl DownloadPhase {
    pub fn is_busy(self) -> bool {
        matches!(self, DownloadPhase::FetchingFormats | DownloadPhase::Downloading)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate() {
        assert_eq!(DownloadRequest::new("").validate(), Err(AppError::EmptyUrl));
        assert_eq!(DownloadRequest::new(" \t ").validate(), Err(AppError::EmptyUrl));
        assert_eq!(
            DownloadRequest::new(" https://example.com/v ").validate(),
            Ok("https://example.com/v")
        );
    }

    #[test]
    fn test_format_choice_labels() {
        assert_eq!(FormatChoice::Best.to_string(), "Best quality (automatic)");
        assert_eq!(FormatChoice::Best.format_id(), None);

        let choice = FormatChoice::Specific(FormatDescriptor {
            format_id: "251".to_string(),
            quality: "audio".to_string(),
            ext: "webm".to_string(),
        });
        assert_eq!(choice.to_string(), "251 - audio - webm");
        assert_eq!(choice.format_id(), Some("251"));
    }
}
