//! User-facing output interfaces

use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InfoOptions {
    /// Clear the previous output before writing
    pub reset: bool,
}

/// Writes informational lines for the user
pub trait Messenger: Send + Sync {
    fn info(&self, message: &str, options: InfoOptions);
}

/// Image key attached to a desktop notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotifyImage {
    Success,
    Failed,
}

impl NotifyImage {
    pub fn from_status(passed: bool) -> Self {
        if passed {
            NotifyImage::Success
        } else {
            NotifyImage::Failed
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            NotifyImage::Success => "success",
            NotifyImage::Failed => "failed",
        }
    }
}

impl fmt::Display for NotifyImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sends desktop notifications
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str, title: &str, image: NotifyImage);
}
