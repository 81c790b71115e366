use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Failure,
}

/// A short, non-blocking message for the user, the terminal version of a toast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    pub description: String,
}

impl Notice {
    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Info, title, description)
    }

    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Success, title, description)
    }

    pub fn failure(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Failure, title, description)
    }

    fn new(level: NoticeLevel, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            level,
            title: title.into(),
            description: description.into(),
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marker = match self.level {
            NoticeLevel::Info => "i",
            NoticeLevel::Success => "✓",
            NoticeLevel::Failure => "✗",
        };
        if self.description.is_empty() {
            write!(f, "{} {}", marker, self.title)
        } else {
            write!(f, "{} {}: {}", marker, self.title, self.description)
        }
    }
}
