use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    Success,
    Error,
}

/// A transient message for the notification banner. The client hides it
/// after `dismiss_after` seconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notice {
    pub message: String,
    pub kind: NoticeKind,
    pub dismiss_after: u32,
}

impl Notice {
    pub fn success(message: impl Into<String>, dismiss_after: u32) -> Self {
        Self {
            message: message.into(),
            kind: NoticeKind::Success,
            dismiss_after,
        }
    }

    pub fn error(message: impl Into<String>, dismiss_after: u32) -> Self {
        Self {
            message: message.into(),
            kind: NoticeKind::Error,
            dismiss_after,
        }
    }
}
