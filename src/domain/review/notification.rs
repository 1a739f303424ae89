use serde::{Deserialize, Serialize};

use crate::domain::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
}

/// User-facing outcome message for one action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
}

impl Notification {
    pub fn success(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn analysis_complete(product_count: usize) -> Self {
        let plural = if product_count > 1 { "s" } else { "" };
        Self::success(
            "Analysis Complete!",
            format!(
                "Successfully analyzed {} product{} from your CSV file.",
                product_count, plural
            ),
        )
    }

    pub fn exported(target: &str) -> Self {
        Self::success(
            "Exported Successfully!",
            format!("Your analysis has been saved as {}.", target),
        )
    }

    pub fn from_error(err: &AppError) -> Self {
        Self {
            kind: NotificationKind::Error,
            title: err.title().to_string(),
            message: err.to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.kind == NotificationKind::Success
    }
}
