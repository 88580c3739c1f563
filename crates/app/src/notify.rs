//! User-facing prompts and notifications.
//!
//! The controllers never talk to a terminal or a screen directly. They ask a
//! [`Confirmer`] before confirmation-gated transitions and report outcomes to
//! a [`Notifier`].

use async_trait::async_trait;

/// The single message shown for any failed operation.
pub const GENERIC_FAILURE_MESSAGE: &str = "Đã có lỗi xảy ra, vui lòng thử lại.";

pub const STATUS_UPDATED_MESSAGE: &str = "Cập nhật trạng thái thành công.";

pub const DESIGN_CREATED_MESSAGE: &str = "Đã tạo thiết kế mới.";

/// Sink for user-visible outcome messages.
pub trait Notifier: Send + Sync {
    fn error(&self, message: &str);

    fn success(&self, message: &str);
}

/// Asks the user to accept a confirmation prompt.
#[async_trait]
pub trait Confirmer: Send + Sync {
    /// Returns `true` when the user accepts `prompt`.
    async fn confirm(&self, prompt: &str) -> bool;
}

/// Answers every prompt the same way without asking.
#[derive(Debug, Clone, Copy)]
pub struct AutoConfirm(pub bool);

#[async_trait]
impl Confirmer for AutoConfirm {
    async fn confirm(&self, prompt: &str) -> bool {
        tracing::debug!(prompt, answer = self.0, "Auto-answered confirmation prompt");
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn auto_confirm_answers_without_asking() {
        assert!(AutoConfirm(true).confirm("Revert to draft?").await);
        assert!(!AutoConfirm(false).confirm("Revert to draft?").await);
    }
}
