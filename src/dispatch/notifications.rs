use super::{user_message, ActionState, Dispatcher};
use crate::models::Notification;

impl Dispatcher {
    pub async fn fetch_notifications(&mut self) -> &ActionState<Vec<Notification>> {
        self.state.notifications = ActionState::Loading;
        let result = match self.current_email() {
            Ok(email) => self
                .client
                .get_query::<Vec<Notification>>("/notifications", &[("email", email.as_str())], None)
                .await
                .map_err(|e| user_message(&e)),
            Err(message) => Err(message),
        };
        self.state.notifications.settle(result);
        &self.state.notifications
    }

    /// `PATCH /notifications/{id}/read`. A loaded notification list is
    /// updated in place so it does not need a refetch.
    pub async fn mark_notification_read(&mut self, id: u64) -> &ActionState<Notification> {
        self.state.marked_read = ActionState::Loading;
        let result = self
            .client
            .patch::<serde_json::Value, Notification>(
                &format!("/notifications/{}/read", id),
                None,
                None,
            )
            .await
            .map_err(|e| user_message(&e));

        if result.is_ok() {
            if let ActionState::Ready(list) = &mut self.state.notifications {
                for notification in list.iter_mut().filter(|n| n.id == id) {
                    notification.read = true;
                }
            }
        }

        self.state.marked_read.settle(result);
        &self.state.marked_read
    }

    pub fn unread_count(&self) -> usize {
        self.state
            .notifications
            .data()
            .map(|list| list.iter().filter(|n| !n.read).count())
            .unwrap_or(0)
    }
}
