use super::{user_message, ActionState, Dispatcher};
use crate::models::Task;

impl Dispatcher {
    /// Admin task board; the backend decides access from the role header.
    pub async fn fetch_admin_tasks(&mut self) -> &ActionState<Vec<Task>> {
        self.state.tasks = ActionState::Loading;
        let result = self
            .client
            .get::<Vec<Task>>("/admin/tasks", None)
            .await
            .map_err(|e| user_message(&e));
        self.state.tasks.settle(result);
        &self.state.tasks
    }
}
