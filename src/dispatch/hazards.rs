use super::{user_message, ActionState, Dispatcher};
use crate::models::{HazardReport, NewHazardReport, Severity};

#[derive(Debug, Clone)]
pub struct HazardDraft {
    pub location: String,
    pub hazard_type: String,
    pub description: String,
    pub severity: Severity,
}

impl HazardDraft {
    fn validate(&self) -> Result<(), String> {
        if self.location.trim().is_empty() {
            return Err("Location is required.".to_string());
        }
        if self.hazard_type.trim().is_empty() {
            return Err("Hazard type is required.".to_string());
        }
        Ok(())
    }
}

impl Dispatcher {
    pub async fn submit_hazard(&mut self, draft: HazardDraft) -> &ActionState<HazardReport> {
        self.state.hazard = ActionState::Loading;

        let result = match draft.validate().and_then(|()| self.current_email()) {
            Ok(email) => {
                let report = NewHazardReport {
                    location: draft.location.trim().to_string(),
                    hazard_type: draft.hazard_type.trim().to_string(),
                    description: draft.description.trim().to_string(),
                    severity: draft.severity,
                    email,
                };
                self.client
                    .post::<_, HazardReport>("/hazards", &report, None)
                    .await
                    .map_err(|e| user_message(&e))
            }
            Err(message) => Err(message),
        };

        self.state.hazard.settle(result);
        &self.state.hazard
    }
}
