//! User-triggered actions: one gateway call each, normalized into a view model
//! and written to the store.

use serde_json::Value;
use tracing::Instrument;
use uuid::Uuid;

use crate::agents::{
    study_plan_instruction, AgentRole, COLLABORATION_INSTRUCTION, SYNC_AND_PLAN_INSTRUCTION,
};
use crate::assemble::{assemble_collaboration, assemble_coordinator, assemble_study_plan};
use crate::error::DashboardError;
use crate::gateway::AgentGateway;
use crate::store::{DashboardStore, Slot, ViewUpdate};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    SyncAndPlan,
    StudyPlan,
    Collaboration,
}

impl Action {
    pub fn name(self) -> &'static str {
        match self {
            Action::SyncAndPlan => "sync_and_plan",
            Action::StudyPlan => "get_study_plan",
            Action::Collaboration => "get_collaboration",
        }
    }

    pub fn role(self) -> AgentRole {
        match self {
            Action::SyncAndPlan => AgentRole::AcademicCoordinator,
            Action::StudyPlan => AgentRole::StudyPlanner,
            Action::Collaboration => AgentRole::Collaboration,
        }
    }

    pub fn slot(self) -> Slot {
        match self {
            Action::SyncAndPlan => Slot::Coordinator,
            Action::StudyPlan => Slot::StudyPlan,
            Action::Collaboration => Slot::Collaboration,
        }
    }

    /// Shown when the agent reports failure without saying why.
    pub fn fallback_message(self) -> &'static str {
        match self {
            Action::SyncAndPlan => "Failed to sync data",
            Action::StudyPlan => "Failed to get study plan",
            Action::Collaboration => "Failed to get collaboration data",
        }
    }

    fn assemble(self, result: Value) -> Result<ViewUpdate, DashboardError> {
        match self {
            Action::SyncAndPlan => assemble_coordinator(result).map(ViewUpdate::Coordinator),
            Action::StudyPlan => assemble_study_plan(result).map(ViewUpdate::StudyPlan),
            Action::Collaboration => assemble_collaboration(result).map(ViewUpdate::Collaboration),
        }
    }
}

pub struct Dashboard<G> {
    gateway: G,
    store: DashboardStore,
}

impl<G: AgentGateway> Dashboard<G> {
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            store: DashboardStore::new(),
        }
    }

    pub fn store(&self) -> &DashboardStore {
        &self.store
    }

    pub async fn sync_and_plan(&self) -> Result<(), DashboardError> {
        self.run(Action::SyncAndPlan, SYNC_AND_PLAN_INSTRUCTION).await
    }

    pub async fn get_study_plan(&self, custom_message: Option<&str>) -> Result<(), DashboardError> {
        self.run(Action::StudyPlan, study_plan_instruction(custom_message))
            .await
    }

    pub async fn get_collaboration(&self) -> Result<(), DashboardError> {
        self.run(Action::Collaboration, COLLABORATION_INSTRUCTION)
            .await
    }

    /// Fires all three actions at once. Each one settles its own slot; the
    /// error slot ends up holding whichever failure landed last.
    pub async fn refresh_all(&self, custom_message: Option<&str>) -> Vec<DashboardError> {
        let (sync, plan, collab) = tokio::join!(
            self.sync_and_plan(),
            self.get_study_plan(custom_message),
            self.get_collaboration()
        );
        [sync, plan, collab]
            .into_iter()
            .filter_map(Result::err)
            .collect()
    }

    async fn run(&self, action: Action, instruction: &str) -> Result<(), DashboardError> {
        let action_id = Uuid::new_v4();
        let span = tracing::info_span!(
            "action",
            action = action.name(),
            agent = action.role().name(),
            %action_id
        );

        async {
            let ticket = self.store.begin(action.slot());
            let outcome = match self.fetch(action, instruction).await {
                Ok(result) => action.assemble(result),
                Err(err) => Err(err),
            };

            let settled = match outcome {
                Ok(update) => {
                    if self.store.commit(ticket, update) {
                        tracing::info!("view model updated");
                    }
                    Ok(())
                }
                Err(err) => {
                    tracing::warn!(error = %err, "action failed");
                    self.store.fail(ticket, err.user_message());
                    Err(err)
                }
            };

            tracing::debug!(loading = self.store.is_loading(), "action settled");
            settled
        }
        .instrument(span)
        .await
    }

    async fn fetch(&self, action: Action, instruction: &str) -> Result<Value, DashboardError> {
        let reply = self
            .gateway
            .invoke(instruction, action.role().agent_id())
            .await
            .map_err(|err| DashboardError::transport(&err))?;

        if !reply.is_success() {
            let message = reply
                .failure_message()
                .unwrap_or(action.fallback_message())
                .to_string();
            return Err(DashboardError::AgentFailure(message));
        }

        Ok(reply.response.result)
    }
}
