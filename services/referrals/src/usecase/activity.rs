//! Activity recording and feed reads.
//!
//! Recording is observability, not transactional correctness: mutating
//! workflows call `execute_best_effort`, which never fails the caller.

use chrono::Utc;
use uuid::Uuid;

use enlace_domain::activity::ActivityAction;

use crate::domain::repository::ActivityLogRepository;
use crate::domain::types::ActivityEntry;
use crate::error::ReferralServiceError;

pub struct NewActivity {
    pub user_id: Uuid,
    pub action: ActivityAction,
    pub entity_type: String,
    pub entity_id: Option<Uuid>,
    pub description: Option<String>,
    pub metadata: Option<serde_json::Value>,
}

// ── RecordActivity ───────────────────────────────────────────────────────────

pub struct RecordActivityUseCase<A: ActivityLogRepository> {
    pub activity: A,
}

impl<A: ActivityLogRepository> RecordActivityUseCase<A> {
    pub async fn execute(&self, input: NewActivity) -> Result<(), ReferralServiceError> {
        let entry = ActivityEntry {
            id: Uuid::now_v7(),
            user_id: input.user_id,
            action: input.action,
            entity_type: input.entity_type,
            entity_id: input.entity_id,
            description: input.description,
            metadata: input.metadata,
            created_at: Utc::now(),
        };
        self.activity.append(&entry).await
    }

    /// Append, logging instead of failing. A lost audit row must never
    /// roll back the mutation that triggered it.
    pub async fn execute_best_effort(&self, input: NewActivity) {
        let action = input.action;
        if let Err(e) = self.execute(input).await {
            tracing::warn!(action = action.as_str(), error = %e, "failed to record activity");
        }
    }
}

// ── ListActivity ─────────────────────────────────────────────────────────────

pub struct ListActivityUseCase<A: ActivityLogRepository> {
    pub activity: A,
}

impl<A: ActivityLogRepository> ListActivityUseCase<A> {
    /// Newest-first feed, bounded by the caller-supplied `limit` only.
    pub async fn execute(
        &self,
        user_id: Uuid,
        limit: u64,
    ) -> Result<Vec<ActivityEntry>, ReferralServiceError> {
        self.activity.list_recent(user_id, limit).await
    }
}
