use std::sync::Arc;
use tracing::debug;

use super::ServiceError;
use crate::store::Store;
use crate::upcoming::{rank_upcoming, Clock, StatusClassifier, UpcomingEntry};

/// Upcoming maintenance across all of a user's assets
pub struct DashboardService {
    store: Arc<dyn Store>,
    clock: Arc<dyn Clock>,
    classifier: StatusClassifier,
}

impl DashboardService {
    pub fn new(store: Arc<dyn Store>, clock: Arc<dyn Clock>, classifier: StatusClassifier) -> Self {
        Self {
            store,
            clock,
            classifier,
        }
    }

    /// Latest forward-looking record per asset, classified against today and
    /// ordered most urgent first. Store failures propagate.
    pub async fn upcoming(&self, user_id: i32) -> Result<Vec<UpcomingEntry>, ServiceError> {
        let items = self.store.latest_upcoming(user_id).await?;
        let today = self.clock.today();
        debug!("Ranking {} upcoming items for user {} as of {}", items.len(), user_id, today);
        Ok(rank_upcoming(items, today, &self.classifier))
    }
}
