use std::sync::Arc;

use async_trait::async_trait;
use client_core::ApiGateway;
use shared::domain::DashboardStats;
use tracing::debug;

use super::{Screen, ScreenLifetime};

pub struct DashboardScreen {
    api: Arc<ApiGateway>,
    lifetime: ScreenLifetime,
    stats: Option<DashboardStats>,
}

impl DashboardScreen {
    pub fn new(api: Arc<ApiGateway>) -> Self {
        Self {
            api,
            lifetime: ScreenLifetime::new(),
            stats: None,
        }
    }

    /// `None` until the first load completes.
    pub fn stats(&self) -> Option<&DashboardStats> {
        self.stats.as_ref()
    }
}

#[async_trait]
impl Screen for DashboardScreen {
    fn title(&self) -> &'static str {
        "Dashboard"
    }

    fn lifetime(&self) -> &ScreenLifetime {
        &self.lifetime
    }

    async fn load(&mut self) {
        let stats = self.api.get_dashboard_stats().await;
        if !self.lifetime.is_mounted() {
            debug!(screen = self.title(), "dropping response after unmount");
            return;
        }
        self.stats = Some(stats);
    }
}
