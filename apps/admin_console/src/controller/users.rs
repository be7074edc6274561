use std::sync::Arc;

use async_trait::async_trait;
use client_core::ApiGateway;
use data_table::{Column, DataTable};
use shared::domain::{User, UserId, UserStatus};
use tracing::debug;

use super::{status_options, Screen, ScreenLifetime};

fn columns() -> Vec<Column<User>> {
    vec![
        Column::text("name", "User", |u: &User| u.name.clone()).sortable(),
        Column::text("email", "Email", |u: &User| u.email.clone()),
        Column::text("phone", "Phone", |u: &User| u.phone.clone())
            .render(|u| u.phone.clone().unwrap_or_else(|| "Not provided".to_string())),
        Column::text("role", "Role", |u: &User| u.role.as_str()),
        Column::date("joinedAt", "Joined", |u: &User| u.joined_at.to_string()).sortable(),
        Column::date("lastActive", "Last Active", |u: &User| {
            u.last_active.map(|date| date.to_string())
        })
        .render(|u| {
            u.last_active
                .map(|date| date.to_string())
                .unwrap_or_else(|| "Never".to_string())
        }),
        Column::text("status", "Status", |u: &User| u.status.as_str()),
    ]
}

pub struct UsersScreen {
    api: Arc<ApiGateway>,
    lifetime: ScreenLifetime,
    table: DataTable<User>,
}

impl UsersScreen {
    pub fn new(api: Arc<ApiGateway>, page_size: usize) -> Self {
        let table = DataTable::new(columns())
            .search_by("name", |u: &User| u.name.clone())
            .filter_by("status", status_options(UserStatus::ALL), |u: &User| {
                u.status.as_str().to_string()
            })
            .page_size(page_size);
        Self {
            api,
            lifetime: ScreenLifetime::new(),
            table,
        }
    }

    pub fn table(&self) -> &DataTable<User> {
        &self.table
    }

    pub fn table_mut(&mut self) -> &mut DataTable<User> {
        &mut self.table
    }

    pub fn find(&self, id: &UserId) -> Option<&User> {
        self.table.rows().iter().find(|user| user.id == *id)
    }

    /// Concurrent updates to one user are not serialized; the last one to
    /// return wins locally.
    pub async fn set_status(&mut self, id: &UserId, status: UserStatus) -> bool {
        self.api.update_user_status(id, status).await;
        if !self.lifetime.is_mounted() {
            debug!(screen = self.title(), user = %id, "dropping status update after unmount");
            return false;
        }
        self.table
            .update_where(|user| user.id == *id, |user| user.status = status)
            > 0
    }
}

#[async_trait]
impl Screen for UsersScreen {
    fn title(&self) -> &'static str {
        "Users"
    }

    fn lifetime(&self) -> &ScreenLifetime {
        &self.lifetime
    }

    async fn load(&mut self) {
        let users = self.api.get_users().await;
        if !self.lifetime.is_mounted() {
            debug!(screen = self.title(), "dropping response after unmount");
            return;
        }
        self.table.set_rows(users);
    }
}
