//! Per-entity view-models: each one loads through the gateway, keeps a table
//! engine over the result and patches it locally after a mutation.

use std::fmt::Display;

use async_trait::async_trait;
use data_table::FilterOption;

pub mod applicants;
pub mod dashboard;
pub mod lifetime;
pub mod projects;
pub mod users;

pub use applicants::ApplicantsScreen;
pub use dashboard::DashboardScreen;
pub use lifetime::ScreenLifetime;
pub use projects::{ProjectForm, ProjectsScreen};
pub use users::UsersScreen;

#[async_trait]
pub trait Screen: Send {
    fn title(&self) -> &'static str;

    fn lifetime(&self) -> &ScreenLifetime;

    /// Fetches the screen's data. A response arriving after unmount is dropped.
    async fn load(&mut self);

    fn unmount(&self) {
        self.lifetime().unmount();
    }
}

/// Filter dropdown entries for a closed status set, labelled in title case.
pub(crate) fn status_options<S: Display>(statuses: &[S]) -> Vec<FilterOption> {
    statuses
        .iter()
        .map(|status| {
            let value = status.to_string();
            FilterOption::new(value.clone(), title_case(&value))
        })
        .collect()
}

pub(crate) fn title_case(raw: &str) -> String {
    let mut chars = raw.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
