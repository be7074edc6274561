use std::sync::Arc;

use async_trait::async_trait;
use client_core::ApiGateway;
use data_table::{Column, DataTable};
use shared::domain::{Applicant, ApplicantId, ApplicantStatus};
use tracing::debug;

use super::{status_options, Screen, ScreenLifetime};

pub const UNSPECIFIED_DOMAIN_LABEL: &str = "Not specified";

fn columns() -> Vec<Column<Applicant>> {
    vec![
        Column::text("name", "Applicant", |a: &Applicant| a.name.clone()).sortable(),
        Column::text("email", "Email", |a: &Applicant| a.email.clone()),
        Column::text("specialization", "Domain", |a: &Applicant| {
            a.specialization.clone()
        })
        .render(|a| {
            if a.specialization.trim().is_empty() {
                UNSPECIFIED_DOMAIN_LABEL.to_string()
            } else {
                a.specialization.clone()
            }
        }),
        Column::text("college", "College", |a: &Applicant| a.college.clone()),
        Column::number("passoutYear", "Passout", |a: &Applicant| {
            a.passout_year.clone()
        })
        .sortable(),
        Column::date("submittedAt", "Submitted", |a: &Applicant| {
            a.submitted_at.map(|ts| ts.to_rfc3339())
        })
        .sortable()
        .render(|a| {
            a.submitted_at
                .map(|ts| ts.format("%Y-%m-%d").to_string())
                .unwrap_or_else(|| "-".to_string())
        }),
        Column::text("status", "Status", |a: &Applicant| a.status.as_str()),
    ]
}

pub struct ApplicantsScreen {
    api: Arc<ApiGateway>,
    lifetime: ScreenLifetime,
    table: DataTable<Applicant>,
}

impl ApplicantsScreen {
    pub fn new(api: Arc<ApiGateway>, page_size: usize) -> Self {
        let table = DataTable::new(columns())
            .search_by("name", |a: &Applicant| a.name.clone())
            .filter_by("status", status_options(ApplicantStatus::ALL), |a: &Applicant| {
                a.status.as_str().to_string()
            })
            .page_size(page_size);
        Self {
            api,
            lifetime: ScreenLifetime::new(),
            table,
        }
    }

    pub fn table(&self) -> &DataTable<Applicant> {
        &self.table
    }

    pub fn table_mut(&mut self) -> &mut DataTable<Applicant> {
        &mut self.table
    }

    pub fn find(&self, id: &ApplicantId) -> Option<&Applicant> {
        self.table.rows().iter().find(|applicant| applicant.id == *id)
    }

    /// Returns whether the local row was patched.
    pub async fn set_status(&mut self, id: &ApplicantId, status: ApplicantStatus) -> bool {
        let echoed = self.api.update_applicant_status(id, status).await;
        if !self.lifetime.is_mounted() {
            debug!(screen = self.title(), applicant = %id, "dropping status update after unmount");
            return false;
        }
        let touched = self.table.update_where(
            |applicant| applicant.id == *id,
            |applicant| match &echoed {
                Some(record) => *applicant = record.clone(),
                None => applicant.status = status,
            },
        );
        touched > 0
    }

    pub async fn delete(&mut self, id: &ApplicantId) -> bool {
        self.api.delete_applicant(id).await;
        if !self.lifetime.is_mounted() {
            debug!(screen = self.title(), applicant = %id, "dropping delete after unmount");
            return false;
        }
        let before = self.table.rows().len();
        self.table.retain(|applicant| applicant.id != *id);
        self.table.rows().len() < before
    }
}

#[async_trait]
impl Screen for ApplicantsScreen {
    fn title(&self) -> &'static str {
        "Applicants"
    }

    fn lifetime(&self) -> &ScreenLifetime {
        &self.lifetime
    }

    async fn load(&mut self) {
        let applicants = self.api.get_applicants().await;
        if !self.lifetime.is_mounted() {
            debug!(screen = self.title(), "dropping response after unmount");
            return;
        }
        self.table.set_rows(applicants);
    }
}
