use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use client_core::ApiGateway;
use data_table::{Column, DataTable};
use shared::{
    domain::{Project, ProjectDraft, ProjectId, ProjectStatus},
    error::AdminError,
};
use tracing::debug;

use super::{status_options, Screen, ScreenLifetime};

pub const REQUIRED_FIELDS_MESSAGE: &str = "Please fill in all required fields";

/// Editable project dialog state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectForm {
    pub title: String,
    pub description: String,
    pub domain: String,
    pub status: ProjectStatus,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub technologies: Vec<String>,
    pub images: Vec<String>,
    pub team_size: u32,
}

impl Default for ProjectForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            domain: String::new(),
            status: ProjectStatus::Upcoming,
            start_date: None,
            end_date: None,
            technologies: Vec::new(),
            images: Vec::new(),
            team_size: 1,
        }
    }
}

impl ProjectForm {
    pub fn from_project(project: &Project) -> Self {
        Self {
            title: project.title.clone(),
            description: project.description.clone(),
            domain: project.domain.clone(),
            status: project.status,
            start_date: Some(project.start_date),
            end_date: project.end_date,
            technologies: project.technologies.clone(),
            images: project.images.clone(),
            team_size: project.team_size,
        }
    }

    /// Trims the entry; blanks and duplicates are ignored.
    pub fn add_technology(&mut self, raw: &str) -> bool {
        let tech = raw.trim();
        if tech.is_empty() || self.technologies.iter().any(|existing| existing == tech) {
            return false;
        }
        self.technologies.push(tech.to_string());
        true
    }

    pub fn remove_technology(&mut self, tech: &str) {
        self.technologies.retain(|existing| existing != tech.trim());
    }

    pub fn validate(&self) -> Result<ProjectDraft, AdminError> {
        let start_date = match self.start_date {
            Some(date) if !self.title.trim().is_empty() && !self.domain.trim().is_empty() => date,
            _ => return Err(AdminError::Validation(REQUIRED_FIELDS_MESSAGE.to_string())),
        };
        Ok(ProjectDraft {
            title: self.title.trim().to_string(),
            description: self.description.clone(),
            domain: self.domain.trim().to_string(),
            status: self.status,
            start_date,
            end_date: self.end_date,
            technologies: self.technologies.clone(),
            images: self.images.clone(),
            team_size: self.team_size.max(1),
        })
    }
}

fn columns() -> Vec<Column<Project>> {
    vec![
        Column::text("title", "Project", |p: &Project| p.title.clone()).sortable(),
        Column::text("domain", "Domain", |p: &Project| p.domain.clone()),
        Column::text("status", "Status", |p: &Project| p.status.as_str()),
        Column::date("startDate", "Start", |p: &Project| p.start_date.to_string()).sortable(),
        Column::date("endDate", "End", |p: &Project| p.end_date.map(|d| d.to_string())),
        Column::number("teamSize", "Team", |p: &Project| p.team_size).sortable(),
        Column::text("technologies", "Technologies", |p: &Project| p.technologies.join(", ")),
    ]
}

pub struct ProjectsScreen {
    api: Arc<ApiGateway>,
    lifetime: ScreenLifetime,
    table: DataTable<Project>,
    form: ProjectForm,
    editing: Option<ProjectId>,
}

impl ProjectsScreen {
    pub fn new(api: Arc<ApiGateway>, page_size: usize) -> Self {
        let table = DataTable::new(columns())
            .search_by("title", |p: &Project| p.title.clone())
            .filter_by("status", status_options(ProjectStatus::ALL), |p: &Project| {
                p.status.as_str().to_string()
            })
            .page_size(page_size);
        Self {
            api,
            lifetime: ScreenLifetime::new(),
            table,
            form: ProjectForm::default(),
            editing: None,
        }
    }

    pub fn table(&self) -> &DataTable<Project> {
        &self.table
    }

    pub fn table_mut(&mut self) -> &mut DataTable<Project> {
        &mut self.table
    }

    pub fn form(&self) -> &ProjectForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut ProjectForm {
        &mut self.form
    }

    pub fn editing(&self) -> Option<&ProjectId> {
        self.editing.as_ref()
    }

    pub fn open_create(&mut self) {
        self.form = ProjectForm::default();
        self.editing = None;
    }

    pub fn open_edit(&mut self, id: &ProjectId) -> Result<(), AdminError> {
        let project = self
            .table
            .rows()
            .iter()
            .find(|project| project.id == *id)
            .ok_or_else(|| AdminError::Validation(format!("no project with id '{id}'")))?;
        self.form = ProjectForm::from_project(project);
        self.editing = Some(id.clone());
        Ok(())
    }

    /// Validates the form, then creates or updates. `Ok(None)` means the
    /// screen was unmounted before the response arrived.
    pub async fn submit(&mut self) -> Result<Option<Project>, AdminError> {
        let draft = self.form.validate()?;

        let saved = match self.editing.clone() {
            Some(id) => {
                let echoed = self.api.update_project(&id, &draft).await;
                if !self.lifetime.is_mounted() {
                    debug!(screen = self.title(), project = %id, "dropping update after unmount");
                    return Ok(None);
                }
                self.table.update_where(
                    |project| project.id == id,
                    |project| match &echoed {
                        Some(record) => *project = record.clone(),
                        None => project.apply_draft(&draft),
                    },
                );
                self.table
                    .rows()
                    .iter()
                    .find(|project| project.id == id)
                    .cloned()
                    .or(echoed)
            }
            None => {
                let created = self.api.create_project(&draft).await;
                if !self.lifetime.is_mounted() {
                    debug!(screen = self.title(), "dropping create after unmount");
                    return Ok(None);
                }
                self.table.push(created.clone());
                Some(created)
            }
        };

        self.open_create();
        Ok(saved)
    }

    pub async fn delete(&mut self, id: &ProjectId) -> bool {
        self.api.delete_project(id).await;
        if !self.lifetime.is_mounted() {
            debug!(screen = self.title(), project = %id, "dropping delete after unmount");
            return false;
        }
        let before = self.table.rows().len();
        self.table.retain(|project| project.id != *id);
        self.table.rows().len() < before
    }
}

#[async_trait]
impl Screen for ProjectsScreen {
    fn title(&self) -> &'static str {
        "Projects"
    }

    fn lifetime(&self) -> &ScreenLifetime {
        &self.lifetime
    }

    async fn load(&mut self) {
        let projects = self.api.get_projects().await;
        if !self.lifetime.is_mounted() {
            debug!(screen = self.title(), "dropping response after unmount");
            return;
        }
        self.table.set_rows(projects);
    }
}
