use reqwest::Method;
use serde_json::Value;
use shared::{
    domain::{
        Applicant, ApplicantId, ApplicantStatus, DashboardStats, Project, ProjectDraft, ProjectId,
        User, UserId, UserStatus,
    },
    error::AdminError,
    protocol::{
        normalize_list, normalize_one, ApplicantWire, ProjectWire, StatusUpdateRequest, UserWire,
        WireRecord,
    },
};
use tokio::sync::Mutex;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::{fallback::FallbackData, stats::dashboard_stats, transport::HttpTransport};

pub const APPLICANTS_PATH: &str = "/internship/all";
pub const USERS_PATH: &str = "/api/users";
pub const PROJECTS_PATH: &str = "/api/projects";

fn applicant_path(id: &ApplicantId) -> String {
    format!("/api/applicants/{id}")
}

fn user_path(id: &UserId) -> String {
    format!("/api/users/{id}")
}

fn project_path(id: &ProjectId) -> String {
    format!("/api/projects/{id}")
}

fn log_fallback(op: &'static str, err: &AdminError) {
    warn!(op, code = err.code().as_str(), "api: {err}; serving fallback data");
}

/// Normalizes a list read, dropping records that do not fit. Only a payload
/// that is not a list fails the call.
fn keep_normalized<W: WireRecord>(payload: Value) -> Result<Vec<W::Record>, AdminError> {
    let list = normalize_list::<W>(payload)?;
    for err in &list.rejected {
        warn!(entity = W::ENTITY, "api: skipping record: {err}");
    }
    Ok(list.records)
}

/// Remote identifier from a mutation response that did not normalize.
fn payload_id(payload: &Value) -> Option<String> {
    ["_id", "id"]
        .iter()
        .filter_map(|key| payload.get(key).and_then(Value::as_str))
        .find(|id| !id.is_empty())
        .map(str::to_string)
}

/// Typed operations over the backend. No operation surfaces a remote
/// failure: reads and writes that fail degrade to the fallback dataset.
pub struct ApiGateway {
    transport: HttpTransport,
    fallback: Mutex<FallbackData>,
}

impl ApiGateway {
    pub fn new(transport: HttpTransport, fallback: FallbackData) -> Self {
        Self {
            transport,
            fallback: Mutex::new(fallback),
        }
    }

    pub async fn fallback_snapshot(&self) -> FallbackData {
        self.fallback.lock().await.clone()
    }

    pub async fn get_dashboard_stats(&self) -> DashboardStats {
        match self.fetch_applicants().await {
            Ok(applicants) => dashboard_stats(&applicants),
            Err(err) => {
                log_fallback("get_dashboard_stats", &err);
                self.fallback.lock().await.dashboard.clone()
            }
        }
    }

    pub async fn get_applicants(&self) -> Vec<Applicant> {
        match self.fetch_applicants().await {
            Ok(applicants) => applicants,
            Err(err) => {
                log_fallback("get_applicants", &err);
                self.fallback.lock().await.applicants.clone()
            }
        }
    }

    /// Returns the updated record when one is known. A remote write whose
    /// response carries no record yields `None`.
    pub async fn update_applicant_status(
        &self,
        id: &ApplicantId,
        status: ApplicantStatus,
    ) -> Option<Applicant> {
        let request = StatusUpdateRequest { status };
        match self
            .transport
            .request_with_body(Method::PATCH, &applicant_path(id), &request)
            .await
        {
            Ok(payload) => normalize_one::<ApplicantWire>(payload)
                .map_err(|err| debug!(applicant = %id, "api: update response not a record: {err}"))
                .ok(),
            Err(err) => {
                log_fallback("update_applicant_status", &err);
                let mut fallback = self.fallback.lock().await;
                let applicant = fallback
                    .applicants
                    .iter_mut()
                    .find(|applicant| applicant.id == *id)?;
                applicant.status = status;
                Some(applicant.clone())
            }
        }
    }

    pub async fn delete_applicant(&self, id: &ApplicantId) {
        if let Err(err) = self
            .transport
            .request(Method::DELETE, &applicant_path(id))
            .await
        {
            log_fallback("delete_applicant", &err);
            self.fallback
                .lock()
                .await
                .applicants
                .retain(|applicant| applicant.id != *id);
        }
    }

    pub async fn get_users(&self) -> Vec<User> {
        let outcome = match self.transport.request(Method::GET, USERS_PATH).await {
            Ok(payload) => keep_normalized::<UserWire>(payload),
            Err(err) => Err(err),
        };
        match outcome {
            Ok(users) => users,
            Err(err) => {
                log_fallback("get_users", &err);
                self.fallback.lock().await.users.clone()
            }
        }
    }

    pub async fn update_user_status(&self, id: &UserId, status: UserStatus) -> Option<User> {
        let request = StatusUpdateRequest { status };
        match self
            .transport
            .request_with_body(Method::PATCH, &user_path(id), &request)
            .await
        {
            Ok(payload) => normalize_one::<UserWire>(payload)
                .map_err(|err| debug!(user = %id, "api: update response not a record: {err}"))
                .ok(),
            Err(err) => {
                log_fallback("update_user_status", &err);
                let mut fallback = self.fallback.lock().await;
                let user = fallback.users.iter_mut().find(|user| user.id == *id)?;
                user.status = status;
                Some(user.clone())
            }
        }
    }

    pub async fn get_projects(&self) -> Vec<Project> {
        let outcome = match self.transport.request(Method::GET, PROJECTS_PATH).await {
            Ok(payload) => keep_normalized::<ProjectWire>(payload),
            Err(err) => Err(err),
        };
        match outcome {
            Ok(projects) => projects,
            Err(err) => {
                log_fallback("get_projects", &err);
                self.fallback.lock().await.projects.clone()
            }
        }
    }

    /// Always yields the created project. When the backend accepts the write
    /// but echoes no usable record, the project is rebuilt from the draft.
    pub async fn create_project(&self, draft: &ProjectDraft) -> Project {
        match self
            .transport
            .request_with_body(Method::POST, PROJECTS_PATH, draft)
            .await
        {
            Ok(payload) => match normalize_one::<ProjectWire>(payload.clone()) {
                Ok(project) => project,
                Err(err) => {
                    debug!("api: create response not a record: {err}");
                    let id = payload_id(&payload).unwrap_or_else(|| Uuid::new_v4().to_string());
                    Project::from_draft(ProjectId(id), draft.clone())
                }
            },
            Err(err) => {
                log_fallback("create_project", &err);
                let project =
                    Project::from_draft(ProjectId(Uuid::new_v4().to_string()), draft.clone());
                self.fallback.lock().await.projects.push(project.clone());
                project
            }
        }
    }

    pub async fn update_project(&self, id: &ProjectId, draft: &ProjectDraft) -> Option<Project> {
        match self
            .transport
            .request_with_body(Method::PATCH, &project_path(id), draft)
            .await
        {
            Ok(payload) => normalize_one::<ProjectWire>(payload)
                .map_err(|err| debug!(project = %id, "api: update response not a record: {err}"))
                .ok(),
            Err(err) => {
                log_fallback("update_project", &err);
                let mut fallback = self.fallback.lock().await;
                let project = fallback
                    .projects
                    .iter_mut()
                    .find(|project| project.id == *id)?;
                project.apply_draft(draft);
                Some(project.clone())
            }
        }
    }

    pub async fn delete_project(&self, id: &ProjectId) {
        if let Err(err) = self
            .transport
            .request(Method::DELETE, &project_path(id))
            .await
        {
            log_fallback("delete_project", &err);
            self.fallback
                .lock()
                .await
                .projects
                .retain(|project| project.id != *id);
        }
    }

    async fn fetch_applicants(&self) -> Result<Vec<Applicant>, AdminError> {
        let payload = self.transport.request(Method::GET, APPLICANTS_PATH).await?;
        keep_normalized::<ApplicantWire>(payload)
    }
}
