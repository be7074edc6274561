use std::{fmt, str::FromStr};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }
    };
}

id_newtype!(AdminId);
id_newtype!(ApplicantId);
id_newtype!(UserId);
id_newtype!(ProjectId);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} value '{value}'")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

/// Closed string enumerations shared by the wire format, the CLI and table filters.
macro_rules! closed_enum {
    ($name:ident { $($variant:ident => $wire:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $wire),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = UnknownVariant;

            fn from_str(raw: &str) -> Result<Self, Self::Err> {
                match raw {
                    $($wire => Ok($name::$variant),)+
                    other => Err(UnknownVariant {
                        kind: stringify!($name),
                        value: other.to_string(),
                    }),
                }
            }
        }
    };
}

closed_enum!(AdminRole {
    SuperAdmin => "super_admin",
    Admin => "admin",
});

closed_enum!(ApplicantStatus {
    Pending => "pending",
    Approved => "approved",
    Interview => "interview",
    Rejected => "rejected",
});

closed_enum!(UserStatus {
    Active => "active",
    Inactive => "inactive",
    Blocked => "blocked",
});

closed_enum!(UserTier {
    Premium => "premium",
    User => "user",
});

closed_enum!(ProjectStatus {
    Active => "active",
    Completed => "completed",
    Upcoming => "upcoming",
});

/// The signed-in administrator. Never carries the password.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub id: AdminId,
    pub email: String,
    pub name: String,
    pub role: AdminRole,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Applicant {
    pub id: ApplicantId,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qualification: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passout_year: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode_of_internship: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submitted_at: Option<DateTime<Utc>>,
    pub specialization: String,
    pub college: String,
    pub status: ApplicantStatus,
    pub programming_languages: String,
    pub experience: String,
    pub duration: String,
    #[serde(rename = "linkedIn")]
    pub linked_in: String,
    pub portfolio: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub status: UserStatus,
    pub role: UserTier,
    pub joined_at: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_active: Option<NaiveDate>,
}

/// Project form contents: everything a project has except its identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDraft {
    pub title: String,
    pub description: String,
    pub domain: String,
    pub status: ProjectStatus,
    pub start_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    pub technologies: Vec<String>,
    pub images: Vec<String>,
    pub team_size: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: ProjectId,
    pub title: String,
    pub description: String,
    pub domain: String,
    pub status: ProjectStatus,
    pub start_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    pub technologies: Vec<String>,
    pub images: Vec<String>,
    pub team_size: u32,
}

impl Project {
    pub fn from_draft(id: ProjectId, draft: ProjectDraft) -> Self {
        Self {
            id,
            title: draft.title,
            description: draft.description,
            domain: draft.domain,
            status: draft.status,
            start_date: draft.start_date,
            end_date: draft.end_date,
            technologies: draft.technologies,
            images: draft.images,
            team_size: draft.team_size,
        }
    }

    /// Overwrites every editable field; the id is left alone.
    pub fn apply_draft(&mut self, draft: &ProjectDraft) {
        self.title = draft.title.clone();
        self.description = draft.description.clone();
        self.domain = draft.domain.clone();
        self.status = draft.status;
        self.start_date = draft.start_date;
        self.end_date = draft.end_date;
        self.technologies = draft.technologies.clone();
        self.images = draft.images.clone();
        self.team_size = draft.team_size;
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainCount {
    pub domain: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyCount {
    pub month: String,
    pub applications: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_applicants: usize,
    pub total_users: usize,
    pub active_projects: usize,
    pub pending_applications: usize,
    pub monthly_growth: f64,
    pub domain_stats: Vec<DomainCount>,
    pub monthly_applications: Vec<MonthlyCount>,
    pub recent_applicants: Vec<Applicant>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closed_enums_round_trip_their_wire_names() {
        assert_eq!("super_admin".parse::<AdminRole>(), Ok(AdminRole::SuperAdmin));
        assert_eq!(ApplicantStatus::Interview.as_str(), "interview");
        assert_eq!(
            serde_json::to_string(&UserStatus::Blocked).expect("json"),
            "\"blocked\""
        );
    }

    #[test]
    fn unknown_status_is_rejected() {
        let err = "archived".parse::<ProjectStatus>().expect_err("closed set");
        assert_eq!(err.kind, "ProjectStatus");
        assert_eq!(err.value, "archived");
    }

    #[test]
    fn principal_serializes_without_secret_fields() {
        let principal = Principal {
            id: AdminId::from("1"),
            email: "hradmin@cloudutility.in".to_string(),
            name: "HR Admin".to_string(),
            role: AdminRole::SuperAdmin,
        };
        let value = serde_json::to_value(&principal).expect("json");
        let object = value.as_object().expect("object");
        assert_eq!(object.len(), 4);
        assert!(!object.contains_key("password"));
        assert_eq!(object["role"], "super_admin");
    }

    #[test]
    fn apply_draft_keeps_project_id() {
        let draft = ProjectDraft {
            title: "Old".to_string(),
            description: String::new(),
            domain: "Web".to_string(),
            status: ProjectStatus::Upcoming,
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).expect("date"),
            end_date: None,
            technologies: vec![],
            images: vec![],
            team_size: 1,
        };
        let mut project = Project::from_draft(ProjectId::from("p-1"), draft.clone());
        let mut edited = draft;
        edited.title = "New".to_string();
        edited.status = ProjectStatus::Active;
        project.apply_draft(&edited);
        assert_eq!(project.id, ProjectId::from("p-1"));
        assert_eq!(project.title, "New");
        assert_eq!(project.status, ProjectStatus::Active);
    }
}
