//! Remote (wire) record shapes and the single normalization step that turns
//! them into internal records. Nothing downstream of this module sees a
//! loosely-typed payload.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;

use crate::{
    domain::{
        Applicant, ApplicantId, ApplicantStatus, Project, ProjectId, ProjectStatus, User,
        UserId, UserStatus, UserTier,
    },
    error::NormalizeError,
};

pub const DEFAULT_EXPERIENCE: &str = "Fresher";

/// A remote record shape with a mapping into its internal record.
pub trait WireRecord: DeserializeOwned {
    type Record;
    const ENTITY: &'static str;

    fn normalize(self) -> Result<Self::Record, NormalizeError>;
}

/// Outcome of normalizing a list payload record by record.
#[derive(Debug)]
pub struct NormalizedList<R> {
    pub records: Vec<R>,
    pub rejected: Vec<NormalizeError>,
}

/// Only a payload that is not an array fails as a whole; records that do not
/// normalize are set aside in `rejected` and the rest are kept in order.
pub fn normalize_list<W: WireRecord>(
    payload: Value,
) -> Result<NormalizedList<W::Record>, NormalizeError> {
    let Value::Array(items) = payload else {
        return Err(NormalizeError::NotAList { entity: W::ENTITY });
    };
    let mut list = NormalizedList {
        records: Vec::with_capacity(items.len()),
        rejected: Vec::new(),
    };
    for item in items {
        match normalize_one::<W>(item) {
            Ok(record) => list.records.push(record),
            Err(err) => list.rejected.push(err),
        }
    }
    Ok(list)
}

pub fn normalize_one<W: WireRecord>(payload: Value) -> Result<W::Record, NormalizeError> {
    let wire: W = serde_json::from_value(payload).map_err(|err| NormalizeError::Shape {
        entity: W::ENTITY,
        reason: err.to_string(),
    })?;
    wire.normalize()
}

#[derive(Debug, Clone, Serialize)]
pub struct StatusUpdateRequest<S> {
    pub status: S,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicantWire {
    #[serde(rename = "_id")]
    pub object_id: Option<String>,
    pub id: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<Value>,
    pub qualification: Option<String>,
    pub passout_year: Option<Value>,
    pub branch: Option<String>,
    pub mode_of_internship: Option<String>,
    pub submitted_at: Option<String>,
    pub preferred_domain: Option<String>,
    pub specialization: Option<String>,
    pub college: Option<String>,
    pub status: Option<String>,
    pub programming_languages: Option<Value>,
    pub experience: Option<String>,
    pub duration: Option<String>,
    #[serde(rename = "linkedIn")]
    pub linked_in: Option<String>,
    pub portfolio: Option<String>,
}

impl WireRecord for ApplicantWire {
    type Record = Applicant;
    const ENTITY: &'static str = "applicant";

    fn normalize(self) -> Result<Applicant, NormalizeError> {
        let id = record_id(Self::ENTITY, self.object_id, self.id)?;
        let status = match present(self.status) {
            Some(raw) => raw.parse::<ApplicantStatus>()?,
            None => ApplicantStatus::Pending,
        };
        let submitted_at = present(self.submitted_at)
            .map(|raw| parse_timestamp(Self::ENTITY, "submittedAt", &raw))
            .transpose()?;

        Ok(Applicant {
            id: ApplicantId(id),
            name: self.name.unwrap_or_default(),
            email: self.email.unwrap_or_default(),
            phone: loose_text(self.phone),
            qualification: present(self.qualification),
            passout_year: loose_text(self.passout_year),
            branch: present(self.branch),
            mode_of_internship: present(self.mode_of_internship),
            submitted_at,
            specialization: present(self.preferred_domain)
                .or_else(|| present(self.specialization))
                .unwrap_or_default(),
            college: present(self.college).unwrap_or_default(),
            status,
            programming_languages: loose_text(self.programming_languages).unwrap_or_default(),
            experience: present(self.experience)
                .unwrap_or_else(|| DEFAULT_EXPERIENCE.to_string()),
            duration: present(self.duration).unwrap_or_default(),
            linked_in: present(self.linked_in).unwrap_or_default(),
            portfolio: present(self.portfolio).unwrap_or_default(),
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserWire {
    #[serde(rename = "_id")]
    pub object_id: Option<String>,
    pub id: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<Value>,
    pub status: Option<String>,
    pub role: Option<String>,
    pub joined_at: Option<String>,
    pub last_active: Option<String>,
}

impl WireRecord for UserWire {
    type Record = User;
    const ENTITY: &'static str = "user";

    fn normalize(self) -> Result<User, NormalizeError> {
        let id = record_id(Self::ENTITY, self.object_id, self.id)?;
        let status = match present(self.status) {
            Some(raw) => raw.parse::<UserStatus>()?,
            None => UserStatus::Active,
        };
        let role = match present(self.role) {
            Some(raw) => raw.parse::<UserTier>()?,
            None => UserTier::User,
        };
        let joined_at = present(self.joined_at).ok_or(NormalizeError::MissingField {
            entity: Self::ENTITY,
            field: "joinedAt",
        })?;

        Ok(User {
            id: UserId(id),
            name: self.name.unwrap_or_default(),
            email: self.email.unwrap_or_default(),
            phone: loose_text(self.phone),
            status,
            role,
            joined_at: parse_date(Self::ENTITY, "joinedAt", &joined_at)?,
            last_active: present(self.last_active)
                .map(|raw| parse_date(Self::ENTITY, "lastActive", &raw))
                .transpose()?,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectWire {
    #[serde(rename = "_id")]
    pub object_id: Option<String>,
    pub id: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub domain: Option<String>,
    pub status: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default)]
    pub images: Vec<String>,
    pub team_size: Option<Value>,
}

impl WireRecord for ProjectWire {
    type Record = Project;
    const ENTITY: &'static str = "project";

    fn normalize(self) -> Result<Project, NormalizeError> {
        let id = record_id(Self::ENTITY, self.object_id, self.id)?;
        let title = present(self.title).ok_or(NormalizeError::MissingField {
            entity: Self::ENTITY,
            field: "title",
        })?;
        let status = match present(self.status) {
            Some(raw) => raw.parse::<ProjectStatus>()?,
            None => ProjectStatus::Upcoming,
        };
        let start_date = present(self.start_date).ok_or(NormalizeError::MissingField {
            entity: Self::ENTITY,
            field: "startDate",
        })?;

        Ok(Project {
            id: ProjectId(id),
            title,
            description: self.description.unwrap_or_default(),
            domain: self.domain.unwrap_or_default(),
            status,
            start_date: parse_date(Self::ENTITY, "startDate", &start_date)?,
            end_date: present(self.end_date)
                .map(|raw| parse_date(Self::ENTITY, "endDate", &raw))
                .transpose()?,
            technologies: self.technologies,
            images: self.images,
            team_size: self
                .team_size
                .as_ref()
                .and_then(loose_u32)
                .unwrap_or(1),
        })
    }
}

fn record_id(
    entity: &'static str,
    object_id: Option<String>,
    id: Option<String>,
) -> Result<String, NormalizeError> {
    present(object_id)
        .or_else(|| present(id))
        .ok_or(NormalizeError::MissingField { entity, field: "_id" })
}

/// Empty strings count as absent, matching how the backend leaves optional form fields.
fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn loose_text(value: Option<Value>) -> Option<String> {
    match value? {
        Value::String(text) => present(Some(text)),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Array(items) => {
            let parts: Vec<String> = items
                .into_iter()
                .filter_map(|item| loose_text(Some(item)))
                .collect();
            (!parts.is_empty()).then(|| parts.join(", "))
        }
        Value::Null | Value::Object(_) => None,
    }
}

fn loose_u32(value: &Value) -> Option<u32> {
    match value {
        Value::Number(number) => number.as_u64().and_then(|n| u32::try_from(n).ok()),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

fn parse_timestamp(
    entity: &'static str,
    field: &'static str,
    raw: &str,
) -> Result<DateTime<Utc>, NormalizeError> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Ok(parsed.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| NormalizeError::InvalidDate {
            entity,
            field,
            value: raw.to_string(),
        })
}

fn parse_date(
    entity: &'static str,
    field: &'static str,
    raw: &str,
) -> Result<NaiveDate, NormalizeError> {
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date);
    }
    parse_timestamp(entity, field, raw).map(|ts| ts.date_naive())
}
