//! Deterministic in-memory dataset served whenever the backend is unreachable
//! or returns something unusable. Fallback-path mutations edit it in place,
//! so later reads in the same process observe them.

use serde_json::{json, Value};
use shared::{
    domain::{Applicant, DashboardStats, DomainCount, MonthlyCount, Project, User},
    protocol::{normalize_list, ApplicantWire, ProjectWire, UserWire, WireRecord},
};
use tracing::error;

use crate::stats::RECENT_APPLICANTS_LIMIT;

#[derive(Debug, Clone, PartialEq)]
pub struct FallbackData {
    pub applicants: Vec<Applicant>,
    pub users: Vec<User>,
    pub projects: Vec<Project>,
    pub dashboard: DashboardStats,
}

impl Default for FallbackData {
    fn default() -> Self {
        Self::fixture()
    }
}

impl FallbackData {
    pub fn new(
        applicants: Vec<Applicant>,
        users: Vec<User>,
        projects: Vec<Project>,
        dashboard: DashboardStats,
    ) -> Self {
        Self {
            applicants,
            users,
            projects,
            dashboard,
        }
    }

    pub fn fixture() -> Self {
        let applicants = decode::<ApplicantWire>(fixture_applicants());
        let users = decode::<UserWire>(fixture_users());
        let projects = decode::<ProjectWire>(fixture_projects());
        let dashboard = fixture_dashboard(&applicants);
        Self::new(applicants, users, projects, dashboard)
    }
}

fn decode<W: WireRecord>(records: Vec<Value>) -> Vec<W::Record> {
    match normalize_list::<W>(Value::Array(records)) {
        Ok(list) => {
            for err in &list.rejected {
                error!(entity = W::ENTITY, "fallback: fixture record failed to normalize: {err}");
            }
            list.records
        }
        Err(err) => {
            error!(entity = W::ENTITY, "fallback: fixture failed to normalize: {err}");
            Vec::new()
        }
    }
}

fn fixture_dashboard(applicants: &[Applicant]) -> DashboardStats {
    let domains = [
        ("Web Development", 78),
        ("Data Science", 56),
        ("Mobile Development", 42),
        ("UI/UX Design", 35),
        ("Machine Learning", 28),
        ("DevOps", 8),
    ];
    let months = [
        ("Aug", 45),
        ("Sep", 62),
        ("Oct", 78),
        ("Nov", 95),
        ("Dec", 112),
        ("Jan", 134),
    ];
    DashboardStats {
        total_applicants: 247,
        total_users: 1842,
        active_projects: 12,
        pending_applications: 34,
        monthly_growth: 23.5,
        domain_stats: domains
            .into_iter()
            .map(|(domain, count)| DomainCount {
                domain: domain.to_string(),
                count,
            })
            .collect(),
        monthly_applications: months
            .into_iter()
            .map(|(month, applications)| MonthlyCount {
                month: month.to_string(),
                applications,
            })
            .collect(),
        recent_applicants: applicants
            .iter()
            .take(RECENT_APPLICANTS_LIMIT)
            .cloned()
            .collect(),
    }
}

fn fixture_applicants() -> Vec<Value> {
    vec![
        json!({
            "id": "1", "name": "Rahul Sharma", "email": "rahul@gmail.com", "phone": "7049595389",
            "branch": "Computer Science", "modeOfInternship": "Remote",
            "college": "Sushila Devi Bansal College of Engineering",
            "specialization": "Salesforce Administration & Development", "passoutYear": "2024",
            "qualification": "BTech", "programmingLanguages": "HTML, CSS, JavaScript, Apex",
            "experience": "Fresher", "duration": "3 months", "status": "pending",
            "submittedAt": "2025-12-01T17:06:08.997+00:00", "linkedIn": "linkedin.com/in/rahul"
        }),
        json!({
            "id": "2", "name": "Priya Patel", "email": "priya@gmail.com", "phone": "9876543211",
            "branch": "Information Technology", "modeOfInternship": "Hybrid", "college": "NIT Trichy",
            "specialization": "Data Science", "passoutYear": "2024", "qualification": "BTech",
            "programmingLanguages": "Python, R, SQL", "experience": "Fresher",
            "duration": "6 months", "status": "approved",
            "submittedAt": "2025-11-28T10:30:00.000+00:00", "portfolio": "priya.dev"
        }),
        json!({
            "id": "3", "name": "Amit Kumar", "email": "amit@gmail.com", "phone": "9876543212",
            "branch": "Computer Science", "modeOfInternship": "On-site", "college": "BITS Pilani",
            "specialization": "Mobile Development", "passoutYear": "2025", "qualification": "BTech",
            "programmingLanguages": "Java, Kotlin, Swift", "experience": "1 year",
            "duration": "3 months", "status": "interview",
            "submittedAt": "2025-11-25T14:20:00.000+00:00"
        }),
        json!({
            "id": "4", "name": "Sneha Gupta", "email": "sneha@gmail.com", "phone": "9876543213",
            "branch": "Design", "modeOfInternship": "Remote", "college": "NID Ahmedabad",
            "specialization": "UI/UX Design", "passoutYear": "2024", "qualification": "BDes",
            "programmingLanguages": "Figma, Adobe XD", "experience": "Fresher",
            "duration": "2 months", "status": "pending",
            "submittedAt": "2025-11-20T09:15:00.000+00:00"
        }),
        json!({
            "id": "5", "name": "Vikram Singh", "email": "vikram@gmail.com", "phone": "9876543214",
            "branch": "Computer Science", "modeOfInternship": "Remote", "college": "IISc Bangalore",
            "specialization": "Machine Learning", "passoutYear": "2024", "qualification": "MTech",
            "programmingLanguages": "Python, TensorFlow, PyTorch", "experience": "2 years",
            "duration": "6 months", "status": "rejected",
            "submittedAt": "2025-11-18T11:45:00.000+00:00"
        }),
        json!({
            "id": "6", "name": "Ananya Reddy", "email": "ananya@gmail.com", "phone": "9876543215",
            "branch": "Information Technology", "modeOfInternship": "Hybrid", "college": "VIT Vellore",
            "specialization": "Cloud Computing", "passoutYear": "2025", "qualification": "BTech",
            "programmingLanguages": "AWS, Azure, Python", "experience": "Fresher",
            "duration": "3 months", "status": "approved",
            "submittedAt": "2025-11-15T16:30:00.000+00:00"
        }),
        json!({
            "id": "7", "name": "Karan Mehta", "email": "karan@gmail.com", "phone": "9876543216",
            "branch": "Computer Science", "modeOfInternship": "On-site", "college": "DTU Delhi",
            "specialization": "DevOps", "passoutYear": "2024", "qualification": "BTech",
            "programmingLanguages": "Docker, Kubernetes, Jenkins", "experience": "1 year",
            "duration": "4 months", "status": "pending",
            "submittedAt": "2025-11-10T08:00:00.000+00:00"
        }),
        json!({
            "id": "8", "name": "Pooja Verma", "email": "pooja@gmail.com", "phone": "9876543217",
            "branch": "Computer Science", "modeOfInternship": "Remote", "college": "IIIT Hyderabad",
            "specialization": "Cybersecurity", "passoutYear": "2025", "qualification": "BTech",
            "programmingLanguages": "Python, C++, Network Security", "experience": "Fresher",
            "duration": "3 months", "status": "interview",
            "submittedAt": "2025-11-05T13:20:00.000+00:00"
        }),
    ]
}

fn fixture_users() -> Vec<Value> {
    vec![
        json!({
            "id": "1", "name": "John Doe", "email": "john@example.com", "phone": "+91 9876543220",
            "status": "active", "role": "premium", "joinedAt": "2023-06-15", "lastActive": "2024-01-15"
        }),
        json!({
            "id": "2", "name": "Jane Smith", "email": "jane@example.com", "phone": "+91 9876543221",
            "status": "active", "role": "user", "joinedAt": "2023-08-20", "lastActive": "2024-01-14"
        }),
        json!({
            "id": "3", "name": "Mike Johnson", "email": "mike@example.com",
            "status": "inactive", "role": "user", "joinedAt": "2023-09-10", "lastActive": "2023-12-01"
        }),
        json!({
            "id": "4", "name": "Sarah Wilson", "email": "sarah@example.com", "phone": "+91 9876543222",
            "status": "blocked", "role": "user", "joinedAt": "2023-07-05"
        }),
        json!({
            "id": "5", "name": "Alex Brown", "email": "alex@example.com",
            "status": "active", "role": "premium", "joinedAt": "2023-10-12", "lastActive": "2024-01-15"
        }),
    ]
}

fn fixture_projects() -> Vec<Value> {
    vec![
        json!({
            "id": "1", "title": "E-Commerce Platform",
            "description": "Full-stack e-commerce solution with payment integration",
            "domain": "Web Development", "status": "active", "startDate": "2024-01-01",
            "technologies": ["React", "Node.js", "MongoDB", "Stripe"], "images": [], "teamSize": 5
        }),
        json!({
            "id": "2", "title": "AI Chatbot",
            "description": "Intelligent customer support chatbot using NLP",
            "domain": "Machine Learning", "status": "active", "startDate": "2023-12-15",
            "technologies": ["Python", "TensorFlow", "FastAPI"], "images": [], "teamSize": 3
        }),
        json!({
            "id": "3", "title": "Mobile Fitness App",
            "description": "Cross-platform fitness tracking application",
            "domain": "Mobile Development", "status": "completed", "startDate": "2023-10-01",
            "endDate": "2024-01-10", "technologies": ["React Native", "Firebase"], "images": [],
            "teamSize": 4
        }),
        json!({
            "id": "4", "title": "Cloud Infrastructure",
            "description": "Scalable cloud infrastructure setup with CI/CD",
            "domain": "DevOps", "status": "upcoming", "startDate": "2024-02-01",
            "technologies": ["AWS", "Terraform", "Jenkins"], "images": [], "teamSize": 2
        }),
    ]
}

#[cfg(test)]
mod tests {
    use shared::domain::{ApplicantStatus, ProjectStatus, UserStatus};

    use super::*;

    #[test]
    fn fixture_decodes_every_record() {
        let data = FallbackData::fixture();
        assert_eq!(data.applicants.len(), 8);
        assert_eq!(data.users.len(), 5);
        assert_eq!(data.projects.len(), 4);
        assert_eq!(data.dashboard.total_applicants, 247);
        assert_eq!(data.dashboard.recent_applicants.len(), 5);
        assert_eq!(data.dashboard.recent_applicants[0].name, "Rahul Sharma");
    }

    #[test]
    fn fixture_keeps_statuses_and_optional_fields() {
        let data = FallbackData::fixture();
        let statuses: Vec<ApplicantStatus> = data.applicants.iter().map(|a| a.status).collect();
        assert_eq!(
            statuses,
            vec![
                ApplicantStatus::Pending,
                ApplicantStatus::Approved,
                ApplicantStatus::Interview,
                ApplicantStatus::Pending,
                ApplicantStatus::Rejected,
                ApplicantStatus::Approved,
                ApplicantStatus::Pending,
                ApplicantStatus::Interview,
            ]
        );
        assert_eq!(data.users[2].phone, None);
        assert_eq!(data.users[3].status, UserStatus::Blocked);
        assert_eq!(data.users[3].last_active, None);
        assert_eq!(data.projects[2].status, ProjectStatus::Completed);
        assert!(data.projects[2].end_date.is_some());
        assert_eq!(data.projects[0].team_size, 5);
    }
}
