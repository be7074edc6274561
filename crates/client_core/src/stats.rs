use std::collections::HashMap;

use shared::domain::{Applicant, ApplicantStatus, DashboardStats, DomainCount, MonthlyCount};

pub const RECENT_APPLICANTS_LIMIT: usize = 5;
/// Bucket for applicants with a blank specialization.
pub const UNCLASSIFIED_DOMAIN: &str = "Other";

/// Derives the dashboard from the live applicant list. User and project
/// totals are not served by the backend yet and stay at zero.
pub fn dashboard_stats(applicants: &[Applicant]) -> DashboardStats {
    let domain_stats = tally(applicants.iter().map(|applicant| {
        let domain = applicant.specialization.trim();
        if domain.is_empty() {
            UNCLASSIFIED_DOMAIN.to_string()
        } else {
            domain.to_string()
        }
    }))
    .into_iter()
    .map(|(domain, count)| DomainCount { domain, count })
    .collect();

    let monthly_applications = tally(
        applicants
            .iter()
            .filter_map(|applicant| applicant.submitted_at)
            .map(|submitted| submitted.format("%b").to_string()),
    )
    .into_iter()
    .map(|(month, applications)| MonthlyCount {
        month,
        applications,
    })
    .collect();

    DashboardStats {
        total_applicants: applicants.len(),
        total_users: 0,
        active_projects: 0,
        pending_applications: applicants
            .iter()
            .filter(|applicant| applicant.status == ApplicantStatus::Pending)
            .count(),
        monthly_growth: 0.0,
        domain_stats,
        monthly_applications,
        recent_applicants: applicants
            .iter()
            .take(RECENT_APPLICANTS_LIMIT)
            .cloned()
            .collect(),
    }
}

/// Counts keys, keeping the order in which each key first appeared.
fn tally(keys: impl Iterator<Item = String>) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    for key in keys {
        match index.get(&key) {
            Some(&slot) => counts[slot].1 += 1,
            None => {
                index.insert(key.clone(), counts.len());
                counts.push((key, 1));
            }
        }
    }
    counts
}
