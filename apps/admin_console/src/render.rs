//! Plain-text views printed by the console.

use data_table::{DataTable, SortDirection};
use shared::domain::{Applicant, DashboardStats, Principal, Project, User};

use crate::controller::applicants::UNSPECIFIED_DOMAIN_LABEL;

pub fn table<R>(table: &DataTable<R>) -> String {
    let headers: Vec<String> = table.headers().into_iter().map(str::to_string).collect();
    let rows: Vec<Vec<String>> = table
        .page_rows()
        .into_iter()
        .map(|row| table.render_row(row))
        .collect();

    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut lines = Vec::with_capacity(rows.len() + 3);
    lines.push(format_row(&headers, &widths));
    lines.push(
        widths
            .iter()
            .map(|width| "-".repeat(*width))
            .collect::<Vec<_>>()
            .join("-+-"),
    );
    if rows.is_empty() {
        lines.push("(no matching records)".to_string());
    }
    for row in &rows {
        lines.push(format_row(row, &widths));
    }

    let state = table.state();
    let mut footer = format!(
        "page {}/{}, {} of {} records",
        state.current_page,
        table.page_count(),
        table.filtered_count(),
        table.rows().len()
    );
    if !state.search_query.is_empty() {
        footer.push_str(&format!(", search '{}'", state.search_query));
    }
    if let Some(key) = state.sort_key {
        let direction = match state.sort_direction {
            SortDirection::Ascending => "asc",
            SortDirection::Descending => "desc",
        };
        footer.push_str(&format!(", sorted by {key} {direction}"));
    }
    lines.push(footer);
    lines.join("\n")
}

fn format_row(cells: &[String], widths: &[usize]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join(" | ")
        .trim_end()
        .to_string()
}

pub fn dashboard(stats: &DashboardStats) -> String {
    let mut lines = vec![
        format!("Total applicants:     {}", stats.total_applicants),
        format!("Total users:          {}", stats.total_users),
        format!("Active projects:      {}", stats.active_projects),
        format!("Pending applications: {}", stats.pending_applications),
        format!("Monthly growth:       {}%", stats.monthly_growth),
        String::new(),
        "Applications by domain".to_string(),
    ];
    lines.extend(
        stats
            .domain_stats
            .iter()
            .map(|entry| format!("  {:<40} {}", entry.domain, entry.count)),
    );
    lines.push(String::new());
    lines.push("Applications by month".to_string());
    lines.extend(
        stats
            .monthly_applications
            .iter()
            .map(|entry| format!("  {:<5} {}", entry.month, entry.applications)),
    );
    lines.push(String::new());
    lines.push("Recent applicants".to_string());
    lines.extend(stats.recent_applicants.iter().map(|applicant| {
        format!(
            "  {} <{}> {}",
            applicant.name, applicant.email, applicant.status
        )
    }));
    lines.join("\n")
}

fn field(label: &str, value: impl AsRef<str>) -> String {
    let value = value.as_ref();
    format!("{label:<20} {}", if value.is_empty() { "-" } else { value })
}

pub fn applicant(applicant: &Applicant) -> String {
    let specialization = if applicant.specialization.trim().is_empty() {
        UNSPECIFIED_DOMAIN_LABEL
    } else {
        applicant.specialization.as_str()
    };
    [
        field("ID", applicant.id.as_str()),
        field("Name", &applicant.name),
        field("Email", &applicant.email),
        field("Phone", applicant.phone.as_deref().unwrap_or_default()),
        field("Qualification", applicant.qualification.as_deref().unwrap_or_default()),
        field("Branch", applicant.branch.as_deref().unwrap_or_default()),
        field("Passout year", applicant.passout_year.as_deref().unwrap_or_default()),
        field("College", &applicant.college),
        field("Specialization", specialization),
        field("Mode", applicant.mode_of_internship.as_deref().unwrap_or_default()),
        field("Duration", &applicant.duration),
        field("Experience", &applicant.experience),
        field("Languages", &applicant.programming_languages),
        field("LinkedIn", &applicant.linked_in),
        field("Portfolio", &applicant.portfolio),
        field("Status", applicant.status.as_str()),
        field(
            "Submitted",
            applicant
                .submitted_at
                .map(|ts| ts.to_rfc3339())
                .unwrap_or_default(),
        ),
    ]
    .join("\n")
}

pub fn user(user: &User) -> String {
    [
        field("ID", user.id.as_str()),
        field("Name", &user.name),
        field("Email", &user.email),
        field("Phone", user.phone.as_deref().unwrap_or("Not provided")),
        field("Role", user.role.as_str()),
        field("Status", user.status.as_str()),
        field("Joined", user.joined_at.to_string()),
        field(
            "Last active",
            user.last_active
                .map(|date| date.to_string())
                .unwrap_or_else(|| "Never".to_string()),
        ),
    ]
    .join("\n")
}

pub fn project(project: &Project) -> String {
    [
        field("ID", project.id.as_str()),
        field("Title", &project.title),
        field("Description", &project.description),
        field("Domain", &project.domain),
        field("Status", project.status.as_str()),
        field("Start", project.start_date.to_string()),
        field(
            "End",
            project.end_date.map(|d| d.to_string()).unwrap_or_default(),
        ),
        field("Team size", project.team_size.to_string()),
        field("Technologies", project.technologies.join(", ")),
    ]
    .join("\n")
}

pub fn principal(principal: &Principal) -> String {
    format!(
        "{} <{}> ({}, id {})",
        principal.name, principal.email, principal.role, principal.id
    )
}
