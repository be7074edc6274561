use std::sync::Arc;

use anyhow::{Context, Result};
use client_core::{config, AdminClient, Settings};
use data_table::{DataTable, FilterValue};
use serde::Serialize;
use shared::{
    domain::{ApplicantId, ProjectId, UserId},
    error::AdminError,
};
use tracing::info;

use crate::{
    cli::{ApplicantsCommand, Cli, Command, ListArgs, ProjectFields, ProjectsCommand, TokenCommand, UsersCommand},
    controller::{
        ApplicantsScreen, DashboardScreen, ProjectForm, ProjectsScreen, Screen, UsersScreen,
    },
    render,
};

/// Settings file and environment first, then command-line flags on top.
pub fn resolve_settings(cli: &Cli, mut settings: Settings) -> Result<Settings> {
    if let Some(url) = &cli.api_base_url {
        settings.api_base_url = url.clone();
    }
    if let Some(dir) = &cli.data_dir {
        settings.data_dir = Some(dir.clone());
    }
    if let Some(delay) = cli.login_delay_ms {
        settings.login_delay_ms = delay;
    }
    if let Some(page_size) = cli.page_size {
        settings.page_size = page_size.max(1);
    }
    config::parse_base_url(&settings.api_base_url)?;
    Ok(settings)
}

pub async fn run(cli: Cli, settings: Settings) -> Result<()> {
    let client = AdminClient::from_settings(&settings)?;
    let page_size = settings.page_size;
    let json = cli.json;

    match cli.command {
        Command::Login { email, password } => {
            let principal = client.session.login(&email, &password).await?;
            println!("Signed in as {}", render::principal(&principal));
        }
        Command::Logout => {
            client.session.logout();
            println!("Signed out");
        }
        Command::Whoami => match client.session.current() {
            Some(principal) => println!("{}", render::principal(&principal)),
            None => println!("Not signed in"),
        },
        Command::Token(TokenCommand::Set { token }) => {
            client.session.set_token(&token).context("failed to store bearer token")?;
            println!("Bearer token stored");
        }
        Command::Token(TokenCommand::Clear) => {
            client.session.clear_token().context("failed to clear bearer token")?;
            println!("Bearer token cleared");
        }
        Command::Dashboard => {
            client.session.require_principal()?;
            let mut screen = DashboardScreen::new(Arc::clone(&client.api));
            screen.load().await;
            if let Some(stats) = screen.stats() {
                print_or_json(json, stats, render::dashboard)?;
            }
        }
        Command::Applicants(command) => {
            client.session.require_principal()?;
            let mut screen = ApplicantsScreen::new(Arc::clone(&client.api), page_size);
            screen.load().await;
            applicants(&mut screen, command, json).await?;
        }
        Command::Users(command) => {
            client.session.require_principal()?;
            let mut screen = UsersScreen::new(Arc::clone(&client.api), page_size);
            screen.load().await;
            users(&mut screen, command, json).await?;
        }
        Command::Projects(command) => {
            client.session.require_principal()?;
            let mut screen = ProjectsScreen::new(Arc::clone(&client.api), page_size);
            screen.load().await;
            projects(&mut screen, command, json).await?;
        }
    }
    Ok(())
}

async fn applicants(screen: &mut ApplicantsScreen, command: ApplicantsCommand, json: bool) -> Result<()> {
    match command {
        ApplicantsCommand::List(args) => {
            apply_list_args(screen.table_mut(), &args)?;
            print_list(json, screen.table())?;
        }
        ApplicantsCommand::Show { id } => {
            let id = ApplicantId(id);
            let applicant = screen.find(&id).ok_or_else(|| not_found("applicant", &id))?;
            print_or_json(json, applicant, render::applicant)?;
        }
        ApplicantsCommand::SetStatus { id, status } => {
            let id = ApplicantId(id);
            if !screen.set_status(&id, status).await {
                return Err(not_found("applicant", &id).into());
            }
            info!(applicant = %id, status = %status, "applicant status changed");
            println!("Applicant status updated to {status}");
        }
        ApplicantsCommand::Delete { id } => {
            let id = ApplicantId(id);
            if !screen.delete(&id).await {
                return Err(not_found("applicant", &id).into());
            }
            println!("Applicant deleted");
        }
    }
    Ok(())
}

async fn users(screen: &mut UsersScreen, command: UsersCommand, json: bool) -> Result<()> {
    match command {
        UsersCommand::List(args) => {
            apply_list_args(screen.table_mut(), &args)?;
            print_list(json, screen.table())?;
        }
        UsersCommand::Show { id } => {
            let id = UserId(id);
            let user = screen.find(&id).ok_or_else(|| not_found("user", &id))?;
            print_or_json(json, user, render::user)?;
        }
        UsersCommand::SetStatus { id, status } => {
            let id = UserId(id);
            if !screen.set_status(&id, status).await {
                return Err(not_found("user", &id).into());
            }
            info!(user = %id, status = %status, "user status changed");
            println!("User status updated to {status}");
        }
    }
    Ok(())
}

async fn projects(screen: &mut ProjectsScreen, command: ProjectsCommand, json: bool) -> Result<()> {
    match command {
        ProjectsCommand::List(args) => {
            apply_list_args(screen.table_mut(), &args)?;
            print_list(json, screen.table())?;
        }
        ProjectsCommand::Create(fields) => {
            screen.open_create();
            apply_project_fields(screen.form_mut(), &fields);
            if let Some(project) = screen.submit().await? {
                println!("Project created");
                print_or_json(json, &project, render::project)?;
            }
        }
        ProjectsCommand::Update { id, fields } => {
            screen.open_edit(&ProjectId(id))?;
            apply_project_fields(screen.form_mut(), &fields);
            if let Some(project) = screen.submit().await? {
                println!("Project updated");
                print_or_json(json, &project, render::project)?;
            }
        }
        ProjectsCommand::Delete { id } => {
            let id = ProjectId(id);
            if !screen.delete(&id).await {
                return Err(not_found("project", &id).into());
            }
            println!("Project deleted");
        }
    }
    Ok(())
}

pub fn apply_list_args<R>(table: &mut DataTable<R>, args: &ListArgs) -> Result<()> {
    if let Some(status) = &args.status {
        table.set_filter(FilterValue::parse(status))?;
    }
    if let Some(query) = &args.search {
        table.set_search(query.as_str());
    }
    if let Some(key) = &args.sort {
        table.set_sort(key)?;
        if args.desc {
            table.set_sort(key)?;
        }
    }
    table.set_page(args.page);
    Ok(())
}

pub fn apply_project_fields(form: &mut ProjectForm, fields: &ProjectFields) {
    if let Some(title) = &fields.title {
        form.title = title.clone();
    }
    if let Some(description) = &fields.description {
        form.description = description.clone();
    }
    if let Some(domain) = &fields.domain {
        form.domain = domain.clone();
    }
    if let Some(status) = fields.status {
        form.status = status;
    }
    if let Some(start_date) = fields.start_date {
        form.start_date = Some(start_date);
    }
    if let Some(end_date) = fields.end_date {
        form.end_date = Some(end_date);
    }
    if let Some(team_size) = fields.team_size {
        form.team_size = team_size;
    }
    for tech in &fields.add_tech {
        form.add_technology(tech);
    }
    for tech in &fields.remove_tech {
        form.remove_technology(tech);
    }
    form.images.extend(fields.images.iter().cloned());
}

fn not_found(entity: &str, id: &impl std::fmt::Display) -> AdminError {
    AdminError::Validation(format!("no {entity} with id '{id}'"))
}

fn print_list<R: Serialize>(json: bool, table: &DataTable<R>) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&table.page_rows())?);
    } else {
        println!("{}", render::table(table));
    }
    Ok(())
}

fn print_or_json<T: Serialize>(json: bool, value: &T, render: fn(&T) -> String) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        println!("{}", render(value));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use clap::Parser;
    use client_core::{ApiGateway, FallbackData, HttpTransport};
    use shared::domain::{ApplicantStatus, UserStatus};
    use storage::MemoryStore;

    use super::*;

    async fn offline_api() -> Arc<ApiGateway> {
        std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("addr");
        drop(listener);
        let transport = HttpTransport::new(
            &format!("http://{addr}"),
            Duration::from_secs(5),
            Arc::new(MemoryStore::new()),
        )
        .expect("transport");
        Arc::new(ApiGateway::new(transport, FallbackData::fixture()))
    }

    fn validation_message(err: &anyhow::Error) -> Option<String> {
        match err.downcast_ref::<AdminError>() {
            Some(AdminError::Validation(message)) => Some(message.clone()),
            _ => None,
        }
    }

    #[tokio::test]
    async fn unknown_ids_are_reported_not_found() {
        let api = offline_api().await;

        let mut applicants = ApplicantsScreen::new(Arc::clone(&api), 10);
        applicants.load().await;
        let err = super::applicants(
            &mut applicants,
            ApplicantsCommand::SetStatus {
                id: "nope".into(),
                status: ApplicantStatus::Approved,
            },
            false,
        )
        .await
        .expect_err("unknown applicant");
        assert_eq!(
            validation_message(&err).as_deref(),
            Some("no applicant with id 'nope'")
        );
        let err = super::applicants(&mut applicants, ApplicantsCommand::Delete { id: "nope".into() }, false)
            .await
            .expect_err("unknown applicant");
        assert!(validation_message(&err).is_some());
        assert_eq!(applicants.table().rows().len(), 8);

        let mut users = UsersScreen::new(Arc::clone(&api), 10);
        users.load().await;
        let err = super::users(
            &mut users,
            UsersCommand::SetStatus {
                id: "nope".into(),
                status: UserStatus::Blocked,
            },
            false,
        )
        .await
        .expect_err("unknown user");
        assert_eq!(validation_message(&err).as_deref(), Some("no user with id 'nope'"));

        let mut projects = ProjectsScreen::new(Arc::clone(&api), 10);
        projects.load().await;
        let err = super::projects(&mut projects, ProjectsCommand::Delete { id: "nope".into() }, false)
            .await
            .expect_err("unknown project");
        assert_eq!(validation_message(&err).as_deref(), Some("no project with id 'nope'"));
        assert_eq!(projects.table().rows().len(), 4);
    }

    #[tokio::test]
    async fn known_ids_are_applied() {
        let api = offline_api().await;
        let mut applicants = ApplicantsScreen::new(Arc::clone(&api), 10);
        applicants.load().await;
        super::applicants(
            &mut applicants,
            ApplicantsCommand::SetStatus {
                id: "3".into(),
                status: ApplicantStatus::Rejected,
            },
            false,
        )
        .await
        .expect("known applicant");
        assert_eq!(
            applicants.find(&ApplicantId::from("3")).map(|a| a.status),
            Some(ApplicantStatus::Rejected)
        );
    }

    #[test]
    fn flags_override_loaded_settings() {
        let cli = Cli::parse_from([
            "admin_console",
            "--api-base-url",
            "http://localhost:4000",
            "--page-size",
            "0",
            "whoami",
        ]);
        let settings = resolve_settings(&cli, Settings::default()).expect("settings");
        assert_eq!(settings.api_base_url, "http://localhost:4000");
        assert_eq!(settings.page_size, 1);
        assert_eq!(settings.login_delay_ms, 1000);
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let cli = Cli::parse_from(["admin_console", "--api-base-url", "ftp://x", "whoami"]);
        assert!(resolve_settings(&cli, Settings::default()).is_err());
    }

    #[test]
    fn project_fields_fill_the_form() {
        let mut form = ProjectForm::default();
        let fields = ProjectFields {
            title: Some("Ops Portal".into()),
            domain: Some("DevOps".into()),
            add_tech: vec![" Rust ".into(), "Rust".into(), "Go".into()],
            remove_tech: vec!["Go".into()],
            ..ProjectFields::default()
        };
        apply_project_fields(&mut form, &fields);
        assert_eq!(form.title, "Ops Portal");
        assert_eq!(form.technologies, vec!["Rust"]);
        assert!(form.validate().is_err(), "start date still missing");
    }
}
