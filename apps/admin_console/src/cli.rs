use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use shared::domain::{ApplicantStatus, ProjectStatus, UserStatus};

#[derive(Parser, Debug)]
#[command(name = "admin_console", about = "Recruitment platform admin console")]
pub struct Cli {
    /// Backend base URL; overrides the settings file and environment.
    #[arg(long, global = true)]
    pub api_base_url: Option<String>,
    /// Directory holding the persisted session and token.
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,
    #[arg(long, global = true)]
    pub login_delay_ms: Option<u64>,
    #[arg(long, global = true)]
    pub page_size: Option<usize>,
    /// Print records as JSON instead of a table.
    #[arg(long, global = true)]
    pub json: bool,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    Login {
        #[arg(long, env = "ADMIN_EMAIL")]
        email: String,
        #[arg(long, env = "ADMIN_PASSWORD", hide_env_values = true)]
        password: String,
    },
    Logout,
    Whoami,
    #[command(subcommand)]
    Token(TokenCommand),
    Dashboard,
    #[command(subcommand)]
    Applicants(ApplicantsCommand),
    #[command(subcommand)]
    Users(UsersCommand),
    #[command(subcommand)]
    Projects(ProjectsCommand),
}

#[derive(Subcommand, Debug)]
pub enum TokenCommand {
    Set { token: String },
    Clear,
}

#[derive(Args, Debug, Clone, Default)]
pub struct ListArgs {
    #[arg(long)]
    pub search: Option<String>,
    /// Status value to filter on, or `all`.
    #[arg(long)]
    pub status: Option<String>,
    /// Column key to sort by.
    #[arg(long)]
    pub sort: Option<String>,
    #[arg(long, requires = "sort")]
    pub desc: bool,
    #[arg(long, default_value_t = 1)]
    pub page: usize,
}

#[derive(Subcommand, Debug)]
pub enum ApplicantsCommand {
    List(ListArgs),
    Show { id: String },
    SetStatus { id: String, status: ApplicantStatus },
    Delete { id: String },
}

#[derive(Subcommand, Debug)]
pub enum UsersCommand {
    List(ListArgs),
    Show { id: String },
    SetStatus { id: String, status: UserStatus },
}

#[derive(Args, Debug, Clone, Default)]
pub struct ProjectFields {
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub domain: Option<String>,
    #[arg(long)]
    pub status: Option<ProjectStatus>,
    #[arg(long)]
    pub start_date: Option<NaiveDate>,
    #[arg(long)]
    pub end_date: Option<NaiveDate>,
    #[arg(long)]
    pub team_size: Option<u32>,
    /// Technology to add; repeatable.
    #[arg(long = "tech")]
    pub add_tech: Vec<String>,
    /// Technology to remove; repeatable.
    #[arg(long = "remove-tech")]
    pub remove_tech: Vec<String>,
    #[arg(long = "image")]
    pub images: Vec<String>,
}

#[derive(Subcommand, Debug)]
pub enum ProjectsCommand {
    List(ListArgs),
    Create(ProjectFields),
    Update {
        id: String,
        #[command(flatten)]
        fields: ProjectFields,
    },
    Delete { id: String },
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_typed_status_and_dates() {
        let cli = Cli::try_parse_from([
            "admin_console",
            "projects",
            "create",
            "--title",
            "Ops Portal",
            "--start-date",
            "2024-03-01",
            "--status",
            "active",
            "--tech",
            "Rust",
            "--tech",
            "Tokio",
        ])
        .expect("parse");
        let Command::Projects(ProjectsCommand::Create(fields)) = cli.command else {
            panic!("unexpected command");
        };
        assert_eq!(fields.status, Some(ProjectStatus::Active));
        assert_eq!(fields.start_date, NaiveDate::from_ymd_opt(2024, 3, 1));
        assert_eq!(fields.add_tech, vec!["Rust", "Tokio"]);

        assert!(Cli::try_parse_from(["admin_console", "users", "set-status", "7", "archived"]).is_err());
    }
}
