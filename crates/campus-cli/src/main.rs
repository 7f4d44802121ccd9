//! `campus`: command-line browser for the campus CMS.
//!
//! # Usage
//!
//! ```
//! campus --url http://127.0.0.1:8080 notices --search exam --filter important=true
//! campus projects --filter department=CST --sort title --asc
//! campus academic --department cst --session 2024-25 --semester 4
//! campus --config ~/.config/campus/cli.toml contacts
//! ```

mod client;
mod view;

use anyhow::{Context, Result};
use campus_core::{
  academic::AcademicResource, contact::ContactMessage, notice::Notice, pipeline::QueryFor,
  project::Project, study_material::StudyMaterial,
};
use clap::{Parser, Subcommand};
use client::ApiClient;
use serde::Deserialize;
use tracing_subscriber::EnvFilter;
use view::ListArgs;

const DEFAULT_URL: &str = "http://127.0.0.1:8080";

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "campus", about = "Browse the campus CMS from the terminal")]
struct Args {
  /// Path to a TOML config file (url).
  #[arg(short, long, value_name = "FILE")]
  config: Option<std::path::PathBuf>,

  /// Base URL of the campus server (default: http://127.0.0.1:8080).
  #[arg(long, env = "CAMPUS_URL")]
  url: Option<String>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Contact-form messages. Filters: status. Sorts: created-at, name.
  Contacts(ListArgs),
  /// Show one contact message in full; marks it read.
  Contact { id: String },
  /// Student projects. Filters: department, category. Sorts: created-at, title, date.
  Projects(ListArgs),
  /// Study materials. Filters: department, category. Sorts: newest, title, department.
  Materials(ListArgs),
  /// Notice board. Filters: category, important. Sorts: created-at, title.
  Notices(ListArgs),
  /// Academic resources. With --session and --semester, shows one semester
  /// grouped by type; otherwise a flat list (filters: type, session, semester).
  Academic {
    #[arg(long)]
    department: Option<String>,
    #[arg(long, requires = "semester", requires = "department")]
    session:    Option<String>,
    #[arg(long, requires = "session")]
    semester:   Option<String>,
    #[command(flatten)]
    list:       ListArgs,
  },
}

// ─── Config file ──────────────────────────────────────────────────────────────

/// Shape of the optional TOML config file.
#[derive(Deserialize, Default)]
struct ConfigFile {
  #[serde(default)]
  url: String,
}

fn load_config(path: Option<&std::path::Path>) -> Result<ConfigFile> {
  let Some(path) = path else {
    return Ok(ConfigFile::default());
  };
  let raw = std::fs::read_to_string(path)
    .with_context(|| format!("reading config file {}", path.display()))?;
  toml::from_str(&raw).context("parsing config file")
}

/// CLI flag, then config file, then the default.
fn resolve_url(flag: Option<String>, file: &ConfigFile) -> String {
  flag
    .or_else(|| (!file.url.is_empty()).then(|| file.url.clone()))
    .unwrap_or_else(|| DEFAULT_URL.to_string())
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    )
    .with_writer(std::io::stderr)
    .init();

  let args = Args::parse();
  let file_cfg = load_config(args.config.as_deref())?;
  let base_url = resolve_url(args.url, &file_cfg);
  tracing::debug!(%base_url, "using campus server");

  let client = ApiClient::new(base_url)?;
  let output = run(&client, args.command).await?;
  print!("{output}");
  Ok(())
}

async fn run(client: &ApiClient, command: Command) -> Result<String> {
  Ok(match command {
    Command::Contacts(list) => {
      let query: QueryFor<ContactMessage> = list.query()?;
      view::render_list(&client.contacts().await?, &query)
    }
    Command::Contact { id } => view::render_contact(&client.contact(&id).await?),
    Command::Projects(list) => {
      let query: QueryFor<Project> = list.query()?;
      view::render_list(&client.projects().await?, &query)
    }
    Command::Materials(list) => {
      let query: QueryFor<StudyMaterial> = list.query()?;
      view::render_list(&client.study_materials().await?, &query)
    }
    Command::Notices(list) => {
      let query: QueryFor<Notice> = list.query()?;
      view::render_notices(&client.notices().await?, &query)
    }
    Command::Academic {
      department,
      session: Some(session),
      semester: Some(semester),
      ..
    } => {
      let department = department.context("--department is required with --session")?;
      let partition = client.semester(&department, &session, &semester).await?;
      view::render_partition(&partition)
    }
    Command::Academic {
      department, list, ..
    } => {
      let query: QueryFor<AcademicResource> = list.query()?;
      view::render_list(&client.academic(department.as_deref()).await?, &query)
    }
  })
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn url_precedence_is_flag_then_file_then_default() {
    let file = ConfigFile {
      url: "http://from-file:9000".into(),
    };
    assert_eq!(resolve_url(Some("http://flag".into()), &file), "http://flag");
    assert_eq!(resolve_url(None, &file), "http://from-file:9000");
    assert_eq!(resolve_url(None, &ConfigFile::default()), DEFAULT_URL);
  }

  #[test]
  fn config_file_parses_toml() {
    let cfg: ConfigFile = toml::from_str(r#"url = "http://campus.local""#).unwrap();
    assert_eq!(cfg.url, "http://campus.local");
    assert!(load_config(None).unwrap().url.is_empty());
  }

  #[test]
  fn parses_listing_subcommand() {
    let args = Args::try_parse_from([
      "campus", "notices", "--search", "exam", "-f", "important=true", "-f", "category=Exams",
      "--sort", "title", "--asc",
    ])
    .unwrap();
    let Command::Notices(list) = args.command else {
      panic!("expected notices");
    };
    assert_eq!(list.search.as_deref(), Some("exam"));
    assert_eq!(list.filters, ["important=true", "category=Exams"]);
    assert_eq!(list.sort.as_deref(), Some("title"));
    assert!(list.asc);
  }

  #[test]
  fn semester_view_needs_department_and_semester() {
    assert!(Args::try_parse_from(["campus", "academic", "--session", "2024-25"]).is_err());
    let args = Args::try_parse_from([
      "campus", "academic", "--department", "cst", "--session", "2024-25", "--semester", "4",
    ])
    .unwrap();
    assert!(matches!(
      args.command,
      Command::Academic { session: Some(_), semester: Some(_), .. }
    ));
  }
}
