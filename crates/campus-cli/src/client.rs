//! Async HTTP client wrapping the campus JSON API.

use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use campus_core::{
  academic::AcademicResource, classify::Partition, contact::ContactMessage, notice::Notice,
  project::Project, study_material::StudyMaterial,
};
use reqwest::{Client, Response};
use serde::{Deserialize, de::DeserializeOwned};

#[derive(Deserialize)]
struct ContactsEnvelope<T> {
  data: T,
}

#[derive(Deserialize)]
struct ProjectsEnvelope {
  projects: Vec<Project>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StudyMaterialsEnvelope {
  study_materials: Vec<StudyMaterial>,
}

#[derive(Deserialize)]
struct NoticesEnvelope {
  notices: Vec<Notice>,
}

#[derive(Deserialize)]
struct ResourcesEnvelope {
  resources: Vec<AcademicResource>,
}

#[derive(Deserialize)]
struct ErrorBody {
  error: String,
}

/// Async HTTP client for the campus JSON REST API.
///
/// Cheap to clone; the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct ApiClient {
  client:   Client,
  base_url: String,
}

impl ApiClient {
  pub fn new(base_url: String) -> Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(30))
      .build()
      .context("failed to build HTTP client")?;
    Ok(Self { client, base_url })
  }

  fn url(&self, path: &str) -> String {
    format!("{}/resources{}", self.base_url.trim_end_matches('/'), path)
  }

  /// `GET` `path` and decode the body, surfacing the server's `{error}`
  /// message on failure.
  async fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, &str)]) -> Result<T> {
    let resp = self
      .client
      .get(self.url(path))
      .query(query)
      .send()
      .await
      .with_context(|| format!("GET {path} failed"))?;
    decode(path, resp).await
  }

  /// `GET /resources/contacts`
  pub async fn contacts(&self) -> Result<Vec<ContactMessage>> {
    let envelope: ContactsEnvelope<Vec<ContactMessage>> = self.get("/contacts", &[]).await?;
    Ok(envelope.data)
  }

  /// `GET /resources/contacts/{id}`. The server marks the message read.
  pub async fn contact(&self, id: &str) -> Result<ContactMessage> {
    let envelope: ContactsEnvelope<ContactMessage> =
      self.get(&format!("/contacts/{id}"), &[]).await?;
    Ok(envelope.data)
  }

  /// `GET /resources/projects`
  pub async fn projects(&self) -> Result<Vec<Project>> {
    let envelope: ProjectsEnvelope = self.get("/projects", &[]).await?;
    Ok(envelope.projects)
  }

  /// `GET /resources/study-materials`
  pub async fn study_materials(&self) -> Result<Vec<StudyMaterial>> {
    let envelope: StudyMaterialsEnvelope = self.get("/study-materials", &[]).await?;
    Ok(envelope.study_materials)
  }

  /// `GET /resources/notices`
  pub async fn notices(&self) -> Result<Vec<Notice>> {
    let envelope: NoticesEnvelope = self.get("/notices", &[]).await?;
    Ok(envelope.notices)
  }

  /// `GET /resources/academic[?department=]`
  pub async fn academic(&self, department: Option<&str>) -> Result<Vec<AcademicResource>> {
    let query: Vec<_> = department.map(|d| ("department", d)).into_iter().collect();
    let envelope: ResourcesEnvelope = self.get("/academic", &query).await?;
    Ok(envelope.resources)
  }

  /// `GET /resources/academic/{department}?session=&semester=`
  pub async fn semester(&self, department: &str, session: &str, semester: &str) -> Result<Partition> {
    self
      .get(
        &format!("/academic/{department}"),
        &[("session", session), ("semester", semester)],
      )
      .await
  }
}

async fn decode<T: DeserializeOwned>(path: &str, resp: Response) -> Result<T> {
  let status = resp.status();
  if !status.is_success() {
    let message = resp
      .json::<ErrorBody>()
      .await
      .map(|b| b.error)
      .unwrap_or_else(|_| status.to_string());
    return Err(anyhow!("GET {path} → {status}: {message}"));
  }
  resp
    .json()
    .await
    .with_context(|| format!("deserialising {path}"))
}
