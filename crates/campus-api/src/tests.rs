//! Router-level tests against an in-memory SQLite store.

use std::sync::Arc;

use axum::{
  Router,
  body::Body,
  http::{Request, StatusCode, header},
};
use campus_store_sqlite::SqliteStore;
use serde_json::{Value, json};
use tower::ServiceExt as _;

use crate::api_router;

async fn app() -> Router {
  let store = SqliteStore::open_in_memory().await.unwrap();
  Router::new().nest("/resources", api_router(Arc::new(store)))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
  let builder = Request::builder().method(method).uri(uri);
  let req = match body {
    Some(body) => builder
      .header(header::CONTENT_TYPE, "application/json")
      .body(Body::from(body.to_string())),
    None => builder.body(Body::empty()),
  }
  .unwrap();

  let resp = app.clone().oneshot(req).await.unwrap();
  let status = resp.status();
  let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
    .await
    .unwrap();
  let json = if bytes.is_empty() {
    Value::Null
  } else {
    serde_json::from_slice(&bytes).unwrap()
  };
  (status, json)
}

fn words(n: usize) -> String { vec!["word"; n].join(" ") }

fn contact(message: String) -> Value {
  json!({
    "name": "Ravi",
    "email": "ravi@example.com",
    "subject": "Admissions",
    "message": message,
  })
}

// ── Contacts ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn contact_word_limit() {
  let app = app().await;

  let (status, body) = send(&app, "POST", "/resources/contacts", Some(contact(words(150)))).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert_eq!(body["error"], "Message exceeds 149 words.");

  let (status, body) = send(&app, "POST", "/resources/contacts", Some(contact(words(149)))).await;
  assert_eq!(status, StatusCode::CREATED);
  assert_eq!(body["success"], true);
  assert_eq!(body["data"]["status"], "unread");
  assert_eq!(body["data"]["important"], false);
  assert_eq!(body["id"], body["data"]["id"]);
}

#[tokio::test]
async fn contact_requires_every_field() {
  let app = app().await;
  let (status, body) = send(
    &app,
    "POST",
    "/resources/contacts",
    Some(json!({ "name": "Ravi", "email": "r@example.com", "subject": "x" })),
  )
  .await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert_eq!(body["error"], "All fields are required.");
}

#[tokio::test]
async fn malformed_json_is_a_bad_request() {
  let app = app().await;
  let req = Request::builder()
    .method("POST")
    .uri("/resources/contacts")
    .header(header::CONTENT_TYPE, "application/json")
    .body(Body::from("{not json"))
    .unwrap();
  let resp = app.oneshot(req).await.unwrap();
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
    .await
    .unwrap();
  let body: Value = serde_json::from_slice(&bytes).unwrap();
  assert!(body["error"].is_string());
}

#[tokio::test]
async fn viewing_a_contact_marks_it_read() {
  let app = app().await;
  let (_, created) = send(&app, "POST", "/resources/contacts", Some(contact("hello".into()))).await;
  let id = created["id"].as_str().unwrap();

  let (status, body) = send(&app, "GET", &format!("/resources/contacts/{id}"), None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["data"]["status"], "read");

  let (_, list) = send(&app, "GET", "/resources/contacts", None).await;
  assert_eq!(list["success"], true);
  assert_eq!(list["data"][0]["status"], "read");
}

#[tokio::test]
async fn patch_status_then_get() {
  let app = app().await;
  let (_, created) = send(&app, "POST", "/resources/contacts", Some(contact("hi".into()))).await;
  let id = created["id"].as_str().unwrap();

  let (status, body) = send(
    &app,
    "PATCH",
    &format!("/resources/contacts/{id}"),
    Some(json!({ "status": "read", "important": true, "name": "ignored" })),
  )
  .await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["data"]["important"], true);
  assert_eq!(body["data"]["name"], "Ravi");

  let (_, body) = send(&app, "GET", &format!("/resources/contacts/{id}"), None).await;
  assert_eq!(body["data"]["status"], "read");
  assert_eq!(body["data"]["important"], true);

  // Setting the same status again is accepted and changes nothing.
  let (status, again) = send(
    &app,
    "PATCH",
    &format!("/resources/contacts/{id}"),
    Some(json!({ "status": "read" })),
  )
  .await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(again["data"]["status"], "read");
}

#[tokio::test]
async fn missing_contact_is_404_but_delete_is_200() {
  let app = app().await;

  let (status, body) = send(&app, "GET", "/resources/contacts/nope", None).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
  assert_eq!(body["error"], "Contact not found.");

  let (status, _) = send(
    &app,
    "PATCH",
    "/resources/contacts/nope",
    Some(json!({ "status": "read" })),
  )
  .await;
  assert_eq!(status, StatusCode::NOT_FOUND);

  let (status, body) = send(&app, "DELETE", "/resources/contacts/nope", None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["success"], true);
}

// ── Projects ──────────────────────────────────────────────────────────────────

fn project() -> Value {
  json!({
    "title": "Line Follower",
    "content": "An IR-guided robot",
    "category": ["Robotics"],
    "department": "ETCE",
    "teamMembers": ["Anu", "Bikram"],
  })
}

#[tokio::test]
async fn project_needs_a_category() {
  let app = app().await;
  let mut body = project();
  body["category"] = json!([]);

  let (status, resp) = send(&app, "POST", "/resources/projects", Some(body)).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert_eq!(resp["error"], "At least one category must be selected.");
}

#[tokio::test]
async fn project_lifecycle() {
  let app = app().await;

  let (status, created) = send(&app, "POST", "/resources/projects", Some(project())).await;
  assert_eq!(status, StatusCode::CREATED);
  let id = created["id"].as_str().unwrap().to_owned();
  assert_eq!(created["project"]["department"], "ETCE");
  assert_eq!(created["project"]["date"].as_str().unwrap().len(), 10);

  let (status, updated) = send(
    &app,
    "PUT",
    &format!("/resources/projects/{id}"),
    Some(json!({ "important": true, "link": "https://github.com/example/robot" })),
  )
  .await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(updated["project"]["important"], true);
  assert_eq!(updated["project"]["title"], "Line Follower");

  let (status, _) = send(
    &app,
    "PUT",
    "/resources/projects",
    Some(json!({ "id": id, "title": "Line Follower v2" })),
  )
  .await;
  assert_eq!(status, StatusCode::OK);

  let (_, list) = send(&app, "GET", "/resources/projects", None).await;
  assert_eq!(list["projects"][0]["title"], "Line Follower v2");

  let (status, _) = send(&app, "DELETE", &format!("/resources/projects?id={id}"), None).await;
  assert_eq!(status, StatusCode::OK);
  let (_, list) = send(&app, "GET", "/resources/projects", None).await;
  assert_eq!(list["projects"], json!([]));
}

#[tokio::test]
async fn project_update_errors() {
  let app = app().await;

  let (status, body) = send(
    &app,
    "PUT",
    "/resources/projects/missing",
    Some(json!({ "title": "x" })),
  )
  .await;
  assert_eq!(status, StatusCode::NOT_FOUND);
  assert_eq!(body["error"], "Project not found.");

  let (status, body) = send(&app, "PUT", "/resources/projects", Some(json!({ "title": "x" }))).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert_eq!(body["error"], "Project ID is required.");

  let (status, body) = send(&app, "DELETE", "/resources/projects", None).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert_eq!(body["error"], "Project ID is required.");

  let (status, body) = send(
    &app,
    "POST",
    "/resources/projects",
    Some(json!({ "title": "x", "content": "y", "department": "ME", "category": ["a"] })),
  )
  .await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert_eq!(body["error"], "Invalid department: ME.");
}

// ── Academic resources ────────────────────────────────────────────────────────

const SEMESTER_URI: &str = "/resources/academic/ee?session=2024-25&semester=3";

#[tokio::test]
async fn academic_create_with_pdf_link_only() {
  let app = app().await;

  let (status, body) = send(
    &app,
    "POST",
    SEMESTER_URI,
    Some(json!({ "title": "DE 2023", "type": "pyq", "pdfLink": "https://f.example.com/de.pdf", "year": "2023" })),
  )
  .await;
  assert_eq!(status, StatusCode::CREATED);
  assert_eq!(body["message"], "Resource created.");
  let pyq = &body["pyqs"][0];
  assert_eq!(pyq["id"], body["id"]);
  assert_eq!(pyq["url"], "https://f.example.com/de.pdf");
  assert_eq!(pyq["pdfLink"], pyq["url"]);
  assert_eq!(pyq["uploadedBy"], "admin");
  assert_eq!(body["syllabus"], json!([]));
}

#[tokio::test]
async fn academic_create_validation() {
  let app = app().await;

  let (status, body) = send(
    &app,
    "POST",
    "/resources/academic/ee?session=2024-25",
    Some(json!({ "title": "x", "type": "pyq", "url": "https://x.example.com" })),
  )
  .await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert_eq!(body["error"], "Missing required fields.");

  let (status, body) = send(
    &app,
    "POST",
    SEMESTER_URI,
    Some(json!({ "title": "x", "type": "pyq" })),
  )
  .await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert_eq!(body["error"], "Either url or pdfLink is required.");
}

#[tokio::test]
async fn semester_listing_partitions_by_type() {
  let app = app().await;
  for (title, kind) in [
    ("Syllabus", "syllabus"),
    ("Model test", "tests"),
    ("Lab manual", "manual"),
    ("Handbook", "additional"),
  ] {
    let (status, _) = send(
      &app,
      "POST",
      SEMESTER_URI,
      Some(json!({ "title": title, "type": kind, "url": "https://x.example.com/a.pdf" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
  }
  // Another semester; must not appear.
  send(
    &app,
    "POST",
    "/resources/academic/ee?session=2024-25&semester=4",
    Some(json!({ "title": "Other", "type": "syllabus", "url": "https://x.example.com/b.pdf" })),
  )
  .await;

  let (status, body) = send(&app, "GET", SEMESTER_URI, None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["syllabus"].as_array().unwrap().len(), 1);
  assert_eq!(body["pyqs"], json!([]));
  assert_eq!(body["additional"].as_array().unwrap().len(), 1);
  assert_eq!(body["tests"].as_array().unwrap().len(), 1);
  assert!(body.get("unclassified").is_none());

  let (status, body) = send(&app, "GET", "/resources/academic/ee?semester=3", None).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert_eq!(body["error"], "Missing session or semester query parameters.");
}

#[tokio::test]
async fn flat_academic_routes() {
  let app = app().await;

  let (status, created) = send(
    &app,
    "POST",
    "/resources/academic",
    Some(json!({
      "title": "Maths syllabus",
      "session": "2024-25",
      "semester": "1",
      "type": "syllabus",
      "departmentId": "cst",
      "uploadedBy": "hod",
      "url": "https://x.example.com/m.pdf",
    })),
  )
  .await;
  assert_eq!(status, StatusCode::CREATED);
  assert_eq!(created["resource"]["pdfLink"], "https://x.example.com/m.pdf");

  let (_, body) = send(&app, "GET", "/resources/academic?department=cst&type=syllabus", None).await;
  assert_eq!(body["resources"].as_array().unwrap().len(), 1);
  let (_, body) = send(&app, "GET", "/resources/academic?department=cst&type=pyq", None).await;
  assert_eq!(body["resources"], json!([]));
  let (_, body) = send(&app, "GET", "/resources/academic?semester=1", None).await;
  assert_eq!(body["resources"].as_array().unwrap().len(), 1);

  let (status, body) = send(
    &app,
    "PATCH",
    "/resources/academic",
    Some(json!({ "session": "2024-25", "semester": "1", "type": "pyq", "departmentId": "cst", "data": {} })),
  )
  .await;
  assert_eq!(status, StatusCode::NOT_IMPLEMENTED);
  assert_eq!(body["error"], "Batch update not implemented.");

  let (status, _) = send(&app, "PATCH", "/resources/academic", Some(json!({ "session": "x" }))).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn academic_resource_update_and_delete() {
  let app = app().await;
  let (_, created) = send(
    &app,
    "POST",
    SEMESTER_URI,
    Some(json!({ "title": "Old", "type": "pyq", "url": "https://x.example.com/old.pdf" })),
  )
  .await;
  let id = created["id"].as_str().unwrap();

  let (status, body) = send(
    &app,
    "PUT",
    &format!("/resources/academic/resource/{id}"),
    Some(json!({ "pdfLink": "https://x.example.com/new.pdf" })),
  )
  .await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["resource"]["url"], "https://x.example.com/new.pdf");
  assert_eq!(body["resource"]["title"], "Old");

  let (status, _) = send(&app, "DELETE", &format!("/resources/academic/resource/{id}"), None).await;
  assert_eq!(status, StatusCode::OK);

  let (status, body) = send(&app, "DELETE", &format!("/resources/academic/resource/{id}"), None).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
  assert_eq!(body["error"], "Resource not found.");

  let (status, body) = send(
    &app,
    "PUT",
    "/resources/academic/resource/missing",
    Some(json!({ "title": "x" })),
  )
  .await;
  assert_eq!(status, StatusCode::NOT_FOUND);
  assert_eq!(body["error"], "Resource not found.");
}

// ── Study materials, notices, departments ────────────────────────────────────

#[tokio::test]
async fn study_materials_round_trip() {
  let app = app().await;

  let (status, body) = send(&app, "POST", "/resources/study-materials", Some(json!({ "title": "x" }))).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert_eq!(body["error"], "Missing required fields.");

  let (status, created) = send(
    &app,
    "POST",
    "/resources/study-materials",
    Some(json!({
      "title": "Thermodynamics notes",
      "content": "Chapters 1-3",
      "category": "Notes",
      "department": "EE",
      "semester": "2",
      "publisher": "EE dept",
      "link": "https://drive.example.com/t",
    })),
  )
  .await;
  assert_eq!(status, StatusCode::CREATED);
  let id = created["id"].as_str().unwrap();

  let (_, list) = send(&app, "GET", "/resources/study-materials", None).await;
  assert_eq!(list["studyMaterials"][0]["id"], id);

  let (status, _) = send(
    &app,
    "PUT",
    "/resources/study-materials/missing",
    Some(json!({ "important": true })),
  )
  .await;
  assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn notices_round_trip() {
  let app = app().await;
  let (status, created) = send(
    &app,
    "POST",
    "/resources/notices",
    Some(json!({
      "title": "Admissions open",
      "content": "Apply by June",
      "category": "admission-opens",
      "isImportant": true,
    })),
  )
  .await;
  assert_eq!(status, StatusCode::CREATED);
  assert_eq!(created["notice"]["createdBy"], "admin");

  let (status, body) = send(
    &app,
    "POST",
    "/resources/notices",
    Some(json!({ "title": "t", "content": "c", "category": "Sports" })),
  )
  .await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert_eq!(body["error"], "Invalid category: Sports.");

  let (_, list) = send(&app, "GET", "/resources/notices", None).await;
  assert_eq!(list["notices"].as_array().unwrap().len(), 1);
  assert_eq!(list["notices"][0]["category"], "admission-opens");
}

#[tokio::test]
async fn departments_round_trip() {
  let app = app().await;

  let (status, body) = send(&app, "GET", "/resources/departments/none", None).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
  assert_eq!(body["error"], "Department not found.");

  let (status, created) = send(
    &app,
    "POST",
    "/resources/departments",
    Some(json!({ "name": "Electrical Engineering", "shortName": "EE", "hod": "Dr. Sen" })),
  )
  .await;
  assert_eq!(status, StatusCode::CREATED);
  let id = created["id"].as_str().unwrap();

  let (status, body) = send(
    &app,
    "PUT",
    &format!("/resources/departments/{id}"),
    Some(json!({ "labs": [{ "name": "Machines Lab" }] })),
  )
  .await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["department"]["labs"][0]["name"], "Machines Lab");

  let (status, body) = send(&app, "GET", &format!("/resources/departments/{id}"), None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["shortName"], "EE");
  assert_eq!(body["hod"], "Dr. Sen");
}
