#![allow(missing_docs, clippy::expect_used)]

//! End-to-end documentation tests against a running axum server.

use std::collections::BTreeSet;
use std::fs;
use std::net::TcpListener;
use std::ops::Deref;
use std::path::{Path, PathBuf};

use axum::Router;
use axum::extract::Multipart;
use axum::http::StatusCode;
use axum::routing::{get, post};
use rstest::{fixture, rstest};
use serde::{Deserialize, Serialize};

use docsnip_core::snippet::{
    field, param, part, path_parameters, request_parameters, request_part_body,
    request_part_fields, request_parts,
};
use docsnip_core::test_client::{TestClient, TestServer};
use docsnip_core::{
    ConfigurationStore, DocClientError, DocContext, MultipartForm, REQUEST_ID_HEADER, document,
};

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Person {
    first_name: String,
    last_name: String,
}

async fn person() -> axum::Json<Person> {
    axum::Json(Person {
        first_name: "Jane".to_string(),
        last_name: "Doe".to_string(),
    })
}

async fn upload(mut multipart: Multipart) -> StatusCode {
    while let Some(field) = multipart.next_field().await.expect("readable multipart") {
        let _ = field.bytes().await.expect("readable part");
    }
    StatusCode::OK
}

fn router() -> Router {
    Router::new()
        .route("/", get(person))
        .route("/{foo}/{bar}", get(person))
        .route("/upload", post(upload))
}

#[derive(Debug)]
struct AppServer;

impl TestServer for AppServer {
    async fn launch(&self, listener: TcpListener) {
        listener.set_nonblocking(true).expect("set non-blocking");
        let listener = tokio::net::TcpListener::from_std(listener).expect("valid listener");
        axum::serve(listener, router()).await.expect("server running");
    }
}

struct TestApp {
    client: TestClient<AppServer>,
    output_dir: PathBuf,
}

impl Deref for TestApp {
    type Target = TestClient<AppServer>;

    fn deref(&self) -> &Self::Target {
        &self.client
    }
}

impl TestApp {
    fn snippet_dir(&self, identifier: &str) -> PathBuf {
        let dir = self.output_dir.join(identifier);
        let _ = fs::remove_dir_all(&dir);
        dir
    }
}

#[fixture]
async fn app() -> TestApp {
    let output_dir = Path::new(env!("CARGO_TARGET_TMPDIR")).join("generated-snippets");
    let docs = DocContext::new(&output_dir);
    let client = TestClient::start_with(AppServer, docs.configurer())
        .await
        .expect("server started");
    TestApp { client, output_dir }
}

#[rstest]
#[tokio::test]
async fn test_default_snippet_generation(#[future] app: TestApp) -> anyhow::Result<()> {
    let app = app.await;
    let snippet_dir = app.snippet_dir("default-snippets");

    let result = app.get("/")?.await?;
    assert_eq!(result.status_code(), StatusCode::OK);
    let person: Person = result.as_json()?;
    assert_eq!(person.first_name, "Jane");
    result.consume_with(&document("default-snippets"))?;

    let actual: BTreeSet<String> = fs::read_dir(&snippet_dir)?
        .map(|entry| {
            entry
                .expect("directory entry")
                .file_name()
                .to_string_lossy()
                .into_owned()
        })
        .collect();
    let expected: BTreeSet<String> = [
        "http-request.adoc",
        "http-response.adoc",
        "curl-request.adoc",
        "httpie-request.adoc",
        "request-body.adoc",
        "response-body.adoc",
    ]
    .into_iter()
    .map(str::to_owned)
    .collect();
    assert_eq!(actual, expected);
    Ok(())
}

#[rstest]
#[tokio::test]
async fn test_path_parameters_snippet(#[future] app: TestApp) -> anyhow::Result<()> {
    let app = app.await;
    let snippet_dir = app.snippet_dir("path-parameters");

    app.get("/{foo}/{bar}")?
        .with_path_param("foo", 1)
        .with_path_param("bar", 2)
        .await?
        .consume_with(&document("path-parameters").with_snippet(path_parameters([
            param("foo", "Foo description"),
            param("bar", "Bar description"),
        ])))?;

    let rendered = fs::read_to_string(snippet_dir.join("path-parameters.adoc"))?;
    let expected = "./{foo}/{bar}\n\
                    |===\n\
                    |Parameter|Description\n\
                    \n\
                    |`foo`\n\
                    |Foo description\n\
                    \n\
                    |`bar`\n\
                    |Bar description\n\
                    \n\
                    |===\n";
    assert_eq!(rendered, expected);
    Ok(())
}

#[rstest]
#[tokio::test]
async fn test_request_parameters_snippet(#[future] app: TestApp) -> anyhow::Result<()> {
    let app = app.await;
    let snippet_dir = app.snippet_dir("request-parameters");

    app.get("/")?
        .with_query_param("a", "alpha")
        .with_query_param("b", "bravo")
        .await?
        .consume_with(&document("request-parameters").with_snippet(request_parameters([
            param("a", "Alpha description"),
            param("b", "Bravo description"),
        ])))?;

    let rendered = fs::read_to_string(snippet_dir.join("request-parameters.adoc"))?;
    let expected = "|===\n\
                    |Parameter|Description\n\
                    \n\
                    |`a`\n\
                    |Alpha description\n\
                    \n\
                    |`b`\n\
                    |Bravo description\n\
                    \n\
                    |===\n";
    assert_eq!(rendered, expected);
    Ok(())
}

#[rstest]
#[tokio::test]
async fn test_multipart_snippets(#[future] app: TestApp) -> anyhow::Result<()> {
    let app = app.await;
    let snippet_dir = app.snippet_dir("multipart");

    let form = MultipartForm::new()
        .add_text("a", "alpha")
        .add_json("b", &serde_json::json!({"c": "charlie"}))?;
    app.post("/upload")?
        .multipart(form)
        .await?
        .consume_with(
            &document("multipart")
                .with_snippet(request_parts([part("a", "Part a"), part("b", "Part b")]))
                .with_snippet(request_part_body("b"))
                .with_snippet(request_part_fields("b", [field("c", "One")])),
        )?;

    let parts_table = fs::read_to_string(snippet_dir.join("request-parts.adoc"))?;
    let expected_parts = "|===\n\
                          |Part|Description\n\
                          \n\
                          |`a`\n\
                          |Part a\n\
                          \n\
                          |`b`\n\
                          |Part b\n\
                          \n\
                          |===\n";
    assert_eq!(parts_table, expected_parts);

    assert!(snippet_dir.join("request-part-b-body.adoc").exists());

    let fields_table = fs::read_to_string(snippet_dir.join("request-part-b-fields.adoc"))?;
    let expected_fields = "|===\n\
                           |Path|Type|Description\n\
                           \n\
                           |`c`\n\
                           |`String`\n\
                           |One\n\
                           \n\
                           |===\n";
    assert_eq!(fields_table, expected_fields);
    Ok(())
}

#[rstest]
#[tokio::test]
async fn test_configuration_is_retrievable_exactly_once(#[future] app: TestApp) -> anyhow::Result<()> {
    let app = app.await;

    let result = app.get("/")?.await?;
    let token = result
        .request()
        .header(REQUEST_ID_HEADER)
        .expect("token injected by the client");

    let store = ConfigurationStore::global();
    assert!(store.retrieve(&token).is_some());
    assert!(store.retrieve(&token).is_none());
    Ok(())
}

#[rstest]
#[tokio::test]
async fn test_each_request_gets_its_own_configuration(#[future] app: TestApp) -> anyhow::Result<()> {
    let app = app.await;
    let first = app.get("/")?.await?;
    let second = app.get("/")?.await?;

    let first_token = first.request().header(REQUEST_ID_HEADER).expect("token");
    let second_token = second.request().header(REQUEST_ID_HEADER).expect("token");
    assert_ne!(first_token, second_token);

    let store = ConfigurationStore::global();
    assert!(store.retrieve(&second_token).is_some());
    assert!(store.retrieve(&first_token).is_some());
    Ok(())
}

#[rstest]
#[tokio::test]
async fn test_concurrent_requests_are_isolated(#[future] app: TestApp) -> anyhow::Result<()> {
    let app = app.await;
    let first_dir = app.snippet_dir("concurrent-first");
    let second_dir = app.snippet_dir("concurrent-second");

    let (first, second) = tokio::join!(app.get("/")?, app.get("/")?);
    let first = first?;
    let second = second?;

    first.consume_with(&document("concurrent-first"))?;
    second.consume_with(&document("concurrent-second"))?;

    assert!(first_dir.join("http-request.adoc").exists());
    assert!(second_dir.join("http-request.adoc").exists());
    Ok(())
}

#[tokio::test]
async fn test_document_without_configurer_fails() -> anyhow::Result<()> {
    let client = TestClient::start(AppServer).await.expect("server started");

    let result = client.get("/")?.await?;
    let error = result
        .consume_with(&document("unconfigured"))
        .expect_err("no configurer installed");
    assert!(matches!(error, DocClientError::MissingConfiguration { .. }));
    Ok(())
}

#[rstest]
#[tokio::test]
async fn test_documenting_the_same_exchange_twice_fails(#[future] app: TestApp) -> anyhow::Result<()> {
    let app = app.await;
    let _ = app.snippet_dir("documented-once");

    let result = app.get("/")?.await?;
    result.consume_with(&document("documented-once"))?;
    let error = result
        .consume_with(&document("documented-once"))
        .expect_err("entry already retrieved");
    assert!(matches!(error, DocClientError::MissingConfiguration { .. }));
    Ok(())
}
