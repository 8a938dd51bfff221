pub mod auth;
pub mod health;
pub mod pages;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_sessions::{MemoryStore, SessionManagerLayer};

use crate::analyzer::handlers::{handle_analyze_resume, MAX_UPLOAD_BYTES};
use crate::builder::handlers::handle_builder;
use crate::chat::handlers::{handle_chat, handle_resume_builder_chat};
use crate::resume::handlers::{
    handle_download_resume, handle_generate_resume, handle_generate_resume_docx,
};
use crate::state::AppState;

pub fn build_router(state: AppState, sessions: SessionManagerLayer<MemoryStore>) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Pages
        .route("/", get(pages::handle_index))
        .route("/main", get(pages::handle_main))
        .route("/career", get(pages::handle_career))
        .route("/analyzer", get(pages::handle_analyzer))
        // Auth
        .route(
            "/login",
            get(auth::handle_login_page).post(auth::handle_login),
        )
        .route(
            "/register",
            get(auth::handle_register_page).post(auth::handle_register),
        )
        .route("/logout", post(auth::handle_logout))
        // Guided builder
        .route(
            "/builder",
            get(pages::handle_builder_page).post(handle_builder),
        )
        .route("/download_resume", get(handle_download_resume))
        // Chat
        .route("/chat", post(handle_chat))
        .route("/resume_builder", post(handle_resume_builder_chat))
        // Exports
        .route("/generate_resume", post(handle_generate_resume))
        .route("/generate_resume_docx", post(handle_generate_resume_docx))
        // Analyzer
        .route(
            "/analyze_resume",
            post(handle_analyze_resume).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .layer(sessions)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
        response::Response,
    };
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;
    use crate::llm_client::testing::ScriptedBackend;
    use crate::users::UserStore;

    struct TestApp {
        router: Router,
        backend: Arc<ScriptedBackend>,
        _dir: tempfile::TempDir,
    }

    impl TestApp {
        fn new(backend: ScriptedBackend) -> Self {
            let dir = tempfile::tempdir().unwrap();
            let backend = Arc::new(backend);
            let state = AppState {
                llm: backend.clone(),
                users: Arc::new(UserStore::new(dir.path().join("users.json"))),
            };
            let sessions = SessionManagerLayer::new(MemoryStore::default()).with_secure(false);
            Self {
                router: build_router(state, sessions),
                backend,
                _dir: dir,
            }
        }

        async fn send(&self, request: Request<Body>) -> Response {
            self.router.clone().oneshot(request).await.unwrap()
        }
    }

    fn session_cookie(response: &Response) -> Option<String> {
        response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(';').next())
            .map(str::to_string)
    }

    fn json_post(uri: &str, body: &str, cookie: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    fn form_post(uri: &str, body: &str, cookie: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        builder.body(Body::empty()).unwrap()
    }

    async fn body_bytes(response: Response) -> Vec<u8> {
        axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap()
            .to_vec()
    }

    async fn body_json(response: Response) -> Value {
        serde_json::from_slice(&body_bytes(response).await).unwrap()
    }

    fn location(response: &Response) -> &str {
        response
            .headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
    }

    #[tokio::test]
    async fn test_health() {
        let app = TestApp::new(ScriptedBackend::failing());
        let response = app.send(get("/health", None)).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["status"], "ok");
    }

    #[tokio::test]
    async fn test_pages_redirect_anonymous_users() {
        let app = TestApp::new(ScriptedBackend::failing());
        for uri in ["/", "/main", "/career", "/analyzer", "/builder"] {
            let response = app.send(get(uri, None)).await;
            assert!(response.status().is_redirection(), "{uri}");
            assert_eq!(location(&response), "/login", "{uri}");
        }
    }

    #[tokio::test]
    async fn test_register_login_main_logout() {
        let app = TestApp::new(ScriptedBackend::failing());

        let response = app
            .send(form_post(
                "/register",
                "firstName=Ada&lastName=Lovelace&email=ada%40example.com&password=engine",
                None,
            ))
            .await;
        assert_eq!(location(&response), "/login");

        let response = app
            .send(form_post(
                "/login",
                "email=ada%40example.com&password=engine",
                None,
            ))
            .await;
        assert_eq!(location(&response), "/main");
        let cookie = session_cookie(&response).expect("login sets a session cookie");

        let response = app.send(get("/main", Some(&cookie))).await;
        assert_eq!(response.status(), StatusCode::OK);
        let page = String::from_utf8(body_bytes(response).await).unwrap();
        assert!(page.contains("Ada Lovelace"));
        assert!(page.contains("ada@example.com"));

        let response = app.send(form_post("/logout", "", Some(&cookie))).await;
        assert_eq!(location(&response), "/login");

        let response = app.send(get("/main", Some(&cookie))).await;
        assert_eq!(location(&response), "/login");
    }

    #[tokio::test]
    async fn test_login_with_wrong_password_is_401() {
        let app = TestApp::new(ScriptedBackend::failing());
        app.send(form_post(
            "/register",
            "firstName=Ada&lastName=L&email=ada%40example.com&password=engine",
            None,
        ))
        .await;

        let response = app
            .send(form_post(
                "/login",
                "email=ada%40example.com&password=nope",
                None,
            ))
            .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_bytes(response).await, b"Invalid credentials");
    }

    #[tokio::test]
    async fn test_register_requires_email() {
        let app = TestApp::new(ScriptedBackend::failing());
        let response = app
            .send(form_post("/register", "firstName=Ada&password=x", None))
            .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_builder_state_persists_across_requests() {
        let app = TestApp::new(ScriptedBackend::failing());

        let response = app
            .send(json_post("/builder", r#"{"message": "Ada Lovelace"}"#, None))
            .await;
        let cookie = session_cookie(&response).unwrap();
        assert_eq!(body_json(response).await["reply"], "What is your email?");

        let response = app
            .send(json_post(
                "/builder",
                r#"{"message": "ada@example.com"}"#,
                Some(&cookie),
            ))
            .await;
        assert_eq!(body_json(response).await["reply"], "What is your phone number?");

        let response = app
            .send(json_post("/builder", r#"{"message": "/resume"}"#, Some(&cookie)))
            .await;
        let body = body_json(response).await;
        assert_eq!(
            body["reply"],
            "⚠ Your resume isn’t ready yet. 3 compulsory question(s) remaining."
        );
        assert!(body.get("resume").is_none());
    }

    #[tokio::test]
    async fn test_builder_tolerates_missing_body() {
        let app = TestApp::new(ScriptedBackend::failing());
        let request = Request::builder()
            .method("POST")
            .uri("/builder")
            .body(Body::empty())
            .unwrap();
        let response = app.send(request).await;
        assert_eq!(body_json(response).await["reply"], "⚠ Please type something.");
    }

    #[tokio::test]
    async fn test_builder_finalize_then_download_pdf() {
        let app = TestApp::new(ScriptedBackend::with_results([
            Err("model down".to_string()),
            Ok("Ada Lovelace\nMathematician.".to_string()),
        ]));

        let response = app
            .send(json_post("/builder", r#"{"message": "Ada"}"#, None))
            .await;
        let cookie = session_cookie(&response).unwrap();

        let response = app.send(get("/download_resume", Some(&cookie))).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        for message in ["a@b.c", "555", "Computing", "Maths, Logic", "1", "2", "3", "4"] {
            app.send(json_post(
                "/builder",
                &format!(r#"{{"message": "{message}"}}"#),
                Some(&cookie),
            ))
            .await;
        }
        let response = app
            .send(json_post("/builder", r#"{"message": "5"}"#, Some(&cookie)))
            .await;
        let body = body_json(response).await;
        assert_eq!(body["resume"], "Ada Lovelace\nMathematician.");

        let response = app.send(get("/download_resume", Some(&cookie))).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            crate::render::PDF_MIME
        );
        assert!(body_bytes(response).await.starts_with(b"%PDF-"));
    }

    #[tokio::test]
    async fn test_generate_resume_requires_conversation() {
        let app = TestApp::new(ScriptedBackend::failing());
        let response = app.send(json_post("/generate_resume", "", None)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_bytes(response).await, b"No conversation yet.");

        let response = app.send(json_post("/generate_resume_docx", "", None)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_bytes(response).await, b"No data to build resume.");
    }

    #[tokio::test]
    async fn test_conversation_exports_pdf_then_docx_from_stored_record() {
        let app = TestApp::new(ScriptedBackend::new([
            "What is your name?",
            r#"{"contact": "Ada Lovelace", "summary": "Mathematician", "skills": ["Maths"]}"#,
        ]));

        let response = app
            .send(json_post(
                "/resume_builder",
                r#"{"message": "Help me build a resume"}"#,
                None,
            ))
            .await;
        let cookie = session_cookie(&response).unwrap();
        assert_eq!(body_json(response).await["reply"], "What is your name?");

        let response = app
            .send(json_post("/generate_resume", "", Some(&cookie)))
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"My_Resume.pdf\""
        );
        assert!(body_bytes(response).await.starts_with(b"%PDF-"));

        let response = app
            .send(json_post("/generate_resume_docx", "", Some(&cookie)))
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            crate::render::DOCX_MIME
        );
        assert!(body_bytes(response).await.starts_with(b"PK"));
        assert_eq!(app.backend.call_count(), 2);
    }

    #[tokio::test]
    async fn test_chat_replies_and_reports_errors() {
        let app = TestApp::new(ScriptedBackend::new(["<h1>Hello!</h1>"]));

        let response = app.send(json_post("/chat", r#"{"message": " "}"#, None)).await;
        assert_eq!(body_json(response).await["reply"], "⚠️ Please type something.");

        let response = app
            .send(json_post("/chat", r#"{"message": "hi"}"#, None))
            .await;
        let cookie = session_cookie(&response).unwrap();
        assert_eq!(body_json(response).await["reply"], "<h1>Hello!</h1>");

        let response = app
            .send(json_post("/chat", r#"{"message": "again"}"#, Some(&cookie)))
            .await;
        let reply = body_json(response).await["reply"].as_str().unwrap().to_string();
        assert!(reply.starts_with("Error: "));

        let (prompt, _) = &app.backend.prompts()[1];
        assert!(prompt.starts_with("user: hi\nassistant: <h1>Hello!</h1>\nuser: again"));
    }

    fn multipart_request(fields: &[(&str, Option<&str>, &str)]) -> Request<Body> {
        let fields: Vec<_> = fields
            .iter()
            .map(|(name, file_name, value)| (*name, *file_name, value.as_bytes()))
            .collect();
        multipart_bytes(&fields)
    }

    fn multipart_bytes(fields: &[(&str, Option<&str>, &[u8])]) -> Request<Body> {
        let boundary = "pathfinder-test-boundary";
        let mut body = Vec::new();
        for (name, file_name, value) in fields {
            body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
            let disposition = match file_name {
                Some(file_name) => format!(
                    "Content-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\n\
                     Content-Type: application/octet-stream\r\n\r\n"
                ),
                None => format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n"),
            };
            body.extend_from_slice(disposition.as_bytes());
            body.extend_from_slice(value);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{boundary}--\r\n").as_bytes());

        Request::builder()
            .method("POST")
            .uri("/analyze_resume")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_analyze_pasted_resume() {
        let app = TestApp::new(ScriptedBackend::new(["- ATS Score: 72"]));
        let response = app
            .send(multipart_request(&[
                ("jobDescription", None, "Rust engineer"),
                ("resumeText", None, "Ada, Rust and maths"),
            ]))
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["analysis"], "- ATS Score: 72");

        let (prompt, _) = &app.backend.prompts()[0];
        assert!(prompt.contains("Ada, Rust and maths"));
        assert!(prompt.contains("Rust engineer"));
    }

    #[tokio::test]
    async fn test_analyze_requires_both_inputs() {
        let app = TestApp::new(ScriptedBackend::failing());
        let response = app
            .send(multipart_request(&[("resumeText", None, "Ada")]))
            .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await["error"],
            "⚠️ Resume text/file and job description are required"
        );
        assert_eq!(app.backend.call_count(), 0);
    }

    #[tokio::test]
    async fn test_analyze_rejects_unsupported_upload() {
        let app = TestApp::new(ScriptedBackend::failing());
        let response = app
            .send(multipart_request(&[
                ("jobDescription", None, "Rust engineer"),
                ("resume", Some("cv.txt"), "plain text resume"),
            ]))
            .await;
        assert_eq!(
            body_json(response).await["error"],
            "Only PDF or DOCX files are supported"
        );
    }

    #[tokio::test]
    async fn test_analyze_accepts_uploads_over_two_mebibytes() {
        let app = TestApp::new(ScriptedBackend::new(["- ATS Score: 60"]));
        let resume_text = "Rust ".repeat(3 * 1024 * 1024 / 5);
        let response = app
            .send(multipart_request(&[
                ("jobDescription", None, "Rust engineer"),
                ("resumeText", None, &resume_text),
            ]))
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["analysis"], "- ATS Score: 60");
    }

    #[tokio::test]
    async fn test_analyze_rejects_uploads_over_the_limit() {
        let app = TestApp::new(ScriptedBackend::new(["unused"]));
        let resume_text = "a".repeat(MAX_UPLOAD_BYTES + 1);
        let response = app
            .send(multipart_request(&[
                ("jobDescription", None, "Rust engineer"),
                ("resumeText", None, &resume_text),
            ]))
            .await;
        assert!(response.status().is_client_error());
        assert_eq!(app.backend.call_count(), 0);
    }

    #[tokio::test]
    async fn test_analyze_reads_uploaded_docx() {
        let app = TestApp::new(ScriptedBackend::new(["- ATS Score: 81"]));
        let docx = crate::render::docx::build_docx(&crate::models::resume::ResumeRecord {
            contact: "Ada Lovelace".to_string(),
            skills: vec!["Mathematics".to_string(), "Rust".to_string()],
            ..Default::default()
        })
        .unwrap();

        let response = app
            .send(multipart_bytes(&[
                ("jobDescription", None, b"Rust engineer".as_slice()),
                ("resumeText", None, b"ignored when a file is sent".as_slice()),
                ("resume", Some("cv.docx"), docx.as_slice()),
            ]))
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["analysis"], "- ATS Score: 81");

        let (prompt, _) = &app.backend.prompts()[0];
        assert!(prompt.contains("Ada Lovelace"));
        assert!(prompt.contains("Mathematics, Rust"));
        assert!(!prompt.contains("ignored when a file is sent"));
    }

    #[tokio::test]
    async fn test_analyze_model_failure_is_bad_gateway() {
        let app = TestApp::new(ScriptedBackend::failing());
        let response = app
            .send(multipart_request(&[
                ("jobDescription", None, "Rust engineer"),
                ("resumeText", None, "Ada, Rust and maths"),
            ]))
            .await;
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let body = body_json(response).await;
        assert!(body.get("analysis").is_none());
        assert!(!body["error"].as_str().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_resume_builder_chat_reports_model_failure() {
        let app = TestApp::new(ScriptedBackend::failing());
        let response = app
            .send(json_post(
                "/resume_builder",
                r#"{"message": "I studied maths"}"#,
                None,
            ))
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        let cookie = session_cookie(&response).unwrap();
        let reply = body_json(response).await["reply"].as_str().unwrap().to_string();
        assert!(reply.starts_with("Error: "));

        // The user turn was kept, so export proceeds to the model and fails there.
        let response = app
            .send(json_post("/generate_resume", "", Some(&cookie)))
            .await;
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(app.backend.call_count(), 2);
    }
}
