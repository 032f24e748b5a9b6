use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use futures::future::BoxFuture;
use serde_json::{json, Value as JsonValue};
use tokio_test::{assert_err, assert_ok};

use exam_portal_client::config::Config;
use exam_portal_client::error::{AppResult, AuthError};
use exam_portal_client::infrastructure::{ApiRequest, ApiResponse, Method, Transport};
use exam_portal_client::models::{AuthoredQuestion, ExamDraft, ExamType, Navigation, TokenPair};
use exam_portal_client::services::{AuthService, SessionStore, TokenScope};
use exam_portal_client::workflow::{Advance, ExamAuthoring, ExamPhase, ExamRunner};
use exam_portal_client::{AppError, PortalClient};

/// 按 "方法 路径" 返回预设响应，并记录所有请求
#[derive(Default)]
struct MockTransport {
    routes: Mutex<HashMap<String, VecDeque<ApiResponse>>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl MockTransport {
    fn route(&self, method: Method, path: &str, status: u16, body: JsonValue) -> &Self {
        self.routes
            .lock()
            .unwrap()
            .entry(format!("{} {}", method, path))
            .or_default()
            .push_back(ApiResponse::new(status, body));
        self
    }

    fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    fn calls_to(&self, path: &str) -> Vec<ApiRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.path == path)
            .collect()
    }
}

impl Transport for MockTransport {
    fn execute(&self, request: ApiRequest) -> BoxFuture<'_, AppResult<ApiResponse>> {
        Box::pin(async move {
            let key = format!("{} {}", request.method, request.path);
            self.requests.lock().unwrap().push(request);
            let response = self
                .routes
                .lock()
                .unwrap()
                .get_mut(&key)
                .and_then(VecDeque::pop_front)
                .unwrap_or_else(|| ApiResponse::new(404, json!({ "detail": "Not found." })));
            Ok(response)
        })
    }
}

fn logged_in_client(mock: &Arc<MockTransport>) -> PortalClient {
    let store = Arc::new(SessionStore::in_memory());
    store
        .store_tokens(
            TokenPair {
                access: "old-access".into(),
                refresh: "refresh-1".into(),
            },
            TokenScope::Session,
        )
        .unwrap();
    PortalClient::new(mock.clone(), store)
}

fn questions_json() -> JsonValue {
    json!([
        { "id": 11, "text": "2 + 2 = ?", "options": ["3", "4", "5", "6"], "question_type": "multiple-choice" },
        { "id": 12, "text": "Pick the noun", "options": {"A": "run", "B": "tree"}, "question_type": "multiple-choice" },
        { "id": 13, "text": "Describe a place", "question_type": "essay" }
    ])
}

fn exam_config(display_id: Option<u64>) -> Config {
    Config {
        exam_display_id: display_id,
        ..Config::default()
    }
}

// ========== 401 刷新重试 ==========

#[tokio::test]
async fn test_unauthorized_refreshes_once_then_retries() {
    let mock = Arc::new(MockTransport::default());
    mock.route(Method::Get, "exam-displays/5/questions/", 401, json!({ "detail": "expired" }))
        .route(Method::Get, "exam-displays/5/questions/", 200, questions_json())
        .route(Method::Post, "token/refresh/", 200, json!({ "access": "new-access" }));
    let client = logged_in_client(&mock);

    let questions = assert_ok!(client.fetch_questions(5).await);
    assert_eq!(questions.len(), 3);
    assert_eq!(questions[1].options, vec!["run", "tree"]);

    let requests = mock.requests();
    assert_eq!(requests.len(), 3);
    assert_eq!(requests[0].bearer.as_deref(), Some("old-access"));
    assert_eq!(requests[1].path, "token/refresh/");
    assert_eq!(requests[1].body, Some(json!({ "refresh": "refresh-1" })));
    assert_eq!(requests[2].bearer.as_deref(), Some("new-access"));
    assert_eq!(client.store().access_token().as_deref(), Some("new-access"));
    assert_eq!(client.store().scope(), Some(TokenScope::Session));
}

#[tokio::test]
async fn test_refresh_failure_redirects_to_login() {
    let mock = Arc::new(MockTransport::default());
    mock.route(Method::Get, "exam-displays/5/questions/", 401, json!({}))
        .route(Method::Post, "token/refresh/", 401, json!({ "detail": "Token is invalid" }));
    let client = logged_in_client(&mock);

    let err = client.fetch_questions(5).await.unwrap_err();
    assert!(matches!(err, AppError::Auth(AuthError::RefreshFailed { status: 401 })));
    assert_eq!(err.redirect(), Some(Navigation::Login));
    assert_eq!(mock.calls_to("exam-displays/5/questions/").len(), 1);
}

#[tokio::test]
async fn test_second_unauthorized_is_not_retried_again() {
    let mock = Arc::new(MockTransport::default());
    mock.route(Method::Get, "users/user/", 401, json!({}))
        .route(Method::Get, "users/user/", 401, json!({}))
        .route(Method::Post, "token/refresh/", 200, json!({ "access": "new-access" }));
    let client = logged_in_client(&mock);

    let err = client.fetch_users().await.unwrap_err();
    assert!(matches!(err, AppError::Auth(AuthError::LoginRequired { .. })));
    assert_eq!(mock.calls_to("token/refresh/").len(), 1);
    assert_eq!(mock.calls_to("users/user/").len(), 2);
}

#[tokio::test]
async fn test_missing_refresh_token_is_auth_error() {
    let mock = Arc::new(MockTransport::default());
    mock.route(Method::Get, "users/user/", 401, json!({}));
    let client = PortalClient::new(mock.clone(), Arc::new(SessionStore::in_memory()));

    let err = client.fetch_users().await.unwrap_err();
    assert!(matches!(err, AppError::Auth(AuthError::MissingTokens)));
    assert!(mock.calls_to("token/refresh/").is_empty());
}

// ========== 答题流程 ==========

#[tokio::test]
async fn test_exam_flow_from_bootstrap_to_submission() {
    let mock = Arc::new(MockTransport::default());
    mock.route(Method::Get, "exam-displays/5/questions/", 200, questions_json())
        .route(Method::Post, "exam-displays/5/start_session/", 201, json!({ "id": 42, "exam_display": 5 }))
        .route(Method::Post, "exam-displays/5/submit_answer/", 201, json!({}))
        .route(Method::Post, "exam-displays/5/submit_answer/", 201, json!({}))
        .route(
            Method::Post,
            "exam-displays/5/end_session/",
            200,
            json!({ "id": 3, "exam": 5, "math_score": 700.0, "total_score": 1400.0 }),
        );
    let client = logged_in_client(&mock);
    let mut runner = ExamRunner::new(client, &exam_config(Some(5)), Some(ExamType::Sat));

    assert_ok!(runner.bootstrap().await);
    assert_eq!(runner.state().phase(), &ExamPhase::Ready);
    assert_eq!(runner.state().exam().unwrap().name, "SAT Exam");
    assert_eq!(runner.state().session_id(), Some(42));

    runner.select_option(1).unwrap();
    runner.state_mut().next().unwrap();
    runner.state_mut().toggle_mark().unwrap();
    runner.state_mut().next().unwrap();
    runner.write_answer("A quiet library").unwrap();
    runner.state_mut().request_submit().unwrap();

    let navigation = runner.confirm_submit().await.unwrap();
    assert_eq!(navigation, Navigation::Dashboard);
    assert_eq!(runner.state().phase(), &ExamPhase::Submitted);
    assert_eq!(runner.submission().and_then(|s| s.total()), Some(1400.0));

    let answers = mock.calls_to("exam-displays/5/submit_answer/");
    assert_eq!(answers.len(), 2);
    let bodies: Vec<_> = answers.iter().filter_map(|r| r.body.clone()).collect();
    assert!(bodies.contains(&json!({ "question_id": 11, "answer": "4", "exam_session": 42 })));
    assert!(bodies.contains(&json!({ "question_id": 13, "answer": "A quiet library", "exam_session": 42 })));

    // 结束会话必须在所有答案之后发出
    let requests = mock.requests();
    let end = requests
        .iter()
        .position(|r| r.path == "exam-displays/5/end_session/")
        .unwrap();
    assert_eq!(requests[end].body, Some(json!({ "exam_session": 42 })));
    assert!(requests[..end]
        .iter()
        .filter(|r| r.path == "exam-displays/5/submit_answer/")
        .count()
        == 2);
}

#[tokio::test]
async fn test_end_session_failure_still_returns_to_dashboard() {
    let mock = Arc::new(MockTransport::default());
    mock.route(Method::Get, "exam-displays/5/questions/", 200, json!([{ "id": 1, "text": "q", "options": ["x", "y"] }]))
        .route(Method::Post, "exam-displays/5/start_session/", 201, json!({ "id": 8 }))
        .route(Method::Post, "exam-displays/5/end_session/", 500, json!({ "error": "boom" }));
    let client = logged_in_client(&mock);
    let mut runner = ExamRunner::new(client, &exam_config(Some(5)), None);

    runner.bootstrap().await.unwrap();
    runner.state_mut().toggle_mark().unwrap();
    runner.state_mut().request_submit().unwrap();

    assert_eq!(runner.confirm_submit().await.unwrap(), Navigation::Dashboard);
    assert_eq!(runner.state().phase(), &ExamPhase::Submitted);
    assert!(runner.submission().is_none());
}

fn single_question_runner(mock: &Arc<MockTransport>) -> ExamRunner {
    mock.route(Method::Get, "exam-displays/5/questions/", 200, json!([{ "id": 1, "text": "q", "options": ["3", "4"] }]))
        .route(Method::Post, "exam-displays/5/start_session/", 201, json!({ "id": 8 }))
        .route(Method::Post, "exam-displays/5/end_session/", 200, json!({ "id": 2, "exam": 5 }));
    ExamRunner::new(logged_in_client(mock), &exam_config(Some(5)), None)
}

#[tokio::test]
async fn test_answer_save_failure_is_not_retried_and_exam_continues() {
    let mock = Arc::new(MockTransport::default());
    mock.route(Method::Post, "exam-displays/5/submit_answer/", 500, json!({ "error": "boom" }));
    let mut runner = single_question_runner(&mock);
    runner.bootstrap().await.unwrap();

    assert_ok!(runner.select_option(1));
    assert_eq!(runner.state().answers()[0], "4");

    runner.state_mut().request_submit().unwrap();
    assert_eq!(runner.confirm_submit().await.unwrap(), Navigation::Dashboard);
    assert_eq!(runner.state().phase(), &ExamPhase::Submitted);
    assert_eq!(mock.calls_to("exam-displays/5/submit_answer/").len(), 1);
    assert_eq!(mock.calls_to("exam-displays/5/end_session/").len(), 1);
}

#[tokio::test]
async fn test_answer_save_with_failed_refresh_keeps_local_answer() {
    let mock = Arc::new(MockTransport::default());
    mock.route(Method::Post, "exam-displays/5/submit_answer/", 401, json!({ "detail": "expired" }))
        .route(Method::Post, "token/refresh/", 401, json!({ "detail": "Token is invalid or expired" }));
    let mut runner = single_question_runner(&mock);
    runner.bootstrap().await.unwrap();

    assert_ok!(runner.select_option(0));
    assert_eq!(runner.state().answers()[0], "3");

    runner.state_mut().request_submit().unwrap();
    assert_eq!(runner.confirm_submit().await.unwrap(), Navigation::Dashboard);
    assert_eq!(runner.state().phase(), &ExamPhase::Submitted);
    assert_eq!(mock.calls_to("exam-displays/5/submit_answer/").len(), 1);
    assert_eq!(mock.calls_to("token/refresh/").len(), 1);
}

#[tokio::test]
async fn test_missing_display_id_fails_without_requests() {
    let mock = Arc::new(MockTransport::default());
    let client = logged_in_client(&mock);
    let mut runner = ExamRunner::new(client, &exam_config(None), None);

    assert_err!(runner.bootstrap().await);
    assert!(matches!(runner.state().phase(), ExamPhase::Error(_)));
    assert!(mock.requests().is_empty());
}

#[tokio::test]
async fn test_load_error_then_retry() {
    let mock = Arc::new(MockTransport::default());
    mock.route(Method::Get, "exam-displays/5/questions/", 500, json!({ "error": "db down" }))
        .route(Method::Get, "exam-displays/5/questions/", 200, questions_json())
        .route(Method::Post, "exam-displays/5/start_session/", 201, json!({ "id": 9 }));
    let client = logged_in_client(&mock);
    let mut runner = ExamRunner::new(client, &exam_config(Some(5)), None);

    assert!(runner.bootstrap().await.is_err());
    assert!(matches!(runner.state().phase(), ExamPhase::Error(_)));
    assert!(mock.calls_to("exam-displays/5/start_session/").is_empty());

    assert_ok!(runner.retry().await);
    assert_eq!(runner.state().phase(), &ExamPhase::Ready);
    assert_eq!(runner.state().session_id(), Some(9));
}

#[tokio::test]
async fn test_empty_question_list_is_load_error() {
    let mock = Arc::new(MockTransport::default());
    mock.route(Method::Get, "exam-displays/5/questions/", 200, json!([]));
    let client = logged_in_client(&mock);
    let mut runner = ExamRunner::new(client, &exam_config(Some(5)), None);

    assert!(runner.bootstrap().await.is_err());
    assert!(matches!(runner.state().phase(), ExamPhase::Error(_)));
    assert!(mock.calls_to("exam-displays/5/start_session/").is_empty());
}

// ========== 试卷录入 ==========

fn structure_json() -> JsonValue {
    json!({
        "id": 7,
        "name": "Mock SAT",
        "exam_type": "sat",
        "sections": [
            { "id": 1, "name": "Reading and Writing", "modules": [
                { "id": 100, "name": "Module 1", "question_count": 1 },
                { "id": 101, "name": "Module 2", "question_count": 1 }
            ]},
            { "id": 2, "name": "Math", "modules": [
                { "id": 200, "name": "Module 1", "question_count": 1 }
            ]}
        ]
    })
}

fn created_question(id: u64, module: u64) -> JsonValue {
    json!({ "id": id, "module": module, "text": "q", "correct_answer": "C", "set": 1 })
}

#[tokio::test]
async fn test_authoring_cascades_to_exam_list() {
    let mock = Arc::new(MockTransport::default());
    mock.route(Method::Post, "sat-exams/", 201, json!({ "id": 7 }))
        .route(Method::Post, "sat-exams/7/create-structure/", 201, JsonValue::Null)
        .route(Method::Get, "sat-exams/7/", 200, structure_json())
        .route(Method::Post, "sat-questions/", 201, created_question(1, 100))
        .route(Method::Post, "sat-questions/", 201, created_question(2, 101))
        .route(Method::Post, "sat-questions/", 201, created_question(3, 200));
    let mut authoring = ExamAuthoring::new(logged_in_client(&mock));

    let draft = ExamDraft::new("Mock SAT", ExamType::Sat);
    assert_eq!(authoring.create_exam(&draft).await.unwrap(), 7);

    let draft_question = || AuthoredQuestion {
        text: "Which choice completes the text?".into(),
        correct_answer: "c".into(),
        ..AuthoredQuestion::default()
    };

    let first = authoring.add_question(draft_question()).await.unwrap();
    assert_eq!(first.advance, Advance::ModuleCompleted { module: "Module 1".into() });
    assert_eq!(first.navigation, None);

    let second = authoring.add_question(draft_question()).await.unwrap();
    assert!(matches!(second.advance, Advance::SectionCompleted { .. }));

    let last = authoring.add_question(draft_question()).await.unwrap();
    assert_eq!(last.advance, Advance::Finished);
    assert_eq!(last.navigation, Some(Navigation::ExamList(ExamType::Sat)));
    assert_eq!(last.navigation.unwrap().path(), "/exams/sat");

    let posted: Vec<_> = mock
        .calls_to("sat-questions/")
        .into_iter()
        .filter_map(|r| r.body)
        .collect();
    assert_eq!(posted.len(), 3);
    assert_eq!(posted[0]["module"], json!(100));
    assert_eq!(posted[1]["module"], json!(101));
    assert_eq!(posted[2]["module"], json!(200));
    assert!(posted.iter().all(|b| b["correct_answer"] == json!("C")));
    assert!(posted.iter().all(|b| b["set"] == json!(1)));

    let create = &mock.calls_to("sat-exams/")[0];
    assert!(create.body.as_ref().unwrap().get("ielts_type").is_none());
}

#[tokio::test]
async fn test_authoring_rejects_empty_name_and_empty_structure() {
    let mock = Arc::new(MockTransport::default());
    let mut authoring = ExamAuthoring::new(logged_in_client(&mock));
    assert!(authoring
        .create_exam(&ExamDraft::new("  ", ExamType::Gre))
        .await
        .unwrap_err()
        .as_validation()
        .is_some());
    assert!(mock.requests().is_empty());

    mock.route(Method::Post, "gre-exams/", 201, json!({ "id": 3 }))
        .route(Method::Post, "gre-exams/3/create-structure/", 201, JsonValue::Null)
        .route(Method::Get, "gre-exams/3/", 200, json!({ "id": 3, "name": "GRE", "exam_type": "gre", "sections": [] }));
    assert!(authoring
        .create_exam(&ExamDraft::new("GRE", ExamType::Gre))
        .await
        .is_err());
    assert!(authoring.wizard().is_none());
}

#[tokio::test]
async fn test_submit_exam_puts_tree() {
    let mock = Arc::new(MockTransport::default());
    mock.route(Method::Post, "sat-exams/", 201, json!({ "id": 7 }))
        .route(Method::Post, "sat-exams/7/create-structure/", 201, JsonValue::Null)
        .route(Method::Get, "sat-exams/7/", 200, structure_json())
        .route(Method::Put, "sat-exams/7/", 200, structure_json());
    let mut authoring = ExamAuthoring::new(logged_in_client(&mock));
    authoring
        .create_exam(&ExamDraft::new("Mock SAT", ExamType::Sat))
        .await
        .unwrap();

    assert_eq!(
        authoring.submit_exam().await.unwrap(),
        Navigation::ExamList(ExamType::Sat)
    );
    let put = mock
        .requests()
        .into_iter()
        .find(|r| r.method == Method::Put)
        .unwrap();
    assert_eq!(put.body.unwrap()["sections"].as_array().unwrap().len(), 2);
}

// ========== 登录 / 登出 ==========

#[tokio::test]
async fn test_login_stores_tokens_and_logout_clears_them() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storage.toml");
    let mock = Arc::new(MockTransport::default());
    mock.route(
        Method::Post,
        "users/login/",
        200,
        json!({ "access": "a1", "refresh": "r1", "user": { "id": 1, "username": "amy", "email": "amy@example.com" } }),
    )
    .route(Method::Post, "users/logout/", 205, JsonValue::Null);

    let store = Arc::new(SessionStore::load(&path).unwrap());
    let auth = AuthService::new(PortalClient::new(mock.clone(), store.clone()));

    assert_eq!(
        auth.login("amy@example.com", "secret1", true).await.unwrap(),
        Navigation::Dashboard
    );
    assert_eq!(store.scope(), Some(TokenScope::Persistent));
    assert_eq!(
        SessionStore::load(&path).unwrap().refresh_token().as_deref(),
        Some("r1")
    );

    assert_eq!(auth.logout().await.unwrap(), Navigation::Login);
    let logout = &mock.calls_to("users/logout/")[0];
    assert_eq!(logout.body, Some(json!({ "refresh_token": "r1" })));
    assert_eq!(logout.bearer.as_deref(), Some("a1"));
    assert!(store.access_token().is_none());
    assert!(SessionStore::load(&path).unwrap().access_token().is_none());
}

#[tokio::test]
async fn test_invalid_credentials() {
    let mock = Arc::new(MockTransport::default());
    mock.route(Method::Post, "users/login/", 401, json!({ "error": "Invalid credentials" }));
    let store = Arc::new(SessionStore::in_memory());
    let auth = AuthService::new(PortalClient::new(mock.clone(), store.clone()));

    let err = auth.login("amy@example.com", "wrong", false).await.unwrap_err();
    assert!(matches!(err, AppError::Auth(AuthError::InvalidCredentials)));
    assert!(store.access_token().is_none());
    assert!(mock.calls_to("token/refresh/").is_empty());
}

#[tokio::test]
async fn test_current_user_accepts_list_payload() {
    let mock = Arc::new(MockTransport::default());
    mock.route(
        Method::Get,
        "users/user/",
        200,
        json!([{ "id": 2, "username": "bo", "email": "bo@example.com", "test_type": "gmat" }]),
    );
    let auth = AuthService::new(logged_in_client(&mock));

    let user = auth.current_user().await.unwrap().unwrap();
    assert_eq!(user.username, "bo");
    assert_eq!(user.test_type, "gmat");
}

// ========== 首页 / 报告 / 管理员 ==========

#[tokio::test]
async fn test_dashboard_then_exam_list_for_user_type() {
    let mock = Arc::new(MockTransport::default());
    mock.route(
        Method::Get,
        "student/dashboard/",
        200,
        json!({
            "user": { "id": 3, "username": "amy", "email": "amy@example.com", "test_type": "GMAT" },
            "recent_tests": [{ "id": 1, "name": "Mock 1", "status": "Completed", "score": 650.0, "time_taken": "02:00:00" }],
            "upcoming_tests": [],
            "performance_data": [{ "section": "Quant", "score": 82 }]
        }),
    )
    .route(Method::Get, "gmat-exams/", 200, json!([{ "id": 9, "name": "GMAT Mock", "exam_type": "gmat", "sections": [] }]));
    let client = logged_in_client(&mock);

    let dashboard = client.student_dashboard().await.unwrap();
    assert_eq!(dashboard.recent_tests[0].name, "Mock 1");
    assert_eq!(dashboard.performance_data[0].section, "Quant");

    let exam_type = dashboard.exam_type().unwrap();
    let exams = client.list_exams(exam_type).await.unwrap();
    assert_eq!(exams.len(), 1);
    assert_eq!(mock.calls_to("gmat-exams/")[0].bearer.as_deref(), Some("old-access"));
}

#[tokio::test]
async fn test_reports_and_performance() {
    let mock = Arc::new(MockTransport::default());
    mock.route(
        Method::Get,
        "student/reports/",
        200,
        json!({
            "examScores": [{ "id": 1, "name": "Mock 1", "score": 1300, "date": "2024-05-01" }],
            "sectionProgress": [{ "section": "Math", "scores": [600, 650] }],
            "strengths": ["Algebra"],
            "weaknesses": ["Geometry"],
            "recommendedStudyAreas": ["Circles"]
        }),
    )
    .route(
        Method::Get,
        "users/student/performance/",
        200,
        json!([{ "section": "Reading", "score": 80 }, { "section": "Math", "score": 85 }]),
    );
    let client = logged_in_client(&mock);

    let report = client.student_reports().await.unwrap();
    assert_eq!(report.section_progress[0].scores, vec![600.0, 650.0]);
    assert_eq!(report.recommended_study_areas, vec!["Circles".to_string()]);

    let performance = client.student_performance().await.unwrap();
    assert_eq!(performance.len(), 2);
    assert_eq!(performance[1].score, 85.0);
}

#[tokio::test]
async fn test_dashboard_unauthorized_refreshes_then_retries() {
    let mock = Arc::new(MockTransport::default());
    mock.route(Method::Get, "student/dashboard/", 401, json!({ "detail": "expired" }))
        .route(Method::Post, "token/refresh/", 200, json!({ "access": "new-access" }))
        .route(Method::Get, "student/dashboard/", 200, json!({ "recentTests": [] }));
    let client = logged_in_client(&mock);

    let dashboard = client.student_dashboard().await.unwrap();
    assert!(dashboard.recent_tests.is_empty());
    let calls = mock.calls_to("student/dashboard/");
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[1].bearer.as_deref(), Some("new-access"));
}

#[tokio::test]
async fn test_admin_login_stores_tokens_and_rejects_non_staff() {
    let mock = Arc::new(MockTransport::default());
    mock.route(Method::Post, "users/admin/login/", 401, json!({ "error": "Invalid credentials" }))
        .route(Method::Post, "users/admin/login/", 200, json!({ "refresh": "admin-r", "access": "admin-a" }));
    let store = Arc::new(SessionStore::in_memory());
    let auth = AuthService::new(PortalClient::new(mock.clone(), store.clone()));

    let err = assert_err!(auth.admin_login("student@example.com", "secret1").await);
    assert!(matches!(err, AppError::Auth(AuthError::InvalidCredentials)));
    assert!(store.access_token().is_none());

    assert_eq!(
        auth.admin_login("admin@example.com", "secret1").await.unwrap(),
        Navigation::Dashboard
    );
    assert_eq!(store.access_token().as_deref(), Some("admin-a"));
    assert_eq!(store.scope(), Some(TokenScope::Persistent));
    let request = &mock.calls_to("users/admin/login/")[1];
    assert!(request.bearer.is_none());
    assert_eq!(
        request.body,
        Some(json!({ "email": "admin@example.com", "password": "secret1" }))
    );
}
