//! Server API tests

use super::*;
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use spendwise_core::test_utils::stub_pipeline;
use spendwise_core::{
    ArtifactPaths, Category, ColumnTransformer, Pipeline, StubClassifier, FEATURE_SCHEMA,
};
use tower::ServiceExt;

fn setup_test_app(primary: Category, secondary: Category) -> Router {
    create_router(stub_pipeline(primary, secondary), ServerConfig::default())
}

fn setup_sample_app() -> Router {
    let models = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("../../models");
    let pipeline = Pipeline::load(&ArtifactPaths::in_dir(models)).unwrap();
    create_router(pipeline, ServerConfig::default())
}

/// Secondary model scores nothing usable, so every run fails after loading
fn setup_failing_app() -> Router {
    let width = FEATURE_SCHEMA.len();
    let pipeline = Pipeline::new(
        Box::new(ColumnTransformer::passthrough(&FEATURE_SCHEMA)),
        Box::new(StubClassifier::new(Category::Saver, width)),
        Box::new(StubClassifier::with_probabilities(vec![f64::NAN; 3], width)),
    )
    .unwrap();
    create_router(pipeline, ServerConfig::default())
}

async fn get_body_json(response: axum::response::Response) -> serde_json::Value {
    let body = response.into_body();
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn get_body_text(response: axum::response::Response) -> String {
    let body = response.into_body();
    let bytes = body.collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

fn post_form(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/")
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

const SCENARIO_A_FORM: &str = "Income=50000&Age=30&Dependents=1&Rent=15000&Loan_Repayment=5000\
&Insurance=2000&Groceries=6000&Transport=3000&Eating_Out=2000&Entertainment=1000\
&Utilities=2000&Healthcare=1000&Education=0&Miscellaneous=0";

// ========== Dashboard Tests ==========

#[tokio::test]
async fn test_dashboard_renders_form() {
    let app = setup_test_app(Category::Saver, Category::Saver);

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = get_body_text(response).await;
    assert!(html.contains("name=\"Loan_Repayment\""));
    assert!(html.contains("value=\"0\""));
    assert!(!html.contains("Predicted Category"));
}

#[tokio::test]
async fn test_dashboard_submission_renders_result() {
    let app = setup_test_app(Category::HeavySpender, Category::Saver);

    let response = app.oneshot(post_form(SCENARIO_A_FORM)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = get_body_text(response).await;
    assert!(html.contains("Predicted Category: 💸 Heavy Spender"));
    assert!(html.contains("₹13,000"));
    assert!(html.contains("7.80%"));
    assert!(html.contains("Set up a savings goal of ₹3,900 per month."));
    assert!(html.contains("models disagree"));
    // Values are echoed back into the form
    assert!(html.contains("name=\"Rent\" min=\"0\" step=\"100\" value=\"15000\""));
}

#[tokio::test]
async fn test_dashboard_rejects_negative_value() {
    let app = setup_test_app(Category::Saver, Category::Saver);

    let response = app
        .oneshot(post_form("Income=50000&Rent=-100"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let html = get_body_text(response).await;
    assert!(html.contains("Invalid value for Rent"));
    assert!(html.contains("value=\"-100\""));
    assert!(!html.contains("Predicted Category"));
}

#[tokio::test]
async fn test_dashboard_escapes_submitted_text() {
    let app = setup_test_app(Category::Saver, Category::Saver);

    let response = app
        .oneshot(post_form("Rent=%3Cb%3Ex%3C%2Fb%3E"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let html = get_body_text(response).await;
    assert!(!html.contains("<b>x</b>"));
    assert!(html.contains("&lt;b&gt;x&lt;/b&gt;"));
}

#[tokio::test]
async fn test_dashboard_pipeline_failure_renders_page() {
    let app = setup_failing_app();

    let response = app.oneshot(post_form(SCENARIO_A_FORM)).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(response.headers()["content-type"]
        .to_str()
        .unwrap()
        .starts_with("text/html"));
    let html = get_body_text(response).await;
    assert!(html.contains("Unable to produce a recommendation"));
    assert!(!html.contains("no usable scores"));
    assert!(html.contains("name=\"Age\" min=\"0\" step=\"100\" value=\"30\""));
    assert!(!html.contains("Predicted Category"));
}

#[tokio::test]
async fn test_dashboard_accepts_values_off_the_step() {
    let app = setup_test_app(Category::Saver, Category::Saver);

    let response = app
        .oneshot(post_form("Income=50000&Age=30&Rent=2050"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = get_body_text(response).await;
    assert!(html.contains("novalidate"));
    assert!(html.contains("value=\"2050\""));
}

// ========== Prediction API Tests ==========

#[tokio::test]
async fn test_predict_returns_recommendation() {
    let app = setup_test_app(Category::ModerateSpender, Category::ModerateSpender);

    let body = serde_json::json!({
        "Income": 50000, "Age": 30, "Dependents": 1, "Rent": 15000,
        "Loan_Repayment": 5000, "Insurance": 2000, "Groceries": 6000,
        "Transport": 3000, "Eating_Out": 2000, "Entertainment": 1000,
        "Utilities": 2000, "Healthcare": 1000
    });
    let response = app.oneshot(post_json("/api/predict", body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = get_body_json(response).await;
    assert_eq!(json["primary"]["category"], "moderate_spender");
    assert_eq!(json["models_agree"], true);
    assert_eq!(json["derived"]["Total_Expense"], 37000.0);
    assert_eq!(json["formatted"]["disposable_income"], "₹13,000");
    assert_eq!(json["advice"]["label"], "Moderate Spender");
    assert_eq!(json["breakdown"].as_array().unwrap().len(), 11);
    assert_eq!(json["input"]["Education"], 0);
}

#[tokio::test]
async fn test_predict_rejects_invalid_field() {
    let app = setup_test_app(Category::Saver, Category::Saver);

    let body = serde_json::json!({ "Income": 1000, "Groceries": 12.5 });
    let response = app.oneshot(post_json("/api/predict", body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = get_body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("Groceries"));
}

#[tokio::test]
async fn test_predict_rejects_non_object() {
    let app = setup_test_app(Category::Saver, Category::Saver);

    let response = app
        .oneshot(post_json("/api/predict", serde_json::json!([1, 2, 3])))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_predict_pipeline_failure_is_generic() {
    let app = setup_failing_app();

    let body = serde_json::json!({ "Income": 1000 });
    let response = app.oneshot(post_json("/api/predict", body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = get_body_json(response).await;
    assert_eq!(json["error"], "Unable to produce a recommendation");
}

#[tokio::test]
async fn test_predict_with_sample_models() {
    let app = setup_sample_app();

    let body = serde_json::json!({ "Income": 1000, "Rent": 1000, "Groceries": 500 });
    let response = app.oneshot(post_json("/api/predict", body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = get_body_json(response).await;
    assert_eq!(json["primary"]["category"], "heavy_spender");
    assert_eq!(json["primary"]["model"], "tree_ensemble");
    assert_eq!(json["secondary"]["model"], "dense_network");
    assert_eq!(json["formatted"]["disposable_income"], "₹-500");
}

// ========== Status Tests ==========

#[tokio::test]
async fn test_schema_lists_columns_in_order() {
    let app = setup_test_app(Category::Saver, Category::Saver);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/schema")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = get_body_json(response).await;
    assert_eq!(json["version"], 1);
    let columns = json["columns"].as_array().unwrap();
    assert_eq!(columns.len(), 17);
    assert_eq!(columns[0], "Income");
    assert_eq!(columns[16], "Desired_Savings_Percentage");
}

#[tokio::test]
async fn test_health_reports_fingerprints() {
    let app = setup_sample_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = get_body_json(response).await;
    assert_eq!(json["status"], "ok");
    let artifacts = json["artifacts"].as_array().unwrap();
    assert_eq!(artifacts.len(), 3);
    assert_eq!(artifacts[1]["role"], "primary");
    assert_eq!(artifacts[1]["sha256"].as_str().unwrap().len(), 64);
}

#[tokio::test]
async fn test_security_headers_present() {
    let app = setup_test_app(Category::Saver, Category::Saver);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/schema")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let headers = response.headers();
    assert_eq!(headers["x-content-type-options"], "nosniff");
    assert_eq!(headers["x-frame-options"], "DENY");
    assert!(headers.contains_key("content-security-policy"));
}

// ========== Error Mapping Tests ==========

#[tokio::test]
async fn test_internal_errors_are_sanitized() {
    let err = AppError::from_core(spendwise_core::Error::SchemaMismatch {
        missing: vec!["Income".to_string()],
        extra: vec![],
        out_of_order: vec![],
    });
    let response = err.into_response();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = get_body_json(response).await;
    let message = json["error"].as_str().unwrap();
    assert!(!message.contains("Income"));
}
