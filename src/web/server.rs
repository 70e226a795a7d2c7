use axum::{
    extract::{rejection::JsonRejection, DefaultBodyLimit, State},
    http::{HeaderMap, HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower::limit::ConcurrencyLimitLayer;
use tower::ServiceBuilder;
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::timeout::TimeoutLayer;

use crate::access::{AccessGate, Credentials, NonEmptyCredentials, OpenGate};
use crate::catalog::store::ConditionCatalog;
use crate::cli::ServeArgs;
use crate::core::types::{EMERGENCY_ADVISORY, QUICK_SCAN_ACTION};
use crate::matching::engine::{MatchSummary, SymptomMatcher};
use crate::utils::validation::{clamp_top_k, validate_query, ValidationError};

/// Request body limit; queries are capped far below this by validation
pub const MAX_BODY_SIZE: usize = 64 * 1024;

/// Header carrying the caller's username for the access gate
pub const USERNAME_HEADER: &str = "x-username";

/// Header carrying the caller's password for the access gate
pub const PASSWORD_HEADER: &str = "x-password";

/// Shared application state
///
/// Built once at startup and shared read-only across all handlers.
pub struct AppState {
    pub matcher: SymptomMatcher,
    pub gate: Box<dyn AccessGate>,
}

impl AppState {
    pub fn new(matcher: SymptomMatcher, gate: Box<dyn AccessGate>) -> Self {
        Self { matcher, gate }
    }
}

/// Enhanced error response
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub error_type: String,
    pub details: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    /// Free-text symptoms
    #[serde(default)]
    pub symptoms: String,
    /// Number of conditions to return (defaults to the matcher's configured `top_k`)
    #[serde(default)]
    pub top_k: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct ScanRequest {
    /// Main symptom
    #[serde(default)]
    pub symptom: String,
}

#[derive(Serialize)]
struct AnalyzeResponse {
    advisory: &'static str,
    matches: Vec<MatchSummary>,
    processing_info: ProcessingInfo,
}

#[derive(Serialize)]
struct ScanResponse {
    advisory: &'static str,
    #[serde(rename = "match")]
    best: Option<MatchSummary>,
    action: Option<&'static str>,
}

#[derive(Serialize)]
struct ProcessingInfo {
    processing_time_ms: u64,
    top_k: usize,
    catalog_size: usize,
}

/// Create a safe error response that prevents information disclosure
/// while logging detailed errors server-side for debugging
pub fn create_safe_error_response(
    error_type: &str,
    user_message: &str,
    internal_error: Option<&str>,
) -> ErrorResponse {
    if let Some(internal_msg) = internal_error {
        tracing::error!("Internal error ({}): {}", error_type, internal_msg);
    }

    ErrorResponse {
        error: user_message.to_string(),
        error_type: error_type.to_string(),
        details: None, // Never expose internal details to prevent information disclosure
    }
}

/// Run the web server
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded, the matcher cannot be
/// built, the tokio runtime cannot be created, or the server fails to start.
pub fn run(args: ServeArgs) -> anyhow::Result<()> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async move { run_server(args).await })
}

/// Build the shared state for `serve` from its arguments
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded or the matcher cannot be built.
pub fn build_state(args: &ServeArgs) -> anyhow::Result<Arc<AppState>> {
    let catalog = ConditionCatalog::load(args.catalog.as_deref())?;
    let matcher = SymptomMatcher::from_catalog(&catalog)?;

    let gate: Box<dyn AccessGate> = if args.require_login {
        Box::new(NonEmptyCredentials)
    } else {
        Box::new(OpenGate)
    };

    tracing::info!(
        "Matcher ready: {} conditions, {} terms, gate '{}'",
        matcher.records().len(),
        matcher.model().vocabulary_len(),
        gate.name()
    );

    Ok(Arc::new(AppState::new(matcher, gate)))
}

/// Routes plus security headers, timeout, concurrency and body limits.
///
/// Rate limiting is added by [`create_router`], since it keys on the peer
/// address and needs connect info from the listener.
pub fn api_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/api/catalog", get(catalog_handler))
        .route("/api/analyze", post(analyze_handler))
        .route("/api/scan", post(scan_handler))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                // Security headers for browser protection
                .layer(SetResponseHeaderLayer::if_not_present(
                    HeaderName::from_static("x-content-type-options"),
                    HeaderValue::from_static("nosniff"),
                ))
                .layer(SetResponseHeaderLayer::if_not_present(
                    HeaderName::from_static("x-frame-options"),
                    HeaderValue::from_static("DENY"),
                ))
                .layer(SetResponseHeaderLayer::if_not_present(
                    HeaderName::from_static("referrer-policy"),
                    HeaderValue::from_static("strict-origin-when-cross-origin"),
                ))
                // Request timeout to prevent slow client attacks
                .layer(TimeoutLayer::with_status_code(
                    StatusCode::REQUEST_TIMEOUT,
                    Duration::from_secs(10),
                ))
                // Limit concurrent requests to prevent DOS
                .layer(ConcurrencyLimitLayer::new(100))
                .layer(DefaultBodyLimit::max(MAX_BODY_SIZE)),
        )
}

/// Create the application router with all routes and middleware configured.
#[allow(clippy::missing_panics_doc)] // Panics only on invalid governor config (constants are valid)
pub fn create_router(state: Arc<AppState>) -> Router {
    // Configure IP-based rate limiting
    let governor_conf = GovernorConfigBuilder::default()
        .per_second(10) // 10 requests per second per IP
        .burst_size(50) // Allow bursts of 50 requests
        .finish()
        .unwrap();

    api_router(state).layer(GovernorLayer {
        config: Arc::new(governor_conf),
    })
}

async fn run_server(args: ServeArgs) -> anyhow::Result<()> {
    let state = build_state(&args)?;
    let app = create_router(state);

    let addr = format!("{}:{}", args.address, args.port);
    println!("Starting symptom-matcher web server at http://{addr}");

    if args.open {
        let _ = open::that(format!("http://{addr}/api/catalog"));
    }

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

async fn health_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Return list of conditions in the reference table
async fn catalog_handler(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let conditions: Vec<serde_json::Value> = state
        .matcher
        .records()
        .iter()
        .map(|c| {
            serde_json::json!({
                "id": c.id().0,
                "name": c.name,
                "symptoms": c.symptoms,
                "specialist": c.specialist,
                "precautions": c.precautions,
            })
        })
        .collect();

    Json(serde_json::json!({
        "count": conditions.len(),
        "conditions": conditions,
    }))
}

/// Top conditions with confidence, specialist and precautions
async fn analyze_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Response {
    let start_time = std::time::Instant::now();

    if let Err(response) = check_access(&state, &headers) {
        return *response;
    }
    let request = match read_body(payload) {
        Ok(request) => request,
        Err(response) => return *response,
    };
    if let Err(response) = check_query(&request.symptoms) {
        return *response;
    }

    let top_k = clamp_top_k(request.top_k.unwrap_or(state.matcher.config().top_k));
    let matches = state.matcher.rank(&request.symptoms, top_k);

    tracing::debug!(top_k, results = matches.len(), "analyze request");

    #[allow(clippy::cast_possible_truncation)] // Processing time won't exceed u64
    let processing_time = start_time.elapsed().as_millis() as u64;

    Json(AnalyzeResponse {
        advisory: EMERGENCY_ADVISORY,
        matches: matches
            .iter()
            .enumerate()
            .map(|(i, m)| m.summary(i + 1))
            .collect(),
        processing_info: ProcessingInfo {
            processing_time_ms: processing_time,
            top_k,
            catalog_size: state.matcher.records().len(),
        },
    })
    .into_response()
}

/// Single best condition for a main symptom
async fn scan_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    payload: Result<Json<ScanRequest>, JsonRejection>,
) -> Response {
    if let Err(response) = check_access(&state, &headers) {
        return *response;
    }
    let request = match read_body(payload) {
        Ok(request) => request,
        Err(response) => return *response,
    };
    if let Err(response) = check_query(&request.symptom) {
        return *response;
    }

    let best = state.matcher.best_match(&request.symptom);
    let action = best.as_ref().map(|_| QUICK_SCAN_ACTION);

    Json(ScanResponse {
        advisory: EMERGENCY_ADVISORY,
        best: best.map(|m| m.summary(1)),
        action,
    })
    .into_response()
}

/// Read gate credentials from the request headers
fn credentials_from_headers(headers: &HeaderMap) -> Option<Credentials> {
    let username = headers.get(USERNAME_HEADER)?.to_str().ok()?;
    let password = headers.get(PASSWORD_HEADER)?.to_str().ok()?;
    Some(Credentials::new(username, password))
}

fn check_access(state: &AppState, headers: &HeaderMap) -> Result<(), Box<Response>> {
    let credentials = credentials_from_headers(headers);
    if state.gate.admit(credentials.as_ref()) {
        return Ok(());
    }

    tracing::debug!(gate = state.gate.name(), "request refused by access gate");
    Err(Box::new(
        (
            StatusCode::UNAUTHORIZED,
            Json(create_safe_error_response(
                "login_required",
                "Please log in to continue",
                None,
            )),
        )
            .into_response(),
    ))
}

/// Unwrap a JSON body, answering rejections with an `ErrorResponse`
fn read_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, Box<Response>> {
    match payload {
        Ok(Json(body)) => Ok(body),
        Err(rejection) => Err(Box::new(
            (
                rejection.status(),
                Json(create_safe_error_response(
                    "invalid_request",
                    "Request body is not valid JSON",
                    Some(&rejection.body_text()),
                )),
            )
                .into_response(),
        )),
    }
}

fn check_query(text: &str) -> Result<(), Box<Response>> {
    match validate_query(text) {
        Ok(_) => Ok(()),
        Err(ValidationError::QueryTooLong) => Err(Box::new(
            (
                StatusCode::PAYLOAD_TOO_LARGE,
                Json(create_safe_error_response(
                    "query_too_long",
                    "Symptom text exceeds the maximum length",
                    None,
                )),
            )
                .into_response(),
        )),
        Err(ValidationError::InvalidCharacters) => Err(Box::new(
            (
                StatusCode::BAD_REQUEST,
                Json(create_safe_error_response(
                    "invalid_query",
                    "Symptom text contains invalid characters",
                    None,
                )),
            )
                .into_response(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    use crate::utils::validation::MAX_QUERY_LENGTH;

    fn test_state(gate: Box<dyn AccessGate>) -> Arc<AppState> {
        let catalog = ConditionCatalog::load_embedded().unwrap();
        let matcher = SymptomMatcher::from_catalog(&catalog).unwrap();
        Arc::new(AppState::new(matcher, gate))
    }

    fn post_json(uri: &str, body: &serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let app = api_router(test_state(Box::new(OpenGate)));
        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get("x-content-type-options").unwrap(),
            "nosniff"
        );
        assert_eq!(body_json(response).await["status"], "ok");
    }

    #[tokio::test]
    async fn test_catalog_lists_conditions() {
        let app = api_router(test_state(Box::new(OpenGate)));
        let response = app
            .oneshot(Request::builder().uri("/api/catalog").body(Body::empty()).unwrap())
            .await
            .unwrap();

        let json = body_json(response).await;
        assert_eq!(json["count"], 6);
        assert_eq!(json["conditions"][1]["id"], "heart_attack");
    }

    #[tokio::test]
    async fn test_analyze_returns_top_three() {
        let app = api_router(test_state(Box::new(OpenGate)));
        let request = post_json(
            "/api/analyze",
            &serde_json::json!({ "symptoms": "fever, cough, chest pain" }),
        );
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        let matches = json["matches"].as_array().unwrap();
        assert_eq!(matches.len(), 3);
        assert_eq!(matches[0]["name"], "Pneumonia");
        assert_eq!(matches[0]["rank"], 1);
        assert_eq!(matches[0]["specialist"], "Pulmonologist");
        assert_eq!(json["advisory"], EMERGENCY_ADVISORY);
        assert_eq!(json["processing_info"]["top_k"], 3);
    }

    #[tokio::test]
    async fn test_analyze_blank_is_empty() {
        let app = api_router(test_state(Box::new(OpenGate)));
        let request = post_json("/api/analyze", &serde_json::json!({ "symptoms": "   " }));
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert!(json["matches"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_analyze_clamps_top_k() {
        let app = api_router(test_state(Box::new(OpenGate)));
        let request = post_json(
            "/api/analyze",
            &serde_json::json!({ "symptoms": "headache", "top_k": 0 }),
        );
        let json = body_json(app.oneshot(request).await.unwrap()).await;
        assert_eq!(json["matches"].as_array().unwrap().len(), 1);
        assert_eq!(json["matches"][0]["name"], "Hypertension");
    }

    #[tokio::test]
    async fn test_analyze_rejects_long_query() {
        let app = api_router(test_state(Box::new(OpenGate)));
        let request = post_json(
            "/api/analyze",
            &serde_json::json!({ "symptoms": "a".repeat(MAX_QUERY_LENGTH + 1) }),
        );
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(body_json(response).await["error_type"], "query_too_long");
    }

    #[tokio::test]
    async fn test_scan_returns_single_match() {
        let app = api_router(test_state(Box::new(OpenGate)));
        let request = post_json("/api/scan", &serde_json::json!({ "symptom": "wheezing" }));
        let json = body_json(app.oneshot(request).await.unwrap()).await;

        assert_eq!(json["match"]["name"], "Asthma");
        assert_eq!(json["action"], QUICK_SCAN_ACTION);
    }

    #[tokio::test]
    async fn test_scan_blank_has_no_match() {
        let app = api_router(test_state(Box::new(OpenGate)));
        let request = post_json("/api/scan", &serde_json::json!({ "symptom": "" }));
        let json = body_json(app.oneshot(request).await.unwrap()).await;

        assert!(json["match"].is_null());
        assert!(json["action"].is_null());
    }

    #[tokio::test]
    async fn test_gate_refuses_without_credentials() {
        let app = api_router(test_state(Box::new(NonEmptyCredentials)));
        let request = post_json("/api/analyze", &serde_json::json!({ "symptoms": "fever" }));
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let json = body_json(response).await;
        assert_eq!(json["error_type"], "login_required");
        assert!(json["details"].is_null());
    }

    #[tokio::test]
    async fn test_gate_admits_with_credentials() {
        let app = api_router(test_state(Box::new(NonEmptyCredentials)));
        let mut request = post_json("/api/scan", &serde_json::json!({ "symptom": "thirst" }));
        request
            .headers_mut()
            .insert(USERNAME_HEADER, HeaderValue::from_static("asha"));
        request
            .headers_mut()
            .insert(PASSWORD_HEADER, HeaderValue::from_static("secret"));

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["match"]["name"], "Diabetes");
    }

    fn post_raw(uri: &str, content_type: &str, body: &'static str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", content_type)
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_malformed_body_is_json_error() {
        let app = api_router(test_state(Box::new(OpenGate)));
        let request = post_raw("/api/analyze", "application/json", "{not json");
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.headers().get("content-type").unwrap(),
            "application/json"
        );
        let json = body_json(response).await;
        assert_eq!(json["error_type"], "invalid_request");
        assert_eq!(json["error"], "Request body is not valid JSON");
        assert!(json["details"].is_null());
    }

    #[tokio::test]
    async fn test_wrong_content_type_is_json_error() {
        let app = api_router(test_state(Box::new(OpenGate)));
        let request = post_raw("/api/scan", "text/plain", r#"{"symptom": "fever"}"#);
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert_eq!(body_json(response).await["error_type"], "invalid_request");
    }

    #[tokio::test]
    async fn test_gate_checked_before_body() {
        let app = api_router(test_state(Box::new(NonEmptyCredentials)));
        let request = post_raw("/api/analyze", "application/json", "{not json");
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_json(response).await["error_type"], "login_required");
    }
}
