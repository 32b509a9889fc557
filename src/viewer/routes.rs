use super::PageData;
use super::assets::INDEX_HTML;
use crate::client::{BackendClient, ClientError};
use crate::render::{RenderContext, Visualization};
use crate::style;
use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use serde::Deserialize;
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// State shared across handlers: the current session and the backend client.
pub struct AppState {
    session: RwLock<Option<RenderContext>>,
    client: BackendClient,
}

impl AppState {
    pub fn new(client: BackendClient) -> Self {
        Self {
            session: RwLock::new(None),
            client,
        }
    }

    /// Start with an analysis loaded from disk.
    pub fn with_session(client: BackendClient, ctx: RenderContext) -> Self {
        Self {
            session: RwLock::new(Some(ctx)),
            client,
        }
    }
}

struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    fn no_session() -> Self {
        Self::new(StatusCode::NOT_FOUND, "No repository has been analyzed yet")
    }
}

impl From<ClientError> for ApiError {
    fn from(err: ClientError) -> Self {
        let status = match err {
            ClientError::InvalidUrl(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::BAD_GATEWAY,
        };
        Self::new(status, err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(serde_json::json!({ "error": self.message })),
        )
            .into_response()
    }
}

type ApiResult = Result<Response, ApiError>;

#[derive(Deserialize)]
struct AnalyzeBody {
    url: String,
}

#[derive(Deserialize)]
struct ExplainBody {
    file_path: String,
}

pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any);

    Router::new()
        .route("/", get(index_handler))
        .route("/api/analysis", get(analysis_handler))
        .route("/api/analyze", post(analyze_handler))
        .route("/api/scene/{kind}", get(scene_handler))
        .route("/api/charts", get(charts_handler))
        .route("/api/report", get(report_handler))
        .route("/api/explain-code", post(explain_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the viewer on `127.0.0.1:port` and serve until interrupted.
pub async fn serve(
    state: AppState,
    port: u16,
    open_browser: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let app = router(Arc::new(state));

    let addr = format!("127.0.0.1:{}", port);
    let url = format!("http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    style::status(&format!("Viewer running at {}", style::url(&url)));
    style::hint("Press Ctrl+C to stop");

    if open_browser {
        if let Err(e) = open::that(&url) {
            style::warning(&format!("Could not open browser: {}", e));
        }
    }

    axum::serve(listener, app).await?;

    Ok(())
}

async fn index_handler() -> impl IntoResponse {
    Html(INDEX_HTML)
}

async fn analysis_handler(State(state): State<Arc<AppState>>) -> ApiResult {
    let session = state.session.read().await;
    let ctx = session.as_ref().ok_or_else(ApiError::no_session)?;
    Ok(Json(PageData::new(ctx)).into_response())
}

async fn analyze_handler(
    State(state): State<Arc<AppState>>,
    Json(body): Json<AnalyzeBody>,
) -> ApiResult {
    let url = body.url.trim();
    if url.is_empty() {
        return Err(ApiError::new(StatusCode::BAD_REQUEST, "Please enter a GitHub repository URL"));
    }

    let analysis = state.client.analyze(url).await?;
    let ctx = RenderContext::new(analysis).with_repo_url(url);
    let response = Json(PageData::new(&ctx)).into_response();

    *state.session.write().await = Some(ctx);
    tracing::info!(repo = url, "session replaced");
    Ok(response)
}

async fn scene_handler(
    State(state): State<Arc<AppState>>,
    Path(kind): Path<String>,
) -> ApiResult {
    let kind: Visualization = kind
        .parse()
        .map_err(|e: crate::render::UnknownVisualization| {
            ApiError::new(StatusCode::BAD_REQUEST, e.to_string())
        })?;

    let mut session = state.session.write().await;
    let ctx = session.as_mut().ok_or_else(ApiError::no_session)?;
    Ok(Json(ctx.render(kind)).into_response())
}

async fn charts_handler(State(state): State<Arc<AppState>>) -> ApiResult {
    let session = state.session.read().await;
    let ctx = session.as_ref().ok_or_else(ApiError::no_session)?;
    Ok(Json(ctx.charts()).into_response())
}

async fn report_handler(State(state): State<Arc<AppState>>) -> ApiResult {
    let session = state.session.read().await;
    let ctx = session.as_ref().ok_or_else(ApiError::no_session)?;
    Ok(Json(ctx.report()).into_response())
}

async fn explain_handler(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ExplainBody>,
) -> ApiResult {
    let repo_url = {
        let session = state.session.read().await;
        let ctx = session.as_ref().ok_or_else(ApiError::no_session)?;
        ctx.repo_url()
            .map(str::to_string)
            .ok_or_else(|| ApiError::new(StatusCode::BAD_REQUEST, "Session has no repository URL"))?
    };

    let explanation = state.client.explain(&repo_url, &body.file_path).await?;
    Ok(Json(serde_json::json!({ "explanation": explanation })).into_response())
}
