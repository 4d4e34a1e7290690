//! HTTP routes.
//!
//! - `GET /` serves the upload form
//! - `POST /merge` merges the `files[]` parts of a multipart form
//! - `GET /health` reports liveness
//!
//! Errors are rendered as the upload form with a notification, or as JSON when
//! the client asks for `application/json`.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, Multipart, State, multipart::MultipartError},
    http::{HeaderMap, StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use pdfstitch::{DeclaredType, ErrorKind, InputItem, MergeError, Merger};
use serde::Serialize;
use tokio::task::JoinError;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;

/// Multipart field that carries the uploads.
const FILES_FIELD: &str = "files[]";

/// Name of the merged download.
const DOWNLOAD_NAME: &str = "merged_output.pdf";

/// Shared state of all handlers.
#[derive(Clone)]
pub struct AppState {
    merger: Arc<Merger>,
}

/// Build the application router.
pub fn router(config: &ServerConfig) -> Router {
    let state = AppState {
        merger: Arc::new(Merger::new(config.merge.clone())),
    };

    Router::new()
        .route("/", get(index))
        .route("/merge", post(merge_files))
        .route("/health", get(health))
        .layer(DefaultBodyLimit::max(config.max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn index() -> Html<String> {
    Html(render_page(None))
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: pdfstitch::VERSION,
    })
}

async fn merge_files(
    State(state): State<AppState>,
    headers: HeaderMap,
    multipart: Multipart,
) -> Result<Response, ApiError> {
    let format = ResponseFormat::from_headers(&headers);

    let items = read_uploads(multipart)
        .await
        .map_err(|e| ApiError::upload(e, format))?;
    tracing::debug!(parts = items.len(), "Received upload");

    let merger = Arc::clone(&state.merger);
    let output = tokio::task::spawn_blocking(move || merger.merge(&items))
        .await
        .map_err(|e| ApiError::worker(e, format))?
        .map_err(|e| ApiError::merge(e, format))?;

    let disposition = format!("attachment; filename=\"{DOWNLOAD_NAME}\"");
    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        output.bytes,
    )
        .into_response())
}

/// Collect the `files[]` parts in submission order.
///
/// Parts without a file name are kept with an empty name, which the merger
/// treats as "nothing selected".
async fn read_uploads(mut multipart: Multipart) -> Result<Vec<InputItem>, MultipartError> {
    let mut items = Vec::new();

    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILES_FIELD) {
            continue;
        }
        let name = field.file_name().unwrap_or_default().to_string();
        let content = field.bytes().await?;
        items.push(InputItem::new(name, content.to_vec()));
    }

    Ok(items)
}

/// How an error is shown to the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ResponseFormat {
    Html,
    Json,
}

impl ResponseFormat {
    fn from_headers(headers: &HeaderMap) -> Self {
        let wants_json = headers
            .get(header::ACCEPT)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|accept| accept.contains("application/json"));

        if wants_json { Self::Json } else { Self::Html }
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    kind: Option<ErrorKind>,
}

/// A failed merge request, ready to be rendered.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    kind: Option<ErrorKind>,
    message: String,
    format: ResponseFormat,
}

impl ApiError {
    fn merge(err: MergeError, format: ResponseFormat) -> Self {
        let (status, message) = if err.is_client_error() {
            tracing::warn!(error = %err, "Merge rejected");
            (StatusCode::BAD_REQUEST, err.to_string())
        } else {
            tracing::error!(error = %err, "Merge failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "An error occurred while processing the files".to_string(),
            )
        };

        Self {
            status,
            kind: Some(err.kind()),
            message,
            format,
        }
    }

    fn upload(err: MultipartError, format: ResponseFormat) -> Self {
        let status = err.status();
        tracing::warn!(error = %err, %status, "Upload rejected");

        let message = if status == StatusCode::PAYLOAD_TOO_LARGE {
            "The upload is too large".to_string()
        } else {
            format!("The upload could not be read: {}", err.body_text())
        };

        Self {
            status,
            kind: None,
            message,
            format,
        }
    }

    fn worker(err: JoinError, format: ResponseFormat) -> Self {
        tracing::error!(error = %err, "Merge task did not complete");
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            kind: None,
            message: "An error occurred while processing the files".to_string(),
            format,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self.format {
            ResponseFormat::Json => {
                let body = ErrorBody {
                    error: self.message,
                    kind: self.kind,
                };
                (self.status, Json(body)).into_response()
            }
            ResponseFormat::Html => {
                (self.status, Html(render_page(Some(&self.message)))).into_response()
            }
        }
    }
}

/// The upload form, optionally with an error notification above it.
fn render_page(error: Option<&str>) -> String {
    let accept = DeclaredType::ACCEPTED
        .iter()
        .map(|ext| format!(".{ext}"))
        .collect::<Vec<_>>()
        .join(",");

    let notice = error
        .map(|message| {
            let escaped = html_escape::encode_text(message).replace('\n', "<br>");
            format!("    <div class=\"error\" role=\"alert\">{escaped}</div>\n")
        })
        .unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <title>pdfstitch</title>
    <style>
        body {{ font-family: sans-serif; max-width: 40em; margin: 3em auto; }}
        .error {{ background: #fdecea; color: #611a15; padding: 0.75em 1em; margin-bottom: 1em; }}
    </style>
</head>
<body>
    <h1>Merge PDFs and images</h1>
{notice}    <form action="/merge" method="post" enctype="multipart/form-data">
        <input type="file" name="{FILES_FIELD}" accept="{accept}" multiple>
        <button type="submit">Merge</button>
    </form>
    <p>Files are merged in the order they are selected.</p>
</body>
</html>
"#
    )
}
