use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tracing::info;

use crate::errors::{AppError, AppJson};
use crate::state::AppState;

const DEFAULT_FILE_NAME: &str = "resume.pdf";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PdfRequest {
    pub html: Option<String>,
    pub file_name: Option<String>,
}

/// Makes a caller-supplied name safe inside a quoted header parameter.
fn attachment_file_name(requested: Option<&str>) -> String {
    let cleaned: String = requested
        .unwrap_or_default()
        .chars()
        .filter(|c| !c.is_control() && !matches!(c, '"' | '\\' | '/'))
        .collect();
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        DEFAULT_FILE_NAME.to_string()
    } else {
        cleaned.to_string()
    }
}

/// POST /generate-pdf
///
/// Renders the posted HTML and returns it as a PDF attachment.
pub async fn handle_generate_pdf(
    State(state): State<AppState>,
    AppJson(request): AppJson<PdfRequest>,
) -> Result<Response, AppError> {
    let html = request
        .html
        .as_deref()
        .filter(|h| !h.trim().is_empty())
        .ok_or_else(|| AppError::Validation("HTML content is required".to_string()))?;

    let file_name = attachment_file_name(request.file_name.as_deref());
    let pdf = state.renderer.render(html).await?;
    info!("PDF generated: {file_name} ({} bytes)", pdf.len());

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{file_name}\""),
            ),
        ],
        pdf,
    )
        .into_response())
}
