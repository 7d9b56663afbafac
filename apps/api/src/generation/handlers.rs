//! Axum route handlers for the AI generation endpoints.
//!
//! Each handler: validate required field → build prompt → completion gateway →
//! sanitize for its task. Gateway failures arrive as fallback text and are
//! sanitized like any other completion.

use axum::{extract::State, Json};
use tracing::{info, warn};

use crate::errors::{AppError, AppJson};
use crate::generation::filters::{
    sanitize_bullets, sanitize_improved, sanitize_skills, sanitize_summary,
};
use crate::generation::models::{
    BulletsRequest, BulletsResponse, ImproveTextRequest, ImproveTextResponse, SkillsRequest,
    SkillsResponse, SummaryRequest, SummaryResponse, TaskKind,
};
use crate::generation::prompts::{
    build_bullets_prompt, build_improve_prompt, build_skills_prompt, build_summary_prompt,
};
use crate::llm_client::TextGenerator;
use crate::state::AppState;

/// Runs the prompt through the gateway and returns the raw completion text.
async fn complete_for(generator: &dyn TextGenerator, kind: TaskKind, prompt: &str) -> String {
    let completion = generator.complete(prompt).await;
    if completion.is_fallback() {
        warn!("{kind:?}: upstream unavailable, sanitizing fallback text");
    }
    completion.text
}

/// POST /ai/generate-summary
pub async fn handle_generate_summary(
    State(state): State<AppState>,
    AppJson(request): AppJson<SummaryRequest>,
) -> Result<Json<SummaryResponse>, AppError> {
    let title = request.validate()?;
    info!("Generating summary for {title}");

    let prompt = build_summary_prompt(title, &request);
    let raw = complete_for(state.generator.as_ref(), TaskKind::Summary, &prompt).await;
    let summary = sanitize_summary(&raw);

    Ok(Json(SummaryResponse { summary }))
}

/// POST /ai/generate-bullets
pub async fn handle_generate_bullets(
    State(state): State<AppState>,
    AppJson(request): AppJson<BulletsRequest>,
) -> Result<Json<BulletsResponse>, AppError> {
    let role = request.validate()?;
    info!("Generating bullets for {role}");

    let prompt = build_bullets_prompt(role, &request);
    let raw = complete_for(state.generator.as_ref(), TaskKind::Bullets, &prompt).await;
    let bullets = sanitize_bullets(&raw);

    Ok(Json(BulletsResponse { bullets }))
}

/// POST /ai/improve-text
pub async fn handle_improve_text(
    State(state): State<AppState>,
    AppJson(request): AppJson<ImproveTextRequest>,
) -> Result<Json<ImproveTextResponse>, AppError> {
    let text = request.validate()?;
    info!("Improving text ({} chars)", text.chars().count());

    let prompt = build_improve_prompt(text, &request);
    let raw = complete_for(state.generator.as_ref(), TaskKind::ImproveText, &prompt).await;
    let improved = sanitize_improved(&raw);

    Ok(Json(ImproveTextResponse { improved }))
}

/// POST /ai/suggest-skills
pub async fn handle_suggest_skills(
    State(state): State<AppState>,
    AppJson(request): AppJson<SkillsRequest>,
) -> Result<Json<SkillsResponse>, AppError> {
    let title = request.validate()?;
    info!("Suggesting skills for {title}");

    let prompt = build_skills_prompt(title, &request);
    let raw = complete_for(state.generator.as_ref(), TaskKind::Skills, &prompt).await;
    let skills = sanitize_skills(&raw);

    Ok(Json(SkillsResponse { skills }))
}
