use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Context;
use axum::extract::{Path, State};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::completion::CompletionClient;
use crate::config::Config;
use crate::error::{ApiError, ApiJson};
use crate::judge;
use crate::templates::{self, TemplateStore};

const GENERATE_SYSTEM: &str =
    "You are a skilled debater and evaluator. Provide well-reasoned, strategic arguments.";
const DEBATER_SYSTEM: &str = "You are an expert debater with deep knowledge across many domains. \
    You MUST provide specific, evidence-based arguments with concrete examples, statistics, and \
    real-world cases. Avoid generic or vague statements. Be precise and detailed.";
const JUDGE_SYSTEM: &str = "You are an expert debate judge with deep analytical skills. Evaluate \
    arguments based on specificity, evidence quality, and direct relevance to the topic. Penalize \
    vague or generic statements.";

const SAMPLING_TEMPERATURE: f32 = 0.7;
const MAX_TOKENS: u32 = 1000;
const JUDGE_MAX_TOKENS: u32 = 800;

#[derive(Clone)]
pub struct AppState {
    pub client: Arc<CompletionClient>,
    pub templates: TemplateStore,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub message: &'static str,
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        message: "Debate server is running",
    })
}

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    #[serde(default)]
    pub prompt: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub response: String,
}

pub async fn generate(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<GenerateRequest>,
) -> Result<Json<GenerateResponse>, ApiError> {
    let prompt = req
        .prompt
        .filter(|prompt| !prompt.is_empty())
        .ok_or(ApiError::MissingInput("No prompt provided"))?;

    let response = state
        .client
        .complete(GENERATE_SYSTEM, &prompt, SAMPLING_TEMPERATURE, MAX_TOKENS)
        .await?;

    Ok(Json(GenerateResponse { response }))
}

fn default_round() -> u32 {
    1
}

fn default_context() -> String {
    "No previous arguments.".to_string()
}

#[derive(Debug, Deserialize)]
pub struct ArgumentRequest {
    #[serde(default)]
    pub topic: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default = "default_round")]
    pub round: u32,
    #[serde(default = "default_context")]
    pub context: String,
}

#[derive(Debug, Serialize)]
pub struct ArgumentResponse {
    pub argument: String,
}

pub async fn debate_argument(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<ArgumentRequest>,
) -> Result<Json<ArgumentResponse>, ApiError> {
    tracing::info!(
        position = req.position.as_deref().unwrap_or("?"),
        round = req.round,
        "Generating debate argument"
    );

    // Bind only the fields the caller actually sent; a template that needs a
    // missing one fails the render.
    let round_label = req.round.to_string();
    let mut vars: Vec<(&str, &str)> = vec![("round_num", &round_label), ("context", &req.context)];
    if let Some(topic) = req.topic.as_deref() {
        vars.push(("topic", topic));
    }
    if let Some(position) = req.position.as_deref() {
        vars.push(("position", position));
    }

    let opening = if req.round == 1 {
        state.templates.get(templates::OPENING_TEMPLATE).await
    } else {
        None
    };

    let prompt = if let Some(template) = opening {
        templates::render(&template, &vars)?
    } else if let Some(template) = state.templates.get(templates::STRATEGIC_TEMPLATE).await {
        templates::render(&template, &vars)?
    } else {
        format!(
            "Argue the {} position on: {}",
            req.position.as_deref().unwrap_or_default(),
            req.topic.as_deref().unwrap_or_default()
        )
    };

    let argument = state
        .client
        .complete(DEBATER_SYSTEM, &prompt, SAMPLING_TEMPERATURE, MAX_TOKENS)
        .await?;

    tracing::info!(chars = argument.len(), "Generated argument");
    Ok(Json(ArgumentResponse { argument }))
}

#[derive(Debug, Deserialize)]
pub struct JudgeRequest {
    #[serde(default)]
    pub topic: Option<String>,
    #[serde(default)]
    pub pro_argument: Option<String>,
    #[serde(default)]
    pub con_argument: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct JudgeResponse {
    pub pro_score: i64,
    pub con_score: i64,
    pub feedback: String,
}

pub async fn debate_judge(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<JudgeRequest>,
) -> Result<Json<JudgeResponse>, ApiError> {
    let template = state
        .templates
        .get(templates::JUDGE_TEMPLATE)
        .await
        .ok_or(ApiError::TemplateNotFound("Judge prompt not found"))?;

    let mut vars: Vec<(&str, &str)> = Vec::new();
    if let Some(topic) = req.topic.as_deref() {
        vars.push(("topic", topic));
    }
    if let Some(pro_arg) = req.pro_argument.as_deref() {
        vars.push(("pro_arg", pro_arg));
    }
    if let Some(con_arg) = req.con_argument.as_deref() {
        vars.push(("con_arg", con_arg));
    }
    let prompt = templates::render(&template, &vars)?;

    tracing::info!("Judging round");
    let feedback = state
        .client
        .complete(JUDGE_SYSTEM, &prompt, SAMPLING_TEMPERATURE, JUDGE_MAX_TOKENS)
        .await?;

    let scores = judge::parse_scores(&feedback);
    tracing::info!(pro = scores.pro, con = scores.con, "Judgment complete");

    Ok(Json(JudgeResponse {
        pro_score: scores.pro,
        con_score: scores.con,
        feedback,
    }))
}

pub async fn list_prompts(State(state): State<AppState>) -> Json<HashMap<String, String>> {
    Json(state.templates.all().await)
}

#[derive(Debug, Deserialize)]
pub struct AddPromptRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub template: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AddPromptResponse {
    pub message: String,
    pub prompts: HashMap<String, String>,
}

pub async fn add_prompt(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<AddPromptRequest>,
) -> Result<Json<AddPromptResponse>, ApiError> {
    let (name, template) = match (req.name, req.template) {
        (Some(name), Some(template)) if !name.is_empty() && !template.is_empty() => {
            (name, template)
        }
        _ => return Err(ApiError::MissingInput("Name and template required")),
    };

    state.templates.insert(name.clone(), template).await;
    tracing::info!(name = %name, "Added prompt template");

    Ok(Json(AddPromptResponse {
        message: format!("Prompt '{name}' added successfully"),
        prompts: state.templates.all().await,
    }))
}

#[derive(Debug, Serialize)]
pub struct DeletePromptResponse {
    pub message: String,
}

pub async fn delete_prompt(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<DeletePromptResponse>, ApiError> {
    if !state.templates.remove(&name).await {
        return Err(ApiError::PromptNotFound);
    }

    tracing::info!(name = %name, "Deleted prompt template");
    Ok(Json(DeletePromptResponse {
        message: format!("Prompt '{name}' deleted"),
    }))
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/generate", post(generate))
        .route("/debate/argument", post(debate_argument))
        .route("/debate/judge", post(debate_judge))
        .route("/prompts", get(list_prompts).post(add_prompt))
        .route("/prompts/:name", delete(delete_prompt))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Builds the relay state from `config` and serves it until shutdown.
pub async fn serve(config: Config, port: u16) -> crate::Result<()> {
    let state = AppState {
        client: Arc::new(CompletionClient::new(&config)),
        templates: TemplateStore::with_defaults(),
    };

    tracing::info!(model = state.client.model(), "Debate relay configured");

    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port))
        .await
        .context("Failed to bind to port")?;

    tracing::info!("Server listening on http://0.0.0.0:{}", port);
    tracing::info!("Ready to accept debate requests");

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
