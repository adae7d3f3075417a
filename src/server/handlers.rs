use super::types::{AnalyzeStructureRequest, AtomsRequest, ErrorResponse, FunFactRequest};
use crate::{
    Error,
    assistant::Assistant,
    config::{API_KEY_ENV, Config},
    llm::create_llm_client,
};
use axum::{
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{Html, Json},
};
use serde_json::Value;
use std::{path::PathBuf, sync::Arc};
use tracing::{error, info, warn};
use uuid::Uuid;

pub type ApiError = (StatusCode, Json<ErrorResponse>);
pub type ApiResult<T> = Result<Json<T>, ApiError>;

#[derive(Clone)]
pub struct AppState {
    /// `None` when the server was started without an API key.
    pub assistant: Option<Arc<Assistant>>,
    pub static_dir: PathBuf,
    pub frontend_file: String,
}

impl AppState {
    pub fn from_config(config: &Config) -> Self {
        let assistant = create_llm_client(&config.llm)
            .map(|client| Arc::new(Assistant::new(client, config.llm.temperature)));

        if assistant.is_none() {
            warn!(
                "{} is not set; API endpoints will report a misconfigured server",
                API_KEY_ENV
            );
        }

        Self {
            assistant,
            static_dir: PathBuf::from(&config.server.static_dir),
            frontend_file: config.server.frontend_file.clone(),
        }
    }

    fn assistant(&self) -> Result<&Assistant, ApiError> {
        self.assistant.as_deref().ok_or_else(|| {
            error!("Rejecting request: {} is not configured", API_KEY_ENV);
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Server is missing {}", API_KEY_ENV),
            )
        })
    }
}

fn error_response(status: StatusCode, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
}

fn parse_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    match payload {
        Ok(Json(body)) => Ok(body),
        Err(rejection) => {
            warn!("Rejected request body: {}", rejection.body_text());
            Err(error_response(
                StatusCode::BAD_REQUEST,
                format!("Invalid request: {}", rejection.body_text()),
            ))
        }
    }
}

fn require<T>(field: Option<T>, message: &str) -> Result<T, ApiError> {
    field.ok_or_else(|| {
        let err = Error::invalid_request(message);
        error_response(StatusCode::BAD_REQUEST, err.to_string())
    })
}

/// Maps a task failure to a response; model failures keep the upstream text.
fn task_failure(context: &str, request_id: Uuid, err: Error) -> ApiError {
    if err.is_client_error() {
        warn!("Request {} rejected: {}", request_id, err);
        error_response(StatusCode::BAD_REQUEST, err.to_string())
    } else {
        error!("Request {} failed: {}: {}", request_id, context, err);
        error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("{}: {}", context, err),
        )
    }
}

pub async fn index(State(state): State<AppState>) -> Result<Html<String>, (StatusCode, String)> {
    let path = state.static_dir.join(&state.frontend_file);
    match tokio::fs::read_to_string(&path).await {
        Ok(page) => Ok(Html(page)),
        Err(e) => {
            error!("Failed to read frontend file {}: {}", path.display(), e);
            Err((
                StatusCode::NOT_FOUND,
                format!("Frontend file {} not found", state.frontend_file),
            ))
        }
    }
}

pub async fn predict_bonds(
    State(state): State<AppState>,
    payload: Result<Json<AtomsRequest>, JsonRejection>,
) -> ApiResult<Value> {
    let assistant = state.assistant()?;
    let request = parse_body(payload)?;
    let atoms = require(request.atoms, "'atoms' list missing")?;

    let request_id = Uuid::new_v4();
    info!("Request {}: predicting bonds for {} atoms", request_id, atoms.len());

    assistant
        .predict_bonds(atoms)
        .await
        .map(Json)
        .map_err(|e| task_failure("AI prediction failed", request_id, e))
}

pub async fn get_fun_fact(
    State(state): State<AppState>,
    payload: Result<Json<FunFactRequest>, JsonRejection>,
) -> ApiResult<Value> {
    let assistant = state.assistant()?;
    let request = parse_body(payload)?;
    let element = require(request.element, "'element' missing")?;

    let request_id = Uuid::new_v4();
    info!("Request {}: fun fact for element {}", request_id, element.trim());

    assistant
        .fun_fact(&element)
        .await
        .map(Json)
        .map_err(|e| task_failure("Fun fact lookup failed", request_id, e))
}

pub async fn get_molecule_info(
    State(state): State<AppState>,
    payload: Result<Json<AtomsRequest>, JsonRejection>,
) -> ApiResult<Value> {
    let assistant = state.assistant()?;
    let request = parse_body(payload)?;
    let atoms = require(request.atoms, "'atoms' list missing")?;

    let request_id = Uuid::new_v4();
    info!("Request {}: molecule info for {} atoms", request_id, atoms.len());

    assistant
        .molecule_info(atoms)
        .await
        .map(Json)
        .map_err(|e| task_failure("Molecule info lookup failed", request_id, e))
}

pub async fn analyze_structure(
    State(state): State<AppState>,
    payload: Result<Json<AnalyzeStructureRequest>, JsonRejection>,
) -> ApiResult<Value> {
    let assistant = state.assistant()?;
    let request = parse_body(payload)?;
    let atoms = require(request.atoms, "'atoms' list missing")?;
    let bonds = require(request.bonds, "'bonds' list missing")?;

    let request_id = Uuid::new_v4();
    info!(
        "Request {}: analyzing structure with {} atoms and {} bonds",
        request_id,
        atoms.len(),
        bonds.len()
    );

    assistant
        .analyze_structure(atoms, bonds)
        .await
        .map(Json)
        .map_err(|e| task_failure("Structure analysis failed", request_id, e))
}
