use axum::{
	Json, Router,
	extract::{Path, Query, State},
	http::StatusCode,
	response::{IntoResponse, Response},
	routing::{delete, get, post},
};
use serde::{Deserialize, Serialize};
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

use minutes_domain::{category, category::MeetingCategory, meeting::Meeting};
use minutes_service::{
	ContextRequest, DeleteMeetingRequest, DeleteMeetingResponse, Error as ServiceError,
	HistoryRequest, HistoryResponse, StoreMeetingRequest,
};

use crate::state::AppState;

const MIN_USER_ID_CHARS: usize = 1;
const MAX_USER_ID_CHARS: usize = 100;
const MIN_MEETING_TEXT_CHARS: usize = 1;
const MAX_MEETING_TEXT_CHARS: usize = 10_000;

pub fn router(state: AppState) -> Router {
	Router::new()
		.route("/health", get(health))
		.route("/v1/meetings/process", post(process_meeting))
		.route("/v1/meetings/{user_id}/history", get(meeting_history))
		.route("/v1/meetings/{user_id}/{meeting_id}", delete(delete_meeting))
		.with_state(state)
}

#[derive(Debug, Serialize)]
struct HealthBody {
	status: &'static str,
	version: &'static str,
}

async fn health() -> Json<HealthBody> {
	Json(HealthBody { status: "healthy", version: minutes_cli::VERSION })
}

#[derive(Debug, Deserialize)]
struct ProcessMeetingBody {
	user_id: String,
	meeting_text: String,
	#[serde(default)]
	categories: Option<Vec<MeetingCategory>>,
}

#[derive(Debug, Serialize)]
struct ProcessMeetingResponse {
	summary: String,
	context_used: Vec<Meeting>,
	context_count: usize,
	timestamp: String,
}

async fn process_meeting(
	State(state): State<AppState>,
	Json(payload): Json<ProcessMeetingBody>,
) -> Result<Json<ProcessMeetingResponse>, ApiError> {
	validate_length("user_id", &payload.user_id, MIN_USER_ID_CHARS, MAX_USER_ID_CHARS)?;
	validate_length(
		"meeting_text",
		&payload.meeting_text,
		MIN_MEETING_TEXT_CHARS,
		MAX_MEETING_TEXT_CHARS,
	)?;

	tracing::info!(user_id = %payload.user_id, "Processing meeting.");

	// Context is fetched before the store so a meeting never shows up as its
	// own context.
	let context = state
		.service
		.relevant_context(ContextRequest {
			user_id: payload.user_id.clone(),
			text: payload.meeting_text.clone(),
			n_results: None,
		})
		.await?;

	state
		.service
		.store_meeting(StoreMeetingRequest {
			user_id: payload.user_id,
			meeting_text: payload.meeting_text,
			categories: payload.categories,
		})
		.await?;

	let summary = if context.items.is_empty() {
		"Successfully processed meeting (no related context found)".to_string()
	} else {
		format!(
			"Successfully processed meeting with {} related historical items",
			context.items.len()
		)
	};
	let timestamp = OffsetDateTime::now_utc().format(&Rfc3339).map_err(|_| {
		json_error(
			StatusCode::INTERNAL_SERVER_ERROR,
			"internal",
			"Failed to format timestamp.",
			None,
		)
	})?;

	Ok(Json(ProcessMeetingResponse {
		summary,
		context_count: context.items.len(),
		context_used: context.items,
		timestamp,
	}))
}

#[derive(Debug, Deserialize)]
struct HistoryParams {
	limit: Option<u32>,
	skip: Option<u32>,
	search_text: Option<String>,
	/// Comma-separated category tokens, decoded with the category codec.
	categories: Option<String>,
	start_date: Option<String>,
	end_date: Option<String>,
}

async fn meeting_history(
	State(state): State<AppState>,
	Path(user_id): Path<String>,
	Query(params): Query<HistoryParams>,
) -> Result<Json<HistoryResponse>, ApiError> {
	let categories = params
		.categories
		.as_deref()
		.filter(|raw| !raw.trim().is_empty())
		.map(category::decode_categories);
	let response = state
		.service
		.meeting_history(HistoryRequest {
			user_id,
			limit: params.limit,
			skip: params.skip,
			search_text: params.search_text,
			categories,
			start_date: params.start_date,
			end_date: params.end_date,
		})
		.await?;

	Ok(Json(response))
}

async fn delete_meeting(
	State(state): State<AppState>,
	Path((user_id, meeting_id)): Path<(String, String)>,
) -> Result<Json<DeleteMeetingResponse>, ApiError> {
	let response =
		state.service.delete_meeting(DeleteMeetingRequest { user_id, meeting_id }).await?;

	Ok(Json(response))
}

fn validate_length(field: &str, value: &str, min: usize, max: usize) -> Result<(), ApiError> {
	let chars = value.chars().count();

	if chars < min || chars > max {
		return Err(json_error(
			StatusCode::BAD_REQUEST,
			"invalid_request",
			format!("{field} must be between {min} and {max} characters."),
			Some(vec![field.to_string()]),
		));
	}

	Ok(())
}

#[derive(Debug, Serialize)]
struct ErrorBody {
	error_code: String,
	message: String,
	fields: Option<Vec<String>>,
}

#[derive(Debug)]
pub struct ApiError {
	status: StatusCode,
	error_code: String,
	message: String,
	fields: Option<Vec<String>>,
}

impl ApiError {
	fn new(
		status: StatusCode,
		error_code: impl Into<String>,
		message: impl Into<String>,
		fields: Option<Vec<String>>,
	) -> Self {
		Self { status, error_code: error_code.into(), message: message.into(), fields }
	}
}

pub fn json_error(
	status: StatusCode,
	code: &str,
	message: impl Into<String>,
	fields: Option<Vec<String>>,
) -> ApiError {
	ApiError::new(status, code, message, fields)
}

impl From<ServiceError> for ApiError {
	fn from(err: ServiceError) -> Self {
		match err {
			ServiceError::InvalidRequest { message } =>
				json_error(StatusCode::BAD_REQUEST, "invalid_request", message, None),
			ServiceError::Provider { message } =>
				json_error(StatusCode::BAD_GATEWAY, "provider_unavailable", message, None),
			ServiceError::Storage { message } =>
				json_error(StatusCode::INTERNAL_SERVER_ERROR, "storage_error", message, None),
		}
	}
}

impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		let body =
			ErrorBody { error_code: self.error_code, message: self.message, fields: self.fields };

		(self.status, Json(body)).into_response()
	}
}
