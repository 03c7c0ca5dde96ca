//! Song endpoints
//!
//! - `GET    /songs`          filtered, paginated list
//! - `GET    /songs/:id/text` full lyrics or one verse
//! - `POST   /songs`          create and enrich
//! - `PUT    /songs/:id`      partial update
//! - `DELETE /songs/:id`      remove

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};
use songlib_common::query::{self, Pagination, SongFilter, SongListParams};
use tracing::debug;

use crate::error::{ApiError, ApiResult};
use crate::models::{
    CreateSongRequest, MessageResponse, SongResponse, TextQuery, TextResponse, UpdateSongRequest,
};
use crate::services::song_manager;
use crate::AppState;

const INVALID_BODY: &str = "Invalid request body";

/// Parse a path id; ids are positive integers
fn parse_song_id(raw: &str) -> ApiResult<i64> {
    match raw.parse::<i64>() {
        Ok(id) if id >= 1 => Ok(id),
        _ => Err(ApiError::BadRequest(format!("Invalid id: {}", raw))),
    }
}

/// GET /songs
///
/// Every query parameter is optional. Unparseable `page`, `limit` and
/// `releaseDate` values fall back to their defaults; an unparseable `id` is
/// rejected. A repeated parameter keeps its first value.
pub async fn list_songs(
    State(state): State<AppState>,
    pairs: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> ApiResult<Json<Vec<SongResponse>>> {
    let Query(pairs) = pairs.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let params = SongListParams::from_pairs(pairs);

    let filter = SongFilter::from_params(&params)?;
    let pagination = Pagination::from_params(params.page.as_deref(), params.limit.as_deref());

    let songs = query::list_songs(&state.db, &filter, pagination).await?;
    debug!(count = songs.len(), page = pagination.page, "Listed songs");

    Ok(Json(songs.into_iter().map(SongResponse::from).collect()))
}

/// GET /songs/:id/text
pub async fn get_song_text(
    State(state): State<AppState>,
    Path(id): Path<String>,
    query: Result<Query<TextQuery>, QueryRejection>,
) -> ApiResult<Json<TextResponse>> {
    let id = parse_song_id(&id)?;
    let Query(query) = query.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let text = song_manager::read_song_text(&state.db, id, query.verse.as_deref()).await?;
    Ok(Json(TextResponse { text }))
}

/// POST /songs
pub async fn create_song(
    State(state): State<AppState>,
    body: Result<Json<CreateSongRequest>, JsonRejection>,
) -> ApiResult<Json<SongResponse>> {
    let Json(req) = body.map_err(|e| {
        debug!("Rejected create body: {}", e.body_text());
        ApiError::BadRequest(INVALID_BODY.to_string())
    })?;

    // Names are stored as sent; only all-blank values are refused
    if req.group.trim().is_empty() || req.song.trim().is_empty() {
        return Err(ApiError::BadRequest(INVALID_BODY.to_string()));
    }

    let record = song_manager::create_song(&state.db, &state.lookup, &req.group, &req.song).await?;
    Ok(Json(record.into()))
}

/// PUT /songs/:id
pub async fn update_song(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<UpdateSongRequest>, JsonRejection>,
) -> ApiResult<Json<SongResponse>> {
    let id = parse_song_id(&id)?;
    let Json(changes) = body.map_err(|e| {
        debug!("Rejected update body: {}", e.body_text());
        ApiError::BadRequest(INVALID_BODY.to_string())
    })?;

    let record = song_manager::update_song(&state.db, id, &changes).await?;
    Ok(Json(record.into()))
}

/// DELETE /songs/:id
pub async fn delete_song(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    let id = parse_song_id(&id)?;
    song_manager::delete_song(&state.db, id).await?;

    Ok(Json(MessageResponse {
        message: "Song deleted successfully".to_string(),
    }))
}
