use axum::{
    Extension,
    extract::Query,
    http::header,
    response::{IntoResponse, Json, Response},
};
use serde::Deserialize;
use serde_json::Value;

use crate::{
    analysis::{self, metrics::DEFAULT_TOP_ARTISTS},
    error::{Error, Result},
    export,
    render::{JsonRenderer, Render},
    spotify::AuthProvider,
    utils,
};

#[derive(Debug, Deserialize)]
pub struct AnalyzeParams {
    pub playlist: String,
    pub top: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct ExportParams {
    pub playlist: String,
}

/// `GET /api/analyze?playlist=<id or link>&top=<n>`
pub async fn analyze(
    Query(params): Query<AnalyzeParams>,
    Extension(auth): Extension<AuthProvider>,
) -> Result<Json<Value>> {
    let playlist_id = utils::parse_playlist_id(&params.playlist)?;
    let client = auth.client().await?;
    let analysis = analysis::analyze(
        &client,
        &playlist_id,
        params.top.unwrap_or(DEFAULT_TOP_ARTISTS),
    )
    .await?;

    Ok(Json(JsonRenderer.render_analysis(&analysis)))
}

/// `GET /api/export?playlist=<id or link>`, answered with a CSV attachment.
pub async fn export(
    Query(params): Query<ExportParams>,
    Extension(auth): Extension<AuthProvider>,
) -> Result<Response> {
    let playlist_id = utils::parse_playlist_id(&params.playlist)?;
    let client = auth.client().await?;
    let raw_items = analysis::fetch_all_tracks(&client, &playlist_id).await?;
    let table = analysis::normalize(&raw_items);
    if table.is_empty() {
        return Err(Error::EmptyResult(playlist_id.to_string()));
    }
    let csv = export::to_csv_string(&table)?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", export::DEFAULT_FILE_NAME),
            ),
        ],
        csv,
    )
        .into_response())
}
