use crate::chart::{latest_cards, percent_change_chart, views_average_chart};
use crate::errors::AppError;
use crate::models::{
    ChartConfig, DailyRecord, DashboardCharts, DashboardResponse, DashboardStatus, LatestCard,
};
use crate::series::{
    MOVING_AVERAGE_WINDOW, latest_by_subject, moving_average, percent_change_series, views_series,
};
use crate::state::AppState;
use crate::ui::render_index;
use axum::{extract::State, response::Html, Json};
use chrono::Local;

pub const EMPTY_MESSAGE: &str = "No documents found yet. Run the tracker to populate Firestore.";

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let source = state.source.as_ref().map(|source| source.describe());
    Html(render_index(source.as_deref()))
}

pub async fn healthz() -> &'static str {
    "ok"
}

pub async fn get_dashboard(
    State(state): State<AppState>,
) -> Result<Json<DashboardResponse>, AppError> {
    let records = load_records(&state).await?;
    Ok(Json(build_dashboard(&records)))
}

pub async fn get_latest(State(state): State<AppState>) -> Result<Json<Vec<LatestCard>>, AppError> {
    let records = load_records(&state).await?;
    Ok(Json(latest_cards(&latest_by_subject(&records))))
}

pub async fn get_percent_change_chart(
    State(state): State<AppState>,
) -> Result<Json<ChartConfig>, AppError> {
    let records = load_records(&state).await?;
    Ok(Json(percent_change_chart(&percent_change_series(&records))))
}

pub async fn get_views_average_chart(
    State(state): State<AppState>,
) -> Result<Json<ChartConfig>, AppError> {
    let records = load_records(&state).await?;
    Ok(Json(views_average_chart(&moving_average(
        &views_series(&records),
        MOVING_AVERAGE_WINDOW,
    ))))
}

async fn load_records(state: &AppState) -> Result<Vec<DailyRecord>, AppError> {
    let source = state.source.as_ref().ok_or_else(AppError::missing_config)?;
    Ok(source.fetch_all().await?)
}

pub fn build_dashboard(records: &[DailyRecord]) -> DashboardResponse {
    let latest = latest_cards(&latest_by_subject(records));
    let percent_change = percent_change_chart(&percent_change_series(records));
    let views_average = views_average_chart(&moving_average(
        &views_series(records),
        MOVING_AVERAGE_WINDOW,
    ));

    let (status, message) = if records.is_empty() {
        (DashboardStatus::Empty, Some(EMPTY_MESSAGE.to_string()))
    } else {
        (DashboardStatus::Ready, None)
    };

    DashboardResponse {
        status,
        message,
        rendered_at: Local::now().to_rfc3339(),
        record_count: records.len(),
        latest,
        charts: DashboardCharts {
            percent_change,
            views_average,
        },
    }
}
