use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const UNKNOWN_SUBJECT: &str = "Unknown";

/// Which document field a record's subject was taken from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Subject {
    Name(String),
    Article(String),
    Unknown,
}

impl Subject {
    /// Picks `name`, then `article`. Blank strings count as absent.
    pub fn resolve(name: Option<&str>, article: Option<&str>) -> Self {
        fn present(value: Option<&str>) -> Option<&str> {
            value.map(str::trim).filter(|v| !v.is_empty())
        }

        if let Some(name) = present(name) {
            Subject::Name(name.to_string())
        } else if let Some(article) = present(article) {
            Subject::Article(article.to_string())
        } else {
            Subject::Unknown
        }
    }

    /// Grouping key shared by every transform.
    pub fn key(&self) -> &str {
        match self {
            Subject::Name(value) | Subject::Article(value) => value,
            Subject::Unknown => UNKNOWN_SUBJECT,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DailyRecord {
    pub subject: Subject,
    pub date: String,
    pub views: Option<f64>,
    pub percent_change: Option<f64>,
}

impl DailyRecord {
    /// Builds a record from a `daily_stats` document's plain JSON fields.
    /// Missing or mistyped fields never fail; they become gaps or blanks.
    pub fn from_fields(fields: &Map<String, Value>) -> Self {
        let text = |key: &str| fields.get(key).and_then(Value::as_str);
        let percent_change = fields
            .get("percent_change")
            .filter(|value| !value.is_null())
            .or_else(|| fields.get("percentChange"));

        DailyRecord {
            subject: Subject::resolve(text("name"), text("article")),
            date: text("date").unwrap_or_default().to_string(),
            views: finite_number(fields.get("views")),
            percent_change: finite_number(percent_change),
        }
    }
}

/// Only JSON numbers count; strings, booleans and nulls become gaps.
pub fn finite_number(value: Option<&Value>) -> Option<f64> {
    value.and_then(Value::as_f64).filter(|n| n.is_finite())
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LatestCard {
    pub subject: String,
    pub label: String,
    pub date: String,
    pub views: String,
    pub change: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChartDataset {
    pub label: String,
    pub data: Vec<Option<f64>>,
    pub border_color: String,
    pub background_color: String,
    pub span_gaps: bool,
    pub tension: f64,
    pub tooltips: Vec<String>,
}

/// How the browser labels y-axis ticks.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TickFormat {
    /// `12.5%`
    Percent,
    /// rounded, thousands-separated
    Views,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChartConfig {
    pub title: String,
    pub y_axis: String,
    pub tick_format: TickFormat,
    pub labels: Vec<String>,
    pub datasets: Vec<ChartDataset>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DashboardStatus {
    Ready,
    Empty,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DashboardCharts {
    pub percent_change: ChartConfig,
    pub views_average: ChartConfig,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DashboardResponse {
    pub status: DashboardStatus,
    pub message: Option<String>,
    pub rendered_at: String,
    pub record_count: usize,
    pub latest: Vec<LatestCard>,
    pub charts: DashboardCharts,
}
