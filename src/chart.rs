use crate::models::{ChartConfig, ChartDataset, DailyRecord, LatestCard, TickFormat};
use crate::series::{AlignedSeries, LatestSnapshot};

const PALETTE: [&str; 6] = [
    "#2563eb", "#dc2626", "#16a34a", "#9333ea", "#0891b2", "#d97706",
];
const LINE_TENSION: f64 = 0.2;

pub fn color_for_index(index: usize) -> &'static str {
    PALETTE[index % PALETTE.len()]
}

/// `20240101` -> `2024-01-01`. The key is sliced, not validated, so any
/// 8-character ASCII key is dashed; everything else is returned untouched.
pub fn format_date_label(date: &str) -> String {
    if date.len() != 8 || !date.is_ascii() {
        return date.to_string();
    }
    format!("{}-{}-{}", &date[..4], &date[4..6], &date[6..])
}

pub fn display_name(subject: &str) -> String {
    subject.replace('_', " ")
}

pub fn group_thousands(value: f64) -> String {
    let rounded = value.round() as i64;
    let digits = rounded.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if rounded < 0 {
        out.push('-');
    }
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

pub fn format_percent(value: Option<f64>) -> Option<String> {
    value.map(|v| format!("{v:.2}%"))
}

pub fn percent_tooltip(label: &str, value: Option<f64>) -> String {
    match format_percent(value) {
        Some(percent) => format!("{label}: {percent}"),
        None => format!("{label}: no previous day"),
    }
}

pub fn average_tooltip(label: &str, value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{label}: {} views", group_thousands(v)),
        None => format!("{label}: not enough data"),
    }
}

pub fn percent_change_chart(aligned: &AlignedSeries) -> ChartConfig {
    build_chart(
        aligned,
        "Percent change vs previous day",
        "% change",
        TickFormat::Percent,
        percent_tooltip,
    )
}

pub fn views_average_chart(averaged: &AlignedSeries) -> ChartConfig {
    build_chart(
        averaged,
        "7-day average daily views",
        "Views (7-day avg)",
        TickFormat::Views,
        average_tooltip,
    )
}

fn build_chart(
    aligned: &AlignedSeries,
    title: &str,
    y_axis: &str,
    tick_format: TickFormat,
    tooltip: fn(&str, Option<f64>) -> String,
) -> ChartConfig {
    let datasets = aligned
        .series
        .iter()
        .enumerate()
        .map(|(idx, (subject, values))| {
            let label = display_name(subject);
            let color = color_for_index(idx).to_string();
            ChartDataset {
                tooltips: values.iter().map(|value| tooltip(&label, *value)).collect(),
                data: values.clone(),
                border_color: color.clone(),
                background_color: color,
                span_gaps: true,
                tension: LINE_TENSION,
                label,
            }
        })
        .collect();

    ChartConfig {
        title: title.to_string(),
        y_axis: y_axis.to_string(),
        tick_format,
        labels: aligned.labels.iter().map(|d| format_date_label(d)).collect(),
        datasets,
    }
}

/// Newest first, ties broken by subject.
pub fn latest_cards(latest: &LatestSnapshot) -> Vec<LatestCard> {
    let mut entries: Vec<(&String, &DailyRecord)> = latest.iter().collect();
    entries.sort_by(|a, b| b.1.date.cmp(&a.1.date).then_with(|| a.0.cmp(b.0)));

    entries
        .into_iter()
        .map(|(subject, record)| LatestCard {
            subject: subject.clone(),
            label: display_name(subject),
            date: format_date_label(&record.date),
            views: format!("{} views", group_thousands(record.views.unwrap_or(0.0))),
            change: format!(
                "{} vs prev. day",
                format_percent(record.percent_change).unwrap_or_else(|| "—".to_string())
            ),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Subject;
    use crate::series::{latest_by_subject, moving_average, percent_change_series, views_series};

    fn record(subject: &str, date: &str, views: Option<f64>, pct: Option<f64>) -> DailyRecord {
        DailyRecord {
            subject: Subject::Name(subject.to_string()),
            date: date.to_string(),
            views,
            percent_change: pct,
        }
    }

    #[test]
    fn date_labels_are_dashed() {
        assert_eq!(format_date_label("20240101"), "2024-01-01");
        assert_eq!(format_date_label("2024"), "2024");
        assert_eq!(format_date_label("20240230"), "2024-02-30");
        assert_eq!(format_date_label("2024ÄÄ"), "2024ÄÄ");
        assert_eq!(format_date_label(""), "");
    }

    #[test]
    fn thousands_are_grouped() {
        assert_eq!(group_thousands(0.0), "0");
        assert_eq!(group_thousands(999.0), "999");
        assert_eq!(group_thousands(1234.4), "1,234");
        assert_eq!(group_thousands(1234567.0), "1,234,567");
        assert_eq!(group_thousands(-4500.0), "-4,500");
    }

    #[test]
    fn percent_tooltips_distinguish_gap_from_value() {
        let records = vec![
            record("A", "20240101", Some(100.0), None),
            record("A", "20240102", Some(105.5), Some(5.5)),
        ];
        let chart = percent_change_chart(&percent_change_series(&records));
        let dataset = &chart.datasets[0];
        assert_eq!(dataset.data, vec![None, Some(5.5)]);
        assert_eq!(dataset.tooltips, vec!["A: no previous day", "A: 5.50%"]);
        assert!(dataset.span_gaps);
        assert_eq!(chart.labels, vec!["2024-01-01", "2024-01-02"]);
        assert_eq!(chart.tick_format, TickFormat::Percent);
    }

    #[test]
    fn average_chart_reports_not_enough_data() {
        let records: Vec<DailyRecord> = (1..=7)
            .map(|day| {
                let date = format!("202401{day:02}");
                record("Barack_Obama", &date, Some(1000.0 * f64::from(day)), None)
            })
            .collect();
        let chart = views_average_chart(&moving_average(&views_series(&records), 7));
        let dataset = &chart.datasets[0];
        assert_eq!(dataset.label, "Barack Obama");
        assert_eq!(dataset.tooltips[0], "Barack Obama: not enough data");
        assert_eq!(dataset.tooltips[6], "Barack Obama: 4,000 views");
        assert_eq!(chart.tick_format, TickFormat::Views);
    }

    #[test]
    fn datasets_cycle_the_palette() {
        let records: Vec<DailyRecord> = (0..7)
            .map(|idx| record(&format!("S{idx}"), "20240101", Some(1.0), None))
            .collect();
        let chart = percent_change_chart(&percent_change_series(&records));
        assert_eq!(chart.datasets[0].border_color, "#2563eb");
        assert_eq!(chart.datasets[6].border_color, "#2563eb");
        assert_eq!(chart.datasets[5].background_color, "#d97706");
    }

    #[test]
    fn latest_cards_format_missing_fields() {
        let records = vec![
            record("Elon_Musk", "20240102", None, None),
            record("Donald_Trump", "20240103", Some(12345.0), Some(-3.456)),
        ];
        let cards = latest_cards(&latest_by_subject(&records));
        assert_eq!(cards[0].label, "Donald Trump");
        assert_eq!(cards[0].views, "12,345 views");
        assert_eq!(cards[0].change, "-3.46% vs prev. day");
        assert_eq!(cards[1].date, "2024-01-02");
        assert_eq!(cards[1].views, "0 views");
        assert_eq!(cards[1].change, "— vs prev. day");
    }
}
