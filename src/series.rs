use crate::models::DailyRecord;
use std::collections::{BTreeMap, BTreeSet, HashMap};

pub const MOVING_AVERAGE_WINDOW: usize = 7;

/// Subject key -> most recent record for that subject.
pub type LatestSnapshot = BTreeMap<String, DailyRecord>;

/// Shared ascending date axis plus one gap-filled value row per subject.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlignedSeries {
    pub labels: Vec<String>,
    pub series: BTreeMap<String, Vec<Option<f64>>>,
}

pub fn latest_by_subject(records: &[DailyRecord]) -> LatestSnapshot {
    let mut sorted: Vec<&DailyRecord> = records.iter().collect();
    // stable: among equal dates the earlier input record wins
    sorted.sort_by(|a, b| b.date.cmp(&a.date));

    let mut latest = LatestSnapshot::new();
    for record in sorted {
        latest
            .entry(record.subject.key().to_string())
            .or_insert_with(|| record.clone());
    }
    latest
}

pub fn align<F>(records: &[DailyRecord], metric: F) -> AlignedSeries
where
    F: Fn(&DailyRecord) -> Option<f64>,
{
    let mut sorted: Vec<&DailyRecord> = records.iter().collect();
    sorted.sort_by(|a, b| a.date.cmp(&b.date));

    let labels: Vec<String> = sorted
        .iter()
        .map(|record| record.date.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let mut grouped: BTreeMap<&str, HashMap<&str, Option<f64>>> = BTreeMap::new();
    for &record in &sorted {
        let value = metric(record).filter(|v| v.is_finite());
        grouped
            .entry(record.subject.key())
            .or_default()
            .insert(record.date.as_str(), value);
    }

    let series = grouped
        .into_iter()
        .map(|(subject, by_date)| {
            let row = labels
                .iter()
                .map(|date| by_date.get(date.as_str()).copied().flatten())
                .collect();
            (subject.to_string(), row)
        })
        .collect();

    AlignedSeries { labels, series }
}

pub fn percent_change_series(records: &[DailyRecord]) -> AlignedSeries {
    align(records, |record| record.percent_change)
}

pub fn views_series(records: &[DailyRecord]) -> AlignedSeries {
    align(records, |record| record.views)
}

pub fn moving_average(aligned: &AlignedSeries, window: usize) -> AlignedSeries {
    let series = aligned
        .series
        .iter()
        .map(|(subject, values)| (subject.clone(), trailing_mean(values, window)))
        .collect();

    AlignedSeries {
        labels: aligned.labels.clone(),
        series,
    }
}

/// Mean of the non-gap points in each full trailing window. Positions before
/// the first full window, and windows holding only gaps, are gaps.
pub fn trailing_mean(values: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    if window == 0 {
        return vec![None; values.len()];
    }

    (0..values.len())
        .map(|idx| {
            if idx + 1 < window {
                return None;
            }
            let (sum, count) = values[idx + 1 - window..=idx]
                .iter()
                .flatten()
                .copied()
                .fold((0.0_f64, 0u32), |(sum, count), v| (sum + v, count + 1));
            if count == 0 {
                None
            } else {
                Some(sum / f64::from(count))
            }
        })
        .collect()
}
