use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashMap;

/// Entries recorded on one calendar day. Two entries on the same day at
/// different times share a bucket; the time component never splits them.
#[derive(Debug, Clone, Serialize)]
pub struct DateBucket<T> {
    pub date: NaiveDate,
    pub items: Vec<T>,
}

/// A bucket plus its display label, the shape the grouped timeline screens
/// consume directly.
#[derive(Debug, Clone, Serialize)]
pub struct TimelineSection<T> {
    pub label: String,
    pub date: NaiveDate,
    pub items: Vec<T>,
}

/// Partitions items into calendar-day buckets, most recent day first.
///
/// Works over raw and consolidated entries alike; the caller supplies the
/// date accessor. Within a bucket, items keep the order the caller supplied.
pub fn bucket_by_date<T, F>(items: Vec<T>, date_of: F) -> Vec<DateBucket<T>>
where
    F: Fn(&T) -> NaiveDate,
{
    let mut buckets: Vec<DateBucket<T>> = Vec::new();
    let mut index_by_date: HashMap<NaiveDate, usize> = HashMap::new();

    for item in items {
        let date = date_of(&item);
        match index_by_date.get(&date) {
            Some(&idx) => buckets[idx].items.push(item),
            None => {
                index_by_date.insert(date, buckets.len());
                buckets.push(DateBucket {
                    date,
                    items: vec![item],
                });
            }
        }
    }

    buckets.sort_by(|a, b| b.date.cmp(&a.date));
    buckets
}

/// Display label for a bucket, as a pure function of `(date, today)` so the
/// rendering is deterministic under test. The month name is always English.
pub fn bucket_label(date: NaiveDate, today: NaiveDate) -> String {
    let days_ago = (today - date).num_days();
    match days_ago {
        0 => "Today".to_string(),
        1 => "Yesterday".to_string(),
        _ => date.format("%d %b %Y").to_string(),
    }
}

/// Buckets items and attaches the display label per bucket.
pub fn timeline_sections<T, F>(items: Vec<T>, date_of: F, today: NaiveDate) -> Vec<TimelineSection<T>>
where
    F: Fn(&T) -> NaiveDate,
{
    bucket_by_date(items, date_of)
        .into_iter()
        .map(|bucket| TimelineSection {
            label: bucket_label(bucket.date, today),
            date: bucket.date,
            items: bucket.items,
        })
        .collect()
}
