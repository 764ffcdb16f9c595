use std::future::Future;

use chrono::{Local, NaiveTime};

pub const SECONDS_PER_DAY: i64 = 86_400;

/// One bounded guide query interval, in epoch seconds. Providers that
/// take milliseconds scale at their call site.
#[derive(Eq, PartialEq, Clone, Copy, Debug)]
pub struct TimeWindow {
    pub start: i64,
    pub end: i64,
}

/// Epoch second of local midnight of the current day.
pub fn local_day_start() -> i64 {
    let midnight = Local::now().date_naive().and_time(NaiveTime::MIN);

    match midnight.and_local_timezone(Local).earliest() {
        Some(day_start) => day_start.timestamp(),
        // Midnight skipped by a DST transition; the UTC reading is the
        // closest well-defined instant.
        None => midnight.and_utc().timestamp(),
    }
}

/// The `days * chunks_per_day` contiguous, non-overlapping windows
/// covering `[day_start, day_start + days*86400)`, in ascending order.
///
/// The multiplication happens before the division so the windows tile
/// the range exactly even when `chunks_per_day` does not divide 86400;
/// when it does divide, every window is `86400 / chunks_per_day`
/// seconds long. Zero `days` or zero `chunks_per_day` yields no
/// windows.
pub fn windows(day_start: i64, days: u32, chunks_per_day: u32) -> Vec<TimeWindow> {
    let chunks = i64::from(chunks_per_day);
    let total = i64::from(days) * chunks;

    (0..total)
        .map(|chunk| TimeWindow {
            start: day_start + SECONDS_PER_DAY * chunk / chunks,
            end: day_start + SECONDS_PER_DAY * (chunk + 1) / chunks,
        })
        .collect()
}

/// Drives `fetch` over every window sequentially and concatenates the
/// returned records in window order. Window order is chronological, so
/// the concatenation needs no re-sort. Any window failure fails the
/// whole collection.
pub async fn collect_windows<T, E, F, Fut>(
    day_start: i64,
    days: u32,
    chunks_per_day: u32,
    mut fetch: F,
) -> Result<Vec<T>, E>
where
    F: FnMut(TimeWindow) -> Fut,
    Fut: Future<Output = Result<Vec<T>, E>>,
{
    let mut records = Vec::new();

    for window in windows(day_start, days, chunks_per_day) {
        records.extend(fetch(window).await?);
    }

    Ok(records)
}
