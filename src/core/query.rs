//! Read path: resolves "today" or an explicit date to a stored puzzle.

use crate::domain::model::{parse_puzzle_id, puzzle_id, GridShape, PuzzleRecord, PuzzleView};
use crate::domain::ports::PuzzleStore;
use crate::utils::error::{JumbleError, Result};
use chrono::{DateTime, Days, NaiveDate, Utc};
use chrono_tz::Tz;

/// Dates tried for "today", in order: local today, UTC today (when it
/// differs), UTC yesterday. Duplicates are removed, order is kept.
pub fn candidate_dates(zone: Tz, now_utc: DateTime<Utc>) -> Vec<NaiveDate> {
    let local_today = now_utc.with_timezone(&zone).date_naive();
    let utc_today = now_utc.date_naive();

    let mut candidates = vec![local_today];
    let rest = [Some(utc_today), utc_today.checked_sub_days(Days::new(1))];
    for date in rest.into_iter().flatten() {
        if !candidates.contains(&date) {
            candidates.push(date);
        }
    }
    candidates
}

pub struct PuzzleQueryService<S: PuzzleStore> {
    store: S,
    shape: GridShape,
}

impl<S: PuzzleStore> PuzzleQueryService<S> {
    pub fn new(store: S, shape: GridShape) -> Self {
        Self { store, shape }
    }

    async fn lookup(&self, id: &str) -> Result<Option<PuzzleRecord>> {
        let Some(record) = self.store.get(id).await? else {
            return Ok(None);
        };

        if record.id != id {
            return Err(JumbleError::CorruptRecordError {
                id: id.to_string(),
                reason: format!("record carries id '{}'", record.id),
            });
        }
        record
            .check(&self.shape)
            .map_err(|reason| JumbleError::CorruptRecordError {
                id: id.to_string(),
                reason,
            })?;

        Ok(Some(record))
    }

    /// Walks the fallback chain; the first valid stored candidate wins.
    pub async fn resolve_today(&self, zone: Tz, now_utc: DateTime<Utc>) -> Result<PuzzleRecord> {
        let candidates = candidate_dates(zone, now_utc);

        for date in &candidates {
            let id = puzzle_id(*date);
            match self.lookup(&id).await {
                Ok(Some(record)) => {
                    tracing::debug!("Resolved today ({}) to {}", zone, id);
                    return Ok(record);
                }
                Ok(None) => tracing::debug!("No puzzle for candidate {}", id),
                // 壞掉的紀錄不算命中，繼續找下一個日期
                Err(err @ JumbleError::CorruptRecordError { .. }) => {
                    tracing::error!("❌ Skipping candidate {}: {}", id, err);
                }
                Err(err) => return Err(err),
            }
        }

        let tried: Vec<String> = candidates.into_iter().map(puzzle_id).collect();
        Err(JumbleError::NotFoundError {
            id: format!("today (tried {})", tried.join(", ")),
        })
    }

    /// Exactly one lookup. Keys that are not `YYYY-MM-DD` are a miss.
    pub async fn resolve_by_date(&self, date: &str) -> Result<PuzzleRecord> {
        if parse_puzzle_id(date).is_none() {
            return Err(JumbleError::NotFoundError {
                id: date.to_string(),
            });
        }

        self.lookup(date)
            .await?
            .ok_or_else(|| JumbleError::NotFoundError {
                id: date.to_string(),
            })
    }

    pub async fn today_view(&self, zone: Tz, now_utc: DateTime<Utc>) -> Result<PuzzleView> {
        self.resolve_today(zone, now_utc).await.map(PuzzleView::from)
    }

    /// Same projection as `today_view`; solutions never leave through either path.
    pub async fn date_view(&self, date: &str) -> Result<PuzzleView> {
        self.resolve_by_date(date).await.map(PuzzleView::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use chrono_tz::{America, Asia, UTC};

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn new_york_evening_tries_local_then_utc() {
        let now = Utc.with_ymd_and_hms(2025, 7, 24, 2, 0, 0).unwrap();
        assert_eq!(
            candidate_dates(America::New_York, now),
            vec![ymd(2025, 7, 23), ymd(2025, 7, 24)]
        );
    }

    #[test]
    fn utc_zone_tries_today_then_yesterday() {
        let now = Utc.with_ymd_and_hms(2025, 7, 24, 12, 0, 0).unwrap();
        assert_eq!(
            candidate_dates(UTC, now),
            vec![ymd(2025, 7, 24), ymd(2025, 7, 23)]
        );
    }

    #[test]
    fn zone_ahead_of_utc_tries_three_dates() {
        // 07-24 23:30 UTC is already 07-25 in Tokyo
        let now = Utc.with_ymd_and_hms(2025, 7, 24, 23, 30, 0).unwrap();
        assert_eq!(
            candidate_dates(Asia::Tokyo, now),
            vec![ymd(2025, 7, 25), ymd(2025, 7, 24), ymd(2025, 7, 23)]
        );
    }
}
