//! Per-date schedule cache with single-flight fetching

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use chrono::NaiveDate;
use tokio::sync::{Mutex, OnceCell};

use crate::error::Result;
use crate::models::{DayGroup, Shift};
use crate::timeline::relocation::{validate_relocation, DropTarget, RelocationDecision, ShiftMove};
use crate::timeline::ScheduleBlock;

/// Source of raw shift rows for a date
pub trait ShiftSource: Send + Sync {
    /// Fetch every shift scheduled on `date`
    fn fetch_shifts(&self, date: NaiveDate) -> impl Future<Output = Result<Vec<Shift>>> + Send;
}

/// Sink for accepted relocations
pub trait ShiftPersister: Send + Sync {
    /// Persist one move; `Error::Rejected` when the backend refuses it
    fn persist_move(&self, mv: &ShiftMove) -> impl Future<Output = Result<()>> + Send;
}

type DaySlot = Arc<OnceCell<Vec<Shift>>>;

/// Date-keyed cache of raw shift rows.
///
/// Each date owns a single-flight cell: concurrent readers of an uncached
/// date trigger exactly one source fetch, and a failed fetch leaves the
/// cell empty so the next reader simply retries. Only raw rows live here;
/// layout output is derived per pass and never written back. Updates are
/// last-write-wins, which is all a display cache needs.
pub struct ScheduleCache<S> {
    source: Arc<S>,
    days: Arc<Mutex<HashMap<NaiveDate, DaySlot>>>,
}

impl<S> Clone for ScheduleCache<S> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
            days: Arc::clone(&self.days),
        }
    }
}

impl<S: ShiftSource> ScheduleCache<S> {
    /// Create an empty cache over the given source
    #[must_use]
    pub fn new(source: S) -> Self {
        Self {
            source: Arc::new(source),
            days: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Shifts for `date`, fetching on first use
    pub async fn shifts_for(&self, date: NaiveDate) -> Result<Vec<Shift>> {
        let slot = self.slot(date).await;
        let shifts = slot
            .get_or_try_init(|| {
                tracing::debug!("Fetching shifts for {date}");
                self.source.fetch_shifts(date)
            })
            .await?;
        Ok(shifts.clone())
    }

    /// Shifts for `date` wrapped up with their date
    pub async fn day_group(&self, date: NaiveDate) -> Result<DayGroup> {
        Ok(DayGroup::new(date, self.shifts_for(date).await?))
    }

    /// True when `date` has a fetched day in the cache
    pub async fn is_cached(&self, date: NaiveDate) -> bool {
        self.days
            .lock()
            .await
            .get(&date)
            .is_some_and(|slot| slot.initialized())
    }

    /// Drop the cached day so the next read refetches
    pub async fn invalidate(&self, date: NaiveDate) {
        self.days.lock().await.remove(&date);
    }

    /// Write a persisted move into the cached day.
    ///
    /// Matches rows by id; only room, brand and the two time fields change.
    /// Returns how many rows were touched, zero when the day is not cached.
    pub async fn apply_move(&self, date: NaiveDate, mv: &ShiftMove) -> usize {
        let mut days = self.days.lock().await;
        let Some(current) = days.get(&date).and_then(|slot| slot.get()) else {
            return 0;
        };

        let mut updated = current.clone();
        let mut touched = 0;
        for shift in &mut updated {
            let Some(id) = shift.id else { continue };
            if mv.shift_ids.contains(&id) {
                shift.room = mv.room;
                shift.brand_name = mv.brand_name.clone();
                shift.start_time = mv.start_time;
                shift.end_time = mv.end_time;
                touched += 1;
            }
        }

        if touched > 0 {
            days.insert(date, Arc::new(OnceCell::new_with(Some(updated))));
            tracing::debug!("Reconciled {touched} rows for {date}");
        }
        touched
    }

    /// Validate a drop, persist a real move, reconcile the cached day.
    ///
    /// A no-op decision returns without touching the backend. When the
    /// backend rejects the move the cached day is dropped, so the next read
    /// shows the authoritative state again.
    pub async fn relocate<P: ShiftPersister>(
        &self,
        date: NaiveDate,
        block: &ScheduleBlock,
        target: &DropTarget,
        persister: &P,
    ) -> Result<RelocationDecision> {
        let decision = validate_relocation(block, target)?;
        if let RelocationDecision::Move(mv) = &decision {
            match persister.persist_move(mv).await {
                Ok(()) => {
                    self.apply_move(date, mv).await;
                }
                Err(error) => {
                    tracing::warn!("Persist failed for {date}: {error}");
                    self.invalidate(date).await;
                    return Err(error);
                }
            }
        }
        Ok(decision)
    }

    async fn slot(&self, date: NaiveDate) -> DaySlot {
        self.days.lock().await.entry(date).or_default().clone()
    }
}
