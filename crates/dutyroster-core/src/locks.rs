use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};

use chrono::NaiveDate;

use crate::error::Result;
use crate::store::StoreError;

/// One reader/writer lock per roster date.
///
/// Assignment writes hold the date's write lock across their checks and the
/// final store write; grouping and roster views hold the read lock so they see
/// either all of a write or none of it.
///
/// Entries nobody holds are dropped on the next lookup, so the table only
/// grows with the number of dates in use at once.
#[derive(Debug, Default)]
pub struct DateLocks {
    locks: Mutex<HashMap<NaiveDate, Arc<RwLock<()>>>>,
}

impl DateLocks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn for_date(&self, date: NaiveDate) -> Result<Arc<RwLock<()>>> {
        let mut locks = self
            .locks
            .lock()
            .map_err(|_| StoreError::Unavailable("date lock table poisoned".to_string()))?;
        locks.retain(|day, lock| *day == date || Arc::strong_count(lock) > 1);
        Ok(Arc::clone(locks.entry(date).or_default()))
    }

    #[cfg(test)]
    fn tracked(&self) -> usize {
        self.locks.lock().map(|l| l.len()).unwrap_or(0)
    }
}

pub(crate) fn poisoned(date: NaiveDate) -> StoreError {
    StoreError::Unavailable(format!("lock for {} poisoned", date))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_date_shares_a_lock() {
        let locks = DateLocks::new();
        let day = NaiveDate::from_ymd_opt(2024, 1, 6).unwrap();
        let a = locks.for_date(day).unwrap();
        let b = locks.for_date(day).unwrap();
        assert!(Arc::ptr_eq(&a, &b));

        let other = locks.for_date(day.succ_opt().unwrap()).unwrap();
        assert!(!Arc::ptr_eq(&a, &other));
    }

    #[test]
    fn test_released_dates_are_pruned() {
        let locks = DateLocks::new();
        let first = NaiveDate::from_ymd_opt(2024, 1, 6).unwrap();

        let held = locks.for_date(first).unwrap();
        for offset in 1..=30 {
            let day = first + chrono::Duration::days(offset);
            drop(locks.for_date(day).unwrap());
        }
        // The held date plus the most recent lookup
        assert_eq!(locks.tracked(), 2);

        // Still the same lock while someone holds it
        assert!(Arc::ptr_eq(&held, &locks.for_date(first).unwrap()));

        drop(held);
        locks.for_date(first + chrono::Duration::days(100)).unwrap();
        assert_eq!(locks.tracked(), 1);
    }
}
