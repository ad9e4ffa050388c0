use chrono::{Days, Months, NaiveDate};

use crate::io::paths::PathResolver;
use crate::io::storage::Storage;

/// How far `find_next` may step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextPolicy {
    /// Only an existing note, never past today
    MustExist,
    /// Like `MustExist`, but fall back to today even if its note doesn't
    /// exist yet (viewing today creates it)
    AllowToday,
}

/// Date-indexed scans over the notes archive used by prev/next browsing.
pub struct Navigator<'a, S: Storage + ?Sized> {
    storage: &'a S,
    resolver: &'a PathResolver,
    today: NaiveDate,
    window_days: u32,
}

impl<'a, S: Storage + ?Sized> Navigator<'a, S> {
    pub fn new(
        storage: &'a S,
        resolver: &'a PathResolver,
        today: NaiveDate,
        window_days: u32,
    ) -> Self {
        Navigator {
            storage,
            resolver,
            today,
            window_days,
        }
    }

    fn exists(&self, date: NaiveDate) -> bool {
        self.resolver
            .resolve_existing(self.storage, date)
            .exists()
    }

    fn window_start(&self) -> NaiveDate {
        self.today
            .checked_sub_months(Months::new(12))
            .unwrap_or(self.today)
    }

    /// First existing note in the window that starts one year before today.
    pub fn find_oldest(&self) -> Option<NaiveDate> {
        let start = self.window_start();
        (0..u64::from(self.window_days))
            .filter_map(|offset| start.checked_add_days(Days::new(offset)))
            .find(|d| self.exists(*d))
    }

    /// Nearest existing note before `date`, never earlier than the oldest.
    pub fn find_previous(&self, date: NaiveDate) -> Option<NaiveDate> {
        let oldest = self.find_oldest()?;
        let mut check = date.pred_opt()?;
        while check >= oldest {
            if self.exists(check) {
                return Some(check);
            }
            check = check.pred_opt()?;
        }
        None
    }

    /// Nearest note after `date`, up to and including today. Dates before
    /// the window start are not probed.
    pub fn find_next(&self, date: NaiveDate, policy: NextPolicy) -> Option<NaiveDate> {
        let mut check = date.succ_opt()?.max(self.window_start());
        while check <= self.today {
            if self.exists(check) {
                return Some(check);
            }
            check = check.succ_opt()?;
        }
        match policy {
            NextPolicy::AllowToday if date < self.today => Some(self.today),
            _ => None,
        }
    }
}
