use chrono::NaiveDate;

/// Inclusive span of calendar days, iterable one day at a time.
#[derive(Clone, Eq, PartialEq, Copy, Debug)]
pub struct DateRange(pub NaiveDate, pub NaiveDate);

impl DateRange {
    /// Smallest range covering every date in `dates`, or None when empty.
    pub fn covering<'a, I>(dates: I) -> Option<DateRange>
    where
        I: IntoIterator<Item = &'a NaiveDate>,
    {
        let mut iter = dates.into_iter();
        let first = *iter.next()?;
        let (lo, hi) = iter.fold((first, first), |(lo, hi), d| (lo.min(*d), hi.max(*d)));
        Some(DateRange(lo, hi))
    }
}

impl Iterator for DateRange {
    type Item = NaiveDate;
    fn next(&mut self) -> Option<Self::Item> {
        if self.0 > self.1 {
            return None;
        }
        let current = self.0;
        match current.succ_opt() {
            Some(next) => self.0 = next,
            // NaiveDate::MAX has no successor; push past the end instead
            None => self.1 = current.pred_opt().unwrap_or(current),
        }
        Some(current)
    }
}
