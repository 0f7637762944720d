mod change;
mod price_series;

pub mod prices;
pub mod result;

pub use change::ChangeResult;
pub use price_series::{PricePoint, PriceSeries};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Date window with exclusive bounds on both ends.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// True when `date` lies strictly between `start` and `end`.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start < date && date < self.end
    }
}
