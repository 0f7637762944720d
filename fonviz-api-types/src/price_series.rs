use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub price: f64,
}

/// Prices for a single fund, ordered by date ascending.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    pub code: String,
    pub points: Vec<PricePoint>,
}

impl PriceSeries {
    pub fn new(code: impl Into<String>, points: Vec<PricePoint>) -> Self {
        Self {
            code: code.into(),
            points,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Point with the smallest date, regardless of where it sits in `points`.
    pub fn earliest(&self) -> Option<&PricePoint> {
        self.points.iter().min_by_key(|point| point.date)
    }

    /// Point with the largest date, regardless of where it sits in `points`.
    pub fn latest(&self) -> Option<&PricePoint> {
        self.points.iter().max_by_key(|point| point.date)
    }
}
