use chrono::{Days, Local, NaiveDate};
use fonviz_api_types::{ChangeResult, DateRange, PriceSeries};
use tracing::{debug, instrument};

use crate::{DbError, FonDb};

/// `(end - start) / start` between the earliest and latest point of `series`.
///
/// Returns `None` for an empty series.
pub fn fractional_change(series: &PriceSeries) -> Result<Option<f64>, DbError> {
    let (Some(start), Some(end)) = (series.earliest(), series.latest()) else {
        return Ok(None);
    };
    if start.price == 0.0 || !start.price.is_finite() {
        return Err(DbError::InvalidBasePrice {
            code: series.code.clone(),
            date: start.date,
            price: start.price,
        });
    }
    Ok(Some((end.price - start.price) / start.price))
}

/// Sorts results from best to worst performer.
pub fn rank_changes(changes: &mut [ChangeResult]) {
    changes.sort_by(|a, b| b.change.total_cmp(&a.change));
}

fn lookback_window(today: NaiveDate, lookback_days: u32) -> DateRange {
    let start = today
        .checked_sub_days(Days::new(lookback_days.into()))
        .unwrap_or(NaiveDate::MIN);
    DateRange::new(start, today)
}

impl FonDb {
    /// Change over the last `lookback_days` days, ending today (local time).
    pub async fn compute_change(
        &self,
        codes: &[String],
        lookback_days: u32,
    ) -> Result<Vec<ChangeResult>, DbError> {
        let today = Local::now().date_naive();
        self.compute_change_between(codes, lookback_window(today, lookback_days))
            .await
    }

    /// Change per code inside `range`. Codes without any price in the window
    /// are left out, the rest keep the order of `codes`.
    #[instrument(skip(self, codes), fields(codes = codes.len()))]
    pub async fn compute_change_between(
        &self,
        codes: &[String],
        range: DateRange,
    ) -> Result<Vec<ChangeResult>, DbError> {
        let mut changes = Vec::with_capacity(codes.len());
        for code in codes {
            let series = self.get_price_series_between(code, range, false).await?;
            match fractional_change(&series)? {
                Some(change) => changes.push(ChangeResult {
                    code: code.clone(),
                    change,
                }),
                None => debug!("no prices for {code} in window, skipping"),
            }
        }
        Ok(changes)
    }
}
