use chrono::NaiveDate;
use fonviz_api_types::{DateRange, PricePoint, PriceSeries};
use sea_orm::{DbBackend, FromQueryResult, Statement, Value};
use tracing::{debug, instrument};

use crate::{DbError, FonDb, PRICE_TABLE};

#[derive(Debug, FromQueryResult)]
struct PriceRow {
    date: NaiveDate,
    price: f64,
}

impl From<PriceRow> for PricePoint {
    fn from(PriceRow { date, price }: PriceRow) -> Self {
        PricePoint { date, price }
    }
}

/// Parses an ISO-8601 calendar date (`2022-10-01`).
pub fn parse_date(value: &str) -> Result<NaiveDate, DbError> {
    value
        .trim()
        .parse()
        .map_err(|_| DbError::InvalidDate(value.to_string()))
}

// `date(date)` folds stored timestamps down to the day and the cast tolerates
// prices kept as text.
fn price_query(date_filter: &str) -> String {
    format!(
        r#"SELECT date(date) AS date, CAST(price AS REAL) AS price
            FROM {PRICE_TABLE}
            WHERE code = ? AND price IS NOT NULL AND date(date) IS NOT NULL {date_filter}
            ORDER BY date(date) ASC"#
    )
}

impl FonDb {
    async fn fetch_points(
        &self,
        sql: String,
        values: Vec<Value>,
    ) -> Result<Vec<PricePoint>, DbError> {
        let rows = PriceRow::find_by_statement(Statement::from_sql_and_values(
            DbBackend::Sqlite,
            sql,
            values,
        ))
        .all(self.connection())
        .await?;
        Ok(rows.into_iter().map(PricePoint::from).collect())
    }

    /// Every stored price for `code`, oldest first.
    ///
    /// Rows with a null price or a date sqlite cannot read are not part of
    /// the series.
    #[instrument(skip(self))]
    pub async fn get_price_series(&self, code: &str) -> Result<PriceSeries, DbError> {
        let points = self.fetch_points(price_query(""), vec![code.into()]).await?;
        debug!("{} prices for {code}", points.len());
        Ok(PriceSeries::new(code, points))
    }

    /// Just the price column for `code`, oldest first.
    #[instrument(skip(self))]
    pub async fn get_prices(&self, code: &str) -> Result<Vec<f64>, DbError> {
        let series = self.get_price_series(code).await?;
        Ok(series.points.into_iter().map(|point| point.price).collect())
    }

    /// Prices for `code` with `range.start < date < range.end`, oldest first.
    #[instrument(skip(self))]
    pub async fn get_price_series_between(
        &self,
        code: &str,
        range: DateRange,
        normalize: bool,
    ) -> Result<PriceSeries, DbError> {
        let points = self
            .fetch_points(
                price_query("AND date(date) > ? AND date(date) < ?"),
                vec![code.into(), range.start.into(), range.end.into()],
            )
            .await?;
        debug!("{} prices for {code} in window", points.len());
        let series = PriceSeries::new(code, points);
        if normalize {
            crate::normalize(series)
        } else {
            Ok(series)
        }
    }

    /// String date variant of [`FonDb::get_price_series_between`].
    pub async fn get_price_series_in_range(
        &self,
        code: &str,
        start: &str,
        end: &str,
        normalize: bool,
    ) -> Result<PriceSeries, DbError> {
        let range = DateRange::new(parse_date(start)?, parse_date(end)?);
        self.get_price_series_between(code, range, normalize).await
    }
}
