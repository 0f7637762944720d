use fonviz_api_types::PriceSeries;

use crate::DbError;

/// Rescales `series` so the price on its earliest date becomes `1.0`.
///
/// The base is looked up by date, not by position. A zero or non finite base
/// is rejected instead of filling the series with infinities.
pub fn normalize(mut series: PriceSeries) -> Result<PriceSeries, DbError> {
    let Some(base) = series.earliest().copied() else {
        return Ok(series);
    };
    if base.price == 0.0 || !base.price.is_finite() {
        return Err(DbError::InvalidBasePrice {
            code: series.code,
            date: base.date,
            price: base.price,
        });
    }
    for point in &mut series.points {
        point.price /= base.price;
    }
    Ok(series)
}

#[cfg(test)]
mod test {
    use chrono::NaiveDate;
    use fonviz_api_types::{PricePoint, PriceSeries};

    use super::normalize;

    fn point(y: i32, m: u32, d: u32, price: f64) -> PricePoint {
        PricePoint {
            date: NaiveDate::from_ymd_opt(y, m, d).unwrap(),
            price,
        }
    }

    #[test]
    fn earliest_becomes_one() {
        let series = PriceSeries::new(
            "ABC",
            vec![point(2022, 10, 1, 10.0), point(2022, 10, 15, 12.0)],
        );
        let normalized = normalize(series).unwrap();
        assert_eq!(
            normalized.points,
            vec![point(2022, 10, 1, 1.0), point(2022, 10, 15, 1.2)]
        );
    }

    #[test]
    fn base_is_found_by_date_not_position() {
        let series = PriceSeries::new(
            "ABC",
            vec![
                point(2022, 11, 1, 30.0),
                point(2022, 10, 1, 20.0),
                point(2022, 10, 15, 10.0),
            ],
        );
        let normalized = normalize(series).unwrap();
        let prices: Vec<_> = normalized.points.iter().map(|p| p.price).collect();
        assert_eq!(prices, vec![1.5, 1.0, 0.5]);
        assert_eq!(normalized.earliest().unwrap().price, 1.0);
    }

    #[test]
    fn ratios_are_preserved() {
        let prices = [3.7, 4.1, 9.25, 0.5, 123.0];
        let series = PriceSeries::new(
            "ABC",
            prices
                .iter()
                .enumerate()
                .map(|(i, p)| point(2022, 1, i as u32 + 1, *p))
                .collect(),
        );
        let normalized = normalize(series).unwrap();
        for (original, scaled) in prices.iter().zip(&normalized.points) {
            let factor = original / scaled.price;
            assert!((factor - prices[0]).abs() < 1e-9);
        }
    }

    #[test]
    fn zero_base_is_rejected() {
        let series = PriceSeries::new(
            "ZER",
            vec![point(2022, 10, 15, 1.0), point(2022, 10, 1, 0.0)],
        );
        let err = normalize(series).unwrap_err();
        assert!(err.is_division());
    }

    #[test]
    fn zero_later_is_fine() {
        let series = PriceSeries::new(
            "ZER",
            vec![point(2022, 10, 1, 2.0), point(2022, 10, 15, 0.0)],
        );
        let normalized = normalize(series).unwrap();
        assert_eq!(normalized.points[1].price, 0.0);
    }

    #[test]
    fn empty_series_passes_through() {
        let series = PriceSeries::new("ABC", vec![]);
        assert!(normalize(series).unwrap().is_empty());
    }
}
