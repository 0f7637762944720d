use std::sync::Arc;

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use fonviz_api_types::{
    prices::{PriceImages, PricesRequest},
    DateRange, PriceSeries,
};
use fonviz_charts::{render_png, ChartOptions};
use fonviz_db::{parse_date, FonDb};
use tracing::{info, instrument};

use super::error::ApiError;
use crate::config::AppConfig;

const SIZE: (u32, u32) = (1280, 960);

/// Checks everything about the request that does not need the store.
fn validate(request: &PricesRequest, config: &AppConfig) -> Result<DateRange, ApiError> {
    if request.codes.is_empty() {
        return Err(ApiError::Validation("codes must not be empty".into()));
    }
    if request.codes.iter().any(|code| code.trim().is_empty()) {
        return Err(ApiError::Validation("codes must not be blank".into()));
    }
    let parse = |value: &str| {
        parse_date(value).map_err(|_| {
            ApiError::Validation(format!("invalid date {value:?}, expected YYYY-MM-DD"))
        })
    };
    let range = DateRange::new(parse(&request.dates.start)?, parse(&request.dates.end)?);
    if range.start >= range.end {
        return Err(ApiError::Validation(format!(
            "start {} must be before end {}",
            range.start, range.end
        )));
    }
    if range.end <= config.oldest {
        return Err(ApiError::Validation(format!(
            "no data before {}",
            config.oldest
        )));
    }
    Ok(range)
}

fn encode_charts(series: Vec<PriceSeries>, range: DateRange) -> Result<Vec<String>, ApiError> {
    let options = ChartOptions {
        size: SIZE,
        title: None,
        date_range: Some(range),
    };
    series
        .into_iter()
        .map(|series| -> Result<String, ApiError> {
            let png = render_png(std::slice::from_ref(&series), &options)?;
            Ok(STANDARD.encode(png))
        })
        .collect()
}

/// One png chart per requested code, in request order.
#[instrument(skip(config, payload))]
pub(crate) async fn get_prices(
    State(config): State<Arc<AppConfig>>,
    payload: Result<Json<PricesRequest>, JsonRejection>,
) -> Result<Json<PriceImages>, ApiError> {
    let Json(request) = payload?;
    let range = validate(&request, &config)?;
    info!(
        "charting {:?} between {} and {}, normalize {}",
        request.codes, range.start, range.end, request.normalize
    );

    // every request gets its own handle, dropped on any early return
    let db = FonDb::open(&config.db_file).await?;
    let mut series = Vec::with_capacity(request.codes.len());
    for code in &request.codes {
        series.push(
            db.get_price_series_between(code, range, request.normalize)
                .await?,
        );
    }
    db.close().await?;

    let images = tokio::task::spawn_blocking(move || encode_charts(series, range)).await??;
    Ok(Json(PriceImages { images }))
}

#[cfg(test)]
mod test {
    use std::path::PathBuf;

    use chrono::NaiveDate;
    use fonviz_api_types::prices::{PricesRequest, RequestDates};

    use super::validate;
    use crate::{config::AppConfig, web::error::ApiError};

    fn config() -> AppConfig {
        AppConfig {
            db_file: PathBuf::from("funds.db"),
            oldest: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
            server_hostname: "127.0.0.1".into(),
            server_port: 5000,
        }
    }

    fn request(codes: &[&str], start: &str, end: &str) -> PricesRequest {
        PricesRequest {
            codes: codes.iter().map(|c| c.to_string()).collect(),
            dates: RequestDates {
                start: start.into(),
                end: end.into(),
            },
            normalize: false,
        }
    }

    #[test]
    fn valid_request() {
        let range = validate(&request(&["ABC"], "2022-01-01", "2022-02-01"), &config()).unwrap();
        assert_eq!(range.start, NaiveDate::from_ymd_opt(2022, 1, 1).unwrap());
        assert_eq!(range.end, NaiveDate::from_ymd_opt(2022, 2, 1).unwrap());
    }

    #[test]
    fn invalid_requests() {
        let config = config();
        for request in [
            request(&[], "2022-01-01", "2022-02-01"),
            request(&[" "], "2022-01-01", "2022-02-01"),
            request(&["ABC"], "2022-1-1x", "2022-02-01"),
            request(&["ABC"], "2022-01-01", ""),
            request(&["ABC"], "2022-02-01", "2022-02-01"),
            request(&["ABC"], "2022-03-01", "2022-02-01"),
            request(&["ABC"], "2019-01-01", "2019-06-01"),
        ] {
            assert!(matches!(
                validate(&request, &config),
                Err(ApiError::Validation(_))
            ));
        }
    }
}
