use serde::{Deserialize, Serialize};

/// Raw date strings as sent by clients. Parsed and validated by the server.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestDates {
    pub start: String,
    pub end: String,
}

/// Body of `POST /get_prices`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PricesRequest {
    pub codes: Vec<String>,
    pub dates: RequestDates,
    pub normalize: bool,
}

/// Base64 encoded PNG charts, one per requested code in request order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceImages {
    pub images: Vec<String>,
}

#[cfg(test)]
mod test {
    use super::PricesRequest;

    #[test]
    fn parse_request_body() {
        let body = r#"{"codes": ["ABC", "XYZ"], "dates": {"start": "2022-01-01", "end": "2022-02-01"}, "normalize": true}"#;
        let request: PricesRequest = serde_json::from_str(body).unwrap();
        assert_eq!(request.codes, ["ABC", "XYZ"]);
        assert_eq!(request.dates.start, "2022-01-01");
        assert_eq!(request.dates.end, "2022-02-01");
        assert!(request.normalize);
    }

    #[test]
    fn missing_normalize_is_rejected() {
        let body = r#"{"codes": ["ABC"], "dates": {"start": "2022-01-01", "end": "2022-02-01"}}"#;
        assert!(serde_json::from_str::<PricesRequest>(body).is_err());
    }
}
