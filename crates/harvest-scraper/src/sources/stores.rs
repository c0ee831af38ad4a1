//! Store-location search: one form POST per region code, JSON back.

use crate::error::ScraperError;
use crate::extract::extract_store_list;
use crate::keys::{RegionCode, RegionCodes};
use crate::pagination::PaginationPolicy;
use crate::transport::{RequestMethod, RequestSpec};
use crate::types::StoreRecord;

use super::Source;

pub const STORE_ENDPOINT: &str = "https://www.starbucks.co.kr/store/getStore.do?r=X2D6LNU8AB";

const REGION_FIELD: &str = "p_sido_cd";

/// Form body sent with every region query, in wire order. The region slot
/// is filled per request; every other value is sent unmodified.
const SEARCH_FORM: &[(&str, &str)] = &[
    ("in_biz_cds", "0"),
    ("in_scodes", "0"),
    ("ins_lat", "37.56682"),
    ("ins_lng", "126.97865"),
    ("search_text", ""),
    (REGION_FIELD, ""),
    ("p_gugun_cd", ""),
    ("isError", "true"),
    ("in_distance", "0"),
    ("in_biz_cd", ""),
    ("iend", "1000"),
    ("searchType", "C"),
    ("set_date", ""),
    ("rndCod", "9QQ7ILZT2H"),
    ("all_store", "0"),
    ("T03", "0"),
    ("T01", "0"),
    ("T27", "0"),
    ("T12", "0"),
    ("T09", "0"),
    ("T30", "0"),
    ("T05", "0"),
    ("T22", "0"),
    ("T21", "0"),
    ("T36", "0"),
    ("T43", "0"),
    ("Z9999", "0"),
    ("T64", "0"),
    ("T66", "0"),
    ("P02", "0"),
    ("P10", "0"),
    ("P50", "0"),
    ("P20", "0"),
    ("P60", "0"),
    ("P30", "0"),
    ("P70", "0"),
    ("P40", "0"),
    ("P80", "0"),
    ("whcroad_yn", "0"),
    ("P90", "0"),
    ("P01", "0"),
    ("new_bool", "0"),
];

const HEADERS: &[(&str, &str)] = &[
    ("origin", "https://www.starbucks.co.kr"),
    ("referer", "https://www.starbucks.co.kr/store/store_map.do"),
    (
        "sec-ch-ua",
        r#""Chromium";v="142", "Google Chrome";v="142", "Not_A Brand";v="99""#,
    ),
    ("sec-ch-ua-mobile", "?0"),
    ("sec-ch-ua-platform", r#""Windows""#),
    ("sec-fetch-dest", "empty"),
    ("sec-fetch-mode", "cors"),
    ("sec-fetch-site", "same-origin"),
    (
        "user-agent",
        "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/142.0.0.0 Safari/537.36",
    ),
    ("x-requested-with", "XMLHttpRequest"),
];

/// Store locations for every region, queried one region at a time.
#[derive(Debug, Clone)]
pub struct StoreSource {
    endpoint: String,
}

impl StoreSource {
    #[must_use]
    pub fn new() -> Self {
        Self {
            endpoint: STORE_ENDPOINT.to_owned(),
        }
    }

    /// Points the source at a different search endpoint (for testing with
    /// wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::InvalidEndpoint`] if `endpoint` is not an
    /// absolute URL.
    pub fn with_endpoint(endpoint: &str) -> Result<Self, ScraperError> {
        reqwest::Url::parse(endpoint).map_err(|e| ScraperError::InvalidEndpoint {
            endpoint: endpoint.to_owned(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            endpoint: endpoint.to_owned(),
        })
    }
}

impl Default for StoreSource {
    fn default() -> Self {
        Self::new()
    }
}

impl Source for StoreSource {
    type Key = RegionCode;
    type Keys = RegionCodes;
    type Record = StoreRecord;

    fn name(&self) -> &'static str {
        "stores"
    }

    fn keys(&self) -> RegionCodes {
        RegionCodes::new()
    }

    fn pagination(&self) -> PaginationPolicy {
        PaginationPolicy::Bounded
    }

    fn request(&self, key: RegionCode) -> RequestSpec {
        let code = key.to_string();
        let params = SEARCH_FORM
            .iter()
            .map(|&(name, value)| {
                let value = if name == REGION_FIELD {
                    code.clone()
                } else {
                    value.to_owned()
                };
                (name, value)
            })
            .collect();

        RequestSpec {
            method: RequestMethod::PostForm,
            url: self.endpoint.clone(),
            headers: HEADERS
                .iter()
                .map(|&(name, value)| (name, value.to_owned()))
                .collect(),
            params,
        }
    }

    fn extract(&self, key: RegionCode, body: &str) -> Result<Vec<StoreRecord>, ScraperError> {
        extract_store_list(body, &format!("region {key}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(n: usize) -> RegionCode {
        RegionCodes::new()
            .nth(n - 1)
            .expect("region code in range")
    }

    #[test]
    fn request_posts_form_to_fixed_endpoint() {
        let request = StoreSource::new().request(code(1));
        assert_eq!(request.method, RequestMethod::PostForm);
        assert_eq!(request.url, STORE_ENDPOINT);
    }

    #[test]
    fn request_fills_region_field_with_two_digit_code() {
        let source = StoreSource::new();
        assert_eq!(source.request(code(1)).param("p_sido_cd"), Some("01"));
        assert_eq!(source.request(code(17)).param("p_sido_cd"), Some("17"));
    }

    #[test]
    fn requests_differ_only_in_region_field() {
        let source = StoreSource::new();
        let first = source.request(code(3));
        let second = source.request(code(11));

        assert_eq!(first.headers, second.headers);
        assert_eq!(first.params.len(), second.params.len());
        for ((name_a, value_a), (name_b, value_b)) in first.params.iter().zip(&second.params) {
            assert_eq!(name_a, name_b, "form field order must be stable");
            if *name_a != REGION_FIELD {
                assert_eq!(value_a, value_b, "field {name_a} must be constant");
            }
        }
    }

    #[test]
    fn request_sends_full_static_filter_table() {
        let request = StoreSource::new().request(code(5));
        assert_eq!(request.params.len(), SEARCH_FORM.len());
        assert_eq!(request.param("iend"), Some("1000"));
        assert_eq!(request.param("searchType"), Some("C"));
        assert_eq!(request.param("new_bool"), Some("0"));
        assert_eq!(request.param("search_text"), Some(""));
    }

    #[test]
    fn request_carries_browser_identity_headers() {
        let request = StoreSource::new().request(code(2));
        assert_eq!(request.header("x-requested-with"), Some("XMLHttpRequest"));
        assert_eq!(request.header("origin"), Some("https://www.starbucks.co.kr"));
        assert!(request.header("referer").is_some());
        assert!(request
            .header("user-agent")
            .is_some_and(|ua| ua.starts_with("Mozilla/5.0")));
        assert!(request.header("host").is_none());
    }

    #[test]
    fn source_is_bounded_over_seventeen_regions() {
        let source = StoreSource::new();
        assert_eq!(source.pagination(), PaginationPolicy::Bounded);
        assert_eq!(source.keys().count(), 17);
    }

    #[test]
    fn with_endpoint_rejects_relative_urls() {
        let err = StoreSource::with_endpoint("/store/getStore.do").unwrap_err();
        assert!(
            matches!(err, ScraperError::InvalidEndpoint { .. }),
            "expected InvalidEndpoint, got: {err:?}"
        );
    }

    #[test]
    fn extract_labels_errors_with_region() {
        let err = StoreSource::new().extract(code(9), "{}").unwrap_err();
        assert!(
            matches!(err, ScraperError::MissingList { ref context } if context == "region 09"),
            "expected MissingList for region 09, got: {err:?}"
        );
    }
}
