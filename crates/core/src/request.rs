//! Outbound request construction.
//!
//! Requests are built from semantic inputs (dates, year ranges) and
//! rendered to a full URL with fixed-width zero-padded date parameters,
//! matching the query contract of the conversion service.

use chrono::{Datelike, NaiveDate};

use crate::envelope::PayloadFormat;
use crate::item::{leap_marker, LunarDate};

/// Base URL of the public KASI lunar-solar conversion service.
pub const DEFAULT_BASE_URL: &str =
    "http://apis.data.go.kr/B090041/openapi/service/LrsrCldInfoService";

/// The three operations of the external service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// `getLunCalInfo`: lunar record(s) for a solar date or month.
    LunarFromSolar,
    /// `getSolCalInfo`: solar record(s) for a lunar date or month.
    SolarFromLunar,
    /// `getSpcifyLunCalInfo`: a recurring lunar date over a span of
    /// solar years.
    SpecifiedLunar,
}

impl Operation {
    pub fn path(self) -> &'static str {
        match self {
            Self::LunarFromSolar => "getLunCalInfo",
            Self::SolarFromLunar => "getSolCalInfo",
            Self::SpecifiedLunar => "getSpcifyLunCalInfo",
        }
    }
}

/// One outbound query, ready to be paged and rendered to a URL.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    operation: Operation,
    params: Vec<(&'static str, String)>,
}

impl Request {
    fn new(operation: Operation) -> Self {
        Self {
            operation,
            params: Vec::new(),
        }
    }

    fn param(mut self, name: &'static str, value: String) -> Self {
        self.params.push((name, value));
        self
    }

    /// Query for the lunar rendition of one solar date.
    pub fn lunar_from_solar(date: NaiveDate) -> Self {
        Self::new(Operation::LunarFromSolar)
            .param("solYear", format!("{:04}", date.year()))
            .param("solMonth", format!("{:02}", date.month()))
            .param("solDay", format!("{:02}", date.day()))
    }

    /// Query for every day of one solar month.
    pub fn lunar_from_solar_month(year: i32, month: u32) -> Self {
        Self::new(Operation::LunarFromSolar)
            .param("solYear", format!("{year:04}"))
            .param("solMonth", format!("{month:02}"))
    }

    /// Query for the solar rendition of one lunar date.
    ///
    /// The endpoint has no leap-month parameter; when the month number
    /// also exists as a leap month the response carries both instances
    /// and the caller filters by the flag it wants.
    pub fn solar_from_lunar(date: LunarDate) -> Self {
        Self::new(Operation::SolarFromLunar)
            .param("lunYear", format!("{:04}", date.year))
            .param("lunMonth", format!("{:02}", date.month))
            .param("lunDay", format!("{:02}", date.day))
    }

    /// Query for every day of one lunar month.
    pub fn solar_from_lunar_month(year: i32, month: u32) -> Self {
        Self::new(Operation::SolarFromLunar)
            .param("lunYear", format!("{year:04}"))
            .param("lunMonth", format!("{month:02}"))
    }

    /// Query for a recurring lunar date across a solar year range.
    pub fn specified_lunar(
        from_sol_year: i32,
        to_sol_year: i32,
        lun_month: u32,
        lun_day: u32,
        leap: bool,
    ) -> Self {
        Self::new(Operation::SpecifiedLunar)
            .param("fromSolYear", format!("{from_sol_year:04}"))
            .param("toSolYear", format!("{to_sol_year:04}"))
            .param("lunMonth", format!("{lun_month:02}"))
            .param("lunDay", format!("{lun_day:02}"))
            .param("leapMonth", leap_marker(leap).to_owned())
    }

    pub fn operation(&self) -> Operation {
        self.operation
    }

    pub fn params(&self) -> &[(&'static str, String)] {
        &self.params
    }

    /// Attaches paging parameters; page numbers are 1-based.
    pub fn page(self, page_no: u32, num_of_rows: u32) -> Self {
        self.param("pageNo", page_no.to_string())
            .param("numOfRows", num_of_rows.to_string())
    }

    /// Renders the full request URL with a percent-encoded query
    /// string.
    pub fn to_url(&self, base_url: &str, service_key: &str, format: PayloadFormat) -> String {
        let mut url = format!(
            "{}/{}?ServiceKey={}",
            base_url.trim_end_matches('/'),
            self.operation.path(),
            urlencoding::encode(service_key)
        );
        for (name, value) in &self.params {
            url.push('&');
            url.push_str(name);
            url.push('=');
            url.push_str(&urlencoding::encode(value));
        }
        if format == PayloadFormat::Json {
            url.push_str("&_type=json");
        }
        url
    }
}

/// Number of pages needed to cover `total_count` records.
pub fn pages_for_total(total_count: u32, num_of_rows: u32) -> u32 {
    if num_of_rows == 0 {
        return 0;
    }
    total_count.div_ceil(num_of_rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_single_date_params_are_zero_padded() {
        let request = Request::lunar_from_solar(date(2021, 3, 7));
        assert_eq!(request.operation(), Operation::LunarFromSolar);
        assert_eq!(
            request.params(),
            &[
                ("solYear", "2021".to_string()),
                ("solMonth", "03".to_string()),
                ("solDay", "07".to_string()),
            ]
        );
    }

    #[test]
    fn test_month_query_omits_the_day() {
        let request = Request::solar_from_lunar_month(2020, 4);
        assert_eq!(
            request.params(),
            &[
                ("lunYear", "2020".to_string()),
                ("lunMonth", "04".to_string()),
            ]
        );
    }

    #[test]
    fn test_specified_query_carries_the_leap_marker() {
        let request = Request::specified_lunar(2015, 2025, 8, 15, false);
        let url = request.to_url("http://calendar.test/service/", "key", PayloadFormat::Xml);
        assert!(url.starts_with("http://calendar.test/service/getSpcifyLunCalInfo?"));
        assert!(url.contains("fromSolYear=2015"));
        assert!(url.contains("toSolYear=2025"));
        assert!(url.contains("lunMonth=08"));
        assert!(url.contains("lunDay=15"));
        assert!(url.contains(&format!("leapMonth={}", urlencoding::encode("평"))));
    }

    #[test]
    fn test_url_rendering_encodes_the_service_key() {
        let request = Request::lunar_from_solar(date(2020, 12, 14)).page(1, 10);
        let url = request.to_url(
            "http://calendar.test/service",
            "abc+def==",
            PayloadFormat::Xml,
        );
        assert!(url.contains("ServiceKey=abc%2Bdef%3D%3D"));
        assert!(url.ends_with("pageNo=1&numOfRows=10"));
        assert!(!url.contains("_type"));
    }

    #[test]
    fn test_json_format_adds_the_type_selector() {
        let url = Request::lunar_from_solar_month(2020, 12).to_url(
            "http://calendar.test/service",
            "key",
            PayloadFormat::Json,
        );
        assert!(url.ends_with("&_type=json"));
    }

    #[test]
    fn test_pages_for_total() {
        assert_eq!(pages_for_total(0, 10), 0);
        assert_eq!(pages_for_total(1, 10), 1);
        assert_eq!(pages_for_total(10, 10), 1);
        assert_eq!(pages_for_total(31, 10), 4);
        assert_eq!(pages_for_total(5, 0), 0);
    }
}
