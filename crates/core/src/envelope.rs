//! Decoding of service response payloads.
//!
//! The wire format (XML or JSON) is a configuration choice, not a code
//! fork: both decoders fill the same raw string-field record per item
//! and share the validation that turns a record into a
//! [`CalendarItem`]. Cross-field checks (leap-year flag, weekday,
//! Julian day) run here, at the decode boundary, so no inconsistent
//! record ever reaches a caller.

use quick_xml::events::Event;
use quick_xml::Reader;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Error;
use crate::item::{
    leap_marker, parse_leap_marker, parse_weekday, weekday_glyph, CalendarItem, LunarFields,
    SexagenaryLabel, SolarFields,
};

/// Result code the service uses for a successful call.
pub const RESULT_CODE_OK: &str = "00";

/// Wire format of the response payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PayloadFormat {
    Xml,
    Json,
}

impl std::str::FromStr for PayloadFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "xml" => Ok(Self::Xml),
            "json" => Ok(Self::Json),
            other => Err(format!(
                "unknown payload format `{other}` (expected `xml` or `json`)"
            )),
        }
    }
}

impl std::fmt::Display for PayloadFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Xml => "xml",
            Self::Json => "json",
        })
    }
}

/// Result-status header of a response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseHeader {
    pub result_code: String,
    pub result_msg: String,
}

/// Body of a response: the records plus the paging counters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResponseBody {
    pub items: Vec<CalendarItem>,
    pub num_of_rows: u32,
    pub page_no: u32,
    pub total_count: u32,
}

/// One decoded response payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    pub header: ResponseHeader,
    pub body: ResponseBody,
}

impl ResponseEnvelope {
    /// Decodes a raw payload in the configured wire format.
    pub fn decode(raw: &str, format: PayloadFormat) -> Result<Self, Error> {
        match format {
            PayloadFormat::Xml => decode_xml(raw),
            PayloadFormat::Json => decode_json(raw),
        }
    }

    /// True iff the header carries the success result code.
    pub fn is_successful(&self) -> bool {
        self.header.result_code == RESULT_CODE_OK
    }

    /// Yields the body, or the header's code and message as an error.
    pub fn require_successful(self) -> Result<ResponseBody, Error> {
        if self.is_successful() {
            Ok(self.body)
        } else {
            Err(Error::ServiceResult {
                code: self.header.result_code,
                message: self.header.result_msg,
            })
        }
    }

    /// Records of this page; empty when the page is past the end of
    /// the result set.
    pub fn items(&self) -> &[CalendarItem] {
        &self.body.items
    }
}

/// The wire fields of one record, still as strings.
#[derive(Debug, Default)]
struct RawRecord {
    lun_year: Option<String>,
    lun_month: Option<String>,
    lun_day: Option<String>,
    lun_leapmonth: Option<String>,
    lun_nday: Option<String>,
    lun_secha: Option<String>,
    lun_wolgeon: Option<String>,
    lun_iljin: Option<String>,
    sol_year: Option<String>,
    sol_month: Option<String>,
    sol_day: Option<String>,
    sol_leapyear: Option<String>,
    sol_week: Option<String>,
    sol_jd: Option<String>,
}

impl RawRecord {
    fn set(&mut self, name: &str, value: String) {
        let slot = match name {
            "lunYear" => &mut self.lun_year,
            "lunMonth" => &mut self.lun_month,
            "lunDay" => &mut self.lun_day,
            "lunLeapmonth" => &mut self.lun_leapmonth,
            "lunNday" => &mut self.lun_nday,
            "lunSecha" => &mut self.lun_secha,
            "lunWolgeon" => &mut self.lun_wolgeon,
            "lunIljin" => &mut self.lun_iljin,
            "solYear" => &mut self.sol_year,
            "solMonth" => &mut self.sol_month,
            "solDay" => &mut self.sol_day,
            "solLeapyear" => &mut self.sol_leapyear,
            "solWeek" => &mut self.sol_week,
            "solJd" => &mut self.sol_jd,
            _ => return,
        };
        *slot = Some(value);
    }

    fn into_item(self) -> Result<CalendarItem, Error> {
        let lun_year = parse_i32("lunYear", &require(self.lun_year, "lunYear")?)?;
        let lun_month = parse_u32("lunMonth", &require(self.lun_month, "lunMonth")?)?;
        let lun_day = parse_u32("lunDay", &require(self.lun_day, "lunDay")?)?;
        let leap_month =
            parse_leap_marker("lunLeapmonth", &require(self.lun_leapmonth, "lunLeapmonth")?)?;
        let month_days = self
            .lun_nday
            .as_deref()
            .map(|value| parse_u32("lunNday", value))
            .transpose()?;

        if !(1..=12).contains(&lun_month) {
            return Err(range_error("lunMonth", lun_month, 1, 12));
        }
        if !(1..=30).contains(&lun_day) {
            return Err(range_error("lunDay", lun_day, 1, 30));
        }
        if let Some(days) = month_days {
            if !(29..=30).contains(&days) {
                return Err(range_error("lunNday", days, 29, 30));
            }
            if lun_day > days {
                return Err(Error::MalformedField {
                    field: "lunDay",
                    reason: format!("day {lun_day} exceeds the {days}-day month"),
                });
            }
        }

        let sol_year = parse_i32("solYear", &require(self.sol_year, "solYear")?)?;
        let sol_month = parse_u32("solMonth", &require(self.sol_month, "solMonth")?)?;
        let sol_day = parse_u32("solDay", &require(self.sol_day, "solDay")?)?;
        let leap_year =
            parse_leap_marker("solLeapyear", &require(self.sol_leapyear, "solLeapyear")?)?;
        let weekday = parse_weekday("solWeek", &require(self.sol_week, "solWeek")?)?;
        let julian_day = parse_i64("solJd", &require(self.sol_jd, "solJd")?)?;

        if !(1..=12).contains(&sol_month) {
            return Err(range_error("solMonth", sol_month, 1, 12));
        }
        if !(1..=31).contains(&sol_day) {
            return Err(range_error("solDay", sol_day, 1, 31));
        }
        if julian_day < 0 {
            return Err(Error::MalformedField {
                field: "solJd",
                reason: format!("day number {julian_day} is negative"),
            });
        }

        let date = chrono::NaiveDate::from_ymd_opt(sol_year, sol_month, sol_day).ok_or_else(
            || Error::MalformedField {
                field: "solDay",
                reason: format!(
                    "{sol_year:04}-{sol_month:02}-{sol_day:02} is not a calendar date"
                ),
            },
        )?;
        let solar = SolarFields::from_date(date);
        if solar.leap_year != leap_year {
            return Err(Error::MalformedField {
                field: "solLeapyear",
                reason: format!(
                    "flag `{}` disagrees with year {sol_year}",
                    leap_marker(leap_year)
                ),
            });
        }
        if solar.weekday != weekday {
            return Err(Error::MalformedField {
                field: "solWeek",
                reason: format!("`{}` is not the weekday of {date}", weekday_glyph(weekday)),
            });
        }
        if solar.julian_day != julian_day {
            return Err(Error::MalformedField {
                field: "solJd",
                reason: format!(
                    "{julian_day} is not the Julian day of {date} ({})",
                    solar.julian_day
                ),
            });
        }

        Ok(CalendarItem {
            solar: Some(solar),
            lunar: Some(LunarFields {
                year: lun_year,
                month: lun_month,
                day: lun_day,
                leap_month,
                month_days,
            }),
            year_label: label(self.lun_secha),
            month_label: label(self.lun_wolgeon),
            day_label: label(self.lun_iljin),
        })
    }
}

fn require(field: Option<String>, name: &'static str) -> Result<String, Error> {
    field.ok_or(Error::MissingField(name))
}

fn label(value: Option<String>) -> Option<SexagenaryLabel> {
    value
        .map(|raw| raw.trim().to_owned())
        .filter(|raw| !raw.is_empty())
        .map(SexagenaryLabel::new)
}

fn range_error(field: &'static str, value: impl std::fmt::Display, lo: u32, hi: u32) -> Error {
    Error::MalformedField {
        field,
        reason: format!("value {value} out of range {lo}-{hi}"),
    }
}

fn parse_i32(field: &'static str, value: &str) -> Result<i32, Error> {
    let trimmed = value.trim();
    trimmed.parse().map_err(|_| Error::MalformedField {
        field,
        reason: format!("`{trimmed}` is not a number"),
    })
}

fn parse_u32(field: &'static str, value: &str) -> Result<u32, Error> {
    let trimmed = value.trim();
    trimmed.parse().map_err(|_| Error::MalformedField {
        field,
        reason: format!("`{trimmed}` is not a number"),
    })
}

fn parse_i64(field: &'static str, value: &str) -> Result<i64, Error> {
    let trimmed = value.trim();
    trimmed.parse().map_err(|_| Error::MalformedField {
        field,
        reason: format!("`{trimmed}` is not a number"),
    })
}

fn decode_xml(raw: &str) -> Result<ResponseEnvelope, Error> {
    let mut reader = Reader::from_reader(raw.as_bytes());
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut current: Option<String> = None;
    let mut in_item = false;
    let mut record = RawRecord::default();
    let mut result_code: Option<String> = None;
    let mut result_msg = String::new();
    let mut body = ResponseBody::default();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                let name = std::str::from_utf8(e.local_name().as_ref())
                    .map_err(|err| Error::PayloadDecode(err.to_string()))?
                    .to_owned();
                if name == "item" {
                    in_item = true;
                    record = RawRecord::default();
                }
                current = Some(name);
            }
            Ok(Event::Text(ref e)) => {
                let text = e
                    .xml_content()
                    .map_err(|err| Error::PayloadDecode(err.to_string()))?
                    .into_owned();
                if let Some(name) = current.as_deref() {
                    if in_item {
                        record.set(name, text);
                    } else {
                        match name {
                            "resultCode" => result_code = Some(text),
                            "resultMsg" => result_msg = text,
                            "numOfRows" => body.num_of_rows = parse_u32("numOfRows", &text)?,
                            "pageNo" => body.page_no = parse_u32("pageNo", &text)?,
                            "totalCount" => body.total_count = parse_u32("totalCount", &text)?,
                            _ => {}
                        }
                    }
                }
            }
            Ok(Event::End(ref e)) => {
                let local = e.local_name();
                let name = std::str::from_utf8(local.as_ref())
                    .map_err(|err| Error::PayloadDecode(err.to_string()))?;
                if name == "item" {
                    in_item = false;
                    body.items.push(std::mem::take(&mut record).into_item()?);
                }
                current = None;
            }
            Ok(Event::Eof) => break,
            Err(err) => return Err(Error::PayloadDecode(err.to_string())),
            Ok(_) => {}
        }
        buf.clear();
    }

    let result_code =
        result_code.ok_or_else(|| Error::PayloadDecode("response has no result header".into()))?;
    Ok(ResponseEnvelope {
        header: ResponseHeader {
            result_code,
            result_msg,
        },
        body,
    })
}

fn decode_json(raw: &str) -> Result<ResponseEnvelope, Error> {
    let root: Value =
        serde_json::from_str(raw).map_err(|err| Error::PayloadDecode(err.to_string()))?;
    let response = root
        .get("response")
        .ok_or_else(|| Error::PayloadDecode("payload has no `response` root".into()))?;
    let header = response
        .get("header")
        .ok_or_else(|| Error::PayloadDecode("response has no result header".into()))?;
    let result_code = text_value(header.get("resultCode"))
        .ok_or_else(|| Error::PayloadDecode("result header has no code".into()))?;
    let result_msg = text_value(header.get("resultMsg")).unwrap_or_default();

    let mut body = ResponseBody::default();
    if let Some(raw_body) = response.get("body") {
        body.num_of_rows = count_value(raw_body.get("numOfRows"), "numOfRows")?;
        body.page_no = count_value(raw_body.get("pageNo"), "pageNo")?;
        body.total_count = count_value(raw_body.get("totalCount"), "totalCount")?;
        body.items = match raw_body.get("items") {
            // The service sends `"items": ""` for a page past the end.
            None | Some(Value::Null) | Some(Value::String(_)) => Vec::new(),
            Some(container) => match container.get("item") {
                None | Some(Value::Null) => Vec::new(),
                // A single record arrives as a bare object, not a
                // one-element array.
                Some(entry @ Value::Object(_)) => vec![json_record(entry)?.into_item()?],
                Some(Value::Array(entries)) => entries
                    .iter()
                    .map(|entry| json_record(entry).and_then(RawRecord::into_item))
                    .collect::<Result<Vec<_>, _>>()?,
                Some(_) => {
                    return Err(Error::PayloadDecode(
                        "`items.item` is neither an object nor an array".into(),
                    ))
                }
            },
        };
    }

    Ok(ResponseEnvelope {
        header: ResponseHeader {
            result_code,
            result_msg,
        },
        body,
    })
}

fn text_value(value: Option<&Value>) -> Option<String> {
    match value {
        Some(Value::String(text)) => Some(text.clone()),
        Some(Value::Number(number)) => Some(number.to_string()),
        _ => None,
    }
}

fn count_value(value: Option<&Value>, field: &'static str) -> Result<u32, Error> {
    match value {
        None | Some(Value::Null) => Ok(0),
        Some(Value::Number(number)) => number
            .as_u64()
            .and_then(|n| u32::try_from(n).ok())
            .ok_or_else(|| Error::MalformedField {
                field,
                reason: format!("`{number}` is not a row count"),
            }),
        Some(Value::String(text)) => parse_u32(field, text),
        Some(other) => Err(Error::MalformedField {
            field,
            reason: format!("unexpected value `{other}`"),
        }),
    }
}

fn json_record(entry: &Value) -> Result<RawRecord, Error> {
    let object = entry
        .as_object()
        .ok_or_else(|| Error::PayloadDecode("record is not an object".into()))?;
    let mut record = RawRecord::default();
    for (key, value) in object {
        if let Some(text) = text_value(Some(value)) {
            record.set(key, text);
        }
    }
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::LunarDate;
    use chrono::{NaiveDate, Weekday};

    const SINGLE_ITEM_XML: &str = "<response>\
        <header><resultCode>00</resultCode><resultMsg>NORMAL SERVICE.</resultMsg></header>\
        <body><items><item>\
        <lunDay>30</lunDay><lunIljin>기사(己巳)</lunIljin><lunLeapmonth>평</lunLeapmonth>\
        <lunMonth>10</lunMonth><lunNday>30</lunNday><lunSecha>경자(庚子)</lunSecha>\
        <lunWolgeon>정해(丁亥)</lunWolgeon><lunYear>2020</lunYear>\
        <solDay>14</solDay><solJd>2459198</solJd><solLeapyear>윤</solLeapyear>\
        <solMonth>12</solMonth><solWeek>월</solWeek><solYear>2020</solYear>\
        </item></items><numOfRows>10</numOfRows><pageNo>1</pageNo>\
        <totalCount>1</totalCount></body></response>";

    const FAILURE_XML: &str = "<response>\
        <header><resultCode>99</resultCode><resultMsg>SERVICE ERROR</resultMsg></header>\
        </response>";

    const EMPTY_PAGE_XML: &str = "<response>\
        <header><resultCode>00</resultCode><resultMsg>NORMAL SERVICE.</resultMsg></header>\
        <body><items></items><numOfRows>10</numOfRows><pageNo>4</pageNo>\
        <totalCount>31</totalCount></body></response>";

    const SINGLE_ITEM_JSON: &str = r#"{"response":{
        "header":{"resultCode":"00","resultMsg":"NORMAL SERVICE."},
        "body":{"items":{"item":{
            "lunDay":"30","lunIljin":"기사(己巳)","lunLeapmonth":"평",
            "lunMonth":"10","lunNday":"30","lunSecha":"경자(庚子)",
            "lunWolgeon":"정해(丁亥)","lunYear":"2020",
            "solDay":"14","solJd":2459198,"solLeapyear":"윤",
            "solMonth":"12","solWeek":"월","solYear":"2020"}},
        "numOfRows":10,"pageNo":1,"totalCount":1}}}"#;

    fn tampered(xml: &str, from: &str, to: &str) -> String {
        assert!(xml.contains(from), "fixture lost the `{from}` field");
        xml.replace(from, to)
    }

    #[test]
    fn test_decode_xml_single_item() {
        let envelope = ResponseEnvelope::decode(SINGLE_ITEM_XML, PayloadFormat::Xml).unwrap();

        assert!(envelope.is_successful());
        assert_eq!(envelope.header.result_msg, "NORMAL SERVICE.");
        assert_eq!(envelope.body.total_count, 1);
        assert_eq!(envelope.items().len(), 1);

        let item = &envelope.items()[0];
        assert_eq!(
            item.to_lunar_date().unwrap(),
            LunarDate::new(2020, 10, false, 30).unwrap()
        );
        assert_eq!(
            item.to_solar_date().unwrap(),
            NaiveDate::from_ymd_opt(2020, 12, 14).unwrap()
        );

        let solar = item.solar.unwrap();
        assert!(solar.leap_year);
        assert_eq!(solar.weekday, Weekday::Mon);
        assert_eq!(solar.julian_day, 2_459_198);
        assert!(solar.leap_year_consistent());
        assert!(solar.weekday_consistent());
        assert!(solar.julian_day_consistent());

        assert_eq!(item.lunar.unwrap().month_days, Some(30));
        assert_eq!(item.year_label.as_ref().unwrap().as_str(), "경자(庚子)");
        assert_eq!(item.day_label.as_ref().unwrap().korean(), "기사");
    }

    #[test]
    fn test_decode_json_single_item_object() {
        let envelope = ResponseEnvelope::decode(SINGLE_ITEM_JSON, PayloadFormat::Json).unwrap();

        assert_eq!(envelope.items().len(), 1);
        assert_eq!(envelope.body.num_of_rows, 10);
        assert_eq!(
            envelope.items()[0].to_solar_date().unwrap(),
            NaiveDate::from_ymd_opt(2020, 12, 14).unwrap()
        );
    }

    #[test]
    fn test_decode_json_item_array() {
        let array_json = r#"{"response":{
            "header":{"resultCode":"00","resultMsg":"NORMAL SERVICE."},
            "body":{"items":{"item":[
                {"lunDay":"14","lunLeapmonth":"평","lunMonth":"11","lunYear":"2020",
                 "solDay":"28","solJd":2459212,"solLeapyear":"윤","solMonth":"12",
                 "solWeek":"월","solYear":"2020"},
                {"lunDay":"15","lunLeapmonth":"평","lunMonth":"11","lunYear":"2020",
                 "solDay":"29","solJd":2459213,"solLeapyear":"윤","solMonth":"12",
                 "solWeek":"화","solYear":"2020"}
            ]},"numOfRows":10,"pageNo":1,"totalCount":2}}}"#;

        let envelope = ResponseEnvelope::decode(array_json, PayloadFormat::Json).unwrap();
        assert_eq!(envelope.items().len(), 2);
        assert_eq!(
            envelope.items()[1].to_solar_date().unwrap(),
            NaiveDate::from_ymd_opt(2020, 12, 29).unwrap()
        );
    }

    #[test]
    fn test_decode_json_empty_items_string() {
        let empty = r#"{"response":{
            "header":{"resultCode":"00","resultMsg":"NORMAL SERVICE."},
            "body":{"items":"","numOfRows":10,"pageNo":4,"totalCount":31}}}"#;
        let envelope = ResponseEnvelope::decode(empty, PayloadFormat::Json).unwrap();
        assert!(envelope.items().is_empty());
        assert_eq!(envelope.body.total_count, 31);
    }

    #[test]
    fn test_decode_xml_empty_page() {
        let envelope = ResponseEnvelope::decode(EMPTY_PAGE_XML, PayloadFormat::Xml).unwrap();
        assert!(envelope.is_successful());
        assert!(envelope.items().is_empty());
        assert_eq!(envelope.body.page_no, 4);
    }

    #[test]
    fn test_failure_code_becomes_service_result_error() {
        let envelope = ResponseEnvelope::decode(FAILURE_XML, PayloadFormat::Xml).unwrap();
        assert!(!envelope.is_successful());

        match envelope.require_successful() {
            Err(Error::ServiceResult { code, message }) => {
                assert_eq!(code, "99");
                assert_eq!(message, "SERVICE ERROR");
            }
            other => panic!("expected a service result error, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_lun_day_is_a_missing_field_error() {
        let xml = tampered(SINGLE_ITEM_XML, "<lunDay>30</lunDay>", "");
        match ResponseEnvelope::decode(&xml, PayloadFormat::Xml) {
            Err(Error::MissingField("lunDay")) => {}
            other => panic!("expected a missing `lunDay` error, got {other:?}"),
        }
    }

    #[test]
    fn test_non_numeric_field_is_malformed() {
        let xml = tampered(SINGLE_ITEM_XML, "<lunYear>2020</lunYear>", "<lunYear>20x0</lunYear>");
        assert!(matches!(
            ResponseEnvelope::decode(&xml, PayloadFormat::Xml),
            Err(Error::MalformedField { field: "lunYear", .. })
        ));
    }

    #[test]
    fn test_weekday_disagreement_is_malformed() {
        // 2020-12-14 was a Monday.
        let xml = tampered(SINGLE_ITEM_XML, "<solWeek>월</solWeek>", "<solWeek>화</solWeek>");
        assert!(matches!(
            ResponseEnvelope::decode(&xml, PayloadFormat::Xml),
            Err(Error::MalformedField { field: "solWeek", .. })
        ));
    }

    #[test]
    fn test_leap_year_flag_disagreement_is_malformed() {
        let xml = tampered(
            SINGLE_ITEM_XML,
            "<solLeapyear>윤</solLeapyear>",
            "<solLeapyear>평</solLeapyear>",
        );
        assert!(matches!(
            ResponseEnvelope::decode(&xml, PayloadFormat::Xml),
            Err(Error::MalformedField { field: "solLeapyear", .. })
        ));
    }

    #[test]
    fn test_julian_day_disagreement_is_malformed() {
        let xml = tampered(SINGLE_ITEM_XML, "<solJd>2459198</solJd>", "<solJd>2459197</solJd>");
        assert!(matches!(
            ResponseEnvelope::decode(&xml, PayloadFormat::Xml),
            Err(Error::MalformedField { field: "solJd", .. })
        ));
    }

    #[test]
    fn test_lun_day_beyond_month_length_is_malformed() {
        let xml = tampered(SINGLE_ITEM_XML, "<lunNday>30</lunNday>", "<lunNday>29</lunNday>");
        assert!(matches!(
            ResponseEnvelope::decode(&xml, PayloadFormat::Xml),
            Err(Error::MalformedField { field: "lunDay", .. })
        ));
    }

    #[test]
    fn test_blank_month_pillar_decodes_to_none() {
        // Leap months come with an empty `lunWolgeon`.
        let xml = tampered(
            SINGLE_ITEM_XML,
            "<lunWolgeon>정해(丁亥)</lunWolgeon>",
            "<lunWolgeon> </lunWolgeon>",
        );
        let envelope = ResponseEnvelope::decode(&xml, PayloadFormat::Xml).unwrap();
        assert!(envelope.items()[0].month_label.is_none());
    }

    #[test]
    fn test_headerless_payload_is_a_decode_error() {
        assert!(matches!(
            ResponseEnvelope::decode("<root><foo>1</foo></root>", PayloadFormat::Xml),
            Err(Error::PayloadDecode(_))
        ));
        assert!(matches!(
            ResponseEnvelope::decode("{\"foo\": 1}", PayloadFormat::Json),
            Err(Error::PayloadDecode(_))
        ));
        assert!(matches!(
            ResponseEnvelope::decode("not a payload at all", PayloadFormat::Json),
            Err(Error::PayloadDecode(_))
        ));
    }

    #[test]
    fn test_payload_format_from_str() {
        assert_eq!("xml".parse::<PayloadFormat>().unwrap(), PayloadFormat::Xml);
        assert_eq!("JSON".parse::<PayloadFormat>().unwrap(), PayloadFormat::Json);
        assert!("yaml".parse::<PayloadFormat>().is_err());
    }
}
