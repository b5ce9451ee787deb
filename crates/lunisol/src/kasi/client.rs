//! The conversion-service client: the transport seam, single-date
//! lookups, and the sequential / bounded-parallel page drivers.

use std::future::Future;

use chrono::NaiveDate;
use futures::stream::{self, StreamExt, TryStreamExt};
use lunisol_core::envelope::{ResponseBody, ResponseEnvelope};
use lunisol_core::item::{CalendarItem, LunarDate};
use lunisol_core::request::{pages_for_total, Request};

use super::KasiConfig;
use crate::error::{Error, TransportError};

/// Fetch capability supplied to the client.
///
/// Implementations own retry, timeout and backoff policy; the client
/// itself never retries a request.
pub trait Transport {
    fn fetch(&self, url: &str) -> impl Future<Output = Result<String, TransportError>> + Send;
}

/// [`Transport`] over a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self, TransportError> {
        let client = reqwest::Client::builder().build()?;
        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    async fn fetch(&self, url: &str) -> Result<String, TransportError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(TransportError(format!("HTTP {status}")));
        }
        Ok(response.text().await?)
    }
}

/// Client for the lunar-solar conversion service.
pub struct KasiClient<T> {
    config: KasiConfig,
    transport: T,
}

impl<T: Transport> KasiClient<T> {
    pub fn new(config: KasiConfig, transport: T) -> Self {
        Self { config, transport }
    }

    async fn fetch_body(&self, request: &Request) -> Result<ResponseBody, Error> {
        let url = request.to_url(
            &self.config.base_url,
            &self.config.service_key,
            self.config.format,
        );
        log::debug!("{} {:?}", request.operation().path(), request.params());
        let raw = self.transport.fetch(&url).await?;
        let envelope = ResponseEnvelope::decode(&raw, self.config.format)?;
        Ok(envelope.require_successful()?)
    }

    /// Lunar rendition of one solar day.
    ///
    /// Exactly one record is expected; zero is an error here, unlike
    /// the page drivers where an empty page just ends the iteration.
    pub async fn lunar_from_solar(&self, date: NaiveDate) -> Result<CalendarItem, Error> {
        let request = Request::lunar_from_solar(date).page(1, self.config.page_size);
        let body = self.fetch_body(&request).await?;
        expect_single(body.items)
    }

    /// Solar rendition of one lunar day.
    ///
    /// The endpoint carries no leap-month parameter, so the response
    /// may hold both the ordinary and the leap instance of the month;
    /// the requested flag is applied here before the exactly-one rule.
    pub async fn solar_from_lunar(&self, date: LunarDate) -> Result<CalendarItem, Error> {
        let request = Request::solar_from_lunar(date).page(1, self.config.page_size);
        let body = self.fetch_body(&request).await?;
        let matching: Vec<CalendarItem> = body
            .items
            .into_iter()
            .filter(|item| {
                item.lunar
                    .as_ref()
                    .is_some_and(|lunar| lunar.leap_month == date.leap)
            })
            .collect();
        expect_single(matching)
    }

    /// Every day of a solar month, forwarded to `sink` page by page.
    /// Returns the number of records observed.
    pub async fn lunar_for_month(
        &self,
        year: i32,
        month: u32,
        mut sink: impl FnMut(CalendarItem),
    ) -> Result<usize, Error> {
        self.drain_pages(Request::lunar_from_solar_month(year, month), |item| {
            sink(item);
            Ok(())
        })
        .await
    }

    /// Every day of a lunar month, forwarded to `sink` page by page.
    pub async fn solar_for_lunar_month(
        &self,
        year: i32,
        month: u32,
        mut sink: impl FnMut(CalendarItem),
    ) -> Result<usize, Error> {
        self.drain_pages(Request::solar_from_lunar_month(year, month), |item| {
            sink(item);
            Ok(())
        })
        .await
    }

    /// Occurrences of a recurring lunar date across a span of solar
    /// years.
    ///
    /// The service is trusted but verified: every record is checked
    /// against the requested lunar month/day/leap combination before
    /// it reaches `sink`.
    pub async fn specified_lunar(
        &self,
        from_year: i32,
        to_year: i32,
        month: u32,
        day: u32,
        leap: bool,
        mut sink: impl FnMut(CalendarItem),
    ) -> Result<usize, Error> {
        let request = Request::specified_lunar(from_year, to_year, month, day, leap);
        self.drain_pages(request, |item| {
            let matches = item.lunar.as_ref().is_some_and(|lunar| {
                lunar.month == month && lunar.day == day && lunar.leap_month == leap
            });
            if !matches {
                let got = item
                    .to_lunar_date()
                    .map(|date| date.to_string())
                    .unwrap_or_else(|_| "unknown".to_string());
                return Err(lunisol_core::Error::MalformedField {
                    field: "lunMonth",
                    reason: format!("record {got} does not match the requested recurring date"),
                }
                .into());
            }
            sink(item);
            Ok(())
        })
        .await
    }

    /// Bounded-parallel variant of a month listing.
    pub async fn lunar_for_month_parallel(
        &self,
        year: i32,
        month: u32,
        concurrency: usize,
    ) -> Result<Vec<CalendarItem>, Error> {
        self.fetch_all_parallel(&Request::lunar_from_solar_month(year, month), concurrency)
            .await
    }

    /// Bounded-parallel variant of a lunar month listing.
    pub async fn solar_for_lunar_month_parallel(
        &self,
        year: i32,
        month: u32,
        concurrency: usize,
    ) -> Result<Vec<CalendarItem>, Error> {
        self.fetch_all_parallel(&Request::solar_from_lunar_month(year, month), concurrency)
            .await
    }

    /// Sequential page loop: pages are numbered from 1 and fetched one
    /// at a time; the first empty page ends the iteration.
    async fn drain_pages<F>(&self, request: Request, mut forward: F) -> Result<usize, Error>
    where
        F: FnMut(CalendarItem) -> Result<(), Error>,
    {
        let mut total = 0usize;
        let mut page_no = 1u32;
        loop {
            let paged = request.clone().page(page_no, self.config.page_size);
            let body = self.fetch_body(&paged).await?;
            if body.items.is_empty() {
                break;
            }
            for item in body.items {
                forward(item)?;
                total += 1;
            }
            page_no += 1;
        }
        Ok(total)
    }

    /// Fetches every page of `request` with at most `concurrency`
    /// requests in flight.
    ///
    /// Page 1 is fetched alone to learn the total count, which fixes
    /// the page range to issue. Pages complete in no particular order
    /// (item order within a page is kept); the first failure drops the
    /// stream, which cancels the in-flight sibling fetches.
    pub async fn fetch_all_parallel(
        &self,
        request: &Request,
        concurrency: usize,
    ) -> Result<Vec<CalendarItem>, Error> {
        let first = self
            .fetch_body(&request.clone().page(1, self.config.page_size))
            .await?;
        let total_pages = pages_for_total(first.total_count, self.config.page_size);
        let mut items = first.items;

        let pages: Vec<Vec<CalendarItem>> = stream::iter(2..=total_pages)
            .map(|page_no| {
                let paged = request.clone().page(page_no, self.config.page_size);
                async move { self.fetch_body(&paged).await.map(|body| body.items) }
            })
            .buffer_unordered(concurrency.max(1))
            .try_collect()
            .await?;
        for page in pages {
            items.extend(page);
        }
        Ok(items)
    }
}

fn expect_single(mut items: Vec<CalendarItem>) -> Result<CalendarItem, Error> {
    if items.len() == 1 {
        Ok(items.remove(0))
    } else {
        Err(Error::UnexpectedCount(items.len()))
    }
}
