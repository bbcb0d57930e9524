//! Thin asynchronous client for the Banco Central do Brasil SGS open-data API.
//!
//! - Fetches the SELIC target series and converts it into a domain rate.
//! - Maintains a 60-minute in-memory cache with stale fallbacks, backed by an
//!   on-disk copy of the last observation for offline starts.

use std::{
    sync::Arc,
    time::{Duration, SystemTime},
};

use reqwest::{Client, Url};
use serde::Deserialize;
use thiserror::Error;
use time::format_description::FormatItem;
use time::Date;
use tokio::sync::Mutex;

use crate::domain::SelicRate;
use crate::infra::cache::{load_selic_cache, save_selic_cache, SelicCache};

const DEFAULT_BASE_URL: &str = "https://api.bcb.gov.br/dados/serie/";
/// SGS series 432: SELIC target, percent per year.
const SELIC_SERIES: u32 = 432;
const DEFAULT_TTL: Duration = Duration::from_secs(60 * 60);
const USER_AGENT: &str = "preco-de-venda/0.3.0";

#[derive(Debug, Error)]
pub enum BcbClientError {
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("http request error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("series returned no observations")]
    EmptySeries,
    #[error("unreadable observation value: {0}")]
    InvalidValue(String),
    #[error("unreadable observation date: {0}")]
    InvalidDate(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CacheStatus {
    Fresh,
    Cached,
    Stale,
}

#[derive(Clone, Debug)]
pub struct CachedPayload<T> {
    pub data: T,
    pub fetched_at: SystemTime,
    pub status: CacheStatus,
}

impl<T> CachedPayload<T> {
    fn new(data: T, fetched_at: SystemTime, status: CacheStatus) -> Self {
        Self {
            data,
            fetched_at,
            status,
        }
    }
}

/// One row of an SGS `/dados` response. Values come over the wire as strings.
#[derive(Debug, Deserialize)]
struct SgsObservationDto {
    data: String,
    valor: String,
}

#[derive(Clone)]
pub struct BcbClient {
    http: Client,
    base_url: Url,
    cache: Arc<Mutex<Option<CachedPayload<SelicRate>>>>,
    ttl: Duration,
}

impl BcbClient {
    pub fn new() -> Result<Self, BcbClientError> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    pub fn with_base_url(base: &str) -> Result<Self, BcbClientError> {
        let base_url = Url::parse(base)?;
        let http = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self {
            http,
            base_url,
            cache: Arc::new(Mutex::new(None)),
            ttl: DEFAULT_TTL,
        })
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Latest SELIC target. Resolution order: fresh in-memory cache, the API,
    /// stale in-memory data, the on-disk copy of the last observation.
    pub async fn get_selic(&self) -> Result<CachedPayload<SelicRate>, BcbClientError> {
        if let Some(payload) = self.cached_selic(false).await {
            return Ok(payload);
        }

        let url = self.latest_observation_url(SELIC_SERIES)?;
        println!("[selic] Requesting {url}");

        match self.fetch_latest(url).await {
            Ok(rate) => {
                let fetched_at = SystemTime::now();
                println!(
                    "[selic] Fetched {}% a.a. (reference date {})",
                    rate.annual_pct(),
                    rate.reference_date
                );

                if let Err(e) = save_selic_cache(&SelicCache::new(
                    rate.annual_pct(),
                    format_reference_date(rate.reference_date),
                )) {
                    println!("[selic] Warning: failed to save disk cache: {e}");
                }

                let payload = CachedPayload::new(rate, fetched_at, CacheStatus::Fresh);
                *self.cache.lock().await = Some(payload.clone());
                Ok(payload)
            }
            Err(error) => {
                println!("[selic] Request failed: {error}; falling back to caches.");
                if let Some(stale) = self.cached_selic(true).await {
                    return Ok(stale);
                }
                if let Some(disk) = disk_fallback() {
                    *self.cache.lock().await = Some(disk.clone());
                    return Ok(disk);
                }
                Err(error)
            }
        }
    }

    pub async fn clear_cache(&self) {
        *self.cache.lock().await = None;
    }

    async fn cached_selic(&self, allow_stale: bool) -> Option<CachedPayload<SelicRate>> {
        let cache = self.cache.lock().await;
        let payload = cache.as_ref()?;
        let age = payload.fetched_at.elapsed().unwrap_or(Duration::MAX);
        if age <= self.ttl {
            Some(CachedPayload::new(
                payload.data,
                payload.fetched_at,
                CacheStatus::Cached,
            ))
        } else if allow_stale {
            Some(CachedPayload::new(
                payload.data,
                payload.fetched_at,
                CacheStatus::Stale,
            ))
        } else {
            None
        }
    }

    async fn fetch_latest(&self, url: Url) -> Result<SelicRate, BcbClientError> {
        let observations: Vec<SgsObservationDto> = self
            .http
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let latest = observations.into_iter().last().ok_or(BcbClientError::EmptySeries)?;
        observation_to_rate(latest, SystemTime::now())
    }

    fn latest_observation_url(&self, series: u32) -> Result<Url, BcbClientError> {
        let mut url = self
            .base_url
            .join(&format!("bcdata.sgs.{series}/dados/ultimos/1"))?;
        url.query_pairs_mut().append_pair("formato", "json");
        Ok(url)
    }
}

/// `dd/MM/yyyy`, the fixed format of SGS observation dates.
fn observation_date_format() -> &'static [FormatItem<'static>] {
    use std::sync::OnceLock;
    static FORMAT: OnceLock<Vec<FormatItem<'static>>> = OnceLock::new();
    FORMAT.get_or_init(|| {
        time::format_description::parse("[day]/[month]/[year]")
            .expect("observation date format is well formed")
    })
}

fn parse_observation_date(raw: &str) -> Result<Date, BcbClientError> {
    Date::parse(raw.trim(), observation_date_format())
        .map_err(|_| BcbClientError::InvalidDate(raw.to_string()))
}

fn format_reference_date(date: Date) -> String {
    date.format(observation_date_format())
        .unwrap_or_else(|_| date.to_string())
}

/// SGS publishes numbers as strings; older series use a decimal comma.
fn parse_observation_value(raw: &str) -> Result<f64, BcbClientError> {
    raw.trim()
        .replace(',', ".")
        .parse::<f64>()
        .map_err(|_| BcbClientError::InvalidValue(raw.to_string()))
}

fn observation_to_rate(
    dto: SgsObservationDto,
    fetched_at: SystemTime,
) -> Result<SelicRate, BcbClientError> {
    Ok(SelicRate {
        annual_rate: parse_observation_value(&dto.valor)? / 100.0,
        reference_date: parse_observation_date(&dto.data)?,
        fetched_at,
    })
}

/// Rebuild a payload from the on-disk copy written by the last good fetch.
fn disk_fallback() -> Option<CachedPayload<SelicRate>> {
    let cache = load_selic_cache()?;
    let status = if cache.is_expired() {
        CacheStatus::Stale
    } else {
        CacheStatus::Cached
    };
    let reference_date = match parse_observation_date(&cache.reference_date) {
        Ok(date) => date,
        Err(e) => {
            println!("[selic] Discarding disk cache: {e}");
            return None;
        }
    };
    Some(CachedPayload::new(
        SelicRate {
            annual_rate: cache.annual_rate_pct / 100.0,
            reference_date,
            fetched_at: SystemTime::now() - cache.age(),
        },
        SystemTime::now() - cache.age(),
        status,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_the_sgs_payload_shape() {
        let json = r#"[{"data": "06/08/2026", "valor": "15.00"}]"#;
        let observations: Vec<SgsObservationDto> = serde_json::from_str(json).unwrap();
        let rate = observation_to_rate(
            observations.into_iter().next().unwrap(),
            SystemTime::UNIX_EPOCH,
        )
        .unwrap();
        assert!((rate.annual_rate - 0.15).abs() < 1e-12);
        assert_eq!(rate.reference_date.to_string(), "2026-08-06");
    }

    #[test]
    fn accepts_a_decimal_comma() {
        assert_eq!(parse_observation_value("13,75").unwrap(), 13.75);
        assert_eq!(parse_observation_value(" 10.50 ").unwrap(), 10.5);
    }

    #[test]
    fn rejects_garbage_values() {
        assert!(matches!(
            parse_observation_value("n/d"),
            Err(BcbClientError::InvalidValue(_))
        ));
        assert!(matches!(
            parse_observation_date("2026-08-06"),
            Err(BcbClientError::InvalidDate(_))
        ));
    }

    #[test]
    fn reference_dates_round_trip_through_the_wire_format() {
        let date = parse_observation_date("06/08/2026").unwrap();
        assert_eq!(format_reference_date(date), "06/08/2026");
    }

    #[test]
    fn observation_urls_target_the_series() {
        let client = BcbClient::with_base_url("https://api.bcb.gov.br/dados/serie/").unwrap();
        let url = client.latest_observation_url(432).unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.bcb.gov.br/dados/serie/bcdata.sgs.432/dados/ultimos/1?formato=json"
        );
    }
}
