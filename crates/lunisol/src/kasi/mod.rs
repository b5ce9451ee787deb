use crate::prelude::{println, *};
use lunisol_core::envelope::PayloadFormat;

pub mod client;
pub mod convert;
pub mod month;
pub mod specify;

pub use client::{HttpTransport, KasiClient, Transport};

/// Calendar module app - root command
#[derive(Debug, clap::Parser)]
#[command(name = "cal")]
#[command(about = "Lunar-solar calendar conversion (KASI open API)")]
pub struct App {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// Look up the lunar rendition of a solar date
    #[clap(name = "to-lunar")]
    ToLunar(convert::ToLunarOptions),

    /// Look up the solar rendition of a lunar date
    #[clap(name = "to-solar")]
    ToSolar(convert::ToSolarOptions),

    /// List a whole month in both calendars
    #[clap(name = "month")]
    Month(month::MonthOptions),

    /// Scan a range of solar years for a recurring lunar date
    #[clap(name = "specify")]
    Specify(specify::SpecifyOptions),
}

/// Conversion service configuration from environment variables
#[derive(Debug, Clone)]
pub struct KasiConfig {
    pub base_url: String,
    pub service_key: String,
    pub page_size: u32,
    pub format: PayloadFormat,
}

impl KasiConfig {
    /// Default base URL of the public service
    pub const DEFAULT_BASE_URL: &'static str = lunisol_core::request::DEFAULT_BASE_URL;

    /// Default page size (`numOfRows`) of the public service
    pub const DEFAULT_PAGE_SIZE: u32 = 10;

    /// Load configuration from environment variables
    /// Uses KASI_SERVICE_KEY (required, must be non-blank)
    /// Uses KASI_BASE_URL, KASI_PAGE_SIZE and KASI_FORMAT with default fallbacks
    pub fn from_env() -> Result<Self> {
        let service_key = std::env::var("KASI_SERVICE_KEY")
            .map_err(|_| eyre!("KASI_SERVICE_KEY environment variable not set"))?;
        if service_key.trim().is_empty() {
            return Err(eyre!("KASI_SERVICE_KEY must not be blank"));
        }

        let page_size = match std::env::var("KASI_PAGE_SIZE") {
            Ok(value) => {
                let parsed: u32 = value
                    .parse()
                    .map_err(|_| eyre!("KASI_PAGE_SIZE must be a positive number"))?;
                if parsed == 0 {
                    return Err(eyre!("KASI_PAGE_SIZE must be a positive number"));
                }
                parsed
            }
            Err(_) => Self::DEFAULT_PAGE_SIZE,
        };

        let format = match std::env::var("KASI_FORMAT") {
            Ok(value) => value.parse::<PayloadFormat>().map_err(|err| eyre!(err))?,
            Err(_) => PayloadFormat::Xml,
        };

        Ok(Self {
            base_url: std::env::var("KASI_BASE_URL")
                .unwrap_or_else(|_| Self::DEFAULT_BASE_URL.to_string()),
            service_key,
            page_size,
            format,
        })
    }

    /// Apply CLI overrides to the configuration
    pub fn with_overrides(mut self, base_url: Option<String>, service_key: Option<String>) -> Self {
        if let Some(url) = base_url {
            self.base_url = url;
        }
        if let Some(key) = service_key {
            self.service_key = key;
        }
        self
    }
}

/// Build a client over the shared HTTP transport
pub fn create_client(config: KasiConfig) -> Result<KasiClient<HttpTransport>> {
    Ok(KasiClient::new(config, HttpTransport::new()?))
}

/// Module entry point
pub async fn run(app: App, global: crate::Global) -> Result<()> {
    if global.verbose {
        println!("Running calendar module...");
    }

    match app.command {
        Commands::ToLunar(options) => convert::run_to_lunar(options, global).await,
        Commands::ToSolar(options) => convert::run_to_solar(options, global).await,
        Commands::Month(options) => month::run(options, global).await,
        Commands::Specify(options) => specify::run(options, global).await,
    }
}
