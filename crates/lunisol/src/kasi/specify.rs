use crate::prelude::{println, *};
use lunisol_core::item::{weekday_glyph, CalendarItem, LunarDate};

/// Options for scanning a recurring lunar date
#[derive(Debug, clap::Args, Clone)]
#[command(after_help = "EXAMPLES:
  # Every solar date of lunar 8-15 (Chuseok) from 2015 through 2025:
  lunisol cal specify 2015 2025 8 15

  # Only the leap-month instances of lunar 4-1:
  lunisol cal specify 2015 2025 4 1 --leap

NOTES:
  - Records are checked against the requested lunar date; a record the
    service returns outside it is reported as malformed")]
pub struct SpecifyOptions {
    /// First solar year of the range
    pub from_year: i32,

    /// Last solar year of the range
    pub to_year: i32,

    /// Lunar month (1-12)
    pub month: u32,

    /// Lunar day of month (1-30)
    pub day: u32,

    /// Match the leap instance of the month
    #[arg(long)]
    pub leap: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Override the service base URL
    #[arg(long)]
    pub base_url: Option<String>,

    /// Override the service key
    #[arg(long)]
    pub service_key: Option<String>,
}

/// Handle the specify command
pub async fn run(options: SpecifyOptions, global: crate::Global) -> Result<()> {
    if options.from_year > options.to_year {
        return Err(eyre!("FROM_YEAR must not be after TO_YEAR"));
    }
    // Range-checks the month and day before anything goes on the wire.
    LunarDate::new(options.from_year, options.month, options.leap, options.day)?;

    let config = super::KasiConfig::from_env()?
        .with_overrides(options.base_url.clone(), options.service_key.clone());
    let client = super::create_client(config)?;

    if global.verbose {
        println!(
            "Scanning solar years {}-{} for lunar {:02}-{:02}...",
            options.from_year, options.to_year, options.month, options.day
        );
    }

    let mut items: Vec<CalendarItem> = Vec::new();
    let count = client
        .specified_lunar(
            options.from_year,
            options.to_year,
            options.month,
            options.day,
            options.leap,
            |item| items.push(item),
        )
        .await?;

    items.sort_by(|a, b| a.cmp_solar(b));

    if options.json {
        println!("{}", serde_json::to_string_pretty(&items)?);
        return Ok(());
    }

    let mut table = crate::prelude::new_table();
    table.add_row(prettytable::row!["Solar", "Week", "Lunar year", "Year pillar"]);
    for item in &items {
        let solar = item
            .solar
            .map(|solar| format!("{:04}-{:02}-{:02}", solar.year, solar.month, solar.day))
            .unwrap_or_default();
        let week = item
            .solar
            .map(|solar| weekday_glyph(solar.weekday))
            .unwrap_or_default();
        let lunar_year = item
            .lunar
            .map(|lunar| format!("{:04}", lunar.year))
            .unwrap_or_default();
        let pillar = item
            .year_label
            .as_ref()
            .map(|label| label.as_str())
            .unwrap_or_default();
        table.add_row(prettytable::row![solar, week, lunar_year, pillar]);
    }
    table.printstd();

    println!("\n{count} occurrence(s)");

    Ok(())
}
