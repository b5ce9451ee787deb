use crate::prelude::{println, *};
use chrono::NaiveDate;
use colored::Colorize;
use lunisol_core::item::{weekday_glyph, CalendarItem, LunarDate};

/// Options for a solar → lunar lookup
#[derive(Debug, clap::Args, Clone)]
#[command(after_help = "EXAMPLES:
  # Lunar rendition of a solar date:
  lunisol cal to-lunar 2020-12-14

  # Same lookup as JSON:
  lunisol cal to-lunar 2020-12-14 --json

NOTES:
  - KASI_SERVICE_KEY must hold a data.go.kr service key
  - The service covers solar years 1391 through 2050")]
pub struct ToLunarOptions {
    /// Solar date to look up (YYYY-MM-DD)
    #[arg(value_name = "DATE")]
    pub date: NaiveDate,

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

/// Options for a lunar → solar lookup
#[derive(Debug, clap::Args, Clone)]
#[command(after_help = "EXAMPLES:
  # Solar rendition of a lunar date:
  lunisol cal to-solar 2020 10 30

  # The same day in the leap tenth month, if the year has one:
  lunisol cal to-solar 2020 10 30 --leap")]
pub struct ToSolarOptions {
    /// Lunar year
    pub year: i32,

    /// Lunar month (1-12)
    pub month: u32,

    /// Lunar day of month (1-30)
    pub day: u32,

    /// Look up the leap instance of the month
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

/// Handle the to-lunar command
pub async fn run_to_lunar(options: ToLunarOptions, global: crate::Global) -> Result<()> {
    let config = super::KasiConfig::from_env()?
        .with_overrides(options.base_url.clone(), options.service_key.clone());
    let client = super::create_client(config)?;

    if global.verbose {
        println!("Looking up the lunar date of {}...", options.date);
    }

    let item = client.lunar_from_solar(options.date).await?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&item)?);
    } else {
        print_item(&item);
    }

    Ok(())
}

/// Handle the to-solar command
pub async fn run_to_solar(options: ToSolarOptions, global: crate::Global) -> Result<()> {
    let date = LunarDate::new(options.year, options.month, options.leap, options.day)?;
    let config = super::KasiConfig::from_env()?
        .with_overrides(options.base_url.clone(), options.service_key.clone());
    let client = super::create_client(config)?;

    if global.verbose {
        println!("Looking up the solar date of lunar {date}...");
    }

    let item = client.solar_from_lunar(date).await?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&item)?);
    } else {
        print_item(&item);
    }

    Ok(())
}

/// Render one record as a two-column field table
pub fn print_item(item: &CalendarItem) {
    let mut table = crate::prelude::new_table();

    if let Some(solar) = &item.solar {
        table.add_row(prettytable::row![
            "Solar".green().bold(),
            format!(
                "{:04}-{:02}-{:02} ({})",
                solar.year,
                solar.month,
                solar.day,
                weekday_glyph(solar.weekday)
            )
        ]);
        table.add_row(prettytable::row![
            "Leap year".green(),
            if solar.leap_year { "yes" } else { "no" }
        ]);
        table.add_row(prettytable::row!["Julian day".green(), solar.julian_day]);
    }

    if let Some(lunar) = &item.lunar {
        let marker = if lunar.leap_month { " (leap month)" } else { "" };
        table.add_row(prettytable::row![
            "Lunar".cyan().bold(),
            format!(
                "{:04}-{:02}-{:02}{marker}",
                lunar.year, lunar.month, lunar.day
            )
        ]);
        if let Some(days) = lunar.month_days {
            table.add_row(prettytable::row![
                "Month length".cyan(),
                format!("{days} days")
            ]);
        }
    }

    if let Some(label) = &item.year_label {
        table.add_row(prettytable::row!["Year pillar", label.as_str()]);
    }
    if let Some(label) = &item.month_label {
        table.add_row(prettytable::row!["Month pillar", label.as_str()]);
    }
    if let Some(label) = &item.day_label {
        table.add_row(prettytable::row!["Day pillar", label.as_str()]);
    }

    table.printstd();
}
