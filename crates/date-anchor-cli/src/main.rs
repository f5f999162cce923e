//! Command-line front end for the date-anchor engine.

use std::io::Read as _;

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};

use date_anchor::{
    encode_event, end_instant, format_event_list, format_instant, parse_events, resolve,
    EngineConfig, EventDraft, FormatOptions, RelativeDateInput, TracingSink, Weekday,
};

#[derive(Parser)]
#[command(
    name = "date-anchor",
    version,
    about = "Deterministic relative-date resolution for calendar agents"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Resolve a relative date against the current time.
    Resolve {
        /// Whole weeks from the current week (any sign).
        #[arg(long, allow_hyphen_values = true, default_value_t = 0)]
        week_offset: i32,
        /// Day inside the selected week (e.g. "monday").
        #[arg(long)]
        weekday: String,
        /// Time of day, 24-hour HH:mm.
        #[arg(long)]
        time: String,
        /// IANA timezone; defaults to the configured zone.
        #[arg(long)]
        timezone: Option<String>,
        /// Event length in minutes.
        #[arg(long)]
        duration_minutes: Option<u32>,
        /// Emit machine-readable JSON instead of text.
        #[arg(long)]
        json: bool,
    },
    /// Decode VEVENTs from iCalendar text on stdin and print a listing.
    Decode {
        /// Fallback IANA timezone for floating date-times.
        #[arg(long)]
        timezone: Option<String>,
    },
    /// Encode a single event as an iCalendar block on stdout.
    Encode {
        #[arg(long)]
        title: String,
        /// Event start, RFC 3339.
        #[arg(long)]
        start: String,
        /// Event end, RFC 3339; defaults to start plus the duration.
        #[arg(long)]
        end: Option<String>,
        #[arg(long)]
        duration_minutes: Option<u32>,
        #[arg(long)]
        location: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = EngineConfig::default();

    match cli.command {
        Command::Resolve {
            week_offset,
            weekday,
            time,
            timezone,
            duration_minutes,
            json,
        } => {
            let input = RelativeDateInput {
                week_offset,
                weekday: weekday.parse::<Weekday>()?,
                time,
                duration_minutes,
                timezone,
            };
            let resolution = resolve(&input, &config)?;
            if json {
                let payload = serde_json::json!({
                    "start": resolution.start.to_rfc3339(),
                    "end": resolution.end.to_rfc3339(),
                    "timezone": resolution.timezone.name(),
                });
                println!("{payload}");
            } else {
                let zone = resolution.timezone.name();
                let locale = config.locale()?;
                let options = FormatOptions {
                    include_weekday: true,
                    include_time: true,
                };
                println!(
                    "start: {} ({})",
                    format_instant(resolution.start, zone, locale, &options)?,
                    resolution.start.to_rfc3339()
                );
                println!(
                    "end:   {} ({})",
                    format_instant(resolution.end, zone, locale, &options)?,
                    resolution.end.to_rfc3339()
                );
            }
        }
        Command::Decode { timezone } => {
            let zone = timezone.unwrap_or_else(|| config.default_timezone.clone());
            let fallback: chrono_tz::Tz = zone
                .parse()
                .map_err(|_| anyhow!("invalid timezone '{zone}'"))?;
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("reading stdin")?;
            let events = parse_events(&text, fallback, &TracingSink);
            let listing = format_event_list(&events, &zone, config.locale()?)?;
            if !listing.is_empty() {
                println!("{listing}");
            }
        }
        Command::Encode {
            title,
            start,
            end,
            duration_minutes,
            location,
            description,
        } => {
            let start_instant = DateTime::parse_from_rfc3339(&start)
                .with_context(|| format!("invalid start '{start}'"))?
                .with_timezone(&Utc);
            let end_instant_value = match end {
                Some(raw) => DateTime::parse_from_rfc3339(&raw)
                    .with_context(|| format!("invalid end '{raw}'"))?
                    .with_timezone(&Utc),
                None => end_instant(
                    start_instant,
                    duration_minutes.unwrap_or(config.default_duration_minutes),
                ),
            };
            let draft = EventDraft {
                title,
                start: start_instant,
                end: end_instant_value,
                description,
                location,
                uid: None,
            };
            print!("{}", encode_event(&draft, &config));
        }
    }
    Ok(())
}
