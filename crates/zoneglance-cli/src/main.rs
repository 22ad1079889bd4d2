use anyhow::Context;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use clap::{Parser, Subcommand};

use zoneglance::{
    convert, diff_label, normalize_timezone, parse_date_text, parse_rfc3339, resolve_target_zone,
    system_timezone,
};

/// Parse date/time expressions from text and convert them between timezones
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// BCP 47 language tag steering the date grammar (e.g. en-GB, de)
    #[arg(long, global = true)]
    lang: Option<String>,

    /// Reference moment for relative expressions, RFC 3339 (defaults to now)
    #[arg(long, global = true)]
    reference: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Parse text and print the recognized expression as JSON
    Parse {
        /// The text to parse
        text: String,
    },

    /// Parse text and print it converted to a target timezone
    Convert {
        /// The text to parse
        text: String,

        /// Target timezone: an IANA name, a common abbreviation, or "auto"
        /// for the system timezone
        #[arg(long, default_value = "auto")]
        to: String,

        /// Print 24-hour times instead of 12-hour
        #[arg(long = "24h")]
        format24h: bool,
    },

    /// Normalize a timezone name, or print the system timezone
    Zone {
        /// The name to normalize; omit for the system timezone
        name: Option<String>,
    },
}

/// The language tag steering the grammar: `--lang` if given, else the `LANG`
/// environment variable (`en_GB.UTF-8` → `en-GB`), else the library default.
fn language_tag(arg: Option<&str>) -> Option<String> {
    if let Some(lang) = arg {
        return Some(lang.to_string());
    }
    let env = std::env::var("LANG").ok()?;
    let tag = env.split('.').next()?.replace('_', "-");
    if tag.is_empty() || tag == "C" || tag == "POSIX" {
        return None;
    }
    Some(tag)
}

/// The "now" anchor: the requested reference instant (or the actual now),
/// expressed in the system timezone so wall-clock-only parses resolve locally.
fn reference_moment(reference: Option<&str>) -> anyhow::Result<DateTime<Tz>> {
    let instant: DateTime<Utc> = match reference {
        Some(s) => parse_rfc3339(s).context("invalid --reference")?,
        None => Utc::now(),
    };
    let zone: Tz = system_timezone().parse().unwrap_or(chrono_tz::UTC);
    Ok(instant.with_timezone(&zone))
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = Args::parse();
    log::debug!("Parsed command line arguments: {args:#?}");

    let reference = reference_moment(args.reference.as_deref())?;
    let lang = language_tag(args.lang.as_deref());
    let lang = lang.as_deref();

    match args.command {
        Command::Parse { text } => {
            let result = parse_date_text(&text, reference, lang)
                .context("no date or time expression recognized")?;
            log::debug!("Parsed: {result:#?}");
            println!("{}", serde_json::to_string_pretty(&result)?);
        }

        Command::Convert {
            text,
            to,
            format24h,
        } => {
            let result = parse_date_text(&text, reference, lang)
                .context("no date or time expression recognized")?;
            log::debug!("Parsed: {result:#?}");

            let zone = resolve_target_zone(&to);
            let converted = convert(result.instant, &zone);
            let time = converted
                .format_time(format24h)
                .with_context(|| format!("unknown timezone: {zone}"))?;
            log::debug!("Converted to {zone}: {converted:#?}");

            let label = converted
                .zone_label()
                .with_context(|| format!("unknown timezone: {zone}"))?;
            let diff = diff_label(result.instant, &converted, result.source_offset_minutes);

            if diff.is_empty() {
                println!("{time} {label}");
            } else {
                println!("{time} {label} {diff}");
            }
        }

        Command::Zone { name } => match name {
            Some(name) => println!("{}", normalize_timezone(&name)),
            None => println!("{}", system_timezone()),
        },
    }

    Ok(())
}
