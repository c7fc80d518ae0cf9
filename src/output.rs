//! Output formatting for homes and prices.

use powerctl_protocol::{date, Home, PriceInfo, PricePoint};
use std::{
    fmt,
    io::{self, Write},
    str::FromStr,
};

/// Output format for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human readable text
    Pretty,
    /// Indented JSON
    Json,
}

/// Returned when a configured format name isn't known.
#[derive(Debug, thiserror::Error)]
#[error("unknown output format `{0}`, expected `pretty` or `json`")]
pub struct UnknownFormat(String);

impl FromStr for OutputFormat {
    type Err = UnknownFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" | "text" => Ok(OutputFormat::Pretty),
            "json" => Ok(OutputFormat::Json),
            _ => Err(UnknownFormat(s.to_owned())),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OutputFormat::Pretty => "pretty",
            OutputFormat::Json => "json",
        })
    }
}

/// Write `homes` to `out`.
pub fn write_homes(homes: &[Home], format: OutputFormat, out: &mut impl Write) -> io::Result<()> {
    match format {
        OutputFormat::Json => write_json(homes, out),
        OutputFormat::Pretty => {
            if homes.is_empty() {
                return writeln!(out, "No homes found.");
            }
            for (i, home) in homes.iter().enumerate() {
                if i > 0 {
                    writeln!(out)?;
                }
                write_home(home, out)?;
            }
            Ok(())
        }
    }
}

fn write_home(home: &Home, out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "{} ({})", home.display_name(), home.id)?;

    let kind = home.home_type.as_deref().unwrap_or("unknown type");
    match home.size {
        Some(size) => writeln!(out, "  Type:      {}, {} m²", kind, size)?,
        None => writeln!(out, "  Type:      {}", kind)?,
    }

    if let Some(address) = &home.address {
        let locality = [address.postal_code.as_deref(), address.city.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" ");
        let parts: Vec<&str> = [
            address.address1.as_deref(),
            Some(locality.as_str()).filter(|s| !s.is_empty()),
            address.country.as_deref(),
        ]
        .into_iter()
        .flatten()
        .collect();
        if !parts.is_empty() {
            writeln!(out, "  Address:   {}", parts.join(", "))?;
        }
    }

    let realtime = if home.features.real_time_consumption_enabled {
        "enabled"
    } else {
        "disabled"
    };
    writeln!(out, "  Real-time: {}", realtime)
}

/// Write `prices` for `home_id` to `out`.
pub fn write_prices(
    home_id: &str,
    prices: &PriceInfo,
    format: OutputFormat,
    out: &mut impl Write,
) -> io::Result<()> {
    match format {
        OutputFormat::Json => write_json(prices, out),
        OutputFormat::Pretty => {
            writeln!(out, "Prices for {}", home_id)?;
            match &prices.current {
                Some(p) => writeln!(
                    out,
                    "Current: {:.4} {} ({}) since {}",
                    p.total,
                    p.currency,
                    p.level,
                    date::hour_label(&p.starts_at)
                )?,
                None => writeln!(out, "Current: not available")?,
            }
            write_day("Today", &prices.today, out)?;
            write_day("Tomorrow", &prices.tomorrow, out)?;
            if let Some(p) = prices.cheapest() {
                writeln!(
                    out,
                    "Cheapest: {:.4} {} at {}",
                    p.total,
                    p.currency,
                    date::to_api_string(&p.starts_at)
                )?;
            }
            Ok(())
        }
    }
}

fn write_day(label: &str, points: &[PricePoint], out: &mut impl Write) -> io::Result<()> {
    if points.is_empty() {
        return writeln!(out, "{}: not yet published", label);
    }
    writeln!(out, "{}:", label)?;
    for p in points {
        let marker = if date::is_current_hour(&p.starts_at) { '*' } else { ' ' };
        writeln!(
            out,
            " {} {}  {:.4} {}  {}",
            marker,
            date::hour_label(&p.starts_at),
            p.total,
            p.currency,
            p.level
        )?;
    }
    Ok(())
}

fn write_json<T: serde::Serialize + ?Sized>(value: &T, out: &mut impl Write) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value).map_err(io::Error::from)?;
    writeln!(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn render(f: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> String {
        let mut out = Vec::new();
        f(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn home() -> Home {
        serde_json::from_value(json!({
            "id": "home-123",
            "appNickname": "Test Home",
            "size": 100,
            "type": "APARTMENT",
            "features": { "realTimeConsumptionEnabled": true },
            "address": {
                "address1": "123 Test St",
                "postalCode": "12345",
                "city": "Oslo",
                "country": "Norway"
            }
        }))
        .unwrap()
    }

    fn prices() -> PriceInfo {
        serde_json::from_value(json!({
            "current": {
                "total": 0.45, "energy": 0.35, "tax": 0.10,
                "startsAt": "2024-01-15T13:00:00.000+01:00",
                "level": "NORMAL", "currency": "NOK"
            },
            "today": [{
                "total": 0.40, "energy": 0.30, "tax": 0.10,
                "startsAt": "2024-01-15T00:00:00.000+01:00",
                "level": "CHEAP", "currency": "NOK"
            }],
            "tomorrow": []
        }))
        .unwrap()
    }

    #[test]
    fn parses_format_names() {
        assert_eq!("pretty".parse::<OutputFormat>().unwrap(), OutputFormat::Pretty);
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert!("yaml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn pretty_home() {
        let text = render(|out| write_homes(&[home()], OutputFormat::Pretty, out));

        assert!(text.starts_with("Test Home (home-123)\n"));
        assert!(text.contains("APARTMENT, 100 m²"));
        assert!(text.contains("123 Test St, 12345 Oslo, Norway"));
        assert!(text.contains("Real-time: enabled"));
    }

    #[test]
    fn no_homes() {
        let text = render(|out| write_homes(&[], OutputFormat::Pretty, out));
        assert_eq!(text, "No homes found.\n");
    }

    #[test]
    fn json_homes_round_trip_fields() {
        let text = render(|out| write_homes(&[home()], OutputFormat::Json, out));
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();

        assert_eq!(value[0]["id"], "home-123");
        assert_eq!(value[0]["features"]["realTimeConsumptionEnabled"], true);
    }

    #[test]
    fn pretty_prices() {
        let text = render(|out| write_prices("home-123", &prices(), OutputFormat::Pretty, out));

        assert!(text.contains("Current: 0.4500 NOK (NORMAL) since 13:00"));
        assert!(text.contains("00:00  0.4000 NOK  CHEAP"));
        assert!(text.contains("Tomorrow: not yet published"));
        assert!(text.contains("Cheapest: 0.4000 NOK at 2024-01-15T00:00:00.000+01:00"));
    }
}
