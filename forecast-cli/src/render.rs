use std::fmt::{self, Write};

use forecast_core::{DataBlock, Forecast};

const HOURS_SHOWN: usize = 6;
const DAYS_SHOWN: usize = 7;

/// Human-readable summary of a forecast.
pub fn render(forecast: &Forecast) -> Result<String, fmt::Error> {
    let mut out = String::new();
    write_forecast(&mut out, forecast)?;
    Ok(out)
}

fn with_unit(value: f64, unit: Option<&str>) -> String {
    match unit {
        Some(unit) => format!("{value:.1} {unit}"),
        None => format!("{value:.1}"),
    }
}

fn percent(fraction: f64) -> String {
    format!("{:.0}%", fraction * 100.0)
}

fn write_forecast(out: &mut String, forecast: &Forecast) -> fmt::Result {
    match (forecast.latitude(), forecast.longitude()) {
        (Some(lat), Some(lon)) => write!(out, "Location: {lat}, {lon}")?,
        _ => write!(out, "Location: unknown")?,
    }
    match forecast.timezone() {
        Some(tz) => writeln!(out, " ({tz})")?,
        None => writeln!(out)?,
    }

    let temp_unit = forecast.temperature_unit();

    if let Some(now) = forecast.currently() {
        let summary = now.summary().unwrap_or("No summary");
        match now.temperature() {
            Some(t) => writeln!(out, "Now: {summary}, {}", with_unit(t, temp_unit))?,
            None => writeln!(out, "Now: {summary}")?,
        }

        let mut details = Vec::new();
        if let Some(feels) = now.apparent_temperature() {
            details.push(format!("feels like {}", with_unit(feels, temp_unit)));
        }
        if let Some(h) = now.humidity() {
            details.push(format!("humidity {}", percent(h)));
        }
        if let Some(w) = now.wind_speed() {
            details.push(format!("wind {}", with_unit(w, forecast.wind_speed_unit())));
        }
        if let Some(p) = now.pressure() {
            details.push(format!("pressure {}", with_unit(p, forecast.pressure_unit())));
        }
        if let Some(d) = now.nearest_storm_distance() {
            details.push(format!(
                "nearest storm {}",
                with_unit(d, forecast.nearest_storm_distance_unit())
            ));
        }
        if !details.is_empty() {
            writeln!(out, "  {}", details.join(", "))?;
        }
    }

    if let Some(hourly) = forecast.hourly() {
        write_block_header(out, "Next hours", hourly)?;
        for point in hourly.iter().take(HOURS_SHOWN) {
            let when = point
                .local_time()
                .map(|t| t.format("%H:%M").to_string())
                .unwrap_or_else(|| "--:--".to_string());
            let temp = point
                .temperature()
                .map(|t| with_unit(t, temp_unit))
                .unwrap_or_else(|| "-".to_string());
            let precip = point
                .precip_probability()
                .map(|p| format!("  precip {}", percent(p)))
                .unwrap_or_default();
            writeln!(out, "  {when}  {temp}{precip}")?;
        }
    }

    if let Some(daily) = forecast.daily() {
        write_block_header(out, "Next days", daily)?;
        for point in daily.iter().take(DAYS_SHOWN) {
            let when = point
                .local_time()
                .map(|t| t.format("%a %d %b").to_string())
                .unwrap_or_else(|| "---".to_string());
            let range = match (point.temperature_min(), point.temperature_max()) {
                (Some(lo), Some(hi)) => format!("{lo:.1}..{}", with_unit(hi, temp_unit)),
                _ => "-".to_string(),
            };
            let summary = point.summary().map(|s| format!("  {s}")).unwrap_or_default();
            writeln!(out, "  {when}  {range}{summary}")?;
        }
    }

    if let Some(alerts) = forecast.alerts().filter(|a| !a.is_empty()) {
        writeln!(out, "Alerts:")?;
        for alert in alerts {
            let title = alert.title().unwrap_or("Untitled alert");
            match alert.expires_at() {
                Some(until) => writeln!(out, "  ! {title} (until {})", until.format("%Y-%m-%d %H:%M"))?,
                None => writeln!(out, "  ! {title}")?,
            }
        }
    }

    Ok(())
}

fn write_block_header(out: &mut String, label: &str, block: &DataBlock) -> fmt::Result {
    match block.summary() {
        Some(summary) => writeln!(out, "{label}: {summary}"),
        None => writeln!(out, "{label}:"),
    }
}
