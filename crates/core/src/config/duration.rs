//! Duration settings in Go notation (`300ms`, `1.5h`, `1h30m`).

use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;

use super::ConfigError;

static SEGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+(?:\.\d*)?|\.\d+)(ns|us|µs|μs|ms|s|m|h)").unwrap());

fn unit_nanos(unit: &str) -> f64 {
    match unit {
        "ns" => 1.0,
        "us" | "µs" | "μs" => 1e3,
        "ms" => 1e6,
        "s" => 1e9,
        "m" => 60.0 * 1e9,
        _ => 3600.0 * 1e9,
    }
}

/// Parse a duration such as `5s`, `24h` or `1h30m15.5s`.
///
/// A bare `0` is accepted; any other number needs a unit. Negative values are
/// rejected since neither a deadline nor a TTL can be negative.
pub fn parse_duration(raw: &str) -> Result<Duration, ConfigError> {
    let invalid =
        |reason: &str| ConfigError::Invalid { field: "duration".into(), reason: format!("{raw:?}: {reason}") };

    let text = raw.trim();
    let text = text.strip_prefix('+').unwrap_or(text);
    if text.starts_with('-') {
        return Err(invalid("duration must not be negative"));
    }
    if text == "0" {
        return Ok(Duration::ZERO);
    }
    if text.is_empty() {
        return Err(invalid("empty duration"));
    }

    let mut consumed = 0;
    let mut nanos = 0f64;
    for caps in SEGMENT.captures_iter(text) {
        let whole = caps.get(0).map(|m| (m.start(), m.end())).unwrap_or_default();
        if whole.0 != consumed {
            return Err(invalid("unexpected characters"));
        }
        consumed = whole.1;

        let value: f64 = caps[1].parse().map_err(|_| invalid("malformed number"))?;
        nanos += value * unit_nanos(&caps[2]);
    }

    if consumed != text.len() {
        return Err(invalid("missing or unknown unit"));
    }
    if !nanos.is_finite() || nanos > u64::MAX as f64 {
        return Err(invalid("duration out of range"));
    }

    Ok(Duration::from_nanos(nanos.round() as u64))
}
