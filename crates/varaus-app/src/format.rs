// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use time::OffsetDateTime;

use crate::i18n::Messages;

/// Formats a count with space-grouped thousands and an optional unit suffix.
/// Zero and absent counts render empty, matching how the composite columns
/// drop an absent side entirely.
pub fn format_number(value: Option<i64>, unit: &str) -> String {
    let value = match value {
        Some(value) if value != 0 => value,
        _ => return String::new(),
    };
    let sign = if value < 0 { "-" } else { "" };
    let grouped = group_thousands(value.unsigned_abs());
    if unit.is_empty() {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped} {unit}")
    }
}

/// Formats a duration in seconds as `h`/`min`/`s` parts, dropping zero parts.
/// Zero and absent durations render empty.
pub fn format_duration(seconds: Option<i64>) -> String {
    let total = match seconds {
        Some(total) if total > 0 => total,
        _ => return String::new(),
    };
    let hours = total / 3600;
    let minutes = total % 3600 / 60;
    let secs = total % 60;

    let mut parts = Vec::new();
    if hours > 0 {
        parts.push(format!("{hours} h"));
    }
    if minutes > 0 {
        parts.push(format!("{minutes} min"));
    }
    if secs > 0 {
        parts.push(format!("{secs} s"));
    }
    parts.join(" ")
}

/// The composite `"<count> <unit> / <duration>"` cell. When either side is
/// absent the separator goes with it; the trim is part of the contract, not
/// cosmetics.
pub fn count_and_duration(count: Option<i64>, unit: &str, duration_seconds: Option<i64>) -> String {
    let composite = format!(
        "{} / {}",
        format_number(count, unit),
        format_duration(duration_seconds)
    );
    trim_separators(&composite)
}

/// Strips leading/trailing separator characters (spaces and slashes).
pub fn trim_separators(value: &str) -> String {
    value.trim_matches([' ', '/']).to_owned()
}

/// One-line summary of where `now` falls relative to the application period.
pub fn timeframe_status(
    begin: OffsetDateTime,
    end: OffsetDateTime,
    now: OffsetDateTime,
    messages: &Messages,
) -> String {
    if now < begin {
        messages.translate_with(
            "ApplicationRound.timeframeFuture",
            &[("date", &begin.date().to_string())],
        )
    } else if now <= end {
        messages.translate_with(
            "ApplicationRound.timeframeCurrent",
            &[("date", &end.date().to_string())],
        )
    } else {
        messages.translate_with(
            "ApplicationRound.timeframePast",
            &[("date", &end.date().to_string())],
        )
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.char_indices() {
        if index != 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(ch);
    }
    grouped
}
