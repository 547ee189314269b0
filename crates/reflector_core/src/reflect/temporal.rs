use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use regex::{Captures, Regex};

use crate::reflect::{ReflectError, Result, Temporal, TemporalKind};

/// `yyyy[-]MM[-]dd[[T| ]HH:mm[:ss[.f{1,6}]]]`
static DATE_TIME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"^(\d{4})-?(\d{2})-?(\d{2})(?:[T ]?(\d{2}):(\d{2})(?::(\d{2})(?:\.(\d{1,6}))?)?)?$").expect("date-time pattern compiles")
});

/// `HH:mm[:ss[.f{1,6}]]`
static TIME_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(\d{2}):(\d{2})(?::(\d{2})(?:\.(\d{1,6}))?)?$").expect("time pattern compiles"));

/// Parse text with the composite date/time pattern. A missing time of day is
/// midnight.
pub fn parse_date_time(text: &str) -> Result<NaiveDateTime> {
	let trimmed = text.trim();
	let caps = DATE_TIME_PATTERN.captures(trimmed).ok_or_else(|| coercion_error(text, TemporalKind::DateTime))?;

	let year = number(&caps, 1).unwrap_or(0) as i32;
	let month = number(&caps, 2).unwrap_or(0);
	let day = number(&caps, 3).unwrap_or(0);
	let date = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| coercion_error(text, TemporalKind::DateTime))?;

	let time = if caps.get(4).is_some() {
		time_from(&caps, 4, text, TemporalKind::DateTime)?
	} else {
		NaiveTime::MIN
	};
	Ok(date.and_time(time))
}

/// Parse text into `kind`, projecting a full date-time down when needed.
/// Time targets also accept bare `HH:mm[:ss[.f]]` text.
pub fn parse_temporal(text: &str, kind: TemporalKind) -> Result<Temporal> {
	match parse_date_time(text) {
		Ok(parsed) => project(Temporal::DateTime(parsed), kind).ok_or_else(|| coercion_error(text, kind)),
		Err(err) if kind != TemporalKind::Time => Err(err),
		Err(_) => {
			let caps = TIME_PATTERN.captures(text.trim()).ok_or_else(|| coercion_error(text, kind))?;
			Ok(Temporal::Time(time_from(&caps, 1, text, kind)?))
		}
	}
}

/// Narrow a temporal value to `kind`. Only the same kind or a narrower
/// projection of a date-time succeeds.
pub fn project(value: Temporal, kind: TemporalKind) -> Option<Temporal> {
	match (value, kind) {
		(Temporal::DateTime(v), TemporalKind::Date) => Some(Temporal::Date(v.date())),
		(Temporal::DateTime(v), TemporalKind::Time) => Some(Temporal::Time(v.time())),
		(same, kind) if same.kind() == kind => Some(same),
		_ => None,
	}
}

fn time_from(caps: &Captures<'_>, first: usize, text: &str, kind: TemporalKind) -> Result<NaiveTime> {
	let hour = number(caps, first).unwrap_or(0);
	let minute = number(caps, first + 1).unwrap_or(0);
	let second = number(caps, first + 2).unwrap_or(0);
	let micro = caps
		.get(first + 3)
		.map(|m| format!("{:0<6}", m.as_str()).parse::<u32>().unwrap_or(0))
		.unwrap_or(0);
	NaiveTime::from_hms_micro_opt(hour, minute, second, micro).ok_or_else(|| coercion_error(text, kind))
}

fn number(caps: &Captures<'_>, idx: usize) -> Option<u32> {
	caps.get(idx).and_then(|m| m.as_str().parse().ok())
}

fn coercion_error(text: &str, kind: TemporalKind) -> ReflectError {
	ReflectError::Coercion {
		value: format!("\"{text}\""),
		target: kind.name().to_owned(),
	}
}
