// Copyright  (C) 2020, Hove and/or its affiliates. All rights reserved.
//
// This file is part of Navitia,
// the software to build cool stuff with public transport.
//
// Hope you'll enjoy and contribute to this project,
// powered by Hove (www.kisio.com).
// Help us simplify mobility and open public transport:
// a non ending quest to the responsive locomotion way of traveling!
//
// This contribution is a part of the research and development work of the
// IVA Project which aims to enhance traveler information and is carried out
// under the leadership of the Technological Research Institute SystemX,
// with the partnership and support of the transport organization authority
// Ile-De-France Mobilités (IDFM), SNCF, and public funds
// under the scope of the French Program "Investissements d’Avenir".
//
// LICENCE: This program is free software; you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <http://www.gnu.org/licenses/>.
//
// Stay tuned using
// twitter @navitia
// channel `#navitia` on riot https://riot.im/app/#/room/#navitia:matrix.org
// https://groups.google.com/d/forum/navitia
// www.navitia.io

//! Time-of-day values stay text (`HH:MM:SS`) throughout the pipeline because
//! the midnight rollover normalisation produces hours in `24..48`, which no
//! clock type accepts. This module is the only place that parses or formats
//! that text.

use std::fmt::Display;

/// Hours below this threshold never trigger rollover normalisation:
/// a schedule whose first departure is between midnight and 04:00 is an
/// early-morning service, not an overnight one.
pub const EARLY_MORNING_HOUR: u32 = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimeError {
    BadLength(String),
    BadNumber(String),
    Underflow(String),
}

impl std::error::Error for TimeError {}

impl Display for TimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TimeError::BadLength(text) => {
                write!(
                    f,
                    "Bad time value '{}', expected 'HH:MM' or 'HH:MM:SS'",
                    text
                )
            }
            TimeError::BadNumber(text) => {
                write!(f, "Bad time value '{}', fields must be numeric", text)
            }
            TimeError::Underflow(text) => {
                write!(f, "Cannot subtract a day from time value '{}'", text)
            }
        }
    }
}

fn parse_field(text: &str, field: &str) -> Result<u32, TimeError> {
    field
        .parse::<u32>()
        .map_err(|_| TimeError::BadNumber(text.to_string()))
}

/// Splits `HH:MM` or `HH:MM:SS` text into numeric fields.
/// Anything else is a hard error, the source data is not repaired.
pub fn split(text: &str) -> Result<(u32, u32, u32), TimeError> {
    if !text.is_ascii() {
        return Err(TimeError::BadNumber(text.to_string()));
    }
    match text.len() {
        5 => {
            if &text[2..3] != ":" {
                return Err(TimeError::BadLength(text.to_string()));
            }
            Ok((
                parse_field(text, &text[0..2])?,
                parse_field(text, &text[3..5])?,
                0,
            ))
        }
        8 => {
            if &text[2..3] != ":" || &text[5..6] != ":" {
                return Err(TimeError::BadLength(text.to_string()));
            }
            Ok((
                parse_field(text, &text[0..2])?,
                parse_field(text, &text[3..5])?,
                parse_field(text, &text[6..8])?,
            ))
        }
        _ => Err(TimeError::BadLength(text.to_string())),
    }
}

pub fn format(hour: u32, minute: u32, second: u32) -> String {
    format!("{:02}:{:02}:{:02}", hour, minute, second)
}

/// The clock hour of a formatted time; may exceed 23 after normalisation.
pub fn hour_of(text: &str) -> Result<u32, TimeError> {
    split(text).map(|(hour, _, _)| hour)
}

pub fn seconds_of(text: &str) -> Result<u32, TimeError> {
    split(text).map(|(hour, minute, second)| hour * 3600 + minute * 60 + second)
}

/// Midnight rollover normalisation. A time whose hour is earlier than the
/// schedule's departure hour belongs to the next calendar day, so it gains
/// 24 hours (`00:30` on a `23:xx` departure becomes `24:30`). Schedules
/// departing before [`EARLY_MORNING_HOUR`] are left untouched.
pub fn normalise(text: &str, departure_hour: u32) -> Result<String, TimeError> {
    let (mut hour, minute, second) = split(text)?;
    if departure_hour >= EARLY_MORNING_HOUR && hour < departure_hour {
        hour += 24;
    }
    Ok(format(hour, minute, second))
}

pub fn add_24h(text: &str) -> Result<String, TimeError> {
    let (hour, minute, second) = split(text)?;
    Ok(format(hour + 24, minute, second))
}

pub fn sub_24h(text: &str) -> Result<String, TimeError> {
    let (hour, minute, second) = split(text)?;
    if hour < 24 {
        return Err(TimeError::Underflow(text.to_string()));
    }
    Ok(format(hour - 24, minute, second))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_both_lengths() {
        assert_eq!(split("23:30").unwrap(), (23, 30, 0));
        assert_eq!(split("09:05:30").unwrap(), (9, 5, 30));
        assert!(split("9:05").is_err());
        assert!(split("ab:05:00").is_err());
    }

    #[test]
    fn normalises_past_midnight() {
        assert_eq!(normalise("23:30", 23).unwrap(), "23:30:00");
        assert_eq!(normalise("00:30", 23).unwrap(), "24:30:00");
        // early morning departures do not roll over
        assert_eq!(normalise("00:30", 0).unwrap(), "00:30:00");
        assert_eq!(normalise("03:10", 3).unwrap(), "03:10:00");
    }

    #[test]
    fn day_shifts() {
        assert_eq!(add_24h("01:15:00").unwrap(), "25:15:00");
        assert_eq!(sub_24h("25:15:00").unwrap(), "01:15:00");
        assert!(sub_24h("23:59:00").is_err());
    }
}
