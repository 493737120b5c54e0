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

//! The operating-day algebra of a CIF schedule: an inclusive date range, a
//! weekday mask, and a set of excluded dates. STP overlay resolution and
//! association application are built entirely out of the operations here.

use std::collections::BTreeSet;

use chrono::{Datelike, Duration, NaiveDate};

use crate::output::records::{CalendarDateRecord, CalendarRecord};

pub const DAYS_IN_WEEK: usize = 7;

/// Weekday mask indexed 0 = Sunday .. 6 = Saturday.
pub type DaysMask = [bool; DAYS_IN_WEEK];

pub const NO_DAYS: DaysMask = [false; DAYS_IN_WEEK];
pub const ALL_DAYS: DaysMask = [true; DAYS_IN_WEEK];

pub fn weekday_index(date: NaiveDate) -> usize {
    date.weekday().num_days_from_sunday() as usize
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlap {
    None,
    Short,
}

/// The operating days of a schedule or association.
///
/// Invariants: `runs_from <= runs_to`; the exclusion set only contains dates
/// inside the range. A weekday whose mask bit is off is excluded without
/// being materialised in the exclusion set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleCalendar {
    runs_from: NaiveDate,
    runs_to: NaiveDate,
    days: DaysMask,
    exclude_days: BTreeSet<NaiveDate>,
}

impl ScheduleCalendar {
    pub fn new(
        runs_from: NaiveDate,
        runs_to: NaiveDate,
        days: DaysMask,
        exclude_days: BTreeSet<NaiveDate>,
    ) -> Self {
        assert!(runs_from <= runs_to);
        let exclude_days = exclude_days
            .into_iter()
            .filter(|date| *date >= runs_from && *date <= runs_to)
            .collect();
        Self {
            runs_from,
            runs_to,
            days,
            exclude_days,
        }
    }

    pub fn runs_from(&self) -> NaiveDate {
        self.runs_from
    }

    pub fn runs_to(&self) -> NaiveDate {
        self.runs_to
    }

    pub fn days(&self) -> &DaysMask {
        &self.days
    }

    pub fn exclude_days(&self) -> &BTreeSet<NaiveDate> {
        &self.exclude_days
    }

    /// The seven mask bits 0..6 concatenated MSB-first.
    pub fn binary_days(&self) -> u8 {
        self.days
            .iter()
            .enumerate()
            .fold(0u8, |mask, (index, allowed)| {
                if *allowed {
                    mask | (1 << (6 - index))
                } else {
                    mask
                }
            })
    }

    pub fn runs_on(&self, date: NaiveDate) -> bool {
        date >= self.runs_from
            && date <= self.runs_to
            && self.days[weekday_index(date)]
            && !self.exclude_days.contains(&date)
    }

    /// Identity string: bounds, the 7-bit mask, and the sorted exclusions.
    pub fn identity(&self) -> String {
        let mut id = format!(
            "{}{}{:07b}",
            self.runs_from.format("%Y%m%d"),
            self.runs_to.format("%Y%m%d"),
            self.binary_days(),
        );
        for date in &self.exclude_days {
            id.push_str(&date.format("%Y%m%d").to_string());
        }
        id
    }

    /// `None` when the masks are disjoint or no calendar day is shared,
    /// `Short` otherwise.
    pub fn overlap(&self, other: &Self) -> Overlap {
        if self.binary_days() & other.binary_days() == 0 {
            return Overlap::None;
        }
        if self.shared_days(other).next().is_none() {
            return Overlap::None;
        }
        Overlap::Short
    }

    /// All calendar days allowed by both calendars: inside both ranges, both
    /// mask bits set, in neither exclusion set. Exclusion dominates the mask.
    pub fn shared_days<'a>(&'a self, other: &'a Self) -> SharedDays<'a> {
        let first = self.runs_from.max(other.runs_from);
        let last = self.runs_to.min(other.runs_to);
        SharedDays {
            has_current: if first <= last { Some(first) } else { None },
            last,
            lhs: self,
            rhs: other,
        }
    }

    /// Excludes every day shared with `other`, then re-tightens the range.
    /// `None` when no operating day remains.
    pub fn add_exclude_days(&self, other: &Self) -> Option<Self> {
        let mut exclude_days = self.exclude_days.clone();
        exclude_days.extend(self.shared_days(other));
        self.restricted(self.runs_from, self.runs_to, &NO_DAYS, exclude_days)
    }

    /// A fresh calendar with `remove` subtracted from the mask, the bounds
    /// advanced past leading and trailing dead days, and the exclusion set
    /// filtered to the new range. `None` when no operating day remains.
    pub fn restricted(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        remove: &DaysMask,
        exclude_days: BTreeSet<NaiveDate>,
    ) -> Option<Self> {
        let mut days = NO_DAYS;
        for index in 0..DAYS_IN_WEEK {
            days[index] = self.days[index] && !remove[index];
        }

        let dead = |date: NaiveDate| !days[weekday_index(date)] || exclude_days.contains(&date);

        let mut new_start = start;
        while new_start <= end && dead(new_start) {
            new_start += Duration::days(1);
        }
        if new_start > end {
            return None;
        }
        let mut new_end = end;
        while new_end >= new_start && dead(new_end) {
            new_end -= Duration::days(1);
        }

        Some(Self::new(new_start, new_end, days, exclude_days))
    }

    /// Range intersection with `other`: tightest bounds, conjunction of the
    /// masks, union of the exclusion sets.
    pub fn intersect(&self, other: &Self) -> Option<Self> {
        let start = self.runs_from.max(other.runs_from);
        let end = self.runs_to.min(other.runs_to);
        if start > end {
            return None;
        }
        let mut remove = NO_DAYS;
        for index in 0..DAYS_IN_WEEK {
            remove[index] = !other.days[index];
        }
        let mut exclude_days = self.exclude_days.clone();
        exclude_days.extend(other.exclude_days.iter().copied());
        self.restricted(start, end, &remove, exclude_days)
    }

    /// One day later: both bounds and every exclusion advance, the mask
    /// rotates one position (Sunday becomes Monday, Saturday wraps to Sunday).
    pub fn shift_forward(&self) -> Self {
        let mut days = NO_DAYS;
        for index in 0..DAYS_IN_WEEK {
            days[(index + 1) % DAYS_IN_WEEK] = self.days[index];
        }
        Self {
            runs_from: self.runs_from + Duration::days(1),
            runs_to: self.runs_to + Duration::days(1),
            days,
            exclude_days: self
                .exclude_days
                .iter()
                .map(|date| *date + Duration::days(1))
                .collect(),
        }
    }

    /// Inverse of [`shift_forward`](Self::shift_forward).
    pub fn shift_backward(&self) -> Self {
        let mut days = NO_DAYS;
        for index in 0..DAYS_IN_WEEK {
            days[index] = self.days[(index + 1) % DAYS_IN_WEEK];
        }
        Self {
            runs_from: self.runs_from - Duration::days(1),
            runs_to: self.runs_to - Duration::days(1),
            days,
            exclude_days: self
                .exclude_days
                .iter()
                .map(|date| *date - Duration::days(1))
                .collect(),
        }
    }

    pub fn to_calendar(&self, service_id: &str) -> CalendarRecord {
        let day = |index: usize| u8::from(self.days[index]);
        CalendarRecord {
            service_id: service_id.to_string(),
            monday: day(1),
            tuesday: day(2),
            wednesday: day(3),
            thursday: day(4),
            friday: day(5),
            saturday: day(6),
            sunday: day(0),
            start_date: self.runs_from.format("%Y%m%d").to_string(),
            end_date: self.runs_to.format("%Y%m%d").to_string(),
        }
    }

    pub fn to_calendar_dates(&self, service_id: &str) -> Vec<CalendarDateRecord> {
        self.exclude_days
            .iter()
            .map(|date| CalendarDateRecord {
                service_id: service_id.to_string(),
                date: date.format("%Y%m%d").to_string(),
                exception_type: 2,
            })
            .collect()
    }
}

/// Yields the days shared by two calendars, in date order.
/// Restartable only by calling `shared_days` again.
pub struct SharedDays<'a> {
    has_current: Option<NaiveDate>,
    last: NaiveDate,
    lhs: &'a ScheduleCalendar,
    rhs: &'a ScheduleCalendar,
}

impl<'a> Iterator for SharedDays<'a> {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current) = self.has_current {
            if current > self.last {
                self.has_current = None;
                return None;
            }
            self.has_current = current.succ_opt();
            if self.lhs.runs_on(current) && self.rhs.runs_on(current) {
                return Some(current);
            }
        }
        None
    }
}
