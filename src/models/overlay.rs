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

use crate::calendar::ScheduleCalendar;

pub type RecordId = u64;

/// Short-Term Planning indicator. The declaration order matches the
/// descending CIF indicator order (`P` > `O` > `N` > `C`), so sorting records
/// by `Stp` puts Permanent entries first, the order the overlay resolver
/// requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stp {
    Permanent,
    Overlay,
    New,
    Cancellation,
}

impl Stp {
    pub fn from_indicator(indicator: &str) -> Option<Self> {
        match indicator {
            "P" => Some(Stp::Permanent),
            "O" => Some(Stp::Overlay),
            "N" => Some(Stp::New),
            "C" => Some(Stp::Cancellation),
            _ => None,
        }
    }

    pub fn indicator(self) -> char {
        match self {
            Stp::Permanent => 'P',
            Stp::Overlay => 'O',
            Stp::New => 'N',
            Stp::Cancellation => 'C',
        }
    }
}

/// Anything the overlay resolver can collapse: schedules and associations
/// both carry an id, a TUID, an STP indicator and an operating calendar, and
/// can be cloned onto a narrowed calendar.
pub trait OverlayRecord: Clone {
    fn record_id(&self) -> RecordId;

    /// The text key overlays are grouped under.
    fn tuid(&self) -> &str;

    fn stp(&self) -> Stp;

    fn calendar(&self) -> &ScheduleCalendar;

    /// A copy of this record on a different calendar, every other field
    /// preserved.
    fn with_calendar(&self, calendar: ScheduleCalendar, id: RecordId) -> Self;
}

/// Hands out record ids above everything seen in the source data, for the
/// clones produced by association application and late-night duplication.
#[derive(Debug)]
pub struct IdGenerator {
    next: RecordId,
}

impl IdGenerator {
    /// `max_id` is the largest id observed during ingestion.
    pub fn after(max_id: RecordId) -> Self {
        Self { next: max_id + 1 }
    }

    pub fn next_id(&mut self) -> RecordId {
        let id = self.next;
        self.next += 1;
        id
    }
}

impl Iterator for IdGenerator {
    type Item = RecordId;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.next_id())
    }
}
