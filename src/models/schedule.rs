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

use std::sync::Arc;

use crate::calendar::ScheduleCalendar;
use crate::models::overlay::{OverlayRecord, RecordId, Stp};

/// GTFS mode of one schedule, derived from the CIF train category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteType {
    Rail,
    Bus,
    ReplacementBus,
    Subway,
    Ferry,
}

impl RouteType {
    /// Unknown categories default to Rail.
    pub fn from_category(category: Option<&str>) -> Self {
        match category {
            Some("OO") | Some("XX") | Some("XZ") | Some("XC") => RouteType::Rail,
            Some("BR") => RouteType::ReplacementBus,
            Some("BS") => RouteType::Bus,
            Some("OL") => RouteType::Subway,
            Some("SS") => RouteType::Ferry,
            _ => RouteType::Rail,
        }
    }

    pub fn gtfs_code(self) -> u16 {
        match self {
            RouteType::Subway => 1,
            RouteType::Rail => 2,
            RouteType::Bus | RouteType::ReplacementBus => 3,
            RouteType::Ferry => 4,
        }
    }
}

/// GTFS pickup/drop-off policy at one stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlowRule {
    Regular,
    NotAllowed,
    Phone,
    Coordinated,
}

impl FlowRule {
    pub fn gtfs_code(self) -> u8 {
        match self {
            FlowRule::Regular => 0,
            FlowRule::NotAllowed => 1,
            FlowRule::Phone => 2,
            FlowRule::Coordinated => 3,
        }
    }

    pub fn allows(self) -> bool {
        self == FlowRule::Regular
    }
}

/// One public call of a trip. Times are formatted `HH:MM:SS` text whose hour
/// may exceed 23 after midnight rollover normalisation; `None` means the call
/// is not advertised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StopTime {
    pub trip_id: String,
    pub arrival_time: Option<String>,
    pub departure_time: Option<String>,
    pub atco_code: String,
    pub crs_code: Option<String>,
    pub tiploc_code: String,
    pub stop_sequence: u32,
    pub headsign: Option<String>,
    pub pickup_type: FlowRule,
    pub drop_off_type: FlowRule,
    pub timepoint: bool,
    pub platform: Option<String>,
}

impl StopTime {
    pub fn is_public(&self) -> bool {
        self.arrival_time.is_some() || self.departure_time.is_some()
    }
}

/// One CIF schedule: an overlay record plus its ordered stop list and the
/// operational attributes GTFS needs.
#[derive(Debug, Clone)]
pub struct Schedule {
    pub id: RecordId,
    pub tuid: String,
    pub rsid: Option<String>,
    pub stp: Stp,
    pub calendar: ScheduleCalendar,
    /// Shared between the clones produced by overlay resolution; rebuilt by
    /// any pass that alters the calls themselves.
    pub stops: Arc<Vec<StopTime>>,
    pub route_type: RouteType,
    pub operator: Option<String>,
    pub first_class: bool,
    pub reservable: bool,
}

impl Schedule {
    /// `{tuid}_{runsFrom:YYYYMMDD}_{runsTo:YYYYMMDD}`
    pub fn trip_id(&self) -> String {
        format!(
            "{}_{}_{}",
            self.tuid,
            self.calendar.runs_from().format("%Y%m%d"),
            self.calendar.runs_to().format("%Y%m%d"),
        )
    }

    pub fn origin(&self) -> Option<&StopTime> {
        self.stops.first()
    }

    pub fn destination(&self) -> Option<&StopTime> {
        self.stops.last()
    }

    /// Index of the call at the given TIPLOC.
    pub fn stop_at(&self, tiploc: &str) -> Option<usize> {
        self.stops.iter().position(|stop| stop.tiploc_code == tiploc)
    }

    pub fn before(&self, index: usize) -> &[StopTime] {
        &self.stops[..index]
    }

    pub fn after(&self, index: usize) -> &[StopTime] {
        &self.stops[index + 1..]
    }

    pub fn has_public_call(&self) -> bool {
        self.stops.iter().any(StopTime::is_public)
    }

    /// Calendar clones leave the shared stop list untouched, so the trip-id
    /// back-references can go stale; this rebuilds them against the current
    /// calendar when needed.
    pub fn stamp_stop_trip_ids(&mut self) {
        let trip_id = self.trip_id();
        let stale = self
            .stops
            .first()
            .map_or(false, |stop| stop.trip_id != trip_id);
        if stale {
            let stops = Arc::make_mut(&mut self.stops);
            for stop in stops.iter_mut() {
                stop.trip_id = trip_id.clone();
            }
        }
    }
}

impl OverlayRecord for Schedule {
    fn record_id(&self) -> RecordId {
        self.id
    }

    fn tuid(&self) -> &str {
        &self.tuid
    }

    fn stp(&self) -> Stp {
        self.stp
    }

    fn calendar(&self) -> &ScheduleCalendar {
        &self.calendar
    }

    fn with_calendar(&self, calendar: ScheduleCalendar, id: RecordId) -> Self {
        Self {
            id,
            calendar,
            ..self.clone()
        }
    }
}
