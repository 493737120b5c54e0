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

#![allow(dead_code)]

use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::NaiveDate;

use cif2gtfs::calendar::{DaysMask, ScheduleCalendar};
use cif2gtfs::ingest::rows::{ScheduleRow, StationRow};
use cif2gtfs::models::{FlowRule, RouteType, Schedule, StopTime, Stp};

pub fn init() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
        )
        .try_init();
}

pub const WEEKDAYS: DaysMask = [false, true, true, true, true, true, false];
pub const WEEKEND: DaysMask = [true, false, false, false, false, false, true];
pub const SUNDAYS: DaysMask = [true, false, false, false, false, false, false];

pub fn date(text: &str) -> NaiveDate {
    NaiveDate::parse_from_str(text, "%Y-%m-%d").unwrap()
}

pub fn calendar(runs_from: &str, runs_to: &str, days: DaysMask) -> ScheduleCalendar {
    ScheduleCalendar::new(date(runs_from), date(runs_to), days, BTreeSet::new())
}

/// A call at `(atco, crs, tiploc)`; the sequence is assigned by [`schedule`].
pub fn stop(
    codes: (&str, &str, &str),
    arrival: Option<&str>,
    departure: Option<&str>,
) -> StopTime {
    let (atco, crs, tiploc) = codes;
    StopTime {
        trip_id: String::new(),
        arrival_time: arrival.map(str::to_string),
        departure_time: departure.map(str::to_string),
        atco_code: atco.to_string(),
        crs_code: Some(crs.to_string()),
        tiploc_code: tiploc.to_string(),
        stop_sequence: 0,
        headsign: None,
        pickup_type: FlowRule::Regular,
        drop_off_type: FlowRule::Regular,
        timepoint: true,
        platform: None,
    }
}

pub fn schedule(
    id: u64,
    tuid: &str,
    calendar: ScheduleCalendar,
    mut stops: Vec<StopTime>,
) -> Schedule {
    for (index, stop) in stops.iter_mut().enumerate() {
        stop.stop_sequence = index as u32 + 1;
    }
    let mut schedule = Schedule {
        id,
        tuid: tuid.to_string(),
        rsid: None,
        stp: Stp::Permanent,
        calendar,
        stops: Arc::new(stops),
        route_type: RouteType::Rail,
        operator: None,
        first_class: false,
        reservable: false,
    };
    schedule.stamp_stop_trip_ids();
    schedule
}

pub fn station(
    atco: &str,
    crs: &str,
    tiploc: &str,
    name: &str,
    coordinates: Option<(f64, f64)>,
) -> StationRow {
    StationRow {
        atco_code: atco.to_string(),
        tiploc_code: Some(tiploc.to_string()),
        crs_code: Some(crs.to_string()),
        name: name.to_string(),
        latitude: coordinates.map(|(lat, _)| lat),
        longitude: coordinates.map(|(_, lon)| lon),
        platform: None,
        minimum_change_time: Some(5),
    }
}

/// A fully populated stop-time row; tests override the fields they exercise.
#[allow(clippy::too_many_arguments)]
pub fn schedule_row(
    id: u64,
    train_uid: &str,
    stop_id: u64,
    codes: (&str, &str, &str),
    public_arrival: Option<&str>,
    public_departure: Option<&str>,
) -> ScheduleRow {
    let (atco, crs, tiploc) = codes;
    ScheduleRow {
        id,
        train_uid: train_uid.to_string(),
        retail_train_id: None,
        runs_from: date("2017-01-02"),
        runs_to: date("2017-01-06"),
        monday: 1,
        tuesday: 1,
        wednesday: 1,
        thursday: 1,
        friday: 1,
        saturday: 0,
        sunday: 0,
        atco_code: atco.to_string(),
        tiploc_code: tiploc.to_string(),
        crs_code: Some(crs.to_string()),
        stp_indicator: "P".to_string(),
        public_arrival_time: public_arrival.map(str::to_string),
        public_departure_time: public_departure.map(str::to_string),
        scheduled_arrival_time: None,
        scheduled_departure_time: None,
        train_category: Some("OO".to_string()),
        atoc_code: Some("GW".to_string()),
        platform: None,
        activity: Some("T ".to_string()),
        train_class: None,
        reservations: None,
        stop_id,
    }
}
