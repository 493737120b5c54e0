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

//! The flat row shapes the pipeline consumes. The relational extraction that
//! produces them is an external collaborator; the only contract is the field
//! set and the `(stp_indicator DESC, id, stop_id)` ordering of the schedule
//! stream.

use chrono::NaiveDate;
use serde::Deserialize;

/// One schedule stop-time row. Rows of the same schedule id arrive
/// contiguously, in `stop_id` order.
#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleRow {
    pub id: u64,
    pub train_uid: String,
    pub retail_train_id: Option<String>,
    pub runs_from: NaiveDate,
    pub runs_to: NaiveDate,
    pub monday: u8,
    pub tuesday: u8,
    pub wednesday: u8,
    pub thursday: u8,
    pub friday: u8,
    pub saturday: u8,
    pub sunday: u8,
    pub atco_code: String,
    pub tiploc_code: String,
    pub crs_code: Option<String>,
    pub stp_indicator: String,
    pub public_arrival_time: Option<String>,
    pub public_departure_time: Option<String>,
    pub scheduled_arrival_time: Option<String>,
    pub scheduled_departure_time: Option<String>,
    pub train_category: Option<String>,
    pub atoc_code: Option<String>,
    pub platform: Option<String>,
    pub activity: Option<String>,
    pub train_class: Option<String>,
    pub reservations: Option<String>,
    pub stop_id: u64,
}

impl ScheduleRow {
    /// Weekday mask indexed 0 = Sunday .. 6 = Saturday.
    pub fn days(&self) -> [bool; 7] {
        [
            self.sunday == 1,
            self.monday == 1,
            self.tuesday == 1,
            self.wednesday == 1,
            self.thursday == 1,
            self.friday == 1,
            self.saturday == 1,
        ]
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AssociationRow {
    pub id: u64,
    pub base_uid: String,
    pub assoc_uid: String,
    pub assoc_location: String,
    pub date_indicator: String,
    pub assoc_cat: String,
    pub stp_indicator: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub monday: u8,
    pub tuesday: u8,
    pub wednesday: u8,
    pub thursday: u8,
    pub friday: u8,
    pub saturday: u8,
    pub sunday: u8,
}

impl AssociationRow {
    pub fn days(&self) -> [bool; 7] {
        [
            self.sunday == 1,
            self.monday == 1,
            self.tuesday == 1,
            self.wednesday == 1,
            self.thursday == 1,
            self.friday == 1,
            self.saturday == 1,
        ]
    }
}

/// One station of the stop catalogue, keyed by ATCO code for GTFS output and
/// by CRS code for headsign display names.
#[derive(Debug, Clone, Deserialize)]
pub struct StationRow {
    pub atco_code: String,
    pub tiploc_code: Option<String>,
    pub crs_code: Option<String>,
    pub name: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub platform: Option<String>,
    pub minimum_change_time: Option<u32>,
}

/// One ATOC fixed link (walk, tube, bus transfer between stations).
#[derive(Debug, Clone, Deserialize)]
pub struct FixedLinkRow {
    pub mode: String,
    pub origin_crs: String,
    pub destination_crs: String,
    pub duration_minutes: u32,
}
