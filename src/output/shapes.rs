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

//! One shape per distinct sequence of called stops. The shape id is the hash
//! of that sequence, so two trips share a shape exactly when they call at the
//! same stops in the same order.

use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};

use tracing::trace;

use crate::ingest::StationIndex;
use crate::models::Schedule;
use crate::output::records::ShapeRecord;

pub struct ShapeDedup<'a> {
    stations: &'a StationIndex,
    assigned: HashMap<u64, String>,
    points: Vec<ShapeRecord>,
}

impl<'a> ShapeDedup<'a> {
    pub fn new(stations: &'a StationIndex) -> Self {
        Self {
            stations,
            assigned: HashMap::new(),
            points: Vec::new(),
        }
    }

    /// The shape id of a trip, emitting the point sequence the first time a
    /// stop sequence is seen. Stops without coordinates are skipped.
    pub fn shape_id_for(&mut self, schedule: &Schedule) -> String {
        let mut hasher = DefaultHasher::new();
        for stop in schedule.stops.iter() {
            stop.atco_code.hash(&mut hasher);
        }
        let key = hasher.finish();

        if let Some(shape_id) = self.assigned.get(&key) {
            return shape_id.clone();
        }

        let shape_id = format!("{:016x}", key);
        let mut sequence = 0;
        for stop in schedule.stops.iter() {
            match self.stations.coordinates(&stop.atco_code) {
                Some((latitude, longitude)) => {
                    self.points.push(ShapeRecord {
                        shape_id: shape_id.clone(),
                        shape_pt_lat: latitude,
                        shape_pt_lon: longitude,
                        shape_pt_sequence: sequence,
                    });
                    sequence += 1;
                }
                None => {
                    trace!("No coordinates for stop {}, shape point skipped", stop.atco_code);
                }
            }
        }
        self.assigned.insert(key, shape_id.clone());
        shape_id
    }

    pub fn into_points(self) -> Vec<ShapeRecord> {
        self.points
    }
}
