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

use std::collections::HashSet;
use std::fmt::Display;

use tracing::debug;

use crate::apply::OverlayIndex;
use crate::models::Schedule;

#[derive(Debug)]
pub enum FlattenError {
    /// Two schedules produced the same trip id; the upstream overlay
    /// resolution should have made that impossible.
    DuplicateTripId(String),
}

impl std::error::Error for FlattenError {}

impl Display for FlattenError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FlattenError::DuplicateTripId(trip_id) => {
                write!(f, "Duplicate trip id '{}' after flattening", trip_id)
            }
        }
    }
}

/// Flattens the TUID index into one list keyed by trip id, dropping
/// schedules with no advertised call (a cancellation entry has no stops at
/// all). The stop-time trip-id back-references are re-stamped here, since
/// overlay resolution may have moved the calendar bounds under them.
pub fn flatten_schedules(
    index: OverlayIndex<Schedule>,
) -> Result<Vec<Schedule>, FlattenError> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut flattened = Vec::new();
    for (_tuid, schedules) in index {
        for mut schedule in schedules {
            if !schedule.has_public_call() {
                debug!(
                    "Skipping schedule {} of {}, it has no public call",
                    schedule.id, schedule.tuid
                );
                continue;
            }
            let trip_id = schedule.trip_id();
            if !seen.insert(trip_id.clone()) {
                return Err(FlattenError::DuplicateTripId(trip_id));
            }
            schedule.stamp_stop_trip_ids();
            flattened.push(schedule);
        }
    }
    Ok(flattened)
}
