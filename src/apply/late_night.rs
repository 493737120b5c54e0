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

use crate::models::{IdGenerator, OverlayRecord, Schedule};
use crate::time::{self, TimeError};

/// A schedule whose first departure rolled past midnight (hour 24+) is also
/// visible one calendar day earlier. This returns the extra copies: calendar
/// shifted backward, times pulled back under 24 hours, fresh ids.
pub fn duplicate_late_night(
    schedules: &[Schedule],
    ids: &mut IdGenerator,
) -> Result<Vec<Schedule>, TimeError> {
    let mut extras = Vec::new();
    for schedule in schedules {
        let Some(departure) = schedule
            .origin()
            .and_then(|stop| stop.departure_time.as_deref())
        else {
            continue;
        };
        if time::hour_of(departure)? < 24 {
            continue;
        }

        let mut copy =
            schedule.with_calendar(schedule.calendar.shift_backward(), ids.next_id());
        let trip_id = copy.trip_id();
        let stops = Arc::make_mut(&mut copy.stops);
        for stop in stops.iter_mut() {
            stop.trip_id = trip_id.clone();
            stop.arrival_time = pull_back(stop.arrival_time.take())?;
            stop.departure_time = pull_back(stop.departure_time.take())?;
        }
        extras.push(copy);
    }
    Ok(extras)
}

// Times before the boundary (a 23:xx arrival ahead of a 24:xx departure)
// already name the earlier day and stay put.
fn pull_back(text: Option<String>) -> Result<Option<String>, TimeError> {
    match text {
        Some(text) if time::hour_of(&text)? >= 24 => Ok(Some(time::sub_24h(&text)?)),
        other => Ok(other),
    }
}
