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

//! Folds the flat stop-time row stream into schedules, one pass, no
//! backtracking. Rows of one schedule are contiguous; a change of id closes
//! the current schedule and opens the next.

use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::debug;

use crate::calendar::ScheduleCalendar;
use crate::ingest::rows::ScheduleRow;
use crate::ingest::IngestError;
use crate::models::{FlowRule, IdGenerator, RouteType, Schedule, StopTime, Stp};
use crate::time;

const PICKUP_ACTIVITIES: [&str; 3] = ["T ", "TB", "U "];
const DROP_OFF_ACTIVITIES: [&str; 3] = ["T ", "TF", "D "];
const REQUEST_STOP: &str = "R ";
const NOT_ADVERTISED: &str = "N ";

#[derive(Debug, Default)]
pub struct ScheduleBuilder {
    /// When neither public time is set, fall back to the scheduled (working
    /// timetable) times instead of leaving the call untimed.
    pub use_scheduled_when_no_public: bool,
}

pub struct BuiltSchedules {
    pub schedules: Vec<Schedule>,
    /// Yields ids above everything seen in the stream, for downstream clones.
    pub ids: IdGenerator,
}

impl ScheduleBuilder {
    pub fn build<I>(&self, rows: I) -> Result<BuiltSchedules, IngestError>
    where
        I: IntoIterator<Item = Result<ScheduleRow, IngestError>>,
    {
        let mut schedules = Vec::new();
        let mut max_id: u64 = 0;
        let mut state: Option<FoldState> = None;

        for row in rows {
            let row = row?;
            max_id = max_id.max(row.id);
            let same_schedule = matches!(&state, Some(fold) if fold.first.id == row.id);
            if same_schedule {
                if let Some(fold) = state.as_mut() {
                    fold.push(&row, self.use_scheduled_when_no_public)?;
                }
            } else {
                if let Some(fold) = state.take() {
                    schedules.push(fold.finish());
                }
                let mut fold = FoldState::open(row)?;
                let first = fold.first.clone();
                fold.push(&first, self.use_scheduled_when_no_public)?;
                state = Some(fold);
            }
        }
        if let Some(fold) = state.take() {
            schedules.push(fold.finish());
        }

        debug!("Built {} schedules from the row stream", schedules.len());
        Ok(BuiltSchedules {
            schedules,
            ids: IdGenerator::after(max_id),
        })
    }
}

struct FoldState {
    first: ScheduleRow,
    stp: Stp,
    stops: Vec<StopTime>,
    departure_hour: u32,
}

impl FoldState {
    fn open(row: ScheduleRow) -> Result<Self, IngestError> {
        let stp = Stp::from_indicator(&row.stp_indicator).ok_or_else(|| {
            IngestError::BadStpIndicator {
                record_id: row.id,
                indicator: row.stp_indicator.clone(),
            }
        })?;
        let departure_hour = match row
            .public_arrival_time
            .as_deref()
            .or(row.public_departure_time.as_deref())
        {
            Some(text) => time::hour_of(text)?,
            None => time::EARLY_MORNING_HOUR,
        };
        Ok(Self {
            first: row,
            stp,
            stops: Vec::new(),
            departure_hour,
        })
    }

    fn push(&mut self, row: &ScheduleRow, use_scheduled: bool) -> Result<(), IngestError> {
        // a cancellation is represented by its STP entry alone
        if self.stp == Stp::Cancellation {
            return Ok(());
        }

        let codes = activity_codes(row.activity.as_deref());
        let not_advertised = codes.iter().any(|code| code == NOT_ADVERTISED);
        let request_stop = codes.iter().any(|code| code == REQUEST_STOP);

        let mut pickup_type = if !not_advertised
            && codes
                .iter()
                .any(|code| PICKUP_ACTIVITIES.contains(&code.as_str()))
        {
            FlowRule::Regular
        } else {
            FlowRule::NotAllowed
        };
        let mut drop_off_type = if !not_advertised
            && codes
                .iter()
                .any(|code| DROP_OFF_ACTIVITIES.contains(&code.as_str()))
        {
            FlowRule::Regular
        } else {
            FlowRule::NotAllowed
        };
        if request_stop {
            pickup_type = FlowRule::Coordinated;
            drop_off_type = FlowRule::Coordinated;
        }

        let has_public =
            row.public_arrival_time.is_some() || row.public_departure_time.is_some();
        let (arrival, departure, timepoint) = if not_advertised {
            (None, None, false)
        } else if has_public {
            (
                row.public_arrival_time.as_deref(),
                row.public_departure_time.as_deref(),
                true,
            )
        } else if use_scheduled {
            (
                row.scheduled_arrival_time.as_deref(),
                row.scheduled_departure_time.as_deref(),
                false,
            )
        } else {
            (None, None, false)
        };

        let arrival_time = arrival
            .map(|text| time::normalise(text, self.departure_hour))
            .transpose()?;
        let departure_time = departure
            .map(|text| time::normalise(text, self.departure_hour))
            .transpose()?;

        let stop = StopTime {
            trip_id: String::new(), // stamped once the calendar is known
            arrival_time,
            departure_time,
            atco_code: row.atco_code.clone(),
            crs_code: row.crs_code.clone(),
            tiploc_code: row.tiploc_code.clone(),
            stop_sequence: self.stops.len() as u32 + 1,
            headsign: None,
            pickup_type,
            drop_off_type,
            timepoint,
            platform: row.platform.clone(),
        };

        // A second row at the same station refines the previous call, but
        // only when it actually lets passengers on or off.
        if let Some(previous) = self.stops.last_mut() {
            if previous.crs_code.is_some() && previous.crs_code == stop.crs_code {
                if stop.pickup_type.allows() || stop.drop_off_type.allows() {
                    let stop_sequence = previous.stop_sequence;
                    *previous = StopTime {
                        stop_sequence,
                        ..stop
                    };
                }
                return Ok(());
            }
        }

        self.stops.push(stop);
        Ok(())
    }

    fn finish(self) -> Schedule {
        let row = &self.first;
        let calendar =
            ScheduleCalendar::new(row.runs_from, row.runs_to, row.days(), BTreeSet::new());
        let route_type = RouteType::from_category(row.train_category.as_deref());
        let mut schedule = Schedule {
            id: row.id,
            tuid: row.train_uid.clone(),
            rsid: row.retail_train_id.clone(),
            stp: self.stp,
            calendar,
            stops: Arc::new(self.stops),
            route_type,
            operator: row.atoc_code.clone(),
            first_class: route_type == RouteType::Rail
                && row.train_class.as_deref() != Some("S"),
            reservable: row.reservations.is_some(),
        };
        schedule.stamp_stop_trip_ids();
        schedule
    }
}

/// Splits the CIF activity field into its two-character codes; a trailing
/// single character is padded back to width two.
fn activity_codes(activity: Option<&str>) -> Vec<String> {
    let Some(activity) = activity else {
        return Vec::new();
    };
    let chars: Vec<char> = activity.chars().collect();
    chars
        .chunks(2)
        .map(|chunk| {
            let mut code: String = chunk.iter().collect();
            if code.len() == 1 {
                code.push(' ');
            }
            code
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::activity_codes;

    #[test]
    fn splits_activity_field() {
        assert_eq!(activity_codes(Some("TBRM")), vec!["TB", "RM"]);
        assert_eq!(activity_codes(Some("T")), vec!["T "]);
        assert!(activity_codes(None).is_empty());
    }
}
