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

//! Applies split and join associations: for every (base, associated) schedule
//! pair the association covers, a through schedule is spliced together at the
//! junction TIPLOC and the merged days are excised from the stand-alone
//! associated schedule.

use std::sync::Arc;

use tracing::warn;

use crate::apply::OverlayIndex;
use crate::calendar::Overlap;
use crate::models::{
    Association, AssociationType, DateIndicator, FlowRule, IdGenerator, OverlayRecord, Schedule,
    StopTime,
};
use crate::time::{self, TimeError};

pub fn apply_associations(
    mut schedules: OverlayIndex<Schedule>,
    associations: &OverlayIndex<Association>,
    ids: &mut IdGenerator,
) -> Result<OverlayIndex<Schedule>, TimeError> {
    for association in associations.values().flatten() {
        if association.assoc_type == AssociationType::NA {
            continue;
        }
        let assoc_calendar = association.shifted_calendar();

        let Some(base_list) = schedules.get(&association.base_tuid).cloned() else {
            continue;
        };
        let Some(mut assoc_list) = schedules.get(&association.assoc_tuid).cloned() else {
            continue;
        };

        let mut merged_out = Vec::new();
        for base in &base_list {
            if base.calendar.overlap(&assoc_calendar) == Overlap::None {
                continue;
            }
            let mut index = 0;
            while index < assoc_list.len() {
                let assoc_schedule = &assoc_list[index];
                if assoc_schedule.calendar.overlap(&assoc_calendar) == Overlap::None {
                    index += 1;
                    continue;
                }
                match merge_schedules(association, base, assoc_schedule, ids)? {
                    None => index += 1,
                    Some(merged) => {
                        merged_out.push(merged);
                        // the through schedule now covers these days
                        match assoc_schedule.calendar.add_exclude_days(&assoc_calendar) {
                            Some(calendar) => {
                                assoc_list[index] =
                                    assoc_schedule.with_calendar(calendar, ids.next_id());
                                index += 1;
                            }
                            None => {
                                assoc_list.remove(index);
                            }
                        }
                    }
                }
            }
        }

        schedules.insert(association.assoc_tuid.clone(), assoc_list);
        for merged in merged_out {
            schedules
                .entry(merged.tuid.clone())
                .or_default()
                .push(merged);
        }
    }
    Ok(schedules)
}

fn merge_schedules(
    association: &Association,
    base: &Schedule,
    assoc: &Schedule,
    ids: &mut IdGenerator,
) -> Result<Option<Schedule>, TimeError> {
    let (Some(base_index), Some(assoc_index)) = (
        base.stop_at(&association.tiploc),
        assoc.stop_at(&association.tiploc),
    ) else {
        // corrupt feed data; the associated schedule stays as it is
        warn!(
            "Association {} at {} does not match the calls of {} / {}",
            association.id, association.tiploc, base.tuid, assoc.tuid,
        );
        return Ok(None);
    };

    let (tuid, first_part, arriving, departing, second_part) = match association.assoc_type {
        AssociationType::Split => (
            format!("{}_{}", base.tuid, assoc.tuid),
            base.before(base_index),
            &base.stops[base_index],
            &assoc.stops[assoc_index],
            assoc.after(assoc_index),
        ),
        AssociationType::Join => (
            format!("{}_{}", assoc.tuid, base.tuid),
            assoc.before(assoc_index),
            &assoc.stops[assoc_index],
            &base.stops[base_index],
            base.after(base_index),
        ),
        AssociationType::NA => return Ok(None),
    };

    let association_calendar = match association.date_indicator {
        DateIndicator::Previous => association.calendar.shift_backward(),
        _ => association.calendar.clone(),
    };
    let Some(calendar) = association_calendar.intersect(&assoc.calendar) else {
        return Ok(None);
    };

    // The junction call: arrive with the first portion, depart with the
    // second. An arrival past the departure means the clock wrapped between
    // the two portions.
    let mut arrival_time = arriving.arrival_time.clone();
    let mut departure_time = departing.departure_time.clone();
    if let (Some(arrival), Some(departure)) = (arrival_time.as_deref(), departure_time.as_deref())
    {
        if time::seconds_of(arrival)? > time::seconds_of(departure)? {
            if association.date_indicator == DateIndicator::Next {
                departure_time = Some(time::add_24h(departure)?);
            } else {
                arrival_time = departing.arrival_time.clone();
            }
        }
    }

    let mut pickup_type = departing.pickup_type;
    let mut drop_off_type = arriving.drop_off_type;
    match association.assoc_type {
        AssociationType::Join => pickup_type = FlowRule::NotAllowed,
        AssociationType::Split => drop_off_type = FlowRule::NotAllowed,
        AssociationType::NA => {}
    }
    let merge_stop = StopTime {
        trip_id: String::new(),
        arrival_time,
        departure_time,
        atco_code: departing.atco_code.clone(),
        crs_code: departing.crs_code.clone(),
        tiploc_code: departing.tiploc_code.clone(),
        stop_sequence: 0,
        headsign: None,
        pickup_type,
        drop_off_type,
        timepoint: departing.timepoint,
        platform: departing.platform.clone(),
    };

    // Calls after the junction happen on the other side of the service-day
    // boundary for a next-day split or a previous-day join.
    let advance_tail = matches!(
        (association.assoc_type, association.date_indicator),
        (AssociationType::Split, DateIndicator::Next)
            | (AssociationType::Join, DateIndicator::Previous)
    );

    let mut stops = Vec::with_capacity(first_part.len() + second_part.len() + 1);
    stops.extend_from_slice(first_part);
    stops.push(merge_stop);
    for stop in second_part {
        let mut stop = stop.clone();
        if advance_tail {
            stop.arrival_time = stop
                .arrival_time
                .as_deref()
                .map(time::add_24h)
                .transpose()?;
            stop.departure_time = stop
                .departure_time
                .as_deref()
                .map(time::add_24h)
                .transpose()?;
        }
        stops.push(stop);
    }
    for (index, stop) in stops.iter_mut().enumerate() {
        stop.stop_sequence = index as u32 + 1;
    }

    let mut merged = Schedule {
        id: ids.next_id(),
        tuid,
        rsid: assoc.rsid.clone(),
        stp: assoc.stp,
        calendar,
        stops: Arc::new(stops),
        route_type: assoc.route_type,
        operator: assoc.operator.clone(),
        first_class: assoc.first_class,
        reservable: assoc.reservable,
    };
    merged.stamp_stop_trip_ids();
    Ok(Some(merged))
}
