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

mod utils;

use anyhow::Error;

use cif2gtfs::ingest::ScheduleBuilder;
use cif2gtfs::models::{FlowRule, RouteType, Stp};
use utils::{init, schedule_row};

const EUSTON: (&str, &str, &str) = ("9100EUSTON", "EUS", "EUSTON");
const CREWE: (&str, &str, &str) = ("9100CREWE", "CRE", "CREWE");
const WIGAN: (&str, &str, &str) = ("9100WIGANNW", "WGN", "WIGANNW");

#[test]
fn rollover_pushes_times_past_midnight() -> Result<(), Error> {
    init();
    let rows = vec![
        schedule_row(1, "C10001", 1, EUSTON, None, Some("23:30")),
        schedule_row(1, "C10001", 2, CREWE, Some("00:30"), None),
    ];

    let built = ScheduleBuilder::default().build(rows.into_iter().map(Ok))?;
    assert_eq!(built.schedules.len(), 1);
    let stops = &built.schedules[0].stops;
    assert_eq!(stops[0].departure_time.as_deref(), Some("23:30:00"));
    assert_eq!(stops[1].arrival_time.as_deref(), Some("24:30:00"));
    Ok(())
}

#[test]
fn early_morning_schedules_do_not_roll_over() -> Result<(), Error> {
    init();
    let rows = vec![
        schedule_row(1, "C10001", 1, EUSTON, None, Some("00:30")),
        schedule_row(1, "C10001", 2, CREWE, Some("02:10"), None),
    ];

    let built = ScheduleBuilder::default().build(rows.into_iter().map(Ok))?;
    let stops = &built.schedules[0].stops;
    assert_eq!(stops[0].departure_time.as_deref(), Some("00:30:00"));
    assert_eq!(stops[1].arrival_time.as_deref(), Some("02:10:00"));
    Ok(())
}

#[test]
fn a_new_schedule_id_closes_the_previous_schedule() -> Result<(), Error> {
    init();
    let rows = vec![
        schedule_row(1, "C10001", 1, EUSTON, None, Some("10:00")),
        schedule_row(1, "C10001", 2, CREWE, Some("11:30"), None),
        schedule_row(2, "C10002", 3, EUSTON, None, Some("12:00")),
        schedule_row(2, "C10002", 4, WIGAN, Some("14:00"), None),
    ];

    let built = ScheduleBuilder::default().build(rows.into_iter().map(Ok))?;
    assert_eq!(built.schedules.len(), 2);
    assert_eq!(built.schedules[0].tuid, "C10001");
    assert_eq!(built.schedules[1].tuid, "C10002");
    // sequences are 1-based and contiguous per schedule
    for schedule in &built.schedules {
        for (index, stop) in schedule.stops.iter().enumerate() {
            assert_eq!(stop.stop_sequence, index as u32 + 1);
        }
    }
    Ok(())
}

#[test]
fn cancellations_have_no_stops() -> Result<(), Error> {
    init();
    let mut row = schedule_row(1, "C10001", 1, EUSTON, None, Some("10:00"));
    row.stp_indicator = "C".to_string();
    let built = ScheduleBuilder::default().build(vec![row].into_iter().map(Ok))?;

    assert_eq!(built.schedules.len(), 1);
    assert_eq!(built.schedules[0].stp, Stp::Cancellation);
    assert!(built.schedules[0].stops.is_empty());
    Ok(())
}

#[test]
fn activity_codes_drive_pickup_and_drop_off() -> Result<(), Error> {
    init();
    let mut set_down = schedule_row(1, "C10001", 1, EUSTON, None, Some("10:00"));
    set_down.activity = Some("D ".to_string());
    let mut request = schedule_row(1, "C10001", 2, CREWE, Some("11:00"), Some("11:01"));
    request.activity = Some("T R".to_string());
    let mut hidden = schedule_row(1, "C10001", 3, WIGAN, Some("12:00"), None);
    hidden.activity = Some("N ".to_string());

    let built = ScheduleBuilder::default()
        .build(vec![set_down, request, hidden].into_iter().map(Ok))?;
    let stops = &built.schedules[0].stops;

    assert_eq!(stops[0].pickup_type, FlowRule::NotAllowed);
    assert_eq!(stops[0].drop_off_type, FlowRule::Regular);

    assert_eq!(stops[1].pickup_type, FlowRule::Coordinated);
    assert_eq!(stops[1].drop_off_type, FlowRule::Coordinated);

    // not advertised: untimed and closed in both directions
    assert!(stops[2].arrival_time.is_none());
    assert!(stops[2].departure_time.is_none());
    assert_eq!(stops[2].pickup_type, FlowRule::NotAllowed);
    assert_eq!(stops[2].drop_off_type, FlowRule::NotAllowed);
    Ok(())
}

#[test]
fn second_call_at_the_same_station_replaces_the_first() -> Result<(), Error> {
    init();
    let mut closed = schedule_row(1, "C10001", 1, CREWE, Some("10:00"), None);
    closed.activity = Some("N ".to_string());
    let open = schedule_row(1, "C10001", 2, CREWE, Some("10:05"), Some("10:06"));

    let built = ScheduleBuilder::default()
        .build(vec![closed, open].into_iter().map(Ok))?;
    let stops = &built.schedules[0].stops;
    assert_eq!(stops.len(), 1);
    assert_eq!(stops[0].stop_sequence, 1);
    assert_eq!(stops[0].arrival_time.as_deref(), Some("10:05:00"));
    Ok(())
}

#[test]
fn second_closed_call_at_the_same_station_is_dropped() -> Result<(), Error> {
    init();
    let open = schedule_row(1, "C10001", 1, CREWE, Some("10:00"), Some("10:01"));
    let mut closed = schedule_row(1, "C10001", 2, CREWE, Some("10:05"), None);
    closed.activity = Some("N ".to_string());

    let built = ScheduleBuilder::default()
        .build(vec![open, closed].into_iter().map(Ok))?;
    let stops = &built.schedules[0].stops;
    assert_eq!(stops.len(), 1);
    assert_eq!(stops[0].arrival_time.as_deref(), Some("10:00:00"));
    Ok(())
}

#[test]
fn scheduled_times_are_used_only_behind_the_flag() -> Result<(), Error> {
    init();
    let mut row = schedule_row(1, "C10001", 1, EUSTON, None, None);
    row.scheduled_departure_time = Some("10:00".to_string());

    let untimed = ScheduleBuilder::default().build(vec![row.clone()].into_iter().map(Ok))?;
    assert!(untimed.schedules[0].stops[0].departure_time.is_none());

    let builder = ScheduleBuilder {
        use_scheduled_when_no_public: true,
    };
    let timed = builder.build(vec![row].into_iter().map(Ok))?;
    let stop = &timed.schedules[0].stops[0];
    assert_eq!(stop.departure_time.as_deref(), Some("10:00:00"));
    assert!(!stop.timepoint);
    Ok(())
}

#[test]
fn train_category_drives_the_route_type() -> Result<(), Error> {
    init();
    let mut replacement = schedule_row(1, "C10001", 1, EUSTON, None, Some("10:00"));
    replacement.train_category = Some("BR".to_string());
    let mut unknown = schedule_row(2, "C10002", 2, EUSTON, None, Some("11:00"));
    unknown.train_category = Some("??".to_string());

    let built = ScheduleBuilder::default()
        .build(vec![replacement, unknown].into_iter().map(Ok))?;
    assert_eq!(built.schedules[0].route_type, RouteType::ReplacementBus);
    assert_eq!(built.schedules[1].route_type, RouteType::Rail);
    Ok(())
}

#[test]
fn first_class_and_reservation_flags() -> Result<(), Error> {
    init();
    let mut standard_only = schedule_row(1, "C10001", 1, EUSTON, None, Some("10:00"));
    standard_only.train_class = Some("S".to_string());
    let mut reservable = schedule_row(2, "C10002", 2, EUSTON, None, Some("11:00"));
    reservable.reservations = Some("A".to_string());

    let built = ScheduleBuilder::default()
        .build(vec![standard_only, reservable].into_iter().map(Ok))?;
    assert!(!built.schedules[0].first_class);
    assert!(!built.schedules[0].reservable);
    assert!(built.schedules[1].first_class);
    assert!(built.schedules[1].reservable);
    Ok(())
}

#[test]
fn the_id_generator_continues_after_the_largest_id() -> Result<(), Error> {
    init();
    let rows = vec![
        schedule_row(7, "C10001", 1, EUSTON, None, Some("10:00")),
        schedule_row(42, "C10002", 2, EUSTON, None, Some("11:00")),
    ];
    let mut built = ScheduleBuilder::default().build(rows.into_iter().map(Ok))?;
    assert_eq!(built.ids.next_id(), 43);
    assert_eq!(built.ids.next_id(), 44);
    Ok(())
}

#[test]
fn a_stream_error_aborts_the_fold() {
    init();
    let rows: Vec<Result<_, cif2gtfs::ingest::IngestError>> = vec![
        Ok(schedule_row(1, "C10001", 1, EUSTON, None, Some("10:00"))),
        Err(cif2gtfs::ingest::IngestError::Source("boom".to_string())),
    ];
    assert!(ScheduleBuilder::default().build(rows).is_err());
}

#[test]
fn malformed_times_are_fatal() {
    init();
    let row = schedule_row(1, "C10001", 1, EUSTON, None, Some("7:00"));
    assert!(ScheduleBuilder::default()
        .build(vec![row].into_iter().map(Ok))
        .is_err());
}
