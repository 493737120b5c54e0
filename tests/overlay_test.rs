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

use cif2gtfs::apply::resolve_overlays;
use cif2gtfs::calendar::{Overlap, ALL_DAYS};
use cif2gtfs::models::{OverlayRecord, Stp};
use utils::{calendar, date, init, schedule, stop};

const STOPS: [(&str, &str, &str); 2] = [
    ("9100EUSTON", "EUS", "EUSTON"),
    ("9100CREWE", "CRE", "CREWE"),
];

fn plain_stops() -> Vec<cif2gtfs::models::StopTime> {
    vec![
        stop(STOPS[0], None, Some("10:00:00")),
        stop(STOPS[1], Some("11:30:00"), None),
    ]
}

#[test]
fn an_overlay_excises_days_from_its_permanent_record() {
    init();
    let permanent = schedule(
        1,
        "C10001",
        calendar("2017-01-01", "2017-01-31", ALL_DAYS),
        plain_stops(),
    );
    let mut overlay = schedule(
        2,
        "C10001",
        calendar("2017-01-09", "2017-01-13", ALL_DAYS),
        plain_stops(),
    );
    overlay.stp = Stp::Overlay;

    let index = resolve_overlays(vec![permanent, overlay]);
    let records = &index["C10001"];
    assert_eq!(records.len(), 2);

    // the permanent record no longer runs on the overlaid days
    let base = &records[0];
    assert!(!base.calendar.runs_on(date("2017-01-10")));
    assert!(base.calendar.runs_on(date("2017-01-02")));

    // resolved records never overlap pairwise
    for (lhs_index, lhs) in records.iter().enumerate() {
        for rhs in records.iter().skip(lhs_index + 1) {
            assert_eq!(lhs.calendar.overlap(&rhs.calendar), Overlap::None);
        }
    }
}

#[test]
fn a_cancellation_removes_days_without_adding_a_record() {
    init();
    let permanent = schedule(
        1,
        "C10001",
        calendar("2017-01-01", "2017-01-31", ALL_DAYS),
        plain_stops(),
    );
    let mut cancellation = schedule(
        2,
        "C10001",
        calendar("2017-01-09", "2017-01-13", ALL_DAYS),
        Vec::new(),
    );
    cancellation.stp = Stp::Cancellation;

    let index = resolve_overlays(vec![permanent, cancellation]);
    let records = &index["C10001"];
    assert_eq!(records.len(), 1);
    assert!(!records[0].calendar.runs_on(date("2017-01-11")));
    assert!(records[0].calendar.runs_on(date("2017-01-16")));
}

#[test]
fn a_fully_covered_base_is_dropped() {
    init();
    let permanent = schedule(
        1,
        "C10001",
        calendar("2017-01-09", "2017-01-13", ALL_DAYS),
        plain_stops(),
    );
    let mut cancellation = schedule(
        2,
        "C10001",
        calendar("2017-01-01", "2017-01-31", ALL_DAYS),
        Vec::new(),
    );
    cancellation.stp = Stp::Cancellation;

    let index = resolve_overlays(vec![permanent, cancellation]);
    assert!(index["C10001"].is_empty());
}

#[test]
fn disjoint_records_are_left_alone() {
    init();
    let permanent = schedule(
        1,
        "C10001",
        calendar("2017-01-01", "2017-01-07", ALL_DAYS),
        plain_stops(),
    );
    let mut overlay = schedule(
        2,
        "C10001",
        calendar("2017-02-01", "2017-02-07", ALL_DAYS),
        plain_stops(),
    );
    overlay.stp = Stp::Overlay;

    let index = resolve_overlays(vec![permanent, overlay]);
    let records = &index["C10001"];
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].calendar.runs_from(), date("2017-01-01"));
    assert_eq!(records[0].calendar.runs_to(), date("2017-01-07"));
}

#[test]
fn a_new_record_only_adds_itself() {
    init();
    let mut new_record = schedule(
        1,
        "C10009",
        calendar("2017-01-01", "2017-01-07", ALL_DAYS),
        plain_stops(),
    );
    new_record.stp = Stp::New;

    let index = resolve_overlays(vec![new_record]);
    assert_eq!(index["C10009"].len(), 1);
    assert_eq!(index["C10009"][0].stp(), Stp::New);
}

#[test]
fn tuids_keep_their_insertion_order() {
    init();
    let first = schedule(
        1,
        "C20002",
        calendar("2017-01-01", "2017-01-07", ALL_DAYS),
        plain_stops(),
    );
    let second = schedule(
        2,
        "C10001",
        calendar("2017-01-01", "2017-01-07", ALL_DAYS),
        plain_stops(),
    );

    let index = resolve_overlays(vec![first, second]);
    let keys: Vec<&String> = index.keys().collect();
    assert_eq!(keys, vec!["C20002", "C10001"]);
}
