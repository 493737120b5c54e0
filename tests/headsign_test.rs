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

use cif2gtfs::calendar::ALL_DAYS;
use cif2gtfs::headsign::{
    HeadsignInference, HeadsignTemplate, RulePattern, TopologyRule, ViaEntry, ViaTable,
};
use cif2gtfs::ingest::StationIndex;
use utils::{calendar, init, schedule, station, stop};

const WATERLOO: (&str, &str, &str) = ("9100WATRLMN", "WAT", "WATRLMN");
const KINGSTON: (&str, &str, &str) = ("9100KNGSTON", "KNG", "KNGSTON");
const KINGS_CROSS: (&str, &str, &str) = ("9100KINGX", "KGX", "KINGX");
const DONCASTER: (&str, &str, &str) = ("9100DONC", "DON", "DONC");
const LEEDS: (&str, &str, &str) = ("9100LEEDS", "LDS", "LEEDS");

fn stations() -> StationIndex {
    StationIndex::new(vec![
        station("9100WATRLMN", "WAT", "WATRLMN", "London Waterloo", None),
        station("9100KNGSTON", "KNG", "KNGSTON", "Kingston", None),
        station("9100KINGX", "KGX", "KINGX", "London Kings Cross", None),
        station("9100DONC", "DON", "DONC", "Doncaster", None),
        station("9100LEEDS", "LDS", "LEEDS", "Leeds", None),
    ])
}

#[test]
fn a_loop_service_gets_a_false_destination_until_the_loop() {
    init();
    let stations = stations();
    let via_table = ViaTable::empty();
    let inference = HeadsignInference::new(&stations, &via_table);

    let mut roundabout = schedule(
        1,
        "C10001",
        calendar("2017-01-02", "2017-01-06", ALL_DAYS),
        vec![
            stop(WATERLOO, None, Some("10:00:00")),
            stop(KINGSTON, Some("10:25:00"), Some("10:26:00")),
            stop(WATERLOO, Some("11:00:00"), None),
        ],
    );
    roundabout.operator = Some("SW".to_string());
    inference.apply(&mut roundabout);

    // advertised as a Kingston service until Kingston is reached
    assert_eq!(roundabout.stops[0].headsign.as_deref(), Some("Kingston"));
    assert_eq!(roundabout.stops[1].headsign, None);
    assert_eq!(roundabout.stops[2].headsign, None);
}

#[test]
fn rules_only_apply_to_their_operator() {
    init();
    let stations = stations();
    let via_table = ViaTable::empty();
    let inference = HeadsignInference::new(&stations, &via_table);

    let mut roundabout = schedule(
        1,
        "C10001",
        calendar("2017-01-02", "2017-01-06", ALL_DAYS),
        vec![
            stop(WATERLOO, None, Some("10:00:00")),
            stop(KINGSTON, Some("10:25:00"), Some("10:26:00")),
            stop(WATERLOO, Some("11:00:00"), None),
        ],
    );
    roundabout.operator = Some("SE".to_string());
    inference.apply(&mut roundabout);
    assert_eq!(roundabout.stops[0].headsign, None);
}

#[test]
fn the_via_table_refines_the_destination() {
    init();
    let stations = stations();
    let via_table = ViaTable::builtin();
    let inference = HeadsignInference::new(&stations, &via_table);

    let mut east_coast = schedule(
        1,
        "C20001",
        calendar("2017-01-02", "2017-01-06", ALL_DAYS),
        vec![
            stop(KINGS_CROSS, None, Some("10:00:00")),
            stop(DONCASTER, Some("11:30:00"), Some("11:31:00")),
            stop(LEEDS, Some("12:10:00"), None),
        ],
    );
    east_coast.operator = Some("GR".to_string());
    inference.apply(&mut east_coast);

    assert_eq!(
        east_coast.stops[0].headsign.as_deref(),
        Some("Leeds (via Doncaster)")
    );
    // Doncaster itself has nothing left to disambiguate
    assert_eq!(east_coast.stops[1].headsign, None);
}

#[test]
fn the_earliest_first_location_wins() {
    init();
    let stations = stations();
    let via_table = ViaTable::from_entries(vec![
        ViaEntry {
            at: "KGX".to_string(),
            dest: "LEEDS".to_string(),
            loc1: "LEEDS2".to_string(),
            loc2: None,
            text: "via the later call".to_string(),
        },
        ViaEntry {
            at: "KGX".to_string(),
            dest: "LEEDS".to_string(),
            loc1: "DONC".to_string(),
            loc2: None,
            text: "via the earlier call".to_string(),
        },
    ]);
    let inference = HeadsignInference::new(&stations, &via_table);

    let mut east_coast = schedule(
        1,
        "C20001",
        calendar("2017-01-02", "2017-01-06", ALL_DAYS),
        vec![
            stop(KINGS_CROSS, None, Some("10:00:00")),
            stop(DONCASTER, Some("11:30:00"), Some("11:31:00")),
            stop(("9100LEEDS2", "LD2", "LEEDS2"), Some("11:50:00"), Some("11:51:00")),
            stop(LEEDS, Some("12:10:00"), None),
        ],
    );
    inference.apply(&mut east_coast);
    assert_eq!(
        east_coast.stops[0].headsign.as_deref(),
        Some("Leeds (via the earlier call)")
    );
}

#[test]
fn the_second_location_must_follow_the_first() {
    init();
    let stations = stations();
    let via_table = ViaTable::from_entries(vec![ViaEntry {
        at: "KGX".to_string(),
        dest: "LEEDS".to_string(),
        loc1: "LEEDS2".to_string(),
        loc2: Some("DONC".to_string()),
        text: "never matches".to_string(),
    }]);
    let inference = HeadsignInference::new(&stations, &via_table);

    let mut east_coast = schedule(
        1,
        "C20001",
        calendar("2017-01-02", "2017-01-06", ALL_DAYS),
        vec![
            stop(KINGS_CROSS, None, Some("10:00:00")),
            stop(DONCASTER, Some("11:30:00"), Some("11:31:00")),
            stop(("9100LEEDS2", "LD2", "LEEDS2"), Some("11:50:00"), Some("11:51:00")),
            stop(LEEDS, Some("12:10:00"), None),
        ],
    );
    inference.apply(&mut east_coast);
    assert_eq!(east_coast.stops[0].headsign, None);
}

#[test]
fn a_rule_whose_stop_is_missing_falls_through() {
    init();
    let stations = stations();
    let via_table = ViaTable::empty();
    static RULES: &[TopologyRule] = &[
        TopologyRule {
            operator: Some("SW"),
            pattern: RulePattern::TerminatesVia {
                dest: "WAT",
                via: "KNG",
            },
            template: HeadsignTemplate::FalseDestination {
                name: "Nowhere",
                at: "XXX",
            },
        },
        TopologyRule {
            operator: Some("SW"),
            pattern: RulePattern::TerminatesVia {
                dest: "WAT",
                via: "KNG",
            },
            template: HeadsignTemplate::DestinationVia { place: "Kingston" },
        },
    ];
    let inference = HeadsignInference::with_rules(&stations, RULES, &via_table);

    let mut roundabout = schedule(
        1,
        "C10001",
        calendar("2017-01-02", "2017-01-06", ALL_DAYS),
        vec![
            stop(WATERLOO, None, Some("10:00:00")),
            stop(KINGSTON, Some("10:25:00"), Some("10:26:00")),
            stop(WATERLOO, Some("11:00:00"), None),
        ],
    );
    roundabout.operator = Some("SW".to_string());
    inference.apply(&mut roundabout);
    assert_eq!(
        roundabout.stops[0].headsign.as_deref(),
        Some("London Waterloo (via Kingston)")
    );
}
