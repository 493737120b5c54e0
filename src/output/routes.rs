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

//! Groups trips into GTFS routes. One route per distinct
//! `(agency, mode, short name, long name, colour, text colour)` tuple; the
//! first trip contributing a tuple owns the route id. Short names and
//! colours come from the operator branding table, with the handful of
//! operators whose brand depends on the trip itself handled explicitly.

use indexmap::IndexMap;

use crate::ingest::StationIndex;
use crate::models::{RouteType, Schedule, StopTime};
use crate::output::records::{AgencyRecord, RouteRecord};

#[derive(Debug, Clone, Copy)]
pub struct OperatorBranding {
    pub code: &'static str,
    pub short: &'static str,
    pub long: Option<&'static str>,
    pub colour: Option<&'static str>,
}

pub static OPERATORS: &[OperatorBranding] = &[
    OperatorBranding { code: "AW", short: "TfW Rail", long: Some("Transport for Wales"), colour: Some("#ff0000") },
    OperatorBranding { code: "CC", short: "c2c", long: None, colour: Some("#b7007c") },
    OperatorBranding { code: "CH", short: "Chiltern Railways", long: None, colour: Some("#00bfff") },
    OperatorBranding { code: "XC", short: "CrossCountry", long: None, colour: Some("#660f21") },
    OperatorBranding { code: "GR", short: "LNER", long: Some("London North Eastern Railway"), colour: Some("#ce0e2d") },
    OperatorBranding { code: "EM", short: "EMR", long: Some("East Midlands Railway"), colour: Some("#713563") },
    OperatorBranding { code: "ES", short: "Eurostar", long: None, colour: Some("#ffd700") },
    OperatorBranding { code: "GW", short: "GWR", long: Some("Great Western Railway"), colour: Some("#0a493e") },
    OperatorBranding { code: "HT", short: "Hull Trains", long: None, colour: Some("#de005c") },
    OperatorBranding { code: "TP", short: "TPE", long: Some("TransPennine Express"), colour: Some("#09a4ec") },
    OperatorBranding { code: "GX", short: "Gatwick Express", long: None, colour: Some("#eb1e2d") },
    OperatorBranding { code: "GC", short: "Grand Central", long: None, colour: Some("#1d1d1b") },
    OperatorBranding { code: "GN", short: "Great Northern", long: None, colour: Some("#0099ff") },
    OperatorBranding { code: "LE", short: "Greater Anglia", long: None, colour: Some("#d70428") },
    OperatorBranding { code: "HX", short: "Heathrow Express", long: None, colour: Some("#532e63") },
    OperatorBranding { code: "IL", short: "Island Line", long: None, colour: Some("#1e90ff") },
    OperatorBranding { code: "LD", short: "Lumo", long: None, colour: Some("#2b6ef5") },
    OperatorBranding { code: "LM", short: "WMT", long: Some("West Midlands Trains"), colour: None },
    OperatorBranding { code: "LO", short: "Overground", long: Some("London Overground"), colour: Some("#ff7518") },
    OperatorBranding { code: "LT", short: "Underground", long: Some("London Underground"), colour: Some("#000f9f") },
    OperatorBranding { code: "ME", short: "Merseyrail", long: None, colour: Some("#fff200") },
    OperatorBranding { code: "NT", short: "Northern", long: None, colour: Some("#0f0d78") },
    OperatorBranding { code: "SR", short: "ScotRail", long: None, colour: Some("#1e467d") },
    OperatorBranding { code: "SW", short: "SWR", long: Some("South Western Railway"), colour: Some("#24398c") },
    OperatorBranding { code: "SE", short: "Southeastern", long: None, colour: Some("#389cff") },
    OperatorBranding { code: "SN", short: "Southern", long: None, colour: Some("#8cc63e") },
    OperatorBranding { code: "TL", short: "Thameslink", long: None, colour: Some("#ff5aa4") },
    OperatorBranding { code: "VT", short: "Avanti", long: Some("Avanti West Coast"), colour: Some("#004354") },
    OperatorBranding { code: "TW", short: "Metro", long: Some("Tyne & Wear Metro"), colour: None },
    OperatorBranding { code: "CS", short: "Caledonian Sleeper", long: None, colour: Some("#1d2e35") },
    OperatorBranding { code: "XR", short: "Elizabeth line", long: None, colour: Some("#9364cc") },
    OperatorBranding { code: "QC", short: "Caledonian MacBrayne", long: None, colour: None },
    OperatorBranding { code: "QS", short: "Stena Line", long: None, colour: None },
    OperatorBranding { code: "ZZ", short: "Other operator", long: None, colour: None },
];

pub fn operator(code: &str) -> Option<&'static OperatorBranding> {
    OPERATORS.iter().find(|branding| branding.code == code)
}

/// West Midlands Trains runs as two brands; a trip belongs to West Midlands
/// Railway when its long name mentions the metro area it serves.
static WEST_MIDLANDS_TOKENS: &[&str] = &[
    "Birmingham",
    "Wolverhampton",
    "Walsall",
    "Shrewsbury",
    "Worcester",
    "Hereford",
    "Stratford-upon-Avon",
];

/// The six Overground lines, each recognised by stations no other line
/// calls at.
static OVERGROUND_LINES: &[(&str, &[&str])] = &[
    ("Lioness line", &["WFJ", "HRW", "WMB", "KBN"]),
    ("Mildmay line", &["RMD", "KWG", "CMD", "HKC"]),
    ("Windrush line", &["SQE", "DLJ", "HOX", "CYP", "WCY"]),
    ("Weaver line", &["CHI", "ENF", "CHN", "SVS", "EDR"]),
    ("Suffragette line", &["UHL", "WMW", "LHS", "WNS"]),
    ("Liberty line", &["EMP", "UPM"]),
];

static MERSEYRAIL_NORTHERN: &[&str] = &["SOP", "OMS", "KIR", "HNX"];
static MERSEYRAIL_WIRRAL: &[&str] = &["WKI", "NBN", "CTR", "ELP", "BKQ"];

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct RouteKey {
    agency_id: String,
    route_type: RouteType,
    short_name: String,
    long_name: String,
    colour: Option<String>,
    text_colour: Option<String>,
}

pub struct RouteGrouper<'a> {
    stations: &'a StationIndex,
    assigned: IndexMap<RouteKey, String>,
    routes: Vec<RouteRecord>,
    next_number: u64,
}

impl<'a> RouteGrouper<'a> {
    pub fn new(stations: &'a StationIndex) -> Self {
        Self {
            stations,
            assigned: IndexMap::new(),
            routes: Vec::new(),
            next_number: 1,
        }
    }

    /// The route id of a trip, assigning a fresh one for a tuple never seen
    /// before. Rail replacement routes carry a `_BUS` suffix.
    pub fn route_id_for(&mut self, schedule: &Schedule) -> String {
        let agency_id = schedule
            .operator
            .clone()
            .unwrap_or_else(|| "ZZ".to_string());
        let long_name = self.long_name(schedule);
        let (short_name, colour) = self.branding(schedule, &long_name);
        let text_colour = text_colour_for(colour.as_deref());

        let key = RouteKey {
            agency_id: agency_id.clone(),
            route_type: schedule.route_type,
            short_name: short_name.clone(),
            long_name: long_name.clone(),
            colour: colour.clone(),
            text_colour: text_colour.clone(),
        };
        if let Some(route_id) = self.assigned.get(&key) {
            return route_id.clone();
        }

        let number = self.next_number;
        self.next_number += 1;
        let route_id = if schedule.route_type == RouteType::ReplacementBus {
            format!("{}_BUS", number)
        } else {
            number.to_string()
        };
        self.routes.push(RouteRecord {
            route_id: route_id.clone(),
            agency_id,
            route_short_name: short_name,
            route_long_name: long_name,
            route_type: schedule.route_type.gtfs_code(),
            route_color: colour,
            route_text_color: text_colour,
        });
        self.assigned.insert(key, route_id.clone());
        route_id
    }

    /// One agency row per operator that owns at least one route.
    pub fn agencies(&self) -> Vec<AgencyRecord> {
        let mut agencies: Vec<AgencyRecord> = Vec::new();
        for route in &self.routes {
            if agencies.iter().any(|agency| agency.agency_id == route.agency_id) {
                continue;
            }
            let name = operator(&route.agency_id)
                .map(|branding| branding.long.unwrap_or(branding.short).to_string())
                .unwrap_or_else(|| route.agency_id.clone());
            agencies.push(AgencyRecord {
                agency_id: route.agency_id.clone(),
                agency_name: name,
                agency_url: "https://www.nationalrail.co.uk".to_string(),
                agency_timezone: "Europe/London".to_string(),
                agency_lang: "en".to_string(),
            });
        }
        agencies
    }

    pub fn into_routes(self) -> Vec<RouteRecord> {
        self.routes
    }

    fn long_name(&self, schedule: &Schedule) -> String {
        match (schedule.origin(), schedule.destination()) {
            (Some(origin), Some(destination)) => format!(
                "{} to {}",
                self.stop_display_name(origin),
                self.stop_display_name(destination)
            ),
            _ => String::new(),
        }
    }

    fn stop_display_name(&self, stop: &StopTime) -> String {
        self.stations
            .name_of(stop)
            .map(str::to_string)
            .unwrap_or_else(|| {
                stop.crs_code
                    .clone()
                    .unwrap_or_else(|| stop.atco_code.clone())
            })
    }

    fn branding(&self, schedule: &Schedule, long_name: &str) -> (String, Option<String>) {
        let Some(code) = schedule.operator.as_deref() else {
            return (self.fallback_name(schedule), None);
        };
        let Some(branding) = operator(code) else {
            return (self.fallback_name(schedule), None);
        };
        let colour = branding.colour.map(str::to_string);
        let short = match code {
            "LM" => {
                if WEST_MIDLANDS_TOKENS
                    .iter()
                    .any(|token| long_name.contains(token))
                {
                    "WMR".to_string()
                } else {
                    "LNR".to_string()
                }
            }
            "LE" if long_name.contains("London") && long_name.contains("Stansted Airport") => {
                "Stansted Express".to_string()
            }
            "LO" => self
                .line_by_calls(schedule, OVERGROUND_LINES)
                .unwrap_or(branding.short)
                .to_string(),
            "ME" => {
                if self.calls_at_any(schedule, MERSEYRAIL_NORTHERN) {
                    "Merseyrail Northern".to_string()
                } else if self.calls_at_any(schedule, MERSEYRAIL_WIRRAL) {
                    "Merseyrail Wirral".to_string()
                } else {
                    branding.short.to_string()
                }
            }
            _ => branding.short.to_string(),
        };
        (short, colour)
    }

    /// Unknown operators are named from the retail id prefix, or the TUID.
    fn fallback_name(&self, schedule: &Schedule) -> String {
        schedule
            .rsid
            .as_deref()
            .map(|rsid| rsid.chars().take(6).collect())
            .unwrap_or_else(|| schedule.tuid.clone())
    }

    fn line_by_calls(
        &self,
        schedule: &Schedule,
        lines: &[(&'static str, &[&str])],
    ) -> Option<&'static str> {
        lines
            .iter()
            .find(|(_, stations)| self.calls_at_any(schedule, stations))
            .map(|(line, _)| *line)
    }

    fn calls_at_any(&self, schedule: &Schedule, stations: &[&str]) -> bool {
        schedule.stops.iter().any(|stop| {
            stop.crs_code
                .as_deref()
                .map_or(false, |crs| stations.contains(&crs))
        })
    }
}

/// Black text on light backgrounds, white on dark ones.
fn text_colour_for(colour: Option<&str>) -> Option<String> {
    let colour = colour?;
    let hex = colour.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let component = |range: std::ops::Range<usize>| {
        u32::from_str_radix(&hex[range], 16).unwrap_or(0) as f64
    };
    let luminance =
        0.299 * component(0..2) + 0.587 * component(2..4) + 0.114 * component(4..6);
    if luminance >= 128.0 {
        Some("#000000".to_string())
    } else {
        Some("#ffffff".to_string())
    }
}
