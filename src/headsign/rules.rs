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

//! The topology rule table. Rules are data so the set can evolve without
//! touching the engine: a rule names the operator it belongs to, the calling
//! pattern that must hold from the current stop, and the headsign text to
//! produce. Order matters, the first match wins.

/// Calling pattern evaluated from the stop after the current one.
#[derive(Debug, Clone, Copy)]
pub enum RulePattern {
    /// The schedule terminates at `dest` and still has a call at `via` ahead.
    TerminatesVia {
        dest: &'static str,
        via: &'static str,
    },
    /// A call at `first` ahead, followed by a later call at `then`.
    CallsInOrder {
        first: &'static str,
        then: &'static str,
    },
}

#[derive(Debug, Clone, Copy)]
pub enum HeadsignTemplate {
    /// Advertise the call at `at` as the terminus.
    FalseDestination {
        name: &'static str,
        at: &'static str,
    },
    /// `"<Destination> (via <place>)"`.
    DestinationVia { place: &'static str },
    /// `"<name> (via <place>)"`, with the call at `at` as the terminus.
    FalseDestinationVia {
        name: &'static str,
        at: &'static str,
        place: &'static str,
    },
}

#[derive(Debug, Clone, Copy)]
pub struct TopologyRule {
    /// `None` applies to every operator.
    pub operator: Option<&'static str>,
    pub pattern: RulePattern,
    pub template: HeadsignTemplate,
}

pub static TOPOLOGY_RULES: &[TopologyRule] = &[
    // South Western Railway: the Kingston and Hounslow roundabouts return to
    // Waterloo, so the outward leg is advertised on the loop itself.
    TopologyRule {
        operator: Some("SW"),
        pattern: RulePattern::TerminatesVia {
            dest: "WAT",
            via: "KNG",
        },
        template: HeadsignTemplate::FalseDestination {
            name: "Kingston",
            at: "KNG",
        },
    },
    TopologyRule {
        operator: Some("SW"),
        pattern: RulePattern::TerminatesVia {
            dest: "WAT",
            via: "HOU",
        },
        template: HeadsignTemplate::FalseDestination {
            name: "Hounslow",
            at: "HOU",
        },
    },
    TopologyRule {
        operator: Some("SW"),
        pattern: RulePattern::TerminatesVia {
            dest: "GLD",
            via: "CSD",
        },
        template: HeadsignTemplate::DestinationVia { place: "Cobham" },
    },
    TopologyRule {
        operator: Some("SW"),
        pattern: RulePattern::TerminatesVia {
            dest: "PMH",
            via: "ESL",
        },
        template: HeadsignTemplate::DestinationVia { place: "Eastleigh" },
    },
    TopologyRule {
        operator: Some("SW"),
        pattern: RulePattern::TerminatesVia {
            dest: "PMH",
            via: "GLD",
        },
        template: HeadsignTemplate::DestinationVia { place: "Guildford" },
    },
    // Southeastern: three routes into Dartford, plus the Kent Coast fork.
    TopologyRule {
        operator: Some("SE"),
        pattern: RulePattern::TerminatesVia {
            dest: "DFD",
            via: "WWA",
        },
        template: HeadsignTemplate::DestinationVia { place: "Woolwich" },
    },
    TopologyRule {
        operator: Some("SE"),
        pattern: RulePattern::TerminatesVia {
            dest: "DFD",
            via: "BXH",
        },
        template: HeadsignTemplate::DestinationVia {
            place: "Bexleyheath",
        },
    },
    TopologyRule {
        operator: Some("SE"),
        pattern: RulePattern::TerminatesVia {
            dest: "DFD",
            via: "SID",
        },
        template: HeadsignTemplate::DestinationVia { place: "Sidcup" },
    },
    TopologyRule {
        operator: Some("SE"),
        pattern: RulePattern::TerminatesVia {
            dest: "RAM",
            via: "CTM",
        },
        template: HeadsignTemplate::DestinationVia { place: "Chatham" },
    },
    TopologyRule {
        operator: Some("SE"),
        pattern: RulePattern::TerminatesVia {
            dest: "RAM",
            via: "AFK",
        },
        template: HeadsignTemplate::DestinationVia { place: "Ashford" },
    },
    // London Overground: the Clapham Junction and Highbury orbital legs share
    // their endpoints, the branch is what distinguishes them.
    TopologyRule {
        operator: Some("LO"),
        pattern: RulePattern::TerminatesVia {
            dest: "CLJ",
            via: "SQE",
        },
        template: HeadsignTemplate::DestinationVia {
            place: "Surrey Quays",
        },
    },
    TopologyRule {
        operator: Some("LO"),
        pattern: RulePattern::TerminatesVia {
            dest: "HHY",
            via: "ZCW",
        },
        template: HeadsignTemplate::DestinationVia {
            place: "Canada Water",
        },
    },
    // Merseyrail: Wirral line services run through the Liverpool loop and out
    // again; advertise the loop until it is entered.
    TopologyRule {
        operator: Some("ME"),
        pattern: RulePattern::CallsInOrder {
            first: "BKQ",
            then: "LVJ",
        },
        template: HeadsignTemplate::FalseDestinationVia {
            name: "Liverpool",
            at: "LVJ",
            place: "Birkenhead",
        },
    },
    // Transport for Wales: Merthyr line.
    TopologyRule {
        operator: Some("AW"),
        pattern: RulePattern::TerminatesVia {
            dest: "MER",
            via: "PPD",
        },
        template: HeadsignTemplate::DestinationVia {
            place: "Pontypridd",
        },
    },
    // Any operator: Huddersfield services routed over Brighouse.
    TopologyRule {
        operator: None,
        pattern: RulePattern::TerminatesVia {
            dest: "HUD",
            via: "BGH",
        },
        template: HeadsignTemplate::DestinationVia { place: "Brighouse" },
    },
];
