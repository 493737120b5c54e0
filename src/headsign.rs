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

//! Per-stop headsign inference, two layers: the hard-wired topology rules of
//! the operators whose networks are ambiguous (loops, false destinations),
//! then the data-driven via-text table. The first layer to produce a text
//! wins; a rule whose stops cannot be found is skipped without clearing a
//! previous decision.

pub mod rules;
pub mod via;

use std::sync::Arc;

use crate::ingest::StationIndex;
use crate::models::{Schedule, StopTime};

pub use rules::{HeadsignTemplate, RulePattern, TopologyRule, TOPOLOGY_RULES};
pub use via::{ViaEntry, ViaTable};

/// First call at `crs` from `start` onwards.
pub fn find_calling_index(stops: &[StopTime], crs: &str, start: usize) -> Option<usize> {
    stops
        .iter()
        .skip(start)
        .position(|stop| stop.crs_code.as_deref() == Some(crs))
        .map(|offset| start + offset)
}

/// What the topology layer decided for one stop.
struct RuleOutcome {
    text: String,
    /// Bare display name, for combination with a via text.
    display_name: String,
    /// Index of the false-destination call, when one was substituted.
    false_destination: Option<usize>,
}

pub struct HeadsignInference<'a> {
    stations: &'a StationIndex,
    rules: &'a [TopologyRule],
    via_table: &'a ViaTable,
}

impl<'a> HeadsignInference<'a> {
    pub fn new(stations: &'a StationIndex, via_table: &'a ViaTable) -> Self {
        Self {
            stations,
            rules: TOPOLOGY_RULES,
            via_table,
        }
    }

    pub fn with_rules(
        stations: &'a StationIndex,
        rules: &'a [TopologyRule],
        via_table: &'a ViaTable,
    ) -> Self {
        Self {
            stations,
            rules,
            via_table,
        }
    }

    pub fn apply(&self, schedule: &mut Schedule) {
        let operator = schedule.operator.clone();
        let headsigns: Vec<Option<String>> = (0..schedule.stops.len())
            .map(|index| self.headsign_at(&schedule.stops, operator.as_deref(), index))
            .collect();
        let stops = Arc::make_mut(&mut schedule.stops);
        for (stop, headsign) in stops.iter_mut().zip(headsigns) {
            stop.headsign = headsign;
        }
    }

    fn headsign_at(
        &self,
        stops: &[StopTime],
        operator: Option<&str>,
        index: usize,
    ) -> Option<String> {
        let outcome = self.topology_choice(stops, operator, index);
        if let Some(text) = self.via_refinement(stops, index, outcome.as_ref()) {
            return Some(text);
        }
        outcome.map(|outcome| outcome.text)
    }

    /// First matching rule wins; later rules never overwrite.
    fn topology_choice(
        &self,
        stops: &[StopTime],
        operator: Option<&str>,
        index: usize,
    ) -> Option<RuleOutcome> {
        for rule in self.rules {
            if let Some(rule_operator) = rule.operator {
                if operator != Some(rule_operator) {
                    continue;
                }
            }
            if !self.pattern_matches(&rule.pattern, stops, index) {
                continue;
            }
            if let Some(outcome) = self.render(&rule.template, stops, index) {
                return Some(outcome);
            }
            // a template whose stops cannot be found skips the rule
        }
        None
    }

    fn pattern_matches(&self, pattern: &RulePattern, stops: &[StopTime], index: usize) -> bool {
        match pattern {
            RulePattern::TerminatesVia { dest, via } => {
                let terminates = stops
                    .last()
                    .map_or(false, |stop| stop.crs_code.as_deref() == Some(*dest));
                terminates && find_calling_index(stops, via, index + 1).is_some()
            }
            RulePattern::CallsInOrder { first, then } => {
                match find_calling_index(stops, first, index + 1) {
                    Some(first_index) => {
                        find_calling_index(stops, then, first_index + 1).is_some()
                    }
                    None => false,
                }
            }
        }
    }

    fn render(
        &self,
        template: &HeadsignTemplate,
        stops: &[StopTime],
        index: usize,
    ) -> Option<RuleOutcome> {
        match template {
            HeadsignTemplate::FalseDestination { name, at } => {
                let false_index = find_calling_index(stops, at, index + 1)?;
                Some(RuleOutcome {
                    text: (*name).to_string(),
                    display_name: (*name).to_string(),
                    false_destination: Some(false_index),
                })
            }
            HeadsignTemplate::DestinationVia { place } => {
                let destination = self.destination_name(stops)?;
                Some(RuleOutcome {
                    text: format!("{} (via {})", destination, place),
                    display_name: destination,
                    false_destination: None,
                })
            }
            HeadsignTemplate::FalseDestinationVia { name, at, place } => {
                let false_index = find_calling_index(stops, at, index + 1)?;
                Some(RuleOutcome {
                    text: format!("{} (via {})", name, place),
                    display_name: (*name).to_string(),
                    false_destination: Some(false_index),
                })
            }
        }
    }

    /// The data-driven layer: match the best via-text entry against the
    /// calls between this stop and the (false) destination.
    fn via_refinement(
        &self,
        stops: &[StopTime],
        index: usize,
        outcome: Option<&RuleOutcome>,
    ) -> Option<String> {
        let stop_code = stops[index].crs_code.as_deref()?;
        let last_index = stops.len().checked_sub(1)?;
        let false_index = outcome
            .and_then(|outcome| outcome.false_destination)
            .unwrap_or(last_index);
        let dest_tiploc = &stops[false_index].tiploc_code;

        let via_tiplocs: Vec<&str> = stops
            .get(index + 1..false_index)
            .unwrap_or(&[])
            .iter()
            .filter(|stop| stop.arrival_time.is_some())
            .map(|stop| stop.tiploc_code.as_str())
            .collect();

        let entry = self.via_table.best(stop_code, dest_tiploc, &via_tiplocs)?;
        let name = match outcome {
            Some(outcome) => outcome.display_name.clone(),
            None => self.destination_name(stops)?,
        };
        Some(format!("{} ({})", name, entry.text))
    }

    fn destination_name(&self, stops: &[StopTime]) -> Option<String> {
        let destination = stops.last()?;
        match self.stations.name_of(destination) {
            Some(name) => Some(name.to_string()),
            None => destination.crs_code.clone(),
        }
    }
}
