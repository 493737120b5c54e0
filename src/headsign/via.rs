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

//! The via-text table: per departure station (CRS), which intermediate calls
//! distinguish otherwise identical destinations, and the text to display.
//! Ships with a builtin set; an operator can load a larger one from CSV.

use indexmap::IndexMap;
use serde::Deserialize;

/// One via-text candidate for departures at `at`.
#[derive(Debug, Clone, Deserialize)]
pub struct ViaEntry {
    /// CRS of the stop the text is displayed at.
    pub at: String,
    /// TIPLOC of the advertised destination.
    pub dest: String,
    /// TIPLOC that must be called at after this stop.
    pub loc1: String,
    /// Optional second TIPLOC, called at after `loc1`.
    pub loc2: Option<String>,
    /// The parenthetical, e.g. `via Doncaster`.
    pub text: String,
}

pub struct ViaTable {
    by_crs: IndexMap<String, Vec<ViaEntry>>,
}

impl ViaTable {
    pub fn empty() -> Self {
        Self {
            by_crs: IndexMap::new(),
        }
    }

    pub fn from_entries(entries: Vec<ViaEntry>) -> Self {
        let mut by_crs: IndexMap<String, Vec<ViaEntry>> = IndexMap::new();
        for entry in entries {
            by_crs.entry(entry.at.clone()).or_default().push(entry);
        }
        Self { by_crs }
    }

    /// Reads `at,dest,loc1,loc2,text` rows; an empty `loc2` means none.
    pub fn from_reader<R: std::io::Read>(reader: R) -> Result<Self, csv::Error> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut entries = Vec::new();
        for record in csv_reader.deserialize() {
            entries.push(record?);
        }
        Ok(Self::from_entries(entries))
    }

    /// The best entry for a stop: the destination matches, `loc1` is among
    /// the upcoming calls, `loc2` (when given) follows it. Among several
    /// matches the earliest `loc1` wins; the table order breaks ties.
    pub fn best(&self, at: &str, dest: &str, via_tiplocs: &[&str]) -> Option<&ViaEntry> {
        let entries = self.by_crs.get(at)?;
        let mut best: Option<(usize, &ViaEntry)> = None;
        for entry in entries {
            if entry.dest != dest {
                continue;
            }
            let Some(position1) = via_tiplocs.iter().position(|tiploc| *tiploc == entry.loc1)
            else {
                continue;
            };
            if let Some(loc2) = &entry.loc2 {
                let Some(position2) = via_tiplocs.iter().position(|tiploc| tiploc == loc2)
                else {
                    continue;
                };
                if position2 <= position1 {
                    continue;
                }
            }
            let better = match best {
                Some((best_position, _)) => position1 < best_position,
                None => true,
            };
            if better {
                best = Some((position1, entry));
            }
        }
        best.map(|(_, entry)| entry)
    }

    /// The builtin entries for the flows that need disambiguating on the
    /// national network.
    pub fn builtin() -> Self {
        fn entry(
            at: &str,
            dest: &str,
            loc1: &str,
            loc2: Option<&str>,
            text: &str,
        ) -> ViaEntry {
            ViaEntry {
                at: at.to_string(),
                dest: dest.to_string(),
                loc1: loc1.to_string(),
                loc2: loc2.map(str::to_string),
                text: text.to_string(),
            }
        }

        Self::from_entries(vec![
            // East Coast Main Line departures at King's Cross
            entry("KGX", "LEEDS", "DONC", None, "via Doncaster"),
            entry("KGX", "EDINBUR", "NWCSTLE", None, "via Newcastle"),
            // Great Western departures at Paddington
            entry("PAD", "BRSTLTM", "BATHSPA", None, "via Bath Spa"),
            entry("PAD", "BRSTLTM", "BRSTPKW", None, "via Bristol Parkway"),
            // Portsmouth services out of Waterloo
            entry("WAT", "PMSHRBR", "ESTLEGH", None, "via Eastleigh"),
            entry("WAT", "PMSHRBR", "GUILDFD", None, "via Guildford"),
            // Kent Coast out of Victoria
            entry("VIC", "RAMSGTE", "CHATHAM", None, "via Chatham"),
            entry("VIC", "RAMSGTE", "ASHFKY", None, "via Ashford International"),
            // Anglia
            entry("LST", "NRCH", "IPSWICH", None, "via Ipswich"),
            // West Coast out of Euston
            entry("EUS", "MNCRPIC", "STOKEOT", None, "via Stoke-on-Trent"),
            entry(
                "EUS",
                "MNCRPIC",
                "MKNSCEN",
                Some("STOKEOT"),
                "via Milton Keynes & Stoke-on-Trent",
            ),
            // Transpennine
            entry("LDS", "MNCRPIC", "HDRSFLD", None, "via Huddersfield"),
            entry("LDS", "MNCRPIC", "BRGHOUS", None, "via Brighouse"),
        ])
    }
}
