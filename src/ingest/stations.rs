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

use std::collections::HashMap;

use crate::ingest::rows::StationRow;
use crate::models::StopTime;

/// The station catalogue: display names for headsigns, coordinates for
/// shapes, interchange times for transfers, and the `stops.txt` rows
/// themselves. Insertion order is preserved for output.
pub struct StationIndex {
    stations: Vec<StationRow>,
    by_atco: HashMap<String, usize>,
    by_crs: HashMap<String, usize>,
}

impl StationIndex {
    /// The first station wins when a key repeats.
    pub fn new(rows: Vec<StationRow>) -> Self {
        let mut by_atco = HashMap::new();
        let mut by_crs = HashMap::new();
        for (index, row) in rows.iter().enumerate() {
            by_atco.entry(row.atco_code.clone()).or_insert(index);
            if let Some(crs) = &row.crs_code {
                by_crs.entry(crs.clone()).or_insert(index);
            }
        }
        Self {
            stations: rows,
            by_atco,
            by_crs,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &StationRow> {
        self.stations.iter()
    }

    pub fn by_atco(&self, atco_code: &str) -> Option<&StationRow> {
        self.by_atco.get(atco_code).map(|index| &self.stations[*index])
    }

    pub fn by_crs(&self, crs_code: &str) -> Option<&StationRow> {
        self.by_crs.get(crs_code).map(|index| &self.stations[*index])
    }

    /// Display name of a call, by ATCO code first, CRS second.
    pub fn name_of(&self, stop: &StopTime) -> Option<&str> {
        if let Some(station) = self.by_atco(&stop.atco_code) {
            return Some(&station.name);
        }
        stop.crs_code
            .as_deref()
            .and_then(|crs| self.by_crs(crs))
            .map(|station| station.name.as_str())
    }

    /// Name of a CRS code, falling back to the code itself.
    pub fn crs_name(&self, crs_code: &str) -> String {
        self.by_crs(crs_code)
            .map(|station| station.name.clone())
            .unwrap_or_else(|| crs_code.to_string())
    }

    pub fn coordinates(&self, atco_code: &str) -> Option<(f64, f64)> {
        let station = self.by_atco(atco_code)?;
        match (station.latitude, station.longitude) {
            (Some(lat), Some(lon)) => Some((lat, lon)),
            _ => None,
        }
    }
}
