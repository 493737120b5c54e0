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

use serde::{Deserialize, Serialize};
use structopt::StructOpt;

#[derive(Debug, Serialize, Deserialize, StructOpt, Clone)]
#[structopt(name = "cif2gtfs", rename_all = "snake_case")]
pub struct Config {
    /// directory containing the extracted timetable row files
    /// (schedule.csv, associations.csv, stations.csv, fixed_links.csv)
    #[structopt(long)]
    pub input_data_path: std::path::PathBuf,

    /// directory the GTFS files are written into
    #[structopt(long)]
    pub output_path: std::path::PathBuf,

    /// when a call has no public time, use the working timetable time
    /// instead of leaving it untimed
    #[structopt(long)]
    #[serde(default)]
    pub use_scheduled_times: bool,

    /// additional via-text table (columns at,dest,loc1,loc2,text)
    #[structopt(long)]
    pub via_table_path: Option<std::path::PathBuf>,

    #[structopt(long, default_value = DEFAULT_PUBLISHER_NAME)]
    #[serde(default = "default_publisher_name")]
    pub feed_publisher_name: String,

    #[structopt(long, default_value = DEFAULT_PUBLISHER_URL)]
    #[serde(default = "default_publisher_url")]
    pub feed_publisher_url: String,

    #[structopt(long, default_value = DEFAULT_LANG)]
    #[serde(default = "default_lang")]
    pub feed_lang: String,

    #[structopt(long, default_value = DEFAULT_VERSION)]
    #[serde(default = "default_version")]
    pub feed_version: String,
}

pub const DEFAULT_PUBLISHER_NAME: &str = "cif2gtfs";
pub const DEFAULT_PUBLISHER_URL: &str = "https://www.nationalrail.co.uk";
pub const DEFAULT_LANG: &str = "en";
pub const DEFAULT_VERSION: &str = "1";

pub fn default_publisher_name() -> String {
    DEFAULT_PUBLISHER_NAME.to_string()
}

pub fn default_publisher_url() -> String {
    DEFAULT_PUBLISHER_URL.to_string()
}

pub fn default_lang() -> String {
    DEFAULT_LANG.to_string()
}

pub fn default_version() -> String {
    DEFAULT_VERSION.to_string()
}
