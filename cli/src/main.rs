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

mod config;
mod logger;

use std::path::Path;

use anyhow::{Context, Error};
use chrono::Duration;
use serde::de::DeserializeOwned;
use structopt::StructOpt;
use tracing::info;

use cif2gtfs::headsign::ViaTable;
use cif2gtfs::ingest::{AssociationRow, FixedLinkRow, ScheduleRow, StationIndex, StationRow};
use cif2gtfs::output::CsvFeedWriter;
use cif2gtfs::{FeedDetails, PipelineConfig};

use config::Config;

fn main() -> Result<(), Error> {
    logger::init_logger();
    let config = Config::from_args();
    launch(&config)
}

fn launch(config: &Config) -> Result<(), Error> {
    let input = &config.input_data_path;

    let mut schedule_rows: Vec<ScheduleRow> = read_rows(&input.join("schedule.csv"))?;
    // the fold and the overlay resolver rely on this ordering
    schedule_rows.sort_by(|lhs, rhs| {
        rhs.stp_indicator
            .cmp(&lhs.stp_indicator)
            .then(lhs.id.cmp(&rhs.id))
            .then(lhs.stop_id.cmp(&rhs.stop_id))
    });

    let mut association_rows: Vec<AssociationRow> = read_rows(&input.join("associations.csv"))?;
    association_rows.sort_by(|lhs, rhs| {
        rhs.stp_indicator
            .cmp(&lhs.stp_indicator)
            .then(lhs.id.cmp(&rhs.id))
    });

    let station_rows: Vec<StationRow> = read_rows(&input.join("stations.csv"))?;
    let stations = StationIndex::new(station_rows);

    let links_path = input.join("fixed_links.csv");
    let fixed_links: Vec<FixedLinkRow> = if links_path.is_file() {
        read_rows(&links_path)?
    } else {
        Vec::new()
    };

    let via_table = match &config.via_table_path {
        Some(path) => {
            let file = std::fs::File::open(path)
                .with_context(|| format!("Could not open {}", path.display()))?;
            ViaTable::from_reader(file)
                .with_context(|| format!("Could not parse {}", path.display()))?
        }
        None => ViaTable::builtin(),
    };

    // the extraction window of the source database
    let today = chrono::Local::now().date_naive();
    let feed = FeedDetails {
        publisher_name: config.feed_publisher_name.clone(),
        publisher_url: config.feed_publisher_url.clone(),
        lang: config.feed_lang.clone(),
        version: config.feed_version.clone(),
        start_date: today - Duration::days(7),
        end_date: today + Duration::days(91),
    };

    let pipeline_config = PipelineConfig {
        use_scheduled_when_no_public: config.use_scheduled_times,
    };

    let mut sink = CsvFeedWriter::new(&config.output_path)?;
    let stats = cif2gtfs::run(
        schedule_rows.into_iter().map(Ok),
        association_rows.into_iter().map(Ok),
        &stations,
        &fixed_links,
        &via_table,
        &feed,
        &pipeline_config,
        &mut sink,
    )?;

    info!(
        "Wrote {} trips on {} routes to {}",
        stats.trips,
        stats.routes,
        config.output_path.display()
    );
    Ok(())
}

fn read_rows<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, Error> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("Could not open {}", path.display()))?;
    let mut rows = Vec::new();
    for record in reader.deserialize() {
        let record =
            record.with_context(|| format!("Could not parse a row of {}", path.display()))?;
        rows.push(record);
    }
    Ok(rows)
}
