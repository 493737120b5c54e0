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

//! The assembly pipeline, stage by stage: fold the row stream into
//! schedules, collapse the STP variants, splice the associations, flatten to
//! trips, infer headsigns, duplicate the past-midnight departures, then
//! group routes, deduplicate shapes and emit the feed.

use std::collections::HashMap;
use std::fmt::Display;

use chrono::NaiveDate;
use tracing::info;

use crate::apply::{
    apply_associations, duplicate_late_night, flatten_schedules, resolve_overlays, FlattenError,
};
use crate::headsign::{HeadsignInference, ViaTable};
use crate::ingest::{
    associations_from_rows, AssociationRow, FixedLinkRow, IngestError, ScheduleBuilder,
    ScheduleRow, StationIndex,
};
use crate::output::records::{
    FeedInfoRecord, LinkRecord, StopRecord, StopTimeRecord, TransferRecord, TripRecord,
};
use crate::output::{GtfsSink, RouteGrouper, ShapeDedup, SinkError};
use crate::time::TimeError;

#[derive(Debug, Default)]
pub struct PipelineConfig {
    pub use_scheduled_when_no_public: bool,
}

/// `feed_info.txt` content; the validity window defaults to the
/// `[today-7, today+91]` span the source extraction uses.
#[derive(Debug, Clone)]
pub struct FeedDetails {
    pub publisher_name: String,
    pub publisher_url: String,
    pub lang: String,
    pub version: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

#[derive(Debug)]
pub enum PipelineError {
    Ingest(IngestError),
    Flatten(FlattenError),
    Time(TimeError),
    Sink(SinkError),
}

impl std::error::Error for PipelineError {}

impl Display for PipelineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PipelineError::Ingest(err) => write!(f, "{}", err),
            PipelineError::Flatten(err) => write!(f, "{}", err),
            PipelineError::Time(err) => write!(f, "{}", err),
            PipelineError::Sink(err) => write!(f, "{}", err),
        }
    }
}

impl From<IngestError> for PipelineError {
    fn from(err: IngestError) -> Self {
        PipelineError::Ingest(err)
    }
}

impl From<FlattenError> for PipelineError {
    fn from(err: FlattenError) -> Self {
        PipelineError::Flatten(err)
    }
}

impl From<TimeError> for PipelineError {
    fn from(err: TimeError) -> Self {
        PipelineError::Time(err)
    }
}

impl From<SinkError> for PipelineError {
    fn from(err: SinkError) -> Self {
        PipelineError::Sink(err)
    }
}

#[derive(Debug, Default)]
pub struct RunStats {
    pub schedules: usize,
    pub trips: usize,
    pub routes: usize,
    pub shapes_points: usize,
}

#[allow(clippy::too_many_arguments)]
pub fn run<SRows, ARows, Sink>(
    schedule_rows: SRows,
    association_rows: ARows,
    stations: &StationIndex,
    fixed_links: &[FixedLinkRow],
    via_table: &ViaTable,
    feed: &FeedDetails,
    config: &PipelineConfig,
    sink: &mut Sink,
) -> Result<RunStats, PipelineError>
where
    SRows: IntoIterator<Item = Result<ScheduleRow, IngestError>>,
    ARows: IntoIterator<Item = Result<AssociationRow, IngestError>>,
    Sink: GtfsSink,
{
    let builder = ScheduleBuilder {
        use_scheduled_when_no_public: config.use_scheduled_when_no_public,
    };
    let built = builder.build(schedule_rows)?;
    let schedule_count = built.schedules.len();
    let mut ids = built.ids;
    info!("Ingested {} schedules", schedule_count);

    let associations = associations_from_rows(association_rows)?;
    info!("Ingested {} associations", associations.len());

    let schedule_index = resolve_overlays(built.schedules);
    let association_index = resolve_overlays(associations);

    let schedule_index = apply_associations(schedule_index, &association_index, &mut ids)?;
    let mut trips = flatten_schedules(schedule_index)?;
    info!("Flattened to {} trips", trips.len());

    let inference = HeadsignInference::new(stations, via_table);
    for schedule in trips.iter_mut() {
        inference.apply(schedule);
    }

    let late_night = duplicate_late_night(&trips, &mut ids)?;
    if !late_night.is_empty() {
        info!("Duplicated {} late night trips", late_night.len());
        trips.extend(late_night);
    }

    let mut grouper = RouteGrouper::new(stations);
    let mut shapes = ShapeDedup::new(stations);
    // platforms seen in the timetable back-fill stations without one
    let mut seen_platforms: HashMap<String, String> = HashMap::new();

    for schedule in &trips {
        let route_id = grouper.route_id_for(schedule);
        let shape_id = shapes.shape_id_for(schedule);
        let trip_id = schedule.trip_id();

        sink.calendar(schedule.calendar.to_calendar(&trip_id))?;
        for record in schedule.calendar.to_calendar_dates(&trip_id) {
            sink.calendar_date(record)?;
        }
        sink.trip(TripRecord {
            route_id,
            service_id: trip_id.clone(),
            trip_id: trip_id.clone(),
            trip_headsign: schedule
                .destination()
                .and_then(|stop| stations.name_of(stop))
                .map(str::to_string),
            trip_short_name: schedule.rsid.clone(),
            shape_id,
            original_trip_id: schedule.tuid.clone(),
        })?;
        for stop in schedule.stops.iter() {
            if let Some(platform) = &stop.platform {
                seen_platforms
                    .entry(stop.atco_code.clone())
                    .or_insert_with(|| platform.clone());
            }
            sink.stop_time(StopTimeRecord {
                trip_id: stop.trip_id.clone(),
                arrival_time: stop.arrival_time.clone(),
                departure_time: stop.departure_time.clone(),
                stop_id: stop.atco_code.clone(),
                stop_sequence: stop.stop_sequence,
                stop_headsign: stop.headsign.clone(),
                pickup_type: stop.pickup_type.gtfs_code(),
                drop_off_type: stop.drop_off_type.gtfs_code(),
                timepoint: u8::from(stop.timepoint),
            })?;
        }
    }

    for agency in grouper.agencies() {
        sink.agency(agency)?;
    }
    let routes = grouper.into_routes();
    let route_count = routes.len();
    for route in routes {
        sink.route(route)?;
    }
    let points = shapes.into_points();
    let point_count = points.len();
    for point in points {
        sink.shape_point(point)?;
    }

    for station in stations.iter() {
        sink.stop(StopRecord {
            stop_id: station.atco_code.clone(),
            stop_code: station.crs_code.clone(),
            stop_name: station.name.clone(),
            stop_lat: station.latitude,
            stop_lon: station.longitude,
            location_type: 0,
            parent_station: None,
            platform_code: station
                .platform
                .clone()
                .or_else(|| seen_platforms.get(&station.atco_code).cloned()),
        })?;
        if let Some(minutes) = station.minimum_change_time {
            sink.transfer(TransferRecord {
                from_stop_id: station.atco_code.clone(),
                to_stop_id: station.atco_code.clone(),
                transfer_type: 2,
                min_transfer_time: Some(minutes * 60),
            })?;
        }
    }

    for link in fixed_links {
        let (Some(origin), Some(destination)) = (
            stations.by_crs(&link.origin_crs),
            stations.by_crs(&link.destination_crs),
        ) else {
            continue;
        };
        sink.link(LinkRecord {
            mode: link.mode.clone(),
            from_stop_id: origin.atco_code.clone(),
            to_stop_id: destination.atco_code.clone(),
            duration: link.duration_minutes * 60,
        })?;
        sink.transfer(TransferRecord {
            from_stop_id: origin.atco_code.clone(),
            to_stop_id: destination.atco_code.clone(),
            transfer_type: 2,
            min_transfer_time: Some(link.duration_minutes * 60),
        })?;
    }

    sink.feed_info(FeedInfoRecord {
        feed_publisher_name: feed.publisher_name.clone(),
        feed_publisher_url: feed.publisher_url.clone(),
        feed_lang: feed.lang.clone(),
        feed_start_date: feed.start_date.format("%Y%m%d").to_string(),
        feed_end_date: feed.end_date.format("%Y%m%d").to_string(),
        feed_version: feed.version.clone(),
    })?;

    sink.finish()?;

    Ok(RunStats {
        schedules: schedule_count,
        trips: trips.len(),
        routes: route_count,
        shapes_points: point_count,
    })
}
