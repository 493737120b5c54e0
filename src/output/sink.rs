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

//! The row sink the pipeline emits into. The pipeline does not own the files
//! behind it; the CSV implementation writes one `.txt` per GTFS table, the
//! in-memory one backs the integration tests.

use std::fmt::Display;
use std::fs::File;
use std::path::Path;

use crate::output::records::{
    AgencyRecord, CalendarDateRecord, CalendarRecord, FeedInfoRecord, LinkRecord, RouteRecord,
    ShapeRecord, StopRecord, StopTimeRecord, TransferRecord, TripRecord,
};

#[derive(Debug)]
pub enum SinkError {
    Io(std::io::Error),
    Csv(csv::Error),
}

impl std::error::Error for SinkError {}

impl Display for SinkError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SinkError::Io(err) => write!(f, "I/O error while writing the feed : {}", err),
            SinkError::Csv(err) => write!(f, "CSV error while writing the feed : {}", err),
        }
    }
}

impl From<std::io::Error> for SinkError {
    fn from(err: std::io::Error) -> Self {
        SinkError::Io(err)
    }
}

impl From<csv::Error> for SinkError {
    fn from(err: csv::Error) -> Self {
        SinkError::Csv(err)
    }
}

pub trait GtfsSink {
    fn agency(&mut self, record: AgencyRecord) -> Result<(), SinkError>;
    fn stop(&mut self, record: StopRecord) -> Result<(), SinkError>;
    fn transfer(&mut self, record: TransferRecord) -> Result<(), SinkError>;
    fn calendar(&mut self, record: CalendarRecord) -> Result<(), SinkError>;
    fn calendar_date(&mut self, record: CalendarDateRecord) -> Result<(), SinkError>;
    fn trip(&mut self, record: TripRecord) -> Result<(), SinkError>;
    fn stop_time(&mut self, record: StopTimeRecord) -> Result<(), SinkError>;
    fn route(&mut self, record: RouteRecord) -> Result<(), SinkError>;
    fn shape_point(&mut self, record: ShapeRecord) -> Result<(), SinkError>;
    fn link(&mut self, record: LinkRecord) -> Result<(), SinkError>;
    fn feed_info(&mut self, record: FeedInfoRecord) -> Result<(), SinkError>;
    fn finish(&mut self) -> Result<(), SinkError>;
}

/// Collects every record in memory; the sink used by the tests and by
/// callers that post-process the feed before writing it.
#[derive(Debug, Default)]
pub struct MemoryFeed {
    pub agencies: Vec<AgencyRecord>,
    pub stops: Vec<StopRecord>,
    pub transfers: Vec<TransferRecord>,
    pub calendars: Vec<CalendarRecord>,
    pub calendar_dates: Vec<CalendarDateRecord>,
    pub trips: Vec<TripRecord>,
    pub stop_times: Vec<StopTimeRecord>,
    pub routes: Vec<RouteRecord>,
    pub shapes: Vec<ShapeRecord>,
    pub links: Vec<LinkRecord>,
    pub feed_infos: Vec<FeedInfoRecord>,
}

impl GtfsSink for MemoryFeed {
    fn agency(&mut self, record: AgencyRecord) -> Result<(), SinkError> {
        self.agencies.push(record);
        Ok(())
    }

    fn stop(&mut self, record: StopRecord) -> Result<(), SinkError> {
        self.stops.push(record);
        Ok(())
    }

    fn transfer(&mut self, record: TransferRecord) -> Result<(), SinkError> {
        self.transfers.push(record);
        Ok(())
    }

    fn calendar(&mut self, record: CalendarRecord) -> Result<(), SinkError> {
        self.calendars.push(record);
        Ok(())
    }

    fn calendar_date(&mut self, record: CalendarDateRecord) -> Result<(), SinkError> {
        self.calendar_dates.push(record);
        Ok(())
    }

    fn trip(&mut self, record: TripRecord) -> Result<(), SinkError> {
        self.trips.push(record);
        Ok(())
    }

    fn stop_time(&mut self, record: StopTimeRecord) -> Result<(), SinkError> {
        self.stop_times.push(record);
        Ok(())
    }

    fn route(&mut self, record: RouteRecord) -> Result<(), SinkError> {
        self.routes.push(record);
        Ok(())
    }

    fn shape_point(&mut self, record: ShapeRecord) -> Result<(), SinkError> {
        self.shapes.push(record);
        Ok(())
    }

    fn link(&mut self, record: LinkRecord) -> Result<(), SinkError> {
        self.links.push(record);
        Ok(())
    }

    fn feed_info(&mut self, record: FeedInfoRecord) -> Result<(), SinkError> {
        self.feed_infos.push(record);
        Ok(())
    }

    fn finish(&mut self) -> Result<(), SinkError> {
        Ok(())
    }
}

/// Writes one `.txt` file per GTFS table into a directory.
pub struct CsvFeedWriter {
    agencies: csv::Writer<File>,
    stops: csv::Writer<File>,
    transfers: csv::Writer<File>,
    calendars: csv::Writer<File>,
    calendar_dates: csv::Writer<File>,
    trips: csv::Writer<File>,
    stop_times: csv::Writer<File>,
    routes: csv::Writer<File>,
    shapes: csv::Writer<File>,
    links: csv::Writer<File>,
    feed_infos: csv::Writer<File>,
}

impl CsvFeedWriter {
    pub fn new(directory: &Path) -> Result<Self, SinkError> {
        std::fs::create_dir_all(directory)?;
        let open = |name: &str| csv::Writer::from_path(directory.join(name));
        Ok(Self {
            agencies: open("agency.txt")?,
            stops: open("stops.txt")?,
            transfers: open("transfers.txt")?,
            calendars: open("calendar.txt")?,
            calendar_dates: open("calendar_dates.txt")?,
            trips: open("trips.txt")?,
            stop_times: open("stop_times.txt")?,
            routes: open("routes.txt")?,
            shapes: open("shapes.txt")?,
            links: open("links.txt")?,
            feed_infos: open("feed_info.txt")?,
        })
    }
}

impl GtfsSink for CsvFeedWriter {
    fn agency(&mut self, record: AgencyRecord) -> Result<(), SinkError> {
        Ok(self.agencies.serialize(record)?)
    }

    fn stop(&mut self, record: StopRecord) -> Result<(), SinkError> {
        Ok(self.stops.serialize(record)?)
    }

    fn transfer(&mut self, record: TransferRecord) -> Result<(), SinkError> {
        Ok(self.transfers.serialize(record)?)
    }

    fn calendar(&mut self, record: CalendarRecord) -> Result<(), SinkError> {
        Ok(self.calendars.serialize(record)?)
    }

    fn calendar_date(&mut self, record: CalendarDateRecord) -> Result<(), SinkError> {
        Ok(self.calendar_dates.serialize(record)?)
    }

    fn trip(&mut self, record: TripRecord) -> Result<(), SinkError> {
        Ok(self.trips.serialize(record)?)
    }

    fn stop_time(&mut self, record: StopTimeRecord) -> Result<(), SinkError> {
        Ok(self.stop_times.serialize(record)?)
    }

    fn route(&mut self, record: RouteRecord) -> Result<(), SinkError> {
        Ok(self.routes.serialize(record)?)
    }

    fn shape_point(&mut self, record: ShapeRecord) -> Result<(), SinkError> {
        Ok(self.shapes.serialize(record)?)
    }

    fn link(&mut self, record: LinkRecord) -> Result<(), SinkError> {
        Ok(self.links.serialize(record)?)
    }

    fn feed_info(&mut self, record: FeedInfoRecord) -> Result<(), SinkError> {
        Ok(self.feed_infos.serialize(record)?)
    }

    fn finish(&mut self) -> Result<(), SinkError> {
        self.agencies.flush()?;
        self.stops.flush()?;
        self.transfers.flush()?;
        self.calendars.flush()?;
        self.calendar_dates.flush()?;
        self.trips.flush()?;
        self.stop_times.flush()?;
        self.routes.flush()?;
        self.shapes.flush()?;
        self.links.flush()?;
        self.feed_infos.flush()?;
        Ok(())
    }
}
