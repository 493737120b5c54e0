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

pub mod associations;
pub mod rows;
pub mod schedule_builder;
pub mod stations;

use std::fmt::Display;

use crate::time::TimeError;

pub use associations::associations_from_rows;
pub use rows::{AssociationRow, FixedLinkRow, ScheduleRow, StationRow};
pub use schedule_builder::{BuiltSchedules, ScheduleBuilder};
pub use stations::StationIndex;

#[derive(Debug)]
pub enum IngestError {
    /// The row stream itself failed; nothing partial is emitted.
    Source(String),
    Time(TimeError),
    BadStpIndicator { record_id: u64, indicator: String },
    BadDateIndicator { record_id: u64, indicator: String },
}

impl std::error::Error for IngestError {}

impl Display for IngestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IngestError::Source(message) => write!(f, "Row stream error : {}", message),
            IngestError::Time(err) => write!(f, "{}", err),
            IngestError::BadStpIndicator {
                record_id,
                indicator,
            } => {
                write!(
                    f,
                    "Record {} has an invalid STP indicator '{}'",
                    record_id, indicator
                )
            }
            IngestError::BadDateIndicator {
                record_id,
                indicator,
            } => {
                write!(
                    f,
                    "Association {} has an invalid date indicator '{}'",
                    record_id, indicator
                )
            }
        }
    }
}

impl From<TimeError> for IngestError {
    fn from(err: TimeError) -> Self {
        IngestError::Time(err)
    }
}

impl From<csv::Error> for IngestError {
    fn from(err: csv::Error) -> Self {
        IngestError::Source(err.to_string())
    }
}
