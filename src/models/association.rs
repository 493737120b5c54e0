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

use crate::calendar::ScheduleCalendar;
use crate::models::overlay::{OverlayRecord, RecordId, Stp};

/// Which service day of the base schedule the associated schedule runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateIndicator {
    Same,
    Next,
    Previous,
}

impl DateIndicator {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "S" => Some(DateIndicator::Same),
            "N" => Some(DateIndicator::Next),
            "P" => Some(DateIndicator::Previous),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssociationType {
    Split,
    Join,
    NA,
}

impl AssociationType {
    /// CIF association category: `VV` divides, `JJ` joins, anything else is
    /// operational only.
    pub fn from_category(category: &str) -> Self {
        match category {
            "VV" => AssociationType::Split,
            "JJ" => AssociationType::Join,
            _ => AssociationType::NA,
        }
    }
}

/// Declares that two TUID-identified services split or join at a TIPLOC,
/// possibly across the service-day boundary.
#[derive(Debug, Clone)]
pub struct Association {
    pub id: RecordId,
    pub base_tuid: String,
    pub assoc_tuid: String,
    /// `{baseTUID}_{assocTUID}_`, the key overlays are resolved under.
    pub tuid: String,
    pub tiploc: String,
    pub date_indicator: DateIndicator,
    pub assoc_type: AssociationType,
    pub stp: Stp,
    pub calendar: ScheduleCalendar,
}

impl Association {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: RecordId,
        base_tuid: String,
        assoc_tuid: String,
        tiploc: String,
        date_indicator: DateIndicator,
        assoc_type: AssociationType,
        stp: Stp,
        calendar: ScheduleCalendar,
    ) -> Self {
        let tuid = format!("{}_{}_", base_tuid, assoc_tuid);
        Self {
            id,
            base_tuid,
            assoc_tuid,
            tuid,
            tiploc,
            date_indicator,
            assoc_type,
            stp,
            calendar,
        }
    }

    /// The association calendar expressed in base-schedule service days.
    pub fn shifted_calendar(&self) -> ScheduleCalendar {
        match self.date_indicator {
            DateIndicator::Same => self.calendar.clone(),
            DateIndicator::Next => self.calendar.shift_forward(),
            DateIndicator::Previous => self.calendar.shift_backward(),
        }
    }
}

impl OverlayRecord for Association {
    fn record_id(&self) -> RecordId {
        self.id
    }

    fn tuid(&self) -> &str {
        &self.tuid
    }

    fn stp(&self) -> Stp {
        self.stp
    }

    fn calendar(&self) -> &ScheduleCalendar {
        &self.calendar
    }

    fn with_calendar(&self, calendar: ScheduleCalendar, id: RecordId) -> Self {
        Self {
            id,
            calendar,
            ..self.clone()
        }
    }
}
