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

use std::collections::BTreeSet;

use crate::calendar::ScheduleCalendar;
use crate::ingest::rows::AssociationRow;
use crate::ingest::IngestError;
use crate::models::{Association, AssociationType, DateIndicator, Stp};

pub fn associations_from_rows<I>(rows: I) -> Result<Vec<Association>, IngestError>
where
    I: IntoIterator<Item = Result<AssociationRow, IngestError>>,
{
    let mut associations = Vec::new();
    for row in rows {
        let row = row?;
        let stp = Stp::from_indicator(&row.stp_indicator).ok_or_else(|| {
            IngestError::BadStpIndicator {
                record_id: row.id,
                indicator: row.stp_indicator.clone(),
            }
        })?;
        let date_indicator = DateIndicator::from_code(&row.date_indicator).ok_or_else(|| {
            IngestError::BadDateIndicator {
                record_id: row.id,
                indicator: row.date_indicator.clone(),
            }
        })?;
        let calendar =
            ScheduleCalendar::new(row.start_date, row.end_date, row.days(), BTreeSet::new());
        associations.push(Association::new(
            row.id,
            row.base_uid,
            row.assoc_uid,
            row.assoc_location,
            date_indicator,
            AssociationType::from_category(&row.assoc_cat),
            stp,
            calendar,
        ));
    }
    Ok(associations)
}
