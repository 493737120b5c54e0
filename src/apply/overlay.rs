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

//! Collapses the STP variants of each TUID into a set of records whose
//! calendars never overlap. Overlay/New/Cancellation records excise their
//! operating days from the Permanent records indexed before them, which is
//! why the input must arrive Permanent-first.

use tracing::trace;

use crate::apply::OverlayIndex;
use crate::calendar::Overlap;
use crate::models::{OverlayRecord, Stp};

pub fn resolve_overlays<R>(records: impl IntoIterator<Item = R>) -> OverlayIndex<R>
where
    R: OverlayRecord,
{
    let mut index: OverlayIndex<R> = OverlayIndex::default();

    for record in records {
        if record.stp() != Stp::Permanent {
            if let Some(bases) = index.get_mut(record.tuid()) {
                let mut kept = Vec::with_capacity(bases.len());
                for base in bases.drain(..) {
                    match base.calendar().overlap(record.calendar()) {
                        Overlap::None => kept.push(base),
                        Overlap::Short => {
                            match base.calendar().add_exclude_days(record.calendar()) {
                                Some(calendar) => {
                                    kept.push(base.with_calendar(calendar, base.record_id()));
                                }
                                None => {
                                    // the overlay swallowed every operating day
                                    trace!(
                                        "Dropping record {} of {}, its calendar is empty \
                                         after overlay {}",
                                        base.record_id(),
                                        base.tuid(),
                                        record.record_id(),
                                    );
                                }
                            }
                        }
                    }
                }
                *bases = kept;
            }
        }
        if record.stp() != Stp::Cancellation {
            index
                .entry(record.tuid().to_string())
                .or_default()
                .push(record);
        }
    }

    index
}
