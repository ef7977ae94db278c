//! Validation and derivation of a single xlog entry.
//!
//! Stages run in a fixed order and the first failure rejects the record:
//!
//! 1. caller-supplied server/variant are attached
//! 2. required fields must be present
//! 3. start and end must not be in the future
//! 4. end must not precede start
//! 5. wallclock = end - start
//! 6. wallclock must be at least realtime
//! 7. mode, bonesless, conducts, nconducts, achievements, won are derived
//! 8. raw bitmask fields are dropped
//!
//! Nothing is persisted here; a rejected entry leaves no trace.

use std::collections::BTreeMap;

use chrono::{DateTime, TimeDelta, Utc};
use tracing::debug;

use crate::bitmask::{count_labels, join_labels};
use crate::classify::{derive_bonesless, derive_mode, derive_won};
use crate::error::{Error, Result};
use crate::record::{GameRecord, IngestContext};
use crate::tables::Tables;
use crate::xlog::{Field, RawLogEntry, XlogValue};

/// Source of "now" for the future-timestamp checks
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock stuck at one instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Turns raw entries into [`GameRecord`]s using shared, read-only tables
pub struct Validator<'a, C: Clock = SystemClock> {
    tables: &'a Tables,
    clock: C,
}

impl<'a> Validator<'a, SystemClock> {
    pub fn new(tables: &'a Tables) -> Self {
        Self::with_clock(tables, SystemClock)
    }
}

impl<'a, C: Clock> Validator<'a, C> {
    pub fn with_clock(tables: &'a Tables, clock: C) -> Self {
        Self { tables, clock }
    }

    pub fn tables(&self) -> &Tables {
        self.tables
    }

    pub fn validate(&self, ctx: &IngestContext, entry: &RawLogEntry) -> Result<GameRecord> {
        for field in Field::REQUIRED {
            if !entry.contains(field) {
                return Err(Error::MissingField(field));
            }
        }

        let now = self.clock.now();
        let starttime = timestamp(entry, Field::Starttime)?;
        if starttime > now {
            return Err(Error::StartsInFuture);
        }
        let endtime = timestamp(entry, Field::Endtime)?;
        if endtime > now {
            return Err(Error::EndsInFuture);
        }

        if endtime < starttime {
            return Err(Error::EndsBeforeStart);
        }
        let wallclock = endtime - starttime;

        let realtime_secs = entry.int(Field::Realtime)?.unwrap_or(0);
        let realtime = TimeDelta::try_seconds(realtime_secs).ok_or_else(|| Error::InvalidField {
            field: Field::Realtime,
            message: format!("{} seconds is out of range", realtime_secs),
        })?;
        if wallclock < realtime {
            return Err(Error::WallclockBelowRealtime {
                wallclock: wallclock.num_seconds(),
                realtime: realtime_secs,
            });
        }

        let flags = entry.bits(Field::Flags)?;
        let mode = derive_mode(flags, &self.tables.flags);
        let bonesless = derive_bonesless(flags, &self.tables.flags);
        let conducts = join_labels(
            &self
                .tables
                .conducts
                .decode_fields(entry, &Field::CONDUCT_SOURCES)?,
        );
        let nconducts = count_labels(&conducts);
        let achievements = join_labels(
            &self
                .tables
                .achievements
                .decode_fields(entry, &Field::ACHIEVEMENT_SOURCES)?,
        );
        let death = entry.require_text(Field::Death)?;
        let won = derive_won(entry.bits(Field::Achieve)?, &death, self.tables.ascended_bit);

        let record = GameRecord {
            server: ctx.server.clone(),
            variant: ctx.variant.clone(),
            version: entry.require_text(Field::Version)?,
            name: entry.require_text(Field::Name)?,
            role: entry.require_text(Field::Role)?,
            race: entry.text(Field::Race),
            gender: entry.text(Field::Gender),
            align: entry.text(Field::Align),
            gender0: entry.text(Field::Gender0),
            align0: entry.text(Field::Align0),
            points: entry.int(Field::Points)?,
            turns: entry.require_int(Field::Turns)?,
            deathdnum: entry.int(Field::Deathdnum)?,
            deathlev: entry.int(Field::Deathlev)?,
            maxlvl: entry.int(Field::Maxlvl)?,
            hp: entry.int(Field::Hp)?,
            maxhp: entry.int(Field::Maxhp)?,
            deaths: entry.int(Field::Deaths)?,
            deathdate: entry.int(Field::Deathdate)?,
            birthdate: entry.int(Field::Birthdate)?,
            uid: entry.int(Field::Uid)?,
            starttime,
            endtime,
            wallclock,
            realtime,
            death,
            while_reason: entry.text(Field::While),
            mode,
            bonesless,
            won,
            conducts,
            nconducts,
            achievements,
            extra: passthrough_fields(entry),
        };

        debug!(
            "Accepted {} game by {} ({} turns, won={})",
            record.variant, record.name, record.turns, record.won
        );
        Ok(record)
    }
}

fn timestamp(entry: &RawLogEntry, field: Field) -> Result<DateTime<Utc>> {
    let secs = entry.require_int(field)?;
    DateTime::from_timestamp(secs, 0).ok_or_else(|| Error::InvalidField {
        field,
        message: format!("{} is not a valid Unix timestamp", secs),
    })
}

/// Unknown keys, minus anything that would shadow the caller's context
fn passthrough_fields(entry: &RawLogEntry) -> BTreeMap<String, XlogValue> {
    entry
        .unknown_fields()
        .filter(|(k, _)| !matches!(*k, "server" | "variant"))
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}
