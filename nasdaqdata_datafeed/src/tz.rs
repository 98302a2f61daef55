//! Attaching the host time zone to naive bar timestamps.
//!
//! Provider dates carry no zone. The host expects every bar stamped in a fixed
//! IANA zone ([`TARGET_TZ`]), so a naive wall-clock time is *labelled* with that
//! zone rather than converted into it.
//!
//! Notes:
//! - Ambiguous local times happen during "fall back" when a wall time occurs twice.
//! - Nonexistent local times happen during "spring forward" when a wall time is skipped.
//! - `Asia/Shanghai` observed DST between 1986 and 1991, so historical series
//!   can still hit both cases.

use chrono::{DateTime, NaiveDateTime, TimeDelta, TimeZone, offset::LocalResult};
use chrono_tz::Tz;
use thiserror::Error;

/// Zone every normalized bar is stamped in.
pub const TARGET_TZ: Tz = chrono_tz::Asia::Shanghai;

/// Longest spring-forward gap [`DstPolicy::Lenient`] will step over.
const MAX_GAP_MINUTES: u32 = 120;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LocalTimeError {
    #[error("ambiguous local time {naive} in {tz}")]
    Ambiguous { naive: NaiveDateTime, tz: Tz },

    #[error("nonexistent local time {naive} in {tz}")]
    Nonexistent { naive: NaiveDateTime, tz: Tz },
}

/// Policy for handling DST edge cases when labelling a naive timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DstPolicy {
    /// Error on ambiguous (fall-back) or nonexistent (spring-forward) local times.
    Strict,
    /// Ambiguous times resolve to the earlier instant; times inside a gap are
    /// shifted forward minute by minute to the first valid instant.
    #[default]
    Lenient,
}

/// Label `naive` with `tz` under `policy`.
pub fn attach_zone(
    naive: NaiveDateTime,
    tz: Tz,
    policy: DstPolicy,
) -> Result<DateTime<Tz>, LocalTimeError> {
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => Ok(dt),
        LocalResult::Ambiguous(earliest, _) => match policy {
            DstPolicy::Lenient => Ok(earliest),
            DstPolicy::Strict => Err(LocalTimeError::Ambiguous { naive, tz }),
        },
        LocalResult::None => match policy {
            DstPolicy::Lenient => {
                let mut t = naive;
                for _ in 0..MAX_GAP_MINUTES {
                    t += TimeDelta::minutes(1);
                    if let LocalResult::Single(dt) = tz.from_local_datetime(&t) {
                        return Ok(dt);
                    }
                }
                Err(LocalTimeError::Nonexistent { naive, tz })
            }
            DstPolicy::Strict => Err(LocalTimeError::Nonexistent { naive, tz }),
        },
    }
}
