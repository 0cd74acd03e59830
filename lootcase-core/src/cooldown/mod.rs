use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use lootcase_common::models::MAX_COOLDOWN_SECS;

use crate::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum GateState {
    Available,
    OnCooldown {
        #[serde(with = "remaining_secs")]
        remaining: Duration,
    },
}

impl GateState {
    pub fn is_available(&self) -> bool {
        matches!(self, GateState::Available)
    }
}

/// Time-based lock between two openings of the same case by one subject.
///
/// Holds no state of its own; availability is recomputed from the stored
/// `last_opened_at` on every read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CooldownGate {
    duration: Option<Duration>,
}

impl CooldownGate {
    pub fn new(duration: Option<Duration>) -> Self {
        Self { duration: duration.filter(|d| *d > Duration::zero()) }
    }

    pub fn none() -> Self {
        Self { duration: None }
    }

    /// Fails above [`MAX_COOLDOWN_SECS`]; zero or negative means no gate.
    pub fn hours(hours: i64) -> Result<Self, Error> {
        let secs = hours
            .checked_mul(3600)
            .ok_or_else(|| Error::Parse(format!("cooldown of {}h is out of range", hours)))?;
        Self::from_secs(Some(secs))
    }

    /// Fails above [`MAX_COOLDOWN_SECS`]; zero or negative means no gate.
    pub fn from_secs(secs: Option<i64>) -> Result<Self, Error> {
        let Some(secs) = secs.filter(|s| *s > 0) else {
            return Ok(Self::none());
        };
        if secs > MAX_COOLDOWN_SECS {
            return Err(Error::Parse(format!(
                "cooldown of {}s exceeds the {}s limit",
                secs, MAX_COOLDOWN_SECS
            )));
        }
        let duration = Duration::try_seconds(secs)
            .ok_or_else(|| Error::Parse(format!("cooldown of {}s is out of range", secs)))?;
        Ok(Self::new(Some(duration)))
    }

    pub fn duration(&self) -> Option<Duration> {
        self.duration
    }

    pub fn state(&self, last_opened_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> GateState {
        let (duration, last) = match (self.duration, last_opened_at) {
            (Some(d), Some(last)) => (d, last),
            _ => return GateState::Available,
        };

        let elapsed = now - last;
        if elapsed >= duration {
            return GateState::Available;
        }
        // A timestamp from the future (clock skew) blocks for one full window.
        GateState::OnCooldown {
            remaining: (duration - elapsed).min(duration),
        }
    }

    /// Read-only; never touches the stored timestamp.
    pub fn check(&self, last_opened_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> Result<(), Error> {
        match self.state(last_opened_at, now) {
            GateState::Available => Ok(()),
            GateState::OnCooldown { remaining } => Err(Error::OnCooldown { remaining }),
        }
    }

    /// `Ok(None)` when there is no gate; an error when the deadline is past the calendar.
    pub fn next_available_at(&self, opened_at: DateTime<Utc>) -> Result<Option<DateTime<Utc>>, Error> {
        let Some(d) = self.duration else {
            return Ok(None);
        };
        opened_at
            .checked_add_signed(d)
            .map(Some)
            .ok_or_else(|| Error::Parse(format!("{} plus {}s is out of range", opened_at, d.num_seconds())))
    }
}

mod remaining_secs {
    use chrono::Duration;
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_i64(d.num_seconds())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        let secs = i64::deserialize(d)?;
        Duration::try_seconds(secs)
            .ok_or_else(|| D::Error::custom(format!("remaining of {}s is out of range", secs)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 10, 9, 0, 0).unwrap()
    }

    #[test]
    fn never_opened_is_available() {
        assert_eq!(CooldownGate::hours(24).unwrap().state(None, t0()), GateState::Available);
    }

    #[test]
    fn gate_without_duration_is_always_available() {
        let gate = CooldownGate::none();
        assert_eq!(gate.state(Some(t0()), t0()), GateState::Available);
        assert_eq!(gate.next_available_at(t0()).unwrap(), None);
        assert_eq!(CooldownGate::from_secs(Some(0)).unwrap(), CooldownGate::none());
        assert_eq!(CooldownGate::from_secs(None).unwrap(), CooldownGate::none());
    }

    #[test]
    fn reopens_exactly_at_the_deadline() {
        let gate = CooldownGate::hours(24).unwrap();
        let last = t0();
        assert!(!gate.state(Some(last), last + Duration::hours(24) - Duration::seconds(1)).is_available());
        assert!(gate.state(Some(last), last + Duration::hours(24)).is_available());
        assert_eq!(gate.next_available_at(last).unwrap(), Some(last + Duration::hours(24)));
    }

    #[test]
    fn future_timestamps_cap_remaining_at_the_window() {
        let gate = CooldownGate::hours(1).unwrap();
        let now = t0();
        let state = gate.state(Some(now + Duration::hours(5)), now);
        assert_eq!(state, GateState::OnCooldown { remaining: Duration::hours(1) });
    }

    #[test]
    fn check_reports_remaining() {
        let gate = CooldownGate::hours(24).unwrap();
        let now = t0();
        let last = now - Duration::hours(23);
        match gate.check(Some(last), now) {
            Err(Error::OnCooldown { remaining }) => assert_eq!(remaining, Duration::hours(1)),
            other => panic!("expected OnCooldown, got {:?}", other),
        }
    }

    #[test]
    fn oversized_durations_are_errors() {
        assert!(matches!(CooldownGate::hours(i64::MAX), Err(Error::Parse(_))));
        assert!(matches!(CooldownGate::from_secs(Some(i64::MAX)), Err(Error::Parse(_))));
        assert!(matches!(CooldownGate::from_secs(Some(10_000_000_000_000)), Err(Error::Parse(_))));
        assert!(matches!(CooldownGate::from_secs(Some(MAX_COOLDOWN_SECS + 1)), Err(Error::Parse(_))));

        let longest = CooldownGate::from_secs(Some(MAX_COOLDOWN_SECS)).unwrap();
        assert_eq!(longest.duration(), Some(Duration::seconds(MAX_COOLDOWN_SECS)));
    }

    #[test]
    fn gate_state_json_rejects_out_of_range_remaining() {
        let json = serde_json::to_string(&GateState::OnCooldown { remaining: Duration::minutes(1) }).unwrap();
        assert_eq!(json, r#"{"state":"on_cooldown","remaining":60}"#);
        let huge = format!(r#"{{"state":"on_cooldown","remaining":{}}}"#, i64::MAX);
        assert!(serde_json::from_str::<GateState>(&huge).is_err());
    }

    #[test]
    fn deadline_past_the_calendar_is_an_error() {
        let gate = CooldownGate::hours(24).unwrap();
        let edge = DateTime::<Utc>::MAX_UTC - Duration::hours(1);
        assert!(matches!(gate.next_available_at(edge), Err(Error::Parse(_))));
    }
}
