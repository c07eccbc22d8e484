use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Elapsed time split into display fields.
///
/// Sub-second precision is truncated, so 1.9s shows as `00:00:01`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct ElapsedFields {
    pub hours: u64,
    pub minutes: u8,
    pub seconds: u8,
}

impl ElapsedFields {
    pub fn from_duration(elapsed: Duration) -> Self {
        let total = elapsed.as_secs();
        Self {
            hours: total / 3600,
            minutes: ((total % 3600) / 60) as u8,
            seconds: (total % 60) as u8,
        }
    }
}

impl fmt::Display for ElapsedFields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hours, self.minutes, self.seconds)
    }
}

/// One report for one running timer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElapsedUpdate {
    pub label: Arc<str>,
    pub elapsed: Duration,
    pub fields: ElapsedFields,
}

impl ElapsedUpdate {
    pub fn new(label: Arc<str>, elapsed: Duration) -> Self {
        Self {
            label,
            elapsed,
            fields: ElapsedFields::from_duration(elapsed),
        }
    }

    /// `HH:MM:SS`
    pub fn formatted(&self) -> String {
        self.fields.to_string()
    }
}
