use crate::extract::ExtractBounds;
use crate::link::Scheme;
use crate::AuditError;
use std::fmt;
use std::str::FromStr;

/// What a run does with the extracted links
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunMode {
    /// Count matching links only; no network access
    Count,
    /// Probe, classify and write reports
    #[default]
    Check,
}

impl RunMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Count => "count",
            Self::Check => "check",
        }
    }
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RunMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "count" => Ok(Self::Count),
            "check" => Ok(Self::Check),
            other => Err(format!("unknown mode '{}', expected count or check", other)),
        }
    }
}

/// Parameters of a single run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunOptions {
    pub scheme: Scheme,
    pub mode: RunMode,
    /// Exact course full name; `None` scans every course
    pub course: Option<String>,
    /// Re-probe good HTTP links under HTTPS
    pub check_conversion: bool,
    /// Write verified HTTPS links back to the store
    pub update: bool,
    pub bounds: ExtractBounds,
}

impl RunOptions {
    /// Rejects option combinations that cannot run
    pub fn validate(&self) -> Result<(), AuditError> {
        if self.update && !self.check_conversion {
            return Err(AuditError::Validation(
                "update requires check-conversion".to_string(),
            ));
        }

        if self.check_conversion && self.scheme.upgraded().is_none() {
            return Err(AuditError::Validation(format!(
                "check-conversion is only available for {} links",
                Scheme::Http
            )));
        }

        if self.mode == RunMode::Count && (self.check_conversion || self.update) {
            return Err(AuditError::Validation(
                "check-conversion and update are not available in count mode".to_string(),
            ));
        }

        if self.bounds.lower > self.bounds.upper {
            return Err(AuditError::Validation(format!(
                "lower bound {} exceeds upper bound {}",
                self.bounds.lower, self.bounds.upper
            )));
        }

        Ok(())
    }
}
