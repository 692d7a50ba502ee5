/// URL scheme definitions for link selection and conversion
use std::fmt;
use std::str::FromStr;

/// The protocol family a run scans for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Scheme {
    #[default]
    Http,
    Https,
}

impl Scheme {
    /// Returns the lowercase scheme name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Http => "http",
            Self::Https => "https",
        }
    }

    /// Returns the literal prefix links of this scheme start with
    pub fn prefix(&self) -> &'static str {
        match self {
            Self::Http => "http://",
            Self::Https => "https://",
        }
    }

    /// Returns the `LIKE` pattern used to pre-filter store rows
    pub fn like_pattern(&self) -> &'static str {
        match self {
            Self::Http => "%http:%",
            Self::Https => "%https:%",
        }
    }

    /// Returns true for the secure scheme
    pub fn is_https(&self) -> bool {
        matches!(self, Self::Https)
    }

    /// Returns the scheme links are migrated to, if any
    pub fn upgraded(&self) -> Option<Scheme> {
        match self {
            Self::Http => Some(Self::Https),
            Self::Https => None,
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "http" => Ok(Self::Http),
            "https" => Ok(Self::Https),
            other => Err(format!("unknown scheme '{}', expected http or https", other)),
        }
    }
}
