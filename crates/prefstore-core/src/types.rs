//! Small shared types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which preference tree a store binds to.
///
/// `System` is machine-wide and usually writable only with elevated
/// privilege; that is where silently denied writes show up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    #[default]
    User,
    System,
}

impl Scope {
    /// Lowercase name, also used as the directory name under a root.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Scope::User => "user",
            Scope::System => "system",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "user" => Ok(Scope::User),
            "system" => Ok(Scope::System),
            other => Err(format!("unknown scope: {other}")),
        }
    }
}
