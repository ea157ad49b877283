//! CARP status parsing from `ifconfig` output.
//!
//! FreeBSD reports CARP state as a line of the form
//!
//! ```text
//!     carp: MASTER vhid 10 advbase 1 advskew 0
//! ```
//!
//! The first such line wins; the role word and VHID must be on the same line.

use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

static CARP_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)carp:[ \t]*(\S+)[ \t]+.*vhid[ \t]+(\d+)").expect("CARP pattern is valid")
});

/// Role word reported on a CARP line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CarpRole {
    Master,
    Backup,
    /// Anything else (`INIT`, garbage, ...); never a valid failover state
    Other(String),
}

impl CarpRole {
    fn from_word(word: &str) -> Self {
        if word.eq_ignore_ascii_case("MASTER") {
            CarpRole::Master
        } else if word.eq_ignore_ascii_case("BACKUP") {
            CarpRole::Backup
        } else {
            CarpRole::Other(word.to_string())
        }
    }

    /// MASTER and BACKUP are the only healthy roles
    pub fn is_valid(&self) -> bool {
        matches!(self, CarpRole::Master | CarpRole::Backup)
    }
}

impl fmt::Display for CarpRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CarpRole::Master => write!(f, "MASTER"),
            CarpRole::Backup => write!(f, "BACKUP"),
            CarpRole::Other(word) => write!(f, "{}", word),
        }
    }
}

/// CARP state observed on an interface
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CarpStatus {
    /// No CARP line in the interface status
    NotConfigured,
    Configured { role: CarpRole, vhid: u32 },
}

impl fmt::Display for CarpStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CarpStatus::NotConfigured => write!(f, "not configured"),
            CarpStatus::Configured { role, vhid } => write!(f, "{} vhid {}", role, vhid),
        }
    }
}

/// Extract the first CARP role/VHID pair from interface status text.
///
/// Only the first CARP line counts. A VHID too large for a `u32` saturates
/// to `u32::MAX`, which no configured VHID can equal.
pub fn parse_carp_status(text: &str) -> CarpStatus {
    match CARP_LINE.captures(text) {
        Some(caps) => CarpStatus::Configured {
            role: CarpRole::from_word(&caps[1]),
            vhid: caps[2].parse::<u32>().unwrap_or(u32::MAX),
        },
        None => CarpStatus::NotConfigured,
    }
}
