//! Sort enums for the history list
//!
//! Both axes are two-valued and only ever flipped, so each enum exposes
//! [`other()`](SortField::other) instead of a free-form setter.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::history::Entry;

/// Which timestamp entries are ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    Request,
    #[default]
    Response,
}

impl SortField {
    pub fn other(self) -> Self {
        match self {
            SortField::Request => SortField::Response,
            SortField::Response => SortField::Request,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SortField::Request => "request",
            SortField::Response => "response",
        }
    }

    /// The timestamp of `entry` this field sorts by.
    pub fn date_of(self, entry: &Entry) -> DateTime<Utc> {
        match self {
            SortField::Request => entry.request.date,
            SortField::Response => entry.response.date,
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "request" => Ok(SortField::Request),
            "response" => Ok(SortField::Response),
            other => Err(format!("unknown sort field: {other}")),
        }
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn other(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }

    /// Which entries end up first: "oldest" or "newest".
    pub fn first_label(self) -> &'static str {
        match self {
            SortOrder::Asc => "oldest",
            SortOrder::Desc => "newest",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(format!("unknown sort order: {other}")),
        }
    }
}
