use std::{fmt, str::FromStr};

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::HubError;

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const TIME_FORMAT: &str = "%H:%M";

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }
    };
}

id_newtype!(ActivityId);
id_newtype!(UserId);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} '{value}', expected one of: {expected}")]
pub struct ParseLabelError {
    pub kind: &'static str,
    pub value: String,
    pub expected: String,
}

macro_rules! labelled_enum {
    ($name:ident, $kind:literal, { $($variant:ident => $label:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = ParseLabelError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let needle = s.trim();
                $name::ALL
                    .iter()
                    .copied()
                    .find(|candidate| candidate.as_str().eq_ignore_ascii_case(needle))
                    .ok_or_else(|| ParseLabelError {
                        kind: $kind,
                        value: s.to_string(),
                        expected: $name::ALL
                            .iter()
                            .map(|candidate| candidate.as_str())
                            .collect::<Vec<_>>()
                            .join("|"),
                    })
            }
        }
    };
}

labelled_enum!(Role, "role", {
    Student => "student",
    Admin => "admin",
});

labelled_enum!(Category, "category", {
    Sports => "sports",
    Academic => "academic",
    Arts => "arts",
    Community => "community",
    Technology => "technology",
});

labelled_enum!(ActivityStatus, "status", {
    Upcoming => "upcoming",
    Ongoing => "ongoing",
    Completed => "completed",
});

impl ActivityStatus {
    /// Sort key used by the participation overview.
    pub fn precedence(self) -> u8 {
        match self {
            ActivityStatus::Upcoming => 0,
            ActivityStatus::Ongoing => 1,
            ActivityStatus::Completed => 2,
        }
    }
}

/// Defaults of a blank create form.
pub const DEFAULT_CATEGORY: Category = Category::Sports;
pub const DEFAULT_CAPACITY: u32 = 20;
pub const DEFAULT_STATUS: ActivityStatus = ActivityStatus::Upcoming;

/// Serde form of a time of day: written as `HH:MM`, read from `HH:MM` or `HH:MM:SS`.
pub mod time_of_day {
    use chrono::NaiveTime;
    use serde::{de::Error as _, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&time.format(super::TIME_FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_time(&raw).map_err(D::Error::custom)
    }
}

/// Every field of an activity except its identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityDraft {
    pub title: String,
    pub description: String,
    pub category: Category,
    pub date: NaiveDate,
    #[serde(with = "time_of_day")]
    pub time: NaiveTime,
    pub location: String,
    pub capacity: u32,
    pub instructor: String,
    pub status: ActivityStatus,
}

impl ActivityDraft {
    pub fn validate(&self) -> Result<(), HubError> {
        let required = [
            ("title", &self.title),
            ("description", &self.description),
            ("location", &self.location),
            ("instructor", &self.instructor),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(HubError::Validation(format!("{field} must not be empty")));
            }
        }
        if self.capacity == 0 {
            return Err(HubError::Validation(
                "capacity must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    pub id: ActivityId,
    pub title: String,
    pub description: String,
    pub category: Category,
    pub date: NaiveDate,
    #[serde(with = "time_of_day")]
    pub time: NaiveTime,
    pub location: String,
    pub capacity: u32,
    pub instructor: String,
    pub status: ActivityStatus,
}

impl Activity {
    pub fn from_draft(id: ActivityId, draft: ActivityDraft) -> Self {
        Self {
            id,
            title: draft.title,
            description: draft.description,
            category: draft.category,
            date: draft.date,
            time: draft.time,
            location: draft.location,
            capacity: draft.capacity,
            instructor: draft.instructor,
            status: draft.status,
        }
    }

    /// Prefill for the edit form.
    pub fn to_draft(&self) -> ActivityDraft {
        ActivityDraft {
            title: self.title.clone(),
            description: self.description.clone(),
            category: self.category,
            date: self.date,
            time: self.time,
            location: self.location.clone(),
            capacity: self.capacity,
            instructor: self.instructor.clone(),
            status: self.status,
        }
    }

    pub fn instructor_initials(&self) -> String {
        self.instructor
            .split_whitespace()
            .filter_map(|part| part.chars().next())
            .collect()
    }
}

pub fn parse_date(raw: &str) -> Result<NaiveDate, HubError> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
        .map_err(|e| HubError::Validation(format!("invalid date '{raw}': {e}")))
}

/// Accepts `HH:MM` as produced by a time input, and `HH:MM:SS`.
pub fn parse_time(raw: &str) -> Result<NaiveTime, HubError> {
    let raw_trimmed = raw.trim();
    NaiveTime::parse_from_str(raw_trimmed, TIME_FORMAT)
        .or_else(|_| NaiveTime::parse_from_str(raw_trimmed, "%H:%M:%S"))
        .map_err(|e| HubError::Validation(format!("invalid time '{raw}': {e}")))
}
