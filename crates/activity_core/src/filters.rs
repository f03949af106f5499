//! Read-only view predicates over the activity list.

use std::{fmt, str::FromStr};

use serde::Serialize;
use shared::domain::{Activity, ActivityId, ActivityStatus, Category, ParseLabelError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    pub fn matches(self, category: Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(wanted) => wanted == category,
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(CategoryFilter::All);
        }
        s.parse().map(CategoryFilter::Only)
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => f.write_str("all"),
            CategoryFilter::Only(category) => f.write_str(category.as_str()),
        }
    }
}

/// Search box plus category dropdown of the student browse view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivityFilter {
    pub search: String,
    pub category: CategoryFilter,
}

impl ActivityFilter {
    pub fn new(search: impl Into<String>, category: CategoryFilter) -> Self {
        Self {
            search: search.into(),
            category,
        }
    }

    pub fn matches(&self, activity: &Activity) -> bool {
        self.matches_search(activity) && self.category.matches(activity.category)
    }

    fn matches_search(&self, activity: &Activity) -> bool {
        let needle = self.search.to_lowercase();
        activity.title.to_lowercase().contains(&needle)
            || activity.description.to_lowercase().contains(&needle)
    }
}

/// Upcoming activities that pass `filter`, in store order.
pub fn browse<'a>(activities: &'a [Activity], filter: &ActivityFilter) -> Vec<&'a Activity> {
    activities
        .iter()
        .filter(|activity| filter.matches(activity))
        .filter(|activity| activity.status == ActivityStatus::Upcoming)
        .collect()
}

/// Activities of any status whose identifier is in `registered`, in store order.
pub fn my_activities<'a>(
    activities: &'a [Activity],
    registered: &[ActivityId],
) -> Vec<&'a Activity> {
    activities
        .iter()
        .filter(|activity| registered.contains(&activity.id))
        .collect()
}

/// State of the register button on an activity card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Availability {
    Open,
    Registered,
    Full,
    Closed,
}

impl Availability {
    pub fn allows_registration(self) -> bool {
        self == Availability::Open
    }

    pub fn label(self) -> &'static str {
        match self {
            Availability::Open => "Register",
            Availability::Registered => "Registered",
            Availability::Full => "Full",
            Availability::Closed => "Closed",
        }
    }
}

pub fn availability(activity: &Activity, enrolled: usize, is_registered: bool) -> Availability {
    if is_registered {
        Availability::Registered
    } else if spots_remaining(activity, enrolled) == 0 {
        Availability::Full
    } else if activity.status != ActivityStatus::Upcoming {
        Availability::Closed
    } else {
        Availability::Open
    }
}

pub fn spots_remaining(activity: &Activity, enrolled: usize) -> usize {
    (activity.capacity as usize).saturating_sub(enrolled)
}

#[cfg(test)]
#[path = "tests/filters_tests.rs"]
mod tests;
