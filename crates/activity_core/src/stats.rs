//! Dashboard figures derived from the store on every render.

use chrono::NaiveDate;
use serde::Serialize;
use shared::domain::{Activity, ActivityId, ActivityStatus, Category};

use crate::{filters, store::ActivityStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AdminStats {
    pub total_activities: usize,
    pub total_registrations: usize,
    pub upcoming_activities: usize,
    pub average_registrations: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StudentStats {
    pub registered: usize,
    pub upcoming: usize,
    pub completed: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParticipationRow {
    pub activity_id: ActivityId,
    pub title: String,
    pub instructor: String,
    pub category: Category,
    pub date: NaiveDate,
    pub status: ActivityStatus,
    pub enrolled: usize,
    pub capacity: u32,
    pub enrollment_rate: u32,
}

pub fn admin_stats(store: &ActivityStore) -> AdminStats {
    let total_activities = store.len();
    let total_registrations = store.total_registrations();
    AdminStats {
        total_activities,
        total_registrations,
        upcoming_activities: store
            .activities()
            .iter()
            .filter(|activity| activity.status == ActivityStatus::Upcoming)
            .count(),
        average_registrations: average_enrollment(total_registrations, total_activities),
    }
}

/// Floor of `total / activities`; zero for an empty store.
pub fn average_enrollment(total_registrations: usize, activities: usize) -> usize {
    if activities == 0 {
        0
    } else {
        total_registrations / activities
    }
}

pub fn student_stats(activities: &[Activity], registered: &[ActivityId]) -> StudentStats {
    let mine = filters::my_activities(activities, registered);
    let with_status = |status: ActivityStatus| {
        mine.iter()
            .filter(|activity| activity.status == status)
            .count()
    };
    StudentStats {
        registered: registered.len(),
        upcoming: with_status(ActivityStatus::Upcoming),
        completed: with_status(ActivityStatus::Completed),
    }
}

/// `round(100 * enrolled / capacity)`, computed in integers.
pub fn enrollment_rate(enrolled: usize, capacity: u32) -> u32 {
    if capacity == 0 {
        return 0;
    }
    let enrolled = enrolled as u64;
    let capacity = u64::from(capacity);
    let rate = (200 * enrolled + capacity) / (2 * capacity);
    u32::try_from(rate).unwrap_or(u32::MAX)
}

/// Rows ordered upcoming, ongoing, completed; same status by ascending date.
pub fn participation_table(store: &ActivityStore) -> Vec<ParticipationRow> {
    let mut rows: Vec<ParticipationRow> = store
        .activities()
        .iter()
        .map(|activity| {
            let enrolled = store.enrolled(&activity.id);
            ParticipationRow {
                activity_id: activity.id.clone(),
                title: activity.title.clone(),
                instructor: activity.instructor.clone(),
                category: activity.category,
                date: activity.date,
                status: activity.status,
                enrolled,
                capacity: activity.capacity,
                enrollment_rate: enrollment_rate(enrolled, activity.capacity),
            }
        })
        .collect();

    rows.sort_by(|a, b| {
        a.status
            .precedence()
            .cmp(&b.status.precedence())
            .then(a.date.cmp(&b.date))
    });
    rows
}

#[cfg(test)]
#[path = "tests/stats_tests.rs"]
mod tests;
