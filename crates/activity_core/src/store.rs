//! Ordered activity records plus the registration index.

use std::collections::HashMap;

use shared::{
    domain::{Activity, ActivityDraft, ActivityId, UserId},
    error::HubError,
};
use tracing::debug;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    Updated,
    NotFound,
}

/// Activities in insertion order and, per activity, the users enrolled in it.
///
/// The registration lists are multisets: registering the same user twice
/// counts twice. The enrolled count of an activity is always the length of
/// its list, so there is no separate counter that could drift.
#[derive(Debug, Clone, Default)]
pub struct ActivityStore {
    activities: Vec<Activity>,
    registrations: HashMap<ActivityId, Vec<UserId>>,
}

impl ActivityStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(
        activities: Vec<Activity>,
        registrations: HashMap<ActivityId, Vec<UserId>>,
    ) -> Self {
        Self {
            activities,
            registrations,
        }
    }

    pub fn activities(&self) -> &[Activity] {
        &self.activities
    }

    pub fn get(&self, activity_id: &ActivityId) -> Option<&Activity> {
        self.activities
            .iter()
            .find(|activity| &activity.id == activity_id)
    }

    pub fn contains(&self, activity_id: &ActivityId) -> bool {
        self.get(activity_id).is_some()
    }

    pub fn len(&self) -> usize {
        self.activities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.activities.is_empty()
    }

    pub fn registrations_of(&self, activity_id: &ActivityId) -> &[UserId] {
        self.registrations
            .get(activity_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn enrolled(&self, activity_id: &ActivityId) -> usize {
        self.registrations_of(activity_id).len()
    }

    /// Sum of registration list lengths over the stored activities.
    pub fn total_registrations(&self) -> usize {
        self.activities
            .iter()
            .map(|activity| self.enrolled(&activity.id))
            .sum()
    }

    pub fn create(&mut self, draft: ActivityDraft) -> &Activity {
        let activity_id = self.fresh_id();
        self.registrations.insert(activity_id.clone(), Vec::new());
        let index = self.activities.len();
        self.activities.push(Activity::from_draft(activity_id, draft));
        &self.activities[index]
    }

    /// Replaces the record with the same identifier; registrations are kept.
    pub fn update(&mut self, activity: Activity) -> UpdateOutcome {
        match self
            .activities
            .iter_mut()
            .find(|existing| existing.id == activity.id)
        {
            Some(slot) => {
                *slot = activity;
                UpdateOutcome::Updated
            }
            None => UpdateOutcome::NotFound,
        }
    }

    /// Appends `user_id` to the activity's registrations and returns the new
    /// enrolled count. The store is left untouched on error.
    pub fn register(
        &mut self,
        activity_id: &ActivityId,
        user_id: UserId,
    ) -> Result<usize, HubError> {
        let capacity = self
            .get(activity_id)
            .ok_or_else(|| HubError::NotFound(activity_id.clone()))?
            .capacity;
        let enrolled = self.enrolled(activity_id);
        if enrolled >= capacity as usize {
            return Err(HubError::ActivityFull {
                activity_id: activity_id.clone(),
                enrolled,
                capacity,
            });
        }

        let entries = self.registrations.entry(activity_id.clone()).or_default();
        entries.push(user_id);
        debug!(activity_id = %activity_id, enrolled = entries.len(), "registration recorded");
        Ok(entries.len())
    }

    fn fresh_id(&self) -> ActivityId {
        loop {
            let candidate = ActivityId::new(Uuid::new_v4().simple().to_string());
            if !self.contains(&candidate) && !self.registrations.contains_key(&candidate) {
                return candidate;
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/store_tests.rs"]
mod tests;
