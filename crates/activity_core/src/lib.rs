//! State container for the activity hub: session, activity store, the five
//! command handlers and the derived views a dashboard renders.
//!
//! Every mutation goes through [`ActivityHub`]; views borrow it immutably and
//! are recomputed from current state each time they are asked for.

use shared::{
    domain::{Activity, ActivityDraft, ActivityId, Role, UserId},
    error::{ErrorPayload, HubError},
    protocol::{HubCommand, HubEvent},
};
use tracing::{debug, info, warn};

pub mod filters;
pub mod seed;
pub mod session;
pub mod stats;
pub mod store;

pub use filters::{ActivityFilter, Availability, CategoryFilter};
pub use session::{AdminSession, Session, StudentSession, UserProfile};
pub use stats::{AdminStats, ParticipationRow, StudentStats};
pub use store::{ActivityStore, UpdateOutcome};

/// Result of a successful registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub activity_id: ActivityId,
    pub title: String,
    pub user_id: UserId,
    pub enrolled: usize,
}

#[derive(Debug, Clone, Default)]
pub struct ActivityHub {
    store: ActivityStore,
    session: Option<Session>,
}

impl ActivityHub {
    pub fn new(store: ActivityStore) -> Self {
        Self {
            store,
            session: None,
        }
    }

    pub fn with_demo_data() -> Result<Self, HubError> {
        Ok(Self::new(seed::demo_store()?))
    }

    pub fn store(&self) -> &ActivityStore {
        &self.store
    }

    pub fn activities(&self) -> &[Activity] {
        self.store.activities()
    }

    pub fn activity(&self, activity_id: &ActivityId) -> Option<&Activity> {
        self.store.get(activity_id)
    }

    pub fn current_session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn registrations_of(&self, activity_id: &ActivityId) -> &[UserId] {
        self.store.registrations_of(activity_id)
    }

    pub fn enrolled(&self, activity_id: &ActivityId) -> usize {
        self.store.enrolled(activity_id)
    }

    /// The current student's enrollments; empty for admins and when logged out.
    pub fn user_registrations(&self) -> &[ActivityId] {
        self.session
            .as_ref()
            .and_then(Session::as_student)
            .map(StudentSession::registrations)
            .unwrap_or(&[])
    }

    pub fn notification_count(&self) -> Option<u32> {
        self.session.as_ref().map(Session::notification_count)
    }

    // Commands.

    pub fn login(&mut self, name: &str, role: Role) -> Result<&Session, HubError> {
        let session = Session::open(name, role).inspect_err(|err| {
            warn!(error = %err, "login rejected");
        })?;
        if let Some(previous) = &self.session {
            debug!(user_id = %previous.user().id, "replacing active session");
        }
        info!(
            user_id = %session.user().id,
            name = %session.user().name,
            role = %role,
            "session opened"
        );
        Ok(self.session.insert(session))
    }

    /// Ends the session, if any, and returns it.
    pub fn logout(&mut self) -> Option<Session> {
        let closed = self.session.take();
        match &closed {
            Some(session) => info!(user_id = %session.user().id, "session closed"),
            None => debug!("logout without an active session"),
        }
        closed
    }

    /// Registers `user_id` under a student session. When the registrant is
    /// the logged-in student the enrollment is also added to their list.
    pub fn register_for_activity(
        &mut self,
        activity_id: &ActivityId,
        user_id: UserId,
    ) -> Result<Registration, HubError> {
        let student = match self.session.as_mut() {
            None => {
                warn!(activity_id = %activity_id, "registration without an active session");
                return Err(HubError::NoSession);
            }
            Some(Session::Admin(_)) => {
                warn!(activity_id = %activity_id, "admin session attempted a registration");
                return Err(HubError::WrongRole {
                    role: Role::Admin,
                    action: "register for activities",
                });
            }
            Some(Session::Student(student)) => student,
        };

        let enrolled = self
            .store
            .register(activity_id, user_id.clone())
            .inspect_err(|err| {
                warn!(activity_id = %activity_id, error = %err, "registration rejected");
            })?;
        if student.user.id == user_id {
            student.record_registration(activity_id.clone());
        }

        let title = self
            .store
            .get(activity_id)
            .map(|activity| activity.title.clone())
            .unwrap_or_default();
        info!(
            activity_id = %activity_id,
            user_id = %user_id,
            enrolled,
            "registered for activity"
        );
        Ok(Registration {
            activity_id: activity_id.clone(),
            title,
            user_id,
            enrolled,
        })
    }

    /// Registers the logged-in student.
    pub fn register(&mut self, activity_id: &ActivityId) -> Result<Registration, HubError> {
        let user_id = match &self.session {
            None => {
                warn!(activity_id = %activity_id, "registration without an active session");
                return Err(HubError::NoSession);
            }
            Some(Session::Admin(_)) => {
                return Err(HubError::WrongRole {
                    role: Role::Admin,
                    action: "register for activities",
                })
            }
            Some(Session::Student(student)) => student.user.id.clone(),
        };
        self.register_for_activity(activity_id, user_id)
    }

    pub fn create_activity(&mut self, draft: ActivityDraft) -> Result<ActivityId, HubError> {
        self.require_admin("create activities")?;
        draft.validate()?;
        let activity = self.store.create(draft);
        info!(activity_id = %activity.id, title = %activity.title, "activity created");
        Ok(activity.id.clone())
    }

    pub fn update_activity(&mut self, activity: Activity) -> Result<UpdateOutcome, HubError> {
        self.require_admin("update activities")?;
        activity.to_draft().validate()?;
        let activity_id = activity.id.clone();
        let outcome = self.store.update(activity);
        match outcome {
            UpdateOutcome::Updated => info!(activity_id = %activity_id, "activity updated"),
            UpdateOutcome::NotFound => {
                warn!(activity_id = %activity_id, "update for unknown activity")
            }
        }
        Ok(outcome)
    }

    /// Runs one command and describes its outcome.
    pub fn execute(&mut self, command: HubCommand) -> Result<HubEvent, HubError> {
        debug!(command = command.name(), "executing command");
        match command {
            HubCommand::Login { name, role } => {
                let user = self.login(&name, role)?.user().clone();
                Ok(HubEvent::LoggedIn {
                    user_id: user.id,
                    name: user.name,
                    role,
                })
            }
            HubCommand::Logout => {
                self.logout();
                Ok(HubEvent::LoggedOut)
            }
            HubCommand::Register { activity_id } => {
                let registration = self.register(&activity_id)?;
                Ok(HubEvent::Registered {
                    activity_id: registration.activity_id,
                    title: registration.title,
                    user_id: registration.user_id,
                    enrolled: registration.enrolled,
                })
            }
            HubCommand::CreateActivity { draft } => {
                let title = draft.title.clone();
                let activity_id = self.create_activity(draft)?;
                Ok(HubEvent::ActivityCreated { activity_id, title })
            }
            HubCommand::UpdateActivity { activity } => {
                let activity_id = activity.id.clone();
                let title = activity.title.clone();
                Ok(match self.update_activity(activity)? {
                    UpdateOutcome::Updated => HubEvent::ActivityUpdated { activity_id, title },
                    UpdateOutcome::NotFound => HubEvent::ActivityNotFound { activity_id },
                })
            }
        }
    }

    /// Like [`ActivityHub::execute`], folding a rejection into the event.
    pub fn dispatch(&mut self, command: HubCommand) -> HubEvent {
        self.execute(command)
            .unwrap_or_else(|err| HubEvent::Rejected(ErrorPayload::from(err)))
    }

    // Views.

    pub fn browse(&self, filter: &ActivityFilter) -> Vec<&Activity> {
        filters::browse(self.activities(), filter)
    }

    pub fn my_activities(&self) -> Vec<&Activity> {
        filters::my_activities(self.activities(), self.user_registrations())
    }

    /// Register-button state for the current session; `None` for unknown ids.
    pub fn availability(&self, activity_id: &ActivityId) -> Option<Availability> {
        let activity = self.store.get(activity_id)?;
        let is_registered = self
            .session
            .as_ref()
            .and_then(Session::as_student)
            .is_some_and(|student| student.is_registered(activity_id));
        Some(filters::availability(
            activity,
            self.store.enrolled(activity_id),
            is_registered,
        ))
    }

    pub fn admin_stats(&self) -> AdminStats {
        stats::admin_stats(&self.store)
    }

    /// `None` unless a student is logged in.
    pub fn student_stats(&self) -> Option<StudentStats> {
        let student = self.session.as_ref()?.as_student()?;
        Some(stats::student_stats(self.activities(), student.registrations()))
    }

    pub fn participation(&self) -> Vec<ParticipationRow> {
        stats::participation_table(&self.store)
    }

    fn require_admin(&self, action: &'static str) -> Result<&AdminSession, HubError> {
        match &self.session {
            Some(Session::Admin(admin)) => Ok(admin),
            Some(Session::Student(_)) => {
                warn!(action, "student session attempted an admin command");
                Err(HubError::WrongRole {
                    role: Role::Student,
                    action,
                })
            }
            None => Err(HubError::NoSession),
        }
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
