//! The logged-in actor, modelled per role.

use shared::{
    domain::{ActivityId, Role, UserId},
    error::HubError,
};
use uuid::Uuid;

use crate::seed;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub id: UserId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentSession {
    pub user: UserProfile,
    registrations: Vec<ActivityId>,
}

impl StudentSession {
    pub fn new(user: UserProfile, registrations: Vec<ActivityId>) -> Self {
        Self {
            user,
            registrations,
        }
    }

    /// Activity identifiers in the order the student enrolled.
    pub fn registrations(&self) -> &[ActivityId] {
        &self.registrations
    }

    pub fn is_registered(&self, activity_id: &ActivityId) -> bool {
        self.registrations.contains(activity_id)
    }

    pub(crate) fn record_registration(&mut self, activity_id: ActivityId) {
        self.registrations.push(activity_id);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminSession {
    pub user: UserProfile,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Session {
    Student(StudentSession),
    Admin(AdminSession),
}

impl Session {
    /// Trust-on-assertion login: any non-blank name may take either role.
    ///
    /// Student sessions start with the placeholder enrollments rather than
    /// anything derived from the registration index.
    pub fn open(name: &str, role: Role) -> Result<Self, HubError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(HubError::Validation("name must not be empty".to_string()));
        }

        let user = UserProfile {
            id: UserId::new(Uuid::new_v4().simple().to_string()),
            name: name.to_string(),
        };
        Ok(match role {
            Role::Student => Session::Student(StudentSession::new(
                user,
                seed::placeholder_student_registrations(),
            )),
            Role::Admin => Session::Admin(AdminSession { user }),
        })
    }

    pub fn user(&self) -> &UserProfile {
        match self {
            Session::Student(student) => &student.user,
            Session::Admin(admin) => &admin.user,
        }
    }

    pub fn role(&self) -> Role {
        match self {
            Session::Student(_) => Role::Student,
            Session::Admin(_) => Role::Admin,
        }
    }

    pub fn as_student(&self) -> Option<&StudentSession> {
        match self {
            Session::Student(student) => Some(student),
            Session::Admin(_) => None,
        }
    }

    /// Header badge count.
    pub fn notification_count(&self) -> u32 {
        match self {
            Session::Student(_) => seed::STUDENT_NOTIFICATIONS,
            Session::Admin(_) => seed::ADMIN_NOTIFICATIONS,
        }
    }
}
