use serde::{Deserialize, Serialize};

use crate::{
    domain::{Activity, ActivityDraft, ActivityId, Role, UserId},
    error::ErrorPayload,
};

/// The five mutations a front-end may submit to the hub.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum HubCommand {
    Login { name: String, role: Role },
    Logout,
    Register { activity_id: ActivityId },
    CreateActivity { draft: ActivityDraft },
    UpdateActivity { activity: Activity },
}

impl HubCommand {
    pub fn name(&self) -> &'static str {
        match self {
            HubCommand::Login { .. } => "login",
            HubCommand::Logout => "logout",
            HubCommand::Register { .. } => "register",
            HubCommand::CreateActivity { .. } => "create_activity",
            HubCommand::UpdateActivity { .. } => "update_activity",
        }
    }
}

/// Outcome of a command, carrying what a front-end needs to notify the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum HubEvent {
    LoggedIn {
        user_id: UserId,
        name: String,
        role: Role,
    },
    LoggedOut,
    Registered {
        activity_id: ActivityId,
        title: String,
        user_id: UserId,
        enrolled: usize,
    },
    ActivityCreated {
        activity_id: ActivityId,
        title: String,
    },
    ActivityUpdated {
        activity_id: ActivityId,
        title: String,
    },
    ActivityNotFound {
        activity_id: ActivityId,
    },
    Rejected(ErrorPayload),
}

impl HubEvent {
    /// One-line notice shown after the command completes.
    pub fn notice(&self) -> String {
        match self {
            HubEvent::LoggedIn { name, .. } => format!("Welcome back, {name}!"),
            HubEvent::LoggedOut => "You have been logged out".to_string(),
            HubEvent::Registered { title, .. } => {
                format!("Successfully registered for {title}!")
            }
            HubEvent::ActivityCreated { title, .. } => {
                format!("Activity \"{title}\" created successfully!")
            }
            HubEvent::ActivityUpdated { title, .. } => {
                format!("Activity \"{title}\" updated successfully!")
            }
            HubEvent::ActivityNotFound { activity_id } => {
                format!("Activity {activity_id} no longer exists; nothing was updated")
            }
            HubEvent::Rejected(payload) => payload.message.clone(),
        }
    }

    pub fn is_rejection(&self) -> bool {
        matches!(self, HubEvent::Rejected(_))
    }
}
