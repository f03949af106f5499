use super::*;
use shared::{
    domain::{parse_date, parse_time, ActivityStatus, Category},
    error::ErrorCode,
};

fn demo_hub() -> ActivityHub {
    ActivityHub::with_demo_data().expect("demo data")
}

fn draft(title: &str, capacity: u32) -> ActivityDraft {
    ActivityDraft {
        title: title.to_string(),
        description: "Openings, tactics and endgames".into(),
        category: Category::Academic,
        date: parse_date("2025-02-03").expect("date"),
        time: parse_time("15:30").expect("time"),
        location: "Library".into(),
        capacity,
        instructor: "Ms. Polgar".into(),
        status: ActivityStatus::Upcoming,
    }
}

#[test]
fn login_trims_name_and_rejects_blank() {
    let mut hub = demo_hub();
    let err = hub.login("   ", Role::Student).expect_err("blank name");
    assert_eq!(err.code(), ErrorCode::Validation);
    assert!(hub.current_session().is_none());

    let session = hub.login("  Ada  ", Role::Admin).expect("login");
    assert_eq!(session.user().name, "Ada");
    assert_eq!(session.role(), Role::Admin);
}

#[test]
fn each_login_gets_a_fresh_user_id() {
    let mut hub = demo_hub();
    let first = hub.login("Ada", Role::Student).expect("login").user().id.clone();
    let second = hub.login("Ada", Role::Student).expect("login").user().id.clone();
    assert_ne!(first, second);
}

#[test]
fn student_login_seeds_placeholder_registrations_and_logout_clears_them() {
    let mut hub = demo_hub();
    hub.login("Ada", Role::Student).expect("login");
    assert_eq!(hub.user_registrations(), seed::placeholder_student_registrations());
    assert_eq!(hub.notification_count(), Some(3));

    let closed = hub.logout().expect("had a session");
    assert_eq!(closed.user().name, "Ada");
    assert!(hub.user_registrations().is_empty());
    assert!(hub.current_session().is_none());
    assert!(hub.logout().is_none());
}

#[test]
fn admin_has_no_student_registrations() {
    let mut hub = demo_hub();
    hub.login("Grace", Role::Admin).expect("login");
    assert!(hub.user_registrations().is_empty());
    assert!(hub.student_stats().is_none());
    assert_eq!(hub.notification_count(), Some(5));
}

#[test]
fn registration_without_session_is_rejected() {
    let mut hub = demo_hub();
    let id = ActivityId::from("5");
    let err = hub.register(&id).expect_err("no session");
    assert_eq!(err, HubError::NoSession);

    let err = hub
        .register_for_activity(&id, UserId::from("user9"))
        .expect_err("no session");
    assert_eq!(err, HubError::NoSession);
    assert_eq!(hub.enrolled(&id), 2);
}

#[test]
fn student_registration_updates_index_and_personal_list() {
    let mut hub = demo_hub();
    let user_id = hub.login("Ada", Role::Student).expect("login").user().id.clone();
    let id = ActivityId::from("5");

    let registration = hub.register(&id).expect("register");
    assert_eq!(registration.title, "Community Garden Project");
    assert_eq!(registration.enrolled, 3);
    assert_eq!(hub.registrations_of(&id).last(), Some(&user_id));
    assert_eq!(hub.user_registrations().last(), Some(&id));
    assert_eq!(hub.availability(&id), Some(Availability::Registered));
    assert_eq!(hub.student_stats().expect("student").registered, 5);
}

#[test]
fn registering_another_user_leaves_personal_list_alone() {
    let mut hub = demo_hub();
    hub.login("Ada", Role::Student).expect("login");
    let id = ActivityId::from("5");

    hub.register_for_activity(&id, UserId::from("user9"))
        .expect("register");
    assert_eq!(hub.enrolled(&id), 3);
    assert_eq!(hub.user_registrations().len(), 4);
}

#[test]
fn admin_cannot_register_someone_else() {
    let mut hub = demo_hub();
    hub.login("Grace", Role::Admin).expect("login");
    let id = ActivityId::from("5");

    let err = hub
        .register_for_activity(&id, UserId::from("user9"))
        .expect_err("admin");
    assert_eq!(
        err,
        HubError::WrongRole {
            role: Role::Admin,
            action: "register for activities",
        }
    );
    assert_eq!(hub.enrolled(&id), 2);
    assert!(!hub.registrations_of(&id).contains(&UserId::from("user9")));
}

#[test]
fn admins_cannot_register_and_students_cannot_edit() {
    let mut hub = demo_hub();
    hub.login("Grace", Role::Admin).expect("login");
    let err = hub.register(&ActivityId::from("1")).expect_err("admin");
    assert_eq!(err.code(), ErrorCode::WrongRole);

    hub.login("Ada", Role::Student).expect("login");
    let err = hub.create_activity(draft("Chess Club", 10)).expect_err("student");
    assert_eq!(err.code(), ErrorCode::WrongRole);
    assert_eq!(hub.activities().len(), 6);
}

#[test]
fn create_requires_a_session_and_a_valid_draft() {
    let mut hub = demo_hub();
    let err = hub.create_activity(draft("Chess Club", 10)).expect_err("anon");
    assert_eq!(err, HubError::NoSession);

    hub.login("Grace", Role::Admin).expect("login");
    let err = hub.create_activity(draft("", 10)).expect_err("blank title");
    assert_eq!(err.code(), ErrorCode::Validation);
    let err = hub.create_activity(draft("Chess Club", 0)).expect_err("capacity");
    assert_eq!(err.code(), ErrorCode::Validation);
    assert_eq!(hub.activities().len(), 6);
}

#[test]
fn status_can_move_backwards_through_an_update() {
    let mut hub = demo_hub();
    hub.login("Grace", Role::Admin).expect("login");
    let id = ActivityId::from("6");

    let mut chess = hub.activity(&id).expect("chess").clone();
    assert_eq!(chess.status, ActivityStatus::Completed);
    chess.status = ActivityStatus::Upcoming;

    assert_eq!(hub.update_activity(chess).expect("update"), UpdateOutcome::Updated);
    assert_eq!(hub.activity(&id).expect("chess").status, ActivityStatus::Upcoming);
    assert_eq!(hub.enrolled(&id), 4);
}

#[test]
fn execute_reports_each_command_outcome() {
    let mut hub = demo_hub();

    let event = hub
        .execute(HubCommand::Login {
            name: "Grace".into(),
            role: Role::Admin,
        })
        .expect("login");
    assert_eq!(event.notice(), "Welcome back, Grace!");

    let event = hub
        .execute(HubCommand::CreateActivity {
            draft: draft("Chess Club", 10),
        })
        .expect("create");
    let HubEvent::ActivityCreated { activity_id, title } = event else {
        panic!("expected an ActivityCreated event");
    };
    assert_eq!(title, "Chess Club");

    let mut edited = hub.activity(&activity_id).expect("created").clone();
    edited.capacity = 12;
    let event = hub
        .execute(HubCommand::UpdateActivity { activity: edited })
        .expect("update");
    assert_eq!(event.notice(), "Activity \"Chess Club\" updated successfully!");

    let ghost = Activity::from_draft(ActivityId::from("ghost"), draft("Ghost", 3));
    let event = hub
        .execute(HubCommand::UpdateActivity { activity: ghost })
        .expect("update");
    assert_eq!(
        event,
        HubEvent::ActivityNotFound {
            activity_id: ActivityId::from("ghost")
        }
    );

    assert_eq!(hub.execute(HubCommand::Logout), Ok(HubEvent::LoggedOut));
}

#[test]
fn dispatch_folds_rejections_into_events() {
    let mut hub = demo_hub();
    let event = hub.dispatch(HubCommand::Register {
        activity_id: ActivityId::from("1"),
    });
    let HubEvent::Rejected(payload) = event else {
        panic!("expected a rejection");
    };
    assert_eq!(payload.code, ErrorCode::NoSession);
}

#[test]
fn register_event_names_the_activity() {
    let mut hub = demo_hub();
    hub.login("Ada", Role::Student).expect("login");
    let event = hub.dispatch(HubCommand::Register {
        activity_id: ActivityId::from("4"),
    });
    assert_eq!(event.notice(), "Successfully registered for Math Olympiad Training!");
}
