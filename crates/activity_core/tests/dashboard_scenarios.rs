use activity_core::{ActivityFilter, ActivityHub, Availability};
use shared::{
    domain::{parse_date, parse_time, ActivityDraft, ActivityId, ActivityStatus, Category, Role},
    error::HubError,
};

fn chess_club(capacity: u32) -> ActivityDraft {
    ActivityDraft {
        title: "Chess Club".into(),
        description: "Weekly games and puzzle ladder".into(),
        category: Category::Academic,
        date: parse_date("2025-02-05").expect("date"),
        time: parse_time("16:30").expect("time"),
        location: "Library".into(),
        capacity,
        instructor: "Rajesh Nichenametla".into(),
        status: ActivityStatus::Upcoming,
    }
}

#[test]
fn student_session_lifecycle_resets_registrations() {
    let mut hub = ActivityHub::with_demo_data().expect("demo data");

    hub.login("Ada", Role::Student).expect("login");
    let seeded: Vec<&str> = hub
        .user_registrations()
        .iter()
        .map(ActivityId::as_str)
        .collect();
    assert_eq!(seeded, ["1", "2", "4", "6"]);

    let mine: Vec<&str> = hub
        .my_activities()
        .iter()
        .map(|activity| activity.title.as_str())
        .collect();
    assert_eq!(
        mine,
        [
            "Basketball Club",
            "Robotics Workshop",
            "Math Olympiad Training",
            "Chess Tournament"
        ]
    );

    hub.logout();
    assert!(hub.user_registrations().is_empty());
    assert!(hub.my_activities().is_empty());
}

#[test]
fn admin_created_activity_shows_up_in_manage_listing() {
    let mut hub = ActivityHub::with_demo_data().expect("demo data");
    hub.login("Grace", Role::Admin).expect("login");
    let before = hub.activities().len();

    let id = hub.create_activity(chess_club(10)).expect("create");

    assert_eq!(hub.activities().len(), before + 1);
    let listed = hub.activities().last().expect("listed");
    assert_eq!(listed.id, id);
    assert_eq!(listed.title, "Chess Club");
    assert_eq!(hub.enrolled(&id), 0);
    assert!(hub.registrations_of(&id).is_empty());
    assert!(hub.activities()[..before].iter().all(|activity| activity.id != id));

    let stats = hub.admin_stats();
    assert_eq!(stats.total_activities, 7);
    assert_eq!(stats.upcoming_activities, 5);
}

#[test]
fn full_activity_is_refused_by_view_and_by_core() {
    let mut hub = ActivityHub::with_demo_data().expect("demo data");
    hub.login("Grace", Role::Admin).expect("login");
    let id = hub.create_activity(chess_club(2)).expect("create");

    hub.login("Ada", Role::Student).expect("login");
    hub.register_for_activity(&id, "user1".into()).expect("seat 1");
    hub.register_for_activity(&id, "user2".into()).expect("seat 2");

    // The browse card disables the button; nothing is submitted.
    assert_eq!(hub.availability(&id), Some(Availability::Full));
    let listed = hub
        .browse(&ActivityFilter::new("chess club", Default::default()))
        .into_iter()
        .any(|activity| activity.id == id);
    assert!(listed);

    // A caller that skips the view check is still stopped by the core.
    let err = hub.register(&id).expect_err("full");
    assert!(matches!(err, HubError::ActivityFull { enrolled: 2, capacity: 2, .. }));
    assert_eq!(hub.enrolled(&id), 2);
    assert!(!hub.user_registrations().contains(&id));
}

#[test]
fn double_registration_counts_twice() {
    let mut hub = ActivityHub::with_demo_data().expect("demo data");
    hub.login("Ada", Role::Student).expect("login");
    let garden = ActivityId::from("5");

    let first = hub.register(&garden).expect("first").enrolled;
    let second = hub.register(&garden).expect("second").enrolled;

    assert_eq!((first, second), (3, 4));
    let user_id = hub.current_session().expect("session").user().id.clone();
    let mine = hub
        .registrations_of(&garden)
        .iter()
        .filter(|registered| **registered == user_id)
        .count();
    assert_eq!(mine, 2);
}
