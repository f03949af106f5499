use super::*;
use crate::seed;
use shared::domain::{parse_date, parse_time, ActivityDraft};

fn draft(title: &str, status: ActivityStatus, date: &str, capacity: u32) -> ActivityDraft {
    ActivityDraft {
        title: title.to_string(),
        description: "practice".into(),
        category: Category::Arts,
        date: parse_date(date).expect("date"),
        time: parse_time("10:00").expect("time"),
        location: "Hall".into(),
        capacity,
        instructor: "Mr. Keating".into(),
        status,
    }
}

#[test]
fn admin_stats_over_demo_data() {
    let store = seed::demo_store().expect("seed");
    assert_eq!(
        admin_stats(&store),
        AdminStats {
            total_activities: 6,
            total_registrations: 15,
            upcoming_activities: 4,
            average_registrations: 2,
        }
    );
}

#[test]
fn average_enrollment_is_zero_without_activities() {
    assert_eq!(average_enrollment(0, 0), 0);
    assert_eq!(average_enrollment(7, 0), 0);
    assert_eq!(admin_stats(&ActivityStore::new()).average_registrations, 0);
}

#[test]
fn average_enrollment_rounds_down() {
    assert_eq!(average_enrollment(11, 4), 2);
    assert_eq!(average_enrollment(12, 4), 3);
}

#[test]
fn enrollment_rate_rounds_half_up() {
    assert_eq!(enrollment_rate(3, 25), 12);
    assert_eq!(enrollment_rate(1, 8), 13);
    assert_eq!(enrollment_rate(1, 3), 33);
    assert_eq!(enrollment_rate(2, 3), 67);
    assert_eq!(enrollment_rate(24, 24), 100);
    assert_eq!(enrollment_rate(0, 10), 0);
    assert_eq!(enrollment_rate(5, 0), 0);
}

#[test]
fn participation_orders_by_status_then_date() {
    let mut store = ActivityStore::new();
    store.create(draft("done-late", ActivityStatus::Completed, "2025-03-01", 10));
    store.create(draft("soon-late", ActivityStatus::Upcoming, "2025-02-10", 10));
    store.create(draft("running", ActivityStatus::Ongoing, "2025-01-01", 10));
    store.create(draft("done-early", ActivityStatus::Completed, "2025-01-05", 10));
    store.create(draft("soon-early", ActivityStatus::Upcoming, "2025-02-01", 10));

    let titles: Vec<String> = participation_table(&store)
        .into_iter()
        .map(|row| row.title)
        .collect();
    assert_eq!(
        titles,
        ["soon-early", "soon-late", "running", "done-early", "done-late"]
    );
}

#[test]
fn participation_rows_carry_registration_counts() {
    let store = seed::demo_store().expect("seed");
    let rows = participation_table(&store);

    let order: Vec<&str> = rows.iter().map(|row| row.activity_id.as_str()).collect();
    assert_eq!(order, ["2", "4", "1", "5", "3", "6"]);

    let chess = rows.last().expect("chess row");
    assert_eq!(chess.enrolled, 4);
    assert_eq!(chess.capacity, 24);
    assert_eq!(chess.enrollment_rate, 17);
}

#[test]
fn student_stats_count_registered_upcoming_and_completed() {
    let store = seed::demo_store().expect("seed");
    let registered = seed::placeholder_student_registrations();
    assert_eq!(
        student_stats(store.activities(), &registered),
        StudentStats {
            registered: 4,
            upcoming: 3,
            completed: 1,
        }
    );
}
