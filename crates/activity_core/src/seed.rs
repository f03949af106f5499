//! Demo records the hub starts with, and the mock values tied to a session.

use std::collections::HashMap;

use shared::{
    domain::{parse_date, parse_time, Activity, ActivityId, ActivityStatus, Category, UserId},
    error::HubError,
};

use crate::store::ActivityStore;

pub const STUDENT_NOTIFICATIONS: u32 = 3;
pub const ADMIN_NOTIFICATIONS: u32 = 5;

const PLACEHOLDER_STUDENT_REGISTRATIONS: [&str; 4] = ["1", "2", "4", "6"];

const DEMO_INSTRUCTOR: &str = "Rajesh Nichenametla";

struct SeedActivity {
    id: &'static str,
    title: &'static str,
    description: &'static str,
    category: Category,
    date: &'static str,
    time: &'static str,
    location: &'static str,
    capacity: u32,
    status: ActivityStatus,
    registrations: &'static [&'static str],
}

const DEMO_ACTIVITIES: [SeedActivity; 6] = [
    SeedActivity {
        id: "1",
        title: "Basketball Club",
        description: "Weekly basketball training sessions focusing on fundamentals, teamwork, and competitive play. All skill levels welcome!",
        category: Category::Sports,
        date: "2025-01-25",
        time: "16:00",
        location: "Main Gymnasium",
        capacity: 25,
        status: ActivityStatus::Upcoming,
        registrations: &["user1", "user2", "user3"],
    },
    SeedActivity {
        id: "2",
        title: "Robotics Workshop",
        description: "Build and program robots using Arduino and sensors. Learn electronics, coding, and engineering principles through hands-on projects.",
        category: Category::Technology,
        date: "2025-01-22",
        time: "14:00",
        location: "Tech Lab 201",
        capacity: 15,
        status: ActivityStatus::Upcoming,
        registrations: &["user1", "user4"],
    },
    SeedActivity {
        id: "3",
        title: "Drama Club Rehearsal",
        description: "Prepare for the spring musical production. Work on acting, singing, and stage presence with experienced theater professionals.",
        category: Category::Arts,
        date: "2025-01-20",
        time: "15:30",
        location: "Auditorium",
        capacity: 30,
        status: ActivityStatus::Ongoing,
        registrations: &["user2", "user5", "user6"],
    },
    SeedActivity {
        id: "4",
        title: "Math Olympiad Training",
        description: "Advanced problem-solving techniques and competition strategies for mathematics competitions at regional and national levels.",
        category: Category::Academic,
        date: "2025-01-24",
        time: "13:00",
        location: "Room 305",
        capacity: 20,
        status: ActivityStatus::Upcoming,
        registrations: &["user1"],
    },
    SeedActivity {
        id: "5",
        title: "Community Garden Project",
        description: "Help maintain the school garden and learn about sustainable agriculture, environmental science, and community engagement.",
        category: Category::Community,
        date: "2025-01-26",
        time: "10:00",
        location: "School Garden",
        capacity: 12,
        status: ActivityStatus::Upcoming,
        registrations: &["user3", "user7"],
    },
    SeedActivity {
        id: "6",
        title: "Chess Tournament",
        description: "Annual inter-school chess championship. Practice strategic thinking and compete against other schools in the region.",
        category: Category::Academic,
        date: "2025-01-15",
        time: "09:00",
        location: "Library",
        capacity: 24,
        status: ActivityStatus::Completed,
        registrations: &["user1", "user2", "user4", "user8"],
    },
];

/// Enrollments every student session starts with.
pub fn placeholder_student_registrations() -> Vec<ActivityId> {
    PLACEHOLDER_STUDENT_REGISTRATIONS
        .iter()
        .map(|id| ActivityId::from(*id))
        .collect()
}

pub fn demo_store() -> Result<ActivityStore, HubError> {
    let mut activities = Vec::with_capacity(DEMO_ACTIVITIES.len());
    let mut registrations = HashMap::new();
    for seed in &DEMO_ACTIVITIES {
        let id = ActivityId::from(seed.id);
        activities.push(Activity {
            id: id.clone(),
            title: seed.title.to_string(),
            description: seed.description.to_string(),
            category: seed.category,
            date: parse_date(seed.date)?,
            time: parse_time(seed.time)?,
            location: seed.location.to_string(),
            capacity: seed.capacity,
            instructor: DEMO_INSTRUCTOR.to_string(),
            status: seed.status,
        });
        registrations.insert(
            id,
            seed.registrations
                .iter()
                .map(|user| UserId::from(*user))
                .collect::<Vec<_>>(),
        );
    }
    Ok(ActivityStore::from_records(activities, registrations))
}
