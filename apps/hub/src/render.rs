//! Text and JSON renderings of hub views.

use std::io::{self, Write};

use activity_core::{
    filters, ActivityHub, AdminStats, Availability, ParticipationRow, Session, StudentStats,
};
use serde::Serialize;
use shared::domain::{Activity, DATE_FORMAT, TIME_FORMAT};

/// An activity as a listing shows it, with its derived enrollment figures.
#[derive(Debug, Serialize)]
pub struct ActivityCard<'a> {
    #[serde(flatten)]
    pub activity: &'a Activity,
    pub enrolled: usize,
    pub spots_remaining: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub availability: Option<Availability>,
}

impl<'a> ActivityCard<'a> {
    /// Card for the current session; availability is only shown to students.
    pub fn new(hub: &ActivityHub, activity: &'a Activity) -> Self {
        let enrolled = hub.enrolled(&activity.id);
        let availability = hub
            .current_session()
            .and_then(Session::as_student)
            .and_then(|_| hub.availability(&activity.id));
        Self {
            activity,
            enrolled,
            spots_remaining: filters::spots_remaining(activity, enrolled),
            availability,
        }
    }
}

#[derive(Debug, Serialize)]
struct SessionView<'a> {
    user_id: &'a str,
    name: &'a str,
    role: &'a str,
    notifications: u32,
}

pub fn write_json<W: Write, T: Serialize + ?Sized>(out: &mut W, value: &T) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)
}

pub fn write_session_json<W: Write>(out: &mut W, session: Option<&Session>) -> io::Result<()> {
    let view = session.map(|session| SessionView {
        user_id: session.user().id.as_str(),
        name: &session.user().name,
        role: session.role().as_str(),
        notifications: session.notification_count(),
    });
    write_json(out, &view)
}

pub fn write_session<W: Write>(out: &mut W, session: Option<&Session>) -> io::Result<()> {
    match session {
        Some(session) => writeln!(
            out,
            "{} ({}) id={} notifications={}",
            session.user().name,
            session.role(),
            session.user().id,
            session.notification_count()
        ),
        None => writeln!(out, "not logged in"),
    }
}

pub fn write_cards<W: Write>(out: &mut W, cards: &[ActivityCard<'_>]) -> io::Result<()> {
    if cards.is_empty() {
        return writeln!(out, "No activities found");
    }
    for card in cards {
        let activity = card.activity;
        write!(
            out,
            "[{}] {} ({}, {}) {} {} @ {} | {}/{} enrolled, {} spots left",
            activity.id,
            activity.title,
            activity.category,
            activity.status,
            activity.date.format(DATE_FORMAT),
            activity.time.format(TIME_FORMAT),
            activity.location,
            card.enrolled,
            activity.capacity,
            card.spots_remaining
        )?;
        match card.availability {
            Some(availability) => writeln!(out, " | {}", availability.label())?,
            None => writeln!(out)?,
        }
    }
    Ok(())
}

pub fn write_details<W: Write>(out: &mut W, card: &ActivityCard<'_>) -> io::Result<()> {
    let activity = card.activity;
    writeln!(out, "{} [{}]", activity.title, activity.id)?;
    writeln!(out, "  {}", activity.description)?;
    writeln!(out, "  category:   {}", activity.category)?;
    writeln!(out, "  status:     {}", activity.status)?;
    writeln!(
        out,
        "  when:       {} {}",
        activity.date.format(DATE_FORMAT),
        activity.time.format(TIME_FORMAT)
    )?;
    writeln!(out, "  location:   {}", activity.location)?;
    writeln!(
        out,
        "  instructor: {} ({})",
        activity.instructor,
        activity.instructor_initials()
    )?;
    writeln!(
        out,
        "  enrolled:   {}/{} ({} spots left)",
        card.enrolled, activity.capacity, card.spots_remaining
    )?;
    if let Some(availability) = card.availability {
        writeln!(out, "  action:     {}", availability.label())?;
    }
    Ok(())
}

pub fn write_admin_stats<W: Write>(out: &mut W, stats: &AdminStats) -> io::Result<()> {
    writeln!(out, "Total activities:      {}", stats.total_activities)?;
    writeln!(out, "Total registrations:   {}", stats.total_registrations)?;
    writeln!(out, "Upcoming activities:   {}", stats.upcoming_activities)?;
    writeln!(out, "Average registrations: {}", stats.average_registrations)
}

pub fn write_student_stats<W: Write>(out: &mut W, stats: &StudentStats) -> io::Result<()> {
    writeln!(out, "Registered: {}", stats.registered)?;
    writeln!(out, "Upcoming:   {}", stats.upcoming)?;
    writeln!(out, "Completed:  {}", stats.completed)
}

pub fn write_participation<W: Write>(out: &mut W, rows: &[ParticipationRow]) -> io::Result<()> {
    if rows.is_empty() {
        return writeln!(out, "No activities found");
    }
    for row in rows {
        writeln!(
            out,
            "[{}] {} | {} | {} | {} | {} | {}/{} | {}%",
            row.activity_id,
            row.title,
            row.instructor,
            row.category,
            row.date.format(DATE_FORMAT),
            row.status,
            row.enrolled,
            row.capacity,
            row.enrollment_rate
        )?;
    }
    Ok(())
}
