//! Line-oriented front end over [`ActivityHub`].
//!
//! Each input line is parsed as one clap subcommand. Commands go through
//! [`ActivityHub::dispatch`]; views are rendered straight from the hub.

use std::io::{self, BufRead, Write};

use activity_core::{ActivityFilter, ActivityHub, CategoryFilter, Session};
use chrono::{NaiveDate, NaiveTime};
use clap::{value_parser, Args, Parser, Subcommand};
use shared::{
    domain::{
        parse_date, parse_time, Activity, ActivityDraft, ActivityId, ActivityStatus, Category, Role,
        DEFAULT_CAPACITY, DEFAULT_CATEGORY, DEFAULT_STATUS,
    },
    error::{ErrorPayload, HubError},
    protocol::{HubCommand, HubEvent},
};
use tracing::debug;

use crate::{
    config::OutputMode,
    render::{self, ActivityCard},
};

#[derive(Parser, Debug)]
#[command(multicall = true)]
struct ShellLine {
    #[command(subcommand)]
    command: ShellCommand,
}

#[derive(Subcommand, Debug)]
enum ShellCommand {
    /// Open a session under any name.
    Login {
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,
        #[arg(long, default_value_t = Role::Student)]
        role: Role,
    },
    Logout,
    /// Show the current session.
    Whoami,
    /// Every activity with its enrollment (admin).
    List,
    /// Upcoming activities, optionally filtered (student).
    Browse {
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long, default_value_t = CategoryFilter::All)]
        category: CategoryFilter,
    },
    /// Activities the student is registered for.
    Mine,
    Show {
        id: String,
    },
    Register {
        id: String,
    },
    Create(CreateArgs),
    Edit(EditArgs),
    /// Dashboard figures for the current role.
    Stats,
    /// Enrollment per activity (admin).
    Participation,
    #[command(alias = "exit")]
    Quit,
}

#[derive(Args, Debug)]
struct CreateArgs {
    #[arg(long)]
    title: String,
    #[arg(long)]
    description: String,
    #[arg(long, default_value_t = DEFAULT_CATEGORY)]
    category: Category,
    #[arg(long, value_parser = parse_date)]
    date: NaiveDate,
    #[arg(long, value_parser = parse_time)]
    time: NaiveTime,
    #[arg(long)]
    location: String,
    #[arg(long, default_value_t = DEFAULT_CAPACITY, value_parser = value_parser!(u32).range(1..))]
    capacity: u32,
    #[arg(long)]
    instructor: String,
    #[arg(long, default_value_t = DEFAULT_STATUS)]
    status: ActivityStatus,
}

impl CreateArgs {
    fn into_draft(self) -> ActivityDraft {
        ActivityDraft {
            title: self.title,
            description: self.description,
            category: self.category,
            date: self.date,
            time: self.time,
            location: self.location,
            capacity: self.capacity,
            instructor: self.instructor,
            status: self.status,
        }
    }
}

/// Fields left out keep the value of the existing record.
#[derive(Args, Debug)]
struct EditArgs {
    id: String,
    #[arg(long)]
    title: Option<String>,
    #[arg(long)]
    description: Option<String>,
    #[arg(long)]
    category: Option<Category>,
    #[arg(long, value_parser = parse_date)]
    date: Option<NaiveDate>,
    #[arg(long, value_parser = parse_time)]
    time: Option<NaiveTime>,
    #[arg(long)]
    location: Option<String>,
    #[arg(long, value_parser = value_parser!(u32).range(1..))]
    capacity: Option<u32>,
    #[arg(long)]
    instructor: Option<String>,
    #[arg(long)]
    status: Option<ActivityStatus>,
}

impl EditArgs {
    fn apply(self, draft: &mut ActivityDraft) {
        if let Some(v) = self.title {
            draft.title = v;
        }
        if let Some(v) = self.description {
            draft.description = v;
        }
        if let Some(v) = self.category {
            draft.category = v;
        }
        if let Some(v) = self.date {
            draft.date = v;
        }
        if let Some(v) = self.time {
            draft.time = v;
        }
        if let Some(v) = self.location {
            draft.location = v;
        }
        if let Some(v) = self.capacity {
            draft.capacity = v;
        }
        if let Some(v) = self.instructor {
            draft.instructor = v;
        }
        if let Some(v) = self.status {
            draft.status = v;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Shell {
    hub: ActivityHub,
    output: OutputMode,
}

impl Shell {
    pub fn new(hub: ActivityHub, output: OutputMode) -> Self {
        Self { hub, output }
    }

    pub fn hub(&self) -> &ActivityHub {
        &self.hub
    }

    /// Reads lines until end of input or `quit`, printing `prompt` before each.
    pub fn run<R: BufRead, W: Write>(
        &mut self,
        input: R,
        out: &mut W,
        prompt: Option<&str>,
    ) -> io::Result<()> {
        let mut lines = input.lines();
        loop {
            if let Some(prompt) = prompt {
                write!(out, "{prompt}")?;
                out.flush()?;
            }
            let Some(line) = lines.next() else {
                break;
            };
            if self.run_line(&line?, out)? == Flow::Quit {
                break;
            }
        }
        Ok(())
    }

    /// Runs one input line. Rejected commands are reported on `out`; only
    /// write failures are returned as errors.
    pub fn run_line<W: Write>(&mut self, line: &str, out: &mut W) -> io::Result<Flow> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(Flow::Continue);
        }

        let words = match split_line(line) {
            Ok(words) => words,
            Err(message) => {
                writeln!(out, "error: {message}")?;
                return Ok(Flow::Continue);
            }
        };
        let parsed = match ShellLine::try_parse_from(&words) {
            Ok(parsed) => parsed,
            Err(err) => {
                write!(out, "{}", err.render())?;
                return Ok(Flow::Continue);
            }
        };
        debug!(command = ?parsed.command, "shell command");
        self.run_command(parsed.command, out)
    }

    fn run_command<W: Write>(&mut self, command: ShellCommand, out: &mut W) -> io::Result<Flow> {
        match command {
            ShellCommand::Login { name, role } => {
                let name = name.join(" ");
                self.submit(HubCommand::Login { name, role }, out)?;
            }
            ShellCommand::Logout => self.submit(HubCommand::Logout, out)?,
            ShellCommand::Whoami => {
                let session = self.hub.current_session();
                match self.output {
                    OutputMode::Text => render::write_session(out, session)?,
                    OutputMode::Json => render::write_session_json(out, session)?,
                }
            }
            ShellCommand::List => {
                if let Err(err) = self.require_role(Role::Admin, "manage activities") {
                    return self.reject(err, out);
                }
                let cards: Vec<ActivityCard<'_>> = self
                    .hub
                    .activities()
                    .iter()
                    .map(|activity| ActivityCard::new(&self.hub, activity))
                    .collect();
                self.write_cards(&cards, out)?;
            }
            ShellCommand::Browse { search, category } => {
                if let Err(err) = self.require_role(Role::Student, "browse activities") {
                    return self.reject(err, out);
                }
                let filter = ActivityFilter::new(search, category);
                let cards: Vec<ActivityCard<'_>> = self
                    .hub
                    .browse(&filter)
                    .into_iter()
                    .map(|activity| ActivityCard::new(&self.hub, activity))
                    .collect();
                self.write_cards(&cards, out)?;
            }
            ShellCommand::Mine => {
                if let Err(err) = self.require_role(Role::Student, "list their activities") {
                    return self.reject(err, out);
                }
                let cards: Vec<ActivityCard<'_>> = self
                    .hub
                    .my_activities()
                    .into_iter()
                    .map(|activity| ActivityCard::new(&self.hub, activity))
                    .collect();
                self.write_cards(&cards, out)?;
            }
            ShellCommand::Show { id } => {
                let activity_id = ActivityId::new(id);
                let Some(activity) = self.hub.activity(&activity_id) else {
                    return self.reject(HubError::NotFound(activity_id), out);
                };
                let card = ActivityCard::new(&self.hub, activity);
                match self.output {
                    OutputMode::Text => render::write_details(out, &card)?,
                    OutputMode::Json => render::write_json(out, &card)?,
                }
            }
            ShellCommand::Register { id } => {
                let activity_id = ActivityId::new(id);
                if let Some(refused) = self.refused_by_card(&activity_id) {
                    return self.reject(refused, out);
                }
                self.submit(HubCommand::Register { activity_id }, out)?;
            }
            ShellCommand::Create(args) => {
                let draft = args.into_draft();
                if let Err(err) = draft.validate() {
                    return self.reject(err, out);
                }
                self.submit(HubCommand::CreateActivity { draft }, out)?;
            }
            ShellCommand::Edit(args) => {
                if let Err(err) = self.require_role(Role::Admin, "update activities") {
                    return self.reject(err, out);
                }
                let activity_id = ActivityId::new(args.id.clone());
                let Some(existing) = self.hub.activity(&activity_id) else {
                    return self.emit(&HubEvent::ActivityNotFound { activity_id }, out);
                };
                let mut draft = existing.to_draft();
                args.apply(&mut draft);
                if let Err(err) = draft.validate() {
                    return self.reject(err, out);
                }
                let activity = Activity::from_draft(activity_id, draft);
                self.submit(HubCommand::UpdateActivity { activity }, out)?;
            }
            ShellCommand::Stats => self.write_stats(out)?,
            ShellCommand::Participation => {
                if let Err(err) = self.require_role(Role::Admin, "view participation") {
                    return self.reject(err, out);
                }
                let rows = self.hub.participation();
                match self.output {
                    OutputMode::Text => render::write_participation(out, &rows)?,
                    OutputMode::Json => render::write_json(out, &rows)?,
                }
            }
            ShellCommand::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    fn submit<W: Write>(&mut self, command: HubCommand, out: &mut W) -> io::Result<()> {
        let event = self.hub.dispatch(command);
        self.emit(&event, out)?;
        Ok(())
    }

    fn emit<W: Write>(&self, event: &HubEvent, out: &mut W) -> io::Result<Flow> {
        match self.output {
            OutputMode::Json => render::write_json(out, event)?,
            OutputMode::Text if event.is_rejection() => writeln!(out, "error: {}", event.notice())?,
            OutputMode::Text => writeln!(out, "{}", event.notice())?,
        }
        Ok(Flow::Continue)
    }

    fn reject<W: Write>(&self, err: HubError, out: &mut W) -> io::Result<Flow> {
        self.emit(&HubEvent::Rejected(ErrorPayload::from(err)), out)
    }

    fn require_role(&self, role: Role, action: &'static str) -> Result<(), HubError> {
        match self.hub.current_session() {
            None => Err(HubError::NoSession),
            Some(session) if session.role() == role => Ok(()),
            Some(session) => Err(HubError::WrongRole {
                role: session.role(),
                action,
            }),
        }
    }

    /// The browse card disables its button for registered, full and closed
    /// activities; such clicks never reach the hub.
    fn refused_by_card(&self, activity_id: &ActivityId) -> Option<HubError> {
        self.hub.current_session().and_then(Session::as_student)?;
        let availability = self.hub.availability(activity_id)?;
        if availability.allows_registration() {
            return None;
        }
        Some(HubError::Validation(format!(
            "cannot register for activity {activity_id}: {}",
            availability.label().to_lowercase()
        )))
    }

    fn write_cards<W: Write>(&self, cards: &[ActivityCard<'_>], out: &mut W) -> io::Result<()> {
        match self.output {
            OutputMode::Text => render::write_cards(out, cards),
            OutputMode::Json => render::write_json(out, cards),
        }
    }

    fn write_stats<W: Write>(&self, out: &mut W) -> io::Result<()> {
        match self.hub.current_session() {
            None => {
                self.reject(HubError::NoSession, out)?;
            }
            Some(Session::Admin(_)) => {
                let stats = self.hub.admin_stats();
                match self.output {
                    OutputMode::Text => render::write_admin_stats(out, &stats)?,
                    OutputMode::Json => render::write_json(out, &stats)?,
                }
            }
            Some(Session::Student(_)) => {
                if let Some(stats) = self.hub.student_stats() {
                    match self.output {
                        OutputMode::Text => render::write_student_stats(out, &stats)?,
                        OutputMode::Json => render::write_json(out, &stats)?,
                    }
                }
            }
        }
        Ok(())
    }
}

/// Splits on whitespace, keeping single- or double-quoted runs together.
fn split_line(line: &str) -> Result<Vec<String>, String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quote: Option<char> = None;

    for ch in line.chars() {
        match quote {
            Some(open) if ch == open => quote = None,
            Some(_) => current.push(ch),
            None if ch == '"' || ch == '\'' => {
                quote = Some(ch);
                in_word = true;
            }
            None if ch.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            None => {
                current.push(ch);
                in_word = true;
            }
        }
    }

    if let Some(open) = quote {
        return Err(format!("unterminated {open} quote"));
    }
    if in_word {
        words.push(current);
    }
    Ok(words)
}

#[cfg(test)]
#[path = "tests/shell_tests.rs"]
mod tests;
