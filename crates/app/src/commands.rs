//! Command handlers.
//!
//! Each handler drives one use case and renders its result to `out`.
//! Errors are returned to `main`, which prints them inline.

use std::io::{BufRead, Write};

use anyhow::{Context, Result, anyhow};
use chrono::Local;
use clinic_application::{
    AppointmentBoard, ApplicationError, ClientDirectory, LoadClientDetails, ScheduleAppointment,
};
use clinic_domain::{
    AppointmentFilter, AppointmentId, AppointmentUpdate, ClientId, Credentials, LocalSlot,
    SearchTerm,
};

use crate::cli::{AppointmentsCommand, ClientsCommand, Command, ListAppointments};
use crate::context::Console;
use crate::render;

/// Hint printed whenever the admin has to log in again.
pub const LOGIN_HINT: &str = "run `clinic login --email <email>` to sign in";

/// Runs one command against `console`.
///
/// `input` is only read when a confirmation is needed.
///
/// # Errors
///
/// Returns the failure of the underlying use case, or an I/O error from `out`.
pub async fn run(
    command: Command,
    console: &Console,
    out: &mut impl Write,
    input: &mut impl BufRead,
) -> Result<()> {
    match command {
        Command::Login { email, password } => login(console, email, password, out).await,
        Command::Logout => {
            console.session.logout().await;
            writeln!(out, "Logged out")?;
            Ok(())
        }
        Command::Whoami => {
            let admin = console
                .session
                .admin()
                .await
                .ok_or(ApplicationError::Unauthenticated)?;
            render::admin(out, &admin)?;
            Ok(())
        }
        Command::Clients { command } => clients(console, command, out).await,
        Command::Appointments { command } => appointments(console, command, out, input).await,
    }
}

async fn login(
    console: &Console,
    email: String,
    password: Option<String>,
    out: &mut impl Write,
) -> Result<()> {
    let password =
        password.ok_or_else(|| anyhow!("password required: pass --password or set CLINIC_PASSWORD"))?;
    let credentials = Credentials::new(email, password)?;
    let session = console.session.login(&credentials).await?;
    writeln!(out, "Welcome, {}", session.admin.display_name())?;
    Ok(())
}

async fn clients(console: &Console, command: ClientsCommand, out: &mut impl Write) -> Result<()> {
    match command {
        ClientsCommand::List { search } => {
            let mut directory = ClientDirectory::new(console.api.clone());
            directory.load().await?;
            directory.search = SearchTerm::new(search.unwrap_or_default());
            render::clients(out, &directory.view(), &Local)?;
        }
        ClientsCommand::Show { id } => {
            let id = ClientId::new(id)?;
            let details = LoadClientDetails::new(console.api.clone(), console.clock.clone())
                .execute(&id)
                .await?;
            render::client_details(out, &details, &Local)?;
        }
    }
    Ok(())
}

async fn appointments(
    console: &Console,
    command: AppointmentsCommand,
    out: &mut impl Write,
    input: &mut impl BufRead,
) -> Result<()> {
    match command {
        AppointmentsCommand::List(args) => list_appointments(console, args, out).await,
        AppointmentsCommand::Create { client, slot } => {
            let client_id = ClientId::new(client)?;
            let slot = LocalSlot::parse(&slot.date, &slot.time)?;
            let time = slot.resolve(&Local)?;
            ScheduleAppointment::new(console.api.clone(), console.clock.clone())
                .create(&client_id, time)
                .await?;
            writeln!(out, "Appointment booked for {slot}")?;
            Ok(())
        }
        AppointmentsCommand::Edit {
            id,
            client,
            date,
            time,
        } => {
            let id = AppointmentId::new(id)?;
            let schedule = ScheduleAppointment::new(console.api.clone(), console.clock.clone());
            let current = schedule.load_for_edit(&id).await?;

            let time = match (date, time) {
                (Some(date), Some(time)) => Some(LocalSlot::parse(&date, &time)?.resolve(&Local)?),
                _ => None,
            };
            let update = AppointmentUpdate {
                client_id: client.map(ClientId::new).transpose()?,
                time,
            };
            schedule.reschedule(&id, &update).await?;

            let shown = LocalSlot::from_instant(update.time.unwrap_or(current.time), &Local);
            writeln!(out, "Appointment {id} updated ({shown})")?;
            Ok(())
        }
        AppointmentsCommand::Cancel { id, yes } => {
            let id = AppointmentId::new(id)?;
            let mut board = AppointmentBoard::new(console.api.clone(), console.clock.clone());
            board.load().await?;
            let appointment = board
                .find(&id)
                .ok_or_else(|| ApplicationError::NotFound(format!("appointment {id}")))?;

            let slot = LocalSlot::from_instant(appointment.time, &Local);
            let prompt = format!(
                "Cancel appointment {id} for {} at {slot}?",
                appointment.client.name
            );
            if !yes && !confirm(&prompt, out, input)? {
                writeln!(out, "Kept appointment {id}")?;
                return Ok(());
            }

            board.cancel(&id).await?;
            writeln!(out, "Cancelled appointment {id}")?;
            Ok(())
        }
    }
}

async fn list_appointments(
    console: &Console,
    args: ListAppointments,
    out: &mut impl Write,
) -> Result<()> {
    let mut board = AppointmentBoard::new(console.api.clone(), console.clock.clone());
    board.load().await?;
    board.filter = AppointmentFilter {
        search: SearchTerm::new(args.search.unwrap_or_default()),
        status: args.status,
        date: args.date,
    };

    let now = console.clock.now().with_timezone(&Local);
    render::appointments(out, &board.view_at(&now), &now)?;
    Ok(())
}

/// Asks a yes/no question; anything but `y`/`yes` declines.
///
/// # Errors
///
/// Returns an I/O error if the prompt cannot be written or the answer read.
pub fn confirm(prompt: &str, out: &mut impl Write, input: &mut impl BufRead) -> Result<bool> {
    write!(out, "{prompt} [y/N] ")?;
    out.flush()?;
    let mut answer = String::new();
    input
        .read_line(&mut answer)
        .context("could not read confirmation")?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

/// Lines to print on stderr for a failed command.
#[must_use]
pub fn error_report(error: &anyhow::Error) -> Vec<String> {
    let mut lines = vec![format!("error: {error}")];
    if error
        .downcast_ref::<ApplicationError>()
        .is_some_and(ApplicationError::requires_login)
    {
        lines.push(LOGIN_HINT.to_string());
    }
    lines
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_confirm_accepts_only_yes() {
        for (answer, expected) in [("y\n", true), ("YES\n", true), ("n\n", false), ("\n", false)] {
            let mut out = Vec::new();
            let mut input = answer.as_bytes();
            assert_eq!(confirm("Cancel?", &mut out, &mut input).unwrap(), expected);
            assert_eq!(String::from_utf8(out).unwrap(), "Cancel? [y/N] ");
        }
    }

    #[test]
    fn test_confirm_at_eof_declines() {
        let mut input: &[u8] = b"";
        assert!(!confirm("Cancel?", &mut Vec::new(), &mut input).unwrap());
    }

    #[test]
    fn test_session_errors_add_login_hint() {
        let expired = anyhow::Error::from(ApplicationError::SessionExpired);
        assert_eq!(
            error_report(&expired),
            vec![
                "error: session expired, please log in again".to_string(),
                LOGIN_HINT.to_string()
            ]
        );

        let api = anyhow::Error::from(ApplicationError::Api("Client not found".to_string()));
        assert_eq!(error_report(&api), vec!["error: Client not found".to_string()]);
    }
}
