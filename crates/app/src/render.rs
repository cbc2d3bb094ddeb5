//! Plain-text rendering of console views.

use std::fmt::Display;
use std::io::{self, Write};

use chrono::{DateTime, TimeZone, Utc};
use clinic_application::ClientDetails;
use clinic_domain::{AdminProfile, Appointment, Client, ListingView};

/// Left-aligned columns sized to their widest cell.
struct Table {
    headers: Vec<&'static str>,
    rows: Vec<Vec<String>>,
}

impl Table {
    fn new(headers: Vec<&'static str>) -> Self {
        Self {
            headers,
            rows: Vec::new(),
        }
    }

    fn row(&mut self, cells: Vec<String>) {
        self.rows.push(cells);
    }

    fn write(&self, out: &mut impl Write) -> io::Result<()> {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let header: Vec<String> = self.headers.iter().map(ToString::to_string).collect();
        write_line(out, &header, &widths)?;
        for row in &self.rows {
            write_line(out, row, &widths)?;
        }
        Ok(())
    }
}

fn write_line(out: &mut impl Write, cells: &[String], widths: &[usize]) -> io::Result<()> {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ");
    writeln!(out, "{}", line.trim_end())
}

fn or_dash(value: &str) -> String {
    if value.trim().is_empty() {
        "-".to_string()
    } else {
        value.to_string()
    }
}

fn local_time<Tz: TimeZone>(time: DateTime<Utc>, tz: &Tz) -> String
where
    Tz::Offset: Display,
{
    time.with_timezone(tz).format("%Y-%m-%d %H:%M").to_string()
}

/// Renders the client list.
///
/// # Errors
///
/// Returns any error from writing to `out`.
pub fn clients<Tz: TimeZone>(
    out: &mut impl Write,
    view: &ListingView<'_, Client>,
    tz: &Tz,
) -> io::Result<()>
where
    Tz::Offset: Display,
{
    let items = match view {
        ListingView::Empty => return writeln!(out, "No clients have been added to the system yet."),
        ListingView::NoResults => {
            return writeln!(out, "No clients match your search criteria.");
        }
        ListingView::Results(items) => items,
    };

    let mut table = Table::new(vec!["ID", "NAME", "EMAIL", "PHONE", "JOINED"]);
    for client in items {
        table.row(vec![
            client.id.to_string(),
            client.name.clone(),
            or_dash(&client.email),
            or_dash(&client.phone),
            client.created_at.map_or_else(
                || "-".to_string(),
                |at| at.with_timezone(tz).format("%Y-%m-%d").to_string(),
            ),
        ]);
    }
    table.write(out)?;
    writeln!(out, "\n{} client(s)", items.len())
}

/// Renders the appointment list, deriving each status at `now`.
///
/// # Errors
///
/// Returns any error from writing to `out`.
pub fn appointments<Tz: TimeZone>(
    out: &mut impl Write,
    view: &ListingView<'_, Appointment>,
    now: &DateTime<Tz>,
) -> io::Result<()>
where
    Tz::Offset: Display,
{
    let items = match view {
        ListingView::Empty => return writeln!(out, "No appointments have been scheduled yet."),
        ListingView::NoResults => {
            return writeln!(out, "No appointments match your current filters.");
        }
        ListingView::Results(items) => items,
    };

    let tz = now.timezone();
    let now = now.with_timezone(&Utc);
    let mut table = Table::new(vec!["ID", "CLIENT", "EMAIL", "PHONE", "TIME", "STATUS"]);
    for appointment in items {
        table.row(vec![
            appointment.id.to_string(),
            or_dash(&appointment.client.name),
            or_dash(&appointment.client.email),
            or_dash(&appointment.client.phone),
            local_time(appointment.time, &tz),
            appointment.status_at(now).to_string(),
        ]);
    }
    table.write(out)?;
    writeln!(out, "\n{} appointment(s)", items.len())
}

fn history_section<Tz: TimeZone>(
    out: &mut impl Write,
    title: &str,
    empty: &str,
    appointments: &[Appointment],
    tz: &Tz,
) -> io::Result<()>
where
    Tz::Offset: Display,
{
    writeln!(out, "\n{title} ({})", appointments.len())?;
    if appointments.is_empty() {
        return writeln!(out, "  {empty}");
    }
    for appointment in appointments {
        writeln!(out, "  {}  {}", local_time(appointment.time, tz), appointment.id)?;
    }
    Ok(())
}

/// Renders one client with their appointment history.
///
/// # Errors
///
/// Returns any error from writing to `out`.
pub fn client_details<Tz: TimeZone>(
    out: &mut impl Write,
    details: &ClientDetails,
    tz: &Tz,
) -> io::Result<()>
where
    Tz::Offset: Display,
{
    let client = &details.client;
    writeln!(out, "{}", client.name)?;
    writeln!(out, "  id:     {}", client.id)?;
    writeln!(out, "  email:  {}", or_dash(&client.email))?;
    writeln!(out, "  phone:  {}", or_dash(&client.phone))?;
    if let Some(created) = client.created_at {
        writeln!(out, "  joined: {}", created.with_timezone(tz).format("%Y-%m-%d"))?;
    }
    writeln!(out, "  total appointments: {}", details.history.total())?;

    history_section(
        out,
        "Upcoming",
        "No upcoming appointments",
        &details.history.upcoming,
        tz,
    )?;
    history_section(out, "Past", "No appointment history", &details.history.past, tz)
}

/// Renders the logged-in admin.
///
/// # Errors
///
/// Returns any error from writing to `out`.
pub fn admin(out: &mut impl Write, profile: &AdminProfile) -> io::Result<()> {
    writeln!(out, "{} <{}>", profile.display_name(), profile.email)
}
