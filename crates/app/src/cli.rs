//! Command-line surface.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clinic_domain::{DateFilter, StatusFilter};

/// Clinic admin console.
#[derive(Debug, Parser)]
#[command(name = "clinic")]
#[command(about = "Administer clinic clients and appointments")]
#[command(version)]
pub struct Cli {
    /// Configuration file (defaults to ./clinic.toml if present)
    #[arg(short = 'c', long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Log in as an administrator
    Login {
        /// Admin email
        #[arg(long)]
        email: String,

        /// Admin password
        #[arg(long, env = "CLINIC_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Log out and forget the stored session
    Logout,

    /// Show the logged-in administrator
    Whoami,

    /// Browse clients
    Clients {
        #[command(subcommand)]
        command: ClientsCommand,
    },

    /// Manage appointments
    Appointments {
        #[command(subcommand)]
        command: AppointmentsCommand,
    },
}

/// `clinic clients ...`
#[derive(Debug, Subcommand)]
pub enum ClientsCommand {
    /// List clients
    List {
        /// Match name, email or phone (case-insensitive)
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Show a client and their appointment history
    Show {
        /// Client id
        id: String,
    },
}

/// `clinic appointments ...`
#[derive(Debug, Subcommand)]
pub enum AppointmentsCommand {
    /// List appointments
    List(ListAppointments),

    /// Book an appointment
    Create {
        /// Client id
        #[arg(long)]
        client: String,

        #[command(flatten)]
        slot: SlotArgs,
    },

    /// Change an appointment's client or time
    Edit {
        /// Appointment id
        id: String,

        /// New client id
        #[arg(long)]
        client: Option<String>,

        /// New date (YYYY-MM-DD, local time)
        #[arg(long, requires = "time")]
        date: Option<String>,

        /// New time (HH:MM, local time)
        #[arg(long, requires = "date")]
        time: Option<String>,
    },

    /// Cancel an appointment
    Cancel {
        /// Appointment id
        id: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

/// Filters for `clinic appointments list`.
#[derive(Debug, Args)]
pub struct ListAppointments {
    /// Match client name, email or phone (case-insensitive)
    #[arg(short, long)]
    pub search: Option<String>,

    /// all, scheduled or completed
    #[arg(long, default_value = "all")]
    pub status: StatusFilter,

    /// all, today, tomorrow, week or month
    #[arg(long, default_value = "all")]
    pub date: DateFilter,
}

/// Local date and time of an appointment.
#[derive(Debug, Args)]
pub struct SlotArgs {
    /// Date (YYYY-MM-DD, local time)
    #[arg(long)]
    pub date: String,

    /// Time (HH:MM, local time)
    #[arg(long)]
    pub time: String,
}
