//! Application use cases (view data flow over the API client).

mod appointment_board;
mod client_details;
mod client_directory;
mod schedule_appointment;

pub use appointment_board::AppointmentBoard;
pub use client_details::{ClientDetails, LoadClientDetails};
pub use client_directory::ClientDirectory;
pub use schedule_appointment::ScheduleAppointment;
