//! Domain layer - the pure scheduling core.
//!
//! Schedule normalization, exception precedence, effective-hours
//! resolution, slot generation and conflict checking are all pure
//! functions over value types; nothing in this module touches
//! infrastructure or shared mutable state.

pub mod appointment;
pub mod availability;
pub mod business;
pub mod conflict;
pub mod exception;
pub mod schedule;
pub mod slots;

pub use appointment::{
    Appointment, AppointmentResponse, AppointmentStatus, CustomerInfo, NewAppointment,
};
pub use availability::{open_status_at, resolve_hours, EffectiveHours, OpenStatus};
pub use business::{Business, BusinessResponse, ServiceOffering};
pub use conflict::{filter_available, overlaps, validate_booking};
pub use exception::{resolve_for_date, Exception, ExceptionKind, ExceptionReason, FieldError};
pub use schedule::{
    format_hhmm, parse_hhmm, DayHours, RawDayHours, RawWeeklySchedule, ScheduleError,
    WeeklySchedule,
};
pub use slots::{generate_slots, Slot};
