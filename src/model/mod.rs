pub mod attendance;
pub mod user;

pub use attendance::{AttendanceRecord, DayStatus};
pub use user::{NewUser, User};
