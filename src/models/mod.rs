pub mod availability;
pub mod booking;
pub mod inquiry;

pub use availability::{parse_calendar_date, Availability, TimeSlot};
pub use booking::{BookingRequest, BookingStatus, NewBookingRequest};
pub use inquiry::Inquiry;
