mod booking_queries;
mod booking_service;
mod errors;

pub use booking_queries::{
    has_completed_booking, item_bookings, list_owner_bookings, list_renter_bookings,
};
pub use booking_service::{ServiceDependencies, decide_booking, get_booking, request_booking};
pub use errors::{BookingApplicationError, Result};
