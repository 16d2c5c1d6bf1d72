pub mod bookings;
pub mod mongo;
