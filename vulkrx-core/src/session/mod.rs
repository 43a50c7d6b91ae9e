//! Storage-access object handed to screens.
//!
//! A [`Session`] owns the database pool for the lifetime of the app. It is
//! built once at startup and only exists after the schema is in place.

mod session;
mod workout;

pub use session::Session;
