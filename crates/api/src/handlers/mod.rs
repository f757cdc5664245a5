pub mod lifecycle;
pub mod trips;
