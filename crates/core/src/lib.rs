pub mod authz;
pub mod error;
pub mod gpx;
pub mod lifecycle;
pub mod roles;
pub mod slug;
pub mod status;
pub mod trip;
pub mod types;
pub mod validation;
