pub mod claims;
pub mod matches;
pub mod reports;
