pub mod auth;
pub mod cities;
pub mod files;
pub mod points_of_interest;
