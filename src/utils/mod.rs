pub mod extract;
pub mod jwt;
pub mod negotiate;
pub mod patch;
