//! Request and response shapes, and the conversions from stored entities.

pub mod auth;
pub mod city;
pub mod pagination;
pub mod point_of_interest;

pub use city::{CityDto, CityWithoutPointsOfInterestDto, CreateCityDto};
pub use pagination::PaginationMetadata;
pub use point_of_interest::{
    PointOfInterestDto, PointOfInterestForCreationDto, PointOfInterestForUpdateDto,
};

use validator::ValidationError;

/// Rejects empty and whitespace-only strings.
fn required(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("required"));
    }
    Ok(())
}
