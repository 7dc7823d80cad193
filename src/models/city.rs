use serde::{Deserialize, Serialize};
use validator::Validate;

use super::required;

use crate::entities::{city, point_of_interest};
use crate::models::point_of_interest::PointOfInterestDto;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CityWithoutPointsOfInterestDto {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
}

impl From<city::Model> for CityWithoutPointsOfInterestDto {
    fn from(city: city::Model) -> Self {
        Self {
            id: city.id,
            name: city.name,
            description: city.description,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CityDto {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub number_of_points_of_interest: usize,
    pub points_of_interest: Vec<PointOfInterestDto>,
}

impl CityDto {
    pub fn new(city: city::Model, points: Vec<point_of_interest::Model>) -> Self {
        let points_of_interest: Vec<PointOfInterestDto> =
            points.into_iter().map(PointOfInterestDto::from).collect();
        Self {
            id: city.id,
            name: city.name,
            description: city.description,
            number_of_points_of_interest: points_of_interest.len(),
            points_of_interest,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCityDto {
    #[serde(default)]
    #[validate(
        custom(function = "required", message = "You should provide a name value."),
        length(max = 50, message = "The name must be at most 50 characters.")
    )]
    pub name: String,
    #[validate(length(max = 200, message = "The description must be at most 200 characters."))]
    pub description: Option<String>,
}

impl From<CreateCityDto> for city::ActiveModel {
    fn from(dto: CreateCityDto) -> Self {
        use sea_orm::Set;

        city::ActiveModel {
            name: Set(dto.name),
            description: Set(dto.description),
            ..Default::default()
        }
    }
}
