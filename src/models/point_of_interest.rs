use sea_orm::Set;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::required;

use crate::entities::point_of_interest;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PointOfInterestDto {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
}

impl From<point_of_interest::Model> for PointOfInterestDto {
    fn from(poi: point_of_interest::Model) -> Self {
        Self {
            id: poi.id,
            name: poi.name,
            description: poi.description,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PointOfInterestForCreationDto {
    #[serde(default)]
    #[validate(
        custom(function = "required", message = "You should provide a name value."),
        length(max = 50, message = "The name must be at most 50 characters.")
    )]
    pub name: String,
    #[validate(length(max = 200, message = "The description must be at most 200 characters."))]
    pub description: Option<String>,
}

impl PointOfInterestForCreationDto {
    pub fn into_active_model(self, city_id: i32) -> point_of_interest::ActiveModel {
        point_of_interest::ActiveModel {
            name: Set(self.name),
            description: Set(self.description),
            city_id: Set(city_id),
            ..Default::default()
        }
    }
}

/// Mutable projection of a point of interest, used by full and partial updates.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PointOfInterestForUpdateDto {
    #[serde(default)]
    #[validate(
        custom(function = "required", message = "You should provide the name value"),
        length(max = 50, message = "The name must be at most 50 characters.")
    )]
    pub name: String,
    #[validate(length(max = 200, message = "The description must be at most 200 characters."))]
    pub description: Option<String>,
}

impl From<&point_of_interest::Model> for PointOfInterestForUpdateDto {
    fn from(poi: &point_of_interest::Model) -> Self {
        Self {
            name: poi.name.clone(),
            description: poi.description.clone(),
        }
    }
}

impl PointOfInterestForUpdateDto {
    /// Copies the mutable fields onto the stored entity; `city_id` stays put.
    pub fn apply_to(self, poi: point_of_interest::Model) -> point_of_interest::ActiveModel {
        let mut active: point_of_interest::ActiveModel = poi.into();
        active.name = Set(self.name);
        active.description = Set(self.description);
        active
    }
}
