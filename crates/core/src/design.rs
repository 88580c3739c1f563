//! Custom apparel design requests.
//!
//! A design is created in [`DesignStatus::Draft`] through
//! [`CreateDesignRequest`] and afterwards changes only through whitelisted
//! status transitions. The backend owns and persists every design; the
//! client keeps read-mostly copies.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::CoreError;
use crate::status::DesignStatus;
use crate::types::{DbId, Money, Timestamp};

/// Maximum number of shirts in a single design request.
pub const MAX_DESIGN_QUANTITY: i32 = 100;

/// A custom design as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomDesign {
    pub id: DbId,
    pub design_name: String,
    pub prompt_text: String,
    pub shirt_type: String,
    pub base_color: String,
    pub size: String,
    #[serde(default)]
    pub special_requirements: Option<String>,
    pub quantity: i32,
    /// Filled in asynchronously once image generation finishes.
    #[serde(default)]
    pub design_image_url: Option<String>,
    pub total_price: Money,
    pub status: DesignStatus,
    pub created_at: Timestamp,
}

impl CustomDesign {
    pub fn has_image(&self) -> bool {
        self.design_image_url
            .as_deref()
            .is_some_and(|url| !url.trim().is_empty())
    }
}

/// Form fields for creating a new design.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateDesignRequest {
    #[validate(length(min = 1, max = 100, message = "Design name must be 1-100 characters"))]
    pub design_name: String,

    #[validate(length(min = 1, max = 1000, message = "Prompt must be 1-1000 characters"))]
    pub prompt_text: String,

    #[validate(length(min = 1, message = "Shirt type is required"))]
    pub shirt_type: String,

    #[validate(length(min = 1, message = "Base color is required"))]
    pub base_color: String,

    #[validate(length(min = 1, message = "Size is required"))]
    pub size: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 500, message = "Special requirements must be at most 500 characters"))]
    pub special_requirements: Option<String>,

    #[validate(range(min = 1, max = 100, message = "Quantity must be between 1 and 100"))]
    pub quantity: i32,
}

impl CreateDesignRequest {
    /// Validate the form before anything is sent to the backend.
    ///
    /// Runs the derived field rules, then rejects names and prompts that are
    /// only whitespace.
    pub fn check(&self) -> Result<(), CoreError> {
        self.validate()?;

        if self.design_name.trim().is_empty() {
            return Err(CoreError::Validation(
                "Design name must not be blank".to_string(),
            ));
        }
        if self.prompt_text.trim().is_empty() {
            return Err(CoreError::Validation("Prompt must not be blank".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn form() -> CreateDesignRequest {
        CreateDesignRequest {
            design_name: "Sunset shirt".to_string(),
            prompt_text: "A retro sunset over the sea".to_string(),
            shirt_type: "T-shirt".to_string(),
            base_color: "white".to_string(),
            size: "L".to_string(),
            special_requirements: None,
            quantity: 2,
        }
    }

    #[test]
    fn valid_form_passes() {
        assert!(form().check().is_ok());
    }

    #[test]
    fn missing_required_field_fails() {
        let mut f = form();
        f.size = String::new();
        assert_matches!(f.check(), Err(CoreError::Validation(msg)) if msg.contains("size"));
    }

    #[test]
    fn blank_name_fails() {
        let mut f = form();
        f.design_name = "   ".to_string();
        assert_matches!(f.check(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn quantity_bounds_are_enforced() {
        let mut f = form();
        f.quantity = 0;
        assert!(f.check().is_err());
        f.quantity = MAX_DESIGN_QUANTITY + 1;
        assert!(f.check().is_err());
        f.quantity = MAX_DESIGN_QUANTITY;
        assert!(f.check().is_ok());
    }

    #[test]
    fn overlong_special_requirements_fail() {
        let mut f = form();
        f.special_requirements = Some("x".repeat(501));
        assert!(f.check().is_err());
    }

    #[test]
    fn design_deserializes_without_image() {
        let json = serde_json::json!({
            "id": 7,
            "designName": "Sunset shirt",
            "promptText": "retro sunset",
            "shirtType": "T-shirt",
            "baseColor": "white",
            "size": "L",
            "quantity": 1,
            "totalPrice": 250000,
            "status": 3,
            "createdAt": "2026-01-05T08:30:00Z"
        });
        let design: CustomDesign = serde_json::from_value(json).unwrap();
        assert_eq!(design.status, DesignStatus::Request);
        assert!(design.design_image_url.is_none());
        assert!(!design.has_image());
    }
}
