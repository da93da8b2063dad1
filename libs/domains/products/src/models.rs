use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// Integer digits a `decimal(18,2)` column can hold
const PRICE_INTEGER_DIGITS: u32 = 16;
/// Fractional digits a `decimal(18,2)` column can hold
const PRICE_SCALE: u32 = 2;

/// Prices must fit `decimal(18,2)` exactly and may not be negative
fn validate_price(value: &Decimal) -> Result<(), ValidationError> {
    let fail = |code: &'static str, message: &'static str| {
        let mut err = ValidationError::new(code);
        err.message = Some(message.into());
        Err(err)
    };

    if value.is_sign_negative() && !value.is_zero() {
        return fail("range", "must not be negative");
    }
    if value.normalize().scale() > PRICE_SCALE {
        return fail("scale", "must have at most 2 decimal places");
    }
    if value.trunc() >= Decimal::from(10_i64.pow(PRICE_INTEGER_DIGITS)) {
        return fail("range", "must be less than 10^16");
    }
    Ok(())
}

/// A catalog product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    #[schema(value_type = f64, example = 9.99)]
    pub price: Decimal,
    #[schema(value_type = f64, example = 1.0)]
    pub delivery_price: Decimal,
}

/// Request body for creating or replacing a product.
///
/// `id` is optional. On create a missing id is generated; on update it must
/// match the path when present.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductInput {
    pub id: Option<Uuid>,
    #[serde(default)]
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 500))]
    pub description: String,
    #[serde(default)]
    #[schema(value_type = f64, example = 9.99)]
    #[validate(custom(function = "validate_price"))]
    pub price: Decimal,
    #[serde(default)]
    #[schema(value_type = f64, example = 1.0)]
    #[validate(custom(function = "validate_price"))]
    pub delivery_price: Decimal,
}

impl ProductInput {
    /// Build the stored product under `id`
    pub fn into_product(self, id: Uuid) -> Product {
        Product {
            id,
            name: self.name,
            description: self.description,
            price: self.price,
            delivery_price: self.delivery_price,
        }
    }
}

/// Product list wrapper
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProductList {
    pub items: Vec<Product>,
}

/// Query filter for listing products
#[derive(Debug, Clone, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProductFilter {
    /// Exact product name; blank means no filter
    pub name: Option<String>,
}

impl ProductFilter {
    pub fn by_name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
        }
    }

    /// The name to match, if one was given and is not blank
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref().filter(|n| !n.trim().is_empty())
    }
}

/// A variant attribute of a product, e.g. a colour
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductOption {
    pub id: Uuid,
    pub product_id: Uuid,
    pub name: String,
    pub description: String,
}

/// Request body for creating or replacing a product option.
///
/// Missing ids are taken from the path (or generated for a new option id);
/// present ids must agree with the path.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductOptionInput {
    pub id: Option<Uuid>,
    pub product_id: Option<Uuid>,
    #[serde(default)]
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 500))]
    pub description: String,
}

impl ProductOptionInput {
    pub fn into_option(self, id: Uuid, product_id: Uuid) -> ProductOption {
        ProductOption {
            id,
            product_id,
            name: self.name,
            description: self.description,
        }
    }
}

/// Product option list wrapper
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProductOptionList {
    pub items: Vec<ProductOption>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_product_serializes_camel_case_numbers() {
        let product = Product {
            id: Uuid::nil(),
            name: "Widget".into(),
            description: String::new(),
            price: Decimal::new(999, 2),
            delivery_price: Decimal::new(100, 2),
        };

        let json = serde_json::to_value(&product).unwrap();
        assert_eq!(json["price"], json!(9.99));
        assert_eq!(json["deliveryPrice"], json!(1.0));
        assert!(json.get("delivery_price").is_none());
    }

    #[test]
    fn test_product_input_defaults_and_validation() {
        let input: ProductInput = serde_json::from_value(json!({"price": 5})).unwrap();
        assert!(input.id.is_none());

        let errors = input.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("name"));
    }

    #[test]
    fn test_negative_price_rejected() {
        let input: ProductInput =
            serde_json::from_value(json!({"name": "Widget", "price": -1, "deliveryPrice": 0}))
                .unwrap();

        let errors = input.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("price"));
        assert!(!errors.field_errors().contains_key("delivery_price"));
    }

    #[test]
    fn test_price_must_fit_storage_precision() {
        let parse = |price: serde_json::Value| -> ProductInput {
            serde_json::from_value(json!({"name": "Widget", "price": price, "deliveryPrice": 0}))
                .unwrap()
        };

        let too_precise = parse(json!(9.999)).validate().unwrap_err();
        assert_eq!(too_precise.field_errors()["price"][0].code, "scale");

        let too_large = parse(json!(1e17)).validate().unwrap_err();
        assert_eq!(too_large.field_errors()["price"][0].code, "range");

        assert!(parse(json!(9.99)).validate().is_ok());
        assert!(parse(json!(9.9)).validate().is_ok());
        assert!(parse(json!(0)).validate().is_ok());
    }

    #[test]
    fn test_price_bounds_are_exact() {
        assert!(validate_price(&Decimal::new(9_999_999_999_999_999_99, 2)).is_ok());
        assert!(validate_price(&Decimal::from(10_i64.pow(16))).is_err());
        assert!(validate_price(&Decimal::new(1000, 3)).is_ok());
        assert!(validate_price(&Decimal::new(5, 3)).is_err());
    }

    #[test]
    fn test_name_length_bounds() {
        let long = ProductOptionInput {
            id: None,
            product_id: None,
            name: "x".repeat(101),
            description: String::new(),
        };
        assert!(long.validate().is_err());

        let ok = ProductOptionInput {
            name: "x".repeat(100),
            ..long
        };
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn test_blank_filter_is_ignored() {
        assert_eq!(ProductFilter::by_name("  ").name(), None);
        assert_eq!(ProductFilter::by_name("Widget").name(), Some("Widget"));
        assert_eq!(ProductFilter::default().name(), None);
    }
}
