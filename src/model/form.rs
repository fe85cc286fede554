//! Form types and their validation rules.
//!
//! Each submitted form deserializes from the request body as-is and is
//! validated explicitly, producing either the cleaned values or a set of
//! [`FieldErrors`] the handler renders back into the form. Validation
//! failures are never HTTP errors: the form is redisplayed with a success
//! status and the offending fields flagged.

use std::collections::BTreeMap;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Maximum accepted length for a search query. Longer values are treated
/// as "no filter applied", not as a request error.
pub const MAX_SEARCH_LEN: usize = 255;

pub const REQUIRED_MESSAGE: &str = "This field is required.";
pub const PASSWORD_MISMATCH_MESSAGE: &str = "The two password fields didn't match.";
pub const YEARS_NOT_A_NUMBER_MESSAGE: &str = "Enter a whole number.";
pub const YEARS_TOO_HIGH_MESSAGE: &str = "Years of experience should not exceed 45 years";
pub const YEARS_TOO_LOW_MESSAGE: &str = "Years of experience can't be less than 1";
pub const PRICE_INVALID_MESSAGE: &str = "Enter a valid price.";
pub const PRICE_NEGATIVE_MESSAGE: &str = "Price must not be negative.";
pub const PRICE_DECIMALS_MESSAGE: &str = "Ensure that there are no more than 2 decimal places.";
pub const PRICE_DIGITS_MESSAGE: &str =
    "Ensure that there are no more than 4 digits before the decimal point.";
pub const INVALID_CHOICE_MESSAGE: &str = "Select a valid choice.";

/// Field-scoped validation messages, keyed by form field name.
#[derive(Debug, Default, PartialEq, Eq, Serialize)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0.entry(field.to_string()).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Messages recorded for one field, empty when the field is clean.
    pub fn messages(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or(&[])
    }
}

fn substring_filter(value: Option<&str>) -> Option<&str> {
    let value = value?.trim();

    if value.is_empty() || value.len() > MAX_SEARCH_LEN {
        return None;
    }

    Some(value)
}

/// Query parameters of the name-searchable list views.
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub name: Option<String>,
    pub page: Option<u64>,
}

impl SearchParams {
    pub fn filter(&self) -> Option<&str> {
        substring_filter(self.name.as_deref())
    }

    pub fn page(&self) -> u64 {
        self.page.unwrap_or(1).max(1)
    }

    /// Raw value echoed back into the search field.
    pub fn echo(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }
}

/// Query parameters of the cook list view, searching on username.
#[derive(Debug, Default, Deserialize)]
pub struct CookSearchParams {
    pub username: Option<String>,
    pub page: Option<u64>,
}

impl CookSearchParams {
    pub fn filter(&self) -> Option<&str> {
        substring_filter(self.username.as_deref())
    }

    pub fn page(&self) -> u64 {
        self.page.unwrap_or(1).max(1)
    }

    pub fn echo(&self) -> &str {
        self.username.as_deref().unwrap_or("")
    }
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct LoginForm {
    pub username: String,
    #[serde(skip_serializing)]
    pub password: String,
}

/// Single-field form shared by dish types and ingredients.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct NameForm {
    pub name: String,
}

impl NameForm {
    pub fn validate(&self) -> Result<String, FieldErrors> {
        let name = self.name.trim();

        if name.is_empty() {
            let mut errors = FieldErrors::default();
            errors.add("name", REQUIRED_MESSAGE);
            return Err(errors);
        }

        Ok(name.to_string())
    }
}

/// Dish create/update submission. The ingredient multi-select arrives as
/// repeated `ingredients` keys; an empty selection is permitted. The dish
/// type select submits its id as text, with an empty value for the blank
/// choice.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct DishForm {
    pub name: String,
    pub description: String,
    pub price: String,
    pub dish_type: String,
    #[serde(default)]
    pub ingredients: Vec<i32>,
}

/// Cleaned dish fields ready for persistence.
#[derive(Debug, Clone, PartialEq)]
pub struct DishSubmission {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub dish_type_id: i32,
    pub ingredient_ids: Vec<i32>,
}

impl DishForm {
    pub fn validate(&self) -> Result<DishSubmission, FieldErrors> {
        let mut errors = FieldErrors::default();

        let name = self.name.trim();
        if name.is_empty() {
            errors.add("name", REQUIRED_MESSAGE);
        }

        let description = self.description.trim();
        if description.is_empty() {
            errors.add("description", REQUIRED_MESSAGE);
        }

        let price = validate_price(&self.price, &mut errors);

        let dish_type = self.dish_type.trim();
        let dish_type_id = if dish_type.is_empty() {
            errors.add("dish_type", REQUIRED_MESSAGE);
            None
        } else {
            match dish_type.parse::<i32>() {
                Ok(id) => Some(id),
                Err(_) => {
                    errors.add("dish_type", INVALID_CHOICE_MESSAGE);
                    None
                }
            }
        };

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(DishSubmission {
            name: name.to_string(),
            description: description.to_string(),
            price: price.expect("price is set when no errors were recorded"),
            dish_type_id: dish_type_id.expect("dish_type checked above"),
            ingredient_ids: self.ingredients.clone(),
        })
    }
}

/// `price` must be a non-negative decimal with at most 2 fractional digits
/// and at most 4 integer digits (6 significant digits total).
fn validate_price(raw: &str, errors: &mut FieldErrors) -> Option<Decimal> {
    let raw = raw.trim();

    if raw.is_empty() {
        errors.add("price", REQUIRED_MESSAGE);
        return None;
    }

    let Ok(price) = Decimal::from_str(raw) else {
        errors.add("price", PRICE_INVALID_MESSAGE);
        return None;
    };

    if price.is_sign_negative() && !price.is_zero() {
        errors.add("price", PRICE_NEGATIVE_MESSAGE);
        return None;
    }

    if price.scale() > 2 {
        errors.add("price", PRICE_DECIMALS_MESSAGE);
        return None;
    }

    if price.trunc() > Decimal::from(9999) {
        errors.add("price", PRICE_DIGITS_MESSAGE);
        return None;
    }

    Some(price)
}

/// Registration-style cook creation: username, password entered twice,
/// names, and years of experience within [1, 45].
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct CookCreationForm {
    pub username: String,
    #[serde(skip_serializing)]
    pub password1: String,
    #[serde(skip_serializing)]
    pub password2: String,
    pub first_name: String,
    pub last_name: String,
    pub years_of_experience: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookRegistration {
    pub username: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub years_of_experience: i32,
}

impl CookCreationForm {
    pub fn validate(&self) -> Result<CookRegistration, FieldErrors> {
        let mut errors = FieldErrors::default();

        let username = self.username.trim();
        if username.is_empty() {
            errors.add("username", REQUIRED_MESSAGE);
        }

        if self.password1.is_empty() {
            errors.add("password1", REQUIRED_MESSAGE);
        } else if self.password1 != self.password2 {
            errors.add("password2", PASSWORD_MISMATCH_MESSAGE);
        }

        let first_name = self.first_name.trim();
        if first_name.is_empty() {
            errors.add("first_name", REQUIRED_MESSAGE);
        }

        let last_name = self.last_name.trim();
        if last_name.is_empty() {
            errors.add("last_name", REQUIRED_MESSAGE);
        }

        let years = validate_years(&self.years_of_experience, &mut errors);

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(CookRegistration {
            username: username.to_string(),
            password: self.password1.clone(),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            years_of_experience: years.expect("years is set when no errors were recorded"),
        })
    }
}

/// Experience update form for an existing cook, same bounds as
/// registration.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ExperienceForm {
    pub years_of_experience: String,
}

impl ExperienceForm {
    pub fn validate(&self) -> Result<i32, FieldErrors> {
        let mut errors = FieldErrors::default();
        let years = validate_years(&self.years_of_experience, &mut errors);

        match years {
            Some(years) if errors.is_empty() => Ok(years),
            _ => Err(errors),
        }
    }
}

fn validate_years(raw: &str, errors: &mut FieldErrors) -> Option<i32> {
    let raw = raw.trim();

    if raw.is_empty() {
        errors.add("years_of_experience", REQUIRED_MESSAGE);
        return None;
    }

    let Ok(years) = raw.parse::<i32>() else {
        errors.add("years_of_experience", YEARS_NOT_A_NUMBER_MESSAGE);
        return None;
    };

    if years > 45 {
        errors.add("years_of_experience", YEARS_TOO_HIGH_MESSAGE);
        return None;
    }

    if years < 1 {
        errors.add("years_of_experience", YEARS_TOO_LOW_MESSAGE);
        return None;
    }

    Some(years)
}
