//! Wire shapes, mirroring the upstream json exactly.
//!
//! Nothing in here is normalized, see `processed` for the types handed out
//! to callers.

use std::collections::HashMap;

use serde::Deserialize;

/// a date as sent by the api
///
/// the days endpoints send a plain string, the meals listing of a canteen
/// wraps it in an object
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum ApiDate {
    Flat(String),
    Nested { date: String },
}

impl ApiDate {
    pub fn as_str(&self) -> &str {
        match self {
            ApiDate::Flat(date) | ApiDate::Nested { date } => date,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiDay {
    pub date: ApiDate,
    pub closed: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiMeal {
    pub id: u64,
    pub name: String,
    pub category: Option<String>,
    /// allergens, additives, ... may repeat
    pub notes: Option<Vec<String>>,
    /// groups without a price are sent as `null`
    pub prices: Option<HashMap<String, Option<f64>>>,
}

/// one entry of `/canteens/{id}/meals`
#[derive(Debug, Deserialize, Clone)]
pub struct ApiMenu {
    pub date: ApiDate,
    pub closed: bool,
    #[serde(default)]
    pub meals: Vec<ApiMeal>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_accepts_both_shapes() {
        let flat: ApiDate = serde_json::from_str(r#""2024-03-01""#).unwrap();
        let nested: ApiDate = serde_json::from_str(r#"{"date":"2024-03-01"}"#).unwrap();

        assert_eq!(flat, ApiDate::Flat("2024-03-01".into()));
        assert_eq!(nested, ApiDate::Nested { date: "2024-03-01".into() });
        assert_eq!(flat.as_str(), nested.as_str());
    }

    #[test]
    fn date_rejects_other_shapes() {
        assert!(serde_json::from_str::<ApiDate>("20240301").is_err());
        assert!(serde_json::from_str::<ApiDate>(r#"{"day":"2024-03-01"}"#).is_err());
    }

    #[test]
    fn meal_optional_fields() {
        let meal: ApiMeal = serde_json::from_str(r#"{"id":1,"name":"Soup"}"#).unwrap();
        assert!(meal.category.is_none());
        assert!(meal.notes.is_none());
        assert!(meal.prices.is_none());
    }

    #[test]
    fn menu_without_meals() {
        let menu: ApiMenu = serde_json::from_str(
            r#"{"date":"2024-03-02","closed":true}"#,
        ).unwrap();
        assert!(menu.closed);
        assert!(menu.meals.is_empty());
    }
}
