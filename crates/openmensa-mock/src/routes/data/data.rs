
use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Canteen {
    pub id: u64,
    pub name: String,
    pub city: String,
    pub address: String,
    pub coordinates: Option<[f64; 2]>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Day {
    pub date: NaiveDate,
    pub closed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meal {
    pub id: u64,
    pub name: String,
    pub category: Option<String>,
    /// served as is, duplicates included
    #[serde(default)]
    pub notes: Vec<String>,
    /// `None` is served as `null`
    #[serde(default)]
    pub prices: BTreeMap<String, Option<f64>>,
}

/// entry of `/canteens/{id}/meals`
#[derive(Debug, Serialize)]
pub struct Menu<'a> {
    pub date: NaiveDate,
    pub closed: bool,
    pub meals: &'a [Meal],
}
