use std::{collections::{HashMap, HashSet}, fmt, str::FromStr};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::raw;

pub type CanteenId = u64;
pub type MealId = u64;

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Canteen {
    pub id: CanteenId,
    pub name: String,
    pub city: String,
    pub address: String,
    pub coordinates: Option<Coordinates>,
}

impl fmt::Display for Canteen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// sent as a `[latitude, longitude]` pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl From<[f64; 2]> for Coordinates {
    fn from([latitude, longitude]: [f64; 2]) -> Self {
        Self { latitude, longitude }
    }
}

impl From<Coordinates> for [f64; 2] {
    fn from(v: Coordinates) -> Self {
        [v.latitude, v.longitude]
    }
}

/// calendar date of a [`Day`], always `YYYY-MM-DD` on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Opening(NaiveDate);

impl Opening {
    pub fn date(&self) -> NaiveDate { self.0 }
}

impl From<NaiveDate> for Opening {
    fn from(v: NaiveDate) -> Self { Self(v) }
}

impl From<Opening> for NaiveDate {
    fn from(v: Opening) -> Self { v.0 }
}

impl FromStr for Opening {
    type Err = chrono::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(s, DATE_FORMAT).map(Self)
    }
}

impl fmt::Display for Opening {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATE_FORMAT))
    }
}

impl Serialize for Opening {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where S: serde::Serializer
    {
        serializer.collect_str(self)
    }
}

struct OpeningVisitor;
impl<'de> serde::de::Visitor<'de> for OpeningVisitor {
    type Value = Opening;

    fn expecting(
        &self, formatter: &mut fmt::Formatter,
    ) -> fmt::Result {
        write!(formatter, "a date formatted as YYYY-MM-DD")
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where E: serde::de::Error
    {
        v.parse().map_err(|_| {
            serde::de::Error::invalid_value(
                serde::de::Unexpected::Str(v),
                &self,
            )
        })
    }
}

impl<'de> Deserialize<'de> for Opening {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where D: serde::Deserializer<'de>
    { deserializer.deserialize_str(OpeningVisitor) }
}

/// open/closed status of a canteen on one date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Day {
    pub date: Opening,
    pub closed: bool,
}

impl Day {
    pub fn is_open(&self) -> bool { !self.closed }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let desc = if self.closed { "Closed" } else { "Open" };
        write!(f, "{desc} on {}", self.date)
    }
}

impl TryFrom<raw::ApiDay> for Day {
    type Error = chrono::ParseError;

    fn try_from(value: raw::ApiDay) -> Result<Self, Self::Error> {
        Ok(Self {
            date: value.date.as_str().parse()?,
            closed: value.closed,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Meal {
    pub id: MealId,
    pub name: String,
    pub category: Option<String>,
    /// unique, in order of first appearance
    pub notes: Vec<String>,
    /// price per patron group, groups are chosen by the operator
    /// (usually "students", "employees", "pupils" and "others")
    pub prices: HashMap<String, f64>,
}

impl Meal {
    pub fn price(&self, group: &str) -> Option<f64> {
        self.prices.get(group).copied()
    }
}

impl fmt::Display for Meal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl From<raw::ApiMeal> for Meal {
    fn from(value: raw::ApiMeal) -> Self {
        Self {
            id: value.id,
            name: value.name,
            category: value.category,
            notes: dedup_notes(value.notes.unwrap_or_default()),
            prices: value.prices
                .unwrap_or_default()
                .into_iter()
                .filter_map(|(group, price)| Some((group, price?)))
            .collect(),
        }
    }
}

fn dedup_notes(mut notes: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::with_capacity(notes.len());
    notes.retain(|note| seen.insert(note.clone()));
    notes
}

/// all meals of a canteen on one day
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Menu {
    pub day: Day,
    pub meals: Vec<Meal>,
}

impl TryFrom<raw::ApiMenu> for Menu {
    type Error = chrono::ParseError;

    fn try_from(value: raw::ApiMenu) -> Result<Self, Self::Error> {
        let day = Day::try_from(raw::ApiDay {
            date: value.date,
            closed: value.closed,
        })?;

        Ok(Self {
            day,
            meals: value.meals.into_iter().map(Meal::from).collect(),
        })
    }
}
