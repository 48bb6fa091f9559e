use std::{collections::BTreeMap, path::Path};

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

mod data;
pub use data::*;

/// Everything the mock serves. Read-only once the server runs.
///
/// Can be loaded from json:
///
/// ```json
/// {
///   "canteens": [{"id": 1, "name": "...", "city": "...", "address": "...", "coordinates": [52.5, 13.4]}],
///   "days": {"1": [{"date": "2024-03-01", "closed": false}]},
///   "meals": {"1": {"2024-03-01": [{"id": 1, "name": "...", "notes": [], "prices": {"students": 2.1}}]}}
/// }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Fixtures {
    #[serde(default)]
    pub canteens: Vec<Canteen>,
    #[serde(default)]
    pub days: BTreeMap<u64, Vec<Day>>,
    #[serde(default)]
    pub meals: BTreeMap<u64, BTreeMap<NaiveDate, Vec<Meal>>>,
}

impl Fixtures {
    pub async fn read(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        tracing::info!("reading fixtures from {path:?}");
        let data = tokio::fs::read(path).await?;
        Ok(serde_json::from_slice(&data)?)
    }

    pub fn canteen(&self, id: u64) -> Option<&Canteen> {
        self.canteens.iter().find(|v| v.id == id)
    }

    pub fn days(&self, id: u64) -> Option<&[Day]> {
        self.canteen(id)?;
        Some(self.days.get(&id).map(Vec::as_slice).unwrap_or_default())
    }

    pub fn day(&self, id: u64, date: NaiveDate) -> Option<&Day> {
        self.days(id)?.iter().find(|v| v.date == date)
    }

    /// `None` if the day is unknown, meals of a known day may be empty
    pub fn meals(&self, id: u64, date: NaiveDate) -> Option<&[Meal]> {
        self.day(id, date)?;
        Some(self.meals
            .get(&id)
            .and_then(|v| v.get(&date))
            .map(Vec::as_slice)
        .unwrap_or_default())
    }

    pub fn menus(&self, id: u64) -> Option<Vec<Menu<'_>>> {
        Some(self.days(id)?.iter().map(|day| Menu {
            date: day.date,
            closed: day.closed,
            meals: self.meals(id, day.date).unwrap_or_default(),
        }).collect())
    }

    pub fn add_canteen(&mut self, canteen: Canteen) -> &mut Self {
        self.canteens.push(canteen);
        self
    }

    pub fn add_day(&mut self, id: u64, date: NaiveDate, closed: bool) -> &mut Self {
        self.days.entry(id).or_default().push(Day { date, closed });
        self
    }

    pub fn add_meal(&mut self, id: u64, date: NaiveDate, meal: Meal) -> &mut Self {
        self.meals.entry(id).or_default()
            .entry(date).or_default()
        .push(meal);
        self
    }

    /// a few canteens around Hannover with a week of meals, starting `from`
    pub fn demo(from: NaiveDate) -> Self {
        let mut fixtures = Self::default();

        let canteens = [
            (7, "Contine", "Callinstraße 23, 30167 Hannover", [52.3829, 9.7178]),
            (8, "Mensa PZH", "An der Universität 1, 30823 Garbsen", [52.4204, 9.6188]),
            (9, "Café X", "Welfengarten 1, 30167 Hannover", [52.3823, 9.7172]),
            (10, "Hauptmensa", "Callinstraße 14, 30167 Hannover", [52.3845, 9.7147]),
        ];
        for (id, name, address, coordinates) in canteens {
            fixtures.add_canteen(Canteen {
                id,
                name: name.into(),
                city: "Hannover".into(),
                address: address.into(),
                coordinates: Some(coordinates),
            });
        }

        let mut meal_id = 1;
        for (id, ..) in canteens {
            for offset in 0..7 {
                let Some(date) = from.checked_add_days(Days::new(offset)) else { continue };
                let closed = offset >= 5;
                fixtures.add_day(id, date, closed);
                if closed { continue; }

                for (name, category, notes) in [
                    ("Linseneintopf", "Eintopf", &["vegan", "Gluten", "vegan"][..]),
                    ("Currywurst mit Pommes", "Hauptgericht", &["Schwein", "Senf"][..]),
                ] {
                    fixtures.add_meal(id, date, Meal {
                        id: meal_id,
                        name: name.into(),
                        category: Some(category.into()),
                        notes: notes.iter().map(|v| v.to_string()).collect(),
                        prices: BTreeMap::from([
                            ("students".into(), Some(2.1)),
                            ("employees".into(), Some(3.6)),
                            ("pupils".into(), None),
                            ("others".into(), Some(4.6)),
                        ]),
                    });
                    meal_id += 1;
                }
            }
        }

        fixtures
    }
}
