use chrono::NaiveDate;
use regex_lite::Regex;
use serde::de::DeserializeOwned;

use crate::{
    config::ClientConfig,
    fetch::{Fetcher, Query},
    paginate,
    raw,
    Canteen, CanteenId, Day, Error, Meal, MealId, Menu, Opening, Result,
};

/// Which canteens a listing should return.
#[derive(Debug, Clone, PartialEq)]
pub enum CanteenFilter {
    All,
    /// within `distance` km of a point
    Near { latitude: f64, longitude: f64, distance: f64 },
    Ids(Vec<CanteenId>),
}

impl CanteenFilter {
    pub fn query(&self) -> Query {
        match self {
            CanteenFilter::All => Query::new(),
            CanteenFilter::Near { latitude, longitude, distance } => Query::new()
                .with("near[lat]", latitude)
                .with("near[lng]", longitude)
                .with("near[dist]", distance),
            CanteenFilter::Ids(ids) => Query::new().with("ids", ids
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
            .join(",")),
        }
    }
}

/// Handle to the OpenMensa api.
///
/// Every method is a self-contained query: requests are sent one after the
/// other and nothing is cached between calls. Clones share one connection
/// pool and may be used from several tasks at once.
#[derive(Debug, Clone)]
pub struct OpenMensa {
    fetcher: Fetcher,
}

impl OpenMensa {
    /// client for the public api with default settings
    pub fn new() -> Result<Self> {
        Self::with_config(&ClientConfig::default())
    }

    pub fn with_config(config: &ClientConfig) -> Result<Self> {
        Ok(Self { fetcher: Fetcher::new(config)? })
    }

    pub fn fetcher(&self) -> &Fetcher { &self.fetcher }

    pub async fn canteens(&self) -> Result<Vec<Canteen>> {
        self.canteens_filtered(&CanteenFilter::All).await
    }

    pub async fn canteens_near(
        &self, latitude: f64, longitude: f64, distance: f64,
    ) -> Result<Vec<Canteen>> {
        self.canteens_filtered(&CanteenFilter::Near { latitude, longitude, distance }).await
    }

    /// one paginated request for all of `ids`, unknown ids are skipped
    pub async fn canteens_by_ids(&self, ids: &[CanteenId]) -> Result<Vec<Canteen>> {
        self.canteens_filtered(&CanteenFilter::Ids(ids.to_vec())).await
    }

    /// An empty [`CanteenFilter::Ids`] selects nothing and sends no request.
    pub async fn canteens_filtered(&self, filter: &CanteenFilter) -> Result<Vec<Canteen>> {
        // the api ignores an empty `ids` filter and would return every canteen
        if let CanteenFilter::Ids(ids) = filter {
            if ids.is_empty() { return Ok(Vec::new()); }
        }
        paginate::collect(&self.fetcher, &filter.query(), &["canteens"]).await
    }

    pub async fn canteen(&self, id: CanteenId) -> Result<Canteen> {
        self.get::<Canteen, _>(&["canteens", &id.to_string()]).await
    }

    /// all canteens whose name matches `pattern`, may be empty
    pub async fn search_canteens(&self, pattern: &str) -> Result<Vec<Canteen>> {
        let pattern = Regex::new(pattern)?;
        Ok(self.canteens().await?
            .into_iter()
            .filter(|v| pattern.is_match(&v.name))
        .collect())
    }

    /// first canteen whose name matches `pattern`
    pub async fn find_canteen(&self, pattern: &str) -> Result<Canteen> {
        let pattern = Regex::new(pattern)?;
        self.canteens().await?
            .into_iter()
            .find(|v| pattern.is_match(&v.name))
        .ok_or(Error::NoMatchingCanteen)
    }

    /// upcoming days as far as the canteen has published them
    pub async fn days(&self, id: CanteenId) -> Result<Vec<Day>> {
        self.get_list::<raw::ApiDay, _>(&["canteens", &id.to_string(), "days"]).await
    }

    pub async fn day(&self, id: CanteenId, date: NaiveDate) -> Result<Day> {
        let date = Opening::from(date).to_string();
        self.get::<raw::ApiDay, _>(&["canteens", &id.to_string(), "days", &date]).await
    }

    pub async fn meals_on(&self, id: CanteenId, date: NaiveDate) -> Result<Vec<Meal>> {
        let date = Opening::from(date).to_string();
        self.get_list::<raw::ApiMeal, _>(
            &["canteens", &id.to_string(), "days", &date, "meals"],
        ).await
    }

    pub async fn meals_today(&self, id: CanteenId) -> Result<Vec<Meal>> {
        self.meals_on(id, today()).await
    }

    /// Meals of the first day in [`Self::days`] that is not closed.
    ///
    /// Fails with [`Error::NoOpenDay`] if every returned day is closed.
    pub async fn next_meals(&self, id: CanteenId) -> Result<(Day, Vec<Meal>)> {
        let day = self.days(id).await?
            .into_iter()
            .find(Day::is_open)
        .ok_or(Error::NoOpenDay(id))?;

        let meals = self.meals_on(id, day.date.date()).await?;
        Ok((day, meals))
    }

    pub async fn meal(
        &self, id: CanteenId, date: NaiveDate, meal: MealId,
    ) -> Result<Meal> {
        let date = Opening::from(date).to_string();
        self.get::<raw::ApiMeal, _>(&[
            "canteens", &id.to_string(),
            "days", &date,
            "meals", &meal.to_string(),
        ]).await
    }

    pub async fn menu_on(&self, id: CanteenId, date: NaiveDate) -> Result<Menu> {
        let day = self.day(id, date).await?;
        let meals = self.meals_on(id, date).await?;
        Ok(Menu { day, meals })
    }

    pub async fn current_menu(&self, id: CanteenId) -> Result<Menu> {
        self.menu_on(id, today()).await
    }

    /// every published menu of a canteen in a single request
    pub async fn all_menus(&self, id: CanteenId) -> Result<Vec<Menu>> {
        self.get_list::<raw::ApiMenu, _>(&["canteens", &id.to_string(), "meals"]).await
    }

    async fn get<R, T>(&self, segments: &[&str]) -> Result<T>
    where
        R: DeserializeOwned,
        T: TryFrom<R>,
        Error: From<T::Error>,
    {
        let response = self.fetcher.get(&Query::new(), segments).await?;
        let raw: R = serde_json::from_slice(&response.body)?;
        Ok(T::try_from(raw)?)
    }

    async fn get_list<R, T>(&self, segments: &[&str]) -> Result<Vec<T>>
    where
        R: DeserializeOwned,
        T: TryFrom<R>,
        Error: From<T::Error>,
    {
        let response = self.fetcher.get(&Query::new(), segments).await?;
        let raw: Vec<R> = serde_json::from_slice(&response.body)?;
        Ok(raw.into_iter().map(T::try_from).collect::<Result<_, _>>()?)
    }
}

fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}
