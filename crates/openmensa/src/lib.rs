//! Client for the [OpenMensa](https://openmensa.org) api.
//!
//! ```no_run
//! # async fn run() -> openmensa::Result<()> {
//! let api = openmensa::OpenMensa::new()?;
//! let canteen = api.find_canteen("Contine").await?;
//! let (day, meals) = api.next_meals(canteen.id).await?;
//! println!("{canteen}: {day}");
//! for meal in meals {
//!     println!("  {meal}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod fetch;
pub mod paginate;
pub mod raw;
mod processed;

pub use client::{CanteenFilter, OpenMensa};
pub use config::ClientConfig;
pub use error::{Error, Result};
pub use processed::*;
