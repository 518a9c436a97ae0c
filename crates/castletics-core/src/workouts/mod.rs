//! Workout catalog and daily selection.

mod catalog;

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Upper,
    Lower,
    Core,
    Full,
}

impl Category {
    pub const ALL: [Category; 4] = [Category::Upper, Category::Lower, Category::Core, Category::Full];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Upper => "upper",
            Category::Lower => "lower",
            Category::Core => "core",
            Category::Full => "full",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ValidationError::InvalidValue {
                field: "category".into(),
                message: format!("'{s}' is not one of upper, lower, core, full"),
            })
    }
}

/// A catalog workout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Workout {
    pub name: &'static str,
    pub category: Category,
    /// Nominal duration in minutes.
    pub duration: u32,
    pub exercises: &'static [&'static str],
}

/// Every built-in workout, in catalog order.
pub fn all() -> &'static [Workout] {
    catalog::CATALOG
}

/// The workout shown on `date`: cycles through the catalog by day of month.
pub fn workout_of_the_day(date: NaiveDate) -> &'static Workout {
    let catalog = all();
    &catalog[(date.day0() as usize) % catalog.len()]
}

pub fn random_workout() -> &'static Workout {
    let catalog = all();
    catalog
        .choose(&mut rand::thread_rng())
        .unwrap_or(&catalog[0])
}

pub fn workouts_by_category(category: Category) -> impl Iterator<Item = &'static Workout> {
    all().iter().filter(move |w| w.category == category)
}

/// Case-insensitive lookup by name.
pub fn find_workout(name: &str) -> Option<&'static Workout> {
    let name = name.trim();
    all().iter().find(|w| w.name.eq_ignore_ascii_case(name))
}
