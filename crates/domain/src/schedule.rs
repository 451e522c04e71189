use std::{collections::BTreeMap, slice::Iter};

use chrono::{Datelike, NaiveDate};

use crate::{Catalog, Level, MuscleGroup, ProgramWeek, Property};

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    /// Token used in persisted identifiers and document keys.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Weekday::Monday => "monday",
            Weekday::Tuesday => "tuesday",
            Weekday::Wednesday => "wednesday",
            Weekday::Thursday => "thursday",
            Weekday::Friday => "friday",
            Weekday::Saturday => "saturday",
            Weekday::Sunday => "sunday",
        }
    }

    /// Days since Monday (0..=6).
    #[must_use]
    pub fn index(self) -> u32 {
        match self {
            Weekday::Monday => 0,
            Weekday::Tuesday => 1,
            Weekday::Wednesday => 2,
            Weekday::Thursday => 3,
            Weekday::Friday => 4,
            Weekday::Saturday => 5,
            Weekday::Sunday => 6,
        }
    }
}

impl Property for Weekday {
    fn iter() -> Iter<'static, Weekday> {
        static WEEKDAYS: [Weekday; 7] = [
            Weekday::Monday,
            Weekday::Tuesday,
            Weekday::Wednesday,
            Weekday::Thursday,
            Weekday::Friday,
            Weekday::Saturday,
            Weekday::Sunday,
        ];
        WEEKDAYS.iter()
    }

    fn name(self) -> &'static str {
        match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
            Weekday::Sunday => "Sunday",
        }
    }
}

impl From<NaiveDate> for Weekday {
    fn from(date: NaiveDate) -> Self {
        match date.weekday() {
            chrono::Weekday::Mon => Weekday::Monday,
            chrono::Weekday::Tue => Weekday::Tuesday,
            chrono::Weekday::Wed => Weekday::Wednesday,
            chrono::Weekday::Thu => Weekday::Thursday,
            chrono::Weekday::Fri => Weekday::Friday,
            chrono::Weekday::Sat => Weekday::Saturday,
            chrono::Weekday::Sun => Weekday::Sunday,
        }
    }
}

impl TryFrom<&str> for Weekday {
    type Error = WeekdayError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Weekday::iter()
            .find(|weekday| weekday.key() == value)
            .copied()
            .ok_or_else(|| WeekdayError::Invalid(value.to_string()))
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum WeekdayError {
    #[error("Invalid weekday `{0}`")]
    Invalid(String),
}

/// Mapping from weekday to the muscle groups scheduled that day. A
/// missing or empty entry means rest day.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeekPlan {
    days: BTreeMap<Weekday, Vec<MuscleGroup>>,
}

impl WeekPlan {
    #[must_use]
    pub fn new(days: BTreeMap<Weekday, Vec<MuscleGroup>>) -> Self {
        Self { days }
    }

    #[must_use]
    pub fn muscle_groups(&self, weekday: Weekday) -> &[MuscleGroup] {
        self.days.get(&weekday).map_or(&[], Vec::as_slice)
    }

    #[must_use]
    pub fn is_rest_day(&self, weekday: Weekday) -> bool {
        self.muscle_groups(weekday).is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Weekday, &[MuscleGroup])> {
        self.days
            .iter()
            .map(|(weekday, groups)| (*weekday, groups.as_slice()))
    }

    #[must_use]
    pub fn training_days(&self) -> u32 {
        Weekday::iter()
            .filter(|weekday| !self.is_rest_day(**weekday))
            .count()
            .try_into()
            .unwrap_or(7)
    }
}

impl FromIterator<(Weekday, Vec<MuscleGroup>)> for WeekPlan {
    fn from_iter<T: IntoIterator<Item = (Weekday, Vec<MuscleGroup>)>>(iter: T) -> Self {
        Self {
            days: iter.into_iter().collect(),
        }
    }
}

/// Fixed, enumerable schedule transformations applied to a base cycle
/// week for levels beyond the hand-authored first cycle.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum IntensifyMode {
    Frequency,
    Volume,
    Advanced,
}

impl IntensifyMode {
    #[must_use]
    pub fn for_level(level: Level) -> Option<Self> {
        match level.get() {
            0 | 1 => None,
            2 => Some(IntensifyMode::Frequency),
            3 => Some(IntensifyMode::Volume),
            _ => Some(IntensifyMode::Advanced),
        }
    }

    const MAX_GROUPS_PER_DAY: usize = 3;

    #[must_use]
    pub fn apply(self, base: &WeekPlan) -> WeekPlan {
        match self {
            IntensifyMode::Frequency => {
                let mut days = base.days.clone();
                if base.is_rest_day(Weekday::Tuesday) {
                    days.insert(
                        Weekday::Tuesday,
                        vec![MuscleGroup::Shoulders, MuscleGroup::Abs],
                    );
                }
                WeekPlan { days }
            }
            IntensifyMode::Volume => {
                let mut days = base.days.clone();
                for groups in days.values_mut() {
                    if !groups.is_empty()
                        && !groups.contains(&MuscleGroup::Abs)
                        && groups.len() < Self::MAX_GROUPS_PER_DAY
                    {
                        groups.push(MuscleGroup::Abs);
                    }
                }
                if base.is_rest_day(Weekday::Tuesday) {
                    days.insert(
                        Weekday::Tuesday,
                        vec![MuscleGroup::Shoulders, MuscleGroup::Abs, MuscleGroup::Cardio],
                    );
                }
                WeekPlan { days }
            }
            IntensifyMode::Advanced => WeekPlan {
                days: BTreeMap::from([
                    (
                        Weekday::Monday,
                        vec![MuscleGroup::Chest, MuscleGroup::Shoulders, MuscleGroup::Abs],
                    ),
                    (Weekday::Tuesday, vec![MuscleGroup::Back, MuscleGroup::Arms]),
                    (
                        Weekday::Wednesday,
                        vec![MuscleGroup::Legs, MuscleGroup::Abs],
                    ),
                    (
                        Weekday::Thursday,
                        vec![MuscleGroup::Chest, MuscleGroup::Arms],
                    ),
                    (
                        Weekday::Friday,
                        vec![MuscleGroup::Back, MuscleGroup::Shoulders, MuscleGroup::Abs],
                    ),
                    (
                        Weekday::Saturday,
                        vec![MuscleGroup::Legs, MuscleGroup::Cardio],
                    ),
                    (Weekday::Sunday, vec![]),
                ]),
            },
        }
    }
}

/// Training plan for an arbitrary program week: the hand-authored base
/// cycle verbatim for level 1, an intensified variant above it. A base
/// cycle week missing from the configuration yields an all-rest plan.
#[must_use]
pub fn generate_week_plan(catalog: &Catalog, week: ProgramWeek) -> WeekPlan {
    let base = catalog
        .base_week(week.cycle_week())
        .cloned()
        .unwrap_or_default();

    match IntensifyMode::for_level(week.level()) {
        None => base,
        Some(mode) => mode.apply(&base),
    }
}
