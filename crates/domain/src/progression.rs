use std::fmt;

use crate::{Catalog, ExerciseDefinition, Level, MuscleGroup, ProgramWeek, Sets, Weekday};

/// Reps prescription as authored in the configuration: a plain count, a
/// range, or free-form text for unit-bearing values ("20km"). Parsing
/// never fails; anything non-numeric passes through verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepsSpec {
    Count(u32, Option<String>),
    Range(u32, u32, Option<String>),
    Text(String),
}

impl RepsSpec {
    /// Level-scaled variant: numeric bounds gain `(level - 1) * 2`,
    /// free-form text is returned unchanged.
    #[must_use]
    pub fn scaled(&self, level: Level) -> RepsSpec {
        let increase = (level.get() - 1) * 2;
        match self {
            RepsSpec::Count(count, suffix) => RepsSpec::Count(count + increase, suffix.clone()),
            RepsSpec::Range(low, high, suffix) => {
                RepsSpec::Range(low + increase, high + increase, suffix.clone())
            }
            RepsSpec::Text(text) => RepsSpec::Text(text.clone()),
        }
    }

    fn parse_bound(value: &str) -> Option<(u32, Option<String>)> {
        let digits = value.len() - value.trim_start_matches(|c: char| c.is_ascii_digit()).len();
        if digits == 0 {
            return None;
        }
        let number = value[..digits].parse().ok()?;
        let suffix = value[digits..].to_string();
        Some((number, (!suffix.is_empty()).then_some(suffix)))
    }
}

impl From<&str> for RepsSpec {
    fn from(value: &str) -> Self {
        let trimmed = value.trim();

        if let Some((low, high)) = trimmed.split_once('-') {
            if let (Some((low, None)), Some((high, suffix))) =
                (Self::parse_bound(low), Self::parse_bound(high))
            {
                return RepsSpec::Range(low, high, suffix);
            }
        } else if let Some((count, suffix)) = Self::parse_bound(trimmed) {
            return RepsSpec::Count(count, suffix);
        }

        RepsSpec::Text(trimmed.to_string())
    }
}

impl fmt::Display for RepsSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RepsSpec::Count(count, suffix) => {
                write!(f, "{count}{}", suffix.as_deref().unwrap_or_default())
            }
            RepsSpec::Range(low, high, suffix) => {
                write!(f, "{low}-{high}{}", suffix.as_deref().unwrap_or_default())
            }
            RepsSpec::Text(text) => write!(f, "{text}"),
        }
    }
}

/// Concrete sets and reps to display for one exercise in one program
/// week.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prescription {
    pub sets: Sets,
    pub reps: RepsSpec,
}

#[must_use]
pub fn prescription(exercise: &ExerciseDefinition, week: ProgramWeek) -> Prescription {
    let level = week.level();

    if exercise.is_forearm() {
        let (sets, low, high) = match level.get() {
            0 | 1 => (Sets::ONE, 8, 10),
            2 => (Sets::ONE, 10, 12),
            3 => (Sets::TWO, 10, 12),
            _ => (Sets::TWO, 12, 15),
        };
        return Prescription {
            sets,
            reps: RepsSpec::Range(low, high, None),
        };
    }

    Prescription {
        sets: exercise.sets,
        reps: exercise.reps.scaled(level),
    }
}

/// Exercises prescribed for one muscle group on one weekday of one
/// program week: everything unlocked at the current level, except that
/// forearm accessories are reduced to a single entry rotated
/// deterministically across the program.
#[must_use]
pub fn exercises_for_group_on_day(
    catalog: &Catalog,
    group: MuscleGroup,
    weekday: Weekday,
    week: ProgramWeek,
) -> Vec<&ExerciseDefinition> {
    let level = week.level();
    let (forearm, mut selected): (Vec<&ExerciseDefinition>, Vec<&ExerciseDefinition>) = catalog
        .exercises_for(group)
        .iter()
        .filter(|exercise| exercise.difficulty <= level)
        .partition(|exercise| exercise.is_forearm());

    if !forearm.is_empty() {
        let mut forearm = forearm;
        forearm.sort_by_key(|exercise| exercise.difficulty);
        let index = ((week.get() - 1) * 7 + weekday.index()) as usize % forearm.len();
        selected.push(forearm[index]);
    }

    selected
}
