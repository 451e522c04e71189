use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use ferrum_domain::{
    Catalog, Category, Equipment, ExerciseDefinition, ExerciseKey, Level, MonthKey, MuscleGroup,
    Name, ProgramWeek, Progress, RepsSpec, Sets, WeekDates, WeekPlan, Weekday,
};
use log::warn;
use serde::{Deserialize, Serialize};

/// Persisted form of the static configuration document.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct ConfigDocument {
    pub exercises: BTreeMap<String, Vec<ExerciseEntry>>,
    pub weekly_schedule: BTreeMap<String, BTreeMap<String, Vec<String>>>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct ExerciseEntry {
    pub name: String,
    pub sets: u32,
    pub reps: String,
    pub difficulty_level: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub equipment: Option<String>,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub youtube_url: Option<String>,
}

impl From<&Catalog> for ConfigDocument {
    fn from(catalog: &Catalog) -> Self {
        Self {
            exercises: catalog
                .exercises
                .iter()
                .map(|(group, exercises)| {
                    (
                        group.key().to_string(),
                        exercises.iter().map(ExerciseEntry::from).collect(),
                    )
                })
                .collect(),
            weekly_schedule: catalog
                .base_weeks
                .iter()
                .map(|(cycle_week, plan)| {
                    (
                        format!("week{cycle_week}"),
                        plan.iter()
                            .map(|(weekday, groups)| {
                                (
                                    weekday.key().to_string(),
                                    groups.iter().map(|g| g.key().to_string()).collect(),
                                )
                            })
                            .collect(),
                    )
                })
                .collect(),
        }
    }
}

impl From<&ExerciseDefinition> for ExerciseEntry {
    fn from(exercise: &ExerciseDefinition) -> Self {
        Self {
            name: exercise.name.as_ref().to_string(),
            sets: exercise.sets.get(),
            reps: exercise.reps.to_string(),
            difficulty_level: exercise.difficulty.get(),
            category: exercise.category.map(|c| c.key().to_string()),
            equipment: exercise.equipment.map(|e| e.key().to_string()),
            description: exercise.description.clone(),
            youtube_url: exercise.video_url.clone(),
        }
    }
}

impl From<ConfigDocument> for Catalog {
    /// Best-effort conversion: entries with unknown muscle groups,
    /// weekdays or invalid names are skipped with a warning instead of
    /// failing the whole load.
    fn from(document: ConfigDocument) -> Self {
        let mut exercises: BTreeMap<MuscleGroup, Vec<ExerciseDefinition>> = BTreeMap::new();

        for (group_key, entries) in document.exercises {
            let group = match MuscleGroup::try_from(group_key.as_str()) {
                Ok(group) => group,
                Err(err) => {
                    warn!("skipping exercise group: {err}");
                    continue;
                }
            };

            for entry in entries {
                let name = match Name::new(&entry.name) {
                    Ok(name) => name,
                    Err(err) => {
                        warn!("skipping exercise in group `{group_key}`: {err}");
                        continue;
                    }
                };
                let category = match entry.category.as_deref() {
                    None => None,
                    Some(value) => match Category::try_from(value) {
                        Ok(category) => Some(category),
                        Err(err) => {
                            warn!("dropping category of `{}`: {err}", entry.name);
                            None
                        }
                    },
                };
                let equipment = match entry.equipment.as_deref() {
                    None => None,
                    Some(value) => match Equipment::try_from(value) {
                        Ok(equipment) => Some(equipment),
                        Err(err) => {
                            warn!("dropping equipment of `{}`: {err}", entry.name);
                            None
                        }
                    },
                };
                exercises.entry(group).or_default().push(ExerciseDefinition {
                    name,
                    muscle_group: group,
                    sets: Sets::new(entry.sets).unwrap_or(Sets::ONE),
                    reps: RepsSpec::from(entry.reps.as_str()),
                    difficulty: Level::new(entry.difficulty_level).unwrap_or(Level::BEGINNER),
                    category,
                    equipment,
                    description: entry.description,
                    video_url: entry.youtube_url,
                });
            }
        }

        let mut base_weeks: BTreeMap<u32, WeekPlan> = BTreeMap::new();
        for (week_key, days) in document.weekly_schedule {
            let Some(cycle_week) = week_key
                .strip_prefix("week")
                .and_then(|n| n.parse::<u32>().ok())
                .filter(|n| (1..=4).contains(n))
            else {
                warn!("skipping schedule entry with key `{week_key}`");
                continue;
            };

            let mut plan = BTreeMap::new();
            for (weekday_key, groups) in days {
                let weekday = match Weekday::try_from(weekday_key.as_str()) {
                    Ok(weekday) => weekday,
                    Err(err) => {
                        warn!("skipping schedule day in `{week_key}`: {err}");
                        continue;
                    }
                };
                let groups = groups
                    .iter()
                    .filter_map(|key| match MuscleGroup::try_from(key.as_str()) {
                        Ok(group) => Some(group),
                        Err(err) => {
                            warn!("dropping scheduled group in `{week_key}`: {err}");
                            None
                        }
                    })
                    .collect();
                plan.insert(weekday, groups);
            }
            base_weeks.insert(cycle_week, WeekPlan::new(plan));
        }

        Catalog::new(exercises, base_weeks)
    }
}

/// Persisted form of the mutable progress log.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct ProgressDocument {
    pub completed_exercises: BTreeMap<String, BTreeMap<String, bool>>,
    pub exercise_weeks: BTreeMap<String, u32>,
    pub completed_workouts: BTreeMap<String, Vec<String>>,
    pub total_workouts: u32,
    pub program_start_date: Option<String>,
    pub calendar_mapping: BTreeMap<String, WeekDatesEntry>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct WeekDatesEntry {
    pub start_date: String,
    pub end_date: String,
    pub dates: Vec<String>,
}

impl From<&Progress> for ProgressDocument {
    fn from(progress: &Progress) -> Self {
        Self {
            completed_exercises: progress
                .completed
                .iter()
                .map(|(date, entries)| {
                    (
                        date.to_string(),
                        entries
                            .iter()
                            .map(|(key, completed)| (key.to_string(), *completed))
                            .collect(),
                    )
                })
                .collect(),
            exercise_weeks: progress
                .week_assignments
                .iter()
                .map(|(date, week)| (date.to_string(), week.get()))
                .collect(),
            completed_workouts: progress
                .trained_days
                .iter()
                .map(|(month, dates)| {
                    (
                        month.to_string(),
                        dates.iter().map(ToString::to_string).collect(),
                    )
                })
                .collect(),
            total_workouts: progress.total_trained_days,
            program_start_date: progress.start_date.map(|date| date.to_string()),
            calendar_mapping: progress
                .calendar
                .iter()
                .map(|(week, week_dates)| {
                    (
                        week.get().to_string(),
                        WeekDatesEntry {
                            start_date: week_dates.first.to_string(),
                            end_date: week_dates.last.to_string(),
                            dates: week_dates.dates.iter().map(ToString::to_string).collect(),
                        },
                    )
                })
                .collect(),
        }
    }
}

impl From<ProgressDocument> for Progress {
    /// Best-effort conversion: malformed dates, identifiers or week
    /// numbers are skipped with a warning instead of failing the whole
    /// load.
    fn from(document: ProgressDocument) -> Self {
        let mut completed: BTreeMap<NaiveDate, BTreeMap<ExerciseKey, bool>> = BTreeMap::new();
        for (date_key, entries) in document.completed_exercises {
            let Ok(date) = date_key.parse::<NaiveDate>() else {
                warn!("skipping completion entries for invalid date `{date_key}`");
                continue;
            };
            for (id, is_completed) in entries {
                match id.parse::<ExerciseKey>() {
                    Ok(key) => {
                        completed.entry(date).or_default().insert(key, is_completed);
                    }
                    Err(err) => warn!("skipping completion entry `{id}`: {err}"),
                }
            }
        }

        let mut week_assignments = BTreeMap::new();
        for (date_key, week) in document.exercise_weeks {
            let (Ok(date), Ok(week)) = (date_key.parse::<NaiveDate>(), ProgramWeek::new(week))
            else {
                warn!("skipping week assignment for `{date_key}`");
                continue;
            };
            week_assignments.insert(date, week);
        }

        let mut trained_days: BTreeMap<MonthKey, BTreeSet<NaiveDate>> = BTreeMap::new();
        for (month_key, dates) in document.completed_workouts {
            let Ok(month) = month_key.parse::<MonthKey>() else {
                warn!("skipping trained days for invalid month `{month_key}`");
                continue;
            };
            trained_days.insert(
                month,
                dates
                    .iter()
                    .filter_map(|date| date.parse::<NaiveDate>().ok())
                    .collect(),
            );
        }

        let start_date = document.program_start_date.and_then(|date| {
            date.parse::<NaiveDate>()
                .map_err(|err| warn!("dropping invalid program start date `{date}`: {err}"))
                .ok()
        });

        let mut calendar: BTreeMap<ProgramWeek, WeekDates> = BTreeMap::new();
        for (week_key, entry) in document.calendar_mapping {
            let (Some(week), Ok(first)) = (
                week_key
                    .parse::<u32>()
                    .ok()
                    .and_then(|n| ProgramWeek::new(n).ok()),
                entry.start_date.parse::<NaiveDate>(),
            ) else {
                warn!("skipping calendar mapping entry `{week_key}`");
                continue;
            };
            calendar.insert(week, WeekDates::starting(first));
        }

        Self {
            completed,
            week_assignments,
            trained_days,
            total_trained_days: document.total_workouts,
            start_date,
            calendar,
        }
    }
}
