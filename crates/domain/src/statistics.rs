use std::collections::{BTreeMap, BTreeSet};

use chrono::{Days, NaiveDate};

use crate::{
    Catalog, MonthKey, MuscleGroup, Name, ProgramWeek, Progress, TRAINED_THRESHOLD,
    day_completion_stats,
};

/// How far back the streak walk looks.
const STREAK_WINDOW_DAYS: u64 = 60;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MonthStats {
    pub completed_days: u32,
    pub total_days: u32,
    pub completion_rate: f32,
}

#[must_use]
pub fn month_stats(progress: &Progress, year: i32, month: u32) -> MonthStats {
    let Some(total_days) = days_in_month(year, month) else {
        return MonthStats::default();
    };

    let completed_days = progress
        .trained_days
        .get(&MonthKey::new(year, month))
        .map_or(0, BTreeSet::len);
    let completed_days = u32::try_from(completed_days).unwrap_or(u32::MAX);

    #[allow(clippy::cast_precision_loss)]
    MonthStats {
        completed_days,
        total_days,
        completion_rate: completed_days as f32 * 100.0 / total_days as f32,
    }
}

fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    u32::try_from((next - first).num_days()).ok()
}

/// Completion history of one muscle group across the whole progress
/// log: completed entries, the distinct dates they fall on, and the
/// distinct exercises touched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GroupStats {
    pub completions: u32,
    pub days_trained: u32,
    pub distinct_exercises: u32,
}

#[must_use]
pub fn muscle_group_stats(progress: &Progress) -> BTreeMap<MuscleGroup, GroupStats> {
    let mut completions: BTreeMap<MuscleGroup, u32> = BTreeMap::new();
    let mut days: BTreeMap<MuscleGroup, BTreeSet<NaiveDate>> = BTreeMap::new();
    let mut names: BTreeMap<MuscleGroup, BTreeSet<&Name>> = BTreeMap::new();

    for (date, entries) in &progress.completed {
        for (key, &completed) in entries {
            if !completed {
                continue;
            }
            *completions.entry(key.muscle_group).or_insert(0) += 1;
            days.entry(key.muscle_group).or_default().insert(*date);
            names.entry(key.muscle_group).or_default().insert(&key.name);
        }
    }

    completions
        .into_iter()
        .map(|(group, completions)| {
            (
                group,
                GroupStats {
                    completions,
                    days_trained: days
                        .get(&group)
                        .map_or(0, |d| u32::try_from(d.len()).unwrap_or(u32::MAX)),
                    distinct_exercises: names
                        .get(&group)
                        .map_or(0, |n| u32::try_from(n.len()).unwrap_or(u32::MAX)),
                },
            )
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeekStats {
    pub week: ProgramWeek,
    pub completed: u32,
    pub total: u32,
    pub percentage: f32,
    pub trained_days: u32,
    pub rest_days: u32,
}

/// Exercise-level rollup over one program week. The week's dates come
/// from the calendar mapping; without a program start date, the dates
/// carrying that week's entries or assignments are used instead.
#[must_use]
pub fn week_completion_stats(
    catalog: &Catalog,
    progress: &Progress,
    week: ProgramWeek,
) -> WeekStats {
    let dates = match progress.calendar.get(&week) {
        Some(week_dates) => week_dates.dates.clone(),
        None => {
            let mut dates = progress
                .week_assignments
                .iter()
                .filter(|(_, assigned)| **assigned == week)
                .map(|(date, _)| *date)
                .collect::<BTreeSet<_>>();
            for (date, entries) in &progress.completed {
                if entries.keys().any(|key| key.week == Some(week)) {
                    dates.insert(*date);
                }
            }
            dates.into_iter().collect()
        }
    };

    let mut completed = 0;
    let mut total = 0;
    let mut trained_days = 0;
    let mut rest_days = 0;

    for date in dates {
        let stats = day_completion_stats(catalog, progress, date, week);
        if stats.is_rest_day {
            rest_days += 1;
            continue;
        }
        completed += stats.completed;
        total += stats.total;
        if stats.is_trained() {
            trained_days += 1;
        }
    }

    #[allow(clippy::cast_precision_loss)]
    let percentage = if total == 0 {
        0.0
    } else {
        completed as f32 * 100.0 / total as f32
    };

    WeekStats {
        week,
        completed,
        total,
        percentage,
        trained_days,
        rest_days,
    }
}

/// The authoritative default for "the active week": week 1 while nothing
/// is completed, otherwise the highest week with completed entries,
/// advanced by one (capped at the supported maximum) once that week is
/// sufficiently complete.
#[must_use]
pub fn auto_detect_current_week(catalog: &Catalog, progress: &Progress) -> ProgramWeek {
    let newest = progress
        .completed
        .values()
        .flat_map(|entries| entries.iter())
        .filter(|(_, completed)| **completed)
        .filter_map(|(key, _)| key.week)
        .max();

    let Some(week) = newest else {
        return ProgramWeek::FIRST;
    };

    let stats = week_completion_stats(catalog, progress, week);
    if stats.percentage >= TRAINED_THRESHOLD {
        week.capped_next()
    } else {
        week
    }
}

/// Consecutive-day training streak ending today. Rest days neither
/// extend nor break the streak, and an unfinished today does not break
/// it either.
#[must_use]
pub fn current_streak(catalog: &Catalog, progress: &Progress, today: NaiveDate) -> u32 {
    let fallback = auto_detect_current_week(catalog, progress);
    let mut streak = 0;

    for i in 0..STREAK_WINDOW_DAYS {
        let Some(date) = today.checked_sub_days(Days::new(i)) else {
            break;
        };
        let week = progress.week_for_date(date, fallback);
        let stats = day_completion_stats(catalog, progress, date, week);

        if stats.is_rest_day {
            continue;
        }
        if stats.total > 0 && stats.percentage >= TRAINED_THRESHOLD {
            streak += 1;
        } else if i == 0 {
            continue;
        } else {
            break;
        }
    }

    streak
}
