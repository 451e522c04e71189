use std::{
    collections::{BTreeMap, BTreeSet},
    fmt,
    str::FromStr,
};

use chrono::{Datelike, Days, NaiveDate};

use crate::{
    Catalog, MuscleGroup, MuscleGroupError, Name, NameError, ProgramWeek, Weekday, WeekdayError,
    exercises_for_group_on_day, generate_week_plan,
};

/// Completion percentage at which a day counts as trained.
pub const TRAINED_THRESHOLD: f32 = 80.0;

/// One exercise, on one weekday slot, under one program week's
/// assumptions: the unit of completion tracking. `week` is only absent
/// for legacy entries persisted before week suffixes existed.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct ExerciseKey {
    pub muscle_group: MuscleGroup,
    pub name: Name,
    pub weekday: Weekday,
    pub week: Option<ProgramWeek>,
}

impl ExerciseKey {
    #[must_use]
    pub fn new(muscle_group: MuscleGroup, name: Name, weekday: Weekday, week: ProgramWeek) -> Self {
        Self {
            muscle_group,
            name,
            weekday,
            week: Some(week),
        }
    }

    #[must_use]
    pub fn bare(muscle_group: MuscleGroup, name: Name, weekday: Weekday) -> Self {
        Self {
            muscle_group,
            name,
            weekday,
            week: None,
        }
    }

    #[must_use]
    pub fn with_week(self, week: ProgramWeek) -> Self {
        Self {
            week: Some(week),
            ..self
        }
    }
}

impl fmt::Display for ExerciseKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}_{}_{}",
            self.muscle_group.key(),
            self.name,
            self.weekday.key()
        )?;
        if let Some(week) = self.week {
            write!(f, "_week{week}")?;
        }
        Ok(())
    }
}

impl FromStr for ExerciseKey {
    type Err = ExerciseKeyError;

    /// Recovers the structured key from the persisted underscore form.
    /// Exercise names may themselves contain underscores; the weekday
    /// token and the trailing week suffix anchor the parse.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts = s.split('_').collect::<Vec<_>>();
        if parts.len() < 3 {
            return Err(ExerciseKeyError::Malformed(s.to_string()));
        }

        let week = parts
            .last()
            .and_then(|part| part.strip_prefix("week"))
            .and_then(|n| n.parse().ok())
            .and_then(|n| ProgramWeek::new(n).ok());

        let weekday_index = if week.is_some() {
            parts.len() - 2
        } else {
            parts.len() - 1
        };
        if weekday_index < 2 {
            return Err(ExerciseKeyError::Malformed(s.to_string()));
        }

        Ok(Self {
            muscle_group: MuscleGroup::try_from(parts[0])?,
            name: Name::new(&parts[1..weekday_index].join("_"))?,
            weekday: Weekday::try_from(parts[weekday_index])?,
            week,
        })
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ExerciseKeyError {
    #[error("Malformed exercise key `{0}`")]
    Malformed(String),
    #[error(transparent)]
    MuscleGroup(#[from] MuscleGroupError),
    #[error(transparent)]
    Weekday(#[from] WeekdayError),
    #[error(transparent)]
    Name(#[from] NameError),
}

/// Calendar month bucket for the trained-day index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct MonthKey {
    pub year: i32,
    pub month: u32,
}

impl MonthKey {
    #[must_use]
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }
}

impl From<NaiveDate> for MonthKey {
    fn from(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for MonthKey {
    type Err = MonthKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (year, month) = s
            .split_once('-')
            .ok_or_else(|| MonthKeyError::Malformed(s.to_string()))?;
        let year = year
            .parse()
            .map_err(|_| MonthKeyError::Malformed(s.to_string()))?;
        let month = month
            .parse()
            .ok()
            .filter(|month| (1..=12).contains(month))
            .ok_or_else(|| MonthKeyError::Malformed(s.to_string()))?;
        Ok(Self { year, month })
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum MonthKeyError {
    #[error("Malformed month key `{0}`")]
    Malformed(String),
}

/// The seven calendar dates of one mapped program week.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekDates {
    pub first: NaiveDate,
    pub last: NaiveDate,
    pub dates: Vec<NaiveDate>,
}

impl WeekDates {
    #[must_use]
    pub fn starting(first: NaiveDate) -> Self {
        let dates = (0..7)
            .filter_map(|i| first.checked_add_days(Days::new(i)))
            .collect::<Vec<_>>();
        let last = dates.last().copied().unwrap_or(first);
        Self { first, last, dates }
    }
}

/// Calendar mapping for the supported program weeks: week w covers the
/// seven days starting at `start + 7 * (w - 1)`. The start date is used
/// exactly as chosen, without forcing Monday alignment.
#[must_use]
pub fn build_calendar(start: NaiveDate) -> BTreeMap<ProgramWeek, WeekDates> {
    (1..=ProgramWeek::MAX.get())
        .filter_map(|w| {
            let week = ProgramWeek::new(w).ok()?;
            let first = start.checked_add_days(Days::new(u64::from(w - 1) * 7))?;
            Some((week, WeekDates::starting(first)))
        })
        .collect()
}

/// The mutable progress log: per-date completion entries plus the
/// derived caches persisted alongside them. Absence of an entry means
/// "not completed"; there is no tri-state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Progress {
    pub completed: BTreeMap<NaiveDate, BTreeMap<ExerciseKey, bool>>,
    pub week_assignments: BTreeMap<NaiveDate, ProgramWeek>,
    pub trained_days: BTreeMap<MonthKey, BTreeSet<NaiveDate>>,
    pub total_trained_days: u32,
    pub start_date: Option<NaiveDate>,
    pub calendar: BTreeMap<ProgramWeek, WeekDates>,
}

impl Progress {
    /// Whether the exercise is recorded as completed on the given date,
    /// under exactly the key's program week. Legacy entries without a
    /// week suffix also match; other weeks' entries never do.
    #[must_use]
    pub fn is_completed(&self, date: NaiveDate, key: &ExerciseKey) -> bool {
        let Some(entries) = self.completed.get(&date) else {
            return false;
        };
        if let Some(&completed) = entries.get(key) {
            return completed;
        }
        if key.week.is_some() {
            let bare = ExerciseKey {
                week: None,
                ..key.clone()
            };
            if let Some(&completed) = entries.get(&bare) {
                return completed;
            }
        }
        false
    }

    /// Records a completion toggle. A key without a week suffix is
    /// normalized to `week`. The date's week assignment is set when it
    /// is absent or when the toggle marks a completion.
    pub fn set_completed(
        &mut self,
        date: NaiveDate,
        key: ExerciseKey,
        completed: bool,
        week: ProgramWeek,
    ) {
        let key = if key.week.is_some() {
            key
        } else {
            key.with_week(week)
        };
        self.completed.entry(date).or_default().insert(key, completed);

        if completed || !self.week_assignments.contains_key(&date) {
            self.week_assignments.insert(date, week);
        }
    }

    /// Program week for a date without consulting the fallback:
    /// explicit assignment, the date's own suffix mode, the sibling
    /// dates of the same Monday-Sunday calendar week, then the calendar
    /// mapping.
    #[must_use]
    pub fn infer_week(&self, date: NaiveDate) -> Option<ProgramWeek> {
        if let Some(&week) = self.week_assignments.get(&date) {
            return Some(week);
        }

        if let Some(week) = self.suffix_mode([date].into_iter()) {
            return Some(week);
        }

        let monday = date
            .checked_sub_days(Days::new(u64::from(Weekday::from(date).index())))
            .unwrap_or(date);
        let siblings = (0..7)
            .filter_map(|i| monday.checked_add_days(Days::new(i)))
            .filter(|d| *d != date)
            .collect::<Vec<_>>();

        if let Some(week) = siblings
            .iter()
            .find_map(|d| self.week_assignments.get(d).copied())
        {
            return Some(week);
        }

        if let Some(week) = self.suffix_mode(siblings.into_iter()) {
            return Some(week);
        }

        self.calendar_week_for(date)
    }

    #[must_use]
    pub fn week_for_date(&self, date: NaiveDate, fallback: ProgramWeek) -> ProgramWeek {
        self.infer_week(date).unwrap_or(fallback)
    }

    /// Program week whose mapped date range contains the given date.
    #[must_use]
    pub fn calendar_week_for(&self, date: NaiveDate) -> Option<ProgramWeek> {
        self.calendar
            .iter()
            .find(|(_, week_dates)| week_dates.first <= date && date <= week_dates.last)
            .map(|(week, _)| *week)
    }

    /// Most frequent week suffix among the entries of the given dates;
    /// ties break to the lowest week number.
    fn suffix_mode(&self, dates: impl Iterator<Item = NaiveDate>) -> Option<ProgramWeek> {
        let mut counts: BTreeMap<ProgramWeek, usize> = BTreeMap::new();
        for date in dates {
            if let Some(entries) = self.completed.get(&date) {
                for key in entries.keys() {
                    if let Some(week) = key.week {
                        *counts.entry(week).or_insert(0) += 1;
                    }
                }
            }
        }

        let mut mode: Option<(ProgramWeek, usize)> = None;
        for (week, count) in counts {
            if mode.is_none_or(|(_, best)| count > best) {
                mode = Some((week, count));
            }
        }
        mode.map(|(week, _)| week)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseStatus {
    pub name: Name,
    pub muscle_group: MuscleGroup,
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DayStats {
    pub completed: u32,
    pub total: u32,
    pub percentage: f32,
    pub exercises: Vec<ExerciseStatus>,
    pub muscle_groups: Vec<MuscleGroup>,
    pub is_rest_day: bool,
}

impl DayStats {
    #[must_use]
    pub fn rest_day() -> Self {
        Self {
            completed: 0,
            total: 0,
            percentage: 100.0,
            exercises: vec![],
            muscle_groups: vec![],
            is_rest_day: true,
        }
    }

    /// A rest day, or a day at or past the completion threshold.
    #[must_use]
    pub fn is_trained(&self) -> bool {
        self.is_rest_day || self.percentage >= TRAINED_THRESHOLD
    }
}

/// Completion statistics for one date under one program week's plan.
/// An empty set of scheduled muscle groups means rest day; nothing
/// prescribed counts as vacuously satisfied.
#[must_use]
pub fn day_completion_stats(
    catalog: &Catalog,
    progress: &Progress,
    date: NaiveDate,
    week: ProgramWeek,
) -> DayStats {
    let plan = generate_week_plan(catalog, week);
    let weekday = Weekday::from(date);
    let muscle_groups = plan.muscle_groups(weekday).to_vec();

    if muscle_groups.is_empty() {
        return DayStats::rest_day();
    }

    let mut exercises = vec![];
    let mut completed = 0;
    let mut total = 0;

    for &group in &muscle_groups {
        for exercise in exercises_for_group_on_day(catalog, group, weekday, week) {
            let key = ExerciseKey::new(group, exercise.name.clone(), weekday, week);
            let done = progress.is_completed(date, &key);
            exercises.push(ExerciseStatus {
                name: exercise.name.clone(),
                muscle_group: group,
                completed: done,
            });
            total += 1;
            if done {
                completed += 1;
            }
        }
    }

    #[allow(clippy::cast_precision_loss)]
    let percentage = if total == 0 {
        100.0
    } else {
        completed as f32 * 100.0 / total as f32
    };

    DayStats {
        completed,
        total,
        percentage,
        exercises,
        muscle_groups,
        is_rest_day: false,
    }
}

/// Rebuilds the month-bucketed trained-day index from scratch: every
/// date carrying completion entries plus the trailing 30 calendar days,
/// so recent rest days are picked up as well. Dates without an explicit
/// or inferable week resolve to `fallback`.
pub fn rebuild_trained_days(
    catalog: &Catalog,
    progress: &mut Progress,
    today: NaiveDate,
    fallback: ProgramWeek,
) {
    let mut dates = progress.completed.keys().copied().collect::<BTreeSet<_>>();
    for i in 0..30 {
        if let Some(date) = today.checked_sub_days(Days::new(i)) {
            dates.insert(date);
        }
    }

    let mut trained_days: BTreeMap<MonthKey, BTreeSet<NaiveDate>> = BTreeMap::new();
    let mut total = 0;
    for &date in &dates {
        let week = progress.week_for_date(date, fallback);
        let stats = day_completion_stats(catalog, progress, date, week);
        if stats.is_trained() {
            trained_days.entry(MonthKey::from(date)).or_default().insert(date);
            total += 1;
        }
    }

    progress.trained_days = trained_days;
    progress.total_trained_days = total;
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;
    use crate::{ExerciseDefinition, Level, RepsSpec, Sets, WeekPlan};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn week(n: u32) -> ProgramWeek {
        ProgramWeek::new(n).unwrap()
    }

    fn key(group: MuscleGroup, name: &str, weekday: Weekday, w: Option<u32>) -> ExerciseKey {
        ExerciseKey {
            muscle_group: group,
            name: Name::new(name).unwrap(),
            weekday,
            week: w.map(week),
        }
    }

    fn exercise(group: MuscleGroup, name: &str) -> ExerciseDefinition {
        ExerciseDefinition {
            name: Name::new(name).unwrap(),
            muscle_group: group,
            sets: Sets::new(3).unwrap(),
            reps: RepsSpec::from("8-10"),
            difficulty: Level::BEGINNER,
            category: None,
            equipment: None,
            description: String::new(),
            video_url: None,
        }
    }

    // Monday trains five chest exercises, everything else rests.
    fn five_exercise_catalog() -> Catalog {
        Catalog::new(
            [(
                MuscleGroup::Chest,
                vec![
                    exercise(MuscleGroup::Chest, "Bench Press"),
                    exercise(MuscleGroup::Chest, "Incline Press"),
                    exercise(MuscleGroup::Chest, "Flyes"),
                    exercise(MuscleGroup::Chest, "Push Up"),
                    exercise(MuscleGroup::Chest, "Dips"),
                ],
            )]
            .into(),
            [
                (
                    1,
                    WeekPlan::from_iter([(Weekday::Monday, vec![MuscleGroup::Chest])]),
                ),
                (
                    2,
                    WeekPlan::from_iter([(Weekday::Monday, vec![MuscleGroup::Chest])]),
                ),
                (
                    3,
                    WeekPlan::from_iter([(Weekday::Monday, vec![MuscleGroup::Chest])]),
                ),
                (
                    4,
                    WeekPlan::from_iter([(Weekday::Monday, vec![MuscleGroup::Chest])]),
                ),
            ]
            .into(),
        )
    }

    #[rstest]
    #[case(
        ExerciseKey::new(
            MuscleGroup::Chest,
            Name::new("Incline Press").unwrap(),
            Weekday::Monday,
            ProgramWeek::new(3).unwrap(),
        ),
        "chest_Incline Press_monday_week3"
    )]
    #[case(
        ExerciseKey::bare(
            MuscleGroup::Arms,
            Name::new("Hammer_Curl").unwrap(),
            Weekday::Friday,
        ),
        "arms_Hammer_Curl_friday"
    )]
    fn test_exercise_key_display(#[case] key: ExerciseKey, #[case] expected: &str) {
        assert_eq!(key.to_string(), expected);
    }

    #[rstest]
    #[case("chest_Incline Press_monday_week3")]
    #[case("arms_Hammer_Curl_friday_week12")]
    #[case("arms_Hammer_Curl_friday")]
    #[case("abs_Sit_Up_Twist_sunday_week1")]
    fn test_exercise_key_round_trip(#[case] s: &str) {
        assert_eq!(s.parse::<ExerciseKey>().unwrap().to_string(), s);
    }

    #[rstest]
    #[case("chest_monday")]
    #[case("chest_monday_week3")]
    #[case("quads_Squat_monday_week3")]
    #[case("chest_Press_someday_week3")]
    fn test_exercise_key_parse_errors(#[case] s: &str) {
        assert!(s.parse::<ExerciseKey>().is_err());
    }

    #[test]
    fn test_exercise_key_parse_name_with_underscores() {
        let key = "abs_Sit_Up_Twist_sunday_week1".parse::<ExerciseKey>().unwrap();
        assert_eq!(key.name, Name::new("Sit_Up_Twist").unwrap());
        assert_eq!(key.weekday, Weekday::Sunday);
        assert_eq!(key.week, Some(week(1)));
    }

    #[rstest]
    #[case("2025-03", Ok(MonthKey::new(2025, 3)))]
    #[case("2025-13", Err(MonthKeyError::Malformed("2025-13".to_string())))]
    #[case("202503", Err(MonthKeyError::Malformed("202503".to_string())))]
    fn test_month_key_parse(#[case] s: &str, #[case] expected: Result<MonthKey, MonthKeyError>) {
        assert_eq!(s.parse::<MonthKey>(), expected);
    }

    #[test]
    fn test_month_key_display() {
        assert_eq!(MonthKey::new(2025, 3).to_string(), "2025-03");
    }

    #[test]
    fn test_build_calendar_covers_twenty_weeks() {
        let start = date(2025, 3, 3);
        let calendar = build_calendar(start);

        assert_eq!(calendar.len(), 20);
        for (week, week_dates) in &calendar {
            assert_eq!(week_dates.dates.len(), 7);
            assert_eq!(
                week_dates.first,
                start + Days::new(u64::from(week.get() - 1) * 7)
            );
            assert_eq!(week_dates.last, week_dates.first + Days::new(6));
            for (i, d) in week_dates.dates.iter().enumerate() {
                assert_eq!(*d, week_dates.first + Days::new(i as u64));
            }
        }
    }

    #[test]
    fn test_weekly_independence() {
        let mut progress = Progress::default();
        let monday = date(2025, 3, 3);
        let week3_key = key(MuscleGroup::Chest, "Incline Press", Weekday::Monday, Some(3));
        let week4_key = key(MuscleGroup::Chest, "Incline Press", Weekday::Monday, Some(4));

        progress.set_completed(monday, week3_key.clone(), true, week(3));

        assert!(progress.is_completed(monday, &week3_key));
        assert!(!progress.is_completed(monday, &week4_key));
    }

    #[test]
    fn test_legacy_bare_key_matches() {
        let mut progress = Progress::default();
        let monday = date(2025, 3, 3);
        let bare = key(MuscleGroup::Chest, "Bench Press", Weekday::Monday, None);
        progress
            .completed
            .entry(monday)
            .or_default()
            .insert(bare, true);

        let suffixed = key(MuscleGroup::Chest, "Bench Press", Weekday::Monday, Some(2));
        assert!(progress.is_completed(monday, &suffixed));
    }

    #[test]
    fn test_set_completed_normalizes_bare_key() {
        let mut progress = Progress::default();
        let monday = date(2025, 3, 3);
        let bare = key(MuscleGroup::Chest, "Bench Press", Weekday::Monday, None);

        progress.set_completed(monday, bare, true, week(2));

        let suffixed = key(MuscleGroup::Chest, "Bench Press", Weekday::Monday, Some(2));
        assert_eq!(progress.completed[&monday].get(&suffixed), Some(&true));
    }

    #[test]
    fn test_set_completed_assignment_rules() {
        let mut progress = Progress::default();
        let monday = date(2025, 3, 3);

        // First toggle records the active week, even when unmarking.
        progress.set_completed(
            monday,
            key(MuscleGroup::Chest, "Bench Press", Weekday::Monday, Some(2)),
            false,
            week(2),
        );
        assert_eq!(progress.week_assignments.get(&monday), Some(&week(2)));

        // Unmarking later does not move an existing assignment.
        progress.set_completed(
            monday,
            key(MuscleGroup::Chest, "Flyes", Weekday::Monday, Some(3)),
            false,
            week(3),
        );
        assert_eq!(progress.week_assignments.get(&monday), Some(&week(2)));

        // Marking a completion does.
        progress.set_completed(
            monday,
            key(MuscleGroup::Chest, "Flyes", Weekday::Monday, Some(3)),
            true,
            week(3),
        );
        assert_eq!(progress.week_assignments.get(&monday), Some(&week(3)));
    }

    #[test]
    fn test_infer_week_prefers_explicit_assignment() {
        let mut progress = Progress::default();
        let monday = date(2025, 3, 3);
        progress.week_assignments.insert(monday, week(5));
        progress.set_completed(
            monday,
            key(MuscleGroup::Chest, "Bench Press", Weekday::Monday, Some(2)),
            true,
            week(5),
        );

        assert_eq!(progress.infer_week(monday), Some(week(5)));
    }

    #[test]
    fn test_infer_week_suffix_mode_breaks_ties_low() {
        let mut progress = Progress::default();
        let monday = date(2025, 3, 3);
        let entries = progress.completed.entry(monday).or_default();
        entries.insert(
            key(MuscleGroup::Chest, "Bench Press", Weekday::Monday, Some(4)),
            false,
        );
        entries.insert(
            key(MuscleGroup::Chest, "Flyes", Weekday::Monday, Some(2)),
            false,
        );

        assert_eq!(progress.infer_week(monday), Some(week(2)));
    }

    #[test]
    fn test_infer_week_from_sibling_dates() {
        let mut progress = Progress::default();
        let monday = date(2025, 3, 3);
        let thursday = date(2025, 3, 6);
        progress.week_assignments.insert(monday, week(7));

        assert_eq!(progress.infer_week(thursday), Some(week(7)));

        let next_monday = date(2025, 3, 10);
        assert_eq!(progress.infer_week(next_monday), None);
    }

    #[test]
    fn test_infer_week_from_calendar_mapping() {
        let mut progress = Progress::default();
        progress.calendar = build_calendar(date(2025, 3, 3));

        assert_eq!(progress.infer_week(date(2025, 3, 5)), Some(week(1)));
        assert_eq!(progress.infer_week(date(2025, 3, 12)), Some(week(2)));
        assert_eq!(progress.infer_week(date(2025, 3, 2)), None);
    }

    #[test]
    fn test_day_stats_rest_day_vacuous_truth() {
        let catalog = five_exercise_catalog();
        let progress = Progress::default();
        let tuesday = date(2025, 3, 4);

        let stats = day_completion_stats(&catalog, &progress, tuesday, week(1));

        assert!(stats.is_rest_day);
        assert_eq!(stats.total, 0);
        assert_eq!(stats.percentage, 100.0);
        assert!(stats.is_trained());
    }

    #[test]
    fn test_day_stats_missing_base_week_is_rest() {
        let catalog = Catalog::default();
        let progress = Progress::default();

        let stats = day_completion_stats(&catalog, &progress, date(2025, 3, 3), week(1));

        assert!(stats.is_rest_day);
        assert_eq!(stats.percentage, 100.0);
    }

    #[rstest]
    #[case(3, 60.0, false)]
    #[case(4, 80.0, true)]
    #[case(5, 100.0, true)]
    fn test_day_stats_threshold_boundary(
        #[case] marked: usize,
        #[case] percentage: f32,
        #[case] trained: bool,
    ) {
        let catalog = five_exercise_catalog();
        let mut progress = Progress::default();
        let monday = date(2025, 3, 3);

        for exercise in catalog.exercises_for(MuscleGroup::Chest).iter().take(marked) {
            progress.set_completed(
                monday,
                ExerciseKey::new(
                    MuscleGroup::Chest,
                    exercise.name.clone(),
                    Weekday::Monday,
                    week(1),
                ),
                true,
                week(1),
            );
        }

        let stats = day_completion_stats(&catalog, &progress, monday, week(1));
        assert_eq!(stats.total, 5);
        assert_approx_eq!(stats.percentage, percentage);
        assert_eq!(stats.is_trained(), trained);
    }

    #[test]
    fn test_rebuild_trained_days_includes_rest_days() {
        let catalog = five_exercise_catalog();
        let mut progress = Progress::default();
        let monday = date(2025, 3, 3);

        for exercise in catalog.exercises_for(MuscleGroup::Chest) {
            progress.set_completed(
                monday,
                ExerciseKey::new(
                    MuscleGroup::Chest,
                    exercise.name.clone(),
                    Weekday::Monday,
                    week(1),
                ),
                true,
                week(1),
            );
        }

        let today = date(2025, 3, 5);
        rebuild_trained_days(&catalog, &mut progress, today, week(1));

        let march = progress.trained_days.get(&MonthKey::new(2025, 3)).unwrap();
        // The trained Monday plus the rest days inside the 30-day window.
        assert!(march.contains(&monday));
        assert!(march.contains(&date(2025, 3, 4)));
        assert!(progress.total_trained_days >= 2);
    }

    #[test]
    fn test_rebuild_trained_days_drops_unmarked_day() {
        let catalog = five_exercise_catalog();
        let mut progress = Progress::default();
        let monday = date(2025, 3, 3);
        let bench = ExerciseKey::new(
            MuscleGroup::Chest,
            Name::new("Bench Press").unwrap(),
            Weekday::Monday,
            week(1),
        );

        progress.set_completed(monday, bench.clone(), true, week(1));
        rebuild_trained_days(&catalog, &mut progress, monday, week(1));
        assert!(
            !progress
                .trained_days
                .get(&MonthKey::new(2025, 3))
                .unwrap()
                .contains(&monday)
        );

        for exercise in catalog.exercises_for(MuscleGroup::Chest) {
            progress.set_completed(
                monday,
                ExerciseKey::new(
                    MuscleGroup::Chest,
                    exercise.name.clone(),
                    Weekday::Monday,
                    week(1),
                ),
                true,
                week(1),
            );
        }
        rebuild_trained_days(&catalog, &mut progress, monday, week(1));
        assert!(
            progress
                .trained_days
                .get(&MonthKey::new(2025, 3))
                .unwrap()
                .contains(&monday)
        );
    }
}
