use std::collections::BTreeMap;

use chrono::{Local, NaiveDate};
use log::{error, warn};

use crate::{
    Catalog, DayStats, ExerciseDefinition, ExerciseKey, GroupStats, LevelInfo, MonthStats,
    MuscleGroup, Name, Prescription, ProgramWeek, Progress, ReadError, UpdateError, WeekDates,
    WeekPlan, WeekStats, Weekday, auto_detect_current_week, build_calendar, current_streak,
    day_completion_stats, exercises_for_group_on_day, generate_week_plan, muscle_group_stats,
    prescription, rebuild_trained_days, week_completion_stats,
};

pub trait CatalogRepository {
    fn load_catalog(&self) -> Result<Catalog, ReadError>;
    fn store_catalog(&self, catalog: &Catalog) -> Result<(), UpdateError>;
}

pub trait ProgressRepository {
    fn load_progress(&self) -> Result<Progress, ReadError>;
    fn store_progress(&self, progress: &Progress) -> Result<(), UpdateError>;
}

/// Facade over the loaded configuration and progress log, exposing the
/// query and mutation operations consumed by the presentation layer.
/// The in-memory documents stay authoritative for the lifetime of the
/// process; failed writes are logged and reported but do not roll back
/// accumulated state.
pub struct Service<R> {
    repository: R,
    catalog: Catalog,
    progress: Progress,
}

impl<R> Service<R>
where
    R: CatalogRepository + ProgressRepository,
{
    pub fn new(repository: R) -> Result<Self, ReadError> {
        let catalog = repository.load_catalog()?;
        let progress = repository.load_progress()?;
        Ok(Self {
            repository,
            catalog,
            progress,
        })
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub fn progress(&self) -> &Progress {
        &self.progress
    }

    #[must_use]
    pub fn week_info(&self, week: ProgramWeek) -> LevelInfo {
        LevelInfo::for_week(week)
    }

    #[must_use]
    pub fn week_plan(&self, week: ProgramWeek) -> WeekPlan {
        generate_week_plan(&self.catalog, week)
    }

    #[must_use]
    pub fn exercises_for(
        &self,
        group: MuscleGroup,
        weekday: Weekday,
        week: ProgramWeek,
    ) -> Vec<&ExerciseDefinition> {
        exercises_for_group_on_day(&self.catalog, group, weekday, week)
    }

    #[must_use]
    pub fn prescription(&self, exercise: &ExerciseDefinition, week: ProgramWeek) -> Prescription {
        prescription(exercise, week)
    }

    /// Completion statistics for a date. Without an explicit week the
    /// same cascade as `resolve_week_for_date` applies, minus the
    /// memoizing side effect.
    #[must_use]
    pub fn day_stats(&self, date: NaiveDate, week: Option<ProgramWeek>) -> DayStats {
        let week = week.unwrap_or_else(|| {
            self.progress
                .week_for_date(date, self.auto_detect_current_week())
        });
        day_completion_stats(&self.catalog, &self.progress, date, week)
    }

    #[must_use]
    pub fn week_stats(&self, week: ProgramWeek) -> WeekStats {
        week_completion_stats(&self.catalog, &self.progress, week)
    }

    #[must_use]
    pub fn month_stats(&self, year: i32, month: u32) -> MonthStats {
        crate::month_stats(&self.progress, year, month)
    }

    #[must_use]
    pub fn muscle_group_stats(&self) -> BTreeMap<MuscleGroup, GroupStats> {
        muscle_group_stats(&self.progress)
    }

    #[must_use]
    pub fn auto_detect_current_week(&self) -> ProgramWeek {
        auto_detect_current_week(&self.catalog, &self.progress)
    }

    #[must_use]
    pub fn current_streak(&self) -> u32 {
        self.current_streak_on(Local::now().date_naive())
    }

    #[must_use]
    pub fn current_streak_on(&self, today: NaiveDate) -> u32 {
        current_streak(&self.catalog, &self.progress, today)
    }

    #[must_use]
    pub fn week_dates(&self, week: ProgramWeek) -> Option<&WeekDates> {
        self.progress.calendar.get(&week)
    }

    /// Program week for a date. An inferred value is memoized into the
    /// week assignments for future calls; an existing explicit
    /// assignment is never overwritten.
    pub fn resolve_week_for_date(&mut self, date: NaiveDate) -> ProgramWeek {
        if let Some(&week) = self.progress.week_assignments.get(&date) {
            return week;
        }

        if let Some(week) = self.progress.infer_week(date) {
            self.progress.week_assignments.insert(date, week);
            if let Err(err) = self.repository.store_progress(&self.progress) {
                warn!("failed to store inferred week for {date}: {err}");
            }
            return week;
        }

        self.auto_detect_current_week()
    }

    /// Records a completion toggle and refreshes the trained-day index.
    /// The active week is taken from the key's suffix, then the explicit
    /// parameter, then the auto-detected current week.
    pub fn set_completed(
        &mut self,
        date: NaiveDate,
        key: ExerciseKey,
        completed: bool,
        week: Option<ProgramWeek>,
    ) -> Result<(), UpdateError> {
        let week = key
            .week
            .or(week)
            .unwrap_or_else(|| self.auto_detect_current_week());

        self.progress.set_completed(date, key, completed, week);
        rebuild_trained_days(
            &self.catalog,
            &mut self.progress,
            Local::now().date_naive(),
            week,
        );
        self.persist_progress()
    }

    /// Sets the program start date from the `DD/MM/YYYY` display format
    /// and recomputes the calendar mapping. The chosen date is stored
    /// as-is, without forcing Monday alignment.
    pub fn set_start_date(&mut self, input: &str) -> Result<NaiveDate, UpdateError> {
        let date = NaiveDate::parse_from_str(input.trim(), "%d/%m/%Y")
            .map_err(|_| UpdateError::InvalidDate(input.to_string()))?;

        let fallback = self.auto_detect_current_week();
        self.progress.start_date = Some(date);
        self.progress.calendar = build_calendar(date);
        rebuild_trained_days(
            &self.catalog,
            &mut self.progress,
            Local::now().date_naive(),
            fallback,
        );
        self.persist_progress()?;
        Ok(date)
    }

    /// Replaces the progress log with fresh defaults.
    pub fn reset_all_progress(&mut self) -> Result<(), UpdateError> {
        self.progress = Progress::default();
        self.persist_progress()
    }

    /// The narrow configuration write path: attach or replace one
    /// exercise's video URL and rewrite the configuration document.
    pub fn set_video_url(
        &mut self,
        group: MuscleGroup,
        name: &Name,
        video_url: Option<String>,
    ) -> Result<(), UpdateError> {
        if !self.catalog.set_video_url(group, name, video_url) {
            return Err(UpdateError::UnknownExercise(
                group.key().to_string(),
                name.as_ref().to_string(),
            ));
        }

        match self.repository.store_catalog(&self.catalog) {
            Ok(()) => Ok(()),
            Err(err) => {
                error!("failed to store configuration: {err}");
                Err(err)
            }
        }
    }

    fn persist_progress(&self) -> Result<(), UpdateError> {
        match self.repository.store_progress(&self.progress) {
            Ok(()) => Ok(()),
            Err(err) => {
                error!("failed to store progress log: {err}");
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::StorageError;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn week(n: u32) -> ProgramWeek {
        ProgramWeek::new(n).unwrap()
    }

    #[derive(Default, Clone)]
    struct FakeRepository {
        catalog: Rc<RefCell<Option<Catalog>>>,
        progress: Rc<RefCell<Option<Progress>>>,
        fail_writes: Rc<RefCell<bool>>,
    }

    impl CatalogRepository for FakeRepository {
        fn load_catalog(&self) -> Result<Catalog, ReadError> {
            Ok(self
                .catalog
                .borrow()
                .clone()
                .unwrap_or_else(Catalog::builtin))
        }

        fn store_catalog(&self, catalog: &Catalog) -> Result<(), UpdateError> {
            if *self.fail_writes.borrow() {
                return Err(UpdateError::Storage(StorageError::Malformed(
                    "write failed".to_string(),
                )));
            }
            *self.catalog.borrow_mut() = Some(catalog.clone());
            Ok(())
        }
    }

    impl ProgressRepository for FakeRepository {
        fn load_progress(&self) -> Result<Progress, ReadError> {
            Ok(self.progress.borrow().clone().unwrap_or_default())
        }

        fn store_progress(&self, progress: &Progress) -> Result<(), UpdateError> {
            if *self.fail_writes.borrow() {
                return Err(UpdateError::Storage(StorageError::Malformed(
                    "write failed".to_string(),
                )));
            }
            *self.progress.borrow_mut() = Some(progress.clone());
            Ok(())
        }
    }

    fn service() -> Service<FakeRepository> {
        Service::new(FakeRepository::default()).unwrap()
    }

    fn bench_press_key(w: u32) -> ExerciseKey {
        ExerciseKey::new(
            MuscleGroup::Chest,
            Name::new("Dumbbell Bench Press").unwrap(),
            Weekday::Monday,
            week(w),
        )
    }

    #[test]
    fn test_set_completed_round_trips_through_repository() {
        let repository = FakeRepository::default();
        let monday = date(2025, 3, 3);

        let mut service = Service::new(repository.clone()).unwrap();
        service
            .set_completed(monday, bench_press_key(1), true, None)
            .unwrap();

        let reloaded = Service::new(repository).unwrap();
        assert!(reloaded.progress().is_completed(monday, &bench_press_key(1)));
    }

    #[test]
    fn test_set_completed_keeps_state_on_write_failure() {
        let repository = FakeRepository::default();
        let monday = date(2025, 3, 3);

        let mut service = Service::new(repository.clone()).unwrap();
        *repository.fail_writes.borrow_mut() = true;

        assert!(
            service
                .set_completed(monday, bench_press_key(1), true, None)
                .is_err()
        );
        assert!(service.progress().is_completed(monday, &bench_press_key(1)));
    }

    #[test]
    fn test_day_stats_resolves_week_without_side_effect() {
        let mut service = service();
        let monday = date(2025, 3, 3);
        service
            .set_completed(monday, bench_press_key(1), true, None)
            .unwrap();

        let thursday = date(2025, 3, 6);
        let stats = service.day_stats(thursday, None);

        assert!(!stats.is_rest_day);
        assert!(!service.progress().week_assignments.contains_key(&thursday));
    }

    #[test]
    fn test_resolve_week_for_date_memoizes_inference() {
        let repository = FakeRepository::default();
        let mut service = Service::new(repository.clone()).unwrap();
        let monday = date(2025, 3, 3);
        service
            .set_completed(monday, bench_press_key(3), true, Some(week(3)))
            .unwrap();

        let thursday = date(2025, 3, 6);
        assert_eq!(service.resolve_week_for_date(thursday), week(3));
        assert_eq!(
            service.progress().week_assignments.get(&thursday),
            Some(&week(3))
        );

        let stored = repository.progress.borrow().clone().unwrap();
        assert_eq!(stored.week_assignments.get(&thursday), Some(&week(3)));
    }

    #[test]
    fn test_resolve_week_for_date_keeps_explicit_assignment() {
        let mut service = service();
        let monday = date(2025, 3, 3);
        service
            .set_completed(monday, bench_press_key(5), true, Some(week(5)))
            .unwrap();

        assert_eq!(service.resolve_week_for_date(monday), week(5));
    }

    #[test]
    fn test_set_start_date_builds_calendar() {
        let mut service = service();

        let start = service.set_start_date("03/03/2025").unwrap();

        assert_eq!(start, date(2025, 3, 3));
        assert_eq!(service.progress().start_date, Some(start));
        let week_dates = service.week_dates(week(2)).unwrap();
        assert_eq!(week_dates.first, date(2025, 3, 10));
        assert_eq!(week_dates.dates.len(), 7);
    }

    #[test]
    fn test_set_start_date_keeps_literal_day() {
        let mut service = service();

        // A Wednesday; it is not aligned back to Monday.
        let start = service.set_start_date("05/03/2025").unwrap();

        assert_eq!(start, date(2025, 3, 5));
        assert_eq!(service.week_dates(week(1)).unwrap().first, start);
    }

    #[test]
    fn test_set_start_date_rejects_invalid_input() {
        let mut service = service();

        assert!(matches!(
            service.set_start_date("2025-03-03"),
            Err(UpdateError::InvalidDate(input)) if input == "2025-03-03"
        ));
        assert!(matches!(
            service.set_start_date("32/01/2025"),
            Err(UpdateError::InvalidDate(_))
        ));
    }

    #[test]
    fn test_reset_all_progress() {
        let repository = FakeRepository::default();
        let mut service = Service::new(repository.clone()).unwrap();
        service
            .set_completed(date(2025, 3, 3), bench_press_key(1), true, None)
            .unwrap();

        service.reset_all_progress().unwrap();

        assert_eq!(*service.progress(), Progress::default());
        assert_eq!(
            repository.progress.borrow().clone().unwrap(),
            Progress::default()
        );
    }

    #[test]
    fn test_set_video_url_unknown_exercise() {
        let mut service = service();

        assert!(matches!(
            service.set_video_url(
                MuscleGroup::Chest,
                &Name::new("No Such Exercise").unwrap(),
                None
            ),
            Err(UpdateError::UnknownExercise(group, name))
                if group == "chest" && name == "No Such Exercise"
        ));
    }

    #[test]
    fn test_set_video_url_rewrites_configuration() {
        let repository = FakeRepository::default();
        let mut service = Service::new(repository.clone()).unwrap();
        let name = Name::new("Bicep Curl").unwrap();

        service
            .set_video_url(
                MuscleGroup::Arms,
                &name,
                Some("https://example.com/v/1".to_string()),
            )
            .unwrap();

        let stored = repository.catalog.borrow().clone().unwrap();
        assert_eq!(
            stored
                .exercises_for(MuscleGroup::Arms)
                .iter()
                .find(|e| e.name == name)
                .unwrap()
                .video_url
                .as_deref(),
            Some("https://example.com/v/1")
        );
    }

    #[test]
    fn test_auto_advance_over_full_first_week() {
        let mut service = service();
        service.set_start_date("03/03/2025").unwrap();

        assert_eq!(service.auto_detect_current_week(), week(1));

        let dates = service.week_dates(week(1)).unwrap().dates.clone();
        for d in dates {
            let stats = service.day_stats(d, Some(week(1)));
            for status in stats.exercises {
                service
                    .set_completed(
                        d,
                        ExerciseKey::new(
                            status.muscle_group,
                            status.name,
                            Weekday::from(d),
                            week(1),
                        ),
                        true,
                        Some(week(1)),
                    )
                    .unwrap();
            }
        }

        assert_eq!(service.auto_detect_current_week(), week(2));
    }
}
