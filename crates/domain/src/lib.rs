#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

mod catalog;
mod completion;
mod error;
mod exercise;
mod name;
mod program;
mod progression;
mod schedule;
mod service;
mod statistics;

pub use catalog::Catalog;
pub use completion::{
    DayStats, ExerciseKey, ExerciseKeyError, ExerciseStatus, MonthKey, MonthKeyError, Progress,
    TRAINED_THRESHOLD, WeekDates, build_calendar, day_completion_stats, rebuild_trained_days,
};
pub use error::{ReadError, StorageError, UpdateError};
pub use exercise::{
    Category, CategoryError, Equipment, EquipmentError, ExerciseDefinition, MuscleGroup,
    MuscleGroupError, Property, Sets, SetsError,
};
pub use name::{Name, NameError};
pub use program::{Level, LevelError, LevelInfo, ProgramWeek, ProgramWeekError};
pub use progression::{Prescription, RepsSpec, exercises_for_group_on_day, prescription};
pub use schedule::{
    IntensifyMode, WeekPlan, Weekday, WeekdayError, generate_week_plan,
};
pub use service::{CatalogRepository, ProgressRepository, Service};
pub use statistics::{
    GroupStats, MonthStats, WeekStats, auto_detect_current_week, current_streak, month_stats,
    muscle_group_stats, week_completion_stats,
};
