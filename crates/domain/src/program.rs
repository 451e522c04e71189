use derive_more::{Display, Into};

/// 1-indexed counter of progression through the training program,
/// distinct from the calendar week.
#[derive(Debug, Display, Clone, Copy, Into, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ProgramWeek(u32);

impl ProgramWeek {
    pub const FIRST: ProgramWeek = ProgramWeek(1);
    pub const MAX: ProgramWeek = ProgramWeek(20);

    pub fn new(value: u32) -> Result<Self, ProgramWeekError> {
        if value == 0 {
            return Err(ProgramWeekError::OutOfRange);
        }

        Ok(Self(value))
    }

    #[must_use]
    pub fn get(self) -> u32 {
        self.0
    }

    #[must_use]
    pub fn level(self) -> Level {
        Level((self.0 - 1) / 4 + 1)
    }

    /// Reduction into the 4-week base cycle (1..=4).
    #[must_use]
    pub fn cycle_week(self) -> u32 {
        (self.0 - 1) % 4 + 1
    }

    /// The following week, capped at the supported maximum.
    #[must_use]
    pub fn capped_next(self) -> ProgramWeek {
        Self((self.0 + 1).min(Self::MAX.0))
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ProgramWeekError {
    #[error("Program week must be 1 or greater")]
    OutOfRange,
}

/// Difficulty tier, derived from the program week and also used as an
/// exercise's unlock gate.
#[derive(Debug, Display, Clone, Copy, Into, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Level(u32);

impl Level {
    pub const BEGINNER: Level = Level(1);
    pub const INTERMEDIATE: Level = Level(2);
    pub const ADVANCED: Level = Level(3);
    pub const EXPERT: Level = Level(4);

    pub fn new(value: u32) -> Result<Self, LevelError> {
        if value == 0 {
            return Err(LevelError::OutOfRange);
        }

        Ok(Self(value))
    }

    #[must_use]
    pub fn get(self) -> u32 {
        self.0
    }

    #[must_use]
    pub fn name(self) -> String {
        match self.0 {
            1 => "Beginner".to_string(),
            2 => "Intermediate".to_string(),
            3 => "Advanced".to_string(),
            4 => "Expert".to_string(),
            n => format!("Master {}", n - 3),
        }
    }

    #[must_use]
    pub fn description(self) -> &'static str {
        match self.0 {
            1 => "Base plan - 4 workouts, 3 rest days",
            2 => "Increased frequency - 5 workouts, 2 rest days",
            3 => "Increased volume - 5 intensified workouts, 2 rest days",
            4 => "Full advanced plan - 6 workouts, 1 rest day",
            _ => "Custom elite plan",
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum LevelError {
    #[error("Level must be 1 or greater")]
    OutOfRange,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelInfo {
    pub level: Level,
    pub level_name: String,
    pub level_description: String,
    pub week_in_cycle: u32,
    pub weeks_completed_before: u32,
}

impl LevelInfo {
    #[must_use]
    pub fn for_week(week: ProgramWeek) -> Self {
        let level = week.level();
        Self {
            level,
            level_name: level.name(),
            level_description: level.description().to_string(),
            week_in_cycle: week.cycle_week(),
            weeks_completed_before: week.get() - 1,
        }
    }
}
