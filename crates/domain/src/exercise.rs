use std::slice::Iter;

use derive_more::{Display, Into};

use crate::{Level, Name, RepsSpec};

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub enum MuscleGroup {
    Chest,
    Back,
    Shoulders,
    Arms,
    Legs,
    Calves,
    Abs,
    Cardio,
}

impl MuscleGroup {
    /// Token used in persisted identifiers and document keys.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            MuscleGroup::Chest => "chest",
            MuscleGroup::Back => "back",
            MuscleGroup::Shoulders => "shoulders",
            MuscleGroup::Arms => "arms",
            MuscleGroup::Legs => "legs",
            MuscleGroup::Calves => "calves",
            MuscleGroup::Abs => "abs",
            MuscleGroup::Cardio => "cardio",
        }
    }
}

impl Property for MuscleGroup {
    fn iter() -> Iter<'static, MuscleGroup> {
        static MUSCLE_GROUPS: [MuscleGroup; 8] = [
            MuscleGroup::Chest,
            MuscleGroup::Back,
            MuscleGroup::Shoulders,
            MuscleGroup::Arms,
            MuscleGroup::Legs,
            MuscleGroup::Calves,
            MuscleGroup::Abs,
            MuscleGroup::Cardio,
        ];
        MUSCLE_GROUPS.iter()
    }

    fn name(self) -> &'static str {
        match self {
            MuscleGroup::Chest => "Chest",
            MuscleGroup::Back => "Back",
            MuscleGroup::Shoulders => "Shoulders",
            MuscleGroup::Arms => "Arms",
            MuscleGroup::Legs => "Legs",
            MuscleGroup::Calves => "Calves",
            MuscleGroup::Abs => "Abs",
            MuscleGroup::Cardio => "Cardio",
        }
    }
}

impl TryFrom<&str> for MuscleGroup {
    type Error = MuscleGroupError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        MuscleGroup::iter()
            .find(|group| group.key() == value)
            .copied()
            .ok_or_else(|| MuscleGroupError::Invalid(value.to_string()))
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum MuscleGroupError {
    #[error("Invalid muscle group `{0}`")]
    Invalid(String),
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub enum Category {
    Forearm,
    Warmup,
    Stretch,
    Mobility,
}

impl Category {
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Category::Forearm => "forearm",
            Category::Warmup => "warmup",
            Category::Stretch => "stretch",
            Category::Mobility => "mobility",
        }
    }
}

impl Property for Category {
    fn iter() -> Iter<'static, Category> {
        static CATEGORIES: [Category; 4] = [
            Category::Forearm,
            Category::Warmup,
            Category::Stretch,
            Category::Mobility,
        ];
        CATEGORIES.iter()
    }

    fn name(self) -> &'static str {
        match self {
            Category::Forearm => "Forearm",
            Category::Warmup => "Warmup",
            Category::Stretch => "Stretch",
            Category::Mobility => "Mobility",
        }
    }
}

impl TryFrom<&str> for Category {
    type Error = CategoryError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Category::iter()
            .find(|category| category.key() == value)
            .copied()
            .ok_or_else(|| CategoryError::Invalid(value.to_string()))
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum CategoryError {
    #[error("Invalid category `{0}`")]
    Invalid(String),
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub enum Equipment {
    Floor,
    Dumbbells,
    Bench,
    StationaryBike,
}

impl Equipment {
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Equipment::Floor => "floor",
            Equipment::Dumbbells => "dumbbells",
            Equipment::Bench => "bench",
            Equipment::StationaryBike => "stationary_bike",
        }
    }
}

impl Property for Equipment {
    fn iter() -> Iter<'static, Equipment> {
        static EQUIPMENT: [Equipment; 4] = [
            Equipment::Floor,
            Equipment::Dumbbells,
            Equipment::Bench,
            Equipment::StationaryBike,
        ];
        EQUIPMENT.iter()
    }

    fn name(self) -> &'static str {
        match self {
            Equipment::Floor => "Floor",
            Equipment::Dumbbells => "Dumbbells",
            Equipment::Bench => "Bench",
            Equipment::StationaryBike => "Stationary Bike",
        }
    }
}

impl TryFrom<&str> for Equipment {
    type Error = EquipmentError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Equipment::iter()
            .find(|equipment| equipment.key() == value)
            .copied()
            .ok_or_else(|| EquipmentError::Invalid(value.to_string()))
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum EquipmentError {
    #[error("Invalid equipment `{0}`")]
    Invalid(String),
}

#[derive(Debug, Display, Clone, Copy, Into, PartialEq, Eq, PartialOrd, Ord)]
pub struct Sets(u32);

impl Sets {
    pub const ONE: Sets = Sets(1);
    pub const TWO: Sets = Sets(2);

    pub fn new(value: u32) -> Result<Self, SetsError> {
        if !(1..100).contains(&value) {
            return Err(SetsError::OutOfRange);
        }

        Ok(Self(value))
    }

    #[must_use]
    pub fn get(self) -> u32 {
        self.0
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum SetsError {
    #[error("Sets must be in the range 1 to 99")]
    OutOfRange,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExerciseDefinition {
    pub name: Name,
    pub muscle_group: MuscleGroup,
    pub sets: Sets,
    pub reps: RepsSpec,
    pub difficulty: Level,
    pub category: Option<Category>,
    pub equipment: Option<Equipment>,
    pub description: String,
    pub video_url: Option<String>,
}

impl ExerciseDefinition {
    #[must_use]
    pub fn is_forearm(&self) -> bool {
        self.category == Some(Category::Forearm)
    }
}

pub trait Property: Clone + Copy + Sized {
    fn iter() -> Iter<'static, Self>;
    fn name(self) -> &'static str;
}
