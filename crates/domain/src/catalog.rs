use std::collections::BTreeMap;

use crate::{
    Category, Equipment, ExerciseDefinition, Level, MuscleGroup, Name, RepsSpec, Sets, Weekday,
    WeekPlan,
};

/// The static configuration: exercise definitions grouped by muscle
/// group plus the four hand-authored base cycle weeks. Loaded once at
/// startup and treated as read-only, except for the narrow video-URL
/// write path.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    pub exercises: BTreeMap<MuscleGroup, Vec<ExerciseDefinition>>,
    pub base_weeks: BTreeMap<u32, WeekPlan>,
}

impl Catalog {
    #[must_use]
    pub fn new(
        exercises: BTreeMap<MuscleGroup, Vec<ExerciseDefinition>>,
        base_weeks: BTreeMap<u32, WeekPlan>,
    ) -> Self {
        Self {
            exercises,
            base_weeks,
        }
    }

    #[must_use]
    pub fn exercises_for(&self, group: MuscleGroup) -> &[ExerciseDefinition] {
        self.exercises.get(&group).map_or(&[], Vec::as_slice)
    }

    #[must_use]
    pub fn base_week(&self, cycle_week: u32) -> Option<&WeekPlan> {
        self.base_weeks.get(&cycle_week)
    }

    /// Library search across all muscle groups: exact difficulty,
    /// equipment and a case-insensitive name fragment, each optional.
    #[must_use]
    pub fn search(
        &self,
        difficulty: Option<Level>,
        equipment: Option<Equipment>,
        term: &str,
    ) -> Vec<&ExerciseDefinition> {
        let term = term.trim().to_lowercase();
        self.exercises
            .values()
            .flatten()
            .filter(|exercise| difficulty.is_none_or(|level| exercise.difficulty == level))
            .filter(|exercise| {
                equipment.is_none_or(|equipment| exercise.equipment == Some(equipment))
            })
            .filter(|exercise| {
                term.is_empty() || exercise.name.as_ref().to_lowercase().contains(&term)
            })
            .collect()
    }

    /// The narrow configuration write path: attach or replace the video
    /// URL of a single exercise. Returns false when no such exercise
    /// exists.
    pub fn set_video_url(
        &mut self,
        group: MuscleGroup,
        name: &Name,
        video_url: Option<String>,
    ) -> bool {
        if let Some(exercises) = self.exercises.get_mut(&group) {
            if let Some(exercise) = exercises.iter_mut().find(|e| e.name == *name) {
                exercise.video_url = video_url;
                return true;
            }
        }
        false
    }

    /// The built-in catalog used for fresh installs: a dumbbell and
    /// bodyweight roster across all muscle groups with the base cycle
    /// training Monday, Thursday, Friday and Saturday.
    #[must_use]
    pub fn builtin() -> Self {
        let mut exercises: BTreeMap<MuscleGroup, Vec<ExerciseDefinition>> = BTreeMap::new();

        for (group, name, sets, reps, difficulty, category, equipment, description) in
            BUILTIN_EXERCISES
        {
            let Ok(name) = Name::new(name) else { continue };
            let Ok(sets) = Sets::new(*sets) else { continue };
            let Ok(difficulty) = Level::new(*difficulty) else {
                continue;
            };
            exercises.entry(*group).or_default().push(ExerciseDefinition {
                name,
                muscle_group: *group,
                sets,
                reps: RepsSpec::from(*reps),
                difficulty,
                category: *category,
                equipment: Some(*equipment),
                description: (*description).to_string(),
                video_url: None,
            });
        }

        Self {
            exercises,
            base_weeks: builtin_base_weeks(),
        }
    }
}

type BuiltinExercise = (
    MuscleGroup,
    &'static str,
    u32,
    &'static str,
    u32,
    Option<Category>,
    Equipment,
    &'static str,
);

static BUILTIN_EXERCISES: &[BuiltinExercise] = &[
    (
        MuscleGroup::Chest,
        "Dumbbell Bench Press",
        3,
        "8-10",
        1,
        None,
        Equipment::Bench,
        "Lying on the bench, lower the dumbbells until the chest stretches, then press up under control.",
    ),
    (
        MuscleGroup::Chest,
        "Dumbbell Flyes",
        3,
        "10-12",
        1,
        None,
        Equipment::Bench,
        "Open the arms in a wide arc with slightly bent elbows, lowering until the chest stretches.",
    ),
    (
        MuscleGroup::Chest,
        "Incline Dumbbell Press",
        3,
        "8-10",
        2,
        None,
        Equipment::Bench,
        "On a bench inclined 30-45 degrees, press the dumbbells upward with control.",
    ),
    (
        MuscleGroup::Chest,
        "Push Up",
        3,
        "10-15",
        1,
        None,
        Equipment::Floor,
        "From a plank, lower the chest close to the floor with a braced core, then push back up.",
    ),
    (
        MuscleGroup::Chest,
        "Deficit Push Up",
        3,
        "8-12",
        3,
        None,
        Equipment::Floor,
        "Hands elevated on blocks for extra range, lower past hand level and press up.",
    ),
    (
        MuscleGroup::Back,
        "Dumbbell Row",
        3,
        "8-10",
        1,
        None,
        Equipment::Dumbbells,
        "Torso parallel to the floor, pull the elbow back bringing the dumbbell to the ribs.",
    ),
    (
        MuscleGroup::Back,
        "One Arm Row",
        3,
        "8-10",
        1,
        None,
        Equipment::Bench,
        "One hand braced on the bench, pull the dumbbell towards the hip with a stable torso.",
    ),
    (
        MuscleGroup::Back,
        "Dumbbell Deadlift",
        3,
        "8-10",
        2,
        None,
        Equipment::Dumbbells,
        "Feet apart, lower the dumbbells with a flat back and drive through the heels to stand.",
    ),
    (
        MuscleGroup::Shoulders,
        "Military Press",
        3,
        "8-10",
        1,
        None,
        Equipment::Dumbbells,
        "Standing with dumbbells at shoulder height, press overhead to full extension.",
    ),
    (
        MuscleGroup::Shoulders,
        "Lateral Raises",
        3,
        "10-12",
        1,
        None,
        Equipment::Dumbbells,
        "Raise the arms sideways to shoulder height with control.",
    ),
    (
        MuscleGroup::Shoulders,
        "Front Raises",
        3,
        "10-12",
        2,
        None,
        Equipment::Dumbbells,
        "Raise the dumbbells to the front alternating arms, no higher than the shoulders.",
    ),
    (
        MuscleGroup::Shoulders,
        "Reverse Flyes",
        3,
        "12-15",
        2,
        None,
        Equipment::Dumbbells,
        "Hinged forward, open the arms sideways squeezing the shoulder blades.",
    ),
    (
        MuscleGroup::Arms,
        "Bicep Curl",
        3,
        "8-10",
        1,
        None,
        Equipment::Dumbbells,
        "Elbows pinned to the torso, curl the dumbbells towards the shoulders.",
    ),
    (
        MuscleGroup::Arms,
        "Hammer Curl",
        3,
        "8-10",
        1,
        None,
        Equipment::Dumbbells,
        "Curl with a neutral grip, palms facing each other, controlled on the way down.",
    ),
    (
        MuscleGroup::Arms,
        "Concentration Curl",
        3,
        "10-12",
        2,
        None,
        Equipment::Dumbbells,
        "Seated with the elbow braced on the thigh, curl with full focus on the biceps.",
    ),
    (
        MuscleGroup::Arms,
        "Tricep Extensions",
        3,
        "10-12",
        1,
        None,
        Equipment::Bench,
        "Lying down with elbows fixed towards the ceiling, lower the dumbbell to the forehead.",
    ),
    (
        MuscleGroup::Arms,
        "Tricep Kickback",
        3,
        "10-12",
        2,
        None,
        Equipment::Dumbbells,
        "Hinged forward with the upper arm parallel to the floor, extend the forearm back.",
    ),
    (
        MuscleGroup::Arms,
        "Wrist Curl",
        1,
        "8-10",
        1,
        Some(Category::Forearm),
        Equipment::Dumbbells,
        "Forearms on the thighs, curl the wrists upward through a full range.",
    ),
    (
        MuscleGroup::Arms,
        "Reverse Wrist Curl",
        1,
        "8-10",
        2,
        Some(Category::Forearm),
        Equipment::Dumbbells,
        "Palms down, extend the wrists upward against the dumbbell.",
    ),
    (
        MuscleGroup::Arms,
        "Farmer Hold",
        1,
        "30s",
        3,
        Some(Category::Forearm),
        Equipment::Dumbbells,
        "Stand tall holding heavy dumbbells at the sides without letting the grip open.",
    ),
    (
        MuscleGroup::Legs,
        "Dumbbell Squat",
        3,
        "8-10",
        1,
        None,
        Equipment::Dumbbells,
        "Feet apart, sit back as if into a chair keeping the chest tall.",
    ),
    (
        MuscleGroup::Legs,
        "Lunges",
        3,
        "10-12",
        1,
        None,
        Equipment::Dumbbells,
        "Long step forward, lower until both knees reach 90 degrees.",
    ),
    (
        MuscleGroup::Legs,
        "Romanian Deadlift",
        3,
        "8-10",
        2,
        None,
        Equipment::Dumbbells,
        "Knees slightly bent, lower the dumbbells keeping the lumbar curve.",
    ),
    (
        MuscleGroup::Legs,
        "Sumo Squat",
        3,
        "10-12",
        3,
        None,
        Equipment::Dumbbells,
        "Wide stance with toes out, squat keeping the knees tracking the feet.",
    ),
    (
        MuscleGroup::Calves,
        "Calf Raise",
        3,
        "12-15",
        1,
        None,
        Equipment::Dumbbells,
        "Rise onto the toes squeezing the calves, pause briefly at the top.",
    ),
    (
        MuscleGroup::Calves,
        "Single Leg Calf Raise",
        3,
        "10-12",
        2,
        None,
        Equipment::Dumbbells,
        "One foot at a time, full stretch at the bottom and a pause at the top.",
    ),
    (
        MuscleGroup::Abs,
        "Crunches",
        3,
        "12-15",
        1,
        None,
        Equipment::Floor,
        "Knees bent, lift the torso towards the knees without pulling on the neck.",
    ),
    (
        MuscleGroup::Abs,
        "Plank",
        3,
        "30s",
        1,
        None,
        Equipment::Floor,
        "Forearms on the floor, body in a straight line, hold the position.",
    ),
    (
        MuscleGroup::Abs,
        "Leg Raises",
        3,
        "10-12",
        2,
        None,
        Equipment::Floor,
        "Lying on the back with hands under the hips, raise the legs towards the chest.",
    ),
    (
        MuscleGroup::Abs,
        "Russian Twists",
        3,
        "12-15",
        2,
        None,
        Equipment::Dumbbells,
        "Seated and leaning back, rotate the torso side to side holding a dumbbell.",
    ),
    (
        MuscleGroup::Abs,
        "Side Plank",
        3,
        "30s",
        3,
        None,
        Equipment::Floor,
        "On one forearm, keep the body straight sideways with hips high.",
    ),
    (
        MuscleGroup::Cardio,
        "Stationary Bike",
        1,
        "20km",
        1,
        None,
        Equipment::StationaryBike,
        "Steady cadence with an upright posture, increase resistance gradually.",
    ),
];

fn builtin_base_weeks() -> BTreeMap<u32, WeekPlan> {
    BTreeMap::from([
        (
            1,
            WeekPlan::from_iter([
                (
                    Weekday::Monday,
                    vec![MuscleGroup::Chest, MuscleGroup::Abs],
                ),
                (
                    Weekday::Thursday,
                    vec![MuscleGroup::Back, MuscleGroup::Arms],
                ),
                (
                    Weekday::Friday,
                    vec![MuscleGroup::Legs, MuscleGroup::Calves],
                ),
                (
                    Weekday::Saturday,
                    vec![MuscleGroup::Shoulders, MuscleGroup::Cardio],
                ),
            ]),
        ),
        (
            2,
            WeekPlan::from_iter([
                (
                    Weekday::Monday,
                    vec![MuscleGroup::Back, MuscleGroup::Abs],
                ),
                (
                    Weekday::Thursday,
                    vec![MuscleGroup::Chest, MuscleGroup::Arms],
                ),
                (
                    Weekday::Friday,
                    vec![MuscleGroup::Shoulders, MuscleGroup::Calves],
                ),
                (
                    Weekday::Saturday,
                    vec![MuscleGroup::Legs, MuscleGroup::Cardio],
                ),
            ]),
        ),
        (
            3,
            WeekPlan::from_iter([
                (
                    Weekday::Monday,
                    vec![MuscleGroup::Legs, MuscleGroup::Abs],
                ),
                (
                    Weekday::Thursday,
                    vec![MuscleGroup::Shoulders, MuscleGroup::Arms],
                ),
                (
                    Weekday::Friday,
                    vec![MuscleGroup::Chest, MuscleGroup::Calves],
                ),
                (
                    Weekday::Saturday,
                    vec![MuscleGroup::Back, MuscleGroup::Cardio],
                ),
            ]),
        ),
        (
            4,
            WeekPlan::from_iter([
                (
                    Weekday::Monday,
                    vec![MuscleGroup::Chest, MuscleGroup::Arms],
                ),
                (
                    Weekday::Thursday,
                    vec![MuscleGroup::Legs, MuscleGroup::Calves],
                ),
                (
                    Weekday::Friday,
                    vec![MuscleGroup::Back, MuscleGroup::Abs],
                ),
                (
                    Weekday::Saturday,
                    vec![MuscleGroup::Shoulders, MuscleGroup::Cardio],
                ),
            ]),
        ),
    ])
}
