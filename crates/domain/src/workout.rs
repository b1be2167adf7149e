use std::ops::Mul;

use chrono::{DateTime, NaiveDate, Utc};
use derive_more::{Deref, Display, Into};
use uuid::Uuid;

use crate::{CreateError, DeleteError, Name, ReadError, UpdateError, UserID};

#[allow(async_fn_in_trait)]
pub trait WorkoutService: Send + Sync + 'static {
    async fn get_workouts(&self, user_id: UserID) -> Result<Vec<Workout>, ReadError>;
    async fn get_workout(&self, id: WorkoutID) -> Result<Workout, ReadError>;
    async fn create_workout(
        &self,
        user_id: UserID,
        title: Option<String>,
        date: NaiveDate,
        exercises: Vec<ExerciseDraft>,
    ) -> Result<Workout, CreateError>;
    async fn modify_workout(
        &self,
        id: WorkoutID,
        title: Option<String>,
        date: Option<NaiveDate>,
        exercises: Option<Vec<ExerciseDraft>>,
    ) -> Result<Workout, UpdateError>;
    async fn delete_workout(&self, id: WorkoutID) -> Result<WorkoutID, DeleteError>;
}

#[allow(async_fn_in_trait)]
pub trait WorkoutRepository: Send + Sync + 'static {
    async fn read_workouts(&self, user_id: UserID) -> Result<Vec<Workout>, ReadError>;
    async fn read_workout(&self, id: WorkoutID) -> Result<Workout, ReadError>;
    async fn create_workout(
        &self,
        user_id: UserID,
        title: Option<String>,
        date: NaiveDate,
        exercises: Vec<Exercise>,
    ) -> Result<Workout, CreateError>;
    /// The outer `Option` of `title` expresses field presence: `None` leaves
    /// the stored title untouched, `Some(None)` clears it.
    async fn modify_workout(
        &self,
        id: WorkoutID,
        title: Option<Option<String>>,
        date: Option<NaiveDate>,
        exercises: Option<Vec<Exercise>>,
    ) -> Result<Workout, UpdateError>;
    async fn delete_workout(&self, id: WorkoutID) -> Result<WorkoutID, DeleteError>;
    async fn delete_workouts_by_user(
        &self,
        user_id: UserID,
    ) -> Result<Vec<WorkoutID>, DeleteError>;
}

/// A dated training session owned by a user.
///
/// Exercises and sets are embedded and replaced wholesale on update. `id` and
/// `created_at` are assigned by the store on creation and never change.
#[derive(Debug, Clone, PartialEq)]
pub struct Workout {
    pub id: WorkoutID,
    pub user_id: UserID,
    pub title: Option<String>,
    pub date: NaiveDate,
    pub exercises: Vec<Exercise>,
    pub created_at: DateTime<Utc>,
}

impl Workout {
    /// Total volume (reps × weight summed over all sets of all exercises).
    #[must_use]
    pub fn volume(&self) -> f32 {
        self.exercises.iter().map(Exercise::volume).sum()
    }

    #[must_use]
    pub fn total_sets(&self) -> usize {
        self.exercises.iter().map(|e| e.sets.len()).sum()
    }
}

#[derive(Deref, Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct WorkoutID(Uuid);

impl WorkoutID {
    #[must_use]
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl From<Uuid> for WorkoutID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for WorkoutID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

/// A named movement with an ordered list of sets, valid by construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Exercise {
    pub name: Name,
    pub sets: Vec<Set>,
}

impl Exercise {
    #[must_use]
    pub fn volume(&self) -> f32 {
        self.sets.iter().map(|s| s.reps * s.weight).sum()
    }
}

/// A candidate exercise as edited or submitted by a client.
///
/// Unlike [`Exercise`], a draft may hold an empty name or contain no set with
/// a positive rep count.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ExerciseDraft {
    pub name: String,
    pub sets: Vec<Set>,
}

impl ExerciseDraft {
    /// Returns the validated exercise, or `None` if the trimmed name is empty
    /// or no set has a positive rep count.
    #[must_use]
    pub fn validate(&self) -> Option<Exercise> {
        let name = Name::new(&self.name).ok()?;
        if self.sets.iter().any(|s| u32::from(s.reps) > 0) {
            Some(Exercise {
                name,
                sets: self.sets.clone(),
            })
        } else {
            None
        }
    }
}

impl From<&Exercise> for ExerciseDraft {
    fn from(value: &Exercise) -> Self {
        Self {
            name: value.name.to_string(),
            sets: value.sets.clone(),
        }
    }
}

/// Filters a candidate exercise list down to its valid entries.
///
/// Invalid entries are dropped silently. Sets of a valid exercise are kept
/// as-is, so filtering an already-valid list returns it unchanged.
#[must_use]
pub fn valid_exercises(drafts: &[ExerciseDraft]) -> Vec<Exercise> {
    drafts.iter().filter_map(ExerciseDraft::validate).collect()
}

/// Trims a workout title. A title that is empty after trimming becomes `None`.
#[must_use]
pub fn normalize_title(title: Option<String>) -> Option<String> {
    title
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
}

#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Set {
    pub reps: Reps,
    pub weight: Weight,
}

#[derive(Debug, Default, Display, Clone, Copy, Into, PartialEq, PartialOrd)]
pub struct Reps(u32);

impl Reps {
    pub fn new(value: u32) -> Result<Self, RepsError> {
        if !(0..1000).contains(&value) {
            return Err(RepsError::OutOfRange);
        }

        Ok(Self(value))
    }

    /// Parses text input, coercing parse failures and out-of-range values to
    /// zero instead of reporting an error.
    #[must_use]
    pub fn parse_lenient(value: &str) -> Self {
        Self::try_from(value).unwrap_or_default()
    }
}

impl TryFrom<&str> for Reps {
    type Error = RepsError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().parse::<u32>() {
            Ok(parsed_value) => Reps::new(parsed_value),
            Err(_) => Err(RepsError::ParseError),
        }
    }
}

impl Mul<Weight> for Reps {
    type Output = f32;

    fn mul(self, rhs: Weight) -> Self::Output {
        #[allow(clippy::cast_precision_loss)]
        let reps = self.0 as f32;
        reps * rhs.0
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum RepsError {
    #[error("Reps must be in the range 0 to 999")]
    OutOfRange,
    #[error("Reps must be an integer")]
    ParseError,
}

#[derive(Debug, Default, Display, Clone, Copy, Into, PartialEq, PartialOrd)]
pub struct Weight(f32);

impl Weight {
    pub fn new(value: f32) -> Result<Self, WeightError> {
        if !(0.0..1000.0).contains(&value) {
            return Err(WeightError::OutOfRange);
        }

        Ok(Self(value))
    }

    /// Parses text input, coercing parse failures and out-of-range values to
    /// zero instead of reporting an error.
    #[must_use]
    pub fn parse_lenient(value: &str) -> Self {
        Self::try_from(value).unwrap_or_default()
    }
}

impl TryFrom<&str> for Weight {
    type Error = WeightError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().parse::<f32>() {
            Ok(parsed_value) => Weight::new(parsed_value),
            Err(_) => Err(WeightError::ParseError),
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum WeightError {
    #[error("Weight must be in the range 0.0 to 999.9 kg")]
    OutOfRange,
    #[error("Weight must be a decimal")]
    ParseError,
}
