use chrono::{Local, NaiveDate};
use gymlog_domain::{
    CreateError, ExerciseDraft, ReadError, Reps, Set, UpdateError, UserID, Weight, WorkoutID,
    WorkoutService, valid_exercises,
};

/// Editable draft of a workout.
///
/// The draft may transiently hold invalid exercises (e.g. a newly added row
/// with an empty name); they are excluded from the submitted payload without
/// raising an error as long as at least one exercise is valid.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutForm {
    mode: FormMode,
    pub title: String,
    pub date: NaiveDate,
    pub exercises: Vec<ExerciseDraft>,
    status: FormStatus,
    submit_attempted: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create { user_id: UserID },
    Edit { id: WorkoutID },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormStatus {
    Editing,
    Submitting,
    Submitted,
    LoadFailed(String),
}

#[derive(thiserror::Error, Debug)]
pub enum SubmitError {
    #[error("a submission is already in progress")]
    Pending,
    #[error("workout must contain at least one valid exercise")]
    NoValidExercises,
    #[error(transparent)]
    Create(CreateError),
    #[error(transparent)]
    Update(UpdateError),
}

impl WorkoutForm {
    /// Fresh draft for a new workout of the given user.
    #[must_use]
    pub fn new(user_id: UserID) -> Self {
        Self::with_mode(FormMode::Create { user_id })
    }

    /// Draft for editing an existing workout. The draft is empty until
    /// [`load`](Self::load) has replaced it with the fetched workout.
    #[must_use]
    pub fn edit(id: WorkoutID) -> Self {
        Self::with_mode(FormMode::Edit { id })
    }

    fn with_mode(mode: FormMode) -> Self {
        Self {
            mode,
            title: String::new(),
            date: Local::now().date_naive(),
            exercises: vec![empty_exercise()],
            status: FormStatus::Editing,
            submit_attempted: false,
        }
    }

    #[must_use]
    pub fn mode(&self) -> FormMode {
        self.mode
    }

    #[must_use]
    pub fn status(&self) -> &FormStatus {
        &self.status
    }

    /// Replaces the draft wholesale with the stored workout (edit mode only).
    ///
    /// On a fetch failure the draft is left untouched and the form transitions
    /// to [`FormStatus::LoadFailed`].
    pub async fn load<S: WorkoutService>(&mut self, service: &S) -> Result<(), ReadError> {
        let FormMode::Edit { id } = self.mode else {
            return Ok(());
        };
        match service.get_workout(id).await {
            Ok(workout) => {
                self.title = workout.title.unwrap_or_default();
                self.date = workout.date;
                self.exercises = workout.exercises.iter().map(ExerciseDraft::from).collect();
                self.status = FormStatus::Editing;
                Ok(())
            }
            Err(err) => {
                self.status = FormStatus::LoadFailed(err.to_string());
                Err(err)
            }
        }
    }

    pub fn update_title(&mut self, title: &str) {
        self.title = title.to_string();
    }

    pub fn update_date(&mut self, date: NaiveDate) {
        self.date = date;
    }

    pub fn add_exercise(&mut self) {
        self.exercises.push(empty_exercise());
    }

    /// No-op while only one exercise remains, so there is always a row to edit.
    pub fn remove_exercise(&mut self, index: usize) {
        if self.exercises.len() > 1 && index < self.exercises.len() {
            self.exercises.remove(index);
        }
    }

    pub fn update_exercise_name(&mut self, index: usize, name: &str) {
        if let Some(exercise) = self.exercises.get_mut(index) {
            exercise.name = name.to_string();
        }
    }

    pub fn add_set(&mut self, exercise_index: usize) {
        if let Some(exercise) = self.exercises.get_mut(exercise_index) {
            exercise.sets.push(Set::default());
        }
    }

    /// No-op while only one set remains in the exercise.
    pub fn remove_set(&mut self, exercise_index: usize, set_index: usize) {
        if let Some(exercise) = self.exercises.get_mut(exercise_index) {
            if exercise.sets.len() > 1 && set_index < exercise.sets.len() {
                exercise.sets.remove(set_index);
            }
        }
    }

    /// Parses the text input leniently: non-numeric input becomes zero.
    pub fn update_set_reps(&mut self, exercise_index: usize, set_index: usize, value: &str) {
        if let Some(set) = self.set_mut(exercise_index, set_index) {
            set.reps = Reps::parse_lenient(value);
        }
    }

    /// Parses the text input leniently: non-numeric input becomes zero.
    pub fn update_set_weight(&mut self, exercise_index: usize, set_index: usize, value: &str) {
        if let Some(set) = self.set_mut(exercise_index, set_index) {
            set.weight = Weight::parse_lenient(value);
        }
    }

    fn set_mut(&mut self, exercise_index: usize, set_index: usize) -> Option<&mut Set> {
        self.exercises
            .get_mut(exercise_index)
            .and_then(|e| e.sets.get_mut(set_index))
    }

    #[must_use]
    pub fn valid_exercise_count(&self) -> usize {
        valid_exercises(&self.exercises).len()
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.valid_exercise_count() > 0
    }

    /// Whether the UI should surface the aggregate validation message.
    #[must_use]
    pub fn show_validation_error(&self) -> bool {
        self.submit_attempted && !self.is_valid()
    }

    /// Validates and submits the draft.
    ///
    /// Invalid exercises are dropped from the payload. If no exercise is
    /// valid, the form stays in `Editing`, remembers that submission was
    /// attempted and performs no network call. While a submission is pending,
    /// further calls are rejected. A network failure returns the form to
    /// `Editing` without discarding the draft.
    pub async fn submit<S: WorkoutService>(
        &mut self,
        service: &S,
    ) -> Result<WorkoutID, SubmitError> {
        if self.status == FormStatus::Submitting {
            return Err(SubmitError::Pending);
        }
        self.submit_attempted = true;
        let exercises = valid_exercises(&self.exercises);
        if exercises.is_empty() {
            return Err(SubmitError::NoValidExercises);
        }
        let payload = exercises.iter().map(ExerciseDraft::from).collect();

        self.status = FormStatus::Submitting;
        let result = match self.mode {
            FormMode::Create { user_id } => service
                .create_workout(user_id, Some(self.title.clone()), self.date, payload)
                .await
                .map(|workout| workout.id)
                .map_err(SubmitError::Create),
            FormMode::Edit { id } => service
                .modify_workout(
                    id,
                    Some(self.title.clone()),
                    Some(self.date),
                    Some(payload),
                )
                .await
                .map(|workout| workout.id)
                .map_err(SubmitError::Update),
        };
        match result {
            Ok(id) => {
                self.status = FormStatus::Submitted;
                Ok(id)
            }
            Err(err) => {
                self.status = FormStatus::Editing;
                Err(err)
            }
        }
    }
}

fn empty_exercise() -> ExerciseDraft {
    ExerciseDraft {
        name: String::new(),
        sets: vec![Set::default()],
    }
}
