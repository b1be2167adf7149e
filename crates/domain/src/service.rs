use chrono::NaiveDate;
use log::{debug, error};

use crate::{
    CreateError, DeleteError, EmailAddress, ExerciseDraft, Name, ReadError, UpdateError, User,
    UserID, UserRepository, UserService, ValidationError, VersionRepository, VersionService,
    Workout, WorkoutID, WorkoutRepository, WorkoutService, normalize_title, valid_exercises,
};

pub struct Service<R> {
    repository: R,
}

impl<R> Service<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

macro_rules! log_on_error {
    ($func: expr, $error: ident, $action: literal, $entity: literal) => {{
        let result = $func.await;
        match result {
            Ok(_) => {}
            Err(ref err) => match err {
                $error::Storage(crate::StorageError::NoConnection) => {
                    debug!("failed to {} {}: {err}", $action, $entity);
                }
                _ => {
                    error!("failed to {} {}: {err}", $action, $entity);
                }
            },
        }
        result
    }};
}

impl<R: VersionRepository> VersionService for Service<R> {
    async fn get_version(&self) -> Result<String, ReadError> {
        log_on_error!(self.repository.read_version(), ReadError, "get", "version")
    }
}

impl<R: UserRepository + WorkoutRepository> UserService for Service<R> {
    async fn get_users(&self) -> Result<Vec<User>, ReadError> {
        log_on_error!(self.repository.read_users(), ReadError, "get", "users")
    }

    async fn get_user(&self, id: UserID) -> Result<User, ReadError> {
        log_on_error!(self.repository.read_user(id), ReadError, "get", "user")
    }

    async fn create_user(&self, name: Name, email: EmailAddress) -> Result<User, CreateError> {
        log_on_error!(
            self.repository.create_user(name, email),
            CreateError,
            "create",
            "user"
        )
    }

    async fn modify_user(
        &self,
        id: UserID,
        name: Option<Name>,
        email: Option<EmailAddress>,
    ) -> Result<User, UpdateError> {
        log_on_error!(
            self.repository.modify_user(id, name, email),
            UpdateError,
            "modify",
            "user"
        )
    }

    async fn delete_user(&self, id: UserID) -> Result<UserID, DeleteError> {
        let id = log_on_error!(self.repository.delete_user(id), DeleteError, "delete", "user")?;
        // Workouts of a deleted user are unreachable through the API, so they
        // are deleted along with the user.
        log_on_error!(
            self.repository.delete_workouts_by_user(id),
            DeleteError,
            "delete",
            "workouts of user"
        )?;
        Ok(id)
    }
}

impl<R: WorkoutRepository> WorkoutService for Service<R> {
    async fn get_workouts(&self, user_id: UserID) -> Result<Vec<Workout>, ReadError> {
        let mut workouts = log_on_error!(
            self.repository.read_workouts(user_id),
            ReadError,
            "get",
            "workouts"
        )?;
        // Stable sort: ties keep the store's order.
        workouts.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(workouts)
    }

    async fn get_workout(&self, id: WorkoutID) -> Result<Workout, ReadError> {
        log_on_error!(self.repository.read_workout(id), ReadError, "get", "workout")
    }

    async fn create_workout(
        &self,
        user_id: UserID,
        title: Option<String>,
        date: NaiveDate,
        exercises: Vec<ExerciseDraft>,
    ) -> Result<Workout, CreateError> {
        let exercises = valid_exercises(&exercises);
        if exercises.is_empty() {
            return Err(ValidationError::NoValidExercises.into());
        }
        log_on_error!(
            self.repository
                .create_workout(user_id, normalize_title(title), date, exercises),
            CreateError,
            "create",
            "workout"
        )
    }

    async fn modify_workout(
        &self,
        id: WorkoutID,
        title: Option<String>,
        date: Option<NaiveDate>,
        exercises: Option<Vec<ExerciseDraft>>,
    ) -> Result<Workout, UpdateError> {
        let exercises = match exercises {
            Some(drafts) => {
                let filtered = valid_exercises(&drafts);
                if filtered.is_empty() {
                    return Err(ValidationError::NoValidExercises.into());
                }
                Some(filtered)
            }
            None => None,
        };
        log_on_error!(
            self.repository.modify_workout(
                id,
                title.map(|t| normalize_title(Some(t))),
                date,
                exercises
            ),
            UpdateError,
            "modify",
            "workout"
        )
    }

    async fn delete_workout(&self, id: WorkoutID) -> Result<WorkoutID, DeleteError> {
        log_on_error!(
            self.repository.delete_workout(id),
            DeleteError,
            "delete",
            "workout"
        )
    }
}
