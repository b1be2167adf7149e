#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

mod error;
mod name;
mod service;
mod user;
mod version;
mod workout;

pub use error::{
    CreateError, DeleteError, ReadError, StorageError, UpdateError, ValidationError,
};
pub use name::{EmailAddress, EmailAddressError, Name, NameError};
pub use service::Service;
pub use user::{User, UserID, UserRepository, UserService};
pub use version::{VersionRepository, VersionService};
pub use workout::{
    Exercise, ExerciseDraft, Reps, RepsError, Set, Weight, WeightError, Workout, WorkoutID,
    WorkoutRepository, WorkoutService, normalize_title, valid_exercises,
};
