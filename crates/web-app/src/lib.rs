#![warn(clippy::pedantic)]

mod workout_form;

pub use workout_form::{FormMode, FormStatus, SubmitError, WorkoutForm};
