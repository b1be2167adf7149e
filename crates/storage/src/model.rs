//! Serializable document and wire models.
//!
//! Domain types carry no serde derives. Storage backends and the HTTP layer
//! map through the mirror structs in this module instead.

use chrono::{DateTime, NaiveDate, Utc};
use gymlog_domain as domain;
use uuid::Uuid;

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ModelError {
    #[error(transparent)]
    Name(#[from] domain::NameError),
    #[error(transparent)]
    EmailAddress(#[from] domain::EmailAddressError),
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<&domain::User> for User {
    fn from(value: &domain::User) -> Self {
        Self {
            id: *value.id,
            name: value.name.to_string(),
            email: value.email.to_string(),
            created_at: value.created_at,
        }
    }
}

impl TryFrom<User> for domain::User {
    type Error = ModelError;

    fn try_from(value: User) -> Result<Self, Self::Error> {
        Ok(Self {
            id: value.id.into(),
            name: domain::Name::new(&value.name)?,
            email: domain::EmailAddress::new(&value.email)?,
            created_at: value.created_at,
        })
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Workout {
    pub id: Uuid,
    pub user_id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub date: NaiveDate,
    pub exercises: Vec<Exercise>,
    pub created_at: DateTime<Utc>,
}

impl From<&domain::Workout> for Workout {
    fn from(value: &domain::Workout) -> Self {
        Self {
            id: *value.id,
            user_id: *value.user_id,
            title: value.title.clone(),
            date: value.date,
            exercises: value.exercises.iter().map(Exercise::from).collect(),
            created_at: value.created_at,
        }
    }
}

impl TryFrom<Workout> for domain::Workout {
    type Error = ModelError;

    fn try_from(value: Workout) -> Result<Self, Self::Error> {
        Ok(Self {
            id: value.id.into(),
            user_id: value.user_id.into(),
            title: value.title,
            date: value.date,
            exercises: value
                .exercises
                .into_iter()
                .map(domain::Exercise::try_from)
                .collect::<Result<Vec<_>, _>>()?,
            created_at: value.created_at,
        })
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
pub struct Exercise {
    pub name: String,
    pub sets: Vec<Set>,
}

impl From<&domain::Exercise> for Exercise {
    fn from(value: &domain::Exercise) -> Self {
        Self {
            name: value.name.to_string(),
            sets: value.sets.iter().map(Set::from).collect(),
        }
    }
}

impl TryFrom<Exercise> for domain::Exercise {
    type Error = ModelError;

    fn try_from(value: Exercise) -> Result<Self, Self::Error> {
        Ok(Self {
            name: domain::Name::new(&value.name)?,
            sets: value.sets.into_iter().map(domain::Set::from).collect(),
        })
    }
}

impl From<Exercise> for domain::ExerciseDraft {
    fn from(value: Exercise) -> Self {
        Self {
            name: value.name,
            sets: value.sets.into_iter().map(domain::Set::from).collect(),
        }
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Set {
    pub reps: u32,
    #[serde(default)]
    pub weight: f32,
}

impl From<&domain::Set> for Set {
    fn from(value: &domain::Set) -> Self {
        Self {
            reps: u32::from(value.reps),
            weight: f32::from(value.weight),
        }
    }
}

impl From<Set> for domain::Set {
    fn from(value: Set) -> Self {
        Self {
            reps: domain::Reps::new(value.reps).unwrap_or_default(),
            weight: domain::Weight::new(value.weight).unwrap_or_default(),
        }
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
pub struct Status {
    pub message: String,
    pub version: String,
    pub status: String,
}
