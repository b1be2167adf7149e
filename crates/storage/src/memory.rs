//! In-memory document store.
//!
//! Workout documents embed their exercises and sets; only `user_id` crosses
//! document boundaries. All access goes through a single async lock, which
//! gives single-document atomicity with last-writer-wins semantics for
//! concurrent updates.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use gymlog_domain as domain;
use gymlog_domain::{CreateError, DeleteError, ReadError, UpdateError};

use crate::model;

/// An explicitly constructed store handle with process lifetime.
///
/// Cloning shares the underlying documents; the server injects one handle
/// into its application state instead of keeping ambient module state.
#[derive(Clone, Default)]
pub struct MemoryStore {
    documents: Arc<RwLock<Documents>>,
}

#[derive(Default)]
struct Documents {
    users: BTreeMap<Uuid, model::User>,
    workouts: BTreeMap<Uuid, model::Workout>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store preloaded with a demo user and a few example workouts.
    #[must_use]
    pub fn with_demo_data() -> Self {
        let mut documents = Documents::default();
        let user_id = Uuid::new_v4();
        documents.users.insert(
            user_id,
            model::User {
                id: user_id,
                name: String::from("Demo User"),
                email: String::from("demo@gymtracker.com"),
                created_at: Utc::now(),
            },
        );
        let workouts = [
            (
                "Upper Body Strength",
                demo_date(2024, 11, 10),
                vec![
                    demo_exercise("Bench Press", &[(10, 80.0), (8, 85.0), (6, 90.0)]),
                    demo_exercise("Shoulder Press", &[(12, 30.0), (10, 35.0), (8, 40.0)]),
                    demo_exercise("Bicep Curls", &[(15, 15.0), (12, 17.5), (10, 20.0)]),
                ],
            ),
            (
                "Leg Day",
                demo_date(2024, 11, 9),
                vec![
                    demo_exercise("Squats", &[(10, 100.0), (8, 110.0), (6, 120.0)]),
                    demo_exercise("Leg Press", &[(12, 150.0), (10, 160.0), (8, 170.0)]),
                ],
            ),
            (
                "Back & Core",
                demo_date(2024, 11, 8),
                vec![
                    demo_exercise("Deadlifts", &[(8, 120.0), (6, 130.0), (5, 140.0)]),
                    demo_exercise("Pull-ups", &[(10, 0.0), (8, 5.0), (6, 10.0)]),
                    demo_exercise("Planks", &[(60, 0.0), (45, 0.0), (30, 0.0)]),
                ],
            ),
        ];
        for (title, date, exercises) in workouts {
            let id = Uuid::new_v4();
            documents.workouts.insert(
                id,
                model::Workout {
                    id,
                    user_id,
                    title: Some(title.to_string()),
                    date,
                    exercises,
                    created_at: Utc::now(),
                },
            );
        }
        Self {
            documents: Arc::new(RwLock::new(documents)),
        }
    }
}

fn demo_date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

fn demo_exercise(name: &str, sets: &[(u32, f32)]) -> model::Exercise {
    model::Exercise {
        name: name.to_string(),
        sets: sets
            .iter()
            .map(|(reps, weight)| model::Set {
                reps: *reps,
                weight: *weight,
            })
            .collect(),
    }
}

impl domain::UserRepository for MemoryStore {
    async fn read_users(&self) -> Result<Vec<domain::User>, ReadError> {
        let documents = self.documents.read().await;
        documents
            .users
            .values()
            .cloned()
            .map(|u| domain::User::try_from(u).map_err(|err| ReadError::Other(err.into())))
            .collect()
    }

    async fn read_user(&self, id: domain::UserID) -> Result<domain::User, ReadError> {
        let documents = self.documents.read().await;
        let user = documents.users.get(&*id).ok_or(ReadError::NotFound)?;
        domain::User::try_from(user.clone()).map_err(|err| ReadError::Other(err.into()))
    }

    async fn create_user(
        &self,
        name: domain::Name,
        email: domain::EmailAddress,
    ) -> Result<domain::User, CreateError> {
        let mut documents = self.documents.write().await;
        let email = email.to_string();
        if documents.users.values().any(|u| u.email == email) {
            return Err(CreateError::Conflict);
        }
        let user = model::User {
            id: Uuid::new_v4(),
            name: name.to_string(),
            email,
            created_at: Utc::now(),
        };
        documents.users.insert(user.id, user.clone());
        drop(documents);
        domain::User::try_from(user).map_err(|err| CreateError::Other(err.into()))
    }

    async fn modify_user(
        &self,
        id: domain::UserID,
        name: Option<domain::Name>,
        email: Option<domain::EmailAddress>,
    ) -> Result<domain::User, UpdateError> {
        let mut documents = self.documents.write().await;
        let email = email.map(|e| e.to_string());
        if let Some(ref email) = email {
            if documents
                .users
                .values()
                .any(|u| u.id != *id && u.email == *email)
            {
                return Err(UpdateError::Conflict);
            }
        }
        let user = documents.users.get_mut(&*id).ok_or(UpdateError::NotFound)?;
        if let Some(name) = name {
            user.name = name.to_string();
        }
        if let Some(email) = email {
            user.email = email;
        }
        let user = user.clone();
        drop(documents);
        domain::User::try_from(user).map_err(|err| UpdateError::Other(err.into()))
    }

    async fn delete_user(&self, id: domain::UserID) -> Result<domain::UserID, DeleteError> {
        let mut documents = self.documents.write().await;
        documents
            .users
            .remove(&*id)
            .map(|_| id)
            .ok_or(DeleteError::NotFound)
    }
}

impl domain::WorkoutRepository for MemoryStore {
    async fn read_workouts(
        &self,
        user_id: domain::UserID,
    ) -> Result<Vec<domain::Workout>, ReadError> {
        let documents = self.documents.read().await;
        documents
            .workouts
            .values()
            .filter(|w| w.user_id == *user_id)
            .cloned()
            .map(|w| domain::Workout::try_from(w).map_err(|err| ReadError::Other(err.into())))
            .collect()
    }

    async fn read_workout(&self, id: domain::WorkoutID) -> Result<domain::Workout, ReadError> {
        let documents = self.documents.read().await;
        let workout = documents.workouts.get(&*id).ok_or(ReadError::NotFound)?;
        domain::Workout::try_from(workout.clone()).map_err(|err| ReadError::Other(err.into()))
    }

    async fn create_workout(
        &self,
        user_id: domain::UserID,
        title: Option<String>,
        date: NaiveDate,
        exercises: Vec<domain::Exercise>,
    ) -> Result<domain::Workout, CreateError> {
        let mut documents = self.documents.write().await;
        let workout = model::Workout {
            id: Uuid::new_v4(),
            user_id: *user_id,
            title,
            date,
            exercises: exercises.iter().map(model::Exercise::from).collect(),
            created_at: Utc::now(),
        };
        documents.workouts.insert(workout.id, workout.clone());
        drop(documents);
        domain::Workout::try_from(workout).map_err(|err| CreateError::Other(err.into()))
    }

    async fn modify_workout(
        &self,
        id: domain::WorkoutID,
        title: Option<Option<String>>,
        date: Option<NaiveDate>,
        exercises: Option<Vec<domain::Exercise>>,
    ) -> Result<domain::Workout, UpdateError> {
        let mut documents = self.documents.write().await;
        let workout = documents
            .workouts
            .get_mut(&*id)
            .ok_or(UpdateError::NotFound)?;
        if let Some(title) = title {
            workout.title = title;
        }
        if let Some(date) = date {
            workout.date = date;
        }
        if let Some(exercises) = exercises {
            workout.exercises = exercises.iter().map(model::Exercise::from).collect();
        }
        let workout = workout.clone();
        drop(documents);
        domain::Workout::try_from(workout).map_err(|err| UpdateError::Other(err.into()))
    }

    async fn delete_workout(&self, id: domain::WorkoutID) -> Result<domain::WorkoutID, DeleteError> {
        let mut documents = self.documents.write().await;
        documents
            .workouts
            .remove(&*id)
            .map(|_| id)
            .ok_or(DeleteError::NotFound)
    }

    async fn delete_workouts_by_user(
        &self,
        user_id: domain::UserID,
    ) -> Result<Vec<domain::WorkoutID>, DeleteError> {
        let mut documents = self.documents.write().await;
        let ids = documents
            .workouts
            .values()
            .filter(|w| w.user_id == *user_id)
            .map(|w| w.id)
            .collect::<Vec<_>>();
        for id in &ids {
            documents.workouts.remove(id);
        }
        Ok(ids.into_iter().map(domain::WorkoutID::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;
    use gymlog_domain::{
        CreateError, DeleteError, ReadError, Service, UpdateError, UserService, ValidationError,
        WorkoutService,
    };
    use pretty_assertions::assert_eq;

    use crate::tests::data::{date, draft};

    use super::*;

    fn service() -> Service<MemoryStore> {
        Service::new(MemoryStore::new())
    }

    #[tokio::test]
    async fn test_create_and_get_workout() {
        let service = service();
        let created = service
            .create_workout(
                1.into(),
                Some(String::from("Leg Day")),
                date(2024, 11, 9),
                vec![draft("Squats", &[(5, 100.0)])],
            )
            .await
            .unwrap();
        assert!(!created.id.is_nil());

        let fetched = service.get_workout(created.id).await.unwrap();
        assert_eq!(fetched, created);
        assert_approx_eq!(fetched.exercises[0].volume(), 500.0);
    }

    #[tokio::test]
    async fn test_create_workout_filters_invalid_exercises() {
        let service = service();
        let created = service
            .create_workout(
                1.into(),
                None,
                date(2024, 11, 9),
                vec![
                    draft("Squats", &[(5, 100.0)]),
                    draft("", &[(5, 100.0)]),
                    draft("Rows", &[(0, 60.0)]),
                ],
            )
            .await
            .unwrap();
        assert_eq!(created.exercises.len(), 1);
        assert_eq!(created.exercises[0].name.to_string(), "Squats");
    }

    #[tokio::test]
    async fn test_create_workout_without_valid_exercises_is_rejected() {
        let service = service();
        let result = service
            .create_workout(
                1.into(),
                None,
                date(2024, 11, 9),
                vec![draft("", &[(5, 100.0)]), draft("Rows", &[(0, 60.0)])],
            )
            .await;
        assert!(matches!(
            result,
            Err(CreateError::Validation(ValidationError::NoValidExercises))
        ));
        assert_eq!(service.get_workouts(1.into()).await.unwrap(), vec![]);
    }

    #[tokio::test]
    async fn test_modify_workout_title_only_keeps_other_fields() {
        let service = service();
        let created = service
            .create_workout(
                1.into(),
                Some(String::from("Leg Day")),
                date(2024, 11, 9),
                vec![draft("Squats", &[(5, 100.0)])],
            )
            .await
            .unwrap();

        let updated = service
            .modify_workout(created.id, Some(String::from("Heavy Legs")), None, None)
            .await
            .unwrap();
        assert_eq!(updated.title, Some(String::from("Heavy Legs")));
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.date, created.date);
        assert_eq!(updated.exercises, created.exercises);
        assert_eq!(updated.created_at, created.created_at);
    }

    #[tokio::test]
    async fn test_modify_workout_with_empty_title_clears_it() {
        let service = service();
        let created = service
            .create_workout(
                1.into(),
                Some(String::from("Leg Day")),
                date(2024, 11, 9),
                vec![draft("Squats", &[(5, 100.0)])],
            )
            .await
            .unwrap();

        let updated = service
            .modify_workout(created.id, Some(String::new()), None, None)
            .await
            .unwrap();
        assert_eq!(updated.title, None);
    }

    #[tokio::test]
    async fn test_modify_workout_without_valid_exercises_is_rejected() {
        let service = service();
        let created = service
            .create_workout(
                1.into(),
                None,
                date(2024, 11, 9),
                vec![draft("Squats", &[(5, 100.0)])],
            )
            .await
            .unwrap();

        let result = service
            .modify_workout(created.id, None, None, Some(vec![draft("", &[(5, 100.0)])]))
            .await;
        assert!(matches!(
            result,
            Err(UpdateError::Validation(ValidationError::NoValidExercises))
        ));
        assert_eq!(
            service.get_workout(created.id).await.unwrap().exercises,
            created.exercises
        );
    }

    #[tokio::test]
    async fn test_modify_unknown_workout_is_not_found() {
        let result = service()
            .modify_workout(1.into(), Some(String::from("A")), None, None)
            .await;
        assert!(matches!(result, Err(UpdateError::NotFound)));
    }

    #[tokio::test]
    async fn test_delete_workout() {
        let service = service();
        let created = service
            .create_workout(
                1.into(),
                None,
                date(2024, 11, 9),
                vec![draft("Squats", &[(5, 100.0)])],
            )
            .await
            .unwrap();

        assert_eq!(service.delete_workout(created.id).await.unwrap(), created.id);
        assert!(matches!(
            service.delete_workout(created.id).await,
            Err(DeleteError::NotFound)
        ));
        assert!(matches!(
            service.get_workout(created.id).await,
            Err(ReadError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_get_workouts_for_unknown_user_is_empty() {
        assert_eq!(service().get_workouts(1.into()).await.unwrap(), vec![]);
    }

    #[tokio::test]
    async fn test_get_workouts_sorted_by_date_descending() {
        let service = service();
        for day in [9, 11, 10] {
            service
                .create_workout(
                    1.into(),
                    None,
                    date(2024, 11, day),
                    vec![draft("Squats", &[(5, 100.0)])],
                )
                .await
                .unwrap();
        }
        let workouts = service.get_workouts(1.into()).await.unwrap();
        assert_eq!(
            workouts.iter().map(|w| w.date).collect::<Vec<_>>(),
            vec![date(2024, 11, 11), date(2024, 11, 10), date(2024, 11, 9)]
        );
    }

    #[tokio::test]
    async fn test_get_workouts_only_contains_workouts_of_user() {
        let service = service();
        service
            .create_workout(
                1.into(),
                None,
                date(2024, 11, 9),
                vec![draft("Squats", &[(5, 100.0)])],
            )
            .await
            .unwrap();
        service
            .create_workout(
                2.into(),
                None,
                date(2024, 11, 10),
                vec![draft("Rows", &[(8, 60.0)])],
            )
            .await
            .unwrap();
        let workouts = service.get_workouts(1.into()).await.unwrap();
        assert_eq!(workouts.len(), 1);
        assert_eq!(workouts[0].user_id, 1.into());
    }

    #[tokio::test]
    async fn test_create_user_with_duplicate_email_is_rejected() {
        let service = service();
        service
            .create_user(
                domain::Name::new("Alice").unwrap(),
                domain::EmailAddress::new("alice@example.com").unwrap(),
            )
            .await
            .unwrap();
        let result = service
            .create_user(
                domain::Name::new("Bob").unwrap(),
                domain::EmailAddress::new("alice@example.com").unwrap(),
            )
            .await;
        assert!(matches!(result, Err(CreateError::Conflict)));
    }

    #[tokio::test]
    async fn test_validate_user_email() {
        let service = service();
        let user = service
            .create_user(
                domain::Name::new("Alice").unwrap(),
                domain::EmailAddress::new("alice@example.com").unwrap(),
            )
            .await
            .unwrap();

        assert!(
            service
                .validate_user_email("bob@example.com", domain::UserID::nil())
                .await
                .is_ok()
        );
        assert!(matches!(
            service
                .validate_user_email("alice@example.com", domain::UserID::nil())
                .await,
            Err(ValidationError::Conflict(field)) if field == "email"
        ));
        // A user may keep their own address.
        assert!(
            service
                .validate_user_email("alice@example.com", user.id)
                .await
                .is_ok()
        );
    }

    #[tokio::test]
    async fn test_delete_user_cascades_to_workouts() {
        let service = service();
        let user = service
            .create_user(
                domain::Name::new("Alice").unwrap(),
                domain::EmailAddress::new("alice@example.com").unwrap(),
            )
            .await
            .unwrap();
        service
            .create_workout(
                user.id,
                None,
                date(2024, 11, 9),
                vec![draft("Squats", &[(5, 100.0)])],
            )
            .await
            .unwrap();

        assert_eq!(service.delete_user(user.id).await.unwrap(), user.id);
        assert_eq!(service.get_workouts(user.id).await.unwrap(), vec![]);
        assert!(matches!(
            service.get_user(user.id).await,
            Err(ReadError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_demo_data() {
        let service = Service::new(MemoryStore::with_demo_data());
        let users = service.get_users().await.unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].email.to_string(), "demo@gymtracker.com");

        let workouts = service.get_workouts(users[0].id).await.unwrap();
        assert_eq!(workouts.len(), 3);
        assert_eq!(workouts[0].title, Some(String::from("Upper Body Strength")));
    }
}
