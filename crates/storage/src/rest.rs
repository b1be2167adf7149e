//! REST storage backend.
//!
//! Implements the repository traits against the HTTP API, for use by client
//! applications. Requests carry a bounded timeout so a stalled server cannot
//! suspend the caller indefinitely.

use std::time::Duration;

use chrono::NaiveDate;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde_json::{Map, json};

use gymlog_domain as domain;
use gymlog_domain::{
    CreateError, DeleteError, ReadError, StorageError, UpdateError, UserRepository,
    VersionRepository, WorkoutRepository,
};

use crate::model;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

pub struct Rest {
    client: Client,
    base_url: String,
}

impl Rest {
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

impl VersionRepository for Rest {
    async fn read_version(&self) -> Result<String, ReadError> {
        let status: model::Status = fetch(self.client.get(self.url("/"))).await?;
        Ok(status.version)
    }
}

impl UserRepository for Rest {
    async fn read_users(&self) -> Result<Vec<domain::User>, ReadError> {
        let users: Vec<model::User> = fetch(self.client.get(self.url("/api/users"))).await?;
        users
            .into_iter()
            .map(|u| domain::User::try_from(u).map_err(|err| ReadError::Other(err.into())))
            .collect()
    }

    async fn read_user(&self, id: domain::UserID) -> Result<domain::User, ReadError> {
        let user: model::User =
            fetch(self.client.get(self.url(&format!("/api/users/{}", *id)))).await?;
        domain::User::try_from(user).map_err(|err| ReadError::Other(err.into()))
    }

    async fn create_user(
        &self,
        name: domain::Name,
        email: domain::EmailAddress,
    ) -> Result<domain::User, CreateError> {
        let user: model::User = fetch(self.client.post(self.url("/api/users")).json(&json!({
            "name": name.to_string(),
            "email": email.to_string(),
        })))
        .await?;
        domain::User::try_from(user).map_err(|err| CreateError::Other(err.into()))
    }

    async fn modify_user(
        &self,
        id: domain::UserID,
        name: Option<domain::Name>,
        email: Option<domain::EmailAddress>,
    ) -> Result<domain::User, UpdateError> {
        let mut content = Map::new();
        if let Some(name) = name {
            content.insert("name".into(), json!(name.to_string()));
        }
        if let Some(email) = email {
            content.insert("email".into(), json!(email.to_string()));
        }
        let user: model::User = fetch(
            self.client
                .put(self.url(&format!("/api/users/{}", *id)))
                .json(&content),
        )
        .await?;
        domain::User::try_from(user).map_err(|err| UpdateError::Other(err.into()))
    }

    async fn delete_user(&self, id: domain::UserID) -> Result<domain::UserID, DeleteError> {
        Ok(fetch_no_content(
            self.client.delete(self.url(&format!("/api/users/{}", *id))),
            id,
        )
        .await?)
    }
}

impl WorkoutRepository for Rest {
    async fn read_workouts(
        &self,
        user_id: domain::UserID,
    ) -> Result<Vec<domain::Workout>, ReadError> {
        let workouts: Vec<model::Workout> = fetch(
            self.client
                .get(self.url(&format!("/api/workouts/{}", *user_id))),
        )
        .await?;
        workouts
            .into_iter()
            .map(|w| domain::Workout::try_from(w).map_err(|err| ReadError::Other(err.into())))
            .collect()
    }

    async fn read_workout(&self, id: domain::WorkoutID) -> Result<domain::Workout, ReadError> {
        let workout: model::Workout = fetch(
            self.client
                .get(self.url(&format!("/api/workouts/detail/{}", *id))),
        )
        .await?;
        domain::Workout::try_from(workout).map_err(|err| ReadError::Other(err.into()))
    }

    async fn create_workout(
        &self,
        user_id: domain::UserID,
        title: Option<String>,
        date: NaiveDate,
        exercises: Vec<domain::Exercise>,
    ) -> Result<domain::Workout, CreateError> {
        let workout: model::Workout =
            fetch(self.client.post(self.url("/api/workouts")).json(&json!({
                "userId": *user_id,
                "title": title,
                "date": date,
                "exercises": exercises.iter().map(model::Exercise::from).collect::<Vec<_>>(),
            })))
            .await?;
        domain::Workout::try_from(workout).map_err(|err| CreateError::Other(err.into()))
    }

    async fn modify_workout(
        &self,
        id: domain::WorkoutID,
        title: Option<Option<String>>,
        date: Option<NaiveDate>,
        exercises: Option<Vec<domain::Exercise>>,
    ) -> Result<domain::Workout, UpdateError> {
        let mut content = Map::new();
        if let Some(title) = title {
            // An empty title clears the stored one.
            content.insert("title".into(), json!(title.unwrap_or_default()));
        }
        if let Some(date) = date {
            content.insert("date".into(), json!(date));
        }
        if let Some(exercises) = exercises {
            content.insert(
                "exercises".into(),
                json!(exercises.iter().map(model::Exercise::from).collect::<Vec<_>>()),
            );
        }
        let workout: model::Workout = fetch(
            self.client
                .put(self.url(&format!("/api/workouts/{}", *id)))
                .json(&content),
        )
        .await?;
        domain::Workout::try_from(workout).map_err(|err| UpdateError::Other(err.into()))
    }

    async fn delete_workout(&self, id: domain::WorkoutID) -> Result<domain::WorkoutID, DeleteError> {
        Ok(fetch_no_content(
            self.client
                .delete(self.url(&format!("/api/workouts/{}", *id))),
            id,
        )
        .await?)
    }

    async fn delete_workouts_by_user(
        &self,
        user_id: domain::UserID,
    ) -> Result<Vec<domain::WorkoutID>, DeleteError> {
        let mut ids = vec![];
        for workout in self.read_workouts(user_id).await? {
            ids.push(self.delete_workout(workout.id).await?);
        }
        Ok(ids)
    }
}

#[derive(thiserror::Error, Debug)]
enum FetchError {
    #[error("no connection")]
    NoConnection,
    #[error("unexpected response status: {0}")]
    Status(StatusCode),
    #[error("deserialization failed: {0}")]
    Deserialize(#[source] reqwest::Error),
}

impl From<FetchError> for ReadError {
    fn from(value: FetchError) -> Self {
        match value {
            FetchError::NoConnection => StorageError::NoConnection.into(),
            FetchError::Status(status) if status == StatusCode::NOT_FOUND => ReadError::NotFound,
            err => ReadError::Other(err.into()),
        }
    }
}

impl From<FetchError> for CreateError {
    fn from(value: FetchError) -> Self {
        match value {
            FetchError::NoConnection => StorageError::NoConnection.into(),
            FetchError::Status(status) if status == StatusCode::CONFLICT => CreateError::Conflict,
            err => CreateError::Other(err.into()),
        }
    }
}

impl From<FetchError> for UpdateError {
    fn from(value: FetchError) -> Self {
        match value {
            FetchError::NoConnection => StorageError::NoConnection.into(),
            FetchError::Status(status) if status == StatusCode::NOT_FOUND => UpdateError::NotFound,
            FetchError::Status(status) if status == StatusCode::CONFLICT => UpdateError::Conflict,
            err => UpdateError::Other(err.into()),
        }
    }
}

impl From<FetchError> for DeleteError {
    fn from(value: FetchError) -> Self {
        match value {
            FetchError::NoConnection => StorageError::NoConnection.into(),
            FetchError::Status(status) if status == StatusCode::NOT_FOUND => DeleteError::NotFound,
            err => DeleteError::Other(err.into()),
        }
    }
}

async fn fetch<T>(request: RequestBuilder) -> Result<T, FetchError>
where
    T: for<'de> serde::Deserialize<'de>,
{
    match request.timeout(REQUEST_TIMEOUT).send().await {
        Ok(response) => {
            if response.status().is_success() {
                response.json::<T>().await.map_err(FetchError::Deserialize)
            } else {
                Err(FetchError::Status(response.status()))
            }
        }
        Err(_) => Err(FetchError::NoConnection),
    }
}

async fn fetch_no_content<T>(request: RequestBuilder, result: T) -> Result<T, FetchError> {
    match request.timeout(REQUEST_TIMEOUT).send().await {
        Ok(response) => {
            if response.status().is_success() {
                Ok(result)
            } else {
                Err(FetchError::Status(response.status()))
            }
        }
        Err(_) => Err(FetchError::NoConnection),
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(FetchError::NoConnection, true)]
    #[case(FetchError::Status(StatusCode::INTERNAL_SERVER_ERROR), false)]
    fn test_fetch_error_no_connection_maps_to_storage_error(
        #[case] error: FetchError,
        #[case] no_connection: bool,
    ) {
        assert_eq!(
            matches!(
                ReadError::from(error),
                ReadError::Storage(StorageError::NoConnection)
            ),
            no_connection
        );
    }

    #[test]
    fn test_fetch_error_not_found_maps_per_operation() {
        assert!(matches!(
            ReadError::from(FetchError::Status(StatusCode::NOT_FOUND)),
            ReadError::NotFound
        ));
        assert!(matches!(
            UpdateError::from(FetchError::Status(StatusCode::NOT_FOUND)),
            UpdateError::NotFound
        ));
        assert!(matches!(
            DeleteError::from(FetchError::Status(StatusCode::NOT_FOUND)),
            DeleteError::NotFound
        ));
    }

    #[test]
    fn test_fetch_error_conflict_maps_per_operation() {
        assert!(matches!(
            CreateError::from(FetchError::Status(StatusCode::CONFLICT)),
            CreateError::Conflict
        ));
        assert!(matches!(
            UpdateError::from(FetchError::Status(StatusCode::CONFLICT)),
            UpdateError::Conflict
        ));
    }
}
