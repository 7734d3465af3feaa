use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Client, Method};
use serde::de::{DeserializeOwned, IgnoredAny};
use shared::{
    domain::{Department, Employee, EmployeeId, Event, EventId, Project, Team, TeamId},
    error::OperationError,
    protocol::{
        Envelope, EventWritePayload, MemberWritePayload, ProjectWritePayload, TeamQuery,
        TeamWritePayload,
    },
};
use tokio::sync::RwLock;

const FETCH_TEAMS_FALLBACK: &str = "Failed to fetch teams";
const CREATE_TEAM_FALLBACK: &str = "Failed to create team";
const UPDATE_TEAM_FALLBACK: &str = "Failed to update team";
const DELETE_TEAM_FALLBACK: &str = "Failed to delete team";
const ADD_MEMBER_FALLBACK: &str = "Failed to add team member";
const REMOVE_MEMBER_FALLBACK: &str = "Failed to remove team member";
const FETCH_EMPLOYEES_FALLBACK: &str = "Failed to fetch employees";
const FETCH_DEPARTMENTS_FALLBACK: &str = "Failed to fetch departments";
const FETCH_PROJECTS_FALLBACK: &str = "Failed to fetch projects";
const CREATE_PROJECT_FALLBACK: &str = "Failed to create project";
const FETCH_EVENTS_FALLBACK: &str = "Failed to fetch upcoming events";
const CREATE_EVENT_FALLBACK: &str = "Failed to create event";
const DELETE_EVENT_FALLBACK: &str = "Failed to delete event";

#[derive(Debug, Clone, Default)]
pub struct CredentialStore {
    token: Arc<RwLock<Option<String>>>,
}

impl CredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn set_token(&self, token: impl Into<String>) {
        *self.token.write().await = Some(token.into());
    }

    pub async fn clear(&self) {
        *self.token.write().await = None;
    }

    pub async fn token(&self) -> Option<String> {
        self.token.read().await.clone()
    }
}

#[async_trait]
pub trait AdminGateway: Send + Sync {
    async fn list_teams(&self, query: &TeamQuery) -> Result<Vec<Team>, OperationError>;
    async fn create_team(&self, payload: &TeamWritePayload)
        -> Result<Option<Team>, OperationError>;
    async fn update_team(
        &self,
        team_id: &TeamId,
        payload: &TeamWritePayload,
    ) -> Result<Option<Team>, OperationError>;
    async fn delete_team(&self, team_id: &TeamId) -> Result<(), OperationError>;
    async fn add_team_member(
        &self,
        team_id: &TeamId,
        employee_id: &EmployeeId,
    ) -> Result<Option<Team>, OperationError>;
    async fn remove_team_member(
        &self,
        team_id: &TeamId,
        employee_id: &EmployeeId,
    ) -> Result<Option<Team>, OperationError>;
    async fn list_employees(&self) -> Result<Vec<Employee>, OperationError>;
    async fn list_departments(&self) -> Result<Vec<Department>, OperationError>;
    async fn list_projects(&self) -> Result<Vec<Project>, OperationError>;
    async fn create_project(
        &self,
        payload: &ProjectWritePayload,
    ) -> Result<Option<Project>, OperationError>;
    async fn upcoming_events(&self, limit: u32) -> Result<Vec<Event>, OperationError>;
    async fn create_event(
        &self,
        payload: &EventWritePayload,
    ) -> Result<Option<Event>, OperationError>;
    async fn delete_event(&self, event_id: &EventId) -> Result<(), OperationError>;
}

pub struct HttpGateway {
    http: Client,
    base_url: String,
    credentials: CredentialStore,
}

impl HttpGateway {
    pub fn new(base_url: impl Into<String>, credentials: CredentialStore) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into(),
            credentials,
        }
    }

    async fn request(&self, method: Method, url: String) -> reqwest::RequestBuilder {
        let mut builder = self.http.request(method, url);
        if let Some(token) = self.credentials.token().await {
            builder = builder.bearer_auth(token);
        }
        builder
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        fallback: &str,
    ) -> Result<Option<T>, OperationError> {
        let response = request
            .send()
            .await
            .map_err(|err| OperationError::fault(err.to_string()))?;
        // Failure statuses still carry envelopes, so decode the body
        // regardless of status.
        let envelope: Envelope<T> = response
            .json()
            .await
            .map_err(|err| OperationError::fault(err.to_string()))?;
        envelope.into_result(fallback)
    }
}

#[async_trait]
impl AdminGateway for HttpGateway {
    async fn list_teams(&self, query: &TeamQuery) -> Result<Vec<Team>, OperationError> {
        let request = self
            .request(Method::GET, format!("{}/teams", self.base_url))
            .await
            .query(query);
        let data = self.send(request, FETCH_TEAMS_FALLBACK).await?;
        Ok(data.unwrap_or_default())
    }

    async fn create_team(
        &self,
        payload: &TeamWritePayload,
    ) -> Result<Option<Team>, OperationError> {
        let request = self
            .request(Method::POST, format!("{}/teams", self.base_url))
            .await
            .json(payload);
        self.send(request, CREATE_TEAM_FALLBACK).await
    }

    async fn update_team(
        &self,
        team_id: &TeamId,
        payload: &TeamWritePayload,
    ) -> Result<Option<Team>, OperationError> {
        let request = self
            .request(
                Method::PUT,
                format!("{}/teams/{}", self.base_url, team_id.0),
            )
            .await
            .json(payload);
        self.send(request, UPDATE_TEAM_FALLBACK).await
    }

    async fn delete_team(&self, team_id: &TeamId) -> Result<(), OperationError> {
        let request = self
            .request(
                Method::DELETE,
                format!("{}/teams/{}", self.base_url, team_id.0),
            )
            .await;
        self.send::<IgnoredAny>(request, DELETE_TEAM_FALLBACK)
            .await?;
        Ok(())
    }

    async fn add_team_member(
        &self,
        team_id: &TeamId,
        employee_id: &EmployeeId,
    ) -> Result<Option<Team>, OperationError> {
        let request = self
            .request(
                Method::PUT,
                format!("{}/teams/{}/members", self.base_url, team_id.0),
            )
            .await
            .json(&MemberWritePayload {
                employee_id: employee_id.clone(),
            });
        self.send(request, ADD_MEMBER_FALLBACK).await
    }

    async fn remove_team_member(
        &self,
        team_id: &TeamId,
        employee_id: &EmployeeId,
    ) -> Result<Option<Team>, OperationError> {
        let request = self
            .request(
                Method::DELETE,
                format!(
                    "{}/teams/{}/members/{}",
                    self.base_url, team_id.0, employee_id.0
                ),
            )
            .await;
        self.send(request, REMOVE_MEMBER_FALLBACK).await
    }

    async fn list_employees(&self) -> Result<Vec<Employee>, OperationError> {
        let request = self
            .request(Method::GET, format!("{}/employees", self.base_url))
            .await;
        let data = self.send(request, FETCH_EMPLOYEES_FALLBACK).await?;
        Ok(data.unwrap_or_default())
    }

    async fn list_departments(&self) -> Result<Vec<Department>, OperationError> {
        let request = self
            .request(Method::GET, format!("{}/departments", self.base_url))
            .await;
        let data = self.send(request, FETCH_DEPARTMENTS_FALLBACK).await?;
        Ok(data.unwrap_or_default())
    }

    async fn list_projects(&self) -> Result<Vec<Project>, OperationError> {
        let request = self
            .request(Method::GET, format!("{}/projects", self.base_url))
            .await;
        let data = self.send(request, FETCH_PROJECTS_FALLBACK).await?;
        Ok(data.unwrap_or_default())
    }

    async fn create_project(
        &self,
        payload: &ProjectWritePayload,
    ) -> Result<Option<Project>, OperationError> {
        let request = self
            .request(Method::POST, format!("{}/projects", self.base_url))
            .await
            .json(payload);
        self.send(request, CREATE_PROJECT_FALLBACK).await
    }

    async fn upcoming_events(&self, limit: u32) -> Result<Vec<Event>, OperationError> {
        let request = self
            .request(Method::GET, format!("{}/events/upcoming", self.base_url))
            .await
            .query(&[("limit", limit)]);
        let data = self.send(request, FETCH_EVENTS_FALLBACK).await?;
        Ok(data.unwrap_or_default())
    }

    async fn create_event(
        &self,
        payload: &EventWritePayload,
    ) -> Result<Option<Event>, OperationError> {
        let request = self
            .request(Method::POST, format!("{}/events", self.base_url))
            .await
            .json(payload);
        self.send(request, CREATE_EVENT_FALLBACK).await
    }

    async fn delete_event(&self, event_id: &EventId) -> Result<(), OperationError> {
        let request = self
            .request(
                Method::DELETE,
                format!("{}/events/{}", self.base_url, event_id.0),
            )
            .await;
        self.send::<IgnoredAny>(request, DELETE_EVENT_FALLBACK)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/gateway_tests.rs"]
mod tests;
