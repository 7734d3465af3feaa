use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use chrono::Utc;
use futures::join;
use shared::{
    domain::{Department, Employee, EmployeeId, Project, ProjectId, Team, TeamId},
    error::OperationError,
    protocol::TeamQuery,
};
use tokio::{
    sync::{broadcast, Mutex},
    task::JoinHandle,
};
use tracing::{info, warn};
use uuid::Uuid;

pub mod gateway;
pub mod member_picker;
pub mod pointer;
pub mod quick_project;
pub mod search;
pub mod team_form;

pub use gateway::{AdminGateway, CredentialStore, HttpGateway};
pub use member_picker::MemberPicker;
pub use pointer::{PointerDown, PointerEvents, RegionId};
pub use quick_project::QuickProjectDraft;
pub use team_form::{FormMode, FormPhase, TeamDraft, TeamForm};

pub const SUCCESS_BANNER_TTL: Duration = Duration::from_secs(5);
const PAGE_EVENT_CAPACITY: usize = 1024;
const DELETE_TEAM_PROMPT: &str = "Are you sure you want to delete this team?";

#[async_trait]
pub trait ConfirmationPrompt: Send + Sync {
    async fn confirm(&self, prompt: &str) -> bool;
}

pub struct MissingConfirmationPrompt;

#[async_trait]
impl ConfirmationPrompt for MissingConfirmationPrompt {
    async fn confirm(&self, prompt: &str) -> bool {
        warn!("no confirmation prompt wired; declining: {prompt}");
        false
    }
}

#[derive(Debug, Clone)]
pub enum PageEvent {
    LoadFinished,
    TeamsRefreshed,
    ProjectsRefreshed,
    ErrorShown(String),
    ErrorDismissed,
    SuccessShown(String),
    SuccessCleared,
    FormOpened(FormMode),
    FormClosed,
    PickerClosed,
    QuickProjectOpened,
    QuickProjectClosed,
    ProjectLinked(ProjectId),
    TeamDeleted(TeamId),
}

#[derive(Debug, Clone)]
pub struct ResourceSlice<T> {
    pub items: Vec<T>,
    pub error: Option<String>,
}

impl<T> Default for ResourceSlice<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            error: None,
        }
    }
}

impl<T> ResourceSlice<T> {
    fn apply(&mut self, outcome: Result<Vec<T>, OperationError>) {
        match outcome {
            Ok(items) => {
                self.items = items;
                self.error = None;
            }
            Err(err) => {
                self.error = Some(err.message().to_string());
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct PageOptions {
    pub project_support: bool,
}

impl Default for PageOptions {
    fn default() -> Self {
        Self {
            project_support: true,
        }
    }
}

struct PageState {
    // Bumped by teardown; stale continuations see the mismatch and drop
    // their update.
    epoch: u64,
    loading: bool,
    teams: ResourceSlice<Team>,
    employees: ResourceSlice<Employee>,
    departments: ResourceSlice<Department>,
    projects: ResourceSlice<Project>,
    member_search: String,
    error: Option<String>,
    success: Option<String>,
    success_serial: u64,
    form: Option<TeamForm>,
    quick_open: bool,
    quick_draft: QuickProjectDraft,
    picker_watcher: Option<JoinHandle<()>>,
}

#[derive(Debug, Clone)]
pub struct PageSnapshot {
    pub loading: bool,
    pub teams: ResourceSlice<Team>,
    pub employees: ResourceSlice<Employee>,
    pub departments: ResourceSlice<Department>,
    pub projects: ResourceSlice<Project>,
    pub member_search: String,
    pub error: Option<String>,
    pub success: Option<String>,
    pub form: Option<FormSnapshot>,
    pub quick_open: bool,
    pub quick_draft: QuickProjectDraft,
}

#[derive(Debug, Clone)]
pub struct FormSnapshot {
    pub mode: FormMode,
    pub phase: FormPhase,
    pub draft: TeamDraft,
    pub picker_region: RegionId,
    pub picker_open: bool,
}

impl PageSnapshot {
    pub fn visible_employees(&self) -> Vec<&Employee> {
        search::filter_employees(&self.employees.items, &self.member_search)
    }
}

/// State orchestrator behind the team-management screen.
pub struct TeamsPage {
    gateway: Arc<dyn AdminGateway>,
    confirm: Arc<dyn ConfirmationPrompt>,
    pointer: PointerEvents,
    options: PageOptions,
    session: Uuid,
    inner: Mutex<PageState>,
    events: broadcast::Sender<PageEvent>,
}

impl TeamsPage {
    pub fn new(gateway: Arc<dyn AdminGateway>) -> Arc<Self> {
        Self::new_with_dependencies(
            gateway,
            Arc::new(MissingConfirmationPrompt),
            PointerEvents::new(),
            PageOptions::default(),
        )
    }

    pub fn new_with_dependencies(
        gateway: Arc<dyn AdminGateway>,
        confirm: Arc<dyn ConfirmationPrompt>,
        pointer: PointerEvents,
        options: PageOptions,
    ) -> Arc<Self> {
        let (events, _) = broadcast::channel(PAGE_EVENT_CAPACITY);
        Arc::new(Self {
            gateway,
            confirm,
            pointer,
            options,
            session: Uuid::new_v4(),
            inner: Mutex::new(PageState {
                epoch: 0,
                loading: false,
                teams: ResourceSlice::default(),
                employees: ResourceSlice::default(),
                departments: ResourceSlice::default(),
                projects: ResourceSlice::default(),
                member_search: String::new(),
                error: None,
                success: None,
                success_serial: 0,
                form: None,
                quick_open: false,
                quick_draft: QuickProjectDraft::default_for(Utc::now().date_naive()),
                picker_watcher: None,
            }),
            events,
        })
    }

    pub fn pointer_events(&self) -> PointerEvents {
        self.pointer.clone()
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<PageEvent> {
        self.events.subscribe()
    }

    pub async fn snapshot(&self) -> PageSnapshot {
        let guard = self.inner.lock().await;
        PageSnapshot {
            loading: guard.loading,
            teams: guard.teams.clone(),
            employees: guard.employees.clone(),
            departments: guard.departments.clone(),
            projects: guard.projects.clone(),
            member_search: guard.member_search.clone(),
            error: guard.error.clone(),
            success: guard.success.clone(),
            form: guard.form.as_ref().map(|form| FormSnapshot {
                mode: form.mode.clone(),
                phase: form.phase,
                draft: form.draft.clone(),
                picker_region: form.picker.region(),
                picker_open: form.picker.is_open(),
            }),
            quick_open: guard.quick_open,
            quick_draft: guard.quick_draft.clone(),
        }
    }

    pub async fn load_all(&self) {
        let epoch = {
            let mut guard = self.inner.lock().await;
            guard.loading = true;
            guard.epoch
        };
        info!(session = %self.session, "teams: loading page data");

        let query = TeamQuery::default();
        let (teams, employees, departments, projects) = join!(
            self.gateway.list_teams(&query),
            self.gateway.list_employees(),
            self.gateway.list_departments(),
            self.gateway.list_projects(),
        );

        {
            let mut guard = self.inner.lock().await;
            if guard.epoch != epoch {
                info!(session = %self.session, "teams: dropping load results for torn-down page");
                return;
            }
            guard.teams.apply(teams);
            guard.employees.apply(employees);
            guard.departments.apply(departments);
            guard.projects.apply(projects);
            guard.loading = false;
        }
        self.emit(PageEvent::LoadFinished);
    }

    pub async fn refresh_teams(&self) {
        let epoch = self.inner.lock().await.epoch;
        self.refresh_teams_guarded(epoch).await;
    }

    pub async fn refresh_projects(&self) {
        let epoch = self.inner.lock().await.epoch;
        self.refresh_projects_guarded(epoch).await;
    }

    async fn refresh_teams_guarded(&self, epoch: u64) {
        let outcome = self.gateway.list_teams(&TeamQuery::default()).await;
        {
            let mut guard = self.inner.lock().await;
            if guard.epoch != epoch {
                return;
            }
            guard.teams.apply(outcome);
        }
        self.emit(PageEvent::TeamsRefreshed);
    }

    async fn refresh_projects_guarded(&self, epoch: u64) {
        let outcome = self.gateway.list_projects().await;
        {
            let mut guard = self.inner.lock().await;
            if guard.epoch != epoch {
                return;
            }
            guard.projects.apply(outcome);
        }
        self.emit(PageEvent::ProjectsRefreshed);
    }

    pub async fn set_error(&self, message: impl Into<String>) {
        let message = message.into();
        self.inner.lock().await.error = Some(message.clone());
        self.emit(PageEvent::ErrorShown(message));
    }

    pub async fn dismiss_error(&self) {
        let had_error = self.inner.lock().await.error.take().is_some();
        if had_error {
            self.emit(PageEvent::ErrorDismissed);
        }
    }

    pub async fn set_success(self: &Arc<Self>, message: impl Into<String>) {
        self.set_success_for(message, SUCCESS_BANNER_TTL).await;
    }

    pub async fn set_success_for(self: &Arc<Self>, message: impl Into<String>, ttl: Duration) {
        let message = message.into();
        let (serial, epoch) = {
            let mut guard = self.inner.lock().await;
            guard.success_serial += 1;
            guard.success = Some(message.clone());
            (guard.success_serial, guard.epoch)
        };
        self.emit(PageEvent::SuccessShown(message));

        let page = Arc::clone(self);
        tokio::spawn(async move {
            tokio::time::sleep(ttl).await;
            {
                let mut guard = page.inner.lock().await;
                if guard.epoch != epoch || guard.success_serial != serial {
                    return;
                }
                guard.success = None;
            }
            page.emit(PageEvent::SuccessCleared);
        });
    }

    pub async fn set_member_search(&self, query: impl Into<String>) {
        self.inner.lock().await.member_search = query.into();
    }

    pub async fn open_create_form(&self) {
        {
            let mut guard = self.inner.lock().await;
            if let Some(watcher) = guard.picker_watcher.take() {
                watcher.abort();
            }
            guard.form = Some(TeamForm::create());
        }
        info!(session = %self.session, "teams: create form opened");
        self.emit(PageEvent::FormOpened(FormMode::Create));
    }

    pub async fn open_edit_form(&self, team_id: &TeamId) {
        {
            let mut guard = self.inner.lock().await;
            let Some(team) = guard
                .teams
                .items
                .iter()
                .find(|team| &team.id == team_id)
                .cloned()
            else {
                warn!(session = %self.session, team_id = %team_id.0, "teams: edit requested for unknown team");
                return;
            };
            if let Some(watcher) = guard.picker_watcher.take() {
                watcher.abort();
            }
            guard.form = Some(TeamForm::edit(&team));
        }
        info!(session = %self.session, team_id = %team_id.0, "teams: edit form opened");
        self.emit(PageEvent::FormOpened(FormMode::Edit {
            team_id: team_id.clone(),
        }));
    }

    pub async fn close_form(&self) {
        let (closed, quick_closed) = {
            let mut guard = self.inner.lock().await;
            if let Some(watcher) = guard.picker_watcher.take() {
                watcher.abort();
            }
            let quick_closed = guard.quick_open;
            if quick_closed {
                guard.quick_open = false;
                guard.quick_draft = QuickProjectDraft::default_for(Utc::now().date_naive());
            }
            (guard.form.take().is_some(), quick_closed)
        };
        if quick_closed {
            self.emit(PageEvent::QuickProjectClosed);
        }
        if closed {
            self.emit(PageEvent::FormClosed);
        }
    }

    pub async fn edit_draft(&self, edit: impl FnOnce(&mut TeamDraft)) {
        let mut guard = self.inner.lock().await;
        if let Some(form) = guard.form.as_mut() {
            edit(&mut form.draft);
        }
    }

    pub async fn toggle_member_picker(self: &Arc<Self>) {
        let mut guard = self.inner.lock().await;
        let epoch = guard.epoch;
        let Some(form) = guard.form.as_mut() else {
            return;
        };
        if form.picker.toggle() {
            // Subscribing under the lock means no press can slip between
            // the open and the watch.
            let region = form.picker.region();
            let presses = self.pointer.subscribe();
            let watcher = self.spawn_picker_watcher(presses, region, epoch);
            if let Some(previous) = guard.picker_watcher.replace(watcher) {
                previous.abort();
            }
        } else if let Some(watcher) = guard.picker_watcher.take() {
            watcher.abort();
        }
    }

    pub async fn picker_option_click(&self, employee_id: &EmployeeId) {
        let mut guard = self.inner.lock().await;
        if let Some(form) = guard.form.as_mut() {
            if form.picker.is_open() {
                form.draft.toggle_member(employee_id);
            }
        }
    }

    pub async fn remove_member_chip(&self, employee_id: &EmployeeId) {
        let mut guard = self.inner.lock().await;
        if let Some(form) = guard.form.as_mut() {
            form.draft.remove_member(employee_id);
        }
    }

    pub async fn submit_team_form(self: &Arc<Self>) {
        let validated = {
            let mut guard = self.inner.lock().await;
            let epoch = guard.epoch;
            let project_support = self.options.project_support;
            // The quick-create modal owns the screen while it is up.
            if guard.quick_open {
                return;
            }
            let Some(form) = guard.form.as_mut() else {
                return;
            };
            if form.phase == FormPhase::Submitting {
                return;
            }
            match form.draft.validated_payload(project_support) {
                Ok(payload) => {
                    form.phase = FormPhase::Submitting;
                    Ok((form.mode.clone(), payload, epoch))
                }
                Err(err) => Err(err),
            }
        };
        let (mode, payload, epoch) = match validated {
            Ok(validated) => validated,
            Err(err) => {
                self.set_error(err.message()).await;
                return;
            }
        };

        info!(session = %self.session, mode = ?mode, "teams: submitting team form");
        let result = match &mode {
            FormMode::Create => self.gateway.create_team(&payload).await.map(|_| ()),
            FormMode::Edit { team_id } => {
                self.gateway.update_team(team_id, &payload).await.map(|_| ())
            }
        };

        match result {
            Ok(()) => {
                self.refresh_teams_guarded(epoch).await;
                {
                    let mut guard = self.inner.lock().await;
                    if guard.epoch != epoch {
                        return;
                    }
                    if let Some(watcher) = guard.picker_watcher.take() {
                        watcher.abort();
                    }
                    guard.form = None;
                }
                self.emit(PageEvent::FormClosed);
            }
            Err(err) => {
                let message = err.message().to_string();
                {
                    let mut guard = self.inner.lock().await;
                    if guard.epoch != epoch {
                        return;
                    }
                    if let Some(form) = guard.form.as_mut() {
                        form.phase = FormPhase::Editing;
                    }
                    guard.error = Some(message.clone());
                }
                self.emit(PageEvent::ErrorShown(message));
            }
        }
    }

    pub async fn delete_team(&self, team_id: &TeamId) {
        let epoch = self.inner.lock().await.epoch;
        if !self.confirm.confirm(DELETE_TEAM_PROMPT).await {
            info!(session = %self.session, team_id = %team_id.0, "teams: delete not confirmed");
            return;
        }
        match self.gateway.delete_team(team_id).await {
            Ok(()) => {
                info!(session = %self.session, team_id = %team_id.0, "teams: team deleted");
                self.emit(PageEvent::TeamDeleted(team_id.clone()));
                self.refresh_teams_guarded(epoch).await;
            }
            Err(err) => {
                let message = err.message().to_string();
                {
                    let mut guard = self.inner.lock().await;
                    if guard.epoch != epoch {
                        return;
                    }
                    guard.error = Some(message.clone());
                }
                self.emit(PageEvent::ErrorShown(message));
            }
        }
    }

    pub async fn open_quick_project(&self) {
        {
            let mut guard = self.inner.lock().await;
            if !self.options.project_support {
                return;
            }
            let editing = guard
                .form
                .as_ref()
                .is_some_and(|form| form.phase == FormPhase::Editing);
            if !editing || guard.quick_open {
                return;
            }
            guard.quick_open = true;
        }
        self.emit(PageEvent::QuickProjectOpened);
    }

    pub async fn close_quick_project(&self) {
        let closed = {
            let mut guard = self.inner.lock().await;
            if !guard.quick_open {
                false
            } else {
                guard.quick_open = false;
                guard.quick_draft = QuickProjectDraft::default_for(Utc::now().date_naive());
                true
            }
        };
        if closed {
            self.emit(PageEvent::QuickProjectClosed);
        }
    }

    pub async fn edit_quick_draft(&self, edit: impl FnOnce(&mut QuickProjectDraft)) {
        let mut guard = self.inner.lock().await;
        if guard.quick_open {
            edit(&mut guard.quick_draft);
        }
    }

    pub async fn submit_quick_project(self: &Arc<Self>) {
        let validated = {
            let guard = self.inner.lock().await;
            if !guard.quick_open {
                return;
            }
            guard
                .quick_draft
                .validated_payload()
                .map(|payload| (payload, guard.epoch))
        };
        let (payload, epoch) = match validated {
            Ok(validated) => validated,
            Err(err) => {
                self.set_error(err.message()).await;
                return;
            }
        };

        info!(session = %self.session, project = %payload.name, "teams: creating project via quick flow");
        match self.gateway.create_project(&payload).await {
            Ok(created) => {
                self.refresh_projects_guarded(epoch).await;
                let (linked, banner) = {
                    let mut guard = self.inner.lock().await;
                    if guard.epoch != epoch {
                        return;
                    }
                    let mut linked = None;
                    let mut banner = None;
                    if let Some(project) = created {
                        if let Some(form) = guard.form.as_mut() {
                            form.draft.project = Some(project.id.clone());
                            linked = Some(project.id.clone());
                        }
                        banner = Some(format!(
                            "Project \"{}\" created successfully and selected!",
                            project.name
                        ));
                    }
                    guard.quick_open = false;
                    guard.quick_draft = QuickProjectDraft::default_for(Utc::now().date_naive());
                    (linked, banner)
                };
                self.emit(PageEvent::QuickProjectClosed);
                if let Some(project_id) = linked {
                    self.emit(PageEvent::ProjectLinked(project_id));
                }
                if let Some(message) = banner {
                    self.set_success(message).await;
                }
            }
            Err(err) => {
                let message = err.message().to_string();
                {
                    let mut guard = self.inner.lock().await;
                    if guard.epoch != epoch {
                        return;
                    }
                    guard.error = Some(message.clone());
                }
                self.emit(PageEvent::ErrorShown(message));
            }
        }
    }

    pub async fn teardown(&self) {
        let mut guard = self.inner.lock().await;
        guard.epoch += 1;
        if let Some(watcher) = guard.picker_watcher.take() {
            watcher.abort();
        }
        info!(session = %self.session, "teams: page torn down");
    }

    fn emit(&self, event: PageEvent) {
        let _ = self.events.send(event);
    }

    fn spawn_picker_watcher(
        self: &Arc<Self>,
        mut presses: broadcast::Receiver<PointerDown>,
        region: RegionId,
        epoch: u64,
    ) -> JoinHandle<()> {
        let page = Arc::clone(self);
        tokio::spawn(async move {
            while let Ok(press) = presses.recv().await {
                let closed = {
                    let mut guard = page.inner.lock().await;
                    if guard.epoch != epoch {
                        break;
                    }
                    let Some(form) = guard.form.as_mut() else {
                        break;
                    };
                    if form.picker.region() != region {
                        break;
                    }
                    if form.picker.observe_pointer(&press) {
                        // This task's own handle; dropping it merely detaches.
                        guard.picker_watcher = None;
                        true
                    } else {
                        false
                    }
                };
                if closed {
                    page.emit(PageEvent::PickerClosed);
                    break;
                }
            }
        })
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
