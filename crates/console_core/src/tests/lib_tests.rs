use std::sync::{Arc, Mutex as StdMutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use shared::{
    domain::{
        Department, DepartmentId, Employee, EmployeeId, Event, EventId, Project, ProjectId,
        ProjectPriority, ProjectStatus, Team, TeamId,
    },
    error::OperationError,
    protocol::{EventWritePayload, ProjectWritePayload, TeamQuery, TeamWritePayload},
};
use tokio::sync::{broadcast, Notify};

use super::*;

fn department(id: &str, name: &str) -> Department {
    Department {
        id: DepartmentId::new(id),
        name: name.to_string(),
    }
}

fn employee(id: &str, first: &str, last: &str) -> Employee {
    Employee {
        id: EmployeeId::new(id),
        first_name: first.to_string(),
        last_name: last.to_string(),
        department: None,
    }
}

fn project(id: &str, name: &str) -> Project {
    Project {
        id: ProjectId::new(id),
        name: name.to_string(),
        description: String::new(),
        status: ProjectStatus::Planning,
        priority: ProjectPriority::Medium,
        progress: 0,
        manager: employee("e1", "Ada", "Lovelace"),
        department: department("d1", "Engineering"),
        start_date: Utc::now(),
        end_date: Utc::now(),
    }
}

fn team(id: &str, name: &str) -> Team {
    Team {
        id: TeamId::new(id),
        name: name.to_string(),
        description: String::new(),
        leader: employee("e1", "Ada", "Lovelace"),
        department: department("d1", "Engineering"),
        members: vec![employee("e2", "Grace", "Hopper")],
        project: None,
    }
}

// Canned collections, optional per-operation failures, and a call log
// tests assert traffic against.
#[derive(Default)]
struct StubGateway {
    teams: StdMutex<Vec<Team>>,
    employees: Vec<Employee>,
    departments: Vec<Department>,
    projects: Vec<Project>,
    employees_failure: Option<String>,
    update_team_failure: Option<String>,
    create_project_failure: Option<String>,
    created_project: Option<Project>,
    teams_fetch_entered: Option<Arc<Notify>>,
    teams_fetch_release: Option<Arc<Notify>>,
    calls: StdMutex<Vec<&'static str>>,
    team_payloads: StdMutex<Vec<TeamWritePayload>>,
    project_payloads: StdMutex<Vec<ProjectWritePayload>>,
}

impl StubGateway {
    fn with_roster() -> Self {
        Self {
            teams: StdMutex::new(vec![team("t1", "Platform")]),
            employees: vec![
                employee("e1", "Ada", "Lovelace"),
                employee("e2", "Grace", "Hopper"),
                employee("e3", "Alan", "Turing"),
            ],
            departments: vec![department("d1", "Engineering"), department("d2", "Design")],
            projects: vec![project("p1", "Atlas")],
            ..Self::default()
        }
    }

    fn set_teams(&self, teams: Vec<Team>) {
        *self.teams.lock().unwrap() = teams;
    }

    fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    fn team_payloads(&self) -> Vec<TeamWritePayload> {
        self.team_payloads.lock().unwrap().clone()
    }

    fn project_payloads(&self) -> Vec<ProjectWritePayload> {
        self.project_payloads.lock().unwrap().clone()
    }

    fn record(&self, call: &'static str) {
        self.calls.lock().unwrap().push(call);
    }

    fn fail_if(reason: &Option<String>) -> Result<(), OperationError> {
        match reason {
            Some(message) => Err(OperationError::gateway(message.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl AdminGateway for StubGateway {
    async fn list_teams(&self, _query: &TeamQuery) -> Result<Vec<Team>, OperationError> {
        self.record("list_teams");
        if let Some(entered) = &self.teams_fetch_entered {
            entered.notify_one();
        }
        if let Some(release) = &self.teams_fetch_release {
            release.notified().await;
        }
        Ok(self.teams.lock().unwrap().clone())
    }

    async fn create_team(
        &self,
        payload: &TeamWritePayload,
    ) -> Result<Option<Team>, OperationError> {
        self.record("create_team");
        self.team_payloads.lock().unwrap().push(payload.clone());
        Ok(None)
    }

    async fn update_team(
        &self,
        _team_id: &TeamId,
        payload: &TeamWritePayload,
    ) -> Result<Option<Team>, OperationError> {
        self.record("update_team");
        self.team_payloads.lock().unwrap().push(payload.clone());
        Self::fail_if(&self.update_team_failure)?;
        Ok(None)
    }

    async fn delete_team(&self, _team_id: &TeamId) -> Result<(), OperationError> {
        self.record("delete_team");
        Ok(())
    }

    async fn add_team_member(
        &self,
        _team_id: &TeamId,
        _employee_id: &EmployeeId,
    ) -> Result<Option<Team>, OperationError> {
        self.record("add_team_member");
        Ok(None)
    }

    async fn remove_team_member(
        &self,
        _team_id: &TeamId,
        _employee_id: &EmployeeId,
    ) -> Result<Option<Team>, OperationError> {
        self.record("remove_team_member");
        Ok(None)
    }

    async fn list_employees(&self) -> Result<Vec<Employee>, OperationError> {
        self.record("list_employees");
        Self::fail_if(&self.employees_failure)?;
        Ok(self.employees.clone())
    }

    async fn list_departments(&self) -> Result<Vec<Department>, OperationError> {
        self.record("list_departments");
        Ok(self.departments.clone())
    }

    async fn list_projects(&self) -> Result<Vec<Project>, OperationError> {
        self.record("list_projects");
        Ok(self.projects.clone())
    }

    async fn create_project(
        &self,
        payload: &ProjectWritePayload,
    ) -> Result<Option<Project>, OperationError> {
        self.record("create_project");
        self.project_payloads.lock().unwrap().push(payload.clone());
        Self::fail_if(&self.create_project_failure)?;
        Ok(self.created_project.clone())
    }

    async fn upcoming_events(&self, _limit: u32) -> Result<Vec<Event>, OperationError> {
        self.record("upcoming_events");
        Ok(Vec::new())
    }

    async fn create_event(
        &self,
        _payload: &EventWritePayload,
    ) -> Result<Option<Event>, OperationError> {
        self.record("create_event");
        Ok(None)
    }

    async fn delete_event(&self, _event_id: &EventId) -> Result<(), OperationError> {
        self.record("delete_event");
        Ok(())
    }
}

struct CannedPrompt {
    answer: bool,
    prompts: StdMutex<Vec<String>>,
}

impl CannedPrompt {
    fn answering(answer: bool) -> Self {
        Self {
            answer,
            prompts: StdMutex::new(Vec::new()),
        }
    }

    fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl ConfirmationPrompt for CannedPrompt {
    async fn confirm(&self, prompt: &str) -> bool {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.answer
    }
}

fn page_with(stub: StubGateway) -> (Arc<TeamsPage>, Arc<StubGateway>) {
    let stub = Arc::new(stub);
    let gateway: Arc<dyn AdminGateway> = stub.clone();
    (TeamsPage::new(gateway), stub)
}

fn page_with_prompt(
    stub: StubGateway,
    answer: bool,
) -> (Arc<TeamsPage>, Arc<StubGateway>, Arc<CannedPrompt>) {
    let stub = Arc::new(stub);
    let prompt = Arc::new(CannedPrompt::answering(answer));
    let gateway: Arc<dyn AdminGateway> = stub.clone();
    let confirm: Arc<dyn ConfirmationPrompt> = prompt.clone();
    let page = TeamsPage::new_with_dependencies(
        gateway,
        confirm,
        PointerEvents::new(),
        PageOptions::default(),
    );
    (page, stub, prompt)
}

fn page_with_options(
    stub: StubGateway,
    options: PageOptions,
) -> (Arc<TeamsPage>, Arc<StubGateway>) {
    let stub = Arc::new(stub);
    let gateway: Arc<dyn AdminGateway> = stub.clone();
    let page = TeamsPage::new_with_dependencies(
        gateway,
        Arc::new(CannedPrompt::answering(true)),
        PointerEvents::new(),
        options,
    );
    (page, stub)
}

async fn wait_for(
    events: &mut broadcast::Receiver<PageEvent>,
    matcher: impl Fn(&PageEvent) -> bool,
) -> PageEvent {
    tokio::time::timeout(Duration::from_secs(2), async {
        loop {
            let event = events.recv().await.expect("event channel closed");
            if matcher(&event) {
                break event;
            }
        }
    })
    .await
    .expect("expected page event never arrived")
}

fn drained(events: &mut broadcast::Receiver<PageEvent>) -> Vec<PageEvent> {
    let mut seen = Vec::new();
    while let Ok(event) = events.try_recv() {
        seen.push(event);
    }
    seen
}

#[tokio::test]
async fn load_all_populates_every_slice_and_finishes_loading() {
    let (page, _stub) = page_with(StubGateway::with_roster());
    let mut events = page.subscribe_events();

    page.load_all().await;

    let snapshot = page.snapshot().await;
    assert!(!snapshot.loading);
    assert_eq!(snapshot.teams.items.len(), 1);
    assert_eq!(snapshot.employees.items.len(), 3);
    assert_eq!(snapshot.departments.items.len(), 2);
    assert_eq!(snapshot.projects.items.len(), 1);
    assert_eq!(snapshot.teams.error, None);
    assert_eq!(snapshot.error, None);
    assert!(drained(&mut events)
        .iter()
        .any(|event| matches!(event, PageEvent::LoadFinished)));
}

#[tokio::test]
async fn a_failing_fetch_scopes_its_error_to_one_slice() {
    let stub = StubGateway {
        employees_failure: Some("employees exploded".to_string()),
        ..StubGateway::with_roster()
    };
    let (page, _stub) = page_with(stub);

    page.load_all().await;

    let snapshot = page.snapshot().await;
    assert!(!snapshot.loading);
    assert_eq!(snapshot.employees.error.as_deref(), Some("employees exploded"));
    assert!(snapshot.employees.items.is_empty());
    assert_eq!(snapshot.teams.items.len(), 1, "siblings still load");
    assert_eq!(snapshot.departments.items.len(), 2);
    assert_eq!(snapshot.error, None, "slice failures never take the page banner");
}

#[tokio::test]
async fn updates_landing_after_teardown_are_abandoned() {
    let entered = Arc::new(Notify::new());
    let release = Arc::new(Notify::new());
    let stub = StubGateway {
        teams_fetch_entered: Some(Arc::clone(&entered)),
        teams_fetch_release: Some(Arc::clone(&release)),
        ..StubGateway::with_roster()
    };
    let (page, _stub) = page_with(stub);

    let load = tokio::spawn({
        let page = Arc::clone(&page);
        async move { page.load_all().await }
    });
    entered.notified().await;
    page.teardown().await;
    release.notify_one();
    load.await.expect("load task");

    let snapshot = page.snapshot().await;
    assert!(snapshot.teams.items.is_empty());
    assert!(snapshot.employees.items.is_empty());
    assert!(snapshot.loading, "a torn-down page never flips its own flags");
}

#[tokio::test]
async fn refresh_teams_picks_up_the_latest_roster() {
    let (page, stub) = page_with(StubGateway::with_roster());
    page.load_all().await;

    stub.set_teams(vec![team("t1", "Platform"), team("t2", "Search")]);
    page.refresh_teams().await;

    assert_eq!(page.snapshot().await.teams.items.len(), 2);
}

#[tokio::test]
async fn submitting_an_empty_draft_never_reaches_the_gateway() {
    let (page, stub) = page_with(StubGateway::default());
    page.open_create_form().await;

    page.submit_team_form().await;

    let snapshot = page.snapshot().await;
    assert_eq!(
        snapshot.error.as_deref(),
        Some("Please fill in all required fields (name, leader, and department are required)"),
    );
    let form = snapshot.form.expect("modal stays open");
    assert_eq!(form.phase, FormPhase::Editing);
    assert!(stub.calls().is_empty());
}

#[tokio::test]
async fn a_valid_create_submits_once_then_closes_and_refreshes() {
    let (page, stub) = page_with(StubGateway::with_roster());
    let mut events = page.subscribe_events();
    page.open_create_form().await;
    page.edit_draft(|draft| {
        draft.name = "Core".to_string();
        draft.leader = Some(EmployeeId::new("e1"));
        draft.department = Some(DepartmentId::new("d1"));
    })
    .await;

    page.submit_team_form().await;

    assert_eq!(stub.calls(), vec!["create_team", "list_teams"]);
    let payloads = stub.team_payloads();
    assert_eq!(payloads.len(), 1);
    assert_eq!(payloads[0].name, "Core");
    assert!(page.snapshot().await.form.is_none(), "modal closes on success");
    assert!(drained(&mut events)
        .iter()
        .any(|event| matches!(event, PageEvent::FormClosed)));
}

#[tokio::test]
async fn an_update_failure_keeps_the_modal_and_draft() {
    let stub = StubGateway {
        update_team_failure: Some("Team name already taken".to_string()),
        ..StubGateway::with_roster()
    };
    let (page, _stub) = page_with(stub);
    page.load_all().await;
    page.open_edit_form(&TeamId::new("t1")).await;
    page.edit_draft(|draft| draft.name = "Renamed".to_string()).await;

    page.submit_team_form().await;

    let snapshot = page.snapshot().await;
    assert_eq!(snapshot.error.as_deref(), Some("Team name already taken"));
    let form = snapshot.form.expect("modal stays open for a retry");
    assert_eq!(form.phase, FormPhase::Editing);
    assert_eq!(form.draft.name, "Renamed");
}

#[tokio::test]
async fn editing_a_listed_team_projects_its_references_into_the_draft() {
    let mut listed = team("t1", "Platform");
    listed.project = Some(project("p1", "Atlas"));
    let stub = StubGateway {
        teams: StdMutex::new(vec![listed]),
        ..StubGateway::with_roster()
    };
    let (page, _stub) = page_with(stub);
    page.load_all().await;

    page.open_edit_form(&TeamId::new("t1")).await;

    let form = page.snapshot().await.form.expect("edit form");
    assert_eq!(
        form.mode,
        FormMode::Edit {
            team_id: TeamId::new("t1")
        }
    );
    assert_eq!(form.draft.name, "Platform");
    assert_eq!(form.draft.leader, Some(EmployeeId::new("e1")));
    assert_eq!(form.draft.department, Some(DepartmentId::new("d1")));
    assert_eq!(form.draft.members, vec![EmployeeId::new("e2")]);
    assert_eq!(form.draft.project, Some(ProjectId::new("p1")));
}

#[tokio::test]
async fn editing_an_unknown_team_is_ignored() {
    let (page, _stub) = page_with(StubGateway::with_roster());
    page.load_all().await;

    page.open_edit_form(&TeamId::new("missing")).await;

    assert!(page.snapshot().await.form.is_none());
}

#[tokio::test]
async fn a_declined_prompt_stops_the_delete() {
    let (page, stub, prompt) = page_with_prompt(StubGateway::with_roster(), false);

    page.delete_team(&TeamId::new("t1")).await;

    assert_eq!(prompt.prompts().len(), 1);
    assert!(prompt.prompts()[0].contains("delete this team"));
    assert!(stub.calls().is_empty(), "declining makes no gateway call");
}

#[tokio::test]
async fn a_confirmed_delete_runs_and_refreshes() {
    let (page, stub, _prompt) = page_with_prompt(StubGateway::with_roster(), true);
    let mut events = page.subscribe_events();

    page.delete_team(&TeamId::new("t1")).await;

    assert_eq!(stub.calls(), vec!["delete_team", "list_teams"]);
    assert!(drained(&mut events)
        .iter()
        .any(|event| matches!(event, PageEvent::TeamDeleted(id) if id.0 == "t1")));
}

#[tokio::test]
async fn the_default_prompt_declines_destructive_actions() {
    let (page, stub) = page_with(StubGateway::with_roster());

    page.delete_team(&TeamId::new("t1")).await;

    assert!(stub.calls().is_empty());
}

#[tokio::test]
async fn quick_project_success_links_the_project_and_announces_it() {
    let stub = StubGateway {
        created_project: Some(project("p9", "Apollo")),
        ..StubGateway::with_roster()
    };
    let (page, stub) = page_with(stub);
    let mut events = page.subscribe_events();
    page.open_create_form().await;
    page.open_quick_project().await;
    page.edit_quick_draft(|draft| {
        draft.name = "Apollo".to_string();
        draft.manager = Some(EmployeeId::new("e1"));
        draft.department = Some(DepartmentId::new("d1"));
    })
    .await;

    page.submit_quick_project().await;

    let snapshot = page.snapshot().await;
    assert_eq!(stub.calls(), vec!["create_project", "list_projects"]);
    assert_eq!(
        snapshot.form.expect("team form still open").draft.project,
        Some(ProjectId::new("p9")),
    );
    assert!(!snapshot.quick_open);
    assert_eq!(snapshot.quick_draft.name, "", "sub-flow draft resets");
    assert_eq!(
        snapshot.success.as_deref(),
        Some("Project \"Apollo\" created successfully and selected!"),
    );
    assert!(drained(&mut events)
        .iter()
        .any(|event| matches!(event, PageEvent::ProjectLinked(id) if id.0 == "p9")));
}

#[tokio::test(start_paused = true)]
async fn the_success_banner_clears_itself_after_five_seconds() {
    let (page, _stub) = page_with(StubGateway::default());

    page.set_success("Saved!").await;
    assert_eq!(page.snapshot().await.success.as_deref(), Some("Saved!"));

    tokio::time::sleep(Duration::from_secs(6)).await;
    tokio::task::yield_now().await;
    assert_eq!(page.snapshot().await.success, None);
}

#[tokio::test(start_paused = true)]
async fn a_newer_banner_survives_the_older_expiry() {
    let (page, _stub) = page_with(StubGateway::default());

    page.set_success("first").await;
    tokio::time::sleep(Duration::from_secs(3)).await;
    page.set_success("second").await;

    // The first banner's five seconds are up; the second's are not.
    tokio::time::sleep(Duration::from_secs(3)).await;
    tokio::task::yield_now().await;
    assert_eq!(page.snapshot().await.success.as_deref(), Some("second"));

    tokio::time::sleep(Duration::from_secs(3)).await;
    tokio::task::yield_now().await;
    assert_eq!(page.snapshot().await.success, None);
}

#[tokio::test(start_paused = true)]
async fn a_caller_chosen_ttl_overrides_the_default() {
    let (page, _stub) = page_with(StubGateway::default());

    page.set_success_for("Quick note", Duration::from_secs(1)).await;
    tokio::time::sleep(Duration::from_secs(2)).await;
    tokio::task::yield_now().await;

    assert_eq!(page.snapshot().await.success, None);
}

#[tokio::test]
async fn quick_project_validation_failure_keeps_the_modal() {
    let (page, stub) = page_with(StubGateway::with_roster());
    page.open_create_form().await;
    page.open_quick_project().await;

    page.submit_quick_project().await;

    let snapshot = page.snapshot().await;
    assert_eq!(
        snapshot.error.as_deref(),
        Some("Please fill in all required fields for the project"),
    );
    assert!(snapshot.quick_open);
    assert!(stub.project_payloads().is_empty());
}

#[tokio::test]
async fn a_quick_project_failure_shows_the_verbatim_reason() {
    let stub = StubGateway {
        create_project_failure: Some("Failed to create project: duplicate name".to_string()),
        ..StubGateway::with_roster()
    };
    let (page, _stub) = page_with(stub);
    page.open_create_form().await;
    page.open_quick_project().await;
    page.edit_quick_draft(|draft| {
        draft.name = "Apollo".to_string();
        draft.manager = Some(EmployeeId::new("e1"));
        draft.department = Some(DepartmentId::new("d1"));
    })
    .await;

    page.submit_quick_project().await;

    let snapshot = page.snapshot().await;
    assert_eq!(
        snapshot.error.as_deref(),
        Some("Failed to create project: duplicate name"),
    );
    assert!(snapshot.quick_open, "modal stays open after a failure");
    assert_eq!(snapshot.quick_draft.name, "Apollo", "draft survives for a retry");
}

#[tokio::test]
async fn quick_project_success_without_a_body_closes_quietly() {
    let (page, stub) = page_with(StubGateway::with_roster());
    page.open_create_form().await;
    page.open_quick_project().await;
    page.edit_quick_draft(|draft| {
        draft.name = "Apollo".to_string();
        draft.manager = Some(EmployeeId::new("e1"));
        draft.department = Some(DepartmentId::new("d1"));
    })
    .await;

    page.submit_quick_project().await;

    let snapshot = page.snapshot().await;
    assert!(!snapshot.quick_open);
    assert_eq!(snapshot.success, None, "no project to name, no banner");
    assert_eq!(snapshot.form.expect("team form").draft.project, None);
    assert!(stub.calls().contains(&"list_projects"), "refresh still runs");
}

#[tokio::test]
async fn cancelling_the_form_takes_the_quick_modal_down_with_it() {
    let (page, _stub) = page_with(StubGateway::with_roster());
    page.open_create_form().await;
    page.open_quick_project().await;
    page.edit_quick_draft(|draft| draft.name = "Apollo".to_string())
        .await;

    page.close_form().await;

    let snapshot = page.snapshot().await;
    assert!(snapshot.form.is_none());
    assert!(!snapshot.quick_open);
    assert_eq!(snapshot.quick_draft.name, "", "nested draft resets with its modal");
}

#[tokio::test]
async fn an_outside_press_closes_the_picker() {
    let (page, _stub) = page_with(StubGateway::with_roster());
    let mut events = page.subscribe_events();
    page.open_create_form().await;
    page.toggle_member_picker().await;
    assert!(page.snapshot().await.form.expect("form").picker_open);

    page.pointer_events().press(PointerDown::outside_all());
    wait_for(&mut events, |event| matches!(event, PageEvent::PickerClosed)).await;

    let form = page.snapshot().await.form.expect("form survives the close");
    assert!(!form.picker_open);
}

#[tokio::test]
async fn a_press_inside_the_control_keeps_it_open() {
    let (page, _stub) = page_with(StubGateway::with_roster());
    page.open_create_form().await;
    page.toggle_member_picker().await;
    let region = page.snapshot().await.form.expect("form").picker_region;

    page.pointer_events().press(PointerDown::inside([region]));
    tokio::time::sleep(Duration::from_millis(50)).await;

    assert!(page.snapshot().await.form.expect("form").picker_open);
}

#[tokio::test]
async fn closing_the_picker_by_toggle_detaches_the_watcher() {
    let (page, _stub) = page_with(StubGateway::with_roster());
    let mut events = page.subscribe_events();
    page.open_create_form().await;
    page.toggle_member_picker().await;
    page.toggle_member_picker().await;
    assert!(!page.snapshot().await.form.expect("form").picker_open);

    page.pointer_events().press(PointerDown::outside_all());
    tokio::time::sleep(Duration::from_millis(50)).await;

    assert!(!drained(&mut events)
        .iter()
        .any(|event| matches!(event, PageEvent::PickerClosed)));
}

#[tokio::test]
async fn picker_option_clicks_toggle_membership_while_staying_open() {
    let (page, _stub) = page_with(StubGateway::with_roster());
    page.open_create_form().await;
    page.toggle_member_picker().await;

    page.picker_option_click(&EmployeeId::new("e2")).await;
    page.picker_option_click(&EmployeeId::new("e3")).await;
    page.picker_option_click(&EmployeeId::new("e2")).await;

    let form = page.snapshot().await.form.expect("form");
    assert!(form.picker_open, "option clicks never close the list");
    assert_eq!(form.draft.members, vec![EmployeeId::new("e3")]);
}

#[tokio::test]
async fn the_error_banner_replaces_and_dismisses() {
    let (page, _stub) = page_with(StubGateway::default());

    page.set_error("one").await;
    page.set_error("two").await;
    assert_eq!(page.snapshot().await.error.as_deref(), Some("two"));

    page.dismiss_error().await;
    assert_eq!(page.snapshot().await.error, None);
}

#[tokio::test]
async fn a_page_without_project_support_strips_the_field_and_blocks_the_quick_flow() {
    let options = PageOptions {
        project_support: false,
    };
    let (page, stub) = page_with_options(StubGateway::with_roster(), options);
    page.open_create_form().await;
    page.edit_draft(|draft| {
        draft.name = "Core".to_string();
        draft.leader = Some(EmployeeId::new("e1"));
        draft.department = Some(DepartmentId::new("d1"));
        draft.project = Some(ProjectId::new("p1"));
    })
    .await;

    page.open_quick_project().await;
    assert!(!page.snapshot().await.quick_open);

    page.submit_team_form().await;
    let payloads = stub.team_payloads();
    assert_eq!(payloads.len(), 1);
    assert_eq!(payloads[0].project, None);
}

#[tokio::test]
async fn member_search_filters_the_visible_roster() {
    let (page, _stub) = page_with(StubGateway::with_roster());
    page.load_all().await;

    page.set_member_search("gra").await;

    let snapshot = page.snapshot().await;
    let names: Vec<String> = snapshot
        .visible_employees()
        .iter()
        .map(|employee| employee.full_name())
        .collect();
    assert_eq!(names, vec!["Grace Hopper".to_string()]);
}
