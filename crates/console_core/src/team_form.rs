use shared::{
    domain::{DepartmentId, EmployeeId, ProjectId, Team, TeamId},
    error::OperationError,
    protocol::TeamWritePayload,
};

use crate::member_picker::MemberPicker;

const REQUIRED_FIELDS_MESSAGE: &str =
    "Please fill in all required fields (name, leader, and department are required)";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit { team_id: TeamId },
}

/// A closed modal has no form at all, so there is no stored idle state;
/// validation runs synchronously on the way into `Submitting`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPhase {
    Editing,
    Submitting,
}

// Drafts hold bare ids; nested objects from the wire are projected down
// when an edit form opens.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TeamDraft {
    pub name: String,
    pub description: String,
    pub members: Vec<EmployeeId>,
    pub leader: Option<EmployeeId>,
    pub department: Option<DepartmentId>,
    pub project: Option<ProjectId>,
}

impl TeamDraft {
    pub fn from_team(team: &Team) -> Self {
        Self {
            name: team.name.clone(),
            description: team.description.clone(),
            members: team.members.iter().map(|member| member.id.clone()).collect(),
            leader: Some(team.leader.id.clone()),
            department: Some(team.department.id.clone()),
            project: team.project.as_ref().map(|project| project.id.clone()),
        }
    }

    // Chips render `members` as-is, so re-adding an id moves its chip to
    // the end of the row.
    pub fn toggle_member(&mut self, employee_id: &EmployeeId) {
        if self.members.contains(employee_id) {
            self.members.retain(|member| member != employee_id);
        } else {
            self.members.push(employee_id.clone());
        }
    }

    pub fn remove_member(&mut self, employee_id: &EmployeeId) {
        self.members.retain(|member| member != employee_id);
    }

    pub fn validated_payload(
        &self,
        project_support: bool,
    ) -> Result<TeamWritePayload, OperationError> {
        let (leader, department) = match (&self.leader, &self.department) {
            (Some(leader), Some(department)) if !self.name.is_empty() => (leader, department),
            _ => return Err(OperationError::validation(REQUIRED_FIELDS_MESSAGE)),
        };
        Ok(TeamWritePayload {
            name: self.name.clone(),
            description: self.description.clone(),
            members: self.members.clone(),
            leader: leader.clone(),
            department: department.clone(),
            project: if project_support {
                self.project.clone()
            } else {
                None
            },
        })
    }
}

#[derive(Debug)]
pub struct TeamForm {
    pub mode: FormMode,
    pub phase: FormPhase,
    pub draft: TeamDraft,
    pub picker: MemberPicker,
}

impl TeamForm {
    pub fn create() -> Self {
        Self {
            mode: FormMode::Create,
            phase: FormPhase::Editing,
            draft: TeamDraft::default(),
            picker: MemberPicker::new(),
        }
    }

    pub fn edit(team: &Team) -> Self {
        Self {
            mode: FormMode::Edit {
                team_id: team.id.clone(),
            },
            phase: FormPhase::Editing,
            draft: TeamDraft::from_team(team),
            picker: MemberPicker::new(),
        }
    }
}
