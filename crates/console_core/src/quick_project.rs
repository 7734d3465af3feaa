use chrono::{Months, NaiveDate};
use shared::{
    domain::{DepartmentId, EmployeeId, ProjectPriority, ProjectStatus},
    error::OperationError,
    protocol::ProjectWritePayload,
};

const REQUIRED_FIELDS_MESSAGE: &str = "Please fill in all required fields for the project";

#[derive(Debug, Clone, PartialEq)]
pub struct QuickProjectDraft {
    pub name: String,
    pub description: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub status: ProjectStatus,
    pub priority: ProjectPriority,
    pub progress: u8,
    pub manager: Option<EmployeeId>,
    pub department: Option<DepartmentId>,
}

impl QuickProjectDraft {
    pub fn default_for(today: NaiveDate) -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            start_date: Some(today),
            end_date: today.checked_add_months(Months::new(1)),
            status: ProjectStatus::Planning,
            priority: ProjectPriority::Medium,
            progress: 0,
            manager: None,
            department: None,
        }
    }

    pub fn validated_payload(&self) -> Result<ProjectWritePayload, OperationError> {
        let (start_date, end_date, manager, department) = match (
            &self.start_date,
            &self.end_date,
            &self.manager,
            &self.department,
        ) {
            (Some(start), Some(end), Some(manager), Some(department))
                if !self.name.is_empty() =>
            {
                (start, end, manager, department)
            }
            _ => return Err(OperationError::validation(REQUIRED_FIELDS_MESSAGE)),
        };
        Ok(ProjectWritePayload {
            name: self.name.clone(),
            description: self.description.clone(),
            start_date: *start_date,
            end_date: *end_date,
            status: self.status,
            priority: self.priority,
            progress: self.progress,
            manager: manager.clone(),
            department: department.clone(),
        })
    }
}
