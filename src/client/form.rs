use crate::database::models::{wire_timestamp, Task, TaskFields};

use super::{ClientError, Credentials, TaskClient};

/// Category choice that switches the form to free-text entry
pub const OTHER_CATEGORY: &str = "Other";

/// Predefined category choices, in display order. `Other` is offered after these.
pub const CATEGORIES: [&str; 8] = [
    "Social event",
    "Entertainment event",
    "Sports event",
    "Educational event",
    "Political event",
    "Corporate events",
    "Exhibition",
    "Religious/divine events",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Add,
    Edit(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    EventName,
    StartTime,
    EndTime,
    Location,
    Description,
    Category,
    OtherCategory,
}

impl FormField {
    pub const ALL: [FormField; 7] = [
        FormField::EventName,
        FormField::StartTime,
        FormField::EndTime,
        FormField::Location,
        FormField::Description,
        FormField::Category,
        FormField::OtherCategory,
    ];

    /// Input name, matching the JSON field names of the API
    pub fn name(self) -> &'static str {
        match self {
            FormField::EventName => "eventName",
            FormField::StartTime => "startTime",
            FormField::EndTime => "endTime",
            FormField::Location => "location",
            FormField::Description => "description",
            FormField::Category => "category",
            FormField::OtherCategory => "otherCategory",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.name() == name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    Always,
    /// Only while the category choice is [`OTHER_CATEGORY`]
    WhenOtherCategory,
}

#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub field: FormField,
    pub label: &'static str,
    pub requirement: Requirement,
}

pub const TASK_RULES: [FieldRule; 7] = [
    FieldRule { field: FormField::EventName, label: "Event name", requirement: Requirement::Always },
    FieldRule { field: FormField::StartTime, label: "Start time", requirement: Requirement::Always },
    FieldRule { field: FormField::EndTime, label: "End time", requirement: Requirement::Always },
    FieldRule { field: FormField::Location, label: "Location", requirement: Requirement::Always },
    FieldRule { field: FormField::Description, label: "Description", requirement: Requirement::Always },
    FieldRule { field: FormField::Category, label: "Category", requirement: Requirement::Always },
    FieldRule {
        field: FormField::OtherCategory,
        label: "Other category",
        requirement: Requirement::WhenOtherCategory,
    },
];

/// Raw text of every input. `category` holds the selected choice, which may
/// be [`OTHER_CATEGORY`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormData {
    pub event_name: String,
    pub start_time: String,
    pub end_time: String,
    pub location: String,
    pub description: String,
    pub category: String,
    pub other_category: String,
}

impl FormData {
    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::EventName => &self.event_name,
            FormField::StartTime => &self.start_time,
            FormField::EndTime => &self.end_time,
            FormField::Location => &self.location,
            FormField::Description => &self.description,
            FormField::Category => &self.category,
            FormField::OtherCategory => &self.other_category,
        }
    }

    fn slot(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::EventName => &mut self.event_name,
            FormField::StartTime => &mut self.start_time,
            FormField::EndTime => &mut self.end_time,
            FormField::Location => &mut self.location,
            FormField::Description => &mut self.description,
            FormField::Category => &mut self.category,
            FormField::OtherCategory => &mut self.other_category,
        }
    }

    /// Values shown when editing `task`. A category outside the predefined
    /// list is shown as `Other` with its text prefilled.
    pub fn from_task(task: &Task) -> Self {
        let (category, other_category) = if CATEGORIES.contains(&task.category.as_str()) {
            (task.category.clone(), String::new())
        } else {
            (OTHER_CATEGORY.to_string(), task.category.clone())
        };

        Self {
            event_name: task.event_name.clone(),
            start_time: wire_timestamp(&task.start_time),
            end_time: wire_timestamp(&task.end_time),
            location: task.location.clone(),
            description: task.description.clone(),
            category,
            other_category,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: FormField,
    pub message: String,
}

#[derive(Debug, thiserror::Error)]
pub enum FormError {
    #[error("{} field(s) need attention", .0.len())]
    Invalid(Vec<FieldError>),

    #[error(transparent)]
    Client(#[from] ClientError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    TaskList,
}

impl Navigation {
    pub fn path(self) -> &'static str {
        match self {
            Navigation::TaskList => "/",
        }
    }
}

#[derive(Debug, Clone)]
pub struct SubmitOutcome {
    pub task: Task,
    pub navigate_to: Navigation,
}

/// Create/edit form state
#[derive(Debug, Clone)]
pub struct TaskForm {
    mode: FormMode,
    data: FormData,
    /// Values fetched in edit mode; the target of `reset`
    loaded: Option<FormData>,
    errors: Vec<FieldError>,
}

impl TaskForm {
    pub fn new() -> Self {
        Self {
            mode: FormMode::Add,
            data: FormData::default(),
            loaded: None,
            errors: Vec::new(),
        }
    }

    /// Open `task_id` for editing, loading its current values.
    pub async fn edit(client: &TaskClient, creds: &Credentials, task_id: &str) -> Result<Self, ClientError> {
        let task = client.get(creds, task_id).await?;
        Ok(Self::from_task(&task))
    }

    pub fn from_task(task: &Task) -> Self {
        let data = FormData::from_task(task);
        Self {
            mode: FormMode::Edit(task.id.to_string()),
            data: data.clone(),
            loaded: Some(data),
            errors: Vec::new(),
        }
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn data(&self) -> &FormData {
        &self.data
    }

    /// Messages from the last `validate` or `submit`
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    pub fn error_for(&self, field: FormField) -> Option<&str> {
        self.errors
            .iter()
            .find(|error| error.field == field)
            .map(|error| error.message.as_str())
    }

    pub fn title(&self) -> &'static str {
        match self.mode {
            FormMode::Add => "Add New Task",
            FormMode::Edit(_) => "Edit Task",
        }
    }

    pub fn set_field(&mut self, field: FormField, value: impl Into<String>) {
        *self.data.slot(field) = value.into();
    }

    pub fn select_category(&mut self, choice: impl Into<String>) {
        self.set_field(FormField::Category, choice);
    }

    pub fn is_other_category(&self) -> bool {
        self.data.category == OTHER_CATEGORY
    }

    /// The category value that will be sent
    pub fn effective_category(&self) -> &str {
        if self.is_other_category() {
            &self.data.other_category
        } else {
            &self.data.category
        }
    }

    /// Check every rule, recording and returning the violations
    pub fn validate(&mut self) -> Vec<FieldError> {
        let other = self.is_other_category();
        self.errors = TASK_RULES
            .iter()
            .filter(|rule| match rule.requirement {
                Requirement::Always => true,
                Requirement::WhenOtherCategory => other,
            })
            .filter(|rule| self.data.value(rule.field).trim().is_empty())
            .map(|rule| FieldError {
                field: rule.field,
                message: format!("{} is required", rule.label),
            })
            .collect();
        self.errors.clone()
    }

    /// Request body for create/update. Empty inputs are left out.
    pub fn to_fields(&self) -> TaskFields {
        let text = |value: &str| Some(value.to_string()).filter(|v| !v.is_empty());
        TaskFields {
            event_name: text(&self.data.event_name),
            start_time: text(&self.data.start_time),
            end_time: text(&self.data.end_time),
            location: text(&self.data.location),
            description: text(&self.data.description),
            category: text(self.effective_category()),
        }
    }

    /// Validate, then create or update depending on mode. Nothing is sent
    /// when validation fails.
    pub async fn submit(&mut self, client: &TaskClient, creds: &Credentials) -> Result<SubmitOutcome, FormError> {
        let errors = self.validate();
        if !errors.is_empty() {
            return Err(FormError::Invalid(errors));
        }

        let fields = self.to_fields();
        let task = match &self.mode {
            FormMode::Add => client.create(creds, &fields).await?,
            FormMode::Edit(task_id) => client.update(creds, task_id, &fields).await?,
        };

        Ok(SubmitOutcome {
            task,
            navigate_to: Navigation::TaskList,
        })
    }

    /// Restore the values loaded for editing. No effect in add mode.
    pub fn reset(&mut self) {
        if let Some(loaded) = &self.loaded {
            self.data = loaded.clone();
            self.errors.clear();
        }
    }
}

impl Default for TaskForm {
    fn default() -> Self {
        Self::new()
    }
}
