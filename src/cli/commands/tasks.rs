use clap::{Args, Subcommand};
use serde_json::json;

use crate::cli::utils::{output_success, output_task, output_tasks};
use crate::cli::OutputFormat;
use crate::client::form::{FormField, CATEGORIES, OTHER_CATEGORY};
use crate::client::list::filter_tasks;
use crate::client::{Credentials, FormError, TaskClient, TaskForm};
use crate::database::models::TaskFilterParams;

/// Content fields accepted by `create` and `update`
#[derive(Args, Debug, Clone, Default)]
pub struct FieldArgs {
    #[arg(long, help = "Event name")]
    pub event_name: Option<String>,
    #[arg(long, help = "Start time, e.g. 2024-01-01T10:00")]
    pub start_time: Option<String>,
    #[arg(long, help = "End time, e.g. 2024-01-01T12:00")]
    pub end_time: Option<String>,
    #[arg(long, help = "Location")]
    pub location: Option<String>,
    #[arg(long, help = "Description")]
    pub description: Option<String>,
    #[arg(long, help = "One of the predefined categories, or any custom text")]
    pub category: Option<String>,
}

impl FieldArgs {
    /// Copy the given values into the form. A category outside the predefined
    /// list goes through the `Other` free-text field.
    fn apply(self, form: &mut TaskForm) {
        let values = [
            (FormField::EventName, self.event_name),
            (FormField::StartTime, self.start_time),
            (FormField::EndTime, self.end_time),
            (FormField::Location, self.location),
            (FormField::Description, self.description),
        ];
        for (field, value) in values {
            if let Some(value) = value {
                form.set_field(field, value);
            }
        }

        if let Some(category) = self.category {
            if CATEGORIES.contains(&category.as_str()) || category == OTHER_CATEGORY {
                form.select_category(category);
            } else {
                form.select_category(OTHER_CATEGORY);
                form.set_field(FormField::OtherCategory, category);
            }
        }
    }
}

#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    #[arg(long, help = "Only tasks starting at or after this time")]
    pub start_time: Option<String>,
    #[arg(long, help = "Only tasks ending at or before this time")]
    pub end_time: Option<String>,
    #[arg(long, help = "Exact location")]
    pub location: Option<String>,
    #[arg(long, help = "Exact category")]
    pub category: Option<String>,
}

impl From<FilterArgs> for TaskFilterParams {
    fn from(args: FilterArgs) -> Self {
        Self {
            start_time: args.start_time,
            end_time: args.end_time,
            location: args.location,
            category: args.category,
        }
    }
}

#[derive(Subcommand)]
pub enum TaskCommands {
    #[command(about = "List your tasks")]
    List {
        #[arg(long, help = "Only show tasks whose fields contain this text (case-insensitive)")]
        filter: Option<String>,
    },

    #[command(about = "Show a single task")]
    Get {
        #[arg(help = "Task ID")]
        id: String,
    },

    #[command(about = "Create a task")]
    Create {
        #[command(flatten)]
        fields: FieldArgs,
    },

    #[command(about = "Update a task; unspecified fields keep their current values")]
    Update {
        #[arg(help = "Task ID")]
        id: String,
        #[command(flatten)]
        fields: FieldArgs,
    },

    #[command(about = "Delete a task")]
    Delete {
        #[arg(help = "Task ID")]
        id: String,
    },

    #[command(about = "Search tasks of all users by time window, location and category")]
    Filtered {
        #[command(flatten)]
        criteria: FilterArgs,
    },
}

pub async fn handle(
    cmd: TaskCommands,
    client: &TaskClient,
    creds: &Credentials,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    match cmd {
        TaskCommands::List { filter } => {
            let tasks = client.list(creds).await?;
            let visible = filter_tasks(&tasks, filter.as_deref().unwrap_or_default());
            output_tasks(&output_format, &visible, "No tasks found")
        }
        TaskCommands::Get { id } => {
            let task = client.get(creds, &id).await?;
            output_task(&output_format, &task)
        }
        TaskCommands::Create { fields } => {
            let mut form = TaskForm::new();
            fields.apply(&mut form);
            submit(form, client, creds, &output_format, "Task created").await
        }
        TaskCommands::Update { id, fields } => {
            let mut form = TaskForm::edit(client, creds, &id).await?;
            fields.apply(&mut form);
            submit(form, client, creds, &output_format, "Task updated").await
        }
        TaskCommands::Delete { id } => {
            let msg = client.delete(creds, &id).await?;
            output_success(&output_format, &msg, Some(json!({ "id": id })))
        }
        TaskCommands::Filtered { criteria } => {
            let tasks = client.filtered(creds, &criteria.into()).await?;
            let tasks: Vec<_> = tasks.iter().collect();
            output_tasks(&output_format, &tasks, "No matching tasks")
        }
    }
}

async fn submit(
    mut form: TaskForm,
    client: &TaskClient,
    creds: &Credentials,
    output_format: &OutputFormat,
    done: &str,
) -> anyhow::Result<()> {
    match form.submit(client, creds).await {
        Ok(outcome) => {
            output_success(output_format, done, None)?;
            output_task(output_format, &outcome.task)
        }
        Err(FormError::Invalid(errors)) => {
            let details: Vec<String> = errors
                .iter()
                .map(|e| format!("--{}: {}", flag_name(e.field), e.message))
                .collect();
            anyhow::bail!("Invalid task:\n  {}", details.join("\n  "))
        }
        Err(FormError::Client(e)) => Err(e.into()),
    }
}

fn flag_name(field: FormField) -> &'static str {
    match field {
        FormField::EventName => "event-name",
        FormField::StartTime => "start-time",
        FormField::EndTime => "end-time",
        FormField::Location => "location",
        FormField::Description => "description",
        FormField::Category | FormField::OtherCategory => "category",
    }
}
