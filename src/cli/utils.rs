use serde_json::{json, Value};

use crate::cli::OutputFormat;
use crate::client::list::avatar_initial;
use crate::database::models::{wire_timestamp, Task};

/// Output a success message in the appropriate format
pub fn output_success(
    output_format: &OutputFormat,
    message: &str,
    data: Option<Value>,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({
                "status": true,
                "msg": message
            });

            if let (Some(Value::Object(extra)), Some(map)) = (data, response.as_object_mut()) {
                map.extend(extra);
            }

            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            println!("✓ {}", message);
        }
    }
    Ok(())
}

/// Output an error message in the appropriate format
pub fn output_error(output_format: &OutputFormat, message: &str) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&json!({
                    "status": false,
                    "msg": message
                }))?
            );
        }
        OutputFormat::Text => {
            eprintln!("Error: {}", message);
        }
    }
    Ok(())
}

/// Output a task list, or `empty_message` when there is nothing to show
pub fn output_tasks(output_format: &OutputFormat, tasks: &[&Task], empty_message: &str) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&json!({ "tasks": tasks }))?);
        }
        OutputFormat::Text if tasks.is_empty() => {
            println!("{}", empty_message);
        }
        OutputFormat::Text => {
            for (i, task) in tasks.iter().enumerate() {
                if i > 0 {
                    println!();
                }
                print!("{}", task_text(task));
            }
        }
    }
    Ok(())
}

pub fn output_task(output_format: &OutputFormat, task: &Task) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&json!({ "task": task }))?);
        }
        OutputFormat::Text => print!("{}", task_text(task)),
    }
    Ok(())
}

/// Card-style rendering used by the text output
pub fn task_text(task: &Task) -> String {
    format!(
        "[{}] {}\n  Id:          {}\n  Start Time:  {}\n  End Time:    {}\n  Location:    {}\n  Description: {}\n  Category:    {}\n",
        avatar_initial(&task.event_name),
        task.event_name,
        task.id,
        wire_timestamp(&task.start_time),
        wire_timestamp(&task.end_time),
        task.location,
        task.description,
        task.category,
    )
}
