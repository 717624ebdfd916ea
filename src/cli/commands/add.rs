use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::TimeService;
use crate::errors::{AppError, AppResult};
use crate::models::TimeEntry;
use crate::utils::time::parse_timestamp;
use uuid::Uuid;

/// Record one time entry and echo it back as JSON.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Add {
        date,
        entry,
        lunch_out,
        lunch_in,
        exit,
        id,
    } = cmd
    {
        if date.trim().is_empty() {
            return Err(AppError::Validation("--date must not be empty".into()));
        }

        let mut new_entry = TimeEntry::new(
            date.trim(),
            parse_timestamp(entry)?,
            parse_timestamp(lunch_out)?,
            parse_timestamp(lunch_in)?,
            parse_timestamp(exit)?,
        );

        if let Some(raw) = id {
            let parsed = Uuid::parse_str(raw.trim())
                .map_err(|_| AppError::Validation(format!("invalid id '{raw}'")))?;
            new_entry = new_entry.with_id(parsed);
        }

        let service = TimeService::connect(cfg)?;
        let created = service.create(new_entry)?;

        println!("✅ Time entry created");
        println!("{}", serde_json::to_string_pretty(&created)?);

        service.shutdown()?;
    }
    Ok(())
}
