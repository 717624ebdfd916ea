use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::TimeService;
use crate::errors::AppResult;
use crate::utils::table::render_entries;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List {
        date,
        year,
        month,
        day,
        json,
    } = cmd
    {
        let service = TimeService::connect(cfg)?;

        let (title, entries) = match (date, year, month, day) {
            (Some(d), _, _, _) => (format!("date {d}"), service.list_by_date(d)?),
            (_, Some(y), _, _) => (format!("year {y}"), service.list_by_year(*y)?),
            (_, _, Some(m), _) => (format!("month {m}"), service.list_by_month(*m)?),
            (_, _, _, Some(d)) => (format!("day {d}"), service.list_by_day(*d)?),
            _ => ("all dates".to_string(), service.list_all()?),
        };

        if *json {
            println!("{}", serde_json::to_string_pretty(&entries)?);
        } else if entries.is_empty() {
            println!("No time entries found for {title}.");
        } else {
            println!("📅 Time entries for {title}:\n");
            print!("{}", render_entries(&entries));
        }

        service.shutdown()?;
    }
    Ok(())
}
