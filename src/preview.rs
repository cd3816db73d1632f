use crate::cli::ScheduleArgs;
use crate::model::{ScheduleEntry, ScheduleOutput, SCHEMA_VERSION};
use crate::schedule::generate_seeded;
use crate::study::notes::note_filename;
use crate::util::weekday_name;
use chrono::{Datelike, Utc};
use console::style;

pub fn exec(args: ScheduleArgs, json: bool) -> anyhow::Result<()> {
    let start = args.start_date()?;
    let seed = args.seed();
    let schedule = generate_seeded(start, args.count(), args.pattern, seed)?;

    if json {
        output_json(&schedule, &args, seed)
    } else {
        output_table(&schedule, &args, seed)
    }
}

fn output_json(schedule: &[ScheduleEntry], args: &ScheduleArgs, seed: u64) -> anyhow::Result<()> {
    let output = ScheduleOutput {
        version: SCHEMA_VERSION,
        generated_at: Utc::now(),
        pattern: args.pattern.to_string(),
        seed,
        entries: schedule.to_vec(),
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn output_table(schedule: &[ScheduleEntry], args: &ScheduleArgs, seed: u64) -> anyhow::Result<()> {
    if schedule.is_empty() {
        println!("No commits scheduled");
        return Ok(());
    }

    println!(
        "{} ({} pattern, seed {})",
        style("Commit Schedule").bold(),
        args.pattern,
        seed
    );
    println!(
        "{:>5}  {:<26} {:<10} {}",
        style("Day").bold(),
        style("Date").bold(),
        style("Weekday").bold(),
        style("Note").bold()
    );
    println!("{}", "─".repeat(72));
    for entry in schedule {
        println!(
            "{:>5}  {:<26} {:<10} {}",
            entry.sequence_number,
            entry.date.to_rfc3339(),
            weekday_name(entry.date.weekday()),
            note_filename(entry)
        );
    }
    Ok(())
}
