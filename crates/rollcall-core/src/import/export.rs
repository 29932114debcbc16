//! CSV roster export.

use anyhow::{Context, Result};
use csv::{QuoteStyle, WriterBuilder};

use crate::models::Athlete;

/// Header row of an exported roster.
pub const EXPORT_HEADERS: [&str; 6] = [
    "First Name",
    "Last Name",
    "Grade",
    "Team",
    "Workout Group",
    "Present",
];

/// Render athletes as CSV: a bare header row, then one row per athlete with
/// every cell quoted and `Present` written as `Yes`/`No`.
pub fn export_csv<'a, I>(athletes: I) -> Result<String>
where
    I: IntoIterator<Item = &'a Athlete>,
{
    let mut out = EXPORT_HEADERS.join(",");
    out.push('\n');

    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .from_writer(Vec::new());
    for athlete in athletes {
        writer
            .write_record([
                athlete.first_name.as_str(),
                athlete.last_name.as_str(),
                athlete.grade.as_str(),
                athlete.team_label(),
                athlete.workout_group.as_str(),
                if athlete.present { "Yes" } else { "No" },
            ])
            .with_context(|| format!("Failed to write CSV row for {}", athlete.display_name()))?;
    }
    let rows = writer.into_inner().context("Failed to flush CSV rows")?;
    out.push_str(&String::from_utf8(rows).context("CSV output was not UTF-8")?);
    Ok(out)
}

/// Default file name for an export made on `date`.
pub fn export_file_name(date: chrono::NaiveDate) -> String {
    format!("attendance_{}.csv", date.format("%Y-%m-%d"))
}
