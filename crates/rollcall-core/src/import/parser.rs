//! CSV roster import.
//!
//! Cells are split on bare commas. Quoted fields with embedded commas are not
//! supported; quote characters are simply stripped from every cell.

use std::fmt;

use tracing::{debug, info};

use crate::error::ImportError;
use crate::models::{Athlete, Team};

/// An unrecognized team value. The athlete is still imported, with no team.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizationWarning {
    /// 1-based line number in the source text
    pub line: usize,
    pub raw_team: String,
    pub athlete: String,
}

impl fmt::Display for NormalizationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid team \"{}\" for {}", self.raw_team, self.athlete)
    }
}

#[derive(Debug, Clone)]
pub struct ImportOutcome {
    pub athletes: Vec<Athlete>,
    pub warnings: Vec<NormalizationWarning>,
}

/// Column positions resolved from the header row.
#[derive(Debug, Default, PartialEq, Eq)]
struct Columns {
    first_name: Option<usize>,
    last_name: Option<usize>,
    /// Single "Name" column, used only when neither first nor last resolves
    full_name: Option<usize>,
    grade: Option<usize>,
    team: Option<usize>,
    workout_group: Option<usize>,
    present: Option<usize>,
}

impl Columns {
    fn resolve(header_line: &str) -> Self {
        let headers: Vec<String> = split_cells(header_line)
            .into_iter()
            .map(|h| h.to_lowercase())
            .collect();
        let first = |keyword: &str| headers.iter().position(|h| h.contains(keyword));

        let mut columns = Columns {
            first_name: first("first"),
            last_name: first("last"),
            full_name: None,
            grade: first("grade"),
            // Later "team" columns override earlier ones
            team: headers.iter().rposition(|h| h.contains("team")),
            workout_group: first("workout"),
            present: first("present"),
        };
        if columns.first_name.is_none() && columns.last_name.is_none() {
            columns.full_name = first("name");
        }
        columns
    }

    /// First and last name for a row, split from the full-name column if that
    /// is how the file is laid out.
    fn names<'a>(&self, cells: &'a [String]) -> (&'a str, &'a str) {
        if let Some(index) = self.full_name {
            let full = cell(cells, Some(index));
            return match full.split_once(char::is_whitespace) {
                Some((first, last)) => (first, last.trim()),
                None => (full, ""),
            };
        }
        (cell(cells, self.first_name), cell(cells, self.last_name))
    }
}

fn split_cells(line: &str) -> Vec<String> {
    line.split(',')
        .map(|c| c.replace('"', "").trim().to_string())
        .collect()
}

fn cell(cells: &[String], index: Option<usize>) -> &str {
    index
        .and_then(|i| cells.get(i))
        .map(String::as_str)
        .unwrap_or("")
}

fn parse_present(value: &str) -> bool {
    matches!(value.to_lowercase().as_str(), "yes" | "y" | "true" | "1")
}

/// If the row is a workout-group header, return its label.
///
/// A header has exactly one non-empty cell, or a non-empty first cell while
/// the resolved name cells are both empty.
fn group_header<'a>(cells: &'a [String], first_name: &str, last_name: &str) -> Option<&'a str> {
    let mut non_empty = cells.iter().filter(|c| !c.is_empty());
    if let (Some(only), None) = (non_empty.next(), non_empty.next()) {
        return Some(only.as_str());
    }
    match cells.first() {
        Some(lead) if !lead.is_empty() && first_name.is_empty() && last_name.is_empty() => {
            Some(lead.as_str())
        }
        _ => None,
    }
}

/// Parse a CSV roster. The first line is the header row.
///
/// The returned roster is meant to replace the current one wholesale; on error
/// nothing should be replaced.
pub fn import_csv(text: &str) -> Result<ImportOutcome, ImportError> {
    let lines: Vec<&str> = text.lines().collect();
    if lines.len() < 2 {
        return Err(ImportError::TooFewLines);
    }

    let columns = Columns::resolve(lines[0]);
    debug!(?columns, "Resolved CSV columns");

    let mut athletes = Vec::new();
    let mut warnings = Vec::new();
    let mut current_group = String::new();

    for (offset, line) in lines.iter().enumerate().skip(1) {
        let line_number = offset + 1;
        if line.trim().is_empty() {
            continue;
        }

        let cells = split_cells(line);
        let (first_name, last_name) = columns.names(&cells);

        if let Some(label) = group_header(&cells, first_name, last_name) {
            debug!(line = line_number, group = label, "Workout group header");
            current_group = label.to_string();
            continue;
        }
        if first_name.is_empty() && last_name.is_empty() {
            debug!(line = line_number, "Skipping row without a name");
            continue;
        }

        let raw_team = cell(&cells, columns.team);
        let team = Team::normalize(raw_team);
        if team.is_none() && !raw_team.is_empty() {
            warnings.push(NormalizationWarning {
                line: line_number,
                raw_team: raw_team.to_string(),
                athlete: format!("{} {}", first_name, last_name).trim().to_string(),
            });
        }

        let own_group = cell(&cells, columns.workout_group);
        let workout_group = if own_group.is_empty() {
            current_group.as_str()
        } else {
            own_group
        };

        let mut athlete = Athlete::new(
            first_name,
            last_name,
            cell(&cells, columns.grade),
            team,
            workout_group,
        );
        athlete.present = parse_present(cell(&cells, columns.present));
        athletes.push(athlete);
    }

    if athletes.is_empty() {
        return Err(ImportError::NoAthletes);
    }

    info!(
        athletes = athletes.len(),
        warnings = warnings.len(),
        "Parsed CSV roster"
    );
    Ok(ImportOutcome { athletes, warnings })
}
