//! Command dispatch over a loaded roster.

use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};
use chrono::NaiveDate;
use rollcall_core::import::export_file_name;
use rollcall_core::{
    compute_stats, export_csv, filter_and_sort, import_csv, AthleteDraft, AthleteId, Config,
    FilterCriteria, FilterOptions, RosterSource, RosterStore, SortKey,
};
use tracing::{info, warn};

use crate::cli::Command;
use crate::render;

/// Everything a command needs besides its own arguments.
pub struct Session {
    pub store: RosterStore,
    pub source: RosterSource,
    pub config: Config,
    pub config_path: PathBuf,
    pub today: NaiveDate,
}

impl Session {
    fn resolve(&self, id: &str) -> Result<AthleteId> {
        self.store
            .find_by_prefix(id)
            .ok_or_else(|| anyhow!("No single athlete matches id \"{}\"", id))
    }
}

/// Run one command. Returns the text to print on stdout.
pub async fn run(session: &mut Session, command: Command) -> Result<String> {
    let mutates = command.mutates();
    let output = execute(session, command)?;

    if mutates {
        session
            .source
            .persist_roster(session.store.athletes())
            .await
            .with_context(|| format!("Failed to save roster to {}", session.source.describe()))?;
    }
    Ok(output)
}

fn execute(session: &mut Session, command: Command) -> Result<String> {
    let today = session.today;

    match command {
        Command::List { options: true, .. } => {
            Ok(render::filter_options(&FilterOptions::from_roster(session.store.athletes())))
        }

        Command::List { filter, sort, json, .. } => {
            let view = filter_and_sort(session.store.athletes(), &filter.into(), sort);
            if json {
                Ok(serde_json::to_string_pretty(&view)? + "\n")
            } else {
                Ok(render::roster_table(&view))
            }
        }

        Command::Add(fields) => {
            let draft = fields.apply_to(AthleteDraft::default());
            let id = session.store.add(&draft)?;
            Ok(format!("Added {} ({})\n", draft.first_name.trim(), id.short()))
        }

        Command::Edit { id, fields } => {
            let id = session.resolve(&id)?;
            let current = session
                .store
                .get(id)
                .ok_or_else(|| anyhow!("Athlete not found: {}", id))?;
            let base = AthleteDraft {
                first_name: current.first_name.clone(),
                last_name: current.last_name.clone(),
                grade: current.grade.clone(),
                team: current.team_label().to_string(),
                workout_group: current.workout_group.clone(),
            };
            session.store.update(id, &fields.apply_to(base))?;
            Ok(format!("Updated {}\n", id.short()))
        }

        Command::Remove { id } => {
            let id = session.resolve(&id)?;
            let removed = session.store.remove(id)?;
            Ok(format!("Removed {}\n", removed.display_name()))
        }

        Command::Toggle { id } => {
            let id = session.resolve(&id)?;
            let present = session.store.toggle_attendance(id, today)?;
            let name = session
                .store
                .get(id)
                .map(|a| a.display_name())
                .unwrap_or_default();
            Ok(format!(
                "{} marked {}\n",
                name,
                if present { "present" } else { "absent" }
            ))
        }

        Command::ToggleAll => {
            let present = session.store.toggle_all(today);
            Ok(format!(
                "Marked {} athletes {}\n",
                session.store.len(),
                if present { "present" } else { "absent" }
            ))
        }

        Command::Clear { yes } => {
            if !yes {
                bail!("Refusing to clear the roster without --yes");
            }
            let removed = session.store.clear();
            Ok(format!("Removed {} athletes\n", removed))
        }

        Command::Import { file } => {
            let text = std::fs::read_to_string(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let outcome = import_csv(&text)?;
            for warning in &outcome.warnings {
                warn!(line = warning.line, "{}", warning);
                eprintln!("Line {}: {}", warning.line, warning);
            }
            let count = outcome.athletes.len();
            session.store.replace_all(outcome.athletes);
            info!(count, file = %file.display(), "Imported roster");
            Ok(format!(
                "Imported {} athletes ({} warnings)\n",
                count,
                outcome.warnings.len()
            ))
        }

        Command::Export { file } => {
            let view = filter_and_sort(session.store.athletes(), &FilterCriteria::default(), SortKey::Name);
            let csv = export_csv(view)?;
            let path = file.unwrap_or_else(|| PathBuf::from(export_file_name(today)));
            if path.as_os_str() == "-" {
                return Ok(csv);
            }
            std::fs::write(&path, csv)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            Ok(format!(
                "Exported {} athletes to {}\n",
                session.store.len(),
                path.display()
            ))
        }

        Command::Stats { filter, json } => {
            let view = filter_and_sort(session.store.athletes(), &filter.into(), SortKey::Name);
            let stats = compute_stats(view, today, session.config.group_order.as_slice());
            if json {
                Ok(serde_json::to_string_pretty(&stats)? + "\n")
            } else {
                Ok(render::stats_report(&stats))
            }
        }

        Command::Status => {
            let present = session.store.athletes().iter().filter(|a| a.present).count();
            let mut out = format!("Roster:   {}\n", session.source.describe());
            if let Some(age) = session.source.age_display() {
                out.push_str(&format!("Saved:    {}\n", age));
            }
            out.push_str(&format!(
                "Athletes: {} ({} present)\n",
                session.store.len(),
                present
            ));
            Ok(out)
        }

        Command::Config { group_order, save } => {
            if let Some(order) = group_order {
                session.config.group_order = order
                    .split(',')
                    .map(str::trim)
                    .filter(|g| !g.is_empty())
                    .map(str::to_string)
                    .collect();
            }
            let mut out = serde_json::to_string_pretty(&session.config)? + "\n";
            if save {
                session.config.save(&session.config_path)?;
                info!(path = %session.config_path.display(), "Saved config");
                out.push_str(&format!("Saved to {}\n", session.config_path.display()));
            }
            Ok(out)
        }
    }
}
