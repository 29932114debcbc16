//! Plain-text rendering of roster views and stats.

use std::fmt::Write;

use rollcall_core::stats::RosterStats;
use rollcall_core::utils::{format_rate, truncate_string};
use rollcall_core::{Athlete, FilterOptions};

// ============================================================================
// Constants
// ============================================================================

const NAME_WIDTH: usize = 24;
const GROUP_WIDTH: usize = 18;
/// Widest bar in the daily series
const BAR_WIDTH: usize = 30;

/// Roster table with a short id column for use with edit/remove/toggle.
pub fn roster_table(view: &[&Athlete]) -> String {
    if view.is_empty() {
        return "No athletes.\n".to_string();
    }

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<8}  {:<name$}  {:<5}  {:<9}  {:<group$}  {}",
        "ID",
        "Name",
        "Grade",
        "Team",
        "Group",
        "Present",
        name = NAME_WIDTH,
        group = GROUP_WIDTH
    );
    for athlete in view {
        let _ = writeln!(
            out,
            "{:<8}  {:<name$}  {:<5}  {:<9}  {:<group$}  {}",
            athlete.id.short(),
            truncate_string(&athlete.display_name(), NAME_WIDTH),
            athlete.grade,
            athlete.team_label(),
            truncate_string(&athlete.workout_group, GROUP_WIDTH),
            if athlete.present { "yes" } else { "-" },
            name = NAME_WIDTH,
            group = GROUP_WIDTH
        );
    }
    let present = view.iter().filter(|a| a.present).count();
    let _ = writeln!(out, "\n{} athletes, {} present", view.len(), present);
    out
}

/// Values present in the roster for each filter flag.
pub fn filter_options(options: &FilterOptions) -> String {
    let join = |values: Vec<String>| {
        if values.is_empty() {
            "-".to_string()
        } else {
            values.join(", ")
        }
    };
    let teams = options.teams.iter().map(|t| t.to_string()).collect();
    format!(
        "Grades: {}\nTeams:  {}\nGroups: {}\n",
        join(options.grades.clone()),
        join(teams),
        join(options.workout_groups.clone())
    )
}

pub fn stats_report(stats: &RosterStats) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Athletes:      {}", stats.total);
    let _ = writeln!(out, "Present today: {}", stats.present);
    let _ = writeln!(out, "Absent today:  {}", stats.absent);
    let _ = writeln!(out, "Average rate:  {}", format_rate(stats.average_rate));

    if !stats.group_stats.is_empty() {
        let _ = writeln!(out, "\nWorkout groups");
        for group in &stats.group_stats {
            let _ = writeln!(
                out,
                "  {:<group$}  {:>3} members  {:>3} present  {:>6}",
                truncate_string(&group.group, GROUP_WIDTH),
                group.members,
                group.present_today,
                format_rate(group.rate),
                group = GROUP_WIDTH
            );
        }
    }

    if !stats.athlete_rates.is_empty() {
        let _ = writeln!(out, "\nAttendance rates");
        for rate in &stats.athlete_rates {
            let name = format!("{} {}", rate.first_name, rate.last_name);
            let _ = writeln!(
                out,
                "  {:<name$}  {:>6}",
                truncate_string(name.trim(), NAME_WIDTH),
                format_rate(rate.rate),
                name = NAME_WIDTH
            );
        }
    }

    let _ = writeln!(out, "\nLast {} days", stats.daily_series.len());
    let peak = stats.daily_series.iter().map(|d| d.present).max().unwrap_or(0);
    for day in &stats.daily_series {
        let bar = if peak == 0 { 0 } else { day.present * BAR_WIDTH / peak };
        let _ = writeln!(
            out,
            "  {}  {:>3}/{:<3} {}",
            day.date.format("%m/%d"),
            day.present,
            day.recorded,
            "#".repeat(bar)
        );
    }

    let absent: Vec<_> = stats.most_absent.iter().filter(|a| a.absences > 0).collect();
    if !absent.is_empty() {
        let _ = writeln!(out, "\nMost absences");
        for entry in absent {
            let _ = writeln!(
                out,
                "  {:<name$}  {}",
                truncate_string(&entry.name, NAME_WIDTH),
                entry.absences,
                name = NAME_WIDTH
            );
        }
    }

    out
}
