//! Attendance statistics over a (possibly filtered) roster.

use std::cmp::Ordering;

use chrono::{Duration, NaiveDate};
use serde::Serialize;

use crate::models::{Athlete, AthleteId};
use crate::utils::{cmp_ignore_case, eq_ignore_case, round_percent};

/// Number of calendar days in the attendance series, today included.
pub const SERIES_DAYS: i64 = 14;

/// Length of the most-absent ranking.
pub const MOST_ABSENT_LIMIT: usize = 10;

/// Workout groups listed first, in this order, when no other order is configured.
pub const DEFAULT_GROUP_ORDER: [&str; 6] = [
    "Chocolate Chip",
    "Oatmeal Raisin",
    "Snickerdoodle",
    "Peanut Butter",
    "Sugar",
    "Double Chocolate",
];

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AthleteRate {
    pub id: AthleteId,
    pub first_name: String,
    pub last_name: String,
    /// Percent of history entries marked present, one decimal
    pub rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupStats {
    pub group: String,
    pub members: usize,
    pub present_today: usize,
    pub rate: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DailyAttendance {
    pub date: NaiveDate,
    /// Athletes with a present entry on this date
    pub present: usize,
    /// Athletes with any entry on this date
    pub recorded: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AbsenceCount {
    pub id: AthleteId,
    pub name: String,
    pub absences: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterStats {
    pub total: usize,
    pub present: usize,
    pub absent: usize,
    pub average_rate: f64,
    pub athlete_rates: Vec<AthleteRate>,
    pub group_stats: Vec<GroupStats>,
    pub daily_series: Vec<DailyAttendance>,
    pub most_absent: Vec<AbsenceCount>,
}

/// Compute every statistic for `athletes` as of `today`.
///
/// `group_order` is the priority table for workout groups; groups not in it
/// follow alphabetically.
pub fn compute_stats<'a, I, S>(athletes: I, today: NaiveDate, group_order: &[S]) -> RosterStats
where
    I: IntoIterator<Item = &'a Athlete>,
    S: AsRef<str>,
{
    let athletes: Vec<&Athlete> = athletes.into_iter().collect();

    let total = athletes.len();
    let present = athletes.iter().filter(|a| a.present).count();

    RosterStats {
        total,
        present,
        absent: total - present,
        average_rate: combined_rate(&athletes),
        athlete_rates: athlete_rates(&athletes),
        group_stats: group_stats(&athletes, group_order),
        daily_series: daily_series(&athletes, today),
        most_absent: most_absent(&athletes),
    }
}

fn combined_rate(athletes: &[&Athlete]) -> f64 {
    let present: usize = athletes.iter().map(|a| a.present_entries()).sum();
    let recorded: usize = athletes.iter().map(|a| a.attendance_history.len()).sum();
    round_percent(present, recorded)
}

fn by_last_then_first(a_last: &str, a_first: &str, b_last: &str, b_first: &str) -> Ordering {
    cmp_ignore_case(a_last, b_last).then_with(|| cmp_ignore_case(a_first, b_first))
}

fn athlete_rates(athletes: &[&Athlete]) -> Vec<AthleteRate> {
    let mut rates: Vec<AthleteRate> = athletes
        .iter()
        .map(|a| AthleteRate {
            id: a.id,
            first_name: a.first_name.clone(),
            last_name: a.last_name.clone(),
            rate: round_percent(a.present_entries(), a.attendance_history.len()),
        })
        .collect();

    rates.sort_by(|a, b| {
        b.rate
            .total_cmp(&a.rate)
            .then_with(|| by_last_then_first(&a.last_name, &a.first_name, &b.last_name, &b.first_name))
    });
    rates
}

fn group_stats<S: AsRef<str>>(athletes: &[&Athlete], group_order: &[S]) -> Vec<GroupStats> {
    let mut groups: Vec<&str> = Vec::new();
    for athlete in athletes {
        let group = athlete.workout_group.trim();
        if !group.is_empty() && !groups.contains(&group) {
            groups.push(group);
        }
    }

    let priority = |group: &str| {
        group_order
            .iter()
            .position(|g| eq_ignore_case(g.as_ref(), group))
            .unwrap_or(usize::MAX)
    };
    groups.sort_by(|a, b| {
        priority(a)
            .cmp(&priority(b))
            .then_with(|| cmp_ignore_case(a, b))
    });

    groups
        .into_iter()
        .map(|group| {
            let members: Vec<&Athlete> = athletes
                .iter()
                .copied()
                .filter(|a| a.workout_group.trim() == group)
                .collect();
            GroupStats {
                group: group.to_string(),
                members: members.len(),
                present_today: members.iter().filter(|a| a.present).count(),
                rate: combined_rate(&members),
            }
        })
        .collect()
}

fn daily_series(athletes: &[&Athlete], today: NaiveDate) -> Vec<DailyAttendance> {
    (0..SERIES_DAYS)
        .rev()
        .map(|days_ago| {
            let date = today - Duration::days(days_ago);
            DailyAttendance {
                date,
                present: athletes.iter().filter(|a| a.present_on(date)).count(),
                recorded: athletes.iter().filter(|a| a.has_entry_on(date)).count(),
            }
        })
        .collect()
}

fn most_absent(athletes: &[&Athlete]) -> Vec<AbsenceCount> {
    let mut ranked: Vec<&Athlete> = athletes.to_vec();
    ranked.sort_by(|a, b| {
        b.absent_entries()
            .cmp(&a.absent_entries())
            .then_with(|| by_last_then_first(&a.last_name, &a.first_name, &b.last_name, &b.first_name))
    });
    ranked
        .into_iter()
        .take(MOST_ABSENT_LIMIT)
        .map(|a| AbsenceCount {
            id: a.id,
            name: a.display_name(),
            absences: a.absent_entries(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Team;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 20).unwrap()
    }

    fn days_ago(n: i64) -> NaiveDate {
        today() - Duration::days(n)
    }

    fn athlete(first: &str, last: &str, group: &str, history: &[(i64, bool)]) -> Athlete {
        let mut a = Athlete::new(first, last, "9", Some(Team::Jv), group);
        for (ago, present) in history {
            a.set_present(days_ago(*ago), *present);
        }
        a
    }

    #[test]
    fn test_empty_roster() {
        let stats = compute_stats(std::iter::empty(), today(), &DEFAULT_GROUP_ORDER);
        assert_eq!(stats.total, 0);
        assert_eq!(stats.present, 0);
        assert_eq!(stats.absent, 0);
        assert_eq!(stats.average_rate, 0.0);
        assert!(stats.athlete_rates.is_empty());
        assert!(stats.group_stats.is_empty());
        assert!(stats.most_absent.is_empty());
        assert_eq!(stats.daily_series.len(), SERIES_DAYS as usize);
        assert!(stats.daily_series.iter().all(|d| d.present == 0 && d.recorded == 0));
    }

    #[test]
    fn test_counts_use_current_flag() {
        let roster = vec![
            athlete("Ann", "Lee", "", &[(0, true), (0, false)]),
            athlete("Bo", "Ray", "", &[(0, true)]),
            athlete("Cy", "Fox", "", &[]),
        ];
        let stats = compute_stats(&roster, today(), &DEFAULT_GROUP_ORDER);
        assert_eq!(stats.total, 3);
        assert_eq!(stats.present, 1);
        assert_eq!(stats.absent, 2);
        // 2 present entries out of 3
        assert_eq!(stats.average_rate, 66.7);
    }

    #[test]
    fn test_athlete_rates_ranking() {
        let roster = vec![
            athlete("Cy", "Fox", "", &[]),
            athlete("Ann", "Lee", "", &[(2, true), (1, false), (0, true)]),
            athlete("Bo", "Ray", "", &[(1, true)]),
            athlete("Al", "Fox", "", &[]),
        ];
        let stats = compute_stats(&roster, today(), &DEFAULT_GROUP_ORDER);
        let ranked: Vec<(&str, f64)> = stats
            .athlete_rates
            .iter()
            .map(|r| (r.first_name.as_str(), r.rate))
            .collect();
        assert_eq!(
            ranked,
            vec![("Bo", 100.0), ("Ann", 66.7), ("Al", 0.0), ("Cy", 0.0)]
        );
    }

    #[test]
    fn test_group_stats_order_and_rates() {
        let mut sugar = athlete("Ann", "Lee", "Sugar", &[(0, true), (1, false)]);
        sugar.present = true;
        let roster = vec![
            athlete("Bo", "Ray", "zulu", &[(0, true)]),
            sugar,
            athlete("Cy", "Fox", "Alpha", &[]),
            athlete("Di", "Ng", "chocolate chip", &[(0, false)]),
            athlete("Ed", "Ox", "", &[(0, true)]),
        ];
        let stats = compute_stats(&roster, today(), &DEFAULT_GROUP_ORDER);
        let groups: Vec<&str> = stats.group_stats.iter().map(|g| g.group.as_str()).collect();
        assert_eq!(groups, vec!["chocolate chip", "Sugar", "Alpha", "zulu"]);

        let sugar = &stats.group_stats[1];
        assert_eq!(sugar.members, 1);
        assert_eq!(sugar.present_today, 1);
        assert_eq!(sugar.rate, 50.0);
    }

    #[test]
    fn test_group_order_override() {
        let roster = vec![
            athlete("Ann", "Lee", "Sprinters", &[]),
            athlete("Bo", "Ray", "Distance", &[]),
            athlete("Cy", "Fox", "Throwers", &[]),
        ];
        let order = vec!["Throwers".to_string()];
        let stats = compute_stats(&roster, today(), order.as_slice());
        let groups: Vec<&str> = stats.group_stats.iter().map(|g| g.group.as_str()).collect();
        assert_eq!(groups, vec!["Throwers", "Distance", "Sprinters"]);
    }

    #[test]
    fn test_daily_series() {
        let roster = vec![
            athlete("Ann", "Lee", "", &[(0, true), (3, false), (20, true)]),
            athlete("Bo", "Ray", "", &[(0, false), (0, true), (13, true)]),
        ];
        let stats = compute_stats(&roster, today(), &DEFAULT_GROUP_ORDER);
        let series = &stats.daily_series;
        assert_eq!(series.first().unwrap().date, days_ago(13));
        assert_eq!(series.last().unwrap().date, today());

        assert_eq!(series[13], DailyAttendance { date: today(), present: 2, recorded: 2 });
        assert_eq!(series[10], DailyAttendance { date: days_ago(3), present: 0, recorded: 1 });
        assert_eq!(series[0], DailyAttendance { date: days_ago(13), present: 1, recorded: 1 });
        // Entries older than the window are ignored
        assert_eq!(series.iter().map(|d| d.recorded).sum::<usize>(), 4);
    }

    #[test]
    fn test_most_absent() {
        let roster = vec![
            athlete("Ann", "Lee", "", &[(0, false), (1, false)]),
            athlete("Bo", "Ray", "", &[(0, false)]),
            athlete("Cy", "Fox", "", &[(0, true), (1, false), (2, false)]),
        ];
        let stats = compute_stats(&roster, today(), &DEFAULT_GROUP_ORDER);
        let ranked: Vec<(&str, usize)> = stats
            .most_absent
            .iter()
            .map(|a| (a.name.as_str(), a.absences))
            .collect();
        assert_eq!(ranked, vec![("Cy Fox", 2), ("Ann Lee", 2), ("Bo Ray", 1)]);
    }

    #[test]
    fn test_filtered_view_input() {
        let roster = vec![
            athlete("Ann", "Lee", "Sprinters", &[(0, true)]),
            athlete("Bo", "Ray", "Distance", &[(0, false)]),
        ];
        let view: Vec<&Athlete> = roster.iter().filter(|a| a.workout_group == "Distance").collect();
        let stats = compute_stats(view, today(), &DEFAULT_GROUP_ORDER);
        assert_eq!(stats.total, 1);
        assert_eq!(stats.group_stats.len(), 1);
        assert_eq!(stats.average_rate, 0.0);
    }
}
