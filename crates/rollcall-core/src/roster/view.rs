use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::models::{Athlete, Team, GRADE_ORDER};
use crate::utils::{cmp_ignore_case, eq_ignore_case};

/// Optional exact-match criteria. Blank criteria match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub grade: Option<String>,
    pub team: Option<String>,
    pub workout_group: Option<String>,
}

impl FilterCriteria {
    pub fn is_empty(&self) -> bool {
        [&self.grade, &self.team, &self.workout_group]
            .iter()
            .all(|c| criterion(c).is_none())
    }

    pub fn matches(&self, athlete: &Athlete) -> bool {
        let check = |wanted: &Option<String>, actual: &str| {
            criterion(wanted).map_or(true, |w| eq_ignore_case(w, actual))
        };
        check(&self.grade, &athlete.grade)
            && check(&self.team, athlete.team_label())
            && check(&self.workout_group, &athlete.workout_group)
    }
}

fn criterion(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

// Sorting options for the roster view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    Name,
    Grade,
    Team,
    Group,
}

impl SortKey {
    pub const ALL: [SortKey; 4] = [SortKey::Name, SortKey::Grade, SortKey::Team, SortKey::Group];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Name => "name",
            SortKey::Grade => "grade",
            SortKey::Team => "team",
            SortKey::Group => "group",
        }
    }

    /// Full comparison chain for this key. The chain always ends on a field
    /// that differs between distinct athletes in practice, so the order is
    /// deterministic.
    pub fn compare(&self, a: &Athlete, b: &Athlete) -> Ordering {
        let name = || cmp_ignore_case(&a.display_name(), &b.display_name());
        let team = || a.team_rank().cmp(&b.team_rank());
        let group = || cmp_ignore_case(a.workout_group.trim(), b.workout_group.trim());
        let grade = || a.grade_rank().cmp(&b.grade_rank());

        match self {
            SortKey::Name => name()
                .then_with(team)
                .then_with(group)
                .then_with(grade),
            SortKey::Grade => grade()
                .then_with(team)
                .then_with(group)
                .then_with(name),
            SortKey::Team => team()
                .then_with(group)
                .then_with(grade)
                .then_with(name),
            SortKey::Group => group()
                .then_with(team)
                .then_with(grade)
                .then_with(name),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortKey::ALL
            .into_iter()
            .find(|k| eq_ignore_case(k.as_str(), s))
            .ok_or_else(|| format!("unknown sort key \"{}\" (expected name, grade, team or group)", s))
    }
}

/// Athletes matching every supplied criterion, in roster order.
pub fn filter<'a>(athletes: &'a [Athlete], criteria: &FilterCriteria) -> Vec<&'a Athlete> {
    athletes.iter().filter(|a| criteria.matches(a)).collect()
}

/// Stable sort of a view by `key`.
pub fn sort(view: &mut [&Athlete], key: SortKey) {
    view.sort_by(|a, b| key.compare(a, b));
}

/// Filter then sort, without touching the roster itself.
pub fn filter_and_sort<'a>(
    athletes: &'a [Athlete],
    criteria: &FilterCriteria,
    key: SortKey,
) -> Vec<&'a Athlete> {
    let mut view = filter(athletes, criteria);
    sort(&mut view, key);
    view
}

/// Distinct values present in a roster, for offering filter choices.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterOptions {
    /// Recognized grades only, in grade order
    pub grades: Vec<String>,
    /// In team rank order
    pub teams: Vec<Team>,
    /// Sorted alphabetically
    pub workout_groups: Vec<String>,
}

impl FilterOptions {
    pub fn from_roster(athletes: &[Athlete]) -> Self {
        let grades = GRADE_ORDER
            .iter()
            .filter(|g| athletes.iter().any(|a| a.grade.trim() == **g))
            .map(|g| g.to_string())
            .collect();

        let teams: BTreeSet<Team> = athletes.iter().filter_map(|a| a.team).collect();

        let mut workout_groups: Vec<String> = athletes
            .iter()
            .map(|a| a.workout_group.trim())
            .filter(|g| !g.is_empty())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect();
        workout_groups.sort_by(|a, b| cmp_ignore_case(a, b));

        Self {
            grades,
            teams: teams.into_iter().collect(),
            workout_groups,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn athlete(first: &str, last: &str, grade: &str, team: Option<Team>, group: &str) -> Athlete {
        Athlete::new(first, last, grade, team, group)
    }

    fn roster() -> Vec<Athlete> {
        vec![
            athlete("Zoe", "Adams", "12", Some(Team::Jv), "Throwers"),
            athlete("amy", "Baker", "9", Some(Team::Varsity), "Sprinters"),
            athlete("Cal", "Diaz", "", None, "Distance"),
            athlete("Ben", "Cole", "9", Some(Team::Varsity), "Distance"),
            athlete("Ada", "Eve", "7", Some(Team::DevSquad), ""),
        ]
    }

    fn names(view: &[&Athlete]) -> Vec<String> {
        view.iter().map(|a| a.first_name.clone()).collect()
    }

    #[test]
    fn test_filter_matches_all_criteria() {
        let roster = roster();
        let criteria = FilterCriteria {
            grade: Some(" 9 ".to_string()),
            team: Some("varsity".to_string()),
            workout_group: None,
        };
        assert_eq!(names(&filter(&roster, &criteria)), vec!["amy", "Ben"]);

        let criteria = FilterCriteria {
            workout_group: Some("distance".to_string()),
            ..Default::default()
        };
        assert_eq!(names(&filter(&roster, &criteria)), vec!["Cal", "Ben"]);
    }

    #[test]
    fn test_empty_criteria_match_everything() {
        let roster = roster();
        let criteria = FilterCriteria {
            grade: Some("  ".to_string()),
            ..Default::default()
        };
        assert!(criteria.is_empty());
        assert_eq!(filter(&roster, &criteria).len(), roster.len());
    }

    #[test]
    fn test_sort_by_name_is_case_insensitive() {
        let roster = roster();
        let view = filter_and_sort(&roster, &FilterCriteria::default(), SortKey::Name);
        assert_eq!(names(&view), vec!["Ada", "amy", "Ben", "Cal", "Zoe"]);
    }

    #[test]
    fn test_sort_by_grade_unknown_last() {
        let roster = roster();
        let view = filter_and_sort(&roster, &FilterCriteria::default(), SortKey::Grade);
        // 9th graders tie on grade and team, then group breaks the tie
        assert_eq!(names(&view), vec!["Ada", "Ben", "amy", "Zoe", "Cal"]);
    }

    #[test]
    fn test_sort_by_team_unrecognized_last() {
        let roster = roster();
        let view = filter_and_sort(&roster, &FilterCriteria::default(), SortKey::Team);
        assert_eq!(names(&view), vec!["Ben", "amy", "Zoe", "Ada", "Cal"]);
    }

    #[test]
    fn test_sort_by_group() {
        let roster = roster();
        let view = filter_and_sort(&roster, &FilterCriteria::default(), SortKey::Group);
        // Empty group sorts first, then Distance (Varsity before unranked)
        assert_eq!(names(&view), vec!["Ada", "Ben", "Cal", "amy", "Zoe"]);
    }

    #[test]
    fn test_sort_is_idempotent() {
        let roster = roster();
        for key in SortKey::ALL {
            let mut view = filter_and_sort(&roster, &FilterCriteria::default(), key);
            let first: Vec<_> = view.iter().map(|a| a.id).collect();
            sort(&mut view, key);
            let second: Vec<_> = view.iter().map(|a| a.id).collect();
            assert_eq!(first, second, "sorting by {} twice changed the order", key);
        }
    }

    #[test]
    fn test_sort_does_not_reorder_roster() {
        let roster = roster();
        let before: Vec<_> = roster.iter().map(|a| a.id).collect();
        let _ = filter_and_sort(&roster, &FilterCriteria::default(), SortKey::Team);
        let after: Vec<_> = roster.iter().map(|a| a.id).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_sort_key_parse() {
        assert_eq!("Grade".parse::<SortKey>(), Ok(SortKey::Grade));
        assert_eq!("group".parse::<SortKey>(), Ok(SortKey::Group));
        assert!("age".parse::<SortKey>().is_err());
        assert_eq!(SortKey::Team.to_string(), "team");
    }

    #[test]
    fn test_filter_options() {
        let options = FilterOptions::from_roster(&roster());
        assert_eq!(options.grades, vec!["7", "9", "12"]);
        assert_eq!(options.teams, vec![Team::Varsity, Team::Jv, Team::DevSquad]);
        assert_eq!(options.workout_groups, vec!["Distance", "Sprinters", "Throwers"]);
    }
}
