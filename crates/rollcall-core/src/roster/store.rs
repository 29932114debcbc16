use chrono::NaiveDate;
use tracing::{debug, info};

use crate::error::RosterError;
use crate::models::{Athlete, AthleteDraft, AthleteId};

/// The owned, ordered roster. Insertion order is preserved; sorted views are
/// derived separately and never reorder the store.
#[derive(Debug, Clone, Default)]
pub struct RosterStore {
    athletes: Vec<Athlete>,
}

impl RosterStore {
    pub fn new(athletes: Vec<Athlete>) -> Self {
        Self { athletes }
    }

    pub fn athletes(&self) -> &[Athlete] {
        &self.athletes
    }

    pub fn len(&self) -> usize {
        self.athletes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.athletes.is_empty()
    }

    pub fn get(&self, id: AthleteId) -> Option<&Athlete> {
        self.athletes.iter().find(|a| a.id == id)
    }

    /// Current position of an athlete, for rendering.
    pub fn position_of(&self, id: AthleteId) -> Option<usize> {
        self.athletes.iter().position(|a| a.id == id)
    }

    /// Resolve a unique id prefix (as typed on the command line).
    /// Returns `None` when nothing or more than one athlete matches.
    pub fn find_by_prefix(&self, prefix: &str) -> Option<AthleteId> {
        let prefix = prefix.trim().to_lowercase().replace('-', "");
        if prefix.is_empty() {
            return None;
        }
        let mut matches = self
            .athletes
            .iter()
            .filter(|a| a.id.as_uuid().simple().to_string().starts_with(&prefix));
        match (matches.next(), matches.next()) {
            (Some(athlete), None) => Some(athlete.id),
            _ => None,
        }
    }

    fn get_mut(&mut self, id: AthleteId) -> Result<&mut Athlete, RosterError> {
        self.athletes
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or(RosterError::NotFound(id))
    }

    /// Validate and append a new athlete. Returns the new id.
    pub fn add(&mut self, draft: &AthleteDraft) -> Result<AthleteId, RosterError> {
        let valid = draft.validate()?;
        let athlete = Athlete::new(
            valid.first_name,
            valid.last_name,
            valid.grade,
            Some(valid.team),
            valid.workout_group,
        );
        let id = athlete.id;
        debug!(%id, name = %athlete.display_name(), "Added athlete");
        self.athletes.push(athlete);
        Ok(id)
    }

    /// Replace an athlete's editable fields. Attendance is kept.
    pub fn update(&mut self, id: AthleteId, draft: &AthleteDraft) -> Result<(), RosterError> {
        let valid = draft.validate()?;
        let athlete = self.get_mut(id)?;
        athlete.first_name = valid.first_name;
        athlete.last_name = valid.last_name;
        athlete.grade = valid.grade;
        athlete.team = Some(valid.team);
        athlete.workout_group = valid.workout_group;
        debug!(%id, "Updated athlete");
        Ok(())
    }

    pub fn remove(&mut self, id: AthleteId) -> Result<Athlete, RosterError> {
        let index = self.position_of(id).ok_or(RosterError::NotFound(id))?;
        let removed = self.athletes.remove(index);
        debug!(%id, name = %removed.display_name(), "Removed athlete");
        Ok(removed)
    }

    /// Flip an athlete's flag for `date`, logging it in their history.
    /// Returns the new flag.
    pub fn toggle_attendance(&mut self, id: AthleteId, date: NaiveDate) -> Result<bool, RosterError> {
        let athlete = self.get_mut(id)?;
        let present = athlete.toggle(date);
        debug!(%id, present, %date, "Toggled attendance");
        Ok(present)
    }

    /// Mark everyone present, or everyone absent if all were already present.
    /// Returns the flag that was applied.
    pub fn toggle_all(&mut self, date: NaiveDate) -> bool {
        let target = !self.athletes.iter().all(|a| a.present);
        for athlete in &mut self.athletes {
            athlete.set_present(date, target);
        }
        info!(count = self.athletes.len(), present = target, "Marked all athletes");
        target
    }

    /// Swap in a whole new roster (CSV import). Returns the previous roster.
    pub fn replace_all(&mut self, athletes: Vec<Athlete>) -> Vec<Athlete> {
        info!(old = self.athletes.len(), new = athletes.len(), "Replacing roster");
        std::mem::replace(&mut self.athletes, athletes)
    }

    pub fn clear(&mut self) -> usize {
        let removed = self.athletes.len();
        self.athletes.clear();
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use crate::models::Team;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 4).unwrap()
    }

    fn draft(first: &str, last: &str) -> AthleteDraft {
        AthleteDraft {
            first_name: first.to_string(),
            last_name: last.to_string(),
            grade: "10".to_string(),
            team: "varsity".to_string(),
            workout_group: "Sprinters".to_string(),
        }
    }

    #[test]
    fn test_add_and_get() {
        let mut store = RosterStore::default();
        let id = store.add(&draft("Jane", "Doe")).unwrap();
        let athlete = store.get(id).unwrap();
        assert_eq!(athlete.team, Some(Team::Varsity));
        assert!(!athlete.present);
        assert_eq!(store.position_of(id), Some(0));
    }

    #[test]
    fn test_add_invalid_leaves_roster_untouched() {
        let mut store = RosterStore::default();
        let err = store.add(&draft("", "Doe")).unwrap_err();
        assert_eq!(err, RosterError::Validation(ValidationError::MissingField("first name")));
        assert!(store.is_empty());
    }

    #[test]
    fn test_update_keeps_attendance() {
        let mut store = RosterStore::default();
        let id = store.add(&draft("Jane", "Doe")).unwrap();
        store.toggle_attendance(id, today()).unwrap();

        let mut edit = draft("Janet", "Doe");
        edit.team = "a".to_string();
        store.update(id, &edit).unwrap();

        let athlete = store.get(id).unwrap();
        assert_eq!(athlete.first_name, "Janet");
        assert_eq!(athlete.team, Some(Team::A));
        assert!(athlete.present);
        assert_eq!(athlete.attendance_history.len(), 1);
    }

    #[test]
    fn test_update_invalid_is_rejected() {
        let mut store = RosterStore::default();
        let id = store.add(&draft("Jane", "Doe")).unwrap();
        let mut edit = draft("Janet", "Doe");
        edit.grade = String::new();
        assert!(store.update(id, &edit).is_err());
        assert_eq!(store.get(id).unwrap().first_name, "Jane");
    }

    #[test]
    fn test_ids_survive_removal() {
        let mut store = RosterStore::default();
        let a = store.add(&draft("Ann", "Lee")).unwrap();
        let b = store.add(&draft("Bo", "Ray")).unwrap();
        let c = store.add(&draft("Cy", "Fox")).unwrap();

        store.remove(a).unwrap();
        assert_eq!(store.position_of(c), Some(1));
        store.toggle_attendance(c, today()).unwrap();
        assert!(store.get(c).unwrap().present);
        assert!(!store.get(b).unwrap().present);
        assert_eq!(store.remove(a).unwrap_err(), RosterError::NotFound(a));
    }

    #[test]
    fn test_toggle_twice_same_day() {
        let mut store = RosterStore::default();
        let id = store.add(&draft("Jane", "Doe")).unwrap();
        assert!(store.toggle_attendance(id, today()).unwrap());
        assert!(!store.toggle_attendance(id, today()).unwrap());

        let history = &store.get(id).unwrap().attendance_history;
        assert_eq!(history.len(), 2);
        assert!(history.iter().all(|e| e.date == today()));
        assert!(history[0].present && !history[1].present);
        assert_eq!(store.athletes().iter().filter(|a| a.present).count(), 0);
    }

    #[test]
    fn test_toggle_all() {
        let mut store = RosterStore::default();
        let a = store.add(&draft("Ann", "Lee")).unwrap();
        store.add(&draft("Bo", "Ray")).unwrap();
        store.toggle_attendance(a, today()).unwrap();

        assert!(store.toggle_all(today()));
        assert!(store.athletes().iter().all(|x| x.present));
        assert!(!store.toggle_all(today()));
        assert!(store.athletes().iter().all(|x| !x.present));
        assert_eq!(store.get(a).unwrap().attendance_history.len(), 3);
    }

    #[test]
    fn test_replace_and_clear() {
        let mut store = RosterStore::default();
        store.add(&draft("Ann", "Lee")).unwrap();
        let previous = store.replace_all(vec![Athlete::new("Bo", "Ray", "9", None, "")]);
        assert_eq!(previous.len(), 1);
        assert_eq!(store.athletes()[0].first_name, "Bo");
        assert_eq!(store.clear(), 1);
        assert!(store.is_empty());
    }

    #[test]
    fn test_find_by_prefix() {
        let mut store = RosterStore::default();
        let id = store.add(&draft("Ann", "Lee")).unwrap();
        assert_eq!(store.find_by_prefix(&id.short()), Some(id));
        assert_eq!(store.find_by_prefix(&id.to_string()), Some(id));
        assert_eq!(store.find_by_prefix(""), None);
        assert_eq!(store.find_by_prefix("not-an-id"), None);
    }
}
