//! Owns which catalog record, if any, the detail panel shows.

use crate::catalog::SpaceshipRecord;

/// Idle (nothing selected) or showing exactly one record.
#[derive(Debug, Default)]
pub struct DetailCoordinator {
    selected: Option<&'static SpaceshipRecord>,
}

impl DetailCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show `record`, replacing whatever was shown. No close step in between.
    pub fn select(&mut self, record: &'static SpaceshipRecord) {
        match self.selected {
            Some(prev) if prev.id == record.id => {}
            Some(prev) => log::info!("Selected {} (was {})", record.name, prev.name),
            None => log::info!("Selected {}", record.name),
        }
        self.selected = Some(record);
    }

    /// Back to idle. Closing while idle does nothing.
    pub fn close(&mut self) {
        if let Some(prev) = self.selected.take() {
            log::info!("Closed details for {}", prev.name);
        }
    }

    pub fn selected(&self) -> Option<&'static SpaceshipRecord> {
        self.selected
    }

    pub fn is_open(&self) -> bool {
        self.selected.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::find;

    #[test]
    fn starts_idle() {
        let d = DetailCoordinator::new();
        assert!(!d.is_open());
        assert!(d.selected().is_none());
    }

    #[test]
    fn selecting_while_open_switches_directly() {
        let mut d = DetailCoordinator::new();
        d.select(find(1).unwrap());
        d.select(find(3).unwrap());
        assert!(d.is_open());
        assert_eq!(d.selected().map(|r| r.id), Some(3));
    }

    #[test]
    fn close_returns_to_idle_from_any_state() {
        let mut d = DetailCoordinator::new();
        d.close();
        assert!(!d.is_open());
        d.select(find(2).unwrap());
        d.close();
        assert!(!d.is_open());
        d.close();
        assert!(d.selected().is_none());
    }

    #[test]
    fn reselecting_same_record_keeps_it() {
        let mut d = DetailCoordinator::new();
        d.select(find(4).unwrap());
        d.select(find(4).unwrap());
        assert_eq!(d.selected().map(|r| r.name), Some("Transporte Pesado"));
    }
}
