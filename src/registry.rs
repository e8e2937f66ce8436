use std::collections::HashMap;

use tracing::{debug, warn};

use crate::error::ManagerError;
use crate::screen::{Screen, ScreenId};

/// Registered screens plus the pointer to the active one.
///
/// Before the first registration the active id is the bootstrap default
/// `0`, which need not name a registered screen. The first screen added to
/// an empty registry becomes active.
pub struct ScreenRegistry {
    screens: HashMap<ScreenId, Box<dyn Screen>>,
    active: ScreenId,
}

impl ScreenRegistry {
    pub fn new() -> Self {
        Self {
            screens: HashMap::new(),
            active: ScreenId::default(),
        }
    }

    /// Register a screen under its own id.
    ///
    /// If a screen with the same id already exists, it is replaced and
    /// returned (last registration wins).
    pub fn insert(&mut self, screen: Box<dyn Screen>) -> Option<Box<dyn Screen>> {
        let id = screen.id();
        let was_empty = self.screens.is_empty();
        let replaced = self.screens.insert(id, screen);

        if replaced.is_some() {
            warn!(id, "Replaced previously registered screen");
        } else {
            debug!(id, "Registered screen");
        }
        if was_empty {
            self.active = id;
        }
        replaced
    }

    pub fn set_active(&mut self, id: ScreenId) -> Result<(), ManagerError> {
        if id == self.active {
            return Ok(());
        }
        if !self.screens.contains_key(&id) {
            return Err(ManagerError::InvalidScreenId(id));
        }
        debug!(from = self.active, to = id, "Switching active screen");
        self.active = id;
        Ok(())
    }

    pub const fn active(&self) -> ScreenId {
        self.active
    }

    pub fn active_mut(&mut self) -> Result<&mut dyn Screen, ManagerError> {
        self.get_mut(self.active)
    }

    pub fn get_mut(&mut self, id: ScreenId) -> Result<&mut dyn Screen, ManagerError> {
        match self.screens.get_mut(&id) {
            Some(screen) => Ok(screen.as_mut()),
            None => Err(ManagerError::InvalidScreenId(id)),
        }
    }

    /// Registered ids in ascending order.
    pub fn ids(&self) -> Vec<ScreenId> {
        let mut ids: Vec<_> = self.screens.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    pub fn len(&self) -> usize {
        self.screens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.screens.is_empty()
    }
}

impl Default for ScreenRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEvent;
    use ratatui::Frame;

    struct MockScreen {
        id: ScreenId,
    }

    impl Screen for MockScreen {
        fn id(&self) -> ScreenId {
            self.id
        }

        fn handle_key_event(&mut self, _key: KeyEvent) -> ScreenId {
            self.id
        }

        fn draw(&mut self, _frame: &mut Frame) {}
    }

    fn mock(id: ScreenId) -> Box<dyn Screen> {
        Box::new(MockScreen { id })
    }

    #[test]
    fn test_bootstrap_active_is_default() {
        let registry = ScreenRegistry::new();

        assert_eq!(registry.active(), 0);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_first_insert_becomes_active() {
        let mut registry = ScreenRegistry::new();
        registry.insert(mock(7));
        registry.insert(mock(3));

        assert_eq!(registry.active(), 7);
        assert_eq!(registry.ids(), vec![3, 7]);
    }

    #[test]
    fn test_duplicate_id_replaces_and_returns_previous() {
        let mut registry = ScreenRegistry::new();
        assert!(registry.insert(mock(1)).is_none());

        let replaced = registry.insert(mock(1));

        assert!(replaced.is_some());
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.active(), 1);
    }

    #[test]
    fn test_set_active_unknown_id_keeps_pointer() {
        let mut registry = ScreenRegistry::new();
        registry.insert(mock(1));

        let result = registry.set_active(9);

        assert!(matches!(result, Err(ManagerError::InvalidScreenId(9))));
        assert_eq!(registry.active(), 1);
    }

    #[test]
    fn test_set_active_same_id_is_noop_even_when_unregistered() {
        let mut registry = ScreenRegistry::new();

        assert!(registry.set_active(0).is_ok());
        assert_eq!(registry.active(), 0);
    }

    #[test]
    fn test_get_mut_returns_registered_screen() {
        let mut registry = ScreenRegistry::new();
        registry.insert(mock(1));
        registry.insert(mock(2));

        assert_eq!(registry.get_mut(2).unwrap().id(), 2);
        assert!(matches!(
            registry.get_mut(5),
            Err(ManagerError::InvalidScreenId(5))
        ));
    }
}
