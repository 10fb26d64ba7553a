use crate::Theme;
use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// Something that restyles itself when the active theme changes.
pub trait ThemeObserver {
    fn on_theme_changed(&mut self, theme: &Theme);
}

/// Registry broadcasting the active theme to its observers.
///
/// Observers are held weakly: dropping the last strong handle is enough to
/// stop receiving updates, dead entries are pruned on the next broadcast.
/// Delivery follows registration order.
///
/// The manager is an ordinary value passed to whoever needs it rather than a
/// process-wide static, so tests can run any number of them side by side.
pub struct ThemeManager {
    active: Theme,
    observers: Vec<Weak<RefCell<dyn ThemeObserver>>>,
}

impl Default for ThemeManager {
    fn default() -> Self {
        tracing::debug!("theme manager created with the fallback theme");
        Self::new(Theme::default())
    }
}

impl ThemeManager {
    pub fn new(theme: Theme) -> Self {
        Self {
            active: theme,
            observers: Vec::new(),
        }
    }

    pub fn active_theme(&self) -> &Theme {
        &self.active
    }

    /// Register an observer and immediately deliver the active theme to it.
    ///
    /// Returns `false` if the observer was already registered.
    pub fn register<T: ThemeObserver + 'static>(&mut self, observer: &Rc<RefCell<T>>) -> bool {
        let observer: Rc<RefCell<dyn ThemeObserver>> = observer.clone();
        if self.position_of(&observer).is_some() {
            return false;
        }

        self.observers.push(Rc::downgrade(&observer));
        observer.borrow_mut().on_theme_changed(&self.active);
        true
    }

    /// Remove an observer. Unknown observers are ignored.
    pub fn unregister<T: ThemeObserver + 'static>(&mut self, observer: &Rc<RefCell<T>>) {
        let observer: Rc<RefCell<dyn ThemeObserver>> = observer.clone();
        if let Some(index) = self.position_of(&observer) {
            self.observers.remove(index);
        }
    }

    /// Make `theme` active and deliver it to every live observer.
    pub fn set_theme(&mut self, theme: Theme) {
        tracing::info!(theme = %theme.name, "active theme changed");
        self.active = theme;
        self.notify_all();
    }

    /// Number of observers that are still alive.
    pub fn observer_count(&self) -> usize {
        self.observers
            .iter()
            .filter(|observer| observer.strong_count() > 0)
            .count()
    }

    fn notify_all(&mut self) {
        self.observers.retain(|observer| observer.strong_count() > 0);
        for observer in &self.observers {
            if let Some(observer) = observer.upgrade() {
                observer.borrow_mut().on_theme_changed(&self.active);
            }
        }
    }

    fn position_of(&self, observer: &Rc<RefCell<dyn ThemeObserver>>) -> Option<usize> {
        self.observers
            .iter()
            .position(|known| std::ptr::addr_eq(known.as_ptr(), Rc::as_ptr(observer)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Recorder {
        label: &'static str,
        log: Rc<RefCell<Vec<(&'static str, String)>>>,
    }

    impl ThemeObserver for Recorder {
        fn on_theme_changed(&mut self, theme: &Theme) {
            self.log.borrow_mut().push((self.label, theme.name.clone()));
        }
    }

    fn recorder(
        label: &'static str,
        log: &Rc<RefCell<Vec<(&'static str, String)>>>,
    ) -> Rc<RefCell<Recorder>> {
        Rc::new(RefCell::new(Recorder {
            label,
            log: log.clone(),
        }))
    }

    #[test]
    fn test_register_delivers_active_theme() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut manager = ThemeManager::new(Theme::dark());
        let a = recorder("a", &log);

        assert!(manager.register(&a));
        assert_eq!(log.borrow().as_slice(), &[("a", "dark".to_string())]);

        // Second registration is a no-op
        assert!(!manager.register(&a));
        assert_eq!(log.borrow().len(), 1);
        assert_eq!(manager.observer_count(), 1);
    }

    #[test]
    fn test_set_theme_notifies_in_registration_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut manager = ThemeManager::default();
        let a = recorder("a", &log);
        let b = recorder("b", &log);
        manager.register(&b);
        manager.register(&a);
        log.borrow_mut().clear();

        manager.set_theme(Theme::dark());

        assert_eq!(
            log.borrow().as_slice(),
            &[("b", "dark".to_string()), ("a", "dark".to_string())]
        );
        assert_eq!(manager.active_theme().name, "dark");
    }

    #[test]
    fn test_unregister_is_idempotent() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut manager = ThemeManager::default();
        let a = recorder("a", &log);
        manager.register(&a);

        manager.unregister(&a);
        manager.unregister(&a);
        log.borrow_mut().clear();
        manager.set_theme(Theme::dark());

        assert!(log.borrow().is_empty());
        assert_eq!(manager.observer_count(), 0);
    }

    #[test]
    fn test_dropped_observers_are_pruned() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut manager = ThemeManager::default();
        let a = recorder("a", &log);
        let b = recorder("b", &log);
        manager.register(&a);
        manager.register(&b);

        drop(a);
        log.borrow_mut().clear();
        manager.set_theme(Theme::dark());

        assert_eq!(log.borrow().as_slice(), &[("b", "dark".to_string())]);
        assert_eq!(manager.observer_count(), 1);
    }
}
