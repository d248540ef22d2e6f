//! Tests for FootprintRegistry and FootprintToggle.

#[cfg(test)]
mod tests {
    use bevy::prelude::*;

    use super::super::registry::{FootprintId, FootprintRegistry, FootprintSettings, FootprintToggle};

    #[test]
    fn test_insert_keeps_insertion_order() {
        let mut registry = FootprintRegistry::default();
        let a = registry.insert(Vec3::new(1.0, 0.0, 0.0), 0);
        let b = registry.insert(Vec3::new(2.0, 0.0, 0.0), 3);
        let c = registry.insert(Vec3::new(3.0, 0.0, 0.0), 7);

        let ids: Vec<FootprintId> = registry.iter().map(|f| f.id).collect();
        assert_eq!(ids, vec![a.id, b.id, c.id]);
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut registry = FootprintRegistry::default();
        let footprint = registry.insert(Vec3::ZERO, 0);

        assert_eq!(registry.remove(footprint.id), Some(footprint));
        assert_eq!(registry.remove(footprint.id), None);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_ids_are_not_reused() {
        let mut registry = FootprintRegistry::default();
        let first = registry.insert(Vec3::ZERO, 0);
        registry.remove(first.id);
        let second = registry.insert(Vec3::ZERO, 1);

        assert_ne!(first.id, second.id);
        assert!(!registry.contains(first.id));
        assert!(registry.contains(second.id));
    }

    #[test]
    fn test_expired_by_age() {
        let mut registry = FootprintRegistry::default();
        let old = registry.insert(Vec3::ZERO, 0);
        let young = registry.insert(Vec3::X, 50);

        assert!(registry.expired(99, 100).is_empty());
        assert_eq!(registry.expired(100, 100), vec![old.id]);
        assert_eq!(registry.expired(150, 100), vec![old.id, young.id]);
    }

    #[test]
    fn test_toggle_window_expires() {
        let mut toggle = FootprintToggle::default();
        assert!(!toggle.is_enabled(0));

        toggle.restart_window(10, 600);
        assert!(toggle.is_enabled(10));
        assert!(toggle.is_enabled(609));
        assert!(!toggle.is_enabled(610));
    }

    #[test]
    fn test_toggle_window_restarts_on_new_contact() {
        let mut toggle = FootprintToggle::default();
        toggle.restart_window(0, 600);
        toggle.restart_window(500, 600);
        assert!(toggle.is_enabled(1000));
        assert!(!toggle.is_enabled(1100));
    }

    #[test]
    fn test_toggle_forced() {
        let mut toggle = FootprintToggle::default();
        toggle.set_enabled(true);
        assert!(toggle.is_enabled(u64::MAX));

        toggle.set_enabled(false);
        assert!(!toggle.is_enabled(0));
    }

    #[test]
    fn test_settings_default_and_validation() {
        let settings = FootprintSettings::default();
        assert_eq!(settings.lifetime_secs, 20.0);
        assert_eq!(settings.enable_window_secs, 10.0);
        assert!(settings.validate().is_ok());

        let broken = FootprintSettings {
            lifetime_secs: 0.0,
            ..Default::default()
        };
        assert!(broken.validate().is_err());
    }
}
