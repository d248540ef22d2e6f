//! Tests for alert FSM components.

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::super::alert::{AlertState, EnemyState, IndicatorColor};
    use super::super::senses::EnemySenses;

    #[rstest]
    #[case(0.0, EnemyState::Idle)]
    #[case(25.0, EnemyState::Idle)]
    #[case(49.99, EnemyState::Idle)]
    #[case(50.0, EnemyState::Caution)]
    #[case(74.99, EnemyState::Caution)]
    #[case(75.0, EnemyState::Alert)]
    #[case(100.0, EnemyState::Alert)]
    fn test_state_from_level(#[case] level: f32, #[case] expected: EnemyState) {
        assert_eq!(EnemyState::from_level(level, &EnemySenses::default()), expected);
    }

    #[test]
    fn test_raise_clamps_at_max() {
        let mut alert = AlertState::default();
        for _ in 0..30 {
            alert.raise(5.0, 100.0);
            assert!(alert.level() <= 100.0);
        }
        assert_eq!(alert.level(), 100.0);
    }

    #[test]
    fn test_set_level_clamps_both_sides() {
        let mut alert = AlertState::default();
        alert.set_level(250.0, 100.0);
        assert_eq!(alert.level(), 100.0);
        alert.set_level(-4.0, 100.0);
        assert_eq!(alert.level(), 0.0);
    }

    #[test]
    fn test_decay_never_goes_negative() {
        let mut alert = AlertState::default();
        alert.raise(3.0, 100.0);
        alert.decay(10.0);
        assert_eq!(alert.level(), 0.0);
    }

    #[test]
    fn test_initial_entry_is_pending_once() {
        let senses = EnemySenses::default();
        let mut alert = AlertState::default();

        assert_eq!(alert.pending_transition(&senses), Some(EnemyState::Idle));
        alert.commit(EnemyState::Idle);
        // Тот же state повторно не отыгрывается
        assert_eq!(alert.pending_transition(&senses), None);
    }

    #[test]
    fn test_configured_initial_state_holds() {
        let senses = EnemySenses::default();
        let alert = AlertState::new(EnemyState::Caution, &senses);

        assert_eq!(alert.level(), 50.0);
        assert_eq!(alert.pending_transition(&senses), Some(EnemyState::Caution));
    }

    #[test]
    fn test_dead_is_terminal() {
        let senses = EnemySenses::default();
        let mut alert = AlertState::default();
        alert.commit(EnemyState::Idle);

        assert!(alert.force_dead());
        assert!(!alert.force_dead());

        alert.raise(100.0, 100.0);
        alert.set_level(80.0, 100.0);
        alert.request_reentry();

        assert_eq!(alert.state(), EnemyState::Dead);
        assert_eq!(alert.pending_transition(&senses), None);
    }

    #[test]
    fn test_indicator_colors() {
        assert_eq!(EnemyState::Idle.indicator(), IndicatorColor::Blue);
        assert_eq!(EnemyState::Caution.indicator(), IndicatorColor::Magenta);
        assert_eq!(EnemyState::Alert.indicator(), IndicatorColor::Red);
    }
}
