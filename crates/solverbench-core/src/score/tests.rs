//! Tests for score types.

use super::*;

// ============================================================================
// SimpleScore Tests
// ============================================================================

mod simple_score {
    use super::*;

    #[test]
    fn test_creation() {
        let score = SimpleScore::of(-5);
        assert_eq!(score.score(), -5);
        assert_eq!(SimpleScore::from(7), SimpleScore::of(7));
    }

    #[test]
    fn test_feasibility() {
        assert!(SimpleScore::of(0).is_feasible());
        assert!(SimpleScore::of(10).is_feasible());
        assert!(!SimpleScore::of(-1).is_feasible());
    }

    #[test]
    fn test_comparison() {
        let s1 = SimpleScore::of(-10);
        let s2 = SimpleScore::of(-5);

        assert!(s2 > s1);
        assert!(s2.is_better_than(&s1));
        assert!(!s1.is_better_than(&s1));
    }

    #[test]
    fn test_levels() {
        assert_eq!(SimpleScore::levels_count(), 1);
        assert_eq!(SimpleScore::of(-3).to_level_numbers(), vec![-3]);
        assert_eq!(SimpleScore::level_label(0), ScoreLevel::Simple);
    }

    #[test]
    #[should_panic(expected = "SimpleScore has 1 level")]
    fn test_level_label_out_of_range() {
        SimpleScore::level_label(1);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", SimpleScore::of(-42)), "-42");
        assert_eq!(format!("{:?}", SimpleScore::of(-42)), "SimpleScore(-42)");
    }
}

// ============================================================================
// HardSoftScore Tests
// ============================================================================

mod hard_soft_score {
    use super::*;

    #[test]
    fn test_hard_level_dominates() {
        let infeasible = HardSoftScore::of(-1, 0);
        let feasible = HardSoftScore::of(0, -1000);
        assert!(feasible > infeasible);
        assert!(feasible.is_feasible());
        assert!(!infeasible.is_feasible());
    }

    #[test]
    fn test_soft_breaks_ties() {
        assert!(HardSoftScore::of(0, -1) > HardSoftScore::of(0, -2));
    }

    #[test]
    fn test_levels() {
        let score = HardSoftScore::of(-2, -30);
        assert_eq!(HardSoftScore::levels_count(), 2);
        assert_eq!(score.to_level_numbers(), vec![-2, -30]);
        assert_eq!(HardSoftScore::level_label(0).label(), "hard");
        assert_eq!(HardSoftScore::level_label(1).label(), "soft");
    }

    #[test]
    fn test_zero_and_default_agree() {
        assert_eq!(HardSoftScore::zero(), HardSoftScore::default());
        assert_eq!(HardSoftScore::ZERO.hard(), 0);
        assert_eq!(HardSoftScore::ZERO.soft(), 0);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", HardSoftScore::of(-1, -20)), "-1hard/-20soft");
    }
}
