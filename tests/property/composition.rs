//! Property-based tests for card composition

use agentcard::agent::{AgentProfile, MetricList, SkillList};
use agentcard::card::{compose_card, ActionKind};
use proptest::prelude::*;

fn any_profile() -> impl Strategy<Value = AgentProfile> {
    (
        "[a-zA-Z0-9 ]{0,24}",
        "[a-zA-Z ]{0,80}",
        prop::collection::vec("[a-zA-Z ]{0,22}", 0..=5),
        prop::collection::vec("[a-zA-Z0-9 ]{0,22}", 0..=3),
        any::<bool>(),
        any::<bool>(),
    )
        .prop_map(|(name, description, skills, metrics, show_details, show_execute)| AgentProfile {
            name,
            description,
            skills: SkillList::with_items(skills).unwrap(),
            metrics: MetricList::with_items(metrics).unwrap(),
            image: None,
            show_details,
            show_execute,
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(12))]

    /// Composing the same profile twice gives identical pixels.
    #[test]
    fn test_composition_is_idempotent(profile in any_profile()) {
        let first = compose_card(&profile, None);
        let second = compose_card(&profile, None);
        prop_assert_eq!(first.image, second.image);
        prop_assert_eq!(first.layout, second.layout);
    }

    /// Each button indicator appears exactly when its toggle is on.
    #[test]
    fn test_indicators_follow_toggles(profile in any_profile()) {
        let card = compose_card(&profile, None);
        prop_assert_eq!(card.has_action(ActionKind::Details), profile.show_details);
        prop_assert_eq!(card.has_action(ActionKind::Execute), profile.show_execute);
        prop_assert!(card.layout.title.lines.len() <= 1);
        prop_assert!(card.layout.description.lines.len() <= 3);
    }
}
