use reflex_core::gameplay::rank::{get_rank, RankThresholds};
use reflex_core::Rank;

#[test]
fn test_rank_boundaries_are_inclusive() {
    assert_eq!(get_rank(0), Rank::LightningFast);
    assert_eq!(get_rank(180), Rank::LightningFast);
    assert_eq!(get_rank(181), Rank::Fast);
    assert_eq!(get_rank(250), Rank::Fast);
    assert_eq!(get_rank(251), Rank::Average);
    assert_eq!(get_rank(350), Rank::Average);
    assert_eq!(get_rank(351), Rank::Slow);
    assert_eq!(get_rank(10_000), Rank::Slow);
}

#[test]
fn test_custom_thresholds() {
    // Stricter table, e.g. for a "pro" config file.
    let ranks = RankThresholds {
        lightning_fast_ms: 150,
        fast_ms: 200,
        average_ms: 300,
    };
    assert_eq!(ranks.classify(160), Rank::Fast);
    assert_eq!(ranks.classify(237), Rank::Average);
    assert_eq!(ranks.classify(301), Rank::Slow);
    assert!(ranks.is_increasing());
}

#[test]
fn test_rank_labels() {
    assert_eq!(Rank::LightningFast.to_string(), "LIGHTNING_FAST");
    assert_eq!(Rank::Average.as_str(), "AVERAGE");
}
