//! Integration tests for the critical migration search.

use demedrive_sim::base::AlleleState;
use demedrive_sim::simulation::{
    find_critical_migration, probe, CriticalSearch, ModelParameters, RunConfig, SearchConfig,
    DEFAULT_SEARCH_INITIAL,
};

fn predicate_at(s: f64, c: f64, h: f64, alpha: f64, m: f64) -> bool {
    let params = ModelParameters::new_unchecked(s, c, h, 0.0, alpha);
    probe(&params, m, DEFAULT_SEARCH_INITIAL, &RunConfig::default()).differential_targeting
}

#[test]
fn test_published_configurations() {
    assert_eq!(find_critical_migration(0.5, 0.6, 0.3, 1.0, 0.7, 0.1, 0.001), 0.1015625);
    assert_eq!(find_critical_migration(0.73, 1.0, 0.5, 1.0, 0.7, 0.1, 0.001), 0.3203125);
    assert_eq!(find_critical_migration(0.6, 0.72, 1.0, 1.0, 0.7, 0.1, 0.001), 0.2314453125);
}

#[test]
fn test_low_alpha_raises_threshold() {
    let symmetric = find_critical_migration(0.6, 0.72, 1.0, 1.0, 0.7, 0.1, 0.001);
    let asymmetric = find_critical_migration(0.6, 0.72, 1.0, 0.1, 0.7, 0.1, 0.001);
    assert_eq!(asymmetric, 0.4990234375);
    assert!(asymmetric > symmetric);
}

#[test]
fn test_estimate_brackets_the_threshold() {
    let m_star = find_critical_migration(0.5, 0.6, 0.3, 1.0, 0.7, 0.1, 0.001);
    assert!(predicate_at(0.5, 0.6, 0.3, 1.0, m_star));
    assert!(predicate_at(0.5, 0.6, 0.3, 1.0, m_star - 0.001));
    assert!(!predicate_at(0.5, 0.6, 0.3, 1.0, m_star + 0.001));
}

#[test]
fn test_finer_precision() {
    let m_star = find_critical_migration(0.5, 0.6, 0.3, 1.0, 0.7, 0.1, 1e-4);
    assert_eq!(m_star, 0.10198974609375);

    let params = ModelParameters::new(0.5, 0.6, 0.3, 0.0, 1.0).unwrap();
    let config = SearchConfig::with_precision(1e-4).unwrap();
    let result = CriticalSearch::with_config(params, DEFAULT_SEARCH_INITIAL, config)
        .unwrap()
        .run();
    assert_eq!(result.m_star, m_star);
    assert_eq!(result.iterations, 13);
}

#[test]
fn test_neutral_model_search_climbs_to_upper_bound() {
    // Without selection or conversion the demes only mix, and the target
    // deme keeps a vanishing lead at every migration rate
    let m_star = find_critical_migration(0.0, 0.0, 0.0, 1.0, 0.7, 0.1, 0.001);
    assert_eq!(m_star, 0.4990234375);
    assert!(predicate_at(0.0, 0.0, 0.0, 1.0, 0.25));
}

#[test]
fn test_absent_drive_search_stays_at_lower_bound() {
    let m_star = find_critical_migration(0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.001);
    assert_eq!(m_star, 0.0);
}

#[test]
fn test_search_records_every_probe() {
    let search = CriticalSearch::new(0.73, 1.0, 0.5).unwrap();
    let result = search.run();
    assert_eq!(result.m_star, 0.3203125);
    assert_eq!(result.probes.len(), result.iterations);
    assert_eq!(result.probes[0].m, 0.25);
    for p in &result.probes {
        assert_eq!(
            p.differential_targeting,
            p.final_state.has_differential_targeting()
        );
    }
}

#[test]
fn test_custom_initial_state() {
    let params = ModelParameters::new(0.5, 0.6, 0.3, 0.0, 1.0).unwrap();
    let search = CriticalSearch::with_config(
        params,
        AlleleState::new(0.9, 0.1).unwrap(),
        SearchConfig::default(),
    )
    .unwrap();
    assert_eq!(search.run().m_star, 0.1044921875);
}
