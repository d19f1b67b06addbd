//! Integration tests for batch analyses on the reference presets.

use demedrive_analysis::analysis::{
    critical_grid, scan_initial_conditions, GridConfig, Outcome, Preset,
};
use demedrive_sim::simulation::{RunConfig, SearchConfig, DEFAULT_SEARCH_INITIAL};

#[test]
fn test_malaria_preset_loses_drive_above_threshold() {
    let preset = Preset::MALARIA;
    let rows = scan_initial_conditions(
        &preset.params().unwrap(),
        &preset.initial_states(),
        &RunConfig::default(),
    )
    .unwrap();
    assert!(rows.iter().all(|r| r.outcome == Outcome::Loss));
}

#[test]
fn test_rodent_preset_depends_on_initial_state() {
    let preset = Preset::RODENT;
    let rows = scan_initial_conditions(
        &preset.params().unwrap(),
        &preset.initial_states(),
        &RunConfig::default(),
    )
    .unwrap();
    assert_eq!(rows[0].outcome, Outcome::Loss);
    assert_eq!(rows[1].outcome, Outcome::Fixation);
}

#[test]
fn test_reduced_reverse_migration_allows_differential_targeting() {
    let preset = Preset::RODENT.with_migration(0.08, 0.1);
    let rows = scan_initial_conditions(
        &preset.params().unwrap(),
        &preset.initial_states(),
        &RunConfig::default(),
    )
    .unwrap();
    assert_eq!(rows[1].outcome, Outcome::DifferentialTargeting);
    assert!((rows[1].final_state.q1 - 0.8678222810435375).abs() < 1e-9);
    assert!((rows[1].final_state.q2 - 0.017219377559206224).abs() < 1e-9);
}

#[test]
fn test_alpha_grid_over_presets() {
    let configs: Vec<GridConfig> = Preset::ALL
        .iter()
        .flat_map(|p| [0.5, 2.0].map(|alpha| GridConfig::new(p.s, p.c, p.h, alpha)))
        .collect();
    let rows = critical_grid(&configs, DEFAULT_SEARCH_INITIAL, &SearchConfig::default());
    let estimates: Vec<f64> = rows.iter().filter_map(|r| r.m_star).collect();
    assert_eq!(
        estimates,
        vec![0.1611328125, 0.095703125, 0.443359375, 0.25, 0.33203125, 0.2353515625]
    );
}
