//! Integration tests for the recurrence and trajectory runs.

use demedrive_sim::base::AlleleState;
use demedrive_sim::simulation::{
    run, run_frequencies, step, step_frequencies, ModelParameters, RunConfig, Termination,
    TrajectoryRunner,
};

fn b2(m: f64, alpha: f64) -> ModelParameters {
    ModelParameters::new(0.5, 0.6, 0.3, m, alpha).unwrap()
}

#[test]
fn test_frequencies_stay_in_unit_interval() {
    let grid = [0.0, 0.05, 0.3, 0.5, 0.95, 1.0];
    for &s in &[0.0, 0.5, 0.9] {
        for &c in &[0.0, 0.6, 1.0] {
            for &m in &[0.0, 0.1, 0.5] {
                for &alpha in &[0.1, 1.0, 2.0] {
                    let params = ModelParameters::new(s, c, 0.3, m, alpha).unwrap();
                    for &q1 in &grid {
                        for &q2 in &grid {
                            let next = step(AlleleState::new_unchecked(q1, q2), &params);
                            assert!(
                                next.validate().is_ok(),
                                "({q1}, {q2}) with s={s} c={c} m={m} alpha={alpha} gave {next}"
                            );
                        }
                    }
                }
            }
        }
    }
}

#[test]
fn test_step_is_deterministic() {
    let a = step_frequencies(0.42, 0.17, 0.5, 0.6, 0.3, 0.02, 0.5);
    let b = step_frequencies(0.42, 0.17, 0.5, 0.6, 0.3, 0.02, 0.5);
    assert_eq!(a.0.to_bits(), b.0.to_bits());
    assert_eq!(a.1.to_bits(), b.1.to_bits());
}

#[test]
fn test_equal_demes_stay_equal_under_symmetric_migration() {
    let params = b2(0.2, 1.0);
    let mut state = AlleleState::new_unchecked(0.35, 0.35);
    for _ in 0..50 {
        state = step(state, &params);
        assert!((state.q1 - state.q2).abs() < 1e-12);
    }
}

#[test]
fn test_run_matches_manual_iteration() {
    let params = b2(0.02, 1.0);
    let config = RunConfig::default();
    let result = run(&params, AlleleState::new_unchecked(0.9, 0.1), &config);

    let mut state = AlleleState::new_unchecked(0.9, 0.1);
    for (generation, recorded) in result.trajectory.iter().enumerate() {
        assert_eq!(*recorded, state, "generation {generation}");
        state = step(state, &params);
    }
    assert_eq!(result.trajectory.len(), result.generations + 1);
    assert_eq!(result.final_state, *result.trajectory.last());
}

#[test]
fn test_b2_scan_outcomes() {
    let config = RunConfig::default();

    let high = run(&b2(0.02, 1.0), AlleleState::new_unchecked(0.9, 0.1), &config);
    assert_eq!(high.trajectory.len(), 90);
    assert!(high.final_state.q1 > 0.9999 && high.final_state.q2 > 0.9999);

    let low = run(&b2(0.02, 1.0), AlleleState::new_unchecked(0.001, 0.01), &config);
    assert_eq!(low.trajectory.len(), 246);
    assert!(low.final_state.q1 < 1e-8 && low.final_state.q2 < 1e-8);

    let asymmetric = run(&b2(0.02, 0.5), AlleleState::new_unchecked(0.9, 0.1), &config);
    assert_eq!(asymmetric.trajectory.len(), 120);
    assert_eq!(asymmetric.termination(&config), Termination::Converged);
}

#[test]
fn test_checked_and_unchecked_runs_agree_on_valid_input() {
    let params = b2(0.05, 1.0);
    let config = RunConfig::new(2_000, 1e-10).unwrap();
    let runner = TrajectoryRunner::new(params, config).unwrap();
    let initial = AlleleState::new(0.7, 0.1).unwrap();

    let checked = runner.run(initial).unwrap();
    let unchecked = run(&params, initial, &config);
    assert_eq!(checked, unchecked);

    let (q1, q2, h1, h2) = run_frequencies(0.5, 0.6, 0.3, 0.05, 1.0, 0.7, 0.1, 2_000, 1e-10);
    assert_eq!((q1, q2), checked.final_state.as_tuple());
    assert_eq!(h1, checked.trajectory.target());
    assert_eq!(h2, checked.trajectory.non_target());
}

#[test]
fn test_max_generations_one_gives_two_entries() {
    let config = RunConfig::new(1, 1e-10).unwrap();
    let result = run(&b2(0.02, 1.0), AlleleState::new_unchecked(0.5, 0.5), &config);
    assert_eq!(result.generations, 1);
    assert_eq!(result.trajectory.len(), 2);
}
