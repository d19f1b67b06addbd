use demedrive_analysis::analysis::{AlphaTrajectory, GridRow, ScanRow};
use demedrive_sim::simulation::{
    Configuration, ConvergenceResult, CriticalMigration, MonotonicityReport, Termination,
};

use crate::defaults::MAX_PRINTED_ROWS;

pub fn print_model(config: &Configuration) {
    let model = &config.model;
    println!("\n📋 Model Parameters");
    println!("  • Selection: {} [-s, --selection]", model.s);
    println!("  • Conversion: {} [-c, --conversion]", model.c);
    println!("  • Dominance: {} [--dominance]", model.h);
    println!("  • Migration: {} [-m, --migration]", model.m);
    println!(
        "  • Asymmetry: {} (reverse migration {}) [--alpha]",
        model.alpha,
        model.alpha * model.m
    );
}

pub fn print_execution(config: &Configuration) {
    println!("\n⚙️  Execution");
    println!(
        "  • Initial State: q1={}, q2={} [--q1, --q2]",
        config.initial.q1, config.initial.q2
    );
    println!(
        "  • Max Generations: {} [--max-generations]",
        config.execution.max_generations
    );
    println!(
        "  • Convergence Threshold: {:.1e} [--threshold]",
        config.execution.convergence_threshold
    );
}

pub fn print_parameters(config: &Configuration) {
    print_model(config);
    print_execution(config);
    println!("\n🔎 Critical Search");
    println!("  • Precision: {} [--precision]", config.search.precision);
    println!(
        "  • Interval: [{}, {}]",
        config.search.m_low, config.search.m_high
    );
    match config.search.monotonicity_samples {
        Some(k) => println!("  • Monotonicity Check: {k} samples"),
        None => println!("  • Monotonicity Check: Disabled"),
    }
    println!("\n🐭 Sampling");
    println!("  • Individuals per Deme: {}", config.sampling.individuals);
    match config.sampling.seed {
        Some(seed) => println!("  • Random Seed: {seed} [--seed]"),
        None => println!("  • Random Seed: Random [--seed]"),
    }
    println!();
}

pub fn print_run_summary(result: &ConvergenceResult, termination: Termination) {
    println!("\n📈 Trajectory");
    match termination {
        Termination::Converged => {
            println!("  • Converged after {} generations", result.generations)
        }
        Termination::Exhausted => println!(
            "  • Generation budget exhausted after {} generations",
            result.generations
        ),
    }
    println!("  • Final q1 (target): {}", result.final_state.q1);
    println!("  • Final q2 (non-target): {}", result.final_state.q2);
    println!(
        "  • Differential targeting: {}",
        if result.final_state.has_differential_targeting() { "yes" } else { "no" }
    );
}

pub fn print_critical(result: &CriticalMigration) {
    println!("\n🎯 Critical Migration Threshold");
    println!("  • m* ≈ {:.4}", result.m_star);
    println!("  • Bracket: [{}, {}]", result.m_star, result.m_high);
    println!("  • Iterations: {}", result.iterations);
}

pub fn print_monotonicity(report: &MonotonicityReport) {
    println!("\n🔬 Monotonicity Check ({} samples)", report.samples.len());
    if report.is_consistent() {
        println!("  • No sample contradicts the estimate");
    } else {
        println!(
            "  ⚠️  {} samples contradict the estimate:",
            report.violations.len()
        );
        for m in &report.violations {
            println!("    - m = {m:.4}");
        }
    }
}

pub fn print_scan(rows: &[ScanRow]) {
    println!("\n🧪 Initial-Condition Scan");
    for row in rows.iter().take(MAX_PRINTED_ROWS) {
        println!(
            "  • Initial: ({:.3}, {:.3}) → Final: ({:.6}, {:.6}) in {} generations [{}]",
            row.initial.q1,
            row.initial.q2,
            row.final_state.q1,
            row.final_state.q2,
            row.generations,
            row.outcome
        );
    }
    if rows.len() > MAX_PRINTED_ROWS {
        println!("  … {} more rows", rows.len() - MAX_PRINTED_ROWS);
    }
}

pub fn print_alpha(rows: &[AlphaTrajectory]) {
    println!("\n🔀 Alpha Comparison");
    for row in rows {
        println!(
            "  • α={}: final ({:.6}, {:.6}) after {} generations [{}]",
            row.alpha, row.final_state.q1, row.final_state.q2, row.generations, row.outcome
        );
    }
}

pub fn print_grid(rows: &[GridRow]) {
    println!("\n🗺️  Critical Threshold Grid");
    for row in rows.iter().take(MAX_PRINTED_ROWS) {
        let c = &row.config;
        match (row.m_star, &row.error) {
            (Some(m_star), _) => println!(
                "  • s={}, c={}, h={}, α={}: m* ≈ {m_star:.4}",
                c.s, c.c, c.h, c.alpha
            ),
            (None, Some(error)) => println!(
                "  • s={}, c={}, h={}, α={}: skipped ({error})",
                c.s, c.c, c.h, c.alpha
            ),
            (None, None) => {}
        }
    }
    if rows.len() > MAX_PRINTED_ROWS {
        println!("  … {} more rows", rows.len() - MAX_PRINTED_ROWS);
    }
}
