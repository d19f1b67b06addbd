//! Writers for history and table files.

use anyhow::{Context, Result};
use demedrive_analysis::analysis::{AlphaTrajectory, GridRow, ScanRow};
use demedrive_sim::simulation::{ConvergenceResult, Trajectory};
use serde::Serialize;
use std::fs;
use std::path::Path;

use crate::args::ExportFormat;

fn write_file(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).context("Failed to serialize output")
}

pub fn trajectory_csv(trajectory: &Trajectory) -> String {
    let mut content = String::from("generation,q1,q2\n");
    for (generation, state) in trajectory.iter().enumerate() {
        content.push_str(&format!("{generation},{},{}\n", state.q1, state.q2));
    }
    content
}

pub fn write_run(path: &Path, result: &ConvergenceResult, format: ExportFormat) -> Result<()> {
    let content = match format {
        ExportFormat::Csv => trajectory_csv(&result.trajectory),
        ExportFormat::Json => to_json(result)?,
    };
    write_file(path, &content)
}

pub fn write_scan(path: &Path, rows: &[ScanRow], format: ExportFormat) -> Result<()> {
    let content = match format {
        ExportFormat::Csv => {
            let mut content =
                String::from("q1_initial,q2_initial,q1_final,q2_final,generations,outcome\n");
            for row in rows {
                content.push_str(&format!(
                    "{},{},{},{},{},{}\n",
                    row.initial.q1,
                    row.initial.q2,
                    row.final_state.q1,
                    row.final_state.q2,
                    row.generations,
                    row.outcome
                ));
            }
            content
        }
        ExportFormat::Json => to_json(rows)?,
    };
    write_file(path, &content)
}

pub fn write_alpha(path: &Path, rows: &[AlphaTrajectory], format: ExportFormat) -> Result<()> {
    let content = match format {
        ExportFormat::Csv => {
            let mut content = String::from("alpha,generation,q1,q2\n");
            for row in rows {
                for (generation, state) in row.trajectory.iter().enumerate() {
                    content.push_str(&format!(
                        "{},{generation},{},{}\n",
                        row.alpha, state.q1, state.q2
                    ));
                }
            }
            content
        }
        ExportFormat::Json => to_json(rows)?,
    };
    write_file(path, &content)
}

pub fn write_grid(path: &Path, rows: &[GridRow], format: ExportFormat) -> Result<()> {
    let content = match format {
        ExportFormat::Csv => {
            let mut content = String::from("s,c,h,alpha,m_star,iterations,error\n");
            for row in rows {
                content.push_str(&format!(
                    "{},{},{},{},{},{},{}\n",
                    row.config.s,
                    row.config.c,
                    row.config.h,
                    row.config.alpha,
                    row.m_star.map(|m| m.to_string()).unwrap_or_default(),
                    row.iterations.map(|i| i.to_string()).unwrap_or_default(),
                    row.error.as_deref().unwrap_or("").replace(',', ";")
                ));
            }
            content
        }
        ExportFormat::Json => to_json(rows)?,
    };
    write_file(path, &content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use demedrive_sim::base::AlleleState;

    #[test]
    fn test_trajectory_csv() {
        let mut trajectory = Trajectory::new(AlleleState::new_unchecked(0.7, 0.1));
        trajectory.push(AlleleState::new_unchecked(0.75, 0.125));
        let csv = trajectory_csv(&trajectory);
        assert_eq!(csv, "generation,q1,q2\n0,0.7,0.1\n1,0.75,0.125\n");
    }
}
