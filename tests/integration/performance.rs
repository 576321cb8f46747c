//! Performance tests for the scheduling engine.
//!
//! Thresholds are loose enough for unoptimized builds; they catch
//! accidental quadratic behavior, not small regressions.
//! Use `cargo test --test integration performance -- --nocapture` to see metrics.

use std::time::Instant;

use mycoplan::core::WorkflowTask;
use mycoplan::schedule::{create_schedule_proposal, Scheduler};

use crate::fixtures::{diamond, independent, request, START};

const MAX_LARGE_PLAN_MS: u128 = 3000;
const MAX_SMALL_PLAN_MS: f64 = 5.0;

fn chain(length: usize) -> Vec<WorkflowTask> {
    (0..length)
        .map(|i| {
            let task = WorkflowTask::new(format!("step-{}", i), "check", 0.5);
            if i == 0 {
                task
            } else {
                task.with_dependency(format!("step-{}", i - 1))
            }
        })
        .collect()
}

/// Test a plan with many independent tasks.
#[test]
fn test_large_independent_plan() {
    let tasks: Vec<WorkflowTask> = independent(10_000, 1.0)
        .into_iter()
        .enumerate()
        .map(|(i, task)| {
            task.with_labor_hours(1.0)
                .with_species(["oyster", "shiitake", "reishi", "enoki"][i % 4])
        })
        .collect();

    let start = Instant::now();
    let proposal = create_schedule_proposal(&tasks, &request(), START).unwrap();
    let elapsed = start.elapsed();

    println!(
        "Independent plan (10000 tasks): {}ms (threshold: {}ms)",
        elapsed.as_millis(),
        MAX_LARGE_PLAN_MS
    );

    assert_eq!(proposal.task_count(), 10_000);
    // 10000 one-hour tasks back to back from 06:00.
    assert_eq!(proposal.total_days, 417);
    assert!(
        elapsed.as_millis() < MAX_LARGE_PLAN_MS,
        "Scheduling took {}ms, exceeds {}ms threshold",
        elapsed.as_millis(),
        MAX_LARGE_PLAN_MS
    );
}

/// Test a deep dependency chain end to end.
#[test]
fn test_deep_chain_plan() {
    let tasks = chain(20_000);

    let start = Instant::now();
    let proposal = create_schedule_proposal(&tasks, &request(), START).unwrap();
    let elapsed = start.elapsed();

    println!(
        "Chain plan (20000 tasks): {}ms (threshold: {}ms)",
        elapsed.as_millis(),
        MAX_LARGE_PLAN_MS
    );

    assert_eq!(proposal.scheduled_tasks[0].task_id.as_str(), "step-0");
    assert_eq!(
        proposal.scheduled_tasks.last().unwrap().task_id.as_str(),
        "step-19999"
    );
    assert!(
        elapsed.as_millis() < MAX_LARGE_PLAN_MS,
        "Chain scheduling took {}ms, exceeds {}ms threshold",
        elapsed.as_millis(),
        MAX_LARGE_PLAN_MS
    );
}

/// Test repeated small plans stay cheap.
#[test]
fn test_small_plan_overhead() {
    const ITERATIONS: usize = 200;

    let scheduler = Scheduler::default();
    let tasks = diamond();
    let request = request();

    let start = Instant::now();
    for _ in 0..ITERATIONS {
        let _proposal = scheduler
            .create_schedule_proposal(&tasks, &request, START)
            .unwrap();
    }
    let elapsed = start.elapsed();

    let avg_ms = elapsed.as_micros() as f64 / ITERATIONS as f64 / 1000.0;

    println!(
        "Small plan (4 tasks): {:.3}ms (threshold: {}ms)",
        avg_ms, MAX_SMALL_PLAN_MS
    );

    assert!(
        avg_ms < MAX_SMALL_PLAN_MS,
        "Small plan took {:.3}ms, exceeds {}ms threshold",
        avg_ms,
        MAX_SMALL_PLAN_MS
    );
}

/// Test sequencing alone on a wide fan-in.
#[test]
fn test_fan_in_sequencing() {
    let mut tasks = independent(5_000, 0.1);
    let all: Vec<String> = tasks.iter().map(|t| t.task_id.to_string()).collect();
    tasks.push(WorkflowTask::new("collect", "harvest", 1.0).with_dependencies(all));

    let scheduler = Scheduler::default();
    let start = Instant::now();
    let order = scheduler.sequence(&tasks).unwrap();
    let elapsed = start.elapsed();

    println!("Fan-in sequencing (5001 tasks): {}ms", elapsed.as_millis());

    assert_eq!(order.last().unwrap().task_id.as_str(), "collect");
    assert!(elapsed.as_millis() < MAX_LARGE_PLAN_MS);
}
