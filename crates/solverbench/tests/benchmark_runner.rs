//! Benchmark dispatch end to end.

use std::sync::Arc;

use solverbench::BenchmarkRunner;
use solverbench_config::{BenchmarkConfig, SolverConfig, StatisticType};
use solverbench_core::{ProblemScale, SolverBenchError};
use solverbench_test::{FixedMemoryProbe, HillClimbingFactory, NQueensSolution, RecordingProblemIo};

type Runner = BenchmarkRunner<NQueensSolution, HillClimbingFactory, RecordingProblemIo>;

fn runner(config: BenchmarkConfig) -> (Runner, Arc<FixedMemoryProbe>) {
    let probe = Arc::new(FixedMemoryProbe::new(1 << 20));
    let runner = Runner::with_memory_probe(config, probe.clone()).unwrap();
    (runner, probe)
}

fn quick_config() -> SolverConfig {
    SolverConfig::new().with_step_count_limit(10)
}

#[test]
fn test_runs_every_solver_on_every_problem() {
    let config = BenchmarkConfig::new("NQueens")
        .with_warmup_count(1)
        .with_sub_single_count(2)
        .with_statistic(StatisticType::BestScore)
        .with_statistic(StatisticType::ScoreCalculationSpeed);
    let (mut runner, _probe) = runner(config);
    runner
        .add_solver("hc_a", quick_config(), HillClimbingFactory::new())
        .add_solver(
            "hc_b",
            quick_config(),
            HillClimbingFactory::new().with_moves_per_step(2),
        )
        .add_problem("queens4", RecordingProblemIo::new(4))
        .add_problem("queens6", RecordingProblemIo::new(6));

    let summary = runner.run().unwrap();
    assert!(summary.is_success());
    assert_eq!(summary.single_count, 4);
    assert_eq!(summary.run_count, 8);
    assert_eq!(summary.warm_up_count, 4);
    assert_eq!(
        summary.to_string(),
        "NQueens: 4 single benchmarks, 8 runs (0 failed), 4 warm-ups (0 failed)"
    );

    let names: Vec<_> = runner
        .single_results()
        .iter()
        .map(|single| single.name().to_string())
        .collect();
    assert_eq!(
        names,
        vec!["queens4_hc_a", "queens6_hc_a", "queens4_hc_b", "queens6_hc_b"]
    );
    for single in runner.single_results() {
        for sub_single in single.sub_single_results() {
            assert!(sub_single.score().is_some());
            assert_eq!(sub_single.used_memory_after_input_solution(), Some(1 << 20));
            assert!(sub_single
                .statistic(StatisticType::ScoreCalculationSpeed)
                .and_then(|statistic| statistic.hibernated_point_list())
                .is_some());
        }
    }

    let queens4 = &runner.problem_results()[0];
    assert_eq!(queens4.scale(), Some(ProblemScale::new(4, 4, 4, 16)));
    assert_eq!(queens4.scale_registration_count(), 4);
    // Warm-ups read the problem too but never write.
    assert_eq!(queens4.problem_io().read_count(), 6);
    assert_eq!(queens4.problem_io().written().len(), 4);
}

#[test]
fn test_failed_runs_are_recorded_and_counted() {
    let config = BenchmarkConfig::new("Failing")
        .with_warmup_count(2)
        .with_sub_single_count(2);
    let (mut runner, _probe) = runner(config);
    runner
        .add_solver(
            "broken",
            quick_config(),
            HillClimbingFactory::new().with_failing_build(),
        )
        .add_problem("queens4", RecordingProblemIo::new(4));

    let summary = runner.run().unwrap();
    assert!(!summary.is_success());
    assert_eq!(summary.failure_count, 2);
    assert_eq!(summary.warm_up_failure_count, 2);

    let single = &runner.single_results()[0];
    assert_eq!(single.failure_count(), 2);
    assert!(single
        .sub_single_results()
        .iter()
        .all(|sub_single| matches!(
            sub_single.failure(),
            Some(SolverBenchError::SolverConstruction(_))
        )));
}

#[test]
fn test_parallel_benchmark_skips_memory_baseline() {
    let config = BenchmarkConfig::new("Parallel")
        .with_parallel_benchmark_count(4)
        .with_sub_single_count(3);
    let (mut runner, probe) = runner(config);
    runner
        .add_solver("hc", quick_config(), HillClimbingFactory::new())
        .add_problem("queens5", RecordingProblemIo::new(5));

    runner.run().unwrap();
    assert!(runner.planner_result().has_multiple_parallel_benchmarks());
    assert_eq!(probe.sample_count(), 0);
    let seeds: Vec<_> = runner.single_results()[0]
        .sub_single_results()
        .iter()
        .map(|sub_single| sub_single.random_seed())
        .collect();
    assert_eq!(seeds, vec![Some(0), Some(1), Some(2)]);
}

#[test]
fn test_run_without_problems_is_rejected() {
    let (mut runner, _probe) = runner(BenchmarkConfig::new("Empty"));
    runner.add_solver("hc", quick_config(), HillClimbingFactory::new());
    assert!(matches!(
        runner.run(),
        Err(SolverBenchError::InvalidState(_))
    ));
}

#[test]
fn test_invalid_config_is_rejected() {
    let config = BenchmarkConfig::new("Invalid").with_sub_single_count(0);
    assert!(matches!(
        Runner::new(config),
        Err(SolverBenchError::Config(_))
    ));
}
