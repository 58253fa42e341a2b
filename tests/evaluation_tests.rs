#![allow(missing_docs)]
#![allow(clippy::float_cmp)]

use std::cell::RefCell;

use flappy_evo::simulation::agent::Agent;
use flappy_evo::simulation::evaluation::{Evaluation, EvaluationState, features};
use flappy_evo::simulation::events::TickEvent;
use flappy_evo::simulation::evolution::EvolutionEngine;
use flappy_evo::simulation::mask::Mask;
use flappy_evo::simulation::obstacle::Obstacle;
use flappy_evo::simulation::params::Params;
use flappy_evo::simulation::silhouettes::Silhouettes;
use flappy_evo::simulation::stream::ObstacleStream;

type Policy = fn(&[f32]) -> f32;

fn flap(_: &[f32]) -> f32 {
    1.0
}

fn fall(_: &[f32]) -> f32 {
    0.0
}

/// Flaps whenever the agent sinks below the start height.
fn hover(features: &[f32]) -> f32 {
    if features[0] > 350.0 { 1.0 } else { 0.0 }
}

fn create_test_params() -> Params {
    Params::default()
}

/// Procedural silhouettes with a fully transparent agent, so nothing ever collides.
fn ghost_silhouettes() -> Silhouettes {
    let procedural = Silhouettes::procedural();
    Silhouettes::new(
        std::array::from_fn(|_| Mask::empty(68, 48)),
        procedural.barrier_bottom.clone(),
        procedural.ground_width,
    )
}

fn assert_close(actual: f32, expected: f32) {
    assert!(
        (actual - expected).abs() < 1e-3,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn test_features() {
    let mut params = create_test_params();
    let agent = Agent::new(230.0, 300.0);
    let obstacle = Obstacle::with_gap(400.0, 250.0, &params, 640.0);

    assert_eq!(features(&agent, &obstacle, &params), [300.0, 50.0, 50.0]);

    params.distinct_features = true;
    assert_eq!(features(&agent, &obstacle, &params), [300.0, 50.0, 150.0]);
}

#[test]
fn test_collision_removes_agent_and_penalizes() {
    let params = create_test_params();
    let silhouettes = Silhouettes::procedural();
    let stream = ObstacleStream::from_obstacles(
        vec![Obstacle::with_gap(260.0, 240.0, &params, silhouettes.barrier_height())],
        silhouettes.barrier_height(),
        1,
    );

    let policies: Vec<Policy> = vec![flap as Policy, fall, flap];
    let mut fitness = vec![42.0_f32; 3];
    let entries = policies
        .iter()
        .zip(fitness.iter_mut())
        .enumerate()
        .map(|(id, (policy, fitness))| (id, policy, fitness));

    let mut evaluation =
        Evaluation::new(entries, &params, &silhouettes, Some(1)).with_stream(stream);

    // fitness starts from zero
    assert_eq!(evaluation.population().accumulators()[0].get(), 0.0);

    for _ in 0..4 {
        let report = evaluation.tick();
        assert!(report.is_empty());
    }
    assert_eq!(evaluation.alive(), 3);

    let report = evaluation.tick();
    assert_eq!(report.events(), &[TickEvent::Collided { id: 1 }]);
    assert_eq!(report.eliminations(), 1);
    assert!(!report.scored());

    assert_eq!(evaluation.alive(), 2);
    let ids: Vec<usize> = evaluation
        .population()
        .accumulators()
        .iter()
        .map(|a| a.id)
        .collect();
    assert_eq!(ids, vec![0, 2]);
    assert_eq!(evaluation.population().deciders().len(), 2);
    assert_eq!(evaluation.score(), 0);
    assert!(evaluation.is_running());

    evaluation.stop();
    assert_eq!(evaluation.state(), EvaluationState::Terminated);

    assert_close(fitness[0], 0.5);
    assert_close(fitness[1], -0.5);
    assert_close(fitness[2], 0.5);
}

#[test]
fn test_ground_elimination_has_no_penalty() {
    let params = create_test_params();
    let silhouettes = Silhouettes::procedural();

    let policy: Policy = fall;
    let mut fitness = 0.0_f32;
    let mut evaluation = Evaluation::new(
        [(7, &policy, &mut fitness)],
        &params,
        &silhouettes,
        Some(3),
    );

    for _ in 0..22 {
        assert!(evaluation.tick().is_empty());
    }
    let report = evaluation.tick();
    assert_eq!(report.events(), &[TickEvent::OutOfBounds { id: 7 }]);
    assert_eq!(evaluation.alive(), 0);
    assert!(evaluation.is_running());

    // the empty population is noticed on the next tick
    assert!(evaluation.tick().is_empty());
    assert_eq!(evaluation.state(), EvaluationState::Terminated);
    assert_eq!(evaluation.ticks(), 23);

    assert_close(fitness, 2.3);
}

#[test]
fn test_leaving_through_the_top() {
    let params = create_test_params();
    let silhouettes = Silhouettes::procedural();

    let policy: Policy = flap;
    let mut fitness = 0.0_f32;
    let mut evaluation = Evaluation::new(
        [(0, &policy, &mut fitness)],
        &params,
        &silhouettes,
        Some(3),
    );

    let ticks = evaluation.run_to_end();
    assert_eq!(ticks, 33);
    assert_close(fitness, 3.3);
}

#[test]
fn test_pass_rewards_every_survivor_once() {
    let params = create_test_params();
    let silhouettes = ghost_silhouettes();

    let policies: Vec<Policy> = vec![hover as Policy; 3];
    let mut fitness = vec![0.0_f32; 3];
    let entries = policies
        .iter()
        .zip(fitness.iter_mut())
        .enumerate()
        .map(|(id, (policy, fitness))| (id, policy, fitness));
    let mut evaluation = Evaluation::new(entries, &params, &silhouettes, Some(5));

    for _ in 0..75 {
        assert!(!evaluation.tick().scored());
    }
    assert_eq!(evaluation.stream().len(), 1);

    let report = evaluation.tick();
    assert_eq!(report.events(), &[TickEvent::Scored { score: 1 }]);
    assert_eq!(evaluation.score(), 1);
    assert_eq!(evaluation.alive(), 3);
    assert_eq!(evaluation.stream().len(), 2);
    assert!(evaluation.stream().obstacles()[0].passed);
    assert_eq!(evaluation.stream().obstacles()[1].x, params.spawn_x);

    for accumulator in evaluation.population().accumulators() {
        assert_close(accumulator.get(), 12.6);
    }
}

#[test]
fn test_tick_limit_ends_generation() {
    let mut params = create_test_params();
    params.tick_limit = Some(10);
    let silhouettes = ghost_silhouettes();

    let policies: Vec<Policy> = vec![hover as Policy; 2];
    let mut fitness = vec![0.0_f32; 2];
    let entries = policies
        .iter()
        .zip(fitness.iter_mut())
        .enumerate()
        .map(|(id, (policy, fitness))| (id, policy, fitness));
    let mut evaluation = Evaluation::new(entries, &params, &silhouettes, None);

    assert_eq!(evaluation.run_to_end(), 10);
    assert_eq!(evaluation.alive(), 2);
    assert!(!evaluation.is_running());

    // terminated evaluations ignore further ticks
    assert!(evaluation.tick().is_empty());
    assert_eq!(evaluation.ticks(), 10);

    assert_close(fitness[0], 1.0);
    assert_close(fitness[1], 1.0);
}

#[test]
fn test_genome_evaluation() {
    let mut params = create_test_params();
    params.population_size = 8;
    params.tick_limit = Some(200);
    let silhouettes = Silhouettes::procedural();

    let mut engine = EvolutionEngine::new();
    let mut genomes = engine.initial_population(&params);
    for genome in &mut genomes {
        genome.fitness = 99.0;
    }

    let mut evaluation = Evaluation::from_genomes(&mut genomes, &params, &silhouettes, Some(9));
    assert_eq!(evaluation.alive(), 8);
    let ticks = evaluation.run_to_end();
    assert!(ticks <= 200);

    for genome in &genomes {
        // at least 20 ticks alive, at most one penalty and a handful of passes
        assert!(genome.fitness >= 1.0, "fitness {}", genome.fitness);
        assert!(genome.fitness < 99.0, "fitness {}", genome.fitness);
    }
}

#[test]
fn test_features_follow_the_next_obstacle() {
    let params = create_test_params();
    let silhouettes = ghost_silhouettes();
    let barrier_height = silhouettes.barrier_height();

    let mut behind = Obstacle::with_gap(130.0, 100.0, &params, barrier_height);
    behind.passed = true;
    let stream = ObstacleStream::from_obstacles(
        vec![behind, Obstacle::with_gap(400.0, 300.0, &params, barrier_height)],
        barrier_height,
        1,
    );

    let seen = RefCell::new(Vec::new());
    let recorder = |features: &[f32]| {
        seen.borrow_mut().push(features.to_vec());
        0.0_f32
    };
    let mut fitness = 0.0_f32;
    let mut evaluation = Evaluation::new(
        [(0, &recorder, &mut fitness)],
        &params,
        &silhouettes,
        Some(1),
    )
    .with_stream(stream);

    // 230 is not yet past 130 + 104
    evaluation.tick();
    // 230 is past 125 + 104
    evaluation.tick();

    assert_eq!(
        seen.into_inner(),
        vec![vec![351.5, 251.5, 251.5], vec![357.5, 57.5, 57.5]]
    );
}

#[test]
fn test_consecutive_passes() {
    let mut params = create_test_params();
    params.tick_limit = Some(380);
    let silhouettes = ghost_silhouettes();

    let policies: Vec<Policy> = vec![hover as Policy; 2];
    let mut fitness = vec![0.0_f32; 2];
    let entries = policies
        .iter()
        .zip(fitness.iter_mut())
        .enumerate()
        .map(|(id, (policy, fitness))| (id, policy, fitness));
    let mut evaluation = Evaluation::new(entries, &params, &silhouettes, Some(8));

    let mut passes = Vec::new();
    while evaluation.is_running() {
        let report = evaluation.tick();
        for event in report.events() {
            if let TickEvent::Scored { score } = event {
                passes.push((evaluation.ticks(), *score));
            }
        }
        assert!(evaluation.stream().len() <= 2);
    }

    assert_eq!(
        passes,
        vec![(76, 1), (152, 2), (228, 3), (304, 4), (380, 5)]
    );
    assert_eq!(evaluation.alive(), 2);
    assert_eq!(evaluation.score(), 5);

    for value in fitness {
        assert!((value - 63.0).abs() < 1e-2, "fitness {value}");
    }
}
