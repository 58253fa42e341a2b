#![allow(missing_docs)]
#![allow(clippy::float_cmp)]

use flappy_evo::simulation::obstacle::Obstacle;
use flappy_evo::simulation::params::Params;
use flappy_evo::simulation::silhouettes::Silhouettes;
use flappy_evo::simulation::stream::ObstacleStream;

fn create_test_params() -> Params {
    Params::default()
}

#[test]
fn test_new_stream_has_one_obstacle_at_spawn() {
    let params = create_test_params();
    let silhouettes = Silhouettes::procedural();
    let stream = ObstacleStream::new(&params, silhouettes.barrier_height(), Some(7));

    assert_eq!(stream.len(), 1);
    assert_eq!(stream.obstacles()[0].x, params.spawn_x);
    assert!(!stream.obstacles()[0].passed);
}

#[test]
fn test_same_seed_same_gaps() {
    let params = create_test_params();
    let silhouettes = Silhouettes::procedural();
    let mut a = ObstacleStream::new(&params, silhouettes.barrier_height(), Some(99));
    let mut b = ObstacleStream::new(&params, silhouettes.barrier_height(), Some(99));

    for _ in 0..5 {
        a.spawn(&params);
        b.spawn(&params);
    }

    assert_eq!(a.obstacles(), b.obstacles());
}

#[test]
fn test_target_switches_past_first_obstacle() {
    let params = create_test_params();
    let silhouettes = Silhouettes::procedural();
    let barrier_height = silhouettes.barrier_height();
    let width = silhouettes.barrier_width();

    let single = ObstacleStream::from_obstacles(
        vec![Obstacle::with_gap(100.0, 200.0, &params, barrier_height)],
        barrier_height,
        1,
    );
    // nothing to switch to
    assert_eq!(single.target_index(230.0, width), 0);

    let behind = ObstacleStream::from_obstacles(
        vec![
            Obstacle::with_gap(100.0, 200.0, &params, barrier_height),
            Obstacle::with_gap(600.0, 300.0, &params, barrier_height),
        ],
        barrier_height,
        1,
    );
    assert_eq!(behind.target_index(230.0, width), 1);
    assert_eq!(behind.target(230.0, width).map(|o| o.x), Some(600.0));

    let ahead = ObstacleStream::from_obstacles(
        vec![
            Obstacle::with_gap(150.0, 200.0, &params, barrier_height),
            Obstacle::with_gap(600.0, 300.0, &params, barrier_height),
        ],
        barrier_height,
        1,
    );
    // 230 is not past 150 + 104
    assert_eq!(ahead.target_index(230.0, width), 0);
}

#[test]
fn test_target_of_empty_stream() {
    let silhouettes = Silhouettes::procedural();
    let stream = ObstacleStream::from_obstacles(Vec::new(), silhouettes.barrier_height(), 1);

    assert!(stream.is_empty());
    assert_eq!(stream.target_index(230.0, silhouettes.barrier_width()), 0);
    assert!(stream.target(230.0, silhouettes.barrier_width()).is_none());
}

#[test]
fn test_recycle_after_fully_off_screen() {
    let params = create_test_params();
    let silhouettes = Silhouettes::procedural();
    let width = silhouettes.barrier_width();
    let mut stream = ObstacleStream::new(&params, silhouettes.barrier_height(), Some(3));

    for _ in 0..140 {
        stream.advance(&params);
    }
    assert_eq!(stream.obstacles()[0].x, -100.0);
    assert_eq!(stream.recycle(width), 0);
    assert_eq!(stream.len(), 1);

    stream.advance(&params);
    assert_eq!(stream.recycle(width), 1);
    assert!(stream.is_empty());
}

#[test]
fn test_stream_stays_sorted() {
    let params = create_test_params();
    let silhouettes = Silhouettes::procedural();
    let width = silhouettes.barrier_width();
    let mut stream = ObstacleStream::new(&params, silhouettes.barrier_height(), Some(11));

    for tick in 0..400 {
        stream.advance(&params);
        stream.recycle(width);
        if tick % 75 == 0 {
            stream.spawn(&params);
        }

        let xs: Vec<f32> = stream.obstacles().iter().map(|o| o.x).collect();
        assert!(xs.windows(2).all(|pair| pair[0] < pair[1]), "{xs:?}");
    }
}
