use grid_util::point::Point;
use grid_walker::*;
use nalgebra::{Vector2, Vector3};

fn open_grid(w: usize, h: usize) -> PathingGrid {
    PathingGrid::new(w, h, 1.0, Vector2::zeros(), &OpenField).unwrap()
}

// |  G|
// |   |
// |S  |
#[test]
fn open_three_by_three() {
    let grid = open_grid(3, 3);
    let mut pathfinder = Pathfinder::new();
    let path = pathfinder
        .find_path(&grid, Point::new(0, 0), Point::new(2, 2))
        .unwrap();
    let points = path.iter().map(|n| n.point).collect::<Vec<_>>();
    assert_eq!(
        points,
        vec![Point::new(0, 0), Point::new(1, 1), Point::new(2, 2)]
    );
    assert_eq!(path_cost(&points), 28);
    assert_eq!(path[2].g_cost, 28);
}

// |  G|
// | # |
// |S  |
#[test]
fn blocked_centre() {
    let mut grid = open_grid(3, 3);
    grid.set_walkable(1, 1, false).unwrap();
    let mut pathfinder = Pathfinder::new();
    let path = pathfinder
        .find_path(&grid, Point::new(0, 0), Point::new(2, 2))
        .unwrap();
    let points = path.iter().map(|n| n.point).collect::<Vec<_>>();
    assert!(!points.contains(&Point::new(1, 1)));
    // Two straight steps and one diagonal step
    assert_eq!(path_cost(&points), 34);
    assert_eq!(path.last().unwrap().g_cost, 34);
}

#[test]
fn start_equals_goal_in_world_space() {
    let config = NavConfig::from_toml(
        r#"
        [grid]
        width = 5
        height = 5
        cell_size = 2.0
        offset = [1.0, 1.0]
        "#,
    )
    .unwrap();
    let mut navigator = Navigator::new(&config, OpenField).unwrap();
    let here = Vector3::new(5.0, 0.0, 7.0);
    let corridor = navigator.find_corridor(&here, &here).unwrap();
    let cell = navigator.grid().world_to_grid(&here);
    assert_eq!(cell, Point::new(2, 3));
    assert_eq!(
        corridor,
        vec![navigator
            .grid()
            .grid_to_world(cell.x, cell.y, navigator.vertical_height())]
    );
}

#[test]
fn avoids_blocked_direct_route() {
    // A wall across the middle column with a single gap at the top
    // |.........|
    // |....#....|
    // |....#....|
    // |....#....|
    // |S...#...G|
    let oracle = |centre: Vector3<f32>, _: f32| centre.x == 4.0 && centre.z < 4.0;
    let grid = PathingGrid::new(9, 5, 1.0, Vector2::zeros(), &oracle).unwrap();
    let start = Point::new(0, 0);
    let goal = Point::new(8, 0);
    let path = Pathfinder::new().find_points(&grid, start, goal).unwrap();
    assert!(path.iter().all(|p| grid.is_walkable(*p)));
    assert!(path.contains(&Point::new(4, 4)));
    assert_eq!(path_cost(&path), 4 * 14 + 4 * 14);
}

#[test]
fn surrounded_goal() {
    let oracle = |centre: Vector3<f32>, _: f32| {
        let (x, z) = (centre.x as i32, centre.z as i32);
        (x - 3).abs() <= 1 && (z - 3).abs() <= 1 && !(x == 3 && z == 3)
    };
    let grid = PathingGrid::new(7, 7, 1.0, Vector2::zeros(), &oracle).unwrap();
    let start = Point::new(0, 0);
    let goal = Point::new(3, 3);
    assert!(grid.get(3, 3).unwrap().walkable);
    assert_eq!(
        Pathfinder::new().find_path(&grid, start, goal),
        Err(PathfindingError::NoPathFound { start, goal })
    );
}

#[test]
fn invalid_configuration() {
    for source in [
        "[grid]\nwidth = 0\n",
        "[grid]\nheight = 0\n",
        "[grid]\ncell_size = 0.0\n",
    ] {
        assert!(matches!(
            NavConfig::from_toml(source),
            Err(PathfindingError::InvalidDimension(_))
        ));
    }
}

#[test]
fn agent_walks_corridor() {
    let wall = Aabb::new(Vector3::new(1.6, -1.0, -1.0), Vector3::new(2.4, 1.0, 2.4));
    let config = NavConfig {
        grid: GridConfig::new(5, 4, 1.0),
        ..NavConfig::default()
    };
    let mut navigator = Navigator::new(&config, AabbObstacles::new(vec![wall])).unwrap();
    let mut follower = PathFollower::new(&config.agent);
    let mut position = Vector3::new(0.0, 0.0, 0.0);
    follower
        .set_destination(&mut navigator, &position, &Vector3::new(4.0, 0.0, 0.0))
        .unwrap();
    let mut ticks = 0;
    // Teleport halfway to the steering target each tick
    while let Some(target) = follower.steer(&position) {
        position += (target - position) * 0.5;
        ticks += 1;
        assert!(ticks < 1000);
        let cell = navigator.grid().world_to_grid(&(position + Vector3::new(0.5, 0.0, 0.5)));
        assert_ne!(cell, Point::new(2, 0));
    }
    assert!(follower.is_at_destination());
    assert!((position - Vector3::new(4.0, 0.0, 0.0)).norm() < 0.25);
}
