use grid_util::point::Point;
use grid_walker::{path_cost, PathingGrid, Pathfinder};
use nalgebra::{Vector2, Vector3};

// In this example a path is found on a 3x3 grid with shape
//  ___
// |  E|
// | # |
// |S  |
//  ___
// where
// - # marks an obstacle
// - S marks the start
// - E marks the end
//
// Nodes have an 8-neighborhood

fn main() {
    let centre_blocked = |centre: Vector3<f32>, _: f32| centre.x == 1.0 && centre.z == 1.0;
    let pathing_grid = PathingGrid::new(3, 3, 1.0, Vector2::zeros(), &centre_blocked).unwrap();
    println!("{}", pathing_grid);
    let start = Point::new(0, 0);
    let end = Point::new(2, 2);
    let path = Pathfinder::new()
        .find_points(&pathing_grid, start, end)
        .unwrap();
    println!("Path of cost {}:", path_cost(&path));
    for p in path {
        println!("{:?}", p);
    }
}
