use grid_walker::{Aabb, AabbObstacles, NavConfig, Navigator, PathFollower};
use nalgebra::Vector3;

// An agent walks around a box placed in a 10x6 room. Once it has arrived, the box is moved and
// the agent is sent back; the new corridor reflects the moved box since every request refreshes
// the grid.

const CONFIG: &str = r#"
[grid]
width = 10
height = 6
cell_size = 1.0

[agent]
minimal_distance = 0.25
"#;

fn walk(follower: &mut PathFollower, mut position: Vector3<f32>, speed: f32) -> Vector3<f32> {
    while let Some(target) = follower.steer(&position) {
        let delta = target - position;
        position += delta * (speed / delta.norm()).min(1.0);
    }
    position
}

fn main() {
    let config = NavConfig::from_toml(CONFIG).unwrap();
    let obstacle = |x: f32| {
        AabbObstacles::new(vec![Aabb::new(
            Vector3::new(x, -1.0, -1.0),
            Vector3::new(x + 1.0, 1.0, 4.4),
        )])
    };
    let mut navigator = Navigator::new(&config, obstacle(3.6)).unwrap();
    let mut follower = PathFollower::new(&config.agent);

    let mut position = Vector3::new(0.5, 0.0, 0.5);
    let there = Vector3::new(9.5, 0.0, 0.5);
    match follower.set_destination(&mut navigator, &position, &there) {
        Ok(n) => println!("{}\nWalking {} waypoints", navigator.grid(), n),
        Err(e) => return println!("{}", e),
    }
    position = walk(&mut follower, position, 0.2);
    println!("Arrived at {:?}", position);

    navigator.set_oracle(obstacle(5.6));
    match follower.set_destination(&mut navigator, &position, &Vector3::new(0.5, 0.0, 0.5)) {
        Ok(n) => println!("{}\nWalking {} waypoints back", navigator.grid(), n),
        Err(e) => return println!("{}", e),
    }
    for waypoint in follower.path() {
        println!("{:?}", waypoint);
    }
    position = walk(&mut follower, position, 0.2);
    println!("Arrived at {:?}", position);
}
