#![cfg(target_arch = "wasm32")]

use scene_physics::PhysicsScene;
use wasm_bindgen_test::*;

#[wasm_bindgen_test]
fn scene_steps_in_wasm() {
    let mut scene = PhysicsScene::new();
    scene
        .spawn_object("box".to_string(), "Cube".to_string(), 0.0, 2.0, 0.0)
        .expect("spawn");
    assert_eq!(scene.step(1.0 / 30.0), 2);
    let pos = scene.position("box").expect("position");
    assert!(pos[1] < 2.0);
    assert!(scene.laws_json().is_ok());
}
