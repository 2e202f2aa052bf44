use approx::assert_abs_diff_eq;
use endo_engine::control::camera::endoscope::{Endoscope, EndoscopeDescriptor};
use endo_engine::control::camera::Camera;

fn dot(a: [f32; 3], b: [f32; 3]) -> f32 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

#[test]
fn defaults_match_the_endoscope_optics() {
    let endoscope = Endoscope::default();

    assert_abs_diff_eq!(endoscope.field_of_view(), 60.0);
    assert_eq!(endoscope.view_up(), [0.0, 1.0, 0.0]);
}

#[test]
fn pose_builds_an_orthonormal_basis() {
    let mut endoscope = Endoscope::default();

    endoscope.set_pose([1.0, 2.0, 3.0], [3.0, 0.0, 4.0]);

    let direction = endoscope.direction();
    let up = endoscope.up();
    let right = endoscope.right();
    assert_eq!(endoscope.position(), [1.0, 2.0, 3.0]);
    assert_abs_diff_eq!(direction[0], 0.6, epsilon = 1e-6);
    assert_abs_diff_eq!(direction[2], 0.8, epsilon = 1e-6);
    for v in [direction, up, right] {
        assert_abs_diff_eq!(dot(v, v), 1.0, epsilon = 1e-5);
    }
    assert_abs_diff_eq!(dot(direction, up), 0.0, epsilon = 1e-5);
    assert_abs_diff_eq!(dot(direction, right), 0.0, epsilon = 1e-5);
    assert_abs_diff_eq!(dot(up, right), 0.0, epsilon = 1e-5);
    // Up stays on the view-up side.
    assert!(up[1] > 0.9);
}

#[test]
fn looking_along_view_up_keeps_a_valid_basis() {
    let mut endoscope = Endoscope::default();

    endoscope.set_pose([0.0; 3], [0.0, 1.0, 0.0]);

    let right = endoscope.right();
    let up = endoscope.up();
    assert!(right.iter().all(|c| c.is_finite()));
    assert_abs_diff_eq!(dot(right, right), 1.0, epsilon = 1e-5);
    assert_abs_diff_eq!(dot(up, up), 1.0, epsilon = 1e-5);
    assert_abs_diff_eq!(dot(up, [0.0, 1.0, 0.0]), 0.0, epsilon = 1e-5);
}

#[test]
fn zero_direction_keeps_the_previous_one() {
    let mut endoscope = Endoscope::default();
    endoscope.set_pose([0.0; 3], [1.0, 0.0, 0.0]);

    endoscope.set_pose([5.0, 0.0, 0.0], [0.0, 0.0, 0.0]);

    assert_eq!(endoscope.position(), [5.0, 0.0, 0.0]);
    assert_eq!(endoscope.direction(), [1.0, 0.0, 0.0]);
}

#[test]
fn focal_point_lies_ahead() {
    let mut endoscope = Endoscope::new(EndoscopeDescriptor {
        focal_distance: 4.0,
        ..EndoscopeDescriptor::default()
    });

    endoscope.set_pose([1.0, 1.0, 1.0], [0.0, 0.0, -2.0]);

    let focal_point = endoscope.focal_point();
    assert_abs_diff_eq!(focal_point[0], 1.0);
    assert_abs_diff_eq!(focal_point[1], 1.0);
    assert_abs_diff_eq!(focal_point[2], -3.0, epsilon = 1e-6);
}

#[test]
fn field_of_view_is_clamped() {
    let mut endoscope = Endoscope::default();

    endoscope.set_field_of_view(400.0);
    assert_abs_diff_eq!(endoscope.field_of_view(), 179.0);
    endoscope.set_field_of_view(-5.0);
    assert_abs_diff_eq!(endoscope.field_of_view(), 1.0);
}
