extern crate chequer;
#[macro_use]
extern crate approx;

use chequer::camera::*;
use chequer::math::prelude::*;

fn assert_orthonormal(camera: &Camera) {
    let (f, u, r) = (camera.front(), camera.up(), camera.right());
    assert_relative_eq!(f.magnitude(), 1.0, epsilon = 1e-5);
    assert_relative_eq!(u.magnitude(), 1.0, epsilon = 1e-5);
    assert_relative_eq!(r.magnitude(), 1.0, epsilon = 1e-5);
    assert_relative_eq!(f.dot(u), 0.0, epsilon = 1e-5);
    assert_relative_eq!(f.dot(r), 0.0, epsilon = 1e-5);
    assert_relative_eq!(u.dot(r), 0.0, epsilon = 1e-5);
}

#[test]
fn pitch_is_clamped() {
    let mut camera = Camera::default();

    camera.process_look(0.0, 10_000.0);
    assert_eq!(camera.pitch(), MAX_PITCH);

    camera.process_look(0.0, -50_000.0);
    assert_eq!(camera.pitch(), -MAX_PITCH);

    for i in 0..200 {
        let dy = if i % 3 == 0 { 97.0 } else { -41.0 };
        camera.process_look(13.0, dy);
        assert!(camera.pitch() >= -MAX_PITCH && camera.pitch() <= MAX_PITCH);
    }
}

#[test]
fn zoom_is_clamped() {
    let mut camera = Camera::default();
    assert_eq!(camera.zoom(), 45.0);

    for _ in 0..10 {
        camera.process_zoom(1.0);
    }

    assert_relative_eq!(camera.zoom(), 35.0);

    for _ in 0..50 {
        camera.process_zoom(1.0);
    }

    assert_eq!(camera.zoom(), MIN_ZOOM);

    camera.process_zoom(-100.0);
    assert_eq!(camera.zoom(), ZOOM);
}

#[test]
fn basis_stays_orthonormal() {
    let mut camera = Camera::default();
    assert_orthonormal(&camera);

    for i in 0..72 {
        camera.process_look(50.0, if i < 36 { 20.0 } else { -25.0 });
        assert_orthonormal(&camera);
    }

    let camera = Camera::new(Vector3::new(1.0, 2.0, 3.0), Vector3::unit_y(), 30.0, 120.0);
    assert_eq!(camera.pitch(), MAX_PITCH);
    assert_orthonormal(&camera);
}

#[test]
fn view_matrix() {
    let mut camera = Camera::default();
    camera.process_look(120.0, -80.0);
    camera.process_movement(Direction::Forward);

    let m = camera.view_matrix();
    assert_eq!(m, camera.view_matrix());

    let eye = m.transform_point(Point3::from_vec(camera.position()));
    assert_relative_eq!(eye, Point3::new(0.0, 0.0, 0.0), epsilon = 1e-5);

    let ahead = m.transform_point(Point3::from_vec(camera.position() + camera.front()));
    assert_relative_eq!(ahead, Point3::new(0.0, 0.0, -1.0), epsilon = 1e-5);
}

#[test]
fn projection_follows_zoom() {
    let mut camera = Camera::default();
    let wide = camera.projection_matrix(1.0, 0.1, 100.0);

    camera.process_zoom(20.0);
    let narrow = camera.projection_matrix(1.0, 0.1, 100.0);

    assert!(narrow.y.y > wide.y.y);
}
