extern crate chequer;

use std::path::{Path, PathBuf};
use std::rc::Rc;

use chequer::prelude::*;

fn asset(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("assets/models").join(name)
}

fn setup(settings: &Settings) -> (RenderLoop, HeadlessRecorder, HeadlessWindow) {
    let (window, script) = WindowSystem::headless(Vector2::new(800, 600));
    let (video, recorder) = VideoSystem::headless();
    let video = Rc::new(video);

    let tile = Model::load(&video, &asset("tile.obj"), &ObjImporter, &FileDecoder).unwrap();
    let piece = Model::load(&video, &asset("piece.obj"), &ObjImporter, &FileDecoder).unwrap();
    let app = RenderLoop::with_models(window, video, settings, tile, piece).unwrap();

    recorder.take();
    (app, recorder, script)
}

fn render_states(commands: &[Command]) -> Vec<RenderState> {
    commands
        .iter()
        .filter_map(|v| match *v {
            Command::RenderState(state) => Some(state),
            _ => None,
        })
        .collect()
}

fn key(key: Key) -> Event {
    Event::InputDevice(InputEvent::KeyboardPressed { key })
}

fn mouse(event: InputEvent) -> Event {
    Event::InputDevice(event)
}

#[test]
fn stencil_phases() {
    let (mut app, recorder, _) = setup(&Settings::default());
    assert_eq!(app.run_frames(1).unwrap(), 1);

    let commands = recorder.take();
    let states = render_states(&commands);

    // The shadow pass sets one state, the scene pass one before clearing and
    // one per phase.
    assert_eq!(states.len(), 6);

    let mut expected = vec![OutlinePhase::Cleanup.render_state()];
    expected.extend(OutlinePhase::SEQUENCE.iter().map(|v| v.render_state()));
    assert_eq!(&states[1..], &expected[..]);

    let last = recorder.render_state();
    let stencil = last.stencil.unwrap();
    assert_eq!(stencil.write_mask, 0xFF);
    assert_eq!(stencil.func, Comparison::Always);
    assert_eq!(stencil.reference, 0);
    assert!(last.is_depth_enabled());

    let outline = OutlinePhase::Outline.render_state();
    let start = commands
        .iter()
        .position(|v| *v == Command::RenderState(outline))
        .unwrap();

    let outlined = commands[start..]
        .iter()
        .filter(|v| match **v {
            Command::Draw(_, _) => true,
            _ => false,
        })
        .count();

    assert_eq!(outlined, 24);
}

#[test]
fn frames_are_deterministic() {
    let (mut app, recorder, _) = setup(&Settings::default());

    app.run_frames(1).unwrap();
    let first = recorder.take();
    assert!(!first.is_empty());

    for _ in 0..3 {
        app.run_frames(1).unwrap();
        assert_eq!(recorder.take(), first);
    }
}

#[test]
fn frame_order() {
    let (mut app, recorder, script) = setup(&Settings::default());
    app.run_frames(1).unwrap();

    let commands = recorder.take();
    assert_eq!(commands[0], Command::BindSurface(None));

    let shadow = commands
        .iter()
        .position(|v| match *v {
            Command::BindSurface(Some(_)) => true,
            _ => false,
        })
        .unwrap();

    let restored = commands[shadow..]
        .iter()
        .position(|v| *v == Command::BindSurface(None))
        .unwrap()
        + shadow;

    let cleared = commands
        .iter()
        .position(|v| match *v {
            Command::Clear(Some(_), Some(_), Some(0)) => true,
            _ => false,
        })
        .unwrap();

    assert!(shadow < restored && restored < cleared);
    assert_eq!(commands.last(), Some(&Command::Flush));
    assert_eq!(script.swaps(), 1);
}

#[test]
fn shadow_pass_restores_default_framebuffer() {
    let (video, recorder) = VideoSystem::headless();
    let video = Rc::new(video);
    video.set_dimensions(Vector2::new(640, 480));

    let empty = Scene {
        root: Some(SceneNode::default()),
        ..Default::default()
    };

    let model = || Model::from_scene(&video, &empty, Path::new("."), &FileDecoder).unwrap();
    let ctx = RenderContext {
        camera: Camera::default(),
        board: Board::initial(),
        tile: model(),
        piece: model(),
        light_position: Vector3::new(-2.0, 4.0, -1.0),
        palette: Palette::default(),
        outline_scale: 1.05,
    };

    let shadow = ShadowPass::new(&video, 1024).unwrap();
    recorder.take();

    shadow.run(&ctx).unwrap();

    let commands = recorder.take();
    assert!(commands.contains(&Command::Viewport(SurfaceViewport::from_size(Vector2::new(
        1024, 1024
    )))));

    assert_eq!(commands.last(), Some(&Command::BindSurface(None)));
    assert!(!commands.iter().any(|v| match *v {
        Command::Draw(_, _) => true,
        _ => false,
    }));

    assert_eq!(recorder.surface(), None);
    assert_eq!(
        recorder.viewport(),
        Some(SurfaceViewport::from_size(Vector2::new(640, 480)))
    );
}

#[test]
fn viewport_follows_window() {
    let (mut app, recorder, script) = setup(&Settings::default());
    app.run_frames(1).unwrap();
    assert_eq!(
        recorder.viewport(),
        Some(SurfaceViewport::from_size(Vector2::new(800, 600)))
    );

    script.resize(Vector2::new(400, 300));
    app.run_frames(1).unwrap();
    assert_eq!(app.video().dimensions(), Vector2::new(400, 300));
    assert_eq!(
        recorder.viewport(),
        Some(SurfaceViewport::from_size(Vector2::new(400, 300)))
    );
}

#[test]
fn degenerate_window_sizes() {
    let (mut app, recorder, script) = setup(&Settings::default());

    script.resize(Vector2::new(0, 600));
    assert_eq!(app.run_frames(1).unwrap(), 1);
    assert_eq!(
        recorder.viewport(),
        Some(SurfaceViewport::from_size(Vector2::new(0, 600)))
    );

    script.resize(Vector2::new(800, 0));
    assert_eq!(app.run_frames(1).unwrap(), 1);

    script.resize(Vector2::new(0, 0));
    assert_eq!(app.run_frames(1).unwrap(), 1);
    assert_eq!(script.swaps(), 3);
}

#[test]
fn movement_keys() {
    let (mut app, _, script) = setup(&Settings::default());
    let camera = *app.camera();

    script.push(vec![key(Key::Q), key(Key::Return), key(Key::Tab)]);
    app.run_frames(1).unwrap();
    assert_eq!(*app.camera(), camera);

    script.push(vec![key(Key::W)]);
    app.run_frames(1).unwrap();
    let mut moved = camera;
    moved.process_movement(Direction::Forward);
    assert_eq!(*app.camera(), moved);

    script.push(vec![key(Key::Space), key(Key::LShift), key(Key::S), key(Key::A), key(Key::D)]);
    app.run_frames(1).unwrap();
    assert!((app.camera().position() - camera.position()).magnitude() < 1e-5);
}

#[test]
fn look_latch() {
    let (mut app, _, script) = setup(&Settings::default());
    let yaw = app.camera().yaw();

    script.push(vec![mouse(InputEvent::MouseMoved { delta: (100.0, 0.0) })]);
    app.run_frames(1).unwrap();
    assert_eq!(app.camera().yaw(), yaw);
    assert!(!app.is_looking());

    script.push(vec![
        mouse(InputEvent::MousePressed { button: MouseButton::Left }),
        mouse(InputEvent::MouseMoved { delta: (100.0, 0.0) }),
    ]);
    app.run_frames(1).unwrap();
    assert!(app.is_looking());
    assert!((app.camera().yaw() - (yaw + 10.0)).abs() < 1e-4);

    script.push(vec![
        mouse(InputEvent::MouseReleased { button: MouseButton::Left }),
        mouse(InputEvent::MouseMoved { delta: (100.0, 0.0) }),
    ]);
    app.run_frames(1).unwrap();
    assert!(!app.is_looking());
    assert!((app.camera().yaw() - (yaw + 10.0)).abs() < 1e-4);
}

#[test]
fn wheel_zooms() {
    let (mut app, _, script) = setup(&Settings::default());
    script.push(vec![mouse(InputEvent::MouseWheel { delta: (0.0, 5.0) })]);
    app.run_frames(1).unwrap();
    assert_eq!(app.camera().zoom(), 40.0);
}

#[test]
fn quit() {
    let (mut app, recorder, script) = setup(&Settings::default());
    script.push(vec![]);
    script.push(vec![]);
    script.push(vec![Event::Window(WindowEvent::Closed)]);

    assert_eq!(app.run_frames(10).unwrap(), 2);
    assert!(!app.is_running());
    assert_eq!(script.swaps(), 2);

    recorder.take();
    assert!(!app.advance().unwrap());
    assert!(recorder.commands().is_empty());

    let (mut app, _, script) = setup(&Settings::default());
    script.push(vec![key(Key::Escape)]);
    assert_eq!(app.run_frames(10).unwrap(), 0);
    assert_eq!(app.frames(), 0);
}

#[test]
fn passes_follow_settings() {
    let settings = Settings {
        shadows: false,
        outline: false,
        ..Default::default()
    };

    let (mut app, recorder, _) = setup(&settings);
    app.run_frames(1).unwrap();

    let commands = recorder.take();
    assert!(!commands.iter().any(|v| match *v {
        Command::BindSurface(Some(_)) | Command::BindTexture(_, _) => true,
        _ => false,
    }));

    let states = render_states(&commands);
    assert!(!states.contains(&OutlinePhase::Outline.render_state()));
    assert_eq!(states.last(), Some(&OutlinePhase::Cleanup.render_state()));

    let draws = commands
        .iter()
        .filter(|v| match **v {
            Command::Draw(_, _) => true,
            _ => false,
        })
        .count();

    assert_eq!(draws, 64 + 24);
}
