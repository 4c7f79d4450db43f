extern crate chequer;

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use chequer::errors::*;
use chequer::prelude::*;

struct StubImporter(Scene);

impl SceneImporter for StubImporter {
    fn import(&self, _: &Path) -> Result<Scene> {
        Ok(self.0.clone())
    }
}

#[derive(Default)]
struct CountingDecoder {
    decoded: RefCell<Vec<PathBuf>>,
}

impl ImageDecoder for CountingDecoder {
    fn decode(&self, path: &Path) -> Result<Image> {
        self.decoded.borrow_mut().push(path.to_owned());
        Ok(Image {
            dimensions: Vector2::new(2, 2),
            pixels: vec![128; 16],
        })
    }
}

/// A fan of `n` triangles.
fn fan(n: u32, material: Option<usize>) -> SceneMesh {
    let mut positions = vec![[0.0, 0.0, 0.0]];
    for i in 0..=n {
        positions.push([i as f32, 0.0, 1.0]);
    }

    SceneMesh {
        name: format!("fan{}", n),
        normals: vec![[0.0, 1.0, 0.0]; positions.len()],
        texcoords: Some(vec![[0.0, 0.0]; positions.len()]),
        faces: (0..n).map(|i| [0, i + 1, i + 2]).collect(),
        positions,
        material,
    }
}

fn node(name: &str, meshes: Vec<usize>, children: Vec<SceneNode>) -> SceneNode {
    SceneNode {
        name: name.to_owned(),
        meshes,
        children,
    }
}

#[test]
fn textures_are_cached() {
    let (video, recorder) = VideoSystem::headless();
    let video = Rc::new(video);

    let scene = Scene {
        root: Some(node("root", vec![0, 1], vec![])),
        meshes: vec![fan(1, Some(0)), fan(2, Some(0))],
        materials: vec![SceneMaterial {
            diffuse: vec!["wood.png".to_owned()],
            specular: vec![],
        }],
        incomplete: false,
    };

    let decoder = CountingDecoder::default();
    let model = Model::load(
        &video,
        Path::new("assets/board/board.obj"),
        &StubImporter(scene),
        &decoder,
    )
    .unwrap();

    assert_eq!(
        *decoder.decoded.borrow(),
        vec![PathBuf::from("assets/board/wood.png")]
    );

    assert_eq!(model.textures_loaded(), 1);
    assert_eq!(recorder.textures_alive(), 1);
    assert_eq!(
        recorder.count(|v| match *v {
            Command::CreateTexture(_, _) => true,
            _ => false,
        }),
        1
    );

    let meshes = model.meshes();
    assert_eq!(meshes.len(), 2);
    assert_eq!(
        meshes[0].textures()[0].texture.handle(),
        meshes[1].textures()[0].texture.handle()
    );

    drop(model);
    assert_eq!(recorder.textures_alive(), 0);
    assert_eq!(recorder.meshes_alive(), 0);
}

#[test]
fn textures_next_to_a_bare_file_name() {
    let (video, _) = VideoSystem::headless();
    let video = Rc::new(video);

    let scene = Scene {
        root: Some(node("root", vec![0], vec![])),
        meshes: vec![fan(1, Some(0))],
        materials: vec![SceneMaterial {
            diffuse: vec!["wood.png".to_owned()],
            specular: vec!["gloss.png".to_owned()],
        }],
        incomplete: false,
    };

    let decoder = CountingDecoder::default();
    Model::load(&video, Path::new("board.obj"), &StubImporter(scene.clone()), &decoder).unwrap();
    Model::from_scene(&video, &scene, Path::new(""), &decoder).unwrap();

    assert_eq!(
        *decoder.decoded.borrow(),
        vec![
            PathBuf::from("./wood.png"),
            PathBuf::from("./gloss.png"),
            PathBuf::from("./wood.png"),
            PathBuf::from("./gloss.png"),
        ]
    );
}

#[test]
fn depth_first_order() {
    let (video, _) = VideoSystem::headless();
    let video = Rc::new(video);

    // root(1) -> a(0) -> aa(3)
    //         -> b(2)
    let root = node(
        "root",
        vec![1],
        vec![
            node("a", vec![0], vec![node("aa", vec![3], vec![])]),
            node("b", vec![2], vec![]),
        ],
    );

    let scene = Scene {
        root: Some(root),
        meshes: vec![fan(1, None), fan(2, None), fan(3, None), fan(4, None)],
        materials: vec![],
        incomplete: false,
    };

    let model = Model::from_scene(&video, &scene, Path::new("."), &CountingDecoder::default())
        .unwrap();

    let triangles: Vec<_> = model.meshes().iter().map(|v| v.len() / 3).collect();
    assert_eq!(triangles, vec![2, 1, 4, 3]);
}

#[test]
fn draw_in_order() {
    let (video, recorder) = VideoSystem::headless();
    let video = Rc::new(video);

    let scene = Scene {
        root: Some(node("root", vec![0], vec![node("child", vec![1], vec![])])),
        meshes: vec![fan(2, None), fan(3, None)],
        materials: vec![],
        incomplete: false,
    };

    let model = Model::from_scene(&video, &scene, Path::new("."), &CountingDecoder::default())
        .unwrap();

    let shader = ShaderProgram::new(
        &video,
        "uniform mat4 model;\nvoid main() {}",
        "uniform vec4 objectColor;\nvoid main() {}",
    )
    .unwrap();

    recorder.take();
    let transform = Matrix4::from_translation(Vector3::new(1.0, 2.0, 3.0));
    assert_eq!(model.draw_with(&shader, Color::gray(), transform).unwrap(), 5);

    let draws: Vec<_> = recorder
        .take()
        .into_iter()
        .filter_map(|v| match v {
            Command::Draw(_, mesh) => Some(mesh),
            _ => None,
        })
        .collect();

    let meshes: Vec<_> = model.meshes().iter().map(|v| v.handle()).collect();
    assert_eq!(draws, meshes);
    assert_eq!(
        recorder.uniform(shader.handle(), "model"),
        Some(UniformVariable::from(transform))
    );
    assert_eq!(recorder.ignored_uniforms(), 2);
}

#[test]
fn incomplete_scenes_are_rejected() {
    let (video, recorder) = VideoSystem::headless();
    let video = Rc::new(video);
    let decoder = CountingDecoder::default();

    let scene = Scene {
        root: Some(node("root", vec![0], vec![])),
        meshes: vec![fan(1, None)],
        materials: vec![],
        incomplete: true,
    };

    let err = Model::load(&video, Path::new("a.obj"), &StubImporter(scene), &decoder)
        .err()
        .unwrap();

    match err.downcast_ref::<Error>() {
        Some(Error::SceneImport(_, _)) => {}
        _ => panic!("unexpected error {}", err),
    }

    let scene = Scene {
        root: None,
        meshes: vec![fan(1, None)],
        materials: vec![],
        incomplete: false,
    };

    assert!(Model::load(&video, Path::new("b.obj"), &StubImporter(scene), &decoder).is_err());
    assert_eq!(recorder.meshes_alive(), 0);
}

#[test]
fn obj_files() {
    let (video, _) = VideoSystem::headless();
    let video = Rc::new(video);

    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("assets/models/tile.obj");
    let tile = Model::load(&video, &path, &ObjImporter, &FileDecoder).unwrap();
    assert_eq!(tile.meshes().len(), 1);
    assert_eq!(tile.meshes()[0].len(), 36);
    assert!(!tile.meshes()[0].layout().texcoord);

    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("assets/models/piece.obj");
    let piece = Model::load(&video, &path, &ObjImporter, &FileDecoder).unwrap();
    assert_eq!(piece.meshes().len(), 1);
    assert_eq!(piece.meshes()[0].len(), 24 * 4 * 3);
}
