//! Scene descriptions and the importers that produce them.
//!
//! A `Scene` mirrors the usual node graph of interchange formats: a tree of
//! nodes referencing meshes by index, and meshes referencing materials by
//! index. `ObjImporter` reads Wavefront OBJ files, with their MTL libraries,
//! through `tobj`.

use std::path::Path;

use tobj;

use crate::errors::*;
use crate::math::prelude::*;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SceneNode {
    pub name: String,
    pub meshes: Vec<usize>,
    pub children: Vec<SceneNode>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SceneMesh {
    pub name: String,
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub texcoords: Option<Vec<[f32; 2]>>,
    pub faces: Vec<[u32; 3]>,
    pub material: Option<usize>,
}

/// Texture paths of a material, relative to the directory of the scene file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SceneMaterial {
    pub diffuse: Vec<String>,
    pub specular: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    pub root: Option<SceneNode>,
    pub meshes: Vec<SceneMesh>,
    pub materials: Vec<SceneMaterial>,
    /// Set by importers that could only read part of the file.
    pub incomplete: bool,
}

impl Scene {
    /// Returns the root node of a complete scene.
    pub fn root(&self) -> Option<&SceneNode> {
        if self.incomplete {
            None
        } else {
            self.root.as_ref()
        }
    }
}

/// Parses scene files.
pub trait SceneImporter {
    fn import(&self, path: &Path) -> Result<Scene>;
}

/// Imports Wavefront OBJ files. Faces are triangulated and every vertex gets a
/// single index; missing normals are generated by averaging face normals.
#[derive(Debug, Default, Clone, Copy)]
pub struct ObjImporter;

impl SceneImporter for ObjImporter {
    fn import(&self, path: &Path) -> Result<Scene> {
        let options = tobj::LoadOptions {
            triangulate: true,
            single_index: true,
            ..Default::default()
        };

        let (models, materials) = tobj::load_obj(path, &options)
            .map_err(|err| Error::SceneImport(path.display().to_string(), err.to_string()))?;

        let materials = match materials {
            Ok(materials) => materials,
            Err(err) => {
                warn!("Failed to load materials of {:?}: {}", path, err);
                Vec::new()
            }
        };

        let mut scene = Scene::default();
        let mut root = SceneNode {
            name: path
                .file_stem()
                .map(|v| v.to_string_lossy().into_owned())
                .unwrap_or_default(),
            ..Default::default()
        };

        for model in models {
            let mesh = model.mesh;
            if mesh.indices.len() % 3 != 0 {
                scene.incomplete = true;
                warn!("Mesh {:?} of {:?} is not triangulated.", model.name, path);
                continue;
            }

            let positions = chunks3(&mesh.positions);
            let faces: Vec<_> = mesh
                .indices
                .chunks(3)
                .map(|v| [v[0], v[1], v[2]])
                .collect();

            let normals = if mesh.normals.len() == mesh.positions.len() {
                chunks3(&mesh.normals)
            } else {
                smooth_normals(&positions, &faces)
            };

            let texcoords = if !mesh.texcoords.is_empty() {
                Some(mesh.texcoords.chunks(2).map(|v| [v[0], v[1]]).collect())
            } else {
                None
            };

            root.children.push(SceneNode {
                name: model.name.clone(),
                meshes: vec![scene.meshes.len()],
                children: Vec::new(),
            });

            scene.meshes.push(SceneMesh {
                name: model.name,
                positions,
                normals,
                texcoords,
                faces,
                material: mesh.material_id.filter(|&v| v < materials.len()),
            });
        }

        scene.materials = materials
            .into_iter()
            .map(|v| SceneMaterial {
                diffuse: v.diffuse_texture.into_iter().collect(),
                specular: v.specular_texture.into_iter().collect(),
            })
            .collect();

        scene.root = Some(root);

        debug!(
            "Imported {:?} with {} meshes and {} materials.",
            path,
            scene.meshes.len(),
            scene.materials.len()
        );

        Ok(scene)
    }
}

fn chunks3(v: &[f32]) -> Vec<[f32; 3]> {
    v.chunks(3)
        .filter(|v| v.len() == 3)
        .map(|v| [v[0], v[1], v[2]])
        .collect()
}

/// Area weighted vertex normals.
pub fn smooth_normals(positions: &[[f32; 3]], faces: &[[u32; 3]]) -> Vec<[f32; 3]> {
    let mut normals = vec![Vector3::new(0.0f32, 0.0, 0.0); positions.len()];

    for face in faces {
        let [a, b, c] = *face;
        let (a, b, c) = (a as usize, b as usize, c as usize);
        if a >= positions.len() || b >= positions.len() || c >= positions.len() {
            continue;
        }

        let pa = Vector3::from(positions[a]);
        let pb = Vector3::from(positions[b]);
        let pc = Vector3::from(positions[c]);
        let n = (pb - pa).cross(pc - pa);

        normals[a] += n;
        normals[b] += n;
        normals[c] += n;
    }

    normals
        .into_iter()
        .map(|n| {
            if n.magnitude2() > 0.0 {
                n.normalize().into()
            } else {
                [0.0, 1.0, 0.0]
            }
        })
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn incomplete_scene_has_no_root() {
        let mut scene = Scene {
            root: Some(SceneNode::default()),
            ..Default::default()
        };

        assert!(scene.root().is_some());
        scene.incomplete = true;
        assert!(scene.root().is_none());
        assert!(Scene::default().root().is_none());
    }

    #[test]
    fn normals_of_a_quad() {
        let positions = [
            [0.0, 0.0, 0.0],
            [0.0, 0.0, 1.0],
            [1.0, 0.0, 1.0],
            [1.0, 0.0, 0.0],
        ];

        let normals = smooth_normals(&positions, &[[0, 1, 2], [0, 2, 3]]);
        assert_eq!(normals.len(), 4);
        for n in normals {
            assert_eq!(n, [0.0, 1.0, 0.0]);
        }
    }
}
