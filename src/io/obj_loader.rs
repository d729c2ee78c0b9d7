use crate::core::geometry::Vertex;
use crate::error::RenderError;
use crate::scene::mesh::{Mesh, PrimitiveTopology};
use log::{info, warn};
use nalgebra::{Point3, Vector2, Vector3};
use std::path::Path;

/// Loads an OBJ file and returns a unified triangle-list Mesh with derived tangents.
///
/// All sub-meshes of the file are merged into one index buffer. Materials (MTL) are ignored;
/// textures come from the scene configuration.
pub fn load_obj<P: AsRef<Path>>(path: P) -> Result<Mesh, RenderError> {
    let path_obj = path.as_ref();
    let obj_error = |reason: String| RenderError::ObjLoad {
        path: path_obj.display().to_string(),
        reason,
    };

    if !path_obj.exists() {
        return Err(obj_error("file not found".to_string()));
    }

    info!("Loading OBJ file: {:?}", path_obj);

    let load_options = tobj::LoadOptions {
        triangulate: true,
        single_index: true, // Unifies indices for Position/Normal/UV
        ..Default::default()
    };

    let (models, _materials) =
        tobj::load_obj(path_obj, &load_options).map_err(|e| obj_error(e.to_string()))?;

    let mut vertices = Vec::new();
    let mut indices = Vec::new();
    let mut index_offset = 0u32;

    for model in models {
        let mesh = &model.mesh;
        let num_vertices = mesh.positions.len() / 3;

        let has_normals = !mesh.normals.is_empty();
        let has_texcoords = !mesh.texcoords.is_empty();

        if !has_normals {
            warn!(
                "Mesh '{}' is missing normals. Using default (0, 1, 0).",
                model.name
            );
        }

        for i in 0..num_vertices {
            let position = Point3::new(
                mesh.positions[i * 3],
                mesh.positions[i * 3 + 1],
                mesh.positions[i * 3 + 2],
            );

            let normal = if has_normals {
                Vector3::new(
                    mesh.normals[i * 3],
                    mesh.normals[i * 3 + 1],
                    mesh.normals[i * 3 + 2],
                )
            } else {
                Vector3::y()
            };

            // OBJ puts v = 0 at the bottom; textures are sampled with v = 0 at the top row.
            let uv = if has_texcoords {
                Vector2::new(mesh.texcoords[i * 2], 1.0 - mesh.texcoords[i * 2 + 1])
            } else {
                Vector2::zeros()
            };

            vertices.push(Vertex::new(position, normal, uv));
        }

        // Sub-meshes are merged, so offset by the vertices already added.
        indices.extend(mesh.indices.iter().map(|index| index + index_offset));
        index_offset += num_vertices as u32;
    }

    let mut mesh = Mesh::new(vertices, indices, PrimitiveTopology::TriangleList);
    mesh.validate()?;
    mesh.compute_tangents();

    info!(
        "OBJ loaded successfully. Total vertices: {}, Total indices: {}",
        mesh.vertices.len(),
        mesh.indices.len()
    );

    Ok(mesh)
}
