use crate::core::color::pack_rgb;
use crate::io::config::{Config, SceneConfig};
use crate::io::obj_loader::load_obj;
use crate::pipeline::renderer::Renderer;
use crate::scene::camera::Camera;
use crate::scene::light::DirectionalLight;
use crate::scene::material::MaterialTextures;
use crate::scene::mesh::Mesh;
use crate::scene::texture::Texture;
use log::{error, info, warn};
use nalgebra::{Point3, Vector3};

/// Initial resource loading (Heavy I/O). Never fails: every missing resource
/// is logged and replaced by a built-in fallback.
pub fn build_renderer(config: &Config) -> Renderer {
    let render = &config.render;

    // 1. Camera. Built square; the vertex stage corrects x for the viewport.
    let camera = Camera::new(config.camera.fov, Point3::from(config.camera.origin), 1.0)
        .with_planes(config.camera.near, config.camera.far);

    // 2. Mesh + textures
    let mesh = load_scene_mesh(&config.scene);
    let textures = load_material_textures(&config.scene);

    let mut renderer = Renderer::new(render.width, render.height, camera, mesh, textures);

    // 3. Settings & lighting
    renderer.settings = render.settings();
    renderer.shader = config.scene.shader;
    renderer.light = DirectionalLight::new(
        Vector3::from(render.light_direction),
        render.light_intensity,
    );
    renderer.shininess = render.shininess;
    renderer.rotation_speed = render.rotation_speed;
    renderer.background = pack_rgb(Vector3::from(render.background));

    info!(
        "Scene ready: {} vertices, {} indices ({:?}), {:?} shader",
        renderer.mesh.vertices.len(),
        renderer.mesh.indices.len(),
        renderer.mesh.topology,
        renderer.shader
    );
    renderer
}

/// Loads the configured OBJ, or the built-in quad strip when none is given or loading fails.
pub fn load_scene_mesh(scene: &SceneConfig) -> Mesh {
    let mut mesh = match &scene.mesh {
        Some(path) => match load_obj(path) {
            Ok(m) => m,
            Err(e) => {
                error!("Error loading mesh: {}. Using the built-in quad strip.", e);
                Mesh::create_quad_strip()
            }
        },
        None => {
            info!("No mesh configured. Using the built-in quad strip.");
            Mesh::create_quad_strip()
        }
    };

    if let Some(topology) = scene.topology {
        mesh.topology = topology;
    }

    let translation = Vector3::from(scene.translation);
    if translation != Vector3::zeros() {
        mesh.translate(&translation);
    }
    mesh
}

/// Loads the four surface maps, substituting a solid texture for each one that is
/// unset or fails to load.
pub fn load_material_textures(scene: &SceneConfig) -> MaterialTextures {
    let fallback = MaterialTextures::default();
    MaterialTextures {
        diffuse: load_or(&scene.diffuse_texture, "diffuse", fallback.diffuse),
        specular: load_or(&scene.specular_texture, "specular", fallback.specular),
        gloss: load_or(&scene.gloss_texture, "gloss", fallback.gloss),
        normal: load_or(&scene.normal_texture, "normal", fallback.normal),
    }
}

fn load_or(path: &Option<String>, slot: &str, fallback: Texture) -> Texture {
    let Some(path) = path else {
        return fallback;
    };
    match Texture::load(path) {
        Ok(texture) => texture,
        Err(e) => {
            warn!("{}. Using a solid {} map.", e, slot);
            fallback
        }
    }
}
