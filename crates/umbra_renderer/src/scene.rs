//! Scene aggregate: primitives, light, camera and render settings.

use std::path::Path;
use std::sync::Arc;

use thiserror::Error;
use umbra_core::{Color, SceneRecord, Surface, Texture, TextureCache, TextureError};
use umbra_math::{DVec3, Interval, Ray};

use crate::light::{Light, LightModel};
use crate::primitive::{Appearance, Hit, PrimitiveRef};
use crate::{Camera, Cylinder, Plane, Sphere};

/// Errors from building a scene.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("Texture error: {0}")]
    Texture(#[from] TextureError),

    #[error("Scene has no camera")]
    MissingCamera,

    #[error("Scene has no light")]
    MissingLight,
}

/// Result type for scene construction.
pub type SceneResult<T> = Result<T, SceneError>;

/// Render settings, fixed for the lifetime of a scene.
#[derive(Debug, Clone)]
pub struct RenderSettings {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Horizontal field of view in degrees
    pub fov: f64,
    /// Worker threads for the block renderer
    pub threads: usize,
    pub light_model: LightModel,
    /// Distance at which linear and quadratic falloff reach zero
    pub max_distance: f64,
    /// Primary rays and lights farther than this count as missed or unlit
    pub cutoff_distance: f64,
    /// Brightness kept in shadow, 0 is black
    pub shadow_factor: f64,
    /// Color of rays that hit nothing
    pub background: Color,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            fov: 60.0,
            threads: 1,
            light_model: LightModel::Linear,
            max_distance: 100.0,
            cutoff_distance: 1000.0,
            shadow_factor: 0.3,
            background: Color::ZERO,
        }
    }
}

/// Everything needed to render one image.
///
/// Built once, then shared read-only by all render workers.
pub struct Scene {
    planes: Vec<Plane>,
    spheres: Vec<Sphere>,
    cylinders: Vec<Cylinder>,
    light: Light,
    camera: Camera,
    settings: RenderSettings,
    textures: TextureCache,
}

impl Scene {
    /// Create an empty scene. The camera takes its resolution and field of
    /// view from `settings`.
    pub fn new(camera: Camera, light: Light, settings: RenderSettings) -> Self {
        let mut camera = camera
            .with_resolution(settings.width, settings.height)
            .with_fov(settings.fov);
        camera.initialize();

        Self {
            planes: Vec::new(),
            spheres: Vec::new(),
            cylinders: Vec::new(),
            light,
            camera,
            settings,
            textures: TextureCache::new(),
        }
    }

    /// Build a scene from validated scene file records.
    pub fn from_records(records: &[SceneRecord], settings: RenderSettings) -> SceneResult<Self> {
        let camera = records
            .iter()
            .find_map(|record| match record {
                SceneRecord::Camera(camera) => Some(camera),
                _ => None,
            })
            .ok_or(SceneError::MissingCamera)?;

        let light = records
            .iter()
            .find_map(|record| match record {
                SceneRecord::Light(light) => Some(light),
                _ => None,
            })
            .ok_or(SceneError::MissingLight)?;

        let mut scene = Scene::new(
            Camera::new(camera.position, camera.target, camera.roll),
            Light::new(light.position),
            settings,
        );

        for record in records {
            match record {
                SceneRecord::Camera(_) | SceneRecord::Light(_) => {}
                SceneRecord::Plane(plane) => {
                    let appearance = scene.appearance(&plane.surface)?;
                    scene.add_plane(
                        plane.center,
                        plane.normal,
                        plane.scale,
                        plane.reflect,
                        appearance,
                    );
                }
                SceneRecord::Sphere(sphere) => {
                    let appearance = scene.appearance(&sphere.surface)?;
                    scene.add_sphere(
                        sphere.center,
                        sphere.radius,
                        sphere.axis,
                        sphere.reflect,
                        appearance,
                    );
                }
                SceneRecord::Cylinder(cylinder) => {
                    let appearance = scene.appearance(&cylinder.surface)?;
                    scene.add_cylinder(
                        cylinder.center,
                        cylinder.direction,
                        cylinder.radius,
                        cylinder.span,
                        cylinder.reflect,
                        appearance,
                    );
                }
            }
        }

        log::info!(
            "Scene built: {} planes, {} spheres, {} cylinders, {} textures",
            scene.planes.len(),
            scene.spheres.len(),
            scene.cylinders.len(),
            scene.textures.len()
        );

        Ok(scene)
    }

    fn appearance(&mut self, surface: &Surface) -> SceneResult<Appearance> {
        Ok(match surface {
            Surface::Color(color) => Appearance::Flat(*color),
            Surface::Texture(path) => Appearance::Textured(self.add_texture(path)?),
        })
    }

    /// Load a texture through the scene's cache. Repeated paths share one copy.
    pub fn add_texture(&mut self, path: &Path) -> SceneResult<Arc<Texture>> {
        Ok(self.textures.load(path)?)
    }

    pub fn add_plane(
        &mut self,
        center: DVec3,
        normal: DVec3,
        texture_scale: f64,
        reflect: f64,
        appearance: Appearance,
    ) {
        self.planes
            .push(Plane::new(center, normal, texture_scale, reflect, appearance));
    }

    pub fn add_sphere(
        &mut self,
        center: DVec3,
        radius: f64,
        axis: DVec3,
        reflect: f64,
        appearance: Appearance,
    ) {
        self.spheres
            .push(Sphere::new(center, radius, axis, reflect, appearance));
    }

    pub fn add_cylinder(
        &mut self,
        center: DVec3,
        direction: DVec3,
        radius: f64,
        span: f64,
        reflect: f64,
        appearance: Appearance,
    ) {
        self.cylinders.push(Cylinder::new(
            center, direction, radius, span, reflect, appearance,
        ));
    }

    /// All primitives: planes, then spheres, then cylinders.
    pub fn primitives(&self) -> impl Iterator<Item = PrimitiveRef<'_>> {
        self.planes
            .iter()
            .map(PrimitiveRef::Plane)
            .chain(self.spheres.iter().map(PrimitiveRef::Sphere))
            .chain(self.cylinders.iter().map(PrimitiveRef::Cylinder))
    }

    /// Closest primitive hit by `ray` inside `window`.
    ///
    /// On exactly equal distances the primitive found first wins.
    pub fn nearest_hit(&self, ray: &Ray, window: Interval) -> Option<Hit<'_>> {
        let mut closest: Option<Hit<'_>> = None;
        let mut search = window;

        for primitive in self.primitives() {
            if let Some(t) = primitive.solve(ray, search) {
                if closest.map_or(true, |hit| t < hit.t) {
                    closest = Some(Hit { t, primitive });
                    search = search.with_max(t);
                }
            }
        }

        closest
    }

    /// True if any primitive is hit strictly inside `window`.
    pub fn occluded(&self, ray: &Ray, window: Interval) -> bool {
        self.primitives().any(|primitive| {
            primitive
                .solve(ray, window)
                .is_some_and(|t| window.surrounds(t))
        })
    }

    pub fn light(&self) -> &Light {
        &self.light
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    pub fn primitive_count(&self) -> usize {
        self.planes.len() + self.spheres.len() + self.cylinders.len()
    }

    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }
}
