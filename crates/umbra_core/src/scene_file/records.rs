//! Typed, validated scene records.

use std::path::PathBuf;

use umbra_math::DVec3;

/// How a primitive gets its color.
#[derive(Debug, Clone, PartialEq)]
pub enum Surface {
    /// Flat RGB color
    Color(DVec3),
    /// PNG texture, path already resolved and checked to exist
    Texture(PathBuf),
}

#[derive(Debug, Clone, PartialEq)]
pub struct CameraRecord {
    pub position: DVec3,
    pub target: DVec3,
    /// Roll around the viewing direction, in degrees
    pub roll: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LightRecord {
    pub position: DVec3,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlaneRecord {
    pub center: DVec3,
    pub normal: DVec3,
    /// World units covered by one texture tile
    pub scale: f64,
    pub reflect: f64,
    pub surface: Surface,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SphereRecord {
    pub center: DVec3,
    pub radius: f64,
    /// Pole axis for texture mapping
    pub axis: DVec3,
    pub reflect: f64,
    pub surface: Surface,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CylinderRecord {
    pub center: DVec3,
    pub direction: DVec3,
    pub radius: f64,
    /// Half-length along the axis; non-positive means infinite
    pub span: f64,
    pub reflect: f64,
    pub surface: Surface,
}

/// One validated entry of a scene file.
#[derive(Debug, Clone, PartialEq)]
pub enum SceneRecord {
    Camera(CameraRecord),
    Light(LightRecord),
    Plane(PlaneRecord),
    Sphere(SphereRecord),
    Cylinder(CylinderRecord),
}

impl SceneRecord {
    /// True for planes, spheres and cylinders.
    pub fn is_actor(&self) -> bool {
        matches!(
            self,
            SceneRecord::Plane(_) | SceneRecord::Sphere(_) | SceneRecord::Cylinder(_)
        )
    }
}
