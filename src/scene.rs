use std::f64::consts::PI;
use std::fs;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use roxmltree::{Document, Node};
use serde::{Deserialize, Serialize};

use crate::math::Vec3;

/// Everything a render needs. Built once, read-only afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Scene {
    #[serde(default)]
    pub camera: Camera,
    #[serde(default)]
    pub light: Light,
    #[serde(default)]
    pub surface: SurfaceParams,
    #[serde(default)]
    pub render: RenderConfig,
}

impl Scene {
    /// Reads and parses a scene description from disk.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let xml = fs::read_to_string(path)
            .with_context(|| format!("unable to read scene {}", path.display()))?;
        Self::from_xml(&xml).with_context(|| format!("invalid scene {}", path.display()))
    }

    /// Parses a scene description. Every element is optional and overrides
    /// the corresponding default.
    pub fn from_xml(xml: &str) -> Result<Self> {
        let document = Document::parse(xml).context("invalid scene XML")?;
        let root = document.root_element();
        if !root.has_tag_name("scene") {
            return Err(anyhow!(
                "expected <scene> root element, found <{}>",
                root.tag_name().name()
            ));
        }

        let mut scene = Scene::default();

        if let Some(node) = child(&root, "camera") {
            scene.camera.position =
                parse_vec3(optional_text(&node, "position"), scene.camera.position)
                    .context("invalid camera position")?;
        }

        if let Some(node) = child(&root, "light") {
            let light = &mut scene.light;
            light.position = parse_vec3(optional_text(&node, "position"), light.position)
                .context("invalid light position")?;
            light.min_intensity =
                parse_f64(optional_text(&node, "intensity"), light.min_intensity)
                    .context("invalid light intensity")?;
        }

        if let Some(node) = child(&root, "sphere") {
            let surface = &mut scene.surface;
            surface.radius = parse_f64(optional_text(&node, "radius"), surface.radius)
                .context("invalid sphere radius")?;
            surface.noise_amplitude =
                parse_f64(optional_text(&node, "amplitude"), surface.noise_amplitude)
                    .context("invalid noise amplitude")?;
            surface.noise_frequency =
                parse_f64(optional_text(&node, "frequency"), surface.noise_frequency)
                    .context("invalid noise frequency")?;
        }

        if let Some(node) = child(&root, "render") {
            let render = &mut scene.render;
            render.width = parse_u32(optional_text(&node, "width"), render.width)
                .context("invalid image width")?;
            render.height = parse_u32(optional_text(&node, "height"), render.height)
                .context("invalid image height")?;
            if let Some(degrees) = optional_text(&node, "fov") {
                render.fov = parse_f64(Some(degrees), 0.0)
                    .context("invalid field of view")?
                    .to_radians();
            }
            render.epsilon = parse_f64(optional_text(&node, "epsilon"), render.epsilon)
                .context("invalid normal epsilon")?;
        }

        scene.render.validate()?;
        Ok(scene)
    }
}

/// Pinhole camera looking down -Z.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub position: Vec3,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 3.0),
        }
    }
}

/// Point light with an ambient floor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Light {
    /// Lowest intensity any lit point receives, in `[0, 1]`.
    pub min_intensity: f64,
    pub position: Vec3,
}

impl Light {
    /// Lambertian term for a surface point, floored at `min_intensity`.
    pub fn intensity_at(&self, point: Vec3, normal: Vec3) -> f64 {
        let to_light = (self.position - point).normalize();
        to_light.dot(normal).max(self.min_intensity)
    }
}

impl Default for Light {
    fn default() -> Self {
        Self {
            min_intensity: 0.4,
            position: Vec3::new(10.0, 10.0, 10.0),
        }
    }
}

/// Shape of the displaced sphere.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurfaceParams {
    pub radius: f64,
    pub noise_amplitude: f64,
    /// Scale applied to positions before sampling noise.
    pub noise_frequency: f64,
}

impl Default for SurfaceParams {
    fn default() -> Self {
        Self {
            radius: 1.5,
            noise_amplitude: 1.0,
            noise_frequency: 3.4,
        }
    }
}

/// Image and sampling settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RenderConfig {
    pub width: u32,
    pub height: u32,
    /// Vertical field of view in radians.
    pub fov: f64,
    /// Offset used for finite-difference normals.
    pub epsilon: f64,
}

impl RenderConfig {
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(anyhow!(
                "image must have a non-zero area ({}x{})",
                self.width,
                self.height
            ));
        }
        Ok(())
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 320,
            height: 240,
            fov: PI / 3.0,
            epsilon: 0.1,
        }
    }
}

fn child<'a, 'input>(node: &Node<'a, 'input>, tag: &str) -> Option<Node<'a, 'input>> {
    node.children().find(|c| c.has_tag_name(tag))
}

fn optional_text(node: &Node<'_, '_>, tag: &str) -> Option<String> {
    child(node, tag)
        .and_then(|c| c.text())
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(|text| text.to_string())
}

fn parse_vec3(value: Option<String>, default: Vec3) -> Result<Vec3> {
    let Some(value) = value else {
        return Ok(default);
    };
    let components = value
        .split_whitespace()
        .map(|component| {
            component
                .parse::<f64>()
                .map_err(|err| anyhow!("failed to parse {component:?}: {err}"))
        })
        .collect::<Result<Vec<_>>>()?;
    match components.as_slice() {
        [x, y, z] => Ok(Vec3::new(*x, *y, *z)),
        _ => Err(anyhow!(
            "vector needs 3 components, found {}",
            components.len()
        )),
    }
}

fn parse_f64(value: Option<String>, default: f64) -> Result<f64> {
    match value {
        Some(value) => value
            .parse::<f64>()
            .map_err(|err| anyhow!("failed to parse float: {err}")),
        None => Ok(default),
    }
}

fn parse_u32(value: Option<String>, default: u32) -> Result<u32> {
    match value {
        Some(value) => value
            .parse::<u32>()
            .map_err(|err| anyhow!("failed to parse integer: {err}")),
        None => Ok(default),
    }
}
