//! Explicitly owned scene graph.
//!
//! A [`Scene`] owns every [`Node`]; nodes refer to each other through
//! [`NodeId`] handles. Components that need to mutate the scene (the builder,
//! the navigation controller) receive it by reference instead of reaching for
//! shared globals.

use crate::picking::{ray_box, ray_disc, Ray};
use glam::{EulerRot, Mat4, Quat, Vec3};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// Index into the gallery's texture slots (one per catalog entry).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TextureId(pub usize);

/// Translation plus XYZ Euler rotation. The gallery never scales nodes.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation: Vec3,
}

impl Transform {
    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            rotation: Vec3::ZERO,
        }
    }

    pub fn from_rotation_y(radians: f32) -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: Vec3::new(0.0, radians, 0.0),
        }
    }

    pub fn matrix(&self) -> Mat4 {
        let q = Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z);
        Mat4::from_rotation_translation(q, self.translation)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Geometry {
    /// Axis-aligned box centered on the node origin.
    Box { width: f32, height: f32, depth: f32 },
    /// Disc in the node's local XY plane.
    Circle { radius: f32 },
}

impl Geometry {
    pub fn cuboid(size: [f32; 3]) -> Self {
        Geometry::Box {
            width: size[0],
            height: size[1],
            depth: size[2],
        }
    }

    /// Scale that maps a unit mesh (cube or quad) onto this geometry.
    pub fn unit_scale(&self) -> Vec3 {
        match *self {
            Geometry::Box {
                width,
                height,
                depth,
            } => Vec3::new(width, height, depth),
            Geometry::Circle { radius } => Vec3::new(radius * 2.0, radius * 2.0, 1.0),
        }
    }
}

/// Shape stamped onto a flat material, used for the arrow plates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Glyph {
    #[default]
    None,
    ChevronLeft,
    ChevronRight,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material {
    pub color: [f32; 3],
    pub texture: Option<TextureId>,
    pub glyph: Glyph,
}

impl Material {
    pub fn solid(color: [f32; 3]) -> Self {
        Self {
            color,
            texture: None,
            glyph: Glyph::None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Mesh {
    pub geometry: Geometry,
    pub material: Material,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpotLight {
    pub color: [f32; 3],
    pub intensity: f32,
    pub distance: f32,
    pub angle: f32,
    pub penumbra: f32,
    pub decay: f32,
    /// World-space point the cone is aimed at.
    pub target: Vec3,
}

/// Planar mirror with its own offscreen render target.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Reflector {
    pub radius: f32,
    pub color: [f32; 3],
    pub target_width: u32,
    pub target_height: u32,
}

#[derive(Clone, Debug, PartialEq)]
pub enum NodeKind {
    Group,
    Mesh(Mesh),
    SpotLight(SpotLight),
    Reflector(Reflector),
}

#[derive(Clone, Debug)]
pub struct Node {
    pub name: String,
    pub transform: Transform,
    pub kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Node {
    pub fn new(name: impl Into<String>, transform: Transform, kind: NodeKind) -> Self {
        Self {
            name: name.into(),
            transform,
            kind,
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn group(name: impl Into<String>, transform: Transform) -> Self {
        Self::new(name, transform, NodeKind::Group)
    }

    #[inline]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    #[inline]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

/// A ray/mesh intersection, ordered by `distance` in [`Scene::raycast`].
#[derive(Clone, Copy, Debug)]
pub struct Hit {
    pub node: NodeId,
    pub distance: f32,
    pub point: Vec3,
}

/// Everything the renderer needs to draw one mesh.
#[derive(Clone, Copy, Debug)]
pub struct DrawItem {
    pub node: NodeId,
    pub world: Mat4,
    pub mesh: Mesh,
}

pub struct Scene {
    nodes: Vec<Node>,
    root: NodeId,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::group("scene", Transform::default())],
            root: NodeId(0),
        }
    }

    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    /// Attach `node` under `parent` and return its handle.
    pub fn add(&mut self, parent: NodeId, mut node: Node) -> NodeId {
        let id = NodeId(self.nodes.len());
        node.parent = Some(parent);
        node.children.clear();
        self.nodes.push(node);
        self.nodes[parent.0].children.push(id);
        id
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    #[inline]
    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    pub fn find(&self, name: &str) -> Option<NodeId> {
        self.nodes.iter().position(|n| n.name == name).map(NodeId)
    }

    pub fn set_rotation_y(&mut self, id: NodeId, radians: f32) {
        self.nodes[id.0].transform.rotation.y = radians;
    }

    #[inline]
    pub fn rotation_y(&self, id: NodeId) -> f32 {
        self.nodes[id.0].transform.rotation.y
    }

    /// Compose transforms from the scene root down to `id`.
    pub fn world_matrix(&self, id: NodeId) -> Mat4 {
        let mut m = self.nodes[id.0].transform.matrix();
        let mut cur = self.nodes[id.0].parent;
        while let Some(p) = cur {
            m = self.nodes[p.0].transform.matrix() * m;
            cur = self.nodes[p.0].parent;
        }
        m
    }

    pub fn world_position(&self, id: NodeId) -> Vec3 {
        self.world_matrix(id).transform_point3(Vec3::ZERO)
    }

    /// `id` followed by all of its descendants, depth first.
    pub fn subtree(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(n) = stack.pop() {
            out.push(n);
            stack.extend(self.nodes[n.0].children.iter().rev().copied());
        }
        out
    }

    /// Every mesh in the scene with its world transform.
    pub fn draw_list(&self) -> Vec<DrawItem> {
        self.subtree(self.root)
            .into_iter()
            .filter_map(|id| match &self.nodes[id.0].kind {
                NodeKind::Mesh(mesh) => Some(DrawItem {
                    node: id,
                    world: self.world_matrix(id),
                    mesh: *mesh,
                }),
                _ => None,
            })
            .collect()
    }

    pub fn spot_lights(&self) -> Vec<(NodeId, Vec3, SpotLight)> {
        self.nodes
            .iter()
            .enumerate()
            .filter_map(|(i, n)| match n.kind {
                NodeKind::SpotLight(light) => {
                    Some((NodeId(i), self.world_position(NodeId(i)), light))
                }
                _ => None,
            })
            .collect()
    }

    pub fn reflector(&self, id: NodeId) -> Option<&Reflector> {
        match &self.nodes[id.0].kind {
            NodeKind::Reflector(r) => Some(r),
            _ => None,
        }
    }

    pub fn reflector_mut(&mut self, id: NodeId) -> Option<&mut Reflector> {
        match &mut self.nodes[id.0].kind {
            NodeKind::Reflector(r) => Some(r),
            _ => None,
        }
    }

    /// Intersect `ray` with every mesh under `subtree`, nearest first.
    pub fn raycast(&self, subtree: NodeId, ray: &Ray) -> Vec<Hit> {
        let mut hits: Vec<Hit> = self
            .subtree(subtree)
            .into_iter()
            .filter_map(|id| {
                let geometry = match &self.nodes[id.0].kind {
                    NodeKind::Mesh(mesh) => mesh.geometry,
                    NodeKind::Reflector(r) => Geometry::Circle { radius: r.radius },
                    _ => return None,
                };
                let world = self.world_matrix(id);
                let (lo, ld) = ray.to_local(&world);
                let t = match geometry {
                    Geometry::Box {
                        width,
                        height,
                        depth,
                    } => ray_box(lo, ld, Vec3::new(width, height, depth) * 0.5),
                    Geometry::Circle { radius } => ray_disc(lo, ld, radius),
                }?;
                let point = world.transform_point3(lo + ld * t);
                Some(Hit {
                    node: id,
                    distance: (point - ray.origin).length(),
                    point,
                })
            })
            .collect();
        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        hits
    }
}
