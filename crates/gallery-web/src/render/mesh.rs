// Unit geometry shared by every draw. Nodes scale it through their model matrix.

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub pos: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

pub struct MeshData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u16>,
}

/// Cube spanning [-0.5, 0.5] on every axis, four vertices per face.
///
/// Each face's uv origin is its top-left corner when viewed from outside.
pub fn unit_cube() -> MeshData {
    // (normal, right, up) per face
    let faces: [([f32; 3], [f32; 3], [f32; 3]); 6] = [
        ([0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
        ([0.0, 0.0, -1.0], [-1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
        ([1.0, 0.0, 0.0], [0.0, 0.0, -1.0], [0.0, 1.0, 0.0]),
        ([-1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 0.0]),
        ([0.0, 1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, -1.0]),
        ([0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
    ];
    let mut vertices = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);
    for (n, r, u) in faces {
        let base = vertices.len() as u16;
        for (sr, su, uv) in [
            (-0.5, 0.5, [0.0, 0.0]),
            (0.5, 0.5, [1.0, 0.0]),
            (0.5, -0.5, [1.0, 1.0]),
            (-0.5, -0.5, [0.0, 1.0]),
        ] {
            let pos = [
                n[0] * 0.5 + r[0] * sr + u[0] * su,
                n[1] * 0.5 + r[1] * sr + u[1] * su,
                n[2] * 0.5 + r[2] * sr + u[2] * su,
            ];
            vertices.push(Vertex { pos, normal: n, uv });
        }
        indices.extend_from_slice(&[base, base + 3, base + 2, base, base + 2, base + 1]);
    }
    MeshData { vertices, indices }
}

/// Unit quad in the local XY plane facing +Z, used for the floor disc.
pub fn unit_quad() -> MeshData {
    let n = [0.0, 0.0, 1.0];
    let vertices = vec![
        Vertex { pos: [-0.5, 0.5, 0.0], normal: n, uv: [0.0, 0.0] },
        Vertex { pos: [0.5, 0.5, 0.0], normal: n, uv: [1.0, 0.0] },
        Vertex { pos: [0.5, -0.5, 0.0], normal: n, uv: [1.0, 1.0] },
        Vertex { pos: [-0.5, -0.5, 0.0], normal: n, uv: [0.0, 1.0] },
    ];
    MeshData {
        vertices,
        indices: vec![0, 3, 2, 0, 2, 1],
    }
}
