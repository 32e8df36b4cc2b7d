use std::sync::Arc;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BlendMode {
    #[default]
    Alpha,
    Add,
}

#[derive(Clone, Debug)]
pub enum Background {
    Color([f32; 4]),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SizeSpec {
    Px(f32),
    Fill,
}

/// A sprite can be sourced from either a texture or a solid color.
/// For `Solid`, the final color is `tint` (no sampling).
#[derive(Clone, Debug, PartialEq)]
pub enum SpriteSource {
    Texture(String),
    Solid,
}

/// Vertex layout for line-strip meshes; uploaded as raw bytes.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshVertex {
    pub pos: [f32; 2],
    pub color: [f32; 4],
}

#[inline(always)]
pub fn vertex_bytes(vertices: &[MeshVertex]) -> &[u8] {
    bytemuck::cast_slice(vertices)
}

#[derive(Clone, Debug)]
pub enum Actor {
    Sprite {
        align: [f32; 2],
        offset: [f32; 2],
        size: [SizeSpec; 2],
        source: SpriteSource,
        tint: [f32; 4],
        z: i16,
        visible: bool,
        rot_z_deg: f32,
        scale: [f32; 2],
    },

    Text {
        align: [f32; 2],
        offset: [f32; 2],
        color: [f32; 4],
        font: &'static str,
        content: String,
        align_text: TextAlign,
        z: i16,
        scale: [f32; 2],
    },

    /// Frame/group box; children are positioned relative to its top-left.
    Frame {
        align: [f32; 2],
        offset: [f32; 2],
        size: [SizeSpec; 2],
        children: Vec<Self>,
        background: Option<Background>,
        z: i16,
    },

    /// Thick line strip. Vertices are relative to `offset`.
    Mesh {
        offset: [f32; 2],
        vertices: Arc<[MeshVertex]>,
        thickness: f32,
        blend: BlendMode,
        z: i16,
    },
}

impl Actor {
    /// Multiplies every color in the subtree by `alpha`.
    pub fn fade(&mut self, alpha: f32) {
        match self {
            Self::Sprite { tint, .. } => tint[3] *= alpha,
            Self::Text { color, .. } => color[3] *= alpha,
            Self::Frame {
                children,
                background,
                ..
            } => {
                if let Some(Background::Color(c)) = background {
                    c[3] *= alpha;
                }
                children.iter_mut().for_each(|c| c.fade(alpha));
            }
            Self::Mesh { vertices, .. } => {
                let faded: Vec<MeshVertex> = vertices
                    .iter()
                    .map(|v| MeshVertex {
                        pos: v.pos,
                        color: [v.color[0], v.color[1], v.color[2], v.color[3] * alpha],
                    })
                    .collect();
                *vertices = Arc::from(faded);
            }
        }
    }

    /// Counts this actor and all descendants.
    pub fn count(&self) -> usize {
        match self {
            Self::Frame { children, .. } => 1 + children.iter().map(Self::count).sum::<usize>(),
            _ => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fade_reaches_nested_children() {
        let mut frame = Actor::Frame {
            align: [0.0, 0.0],
            offset: [0.0, 0.0],
            size: [SizeSpec::Fill, SizeSpec::Fill],
            children: vec![Actor::Text {
                align: [0.0, 0.0],
                offset: [0.0, 0.0],
                color: [1.0; 4],
                font: "miso",
                content: "x".into(),
                align_text: TextAlign::Left,
                z: 0,
                scale: [1.0, 1.0],
            }],
            background: Some(Background::Color([0.0, 0.0, 0.0, 1.0])),
            z: 0,
        };
        frame.fade(0.5);
        assert_eq!(frame.count(), 2);
        let Actor::Frame { children, background, .. } = &frame else {
            panic!("frame expected");
        };
        assert!(matches!(background, Some(Background::Color(c)) if c[3] == 0.5));
        assert!(matches!(&children[0], Actor::Text { color, .. } if color[3] == 0.5));
    }

    #[test]
    fn vertices_upload_as_packed_floats() {
        let v = [MeshVertex {
            pos: [1.0, 2.0],
            color: [0.0; 4],
        }; 3];
        assert_eq!(vertex_bytes(&v).len(), 3 * 6 * 4);
    }
}
