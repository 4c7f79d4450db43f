//! Indexed triangle meshes with an interleaved vertex buffer.

impl_handle!(MeshHandle);

/// The fixed attribute slots of every vertex buffer.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Attribute {
    Position = 0,
    Normal = 1,
    Texcoord0 = 2,
}

/// Layout of the interleaved vertex buffer. Positions and normals are always
/// present; texture coordinates are optional.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct VertexLayout {
    pub texcoord: bool,
}

impl VertexLayout {
    /// Size in bytes of one vertex.
    pub fn stride(self) -> usize {
        let floats = if self.texcoord { 8 } else { 6 };
        floats * ::std::mem::size_of::<f32>()
    }

    /// Iterates the enabled attributes as `(slot, components, byte offset)`.
    pub fn attributes(self) -> impl Iterator<Item = (Attribute, u8, usize)> {
        let float = ::std::mem::size_of::<f32>();
        let texcoord = if self.texcoord {
            Some((Attribute::Texcoord0, 2, 6 * float))
        } else {
            None
        };

        vec![
            (Attribute::Position, 3, 0),
            (Attribute::Normal, 3, 3 * float),
        ]
        .into_iter()
        .chain(texcoord)
    }
}

/// The parameters of a mesh object.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshParams {
    pub layout: VertexLayout,
    pub num_verts: usize,
    pub num_idxes: usize,
}

impl MeshParams {
    /// Expected size in bytes of the vertex buffer.
    pub fn vertex_buffer_len(&self) -> usize {
        self.layout.stride() * self.num_verts
    }

    /// Expected size in bytes of the index buffer, indices are always `u32`.
    pub fn index_buffer_len(&self) -> usize {
        ::std::mem::size_of::<u32>() * self.num_idxes
    }
}

/// Raw vertex and index bytes uploaded once at creation.
#[derive(Debug, Clone, Default)]
pub struct MeshData {
    pub vptr: Vec<u8>,
    pub iptr: Vec<u8>,
}

impl MeshData {
    /// Packs interleaved vertex floats and `u32` indices in native byte order.
    pub fn new(vertices: &[f32], indices: &[u32]) -> Self {
        MeshData {
            vptr: vertices.iter().flat_map(|v| v.to_ne_bytes().to_vec()).collect(),
            iptr: indices.iter().flat_map(|v| v.to_ne_bytes().to_vec()).collect(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn layout() {
        let layout = VertexLayout { texcoord: false };
        assert_eq!(layout.stride(), 24);
        assert_eq!(layout.attributes().count(), 2);

        let layout = VertexLayout { texcoord: true };
        assert_eq!(layout.stride(), 32);
        let slots: Vec<_> = layout.attributes().map(|v| (v.0 as u32, v.2)).collect();
        assert_eq!(slots, vec![(0, 0), (1, 12), (2, 24)]);
    }

    #[test]
    fn pack() {
        let data = MeshData::new(&[0.0; 12], &[0, 1, 2]);
        assert_eq!(data.vptr.len(), 48);
        assert_eq!(data.iptr.len(), 12);
    }
}
