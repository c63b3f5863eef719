//! The cube mesh: eight vertices, twelve triangles.
//!
//! Each vertex record interleaves position (3 × f32), color (3 × f32), and
//! texture coordinates (2 × f32).

use glint_engine::buffer::{AttributeKind, BufferLayout};

pub const FLOATS_PER_VERTEX: usize = 8;

/// Interleaved vertex records: front face at z = 0, back face at z = 1.
#[rustfmt::skip]
pub const VERTICES: [f32; 8 * FLOATS_PER_VERTEX] = [
    // position            color               uv
    -0.5, -0.5, 0.0,       0.0, 0.0, 1.0,      0.0, 0.0,
     0.5, -0.5, 0.0,       0.0, 1.0, 0.0,      1.0, 0.0,
     0.5,  0.5, 0.0,       0.0, 1.0, 1.0,      1.0, 1.0,
    -0.5,  0.5, 0.0,       1.0, 0.0, 0.0,      0.0, 1.0,

    -0.5, -0.5, 1.0,       1.0, 0.0, 1.0,      0.0, 0.0,
     0.5, -0.5, 1.0,       1.0, 1.0, 0.0,      1.0, 0.0,
     0.5,  0.5, 1.0,       1.0, 1.0, 1.0,      1.0, 1.0,
    -0.5,  0.5, 1.0,       0.0, 0.0, 0.0,      0.0, 1.0,
];

/// Triangle list, two triangles per face.
#[rustfmt::skip]
pub const INDICES: [u32; 36] = [
    0, 1, 2,  2, 3, 0,
    1, 2, 5,  5, 6, 2,
    0, 1, 4,  1, 4, 5,
    4, 5, 6,  4, 6, 7,
    0, 3, 4,  3, 4, 7,
    3, 2, 7,  2, 7, 6,
];

pub fn vertex_count() -> usize {
    VERTICES.len() / FLOATS_PER_VERTEX
}

/// Layout matching [`VERTICES`]: position, color, uv.
pub fn layout() -> BufferLayout {
    let mut layout = BufferLayout::new();
    layout
        .push(AttributeKind::F32, 3)
        .push(AttributeKind::F32, 3)
        .push(AttributeKind::F32, 2);
    layout
}

/// True when every index addresses an existing vertex record.
pub fn indices_in_bounds(indices: &[u32], vertex_count: usize) -> bool {
    indices.iter().all(|&i| (i as usize) < vertex_count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eight_vertices() {
        assert_eq!(vertex_count(), 8);
    }

    #[test]
    fn index_count_is_three_per_triangle() {
        assert_eq!(INDICES.len(), 3 * 12);
    }

    #[test]
    fn indices_address_existing_vertices() {
        assert!(indices_in_bounds(&INDICES, vertex_count()));
    }

    #[test]
    fn max_index_is_the_last_record() {
        assert_eq!(
            INDICES.iter().copied().max(),
            Some(vertex_count() as u32 - 1)
        );
    }

    #[test]
    fn index_equal_to_vertex_count_is_out_of_range() {
        let bad = [0u32, 1, vertex_count() as u32];
        assert!(!indices_in_bounds(&bad, vertex_count()));
    }

    #[test]
    fn layout_stride_matches_record_size() {
        assert_eq!(
            layout().stride() as usize,
            FLOATS_PER_VERTEX * size_of::<f32>()
        );
    }

    #[test]
    fn buffer_is_whole_number_of_records() {
        assert_eq!(VERTICES.len() % FLOATS_PER_VERTEX, 0);
    }
}
