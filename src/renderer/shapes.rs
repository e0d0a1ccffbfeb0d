//! Shape generation for 2D primitives

use glam::Vec2;

use super::vertex::Vertex;

/// Generate vertices for an axis-aligned rectangle from its top-left corner
pub fn rect(top_left: Vec2, size: Vec2, color: [f32; 4]) -> [Vertex; 6] {
    let br = top_left + size;

    // Two triangles
    [
        Vertex::new(top_left.x, top_left.y, color),
        Vertex::new(br.x, top_left.y, color),
        Vertex::new(top_left.x, br.y, color),
        Vertex::new(top_left.x, br.y, color),
        Vertex::new(br.x, top_left.y, color),
        Vertex::new(br.x, br.y, color),
    ]
}

/// Generate vertices for a rectangle centered on `center`
pub fn quad(center: Vec2, half_size: Vec2, color: [f32; 4]) -> [Vertex; 6] {
    rect(center - half_size, half_size * 2.0, color)
}

/// Generate vertices for a tuft of blades rising from the bottom of a cell
pub fn tuft(center: Vec2, half_size: f32, blades: u32, color: [f32; 4]) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((blades * 3) as usize);
    let width = (half_size * 2.0) / blades as f32;
    let base_y = center.y + half_size;
    let left = center.x - half_size;

    for i in 0..blades {
        let x0 = left + i as f32 * width;
        // Alternate blade heights so the tuft looks uneven
        let height = if i % 2 == 0 { half_size * 1.8 } else { half_size * 1.3 };

        vertices.push(Vertex::new(x0, base_y, color));
        vertices.push(Vertex::new(x0 + width, base_y, color));
        vertices.push(Vertex::new(x0 + width / 2.0, base_y - height, color));
    }

    vertices
}
