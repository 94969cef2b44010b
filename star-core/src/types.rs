/// Index of a vertex on the star.
///
/// Vertex `0` sits at the top of the circle and indices increase clockwise.
/// An index is only meaningful for the point count it was produced for.
pub type VertexIndex = usize;
