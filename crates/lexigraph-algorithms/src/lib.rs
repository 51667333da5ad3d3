pub mod common;
pub mod community;
pub mod pathfinding;
pub mod similarity;

pub use common::{GraphView, NodeId};
pub use community::{connected_components, ComponentsResult};
pub use pathfinding::{bfs_reachable, is_connected};
pub use similarity::{cosine_similarity_matrix, SimilarityError, SimilarityMatrix, SimilarityResult};
