pub mod atlas;

pub use atlas::AtlasVectorStore;
