// Similarity scoring: lexical TF-IDF, semantic embeddings and sentence alignment.
//
// The lexical and semantic scores are independent signals and are always
// reported side by side, never blended into one number.

pub mod align;
pub mod embeddings;
pub mod encoder;
pub mod lexical;
pub mod semantic;
pub mod vector;
