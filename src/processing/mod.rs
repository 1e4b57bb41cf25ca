//! Text normalization, embeddings, scoring and ranking

pub mod embedding_manager;
pub mod embeddings;
pub mod lemmatizer;
pub mod ranker;
pub mod scorer;
pub mod text_processor;
pub mod vocabulary;
