//! Text processing for scientific metadata

mod tokenizer;

pub use tokenizer::extract_important_words;
