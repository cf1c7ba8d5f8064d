pub mod code_scorer;
pub mod vocabulary;
