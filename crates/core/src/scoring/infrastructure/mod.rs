pub mod vocabulary_file;
