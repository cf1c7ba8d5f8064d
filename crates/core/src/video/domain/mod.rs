pub mod metadata_reader;
