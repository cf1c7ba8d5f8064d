pub mod json_metadata_reader;
