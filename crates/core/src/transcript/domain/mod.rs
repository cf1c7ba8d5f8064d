pub mod transcript_reader;
pub mod utterance;
