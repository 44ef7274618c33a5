//! Small helpers that are not specific to the machine itself.

pub mod bit_splitter;
