//! Random instruction generation for exercising `gcn_dasm`.

pub mod error;
pub mod fuzzer;

pub use error::FuzzerError;
pub use fuzzer::{FuzzerInstruction, FuzzerOptions, InstructionFuzzer};
