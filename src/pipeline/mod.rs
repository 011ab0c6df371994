//! External analysis pipeline trigger

pub mod runner;
pub mod symbols;

pub use runner::{PipelineExecutor, PipelineOutput, ProcessPipeline};
pub use symbols::{
    parse_symbol_list, validate_batch, PipelineRequest, Symbol, SymbolsInput, MAX_BATCH_SYMBOLS,
};
