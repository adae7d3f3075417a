pub mod executor;
pub mod prompts;

pub use executor::{Assistant, parse_output};
pub use prompts::{AnalyzeStructure, DescribeMolecule, ElementFunFact, PredictBonds, Task};
