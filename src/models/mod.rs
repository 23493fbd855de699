pub mod source;

pub use source::{SourceDataState, SourceLink};
