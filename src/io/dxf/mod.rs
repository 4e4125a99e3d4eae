//! DXF (Drawing Exchange Format) reading and writing

pub mod code_pair;
mod encoding;
mod reader;
mod writer;

pub use code_pair::CodePair;
pub use encoding::encoding_from_code_page;
pub use reader::{load, DxfReader};
pub use writer::{save, DxfWriter};
