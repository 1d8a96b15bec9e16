//! DOCX assembly: the stateful builder, WordprocessingML serialization, and
//! the OPC package writer.

mod builder;
mod package;
mod xml;

pub use builder::DocxBuilder;
