pub mod host;
pub mod parser;
pub mod scan;
pub mod walk;
