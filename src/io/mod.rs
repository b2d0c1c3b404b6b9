pub mod export;

pub use export::ReportExporter;
