pub mod enums;
pub mod lab;
pub mod report;

pub use enums::{Gender, InvalidEnum, ResultFlag};
pub use lab::{FooterSettings, HeaderSettings, Lab, LabReportSettings, StylingSettings};
pub use report::{PatientInfo, Report, ReportResult, TestInfo};
