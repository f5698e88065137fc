pub mod layout;
pub mod report;
pub mod unit;

pub use layout::InstallLayout;
pub use report::{InstallReport, Step};
pub use unit::UnitDescriptor;
