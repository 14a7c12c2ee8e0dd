pub mod generator;
pub mod sections;
pub mod formatter;

pub use generator::ChangelogGenerator;
pub use sections::{ChangelogSection, ChangelogSections};
