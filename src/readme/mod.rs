pub mod badges;
pub mod check;
pub mod render;

pub use badges::{BadgeKind, Service};
pub use check::{check_readme, CheckOptions, ImageRef, ReadmeIssue, ReadmeReport};
pub use render::{render_readme, BadgeSection, BioRow, LocalCards, ProfileDocument};
