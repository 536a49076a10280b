pub mod record;
pub mod session;

pub use record::{Attribute, Difficulty, Record, Skill, SkillTest};
pub use session::Session;
