//! The context assembler: turns a route result into a formatted injection
//! block, loading per-skill documentation as it goes.

mod assemble;
mod cache;
mod content;

pub use assemble::assemble_context;
pub use cache::SkillContentCache;
pub use content::{load_skill_content, ContentWarning};
