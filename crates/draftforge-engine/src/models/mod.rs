pub mod block;
pub mod run;
pub mod section;
pub mod table;

pub use block::{Alignment, Block, BlockKind, INDENT_MAX, ListItem, clamp_indent};
pub use run::{Run, RunStyle, Script};
pub use section::{Section, SectionKind};
pub use table::{TableHeaders, TableRecord, TableRow};
