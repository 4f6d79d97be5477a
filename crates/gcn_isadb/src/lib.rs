pub mod db;
pub mod error;
pub mod format;
pub mod gfx;
pub mod record;

pub use db::{IsaDB, IterFilter};
pub use error::IsaDbError;
pub use format::Format;
pub use gfx::{EncodingGroup, GfxLevel};
pub use record::{FixedReg, InstrClass, IsaRecord, MimgInfo, MimgOp, OpcodeFlags, OperandSpec, RegClass};
