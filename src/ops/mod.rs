pub mod carry_over;
pub mod journal;
pub mod navigation;
pub mod punctuate;
pub mod session;
pub mod task_ops;
pub mod timestamp;

pub use journal::Journal;
pub use navigation::NextPolicy;
pub use session::{SessionError, SessionOutcome, edit_today};
