//! 도메인 타입.

pub mod alert;
pub mod position;
pub mod status;
pub mod summary;

pub use alert::*;
pub use position::{Position, STOP_LOSS_UNSET_MARKER, UNKNOWN};
pub use status::*;
pub use summary::*;
