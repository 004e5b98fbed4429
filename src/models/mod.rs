pub mod anomaly;
pub mod conversation;
pub mod enums;
pub mod inventory;
pub mod visit;

pub use anomaly::*;
pub use conversation::*;
pub use inventory::*;
pub use visit::*;
