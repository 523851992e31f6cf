pub mod device;
pub mod events;
pub mod pattern;
pub mod recommendation;
pub mod report;

pub use device::*;
pub use events::*;
pub use pattern::*;
pub use recommendation::*;
pub use report::*;
