pub mod event;
pub mod gallery;
pub mod member;
pub mod notice;
pub mod transaction;

pub use event::*;
pub use gallery::*;
pub use member::*;
pub use notice::*;
pub use transaction::*;
