//! Commonly used utilities like handles, pools and scope guards.

#[macro_use]
pub mod handle;
pub mod data_vec;
pub mod handle_pool;

mod finally;

pub use self::data_vec::DataVec;
pub use self::finally::{finally, FinallyGuard};
pub use self::handle::{Handle, HandleIndex};
pub use self::handle_pool::HandlePool;
