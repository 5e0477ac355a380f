mod list;
mod me;
mod store;

pub use list::list;
pub use me::me;
pub use store::store;
