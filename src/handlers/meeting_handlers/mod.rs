pub mod crud;
pub mod list;

pub use crud::*;
pub use list::*;
