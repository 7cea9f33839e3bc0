mod create;
mod delete;
mod read;
mod update;

pub use create::*;
pub use delete::*;
pub use read::*;
pub use update::*;
