pub mod id;

pub use id::{page_seed, IdGenerator};
