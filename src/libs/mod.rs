pub mod alignment;
pub mod error;
pub mod io;
pub mod ortholog;
pub mod phylo;
pub mod placement;
pub mod query;
pub mod scope;
pub mod species;
pub mod split;

pub use error::ShootError;
