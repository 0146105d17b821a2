pub mod analysis;
pub mod error;
pub mod experiment;
pub mod fault;
pub mod net;
pub mod topo;
pub mod viz;

pub use error::FatTreeError;

#[cfg(test)]
mod test;
