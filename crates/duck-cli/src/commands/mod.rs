//! Command implementations.

pub mod normalize;
pub mod rulebases;

pub use self::normalize::execute_normalize;
pub use self::rulebases::execute_rulebases;
