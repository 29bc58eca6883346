pub mod fixtures;
pub mod strategies;

#[allow(unused_imports)]
pub use fixtures::*;
#[allow(unused_imports)]
pub use strategies::*;
