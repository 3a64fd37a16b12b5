pub mod ast;
pub mod capture;
pub mod classes;
pub mod error;
pub mod generator;
pub mod random;

pub use ast::{NodeKind, RegexNode};
pub use error::GenerateError;
pub use generator::{Generator, GeneratorConfig};
pub use random::{RandomSource, RngSource};

/// Generate one string for `ast` with the default configuration.
pub fn generate<R: RandomSource>(ast: &RegexNode, random: &mut R) -> Result<String, GenerateError> {
    Generator::new(random).generate(ast)
}
