pub mod r#trait {
    pub use super::trait_::*;
}
#[path = "trait.rs"]
mod trait_;
pub mod memory;

pub use memory::InMemoryTokenRepository;
pub use r#trait::TokenRepository;

#[cfg(test)]
mod tests;
