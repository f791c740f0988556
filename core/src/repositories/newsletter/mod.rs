pub mod r#trait {
    pub use super::trait_::*;
}
#[path = "trait.rs"]
mod trait_;
pub mod memory;

pub use memory::InMemoryNewsletterRepository;
pub use r#trait::NewsletterRepository;

#[cfg(test)]
mod tests;
