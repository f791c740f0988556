//! Newsletter subscriptions

mod service;

#[cfg(test)]
mod tests;

pub use service::{NewsletterService, SubscriptionOutcome};
