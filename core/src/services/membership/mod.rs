//! Gym membership enrolment

mod service;

#[cfg(test)]
mod tests;

pub use service::{JoinedMembership, MembershipService};
