//! Gym membership entity.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Membership plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MembershipTier {
    #[default]
    Basic,
    Premium,
    Vip,
}

impl MembershipTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            MembershipTier::Basic => "basic",
            MembershipTier::Premium => "premium",
            MembershipTier::Vip => "vip",
        }
    }
}

impl fmt::Display for MembershipTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MembershipTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "basic" => Ok(MembershipTier::Basic),
            "premium" => Ok(MembershipTier::Premium),
            "vip" => Ok(MembershipTier::Vip),
            other => Err(format!("Unknown membership tier: {}", other)),
        }
    }
}

/// Membership held by an account; at most one per account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Membership {
    pub id: Uuid,
    pub account_id: Uuid,
    pub tier: MembershipTier,
    pub joined_at: DateTime<Utc>,
    pub is_active: bool,
}

impl Membership {
    pub fn new(account_id: Uuid, tier: MembershipTier) -> Self {
        Self {
            id: Uuid::new_v4(),
            account_id,
            tier,
            joined_at: Utc::now(),
            is_active: true,
        }
    }
}
