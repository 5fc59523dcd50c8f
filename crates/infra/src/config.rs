//! Configuration loading and representation.

use core::str::FromStr;
use std::env;

use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};

use crate::store::query::{PageRequest, Pagination, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};

/// What to do when a company that borrowers or investors still point at is deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReferencePolicy {
    /// Delete anyway; dependents keep a dangling company id.
    #[default]
    Ignore,
    /// Refuse the delete while any dependent exists.
    Restrict,
}

impl FromStr for ReferencePolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ignore" => Ok(ReferencePolicy::Ignore),
            "restrict" => Ok(ReferencePolicy::Restrict),
            other => bail!("reference policy must be one of: ignore, restrict (got {other:?})"),
        }
    }
}

/// Party service settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartyConfig {
    pub default_page_limit: u32,
    pub max_page_limit: u32,
    pub company_delete_policy: ReferencePolicy,
}

impl Default for PartyConfig {
    fn default() -> Self {
        Self {
            default_page_limit: DEFAULT_PAGE_LIMIT,
            max_page_limit: MAX_PAGE_LIMIT,
            company_delete_policy: ReferencePolicy::Ignore,
        }
    }
}

impl PartyConfig {
    /// Load from `PARTY_PAGE_DEFAULT_LIMIT`, `PARTY_PAGE_MAX_LIMIT` and
    /// `PARTY_COMPANY_DELETE_POLICY`; unset variables keep their defaults.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as `from_env` but reads variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let default_page_limit = match lookup("PARTY_PAGE_DEFAULT_LIMIT") {
            Some(raw) => raw
                .trim()
                .parse::<u32>()
                .context("PARTY_PAGE_DEFAULT_LIMIT must be a positive integer")?,
            None => defaults.default_page_limit,
        };
        let max_page_limit = match lookup("PARTY_PAGE_MAX_LIMIT") {
            Some(raw) => raw
                .trim()
                .parse::<u32>()
                .context("PARTY_PAGE_MAX_LIMIT must be a positive integer")?,
            None => defaults.max_page_limit,
        };
        let company_delete_policy = match lookup("PARTY_COMPANY_DELETE_POLICY") {
            Some(raw) => raw
                .parse::<ReferencePolicy>()
                .context("invalid PARTY_COMPANY_DELETE_POLICY")?,
            None => defaults.company_delete_policy,
        };

        if default_page_limit == 0 || max_page_limit == 0 {
            bail!("page limits must be greater than zero");
        }
        if default_page_limit > max_page_limit {
            bail!(
                "PARTY_PAGE_DEFAULT_LIMIT ({default_page_limit}) exceeds PARTY_PAGE_MAX_LIMIT ({max_page_limit})"
            );
        }

        Ok(Self {
            default_page_limit,
            max_page_limit,
            company_delete_policy,
        })
    }

    /// Resolve a caller's page request against the configured default and cap.
    pub fn normalize(&self, request: PageRequest) -> Pagination {
        request.resolve(self.default_page_limit, self.max_page_limit)
    }
}
