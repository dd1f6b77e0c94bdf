//! Core types for classification runs

use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::time::Duration;

use crate::error::{PurifyError, Result};

/// A trimmed, lower-cased address whose domain has been typo-corrected.
///
/// Only the [`crate::Normalizer`] builds these, so `local_part + "@" + domain`
/// always reproduces the normalized string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NormalizedAddress {
    local_part: String,
    domain: String,
}

impl NormalizedAddress {
    pub(crate) const fn from_parts(local_part: String, domain: String) -> Self {
        Self { local_part, domain }
    }

    /// Local part (before @)
    #[must_use]
    pub fn local_part(&self) -> &str {
        &self.local_part
    }

    /// Domain after typo correction
    #[must_use]
    pub fn domain(&self) -> &str {
        &self.domain
    }
}

impl fmt::Display for NormalizedAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.local_part, self.domain)
    }
}

impl Serialize for NormalizedAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// The user-toggleable checks of a classification run.
///
/// Domain syntax/TLD validation and duplicate removal are always on and
/// therefore have no flag here.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct ValidationRules {
    /// Reject addresses that do not look like `local@domain.tld`
    pub check_format: bool,
    /// Reject addresses on a known throwaway domain
    pub check_disposable: bool,
    /// Reject shared mailboxes such as `admin@` or `support@`
    pub check_role_based: bool,
}

impl Default for ValidationRules {
    fn default() -> Self {
        Self {
            check_format: true,
            check_disposable: true,
            check_role_based: true,
        }
    }
}

impl ValidationRules {
    #[must_use]
    pub const fn new(check_format: bool, check_disposable: bool, check_role_based: bool) -> Self {
        Self {
            check_format,
            check_disposable,
            check_role_based,
        }
    }

    /// True when at least one toggleable check is enabled
    #[must_use]
    pub const fn has_any(&self) -> bool {
        self.check_format || self.check_disposable || self.check_role_based
    }

    /// Reject a rule set with nothing enabled
    pub fn validate(&self) -> Result<()> {
        if self.has_any() {
            Ok(())
        } else {
            Err(PurifyError::NoRulesEnabled)
        }
    }
}

/// Why an address was rejected. Exactly one is attached per invalid result.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Reason {
    EmptyAddress,
    InvalidFormat,
    InvalidDomain,
    DisposableDomain,
    RoleBased,
}

impl Reason {
    /// Human-readable label used in reports
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::EmptyAddress => "Email vazio",
            Self::InvalidFormat => "Formato inválido",
            Self::InvalidDomain => "Domínio inválido",
            Self::DisposableDomain => "Email temporário",
            Self::RoleBased => "Email corporativo",
        }
    }
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A rejected address together with the first rule it failed.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct InvalidAddress {
    /// Reported address. Carries the corrected domain once the address could
    /// be split; otherwise the trimmed, lower-cased input.
    pub address: String,
    pub reason: Reason,
}

/// Outcome of classifying one address
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassificationResult {
    Valid(NormalizedAddress),
    Invalid(InvalidAddress),
}

impl ClassificationResult {
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }

    /// The address as it is reported, valid or not
    #[must_use]
    pub fn email(&self) -> String {
        match self {
            Self::Valid(address) => address.to_string(),
            Self::Invalid(invalid) => invalid.address.clone(),
        }
    }

    #[must_use]
    pub const fn reason(&self) -> Option<Reason> {
        match self {
            Self::Valid(_) => None,
            Self::Invalid(invalid) => Some(invalid.reason),
        }
    }
}

/// Counters derived once a run completes
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct RunStats {
    /// Addresses classified in the run
    pub total: usize,
    /// Addresses that passed every enabled check
    pub valid_count: usize,
    /// Addresses rejected with a reason
    pub invalid_count: usize,
    /// Wall time of the run, serialized as whole milliseconds
    #[serde(rename = "elapsed_ms", serialize_with = "serialize_millis")]
    pub elapsed: Duration,
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn serialize_millis<S: Serializer>(
    elapsed: &Duration,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_u64(u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX))
}

/// Terminal artifact of one classification run.
///
/// `valid` and `invalid` are stable partitions of the input order.
#[derive(Debug, Clone, Serialize)]
pub struct ProcessResult {
    pub total: usize,
    pub valid: Vec<NormalizedAddress>,
    pub invalid: Vec<InvalidAddress>,
    pub stats: RunStats,
}

impl ProcessResult {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.total == 0
    }
}
