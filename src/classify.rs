//! Rule classifier: one verdict and at most one reason per address

use regex::Regex;
use std::sync::LazyLock;

use crate::catalog::Catalog;
use crate::normalize::{Normalizer, clean};
use crate::types::{ClassificationResult, InvalidAddress, NormalizedAddress, Reason, ValidationRules};

static FORMAT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

static LABEL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?$").unwrap()
});

/// A single check in the rule chain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Check {
    NonEmpty,
    Format,
    DomainSyntax,
    TopLevelDomain,
    Disposable,
    RoleBased,
}

/// Evaluation order. The first failing enabled check decides the reason.
const CHAIN: [Check; 6] = [
    Check::NonEmpty,
    Check::Format,
    Check::DomainSyntax,
    Check::TopLevelDomain,
    Check::Disposable,
    Check::RoleBased,
];

/// Address under evaluation: the cleaned input plus, when it has an `@`,
/// its split and typo-corrected form.
struct Candidate {
    cleaned: String,
    address: Option<NormalizedAddress>,
}

impl Check {
    const fn reason(self) -> Reason {
        match self {
            Self::NonEmpty => Reason::EmptyAddress,
            Self::Format => Reason::InvalidFormat,
            Self::DomainSyntax | Self::TopLevelDomain => Reason::InvalidDomain,
            Self::Disposable => Reason::DisposableDomain,
            Self::RoleBased => Reason::RoleBased,
        }
    }

    const fn enabled(self, rules: &ValidationRules) -> bool {
        match self {
            Self::NonEmpty | Self::DomainSyntax | Self::TopLevelDomain => true,
            Self::Format => rules.check_format,
            Self::Disposable => rules.check_disposable,
            Self::RoleBased => rules.check_role_based,
        }
    }

    fn passes(self, candidate: &Candidate, catalog: &Catalog) -> bool {
        match self {
            Self::NonEmpty => !candidate.cleaned.is_empty(),
            Self::Format => FORMAT_REGEX.is_match(&candidate.cleaned),
            Self::DomainSyntax => candidate
                .address
                .as_ref()
                .is_some_and(|a| is_valid_domain_syntax(a.domain())),
            Self::TopLevelDomain => candidate
                .address
                .as_ref()
                .is_some_and(|a| has_allowed_suffix(a.domain(), catalog)),
            Self::Disposable => candidate
                .address
                .as_ref()
                .is_none_or(|a| !catalog.is_disposable(a.domain())),
            Self::RoleBased => candidate
                .address
                .as_ref()
                .is_none_or(|a| !catalog.is_role_based(a.local_part())),
        }
    }

    /// Checks that run before the split report the cleaned input; later
    /// ones report the corrected address.
    fn reported(self, candidate: &Candidate) -> String {
        match (self, &candidate.address) {
            (Self::NonEmpty | Self::Format, _) | (_, None) => candidate.cleaned.clone(),
            (_, Some(address)) => address.to_string(),
        }
    }
}

/// Every dot-separated label is a valid hostname label and there is at
/// least one dot.
fn is_valid_domain_syntax(domain: &str) -> bool {
    domain.contains('.') && domain.split('.').all(|label| LABEL_REGEX.is_match(label))
}

/// The last label, or the last two labels for domains with three or more,
/// must be on the allow-list.
fn has_allowed_suffix(domain: &str, catalog: &Catalog) -> bool {
    let labels: Vec<&str> = domain.split('.').collect();
    let Some(last) = labels.last() else {
        return false;
    };
    if catalog.is_allowed_tld(last) {
        return true;
    }
    labels.len() >= 3 && catalog.is_allowed_tld(&labels[labels.len() - 2..].join("."))
}

/// Classifies addresses against a rule set using a shared [`Normalizer`].
#[derive(Debug, Clone, Default)]
pub struct Classifier {
    normalizer: Normalizer,
}

impl Classifier {
    #[must_use]
    pub const fn new(normalizer: Normalizer) -> Self {
        Self { normalizer }
    }

    #[must_use]
    pub const fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    /// Classify one raw address. Pure: same input and rules, same result.
    #[must_use]
    pub fn classify(&self, raw: &str, rules: &ValidationRules) -> ClassificationResult {
        let cleaned = clean(raw);
        let candidate = Candidate {
            address: self.normalizer.split(&cleaned),
            cleaned,
        };
        let catalog = self.normalizer.catalog();

        let failed = CHAIN
            .into_iter()
            .filter(|check| check.enabled(rules))
            .find(|check| !check.passes(&candidate, catalog));

        if let Some(check) = failed {
            return ClassificationResult::Invalid(InvalidAddress {
                address: check.reported(&candidate),
                reason: check.reason(),
            });
        }

        match candidate.address {
            Some(address) => ClassificationResult::Valid(address),
            // unreachable in practice: DomainSyntax always runs and fails without an `@`
            None => ClassificationResult::Invalid(InvalidAddress {
                address: candidate.cleaned,
                reason: Reason::InvalidDomain,
            }),
        }
    }
}
