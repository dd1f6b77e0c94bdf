//! Built-in reference data: disposable domains, role prefixes, domain typos
//! and the TLD allow-list

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, LazyLock};

const DISPOSABLE_DOMAINS: &[&str] = &[
    "10minutemail.com",
    "tempmail.org",
    "guerrillamail.com",
    "mailinator.com",
    "throwaway.email",
    "temp-mail.org",
    "yopmail.com",
    "maildrop.cc",
    "sharklasers.com",
    "pokemail.net",
    "spam4.me",
    "trashmail.com",
    "emailondeck.com",
    "fakeinbox.com",
    "tempail.com",
    "getnada.com",
    "mohmal.com",
    "mytrashmail.com",
    "mailnator.com",
    "emailfake.com",
];

const ROLE_PREFIXES: &[&str] = &[
    "admin",
    "info",
    "support",
    "help",
    "noreply",
    "no-reply",
    "contact",
    "sales",
    "marketing",
    "service",
    "webmaster",
    "postmaster",
    "abuse",
    "security",
    "billing",
    "hr",
    "careers",
    "team",
    "hello",
    "welcome",
];

// Corrected values must never appear as keys.
const DOMAIN_TYPOS: &[(&str, &str)] = &[
    ("gmal.com", "gmail.com"),
    ("gmial.com", "gmail.com"),
    ("gmai.com", "gmail.com"),
    ("gnail.com", "gmail.com"),
    ("gmail.co", "gmail.com"),
    ("gmail.con", "gmail.com"),
    ("gmail.cmo", "gmail.com"),
    ("hotmial.com", "hotmail.com"),
    ("hotmal.com", "hotmail.com"),
    ("hotmai.com", "hotmail.com"),
    ("hotmail.con", "hotmail.com"),
    ("yahooo.com", "yahoo.com"),
    ("yaho.com", "yahoo.com"),
    ("yahoo.con", "yahoo.com"),
    ("outlok.com", "outlook.com"),
    ("outloo.com", "outlook.com"),
    ("outlook.con", "outlook.com"),
    ("uol.com.brr", "uol.com.br"),
    ("bol.com.brr", "bol.com.br"),
    ("terra.com.brr", "terra.com.br"),
    ("hotmail.com.brr", "hotmail.com.br"),
    ("yahoo.com.brr", "yahoo.com.br"),
    ("ig.com.brr", "ig.com.br"),
];

const ALLOWED_TLDS: &[&str] = &[
    // generic
    "com", "org", "net", "edu", "gov", "mil", "int", "info", "biz", "name", "pro", "mobi",
    "email", "io", "co", "ai", "app", "dev", "tech", "online", "site", "store", "xyz", "me",
    "tv", "cloud", "digital", "agency", "solutions", "company", "blog", "news", "shop",
    // country codes
    "br", "pt", "us", "uk", "ca", "mx", "ar", "cl", "uy", "py", "pe", "bo", "ve", "ec", "de",
    "fr", "es", "it", "nl", "be", "ch", "at", "se", "no", "dk", "fi", "ie", "pl", "cz", "ru",
    "ua", "jp", "cn", "in", "kr", "au", "nz", "za", "ao", "mz", "eu",
    // compound suffixes
    "com.br", "net.br", "org.br", "gov.br", "edu.br", "mil.br", "art.br", "adv.br", "eng.br",
    "med.br", "ind.br", "inf.br", "co.uk", "org.uk", "ac.uk", "gov.uk", "com.au", "net.au",
    "org.au", "com.ar", "com.mx", "com.pt", "co.jp", "co.nz", "co.za", "com.cn",
];

static BUILTIN: LazyLock<Arc<Catalog>> = LazyLock::new(|| {
    Arc::new(Catalog::new(
        DISPOSABLE_DOMAINS.iter().copied(),
        ROLE_PREFIXES.iter().copied(),
        DOMAIN_TYPOS.iter().copied(),
        ALLOWED_TLDS.iter().copied(),
    ))
});

/// Immutable lookup tables consulted by the normalizer and classifier.
///
/// All entries are stored lower-cased.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    disposable: HashSet<String>,
    role_prefixes: Vec<String>,
    typos: HashMap<String, String>,
    tlds: HashSet<String>,
}

impl Catalog {
    /// Build a catalog from arbitrary lists. Mostly useful for test fixtures.
    pub fn new<'a>(
        disposable: impl IntoIterator<Item = &'a str>,
        role_prefixes: impl IntoIterator<Item = &'a str>,
        typos: impl IntoIterator<Item = (&'a str, &'a str)>,
        tlds: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        Self {
            disposable: disposable.into_iter().map(str::to_lowercase).collect(),
            role_prefixes: role_prefixes.into_iter().map(str::to_lowercase).collect(),
            typos: typos
                .into_iter()
                .map(|(from, to)| (from.to_lowercase(), to.to_lowercase()))
                .collect(),
            tlds: tlds.into_iter().map(str::to_lowercase).collect(),
        }
    }

    /// The process-wide built-in catalog
    #[must_use]
    pub fn builtin() -> Arc<Self> {
        Arc::clone(&BUILTIN)
    }

    /// Canonical form of a misspelled domain, if the domain is a known typo
    #[must_use]
    pub fn correction(&self, domain: &str) -> Option<&str> {
        self.typos.get(&domain.to_lowercase()).map(String::as_str)
    }

    #[must_use]
    pub fn is_disposable(&self, domain: &str) -> bool {
        self.disposable.contains(&domain.to_lowercase())
    }

    /// A local part is role-based when it equals a prefix or starts with
    /// `prefix.`
    #[must_use]
    pub fn is_role_based(&self, local_part: &str) -> bool {
        let lower = local_part.to_lowercase();
        self.role_prefixes.iter().any(|prefix| {
            lower == *prefix
                || lower
                    .strip_prefix(prefix.as_str())
                    .is_some_and(|rest| rest.starts_with('.'))
        })
    }

    #[must_use]
    pub fn is_allowed_tld(&self, suffix: &str) -> bool {
        self.tlds.contains(&suffix.to_lowercase())
    }

    /// Iterate the typo table as `(misspelled, canonical)` pairs
    pub fn typos(&self) -> impl Iterator<Item = (&str, &str)> {
        self.typos.iter().map(|(from, to)| (from.as_str(), to.as_str()))
    }
}
