use std::sync::Arc;

use email_purify::*;

const ALL: ValidationRules = ValidationRules::new(true, true, true);

fn reason_of(address: &str, rules: &ValidationRules) -> Option<Reason> {
    Classifier::default().classify(address, rules).reason()
}

#[test]
fn test_valid_address() {
    let result = Classifier::default().classify("  John@Example.COM ", &ALL);

    match result {
        ClassificationResult::Valid(address) => {
            assert_eq!(address.local_part(), "john");
            assert_eq!(address.domain(), "example.com");
            assert_eq!(address.to_string(), "john@example.com");
        }
        ClassificationResult::Invalid(invalid) => panic!("unexpected {invalid:?}"),
    }
}

#[test]
fn test_empty_address() {
    let result = Classifier::default().classify("   ", &ALL);
    assert_eq!(
        result,
        ClassificationResult::Invalid(InvalidAddress {
            address: String::new(),
            reason: Reason::EmptyAddress,
        })
    );
}

#[test]
fn test_invalid_format() {
    assert_eq!(reason_of("not an email", &ALL), Some(Reason::InvalidFormat));
    assert_eq!(reason_of("a@b", &ALL), Some(Reason::InvalidFormat));
    assert_eq!(reason_of("@b.com", &ALL), Some(Reason::InvalidFormat));
}

#[test]
fn test_format_preempts_disposable() {
    let result = Classifier::default().classify("Bad Email@mailinator.com", &ALL);
    assert_eq!(
        result,
        ClassificationResult::Invalid(InvalidAddress {
            address: "bad email@mailinator.com".into(),
            reason: Reason::InvalidFormat,
        })
    );
}

#[test]
fn test_invalid_domain_syntax() {
    assert_eq!(reason_of("a@-bad-.com", &ALL), Some(Reason::InvalidDomain));
    assert_eq!(reason_of("a@bad..com", &ALL), Some(Reason::InvalidDomain));
    assert_eq!(reason_of("a@under_score.com", &ALL), Some(Reason::InvalidDomain));
}

#[test]
fn test_domain_label_length_limit() {
    let ok = format!("a@{}.com", "x".repeat(63));
    let too_long = format!("a@{}.com", "x".repeat(64));

    assert_eq!(reason_of(&ok, &ALL), None);
    assert_eq!(reason_of(&too_long, &ALL), Some(Reason::InvalidDomain));
}

#[test]
fn test_unknown_tld() {
    assert_eq!(reason_of("a@example.notatld", &ALL), Some(Reason::InvalidDomain));
    assert_eq!(reason_of("a@empresa.com.br", &ALL), None);
    assert_eq!(reason_of("a@site.io", &ALL), None);
}

#[test]
fn test_compound_suffix_only_catalog() {
    let catalog = Catalog::new([], [], [], ["com.br"]);
    let classifier = Classifier::new(Normalizer::new(Arc::new(catalog)));

    assert!(classifier.classify("a@loja.com.br", &ALL).is_valid());
    assert_eq!(
        classifier.classify("a@loja.com", &ALL).reason(),
        Some(Reason::InvalidDomain)
    );
    // two labels never consult the compound form
    assert_eq!(
        classifier.classify("a@com.br", &ALL).reason(),
        Some(Reason::InvalidDomain)
    );
}

#[test]
fn test_domain_check_runs_without_format_check() {
    let rules = ValidationRules::new(false, true, true);

    let result = Classifier::default().classify("No-At-Sign", &rules);
    assert_eq!(
        result,
        ClassificationResult::Invalid(InvalidAddress {
            address: "no-at-sign".into(),
            reason: Reason::InvalidDomain,
        })
    );
    assert_eq!(reason_of("a@b", &rules), Some(Reason::InvalidDomain));
    assert_eq!(reason_of("a b@c.com", &rules), None);
}

#[test]
fn test_disposable_domain() {
    assert_eq!(reason_of("x@mailinator.com", &ALL), Some(Reason::DisposableDomain));
    assert_eq!(reason_of("x@YOPMAIL.com", &ALL), Some(Reason::DisposableDomain));
    assert_eq!(
        reason_of("x@mailinator.com", &ValidationRules::new(true, false, true)),
        None
    );
}

#[test]
fn test_disposable_preempts_role_based() {
    assert_eq!(reason_of("admin@mailinator.com", &ALL), Some(Reason::DisposableDomain));
    assert_eq!(
        reason_of("admin@mailinator.com", &ValidationRules::new(true, false, true)),
        Some(Reason::RoleBased)
    );
}

#[test]
fn test_domain_failure_preempts_role_based() {
    assert_eq!(reason_of("admin@example.notatld", &ALL), Some(Reason::InvalidDomain));
    assert_eq!(reason_of("admin@bad..com", &ALL), Some(Reason::InvalidDomain));
}

#[test]
fn test_domain_failure_preempts_disposable() {
    let catalog = Catalog::new(["temp.zz", "temp.com"], [], [], ["com"]);
    let classifier = Classifier::new(Normalizer::new(Arc::new(catalog)));

    assert_eq!(
        classifier.classify("x@temp.zz", &ALL),
        ClassificationResult::Invalid(InvalidAddress {
            address: "x@temp.zz".into(),
            reason: Reason::InvalidDomain,
        })
    );
    assert_eq!(
        classifier.classify("x@temp.com", &ALL).reason(),
        Some(Reason::DisposableDomain)
    );
}

#[test]
fn test_role_based_prefixes() {
    assert_eq!(reason_of("admin@company.com", &ALL), Some(Reason::RoleBased));
    assert_eq!(reason_of("hr@company.com", &ALL), Some(Reason::RoleBased));
    assert_eq!(reason_of("info.vendas@company.com", &ALL), Some(Reason::RoleBased));
    assert_eq!(reason_of("no-reply@company.com", &ALL), Some(Reason::RoleBased));

    assert_eq!(reason_of("information@company.com", &ALL), None);
    assert_eq!(reason_of("hrteam@company.com", &ALL), None);
    assert_eq!(reason_of("maria.admin@company.com", &ALL), None);
}

#[test]
fn test_typo_correction_is_reported_on_valid() {
    let rules = ValidationRules::new(true, true, false);
    let result = Classifier::default().classify("user@gmal.com", &rules);

    assert!(result.is_valid());
    assert_eq!(result.email(), "user@gmail.com");
}

#[test]
fn test_typo_correction_is_reported_on_rejection() {
    let result = Classifier::default().classify("Admin@Hotmial.com", &ALL);
    assert_eq!(
        result,
        ClassificationResult::Invalid(InvalidAddress {
            address: "admin@hotmail.com".into(),
            reason: Reason::RoleBased,
        })
    );
}

#[test]
fn test_classify_is_deterministic() {
    let classifier = Classifier::default();
    for address in ["a@b.com", "admin@x.com", "bad", "x@gmal.com", ""] {
        assert_eq!(
            classifier.classify(address, &ALL),
            classifier.classify(address, &ALL)
        );
    }
}

#[test]
fn test_reason_labels() {
    assert_eq!(Reason::EmptyAddress.label(), "Email vazio");
    assert_eq!(Reason::InvalidFormat.to_string(), "Formato inválido");
    assert_eq!(Reason::InvalidDomain.label(), "Domínio inválido");
    assert_eq!(Reason::DisposableDomain.label(), "Email temporário");
    assert_eq!(Reason::RoleBased.label(), "Email corporativo");
}

#[test]
fn test_rules_validation() {
    assert!(ValidationRules::default().validate().is_ok());
    assert!(ValidationRules::new(false, false, true).has_any());

    let err = ValidationRules::new(false, false, false).validate().unwrap_err();
    assert!(err.is_configuration());
}

#[test]
fn test_rules_deserialize_camel_case() {
    let rules: ValidationRules =
        serde_json::from_str(r#"{"checkFormat": false, "checkRoleBased": false}"#).unwrap();

    assert_eq!(rules, ValidationRules::new(false, true, false));
}
