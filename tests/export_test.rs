use std::collections::HashSet;

use chrono::{DateTime, TimeZone, Utc};
use email_purify::*;

fn fixed_clock() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap()
}

fn sample_result() -> ProcessResult {
    let input = ["a@b.com", "bob@gmal.com", "admin@company.com", "x@mailinator.com"];
    tokio_test::block_on(Runner::default().run(&input, &ValidationRules::default())).unwrap()
}

#[test]
fn test_export_clean() {
    let result = sample_result();
    let file = Exporter::with_clock(fixed_clock).export_clean(&result.valid);

    assert_eq!(file.text(), "a@b.com\nbob@gmail.com");
    assert_eq!(file.filename, "emails_limpos_20250102T030405.txt");
    assert_eq!(file.mime, "text/plain");
}

#[test]
fn test_export_detailed() {
    let result = sample_result();
    let file = Exporter::with_clock(fixed_clock).export_detailed(&result);

    let expected = "email,status,motivo\n\
                    a@b.com,válido,\n\
                    bob@gmail.com,válido,\n\
                    admin@company.com,inválido,\"Email corporativo\"\n\
                    x@mailinator.com,inválido,\"Email temporário\"";
    assert_eq!(file.text(), expected);
    assert_eq!(file.filename, "relatorio_20250102T030405.csv");
    assert_eq!(file.mime, "text/csv");
}

#[test]
fn test_export_detailed_quotes_unsafe_addresses() {
    let input = ["a,b@c.com"];
    let rules = ValidationRules::new(false, true, true);
    let result = tokio_test::block_on(Runner::default().run(&input, &rules)).unwrap();
    let file = Exporter::default().export_detailed(&result);

    assert_eq!(
        file.text(),
        "email,status,motivo\n\"a,b@c.com\",válido,"
    );
}

#[test]
fn test_export_empty_result() {
    let empty: [&str; 0] = [];
    let result =
        tokio_test::block_on(Runner::default().run(&empty, &ValidationRules::default())).unwrap();
    let mut exporter = Exporter::default();

    assert_eq!(exporter.export_clean(&result.valid).text(), "");
    assert_eq!(exporter.export_detailed(&result).text(), DETAILED_HEADER);
}

#[test]
fn test_file_names_never_repeat() {
    let result = sample_result();
    let mut exporter = Exporter::with_clock(fixed_clock);

    let first = exporter.export_clean(&result.valid);
    let second = exporter.export_clean(&result.valid);
    let report = exporter.export_detailed(&result);

    assert_eq!(first.filename, "emails_limpos_20250102T030405.txt");
    assert_eq!(second.filename, "emails_limpos_20250102T030406.txt");
    assert_eq!(report.filename, "relatorio_20250102T030407.csv");
}

#[test]
fn test_export_json() {
    let result = sample_result();
    let summary = Summary::from_result(&result);
    let file = Exporter::with_clock(fixed_clock)
        .export_json(&result, &summary)
        .unwrap();

    assert_eq!(file.filename, "relatorio_20250102T030405.json");
    assert_eq!(file.mime, "application/json");

    let json: serde_json::Value = serde_json::from_slice(&file.bytes).unwrap();
    assert_eq!(json["generated_at"], "2025-01-02T03:04:05+00:00");
    assert_eq!(json["summary"]["total"], 4);
    assert_eq!(json["summary"]["success_rate"], 50.0);
    assert_eq!(json["result"]["valid"][1], "bob@gmail.com");
    assert_eq!(json["result"]["invalid"][0]["reason"], "role_based");
    assert!(json["result"]["stats"]["elapsed_ms"].is_u64());
}

#[test]
fn test_clean_export_round_trips_through_free_text() {
    let raw = "Lista: Ana@Empresa.com.br; bob@gmal.com\n\
               suporte: admin@company.com, carla@site.io, ana@empresa.com.br";
    let ingestor = Ingestor::default();
    let addresses = ingestor.ingest(SourceFormat::FreeText, "lista.txt", raw.as_bytes()).unwrap();
    let result =
        tokio_test::block_on(Runner::default().run(&addresses, &ValidationRules::default()))
            .unwrap();

    let file = Exporter::default().export_clean(&result.valid);
    let again = ingestor.ingest(SourceFormat::FreeText, &file.filename, &file.bytes).unwrap();

    let original: HashSet<String> = result.valid.iter().map(ToString::to_string).collect();
    let reingested: HashSet<String> = again.into_iter().collect();
    assert_eq!(original, reingested);
    assert_eq!(original.len(), 3);
}
