//! Golden tests for medication name resolution.
//!
//! These tests resolve known queries against a fixed dictionary.

use fuzzy_meds_core::{Engine, MatchMethod, Normalizer, ResolverConfig};

const DICTIONARY: &[&str] = &[
    "Paracetamol 500mg Tablet",
    "Paracetamol 250mg/5ml Syrup",
    "Amoxicillin 500mg Capsule",
    "Amoxicillin 250mg Capsule",
    "Ibuprofen 400mg Tablet",
    "Ibuprofen 5% Gel",
    "Cetirizine 10mg Tablet",
    "Loratadine 10mg Tablet",
    "Omeprazole 20mg Capsule",
    "Metformin 500mg Tablet",
    "Aspirin 75mg Tablet",
    "Salbutamol 100mcg Inhaler",
    "Ventolin Inhaler",
    "Insulin Glargine 100 units/ml Injection",
    "Betadine 10% Solution",
    "Las Honten BL 40",
    "Zolpride D 30mg",
    "Vitamin D3 1000 IU Capsule",
    "Xylometazoline 0.1% Nasal Spray",
    "Co-Amoxiclav 625 Tablet",
];

/// Expected resolution of one query.
struct GoldenCase {
    id: &'static str,
    query: &'static str,
    expected_term: &'static str,
    expected_method: MatchMethod,
    expected_confidence: Option<f64>,
}

fn get_golden_cases() -> Vec<GoldenCase> {
    vec![
        GoldenCase {
            id: "misspelled-base-name",
            query: "Paracetmol",
            expected_term: "Paracetamol 500mg Tablet",
            expected_method: MatchMethod::BaseNameMappedToFull,
            expected_confidence: Some(2.0 / 3.0),
        },
        GoldenCase {
            id: "alias-first-loaded",
            query: "paracetamol syrup",
            expected_term: "Paracetamol 500mg Tablet",
            expected_method: MatchMethod::BaseNameMappedToFull,
            expected_confidence: Some(1.0),
        },
        GoldenCase {
            id: "per-volume-dosage",
            query: "Paracetamol 250mg/5ml",
            expected_term: "Paracetamol 250mg/5ml Syrup",
            expected_method: MatchMethod::DirectFullNameMatch,
            expected_confidence: Some(1.0),
        },
        GoldenCase {
            id: "bl-strength",
            query: "Las Honten BL 40",
            expected_term: "Las Honten BL 40",
            expected_method: MatchMethod::DirectFullNameMatch,
            expected_confidence: Some(1.0),
        },
        GoldenCase {
            id: "missing-letter",
            query: "Amoxcillin",
            expected_term: "Amoxicillin 500mg Capsule",
            expected_method: MatchMethod::BaseNameMappedToFull,
            expected_confidence: Some(2.0 / 3.0),
        },
        GoldenCase {
            id: "two-edits",
            query: "Lorattadin",
            expected_term: "Loratadine 10mg Tablet",
            expected_method: MatchMethod::BaseNameMappedToFull,
            expected_confidence: Some(1.0 / 3.0),
        },
        GoldenCase {
            id: "extra-letter",
            query: "Aspirine",
            expected_term: "Aspirin 75mg Tablet",
            expected_method: MatchMethod::BaseNameMappedToFull,
            expected_confidence: Some(0.5),
        },
        GoldenCase {
            id: "dropped-vowel",
            query: "Cetrizine",
            expected_term: "Cetirizine 10mg Tablet",
            expected_method: MatchMethod::BaseNameMappedToFull,
            expected_confidence: Some(2.0 / 3.0),
        },
        GoldenCase {
            id: "exact-base-name",
            query: "Metformin",
            expected_term: "Metformin 500mg Tablet",
            expected_method: MatchMethod::BaseNameMappedToFull,
            expected_confidence: Some(1.0),
        },
        GoldenCase {
            id: "composite-first-word",
            query: "Ventolin",
            expected_term: "Ventolin Inhaler",
            expected_method: MatchMethod::DirectFullNameMatch,
            expected_confidence: Some(1.0),
        },
        GoldenCase {
            id: "composite-prefix",
            query: "para",
            expected_term: "Paracetamol 500mg Tablet",
            expected_method: MatchMethod::DirectFullNameMatch,
            expected_confidence: None,
        },
        GoldenCase {
            id: "dosage-misspelled",
            query: "amoxcillin 500mg",
            expected_term: "Amoxicillin 500mg Capsule",
            expected_method: MatchMethod::DirectFullNameMatch,
            expected_confidence: Some(0.75),
        },
        GoldenCase {
            id: "dosage-spacing",
            query: "amoxicillin 250 mg",
            expected_term: "Amoxicillin 250mg Capsule",
            expected_method: MatchMethod::DirectFullNameMatch,
            expected_confidence: Some(0.75),
        },
        GoldenCase {
            id: "dosage-transposition",
            query: "metfromin 500mg",
            expected_term: "Metformin 500mg Tablet",
            expected_method: MatchMethod::DirectFullNameMatch,
            expected_confidence: Some(0.75),
        },
        GoldenCase {
            id: "uppercase-full-name",
            query: "IBUPROFEN 400MG TABLET",
            expected_term: "Ibuprofen 400mg Tablet",
            expected_method: MatchMethod::DirectFullNameMatch,
            expected_confidence: Some(1.0),
        },
        GoldenCase {
            id: "percent-without-form",
            query: "Betadine 10%",
            expected_term: "Betadine 10% Solution",
            expected_method: MatchMethod::DirectFullNameMatch,
            expected_confidence: Some(1.0),
        },
        GoldenCase {
            id: "iu-spacing",
            query: "vitamin d3 1000iu",
            expected_term: "Vitamin D3 1000 IU Capsule",
            expected_method: MatchMethod::DirectFullNameMatch,
            expected_confidence: Some(0.75),
        },
        GoldenCase {
            id: "per-volume-base",
            query: "insulin glargine",
            expected_term: "Insulin Glargine 100 units/ml Injection",
            expected_method: MatchMethod::BaseNameMappedToFull,
            expected_confidence: Some(1.0),
        },
        GoldenCase {
            id: "fullwidth",
            query: "Ｐａｒａｃｅｔａｍｏｌ",
            expected_term: "Paracetamol 500mg Tablet",
            expected_method: MatchMethod::BaseNameMappedToFull,
            expected_confidence: Some(1.0),
        },
        GoldenCase {
            id: "accented",
            query: "paracétamol",
            expected_term: "Paracetamol 500mg Tablet",
            expected_method: MatchMethod::BaseNameMappedToFull,
            expected_confidence: Some(1.0),
        },
        GoldenCase {
            id: "unknown-brand",
            query: "Zantac",
            expected_term: "",
            expected_method: MatchMethod::NoMatchFound,
            expected_confidence: Some(0.0),
        },
        GoldenCase {
            id: "unrelated",
            query: "xyz123",
            expected_term: "",
            expected_method: MatchMethod::NoMatchFound,
            expected_confidence: Some(0.0),
        },
        GoldenCase {
            id: "punctuation-only",
            query: "###",
            expected_term: "",
            expected_method: MatchMethod::NoMatchFound,
            expected_confidence: Some(0.0),
        },
    ]
}

fn engine() -> Engine {
    Engine::initialize(DICTIONARY.iter(), ResolverConfig::default()).unwrap()
}

#[test]
fn test_golden_cases() {
    let engine = engine();

    for case in get_golden_cases() {
        let result = engine.resolve(case.query);

        assert_eq!(result.term, case.expected_term, "Case {}: term mismatch", case.id);
        assert_eq!(result.method, case.expected_method, "Case {}: method mismatch", case.id);

        if let Some(expected) = case.expected_confidence {
            assert!(
                (result.confidence - expected).abs() < 1e-9,
                "Case {}: confidence mismatch - expected {}, got {}",
                case.id,
                expected,
                result.confidence
            );
        }
        assert!(
            (0.0..=1.0).contains(&result.confidence),
            "Case {}: confidence out of range",
            case.id
        );
    }
}

#[test]
fn test_dosage_alternatives() {
    let engine = engine();
    let result = engine.resolve("amoxcillin 500mg");

    assert_eq!(result.alternatives.len(), 1);
    assert_eq!(result.alternatives[0].term, "Amoxicillin 250mg Capsule");
    assert!((result.alternatives[0].confidence - 0.25).abs() < 1e-9);
}

#[test]
fn test_alternatives_are_distinct_and_ranked() {
    let engine = engine();

    for case in get_golden_cases() {
        let result = engine.resolve(case.query);
        let mut seen = vec![result.term.to_lowercase()];

        for alternative in &result.alternatives {
            let name = alternative.term.to_lowercase();
            assert!(!seen.contains(&name), "Case {}: duplicate {}", case.id, name);
            seen.push(name);
        }
        for pair in result.alternatives.windows(2) {
            assert!(
                pair[0].confidence >= pair[1].confidence,
                "Case {}: alternatives out of order",
                case.id
            );
        }
        assert!(result.alternatives.len() <= 3, "Case {}: too many alternatives", case.id);
    }
}

#[test]
fn test_batch_matches_single() {
    let engine = engine();
    let queries: Vec<&str> = get_golden_cases().iter().map(|c| c.query).collect();

    let batch = engine.resolve_batch(&queries);
    assert_eq!(batch.len(), queries.len());
    for (query, term) in queries.iter().zip(&batch) {
        assert_eq!(term, &engine.resolve(query).term, "Query {}", query);
    }
}

#[test]
fn test_batch_isolation() {
    let engine = engine();
    let batch = engine.resolve_batch(&["", "Cetirizine 10mg Tablet", "garbage###"]);

    assert_eq!(batch, vec!["", "Cetirizine 10mg Tablet", ""]);
}

#[test]
fn test_json_output() {
    let engine = engine();
    let json = serde_json::to_value(engine.resolve("Las Honten BL 40")).unwrap();

    assert_eq!(
        json,
        serde_json::json!({
            "term": "Las Honten BL 40",
            "confidence": 1.0,
            "method": "direct_full_name_match",
            "alternatives": []
        })
    );
}

#[test]
fn test_all_dosage_detections() {
    let normalizer = Normalizer::new();

    let dosage_tests = vec![
        ("Paracetamol 500mg", true),
        ("Betadine 10%", true),
        ("Vitamin D3 1000 IU", true),
        ("Salbutamol 100 mcg", true),
        ("Insulin 100 units/ml", true),
        ("Zinc 20 mg/5 ml", true),
        ("Las Honten BL 40", true),
        ("Amoxicillin 250 MG", true),
        ("Xylometazoline 0.1%", true),
        ("Paracetamol", false),
        ("Vitamin D3", false),
        ("Co-Amoxiclav 625", false),
        ("Ventolin Inhaler", false),
    ];

    for (text, expected) in dosage_tests {
        let result = normalizer.has_dosage(text);
        assert_eq!(
            result, expected,
            "Dosage detection for {} should be {}, got {}",
            text, expected, result
        );
    }
}

#[test]
fn test_all_base_names() {
    let normalizer = Normalizer::new();

    let base_tests = vec![
        ("Paracetamol 500mg Tablet", "paracetamol"),
        ("Paracetamol 250mg/5ml Syrup", "paracetamol"),
        ("Ibuprofen 5% Gel", "ibuprofen"),
        ("Salbutamol 100mcg Inhaler", "salbutamol inhaler"),
        ("Vitamin D3 1000 IU Capsule", "vitamin d3"),
        ("Las Honten BL 40", "las honten"),
        ("Xylometazoline 0.1% Nasal Spray", "xylometazoline nasal"),
        ("Co-Amoxiclav 625 Tablet", "co-amoxiclav 625"),
        ("AMOXICILLIN 500 MG CAPS.", "amoxicillin"),
        ("Insulin Glargine 100 units/ml Injection", "insulin glargine"),
        ("Zolpride D 30mg", "zolpride d"),
    ];

    for (name, expected) in base_tests {
        let result = normalizer.base_name(name);
        assert_eq!(
            result, expected,
            "Base name of {} should be {}, got {}",
            name, expected, result
        );
    }
}
