//! End-to-end generation tests.

mod common;

use common::{content, content_with_body, document_xml, exemplars, para, styled, DocSpec};
use stylefamily::package::read_document;
use stylefamily::{
    find_citations, generate_from_files, generate_from_style_family, infer_style_family, Audit,
    ConstraintKind, Error, JsonFormat, StyleFamily, StyleFamilyModel,
};

fn model() -> StyleFamilyModel {
    infer_style_family(&exemplars()).unwrap()
}

#[test]
fn test_end_to_end_generation() {
    let model = model();
    let result = generate_from_style_family(&model, &content()).unwrap();

    assert!(result.output.len() > 100);

    let fields: Vec<&str> = result
        .audit
        .mapping_decisions
        .iter()
        .map(|d| d.content_field.as_str())
        .collect();
    assert_eq!(fields, vec!["title", "section:INTRODUCTION"]);

    let title_region = &result.audit.mapping_decisions[0].region_id;
    assert_eq!(
        model.regions.iter().find(|r| &r.id == title_region).map(|r| r.region_type),
        Some(stylefamily::RegionType::Title)
    );

    assert_eq!(result.audit.citations_formatted_count, 2);
    assert!(result.audit.unmapped_content.is_empty());
    assert_eq!(result.audit.similarity_score_vs_skeleton, 0.9);
    assert_eq!(result.audit.inferred_regions, model.regions);
}

#[test]
fn test_output_keeps_skeleton_formatting() {
    let result = generate_from_style_family(&model(), &content()).unwrap();
    let doc = read_document(&result.output).unwrap();

    let texts: Vec<&str> = doc.paragraphs.iter().map(|p| p.text.as_str()).collect();
    assert_eq!(texts, vec!["New Paper", "INTRODUCTION", "Fresh text [2–4] and (1,2)."]);

    let styles: Vec<&str> = doc.paragraphs.iter().map(|p| p.style.as_str()).collect();
    assert_eq!(styles, vec!["Title", "Heading1", "Normal"]);
    assert!(doc.paragraphs[1].has_shading);

    // untouched parts survive
    assert_eq!(doc.tables.len(), 1);
    assert_eq!(doc.tables[0].text, vec!["Abstract box A"]);
    assert_eq!(doc.headers, vec!["Header"]);
    assert_eq!(doc.footers, vec!["Footer"]);
}

#[test]
fn test_citations_are_superscript_in_model_colour() {
    let model = StyleFamily::new()
        .with_citation_color("AA0000")
        .infer(&exemplars())
        .unwrap();
    let result = generate_from_style_family(&model, &content()).unwrap();

    let xml = document_xml(&result.output);
    assert_eq!(xml.matches(r#"w:val="superscript""#).count(), 2);
    assert_eq!(xml.matches(r#"<w:color w:val="AA0000"/>"#).count(), 2);
}

#[test]
fn test_overflow_is_reported_not_truncated() {
    let body = "Overflowing sentence that keeps going. ".repeat(10);
    let body = body.trim();
    assert!(body.chars().count() as f64 > 120.0 * 1.4);

    let result = generate_from_style_family(&model(), &content_with_body(body)).unwrap();

    let actions: Vec<ConstraintKind> = result
        .audit
        .constraint_actions
        .iter()
        .map(|a| a.action)
        .collect();
    assert_eq!(
        actions,
        vec![ConstraintKind::FontShrink, ConstraintKind::OverflowWarning]
    );
    assert_eq!(result.audit.overflow_count(), 1);

    let doc = read_document(&result.output).unwrap();
    assert_eq!(doc.paragraphs[2].text, body);
}

#[test]
fn test_unmapped_sections_are_recorded() {
    let content = DocSpec::new(vec![
        styled("New Paper", "Title"),
        styled("INTRODUCTION", "Heading1"),
        para("First."),
        styled("CONCLUSION", "Heading1"),
        para("Second."),
    ])
    .build();

    let result = generate_from_style_family(&model(), &content).unwrap();
    assert_eq!(result.audit.unmapped_content, vec!["CONCLUSION"]);
    assert_eq!(
        result.audit.warnings.last().map(String::as_str),
        Some("Unmapped sections remained.")
    );
    assert_eq!(result.audit.mapping_decisions.len(), 2);
}

#[test]
fn test_audit_passes_strict_validation() {
    let result = generate_from_style_family(&model(), &content()).unwrap();
    let json = stylefamily::to_json(&result.audit, JsonFormat::Pretty).unwrap();
    let parsed = Audit::from_json(&json).unwrap();
    assert_eq!(parsed, result.audit);
}

#[test]
fn test_citation_count_is_never_under_reported() {
    let bodies = [
        "No citations at all.",
        "One [1].",
        "Mixed [2–4], (1,2) and [8, 10-12].",
        "Loose [ 3 ] shape and (see above).",
    ];
    let model = model();
    for body in bodies {
        let result = generate_from_style_family(&model, &content_with_body(body)).unwrap();
        let scanned: usize = ["New Paper", "INTRODUCTION", body]
            .iter()
            .map(|t| find_citations(t).len())
            .sum();
        assert!(result.audit.citations_formatted_count >= scanned, "{body}");
    }
}

#[test]
fn test_invalid_model_fails_closed() {
    let mut model = model();
    model.regions.clear();
    let result = generate_from_style_family(&model, &content());
    assert!(matches!(result, Err(Error::Schema(_))));

    let mut model = self::model();
    model.regions[0].confidence = 1.5;
    assert!(generate_from_style_family(&model, &content()).is_err());
}

#[test]
fn test_tampered_model_json_is_rejected() {
    let json = stylefamily::to_json(&model(), JsonFormat::Compact).unwrap();
    let tampered = json.replacen(r#""version":"v1""#, r#""version":"v1","extra":1"#, 1);
    assert!(matches!(
        StyleFamilyModel::from_json(&tampered),
        Err(Error::Schema(_))
    ));
}

#[test]
fn test_content_must_be_a_package() {
    let result = generate_from_style_family(&model(), b"plain text");
    assert!(matches!(result, Err(Error::UnknownFormat)));
}

#[test]
fn test_generate_from_files() {
    let dir = tempfile::tempdir().unwrap();
    let mut paths = Vec::new();
    for (i, data) in exemplars().into_iter().enumerate() {
        let path = dir.path().join(format!("style-{}.docx", i + 1));
        std::fs::write(&path, data).unwrap();
        paths.push(path);
    }
    let content_path = dir.path().join("content.docx");
    std::fs::write(&content_path, content()).unwrap();
    let output = dir.path().join("OUTPUT.docx");
    let audit_path = dir.path().join("audit.json");

    let audit = generate_from_files(&paths, &content_path, &output, &audit_path).unwrap();

    assert!(std::fs::metadata(&output).unwrap().len() > 100);
    let written = Audit::from_json(&std::fs::read_to_string(&audit_path).unwrap()).unwrap();
    assert_eq!(written, audit);
}
