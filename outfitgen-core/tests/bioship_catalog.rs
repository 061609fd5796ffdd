use std::path::{Path, PathBuf};

use outfitgen_core::settings::DEFAULT_MARKER;
use outfitgen_core::{Artifact, Family, Manifest, Rounding};

fn manifest_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../dat/outfits/bioship/outfits.json")
}

fn load_manifest() -> Manifest {
    Manifest::load(&manifest_path()).expect("bioship manifest loads")
}

fn family(manifest: &Manifest, id: &str) -> Family {
    let spec = manifest
        .families()
        .iter()
        .find(|spec| spec.id() == id)
        .unwrap_or_else(|| panic!("family {id} present"));
    manifest.build_family(spec).expect("family builds")
}

fn tag<'a>(artifact: &'a Artifact, name: &str) -> &'a str {
    let open = format!("<{name}>");
    let close = format!("</{name}>");
    let start = artifact
        .text
        .find(&open)
        .unwrap_or_else(|| panic!("<{name}> in {}", artifact.file_name))
        + open.len();
    let end = artifact.text[start..].find(&close).expect("closing tag") + start;
    &artifact.text[start..end]
}

#[test]
fn every_family_template_is_satisfied() {
    let manifest = load_manifest();
    assert_eq!(manifest.families().len(), 8);
    for spec in manifest.families() {
        let family = manifest.build_family(spec).expect("family builds");
        assert!(
            family.generator.missing_keys().is_empty(),
            "{} misses {:?}",
            family.id,
            family.generator.missing_keys()
        );
    }
}

#[test]
fn manifest_settings_match_reference_output() {
    let manifest = load_manifest();
    assert_eq!(manifest.settings.extension, "xml");
    assert_eq!(manifest.settings.anchor, "<general>");
    assert_eq!(manifest.settings.marker, DEFAULT_MARKER);
    assert_eq!(manifest.settings.rounding, Rounding::Nearest);
}

#[test]
fn claw_organ_prices_round_between_endpoints() {
    let manifest = load_manifest();
    let batch = family(&manifest, "claw").render().unwrap();
    let files: Vec<&str> = batch.artifacts.iter().map(|a| a.file_name.as_str()).collect();
    assert_eq!(
        files,
        vec![
            "claw_organ_i.xml",
            "claw_organ_ii.xml",
            "claw_organ_iii.xml",
            "claw_organ_iv.xml"
        ]
    );
    let prices: Vec<&str> = batch.artifacts.iter().map(|a| tag(a, "price")).collect();
    assert_eq!(prices, vec!["0", "41667", "83333", "125000"]);
    assert_eq!(tag(&batch.artifacts[0], "energy"), "174");
}

#[test]
fn immane_cerebrum_midpoint_values() {
    let manifest = load_manifest();
    let batch = family(&manifest, "immane_cerebrum").render().unwrap();
    let middle = &batch.artifacts[1];
    assert!((middle.position - 0.5).abs() < f64::EPSILON);
    assert_eq!(tag(middle, "cpu"), "1150");
    assert_eq!(tag(middle, "shield"), "950.0");
    assert_eq!(tag(middle, "mass"), "1400");
    assert_eq!(tag(middle, "typename"), "Bioship Brain");
}

#[test]
fn immanis_cortex_absorb_tie_rounds_up() {
    let manifest = load_manifest();
    let batch = family(&manifest, "immanis_cortex").render().unwrap();
    let absorb: Vec<&str> = batch.artifacts.iter().map(|a| tag(a, "absorb")).collect();
    assert_eq!(absorb, vec!["59", "70", "80"]);
}

#[test]
fn pincer_output_is_marked_and_named() {
    let manifest = load_manifest();
    let batch = family(&manifest, "pincer").render().unwrap();
    let first = &batch.artifacts[0];
    assert!(first.text.starts_with("<?xml"));
    assert!(first.text.contains("<outfit name=\"Pincer Organ I\">"));
    assert!(first.text.contains(&format!("{DEFAULT_MARKER}\n <general>")));
    assert_eq!(first.text.matches(DEFAULT_MARKER).count(), 1);
    assert!(first.text.contains("penetrate=\"20\">8.0</damage>"));
    assert_eq!(tag(&batch.artifacts[1], "heatup"), "40.0");
}

#[test]
fn translatable_strings_cover_names_and_shared_text() {
    let manifest = load_manifest();
    let strings = manifest.translatable_strings();
    assert!(strings.contains(&"Bioship Gene Drive"));
    assert!(strings.contains(&"Claw Organ IV"));
    assert!(strings.contains(&"Bioship Weapon Organ"));
    assert_eq!(
        strings.iter().filter(|s| **s == "Bioship Weapon Organ").count(),
        1
    );
}

#[test]
fn full_run_writes_every_variant() {
    let manifest = load_manifest();
    let out = std::env::temp_dir().join(format!(
        "outfitgen-bioship-{}",
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos()
    ));
    let mut written = 0;
    for spec in manifest.families() {
        let report = manifest.build_family(spec).unwrap().run(&out).unwrap();
        assert!(report.skipped.is_empty());
        written += report.artifacts.len();
    }
    assert_eq!(written, 21);
    let drive = std::fs::read_to_string(out.join("immanis_gene_drive_iii.xml")).unwrap();
    assert!(drive.contains("<engine_limit>6500.0</engine_limit>"));
    assert!(drive.contains("<price>3600000</price>"));
}
