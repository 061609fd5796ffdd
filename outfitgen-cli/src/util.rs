use colored::Colorize;
use outfitgen_core::{FamilySpec, Manifest};
use std::collections::BTreeSet;

/// Resolve a `--families` argument against the manifest, keeping manifest order.
///
/// `all` selects every family; unknown ids are reported and ignored.
pub fn select_families<'a>(manifest: &'a Manifest, filter: &str) -> Vec<&'a FamilySpec> {
    let wanted: BTreeSet<&str> = filter
        .split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .collect();
    if wanted.is_empty() || wanted.contains("all") {
        return manifest.families().iter().collect();
    }

    let known: BTreeSet<String> = manifest.families().iter().map(FamilySpec::id).collect();
    for id in wanted.iter().filter(|id| !known.contains(**id)) {
        eprintln!("⚠️  Unknown family: {}", id.yellow());
    }

    manifest
        .families()
        .iter()
        .filter(|spec| wanted.contains(spec.id().as_str()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const MANIFEST: &str = r#"{ "families": [
        { "template": "templates/pincer.xml.template", "names": ["Pincer Organ I"] },
        { "template": "templates/claw.xml.template", "names": ["Claw Organ I"] },
        { "template": "templates/perlevis_cortex.xml.template", "names": ["Perlevis Cortex I"] }
    ] }"#;

    fn ids(specs: &[&FamilySpec]) -> Vec<String> {
        specs.iter().map(|spec| spec.id()).collect()
    }

    #[test]
    fn filter_ignores_blanks_and_padding() {
        let manifest = Manifest::from_json(MANIFEST, ".").unwrap();
        let selected = select_families(&manifest, " claw, ,  pincer ,");
        assert_eq!(ids(&selected), vec!["pincer", "claw"]);
    }

    #[test]
    fn all_selects_every_family() {
        let manifest = Manifest::from_json(MANIFEST, ".").unwrap();
        assert_eq!(select_families(&manifest, "all").len(), 3);
        assert_eq!(select_families(&manifest, "").len(), 3);
    }

    #[test]
    fn filter_keeps_manifest_order_and_drops_unknown() {
        let manifest = Manifest::from_json(MANIFEST, ".").unwrap();
        let selected = select_families(&manifest, "perlevis_cortex,pincer,stinger");
        assert_eq!(ids(&selected), vec!["pincer", "perlevis_cortex"]);
    }
}
