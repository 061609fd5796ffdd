//! Artifact file naming and autogeneration marking.
use crate::error::GenerateError;

/// Lowercase the display name, replace each space with `_`, and append `extension`.
///
/// A leading dot on `extension` is optional; an empty extension adds no suffix.
///
/// # Errors
///
/// Returns [`GenerateError::InvalidInput`] when the name or extension holds a
/// path separator; artifacts always land directly in the output directory.
pub fn artifact_file_name(
    display_name: &str,
    extension: &str,
) -> Result<String, GenerateError> {
    if let Some(part) = [display_name, extension]
        .into_iter()
        .find(|part| part.contains(['/', '\\']))
    {
        return Err(GenerateError::InvalidInput(format!(
            "`{part}` contains a path separator"
        )));
    }
    let stem = display_name.to_lowercase().replace(' ', "_");
    let extension = extension.trim_start_matches('.');
    if extension.is_empty() {
        Ok(stem)
    } else {
        Ok(format!("{stem}.{extension}"))
    }
}

/// Insert `marker` on its own line just before the first `anchor`.
///
/// Text without the anchor comes back unchanged.
#[must_use]
pub fn mark(text: &str, anchor: &str, marker: &str) -> String {
    if anchor.is_empty() {
        return text.to_string();
    }
    match text.find(anchor) {
        Some(at) => {
            let mut out = String::with_capacity(text.len() + marker.len() + 2);
            out.push_str(&text[..at]);
            out.push_str(marker);
            out.push_str("\n ");
            out.push_str(&text[at..]);
            out
        }
        None => {
            log::debug!("anchor {anchor:?} not found; leaving text unmarked");
            text.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MARKER: &str = "<!-- AUTO -->";

    #[test]
    fn file_names_are_slugged() {
        let slug = |name: &str, ext: &str| artifact_file_name(name, ext).unwrap();
        assert_eq!(slug("Claw Organ II", "xml"), "claw_organ_ii.xml");
        assert_eq!(slug("Item I", ".xml"), "item_i.xml");
        assert_eq!(slug("Two  Spaces", "txt"), "two__spaces.txt");
        assert_eq!(slug("Bare", ""), "bare");
    }

    #[test]
    fn path_separators_are_rejected() {
        for (name, ext) in [("sub/x", "xml"), ("..\\up", "xml"), ("Item I", "d/xml")] {
            assert!(matches!(
                artifact_file_name(name, ext),
                Err(GenerateError::InvalidInput(reason)) if reason.contains("path separator")
            ));
        }
    }

    #[test]
    fn marker_goes_before_first_anchor_only() {
        let text = "<outfit>\n <general>a</general>\n <general>b</general>";
        let marked = mark(text, "<general>", MARKER);
        assert_eq!(
            marked,
            "<outfit>\n <!-- AUTO -->\n <general>a</general>\n <general>b</general>"
        );
    }

    #[test]
    fn missing_anchor_is_a_no_op() {
        let text = "<outfit><specific/></outfit>";
        assert_eq!(mark(text, "<general>", MARKER), text);
        assert_eq!(mark(text, "", MARKER), text);
    }
}
