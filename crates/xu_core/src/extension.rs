//! Derives a plausible output file extension from a sniffed media type.
//!
//! Implemented verbatim (not delegated to the classifier) because the
//! derived extension feeds the ignore/recover filters directly.

/// Media types with a fixed, non-derived extension.
fn fixed_mapping(media_type: &str) -> Option<&'static str> {
    match media_type {
        "application/octet-stream" => Some("bin"),
        "text/plain" => Some("txt"),
        _ => None,
    }
}

/// Strips a `+`-prefixed suffix, e.g. `svg+xml` -> `svg`.
fn strip_plus_suffix(subtype: &str) -> &str {
    subtype.split('+').next().unwrap_or(subtype)
}

/// Strips a single leading `alnum+[-.]` vendor prefix, e.g.
/// `vnd.ms-excel` -> `ms-excel`.
fn strip_vendor_prefix(subtype: &str) -> &str {
    match subtype.find(['-', '.']) {
        Some(pos) if !subtype[..pos].is_empty() && subtype[..pos].chars().all(|c| c.is_ascii_alphanumeric()) => {
            &subtype[pos + 1..]
        }
        _ => subtype,
    }
}

/// Derives a lowercase extension token from a media type string, or `None`
/// if the derivation yields nothing usable.
pub fn derive_extension(media_type: &str) -> Option<String> {
    if let Some(fixed) = fixed_mapping(media_type) {
        return Some(fixed.to_string());
    }

    let subtype = media_type.rsplit('/').next()?;
    let subtype = strip_plus_suffix(subtype);
    let subtype = strip_vendor_prefix(subtype);
    let subtype = subtype.to_lowercase();

    if subtype.is_empty() {
        None
    } else {
        Some(subtype)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_mapping_wins_over_derivation() {
        assert_eq!(derive_extension("application/octet-stream"), Some("bin".into()));
        assert_eq!(derive_extension("text/plain"), Some("txt".into()));
    }

    #[test]
    fn derives_simple_subtype() {
        assert_eq!(derive_extension("image/png"), Some("png".into()));
    }

    #[test]
    fn strips_plus_suffix() {
        assert_eq!(derive_extension("image/svg+xml"), Some("svg".into()));
    }

    #[test]
    fn strips_one_vendor_prefix_only() {
        assert_eq!(
            derive_extension("application/vnd.ms-excel"),
            Some("ms-excel".into())
        );
    }

    #[test]
    fn media_type_without_slash_falls_back_to_whole_string() {
        assert_eq!(derive_extension("garbage"), Some("garbage".into()));
    }

    #[test]
    fn empty_subtype_yields_none() {
        assert_eq!(derive_extension("application/"), None);
    }
}
