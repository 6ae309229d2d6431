//! Content-type classification: sniff a recovered file's magic bytes to
//! pick a plausible media type. Approximate by design — it only needs to be
//! good enough to choose a file extension, not to validate file structure.

use std::path::Path;

use xu_core::{Classifier, CoreError, Result};

pub struct MagicByteClassifier;

impl Classifier for MagicByteClassifier {
    fn classify(&self, path: &Path) -> Result<String> {
        match infer::get_from_path(path) {
            Ok(Some(kind)) => Ok(kind.mime_type().to_string()),
            Ok(None) => sniff_plain_text(path),
            Err(err) => Err(CoreError::Io(err)),
        }
    }
}

/// `infer` only recognizes binary signatures; fall back to a cheap
/// printable-ASCII heuristic so plain text files still get a sensible
/// extension instead of none at all.
fn sniff_plain_text(path: &Path) -> Result<String> {
    let sample = std::fs::read(path)?;
    let probe = &sample[..sample.len().min(512)];

    // Recovered blocks are routinely zero-padded past the real content; a
    // trailing run of NUL bytes shouldn't disqualify an otherwise-text probe.
    let meaningful_len = probe.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);
    let probe = &probe[..meaningful_len];

    if probe.is_empty() {
        return Err(CoreError::InvalidGeometry(
            "no recognizable content signature".into(),
        ));
    }

    let printable = probe
        .iter()
        .all(|&b| b == b'\n' || b == b'\r' || b == b'\t' || (0x20..0x7f).contains(&b));

    if printable {
        Ok("text/plain".to_string())
    } else {
        Err(CoreError::InvalidGeometry(
            "no recognizable content signature".into(),
        ))
    }
}
