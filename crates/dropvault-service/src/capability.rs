//! Secret-derived file identifiers.
//!
//! An identifier is `HMAC-SHA256(secret, display_name)` as lowercase hex,
//! suffixed with the display name's lowercased extension when it has one.
//! The same derivation creates the identifier on upload and reconstructs
//! it on download, so the secret itself is never persisted: the identifier
//! is at once the object key suffix, the metadata primary key, and the
//! capability the caller must present.

use hmac::{Hmac, Mac};
use sha2::Sha256;

use dropvault_core::error::AppError;
use dropvault_core::result::AppResult;
use dropvault_entity::file::FileRecord;

/// HMAC type alias for SHA-256.
type HmacSha256 = Hmac<Sha256>;

/// Derives the identifier for a (secret, display name) pair.
///
/// Deterministic: identical inputs always produce identical output.
pub fn derive_identifier(secret: &str, file_name: &str) -> AppResult<String> {
    if secret.is_empty() {
        return Err(AppError::validation("Shared secret must not be empty"));
    }
    if file_name.is_empty() {
        return Err(AppError::validation("File name must not be empty"));
    }

    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts keys of any size");
    mac.update(file_name.as_bytes());
    let digest = hex::encode(mac.finalize().into_bytes());

    Ok(match file_extension(file_name) {
        Some(ext) => format!("{digest}.{ext}"),
        None => digest,
    })
}

/// Extracts the normalized (lowercased) extension of a display name.
///
/// The extension is the substring after the last dot. Names without a
/// dot, names ending in a dot, and leading-dot-only names (".bashrc")
/// have no extension.
pub fn file_extension(file_name: &str) -> Option<String> {
    let (stem, ext) = file_name.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

/// Builds the object key for an identifier under the configured prefix.
pub fn object_key(prefix: &str, identifier: &str) -> String {
    format!("{}/{}", prefix.trim_end_matches('/'), identifier)
}

/// Verifies a caller-presented identifier against the stored display name.
///
/// Recomputes the digest from the presented secret and compares it in
/// constant time; the extension suffix is not secret material and is
/// checked separately. Any mismatch, including malformed hex, is reported
/// as unauthorized so callers cannot distinguish failure modes.
pub fn verify_identifier(
    secret: &str,
    stored_file_name: &str,
    presented_identifier: &str,
) -> AppResult<()> {
    if secret.is_empty() {
        return Err(AppError::validation("Shared secret must not be empty"));
    }

    let (digest_hex, presented_ext) = match presented_identifier.split_once('.') {
        Some((digest, ext)) => (digest, Some(ext)),
        None => (presented_identifier, None),
    };

    if presented_ext != file_extension(stored_file_name).as_deref() {
        return Err(AppError::unauthorized("Invalid secret"));
    }

    let digest =
        hex::decode(digest_hex).map_err(|_| AppError::unauthorized("Invalid secret"))?;

    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts keys of any size");
    mac.update(stored_file_name.as_bytes());
    mac.verify_slice(&digest)
        .map_err(|_| AppError::unauthorized("Invalid secret"))
}

/// Authorization decision for a download request.
///
/// Absent record wins over any secret check: an identifier that matches
/// nothing is not-found no matter what secret accompanies it.
pub fn authorize<'a>(
    record: Option<&'a FileRecord>,
    presented_identifier: &str,
    secret: &str,
) -> AppResult<&'a FileRecord> {
    let record = record.ok_or_else(|| AppError::not_found("File not found"))?;
    verify_identifier(secret, &record.file_name, presented_identifier)?;
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dropvault_core::ErrorKind;

    #[test]
    fn derivation_is_deterministic() {
        let a = derive_identifier("s1", "a.txt").unwrap();
        let b = derive_identifier("s1", "a.txt").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn distinct_secrets_diverge() {
        let a = derive_identifier("s1", "a.txt").unwrap();
        let b = derive_identifier("s2", "a.txt").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn distinct_names_diverge() {
        let a = derive_identifier("s1", "a.txt").unwrap();
        let b = derive_identifier("s1", "b.txt").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn extension_is_lowercased() {
        let id = derive_identifier("s1", "report.PDF").unwrap();
        assert!(id.ends_with(".pdf"), "got {id}");
        assert!(!id.ends_with(".PDF"));
    }

    #[test]
    fn extensionless_name_yields_bare_digest() {
        let id = derive_identifier("s1", "README").unwrap();
        assert_eq!(id.len(), 64);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn dotfile_has_no_extension() {
        assert_eq!(file_extension(".bashrc"), None);
        assert_eq!(file_extension("archive.tar.gz"), Some("gz".into()));
        assert_eq!(file_extension("trailing."), None);
        assert_eq!(file_extension("plain"), None);
    }

    #[test]
    fn empty_inputs_rejected() {
        assert_eq!(
            derive_identifier("", "a.txt").unwrap_err().kind,
            ErrorKind::Validation
        );
        assert_eq!(
            derive_identifier("s1", "").unwrap_err().kind,
            ErrorKind::Validation
        );
    }

    #[test]
    fn object_key_uses_prefix() {
        assert_eq!(object_key("uploads", "abc.pdf"), "uploads/abc.pdf");
        assert_eq!(object_key("uploads/", "abc.pdf"), "uploads/abc.pdf");
    }

    #[test]
    fn verify_accepts_matching_secret() {
        let id = derive_identifier("s1", "a.txt").unwrap();
        verify_identifier("s1", "a.txt", &id).unwrap();
    }

    #[test]
    fn verify_rejects_wrong_secret() {
        let id = derive_identifier("s1", "a.txt").unwrap();
        let err = verify_identifier("s2", "a.txt", &id).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Unauthorized);
    }

    #[test]
    fn verify_rejects_malformed_identifier() {
        let err = verify_identifier("s1", "a.txt", "not-hex.txt").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Unauthorized);
    }

    #[test]
    fn verify_rejects_wrong_extension_suffix() {
        let id = derive_identifier("s1", "a.txt").unwrap();
        let digest = id.strip_suffix(".txt").unwrap();
        let err = verify_identifier("s1", "a.txt", &format!("{digest}.pdf")).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Unauthorized);
    }

    #[test]
    fn authorize_round_trip() {
        let id = derive_identifier("s1", "a.txt").unwrap();
        let record = FileRecord::new(id.clone(), "a.txt");
        let resolved = authorize(Some(&record), &id, "s1").unwrap();
        assert_eq!(resolved.file_name, "a.txt");
    }

    #[test]
    fn authorize_missing_record_is_not_found() {
        let id = derive_identifier("s1", "a.txt").unwrap();
        let err = authorize(None, &id, "s1").unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);

        // The secret is irrelevant once the record is absent.
        let err = authorize(None, &id, "anything").unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[test]
    fn authorize_wrong_secret_is_unauthorized() {
        let id = derive_identifier("s1", "a.txt").unwrap();
        let record = FileRecord::new(id.clone(), "a.txt");
        let err = authorize(Some(&record), &id, "s2").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Unauthorized);
    }
}
