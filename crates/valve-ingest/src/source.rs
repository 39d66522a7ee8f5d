//! Seams for the workbook collaborators: decryption and sheet parsing.

use tracing::debug;

use valve_model::RawTable;

use crate::error::{IngestError, Result};

/// Compound-file signature used by password-protected Office workbooks.
const OLE_SIGNATURE: [u8; 8] = [0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];

/// Turns an opaque, possibly encrypted blob into plain tabular bytes.
pub trait WorkbookDecryptor {
    /// # Errors
    ///
    /// Returns [`IngestError::Decryption`] on a wrong password or a corrupt blob.
    fn decrypt(&self, password: Option<&str>, blob: Vec<u8>) -> Result<Vec<u8>>;
}

/// Parses one sheet out of decrypted workbook bytes.
pub trait SheetReader {
    /// Reads `sheet`, skipping `header_skip` leading rows before the header.
    fn read_sheet(&self, bytes: &[u8], sheet: &str, header_skip: usize) -> Result<RawTable>;
}

/// Accepts unencrypted input only.
///
/// Encrypted containers and supplied passwords are rejected, since this
/// decryptor has no key material to apply.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughDecryptor;

impl WorkbookDecryptor for PassthroughDecryptor {
    fn decrypt(&self, password: Option<&str>, blob: Vec<u8>) -> Result<Vec<u8>> {
        if blob.starts_with(&OLE_SIGNATURE) {
            return Err(IngestError::Decryption {
                reason: "input is an encrypted Office container; no decryption backend is configured"
                    .to_string(),
            });
        }
        if password.is_some_and(|value| !value.is_empty()) {
            return Err(IngestError::Decryption {
                reason: "a password was supplied but the input is not encrypted".to_string(),
            });
        }
        debug!(bytes = blob.len(), "input passed through unencrypted");
        Ok(blob)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_bytes_pass_through() {
        let bytes = b"Nr.;Prozedur\n".to_vec();
        let out = PassthroughDecryptor
            .decrypt(None, bytes.clone())
            .expect("plain input");
        assert_eq!(out, bytes);
    }

    #[test]
    fn encrypted_container_is_rejected() {
        let mut blob = OLE_SIGNATURE.to_vec();
        blob.extend_from_slice(&[0u8; 16]);
        let err = PassthroughDecryptor
            .decrypt(Some("geheim"), blob)
            .expect_err("encrypted");
        assert!(matches!(err, IngestError::Decryption { .. }));
    }

    #[test]
    fn password_on_plain_input_is_rejected() {
        let err = PassthroughDecryptor
            .decrypt(Some("geheim"), b"a,b\n".to_vec())
            .expect_err("unexpected password");
        assert!(err.to_string().contains("not encrypted"));
    }
}
