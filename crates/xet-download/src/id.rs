//! File identifier validation: exactly 64 lowercase hex characters,
//! rejected before any network I/O.

use crate::error::DownloadError;

/// Required length of a valid file identifier.
pub const FILE_ID_LEN: usize = 64;

/// Validates that `file_id` is exactly [`FILE_ID_LEN`] lowercase hex
/// characters. Uppercase hex, short/long IDs, and non-hex characters are
/// all rejected.
pub fn validate_file_id(file_id: &str) -> Result<(), DownloadError> {
    let is_valid = file_id.len() == FILE_ID_LEN
        && file_id
            .bytes()
            .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b));

    if is_valid {
        Ok(())
    } else {
        Err(DownloadError::InvalidFileId {
            file_id: xet_logging::truncate_file_id(file_id),
        })
    }
}
