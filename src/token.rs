//! # token — Daily access token
//!
//! The token is issued by the broker's login flow and expires every day.
//! The operator pastes it into `TOKEN_FILE` each morning; we only read it.

use std::path::Path;

use crate::error::AppError;

/// Read and trim the token file.
pub fn read_access_token(path: &Path) -> Result<String, AppError> {
    if !path.exists() {
        return Err(AppError::TokenMissing(path.to_path_buf()));
    }

    let token = std::fs::read_to_string(path)?.trim().to_string();
    if token.is_empty() {
        return Err(AppError::TokenMissing(path.to_path_buf()));
    }

    Ok(token)
}

/// Value of the `Authorization` header the quote API expects.
#[inline]
pub fn authorization_header(client_id: &str, token: &str) -> String {
    format!("{client_id}:{token}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_and_trims() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("access_token.txt");
        std::fs::write(&path, "  eyJhbGciOi.abc.def \n").unwrap();

        assert_eq!(read_access_token(&path).unwrap(), "eyJhbGciOi.abc.def");
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_access_token(&dir.path().join("access_token.txt")).unwrap_err();
        assert!(matches!(err, AppError::TokenMissing(_)));
    }

    #[test]
    fn test_empty_file_counts_as_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("access_token.txt");
        std::fs::write(&path, "\n   \n").unwrap();

        assert!(matches!(read_access_token(&path), Err(AppError::TokenMissing(_))));
    }

    #[test]
    fn test_authorization_header() {
        assert_eq!(authorization_header("XH11906", "tok"), "XH11906:tok");
    }
}
