//! SHA-256 of local files, so a sample on disk can be pivoted on as a hash.

use anyhow::{Context, Result};
use sha2::{Digest, Sha256};
use std::path::Path;
use tokio::io::AsyncReadExt;

const BUF_SIZE: usize = 64 * 1024;

/// Lowercase hex SHA-256 of the file at `path`, read in chunks.
pub async fn sha256_path(path: &Path) -> Result<String> {
    let mut file = tokio::fs::File::open(path)
        .await
        .with_context(|| format!("open {}", path.display()))?;
    let mut hasher = Sha256::new();
    let mut buf = vec![0u8; BUF_SIZE];
    loop {
        let n = file
            .read(&mut buf)
            .await
            .with_context(|| format!("read {}", path.display()))?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(hex::encode(hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ioc::{detect_ioc_type, IocType};
    use std::io::Write;

    #[tokio::test]
    async fn digest_of_known_content_is_a_hash_ioc() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(b"hello\n").unwrap();
        f.flush().unwrap();

        let digest = sha256_path(f.path()).await.unwrap();
        assert_eq!(
            digest,
            "5891b5b522d5df086d0ff0b110fbd9d21bb4fc7163af34d08286a2e846f6be03"
        );
        assert_eq!(detect_ioc_type(&digest), IocType::Hash);
    }

    #[tokio::test]
    async fn missing_file_reports_path() {
        let err = sha256_path(Path::new("/nonexistent/sample.bin"))
            .await
            .unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/sample.bin"));
    }
}
