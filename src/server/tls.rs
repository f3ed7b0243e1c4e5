//! TLS configuration and certificate loading.

use std::path::Path;

use axum_server::tls_rustls::RustlsConfig;

use crate::error::SobrError;

/// Make `ring` the process-wide rustls provider.
///
/// Several crates in the tree enable different rustls backends, which leaves
/// rustls unable to pick one on its own.
pub fn install_crypto_provider() {
    // Err only means a provider is already installed
    let _ = rustls::crypto::ring::default_provider().install_default();
}

/// Load the server certificate chain and private key (PEM).
pub async fn load_tls_config(cert_path: &Path, key_path: &Path) -> Result<RustlsConfig, SobrError> {
    if !cert_path.is_file() {
        return Err(SobrError::TlsConfig(format!(
            "Certificate file not found: {}",
            cert_path.display()
        )));
    }
    if !key_path.is_file() {
        return Err(SobrError::TlsConfig(format!(
            "Private key file not found: {}",
            key_path.display()
        )));
    }

    install_crypto_provider();

    RustlsConfig::from_pem_file(cert_path, key_path)
        .await
        .map_err(|e| {
            SobrError::TlsConfig(format!(
                "Invalid certificate {} or key {}: {}",
                cert_path.display(),
                key_path.display(),
                e
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[tokio::test]
    async fn test_missing_certificate() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_tls_config(&dir.path().join("cert.pem"), &dir.path().join("key.pem"))
            .await
            .err()
            .unwrap();
        assert!(matches!(err, SobrError::TlsConfig(ref m) if m.contains("Certificate")));
    }

    #[tokio::test]
    async fn test_missing_key() {
        let dir = tempfile::tempdir().unwrap();
        let cert = dir.path().join("cert.pem");
        fs::write(&cert, "placeholder").unwrap();
        let err = load_tls_config(&cert, &dir.path().join("key.pem"))
            .await
            .err()
            .unwrap();
        assert!(matches!(err, SobrError::TlsConfig(ref m) if m.contains("Private key")));
    }

    #[tokio::test]
    async fn test_garbage_pem_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let cert = dir.path().join("cert.pem");
        let key = dir.path().join("key.pem");
        fs::write(&cert, "not a certificate").unwrap();
        fs::write(&key, "not a key").unwrap();

        let err = load_tls_config(&cert, &key).await.err().unwrap();
        assert!(matches!(err, SobrError::TlsConfig(_)));
    }
}
