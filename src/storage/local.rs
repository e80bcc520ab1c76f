#[cfg(test)]
use std::path::Path;
use std::path::PathBuf;

use crate::core::DocumentResult;

/// Cópia em disco dos PDFs entregues. Um arquivo por nome; o último vence.
#[derive(Debug, Clone)]
pub struct LocalArchive {
    dir: PathBuf,
}

impl LocalArchive {
    /// Cria o diretório se ainda não existir.
    pub async fn new(dir: impl Into<PathBuf>) -> DocumentResult<Self> {
        let dir = dir.into();
        tokio::fs::create_dir_all(&dir).await?;
        Ok(LocalArchive { dir })
    }

    #[cfg(test)]
    fn dir(&self) -> &Path {
        &self.dir
    }

    /// Grava os bytes em `<dir>/<filename>` e devolve o caminho.
    pub async fn put_object(&self, filename: &str, data: &[u8]) -> DocumentResult<PathBuf> {
        let path = self.dir.join(filename);
        tokio::fs::write(&path, data).await?;
        tracing::debug!("Documento arquivado em {}", path.display());
        Ok(path)
    }

    #[cfg(test)]
    async fn get_object_bytes(&self, filename: &str) -> DocumentResult<Vec<u8>> {
        Ok(tokio::fs::read(self.dir.join(filename)).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[actix_web::test]
    async fn same_name_overwrites() {
        let tmp = tempfile::tempdir().unwrap();
        let archive = LocalArchive::new(tmp.path().join("pdfs")).await.unwrap();

        archive.put_object("recibo_ana.pdf", b"primeiro").await.unwrap();
        let path = archive.put_object("recibo_ana.pdf", b"segundo").await.unwrap();

        assert_eq!(path, archive.dir().join("recibo_ana.pdf"));
        assert_eq!(archive.get_object_bytes("recibo_ana.pdf").await.unwrap(), b"segundo");
    }
}
