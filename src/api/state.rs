use std::sync::Arc;

use crate::core::{Company, DocumentResult, Settings};
use crate::storage::LocalArchive;

/// Read-only data shared by every worker.
#[derive(Clone)]
pub struct ApiState {
    pub settings: Arc<Settings>,
    pub company: Company,
    pub archive: Option<LocalArchive>,
}

impl ApiState {
    pub async fn new(settings: Settings) -> DocumentResult<Self> {
        let archive = match &settings.archive_dir {
            Some(dir) => {
                tracing::info!("Arquivando PDFs em {}", dir.display());
                Some(LocalArchive::new(dir.clone()).await?)
            }
            None => None,
        };

        Ok(ApiState {
            company: settings.company(),
            settings: Arc::new(settings),
            archive,
        })
    }

    pub fn max_items(&self) -> usize {
        self.settings.max_items
    }
}
