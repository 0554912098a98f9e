use std::sync::Arc;

use anyhow::{Context, Result};
use hemotype_config::ServerConfig;
use hemotype_store::ReportStore;
use hemotype_vision::{AgglutinationModel, CardAnalyzer, RtenModel, SectionClassifier};
use tracing::{info, warn};

pub struct ServerState {
    pub config: ServerConfig,
    pub analyzer: CardAnalyzer,
    pub reports: ReportStore,
}

impl ServerState {
    pub fn new(config: ServerConfig, analyzer: CardAnalyzer, reports: ReportStore) -> Self {
        Self {
            config,
            analyzer,
            reports,
        }
    }

    /// Loads the model (if present) and opens the report store.
    pub fn init(config: ServerConfig) -> Result<Self> {
        let model = RtenModel::load_if_present(&config.model_path)
            .with_context(|| format!("failed to load model from {:?}", config.model_path))?;

        let classifier = match model {
            Some(model) => {
                info!("Agglutination model ready: {:?}", model.path());
                let model: Arc<dyn AgglutinationModel> = Arc::new(model);
                SectionClassifier::new(model)
            }
            None => {
                warn!(
                    "Model not found at {:?}; every section will be reported as undetermined",
                    config.model_path
                );
                SectionClassifier::without_model()
            }
        };

        let reports = ReportStore::open(&config.reports_db).context("failed to open report store")?;
        if config.record_reports {
            info!("Recording analyses to {:?}", config.reports_db);
        }

        Ok(Self::new(config, CardAnalyzer::new(classifier), reports))
    }
}
