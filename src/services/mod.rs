// Service exports
pub mod fixtures;
pub mod registry;
pub mod source;
pub mod synthetic;

pub use registry::{RegistryError, RegistrySource};
pub use source::{ProviderSource, SourceError};
pub use synthetic::SyntheticSource;

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use crate::config::{Settings, SourceKind};
use crate::core::{Matcher, ResultAssembler};

/// Errors raised while wiring up the configured provider source
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("live source selected but no [registry] section configured")]
    MissingRegistry,

    #[error("failed to build registry client: {0}")]
    Registry(#[from] RegistryError),
}

/// Build the provider source selected by configuration
pub fn build_source(settings: &Settings) -> Result<Arc<dyn ProviderSource>, SetupError> {
    let matcher = Matcher::new(settings.matching.defaults());
    let assembler = match settings.synthetic.seed {
        Some(seed) => ResultAssembler::seeded(seed),
        None => ResultAssembler::new(),
    };

    match settings.source.kind {
        SourceKind::Live => {
            let registry = settings.registry.as_ref().ok_or(SetupError::MissingRegistry)?;
            let source = RegistrySource::new(
                registry.endpoint.clone(),
                registry.api_key.clone(),
                Duration::from_secs(registry.timeout_secs.unwrap_or(30)),
                matcher,
                assembler,
            )?;
            Ok(Arc::new(source))
        }
        SourceKind::Synthetic => {
            let providers = match settings.synthetic.generated {
                Some(count) => {
                    let mut rng = match settings.synthetic.seed {
                        Some(seed) => StdRng::seed_from_u64(seed),
                        None => StdRng::from_os_rng(),
                    };
                    fixtures::generate_providers(settings.synthetic.center(), count, &mut rng)
                }
                None => fixtures::rome_directory(),
            };
            Ok(Arc::new(SyntheticSource::new(providers, matcher, assembler)))
        }
    }
}
