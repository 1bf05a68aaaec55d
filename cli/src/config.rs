use palette_core::config::PaletteConfig;
use palette_core::errors::GeminiResult;

use crate::cli::Args;

/// Command-line flags as a config layer
pub fn overrides_from_args(args: &Args) -> PaletteConfig {
    PaletteConfig {
        api_key: args.api_key.clone(),
        model_name: args.model.clone(),
        log_level: args.verbose.then(|| "debug".to_string()),
        ..PaletteConfig::default()
    }
}

/// File and environment settings, with command-line flags on top
pub fn resolve_config(args: &Args) -> GeminiResult<PaletteConfig> {
    let loaded = PaletteConfig::load(args.config.as_deref())?;
    Ok(loaded.merge(&overrides_from_args(args)))
}
