//! Serve command implementation

use relgen_fs::NormalizedPath;
use relgen_server::{AppState, ServerConfig, VariationServer};

use crate::config::Settings;
use crate::error::Result;

/// Run the serve command
pub fn run_serve(settings: &Settings) -> Result<()> {
    let state = AppState::load(
        NormalizedPath::new(&settings.variations),
        &settings.default_branch,
    )?;
    let config = ServerConfig::builder().port(settings.port).build();
    let server = VariationServer::new(state, config);

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(server.run())?;
    Ok(())
}
