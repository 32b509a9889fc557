use crate::api::load_analysis_with_fs;
use crate::cli::ServeArgs;
use crate::client::BackendClient;
use crate::config::Config;
use crate::fs::{FileSystem, default_fs};
use crate::render::RenderContext;
use crate::style;
use crate::viewer::{self, AppState};

use super::{CommandContext, block_on};

pub fn cmd_serve(args: ServeArgs) -> i32 {
    let ctx = CommandContext::new(args.backend.as_deref());

    let state = match build_state(&args, &ctx.config, default_fs()) {
        Ok(state) => state,
        Err(code) => return code,
    };

    let port = args.port.unwrap_or(ctx.config.viewer.port);
    let open_browser = args.open || ctx.config.viewer.open_browser;

    match block_on(viewer::serve(state, port, open_browser)) {
        Ok(Ok(())) => 0,
        Ok(Err(e)) => {
            style::error(&format!("Server failed: {}", e));
            1
        }
        Err(code) => code,
    }
}

fn build_state(args: &ServeArgs, config: &Config, fs: &dyn FileSystem) -> Result<AppState, i32> {
    let client = BackendClient::new(&config.backend).map_err(|e| {
        style::error(&format!("{}", e));
        1
    })?;

    let Some(path) = &args.analysis else {
        style::status(&format!(
            "No analysis loaded; submit a repository URL in the page (backend: {})",
            style::url(client.base_url())
        ));
        return Ok(AppState::new(client));
    };

    let analysis = load_analysis_with_fs(path, fs).map_err(|e| {
        style::error(&format!("{}", e));
        1
    })?;
    style::status(&format!(
        "Loaded analysis of {} from {}",
        analysis.repo_info.name,
        style::path(path)
    ));
    Ok(AppState::with_session(client, RenderContext::new(analysis)))
}
