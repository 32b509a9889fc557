use crate::cli::ExplainArgs;
use crate::client::BackendClient;
use crate::style;
use std::io;

use super::{CommandContext, block_on};

pub fn cmd_explain(args: ExplainArgs) -> i32 {
    let ctx = CommandContext::new(args.backend.as_deref());

    let client = match BackendClient::new(&ctx.config.backend) {
        Ok(client) => client,
        Err(e) => {
            style::error(&format!("{}", e));
            return 1;
        }
    };

    style::status(&format!("Explaining {}", args.file_path));

    let explanation = match block_on(client.explain(&args.repo_url, &args.file_path)) {
        Ok(Ok(text)) => text,
        Ok(Err(e)) => {
            style::error(&format!("Explanation failed: {}", e));
            return 1;
        }
        Err(code) => return code,
    };

    if let Err(e) = style::render_markdown(&explanation, &mut io::stdout()) {
        style::error(&format!("Failed to write output: {}", e));
        return 1;
    }
    0
}
