use crate::api::load_analysis_with_fs;
use crate::cli::ExportArgs;
use crate::fs::{FileSystem, default_fs};
use crate::render::RenderContext;
use crate::style;
use crate::viewer::export_html;

pub fn cmd_export(args: ExportArgs) -> i32 {
    cmd_export_with_fs(args, default_fs())
}

pub fn cmd_export_with_fs(args: ExportArgs, fs: &dyn FileSystem) -> i32 {
    let analysis = match load_analysis_with_fs(&args.analysis, fs) {
        Ok(analysis) => analysis,
        Err(e) => {
            style::error(&format!("{}", e));
            return 1;
        }
    };

    let html = match export_html(&RenderContext::new(analysis)) {
        Ok(html) => html,
        Err(e) => {
            style::error(&format!("Failed to embed analysis: {}", e));
            return 1;
        }
    };

    if let Err(e) = fs.write(&args.output, &html) {
        style::error(&format!("Failed to write export file: {}", e));
        return 1;
    }

    style::success(&format!("Viewer exported to: {}", style::path(&args.output)));
    0
}
