use super::PageData;
use super::assets::INDEX_HTML;
use crate::render::RenderContext;

/// Render a self-contained page for the session.
///
/// The session data is embedded as `window.__REPOVIZ_DATA__`; the page then
/// renders without a server (explain requests are disabled).
pub fn export_html(ctx: &RenderContext) -> Result<String, serde_json::Error> {
    let data = PageData::new(ctx).with_scenes(ctx);
    let json = serde_json::to_string(&data)?;

    let script = format!(
        "<script>window.__REPOVIZ_DATA__ = {};</script>\n</head>",
        escape_script(&json)
    );
    let title = format!(
        "<title>repoviz - {}</title>",
        escape_html(&ctx.analysis().repo_info.name)
    );

    Ok(INDEX_HTML
        .replacen("<title>repoviz</title>", &title, 1)
        .replacen("</head>", &script, 1))
}

/// Keep embedded JSON from closing the surrounding `<script>` element.
fn escape_script(json: &str) -> String {
    json.replace("</", "<\\/")
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AnalysisResponse, Edge, Graph, Node, RepoInfo};

    fn context(name: &str, info: &str) -> RenderContext {
        RenderContext::new(AnalysisResponse {
            repo_info: RepoInfo {
                name: name.to_string(),
                ..Default::default()
            },
            dependency_data: Graph::new(
                vec![Node::new("a", "a.js").with_info(info), Node::new("b", "b.js")],
                vec![Edge::new("a", "b")],
            ),
            ..Default::default()
        })
    }

    #[test]
    fn test_export_embeds_all_scenes() {
        let html = export_html(&context("demo", "")).unwrap();

        assert!(html.contains("<title>repoviz - demo</title>"));
        assert!(html.contains("window.__REPOVIZ_DATA__ = {"));
        assert!(html.contains(r#""force":{"kind":"force""#));
        assert!(html.contains(r#""tree":{"kind":"tree""#));
        assert!(html.contains(r#""pack":{"kind":"pack""#));
        assert!(html.contains(r#""mermaid":"flowchart TD"#));
    }

    #[test]
    fn test_export_escapes_script_close() {
        let html = export_html(&context("<x>", "</script><script>alert(1)")).unwrap();

        assert!(!html.contains("</script><script>alert(1)"));
        assert!(html.contains(r"<\/script><script>alert(1)"));
        assert!(html.contains("<title>repoviz - &lt;x&gt;</title>"));
    }
}
