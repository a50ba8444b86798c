//! Rendering of resolved chains

use ptl_template::{PipelineTemplate, TemplateFormat};

/// Render the chain as a YAML multi-document stream or a JSON array
pub(crate) fn render_chain(
    chain: &[PipelineTemplate],
    format: TemplateFormat,
) -> anyhow::Result<String> {
    match format {
        TemplateFormat::Json => Ok(serde_json::to_string_pretty(chain)?),
        TemplateFormat::Yaml => {
            let mut out = String::new();
            for template in chain {
                out.push_str("---\n");
                out.push_str(&format.encode(template)?);
            }
            Ok(out)
        }
    }
}

/// One line per template: position, label and declared parent
pub(crate) fn render_lineage(chain: &[PipelineTemplate]) -> String {
    chain
        .iter()
        .enumerate()
        .map(|(i, t)| format!("{i}\t{}\t{}\n", t.label(), t.parent_source().unwrap_or("-")))
        .collect()
}
