//! Graph command implementation for relational diagram generation.

use super::map::map_file;
use super::split_list;
use anyhow::{bail, Context, Result};
use er_relational::config::ErConfig;
use er_relational::graph::{compile_patterns, GraphView, Layout, OutputFormat};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus};

/// Run the graph command
#[allow(clippy::too_many_arguments)]
pub fn run(
    file: PathBuf,
    output: Option<PathBuf>,
    format: Option<String>,
    layout: Option<String>,
    tables: Option<String>,
    exclude: Option<String>,
    render: bool,
    config: Option<PathBuf>,
) -> Result<()> {
    let config = ErConfig::load_or_default(config.as_deref())?;

    // Flag, then output extension, then config, then DOT
    let format = if let Some(ref f) = format {
        f.parse::<OutputFormat>().map_err(|e| anyhow::anyhow!("{}", e))?
    } else if let Some(detected) = output
        .as_ref()
        .and_then(|out| out.extension())
        .and_then(|e| e.to_str())
        .and_then(OutputFormat::from_extension)
    {
        detected
    } else {
        config.graph.format.unwrap_or_default()
    };

    let layout = layout
        .map(|l| l.parse::<Layout>())
        .transpose()
        .map_err(|e| anyhow::anyhow!("{}", e))?
        .or(config.graph.layout)
        .unwrap_or(Layout::LR);

    let mut tables_filter = split_list(tables);
    if tables_filter.is_empty() {
        tables_filter = config.graph.tables.clone();
    }
    let mut exclude_filter = split_list(exclude);
    exclude_filter.extend(config.graph.exclude.iter().cloned());

    if !matches!(format, OutputFormat::Json) {
        eprintln!("Generating relational diagram: {} [format: {}]", file.display(), format);
    }

    let (_, schema) = map_file(&file, &config)?;

    let mut view = GraphView::from_schema(&schema);
    view.filter_tables(&compile_patterns(&tables_filter).map_err(anyhow::Error::msg)?);
    view.exclude_tables(&compile_patterns(&exclude_filter).map_err(anyhow::Error::msg)?);

    if view.is_empty() && !matches!(format, OutputFormat::Json) {
        eprintln!("No tables left after filtering.");
    }

    let title = file
        .file_name()
        .and_then(|n| n.to_str())
        .map(|n| format!("Relational diagram - {}", n))
        .unwrap_or_else(|| "Relational diagram".to_string());

    let output_content = format.render(&view, layout, &title);

    // Render to PNG/SVG/PDF if requested
    let should_render = render
        || output
            .as_ref()
            .and_then(|p| p.extension())
            .and_then(|e| e.to_str())
            .map(OutputFormat::is_image_extension)
            .unwrap_or(false);

    if should_render {
        if format != OutputFormat::Dot {
            bail!("--render requires DOT output, got {}", format);
        }
        match output {
            Some(ref out_path) => render_with_graphviz(&output_content, out_path)?,
            None => bail!("--render requires an output file (-o diagram.png)"),
        }
    } else if let Some(ref out_path) = output {
        let mut out = File::create(out_path)
            .with_context(|| format!("failed to create {}", out_path.display()))?;
        out.write_all(output_content.as_bytes())?;
        eprintln!("Diagram written to: {}", out_path.display());
    } else {
        println!("{}", output_content);
    }

    if !matches!(format, OutputFormat::Json) {
        eprintln!(
            "\nDiagram: {} tables, {} columns, {} foreign keys",
            view.table_count(),
            view.column_count(),
            view.edge_count()
        );
    }

    Ok(())
}

/// Render DOT to PNG/SVG/PDF using Graphviz
fn render_with_graphviz(dot_source: &str, output_path: &Path) -> Result<()> {
    let ext = output_path
        .extension()
        .and_then(|e| e.to_str())
        .filter(|e| OutputFormat::is_image_extension(e))
        .unwrap_or("png")
        .to_lowercase();

    let format_arg = format!("-T{}", ext);

    let mut child = Command::new("dot")
        .arg(&format_arg)
        .arg("-o")
        .arg(output_path)
        .stdin(std::process::Stdio::piped())
        .spawn()
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                anyhow::anyhow!(
                    "Graphviz 'dot' command not found. Install Graphviz or use --format mermaid instead."
                )
            } else {
                anyhow::anyhow!("Failed to run dot: {}", e)
            }
        })?;

    let status = feed_and_wait(&mut child, dot_source.as_bytes())?;
    if !status.success() {
        bail!("Graphviz dot command failed with status: {}", status);
    }

    eprintln!("Rendered to: {}", output_path.display());
    Ok(())
}

/// Write `input` to the child's stdin, close it and wait for the child.
/// The child is reaped even when the write fails.
fn feed_and_wait(child: &mut Child, input: &[u8]) -> Result<ExitStatus> {
    let written = child.stdin.take().map(|mut stdin| stdin.write_all(input));
    let status = child.wait()?;
    if let Some(result) = written {
        result.context("failed to write DOT source to Graphviz")?;
    }
    Ok(status)
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::process::Stdio;

    #[test]
    fn test_feed_and_wait_success() {
        let mut child = Command::new("cat")
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .spawn()
            .unwrap();
        let status = feed_and_wait(&mut child, b"digraph Relational {}\n").unwrap();
        assert!(status.success());
    }

    #[test]
    fn test_feed_and_wait_reaps_child_on_write_error() {
        let mut child = Command::new("true")
            .stdin(Stdio::piped())
            .spawn()
            .unwrap();
        let input = vec![b'x'; 4 * 1024 * 1024];

        let err = feed_and_wait(&mut child, &input).unwrap_err();
        assert!(err.to_string().contains("failed to write DOT source"));
        assert!(child.try_wait().unwrap().is_some());
    }
}
