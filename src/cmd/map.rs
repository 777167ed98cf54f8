//! Map command: ER model in, relational schema JSON out.

use anyhow::{bail, Context, Result};
use er_relational::config::ErConfig;
use er_relational::{ErModel, RelationalSchema, TableBuilder};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

pub fn run(
    file: PathBuf,
    output: Option<PathBuf>,
    config: Option<PathBuf>,
    stats: bool,
    verbose: bool,
) -> Result<()> {
    let config = ErConfig::load_or_default(config.as_deref())?;

    if output.is_some() {
        eprintln!("Mapping ER model: {}", file.display());
    }

    let (model, schema) = map_file(&file, &config)?;

    let json = schema.to_json_pretty()?;

    if let Some(ref out_path) = output {
        let mut out = File::create(out_path)
            .with_context(|| format!("failed to create {}", out_path.display()))?;
        out.write_all(json.as_bytes())?;
        out.write_all(b"\n")?;
        eprintln!("Schema written to: {}", out_path.display());
    } else {
        println!("{}", json);
    }

    if verbose {
        for table in schema.iter() {
            eprintln!(
                "  {:<32} pk=[{}] fk=[{}] {} columns ({} plain)",
                table.name,
                table.primary_key.join(", "),
                table.foreign_key_columns.join(", "),
                table.columns.len(),
                table.plain_columns().count()
            );
        }
    }

    if stats || verbose {
        eprintln!(
            "Mapped {} entities and {} relationships ({} attributes): {} tables, {} columns, {} foreign keys",
            model.entities.len(),
            model.relationships.len(),
            model.attribute_count(),
            schema.len(),
            schema.column_count(),
            schema.foreign_keys().len()
        );
    }

    Ok(())
}

/// Load an ER model and map it with the configured naming
pub(crate) fn map_file(file: &Path, config: &ErConfig) -> Result<(ErModel, RelationalSchema)> {
    if !file.exists() {
        bail!("input file does not exist: {}", file.display());
    }

    let model = ErModel::load(file)?;
    let schema = TableBuilder::new(&model)
        .with_naming(config.naming.clone())
        .build()
        .map_err(|e| {
            let kind = e.kind();
            anyhow::Error::new(e)
                .context(format!("failed to map {} ({})", file.display(), kind))
        })?;

    Ok((model, schema))
}
