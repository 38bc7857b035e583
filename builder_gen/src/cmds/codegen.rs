/* Codegen command - synthesize builders and write Java sources */

use super::common::{load_files, qualified_name, synthesize_file};
use crate::codegen::{JavaCodeGenerator, JavaCodeGeneratorOptions};
use crate::config::GeneratorConfig;
use crate::decl::DeclAdapters;
use anyhow::Context;
use std::path::{Path, PathBuf};
use tracing::info;

/* Execute the codegen command */
pub fn run(
    files: Vec<PathBuf>,
    output_dir: Option<PathBuf>,
    config_path: Option<PathBuf>,
    verbose: bool,
) -> anyhow::Result<Vec<PathBuf>> {
    let config = GeneratorConfig::load(config_path.as_deref())?;
    let output_dir = output_dir.unwrap_or_else(|| config.output_dir.clone());

    if verbose {
        println!("Staged Builder Generator - Code Generation Tool");
        println!("===============================================\n");
        println!("[~] Configuration:");
        println!("  Output directory: {}", output_dir.display());
        println!("  Indent: {}", config.indent);
        println!("  Input files: {}", files.len());
        for file in &files {
            println!("    - {}", file.display());
        }
        println!();
    }

    let mut loaded = load_files(&files, verbose)?;
    let adapters = DeclAdapters::default();
    let generator = JavaCodeGenerator::new(JavaCodeGeneratorOptions {
        indent: config.indent,
    });

    let mut written = Vec::new();
    for entry in &mut loaded {
        let reports = synthesize_file(&mut entry.file, &config.defaults, &adapters)
            .with_context(|| format!("Failed to process {}", entry.path.display()))?;
        for report in &reports {
            println!(
                "[✓] Synthesized builder for {} ({} stage interface(s))",
                qualified_name(&entry.file, &report.type_name),
                report.stage_interfaces.len()
            );
        }

        let package_dir = match entry.file.package_path() {
            Some(package_path) => output_dir.join(package_path),
            None => output_dir.clone(),
        };
        std::fs::create_dir_all(&package_dir)
            .with_context(|| format!("Failed to create {}", package_dir.display()))?;

        for decl in &entry.file.types {
            let source = generator.emit_file(
                entry.file.package.as_deref(),
                &entry.file.imports,
                decl,
            );
            let path = package_dir.join(format!("{}.java", decl.name));
            write_source(&path, &source)?;
            info!(path = %path.display(), "wrote java source");
            if verbose {
                println!("[✓] Generated {}", path.display());
            }
            written.push(path);
        }
    }

    println!("[✓] Wrote {} file(s) to {}", written.len(), output_dir.display());
    Ok(written)
}

fn write_source(path: &Path, source: &str) -> anyhow::Result<()> {
    std::fs::write(path, source).with_context(|| format!("Failed to write {}", path.display()))
}
