/* Analyze command - report what synthesis produces for each type */

use super::common::{load_files, qualified_name, synthesize_file};
use crate::config::GeneratorConfig;
use crate::decl::DeclAdapters;
use crate::synth::SynthesisReport;
use anyhow::Context;
use builder_types::BuilderFile;
use clap::ValueEnum;
use std::path::PathBuf;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum DeclOutputFormat {
    Json,
    Yaml,
}

/* Execute the analyze command */
pub fn run(
    files: Vec<PathBuf>,
    config_path: Option<PathBuf>,
    print_decls: bool,
    format: DeclOutputFormat,
) -> anyhow::Result<Vec<SynthesisReport>> {
    println!("Staged Builder Generator - Type Analysis Tool");
    println!("=============================================\n");

    let config = GeneratorConfig::load(config_path.as_deref())?;
    let mut loaded = load_files(&files, true)?;
    let adapters = DeclAdapters::default();

    let mut all_reports = Vec::new();
    for entry in &mut loaded {
        let reports = synthesize_file(&mut entry.file, &config.defaults, &adapters)
            .with_context(|| format!("Failed to process {}", entry.path.display()))?;
        for report in &reports {
            print_report(&entry.file, report);
        }
        all_reports.extend(reports);
    }

    if all_reports.is_empty() {
        println!("\n[~] No type requests a builder");
    }

    if print_decls {
        let files: Vec<&BuilderFile> = loaded.iter().map(|entry| &entry.file).collect();
        match format {
            DeclOutputFormat::Json => {
                println!("\n[~] Synthesized Declarations (JSON)");
                println!("==================================");
                println!("{}", serde_json::to_string_pretty(&files)?);
            }
            DeclOutputFormat::Yaml => {
                println!("\n[~] Synthesized Declarations (YAML)");
                println!("==================================");
                for file in files {
                    println!("{}", serde_yml::to_string(file)?);
                }
            }
        }
    }

    Ok(all_reports)
}

fn print_report(file: &BuilderFile, report: &SynthesisReport) {
    println!("\n[~] {}", qualified_name(file, &report.type_name));
    println!("  Required fields: {}", list(&report.required_fields));
    println!("  Optional fields: {}", list(&report.optional_fields));
    println!("  Stages:");
    for (index, stage) in report.stage_interfaces.iter().enumerate() {
        println!("    {}. {}", index + 1, stage);
    }
    println!("  Optional stage methods: {}", list(&report.optional_methods));
    if !report.forwarded_methods.is_empty() {
        println!("  Forwarded methods: {}", list(&report.forwarded_methods));
    }
    for extension in &report.extensions {
        println!(
            "  Extension {} folded into {}",
            extension.method, extension.destination
        );
    }
}

fn list(names: &[String]) -> String {
    if names.is_empty() {
        "(none)".to_string()
    } else {
        names.join(", ")
    }
}
