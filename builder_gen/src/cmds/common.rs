/* Common utilities shared between analyze and codegen commands */

use crate::decl::DeclAdapters;
use crate::synth::{self, SynthesisReport};
use anyhow::Context;
use builder_types::{BuilderFile, BuilderSettings, TypeDecl};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/* An input document together with where it came from */
pub struct LoadedFile {
    pub path: PathBuf,
    pub file: BuilderFile,
}

pub fn load_file(path: &Path) -> anyhow::Result<BuilderFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let file = BuilderFile::from_yaml(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    debug!(path = %path.display(), types = file.types.len(), "loaded type file");
    Ok(file)
}

pub fn load_files(paths: &[PathBuf], verbose: bool) -> anyhow::Result<Vec<LoadedFile>> {
    let mut loaded = Vec::with_capacity(paths.len());
    for path in paths {
        let file = load_file(path)?;
        if verbose {
            println!("[~] Loaded {} ({} type(s))", path.display(), file.types.len());
        }
        loaded.push(LoadedFile {
            path: path.clone(),
            file,
        });
    }
    Ok(loaded)
}

/* Synthesize builders for every type of `file` that requests one, member types included */
pub fn synthesize_file(
    file: &mut BuilderFile,
    defaults: &BuilderSettings,
    adapters: &DeclAdapters,
) -> anyhow::Result<Vec<SynthesisReport>> {
    let mut reports = Vec::new();
    for decl in &mut file.types {
        synthesize_decl(decl, defaults, adapters, &mut reports)?;
    }
    Ok(reports)
}

fn synthesize_decl(
    decl: &mut TypeDecl,
    defaults: &BuilderSettings,
    adapters: &DeclAdapters,
    reports: &mut Vec<SynthesisReport>,
) -> anyhow::Result<()> {
    for member in &mut decl.member_types {
        synthesize_decl(member, defaults, adapters, reports)?;
    }

    let Some(options) = decl.builder.clone() else {
        return Ok(());
    };
    if decl.is_interface() {
        warn!(type_name = %decl.name, "builder requested on an interface, skipped");
        return Ok(());
    }

    let settings = options.resolve(defaults);
    let report = synth::synthesize(decl, &settings, &adapters.extension_adapters())
        .with_context(|| format!("Failed to synthesize builder for {}", decl.name))?;
    reports.push(report);
    Ok(())
}

/* `com.example.Pizza` style name used in console output */
pub fn qualified_name(file: &BuilderFile, type_name: &str) -> String {
    match &file.package {
        Some(package) => format!("{}.{}", package, type_name),
        None => type_name.to_string(),
    }
}
