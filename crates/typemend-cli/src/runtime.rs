//! Provider-chain assembly and the filesystem unit store.
//!
//! The chain's priority order is load-bearing: the `require` rewrite must
//! fully finish before the core scan sees any unit, and both
//! post-processing passes read the modified-units set the scanner writes,
//! so they must not run until it is exhausted.

use std::fs;
use std::time::Duration;

use camino::{Utf8Path, Utf8PathBuf};
use typemend_config::Options;
use typemend_engine::{
    EngineError, ModifiedUnits, ProviderChain, RunSummary, SingleUse, UnitStore, WaveBudget,
    WaveProvider, WaveScanner, run_waves,
};
use typemend_mutators::{registered_mutators, require_rewrite_wave};
use typemend_syntax::ProjectLoader;

use crate::providers::{mark_files_modified_wave, trailing_newline_wave};

/// Filesystem-backed unit store rooted at the project directory.
pub(crate) struct FsStore {
    root: Utf8PathBuf,
}

impl FsStore {
    pub(crate) const fn new(root: Utf8PathBuf) -> Self {
        Self { root }
    }
}

impl UnitStore for FsStore {
    fn read_unit(&self, unit: &Utf8Path) -> Result<String, EngineError> {
        fs::read_to_string(self.root.join(unit))
            .map_err(|error| EngineError::read_unit(unit.to_owned(), error))
    }

    fn write_unit(&mut self, unit: &Utf8Path, text: &str) -> Result<(), EngineError> {
        fs::write(self.root.join(unit), text)
            .map_err(|error| EngineError::write_unit(unit.to_owned(), error))
    }
}

/// Assembles the full provider chain for a run, in priority order:
/// `require` rewrite, core scanner, mark-files-modified, trailing newline.
pub(crate) fn build_provider_chain(
    options: &Options,
    modified: &ModifiedUnits,
) -> Result<ProviderChain, EngineError> {
    let mut providers: Vec<Box<dyn WaveProvider>> = Vec::new();

    if options.fixes.require_imports {
        let root = options.root.clone();
        let include = options.include.clone();
        let recorder = modified.clone();
        providers.push(Box::new(SingleUse::new(move || {
            require_rewrite_wave(&root, &include, &recorder)
        })));
    }

    let loader = ProjectLoader::new(options.root.clone(), &options.include)
        .map_err(|error| EngineError::configuration(error.to_string()))?;
    let budget = WaveBudget::new(
        options.limits.max_edits,
        Duration::from_millis(options.limits.max_elapsed_ms),
    );
    providers.push(Box::new(WaveScanner::new(
        loader,
        registered_mutators(&options.fixes),
        budget,
        modified.clone(),
    )));

    let mark_root = options.root.clone();
    let markers = options.files.clone();
    let mark_reader = modified.clone();
    providers.push(Box::new(SingleUse::new(move || {
        mark_files_modified_wave(&mark_root, &markers, &mark_reader)
    })));

    let newline_root = options.root.clone();
    let newline_reader = modified.clone();
    providers.push(Box::new(SingleUse::new(move || {
        trailing_newline_wave(&newline_root, &newline_reader)
    })));

    Ok(ProviderChain::new(providers))
}

/// Drives the composed provider to exhaustion against the on-disk project.
pub(crate) fn execute(options: &Options) -> Result<RunSummary, EngineError> {
    let modified = ModifiedUnits::new();
    let mut chain = build_provider_chain(options, &modified)?;
    let mut store = FsStore::new(options.root.clone());
    run_waves(&mut chain, &mut store)
}
