use std::collections::HashSet;
use std::path::Path;
use std::path::PathBuf;
use walkdir::WalkDir;

/// GraphQL files found at or under a set of input paths.
#[derive(Debug, Default)]
pub(crate) struct GraphQLFiles {
    pub paths: Vec<PathBuf>,
    pub num_skipped: usize,
    pub errors: Vec<walkdir::Error>,
}

/// Recursively collects the files under `inputs` whose extension is in
/// `exts` (with or without a leading dot).
///
/// A single input naming a file is always taken, even when its extension
/// doesn't match, on the presumption that the user asked for that file
/// explicitly.
pub(crate) fn collect(inputs: &[PathBuf], exts: &[String]) -> GraphQLFiles {
    let exts: HashSet<&str> =
        exts.iter()
            .map(|ext| ext.trim_start_matches('.'))
            .collect();

    log::debug!("Scanning {} input paths...", inputs.len());
    let mut found = GraphQLFiles::default();
    for input in inputs {
        for entry in WalkDir::new(input.as_path()).follow_links(true).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    log::trace!(
                        "Encountered an error while iterating recursive \
                        filesystem entities at/under {input:#?}."
                    );
                    found.errors.push(err);
                    continue
                },
            };
            let path = entry.path();
            if !entry.file_type().is_file() {
                log::trace!("Skipping non-file: {path:#?}.");
                continue
            }
            if has_ext(path, &exts) {
                log::trace!("Found GraphQL file at {path:#?}.");
                found.paths.push(path.to_path_buf());
            } else {
                log::trace!("Skipping non-GraphQL file: {path:#?}.");
                found.num_skipped += 1;
            }
        }
    }

    if found.paths.is_empty()
        && let [only] = inputs
        && only.is_file() {
        log::warn!(
            "Proceeding with {only:#?} even though it doesn't match any of \
            the expected extensions ({}).",
            exts.iter()
                .map(|ext| format!("`.{ext}`"))
                .collect::<Vec<_>>()
                .join(", "),
        );
        found.paths.push(only.clone());
        found.num_skipped = 0;
    }

    log::debug!("Found {} GraphQL files.", found.paths.len());
    found
}

fn has_ext(path: &Path, exts: &HashSet<&str>) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| exts.contains(ext))
}
