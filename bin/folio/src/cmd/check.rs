//! Check command - validate configuration and content

use color_eyre::eyre::{Result, bail};
use folio_core::{Config, Record, slug::is_valid_slug};
use folio_store::{Collection, CollectionState, ContentRepository};

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationResult {
    fn add_error(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    fn add_warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Run the check command.
///
/// Loads every collection and reports skipped files, unavailable
/// collections, invalid slugs and dangling related references.
pub fn run(config: &Config, strict: bool) -> Result<()> {
    tracing::info!(root = %config.content.root.display(), strict, "Checking content");

    println!("Checking content in {}...", config.content.root.display());
    let repo = ContentRepository::load(config);
    let result = validate(&repo);

    // Print summary
    println!();
    println!("Summary:");
    println!("  Errors:   {}", result.errors.len());
    println!("  Warnings: {}", result.warnings.len());

    if result.has_errors() {
        println!();
        println!("Errors:");
        for err in &result.errors {
            println!("  ✗ {err}");
        }
    }

    if result.has_warnings() {
        println!();
        println!("Warnings:");
        for warn in &result.warnings {
            println!("  ⚠ {warn}");
        }
    }

    // Determine exit status
    if result.has_errors() {
        bail!("Validation failed with {} error(s)", result.errors.len());
    }

    if strict && result.has_warnings() {
        bail!(
            "Validation failed with {} warning(s) (strict mode)",
            result.warnings.len()
        );
    }

    println!();
    println!("✓ All checks passed");

    Ok(())
}

/// Validate every collection of a loaded repository.
pub fn validate(repo: &ContentRepository) -> ValidationResult {
    let mut result = ValidationResult::default();

    for collection in repo.collections() {
        check_collection(collection, &mut result);
    }

    result
}

fn check_collection(collection: &Collection, result: &mut ValidationResult) {
    let name = collection.name();

    for issue in collection.issues() {
        result.add_error(format!("{name}: {issue}"));
    }

    if let CollectionState::Unavailable(reason) = collection.state() {
        result.add_warning(format!("{name}: unavailable ({reason})"));
        println!("  ⚠ {name}/ unavailable");
        return;
    }

    for item in collection.items() {
        if !is_valid_slug(&item.slug) {
            result.add_warning(format!(
                "{name}: slug `{}` is not URL-friendly ({})",
                item.slug,
                item.source.display()
            ));
        }

        if let Record::DesignedObject(object) = &item.record {
            for target in &object.related {
                if collection.get(target).is_none() {
                    result.add_warning(format!(
                        "{name}: `{}` relates to missing item `{target}`",
                        item.slug
                    ));
                }
            }
        }
    }

    if collection.issues().is_empty() {
        println!("  ✓ {name}/ {} item(s)", collection.items().len());
    } else {
        println!(
            "  ✗ {name}/ {} item(s), {} skipped",
            collection.items().len(),
            collection.issues().len()
        );
    }
}
