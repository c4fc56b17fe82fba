//! Skill directory scaffolder.
//!
//! [`create_scaffold`] validates a skill name and description, then lays out
//! a new skill directory under the output root:
//!
//! ```text
//! <output>/<name>/
//! ├── SKILL.md
//! ├── examples/
//! │   └── README.md
//! └── scripts/
//!     └── .gitkeep
//! ```
//!
//! Validation runs before any filesystem work. An existing skill directory
//! is never touched; a failure midway removes the partially written one.

mod template;
mod validate;

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::ScaffoldError;

pub use template::{examples_readme, skill_md, title_from_name};
pub use validate::{MAX_DESCRIPTION_LEN, MAX_NAME_LEN, validate_description, validate_name};

pub const SKILL_FILE: &str = "SKILL.md";
pub const EXAMPLES_DIR: &str = "examples";
pub const SCRIPTS_DIR: &str = "scripts";
pub const EXAMPLES_README: &str = "README.md";
pub const GITKEEP: &str = ".gitkeep";

/// Inputs for one scaffold run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldRequest {
    pub name: String,
    pub description: String,
    pub output: PathBuf,
}

impl ScaffoldRequest {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        output: impl Into<PathBuf>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            output: output.into(),
        }
    }

    /// Check name and description without touching the filesystem.
    pub fn validate(&self) -> Result<(), ScaffoldError> {
        validate_name(&self.name)?;
        validate_description(&self.description)
    }

    /// Validate, then write the skill directory.
    pub fn create(&self) -> Result<ScaffoldReport, ScaffoldError> {
        create_scaffold(&self.name, &self.description, &self.output)
    }
}

/// What a successful run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldReport {
    pub name: String,
    pub skill_dir: PathBuf,
}

impl ScaffoldReport {
    pub fn skill_file(&self) -> PathBuf {
        self.skill_dir.join(SKILL_FILE)
    }

    /// Every file written, in creation order.
    pub fn files(&self) -> Vec<PathBuf> {
        vec![
            self.skill_file(),
            self.skill_dir.join(EXAMPLES_DIR).join(EXAMPLES_README),
            self.skill_dir.join(SCRIPTS_DIR).join(GITKEEP),
        ]
    }
}

impl fmt::Display for ScaffoldReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Created skill '{}' at {}", self.name, self.skill_dir.display())?;
        writeln!(f)?;
        writeln!(f, "{}/", self.name)?;
        writeln!(f, "├── {SKILL_FILE}")?;
        writeln!(f, "├── {EXAMPLES_DIR}/")?;
        writeln!(f, "│   └── {EXAMPLES_README}")?;
        writeln!(f, "└── {SCRIPTS_DIR}/")?;
        writeln!(f, "    └── {GITKEEP}")?;
        writeln!(f)?;
        writeln!(f, "Next steps:")?;
        writeln!(f, "  1. Fill in the instructions in {}", self.skill_file().display())?;
        writeln!(f, "  2. Add usage examples under {EXAMPLES_DIR}/")?;
        write!(f, "  3. Put helper scripts under {SCRIPTS_DIR}/")
    }
}

/// Validate the inputs and create `<output>/<name>/` with its starter files.
///
/// The output root is created if missing. Fails with
/// [`ScaffoldError::AlreadyExists`] if the skill directory is already there,
/// leaving it unchanged.
pub fn create_scaffold(
    name: &str,
    description: &str,
    output: &Path,
) -> Result<ScaffoldReport, ScaffoldError> {
    validate_name(name)?;
    validate_description(description)?;

    if !output.exists() {
        fs::create_dir_all(output).map_err(|source| io_error(output, source))?;
        info!(dir = %output.display(), "created output directory");
    }

    let skill_dir = output.join(name);
    match fs::create_dir(&skill_dir) {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
            return Err(ScaffoldError::AlreadyExists(skill_dir));
        }
        Err(source) => return Err(io_error(&skill_dir, source)),
    }
    debug!(dir = %skill_dir.display(), "created skill directory");

    if let Err(e) = write_contents(&skill_dir, name, description) {
        if let Err(cleanup) = fs::remove_dir_all(&skill_dir) {
            warn!(dir = %skill_dir.display(), error = %cleanup, "failed to remove partial skill directory");
        }
        return Err(e);
    }

    Ok(ScaffoldReport {
        name: name.to_string(),
        skill_dir,
    })
}

fn write_contents(skill_dir: &Path, name: &str, description: &str) -> Result<(), ScaffoldError> {
    write_file(&skill_dir.join(SKILL_FILE), &skill_md(name, description))?;

    let examples = skill_dir.join(EXAMPLES_DIR);
    create_dir(&examples)?;
    write_file(&examples.join(EXAMPLES_README), &examples_readme(name))?;

    let scripts = skill_dir.join(SCRIPTS_DIR);
    create_dir(&scripts)?;
    write_file(&scripts.join(GITKEEP), "")
}

fn create_dir(path: &Path) -> Result<(), ScaffoldError> {
    fs::create_dir(path).map_err(|source| io_error(path, source))
}

fn write_file(path: &Path, contents: &str) -> Result<(), ScaffoldError> {
    fs::write(path, contents).map_err(|source| io_error(path, source))?;
    debug!(file = %path.display(), "wrote");
    Ok(())
}

fn io_error(path: &Path, source: io::Error) -> ScaffoldError {
    ScaffoldError::Io {
        path: path.to_path_buf(),
        source,
    }
}
