use log::{debug, info};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::generator::config::Config;

/// Writer for generated TypeScript files
pub struct TypeScriptWriter {
    /// Base directory for output files
    output_dir: PathBuf,

    /// Whether to create directories if they don't exist
    create_dirs: bool,
}

/// Result type for writer operations
pub type WriterResult<T> = Result<T, io::Error>;

impl TypeScriptWriter {
    pub fn new<P: AsRef<Path>>(output_dir: P, create_dirs: bool) -> Self {
        TypeScriptWriter {
            output_dir: output_dir.as_ref().to_path_buf(),
            create_dirs,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        TypeScriptWriter::new(config.output_dir_path(), config.create_dirs)
    }

    /// Write `content` to `filename` under the output directory and return the full path
    pub fn write_file(&self, filename: &str, content: &str) -> WriterResult<PathBuf> {
        let file_path = self.output_dir.join(filename);

        if self.create_dirs {
            if let Some(parent) = file_path.parent() {
                fs::create_dir_all(parent)?;
            }
        }

        debug!("Writing file: {}", file_path.display());
        fs::write(&file_path, content)?;
        info!("Successfully wrote file: {}", file_path.display());

        Ok(file_path)
    }
}
