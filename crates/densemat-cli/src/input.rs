use anyhow::{Context, Result};
use std::{
    fs::File,
    io::{self, Read, Write},
    path::Path,
};

use densemat::{DenseMatrix, ProductConfig};

/// Read a matrix in the text format from `path`, or from stdin when `path` is `-`.
pub fn read_matrix<P: AsRef<Path>>(path: P) -> Result<DenseMatrix> {
    let path = path.as_ref();
    let content = if path == Path::new("-") {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read matrix from stdin")?;
        buf
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read matrix file: {}", path.display()))?
    };

    content
        .parse::<DenseMatrix>()
        .with_context(|| format!("Failed to parse matrix from {}", path.display()))
}

/// Load a product configuration from a JSON file. Missing fields keep their defaults.
pub fn load_product_config<P: AsRef<Path>>(path: P) -> Result<ProductConfig> {
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config: {}", path.as_ref().display()))?;
    let config: ProductConfig = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse config: {}", path.as_ref().display()))?;
    Ok(config)
}

/// Write the text rendering of `matrix` followed by a newline.
pub fn write_matrix(matrix: &DenseMatrix, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            let mut file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            writeln!(file, "{}", matrix)?;
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            writeln!(handle, "{}", matrix)?;
        }
    }
    Ok(())
}
