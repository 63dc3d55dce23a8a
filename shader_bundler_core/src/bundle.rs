use crate::{
    emit,
    stage::{Stage, Style},
};
use err_derive::Error;
use log::{debug, info};
use std::{
    ffi::OsString,
    fs::{self, File},
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};

#[derive(Debug, Error)]
pub enum BundleError {
    #[error(
        display = "Shader file name {:?} must contain exactly one '.' (<name>.<stage>)",
        name
    )]
    MalformedFileName { name: String },
    #[error(display = "Shader file name {:?} is not valid UTF-8", name)]
    NonUtf8FileName { name: OsString },
    #[error(display = "Failed to read shader directory {:?}: {}", path, err)]
    ReadDir { path: PathBuf, err: io::Error },
    #[error(display = "Failed to read shader {:?}: {}", path, err)]
    ReadShader { path: PathBuf, err: io::Error },
    #[error(display = "Failed to create output file {:?}: {}", path, err)]
    CreateOutput { path: PathBuf, err: io::Error },
    #[error(display = "Failed to write output file {:?}: {}", path, err)]
    WriteOutput { path: PathBuf, err: io::Error },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BundleOptions {
    pub style: Style,
    /// Emit in file name order instead of directory listing order.
    pub sorted: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Emitted {
    pub identifier: String,
    pub path: PathBuf,
    /// Size of the source file, without any terminator.
    pub len: usize,
}

#[derive(Debug, Default)]
pub struct BundleReport {
    pub emitted: Vec<Emitted>,
    pub skipped: usize,
}

#[derive(Debug)]
struct ShaderFile {
    path: PathBuf,
    name: String,
    stem: String,
    stage: Option<Stage>,
}

/// Writes every recognized shader in `input` into `output` as a char array.
///
/// All file names are checked before `output` is touched, so a malformed
/// name never leaves a half written file behind. I/O errors past that point
/// can.
pub fn bundle(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    options: &BundleOptions,
) -> Result<BundleReport, BundleError> {
    let input = input.as_ref();
    let output = output.as_ref();

    let shaders = scan(input, options)?;

    let file = File::create(output).map_err(|err| BundleError::CreateOutput {
        path: output.to_owned(),
        err,
    })?;
    let mut out = BufWriter::new(file);
    let write_err = |err| BundleError::WriteOutput {
        path: output.to_owned(),
        err,
    };

    emit::write_header(&mut out).map_err(write_err)?;

    let mut report = BundleReport::default();
    for shader in shaders {
        let stage = match shader.stage {
            Some(stage) => stage,
            None => {
                debug!("Skipping {}", shader.name);
                report.skipped += 1;
                continue;
            }
        };

        let bytes = fs::read(&shader.path).map_err(|err| BundleError::ReadShader {
            path: shader.path.clone(),
            err,
        })?;

        let identifier = stage.identifier(&shader.stem, options.style);
        emit::write_declaration(&mut out, &identifier, &bytes, options.style)
            .map_err(write_err)?;

        info!("{} -> {} ({} bytes)", shader.name, identifier, bytes.len());

        report.emitted.push(Emitted {
            identifier,
            path: shader.path,
            len: bytes.len(),
        });
    }

    out.flush().map_err(write_err)?;

    info!(
        "Wrote {} {} shaders to {} ({} skipped)",
        report.emitted.len(),
        options.style,
        output.display(),
        report.skipped
    );

    Ok(report)
}

fn scan(input: &Path, options: &BundleOptions) -> Result<Vec<ShaderFile>, BundleError> {
    let read_dir_err = |err| BundleError::ReadDir {
        path: input.to_owned(),
        err,
    };

    let mut shaders = Vec::new();
    for entry in fs::read_dir(input).map_err(read_dir_err)? {
        let entry = entry.map_err(read_dir_err)?;

        if entry.file_type().map_err(read_dir_err)?.is_dir() {
            continue;
        }

        let path = entry.path();

        let name = entry
            .file_name()
            .into_string()
            .map_err(|name| BundleError::NonUtf8FileName { name })?;

        let (stem, extension) = split_file_name(&name)?;
        let stage = Stage::from_extension(extension, options.style);
        let stem = stem.to_owned();

        shaders.push(ShaderFile {
            path,
            name,
            stem,
            stage,
        });
    }

    if options.sorted {
        shaders.sort_by(|a, b| a.name.cmp(&b.name));
    }

    Ok(shaders)
}

fn split_file_name(name: &str) -> Result<(&str, &str), BundleError> {
    let mut parts = name.split('.');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(stem), Some(extension), None) => Ok((stem, extension)),
        _ => Err(BundleError::MalformedFileName {
            name: name.to_owned(),
        }),
    }
}
