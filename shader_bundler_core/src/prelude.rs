pub use crate::{
    bundle::{bundle, BundleError, BundleOptions, BundleReport, Emitted},
    config::{Config, ConfigError},
    logger::{Logger, LoggerInitError, UnwrapOrLog},
    stage::{Stage, Style},
};
