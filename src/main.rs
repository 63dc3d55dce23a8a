use clap::{App, Arg, ArgMatches};
use log::LevelFilter;
use shader_bundler_core::prelude::*;
use std::process;

fn main() {
    let matches = cli().get_matches();

    let level = if matches.is_present("verbose") {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    if let Err(err) = Logger::init(!matches.is_present("no-color"), level) {
        eprintln!("{}", err);
        process::exit(1);
    }

    let options = options(&matches);

    // both positionals are required, clap exits before we get here without them
    if let (Some(input), Some(output)) = (
        matches.value_of_os("shader_folder"),
        matches.value_of_os("output_path"),
    ) {
        bundle(input, output, &options).unwrap_or_log("Bundle");
    }
}

fn cli<'a, 'b>() -> App<'a, 'b> {
    App::new("shader_bundler")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Bundles a directory of shaders into C++ char arrays")
        .arg(
            Arg::with_name("shader_folder")
                .value_name("SHADER_FOLDER")
                .required(true)
                .index(1)
                .help("Directory containing <name>.<stage> shader sources"),
        )
        .arg(
            Arg::with_name("output_path")
                .value_name("OUTPUT_PATH")
                .required(true)
                .index(2)
                .help("File to (over)write with the generated arrays"),
        )
        .arg(
            Arg::with_name("style")
                .short("s")
                .long("style")
                .value_name("STYLE")
                .possible_values(&["plain", "terminated"])
                .help("Array naming and termination style (default: plain)"),
        )
        .arg(
            Arg::with_name("sorted")
                .long("sorted")
                .help("Emit shaders in file name order"),
        )
        .arg(
            Arg::with_name("listing-order")
                .long("listing-order")
                .conflicts_with("sorted")
                .help("Emit shaders in directory listing order, even if the config sorts"),
        )
        .arg(
            Arg::with_name("config")
                .short("c")
                .long("config")
                .value_name("PATH")
                .help("YAML config file, flags take precedence over it"),
        )
        .arg(
            Arg::with_name("no-color")
                .long("no-color")
                .help("Don't color the console log"),
        )
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .long("verbose")
                .help("Log skipped files"),
        )
}

fn options(matches: &ArgMatches) -> BundleOptions {
    let mut options = match matches.value_of("config") {
        Some(path) => Config::load(path)
            .and_then(|config| config.bundle_options())
            .unwrap_or_log("Config"),
        None => BundleOptions::default(),
    };

    if let Some(style) = matches.value_of("style") {
        options.style = style
            .parse()
            .map_err(|style| ConfigError::InvalidStyle { style })
            .unwrap_or_log("Arguments");
    }

    if matches.is_present("sorted") {
        options.sorted = true;
    } else if matches.is_present("listing-order") {
        options.sorted = false;
    }

    options
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, src: &str) -> String {
        let path = dir.path().join("bundle.yml");
        fs::write(&path, src).expect("Failed to write test config");
        path.to_string_lossy().into_owned()
    }

    fn parse(args: &[&str]) -> BundleOptions {
        let matches = cli().get_matches_from(args);
        options(&matches)
    }

    #[test]
    fn defaults_to_plain_listing_order() {
        assert_eq!(
            parse(&["shader_bundler", "shaders", "shaders.cpp"]),
            BundleOptions::default()
        );
    }

    #[test]
    fn flags_select_style_and_order() {
        assert_eq!(
            parse(&[
                "shader_bundler",
                "--style",
                "terminated",
                "--sorted",
                "shaders",
                "shaders.cpp",
            ]),
            BundleOptions {
                style: Style::Terminated,
                sorted: true,
            }
        );
    }

    #[test]
    fn positionals_are_required() {
        assert!(cli()
            .get_matches_from_safe(&["shader_bundler", "shaders"])
            .is_err());
        assert!(cli()
            .get_matches_from_safe(&["shader_bundler", "a", "b", "c"])
            .is_err());
    }

    #[test]
    fn unknown_style_is_rejected() {
        assert!(cli()
            .get_matches_from_safe(&["shader_bundler", "-s", "c99", "a", "b"])
            .is_err());
    }

    #[test]
    fn flags_override_config() {
        let dir = TempDir::new().expect("Failed to create temp directory");
        let config = write_config(&dir, "style: terminated\nsorted: false\n");

        assert_eq!(
            parse(&[
                "shader_bundler",
                "-c",
                &config,
                "--style",
                "plain",
                "--sorted",
                "shaders",
                "shaders.cpp",
            ]),
            BundleOptions {
                style: Style::Plain,
                sorted: true,
            }
        );
    }

    #[test]
    fn config_applies_without_flags() {
        let dir = TempDir::new().expect("Failed to create temp directory");
        let config = write_config(&dir, "style: terminated\nsorted: true\n");

        assert_eq!(
            parse(&["shader_bundler", "--config", &config, "a", "b"]),
            BundleOptions {
                style: Style::Terminated,
                sorted: true,
            }
        );
    }

    #[test]
    fn listing_order_turns_config_sorting_off() {
        let dir = TempDir::new().expect("Failed to create temp directory");
        let config = write_config(&dir, "style: plain\nsorted: true\n");

        assert_eq!(
            parse(&["shader_bundler", "-c", &config, "--listing-order", "a", "b"]),
            BundleOptions::default()
        );
        assert!(cli()
            .get_matches_from_safe(&["shader_bundler", "--sorted", "--listing-order", "a", "b"])
            .is_err());
    }
}
