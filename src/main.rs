use std::fs;
use std::io::{self, Read};
use std::process;

use clap::{App, Arg, ArgMatches};
use log::{error, info};

use struct_to_iots::generator::{Config, DialectKind, TypeScriptWriter};
use struct_to_iots::{convert_schema, ConversionError};

fn build_cli() -> App<'static, 'static> {
    App::new("struct2ts")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Generate io-ts codecs or TypeScript interfaces from struct schema documents")
        .arg(
            Arg::with_name("schema")
                .help("Schema document to read; stdin is used when omitted")
                .index(1),
        )
        .arg(
            Arg::with_name("root")
                .short("r")
                .long("root")
                .value_name("NAME")
                .help("Struct to generate from")
                .takes_value(true)
                .required(true),
        )
        .arg(
            Arg::with_name("dialect")
                .short("d")
                .long("dialect")
                .value_name("DIALECT")
                .help("Output dialect")
                .takes_value(true)
                .possible_values(&["io-ts", "interface"]),
        )
        .arg(
            Arg::with_name("arrays-optional")
                .long("arrays-optional")
                .help("Treat every slice and array field as optional"),
        )
        .arg(
            Arg::with_name("config")
                .short("c")
                .long("config")
                .value_name("FILE")
                .help("JSON configuration file")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("output")
                .short("o")
                .long("output")
                .value_name("FILE")
                .help("Write to FILE under the output directory instead of stdout")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("out-dir")
                .long("out-dir")
                .value_name("DIR")
                .help("Output directory, overriding the configuration")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .long("verbose")
                .multiple(true)
                .help("Increase log verbosity"),
        )
}

fn init_logging(verbosity: u64) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn load_config(matches: &ArgMatches) -> Result<Config, ConversionError> {
    let mut config = match matches.value_of("config") {
        Some(path) => {
            info!("Loading configuration from {}", path);
            Config::from_file(path)?
        }
        None => Config::default(),
    };

    if let Some(dialect) = matches.value_of("dialect") {
        // possible_values has already restricted the input
        if let Ok(kind) = dialect.parse::<DialectKind>() {
            config.dialect = kind;
        }
    }
    if matches.is_present("arrays-optional") {
        config.treat_arrays_as_optional = true;
    }
    if let Some(dir) = matches.value_of("out-dir") {
        config.output_dir = dir.to_string();
    }

    Ok(config)
}

fn read_schema(matches: &ArgMatches) -> Result<String, ConversionError> {
    match matches.value_of("schema") {
        Some(path) => {
            info!("Reading schema from {}", path);
            Ok(fs::read_to_string(path)?)
        }
        None if atty::is(atty::Stream::Stdin) => Err(ConversionError::FileReadError(io::Error::new(
            io::ErrorKind::InvalidInput,
            "no schema file given and stdin is a terminal",
        ))),
        None => {
            info!("Reading schema from stdin");
            let mut input = String::new();
            io::stdin().read_to_string(&mut input)?;
            Ok(input)
        }
    }
}

fn run(matches: &ArgMatches) -> Result<(), ConversionError> {
    let config = load_config(matches)?;
    let input = read_schema(matches)?;
    let root = matches.value_of("root").unwrap_or_default();

    let output = convert_schema(&input, root, &config)?;
    info!("Generated {} output for {}", config.dialect, root);

    match matches.value_of("output") {
        Some(name) => {
            let writer = TypeScriptWriter::from_config(&config);
            writer.write_file(&config.output_file_name(name), &output)?;
        }
        None => print!("{}", output),
    }
    Ok(())
}

fn main() {
    let matches = build_cli().get_matches();
    init_logging(matches.occurrences_of("verbose"));

    if let Err(err) = run(&matches) {
        error!("{}", err);
        eprintln!("Error: {}", err);
        process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_overrides_config() {
        let matches = build_cli().get_matches_from(vec![
            "struct2ts",
            "schema.json",
            "--root",
            "Character",
            "--dialect",
            "interface",
            "--arrays-optional",
            "--out-dir",
            "types",
        ]);

        let config = load_config(&matches).unwrap();
        assert_eq!(config.dialect, DialectKind::Interface);
        assert!(config.treat_arrays_as_optional);
        assert_eq!(config.output_dir, "types");
        assert_eq!(matches.value_of("schema"), Some("schema.json"));
    }

    #[test]
    fn test_root_is_required() {
        let result = build_cli().get_matches_from_safe(vec!["struct2ts", "schema.json"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_dialect_is_rejected() {
        let result =
            build_cli().get_matches_from_safe(vec!["struct2ts", "--root", "A", "--dialect", "zod"]);
        assert!(result.is_err());
    }
}
