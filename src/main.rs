use clap::{Arg, ArgAction, Command};
use static_i18n::{DirectoryTarget, Options, StaticI18n, source};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let matches = Command::new("static-i18n")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Translate a static site into every locale of a gettext catalog directory")
        .arg(
            Arg::new("src")
                .help("Directory with the untranslated site")
                .required(true)
                .value_parser(clap::value_parser!(PathBuf))
                .index(1),
        )
        .arg(
            Arg::new("out")
                .long("out")
                .short('o')
                .help("Directory receiving one prefixed copy per locale")
                .required(true)
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("locale-dir")
                .long("locale-dir")
                .short('l')
                .help("Directory holding one subdirectory per locale")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("default-locale")
                .long("default-locale")
                .short('d')
                .help("Locale whose outputs keep the original paths"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("JSON options file (localeDir, defaultLocale, domain, pattern)")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log every translated file")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    let level = if matches.get_flag("verbose") {
        "debug"
    } else {
        "info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
        )
        .init();

    // Command line flags win over the options file
    let mut options = match matches.get_one::<PathBuf>("config") {
        Some(path) => Options::from_file(path)?,
        None => Options::default(),
    };
    if let Some(dir) = matches.get_one::<PathBuf>("locale-dir") {
        options.locale_dir = Some(dir.clone());
    }
    if let Some(locale) = matches.get_one::<String>("default-locale") {
        options.default_locale = Some(locale.clone());
    }

    let src = matches
        .get_one::<PathBuf>("src")
        .ok_or("missing source directory")?;
    let out = matches
        .get_one::<PathBuf>("out")
        .ok_or("missing output directory")?;

    let paths = source::collect_paths(src).await?;
    info!("Found {} source files in {}", paths.len(), src.display());

    let mut target = DirectoryTarget::new(out);
    let summary = StaticI18n::new(Some(&mut target), options, source::read_files(src, paths))
        .run()
        .await?;

    info!(
        "Wrote {} files for {} locales to {}",
        summary.outputs,
        summary.locales,
        target.root().display()
    );
    Ok(())
}
