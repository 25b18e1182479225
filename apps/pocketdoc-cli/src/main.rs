//! PocketDoc command-line entry point

use anyhow::Result;
use clap::Parser;
use pocketdoc_cli::cli::{Cli, Command, FilesCommand, SignArgs, SignaturesCommand, SplitArgs};
use pocketdoc_cli::flows::{format_listing, format_signatures, SignatureSource};
use pocketdoc_cli::{App, Config};
use shared_types::OutputKind;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    pocketdoc_cli::logging::init(cli.verbose);

    let action = cli.command.action();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Failed to {}: {:#}", action, e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref())?;
    let mut app = App::from_config(&config)?;

    match cli.command {
        Command::Files(FilesCommand::List) => {
            print!("{}", format_listing(&app.list_files()?));
        }
        Command::Files(FilesCommand::Delete { path }) => {
            let path = app.delete_file(&path)?;
            println!("Deleted {}", path.display());
        }
        Command::Files(FilesCommand::Rename { path, new_name }) => {
            let renamed = app.rename_file(&path, &new_name)?;
            println!("{}", renamed.display());
        }
        Command::Scan { images } => {
            println!("{}", app.images_to_pdf(OutputKind::Scan, &images)?.display());
        }
        Command::Convert { images } => {
            let dest = app.images_to_pdf(OutputKind::Converted, &images)?;
            println!("{}", dest.display());
        }
        Command::Merge { pdfs } => {
            println!("{}", app.merge(&pdfs)?.display());
        }
        Command::Split(SplitArgs {
            pdf,
            ranges,
            page_count,
            probe_pages,
        }) => {
            for path in app.split(&pdf, &ranges, page_count, probe_pages)? {
                println!("{}", path.display());
            }
        }
        Command::Extract { pdf, pages } => {
            println!("{}", app.extract(&pdf, &pages)?.display());
        }
        Command::Compress { pdf, quality } => {
            let (dest, stats) = app.compress(&pdf, quality)?;
            println!("{}", dest.display());
            println!("Saved {}%", stats.saved_percent());
        }
        Command::Sign(SignArgs {
            pdf,
            signature_file,
            saved,
            save_signature,
            name,
        }) => {
            let source = match (signature_file, saved) {
                (Some(file), _) => SignatureSource::File(file),
                (None, Some(id)) => SignatureSource::Saved(id),
                (None, None) => anyhow::bail!("no signature given"),
            };
            let save = save_signature.then(|| name.unwrap_or_default());
            let signed = app.sign(&pdf, &source, save.as_deref())?;
            println!("{}", signed.path.display());
            if let Some(sig) = signed.saved {
                println!("Saved signature '{}' ({})", sig.name, sig.id);
            }
        }
        Command::Signatures(SignaturesCommand::List) => {
            print!("{}", format_signatures(&app.list_signatures()?));
        }
        Command::Signatures(SignaturesCommand::Delete { id }) => {
            if app.delete_signature(&id)? {
                println!("Deleted signature {}", id);
            } else {
                println!("No signature {}", id);
            }
        }
    }
    Ok(())
}
