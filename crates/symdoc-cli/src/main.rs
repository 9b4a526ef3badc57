//! symdoc CLI - generate documentation from an introspection symbol tree

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};

use symdoc_core::collection::ItemCollection;
use symdoc_core::export::{ExportOptions, Exporter, PageCount, SaveFormat};
use symdoc_core::input::decode_doc_files;
use symdoc_core::render::ExtensionGrouping;
use symdoc_core::symbol::Visibility;

#[derive(Parser)]
#[command(name = "symdoc")]
#[command(version = symdoc_core::VERSION)]
#[command(about = "Documentation generator for introspected symbol trees", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render documentation from a symbol-tree JSON file
    Export {
        /// Path to the introspection output (symbols.json)
        input: PathBuf,

        /// Output directory
        #[arg(long, short)]
        out: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value = "html")]
        format: FormatArg,

        /// Single concatenated page or one page per item
        #[arg(long, value_enum, default_value = "multiple")]
        pages: PagesArg,

        /// Lowest visibility level to document
        #[arg(long, value_enum, default_value = "internal")]
        min_visibility: VisibilityArg,

        /// Project title (defaults to the input file's parent directory name)
        #[arg(long)]
        title: Option<String>,

        /// Directory holding the static css/ and js/ viewer assets
        #[arg(long)]
        assets: Option<PathBuf>,

        /// Keep extension members out of the parent's Members list
        #[arg(long)]
        separate_extensions: bool,

        /// Skip the hidden docset TOC markers
        #[arg(long)]
        no_toc_links: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    Html,
    Markdown,
    Docset,
}

impl From<FormatArg> for SaveFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Html => SaveFormat::Html,
            FormatArg::Markdown => SaveFormat::Markdown,
            FormatArg::Docset => SaveFormat::Docset,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum PagesArg {
    Single,
    Multiple,
}

impl From<PagesArg> for PageCount {
    fn from(value: PagesArg) -> Self {
        match value {
            PagesArg::Single => PageCount::SinglePage,
            PagesArg::Multiple => PageCount::MultiPage,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum VisibilityArg {
    Private,
    Fileprivate,
    Internal,
    Public,
    Open,
}

impl From<VisibilityArg> for Visibility {
    fn from(value: VisibilityArg) -> Self {
        match value {
            VisibilityArg::Private => Visibility::Private,
            VisibilityArg::Fileprivate => Visibility::FilePrivate,
            VisibilityArg::Internal => Visibility::Internal,
            VisibilityArg::Public => Visibility::Public,
            VisibilityArg::Open => Visibility::Open,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Export {
            input,
            out,
            format,
            pages,
            min_visibility,
            title,
            assets,
            separate_extensions,
            no_toc_links,
        } => export(
            &input,
            &out,
            format.into(),
            pages.into(),
            min_visibility.into(),
            title,
            assets,
            separate_extensions,
            no_toc_links,
        ),
    }
}

#[allow(clippy::too_many_arguments, clippy::fn_params_excessive_bools)]
fn export(
    input: &Path,
    out: &Path,
    format: SaveFormat,
    pages: PageCount,
    min_visibility: Visibility,
    title: Option<String>,
    assets: Option<PathBuf>,
    separate_extensions: bool,
    no_toc_links: bool,
) -> Result<()> {
    let bytes = fs::read(input)
        .with_context(|| format!("reading symbol tree from {}", input.display()))?;
    let files = decode_doc_files(&bytes).context("decoding symbol tree")?;

    let project_dir = input
        .parent()
        .map(std::path::Path::to_path_buf)
        .unwrap_or_default();
    let title = title.unwrap_or_else(|| {
        project_dir
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "documentation".to_string())
    });

    let mut collection = ItemCollection::new(title);
    collection.project_directory = Some(project_dir);
    collection.minimum_visibility = min_visibility;
    let build = collection.add_files(&files);
    if build.skipped > 0 {
        tracing::warn!(skipped = build.skipped, "dropped incomplete containers");
    }

    let options = ExportOptions {
        format,
        pages,
        minimum_visibility: min_visibility,
        include_toc_links: !no_toc_links,
        extension_grouping: if separate_extensions {
            ExtensionGrouping::SeparateSection
        } else {
            ExtensionGrouping::FlattenIntoMembers
        },
        assets_dir: assets,
    };
    let report = Exporter::new(&collection, options).export(out);

    println!(
        "documented {} items across {} files ({} written)",
        build.built,
        files.len(),
        report.written.len()
    );
    for failure in &report.failures {
        eprintln!("failed: {}: {}", failure.path.display(), failure.message);
    }
    if report.is_complete() {
        Ok(())
    } else {
        anyhow::bail!("{} files could not be written", report.failures.len())
    }
}
