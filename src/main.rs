use blog_add::assemble::{PostAssembler, PostSettings};
use blog_add::config::{self, BlogConfig, StorageBackend};
use blog_add::dates::DateStamp;
use blog_add::imaging::{ImageVariants, Quality, RustBackend, Upload};
use blog_add::storage::{DirectoryStore, HttpStore, ObjectStore};
use blog_add::{output, post};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "blog-add")]
#[command(about = "Turn a staged image and text into a blog post record")]
#[command(long_about = "\
Turn a staged image and text into a blog post record

Put one image and, optionally, one text file into the staging directory:

  add/
  ├── BlueHour.png      # Source image (.png or .jpg) → title \"Blue Hour\"
  └── post.md           # Optional markdown body (.md or .txt)

'blog-add add' resizes the image to the configured widths, uploads the
variants and the original, and writes posts/page<ID>.json with the next
free ID. Words tagged #like_this in the text become the post's tags.

Run 'blog-add gen-config' to generate a documented blog.toml.")]
#[command(version)]
struct Cli {
    /// Config file
    #[arg(long, default_value = "blog.toml", global = true)]
    config: PathBuf,

    /// Staging directory (overrides add_dir)
    #[arg(long, global = true)]
    add_dir: Option<PathBuf>,

    /// Post record directory (overrides posts_dir)
    #[arg(long, global = true)]
    posts_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build the staged post, upload its images and write the record
    Add {
        /// Resize only; image URLs are local paths
        #[arg(long)]
        no_upload: bool,
    },
    /// Validate the staging directory without resizing or uploading
    Check,
    /// Print a stock blog.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Add { no_upload } => {
            let overrides = no_upload.then(config::dry_run_overlay);
            let config = load_config(&cli, overrides)?;
            let date = DateStamp::now();
            let assembler = assembler(&config, date);

            let store = build_store(&config);
            let upload = if config.storage.upload {
                Upload::Enabled {
                    store: &*store,
                    bucket: config.storage.bucket.clone(),
                    key_prefix: config.storage.key_prefix.clone(),
                }
            } else {
                Upload::Disabled
            };

            let backend = RustBackend::new();
            let mut images = ImageVariants::new(
                &backend,
                assembler.source_image()?,
                Quality::new(config.images.quality),
                upload,
                date,
            );

            println!("==> Assembling post from {}", config.add_dir.display());
            let record = assembler.generate_post(&mut images)?;
            let written = post::write_record(&record, &config.posts_dir)?;
            output::print_post_output(&record, &written);
        }
        Command::Check => {
            let config = load_config(&cli, Some(config::dry_run_overlay()))?;
            println!("==> Checking {}", config.add_dir.display());
            let report = assembler(&config, DateStamp::now()).check()?;
            output::print_check_output(&report);
            println!("==> Staging directory is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Load the config file and apply directory overrides from the command line.
fn load_config(cli: &Cli, overrides: Option<toml::Value>) -> Result<BlogConfig, config::ConfigError> {
    let mut config = config::load_config_with(&cli.config, overrides)?;
    if let Some(dir) = &cli.add_dir {
        config.add_dir = dir.clone();
    }
    if let Some(dir) = &cli.posts_dir {
        config.posts_dir = dir.clone();
    }
    Ok(config)
}

fn assembler(config: &BlogConfig, date: DateStamp) -> PostAssembler {
    PostAssembler::new(
        PostSettings::from_config(config),
        &config.add_dir,
        &config.posts_dir,
        date,
    )
}

/// Object store selected by `storage.backend`.
fn build_store(config: &BlogConfig) -> Box<dyn ObjectStore> {
    let storage = &config.storage;
    match storage.backend {
        StorageBackend::Http => {
            let token = std::env::var(&storage.token_env).ok();
            Box::new(HttpStore::new(&storage.endpoint, storage.public_url(), token))
        }
        StorageBackend::Directory => {
            Box::new(DirectoryStore::new(storage.root.clone(), storage.public_url()))
        }
    }
}
