use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use markdown_notion_config::Config;
use markdown_notion_engine::notes::{self, NoteDraft};
use markdown_notion_engine::notion::{NotionClient, NotionSettings, wire};
use markdown_notion_engine::{BlockId, markdown_to_blocks};

#[derive(Parser)]
#[command(name = "markdown-notion", version, about = "Write Markdown notes to Notion")]
struct Cli {
    /// Config file to use instead of ~/.config/markdown-notion/config.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the Notion blocks for a Markdown file as JSON
    Convert {
        /// Markdown file, or `-` for stdin
        file: PathBuf,

        #[arg(long)]
        pretty: bool,
    },

    /// Create a new note page
    Create {
        file: PathBuf,

        #[command(flatten)]
        note: NoteArgs,

        /// Knowledge domain; picks the target database and becomes a tag
        #[arg(long)]
        category: Option<String>,

        /// Extra tag. Repeatable.
        #[arg(long = "tag")]
        tags: Vec<String>,

        /// Source URL of the note
        #[arg(long)]
        url: Option<String>,

        /// Target database id, overriding the configured one
        #[arg(long)]
        database: Option<String>,
    },

    /// Append an update section to an existing page
    Append {
        page: String,
        file: PathBuf,

        #[command(flatten)]
        note: NoteArgs,
    },

    /// Replace the content of an existing page
    Overwrite {
        page: String,
        file: PathBuf,

        #[command(flatten)]
        note: NoteArgs,
    },

    /// Print the text of a page
    Read { page: String },
}

#[derive(clap::Args)]
struct NoteArgs {
    #[arg(long)]
    title: String,

    /// Summary shown in a callout at the top of the page
    #[arg(long)]
    summary: Option<String>,
}

impl NoteArgs {
    fn draft(&self, markdown_body: String) -> NoteDraft {
        NoteDraft {
            title: self.title.clone(),
            summary: self.summary.clone(),
            markdown_body,
            ..Default::default()
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Command::Convert { file, pretty } => {
            let blocks = wire::blocks_json(&markdown_to_blocks(&read_markdown(&file)?));
            let json = if pretty {
                serde_json::to_string_pretty(&blocks)?
            } else {
                serde_json::to_string(&blocks)?
            };
            println!("{json}");
        }
        Command::Create {
            file,
            note,
            category,
            tags,
            url,
            database,
        } => {
            let config = load_config(cli.config.as_deref())?;
            let database = match (database, category.as_deref()) {
                (Some(db), _) => db,
                (None, category) => config
                    .database_for(category.unwrap_or(notes::DEFAULT_CATEGORY))
                    .map(str::to_string)
                    .ok_or_else(|| anyhow!("No database configured; pass --database"))?,
            };

            let mut draft = note.draft(read_markdown(&file)?);
            draft.tags = category.into_iter().chain(tags).collect();
            draft.source_url = url;

            let mut client = client(&config)?;
            let report = notes::create_note(&mut client, &database, &draft)
                .context("Failed to create note")?;
            println!("{}", report.page);
        }
        Command::Append { page, file, note } => {
            let config = load_config(cli.config.as_deref())?;
            let draft = note.draft(read_markdown(&file)?);
            let mut client = client(&config)?;
            let report = notes::append_update(&mut client, &BlockId::new(page), &draft)
                .context("Failed to append update")?;
            log::info!("Appended {} blocks in {} calls", report.blocks, report.calls);
        }
        Command::Overwrite { page, file, note } => {
            let config = load_config(cli.config.as_deref())?;
            let draft = note.draft(read_markdown(&file)?);
            let mut client = client(&config)?;
            let report = notes::overwrite_note(&mut client, &BlockId::new(page), &draft)
                .context("Failed to overwrite page")?;
            log::info!(
                "Replaced {} blocks using {} append calls",
                report.deleted,
                report.batches
            );
        }
        Command::Read { page } => {
            let config = load_config(cli.config.as_deref())?;
            let mut client = client(&config)?;
            let text = notes::page_text(&mut client, &BlockId::new(page))
                .context("Failed to read page")?;
            println!("{text}");
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    let config_path = path.map_or_else(Config::config_path, Path::to_path_buf);
    log::debug!("Config path: {}", config_path.display());
    Config::load_from_path(&config_path)?.ok_or_else(|| {
        anyhow!(
            "No config file found; create one at {}",
            config_path.display()
        )
    })
}

fn client(config: &Config) -> Result<NotionClient> {
    let settings = NotionSettings {
        token: config.notion.token.clone(),
        api_base: config.notion.api_base.clone(),
        notion_version: config.notion.notion_version.clone(),
        timeout: config.notion.timeout(),
    };
    NotionClient::new(settings).context("Failed to build HTTP client")
}

fn read_markdown(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut markdown = String::new();
        std::io::stdin()
            .read_to_string(&mut markdown)
            .context("Failed to read stdin")?;
        return Ok(markdown);
    }
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}
