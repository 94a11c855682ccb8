use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};

use nanobanana::banner::{BannerInfo, print_banner, print_session_summary};
use nanobanana::bot::{Bot, BotConfig, Services};
use nanobanana::captioner::gemini::GeminiCaptioner;
use nanobanana::captioner::{Captioner, split_captions};
use nanobanana::chat::ChatPlatform;
use nanobanana::chat::telegram::TelegramChat;
use nanobanana::config::Settings;
use nanobanana::consts::{DEFAULT_POLL_TIMEOUT_SECS, default_db_path};
use nanobanana::prompts::caption_prompt;
use nanobanana::publisher;
use nanobanana::records::PostStore;
use nanobanana::records::sqlite::SqlitePosts;
use nanobanana::records::supabase::SupabasePosts;
use nanobanana::storage::supabase::SupabaseStorage;

#[derive(Debug, Clone, Copy, PartialEq, ValueEnum)]
enum Records {
    Sqlite,
    Supabase,
}

#[derive(Parser)]
#[command(
    name = "nanobanana",
    version,
    about = "Photo in, three captions out, one post."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Where photo records are kept
    #[arg(short, long, value_enum, default_value_t = Records::Sqlite)]
    records: Records,

    /// SQLite database path for records (use :memory: for ephemeral)
    #[arg(short, long)]
    db: Option<String>,

    /// Gemini model name (overrides GEMINI_MODEL)
    #[arg(long)]
    model: Option<String>,

    /// Storage bucket for photos (overrides SUPABASE_BUCKET)
    #[arg(long)]
    bucket: Option<String>,

    /// Long-poll timeout in seconds
    #[arg(long, default_value_t = DEFAULT_POLL_TIMEOUT_SECS)]
    poll_timeout: u64,

    /// Never post, even when page credentials are set
    #[arg(long, default_value_t = false)]
    dry_run: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Caption a local image and print the three options
    Caption {
        /// JPEG file to caption
        image: PathBuf,
    },
    /// Show the latest stored record for a user
    History {
        /// Telegram user id
        user_id: i64,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let mut settings = Settings::from_env();
    if let Some(model) = &cli.model {
        settings.gemini_model = model.clone();
    }
    if let Some(bucket) = &cli.bucket {
        settings.bucket = bucket.clone();
    }

    if let Some(command) = &cli.command {
        return match command {
            Command::Caption { image } => handle_caption(&settings, image).await,
            Command::History { user_id } => handle_history(&cli, &settings, *user_id).await,
        };
    }

    let chat = Arc::new(TelegramChat::new(settings.require_telegram_token()?));
    let bot_name = chat
        .identity()
        .await
        .context("failed to reach Telegram; check TOKEN_TELEGRAM")?;
    tracing::info!(bot = %bot_name, "connected to Telegram");

    let (supabase_url, supabase_key) = settings.require_supabase()?;
    let storage = Arc::new(SupabaseStorage::new(
        supabase_url,
        supabase_key,
        &settings.bucket,
    ));

    let captioner = Arc::new(GeminiCaptioner::new(
        settings.require_gemini_key()?,
        Some(settings.gemini_model.clone()),
    ));

    let (posts, records_label) = open_posts(&cli, &settings)?;

    let publisher = publisher::select(settings.publisher_credentials(), cli.dry_run);

    print_banner(&BannerInfo {
        bot: &bot_name,
        captioner: &format!("gemini ({})", captioner.model()),
        storage: &format!("supabase bucket {}", storage.bucket()),
        records: &records_label,
        publisher: &publisher.label(),
    });

    let mut bot = Bot::new(
        Services {
            chat,
            store: storage,
            captioner,
            posts,
            publisher,
        },
        BotConfig {
            poll_timeout: Duration::from_secs(cli.poll_timeout),
            ..BotConfig::default()
        },
    );

    if let Err(e) = bot.register_commands().await {
        tracing::warn!(error = %e, "failed to register commands");
    }

    tokio::select! {
        result = bot.run() => result?,
        _ = tokio::signal::ctrl_c() => {
            println!();
            tracing::info!("shutting down");
        }
    }

    print_session_summary(bot.stats());
    Ok(())
}

/// Open the configured record store and describe it for the banner.
fn open_posts(cli: &Cli, settings: &Settings) -> anyhow::Result<(Arc<dyn PostStore>, String)> {
    match cli.records {
        Records::Sqlite => {
            let path = cli
                .db
                .clone()
                .unwrap_or_else(|| default_db_path().to_string_lossy().into_owned());
            let posts: Arc<dyn PostStore> = Arc::new(
                SqlitePosts::open(&path)
                    .with_context(|| format!("failed to open records database {path}"))?,
            );
            Ok((posts, format!("sqlite {path}")))
        }
        Records::Supabase => {
            let (url, key) = settings.require_supabase()?;
            let posts: Arc<dyn PostStore> = Arc::new(SupabasePosts::new(url, key));
            Ok((posts, "supabase table".to_string()))
        }
    }
}

async fn handle_caption(settings: &Settings, image: &Path) -> anyhow::Result<()> {
    let bytes = tokio::fs::read(image)
        .await
        .with_context(|| format!("failed to read {}", image.display()))?;

    let captioner = GeminiCaptioner::new(
        settings.require_gemini_key()?,
        Some(settings.gemini_model.clone()),
    );
    let raw = captioner.suggest(&bytes, &caption_prompt()).await?;

    for (i, option) in split_captions(&raw).as_array().iter().enumerate() {
        println!("{}. {}\n", i + 1, option);
    }
    Ok(())
}

async fn handle_history(cli: &Cli, settings: &Settings, user_id: i64) -> anyhow::Result<()> {
    let (posts, _) = open_posts(cli, settings)?;
    match posts.latest_for(user_id).await? {
        Some(record) => {
            println!("record    {}", record.id);
            println!("created   {}", record.created_at.as_deref().unwrap_or("-"));
            println!("photo     {}", record.photo_url);
            println!("status    {}", record.status);
            for (i, option) in record.options.as_array().iter().enumerate() {
                println!("option {}  {}", i + 1, option);
            }
        }
        None => println!("no records for user {user_id}"),
    }
    Ok(())
}
